use octile_core::{Coordinate, EIGHT_DIRECTIONS, FOUR_DIRECTIONS};

/// Which adjacency table successors are drawn from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Connectivity {
    /// Cardinal moves only.
    Four,
    /// Cardinal and diagonal moves.
    #[default]
    Eight,
}

impl Connectivity {
    /// The direction offsets, in expansion order.
    #[inline]
    pub const fn directions(self) -> &'static [Coordinate] {
        match self {
            Self::Four => &FOUR_DIRECTIONS,
            Self::Eight => &EIGHT_DIRECTIONS,
        }
    }

    /// Cells adjacent to `c`, unfiltered.
    #[inline]
    pub fn around(self, c: Coordinate) -> impl Iterator<Item = Coordinate> {
        self.directions().iter().map(move |&d| c + d)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn around_four() {
        let n: Vec<_> = Connectivity::Four.around(Coordinate::new(5, 5)).collect();
        assert_eq!(
            n,
            vec![
                Coordinate::new(6, 5),
                Coordinate::new(4, 5),
                Coordinate::new(5, 6),
                Coordinate::new(5, 4),
            ]
        );
    }

    #[test]
    fn around_eight_starts_with_cardinals() {
        let c = Coordinate::new(0, 0);
        let n: Vec<_> = Connectivity::Eight.around(c).collect();
        assert_eq!(n.len(), 8);
        assert_eq!(&n[..4], &Connectivity::Four.around(c).collect::<Vec<_>>()[..]);
        assert!(n.iter().all(|&m| c.is_adjacent(m)));
    }
}
