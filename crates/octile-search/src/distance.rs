use octile_core::Coordinate;

// Absolute row and column offsets, widened so that any pair of i32
// coordinates fits.
#[inline]
fn deltas(a: Coordinate, b: Coordinate) -> (i64, i64) {
    (
        (i64::from(a.row) - i64::from(b.row)).abs(),
        (i64::from(a.column) - i64::from(b.column)).abs(),
    )
}

/// Euclidean (L2) distance between two cells.
#[inline]
pub fn euclidean(a: Coordinate, b: Coordinate) -> f64 {
    let (dr, dc) = deltas(a, b);
    let (dr, dc) = (dr as f64, dc as f64);
    (dr * dr + dc * dc).sqrt()
}

/// Manhattan (L1) distance between two cells.
#[inline]
pub fn manhattan(a: Coordinate, b: Coordinate) -> f64 {
    let (dr, dc) = deltas(a, b);
    (dr + dc) as f64
}

/// Chebyshev (L∞) distance between two cells.
///
/// The exact move count on an 8-connected grid with unit weights, so it is
/// admissible and consistent for the default configuration.
#[inline]
pub fn chebyshev(a: Coordinate, b: Coordinate) -> f64 {
    let (dr, dc) = deltas(a, b);
    dr.max(dc) as f64
}

/// Default edge weight: 1 between distinct cells, 0 for a cell and itself.
#[inline]
pub fn unit_weight(a: Coordinate, b: Coordinate) -> f64 {
    if a != b { 1.0 } else { 0.0 }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distances() {
        let a = Coordinate::new(0, 0);
        let b = Coordinate::new(3, 4);
        assert_eq!(euclidean(a, b), 5.0);
        assert_eq!(manhattan(a, b), 7.0);
        assert_eq!(chebyshev(a, b), 4.0);
        assert_eq!(euclidean(b, b), 0.0);
    }

    #[test]
    fn extreme_coordinates_do_not_overflow() {
        let a = Coordinate::new(i32::MAX, i32::MAX);
        let b = Coordinate::new(i32::MIN, i32::MIN);
        let span = 2.0 * f64::from(i32::MAX) + 1.0;
        assert_eq!(chebyshev(a, b), span);
        assert_eq!(manhattan(a, b), 2.0 * span);
        assert!(euclidean(a, b) > span);
    }

    #[test]
    fn unit_weight_is_zero_on_identity() {
        let a = Coordinate::new(1, 1);
        assert_eq!(unit_weight(a, a), 0.0);
        assert_eq!(unit_weight(a, Coordinate::new(2, 2)), 1.0);
    }
}
