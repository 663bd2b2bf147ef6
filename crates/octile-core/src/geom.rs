//! Grid geometry: [`Coordinate`] and the fixed adjacency tables.
//!
//! Rows grow downwards and columns grow to the right, matching the layout of
//! octile map files.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{Add, Sub};

// ---------------------------------------------------------------------------
// Coordinate
// ---------------------------------------------------------------------------

/// An integer grid cell addressed by `(row, column)`.
///
/// The default value is [`Coordinate::UNSET`], which stands for "no cell"
/// (for example the parent of a search root).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Coordinate {
    pub row: i32,
    pub column: i32,
}

impl Coordinate {
    /// Sentinel for "unset", `(-1, -1)`.
    pub const UNSET: Self = Self {
        row: -1,
        column: -1,
    };

    /// Create a new coordinate.
    #[inline]
    pub const fn new(row: i32, column: i32) -> Self {
        Self { row, column }
    }

    /// Return a coordinate shifted by `(drow, dcolumn)`.
    #[inline]
    pub const fn shift(self, drow: i32, dcolumn: i32) -> Self {
        Self {
            row: self.row + drow,
            column: self.column + dcolumn,
        }
    }

    /// Whether this is the [`UNSET`](Self::UNSET) sentinel.
    #[inline]
    pub const fn is_unset(self) -> bool {
        self.row == -1 && self.column == -1
    }

    /// Whether `other` is one of the eight cells surrounding `self`.
    #[inline]
    pub fn is_adjacent(self, other: Coordinate) -> bool {
        let d = other - self;
        d != Self::new(0, 0) && d.row.abs() <= 1 && d.column.abs() <= 1
    }
}

impl Default for Coordinate {
    fn default() -> Self {
        Self::UNSET
    }
}

// --- trait impls for Coordinate ---

impl Hash for Coordinate {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.row.hash(state);
        self.column.hash(state);
    }
}

impl PartialOrd for Coordinate {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Coordinate {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.row
            .cmp(&other.row)
            .then(self.column.cmp(&other.column))
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.column)
    }
}

impl Add for Coordinate {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.row + rhs.row, self.column + rhs.column)
    }
}

impl Sub for Coordinate {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.row - rhs.row, self.column - rhs.column)
    }
}

impl From<(i32, i32)> for Coordinate {
    fn from((row, column): (i32, i32)) -> Self {
        Self::new(row, column)
    }
}

// ---------------------------------------------------------------------------
// Direction tables
// ---------------------------------------------------------------------------

/// Cardinal offsets: down, up, right, left.
pub const FOUR_DIRECTIONS: [Coordinate; 4] = [
    Coordinate::new(1, 0),
    Coordinate::new(-1, 0),
    Coordinate::new(0, 1),
    Coordinate::new(0, -1),
];

/// Cardinal offsets followed by the diagonals: down-right, up-right,
/// down-left, up-left.
///
/// Expansion order follows this table, so it also fixes how ties between
/// equally good successors are resolved.
pub const EIGHT_DIRECTIONS: [Coordinate; 8] = [
    Coordinate::new(1, 0),
    Coordinate::new(-1, 0),
    Coordinate::new(0, 1),
    Coordinate::new(0, -1),
    Coordinate::new(1, 1),
    Coordinate::new(-1, 1),
    Coordinate::new(1, -1),
    Coordinate::new(-1, -1),
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn default_is_unset() {
        let c = Coordinate::default();
        assert_eq!(c, Coordinate::new(-1, -1));
        assert!(c.is_unset());
        assert!(!Coordinate::new(0, 0).is_unset());
    }

    #[test]
    fn value_equality_and_hash() {
        let mut set = HashSet::new();
        set.insert(Coordinate::new(3, 4));
        assert!(set.contains(&Coordinate::new(3, 4)));
        assert!(!set.contains(&Coordinate::new(4, 3)));
    }

    #[test]
    fn ordering_is_row_major() {
        let mut v = vec![
            Coordinate::new(1, 0),
            Coordinate::new(0, 5),
            Coordinate::new(0, 1),
        ];
        v.sort();
        assert_eq!(
            v,
            vec![
                Coordinate::new(0, 1),
                Coordinate::new(0, 5),
                Coordinate::new(1, 0)
            ]
        );
    }

    #[test]
    fn arithmetic() {
        let a = Coordinate::new(2, 3);
        assert_eq!(a + Coordinate::new(1, -1), Coordinate::new(3, 2));
        assert_eq!(a - Coordinate::new(2, 3), Coordinate::new(0, 0));
        assert_eq!(a.shift(-2, 1), Coordinate::new(0, 4));
    }

    #[test]
    fn display() {
        assert_eq!(Coordinate::new(7, -2).to_string(), "(7, -2)");
    }

    #[test]
    fn adjacency() {
        let c = Coordinate::new(5, 5);
        for d in EIGHT_DIRECTIONS {
            assert!(c.is_adjacent(c + d));
        }
        assert!(!c.is_adjacent(c));
        assert!(!c.is_adjacent(Coordinate::new(7, 5)));
    }

    #[test]
    fn direction_tables_are_distinct() {
        let eight: HashSet<_> = EIGHT_DIRECTIONS.iter().copied().collect();
        assert_eq!(eight.len(), 8);
        assert!(!eight.contains(&Coordinate::new(0, 0)));
        for d in FOUR_DIRECTIONS {
            assert!(eight.contains(&d));
            assert_eq!(d.row.abs() + d.column.abs(), 1);
        }
    }
}
