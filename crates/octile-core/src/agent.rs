use crate::Coordinate;

/// A single agent: where it starts and where it wants to go.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Agent {
    start: Coordinate,
    goal: Coordinate,
}

impl Agent {
    /// Create an agent from its start and goal cells.
    pub const fn new(start: Coordinate, goal: Coordinate) -> Self {
        Self { start, goal }
    }

    /// Shorthand for `Agent::new(Coordinate::new(..), Coordinate::new(..))`.
    pub const fn from_cells(start_row: i32, start_column: i32, goal_row: i32, goal_column: i32) -> Self {
        Self {
            start: Coordinate::new(start_row, start_column),
            goal: Coordinate::new(goal_row, goal_column),
        }
    }

    #[inline]
    pub const fn start(&self) -> Coordinate {
        self.start
    }

    #[inline]
    pub const fn goal(&self) -> Coordinate {
        self.goal
    }
}
