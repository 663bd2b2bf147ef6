use octile_core::{Agent, Coordinate};

/// Cells from start to goal inclusive; empty when no path exists.
pub type Path = Vec<Coordinate>;

/// Counters accumulated over one search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Statistics {
    /// Expansion steps performed.
    pub expanded: u64,
    /// Successor records created or refreshed, plus the root.
    pub generated: u64,
    /// Extractions from the frontier (RBFS: recursive visits of non-goal
    /// nodes).
    pub popped: u64,
    /// Largest frontier size seen just before an extraction (RBFS: deepest
    /// recursion).
    pub peak_frontier: usize,
}

impl Statistics {
    #[inline]
    pub(crate) fn reset(&mut self) {
        *self = Self::default();
    }

    #[inline]
    pub(crate) fn sample_frontier(&mut self, size: usize) {
        self.peak_frontier = self.peak_frontier.max(size);
    }
}

/// How a search ended.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SearchStatus {
    /// The goal was reached.
    Found,
    /// The reachable space was exhausted without reaching the goal.
    #[default]
    Exhausted,
    /// No grid was configured; nothing was searched.
    NoGrid,
}

/// Outcome of [`PathFinder::solve_full_report`](crate::PathFinder::solve_full_report).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Report {
    path: Path,
    agent: Agent,
    stats: Statistics,
    status: SearchStatus,
    cost: f64,
}

impl Report {
    pub(crate) fn new(agent: Agent, path: Path, stats: Statistics, cost: f64) -> Self {
        let status = if path.is_empty() {
            SearchStatus::Exhausted
        } else {
            SearchStatus::Found
        };
        Self {
            path,
            agent,
            stats,
            status,
            cost,
        }
    }

    pub(crate) fn no_grid(agent: Agent) -> Self {
        Self {
            path: Vec::new(),
            agent,
            stats: Statistics::default(),
            status: SearchStatus::NoGrid,
            cost: 0.0,
        }
    }

    #[inline]
    pub fn path(&self) -> &[Coordinate] {
        &self.path
    }

    #[inline]
    pub fn into_path(self) -> Path {
        self.path
    }

    #[inline]
    pub fn agent(&self) -> &Agent {
        &self.agent
    }

    #[inline]
    pub fn stats(&self) -> &Statistics {
        &self.stats
    }

    #[inline]
    pub fn status(&self) -> SearchStatus {
        self.status
    }

    /// Whether a path was found.
    #[inline]
    pub fn is_solved(&self) -> bool {
        self.status == SearchStatus::Found
    }

    /// Sum of move weights along the path (0 when unsolved).
    #[inline]
    pub fn cost(&self) -> f64 {
        self.cost
    }
}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn report_round_trip() {
        let r = Report::new(
            Agent::from_cells(0, 0, 1, 1),
            vec![Coordinate::new(0, 0), Coordinate::new(1, 1)],
            Statistics {
                expanded: 1,
                generated: 9,
                popped: 2,
                peak_frontier: 8,
            },
            1.0,
        );
        let json = serde_json::to_string(&r).unwrap();
        let back: Report = serde_json::from_str(&json).unwrap();
        assert_eq!(r, back);
    }
}
