use octile_core::{Agent, Grid};

use crate::config::SearchConfig;
use crate::report::{Path, Report};

/// A single-agent search engine over a [`Grid`].
///
/// Engines own their per-search state and clear it at the start of every
/// call, so one instance can serve any number of sequential queries.
pub trait PathFinder<G: Grid> {
    /// Short display name, e.g. `"A*"`.
    fn name(&self) -> &'static str;

    /// Grid, estimate, weight and connectivity used by the next search.
    fn config(&self) -> &SearchConfig<G>;

    /// Mutable access to the configuration between searches.
    fn config_mut(&mut self) -> &mut SearchConfig<G>;

    /// Replace the grid searched by subsequent calls.
    fn set_grid(&mut self, grid: G) {
        self.config_mut().set_grid(grid);
    }

    /// Path from the agent's start to its goal, both inclusive, or an empty
    /// path if the goal cannot be reached.
    fn solve(&mut self, agent: &Agent) -> Path {
        self.solve_full_report(agent).into_path()
    }

    /// Like [`solve`](PathFinder::solve), also returning the search
    /// statistics and outcome.
    fn solve_full_report(&mut self, agent: &Agent) -> Report;
}
