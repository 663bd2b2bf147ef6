use log::{debug, trace, warn};
use octile_core::{Agent, Coordinate, Grid};

use crate::config::SearchConfig;
use crate::frontier::{IndexedFrontier, Priority};
use crate::report::{Path, Report, Statistics};
use crate::table::{NodeId, NodeTable, SearchNode};
use crate::traits::PathFinder;

#[derive(Debug, Clone)]
struct AStarNode {
    at: Coordinate,
    parent: Coordinate,
    g: f64,
    f: f64,
    expanded: bool,
}

impl SearchNode for AStarNode {
    #[inline]
    fn coordinate(&self) -> Coordinate {
        self.at
    }

    #[inline]
    fn parent(&self) -> Coordinate {
        self.parent
    }
}

/// Classic A* with an exhaustive frontier.
///
/// Known but unexpanded nodes that are reached more cheaply have their
/// frontier entry lowered in place, so every generated node is queued at
/// most once.
#[derive(Debug)]
pub struct AStar<G> {
    config: SearchConfig<G>,
    table: NodeTable<AStarNode>,
    frontier: IndexedFrontier,
    stats: Statistics,
}

impl<G: Grid> Default for AStar<G> {
    fn default() -> Self {
        Self::new(SearchConfig::new())
    }
}

impl<G: Grid> AStar<G> {
    pub fn new(config: SearchConfig<G>) -> Self {
        Self {
            config,
            table: NodeTable::new(),
            frontier: IndexedFrontier::new(),
            stats: Statistics::default(),
        }
    }

    /// Counters from the most recent search.
    #[inline]
    pub fn stats(&self) -> &Statistics {
        &self.stats
    }

    fn search(&mut self, start: Coordinate, goal: Coordinate) -> Path {
        if !self.config.in_bounds(start) {
            return Vec::new();
        }

        let h = self.config.estimate(start, goal);
        let root = self.table.insert(AStarNode {
            at: start,
            parent: Coordinate::UNSET,
            g: 0.0,
            f: h,
            expanded: false,
        });
        self.stats.generated += 1;
        self.frontier.push(root, Priority::new(h, 0.0));

        loop {
            let size = self.frontier.len();
            let Some(id) = self.frontier.pop() else {
                return Vec::new();
            };
            self.stats.sample_frontier(size);
            self.stats.popped += 1;

            if self.table[id].at == goal {
                return self.table.reconstruct(start, goal);
            }
            self.expand(id, goal);
        }
    }

    fn expand(&mut self, id: NodeId, goal: Coordinate) {
        self.stats.expanded += 1;
        let (at, g) = (self.table[id].at, self.table[id].g);
        trace!("A*: expanding {at} (g = {g}, f = {})", self.table[id].f);

        for next in self.config.get_connectivity().around(at) {
            if !self.config.is_open(next) {
                continue;
            }
            let next_g = g + self.config.cost(at, next);
            let next_f = next_g + self.config.estimate(next, goal);
            let priority = Priority::new(next_f, next_g);

            match self.table.id(next) {
                Some(known) => {
                    let node = &mut self.table[known];
                    if node.expanded || node.g <= next_g {
                        continue;
                    }
                    node.g = next_g;
                    node.f = next_f;
                    node.parent = at;
                    if !self.frontier.decrease(known, priority) {
                        self.frontier.push(known, priority);
                    }
                }
                None => {
                    let fresh = self.table.insert(AStarNode {
                        at: next,
                        parent: at,
                        g: next_g,
                        f: next_f,
                        expanded: false,
                    });
                    self.stats.generated += 1;
                    self.frontier.push(fresh, priority);
                }
            }
        }

        self.table[id].expanded = true;
    }
}

impl<G: Grid> PathFinder<G> for AStar<G> {
    fn name(&self) -> &'static str {
        "A*"
    }

    fn config(&self) -> &SearchConfig<G> {
        &self.config
    }

    fn config_mut(&mut self) -> &mut SearchConfig<G> {
        &mut self.config
    }

    fn solve_full_report(&mut self, agent: &Agent) -> Report {
        self.table.clear();
        self.frontier.clear();
        self.stats.reset();

        if self.config.get_grid().is_none() {
            warn!("A*: no grid configured, returning an empty path");
            return Report::no_grid(*agent);
        }

        let path = self.search(agent.start(), agent.goal());
        let cost = self.config.path_cost(&path);
        let report = Report::new(*agent, path, self.stats, cost);
        debug!(
            "A*: {} -> {}: {:?}, cost {cost}, {} expanded, {} generated, {} popped, peak frontier {}, {} records",
            agent.start(),
            agent.goal(),
            report.status(),
            self.stats.expanded,
            self.stats.generated,
            self.stats.popped,
            self.stats.peak_frontier,
            self.table.len(),
        );
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SearchStatus;
    use octile_core::TerrainMap;

    fn engine(rows: &[&str]) -> AStar<TerrainMap> {
        let grid = TerrainMap::from_rows(rows).unwrap();
        AStar::new(SearchConfig::with_grid(grid))
    }

    #[test]
    fn open_grid_takes_the_diagonal() {
        let mut astar = engine(&["...", "...", "..."]);
        let report = astar.solve_full_report(&Agent::from_cells(0, 0, 2, 2));
        assert_eq!(
            report.path(),
            &[
                Coordinate::new(0, 0),
                Coordinate::new(1, 1),
                Coordinate::new(2, 2)
            ]
        );
        assert_eq!(report.cost(), 2.0);
        let s = report.stats();
        assert_eq!(s.expanded, 2);
        assert_eq!(s.generated, 9);
        assert_eq!(s.popped, 3);
        assert_eq!(s.peak_frontier, 7);
    }

    #[test]
    fn detours_around_blocked_centre() {
        let mut astar = engine(&["...", ".@.", "..."]);
        let report = astar.solve_full_report(&Agent::from_cells(0, 0, 2, 2));
        assert!(report.is_solved());
        assert_eq!(report.cost(), 3.0);
        assert_eq!(report.path().len(), 4);
        let s = report.stats();
        assert_eq!((s.expanded, s.generated, s.popped), (3, 7, 4));
    }

    #[test]
    fn start_is_goal() {
        let mut astar = engine(&["..", ".."]);
        let report = astar.solve_full_report(&Agent::from_cells(1, 1, 1, 1));
        assert_eq!(report.path(), &[Coordinate::new(1, 1)]);
        assert_eq!(report.stats().expanded, 0);
        assert_eq!(report.stats().generated, 1);
        assert_eq!(report.stats().popped, 1);
    }

    #[test]
    fn cheaper_route_lowers_queued_entry() {
        // Diagonals cost 3: (1,1) is first queued at g = 3 from the root,
        // then lowered to g = 2 through a cardinal neighbour.
        let grid = TerrainMap::new(2, 3);
        let cfg = SearchConfig::with_grid(grid)
            .custom_heuristic(|_, _| 0.0)
            .weight(|a: Coordinate, b: Coordinate| {
                if a.row != b.row && a.column != b.column { 3.0 } else { 1.0 }
            });
        let mut astar = AStar::new(cfg);
        let report = astar.solve_full_report(&Agent::from_cells(0, 0, 1, 2));
        assert!(report.is_solved());
        assert_eq!(report.cost(), 3.0);
        assert_eq!(report.stats().generated, 6);
    }

    #[test]
    fn no_grid_is_reported() {
        let mut astar: AStar<TerrainMap> = AStar::default();
        let report = astar.solve_full_report(&Agent::from_cells(0, 0, 1, 1));
        assert_eq!(report.status(), SearchStatus::NoGrid);
        assert!(report.path().is_empty());
        assert_eq!(*astar.stats(), Statistics::default());
    }
}
