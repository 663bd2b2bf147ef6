use std::collections::BinaryHeap;

use log::{debug, trace, warn};
use octile_core::{Agent, Coordinate, Grid};

use crate::config::SearchConfig;
use crate::frontier::{Priority, QueueEntry};
use crate::report::{Path, Report, Statistics};
use crate::table::{NodeId, NodeTable, SearchNode};
use crate::traits::PathFinder;

#[derive(Debug, Clone)]
struct PeaNode {
    at: Coordinate,
    parent: Coordinate,
    g: f64,
    f: f64,
    /// Backed-up bound: the cheapest child deferred so far.
    stored: f64,
    open: bool,
    expanded: bool,
}

impl SearchNode for PeaNode {
    #[inline]
    fn coordinate(&self) -> Coordinate {
        self.at
    }

    #[inline]
    fn parent(&self) -> Coordinate {
        self.parent
    }
}

/// Partial-expansion A*.
///
/// Expanding a node only queues the children whose `f` does not exceed the
/// node's stored bound. The others are deferred: the node goes back on the
/// frontier keyed by the cheapest deferred child and is expanded again when
/// that bound comes up. Once nothing is deferred the node is closed.
///
/// The frontier stays close to the set of children that A* would actually
/// extract, at the price of repeated expansions.
#[derive(Debug)]
pub struct PeaStar<G> {
    config: SearchConfig<G>,
    table: NodeTable<PeaNode>,
    queue: BinaryHeap<QueueEntry>,
    stats: Statistics,
}

impl<G: Grid> Default for PeaStar<G> {
    fn default() -> Self {
        Self::new(SearchConfig::new())
    }
}

impl<G: Grid> PeaStar<G> {
    pub fn new(config: SearchConfig<G>) -> Self {
        Self {
            config,
            table: NodeTable::new(),
            queue: BinaryHeap::new(),
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
        let root = self.table.insert(PeaNode {
            at: start,
            parent: Coordinate::UNSET,
            g: 0.0,
            f: h,
            stored: h,
            open: true,
            expanded: false,
        });
        self.stats.generated += 1;
        self.queue.push(QueueEntry {
            id: root,
            priority: Priority::new(h, 0.0),
        });

        loop {
            let size = self.queue.len();
            let Some(QueueEntry { id, .. }) = self.queue.pop() else {
                return Vec::new();
            };
            self.stats.sample_frontier(size);
            self.stats.popped += 1;

            let node = &self.table[id];
            if node.expanded {
                continue;
            }
            if node.at == goal {
                return self.table.reconstruct(start, goal);
            }
            self.expand(id, goal);
        }
    }

    fn expand(&mut self, id: NodeId, goal: Coordinate) {
        self.stats.expanded += 1;
        let node = &mut self.table[id];
        node.open = false;
        let (at, g, bound) = (node.at, node.g, node.stored);
        trace!("PEA*: expanding {at} (g = {g}, F = {bound})");

        let mut least = f64::INFINITY;
        for next in self.config.get_connectivity().around(at) {
            if !self.config.is_open(next) {
                continue;
            }
            if self.table.get(next).is_some_and(|n| n.expanded || n.open) {
                continue;
            }

            self.stats.generated += 1;
            let next_g = g + self.config.cost(at, next);
            let next_f = next_g + self.config.estimate(next, goal);
            let deferred = next_f > bound;
            let child = self.table.insert(PeaNode {
                at: next,
                parent: at,
                g: next_g,
                f: next_f,
                stored: next_f,
                open: !deferred,
                expanded: false,
            });
            if deferred {
                least = least.min(next_f);
            } else {
                self.queue.push(QueueEntry {
                    id: child,
                    priority: Priority::new(next_f, next_g),
                });
            }
        }

        let node = &mut self.table[id];
        if least.is_infinite() {
            node.expanded = true;
        } else {
            node.stored = least;
            node.open = true;
            self.queue.push(QueueEntry {
                id,
                priority: Priority::new(least, g),
            });
        }
    }
}

impl<G: Grid> PathFinder<G> for PeaStar<G> {
    fn name(&self) -> &'static str {
        "PEA*"
    }

    fn config(&self) -> &SearchConfig<G> {
        &self.config
    }

    fn config_mut(&mut self) -> &mut SearchConfig<G> {
        &mut self.config
    }

    fn solve_full_report(&mut self, agent: &Agent) -> Report {
        self.table.clear();
        self.queue.clear();
        self.stats.reset();

        if self.config.get_grid().is_none() {
            warn!("PEA*: no grid configured, returning an empty path");
            return Report::no_grid(*agent);
        }

        let path = self.search(agent.start(), agent.goal());
        let cost = self.config.path_cost(&path);
        let report = Report::new(*agent, path, self.stats, cost);
        debug!(
            "PEA*: {} -> {}: {:?}, cost {cost}, {} expanded, {} generated, {} popped, peak frontier {}, {} records",
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
    use octile_core::TerrainMap;

    fn engine(rows: &[&str]) -> PeaStar<TerrainMap> {
        let grid = TerrainMap::from_rows(rows).unwrap();
        PeaStar::new(SearchConfig::with_grid(grid))
    }

    #[test]
    fn open_grid_keeps_frontier_small() {
        let mut pea = engine(&["...", "...", "..."]);
        let report = pea.solve_full_report(&Agent::from_cells(0, 0, 2, 2));
        assert_eq!(
            report.path(),
            &[
                Coordinate::new(0, 0),
                Coordinate::new(1, 1),
                Coordinate::new(2, 2)
            ]
        );
        let s = report.stats();
        assert_eq!((s.expanded, s.generated, s.popped), (2, 11, 3));
        assert_eq!(s.peak_frontier, 3);
    }

    #[test]
    fn blocked_centre_reexpands_parents() {
        let mut pea = engine(&["...", ".@.", "..."]);
        let report = pea.solve_full_report(&Agent::from_cells(0, 0, 2, 2));
        assert_eq!(report.cost(), 3.0);
        let s = report.stats();
        assert_eq!((s.expanded, s.generated, s.popped), (4, 10, 5));
    }

    #[test]
    fn sealed_goal_exhausts() {
        let mut pea = engine(&[".....", ".....", ".....", "...@@", "...@."]);
        let report = pea.solve_full_report(&Agent::from_cells(0, 0, 4, 4));
        assert!(report.path().is_empty());
        let s = report.stats();
        assert_eq!((s.expanded, s.generated), (48, 93));
        assert!(s.popped >= s.expanded);
    }

    #[test]
    fn reuse_gives_same_answer() {
        let mut pea = engine(&["....", ".@@.", "...."]);
        let agent = Agent::from_cells(0, 0, 2, 3);
        let first = pea.solve_full_report(&agent);
        let second = pea.solve_full_report(&agent);
        assert_eq!(first, second);
        assert_eq!(pea.stats(), second.stats());
    }
}
