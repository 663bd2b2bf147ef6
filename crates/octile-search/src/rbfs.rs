use std::mem;

use log::{debug, trace, warn};
use octile_core::{Agent, Coordinate, Grid};

use crate::config::SearchConfig;
use crate::report::{Path, Report, Statistics};
use crate::table::{NodeId, NodeTable, SearchNode};
use crate::traits::PathFinder;

#[derive(Debug, Clone)]
struct RbfsNode {
    at: Coordinate,
    parent: Coordinate,
    g: f64,
    f: f64,
    /// Backed-up value, raised above `f` when the subtree below fails.
    stored: f64,
    /// Children in (stored, g) order.
    successors: Vec<NodeId>,
}

impl SearchNode for RbfsNode {
    #[inline]
    fn coordinate(&self) -> Coordinate {
        self.at
    }

    #[inline]
    fn parent(&self) -> Coordinate {
        self.parent
    }
}

/// Result of one recursive descent.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Descent {
    /// The goal was reached under the given bound.
    Found(f64),
    /// The subtree exceeds the bound; carries its new backed-up value.
    Failed(f64),
}

/// Recursive best-first search.
///
/// Only the active branch and its siblings are explored at a time: a subtree
/// is abandoned as soon as its best value exceeds the best alternative
/// elsewhere, and its backed-up value is remembered so re-entering it later
/// restores the bound without regenerating children.
///
/// The frontier is the recursion itself; `peak_frontier` reports the deepest
/// recursion reached.
#[derive(Debug)]
pub struct Rbfs<G> {
    config: SearchConfig<G>,
    table: NodeTable<RbfsNode>,
    stats: Statistics,
}

impl<G: Grid> Default for Rbfs<G> {
    fn default() -> Self {
        Self::new(SearchConfig::new())
    }
}

impl<G: Grid> Rbfs<G> {
    pub fn new(config: SearchConfig<G>) -> Self {
        Self {
            config,
            table: NodeTable::new(),
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
        let root = self.table.insert(RbfsNode {
            at: start,
            parent: Coordinate::UNSET,
            g: 0.0,
            f: h,
            stored: h,
            successors: Vec::new(),
        });
        self.stats.generated += 1;

        match self.descend(root, f64::INFINITY, 1, goal) {
            Descent::Found(bound) => {
                trace!("RBFS: reached {goal} under bound {bound}");
                self.table.reconstruct(start, goal)
            }
            Descent::Failed(_) => Vec::new(),
        }
    }

    fn descend(&mut self, id: NodeId, bound: f64, depth: usize, goal: Coordinate) -> Descent {
        self.stats.sample_frontier(depth);
        if self.table[id].at == goal {
            return Descent::Found(bound);
        }
        self.stats.popped += 1;
        self.expand(id, goal);

        let mut successors = mem::take(&mut self.table[id].successors);
        let outcome = loop {
            let Some(&best) = successors.first() else {
                break Descent::Failed(f64::INFINITY);
            };
            let best_value = self.table[best].stored;
            if !(best_value <= bound && best_value < f64::INFINITY) {
                break Descent::Failed(best_value);
            }
            let alternative = successors
                .get(1)
                .map_or(f64::INFINITY, |&s| self.table[s].stored);

            match self.descend(best, bound.min(alternative), depth + 1, goal) {
                found @ Descent::Found(_) => break found,
                Descent::Failed(backed_up) => {
                    self.table[best].stored = backed_up;
                    self.sort(&mut successors);
                }
            }
        };
        self.table[id].successors = successors;
        outcome
    }

    fn expand(&mut self, id: NodeId, goal: Coordinate) {
        let node = &mut self.table[id];
        let (at, g, f, stored) = (node.at, node.g, node.f, node.stored);
        let mut successors = mem::take(&mut node.successors);

        if stored > f {
            // Revisit: push the parent's backed-up value down to the children.
            for &s in &successors {
                let child = &mut self.table[s];
                child.stored = stored.max(child.f);
            }
        } else {
            self.stats.expanded += 1;
            trace!("RBFS: expanding {at} (g = {g}, f = {f})");
            for next in self.config.get_connectivity().around(at) {
                if !self.config.is_open(next) || self.table.id(next).is_some() {
                    continue;
                }
                self.stats.generated += 1;
                let next_g = g + self.config.cost(at, next);
                let next_f = next_g + self.config.estimate(next, goal);
                successors.push(self.table.insert(RbfsNode {
                    at: next,
                    parent: at,
                    g: next_g,
                    f: next_f,
                    stored: next_f,
                    successors: Vec::new(),
                }));
            }
        }

        self.sort(&mut successors);
        self.table[id].successors = successors;
    }

    fn sort(&self, successors: &mut [NodeId]) {
        successors.sort_by(|&a, &b| {
            let (a, b) = (&self.table[a], &self.table[b]);
            a.stored.total_cmp(&b.stored).then(a.g.total_cmp(&b.g))
        });
    }
}

impl<G: Grid> PathFinder<G> for Rbfs<G> {
    fn name(&self) -> &'static str {
        "RBFS"
    }

    fn config(&self) -> &SearchConfig<G> {
        &self.config
    }

    fn config_mut(&mut self) -> &mut SearchConfig<G> {
        &mut self.config
    }

    fn solve_full_report(&mut self, agent: &Agent) -> Report {
        self.table.clear();
        self.stats.reset();

        if self.config.get_grid().is_none() {
            warn!("RBFS: no grid configured, returning an empty path");
            return Report::no_grid(*agent);
        }

        let path = self.search(agent.start(), agent.goal());
        let cost = self.config.path_cost(&path);
        let report = Report::new(*agent, path, self.stats, cost);
        debug!(
            "RBFS: {} -> {}: {:?}, cost {cost}, {} expanded, {} generated, {} popped, max depth {}, {} records",
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

    fn engine(rows: &[&str]) -> Rbfs<TerrainMap> {
        let grid = TerrainMap::from_rows(rows).unwrap();
        Rbfs::new(SearchConfig::with_grid(grid))
    }

    #[test]
    fn open_grid() {
        let mut rbfs = engine(&["...", "...", "..."]);
        let report = rbfs.solve_full_report(&Agent::from_cells(0, 0, 2, 2));
        assert_eq!(
            report.path(),
            &[
                Coordinate::new(0, 0),
                Coordinate::new(1, 1),
                Coordinate::new(2, 2)
            ]
        );
        let s = report.stats();
        assert_eq!((s.expanded, s.generated, s.popped), (2, 9, 2));
        assert_eq!(s.peak_frontier, 3);
    }

    #[test]
    fn start_is_goal_pops_nothing() {
        let mut rbfs = engine(&["..", ".."]);
        let report = rbfs.solve_full_report(&Agent::from_cells(0, 1, 0, 1));
        assert_eq!(report.path(), &[Coordinate::new(0, 1)]);
        let s = report.stats();
        assert_eq!((s.expanded, s.generated, s.popped), (0, 1, 0));
        assert_eq!(s.peak_frontier, 1);
    }

    #[test]
    fn sealed_goal_backtracks() {
        let mut rbfs = engine(&[".....", ".....", ".....", "...@@", "...@."]);
        let report = rbfs.solve_full_report(&Agent::from_cells(0, 0, 4, 4));
        assert!(report.path().is_empty());
        assert!(!report.is_solved());
        let s = report.stats();
        assert_eq!((s.expanded, s.generated, s.popped), (21, 21, 50));
    }

    #[test]
    fn four_connected_open_grid() {
        let mut rbfs = engine(&["...", "...", "..."]);
        rbfs.config_mut().set_connectivity(crate::Connectivity::Four);
        let report = rbfs.solve_full_report(&Agent::from_cells(0, 0, 2, 2));
        assert_eq!(report.cost(), 4.0);
        assert_eq!(report.stats().expanded, 5);
    }
}
