use std::path::Path;

use log::{info, warn};
use octile_core::{Agent, MapError, TerrainMap};
use octile_search::{PathFinder, Report};

use crate::scenario::{Scenario, ScenarioError, ScenarioSet};

/// Tolerance when comparing path costs from different engines.
const COST_EPSILON: f64 = 1e-9;

/// Either input of a [`Planner`] failed to load.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error(transparent)]
    Map(#[from] MapError),
    #[error(transparent)]
    Scenario(#[from] ScenarioError),
}

/// Success and failure counts of [`Planner::plan_all`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlanSummary {
    pub succeeded: usize,
    pub failed: usize,
}

/// Outcome of [`Planner::compare`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Comparison {
    pub agreed: usize,
    pub disagreed: usize,
}

/// Runs path finders over every scenario of one map.
#[derive(Debug)]
pub struct Planner {
    map: TerrainMap,
    scenarios: ScenarioSet,
}

impl Planner {
    pub fn new(map: TerrainMap, scenarios: ScenarioSet) -> Self {
        Self { map, scenarios }
    }

    /// Load a map file and a scenario file.
    pub fn load(map: impl AsRef<Path>, scenarios: impl AsRef<Path>) -> Result<Self, LoadError> {
        Ok(Self::new(TerrainMap::load(map)?, ScenarioSet::load(scenarios)?))
    }

    #[inline]
    pub fn map(&self) -> &TerrainMap {
        &self.map
    }

    #[inline]
    pub fn scenarios(&self) -> &ScenarioSet {
        &self.scenarios
    }

    /// Solve one agent on the planner's map.
    ///
    /// The agent is stamped on the map for the duration of the search.
    pub fn plan(&self, finder: &mut dyn PathFinder<TerrainMap>, agent: &Agent) -> Report {
        finder.set_grid(self.map.clone());
        let stamp = self.map.stamp_agent(agent);
        let report = finder.solve_full_report(agent);
        if let Some(stamp) = stamp {
            self.map.unstamp_agent(stamp);
        }
        report
    }

    /// Solve every scenario, handing each report to `on_report`.
    pub fn plan_all(
        &self,
        finder: &mut dyn PathFinder<TerrainMap>,
        mut on_report: impl FnMut(&Scenario, &Report),
    ) -> PlanSummary {
        let mut summary = PlanSummary::default();
        for scenario in self.scenarios.iter() {
            let report = self.plan(finder, &scenario.agent);
            if report.is_solved() {
                summary.succeeded += 1;
            } else {
                summary.failed += 1;
            }
            on_report(scenario, &report);
        }
        info!(
            "{}: {} succeeded, {} failed",
            finder.name(),
            summary.succeeded,
            summary.failed
        );
        summary
    }

    /// Run two finders on every scenario and count the agents on which they
    /// find paths of equal cost. Disagreements go to `on_mismatch` with the
    /// reference report first.
    pub fn compare(
        &self,
        reference: &mut dyn PathFinder<TerrainMap>,
        candidate: &mut dyn PathFinder<TerrainMap>,
        mut on_mismatch: impl FnMut(&Scenario, &Report, &Report),
    ) -> Comparison {
        let mut comparison = Comparison::default();
        for scenario in self.scenarios.iter() {
            let expected = self.plan(reference, &scenario.agent);
            let actual = self.plan(candidate, &scenario.agent);
            if same_cost(&expected, &actual) {
                comparison.agreed += 1;
            } else {
                warn!(
                    "{} and {} disagree on {} -> {}: cost {} vs {}",
                    reference.name(),
                    candidate.name(),
                    scenario.agent.start(),
                    scenario.agent.goal(),
                    expected.cost(),
                    actual.cost()
                );
                comparison.disagreed += 1;
                on_mismatch(scenario, &expected, &actual);
            }
        }
        comparison
    }
}

fn same_cost(a: &Report, b: &Report) -> bool {
    a.is_solved() == b.is_solved() && (a.cost() - b.cost()).abs() <= COST_EPSILON
}

#[cfg(test)]
mod tests {
    use super::*;
    use octile_core::Coordinate;
    use octile_search::{AStar, Heuristic, PeaStar, Rbfs, SearchConfig};

    const MAP: &str = "\
type octile
height 4
width 5
map
.....
.@@@.
.@@@.
.@.@.
";

    const SCENARIOS: &str = "\
version 1
0 test.map 5 4 0 0 4 0 4
0 test.map 5 4 0 0 2 3 5
1 test.map 5 4 4 3 0 0 5
2 test.map 5 4 4 0 4 3 3
";

    fn planner() -> Planner {
        Planner::new(
            TerrainMap::parse(MAP).unwrap(),
            ScenarioSet::parse(SCENARIOS).unwrap(),
        )
    }

    fn chebyshev() -> SearchConfig<TerrainMap> {
        SearchConfig::new().heuristic(Heuristic::Chebyshev)
    }

    #[test]
    fn plan_restores_map() {
        let p = planner();
        let before = p.map().render();
        let mut astar = AStar::new(chebyshev());
        let report = p.plan(&mut astar, &Agent::from_cells(0, 0, 2, 0));
        assert!(report.is_solved());
        assert_eq!(report.path().first(), Some(&Coordinate::new(0, 0)));
        assert_eq!(p.map().render(), before);
    }

    #[test]
    fn plan_all_counts_outcomes() {
        let p = planner();
        let mut astar = AStar::new(chebyshev());
        let mut seen = Vec::new();
        let summary = p.plan_all(&mut astar, |s, r| seen.push((s.bucket, r.is_solved())));
        // (3,2) is walled in on every side.
        assert_eq!(
            summary,
            PlanSummary {
                succeeded: 3,
                failed: 1
            }
        );
        assert_eq!(seen, vec![(0, true), (0, false), (1, true), (2, true)]);
    }

    #[test]
    fn compare_agreeing_engines() {
        let p = planner();
        let mut astar = AStar::new(chebyshev());
        let mut pea = PeaStar::new(chebyshev());
        let mut mismatches = 0;
        let c = p.compare(&mut astar, &mut pea, |_, _, _| mismatches += 1);
        assert_eq!(c, Comparison { agreed: 4, disagreed: 0 });
        assert_eq!(mismatches, 0);
    }

    #[test]
    fn compare_reports_mismatches() {
        let p = planner();
        let mut astar = AStar::new(chebyshev());
        // A zero-cost weight makes every path free, so costs differ.
        let mut free = Rbfs::new(chebyshev().weight(|_, _| 0.0));
        let mut flagged = Vec::new();
        let c = p.compare(&mut astar, &mut free, |s, expected, actual| {
            flagged.push(s.agent);
            assert!(expected.cost() > actual.cost());
        });
        // Only the unsolvable scenario agrees.
        assert_eq!(c, Comparison { agreed: 1, disagreed: 3 });
        assert_eq!(flagged.len(), 3);
    }

    #[test]
    fn load_reports_which_file_failed() {
        assert!(matches!(
            Planner::load("/no/map.map", "/no/scen.scen"),
            Err(LoadError::Map(MapError::Io(_)))
        ));
    }
}
