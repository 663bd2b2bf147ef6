//! **octile-bench** runs the `octile-search` engines over benchmark
//! scenario files.
//!
//! - [`scenario`]: scenario file parsing and bucketing
//! - [`planner`]: solving and comparing engines over a scenario set
//! - [`display`]: colored console reports

pub mod display;
pub mod planner;
pub mod scenario;

pub use planner::{Comparison, LoadError, PlanSummary, Planner};
pub use scenario::{Scenario, ScenarioError, ScenarioSet, Version};
