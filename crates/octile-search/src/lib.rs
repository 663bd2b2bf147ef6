//! Single-agent search on octile grids.
//!
//! Three interchangeable engines share one configuration type and one
//! reporting format, so they can be benchmarked against each other:
//!
//! - **A\*** with an indexed frontier and in-place decrease-key ([`AStar`])
//! - **Partial-expansion A\***, which defers costly children to keep the
//!   frontier small ([`PeaStar`])
//! - **Recursive best-first search**, which keeps no frontier at all: only
//!   the current branch is open, so its recursion depth rather than its
//!   record count is bounded by the search depth ([`Rbfs`])
//!
//! Every engine implements [`PathFinder`] and owns its per-search state, so a
//! single instance answers any number of sequential queries.
//!
//! # Configuration
//!
//! | Setting | Default |
//! |---|---|
//! | grid | none ([`SearchStatus::NoGrid`] until one is set) |
//! | heuristic | [`Heuristic::Euclidean`] |
//! | weight | [`unit_weight`] |
//! | connectivity | [`Connectivity::Eight`] |
//!
//! With unit weights only [`Heuristic::Chebyshev`] is admissible on an
//! 8-connected grid; the other presets can return longer paths.

mod astar;
mod config;
mod distance;
mod frontier;
mod neighbors;
mod peastar;
mod rbfs;
mod report;
mod table;
mod traits;


pub use astar::AStar;
pub use config::{CostFn, Heuristic, SearchConfig};
pub use distance::{chebyshev, euclidean, manhattan, unit_weight};
pub use neighbors::Connectivity;
pub use peastar::PeaStar;
pub use rbfs::Rbfs;
pub use report::{Path, Report, SearchStatus, Statistics};
pub use traits::PathFinder;
