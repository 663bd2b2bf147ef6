//! **octile-core**: foundational types for octile grid pathfinding.
//!
//! This crate provides the pieces every search engine and benchmark driver
//! shares: [`Coordinate`] and the fixed adjacency tables, the [`Agent`]
//! start/goal pair, the read-only [`Grid`] query trait, and [`TerrainMap`],
//! an octile map with agent stamping and text rendering.

pub mod agent;
pub mod geom;
pub mod grid;

pub use agent::Agent;
pub use geom::{Coordinate, EIGHT_DIRECTIONS, FOUR_DIRECTIONS};
pub use grid::{AgentStamp, Grid, MapError, PASSABLE_TERRAIN, TerrainMap};
