//! Engine configuration shared by every [`PathFinder`](crate::PathFinder).

use std::fmt;

use octile_core::{Coordinate, Grid};

use crate::distance;
use crate::neighbors::Connectivity;

/// A cost function of two cells: a heuristic estimate or an edge weight.
pub type CostFn = Box<dyn Fn(Coordinate, Coordinate) -> f64>;

/// Named heuristic presets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Heuristic {
    #[default]
    Euclidean,
    Manhattan,
    Chebyshev,
}

impl Heuristic {
    /// The distance function behind this preset.
    pub fn function(self) -> fn(Coordinate, Coordinate) -> f64 {
        match self {
            Self::Euclidean => distance::euclidean,
            Self::Manhattan => distance::manhattan,
            Self::Chebyshev => distance::chebyshev,
        }
    }
}

impl fmt::Display for Heuristic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Euclidean => "euclidean",
            Self::Manhattan => "manhattan",
            Self::Chebyshev => "chebyshev",
        };
        f.write_str(name)
    }
}

/// Grid, heuristic, weight and connectivity for a search engine.
///
/// The grid is optional: an engine without one answers every query with an
/// empty path and a [`SearchStatus::NoGrid`](crate::SearchStatus::NoGrid)
/// report.
pub struct SearchConfig<G> {
    grid: Option<G>,
    heuristic: CostFn,
    weight: CostFn,
    connectivity: Connectivity,
}

impl<G: Grid> Default for SearchConfig<G> {
    fn default() -> Self {
        Self::new()
    }
}

impl<G: Grid> SearchConfig<G> {
    /// Euclidean heuristic, unit weights, 8-connected, no grid.
    pub fn new() -> Self {
        Self {
            grid: None,
            heuristic: Box::new(distance::euclidean),
            weight: Box::new(distance::unit_weight),
            connectivity: Connectivity::Eight,
        }
    }

    /// Default configuration searching `grid`.
    pub fn with_grid(grid: G) -> Self {
        Self::new().grid(grid)
    }

    /// Builder: attach a grid.
    pub fn grid(mut self, grid: G) -> Self {
        self.grid = Some(grid);
        self
    }

    /// Builder: use a named heuristic.
    pub fn heuristic(mut self, heuristic: Heuristic) -> Self {
        self.set_heuristic(heuristic);
        self
    }

    /// Builder: use a custom heuristic.
    pub fn custom_heuristic(mut self, h: impl Fn(Coordinate, Coordinate) -> f64 + 'static) -> Self {
        self.heuristic = Box::new(h);
        self
    }

    /// Builder: use a custom edge weight.
    pub fn weight(mut self, w: impl Fn(Coordinate, Coordinate) -> f64 + 'static) -> Self {
        self.weight = Box::new(w);
        self
    }

    /// Builder: choose the adjacency table.
    pub fn connectivity(mut self, connectivity: Connectivity) -> Self {
        self.connectivity = connectivity;
        self
    }

    /// Replace the grid searched by subsequent calls.
    pub fn set_grid(&mut self, grid: G) {
        self.grid = Some(grid);
    }

    /// Detach the grid, returning it.
    pub fn take_grid(&mut self) -> Option<G> {
        self.grid.take()
    }

    /// Switch to a named heuristic.
    pub fn set_heuristic(&mut self, heuristic: Heuristic) {
        self.heuristic = Box::new(heuristic.function());
    }

    /// Switch the adjacency table.
    pub fn set_connectivity(&mut self, connectivity: Connectivity) {
        self.connectivity = connectivity;
    }

    /// The attached grid, if any.
    #[inline]
    pub fn get_grid(&self) -> Option<&G> {
        self.grid.as_ref()
    }

    #[inline]
    pub fn get_connectivity(&self) -> Connectivity {
        self.connectivity
    }

    /// Heuristic estimate from `from` to `to`.
    #[inline]
    pub fn estimate(&self, from: Coordinate, to: Coordinate) -> f64 {
        (self.heuristic)(from, to)
    }

    /// Cost of the move `from` → `to`.
    #[inline]
    pub fn cost(&self, from: Coordinate, to: Coordinate) -> f64 {
        (self.weight)(from, to)
    }

    /// In bounds and passable on the attached grid; `false` without one.
    #[inline]
    pub(crate) fn is_open(&self, c: Coordinate) -> bool {
        self.grid.as_ref().is_some_and(|g| g.is_open(c))
    }

    /// Whether `c` can be used as a search root on the attached grid.
    #[inline]
    pub(crate) fn in_bounds(&self, c: Coordinate) -> bool {
        self.grid.as_ref().is_some_and(|g| g.in_bounds(c))
    }

    /// Sum of move costs along `path`.
    pub fn path_cost(&self, path: &[Coordinate]) -> f64 {
        path.windows(2).map(|w| self.cost(w[0], w[1])).sum()
    }
}

impl<G> fmt::Debug for SearchConfig<G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SearchConfig")
            .field("has_grid", &self.grid.is_some())
            .field("connectivity", &self.connectivity)
            .finish_non_exhaustive()
    }
}
