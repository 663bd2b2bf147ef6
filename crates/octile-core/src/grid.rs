//! The [`Grid`] query trait and the [`TerrainMap`] octile map it is usually
//! backed by.
//!
//! [`TerrainMap`] stores one terrain byte per cell in a shared buffer
//! (`Rc<RefCell<...>>`), so a clone handed to a search engine observes agent
//! markers stamped through the original handle.

use std::cell::RefCell;
use std::fmt::Write as _;
use std::path::Path;
use std::rc::Rc;

use log::{debug, warn};

use crate::{Agent, Coordinate};

/// Terrain bytes a search may step on.
pub const PASSABLE_TERRAIN: [u8; 4] = [b'.', b'G', b'S', b'W'];

/// Marker written on an agent's start cell by [`TerrainMap::stamp_agent`].
pub const AGENT_MARKER: u8 = b'A';
/// Marker written on an agent's goal cell by [`TerrainMap::stamp_agent`].
pub const GOAL_MARKER: u8 = b'G';

// ---------------------------------------------------------------------------
// Grid trait
// ---------------------------------------------------------------------------

/// Read-only view of a 2D grid with obstacles.
pub trait Grid {
    /// Whether `c` lies inside the grid.
    fn in_bounds(&self, c: Coordinate) -> bool;

    /// Whether the terrain at `c` can be entered. Only meaningful for
    /// in-bounds coordinates.
    fn is_passable(&self, c: Coordinate) -> bool;

    /// In bounds and passable.
    #[inline]
    fn is_open(&self, c: Coordinate) -> bool {
        self.in_bounds(c) && self.is_passable(c)
    }
}

impl<G: Grid + ?Sized> Grid for &G {
    #[inline]
    fn in_bounds(&self, c: Coordinate) -> bool {
        (**self).in_bounds(c)
    }

    #[inline]
    fn is_passable(&self, c: Coordinate) -> bool {
        (**self).is_passable(c)
    }
}

impl<G: Grid + ?Sized> Grid for Box<G> {
    #[inline]
    fn in_bounds(&self, c: Coordinate) -> bool {
        (**self).in_bounds(c)
    }

    #[inline]
    fn is_passable(&self, c: Coordinate) -> bool {
        (**self).is_passable(c)
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors produced while reading an octile map.
#[derive(Debug, thiserror::Error)]
pub enum MapError {
    #[error("failed to read map file: {0}")]
    Io(#[from] std::io::Error),
    #[error("map header is missing the `{0}` line")]
    MissingField(&'static str),
    #[error("map header has an invalid {field} value `{value}`")]
    InvalidField { field: &'static str, value: String },
    #[error("map has {found} rows but its header declares {expected}")]
    RowCount { expected: usize, found: usize },
    #[error("map row {row} has {found} cells, expected {expected}")]
    RowWidth {
        row: usize,
        expected: usize,
        found: usize,
    },
}

// ---------------------------------------------------------------------------
// TerrainMap
// ---------------------------------------------------------------------------

/// Previous terrain under an agent's start and goal, returned by
/// [`TerrainMap::stamp_agent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AgentStamp {
    start: (Coordinate, u8),
    goal: (Coordinate, u8),
}

/// A rectangular terrain map with cheap, buffer-sharing clones.
#[derive(Debug, Clone)]
pub struct TerrainMap {
    cells: Rc<RefCell<Vec<u8>>>,
    rows: i32,
    columns: i32,
}

impl TerrainMap {
    /// Create a map of the given shape filled with open ground (`.`).
    pub fn new(rows: i32, columns: i32) -> Self {
        let rows = rows.max(0);
        let columns = columns.max(0);
        Self {
            cells: Rc::new(RefCell::new(vec![b'.'; (rows * columns) as usize])),
            rows,
            columns,
        }
    }

    /// Build a map from equally wide rows of terrain characters.
    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> Result<Self, MapError> {
        let width = rows.first().map_or(0, |r| r.as_ref().len());
        let mut cells = Vec::with_capacity(width * rows.len());
        for (i, row) in rows.iter().enumerate() {
            let row = row.as_ref().as_bytes();
            if row.len() != width {
                return Err(MapError::RowWidth {
                    row: i,
                    expected: width,
                    found: row.len(),
                });
            }
            cells.extend_from_slice(row);
        }
        Ok(Self {
            cells: Rc::new(RefCell::new(cells)),
            rows: rows.len() as i32,
            columns: width as i32,
        })
    }

    /// Parse the textual octile map format:
    ///
    /// ```text
    /// type octile
    /// height <rows>
    /// width <columns>
    /// map
    /// <terrain rows>
    /// ```
    ///
    /// Bytes at or below ASCII space are ignored inside terrain rows and
    /// blank lines are skipped.
    pub fn parse(text: &str) -> Result<Self, MapError> {
        let mut lines = text.lines();
        let mut height = None;
        let mut width = None;

        loop {
            let Some(line) = lines.next() else {
                return Err(MapError::MissingField("map"));
            };
            let mut tokens = line.split_whitespace();
            match tokens.next() {
                None => continue,
                Some("map") => break,
                Some("height") => height = Some(header_value("height", tokens.next())?),
                Some("width") => width = Some(header_value("width", tokens.next())?),
                Some("type") => {}
                Some(other) => debug!("ignoring unknown map header field `{other}`"),
            }
        }
        let height = height.ok_or(MapError::MissingField("height"))?;
        let width = width.ok_or(MapError::MissingField("width"))?;
        let rows_i32 = dimension("height", height)?;
        let columns_i32 = dimension("width", width)?;

        let rows: Vec<Vec<u8>> = lines
            .map(|l| l.bytes().filter(|&b| b > b' ').collect::<Vec<u8>>())
            .filter(|r| !r.is_empty())
            .collect();
        if rows.len() != height {
            return Err(MapError::RowCount {
                expected: height,
                found: rows.len(),
            });
        }

        if let Some((i, row)) = rows.iter().enumerate().find(|(_, r)| r.len() != width) {
            return Err(MapError::RowWidth {
                row: i,
                expected: width,
                found: row.len(),
            });
        }
        let cells = rows.concat();

        debug!("parsed octile map {height}x{width}");
        Ok(Self {
            cells: Rc::new(RefCell::new(cells)),
            rows: rows_i32,
            columns: columns_i32,
        })
    }

    /// Read and [`parse`](Self::parse) a map file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, MapError> {
        let text = std::fs::read_to_string(path)?;
        Self::parse(&text)
    }

    /// Number of rows.
    #[inline]
    pub fn rows(&self) -> i32 {
        self.rows
    }

    /// Number of columns.
    #[inline]
    pub fn columns(&self) -> i32 {
        self.columns
    }

    #[inline]
    fn index(&self, c: Coordinate) -> Option<usize> {
        if c.row < 0 || c.row >= self.rows || c.column < 0 || c.column >= self.columns {
            return None;
        }
        Some((c.row * self.columns + c.column) as usize)
    }

    /// Terrain byte at `c`, or `None` out of bounds.
    pub fn terrain(&self, c: Coordinate) -> Option<u8> {
        let i = self.index(c)?;
        Some(self.cells.borrow()[i])
    }

    /// Overwrite the terrain at `c`. Does nothing out of bounds.
    pub fn set_terrain(&self, c: Coordinate, terrain: u8) {
        if let Some(i) = self.index(c) {
            self.cells.borrow_mut()[i] = terrain;
        }
    }

    /// Mark an agent's start with [`AGENT_MARKER`] and its goal with
    /// [`GOAL_MARKER`].
    ///
    /// Returns the overwritten terrain so [`unstamp_agent`](Self::unstamp_agent)
    /// can restore it, or `None` (leaving the map untouched) if either
    /// endpoint is outside the map.
    pub fn stamp_agent(&self, agent: &Agent) -> Option<AgentStamp> {
        for c in [agent.start(), agent.goal()] {
            if self.index(c).is_none() {
                warn!(
                    "invalid coordinate {c} for a {}x{} map",
                    self.rows, self.columns
                );
                return None;
            }
        }
        let start = agent.start();
        let start_prev = self.terrain(start)?;
        self.set_terrain(start, AGENT_MARKER);
        let goal = agent.goal();
        let goal_prev = self.terrain(goal)?;
        self.set_terrain(goal, GOAL_MARKER);
        Some(AgentStamp {
            start: (start, start_prev),
            goal: (goal, goal_prev),
        })
    }

    /// Undo a [`stamp_agent`](Self::stamp_agent).
    pub fn unstamp_agent(&self, stamp: AgentStamp) {
        // Goal first: when start == goal its saved byte is the agent marker.
        self.set_terrain(stamp.goal.0, stamp.goal.1);
        self.set_terrain(stamp.start.0, stamp.start.1);
    }

    /// Render the map with row and column headers, formatting each cell
    /// through `cell`.
    pub fn render_with(&self, mut cell: impl FnMut(Coordinate, char) -> String) -> String {
        let cells = self.cells.borrow();
        let mut out = String::from("    ");
        for column in 0..self.columns {
            let _ = write!(out, "{column:<3}");
        }
        out.push('\n');
        for row in 0..self.rows {
            let _ = write!(out, "{row:<4}");
            for column in 0..self.columns {
                let c = Coordinate::new(row, column);
                let terrain = cells[(row * self.columns + column) as usize] as char;
                out.push_str(&cell(c, terrain));
                out.push_str("  ");
            }
            out.push('\n');
        }
        out
    }

    /// Render the map as plain text.
    pub fn render(&self) -> String {
        self.render_with(|_, t| t.to_string())
    }
}

fn header_value(field: &'static str, token: Option<&str>) -> Result<usize, MapError> {
    let token = token.ok_or(MapError::MissingField(field))?;
    token.parse::<usize>().map_err(|_| MapError::InvalidField {
        field,
        value: token.to_string(),
    })
}

// Cells are addressed with i32 coordinates.
fn dimension(field: &'static str, value: usize) -> Result<i32, MapError> {
    i32::try_from(value).map_err(|_| MapError::InvalidField {
        field,
        value: value.to_string(),
    })
}

impl Grid for TerrainMap {
    #[inline]
    fn in_bounds(&self, c: Coordinate) -> bool {
        self.index(c).is_some()
    }

    #[inline]
    fn is_passable(&self, c: Coordinate) -> bool {
        self.terrain(c)
            .is_some_and(|t| PASSABLE_TERRAIN.contains(&t))
    }
}
