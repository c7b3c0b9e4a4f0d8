//! The [`Grid`] type: the map, the agent and the search overlay.
//!
//! The static layout (paths, walls, targets) is stored separately from the
//! agent position and from the transient visited overlay, so searches can
//! mark and unmark squares without ever touching the map itself.

use std::fmt;

use indexmap::IndexSet;

use crate::cell::Cell;
use crate::error::{GridError, MapError};
use crate::geom::{Point, Range};

/// A fixed-size map with one agent and a set of uncollected targets.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "GridRepr"))]
pub struct Grid {
    bounds: Range,
    layout: Vec<Cell>,
    visited: Vec<bool>,
    agent: Point,
    start: Point,
    /// Uncollected targets in row-major discovery order.
    targets: IndexSet<Point>,
}

impl Grid {
    /// Build a grid from rows of map codes
    /// (`0` path, `1` wall, `2` agent start, `3` target).
    ///
    /// All rows must have the same length; there must be exactly one start
    /// and at least one target.
    pub fn from_rows<R: AsRef<[u8]>>(rows: &[R]) -> Result<Self, MapError> {
        let height = rows.len();
        let width = rows.first().map_or(0, |r| r.as_ref().len());
        if height == 0 || width == 0 {
            return Err(MapError::Empty);
        }

        let mut layout = Vec::with_capacity(width * height);
        let mut start: Option<Point> = None;
        let mut targets = IndexSet::new();

        for (y, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != width {
                return Err(MapError::RaggedRow {
                    row: y,
                    expected: width,
                    found: row.len(),
                });
            }
            for (x, &code) in row.iter().enumerate() {
                let pos = Point::new(x as i32, y as i32);
                let cell = Cell::from_code(code).ok_or(MapError::InvalidCode { code, pos })?;
                match cell {
                    Cell::Agent => {
                        if let Some(first) = start {
                            return Err(MapError::MultipleStarts { first, second: pos });
                        }
                        start = Some(pos);
                        layout.push(Cell::Path);
                    }
                    Cell::Target => {
                        targets.insert(pos);
                        layout.push(Cell::Target);
                    }
                    other => layout.push(other),
                }
            }
        }

        let start = start.ok_or(MapError::MissingStart)?;
        if targets.is_empty() {
            return Err(MapError::NoTargets);
        }

        log::debug!(
            "map loaded: {width}x{height}, start {start}, {} targets",
            targets.len()
        );

        Ok(Self {
            bounds: Range::new(width as i32, height as i32),
            visited: vec![false; layout.len()],
            layout,
            agent: start,
            start,
            targets,
        })
    }

    /// Parse a text map: one row per line, one digit per cell.
    ///
    /// Spaces, tabs and commas between digits are ignored, as are blank lines
    /// and lines starting with `#`.
    pub fn parse(s: &str) -> Result<Self, MapError> {
        let mut rows: Vec<Vec<u8>> = Vec::new();
        for line in s.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let y = rows.len() as i32;
            let mut row = Vec::with_capacity(line.len());
            for ch in line.chars() {
                if ch.is_whitespace() || ch == ',' {
                    continue;
                }
                let Some(d) = ch.to_digit(10) else {
                    return Err(MapError::InvalidChar {
                        ch,
                        pos: Point::new(row.len() as i32, y),
                    });
                };
                row.push(d as u8);
            }
            rows.push(row);
        }
        Self::from_rows(&rows)
    }

    // -----------------------------------------------------------------------
    // Shape
    // -----------------------------------------------------------------------

    /// The bounding range `[0, width) × [0, height)`.
    #[inline]
    pub fn bounds(&self) -> Range {
        self.bounds
    }

    /// Number of columns.
    #[inline]
    pub fn width(&self) -> i32 {
        self.bounds.width()
    }

    /// Number of rows.
    #[inline]
    pub fn height(&self) -> i32 {
        self.bounds.height()
    }

    /// `(rows, columns)`.
    pub fn size(&self) -> (usize, usize) {
        (self.height() as usize, self.width() as usize)
    }

    /// Whether `p` lies on the grid.
    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        self.bounds.contains(p)
    }

    /// Number of non-wall squares.
    pub fn passable_count(&self) -> usize {
        self.layout.iter().filter(|c| c.is_passable()).count()
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    /// Current agent position.
    #[inline]
    pub fn agent(&self) -> Point {
        self.agent
    }

    /// Agent position at construction time.
    #[inline]
    pub fn start(&self) -> Point {
        self.start
    }

    /// Uncollected targets, in row-major discovery order.
    #[inline]
    pub fn targets(&self) -> &IndexSet<Point> {
        &self.targets
    }

    /// Whether every target has been collected.
    #[inline]
    pub fn is_done(&self) -> bool {
        self.targets.is_empty()
    }

    /// False off the grid or on a wall.
    #[inline]
    pub fn is_passable(&self, p: Point) -> bool {
        self.bounds
            .index(p)
            .is_some_and(|i| self.layout[i].is_passable())
    }

    /// Whether `p` is an uncollected target.
    #[inline]
    pub fn is_target(&self, p: Point) -> bool {
        self.targets.contains(&p)
    }

    /// Composite state at `p`: the agent first, then the overlay, then the
    /// static layout. `None` off the grid.
    pub fn cell(&self, p: Point) -> Option<Cell> {
        let i = self.bounds.index(p)?;
        if p == self.agent {
            return Some(Cell::Agent);
        }
        if self.visited[i] {
            return Some(Cell::Visited);
        }
        Some(self.layout[i])
    }

    // -----------------------------------------------------------------------
    // Visited overlay
    // -----------------------------------------------------------------------

    /// Whether `p` carries a visited mark. False off the grid.
    #[inline]
    pub fn is_visited(&self, p: Point) -> bool {
        self.bounds.index(p).is_some_and(|i| self.visited[i])
    }

    /// Mark `p` visited. Returns whether the mark changed. No-op off the grid.
    pub fn mark_visited(&mut self, p: Point) -> bool {
        match self.bounds.index(p) {
            Some(i) => !std::mem::replace(&mut self.visited[i], true),
            None => false,
        }
    }

    /// Remove the visited mark from `p`. Returns whether the mark changed;
    /// clearing an unvisited square does nothing.
    pub fn clear_visited(&mut self, p: Point) -> bool {
        match self.bounds.index(p) {
            Some(i) => std::mem::replace(&mut self.visited[i], false),
            None => false,
        }
    }

    /// Clear the whole overlay.
    pub fn reset_visited(&mut self) {
        self.visited.fill(false);
    }

    /// Number of squares currently marked visited.
    pub fn visited_count(&self) -> usize {
        self.visited.iter().filter(|&&v| v).count()
    }

    // -----------------------------------------------------------------------
    // Mutation
    // -----------------------------------------------------------------------

    /// Move the agent onto `p`.
    ///
    /// Fails with [`GridError::InvalidMove`] if `p` is off the grid or a wall.
    pub fn move_agent_to(&mut self, p: Point) -> Result<(), GridError> {
        if !self.is_passable(p) {
            return Err(GridError::InvalidMove(p));
        }
        self.agent = p;
        Ok(())
    }

    /// Collect the target at `p`, turning the square into a path.
    ///
    /// Fails with [`GridError::NoTarget`] unless `p` is an uncollected target.
    pub fn collect_target(&mut self, p: Point) -> Result<(), GridError> {
        if !self.targets.shift_remove(&p) {
            return Err(GridError::NoTarget(p));
        }
        if let Some(i) = self.bounds.index(p) {
            self.layout[i] = Cell::Path;
        }
        log::trace!("collected {p}, {} left", self.targets.len());
        Ok(())
    }
}

/// Unchecked field-for-field form of a stored [`Grid`].
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct GridRepr {
    bounds: Range,
    layout: Vec<Cell>,
    visited: Vec<bool>,
    agent: Point,
    start: Point,
    targets: IndexSet<Point>,
}

#[cfg(feature = "serde")]
impl TryFrom<GridRepr> for Grid {
    type Error = MapError;

    /// Re-establish what [`Grid::from_rows`] guarantees: buffers sized to
    /// the map, a static-only layout, agent and start on open squares, and
    /// the target set matching the `Target` squares exactly.
    fn try_from(r: GridRepr) -> Result<Self, MapError> {
        if r.bounds.is_empty() {
            return Err(MapError::Empty);
        }
        let expected = r.bounds.len();
        for found in [r.layout.len(), r.visited.len()] {
            if found != expected {
                return Err(MapError::SizeMismatch { expected, found });
            }
        }

        for (i, &cell) in r.layout.iter().enumerate() {
            let pos = r.bounds.point(i);
            match cell {
                Cell::Agent | Cell::Visited => return Err(MapError::StrayCell { cell, pos }),
                Cell::Target if !r.targets.contains(&pos) => {
                    return Err(MapError::TargetMismatch(pos));
                }
                _ => {}
            }
        }
        if let Some(&p) = r
            .targets
            .iter()
            .find(|&&p| r.bounds.index(p).is_none_or(|i| r.layout[i] != Cell::Target))
        {
            return Err(MapError::TargetMismatch(p));
        }

        let grid = Self {
            bounds: r.bounds,
            layout: r.layout,
            visited: r.visited,
            agent: r.agent,
            start: r.start,
            targets: r.targets,
        };
        for p in [grid.agent, grid.start] {
            if !grid.is_passable(p) {
                return Err(MapError::BlockedAgent(p));
            }
        }
        Ok(grid)
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.height() {
            for x in 0..self.width() {
                let c = self.cell(Point::new(x, y)).unwrap_or_default();
                write!(f, "{c}")?;
            }
            if y + 1 < self.height() {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}
