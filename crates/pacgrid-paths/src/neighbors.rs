use pacgrid_core::Point;

/// Cached neighbor computation helper.
///
/// Enumerates the 4-way neighbors of a grid point in the fixed exploration
/// order (up, right, down, left), filtered by a predicate.
pub struct Neighbors {
    buf: Vec<Point>,
}

impl Default for Neighbors {
    fn default() -> Self {
        Self::new()
    }
}

impl Neighbors {
    /// Create a new `Neighbors` helper.
    pub fn new() -> Self {
        Self {
            buf: Vec::with_capacity(4),
        }
    }

    /// Return the cardinal neighbors of `p`, keeping only those for which
    /// `keep` returns `true`.
    pub fn cardinal(&mut self, p: Point, keep: impl Fn(Point) -> bool) -> &[Point] {
        self.buf.clear();
        self.buf
            .extend(p.neighbors_4().into_iter().filter(|&n| keep(n)));
        &self.buf
    }
}
