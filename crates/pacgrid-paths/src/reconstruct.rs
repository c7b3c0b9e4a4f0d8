//! Parent links and path reconstruction.

use pacgrid_core::{Point, Range};

const NO_PARENT: usize = usize::MAX;

/// Parent links recorded by a search, one slot per grid square.
///
/// The links form a tree rooted at the search start. Walking from any
/// reached square back through its parents ends at the root.
#[derive(Debug, Clone)]
pub struct Parents {
    rng: Range,
    links: Vec<usize>,
}

impl Parents {
    /// Create an empty link table for the given grid rectangle.
    pub fn new(rng: Range) -> Self {
        Self {
            rng,
            links: vec![NO_PARENT; rng.len()],
        }
    }

    /// Re-derive the links implied by walking `path` forward: every square's
    /// parent is the one before it.
    pub fn from_path(rng: Range, path: &[Point]) -> Self {
        let mut parents = Self::new(rng);
        for w in path.windows(2) {
            parents.set(w[1], w[0]);
        }
        parents
    }

    /// The grid rectangle covered.
    #[inline]
    pub fn range(&self) -> Range {
        self.rng
    }

    /// Replace the rectangle, reallocating only if it grew.
    pub fn set_range(&mut self, rng: Range) {
        self.rng = rng;
        if rng.len() > self.links.len() {
            self.links.resize(rng.len(), NO_PARENT);
        }
        self.clear();
    }

    /// Forget every link.
    pub fn clear(&mut self) {
        self.links.fill(NO_PARENT);
    }

    /// Record `parent` as the parent of `child`. Returns false if either
    /// point lies outside the rectangle.
    pub fn set(&mut self, child: Point, parent: Point) -> bool {
        let (Some(ci), Some(pi)) = (self.rng.index(child), self.rng.index(parent)) else {
            return false;
        };
        self.links[ci] = pi;
        true
    }

    /// Parent of `p`, if one was recorded.
    pub fn get(&self, p: Point) -> Option<Point> {
        let i = self.rng.index(p)?;
        match self.links[i] {
            NO_PARENT => None,
            pi => Some(self.rng.point(pi)),
        }
    }

    /// Walk from `goal` back to `root` and return the squares in forward
    /// order, both endpoints included.
    ///
    /// Returns `None` if the chain breaks before reaching `root`.
    pub fn path(&self, root: Point, goal: Point) -> Option<Vec<Point>> {
        let mut path = vec![goal];
        let mut cur = goal;
        while cur != root {
            cur = self.get(cur)?;
            path.push(cur);
            if path.len() > self.rng.len() {
                // A cycle in the links.
                return None;
            }
        }
        path.reverse();
        Some(path)
    }
}
