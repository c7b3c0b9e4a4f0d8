//! Nearest-first target selection.
//!
//! Selection is myopic: it looks only at the distance from the agent's
//! current square to each candidate, never at the cost of the whole tour.

use pacgrid_core::Point;

use crate::distance::manhattan;

/// Pick the candidate with the smallest Manhattan distance to `from`.
///
/// Ties go to the candidate that comes first in iteration order, so callers
/// that need reproducible runs must pass an ordered collection. Returns
/// `None` when there are no candidates.
pub fn select_nearest<'a, I>(from: Point, candidates: I) -> Option<Point>
where
    I: IntoIterator<Item = &'a Point>,
{
    let mut best: Option<(i32, Point)> = None;
    for &c in candidates {
        let d = manhattan(from, c);
        match best {
            Some((bd, _)) if bd <= d => {}
            _ => best = Some((d, c)),
        }
    }
    best.map(|(_, p)| p)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn picks_closest() {
        let targets = [Point::at(5, 5), Point::at(1, 0), Point::at(3, 3)];
        assert_eq!(
            select_nearest(Point::at(0, 0), &targets),
            Some(Point::at(1, 0))
        );
    }

    #[test]
    fn ties_go_to_first() {
        let targets = [Point::at(0, 2), Point::at(2, 0), Point::at(1, 1)];
        assert_eq!(
            select_nearest(Point::at(0, 0), &targets),
            Some(Point::at(0, 2))
        );
        let reversed = [Point::at(1, 1), Point::at(2, 0), Point::at(0, 2)];
        assert_eq!(
            select_nearest(Point::at(0, 0), &reversed),
            Some(Point::at(1, 1))
        );
    }

    #[test]
    fn empty_candidates() {
        let none: [Point; 0] = [];
        assert_eq!(select_nearest(Point::at(0, 0), &none), None);
    }
}
