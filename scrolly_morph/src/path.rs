// Copyright 2025 the Scrolly Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::vec::Vec;

use kurbo::{BezPath, PathEl, Point, Rect, Shape};
use scrolly_timing::Lerp;

/// A closed polygon made of straight segments.
///
/// The path starts with a move to the first vertex, draws a line to every
/// following vertex and closes back to the first.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MorphPath {
    points: Vec<Point>,
}

impl MorphPath {
    /// Creates a closed path through `points`.
    pub fn from_points(points: Vec<Point>) -> Self {
        Self { points }
    }

    /// The explicit vertices, in drawing order (the closing vertex is implied).
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Returns `true` if the path has no vertices.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Number of path elements: the move, each line, and the close.
    ///
    /// An empty path has no elements.
    pub fn vertex_count(&self) -> usize {
        if self.points.is_empty() {
            0
        } else {
            self.points.len() + 1
        }
    }

    /// Converts into a Kurbo path (`M`, `L`…, `Z`).
    pub fn to_bez_path(&self) -> BezPath {
        let mut path = BezPath::new();
        let mut iter = self.points.iter();
        if let Some(first) = iter.next() {
            path.push(PathEl::MoveTo(*first));
            for p in iter {
                path.push(PathEl::LineTo(*p));
            }
            path.push(PathEl::ClosePath);
        }
        path
    }

    /// Axis-aligned bounds of the vertices, or `None` if the path is empty.
    pub fn bounds(&self) -> Option<Rect> {
        let (first, rest) = self.points.split_first()?;
        Some(
            rest.iter()
                .fold(Rect::from_points(*first, *first), |r, p| r.union_pt(*p)),
        )
    }

    /// Non-zero winding containment test.
    pub fn contains(&self, pt: Point) -> bool {
        !self.points.is_empty() && self.to_bez_path().contains(pt)
    }
}

impl Lerp for MorphPath {
    fn lerp(&self, other: &Self, t: f64) -> Self {
        interpolate(self, other, t)
    }
}

/// Projects a ring of geographic vertices into a [`MorphPath`].
///
/// A ring whose last vertex repeats the first (the GeoJSON convention) drops
/// the repeat and lets the close segment draw it, so the resulting vertex
/// count equals the ring length.
pub fn region_path(ring: &[Point], project: impl Fn(Point) -> Point) -> MorphPath {
    let ring = match ring {
        [first, .., last] if first == last => &ring[..ring.len() - 1],
        _ => ring,
    };
    MorphPath {
        points: ring.iter().map(|p| project(*p)).collect(),
    }
}

/// Number of path elements [`region_path`] produces for `ring`.
///
/// Size the matching bar with this rather than the ring length: an open ring
/// keeps every vertex and so has one element more than its length.
pub fn region_vertex_count(ring: &[Point]) -> usize {
    match ring {
        [] => 0,
        [first, .., last] if first == last => ring.len(),
        _ => ring.len() + 1,
    }
}

/// Blends two paths vertex by vertex.
///
/// When the vertex counts differ, the shorter path is padded by repeating its
/// last vertex, so extra vertices of the longer path grow out of (or collapse
/// into) that point. An empty side yields the other path unchanged.
pub fn interpolate(from: &MorphPath, to: &MorphPath, t: f64) -> MorphPath {
    let (Some(from_last), Some(to_last)) = (from.points.last(), to.points.last()) else {
        return if from.is_empty() {
            to.clone()
        } else {
            from.clone()
        };
    };
    let n = from.points.len().max(to.points.len());
    let points = (0..n)
        .map(|i| {
            let a = from.points.get(i).unwrap_or(from_last);
            let b = to.points.get(i).unwrap_or(to_last);
            Point::lerp(*a, *b, t)
        })
        .collect();
    MorphPath { points }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::*;

    fn square(size: f64) -> MorphPath {
        MorphPath::from_points(vec![
            Point::new(0.0, 0.0),
            Point::new(size, 0.0),
            Point::new(size, size),
            Point::new(0.0, size),
        ])
    }

    #[test]
    fn bez_path_has_move_lines_and_close() {
        let path = square(2.0).to_bez_path();
        let els: Vec<PathEl> = path.elements().to_vec();
        assert_eq!(els.len(), 5);
        assert!(matches!(els[0], PathEl::MoveTo(_)));
        assert!(matches!(els[4], PathEl::ClosePath));
        assert_eq!(square(2.0).vertex_count(), 5);
    }

    #[test]
    fn closed_ring_drops_repeated_vertex() {
        let ring = [
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(1.0, 1.0),
            Point::new(0.0, 0.0),
        ];
        let path = region_path(&ring, |p| p);
        assert_eq!(path.points().len(), 3);
        assert_eq!(path.vertex_count(), ring.len());
    }

    #[test]
    fn open_ring_keeps_every_vertex() {
        let ring = [Point::new(0.0, 0.0), Point::new(1.0, 0.0), Point::new(1.0, 1.0)];
        let path = region_path(&ring, |p| Point::new(p.x * 10.0, p.y * 10.0));
        assert_eq!(path.points(), &[
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 10.0)
        ]);
    }

    #[test]
    fn vertex_count_matches_region_path() {
        let closed = [
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(1.0, 1.0),
            Point::new(0.0, 0.0),
        ];
        let open = &closed[..3];
        assert_eq!(region_vertex_count(&closed), region_path(&closed, |p| p).vertex_count());
        assert_eq!(region_vertex_count(open), region_path(open, |p| p).vertex_count());
        assert_eq!(region_vertex_count(open), 4);
        assert_eq!(region_vertex_count(&[]), 0);
    }

    #[test]
    fn interpolation_endpoints() {
        let a = square(1.0);
        let b = square(3.0);
        assert_eq!(interpolate(&a, &b, 0.0), a);
        assert_eq!(interpolate(&a, &b, 1.0), b);
        let mid = interpolate(&a, &b, 0.5);
        assert_eq!(mid.points()[2], Point::new(2.0, 2.0));
    }

    #[test]
    fn interpolation_pads_shorter_path() {
        let tri = MorphPath::from_points(vec![
            Point::new(0.0, 0.0),
            Point::new(4.0, 0.0),
            Point::new(4.0, 4.0),
        ]);
        let sq = square(4.0);
        let start = interpolate(&tri, &sq, 0.0);
        assert_eq!(start.points().len(), 4);
        // The padded vertex sits on the triangle's last vertex.
        assert_eq!(start.points()[3], Point::new(4.0, 4.0));
        assert_eq!(interpolate(&tri, &sq, 1.0), sq);
    }

    #[test]
    fn interpolation_with_empty_side() {
        let empty = MorphPath::default();
        let sq = square(1.0);
        assert_eq!(interpolate(&empty, &sq, 0.2), sq);
        assert_eq!(interpolate(&sq, &empty, 0.8), sq);
        assert_eq!(empty.vertex_count(), 0);
        assert_eq!(empty.bounds(), None);
    }

    #[test]
    fn bounds_and_containment() {
        let sq = square(10.0);
        assert_eq!(sq.bounds(), Some(Rect::new(0.0, 0.0, 10.0, 10.0)));
        assert!(sq.contains(Point::new(5.0, 5.0)));
        assert!(!sq.contains(Point::new(15.0, 5.0)));
    }
}
