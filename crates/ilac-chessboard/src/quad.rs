//! One grid cell as a closed cycle of four vertices and four edges.
//!
//! Vertices are stored in winding order (upper-left, upper-right,
//! lower-right, lower-left). Edge `i` runs from vertex `i` to vertex
//! `i + 1 (mod 4)`, so every adjacency is index arithmetic modulo 4.

use ilac_core::{GeometryError, PixelRect};
use nalgebra::Point2;

#[inline]
fn next(i: usize) -> usize {
    (i + 1) % 4
}

#[inline]
fn prev(i: usize) -> usize {
    (i + 3) % 4
}

/// A corner of the cell in cell-local pixel coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Vertex {
    pub position: Point2<f32>,
    /// Previous and next vertex in the cycle.
    pub neighbors: [usize; 2],
    /// Incoming and outgoing edge.
    pub edges: [usize; 2],
}

/// How an edge resolves one coordinate from the other.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Line {
    Horizontal,
    Vertical,
    Sloped { slope: f32 },
}

impl Line {
    fn through(p1: Point2<f32>, p2: Point2<f32>) -> Self {
        let dy = p2.y - p1.y;
        let dx = p2.x - p1.x;
        if dy == 0.0 {
            Line::Horizontal
        } else if dx == 0.0 {
            Line::Vertical
        } else {
            Line::Sloped { slope: dy / dx }
        }
    }
}

/// Segment between two consecutive vertices.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Edge {
    pub p1: Point2<f32>,
    pub p2: Point2<f32>,
    pub line: Line,
    /// Start and end vertex.
    pub vertices: [usize; 2],
    /// Previous and next edge in the cycle.
    pub neighbors: [usize; 2],
}

impl Edge {
    #[inline]
    pub fn min_y(&self) -> f32 {
        self.p1.y.min(self.p2.y)
    }

    #[inline]
    pub fn max_y(&self) -> f32 {
        self.p1.y.max(self.p2.y)
    }

    #[inline]
    pub fn is_horizontal(&self) -> bool {
        self.line == Line::Horizontal
    }

    /// Column where the horizontal line `row` crosses this edge.
    pub fn column_at(&self, row: i32) -> Result<i32, GeometryError> {
        match self.line {
            Line::Horizontal => Err(GeometryError::HorizontalEdge),
            Line::Vertical => Ok(self.p1.x as i32),
            Line::Sloped { slope } => {
                Ok(((row as f32 - self.p1.y) / slope + self.p1.x).floor() as i32)
            }
        }
    }

    /// Row where the vertical line `column` crosses this edge.
    pub fn row_at(&self, column: i32) -> Result<i32, GeometryError> {
        match self.line {
            Line::Vertical => Err(GeometryError::VerticalEdge),
            Line::Horizontal => Ok(self.p1.y as i32),
            Line::Sloped { slope } => {
                Ok((slope * (column as f32 - self.p1.x) + self.p1.y).floor() as i32)
            }
        }
    }
}

/// True when `row` lies inside the vertical span shared by both edges.
///
/// A horizontal edge never qualifies: it has no single column for a row.
fn row_between(a: &Edge, b: &Edge, row: f32) -> bool {
    if a.is_horizontal() || b.is_horizontal() {
        return false;
    }
    a.min_y().max(b.min_y()) <= row && a.max_y().min(b.max_y()) >= row
}

/// Quadrilateral model of one cell, cropped to its tight bounding rectangle.
#[derive(Clone, Debug, PartialEq)]
pub struct Quad {
    vertices: [Vertex; 4],
    edges: [Edge; 4],
    rect: PixelRect,
    height: u32,
}

impl Quad {
    /// Build the model from four image-space corners (UL, UR, LR, LL).
    ///
    /// Local vertex coordinates are floored offsets from the crop origin. The
    /// crop rectangle covers rows and columns `0..=max`, so every scan row is
    /// addressable in the cropped plane.
    pub fn from_corners(corners: [Point2<f32>; 4]) -> Result<Self, GeometryError> {
        if let Some(bad) = corners
            .iter()
            .find(|p| !(p.x.is_finite() && p.y.is_finite() && p.x >= 0.0 && p.y >= 0.0))
        {
            return Err(GeometryError::InvalidVertex { x: bad.x, y: bad.y });
        }

        let min_x = corners.iter().map(|p| p.x).fold(f32::INFINITY, f32::min).floor();
        let min_y = corners.iter().map(|p| p.y).fold(f32::INFINITY, f32::min).floor();
        let local = corners.map(|p| Point2::new((p.x - min_x).floor(), (p.y - min_y).floor()));

        for i in 0..4 {
            for j in (i + 1)..4 {
                if local[i] == local[j] {
                    return Err(GeometryError::Degenerate);
                }
            }
        }
        if twice_area(&local) == 0.0 {
            return Err(GeometryError::Degenerate);
        }

        let max_x = local.iter().map(|p| p.x).fold(0.0_f32, f32::max);
        let max_y = local.iter().map(|p| p.y).fold(0.0_f32, f32::max);

        let vertices = std::array::from_fn(|i| Vertex {
            position: local[i],
            neighbors: [prev(i), next(i)],
            edges: [prev(i), i],
        });
        let edges = std::array::from_fn(|i| Edge {
            p1: local[i],
            p2: local[next(i)],
            line: Line::through(local[i], local[next(i)]),
            vertices: [i, next(i)],
            neighbors: [prev(i), next(i)],
        });

        Ok(Self {
            vertices,
            edges,
            rect: PixelRect::new(
                min_x as usize,
                min_y as usize,
                max_x as usize + 1,
                max_y as usize + 1,
            ),
            height: max_y as u32,
        })
    }

    pub fn vertices(&self) -> &[Vertex; 4] {
        &self.vertices
    }

    pub fn edges(&self) -> &[Edge; 4] {
        &self.edges
    }

    pub fn edge(&self, i: usize) -> &Edge {
        &self.edges[i % 4]
    }

    /// Crop rectangle in image coordinates.
    pub fn rect(&self) -> PixelRect {
        self.rect
    }

    /// Last scan row (inclusive) in local coordinates.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Row scanner that remembers the last edge pair it used.
    pub fn rows(&self) -> RowWalker<'_> {
        RowWalker {
            quad: self,
            pair: (0, 1),
        }
    }
}

fn twice_area(p: &[Point2<f32>; 4]) -> f32 {
    (0..4)
        .map(|i| p[i].x * p[next(i)].y - p[next(i)].x * p[i].y)
        .sum::<f32>()
}

/// Resolves the two bounding edges for a sequence of scan rows.
///
/// The cached pair is reused as long as it still straddles the requested
/// row, which makes a monotonic top-to-bottom scan amortized O(1).
#[derive(Clone, Debug)]
pub struct RowWalker<'q> {
    quad: &'q Quad,
    pair: (usize, usize),
}

impl<'q> RowWalker<'q> {
    /// Indices of the edges bounding `row`.
    pub fn edges_for_row(&mut self, row: u32) -> (usize, usize) {
        let edges = &self.quad.edges;
        let r = row as f32;
        let (a, b) = self.pair;
        if row_between(&edges[a], &edges[b], r) {
            return self.pair;
        }

        self.pair = (0..4)
            .map(|i| (i, next(i)))
            .find(|&(i, j)| row_between(&edges[i], &edges[j], r))
            .unwrap_or_else(|| {
                if row_between(&edges[0], &edges[2], r) {
                    (0, 2)
                } else {
                    (1, 3)
                }
            });
        self.pair
    }

    /// Left (inclusive) and right (exclusive) columns of `row`.
    pub fn column_bounds(&mut self, row: u32) -> Result<(i32, i32), GeometryError> {
        let (a, b) = self.edges_for_row(row);
        let ca = self.quad.edges[a].column_at(row as i32)?;
        let cb = self.quad.edges[b].column_at(row as i32)?;
        Ok((ca.min(cb), ca.max(cb)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quad(pts: [(f32, f32); 4]) -> Quad {
        Quad::from_corners(pts.map(|(x, y)| Point2::new(x, y))).expect("valid quad")
    }

    fn straddles(q: &Quad, (a, b): (usize, usize), row: u32) -> bool {
        let (ea, eb) = (q.edge(a), q.edge(b));
        let r = row as f32;
        ea.min_y().max(eb.min_y()) <= r && ea.max_y().min(eb.max_y()) >= r
    }

    #[test]
    fn adjacency_is_circular() {
        let q = quad([(10.0, 10.0), (20.0, 11.0), (21.0, 22.0), (9.0, 20.0)]);
        for i in 0..4 {
            let v = q.vertices()[i];
            assert_eq!(v.neighbors, [(i + 3) % 4, (i + 1) % 4]);
            let e = q.edge(i);
            assert_eq!(e.vertices, [i, (i + 1) % 4]);
            assert_eq!(q.edge(e.neighbors[1]).vertices[0], e.vertices[1]);
            assert_eq!(q.edge(v.edges[1]).p1, v.position);
            assert_eq!(q.edge(v.edges[0]).p2, v.position);
        }
    }

    #[test]
    fn crop_is_tight_and_local() {
        let q = quad([(10.7, 10.2), (20.0, 11.0), (21.9, 22.5), (9.3, 20.0)]);
        assert_eq!(q.rect(), PixelRect::new(9, 10, 13, 13));
        assert_eq!(q.height(), 12);
        assert_eq!(q.vertices()[0].position, Point2::new(1.0, 0.0));
        assert_eq!(q.vertices()[3].position, Point2::new(0.0, 10.0));
    }

    #[test]
    fn general_position_pairs_straddle_every_row() {
        let shapes = [
            [(10.0, 10.0), (30.0, 13.0), (33.0, 35.0), (7.0, 31.0)],
            [(50.0, 5.0), (80.0, 1.0), (77.0, 29.0), (49.0, 33.0)],
            [(3.0, 4.0), (40.0, 9.0), (36.0, 18.0), (1.0, 21.0)],
        ];
        for pts in shapes {
            let q = quad(pts);
            let mut walker = q.rows();
            for row in 0..=q.height() {
                let pair = walker.edges_for_row(row);
                assert!(straddles(&q, pair, row), "row {row} pair {pair:?}");
                let (l, r) = walker.column_bounds(row).expect("bounds");
                assert!(l <= r);
            }
        }
    }

    #[test]
    fn axis_aligned_square_uses_vertical_sides() {
        let q = quad([(10.0, 10.0), (20.0, 10.0), (20.0, 20.0), (10.0, 20.0)]);
        let mut walker = q.rows();
        for row in 0..=q.height() {
            assert_eq!(walker.edges_for_row(row), (1, 3));
            assert_eq!(walker.column_bounds(row), Ok((0, 10)));
        }
    }

    #[test]
    fn cached_pair_survives_while_it_straddles() {
        let q = quad([(10.0, 10.0), (30.0, 13.0), (33.0, 35.0), (7.0, 31.0)]);
        let mut walker = q.rows();
        let first = walker.edges_for_row(5);
        assert_eq!(walker.edges_for_row(6), first);
        assert_eq!(walker.edges_for_row(5), first);
    }

    #[test]
    fn line_resolution() {
        let sloped = Edge {
            p1: Point2::new(0.0, 0.0),
            p2: Point2::new(4.0, 8.0),
            line: Line::through(Point2::new(0.0, 0.0), Point2::new(4.0, 8.0)),
            vertices: [0, 1],
            neighbors: [3, 1],
        };
        assert_eq!(sloped.column_at(4), Ok(2));
        assert_eq!(sloped.column_at(5), Ok(2));
        assert_eq!(sloped.row_at(3), Ok(6));

        let q = quad([(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)]);
        assert_eq!(q.edge(0).column_at(0), Err(GeometryError::HorizontalEdge));
        assert_eq!(q.edge(0).row_at(3), Ok(0));
        assert_eq!(q.edge(1).column_at(7), Ok(10));
        assert_eq!(q.edge(1).row_at(7), Err(GeometryError::VerticalEdge));
    }

    #[test]
    fn degenerate_cells_are_rejected() {
        let collinear = [(0.0, 0.0), (5.0, 5.0), (10.0, 10.0), (15.0, 15.0)];
        let coincident = [(3.0, 3.0), (3.2, 3.9), (8.0, 3.0), (8.0, 9.0)];
        for pts in [collinear, coincident] {
            assert_eq!(
                Quad::from_corners(pts.map(|(x, y)| Point2::new(x, y))),
                Err(GeometryError::Degenerate)
            );
        }
        assert!(matches!(
            Quad::from_corners([Point2::new(-1.0, 0.0); 4]),
            Err(GeometryError::InvalidVertex { .. })
        ));
    }
}
