//! Hexagonal grid geometry.
//!
//! Cells are regular point-up hexagons. A grid of radius `r` is a hexagon of
//! hexagons, `2r − 1` cells across its middle row. Cell centers are produced in
//! a fixed spiral-like order; that order is what maps cell index to color.

use floem::kurbo::{BezPath, Point, Vec2};

use crate::surface::Viewport;

/// Number of cells in a grid of the given radius: 1, 7, 19, 37, ...
pub fn cell_count(radius: u32) -> usize {
    if radius == 0 {
        return 0;
    }
    let radius = radius as usize;
    let diameter = radius * 2 - 1;
    diameter + (radius..diameter).map(|i| 2 * i).sum::<usize>()
}

/// Vertex `index` (0–5) of a point-up hexagon; vertex 0 is straight above the center.
fn vertex(center: Point, circumradius: f64, index: usize) -> Point {
    let angle = ((index * 60) as f64 - 90.0).to_radians();
    Point::new(
        center.x + circumradius * angle.cos(),
        center.y + circumradius * angle.sin(),
    )
}

/// The six vertices of a point-up hexagon, clockwise from the top.
pub fn hexagon_vertices(center: Point, circumradius: f64) -> [Point; 6] {
    std::array::from_fn(|i| vertex(center, circumradius, i))
}

/// Closed hexagon outline for filling or stroking.
pub fn hexagon_outline(center: Point, circumradius: f64) -> BezPath {
    let vertices = hexagon_vertices(center, circumradius);
    let mut path = BezPath::new();
    path.move_to(vertices[0]);
    for v in &vertices[1..] {
        path.line_to(*v);
    }
    path.close_path();
    path
}

/// Centers of one row: `len` cells stepping up and to the right from `anchor`.
fn push_row(out: &mut Vec<Point>, anchor: Point, cell_span: f64, circumradius: f64, len: u32) {
    out.extend((0..len).map(|j| {
        let j = j as f64;
        Point::new(
            anchor.x + j * cell_span / 2.0,
            anchor.y - 1.5 * j * circumradius,
        )
    }));
}

/// All cell centers of a grid inside a `width × height` box, in spiral order.
///
/// Rows run diagonally (up-right). The first half emits rows of length
/// `radius..horizontal_count` (exclusive), moving the anchor half a cell right
/// and one row down after each; the second half emits rows of length
/// `horizontal_count..=radius`, moving the anchor a full cell right.
pub fn cell_centers(
    width: f64,
    height: f64,
    cell_span: f64,
    circumradius: f64,
    radius: u32,
    horizontal_count: u32,
) -> Vec<Point> {
    let mut points = Vec::new();
    if radius == 0 {
        return points;
    }

    let mut anchor = Point::new(
        width / 2.0 - (radius as f64 - 1.0) * cell_span,
        height / 2.0,
    );

    for len in radius..horizontal_count {
        push_row(&mut points, anchor, cell_span, circumradius, len);
        anchor += Vec2::new(cell_span / 2.0, 1.5 * circumradius);
    }
    for len in (radius..=horizontal_count).rev() {
        push_row(&mut points, anchor, cell_span, circumradius, len);
        anchor += Vec2::new(cell_span, 0.0);
    }

    points
}

/// A grid fitted into a viewport: the largest square of the draw area holds
/// `2r − 1` cells across, centered, shifted by the padding.
#[derive(Debug, Clone, PartialEq)]
pub struct GridLayout {
    /// Distance between neighboring cell centers (flat-to-flat width).
    pub cell_span: f64,
    pub circumradius: f64,
    /// Cell centers in widget-local coordinates, spiral order.
    pub centers: Vec<Point>,
}

impl GridLayout {
    /// `None` when the draw area has no positive extent.
    pub fn fit(viewport: Viewport, radius: u32) -> Option<Self> {
        let draw_width = viewport.draw_width();
        let draw_height = viewport.draw_height();
        let draw_size = draw_width.min(draw_height) as f64;
        if draw_size <= 0.0 || radius == 0 {
            return None;
        }

        let horizontal_count = radius * 2 - 1;
        let cell_span = draw_size / horizontal_count as f64;
        let circumradius = cell_span / 3.0_f64.sqrt();

        let offset = Vec2::new(viewport.padding.left as f64, viewport.padding.top as f64);
        let centers = cell_centers(
            draw_width as f64,
            draw_height as f64,
            cell_span,
            circumradius,
            radius,
            horizontal_count,
        )
        .into_iter()
        .map(|p| p + offset)
        .collect();

        Some(Self {
            cell_span,
            circumradius,
            centers,
        })
    }

    pub fn outline(&self, index: usize) -> Option<BezPath> {
        self.centers
            .get(index)
            .map(|c| hexagon_outline(*c, self.circumradius))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::Padding;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_cell_count_rings() {
        assert_eq!(cell_count(1), 1);
        assert_eq!(cell_count(2), 7);
        assert_eq!(cell_count(3), 19);
        assert_eq!(cell_count(4), 37);
        assert_eq!(cell_count(0), 0);
    }

    #[test]
    fn test_center_count_matches_cell_count() {
        for r in 1..=10 {
            let n = 2 * r - 1;
            let span = 10.0;
            let points = cell_centers(200.0, 200.0, span, span / 3.0_f64.sqrt(), r, n);
            assert_eq!(points.len(), cell_count(r), "radius {r}");
        }
    }

    #[test]
    fn test_single_cell_is_centered() {
        let points = cell_centers(100.0, 100.0, 100.0, 100.0 / 3.0_f64.sqrt(), 1, 1);
        assert_eq!(points.len(), 1);
        assert!((points[0].x - 50.0).abs() < EPS);
        assert!((points[0].y - 50.0).abs() < EPS);
    }

    #[test]
    fn test_radius_two_ring_around_center() {
        let span = 20.0;
        let points = cell_centers(60.0, 60.0, span, span / 3.0_f64.sqrt(), 2, 3);
        let center = Point::new(30.0, 30.0);
        let at_center = points
            .iter()
            .filter(|p| p.distance(center) < EPS)
            .count();
        assert_eq!(at_center, 1);
        for p in points.iter().filter(|p| p.distance(center) > EPS) {
            assert!((p.distance(center) - span).abs() < 1e-6);
        }
        // spiral order: the middle cell is emitted fourth
        assert!(points[3].distance(center) < EPS);
    }

    #[test]
    fn test_neighbors_are_one_span_apart_and_distinct() {
        let span = 12.0;
        let points = cell_centers(300.0, 300.0, span, span / 3.0_f64.sqrt(), 4, 7);
        for (i, a) in points.iter().enumerate() {
            let nearest = points
                .iter()
                .enumerate()
                .filter(|(j, _)| *j != i)
                .map(|(_, b)| a.distance(*b))
                .fold(f64::INFINITY, f64::min);
            assert!((nearest - span).abs() < 1e-6);
        }
    }

    #[test]
    fn test_hexagon_vertices_regular() {
        let center = Point::new(10.0, -4.0);
        let r = 7.5;
        let vertices = hexagon_vertices(center, r);
        for v in &vertices {
            assert!((v.distance(center) - r).abs() < 1e-9);
        }
        assert!((vertices[0].x - center.x).abs() < 1e-9);
        assert!((vertices[0].y - (center.y - r)).abs() < 1e-9);
        for i in 0..6 {
            let a = vertices[i] - center;
            let b = vertices[(i + 1) % 6] - center;
            let angle = (a.dot(b) / (r * r)).clamp(-1.0, 1.0).acos().to_degrees();
            assert!((angle - 60.0).abs() < 1e-6);
            // adjacent vertices of a regular hexagon are one circumradius apart
            assert!((vertices[i].distance(vertices[(i + 1) % 6]) - r).abs() < 1e-9);
        }
    }

    #[test]
    fn test_outline_closes() {
        use floem::kurbo::PathEl;
        let path = hexagon_outline(Point::ZERO, 1.0);
        let elements = path.elements();
        assert_eq!(elements.len(), 7);
        assert!(matches!(elements[0], PathEl::MoveTo(_)));
        assert!(matches!(elements[6], PathEl::ClosePath));
    }

    #[test]
    fn test_layout_fits_inside_draw_area() {
        let viewport = Viewport::new(220, 180, Padding::uniform(10));
        let layout = GridLayout::fit(viewport, 3).unwrap();
        assert!((layout.cell_span - 32.0).abs() < EPS);
        for c in &layout.centers {
            for v in hexagon_vertices(*c, layout.circumradius) {
                assert!(v.x >= 10.0 - 1e-6 && v.x <= 210.0 + 1e-6);
                assert!(v.y >= 10.0 - 1e-6 && v.y <= 170.0 + 1e-6);
            }
        }
    }

    #[test]
    fn test_layout_degenerate_area() {
        let viewport = Viewport::new(20, 100, Padding::uniform(10));
        assert!(GridLayout::fit(viewport, 2).is_none());
        assert!(GridLayout::fit(Viewport::new(0, 0, Padding::default()), 1).is_none());
    }
}
