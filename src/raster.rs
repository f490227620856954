//! Offscreen RGBA8 raster backed by a `tiny_skia::Pixmap`.
//!
//! Pickers render into these buffers once per layout and hand the result to
//! the renderer as an image, instead of re-issuing dozens of paths per frame.
//! Shapes come in as kurbo geometry and are converted to tiny-skia paths.

use std::sync::Arc;

use floem::kurbo::{PathEl, Point, Shape};
use floem::peniko::{self, Blob};
use tiny_skia::{FillRule, LineJoin, Paint, Path, PathBuilder, Pixmap, Stroke, Transform};

use crate::color::SwatchColor;

/// Curve flattening tolerance in pixels.
const TOLERANCE: f64 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlendMode {
    /// Replace the destination outright.
    Copy,
    SourceOver,
    /// Porter-Duff multiply: color and alpha are both multiplied, so the
    /// source only shows where the destination is already painted.
    Multiply,
}

impl BlendMode {
    fn to_skia(self) -> tiny_skia::BlendMode {
        match self {
            BlendMode::Copy => tiny_skia::BlendMode::Source,
            BlendMode::SourceOver => tiny_skia::BlendMode::SourceOver,
            BlendMode::Multiply => tiny_skia::BlendMode::Modulate,
        }
    }
}

/// Edge treatment for a fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edges {
    /// Anti-aliased coverage along edges.
    Smooth,
    /// A pixel is either in (its center is inside) or out. Opaque colors survive exactly.
    Hard,
}

fn paint(color: SwatchColor, edges: Edges, mode: BlendMode) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color_rgba8(color.r(), color.g(), color.b(), color.a());
    paint.anti_alias = edges == Edges::Smooth;
    paint.blend_mode = mode.to_skia();
    paint
}

/// Convert any kurbo shape to a tiny-skia path. `None` for empty shapes.
fn skia_path(shape: &impl Shape) -> Option<Path> {
    let mut pb = PathBuilder::new();
    for el in shape.path_elements(TOLERANCE) {
        match el {
            PathEl::MoveTo(p) => pb.move_to(p.x as f32, p.y as f32),
            PathEl::LineTo(p) => pb.line_to(p.x as f32, p.y as f32),
            PathEl::QuadTo(c, p) => pb.quad_to(c.x as f32, c.y as f32, p.x as f32, p.y as f32),
            PathEl::CurveTo(c1, c2, p) => pb.cubic_to(
                c1.x as f32,
                c1.y as f32,
                c2.x as f32,
                c2.y as f32,
                p.x as f32,
                p.y as f32,
            ),
            PathEl::ClosePath => pb.close(),
        }
    }
    pb.finish()
}

/// Premultiplied RGBA8 pixel buffer, row-major, top-left origin.
#[derive(Debug, Clone, PartialEq)]
pub struct Raster {
    pixmap: Pixmap,
}

impl Raster {
    /// A fully transparent raster, or `None` when either side is 0.
    pub fn new(width: u32, height: u32) -> Option<Self> {
        Pixmap::new(width, height).map(|pixmap| Self { pixmap })
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    pub fn contains(&self, x: i64, y: i64) -> bool {
        x >= 0 && y >= 0 && x < self.width() as i64 && y < self.height() as i64
    }

    /// Straight-alpha color at `(x, y)`, or `None` outside the raster.
    pub fn pixel(&self, x: i64, y: i64) -> Option<SwatchColor> {
        if !self.contains(x, y) {
            return None;
        }
        let px = self.pixmap.pixel(x as u32, y as u32)?.demultiply();
        Some(SwatchColor::from_rgba8(
            px.red(),
            px.green(),
            px.blue(),
            px.alpha(),
        ))
    }

    /// Pixels as straight-alpha RGBA8 bytes.
    pub fn to_rgba8(&self) -> Vec<u8> {
        self.pixmap
            .pixels()
            .iter()
            .flat_map(|px| {
                let c = px.demultiply();
                [c.red(), c.green(), c.blue(), c.alpha()]
            })
            .collect()
    }

    /// Fill any kurbo shape (nonzero winding).
    pub fn fill_shape(&mut self, shape: &impl Shape, color: SwatchColor, edges: Edges, mode: BlendMode) {
        let Some(path) = skia_path(shape) else {
            return;
        };
        self.pixmap.fill_path(
            &path,
            &paint(color, edges, mode),
            FillRule::Winding,
            Transform::identity(),
            None,
        );
    }

    pub fn fill_circle(&mut self, center: Point, radius: f64, color: SwatchColor) {
        let Some(path) = PathBuilder::from_circle(center.x as f32, center.y as f32, radius as f32)
        else {
            return;
        };
        self.pixmap.fill_path(
            &path,
            &paint(color, Edges::Smooth, BlendMode::SourceOver),
            FillRule::Winding,
            Transform::identity(),
            None,
        );
    }

    /// Stroke a shape centered on its outline, with mitered corners.
    pub fn stroke_shape(&mut self, shape: &impl Shape, width: f64, color: SwatchColor) {
        if width <= 0.0 {
            return;
        }
        let Some(path) = skia_path(shape) else {
            return;
        };
        let stroke = Stroke {
            width: width as f32,
            line_join: LineJoin::Miter,
            ..Stroke::default()
        };
        self.pixmap.stroke_path(
            &path,
            &paint(color, Edges::Smooth, BlendMode::SourceOver),
            &stroke,
            Transform::identity(),
            None,
        );
    }

    /// Wrap a copy of the pixels for the renderer, with a cache hash for `floem_renderer::Img`.
    pub fn to_image(&self) -> (peniko::Image, Vec<u8>) {
        let blob = Blob::new(Arc::new(self.to_rgba8()));
        let hash = blob.id().to_le_bytes().to_vec();
        let img = peniko::Image::new(blob, peniko::Format::Rgba8, self.width(), self.height());
        (img, hash)
    }
}
