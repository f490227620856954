//! Hexagonal mosaic picker.
//!
//! Cells are laid out by [`GridLayout`] and painted twice: once anti-aliased
//! with optional outlines for display, and once with hard edges and no
//! outlines into an index raster. Each index raster pixel carries the number
//! of the cell covering it, so a pointer lookup resolves to that cell's exact
//! color whatever its alpha.
//!
//! Both rasters grow every cell slightly so neighbors overlap; later cells
//! win the shared edge and no pixel inside the mosaic is left uncovered.

use std::borrow::Cow;

use crate::color::{self, SwatchColor};
use crate::config::{self, GridConfig};
use crate::constants;
use crate::error::{PickerError, Result};
use crate::geometry::{self, GridLayout};
use crate::raster::{BlendMode, Edges, Raster};
use crate::surface::{Constraints, GestureHost, Padding, Picker, PointerEvent, PointerPhase, Viewport};

type ColorCallback = Box<dyn Fn(SwatchColor)>;

/// Index raster pixel for cell `index`: opaque, `index + 1` packed into RGB.
fn index_color(index: usize) -> SwatchColor {
    let n = index + 1;
    SwatchColor::from_rgb((n >> 16) as u8, (n >> 8) as u8, n as u8)
}

/// Cell index stored in an index raster pixel; `None` for background.
fn cell_index(px: SwatchColor) -> Option<usize> {
    if px.a() != 255 {
        return None;
    }
    let n = (px.r() as usize) << 16 | (px.g() as usize) << 8 | px.b() as usize;
    n.checked_sub(1)
}

/// Transient state of one pointer gesture.
#[derive(Debug, Default)]
struct Contact {
    /// The gesture started over a cell and is ours until release.
    tracking: bool,
    pressed_color: Option<SwatchColor>,
}

pub struct GridPicker {
    colors: Vec<SwatchColor>,
    radius: u32,
    stroke_width: f64,
    stroke_color: SwatchColor,
    random_seed: Option<u64>,
    viewport: Option<Viewport>,
    /// Display raster.
    picker_raster: Option<Raster>,
    /// Exact-color raster used for hit testing.
    color_raster: Option<Raster>,
    contact: Contact,
    on_color_touch: Option<ColorCallback>,
    on_color_click: Option<ColorCallback>,
}

impl GridPicker {
    pub fn new(config: GridConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            colors: Vec::new(),
            radius: config.radius,
            stroke_width: config.stroke_width,
            stroke_color: config.stroke_color,
            random_seed: config.random_seed,
            viewport: None,
            picker_raster: None,
            color_raster: None,
            contact: Contact::default(),
            on_color_touch: None,
            on_color_click: None,
        })
    }

    pub fn radius(&self) -> u32 {
        self.radius
    }

    pub fn stroke_width(&self) -> f64 {
        self.stroke_width
    }

    pub fn stroke_color(&self) -> SwatchColor {
        self.stroke_color
    }

    /// Current colors; empty until set or generated at first layout.
    pub fn colors(&self) -> &[SwatchColor] {
        &self.colors
    }

    pub fn set_radius(&mut self, radius: u32) -> Result<()> {
        config::check_radius(radius)?;
        self.radius = radius;
        self.recreate_rasters();
        Ok(())
    }

    pub fn set_stroke_width(&mut self, stroke_width: f64) -> Result<()> {
        config::check_non_negative(stroke_width, "stroke width has to be at least 0")?;
        self.stroke_width = stroke_width;
        self.recreate_picker_raster();
        Ok(())
    }

    pub fn set_stroke_color(&mut self, stroke_color: SwatchColor) {
        self.stroke_color = stroke_color;
        self.recreate_picker_raster();
    }

    /// Replace the colors. Cell `i` shows `colors[i % colors.len()]`.
    pub fn set_colors(&mut self, colors: Vec<SwatchColor>) -> Result<()> {
        if colors.is_empty() {
            return Err(PickerError::EmptyInput);
        }
        self.colors = colors;
        self.recreate_rasters();
        Ok(())
    }

    pub fn set_on_color_touch(&mut self, f: impl Fn(SwatchColor) + 'static) {
        self.on_color_touch = Some(Box::new(f));
    }

    pub fn set_on_color_click(&mut self, f: impl Fn(SwatchColor) + 'static) {
        self.on_color_click = Some(Box::new(f));
    }

    /// Geometry for the current viewport and radius.
    pub fn layout(&self) -> Option<GridLayout> {
        GridLayout::fit(self.viewport?, self.radius)
    }

    fn cell_color(&self, index: usize) -> SwatchColor {
        self.colors[index % self.colors.len()]
    }

    /// Display raster: anti-aliased cells, then outlines on top when the stroke is visible.
    pub fn build_picker_raster(&self) -> Option<Raster> {
        let viewport = self.viewport?;
        let layout = GridLayout::fit(viewport, self.radius)?;
        if self.colors.is_empty() {
            return None;
        }

        let mut raster = Raster::new(viewport.width, viewport.height)?;
        let grown = layout.circumradius + constants::CELL_OVERLAP;
        for (i, center) in layout.centers.iter().enumerate() {
            let outline = geometry::hexagon_outline(*center, grown);
            raster.fill_shape(&outline, self.cell_color(i), Edges::Smooth, BlendMode::Copy);
        }
        if self.stroke_width > 0.0 {
            for center in &layout.centers {
                let outline = geometry::hexagon_outline(*center, layout.circumradius);
                raster.stroke_shape(&outline, self.stroke_width, self.stroke_color);
            }
        }
        Some(raster)
    }

    /// Index raster: hard-edged cells carrying their index over a transparent background.
    pub fn build_hit_raster(&self) -> Option<Raster> {
        let viewport = self.viewport?;
        let layout = GridLayout::fit(viewport, self.radius)?;
        if self.colors.is_empty() {
            return None;
        }

        let mut raster = Raster::new(viewport.width, viewport.height)?;
        let grown = layout.circumradius + constants::HIT_OVERLAP;
        for (i, center) in layout.centers.iter().enumerate() {
            let outline = geometry::hexagon_outline(*center, grown);
            raster.fill_shape(&outline, index_color(i), Edges::Hard, BlendMode::Copy);
        }
        Some(raster)
    }

    /// Cached display raster.
    pub fn render(&self) -> Option<&Raster> {
        self.picker_raster.as_ref()
    }

    /// Cached index raster.
    pub fn hit_raster(&self) -> Option<&Raster> {
        self.color_raster.as_ref()
    }

    /// Setters only rebuild what already exists; a picker that has not been
    /// laid out (or was laid out too small) waits for the next layout.
    fn recreate_rasters(&mut self) {
        self.recreate_picker_raster();
        if self.color_raster.take().is_some() {
            self.color_raster = self.build_hit_raster();
        }
    }

    fn recreate_picker_raster(&mut self) {
        if self.picker_raster.take().is_some() {
            log::debug!("rebuilding grid raster (radius {})", self.radius);
            self.picker_raster = self.build_picker_raster();
        }
    }

    /// Resolve a pointer event against the hit raster and fire callbacks.
    ///
    /// Returns the color under the pointer when the event landed on a cell.
    pub fn pick(&mut self, event: PointerEvent) -> Option<SwatchColor> {
        match event.phase {
            PointerPhase::Cancel => {
                self.contact = Contact::default();
                return None;
            }
            PointerPhase::Move | PointerPhase::Up if !self.contact.tracking => return None,
            _ => {}
        }

        let Some(color) = self.color_at(event.x, event.y) else {
            if matches!(event.phase, PointerPhase::Down | PointerPhase::Up) {
                self.contact = Contact::default();
            }
            return None;
        };

        if let Some(cb) = &self.on_color_touch {
            cb(color);
        }

        match event.phase {
            PointerPhase::Down => {
                self.contact = Contact {
                    tracking: true,
                    pressed_color: Some(color),
                };
            }
            PointerPhase::Up => {
                if self.contact.pressed_color == Some(color) {
                    if let Some(cb) = &self.on_color_click {
                        cb(color);
                    }
                }
                self.contact = Contact::default();
            }
            _ => {}
        }
        Some(color)
    }

    /// Color of the cell under a widget-local point. Fully transparent cells
    /// count as background.
    pub fn color_at(&self, x: f64, y: f64) -> Option<SwatchColor> {
        let raster = self.color_raster.as_ref()?;
        // truncate toward zero, like integer pixel coordinates from the host
        let index = cell_index(raster.pixel(x.trunc() as i64, y.trunc() as i64)?)?;
        let color = *self.colors.get(index.checked_rem(self.colors.len())?)?;
        (color.a() != 0).then_some(color)
    }
}

impl Picker for GridPicker {
    /// Prefers a square; an exact size from the host always wins.
    fn measure(&self, constraints: Constraints, padding: Padding) -> (u32, u32) {
        let side = constraints.square_side(padding);
        (
            constraints.width.resolve(side + padding.horizontal()),
            constraints.height.resolve(side + padding.vertical()),
        )
    }

    fn on_layout(&mut self, viewport: Viewport) {
        self.viewport = Some(viewport);
        if self.colors.is_empty() {
            let count = geometry::cell_count(self.radius);
            log::debug!("no grid colors set, generating {count}");
            self.colors = color::random_palette(count, self.random_seed);
        }

        self.picker_raster = None;
        self.picker_raster = self.build_picker_raster();
        self.color_raster = None;
        self.color_raster = self.build_hit_raster();
        self.contact = Contact::default();

        if self.picker_raster.is_none() {
            log::debug!(
                "grid laid out without drawable area ({}x{})",
                viewport.width,
                viewport.height
            );
        }
    }

    fn draw(&self) -> Option<Cow<'_, Raster>> {
        self.picker_raster.as_ref().map(Cow::Borrowed)
    }

    fn handle_pointer(&mut self, event: PointerEvent, _host: &mut dyn GestureHost) -> bool {
        self.pick(event).is_some()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::surface::Extent;

    const RED: SwatchColor = SwatchColor::from_rgb(220, 20, 60);
    const GREEN: SwatchColor = SwatchColor::from_rgb(20, 160, 60);
    const BLUE: SwatchColor = SwatchColor::from_rgb(30, 60, 200);

    fn laid_out(radius: u32, colors: Vec<SwatchColor>, size: u32) -> GridPicker {
        let mut picker = GridPicker::new(GridConfig {
            radius,
            ..Default::default()
        })
        .unwrap();
        picker.set_colors(colors).unwrap();
        picker.on_layout(Viewport::new(size, size, Padding::default()));
        picker
    }

    #[derive(Default)]
    struct Log {
        touches: Vec<SwatchColor>,
        clicks: Vec<SwatchColor>,
    }

    fn record(picker: &mut GridPicker) -> Rc<RefCell<Log>> {
        let log = Rc::new(RefCell::new(Log::default()));
        let touches = log.clone();
        picker.set_on_color_touch(move |c| touches.borrow_mut().touches.push(c));
        let clicks = log.clone();
        picker.set_on_color_click(move |c| clicks.borrow_mut().clicks.push(c));
        log
    }

    #[test]
    fn test_new_rejects_zero_radius() {
        let config = GridConfig {
            radius: 0,
            ..Default::default()
        };
        assert!(matches!(GridPicker::new(config), Err(PickerError::InvalidArgument(_))));
    }

    #[test]
    fn test_setters_validate_and_leave_state() {
        let mut picker = laid_out(2, vec![RED], 100);
        assert!(matches!(picker.set_radius(0), Err(PickerError::InvalidArgument(_))));
        assert_eq!(picker.radius(), 2);
        assert_eq!(picker.set_colors(Vec::new()), Err(PickerError::EmptyInput));
        assert_eq!(picker.colors(), &[RED]);
        assert!(picker.set_stroke_width(-2.0).is_err());
        assert!((picker.stroke_width() - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_hit_raster_matches_cell_colors() {
        let colors = vec![RED, GREEN, BLUE];
        let picker = laid_out(3, colors.clone(), 240);
        let layout = picker.layout().unwrap();
        let hit = picker.hit_raster().unwrap();
        assert_eq!(layout.centers.len(), geometry::cell_count(3));
        for (i, center) in layout.centers.iter().enumerate() {
            let px = hit.pixel(center.x as i64, center.y as i64).unwrap();
            assert_eq!(cell_index(px), Some(i), "cell {i}");
            assert_eq!(picker.color_at(center.x, center.y), Some(colors[i % colors.len()]));
        }
    }

    #[test]
    fn test_index_color_round_trip() {
        for i in [0, 1, 254, 255, 256, 70_000] {
            assert_eq!(cell_index(index_color(i)), Some(i));
        }
        assert_eq!(cell_index(SwatchColor::TRANSPARENT), None);
        assert_eq!(cell_index(SwatchColor::from_rgba8(0, 0, 5, 128)), None);
    }

    #[test]
    fn test_translucent_colors_are_reported_exactly() {
        let soft = SwatchColor::from_rgba8(10, 20, 30, 77);
        let clear = SwatchColor::from_rgba8(90, 90, 90, 0);
        let picker = laid_out(2, vec![soft, clear], 120);
        let centers = picker.layout().unwrap().centers;
        assert_eq!(picker.color_at(centers[0].x, centers[0].y), Some(soft));
        // a fully transparent cell is background
        assert_eq!(picker.color_at(centers[1].x, centers[1].y), None);
    }

    #[test]
    fn test_painted_pixels_always_hit_a_cell() {
        for radius in [2, 4, 6] {
            for (w, h) in [(311, 300), (300, 311), (257, 263)] {
                let mut picker = GridPicker::new(GridConfig {
                    radius,
                    random_seed: Some(5),
                    ..Default::default()
                })
                .unwrap();
                picker.on_layout(Viewport::new(w, h, Padding::default()));
                let shown = picker.render().unwrap();
                for y in 0..h as i64 {
                    for x in 0..w as i64 {
                        let visible = shown.pixel(x, y).is_some_and(|c| c.a() >= 128);
                        if visible {
                            assert!(
                                picker.color_at(x as f64, y as f64).is_some(),
                                "radius {radius} {w}x{h}: ({x}, {y}) painted but not hittable"
                            );
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn test_shared_edges_are_hittable_and_opaque() {
        let mut picker = GridPicker::new(GridConfig {
            radius: 4,
            random_seed: Some(9),
            ..Default::default()
        })
        .unwrap();
        picker.on_layout(Viewport::new(311, 300, Padding::default()));
        let log = record(&mut picker);
        assert!(picker.pick(PointerEvent::down(155.3, 38.3)).is_some());
        assert_eq!(log.borrow().touches.len(), 1);

        let layout = picker.layout().unwrap();
        let shown = picker.render().unwrap();
        let neighbor = layout.cell_span * 1.01;
        for (i, a) in layout.centers.iter().enumerate() {
            for b in &layout.centers[i + 1..] {
                if a.distance(*b) > neighbor {
                    continue;
                }
                let mid = a.midpoint(*b);
                assert!(picker.color_at(mid.x, mid.y).is_some(), "seam at {mid:?}");
                let px = shown.pixel(mid.x as i64, mid.y as i64).unwrap();
                assert_eq!(px.a(), 255, "hairline at {mid:?}");
            }
        }
    }

    #[test]
    fn test_hit_raster_ignores_stroke() {
        let mut picker = laid_out(2, vec![RED, GREEN], 120);
        let before = picker.hit_raster().cloned();
        picker.set_stroke_width(6.0).unwrap();
        picker.set_stroke_color(BLUE);
        assert_eq!(picker.hit_raster().cloned(), before);

        let layout = picker.layout().unwrap();
        let top = geometry::hexagon_vertices(layout.centers[3], layout.circumradius)[0];
        let shown = picker.render().unwrap();
        assert_eq!(shown.pixel(top.x as i64, top.y as i64 + 1), Some(BLUE));
    }

    #[test]
    fn test_single_cell_scenario() {
        let mut picker = laid_out(1, vec![RED], 100);
        let log = record(&mut picker);
        assert_eq!(picker.layout().unwrap().centers.len(), 1);

        assert_eq!(picker.pick(PointerEvent::down(0.0, 0.0)), None);
        assert!(log.borrow().touches.is_empty());

        assert_eq!(picker.pick(PointerEvent::down(50.0, 50.0)), Some(RED));
        assert_eq!(picker.pick(PointerEvent::up(50.0, 50.0)), Some(RED));
        assert_eq!(log.borrow().touches, vec![RED, RED]);
        assert_eq!(log.borrow().clicks, vec![RED]);
    }

    #[test]
    fn test_click_requires_same_color_on_release() {
        let mut picker = laid_out(2, vec![RED, GREEN], 120);
        let log = record(&mut picker);
        let centers = picker.layout().unwrap().centers;
        let (a, b) = (centers[0], centers[1]);

        picker.pick(PointerEvent::down(a.x, a.y));
        picker.pick(PointerEvent::moved(b.x, b.y));
        picker.pick(PointerEvent::up(b.x, b.y));
        assert_eq!(log.borrow().touches, vec![RED, GREEN, GREEN]);
        assert!(log.borrow().clicks.is_empty());
    }

    #[test]
    fn test_gesture_starting_on_background_is_ignored() {
        let mut picker = laid_out(1, vec![RED], 100);
        let log = record(&mut picker);
        picker.pick(PointerEvent::down(1.0, 1.0));
        picker.pick(PointerEvent::moved(50.0, 50.0));
        picker.pick(PointerEvent::up(50.0, 50.0));
        assert!(log.borrow().touches.is_empty());
        assert!(log.borrow().clicks.is_empty());
    }

    #[test]
    fn test_cancel_drops_pressed_color() {
        let mut picker = laid_out(1, vec![RED], 100);
        let log = record(&mut picker);
        picker.pick(PointerEvent::down(50.0, 50.0));
        picker.pick(PointerEvent::cancel());
        picker.pick(PointerEvent::up(50.0, 50.0));
        assert!(log.borrow().clicks.is_empty());
    }

    #[test]
    fn test_out_of_bounds_is_no_event() {
        let mut picker = laid_out(2, vec![RED], 100);
        assert_eq!(picker.pick(PointerEvent::down(150.0, 50.0)), None);
        assert_eq!(picker.pick(PointerEvent::down(50.0, -3.0)), None);
    }

    #[test]
    fn test_degenerate_layout_renders_nothing() {
        let mut picker = GridPicker::new(GridConfig::default()).unwrap();
        picker.on_layout(Viewport::new(10, 10, Padding::uniform(6)));
        assert!(picker.render().is_none());
        assert!(picker.draw().is_none());
        assert_eq!(picker.pick(PointerEvent::down(5.0, 5.0)), None);

        // setters do not build rasters for a degenerate layout
        picker.set_radius(2).unwrap();
        assert!(picker.render().is_none());

        picker.on_layout(Viewport::new(100, 100, Padding::uniform(6)));
        assert!(picker.render().is_some());
    }

    #[test]
    fn test_auto_fill_uses_cell_count() {
        let mut picker = GridPicker::new(GridConfig {
            radius: 4,
            random_seed: Some(11),
            ..Default::default()
        })
        .unwrap();
        picker.on_layout(Viewport::new(200, 200, Padding::default()));
        assert_eq!(picker.colors().len(), 37);
        assert!(picker.colors().iter().all(|c| c.a() == 255));
    }

    #[test]
    fn test_setters_before_layout_do_not_build() {
        let mut picker = GridPicker::new(GridConfig::default()).unwrap();
        picker.set_colors(vec![RED]).unwrap();
        picker.set_radius(5).unwrap();
        assert!(picker.render().is_none());
        assert!(picker.hit_raster().is_none());
    }

    #[test]
    fn test_radius_change_rebuilds() {
        let mut picker = laid_out(1, vec![RED, GREEN], 140);
        picker.set_radius(2).unwrap();
        let layout = picker.layout().unwrap();
        assert_eq!(layout.centers.len(), 7);
        let c = layout.centers[1];
        assert_eq!(picker.color_at(c.x, c.y), Some(GREEN));
    }

    #[test]
    fn test_padding_shifts_cells() {
        let mut picker = GridPicker::new(GridConfig {
            radius: 1,
            ..Default::default()
        })
        .unwrap();
        picker.set_colors(vec![BLUE]).unwrap();
        picker.on_layout(Viewport::new(120, 100, Padding {
            left: 20,
            top: 0,
            right: 0,
            bottom: 0,
        }));
        let center = picker.layout().unwrap().centers[0];
        assert!((center.x - 70.0).abs() < 1e-9);
        assert_eq!(picker.color_at(70.0, 50.0), Some(BLUE));
        assert_eq!(picker.color_at(10.0, 50.0), None);
    }

    #[test]
    fn test_measure_prefers_square() {
        let picker = GridPicker::new(GridConfig::default()).unwrap();
        let padding = Padding::uniform(4);
        let c = Constraints::new(Extent::AtMost(300), Extent::AtMost(200));
        assert_eq!(picker.measure(c, padding), (200, 200));
        let c = Constraints::new(Extent::Exactly(300), Extent::AtMost(200));
        assert_eq!(picker.measure(c, padding), (300, 200));
    }
}
