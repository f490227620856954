//! Gradient bar picker.
//!
//! A rounded bar painted in the mask color has one rectangle per color
//! multiplied over it. With three or more colors the first and last segments
//! are half as wide as the others, so the thumb can sit on the bar's ends
//! while every interior color is centered on a whole-segment step.
//!
//! Pointer x positions map to colors through touch zones: one rounded
//! threshold per color, the last one unbounded.

use std::borrow::Cow;

use floem::kurbo::{Point, Rect, RoundedRect};

use crate::color::{self, SwatchColor};
use crate::config::{self, BarConfig};
use crate::constants;
use crate::error::{PickerError, Result};
use crate::math;
use crate::raster::{BlendMode, Edges, Raster};
use crate::surface::{Constraints, GestureHost, Padding, Picker, PointerEvent, PointerPhase, Viewport};

type ColorCallback = Box<dyn Fn(SwatchColor)>;

/// Threshold of the last zone: everything to the right belongs to it.
pub const UNBOUNDED_ZONE: i64 = i64::MAX;

/// Width of one interior segment for `count` colors across `draw_width`.
pub fn segment_width(count: usize, draw_width: f64) -> f64 {
    if count > 2 {
        draw_width / (count - 1) as f64
    } else {
        draw_width / count as f64
    }
}

/// Touch zone thresholds for `count` colors on a bar starting at `left`.
///
/// Zone `i` covers every rounded x up to and including `zones[i]`.
pub fn touch_zones(count: usize, draw_width: f64, left: f64) -> Vec<i64> {
    if count == 0 {
        return Vec::new();
    }
    let width = segment_width(count, draw_width);
    let first_end = left + if count > 2 { width / 2.0 } else { width };

    let mut zones: Vec<i64> = (0..count - 1)
        .map(|i| math::round_half_up(first_end + i as f64 * width))
        .collect();
    zones.push(UNBOUNDED_ZONE);
    zones
}

/// Index of the first zone whose threshold is at least `x`.
pub fn zone_index(zones: &[i64], x: i64) -> Option<usize> {
    let index = zones.partition_point(|&threshold| threshold < x);
    (index < zones.len()).then_some(index)
}

/// Thumb geometry for the current selection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thumb {
    pub center: Point,
    pub radius: f64,
    pub color: SwatchColor,
    /// Translucent halo drawn under the thumb while dragging: radius and color.
    pub halo: Option<(f64, SwatchColor)>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum DragState {
    Idle,
    /// Pressed inside a container that defers presses; waiting for the slop.
    PossibleDrag { down_x: f64 },
    Dragging,
}

pub struct BarPicker {
    colors: Vec<SwatchColor>,
    selected: Option<SwatchColor>,
    thumb_size: f64,
    bar_height: f64,
    bar_mask_color: SwatchColor,
    touch_slop: f64,
    random_seed: Option<u64>,
    enabled: bool,
    viewport: Option<Viewport>,
    raster: Option<Raster>,
    touch_zones: Vec<i64>,
    drag: DragState,
    on_color_drag: Option<ColorCallback>,
    on_color_pick: Option<ColorCallback>,
}

impl BarPicker {
    pub fn new(config: BarConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            colors: Vec::new(),
            selected: None,
            thumb_size: config.thumb_size,
            bar_height: config.bar_height,
            bar_mask_color: config.bar_mask_color,
            touch_slop: config.touch_slop,
            random_seed: config.random_seed,
            enabled: true,
            viewport: None,
            raster: None,
            touch_zones: Vec::new(),
            drag: DragState::Idle,
            on_color_drag: None,
            on_color_pick: None,
        })
    }

    pub fn colors(&self) -> &[SwatchColor] {
        &self.colors
    }

    pub fn thumb_size(&self) -> f64 {
        self.thumb_size
    }

    pub fn bar_height(&self) -> f64 {
        self.bar_height
    }

    pub fn bar_mask_color(&self) -> SwatchColor {
        self.bar_mask_color
    }

    pub fn selected_color(&self) -> Option<SwatchColor> {
        self.selected
    }

    pub fn is_dragging(&self) -> bool {
        self.drag == DragState::Dragging
    }

    pub fn touch_zones(&self) -> &[i64] {
        &self.touch_zones
    }

    /// The cached bar without the thumb.
    pub fn bar_raster(&self) -> Option<&Raster> {
        self.raster.as_ref()
    }

    /// Replace the colors; the first one becomes selected.
    pub fn set_colors(&mut self, colors: Vec<SwatchColor>) -> Result<()> {
        let first = *colors.first().ok_or(PickerError::EmptyInput)?;
        self.colors = colors;
        self.selected = Some(first);
        if self.recreate_raster() {
            self.compute_touch_zones();
        }
        Ok(())
    }

    pub fn set_bar_height(&mut self, bar_height: f64) -> Result<()> {
        config::check_non_negative(bar_height, "bar height has to be at least 0")?;
        self.bar_height = bar_height;
        self.recreate_raster();
        Ok(())
    }

    /// The thumb is drawn per frame, so this never touches the cached raster.
    pub fn set_thumb_size(&mut self, thumb_size: f64) -> Result<()> {
        config::check_non_negative(thumb_size, "thumb size has to be at least 0")?;
        self.thumb_size = thumb_size;
        Ok(())
    }

    pub fn set_bar_mask_color(&mut self, color: SwatchColor) {
        self.bar_mask_color = color;
        self.recreate_raster();
    }

    /// Select any color, even one missing from the sequence.
    pub fn set_selected_color(&mut self, color: SwatchColor) {
        self.selected = Some(color);
    }

    /// A disabled bar ignores pointer input.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        if !enabled {
            self.drag = DragState::Idle;
        }
    }

    pub fn set_on_color_drag(&mut self, f: impl Fn(SwatchColor) + 'static) {
        self.on_color_drag = Some(Box::new(f));
    }

    pub fn set_on_color_pick(&mut self, f: impl Fn(SwatchColor) + 'static) {
        self.on_color_pick = Some(Box::new(f));
    }

    /// Rebuild the cached raster if one exists. Returns whether it did.
    fn recreate_raster(&mut self) -> bool {
        if self.raster.take().is_some() {
            log::debug!("rebuilding bar raster ({} colors)", self.colors.len());
            self.raster = self.build_raster();
            true
        } else {
            false
        }
    }

    /// Drawable width, if the viewport has a positive draw area.
    fn draw_area(&self) -> Option<(Viewport, f64, f64)> {
        let viewport = self.viewport?;
        let (w, h) = (viewport.draw_width(), viewport.draw_height());
        (w > 0 && h > 0).then_some((viewport, w as f64, h as f64))
    }

    /// Bar shape in the mask color with each color segment multiplied over it.
    pub fn build_raster(&self) -> Option<Raster> {
        let (viewport, draw_width, draw_height) = self.draw_area()?;
        if self.colors.is_empty() {
            return None;
        }

        let left = viewport.padding.left as f64;
        let bar_top = viewport.padding.top as f64 + draw_height / 2.0 - self.bar_height / 2.0;
        let bar_bottom = bar_top + self.bar_height;

        let count = self.colors.len();
        let smaller_outer = count > 2;
        let width = segment_width(count, draw_width);

        let mut raster = Raster::new(viewport.width, viewport.height)?;
        let bar = RoundedRect::new(left, bar_top, left + draw_width, bar_bottom, self.bar_height / 2.0);
        raster.fill_shape(&bar, self.bar_mask_color, Edges::Smooth, BlendMode::SourceOver);

        let mut start = left;
        for (i, color) in self.colors.iter().enumerate() {
            let segment = if smaller_outer && (i == 0 || i == count - 1) {
                width / 2.0
            } else {
                width
            };
            let rect = Rect::new(start, bar_top, start + segment, bar_bottom);
            raster.fill_shape(&rect, *color, Edges::Smooth, BlendMode::Multiply);
            start += segment;
        }
        Some(raster)
    }

    /// Recompute thresholds for the current colors and viewport.
    pub fn compute_touch_zones(&mut self) {
        self.touch_zones = match self.draw_area() {
            Some((viewport, draw_width, _)) => {
                touch_zones(self.colors.len(), draw_width, viewport.padding.left as f64)
            }
            None => Vec::new(),
        };
    }

    /// Thumb x relative to the bar start. Ends pin to the bar ends; a
    /// selection missing from the sequence sits at the start.
    fn thumb_offset(&self, selected: SwatchColor, draw_width: f64) -> f64 {
        let count = self.colors.len();
        let width = segment_width(count, draw_width);
        match self.colors.iter().position(|c| *c == selected) {
            Some(i) if i == count - 1 => draw_width,
            Some(i) if i > 0 => i as f64 * width,
            _ => 0.0,
        }
    }

    pub fn thumb(&self) -> Option<Thumb> {
        let selected = self.selected?;
        if self.thumb_size <= 0.0 || self.raster.is_none() {
            return None;
        }
        let (viewport, draw_width, draw_height) = self.draw_area()?;
        let center = Point::new(
            viewport.padding.left as f64 + self.thumb_offset(selected, draw_width),
            viewport.padding.top as f64 + draw_height / 2.0,
        );
        let halo = self.is_dragging().then(|| {
            (
                self.thumb_size * constants::HALO_SCALE,
                selected.with_alpha_mask(constants::HALO_ALPHA_MASK),
            )
        });
        Some(Thumb {
            center,
            radius: self.thumb_size / 2.0,
            color: selected,
            halo,
        })
    }

    /// The cached bar with the thumb composited on top.
    pub fn render(&self) -> Option<Raster> {
        let mut frame = self.raster.clone()?;
        if let Some(thumb) = self.thumb() {
            if let Some((radius, color)) = thumb.halo {
                frame.fill_circle(thumb.center, radius, color);
            }
            frame.fill_circle(thumb.center, thumb.radius, thumb.color);
        }
        Some(frame)
    }

    fn start_drag(&mut self, event: PointerEvent, host: &mut dyn GestureHost) {
        self.drag = DragState::Dragging;
        self.track(event);
        host.claim_gesture();
    }

    /// Select the zone under the pointer and report it.
    fn track(&mut self, event: PointerEvent) {
        let x = math::round_half_up(event.x);
        let Some(color) = zone_index(&self.touch_zones, x).and_then(|i| self.colors.get(i).copied())
        else {
            return;
        };

        self.selected = Some(color);
        if let Some(cb) = &self.on_color_drag {
            cb(color);
        }
        if event.phase == PointerPhase::Up {
            if let Some(cb) = &self.on_color_pick {
                cb(color);
            }
        }
    }

    /// Drive the drag state machine. Returns whether the event was consumed.
    pub fn on_pointer(&mut self, event: PointerEvent, host: &mut dyn GestureHost) -> bool {
        if !self.enabled {
            return false;
        }
        log::trace!("bar pointer {:?} in {:?}", event.phase, self.drag);

        match (event.phase, self.drag) {
            (PointerPhase::Down, _) => {
                if host.defers_press() {
                    self.drag = DragState::PossibleDrag { down_x: event.x };
                } else {
                    self.start_drag(event, host);
                }
            }
            (PointerPhase::Move, DragState::Dragging) => self.track(event),
            (PointerPhase::Move, DragState::PossibleDrag { down_x }) => {
                if (event.x - down_x).abs() > self.touch_slop {
                    self.start_drag(event, host);
                }
            }
            (PointerPhase::Up, DragState::Dragging) => {
                self.track(event);
                self.drag = DragState::Idle;
            }
            (PointerPhase::Up, DragState::PossibleDrag { .. }) => {
                // a tap: start, track and stop in one step
                self.drag = DragState::Dragging;
                self.track(event);
                self.drag = DragState::Idle;
            }
            (PointerPhase::Cancel, DragState::Idle) => return false,
            (PointerPhase::Cancel, _) => self.drag = DragState::Idle,
            (PointerPhase::Move | PointerPhase::Up, DragState::Idle) => return false,
        }
        true
    }
}

impl Picker for BarPicker {
    /// Full available width; tall enough for the thicker of thumb and bar.
    fn measure(&self, constraints: Constraints, padding: Padding) -> (u32, u32) {
        let height = self.thumb_size.max(self.bar_height).ceil() as u32 + padding.vertical();
        (constraints.width_limit(), constraints.height.resolve(height))
    }

    fn on_layout(&mut self, viewport: Viewport) {
        self.viewport = Some(viewport);
        if self.colors.is_empty() {
            log::debug!("no bar colors set, generating {}", constants::RANDOM_BAR_COLORS);
            self.colors = color::random_palette(constants::RANDOM_BAR_COLORS, self.random_seed);
            self.selected = self.colors.first().copied();
        }

        self.raster = None;
        self.raster = self.build_raster();
        self.compute_touch_zones();
    }

    fn draw(&self) -> Option<Cow<'_, Raster>> {
        self.render().map(Cow::Owned)
    }

    fn handle_pointer(&mut self, event: PointerEvent, host: &mut dyn GestureHost) -> bool {
        self.on_pointer(event, host)
    }
}
