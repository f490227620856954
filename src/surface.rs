//! Host-facing surface: the capability every picker exposes to whatever
//! windowing layer drives it, plus the pointer and layout types it speaks.

use std::borrow::Cow;

use crate::raster::Raster;

/// Padding insets in whole pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Padding {
    pub left: u32,
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
}

impl Padding {
    pub const fn uniform(p: u32) -> Self {
        Self {
            left: p,
            top: p,
            right: p,
            bottom: p,
        }
    }

    pub fn horizontal(&self) -> u32 {
        self.left + self.right
    }

    pub fn vertical(&self) -> u32 {
        self.top + self.bottom
    }
}

/// Final size handed to a picker by the layout pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
    pub padding: Padding,
}

impl Viewport {
    pub fn new(width: u32, height: u32, padding: Padding) -> Self {
        Self {
            width,
            height,
            padding,
        }
    }

    /// Width left for drawing once padding is removed. May be negative.
    pub fn draw_width(&self) -> i64 {
        self.width as i64 - self.padding.horizontal() as i64
    }

    /// Height left for drawing once padding is removed. May be negative.
    pub fn draw_height(&self) -> i64 {
        self.height as i64 - self.padding.vertical() as i64
    }
}

/// One axis of a measurement constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Extent {
    /// The host imposes this size.
    Exactly(u32),
    /// Any size up to this one.
    AtMost(u32),
    /// No limit from the host.
    Unbounded,
}

impl Extent {
    fn limit(self) -> Option<u32> {
        match self {
            Extent::Exactly(v) | Extent::AtMost(v) => Some(v),
            Extent::Unbounded => None,
        }
    }

    /// Fit a desired size into this extent.
    pub fn resolve(self, desired: u32) -> u32 {
        match self {
            Extent::Exactly(v) => v,
            Extent::AtMost(v) => desired.min(v),
            Extent::Unbounded => desired,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Constraints {
    pub width: Extent,
    pub height: Extent,
}

impl Constraints {
    pub fn new(width: Extent, height: Extent) -> Self {
        Self { width, height }
    }

    /// Largest square that fits both limited axes once padding is removed.
    pub(crate) fn square_side(&self, padding: Padding) -> u32 {
        let w = self
            .width
            .limit()
            .map(|v| v.saturating_sub(padding.horizontal()));
        let h = self
            .height
            .limit()
            .map(|v| v.saturating_sub(padding.vertical()));
        match (w, h) {
            (Some(w), Some(h)) => w.min(h),
            (Some(v), None) | (None, Some(v)) => v,
            (None, None) => 0,
        }
    }

    pub(crate) fn width_limit(&self) -> u32 {
        self.width.limit().unwrap_or(0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerPhase {
    Down,
    Move,
    Up,
    Cancel,
}

/// Pointer event in widget-local pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub x: f64,
    pub y: f64,
    pub phase: PointerPhase,
}

impl PointerEvent {
    pub fn new(x: f64, y: f64, phase: PointerPhase) -> Self {
        Self { x, y, phase }
    }

    pub fn down(x: f64, y: f64) -> Self {
        Self::new(x, y, PointerPhase::Down)
    }

    pub fn moved(x: f64, y: f64) -> Self {
        Self::new(x, y, PointerPhase::Move)
    }

    pub fn up(x: f64, y: f64) -> Self {
        Self::new(x, y, PointerPhase::Up)
    }

    pub fn cancel() -> Self {
        Self::new(0.0, 0.0, PointerPhase::Cancel)
    }
}

/// What a picker may ask of the container it lives in during a gesture.
pub trait GestureHost {
    /// Whether some ancestor delays press feedback, e.g. a scroll container
    /// that still wants to recognize a fling.
    fn defers_press(&self) -> bool {
        false
    }

    /// Take the rest of the current gesture away from ancestors.
    fn claim_gesture(&mut self) {}
}

/// A host with no ancestors to negotiate with.
impl GestureHost for () {}

/// The capability a host drives: measure, lay out, draw, feed pointer input.
pub trait Picker {
    /// Preferred outer size (padding included) under `constraints`.
    fn measure(&self, constraints: Constraints, padding: Padding) -> (u32, u32);

    /// Final size is known; rebuild cached rasters.
    fn on_layout(&mut self, viewport: Viewport);

    /// Full frame to show, or `None` while there is nothing to draw.
    fn draw(&self) -> Option<Cow<'_, Raster>>;

    /// Returns whether the event was consumed.
    fn handle_pointer(&mut self, event: PointerEvent, host: &mut dyn GestureHost) -> bool;
}
