//! Sizing, color, and styling defaults for the pickers.

use crate::color::SwatchColor;

/// Grid radius (rings of cells around the center cell, counting the center)
pub const DEFAULT_RADIUS: u32 = 3;

/// Cell outline width; 0 draws no outline
pub const DEFAULT_STROKE_WIDTH: f64 = 0.0;

/// Cell outline color
pub const DEFAULT_STROKE_COLOR: SwatchColor = SwatchColor::TRANSPARENT;

/// Thumb diameter on the bar
pub const DEFAULT_THUMB_SIZE: f64 = 24.0;

/// Bar track height
pub const DEFAULT_BAR_HEIGHT: f64 = 16.0;

/// Color the bar shape is painted with before segments are multiplied over it
pub const DEFAULT_BAR_MASK_COLOR: SwatchColor = SwatchColor::WHITE;

/// Colors generated for a bar laid out without a color sequence
pub const RANDOM_BAR_COLORS: usize = 8;

/// Horizontal travel before a deferred press becomes a drag
pub const DEFAULT_TOUCH_SLOP: f64 = 8.0;

/// Halo radius relative to the thumb size, drawn while dragging
pub const HALO_SCALE: f64 = 0.8;

/// Alpha mask applied to the selected color for the halo
pub const HALO_ALPHA_MASK: u8 = 0x7f;

/// Circumradius added to each displayed cell so neighbors overlap instead of
/// leaving a half-covered seam
pub const CELL_OVERLAP: f64 = 1.0;

/// Circumradius added to each hit-test cell; larger than `CELL_OVERLAP` so
/// every visibly painted pixel resolves to a cell
pub const HIT_OVERLAP: f64 = 2.0;
