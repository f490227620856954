//! Construction-time options for both pickers.

use crate::color::SwatchColor;
use crate::constants;
use crate::error::{PickerError, Result};
use crate::surface::Padding;

/// Options for the hexagonal grid picker.
#[derive(Debug, Clone, PartialEq)]
pub struct GridConfig {
    /// Cells from the center to the edge, counting the center. At least 1.
    pub radius: u32,
    /// Cell outline width in pixels; 0 disables outlines.
    pub stroke_width: f64,
    pub stroke_color: SwatchColor,
    pub padding: Padding,
    /// Seed for the colors generated when none are set before layout.
    pub random_seed: Option<u64>,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            radius: constants::DEFAULT_RADIUS,
            stroke_width: constants::DEFAULT_STROKE_WIDTH,
            stroke_color: constants::DEFAULT_STROKE_COLOR,
            padding: Padding::default(),
            random_seed: None,
        }
    }
}

impl GridConfig {
    pub(crate) fn validate(&self) -> Result<()> {
        check_radius(self.radius)?;
        check_non_negative(self.stroke_width, "stroke width has to be at least 0")
    }
}

/// Options for the gradient bar picker.
#[derive(Debug, Clone, PartialEq)]
pub struct BarConfig {
    /// Thumb diameter; 0 hides the thumb.
    pub thumb_size: f64,
    pub bar_height: f64,
    /// Fill of the rounded bar shape the color segments are multiplied onto.
    pub bar_mask_color: SwatchColor,
    pub padding: Padding,
    /// Horizontal travel before a deferred press turns into a drag.
    pub touch_slop: f64,
    pub random_seed: Option<u64>,
}

impl Default for BarConfig {
    fn default() -> Self {
        Self {
            thumb_size: constants::DEFAULT_THUMB_SIZE,
            bar_height: constants::DEFAULT_BAR_HEIGHT,
            bar_mask_color: constants::DEFAULT_BAR_MASK_COLOR,
            padding: Padding::default(),
            touch_slop: constants::DEFAULT_TOUCH_SLOP,
            random_seed: None,
        }
    }
}

impl BarConfig {
    pub(crate) fn validate(&self) -> Result<()> {
        check_non_negative(self.thumb_size, "thumb size has to be at least 0")?;
        check_non_negative(self.bar_height, "bar height has to be at least 0")?;
        check_non_negative(self.touch_slop, "touch slop has to be at least 0")
    }
}

pub(crate) fn check_radius(radius: u32) -> Result<()> {
    if radius >= 1 {
        Ok(())
    } else {
        Err(PickerError::InvalidArgument("radius has to be greater than 0"))
    }
}

/// Rejects negatives and NaN.
pub(crate) fn check_non_negative(value: f64, message: &'static str) -> Result<()> {
    if value >= 0.0 {
        Ok(())
    } else {
        Err(PickerError::InvalidArgument(message))
    }
}
