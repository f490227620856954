//! # floem-hexpicker
//!
//! Two color picker widgets for [Floem](https://github.com/lapce/floem):
//!
//! - a hexagonal mosaic of color cells laid out in a spiral around the
//!   center cell, reporting the exact color under the pointer;
//! - a rounded gradient bar of color segments with a draggable thumb that
//!   snaps to the nearest color.
//!
//! Both pickers rasterize on the CPU and work without a window through the
//! [`Picker`] trait; [`grid_picker`] and [`bar_picker`] wrap them as views.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use floem::prelude::*;
//! use floem_hexpicker::{grid_picker, GridConfig, SwatchColor};
//!
//! let colors = RwSignal::new(Vec::<SwatchColor>::new());
//! let radius = RwSignal::new(3);
//! let grid = grid_picker(colors, radius, GridConfig::default())
//!     .unwrap()
//!     .on_color_click(|c| println!("#{}", c.to_hex()));
//! ```

mod bar_picker;
mod bar_view;
mod color;
mod config;
mod constants;
mod error;
mod geometry;
mod grid_picker;
mod grid_view;
mod math;
mod raster;
mod surface;

pub use bar_picker::{segment_width, touch_zones, zone_index, BarPicker, Thumb, UNBOUNDED_ZONE};
pub use bar_view::{bar_picker, BarPickerView};
pub use color::SwatchColor;
pub use config::{BarConfig, GridConfig};
pub use error::{PickerError, Result};
pub use geometry::{cell_centers, cell_count, hexagon_outline, hexagon_vertices, GridLayout};
pub use grid_picker::GridPicker;
pub use grid_view::{grid_picker, GridPickerView};
pub use raster::{BlendMode, Edges, Raster};
pub use surface::{
    Constraints, Extent, GestureHost, Padding, Picker, PointerEvent, PointerPhase, Viewport,
};
