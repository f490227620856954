//! Floem view hosting a [`GridPicker`].
//!
//! The picker's display raster is handed to the renderer as an image and only
//! re-uploaded when the picker rebuilds it; pointer events go straight to the
//! picker's hit raster.

use floem::kurbo::Rect;
use floem::peniko;

use floem::reactive::{create_effect, RwSignal, SignalGet};
use floem::views::Decorators;
use floem::{
    context::{ComputeLayoutCx, EventCx, PaintCx, UpdateCx},
    event::{Event, EventPropagation},
    View, ViewId,
};
use floem_renderer::Renderer;

use crate::color::SwatchColor;
use crate::config::GridConfig;
use crate::error::{PickerError, Result};
use crate::grid_picker::GridPicker;
use crate::surface::{Padding, Picker, PointerEvent, PointerPhase, Viewport};

enum GridUpdate {
    Colors(Vec<SwatchColor>),
    Radius(u32),
}

pub struct GridPickerView {
    id: ViewId,
    picker: GridPicker,
    padding: Padding,
    size: floem::taffy::prelude::Size<f32>,
    /// Upload of the picker's display raster.
    picker_img: Option<peniko::Image>,
    picker_hash: Vec<u8>,
}

/// Creates a hexagonal grid picker.
///
/// - `colors`: cell colors in spiral order; an empty sequence leaves the
///   picker to generate random ones at first layout.
/// - `radius`: grid radius, at least 1. Invalid values are logged and ignored.
pub fn grid_picker(
    colors: RwSignal<Vec<SwatchColor>>,
    radius: RwSignal<u32>,
    config: GridConfig,
) -> Result<GridPickerView> {
    let id = ViewId::new();
    let padding = config.padding;
    let mut picker = GridPicker::new(GridConfig {
        radius: radius.get_untracked(),
        ..config
    })?;
    let initial = colors.get_untracked();
    if !initial.is_empty() {
        picker.set_colors(initial)?;
    }

    create_effect(move |_| {
        let c = colors.get();
        id.update_state(GridUpdate::Colors(c));
    });

    create_effect(move |_| {
        let r = radius.get();
        id.update_state(GridUpdate::Radius(r));
    });

    Ok(GridPickerView {
        id,
        picker,
        padding,
        size: Default::default(),
        picker_img: None,
        picker_hash: Vec::new(),
    }
    .style(|s| {
        s.flex_grow(1.0)
            .aspect_ratio(1.0)
            .min_height(100.0)
            .cursor(floem::style::CursorStyle::Pointer)
    }))
}

impl GridPickerView {
    /// Called with the exact color under every contact over a cell.
    pub fn on_color_touch(mut self, f: impl Fn(SwatchColor) + 'static) -> Self {
        self.picker.set_on_color_touch(f);
        self
    }

    /// Called when press and release land on the same color.
    pub fn on_color_click(mut self, f: impl Fn(SwatchColor) + 'static) -> Self {
        self.picker.set_on_color_click(f);
        self
    }

    pub fn stroke(mut self, width: f64, color: SwatchColor) -> Result<Self> {
        self.picker.set_stroke_width(width)?;
        self.picker.set_stroke_color(color);
        Ok(self)
    }

    /// Re-upload the display raster after the picker rebuilt it.
    fn refresh_image(&mut self) {
        match self.picker.draw() {
            Some(raster) => {
                let (img, hash) = raster.to_image();
                self.picker_img = Some(img);
                self.picker_hash = hash;
            }
            None => {
                self.picker_img = None;
                self.picker_hash.clear();
            }
        }
    }
}

impl View for GridPickerView {
    fn id(&self) -> ViewId {
        self.id
    }

    fn update(&mut self, _cx: &mut UpdateCx, state: Box<dyn std::any::Any>) {
        if let Ok(update) = state.downcast::<GridUpdate>() {
            let result = match *update {
                GridUpdate::Colors(c) => self.picker.set_colors(c),
                GridUpdate::Radius(r) => self.picker.set_radius(r),
            };
            match result {
                Ok(()) => {
                    self.refresh_image();
                    self.id.request_paint();
                }
                // an empty signal means "let the picker choose"
                Err(PickerError::EmptyInput) => {}
                Err(e) => log::warn!("grid picker rejected update: {e}"),
            }
        }
    }

    fn event_before_children(&mut self, cx: &mut EventCx, event: &Event) -> EventPropagation {
        let pointer = match event {
            Event::PointerDown(e) => PointerEvent::new(e.pos.x, e.pos.y, PointerPhase::Down),
            Event::PointerMove(e) => PointerEvent::new(e.pos.x, e.pos.y, PointerPhase::Move),
            Event::PointerUp(e) => PointerEvent::new(e.pos.x, e.pos.y, PointerPhase::Up),
            Event::FocusLost => PointerEvent::cancel(),
            _ => return EventPropagation::Continue,
        };

        if self.picker.handle_pointer(pointer, &mut ()) {
            if pointer.phase == PointerPhase::Down {
                cx.update_active(self.id());
            }
            EventPropagation::Stop
        } else {
            EventPropagation::Continue
        }
    }

    fn compute_layout(&mut self, _cx: &mut ComputeLayoutCx) -> Option<Rect> {
        let layout = self.id.get_layout().unwrap_or_default();
        if layout.size != self.size {
            self.size = layout.size;
            self.picker.on_layout(Viewport::new(
                self.size.width.round() as u32,
                self.size.height.round() as u32,
                self.padding,
            ));
            self.refresh_image();
        }
        None
    }

    fn paint(&mut self, cx: &mut PaintCx) {
        let Some(ref img) = self.picker_img else {
            return;
        };
        let rect = Rect::new(0.0, 0.0, img.width as f64, img.height as f64);
        cx.draw_img(
            floem_renderer::Img {
                img: img.clone(),
                hash: &self.picker_hash,
            },
            rect,
        );
    }
}
