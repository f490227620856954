//! Floem view hosting a [`BarPicker`].
//!
//! The bar itself is uploaded once per rebuild as an image; the thumb and its
//! halo are painted on top every frame through the renderer.

use floem::kurbo::{Circle, Rect};
use floem::peniko;

use floem::reactive::{create_effect, RwSignal, SignalGet, SignalUpdate};
use floem::views::Decorators;
use floem::{
    context::{ComputeLayoutCx, EventCx, PaintCx, UpdateCx},
    event::{Event, EventPropagation},
    View, ViewId,
};
use floem_renderer::Renderer;

use crate::bar_picker::BarPicker;
use crate::color::SwatchColor;
use crate::config::BarConfig;
use crate::error::{PickerError, Result};
use crate::surface::{
    Constraints, Extent, GestureHost, Padding, Picker, PointerEvent, PointerPhase, Viewport,
};

enum BarUpdate {
    Colors(Vec<SwatchColor>),
    Selected(SwatchColor),
    Enabled(bool),
}

/// Gesture negotiation for one pointer event.
struct ViewHost {
    defers_press: bool,
    claimed: bool,
}

impl GestureHost for ViewHost {
    fn defers_press(&self) -> bool {
        self.defers_press
    }

    fn claim_gesture(&mut self) {
        self.claimed = true;
    }
}

pub struct BarPickerView {
    id: ViewId,
    picker: BarPicker,
    padding: Padding,
    in_scroll_container: bool,
    selected: RwSignal<Option<SwatchColor>>,
    size: floem::taffy::prelude::Size<f32>,
    /// Upload of the bar raster, thumb excluded.
    bar_img: Option<peniko::Image>,
    bar_hash: Vec<u8>,
}

/// Creates a gradient bar picker.
///
/// - `colors`: one bar segment per color; an empty sequence leaves the picker
///   to generate random ones at first layout.
/// - `selected`: written on every drag step, read to move the thumb.
/// - `enabled`: a disabled bar ignores pointer input.
pub fn bar_picker(
    colors: RwSignal<Vec<SwatchColor>>,
    selected: RwSignal<Option<SwatchColor>>,
    enabled: RwSignal<bool>,
    config: BarConfig,
) -> Result<BarPickerView> {
    let id = ViewId::new();
    let padding = config.padding;
    let mut picker = BarPicker::new(config)?;
    let initial = colors.get_untracked();
    if !initial.is_empty() {
        picker.set_colors(initial)?;
    }
    if let Some(color) = selected.get_untracked() {
        picker.set_selected_color(color);
    }
    picker.set_enabled(enabled.get_untracked());

    let (_, height) = picker.measure(
        Constraints::new(Extent::Unbounded, Extent::Unbounded),
        padding,
    );

    create_effect(move |_| {
        let c = colors.get();
        id.update_state(BarUpdate::Colors(c));
    });

    create_effect(move |_| {
        if let Some(color) = selected.get() {
            id.update_state(BarUpdate::Selected(color));
        }
    });

    create_effect(move |_| {
        let e = enabled.get();
        id.update_state(BarUpdate::Enabled(e));
    });

    Ok(BarPickerView {
        id,
        picker,
        padding,
        in_scroll_container: false,
        selected,
        size: Default::default(),
        bar_img: None,
        bar_hash: Vec::new(),
    }
    .style(move |s| {
        s.width_full()
            .height(height as f64)
            .cursor(floem::style::CursorStyle::Pointer)
    }))
}

impl BarPickerView {
    /// Called with the color under the pointer on every drag step.
    pub fn on_color_drag(mut self, f: impl Fn(SwatchColor) + 'static) -> Self {
        self.picker.set_on_color_drag(f);
        self
    }

    /// Called once with the final color when the drag ends.
    pub fn on_color_pick(mut self, f: impl Fn(SwatchColor) + 'static) -> Self {
        self.picker.set_on_color_pick(f);
        self
    }

    /// Inside a scroll container a press only becomes a drag after moving
    /// horizontally past the touch slop, so vertical scrolling still works.
    pub fn in_scroll_container(mut self, in_scroll_container: bool) -> Self {
        self.in_scroll_container = in_scroll_container;
        self
    }

    pub fn bar_mask_color(mut self, color: SwatchColor) -> Self {
        self.picker.set_bar_mask_color(color);
        self
    }

    fn refresh_image(&mut self) {
        match self.picker.bar_raster() {
            Some(raster) => {
                let (img, hash) = raster.to_image();
                self.bar_img = Some(img);
                self.bar_hash = hash;
            }
            None => {
                self.bar_img = None;
                self.bar_hash.clear();
            }
        }
    }

    /// Push the picker's selection out to the signal if it moved.
    fn sync_selected(&self) {
        let current = self.picker.selected_color();
        if self.selected.get_untracked() != current {
            self.selected.set(current);
        }
    }
}

impl View for BarPickerView {
    fn id(&self) -> ViewId {
        self.id
    }

    fn update(&mut self, _cx: &mut UpdateCx, state: Box<dyn std::any::Any>) {
        if let Ok(update) = state.downcast::<BarUpdate>() {
            match *update {
                BarUpdate::Colors(c) => match self.picker.set_colors(c) {
                    Ok(()) => {
                        self.refresh_image();
                        self.sync_selected();
                    }
                    Err(PickerError::EmptyInput) => {}
                    Err(e) => log::warn!("bar picker rejected colors: {e}"),
                },
                BarUpdate::Selected(color) => self.picker.set_selected_color(color),
                BarUpdate::Enabled(e) => self.picker.set_enabled(e),
            }
            self.id.request_paint();
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

        let mut host = ViewHost {
            defers_press: self.in_scroll_container,
            claimed: false,
        };
        if !self.picker.handle_pointer(pointer, &mut host) {
            return EventPropagation::Continue;
        }
        if host.claimed {
            cx.update_active(self.id());
        }
        self.sync_selected();
        self.id.request_paint();
        EventPropagation::Stop
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
            self.sync_selected();
        }
        None
    }

    fn paint(&mut self, cx: &mut PaintCx) {
        let Some(ref img) = self.bar_img else {
            return;
        };
        let rect = Rect::new(0.0, 0.0, img.width as f64, img.height as f64);
        cx.draw_img(
            floem_renderer::Img {
                img: img.clone(),
                hash: &self.bar_hash,
            },
            rect,
        );

        let Some(thumb) = self.picker.thumb() else {
            return;
        };
        if let Some((radius, color)) = thumb.halo {
            cx.fill(&Circle::new(thumb.center, radius), color.to_peniko(), 0.0);
        }
        cx.fill(
            &Circle::new(thumb.center, thumb.radius),
            thumb.color.to_peniko(),
            0.0,
        );
    }
}
