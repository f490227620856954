//! Standalone demo: three hex grids and three gradient bars.
//!
//! Touching or dragging tints the window background with the picked color;
//! clicking a cell or releasing a bar copies the color's hex to the clipboard.

use floem::prelude::*;
use floem::window::WindowConfig;
use floem_hexpicker::{
    bar_picker, grid_picker, BarConfig, GridConfig, Padding, PickerError, SwatchColor,
};

const DKGRAY: SwatchColor = SwatchColor::from_rgb(0x44, 0x44, 0x44);
const GRAY: SwatchColor = SwatchColor::from_rgb(0x88, 0x88, 0x88);
const WHITE: SwatchColor = SwatchColor::WHITE;

fn copy_hex(color: SwatchColor) {
    let hex = format!("#{}", color.to_hex());
    match arboard::Clipboard::new().and_then(|mut cb| cb.set_text(hex.clone())) {
        Ok(()) => log::info!("copied {hex}"),
        Err(e) => log::warn!("clipboard unavailable: {e}"),
    }
}

fn demo_view() -> Result<impl IntoView, PickerError> {
    let background = RwSignal::new(SwatchColor::WHITE);
    let tint = move |c: SwatchColor| background.set(c.with_alpha_mask(0x3f));

    let grids = h_stack((
        grid_picker(
            RwSignal::new(Vec::new()),
            RwSignal::new(1),
            GridConfig::default(),
        )?
        .on_color_touch(tint)
        .on_color_click(copy_hex),
        grid_picker(
            RwSignal::new(vec![DKGRAY, WHITE, WHITE, GRAY, DKGRAY, DKGRAY, WHITE]),
            RwSignal::new(2),
            GridConfig {
                padding: Padding::uniform(8),
                ..Default::default()
            },
        )?
        .on_color_touch(tint)
        .on_color_click(copy_hex),
        grid_picker(
            RwSignal::new(Vec::new()),
            RwSignal::new(4),
            GridConfig {
                random_seed: Some(42),
                ..Default::default()
            },
        )?
        .stroke(2.0, SwatchColor::WHITE)?
        .on_color_touch(tint)
        .on_color_click(copy_hex),
    ))
    .style(|s| s.width_full().gap(12.0));

    let rainbow = vec![
        SwatchColor::from_rgb(0xff, 0x00, 0x00),
        SwatchColor::from_rgb(0xff, 0xa5, 0x00),
        SwatchColor::from_rgb(0xff, 0xff, 0x00),
        SwatchColor::from_rgb(0x00, 0x80, 0x00),
        SwatchColor::from_rgb(0x00, 0x00, 0xff),
        SwatchColor::from_rgb(0x4b, 0x00, 0x82),
        SwatchColor::from_rgb(0xee, 0x82, 0xee),
    ];

    let bars = v_stack((
        bar_picker(
            RwSignal::new(Vec::new()),
            RwSignal::new(None),
            RwSignal::new(true),
            BarConfig::default(),
        )?
        .on_color_drag(tint)
        .on_color_pick(copy_hex),
        bar_picker(
            RwSignal::new(vec![SwatchColor::BLACK, WHITE]),
            RwSignal::new(Some(WHITE)),
            RwSignal::new(true),
            BarConfig {
                padding: Padding::uniform(4),
                ..Default::default()
            },
        )?
        .bar_mask_color(GRAY)
        .on_color_drag(tint)
        .on_color_pick(copy_hex),
        bar_picker(
            RwSignal::new(rainbow),
            RwSignal::new(None),
            RwSignal::new(true),
            BarConfig {
                thumb_size: 32.0,
                bar_height: 8.0,
                padding: Padding {
                    left: 16,
                    right: 16,
                    ..Default::default()
                },
                ..Default::default()
            },
        )?
        .in_scroll_container(true)
        .on_color_drag(tint)
        .on_color_pick(copy_hex),
    ))
    .style(|s| s.width_full().gap(8.0));

    Ok(v_stack((grids, bars)).style(move |s| {
        s.size_full()
            .padding(16.0)
            .gap(16.0)
            .background(background.get().to_peniko())
    }))
}

fn main() {
    env_logger::init();

    let view = match demo_view() {
        Ok(view) => view,
        Err(e) => {
            log::error!("could not build demo: {e}");
            return;
        }
    };

    floem::Application::new()
        .window(
            move |_| {
                view.on_event_stop(floem::event::EventListener::WindowClosed, |_| {
                    floem::quit_app()
                })
            },
            Some(
                WindowConfig::default()
                    .size((640.0, 420.0))
                    .title("floem-hexpicker"),
            ),
        )
        .run();
}
