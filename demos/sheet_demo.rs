//! sheetkit demo - open and dismiss an animated sheet
//!
//! Press Enter (or click) on the button to open the sheet. Close it with
//! Escape, a click outside, or its close control. Press `q` to quit.
//!
//! Logs go to stderr; run with `RUST_LOG=sheetkit=debug 2>sheet.log` to see
//! dismissal and animation traces.

use anyhow::Result;
use sheetkit::{
    component::Component,
    components::sheet::{OverlayIdentity, Sheet, SheetSize},
    components::{Text, Touchable},
    context::RenderContext,
    event::{Event, EventHandler, EventPoller, FrameTimer, Key},
    focus::FocusManager,
    layer::{FixedZIndex, Layer},
    layout::Rect,
    AccessibilitySettings, AnimationController, DismissConfig, Renderer, TextDirection, Theme,
};
use std::cell::Cell;
use std::rc::Rc;
use tracing_subscriber::EnvFilter;

fn open_sheet(settings: &AccessibilitySettings, removed: Rc<Cell<bool>>) -> (Layer, AnimationController) {
    let animation = AnimationController::from_settings(settings, move || removed.set(true));
    let body = Text::new("Sheets slide in from the trailing edge.");
    let footer = Touchable::new(Box::new(Text::new("Done")))
        .accessibility_label("Done editing");

    let sheet = Sheet::builder(
        OverlayIdentity::new("Profile editor sheet", "Close profile editor"),
        animation.clone(),
    )
    .heading("Profile")
    .sub_heading(Box::new(Text::new("Changes are saved automatically")))
    .content(Box::new(body))
    .footer(Box::new(footer))
    .size(SheetSize::Medium)
    .config(DismissConfig::from_env())
    .build();

    let layer = Layer::new(FixedZIndex(sheet.z_index()), Box::new(sheet));
    (layer, animation)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let mut renderer = Renderer::new()?;
    let caps = renderer.context().capabilities;
    let settings = AccessibilitySettings::from_env();
    let theme = Theme::with_accessibility(caps, settings.clone());
    renderer.enter_alt_screen()?;
    renderer.hide_cursor()?;
    renderer.clear()?;

    let events = EventPoller::new()?;
    let mut timer = FrameTimer::new(60);

    let open_requested = Rc::new(Cell::new(false));
    let opener = open_requested.clone();
    let mut open_button = Touchable::new(Box::new(Text::new("Open sheet")))
        .full_width(false)
        .accessibility_label("Open profile editor")
        .accessibility_haspopup(true)
        .on_touch(move |_| opener.set(true));

    let mut page_focus = FocusManager::new();
    page_focus.register(open_button.handle().clone());
    for event in page_focus.focus_next() {
        open_button.handle_event(&event);
    }

    let removed = Rc::new(Cell::new(false));
    let mut sheet: Option<(Layer, AnimationController)> = None;
    let ctx = RenderContext::new(&theme).with_direction(TextDirection::from_env());

    loop {
        let dt = timer.tick();
        if let Some((_, animation)) = &sheet {
            animation.tick(dt);
        }
        if removed.replace(false) {
            if let Some((mut closed, _)) = sheet.take() {
                closed.on_unmount();
            }
            renderer.clear()?;
        }
        if open_requested.replace(false) && sheet.is_none() {
            let (mut opened, animation) = open_sheet(&settings, removed.clone());
            opened.on_mount();
            sheet = Some((opened, animation));
        }

        let (cols, rows) = renderer.context().char_dimensions();
        let bounds = Rect::fullscreen(cols, rows);
        renderer.begin_frame()?;
        open_button.render(&mut renderer, Rect::new(2, 1, 20, 3), &ctx)?;
        if let Some((opened, _)) = sheet.as_mut() {
            opened.render(&mut renderer, bounds, &ctx)?;
        }
        renderer.end_frame()?;

        if let Some(event) = events.poll(timer.time_to_next_frame())? {
            match (&event, sheet.as_mut()) {
                (Event::Key(key), None) if key.key == Key::Char('q') => break,
                (Event::Key(key), _) if key.key == Key::Ctrl('c') => break,
                (Event::Resize(..), _) => {
                    renderer.refresh_geometry()?;
                    renderer.clear()?;
                }
                (_, Some((opened, _))) => {
                    opened.handle_event(&event);
                }
                (_, None) => {
                    open_button.handle_event(&event);
                }
            }
        }
    }

    renderer.exit_alt_screen()?;
    renderer.show_cursor()?;

    println!("sheetkit demo finished");

    Ok(())
}
