//! Sheet - a dismissible side panel presented above the page
//!
//! A sheet is a full-height panel anchored to the trailing edge of its
//! container (the right edge, or the left edge in right-to-left text). The
//! rest of the container is dimmed. Its body has a header row with the
//! heading and a close control, then optional sub-heading, content and
//! footer regions.
//!
//! Three things can ask a sheet to close: its close control, Escape while it
//! is the top-most layer, and (unless disabled) a press on the dimmed area
//! outside it. Each user gesture produces at most one call to the sheet's
//! dismiss route. The host owns removal: with a plain callback it removes
//! the sheet right away, with an [`AnimationController`] it waits for the
//! controller's `on_dismiss_end`.
//!
//! While mounted, focus is trapped inside the sheet. Tab and Shift-Tab cycle
//! through its enabled touch targets and the close control is focused on
//! mount.

mod builder;
mod size;

pub use builder::{NoHeading, SheetBuilder, WithHeading, SHEET_Z_INDEX};
pub use size::{OverlayIdentity, SheetSize};

use crate::a11y::AccessibilityNode;
use crate::animation::AnimationController;
use crate::component::{propagate_event, Component};
use crate::components::text::{Text, TextAlign};
use crate::components::touchable::Touchable;
use crate::context::{RenderContext, UseTheme};
use crate::dismiss::{DismissCoordinator, DismissIntent, DismissRoute, ExplicitControl};
use crate::event::{Event, EventHandler, EventResult, Key};
use crate::focus::{FocusManager, FocusReason};
use crate::handle::RootHandle;
use crate::layer::ZIndex;
use crate::layout::{Edge, FlexDirection, FlexLayout, Rect, Size};
use crate::render::Renderer;
use crate::style::Rounding;
use anyhow::Result;
use tracing::debug;

/// Rows taken by the header (heading and close control)
const HEADER_HEIGHT: u16 = 3;

/// Width of the close control, frame included
const DISMISS_BUTTON_WIDTH: u16 = 3;

/// Accessible, dismissible side panel
pub struct Sheet {
    identity: OverlayIdentity,
    size: SheetSize,
    heading: Option<Text>,
    sub_heading: Option<Box<dyn Component>>,
    content: Option<Box<dyn Component>>,
    footer: Option<Box<dyn Component>>,
    dismiss_button: Touchable,
    coordinator: DismissCoordinator,
    animation: Option<AnimationController>,
    focus: FocusManager,
    handle: RootHandle,
    z_index: Box<dyn ZIndex>,
    last_intent: Option<DismissIntent>,
}

impl Sheet {
    /// Start building a sheet; `on_dismiss` is a callback or an
    /// [`AnimationController`]
    pub fn builder(
        identity: OverlayIdentity,
        on_dismiss: impl Into<DismissRoute>,
    ) -> SheetBuilder<NoHeading> {
        SheetBuilder::new(identity, on_dismiss.into())
    }

    fn from_builder<H>(builder: SheetBuilder<H>) -> Self {
        let animation = match &builder.route {
            DismissRoute::Animated(controller) => Some(controller.clone()),
            DismissRoute::Direct(_) => None,
        };

        let handle = RootHandle::new(false);
        let mut coordinator = DismissCoordinator::new(builder.config, builder.route);
        coordinator.set_boundary(handle.clone());

        let control = coordinator.explicit_control();
        let close_label = Text::new("✕").with_align(TextAlign::Center);
        let dismiss_button = Touchable::new(Box::new(close_label))
            .full_width(false)
            .rounding(Rounding::Circle)
            .accessibility_label(builder.identity.dismiss_button_label.clone())
            .on_touch(move |_| control.trigger());

        let mut sheet = Sheet {
            identity: builder.identity,
            size: builder.size,
            heading: builder.heading.map(|h| Text::heading(h, 1)),
            sub_heading: builder.sub_heading,
            content: builder.content,
            footer: builder.footer,
            dismiss_button,
            coordinator,
            animation,
            focus: FocusManager::new(),
            handle,
            z_index: builder.z_index,
            last_intent: None,
        };
        sheet.register_focus_targets();
        sheet
    }

    fn register_focus_targets(&mut self) {
        for handle in self.focus_targets() {
            self.focus.register(handle);
        }
    }

    /// Close control first, then touch targets in body order
    fn focus_targets(&self) -> Vec<RootHandle> {
        std::iter::once(self.dismiss_button.handle().clone())
            .chain(self.regions().flat_map(|region| region.focus_handles()))
            .collect()
    }

    fn regions(&self) -> impl Iterator<Item = &Box<dyn Component>> {
        [&self.sub_heading, &self.content, &self.footer]
            .into_iter()
            .flatten()
    }

    fn regions_mut(&mut self) -> impl Iterator<Item = &mut Box<dyn Component>> {
        [&mut self.sub_heading, &mut self.content, &mut self.footer]
            .into_iter()
            .flatten()
    }

    /// Forwarded reference to the panel root
    pub fn handle(&self) -> &RootHandle {
        &self.handle
    }

    pub fn identity(&self) -> &OverlayIdentity {
        &self.identity
    }

    pub fn size(&self) -> SheetSize {
        self.size
    }

    pub fn z_index(&self) -> i32 {
        self.z_index.index()
    }

    pub fn coordinator(&self) -> &DismissCoordinator {
        &self.coordinator
    }

    pub fn coordinator_mut(&mut self) -> &mut DismissCoordinator {
        &mut self.coordinator
    }

    /// Handle that closes the sheet like its own close control does
    pub fn explicit_control(&self) -> ExplicitControl {
        self.coordinator.explicit_control()
    }

    pub fn animation(&self) -> Option<&AnimationController> {
        self.animation.as_ref()
    }

    /// Intent emitted by the most recent event, if any
    pub fn last_intent(&self) -> Option<DismissIntent> {
        self.last_intent
    }

    /// Deliver an event to the close control and the body regions
    fn dispatch_to_children(&mut self, event: &Event) -> EventResult {
        let result = self.dismiss_button.handle_event(event);
        if result.is_consumed() {
            return result;
        }
        propagate_event(self.regions_mut(), event)
    }

    fn deliver(&mut self, events: impl IntoIterator<Item = Event>) {
        for event in events {
            self.dispatch_to_children(&event);
        }
    }

    /// Tab cycling and pointer focus; returns true for navigation keys
    fn handle_focus_navigation(&mut self, event: &Event) -> bool {
        match event {
            Event::Key(key) if key.is_press() && key.key == Key::Tab => {
                let events = self.focus.focus_next();
                self.deliver(events);
                true
            }
            Event::Key(key) if key.is_press() && key.key == Key::BackTab => {
                let events = self.focus.focus_prev();
                self.deliver(events);
                true
            }
            Event::Mouse(mouse) if mouse.is_primary_press() => {
                let (col, row) = mouse.position();
                let target = self
                    .focus_targets()
                    .into_iter()
                    .find(|handle| handle.is_tab_stop() && handle.contains(col, row));
                if let Some(handle) = target {
                    let events = self.focus.focus(handle.id(), FocusReason::Pointer);
                    self.deliver(events);
                }
                false
            }
            _ => false,
        }
    }

    fn anchor_edge(ctx: &RenderContext) -> Edge {
        if ctx.text_direction.is_rtl() {
            Edge::Left
        } else {
            Edge::Right
        }
    }

    fn visible_fraction(&self) -> f32 {
        self.animation.as_ref().map_or(1.0, |anim| anim.progress())
    }

    fn render_header(
        &mut self,
        renderer: &mut Renderer,
        area: Rect,
        edge: Edge,
        ctx: &RenderContext,
    ) -> Result<()> {
        if area.is_empty() {
            return Ok(());
        }
        let button_width = DISMISS_BUTTON_WIDTH.min(area.width);
        let (title, button) = match edge {
            Edge::Right => {
                let (title, button) = area.split_vertical(area.width - button_width);
                (title, button)
            }
            Edge::Left => {
                let (button, title) = area.split_vertical(button_width);
                (title, button)
            }
        };

        if let Some(heading) = self.heading.as_mut() {
            let line = Rect::new(title.x, title.y + area.height / 2, title.width, 1);
            heading.render(renderer, line, ctx)?;
        }
        self.dismiss_button.render(renderer, button, ctx)
    }

    fn render_body(&mut self, renderer: &mut Renderer, area: Rect, ctx: &RenderContext) -> Result<()> {
        let mut sizes = Vec::new();
        if let Some(sub) = &self.sub_heading {
            sizes.push(Size::Fixed(sub.min_size().1.max(1)));
        }
        if self.content.is_some() {
            sizes.push(Size::Flex(1));
        }
        if let Some(footer) = &self.footer {
            sizes.push(Size::Fixed(footer.min_size().1.max(1)));
        }

        let rects = FlexLayout::new(FlexDirection::Column)
            .gap(1)
            .layout(area, &sizes);
        for (region, rect) in self.regions_mut().zip(rects) {
            region.render(renderer, rect, ctx)?;
        }
        Ok(())
    }
}

impl EventHandler for Sheet {
    fn handle_event(&mut self, event: &Event) -> EventResult {
        let mut result = if self.handle_focus_navigation(event) {
            EventResult::Consumed
        } else {
            self.dispatch_to_children(event)
        };

        let requested = self.focus.sync();
        self.deliver(requested);

        self.coordinator.observe(event);
        self.last_intent = self.coordinator.flush();
        if let Some(intent) = self.last_intent {
            debug!(trigger = %intent.trigger, label = %self.identity.accessible_label, "sheet dismissed");
            result = result.merge(EventResult::Consumed);
        }

        // Modal: keys never reach the page behind, nor do presses on the panel
        let owned = match event {
            Event::Key(_) => self.coordinator.is_topmost(),
            Event::Mouse(mouse) => {
                let (col, row) = mouse.position();
                self.handle.contains(col, row)
            }
            _ => false,
        };
        if owned {
            result = result.merge(EventResult::Consumed);
        }
        result
    }
}

impl Component for Sheet {
    fn render(&mut self, renderer: &mut Renderer, bounds: Rect, ctx: &RenderContext) -> Result<()> {
        let theme = self.use_theme(ctx);
        let char_width = renderer.context().geometry.char_width;
        let width = self.size.width_cells(char_width, bounds.width);
        let hidden = ((1.0 - self.visible_fraction()) * f32::from(width)).round() as u16;

        let edge = Self::anchor_edge(ctx);
        let panel = bounds.anchored(edge, width, hidden);
        self.handle.set_bounds(panel);

        let backdrop = match edge {
            Edge::Right => Rect::new(bounds.x, bounds.y, bounds.width - panel.width, bounds.height),
            Edge::Left => Rect::new(panel.right(), bounds.y, bounds.width - panel.width, bounds.height),
        };
        renderer.fill(backdrop, &theme.backdrop_style())?;
        if panel.is_empty() {
            return Ok(());
        }
        renderer.fill(panel, &theme.surface_style())?;

        let inner = panel.inner(1);
        let (header, body) = inner.split_horizontal(HEADER_HEIGHT);
        self.render_header(renderer, header, edge, ctx)?;
        self.render_body(renderer, body, ctx)
    }

    fn min_size(&self) -> (u16, u16) {
        (DISMISS_BUTTON_WIDTH + 2, HEADER_HEIGHT + 2)
    }

    fn on_mount(&mut self) {
        let remount = !self.coordinator.is_mounted();
        self.coordinator.mount();
        if remount {
            self.last_intent = None;
        }
        if let Some(animation) = &self.animation {
            if remount {
                animation.reset();
            }
            animation.present();
        }
        for region in self.regions_mut() {
            region.on_mount();
        }
        let id = self.dismiss_button.handle().id();
        let events = self.focus.focus(id, FocusReason::Programmatic);
        self.deliver(events);
    }

    fn on_unmount(&mut self) {
        let blur = self.focus.blur();
        self.deliver(blur);
        for region in self.regions_mut() {
            region.on_unmount();
        }
        self.coordinator.unmount();
    }

    fn accessibility(&self) -> Option<AccessibilityNode> {
        let mut node = AccessibilityNode::new(self.identity.role())
            .with_label(self.identity.accessible_label.clone());
        node.id = Some(self.handle.id());
        node.bounds = self.handle.bounds();

        let header = self
            .heading
            .iter()
            .filter_map(|heading| heading.accessibility())
            .chain(self.dismiss_button.accessibility());
        let body = self.regions().filter_map(|region| region.accessibility());
        node.children.extend(header.chain(body));
        Some(node)
    }

    fn name(&self) -> &str {
        "Sheet"
    }
}

impl std::fmt::Debug for Sheet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Sheet")
            .field("identity", &self.identity)
            .field("size", &self.size)
            .field("coordinator", &self.coordinator)
            .field("z_index", &self.z_index.index())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::a11y::{AccessibilityRole, AccessibilitySettings, TextDirection};
    use crate::animation::{AnimationPhase, AnimationTiming};
    use crate::dismiss::DismissTrigger;
    use crate::layer::{CompositeZIndex, FixedZIndex};
    use crate::terminal::TerminalCapabilities;
    use crate::theme::Theme;
    use std::cell::Cell;
    use std::rc::Rc;

    const COLS: u16 = 120;
    const ROWS: u16 = 30;

    fn identity() -> OverlayIdentity {
        OverlayIdentity::new("Edit profile details", "Close sheet")
    }

    fn counter() -> (Rc<Cell<u32>>, impl FnMut() + 'static) {
        let count = Rc::new(Cell::new(0));
        let inner = count.clone();
        (count, move || inner.set(inner.get() + 1))
    }

    fn render(sheet: &mut Sheet, direction: TextDirection) -> String {
        let theme = Theme::with_accessibility(
            TerminalCapabilities::basic(),
            AccessibilitySettings::new(),
        );
        let ctx = RenderContext::new(&theme).with_direction(direction);
        let mut renderer = Renderer::headless(COLS, ROWS);
        sheet
            .render(&mut renderer, Rect::fullscreen(COLS, ROWS), &ctx)
            .unwrap();
        renderer.output()
    }

    fn mounted(builder: SheetBuilder<impl Sized>) -> Sheet {
        let mut sheet = builder.build();
        sheet.on_mount();
        render(&mut sheet, TextDirection::LeftToRight);
        sheet
    }

    fn find_button<'a>(root: &'a AccessibilityNode, label: &str) -> Option<&'a AccessibilityNode> {
        root.walk().into_iter().find(|node| {
            node.role == AccessibilityRole::Button && node.label.as_deref() == Some(label)
        })
    }

    fn click(sheet: &mut Sheet, col: u16, row: u16) {
        sheet.handle_event(&Event::click_down(col, row));
        sheet.handle_event(&Event::click_up(col, row));
    }

    #[test]
    fn test_large_escape_dismisses_once() {
        let (removed, on_dismiss) = counter();
        let mut sheet = mounted(Sheet::builder(identity(), on_dismiss).size(SheetSize::Large));
        assert_eq!(sheet.handle().bounds(), Some(Rect::new(30, 0, 90, ROWS)));

        let result = sheet.handle_event(&Event::key(Key::Esc));
        assert!(result.is_consumed());
        assert_eq!(
            sheet.last_intent().map(|i| i.trigger),
            Some(DismissTrigger::EscapeKey)
        );
        assert_eq!(removed.get(), 1);

        sheet.handle_event(&Event::key(Key::Esc));
        assert_eq!(removed.get(), 1);
        assert_eq!(sheet.coordinator().intents_emitted(), 1);
    }

    #[test]
    fn test_outside_and_inside_clicks() {
        let (removed, on_dismiss) = counter();
        let mut sheet = mounted(Sheet::builder(identity(), on_dismiss));
        let panel = sheet.handle().bounds().unwrap();
        assert_eq!(panel, Rect::new(COLS - 54, 0, 54, ROWS));

        click(&mut sheet, panel.x + 10, 20);
        assert_eq!(removed.get(), 0);

        click(&mut sheet, 5, 5);
        assert_eq!(removed.get(), 1);
        assert_eq!(
            sheet.last_intent().map(|i| i.trigger),
            None,
            "release after the dismissing press emits nothing"
        );
    }

    #[test]
    fn test_outside_click_disabled() {
        let (removed, on_dismiss) = counter();
        let mut sheet = mounted(Sheet::builder(identity(), on_dismiss).close_on_outside_click(false));

        click(&mut sheet, 5, 5);
        assert_eq!(removed.get(), 0);

        let tree = sheet.accessibility().unwrap();
        let close = find_button(&tree, "Close sheet").unwrap().bounds.unwrap();
        click(&mut sheet, close.x + 1, close.y + 1);
        assert_eq!(removed.get(), 1);

        sheet.coordinator_mut().rearm();
        sheet.handle_event(&Event::key(Key::Esc));
        assert_eq!(removed.get(), 2);
    }

    #[test]
    fn test_remounted_sheet_dismisses_again() {
        let (removed, on_dismiss) = counter();
        let mut sheet = mounted(Sheet::builder(identity(), on_dismiss));

        sheet.handle_event(&Event::key(Key::Esc));
        assert_eq!(removed.get(), 1);
        sheet.on_unmount();

        sheet.on_mount();
        assert!(sheet.coordinator().is_topmost());
        assert!(sheet.last_intent().is_none());
        sheet.handle_event(&Event::key(Key::Esc));
        assert_eq!(removed.get(), 2);
        assert_eq!(sheet.coordinator().intents_emitted(), 2);
    }

    #[test]
    fn test_remounted_animated_sheet_presents_again() {
        let (removed, on_end) = counter();
        let anim = AnimationController::new(on_end).with_timing(AnimationTiming::EXTERNAL);
        let mut sheet = Sheet::builder(identity(), anim.clone()).build();

        sheet.on_mount();
        anim.on_animation_end();
        sheet.handle_event(&Event::key(Key::Esc));
        anim.on_animation_end();
        assert!(anim.is_removed());
        sheet.on_unmount();

        sheet.on_mount();
        assert_eq!(anim.phase(), AnimationPhase::Presenting);
        anim.on_animation_end();
        render(&mut sheet, TextDirection::LeftToRight);
        assert_eq!(sheet.handle().bounds().map(|b| b.width), Some(54));

        sheet.handle_event(&Event::key(Key::Esc));
        assert_eq!(anim.phase(), AnimationPhase::Dismissing);
        anim.on_animation_end();
        assert_eq!(removed.get(), 2);
    }

    #[test]
    fn test_close_control_click() {
        let (removed, on_dismiss) = counter();
        let mut sheet = mounted(Sheet::builder(identity(), on_dismiss).heading("Profile"));

        let tree = sheet.accessibility().unwrap();
        let button = find_button(&tree, "Close sheet").unwrap();
        let bounds = button.bounds.unwrap();

        sheet.handle_event(&Event::click_down(bounds.x + 1, bounds.y + 1));
        assert_eq!(removed.get(), 0);
        sheet.handle_event(&Event::click_up(bounds.x + 1, bounds.y + 1));
        assert_eq!(removed.get(), 1);
        assert_eq!(
            sheet.last_intent().map(|i| i.trigger),
            Some(DismissTrigger::ExplicitControl)
        );
    }

    #[test]
    fn test_close_control_focused_on_mount() {
        let (removed, on_dismiss) = counter();
        let mut sheet = mounted(Sheet::builder(identity(), on_dismiss));

        let result = sheet.handle_event(&Event::key(Key::Enter));
        assert!(result.is_default_prevented());
        assert_eq!(removed.get(), 1);
    }

    #[test]
    fn test_focus_trap_skips_disabled() {
        let (_, on_dismiss) = counter();
        let save = Touchable::new(Box::new(Text::new("Save")));
        let save_handle = save.handle().clone();
        let archived = Touchable::new(Box::new(Text::new("Archive"))).disabled(true);
        let archived_handle = archived.handle().clone();

        let mut sheet = mounted(
            Sheet::builder(identity(), on_dismiss)
                .content(Box::new(save))
                .footer(Box::new(archived)),
        );

        sheet.handle_event(&Event::key(Key::Tab));
        assert!(save_handle.is_focused());
        sheet.handle_event(&Event::key(Key::Tab));
        assert!(!save_handle.is_focused());
        assert!(!archived_handle.is_focused());
        sheet.handle_event(&Event::key(Key::BackTab));
        assert!(save_handle.is_focused());
    }

    #[test]
    fn test_focus_request_through_handle() {
        let (_, on_dismiss) = counter();
        let save = Touchable::new(Box::new(Text::new("Save")));
        let save_handle = save.handle().clone();
        let mut sheet = mounted(Sheet::builder(identity(), on_dismiss).content(Box::new(save)));

        assert!(save_handle.request_focus());
        sheet.handle_event(&Event::Resize(COLS, ROWS));
        assert!(save_handle.is_focused());
    }

    #[test]
    fn test_animated_dismissal() {
        let (removed, on_end) = counter();
        let anim = AnimationController::new(on_end).with_timing(AnimationTiming::EXTERNAL);
        let mut sheet = Sheet::builder(identity(), anim.clone()).build();

        sheet.on_mount();
        assert_eq!(anim.phase(), AnimationPhase::Presenting);
        anim.on_animation_end();
        assert_eq!(anim.phase(), AnimationPhase::Presented);
        render(&mut sheet, TextDirection::LeftToRight);

        sheet.handle_event(&Event::key(Key::Esc));
        click(&mut sheet, 0, 0);
        sheet.explicit_control().trigger();
        sheet.handle_event(&Event::key(Key::Null));

        assert_eq!(anim.phase(), AnimationPhase::Dismissing);
        assert_eq!(removed.get(), 0);
        anim.on_animation_end();
        assert_eq!(removed.get(), 1);
        assert!(anim.is_removed());
    }

    #[test]
    fn test_timed_entrance_slides_in() {
        let (_, on_end) = counter();
        let anim = AnimationController::new(on_end).with_timing(AnimationTiming::new(
            std::time::Duration::from_millis(100),
            std::time::Duration::from_millis(100),
        ));
        let mut sheet = Sheet::builder(identity(), anim.clone()).build();
        sheet.on_mount();

        anim.tick(std::time::Duration::from_millis(50));
        render(&mut sheet, TextDirection::LeftToRight);
        assert_eq!(sheet.handle().bounds().map(|b| b.width), Some(27));

        anim.tick(std::time::Duration::from_millis(50));
        render(&mut sheet, TextDirection::LeftToRight);
        assert_eq!(sheet.handle().bounds().map(|b| b.width), Some(54));
    }

    #[test]
    fn test_rtl_anchors_left() {
        let (_, on_dismiss) = counter();
        let mut sheet = Sheet::builder(identity(), on_dismiss).build();
        render(&mut sheet, TextDirection::RightToLeft);
        assert_eq!(sheet.handle().bounds(), Some(Rect::new(0, 0, 54, ROWS)));
    }

    #[test]
    fn test_stacked_sheets_only_top_takes_escape() {
        let (lower_removed, lower_cb) = counter();
        let (upper_removed, upper_cb) = counter();
        let mut lower = mounted(Sheet::builder(identity(), lower_cb));
        let mut upper = mounted(
            Sheet::builder(identity(), upper_cb)
                .z_index(CompositeZIndex::new(vec![Box::new(FixedZIndex(SHEET_Z_INDEX))])),
        );
        assert!(upper.z_index() > lower.z_index());

        lower.handle_event(&Event::key(Key::Esc));
        upper.handle_event(&Event::key(Key::Esc));
        assert_eq!(lower_removed.get(), 0);
        assert_eq!(upper_removed.get(), 1);

        upper.on_unmount();
        lower.handle_event(&Event::key(Key::Esc));
        assert_eq!(lower_removed.get(), 1);
    }

    #[test]
    fn test_empty_sheet_accessibility() {
        let (_, on_dismiss) = counter();
        let mut sheet = Sheet::builder(identity(), on_dismiss).build();
        let out = render(&mut sheet, TextDirection::LeftToRight);
        assert!(out.contains("✕"));

        let tree = sheet.accessibility().unwrap();
        assert_eq!(tree.role, AccessibilityRole::Dialog);
        assert_eq!(tree.label.as_deref(), Some("Edit profile details"));
        assert_eq!(tree.id, Some(sheet.handle().id()));
        assert_eq!(tree.children.len(), 1);
        assert!(tree.children[0].is_tab_stop());
    }

    #[test]
    fn test_full_layout_renders_regions() {
        let (_, on_dismiss) = counter();
        let mut sheet = Sheet::builder(identity(), on_dismiss)
            .heading("Profile")
            .sub_heading(Box::new(Text::new("Public information")))
            .content(Box::new(Text::new("Name: Ada")))
            .footer(Box::new(Text::new("Saved")))
            .build();
        let out = render(&mut sheet, TextDirection::LeftToRight);

        for text in ["Profile", "Public information", "Name: Ada", "Saved"] {
            assert!(out.contains(text), "missing {text}");
        }
        let labels: Vec<_> = sheet
            .accessibility()
            .unwrap()
            .walk()
            .into_iter()
            .filter_map(|node| node.label.clone())
            .collect();
        assert!(labels.contains(&"Profile".to_string()));
        assert!(labels.contains(&"Close sheet".to_string()));
    }
}
