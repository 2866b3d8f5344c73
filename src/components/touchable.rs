//! Touchable - a single accessible, clickable region around arbitrary content
//!
//! A touchable turns the heterogeneous input reaching it into one semantic
//! action, `on_touch`:
//!
//! - a primary click (press and release both inside the surface), or
//! - Enter / Space pressed while the surface holds focus. Keyboard
//!   activation returns [`EventResult::DefaultPrevented`] so the host skips
//!   the key's default action (e.g. scrolling on Space).
//!
//! Every callback passes through one disabled gate. A disabled touchable
//! fires nothing and is removed from the tab sequence; its [`RootHandle`]
//! refuses focus requests.

use crate::a11y::{AccessibilityNode, AccessibilityRole};
use crate::component::Component;
use crate::context::{RenderContext, UseTheme};
use crate::event::{Event, EventHandler, EventResult, KeyEvent, MouseButton, MouseEvent};
use crate::focus::FocusReason;
use crate::handle::{RootHandle, SurfaceId};
use crate::layout::Rect;
use crate::render::Renderer;
use crate::style::{resolve_cursor, resolve_rounding, MouseCursor, Rounding, StyleDescriptor};
use anyhow::Result;
use tracing::trace;

/// Input that activated a touchable
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivationEvent {
    Pointer(MouseEvent),
    Keyboard(KeyEvent),
}

/// Focus change delivered to `on_focus` / `on_blur`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FocusEvent {
    pub target: SurfaceId,
    /// Why focus arrived; `None` for blur
    pub reason: Option<FocusReason>,
}

pub type OnTouch = Box<dyn FnMut(&ActivationEvent)>;
pub type OnFocusChange = Box<dyn FnMut(&FocusEvent)>;
pub type OnHover = Box<dyn FnMut(&MouseEvent)>;

/// Clickable, focusable wrapper with button semantics
pub struct Touchable {
    child: Box<dyn Component>,
    handle: RootHandle,
    disabled: bool,
    full_width: bool,
    full_height: bool,
    mouse_cursor: MouseCursor,
    rounding: Rounding,
    label: Option<String>,
    controls: Option<String>,
    expanded: Option<bool>,
    has_popup: Option<bool>,
    on_touch: Option<OnTouch>,
    on_focus: Option<OnFocusChange>,
    on_blur: Option<OnFocusChange>,
    on_mouse_enter: Option<OnHover>,
    on_mouse_leave: Option<OnHover>,
    pressed: bool,
}

impl Touchable {
    pub fn new(child: Box<dyn Component>) -> Self {
        Touchable {
            child,
            handle: RootHandle::new(true),
            disabled: false,
            full_width: true,
            full_height: false,
            mouse_cursor: MouseCursor::default(),
            rounding: Rounding::default(),
            label: None,
            controls: None,
            expanded: None,
            has_popup: None,
            on_touch: None,
            on_focus: None,
            on_blur: None,
            on_mouse_enter: None,
            on_mouse_leave: None,
            pressed: false,
        }
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.set_disabled(disabled);
        self
    }

    pub fn full_width(mut self, full_width: bool) -> Self {
        self.full_width = full_width;
        self
    }

    pub fn full_height(mut self, full_height: bool) -> Self {
        self.full_height = full_height;
        self
    }

    pub fn mouse_cursor(mut self, cursor: MouseCursor) -> Self {
        self.mouse_cursor = cursor;
        self
    }

    pub fn rounding(mut self, rounding: Rounding) -> Self {
        self.rounding = rounding;
        self
    }

    pub fn accessibility_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Id of the element this surface controls
    pub fn accessibility_controls(mut self, controls: impl Into<String>) -> Self {
        self.controls = Some(controls.into());
        self
    }

    pub fn accessibility_expanded(mut self, expanded: bool) -> Self {
        self.expanded = Some(expanded);
        self
    }

    pub fn accessibility_haspopup(mut self, has_popup: bool) -> Self {
        self.has_popup = Some(has_popup);
        self
    }

    pub fn on_touch<F>(mut self, callback: F) -> Self
    where
        F: FnMut(&ActivationEvent) + 'static,
    {
        self.on_touch = Some(Box::new(callback));
        self
    }

    pub fn on_focus<F>(mut self, callback: F) -> Self
    where
        F: FnMut(&FocusEvent) + 'static,
    {
        self.on_focus = Some(Box::new(callback));
        self
    }

    pub fn on_blur<F>(mut self, callback: F) -> Self
    where
        F: FnMut(&FocusEvent) + 'static,
    {
        self.on_blur = Some(Box::new(callback));
        self
    }

    pub fn on_mouse_enter<F>(mut self, callback: F) -> Self
    where
        F: FnMut(&MouseEvent) + 'static,
    {
        self.on_mouse_enter = Some(Box::new(callback));
        self
    }

    pub fn on_mouse_leave<F>(mut self, callback: F) -> Self
    where
        F: FnMut(&MouseEvent) + 'static,
    {
        self.on_mouse_leave = Some(Box::new(callback));
        self
    }

    /// Enable or disable; disabling also leaves the tab sequence and drops
    /// focus
    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
        self.handle.set_tab_stop(!disabled);
        if disabled {
            self.pressed = false;
        }
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    /// Forwarded reference to the root of this surface
    pub fn handle(&self) -> &RootHandle {
        &self.handle
    }

    pub fn style(&self) -> StyleDescriptor {
        resolve_rounding(Some(self.rounding))
    }

    /// The single gate every callback passes through
    fn gate(&self, what: &'static str) -> bool {
        if self.disabled {
            trace!(surface = %self.handle.id(), what, "suppressed, disabled");
        }
        !self.disabled
    }

    fn activate(&mut self, event: ActivationEvent) {
        if let Some(on_touch) = self.on_touch.as_mut() {
            on_touch(&event);
        }
    }

    fn handle_key(&mut self, key: &KeyEvent) -> EventResult {
        if !key.key.is_activation() || !key.is_press() || !self.handle.is_focused() {
            return EventResult::Ignored;
        }
        if !self.gate("keyboard activation") {
            return EventResult::Ignored;
        }
        self.activate(ActivationEvent::Keyboard(*key));
        EventResult::DefaultPrevented
    }

    fn handle_mouse(&mut self, mouse: &MouseEvent) -> EventResult {
        let (col, row) = mouse.position();
        let inside = self.handle.contains(col, row);

        match *mouse {
            MouseEvent::Press(MouseButton::Left, ..) => {
                self.pressed = inside && !self.disabled;
                if self.pressed {
                    EventResult::Consumed
                } else {
                    EventResult::Ignored
                }
            }
            MouseEvent::Release(MouseButton::Left, ..) => {
                let was_pressed = std::mem::take(&mut self.pressed);
                if !(inside && was_pressed) || !self.gate("click") {
                    return EventResult::Ignored;
                }
                self.activate(ActivationEvent::Pointer(*mouse));
                EventResult::Consumed
            }
            MouseEvent::Moved(..) | MouseEvent::Drag(..) => {
                if inside != self.handle.is_hovered() {
                    self.handle.set_hovered(inside);
                    if self.gate("hover") {
                        let callback = if inside {
                            self.on_mouse_enter.as_mut()
                        } else {
                            self.on_mouse_leave.as_mut()
                        };
                        if let Some(callback) = callback {
                            callback(mouse);
                        }
                    }
                }
                EventResult::Ignored
            }
            _ => EventResult::Ignored,
        }
    }

    fn handle_focus_change(&mut self, reason: Option<FocusReason>) -> EventResult {
        if !self.gate("focus change") {
            return EventResult::Ignored;
        }
        let event = FocusEvent {
            target: self.handle.id(),
            reason,
        };
        let callback = if reason.is_some() {
            self.on_focus.as_mut()
        } else {
            self.on_blur.as_mut()
        };
        if let Some(callback) = callback {
            callback(&event);
        }
        EventResult::Consumed
    }

    /// Area actually occupied inside `bounds`, and whether a frame fits
    fn layout(&self, bounds: Rect, framed: bool) -> Rect {
        let (child_w, child_h) = self.child.min_size();
        let frame = if framed { 2 } else { 0 };
        let width = if self.full_width {
            bounds.width
        } else {
            child_w.saturating_add(frame).min(bounds.width)
        };
        let height = if self.full_height {
            bounds.height
        } else {
            child_h.max(1).saturating_add(frame).min(bounds.height)
        };
        Rect::new(bounds.x, bounds.y, width, height)
    }
}

impl EventHandler for Touchable {
    fn handle_event(&mut self, event: &Event) -> EventResult {
        match event {
            Event::Key(key) => self.handle_key(key),
            Event::Mouse(mouse) => self.handle_mouse(mouse),
            Event::Focus { target, reason } if *target == self.handle.id() => {
                self.handle_focus_change(Some(*reason))
            }
            Event::Blur { target } if *target == self.handle.id() => {
                self.handle_focus_change(None)
            }
            _ => EventResult::Ignored,
        }
    }
}

impl Component for Touchable {
    fn render(&mut self, renderer: &mut Renderer, bounds: Rect, ctx: &RenderContext) -> Result<()> {
        let descriptor = self.style();
        let (_, child_h) = self.child.min_size();
        let framed = descriptor.corners.is_some()
            && bounds.width >= 3
            && bounds.height >= child_h.max(1) + 2;

        let area = self.layout(bounds, framed);
        self.handle.set_bounds(area);
        if area.is_empty() {
            return Ok(());
        }

        let content = match descriptor.corners.filter(|_| framed) {
            Some(corners) => {
                let theme = self.use_theme(ctx);
                let style = if self.disabled {
                    theme.disabled_style()
                } else {
                    theme.border_style(self.handle.is_focused())
                };
                renderer.draw_box(area, &corners, &style)?;
                area.inner(1)
            }
            None => area,
        };
        self.child.render(renderer, content, ctx)?;

        if self.handle.is_hovered() && !self.disabled {
            renderer.set_pointer_shape(resolve_cursor(self.mouse_cursor))?;
        }
        Ok(())
    }

    fn min_size(&self) -> (u16, u16) {
        let (w, h) = self.child.min_size();
        (w, h.max(1))
    }

    fn accessibility(&self) -> Option<AccessibilityNode> {
        let mut node = AccessibilityNode::new(AccessibilityRole::Button);
        node.id = Some(self.handle.id());
        node.label = self.label.clone();
        node.disabled = self.disabled;
        node.tab_index = if self.disabled { None } else { Some(0) };
        node.expanded = self.expanded;
        node.controls = self.controls.clone();
        node.has_popup = self.has_popup;
        node.bounds = self.handle.bounds();
        node.children.extend(self.child.accessibility());
        Some(node)
    }

    fn focus_handles(&self) -> Vec<RootHandle> {
        vec![self.handle.clone()]
    }

    fn name(&self) -> &str {
        "Touchable"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::text::Text;
    use crate::event::Key;
    use crate::focus::FocusManager;
    use crate::terminal::TerminalCapabilities;
    use crate::theme::Theme;
    use proptest::prelude::*;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    fn rendered(touchable: &mut Touchable, bounds: Rect) {
        let theme = Theme::new(TerminalCapabilities::basic());
        let ctx = RenderContext::new(&theme);
        let mut renderer = Renderer::headless(40, 10);
        touchable.render(&mut renderer, bounds, &ctx).unwrap();
    }

    fn counting_button() -> (Touchable, Rc<Cell<u32>>) {
        let count = Rc::new(Cell::new(0));
        let inner = count.clone();
        let touchable = Touchable::new(Box::new(Text::new("OK")))
            .on_touch(move |_| inner.set(inner.get() + 1));
        (touchable, count)
    }

    fn focus(touchable: &mut Touchable) {
        let mut scope = FocusManager::new();
        scope.register(touchable.handle().clone());
        for event in scope.focus_next() {
            touchable.handle_event(&event);
        }
    }

    #[test]
    fn test_click_inside_activates_once() {
        let (mut button, count) = counting_button();
        rendered(&mut button, Rect::new(0, 0, 10, 3));
        assert_eq!(button.handle().bounds(), Some(Rect::new(0, 0, 10, 3)));

        assert_eq!(button.handle_event(&Event::click_down(2, 1)), EventResult::Consumed);
        assert_eq!(button.handle_event(&Event::click_up(2, 1)), EventResult::Consumed);
        assert_eq!(count.get(), 1);

        // Release without a press on this surface is not a click
        assert_eq!(button.handle_event(&Event::click_up(2, 1)), EventResult::Ignored);
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn test_click_dragged_off_does_not_activate() {
        let (mut button, count) = counting_button();
        rendered(&mut button, Rect::new(0, 0, 10, 3));

        button.handle_event(&Event::click_down(2, 1));
        button.handle_event(&Event::click_up(20, 1));
        assert_eq!(count.get(), 0);
    }

    #[test]
    fn test_activation_keys_while_focused() {
        let (mut button, count) = counting_button();

        // Not focused yet
        assert_eq!(button.handle_event(&Event::key(Key::Enter)), EventResult::Ignored);

        focus(&mut button);
        assert!(button.handle().is_focused());
        assert_eq!(
            button.handle_event(&Event::key(Key::Enter)),
            EventResult::DefaultPrevented
        );
        assert_eq!(
            button.handle_event(&Event::key(Key::SPACE)),
            EventResult::DefaultPrevented
        );
        assert_eq!(count.get(), 2);

        for other in [Key::Char('a'), Key::Esc, Key::Tab] {
            assert_eq!(button.handle_event(&Event::key(other)), EventResult::Ignored);
        }
        button.handle_event(&Event::Key(KeyEvent::repeat(Key::Enter)));
        button.handle_event(&Event::Key(KeyEvent::release(Key::Enter)));
        assert_eq!(count.get(), 2);
    }

    #[test]
    fn test_missing_callback_is_noop() {
        let mut button = Touchable::new(Box::new(Text::new("OK")));
        focus(&mut button);
        assert_eq!(
            button.handle_event(&Event::key(Key::Enter)),
            EventResult::DefaultPrevented
        );
    }

    #[test]
    fn test_focus_and_hover_callbacks() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let (l1, l2, l3, l4) = (log.clone(), log.clone(), log.clone(), log.clone());
        let mut button = Touchable::new(Box::new(Text::new("OK")))
            .on_focus(move |e| l1.borrow_mut().push(format!("focus {:?}", e.reason)))
            .on_blur(move |_| l2.borrow_mut().push("blur".to_string()))
            .on_mouse_enter(move |_| l3.borrow_mut().push("enter".to_string()))
            .on_mouse_leave(move |_| l4.borrow_mut().push("leave".to_string()));
        rendered(&mut button, Rect::new(0, 0, 10, 3));

        let mut scope = FocusManager::new();
        scope.register(button.handle().clone());
        for event in scope.focus_next() {
            button.handle_event(&event);
        }
        for event in scope.blur() {
            button.handle_event(&event);
        }
        button.handle_event(&Event::Mouse(MouseEvent::Moved(1, 1)));
        button.handle_event(&Event::Mouse(MouseEvent::Moved(2, 1)));
        button.handle_event(&Event::Mouse(MouseEvent::Moved(30, 1)));

        assert_eq!(
            *log.borrow(),
            vec!["focus Some(Keyboard)", "blur", "enter", "leave"]
        );
    }

    #[test]
    fn test_disabled_leaves_tab_sequence() {
        let (mut button, _) = counting_button();
        focus(&mut button);
        assert!(button.handle().is_focused());

        button.set_disabled(true);
        assert!(!button.handle().is_focused());
        assert!(!button.handle().is_tab_stop());
        assert!(!button.handle().request_focus());

        let node = button.accessibility().unwrap();
        assert!(node.disabled);
        assert_eq!(node.tab_index, None);
        assert!(!node.is_tab_stop());

        button.set_disabled(false);
        assert_eq!(button.accessibility().unwrap().tab_index, Some(0));
    }

    #[test]
    fn test_accessibility_attributes() {
        let button = Touchable::new(Box::new(Text::new("Menu")))
            .accessibility_label("Open menu")
            .accessibility_controls("menu-1")
            .accessibility_expanded(false)
            .accessibility_haspopup(true);

        let node = button.accessibility().unwrap();
        assert_eq!(node.role, AccessibilityRole::Button);
        assert_eq!(node.id, Some(button.handle().id()));
        assert_eq!(node.label.as_deref(), Some("Open menu"));
        assert_eq!(node.controls.as_deref(), Some("menu-1"));
        assert_eq!(node.expanded, Some(false));
        assert_eq!(node.has_popup, Some(true));
        assert_eq!(node.children.len(), 1);
    }

    #[test]
    fn test_sizing_and_rounding() {
        let mut button = Touchable::new(Box::new(Text::new("OK")))
            .full_width(false)
            .rounding(Rounding::Pill);
        let theme = Theme::new(TerminalCapabilities::basic());
        let ctx = RenderContext::new(&theme);
        let mut renderer = Renderer::headless(40, 10);
        button
            .render(&mut renderer, Rect::new(0, 0, 20, 5), &ctx)
            .unwrap();

        assert_eq!(button.handle().bounds(), Some(Rect::new(0, 0, 4, 3)));
        assert!(renderer.output().contains("OK"));

        // No frame fits on one row
        let mut flat = Touchable::new(Box::new(Text::new("OK"))).full_height(true);
        flat.render(&mut renderer, Rect::new(0, 5, 20, 1), &ctx).unwrap();
        assert_eq!(flat.handle().bounds(), Some(Rect::new(0, 5, 20, 1)));
    }

    fn event_for(kind: u8, col: u16, row: u16, id: SurfaceId) -> Event {
        match kind {
            0 => Event::key(Key::Enter),
            1 => Event::key(Key::SPACE),
            2 => Event::click_down(col, row),
            3 => Event::click_up(col, row),
            4 => Event::Mouse(MouseEvent::Moved(col, row)),
            5 => Event::Focus {
                target: id,
                reason: FocusReason::Programmatic,
            },
            _ => Event::Blur { target: id },
        }
    }

    proptest! {
        #[test]
        fn prop_disabled_fires_nothing(
            events in prop::collection::vec((0u8..7, 0u16..20, 0u16..6), 0..40)
        ) {
            let fired = Rc::new(Cell::new(0u32));
            let (f1, f2, f3, f4, f5) =
                (fired.clone(), fired.clone(), fired.clone(), fired.clone(), fired.clone());
            let mut button = Touchable::new(Box::new(Text::new("OK")))
                .disabled(true)
                .on_touch(move |_| f1.set(f1.get() + 1))
                .on_focus(move |_| f2.set(f2.get() + 1))
                .on_blur(move |_| f3.set(f3.get() + 1))
                .on_mouse_enter(move |_| f4.set(f4.get() + 1))
                .on_mouse_leave(move |_| f5.set(f5.get() + 1));
            rendered(&mut button, Rect::new(0, 0, 10, 3));
            let id = button.handle().id();

            for (kind, col, row) in events {
                button.handle_event(&event_for(kind, col, row, id));
            }

            prop_assert_eq!(fired.get(), 0);
            prop_assert!(!button.handle().is_tab_stop());
            prop_assert!(!button.handle().is_focused());
        }
    }
}
