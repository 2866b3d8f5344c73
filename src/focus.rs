//! Focus management for interactive surfaces
//!
//! A [`FocusManager`] is a focus scope: it knows the surfaces inside it, in
//! tab order, and moves focus between the ones that are currently tab stops.
//! A sheet uses one as its focus trap; Tab and Shift-Tab wrap around inside
//! the scope instead of escaping to the page behind.
//!
//! Focus changes are returned as targeted [`Event::Blur`] / [`Event::Focus`]
//! events so the owner can deliver them through the normal event path.
//!
//! # Example
//!
//! ```ignore
//! let mut focus = FocusManager::new();
//! focus.register(close_button.handle().clone());
//! focus.register(done_button.handle().clone());
//!
//! for event in focus.focus_next() {
//!     sheet_body.handle_event(&event);
//! }
//! ```

use crate::event::Event;
use crate::handle::{RootHandle, SurfaceId};
use tracing::trace;

/// Why a surface received focus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FocusReason {
    /// Tab / Shift-Tab navigation
    Keyboard,
    /// Pointer press on the surface
    Pointer,
    /// Focus requested through a root handle or on mount
    Programmatic,
}

/// Focus ring navigation direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusDirection {
    /// Move to next focusable surface (Tab)
    Next,
    /// Move to previous focusable surface (Shift+Tab)
    Previous,
}

/// A surface registered in a focus scope
#[derive(Debug, Clone)]
pub struct FocusableInfo {
    pub handle: RootHandle,
    /// Tab order index (lower = earlier in tab order)
    pub tab_index: i32,
}

impl FocusableInfo {
    pub fn new(handle: RootHandle) -> Self {
        Self {
            handle,
            tab_index: 0,
        }
    }

    pub fn with_tab_index(mut self, index: i32) -> Self {
        self.tab_index = index;
        self
    }

    pub fn id(&self) -> SurfaceId {
        self.handle.id()
    }

    /// Disabled surfaces are registered but never receive focus
    pub fn focusable(&self) -> bool {
        self.handle.is_tab_stop()
    }
}

/// Focus scope over a set of surfaces
#[derive(Debug, Clone)]
pub struct FocusManager {
    focused: Option<SurfaceId>,
    order: Vec<FocusableInfo>,
    wrap_around: bool,
}

impl Default for FocusManager {
    fn default() -> Self {
        Self::new()
    }
}

impl FocusManager {
    pub fn new() -> Self {
        Self {
            focused: None,
            order: Vec::new(),
            wrap_around: true,
        }
    }

    /// Register a surface at the default tab index
    pub fn register(&mut self, handle: RootHandle) {
        self.register_with_info(FocusableInfo::new(handle));
    }

    /// Register or update a surface; order is stable for equal tab indices
    pub fn register_with_info(&mut self, info: FocusableInfo) {
        match self.order.iter_mut().find(|i| i.id() == info.id()) {
            Some(existing) => *existing = info,
            None => self.order.push(info),
        }
        self.order.sort_by_key(|info| info.tab_index);
    }

    /// Remove a surface; clears focus if it was focused
    pub fn unregister(&mut self, id: SurfaceId) -> Option<Event> {
        let blur = if self.focused == Some(id) {
            self.blur()
        } else {
            None
        };
        self.order.retain(|info| info.id() != id);
        blur
    }

    pub fn is_registered(&self, id: SurfaceId) -> bool {
        self.order.iter().any(|info| info.id() == id)
    }

    fn handle(&self, id: SurfaceId) -> Option<&RootHandle> {
        self.order
            .iter()
            .find(|info| info.id() == id)
            .map(|info| &info.handle)
    }

    /// Focus a specific surface
    ///
    /// Returns the blur/focus events describing the change; empty when the
    /// surface is unknown, not a tab stop, or already focused.
    pub fn focus(&mut self, id: SurfaceId, reason: FocusReason) -> Vec<Event> {
        let Some(handle) = self.handle(id).cloned() else {
            return Vec::new();
        };
        if !handle.is_tab_stop() {
            trace!(surface = %id, "focus refused: not a tab stop");
            return Vec::new();
        }
        if self.focused == Some(id) {
            return Vec::new();
        }

        let mut events: Vec<Event> = self.blur().into_iter().collect();
        handle.set_focused(true);
        self.focused = Some(id);
        events.push(Event::Focus { target: id, reason });
        events
    }

    /// Clear focus (no surface focused)
    pub fn blur(&mut self) -> Option<Event> {
        let id = self.focused.take()?;
        if let Some(handle) = self.handle(id) {
            handle.set_focused(false);
        }
        Some(Event::Blur { target: id })
    }

    pub fn focus_next(&mut self) -> Vec<Event> {
        self.move_focus(FocusDirection::Next)
    }

    pub fn focus_prev(&mut self) -> Vec<Event> {
        self.move_focus(FocusDirection::Previous)
    }

    /// Move focus in a direction, skipping surfaces outside the tab sequence
    pub fn move_focus(&mut self, direction: FocusDirection) -> Vec<Event> {
        let stops: Vec<SurfaceId> = self.focus_order().collect();
        if stops.is_empty() {
            return Vec::new();
        }

        let current = self
            .focused
            .and_then(|id| stops.iter().position(|stop| *stop == id));
        let len = stops.len();
        let forward = direction == FocusDirection::Next;

        let next = match current {
            None if forward => Some(0),
            None => Some(len - 1),
            Some(idx) if forward && idx + 1 < len => Some(idx + 1),
            Some(idx) if !forward && idx > 0 => Some(idx - 1),
            Some(_) if self.wrap_around && forward => Some(0),
            Some(_) if self.wrap_around => Some(len - 1),
            Some(_) => None,
        };

        match next {
            Some(idx) => self.focus(stops[idx], FocusReason::Keyboard),
            None => Vec::new(),
        }
    }

    /// Reconcile with handle state
    ///
    /// Drops focus from a surface that left the tab sequence and honours the
    /// first pending [`RootHandle::request_focus`] call.
    pub fn sync(&mut self) -> Vec<Event> {
        let mut events = Vec::new();

        if let Some(id) = self.focused {
            let still_stop = self.handle(id).is_some_and(|h| h.is_tab_stop());
            if !still_stop {
                events.extend(self.blur());
            }
        }

        let requested = self
            .order
            .iter()
            .filter(|info| info.handle.take_focus_request())
            .map(|info| info.id())
            .collect::<Vec<_>>();
        if let Some(id) = requested.first() {
            events.extend(self.focus(*id, FocusReason::Programmatic));
        }

        events
    }

    pub fn is_focused(&self, id: SurfaceId) -> bool {
        self.focused == Some(id)
    }

    pub fn focused(&self) -> Option<SurfaceId> {
        self.focused
    }

    /// Set whether focus wraps around at boundaries
    pub fn set_wrap_around(&mut self, wrap: bool) {
        self.wrap_around = wrap;
    }

    /// Number of surfaces currently in the tab sequence
    pub fn count(&self) -> usize {
        self.focus_order().count()
    }

    /// Tab stops in focus order
    pub fn focus_order(&self) -> impl Iterator<Item = SurfaceId> + '_ {
        self.order
            .iter()
            .filter(|info| info.focusable())
            .map(|info| info.id())
    }
}
