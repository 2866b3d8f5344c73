//! Root handles - the forwarded reference to a surface's root element
//!
//! A surface exclusively owns its root state. Callers get a cloned
//! [`RootHandle`] that can read where the surface was last drawn and whether
//! it holds focus, and can ask for focus through [`RootHandle::request_focus`].
//! Every other mutation is reserved to the owning surface.

use crate::layout::Rect;
use std::cell::Cell;
use std::fmt;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Global counter for unique surface IDs.
static SURFACE_ID_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Unique identifier for an interactive surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SurfaceId(u64);

impl SurfaceId {
    /// Allocate a fresh ID
    pub fn next() -> Self {
        Self(SURFACE_ID_COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    /// Get the raw ID value.
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for SurfaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "surface#{}", self.0)
    }
}

#[derive(Debug)]
struct RootState {
    id: SurfaceId,
    bounds: Cell<Option<Rect>>,
    focused: Cell<bool>,
    hovered: Cell<bool>,
    tab_stop: Cell<bool>,
    focus_requested: Cell<bool>,
}

/// Shared read-only view of a surface root
#[derive(Debug, Clone)]
pub struct RootHandle {
    state: Rc<RootState>,
}

impl RootHandle {
    pub(crate) fn new(tab_stop: bool) -> Self {
        RootHandle {
            state: Rc::new(RootState {
                id: SurfaceId::next(),
                bounds: Cell::new(None),
                focused: Cell::new(false),
                hovered: Cell::new(false),
                tab_stop: Cell::new(tab_stop),
                focus_requested: Cell::new(false),
            }),
        }
    }

    pub fn id(&self) -> SurfaceId {
        self.state.id
    }

    /// Where the surface was last rendered; `None` before the first render
    pub fn bounds(&self) -> Option<Rect> {
        self.state.bounds.get()
    }

    /// Whether the cell lies inside the last rendered bounds
    pub fn contains(&self, col: u16, row: u16) -> bool {
        self.bounds().is_some_and(|b| b.contains(col, row))
    }

    pub fn is_focused(&self) -> bool {
        self.state.focused.get()
    }

    pub fn is_hovered(&self) -> bool {
        self.state.hovered.get()
    }

    /// Whether the surface participates in the tab sequence
    pub fn is_tab_stop(&self) -> bool {
        self.state.tab_stop.get()
    }

    /// Ask the owning focus scope to focus this surface
    ///
    /// Returns `false` (and records nothing) when the surface is not a tab
    /// stop, e.g. because it is disabled.
    pub fn request_focus(&self) -> bool {
        if !self.is_tab_stop() {
            return false;
        }
        self.state.focus_requested.set(true);
        true
    }

    /// Whether two handles refer to the same surface
    pub fn same_surface(&self, other: &RootHandle) -> bool {
        Rc::ptr_eq(&self.state, &other.state)
    }

    pub(crate) fn take_focus_request(&self) -> bool {
        self.state.focus_requested.replace(false)
    }

    pub(crate) fn set_bounds(&self, bounds: Rect) {
        self.state.bounds.set(Some(bounds));
    }

    pub(crate) fn set_focused(&self, focused: bool) {
        self.state.focused.set(focused);
    }

    pub(crate) fn set_hovered(&self, hovered: bool) {
        self.state.hovered.set(hovered);
    }

    /// Leaving the tab sequence also drops focus and any pending request
    pub(crate) fn set_tab_stop(&self, tab_stop: bool) {
        self.state.tab_stop.set(tab_stop);
        if !tab_stop {
            self.state.focused.set(false);
            self.state.focus_requested.set(false);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_unique() {
        let a = RootHandle::new(true);
        let b = RootHandle::new(true);
        assert_ne!(a.id(), b.id());
        assert!(a.same_surface(&a.clone()));
        assert!(!a.same_surface(&b));
    }

    #[test]
    fn test_bounds_visible_through_clones() {
        let owner = RootHandle::new(true);
        let caller = owner.clone();
        assert_eq!(caller.bounds(), None);
        assert!(!caller.contains(0, 0));

        owner.set_bounds(Rect::new(2, 2, 4, 1));
        assert_eq!(caller.bounds(), Some(Rect::new(2, 2, 4, 1)));
        assert!(caller.contains(5, 2));
        assert!(!caller.contains(6, 2));
    }

    #[test]
    fn test_focus_request_rejected_when_not_tab_stop() {
        let handle = RootHandle::new(false);
        assert!(!handle.request_focus());
        assert!(!handle.take_focus_request());

        handle.set_tab_stop(true);
        assert!(handle.request_focus());
        assert!(handle.take_focus_request());
        assert!(!handle.take_focus_request());
    }

    #[test]
    fn test_leaving_tab_sequence_drops_focus() {
        let handle = RootHandle::new(true);
        handle.set_focused(true);
        handle.request_focus();

        handle.set_tab_stop(false);
        assert!(!handle.is_focused());
        assert!(!handle.take_focus_request());
    }
}
