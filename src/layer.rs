//! Overlay layers - stacking order and the top-most active layer
//!
//! Every mounted overlay pushes a [`LayerId`] onto the active-layer stack of
//! its UI thread and pops it when unmounted. The stack answers one question:
//! "is this overlay the top-most one right now?", which decides whether it
//! may react to Escape. Mutation only happens through [`LayerGuard`], whose
//! lifetime is the mount/unmount window of the overlay.
//!
//! The stack is thread-local. UI event loops are single-threaded, so the
//! thread that dispatches events owns the only stack that matters and no
//! locking is needed.

use crate::a11y::AccessibilityNode;
use crate::component::Component;
use crate::context::RenderContext;
use crate::event::{Event, EventHandler, EventResult};
use crate::handle::RootHandle;
use crate::layout::Rect;
use crate::render::Renderer;
use anyhow::Result;
use std::cell::RefCell;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::debug;

/// Global counter for unique layer IDs.
static LAYER_ID_COUNTER: AtomicU64 = AtomicU64::new(1);

thread_local! {
    static ACTIVE_LAYERS: RefCell<Vec<LayerId>> = const { RefCell::new(Vec::new()) };
}

/// Identity of one mounted overlay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LayerId(u64);

impl LayerId {
    fn next() -> Self {
        Self(LAYER_ID_COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for LayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "layer#{}", self.0)
    }
}

/// Registration on the active-layer stack; dropping it unregisters
#[derive(Debug)]
pub(crate) struct LayerGuard {
    id: LayerId,
}

impl LayerGuard {
    /// Push a fresh layer on top of the stack
    pub(crate) fn push() -> Self {
        let id = LayerId::next();
        ACTIVE_LAYERS.with(|layers| layers.borrow_mut().push(id));
        debug!(layer = %id, depth = active_layer_count(), "layer mounted");
        LayerGuard { id }
    }

    pub(crate) fn id(&self) -> LayerId {
        self.id
    }

    pub(crate) fn is_topmost(&self) -> bool {
        ACTIVE_LAYERS.with(|layers| layers.borrow().last() == Some(&self.id))
    }
}

impl Drop for LayerGuard {
    fn drop(&mut self) {
        // Overlays may unmount out of order; remove wherever it sits
        ACTIVE_LAYERS.with(|layers| layers.borrow_mut().retain(|id| *id != self.id));
        debug!(layer = %self.id, depth = active_layer_count(), "layer unmounted");
    }
}

/// Number of overlays currently mounted on this thread
pub(crate) fn active_layer_count() -> usize {
    ACTIVE_LAYERS.with(|layers| layers.borrow().len())
}

/// Stacking order of a layer; higher values draw above lower ones
pub trait ZIndex: fmt::Debug {
    fn index(&self) -> i32;
}

/// Stacking order fixed at a literal value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedZIndex(pub i32);

impl ZIndex for FixedZIndex {
    fn index(&self) -> i32 {
        self.0
    }
}

/// Stacking order one above the highest of its dependencies
#[derive(Debug)]
pub struct CompositeZIndex {
    deps: Vec<Box<dyn ZIndex>>,
}

impl CompositeZIndex {
    pub fn new(deps: Vec<Box<dyn ZIndex>>) -> Self {
        Self { deps }
    }
}

impl ZIndex for CompositeZIndex {
    fn index(&self) -> i32 {
        self.deps
            .iter()
            .map(|dep| dep.index())
            .max()
            .unwrap_or(0)
            .saturating_add(1)
    }
}

/// Wraps a component rendered above the main content
///
/// Hosts keep their layers sorted by [`Layer::z_index`] and draw them last
/// to first; events go to the highest layer first.
pub struct Layer {
    z_index: Box<dyn ZIndex>,
    child: Box<dyn Component>,
}

impl Layer {
    pub fn new(z_index: impl ZIndex + 'static, child: Box<dyn Component>) -> Self {
        Layer {
            z_index: Box::new(z_index),
            child,
        }
    }

    pub fn z_index(&self) -> i32 {
        self.z_index.index()
    }

    pub fn child(&self) -> &dyn Component {
        self.child.as_ref()
    }

    pub fn child_mut(&mut self) -> &mut Box<dyn Component> {
        &mut self.child
    }
}

impl EventHandler for Layer {
    fn handle_event(&mut self, event: &Event) -> EventResult {
        self.child.handle_event(event)
    }
}

impl Component for Layer {
    fn render(&mut self, renderer: &mut Renderer, bounds: Rect, ctx: &RenderContext) -> Result<()> {
        self.child.render(renderer, bounds, ctx)
    }

    fn min_size(&self) -> (u16, u16) {
        self.child.min_size()
    }

    fn on_mount(&mut self) {
        self.child.on_mount();
    }

    fn on_unmount(&mut self) {
        self.child.on_unmount();
    }

    fn accessibility(&self) -> Option<AccessibilityNode> {
        self.child.accessibility()
    }

    fn focus_handles(&self) -> Vec<RootHandle> {
        self.child.focus_handles()
    }

    fn name(&self) -> &str {
        "Layer"
    }
}
