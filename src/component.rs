//! Component system - trait and lifecycle for UI elements

use crate::a11y::AccessibilityNode;
use crate::context::RenderContext;
use crate::event::{Event, EventHandler, EventResult};
use crate::handle::RootHandle;
use crate::layout::Rect;
use crate::render::Renderer;
use anyhow::Result;

/// Core component trait for all UI elements
///
/// Components use a hybrid approach:
/// - Retained: Component tree structure and state
/// - Immediate: Rendering happens fresh each frame via render() callback
pub trait Component: EventHandler {
    /// Render the component to the given rectangle
    ///
    /// This is called every frame. Components should issue immediate-mode
    /// drawing commands to the renderer within their bounds.
    fn render(&mut self, renderer: &mut Renderer, bounds: Rect, ctx: &RenderContext) -> Result<()>;

    /// Calculate minimum size needed for this component (optional)
    fn min_size(&self) -> (u16, u16) {
        (0, 0)
    }

    /// Called when component is inserted into the tree
    fn on_mount(&mut self) {}

    /// Called before component is removed from the tree
    fn on_unmount(&mut self) {}

    /// Semantic description for assistive technology
    fn accessibility(&self) -> Option<AccessibilityNode> {
        None
    }

    /// Root handles of the focusable surfaces inside this component, in
    /// tab order
    fn focus_handles(&self) -> Vec<RootHandle> {
        Vec::new()
    }

    /// Get component name for debugging
    fn name(&self) -> &str {
        "Component"
    }
}

/// Helper to propagate events to children, stopping at the first consumer
pub fn propagate_event<'a, I>(children: I, event: &Event) -> EventResult
where
    I: IntoIterator<Item = &'a mut Box<dyn Component>>,
{
    for child in children {
        let result = child.handle_event(event);
        if result.is_consumed() {
            return result;
        }
    }
    EventResult::Ignored
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::Key;
    use std::cell::Cell;
    use std::rc::Rc;

    struct Counter {
        seen: Rc<Cell<usize>>,
        consume: bool,
    }

    impl Counter {
        fn new(consume: bool) -> (Self, Rc<Cell<usize>>) {
            let seen = Rc::new(Cell::new(0));
            (
                Counter {
                    seen: seen.clone(),
                    consume,
                },
                seen,
            )
        }
    }

    impl EventHandler for Counter {
        fn handle_event(&mut self, _event: &Event) -> EventResult {
            self.seen.set(self.seen.get() + 1);
            if self.consume {
                EventResult::Consumed
            } else {
                EventResult::Ignored
            }
        }
    }

    impl Component for Counter {
        fn render(
            &mut self,
            _renderer: &mut Renderer,
            _bounds: Rect,
            _ctx: &RenderContext,
        ) -> Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_propagation_stops_at_consumer() {
        let (first, first_seen) = Counter::new(false);
        let (second, second_seen) = Counter::new(true);
        let (third, third_seen) = Counter::new(false);
        let mut children: Vec<Box<dyn Component>> =
            vec![Box::new(first), Box::new(second), Box::new(third)];

        let result = propagate_event(children.iter_mut(), &Event::key(Key::Enter));
        assert_eq!(result, EventResult::Consumed);
        assert_eq!(first_seen.get(), 1);
        assert_eq!(second_seen.get(), 1);
        assert_eq!(third_seen.get(), 0);
    }

    #[test]
    fn test_defaults() {
        let (c, _) = Counter::new(false);
        assert_eq!(c.min_size(), (0, 0));
        assert!(c.accessibility().is_none());
        assert!(c.focus_handles().is_empty());
        assert_eq!(c.name(), "Component");
    }
}
