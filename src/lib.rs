//! sheetkit - accessible, dismissible sheets and touch targets for terminal UIs
//!
//! Built around two components:
//! - [`Touchable`]: one focusable, clickable region that turns clicks and
//!   Enter/Space into a single `on_touch` action, with button semantics and
//!   a single disabled gate
//! - [`Sheet`]: a side panel that can be closed by its close control, by
//!   Escape while it is the top-most layer, or by a press outside it, and
//!   that emits exactly one dismissal per gesture
//!
//! Dismissal can be routed through an [`AnimationController`] so the host
//! removes the sheet only after its exit animation has finished.
//!
//! Rendering is immediate mode into a [`Renderer`]; the component tree is
//! retained and receives [`Event`]s through [`EventHandler`].

pub mod a11y;
pub mod animation;
pub mod component;
pub mod components;
pub mod context;
pub mod dismiss;
pub mod error;
pub mod event;
pub mod focus;
pub mod handle;
pub mod layer;
pub mod layout;
pub mod render;
pub mod style;
pub mod terminal;
pub mod theme;

// Re-export commonly used types
pub use a11y::{AccessibilityNode, AccessibilityRole, AccessibilitySettings, TextDirection};
pub use animation::{AnimationController, AnimationPhase, AnimationTiming};
pub use component::Component;
pub use components::{
    ActivationEvent, FocusEvent, OverlayIdentity, Sheet, SheetBuilder, SheetSize, Text,
    Touchable,
};
pub use context::{RenderContext, UseTheme};
pub use dismiss::{
    DismissConfig, DismissCoordinator, DismissIntent, DismissRoute, DismissTrigger,
    EscapeRepeatPolicy, ExplicitControl,
};
pub use error::ParseError;
pub use event::{Event, EventHandler, EventResult, Key, KeyEvent, KeyKind, MouseEvent};
pub use focus::{FocusDirection, FocusManager, FocusReason, FocusableInfo};
pub use handle::{RootHandle, SurfaceId};
pub use layer::{CompositeZIndex, FixedZIndex, Layer, LayerId, ZIndex};
pub use layout::Rect;
pub use render::Renderer;
pub use style::{
    resolve_cursor, resolve_rounding, resolve_rounding_str, CornerRadius, MouseCursor, Rounding,
    StyleDescriptor,
};
pub use terminal::{TerminalCapabilities, TerminalContext, TerminalGeometry};
pub use theme::{BorderChars, Color, Theme};

#[cfg(feature = "tui")]
pub use event::EventPoller;
