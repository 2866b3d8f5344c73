//! Rendering context - provides theme, text direction, and accessibility to components

use crate::a11y::{AccessibilitySettings, TextDirection};
use crate::theme::Theme;

/// Context passed down the component tree during rendering (like React Context)
#[derive(Clone)]
pub struct RenderContext<'a> {
    /// Current theme
    pub theme: &'a Theme,

    /// Reading direction; decides which edge a sheet is anchored to
    pub text_direction: TextDirection,

    /// Accessibility settings
    pub accessibility: &'a AccessibilitySettings,
}

impl<'a> RenderContext<'a> {
    /// Create a new render context from a theme
    pub fn new(theme: &'a Theme) -> Self {
        RenderContext {
            theme,
            text_direction: TextDirection::LeftToRight,
            accessibility: &theme.accessibility,
        }
    }

    /// Create a child context with a different text direction
    pub fn with_direction(&self, text_direction: TextDirection) -> Self {
        RenderContext {
            text_direction,
            ..self.clone()
        }
    }
}

/// Hook trait for accessing theme from context
pub trait UseTheme {
    fn use_theme<'a>(&self, ctx: &'a RenderContext) -> &'a Theme {
        ctx.theme
    }

    fn use_text_direction(&self, ctx: &RenderContext) -> TextDirection {
        ctx.text_direction
    }
}

/// Auto-implement the hook trait for all components
impl<T> UseTheme for T {}
