//! Text component for headings and body copy

use crate::a11y::{AccessibilityNode, AccessibilityRole, TextDirection};
use crate::component::Component;
use crate::context::{RenderContext, UseTheme};
use crate::event::EventHandler;
use crate::layout::Rect;
use crate::render::Renderer;
use anyhow::Result;

/// Text alignment - supports both logical and physical alignment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlign {
    /// Align to the start (left in LTR, right in RTL)
    #[default]
    Start,
    /// Align to the end (right in LTR, left in RTL)
    End,
    /// Center alignment (always centered)
    Center,
}

/// Physical alignment (after resolving logical alignment)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhysicalAlign {
    Left,
    Center,
    Right,
}

impl TextAlign {
    /// Resolve logical alignment to physical alignment based on text direction
    pub fn resolve(&self, direction: TextDirection) -> PhysicalAlign {
        match (self, direction) {
            (TextAlign::Start, TextDirection::LeftToRight) => PhysicalAlign::Left,
            (TextAlign::Start, TextDirection::RightToLeft) => PhysicalAlign::Right,
            (TextAlign::End, TextDirection::LeftToRight) => PhysicalAlign::Right,
            (TextAlign::End, TextDirection::RightToLeft) => PhysicalAlign::Left,
            (TextAlign::Center, _) => PhysicalAlign::Center,
        }
    }
}

/// Typographic role, mapped to a theme style at render time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextVariant {
    #[default]
    Body,
    /// Heading at the given level (1 is the most prominent)
    Heading(u8),
    Muted,
}

/// Single line of text, truncated to its bounds
pub struct Text {
    content: String,
    variant: TextVariant,
    align: TextAlign,
}

impl Text {
    pub fn new(content: impl Into<String>) -> Self {
        Text {
            content: content.into(),
            variant: TextVariant::Body,
            align: TextAlign::Start,
        }
    }

    pub fn heading(content: impl Into<String>, level: u8) -> Self {
        Self::new(content).with_variant(TextVariant::Heading(level))
    }

    pub fn with_variant(mut self, variant: TextVariant) -> Self {
        self.variant = variant;
        self
    }

    pub fn with_align(mut self, align: TextAlign) -> Self {
        self.align = align;
        self
    }

    pub fn text(&self) -> &str {
        &self.content
    }

    fn width(&self) -> u16 {
        self.content.chars().count().min(u16::MAX as usize) as u16
    }
}

impl EventHandler for Text {}

impl Component for Text {
    fn render(&mut self, renderer: &mut Renderer, bounds: Rect, ctx: &RenderContext) -> Result<()> {
        if self.content.is_empty() || bounds.is_empty() {
            return Ok(());
        }

        let physical_align = self.align.resolve(self.use_text_direction(ctx));
        let text_len = self.width().min(bounds.width);
        let x = match physical_align {
            PhysicalAlign::Left => bounds.x,
            PhysicalAlign::Center => bounds.x + (bounds.width - text_len) / 2,
            PhysicalAlign::Right => bounds.x + (bounds.width - text_len),
        };

        let visible: String = self.content.chars().take(text_len as usize).collect();
        let theme = self.use_theme(ctx);
        let style = match self.variant {
            TextVariant::Body => theme.text_style(),
            TextVariant::Heading(_) => theme.heading_style(),
            TextVariant::Muted => theme.disabled_style(),
        };

        renderer.move_cursor(x, bounds.y)?;
        renderer.write_styled(&visible, &style)
    }

    fn min_size(&self) -> (u16, u16) {
        (self.width(), 1)
    }

    fn accessibility(&self) -> Option<AccessibilityNode> {
        let role = match self.variant {
            TextVariant::Heading(level) => AccessibilityRole::Heading { level },
            _ => AccessibilityRole::Label,
        };
        Some(AccessibilityNode::new(role).with_label(self.content.clone()))
    }

    fn name(&self) -> &str {
        "Text"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terminal::TerminalCapabilities;
    use crate::theme::Theme;

    #[test]
    fn test_text_align_resolve_ltr() {
        // In LTR, Start = Left, End = Right
        assert_eq!(
            TextAlign::Start.resolve(TextDirection::LeftToRight),
            PhysicalAlign::Left
        );
        assert_eq!(
            TextAlign::End.resolve(TextDirection::LeftToRight),
            PhysicalAlign::Right
        );
        assert_eq!(
            TextAlign::Center.resolve(TextDirection::LeftToRight),
            PhysicalAlign::Center
        );
    }

    #[test]
    fn test_text_align_resolve_rtl() {
        // In RTL, Start = Right, End = Left (reversed!)
        assert_eq!(
            TextAlign::Start.resolve(TextDirection::RightToLeft),
            PhysicalAlign::Right
        );
        assert_eq!(
            TextAlign::End.resolve(TextDirection::RightToLeft),
            PhysicalAlign::Left
        );
    }

    #[test]
    fn test_render_truncates_and_aligns() {
        let theme = Theme::new(TerminalCapabilities::basic());
        let ctx = RenderContext::new(&theme).with_direction(TextDirection::RightToLeft);
        let mut renderer = Renderer::headless(20, 2);

        let mut text = Text::new("abcdef");
        text.render(&mut renderer, Rect::new(0, 0, 4, 1), &ctx).unwrap();
        let out = renderer.output();
        assert!(out.contains("abcd"));
        assert!(!out.contains("abcde"));

        renderer.clear_output();
        let mut short = Text::new("ab");
        short.render(&mut renderer, Rect::new(0, 1, 10, 1), &ctx).unwrap();
        // Right-aligned in RTL: column 8, row 1
        assert!(renderer.output().contains("\x1b[2;9H"));
    }

    #[test]
    fn test_heading_accessibility() {
        let node = Text::heading("Settings", 1).accessibility().unwrap();
        assert_eq!(node.role, AccessibilityRole::Heading { level: 1 });
        assert_eq!(node.label.as_deref(), Some("Settings"));
    }
}
