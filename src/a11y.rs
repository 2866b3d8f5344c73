//! Accessibility settings, roles, and semantic node snapshots

use crate::handle::SurfaceId;
use crate::layout::Rect;

/// Text reading direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextDirection {
    #[default]
    LeftToRight,
    RightToLeft,
}

impl TextDirection {
    /// Detect text direction from language code
    pub fn from_lang(lang: &str) -> Self {
        const RTL: [&str; 5] = ["ar", "he", "fa", "ur", "yi"];
        if RTL.iter().any(|prefix| lang.starts_with(prefix)) {
            TextDirection::RightToLeft
        } else {
            TextDirection::LeftToRight
        }
    }

    /// Detect text direction from `LANG` (e.g. "he_IL.UTF-8")
    pub fn from_env() -> Self {
        std::env::var("LANG")
            .map(|lang| Self::from_lang(&lang))
            .unwrap_or_default()
    }

    /// Check if this is RTL
    pub fn is_rtl(&self) -> bool {
        matches!(self, TextDirection::RightToLeft)
    }
}

/// Accessibility settings
#[derive(Debug, Clone, PartialEq)]
pub struct AccessibilitySettings {
    /// Use high contrast colors
    pub high_contrast: bool,

    /// Reduce or disable animations
    pub prefer_reduced_motion: bool,

    /// Screen reader is active
    pub screen_reader_enabled: bool,
}

impl AccessibilitySettings {
    /// Create default accessibility settings
    pub fn new() -> Self {
        Self {
            high_contrast: false,
            prefer_reduced_motion: false,
            screen_reader_enabled: false,
        }
    }

    /// Detect accessibility settings from environment
    pub fn from_env() -> Self {
        Self {
            high_contrast: std::env::var("ACCESSIBILITY_HIGH_CONTRAST").is_ok(),
            prefer_reduced_motion: std::env::var("ACCESSIBILITY_REDUCED_MOTION").is_ok(),
            screen_reader_enabled: std::env::var("SCREEN_READER").is_ok(),
        }
    }

    /// Settings with reduced motion requested
    pub fn reduced_motion() -> Self {
        Self {
            prefer_reduced_motion: true,
            ..Self::new()
        }
    }
}

impl Default for AccessibilitySettings {
    fn default() -> Self {
        Self::new()
    }
}

/// Accessibility role for components
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessibilityRole {
    None,
    Button,
    Heading { level: u8 },
    Label,
    Dialog,
    Region,
}

/// Semantic snapshot of a rendered component
///
/// This is what an assistive-technology bridge would read: role, accessible
/// name, tab-order participation, and the ARIA-style state flags a surface
/// exposes. `tab_index` is `Some(0)` for tab stops and `None` for elements
/// outside the tab sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct AccessibilityNode {
    pub id: Option<SurfaceId>,
    pub role: AccessibilityRole,
    pub label: Option<String>,
    pub disabled: bool,
    pub tab_index: Option<i32>,
    pub expanded: Option<bool>,
    pub controls: Option<String>,
    pub has_popup: Option<bool>,
    pub bounds: Option<Rect>,
    pub children: Vec<AccessibilityNode>,
}

impl AccessibilityNode {
    pub fn new(role: AccessibilityRole) -> Self {
        AccessibilityNode {
            id: None,
            role,
            label: None,
            disabled: false,
            tab_index: None,
            expanded: None,
            controls: None,
            has_popup: None,
            bounds: None,
            children: Vec::new(),
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_child(mut self, child: AccessibilityNode) -> Self {
        self.children.push(child);
        self
    }

    /// Depth-first walk over this node and its descendants
    pub fn walk(&self) -> Vec<&AccessibilityNode> {
        let mut out = vec![self];
        for child in &self.children {
            out.extend(child.walk());
        }
        out
    }

    /// Whether this node participates in the tab sequence
    pub fn is_tab_stop(&self) -> bool {
        self.tab_index.is_some_and(|index| index >= 0) && !self.disabled
    }
}
