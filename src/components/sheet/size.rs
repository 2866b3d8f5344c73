use crate::error::ParseError;
use crate::terminal::DEFAULT_CHAR_WIDTH_PX;
use std::str::FromStr;

/// Sheet width preset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SheetSize {
    #[default]
    Small,
    Medium,
    Large,
}

impl SheetSize {
    /// Nominal width in pixels
    pub const fn width_px(&self) -> u16 {
        match self {
            SheetSize::Small => 540,
            SheetSize::Medium => 720,
            SheetSize::Large => 900,
        }
    }

    /// Width in cells for a given cell width, never wider than `available`
    pub fn width_cells(&self, char_width_px: u16, available: u16) -> u16 {
        let char_width = if char_width_px == 0 {
            DEFAULT_CHAR_WIDTH_PX
        } else {
            char_width_px
        };
        self.width_px().div_ceil(char_width).min(available)
    }
}

impl FromStr for SheetSize {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sm" | "small" => Ok(SheetSize::Small),
            "md" | "medium" => Ok(SheetSize::Medium),
            "lg" | "large" => Ok(SheetSize::Large),
            _ => Err(ParseError::UnknownSize(s.to_string())),
        }
    }
}

/// Accessible identity of a sheet
///
/// `accessible_label` names the dialog for screen readers and should say
/// more than the visible heading does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverlayIdentity {
    pub accessible_label: String,
    pub dismiss_button_label: String,
}

impl OverlayIdentity {
    pub fn new(accessible_label: impl Into<String>, dismiss_button_label: impl Into<String>) -> Self {
        OverlayIdentity {
            accessible_label: accessible_label.into(),
            dismiss_button_label: dismiss_button_label.into(),
        }
    }

    /// Sheets always present as dialogs
    pub fn role(&self) -> crate::a11y::AccessibilityRole {
        crate::a11y::AccessibilityRole::Dialog
    }
}
