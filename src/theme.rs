//! Theming for sheets and touch targets, with color degradation

use crate::a11y::AccessibilitySettings;
use crate::terminal::TerminalCapabilities;

/// Color that degrades to whatever the terminal can show
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color { r, g, b }
    }

    pub const fn white() -> Self {
        Color::rgb(255, 255, 255)
    }

    pub const fn black() -> Self {
        Color::rgb(0, 0, 0)
    }

    pub const fn dark_gray() -> Self {
        Color::rgb(128, 128, 128)
    }

    /// Foreground escape sequence for the given capabilities
    pub fn fg(&self, caps: &TerminalCapabilities) -> String {
        self.sequence(caps, 38)
    }

    /// Background escape sequence for the given capabilities
    pub fn bg(&self, caps: &TerminalCapabilities) -> String {
        self.sequence(caps, 48)
    }

    fn sequence(&self, caps: &TerminalCapabilities, layer: u8) -> String {
        if caps.truecolor {
            format!("\x1b[{};2;{};{};{}m", layer, self.r, self.g, self.b)
        } else if caps.colors_256 {
            format!("\x1b[{};5;{}m", layer, self.to_256())
        } else {
            // 30-37 / 40-47, bright variants at 90-97 / 100-107
            let (idx, bright) = self.to_ansi16();
            let base = match (layer, bright) {
                (38, false) => 30,
                (38, true) => 90,
                (_, false) => 40,
                (_, true) => 100,
            };
            format!("\x1b[{}m", base + idx)
        }
    }

    fn to_256(self) -> u8 {
        let (r, g, b) = (self.r, self.g, self.b);
        if r == g && g == b {
            if r < 8 {
                return 16;
            }
            if r > 248 {
                return 231;
            }
            return 232 + ((r as u16 - 8) * 24 / 247) as u8;
        }
        let q = |c: u8| (c as u16 * 5 / 255) as u8;
        16 + 36 * q(r) + 6 * q(g) + q(b)
    }

    fn to_ansi16(self) -> (u8, bool) {
        let bit = |c: u8| u8::from(c >= 128);
        let idx = bit(self.r) | (bit(self.g) << 1) | (bit(self.b) << 2);
        let bright = self.r.max(self.g).max(self.b) > 200;
        (idx, bright)
    }
}

/// Border characters for drawing boxes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BorderChars {
    pub horizontal: char,
    pub vertical: char,
    pub top_left: char,
    pub top_right: char,
    pub bottom_left: char,
    pub bottom_right: char,
}

impl BorderChars {
    pub const fn single() -> Self {
        BorderChars {
            horizontal: '─',
            vertical: '│',
            top_left: '┌',
            top_right: '┐',
            bottom_left: '└',
            bottom_right: '┘',
        }
    }

    pub const fn rounded() -> Self {
        BorderChars {
            horizontal: '─',
            vertical: '│',
            top_left: '╭',
            top_right: '╮',
            bottom_left: '╰',
            bottom_right: '╯',
        }
    }

    /// Parenthesis caps used for circle and pill shapes
    pub const fn caps() -> Self {
        BorderChars {
            horizontal: '─',
            vertical: ' ',
            top_left: '(',
            top_right: ')',
            bottom_left: '(',
            bottom_right: ')',
        }
    }
}

/// Colors and typography used by sheets and touch targets
#[derive(Debug, Clone)]
pub struct Theme {
    pub text_fg: Color,
    pub heading_fg: Color,
    pub disabled_fg: Color,
    pub surface: Color,
    pub backdrop: Color,
    pub border_color: Color,
    pub focus_border_color: Color,

    pub heading_bold: bool,
    pub accessibility: AccessibilitySettings,

    caps: TerminalCapabilities,
}

impl Theme {
    /// Create a new theme with terminal capabilities
    pub fn new(caps: TerminalCapabilities) -> Self {
        Self::with_accessibility(caps, AccessibilitySettings::from_env())
    }

    /// Create a theme with explicit accessibility settings
    pub fn with_accessibility(
        caps: TerminalCapabilities,
        accessibility: AccessibilitySettings,
    ) -> Self {
        let (border_color, focus_border_color) = if accessibility.high_contrast {
            (Color::white(), Color::rgb(255, 255, 0))
        } else {
            (Color::dark_gray(), Color::rgb(100, 150, 255))
        };

        Theme {
            text_fg: Color::white(),
            heading_fg: Color::white(),
            disabled_fg: Color::dark_gray(),
            surface: Color::rgb(20, 20, 25),
            backdrop: Color::rgb(5, 5, 8),
            border_color,
            focus_border_color,
            heading_bold: true,
            accessibility,
            caps,
        }
    }

    pub fn capabilities(&self) -> &TerminalCapabilities {
        &self.caps
    }

    pub fn text_style(&self) -> String {
        self.text_fg.fg(&self.caps)
    }

    pub fn heading_style(&self) -> String {
        let mut style = self.heading_fg.fg(&self.caps);
        if self.heading_bold {
            style.push_str("\x1b[1m");
        }
        style
    }

    pub fn disabled_style(&self) -> String {
        format!("{}\x1b[2m", self.disabled_fg.fg(&self.caps))
    }

    pub fn surface_style(&self) -> String {
        self.surface.bg(&self.caps)
    }

    /// Dimmed fill drawn behind an open sheet
    pub fn backdrop_style(&self) -> String {
        format!("{}\x1b[2m", self.backdrop.bg(&self.caps))
    }

    pub fn border_style(&self, focused: bool) -> String {
        if focused {
            self.focus_border_color.fg(&self.caps)
        } else {
            self.border_color.fg(&self.caps)
        }
    }
}
