//! Terminal abstraction - geometry, capabilities, and context

use anyhow::Result;

/// Character cell width assumed when the terminal does not report pixels
pub const DEFAULT_CHAR_WIDTH_PX: u16 = 10;

/// Character cell height assumed when the terminal does not report pixels
pub const DEFAULT_CHAR_HEIGHT_PX: u16 = 20;

/// Terminal geometry and sizing information
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TerminalGeometry {
    /// Terminal width in columns (characters)
    pub cols: u16,
    /// Terminal height in rows (lines)
    pub rows: u16,
    /// Estimated character width in pixels
    pub char_width: u16,
    /// Estimated character height in pixels
    pub char_height: u16,
}

impl TerminalGeometry {
    /// Get current terminal geometry
    #[cfg(feature = "tui")]
    pub fn detect() -> Result<Self> {
        use anyhow::Context;

        let (cols, rows) = crossterm::terminal::size().context("Failed to get terminal size")?;
        let mut geometry = Self::with_char_size(cols, rows, DEFAULT_CHAR_WIDTH_PX, DEFAULT_CHAR_HEIGHT_PX);

        // Prefer the real cell size when the terminal reports its pixel size
        if let Ok(size) = crossterm::terminal::window_size() {
            if size.columns > 0 && size.rows > 0 && size.width > 0 && size.height > 0 {
                geometry.char_width = (size.width / size.columns).max(1);
                geometry.char_height = (size.height / size.rows).max(1);
            }
        }

        Ok(geometry)
    }

    /// Headless builds have no terminal to query
    #[cfg(not(feature = "tui"))]
    pub fn detect() -> Result<Self> {
        Ok(Self::headless(80, 24))
    }

    /// Geometry with default cell pixel estimates
    pub fn headless(cols: u16, rows: u16) -> Self {
        Self::with_char_size(cols, rows, DEFAULT_CHAR_WIDTH_PX, DEFAULT_CHAR_HEIGHT_PX)
    }

    /// Get geometry with custom pixel estimates
    pub fn with_char_size(cols: u16, rows: u16, char_width: u16, char_height: u16) -> Self {
        TerminalGeometry {
            cols,
            rows,
            char_width,
            char_height,
        }
    }

    /// Estimated terminal width in pixels
    pub fn pixel_width(&self) -> u32 {
        self.cols as u32 * self.char_width as u32
    }

    /// Estimated terminal height in pixels
    pub fn pixel_height(&self) -> u32 {
        self.rows as u32 * self.char_height as u32
    }
}

/// Terminal capability detection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TerminalCapabilities {
    /// Supports 24-bit true color
    pub truecolor: bool,
    /// Supports 256 colors
    pub colors_256: bool,
    /// Supports mouse events
    pub mouse: bool,
    /// Supports OSC 22 pointer shapes
    pub pointer_shapes: bool,
}

impl TerminalCapabilities {
    /// Detect terminal capabilities
    pub fn detect() -> Self {
        let term = std::env::var("TERM").unwrap_or_default();
        let colorterm = std::env::var("COLORTERM").unwrap_or_default();
        let kitty_window = std::env::var("KITTY_WINDOW_ID").is_ok();

        let truecolor =
            colorterm.contains("truecolor") || colorterm.contains("24bit") || kitty_window;

        // 256 color support is pretty universal now
        let colors_256 = term.contains("256") || truecolor;

        TerminalCapabilities {
            truecolor,
            colors_256,
            mouse: true,
            pointer_shapes: kitty_window || term.contains("kitty") || term.contains("foot"),
        }
    }

    /// Minimal capabilities for tests and headless rendering
    pub fn basic() -> Self {
        TerminalCapabilities {
            truecolor: false,
            colors_256: false,
            mouse: true,
            pointer_shapes: false,
        }
    }
}

/// Complete terminal context combining geometry and capabilities
#[derive(Debug, Clone)]
pub struct TerminalContext {
    pub geometry: TerminalGeometry,
    pub capabilities: TerminalCapabilities,
}

impl TerminalContext {
    /// Create a new terminal context by detecting current environment
    pub fn detect() -> Result<Self> {
        Ok(TerminalContext {
            geometry: TerminalGeometry::detect()?,
            capabilities: TerminalCapabilities::detect(),
        })
    }

    /// Context for a terminal of the given size that never gets queried
    pub fn headless(cols: u16, rows: u16) -> Self {
        TerminalContext {
            geometry: TerminalGeometry::headless(cols, rows),
            capabilities: TerminalCapabilities::basic(),
        }
    }

    /// Refresh geometry (e.g., after terminal resize)
    pub fn refresh_geometry(&mut self) -> Result<()> {
        self.geometry = TerminalGeometry::detect()?;
        Ok(())
    }

    /// Get character dimensions
    pub fn char_dimensions(&self) -> (u16, u16) {
        (self.geometry.cols, self.geometry.rows)
    }
}
