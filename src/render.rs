//! Rendering backend - buffered terminal output and cursor management
//!
//! All output goes through a `BufWriter` to minimize syscalls; call
//! `flush()` (or `end_frame()`) after a batch of operations. A headless
//! renderer writes into memory instead of stdout so components can be
//! rendered in tests.

use crate::layout::Rect;
use crate::terminal::TerminalContext;
use anyhow::Result;
use std::cell::RefCell;
use std::io::{self, BufWriter, Write};
use std::rc::Rc;

/// Default buffer capacity for write batching (16KB)
const WRITE_BUFFER_CAPACITY: usize = 16 * 1024;

/// In-memory sink shared between a headless renderer and its inspector
#[derive(Debug, Clone, Default)]
struct CaptureBuffer(Rc<RefCell<Vec<u8>>>);

impl Write for CaptureBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Terminal renderer handling styled output
pub struct Renderer {
    writer: BufWriter<Box<dyn Write>>,
    context: TerminalContext,
    capture: Option<CaptureBuffer>,
    in_alt_screen: bool,
    pointer_shape: Option<&'static str>,
}

impl Renderer {
    /// Create a renderer for the current terminal
    pub fn new() -> Result<Self> {
        let context = TerminalContext::detect()?;
        Ok(Self::with_writer(Box::new(io::stdout()), context, None))
    }

    /// Create a renderer that records output in memory
    pub fn headless(cols: u16, rows: u16) -> Self {
        let capture = CaptureBuffer::default();
        Self::with_writer(
            Box::new(capture.clone()),
            TerminalContext::headless(cols, rows),
            Some(capture),
        )
    }

    fn with_writer(
        writer: Box<dyn Write>,
        context: TerminalContext,
        capture: Option<CaptureBuffer>,
    ) -> Self {
        Renderer {
            writer: BufWriter::with_capacity(WRITE_BUFFER_CAPACITY, writer),
            context,
            capture,
            in_alt_screen: false,
            pointer_shape: None,
        }
    }

    /// Everything written so far by a headless renderer (flushes first)
    ///
    /// Returns an empty string for terminal-backed renderers.
    pub fn output(&mut self) -> String {
        let _ = self.writer.flush();
        self.capture
            .as_ref()
            .map(|c| String::from_utf8_lossy(&c.0.borrow()).into_owned())
            .unwrap_or_default()
    }

    /// Discard recorded headless output
    pub fn clear_output(&mut self) {
        let _ = self.writer.flush();
        if let Some(capture) = &self.capture {
            capture.0.borrow_mut().clear();
        }
    }

    /// Enter alternative screen buffer
    pub fn enter_alt_screen(&mut self) -> Result<()> {
        if !self.in_alt_screen {
            write!(self.writer, "\x1b[?1049h")?;
            self.writer.flush()?;
            self.in_alt_screen = true;
        }
        Ok(())
    }

    /// Exit alternative screen buffer
    pub fn exit_alt_screen(&mut self) -> Result<()> {
        if self.in_alt_screen {
            write!(self.writer, "\x1b[?1049l")?;
            self.writer.flush()?;
            self.in_alt_screen = false;
        }
        Ok(())
    }

    /// Clear the screen
    pub fn clear(&mut self) -> Result<()> {
        write!(self.writer, "\x1b[2J")?;
        Ok(())
    }

    /// Move cursor to position (0-indexed)
    #[inline]
    pub fn move_cursor(&mut self, col: u16, row: u16) -> Result<()> {
        write!(self.writer, "\x1b[{};{}H", row + 1, col + 1)?;
        Ok(())
    }

    pub fn hide_cursor(&mut self) -> Result<()> {
        write!(self.writer, "\x1b[?25l")?;
        Ok(())
    }

    pub fn show_cursor(&mut self) -> Result<()> {
        write!(self.writer, "\x1b[?25h")?;
        Ok(())
    }

    /// Write text at current cursor position
    #[inline]
    pub fn write_text(&mut self, text: &str) -> Result<()> {
        write!(self.writer, "{}", text)?;
        Ok(())
    }

    /// Write text with ANSI color/style codes
    #[inline]
    pub fn write_styled(&mut self, text: &str, style: &str) -> Result<()> {
        write!(self.writer, "{}{}\x1b[0m", style, text)?;
        Ok(())
    }

    /// Fill a rectangle with blanks in the given style
    pub fn fill(&mut self, area: Rect, style: &str) -> Result<()> {
        if area.is_empty() {
            return Ok(());
        }
        let blank = " ".repeat(area.width as usize);
        for row in area.y..area.bottom() {
            self.move_cursor(area.x, row)?;
            self.write_styled(&blank, style)?;
        }
        Ok(())
    }

    /// Draw a box outline with the given corner and edge characters
    pub fn draw_box(
        &mut self,
        area: Rect,
        chars: &crate::theme::BorderChars,
        style: &str,
    ) -> Result<()> {
        if area.width < 2 || area.height < 2 {
            return Ok(());
        }
        let inner = (area.width - 2) as usize;
        let horizontal = chars.horizontal.to_string().repeat(inner);

        self.move_cursor(area.x, area.y)?;
        self.write_styled(
            &format!("{}{}{}", chars.top_left, horizontal, chars.top_right),
            style,
        )?;
        for row in area.y + 1..area.bottom() - 1 {
            self.move_cursor(area.x, row)?;
            self.write_styled(&chars.vertical.to_string(), style)?;
            self.move_cursor(area.right() - 1, row)?;
            self.write_styled(&chars.vertical.to_string(), style)?;
        }
        self.move_cursor(area.x, area.bottom() - 1)?;
        self.write_styled(
            &format!("{}{}{}", chars.bottom_left, horizontal, chars.bottom_right),
            style,
        )?;
        Ok(())
    }

    /// Ask the terminal for a pointer shape (OSC 22); no-op when unsupported
    /// or already active
    pub fn set_pointer_shape(&mut self, shape: &'static str) -> Result<()> {
        if !self.context.capabilities.pointer_shapes || self.pointer_shape == Some(shape) {
            return Ok(());
        }
        write!(self.writer, "\x1b]22;{}\x1b\\", shape)?;
        self.pointer_shape = Some(shape);
        Ok(())
    }

    /// Current pointer shape requested through [`Renderer::set_pointer_shape`]
    pub fn pointer_shape(&self) -> Option<&'static str> {
        self.pointer_shape
    }

    /// Flush output buffer to terminal
    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }

    /// Get current terminal context
    pub fn context(&self) -> &TerminalContext {
        &self.context
    }

    /// Refresh terminal geometry (call after resize)
    pub fn refresh_geometry(&mut self) -> Result<()> {
        if self.capture.is_some() {
            return Ok(());
        }
        self.context.refresh_geometry()
    }

    /// Begin a render frame - hides cursor while drawing
    pub fn begin_frame(&mut self) -> Result<()> {
        self.hide_cursor()
    }

    /// End a render frame - shows cursor and flushes output
    pub fn end_frame(&mut self) -> Result<()> {
        self.show_cursor()?;
        self.flush()
    }

    pub fn in_alt_screen(&self) -> bool {
        self.in_alt_screen
    }
}

impl Drop for Renderer {
    fn drop(&mut self) {
        // Restore terminal state even during panics
        let _ = self.exit_alt_screen();
        let _ = self.show_cursor();
        let _ = self.writer.flush();
    }
}
