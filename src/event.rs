//! Event system - keyboard, mouse, focus, and terminal events

use crate::focus::FocusReason;
use crate::handle::SurfaceId;
#[cfg(feature = "tui")]
use anyhow::Result;
use std::time::{Duration, Instant};

/// Keyboard key representation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    F(u8),
    Ctrl(char),
    Alt(char),
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
    BackTab,
    Backspace,
    Delete,
    Insert,
    Enter,
    Tab,
    Esc,
    Null,
}

impl Key {
    /// Space bar
    pub const SPACE: Key = Key::Char(' ');

    /// Keys that activate a focused button
    pub fn is_activation(&self) -> bool {
        matches!(*self, Key::Enter | Key::SPACE)
    }
}

/// Phase of a key within one physical press
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum KeyKind {
    #[default]
    Press,
    /// Auto-repeat while the key is held (only reported by terminals with
    /// keyboard enhancement enabled)
    Repeat,
    Release,
}

/// Key event with its press phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyEvent {
    pub key: Key,
    pub kind: KeyKind,
}

impl KeyEvent {
    pub const fn press(key: Key) -> Self {
        KeyEvent {
            key,
            kind: KeyKind::Press,
        }
    }

    pub const fn repeat(key: Key) -> Self {
        KeyEvent {
            key,
            kind: KeyKind::Repeat,
        }
    }

    pub const fn release(key: Key) -> Self {
        KeyEvent {
            key,
            kind: KeyKind::Release,
        }
    }

    pub fn is_press(&self) -> bool {
        self.kind == KeyKind::Press
    }
}

/// Mouse button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// Mouse event types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseEvent {
    Press(MouseButton, u16, u16), // button, col, row
    Release(MouseButton, u16, u16),
    Drag(u16, u16),   // col, row
    Moved(u16, u16),  // col, row
    ScrollUp(u16, u16),
    ScrollDown(u16, u16),
}

impl MouseEvent {
    /// Cell the pointer was over when the event happened
    pub fn position(&self) -> (u16, u16) {
        match *self {
            MouseEvent::Press(_, col, row)
            | MouseEvent::Release(_, col, row)
            | MouseEvent::Drag(col, row)
            | MouseEvent::Moved(col, row)
            | MouseEvent::ScrollUp(col, row)
            | MouseEvent::ScrollDown(col, row) => (col, row),
        }
    }

    /// Whether this is a primary-button press
    pub fn is_primary_press(&self) -> bool {
        matches!(self, MouseEvent::Press(MouseButton::Left, ..))
    }
}

/// UI events
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Keyboard event
    Key(KeyEvent),
    /// Mouse event
    Mouse(MouseEvent),
    /// Terminal resized (new cols, new rows)
    Resize(u16, u16),
    /// Terminal window gained focus
    FocusGained,
    /// Terminal window lost focus
    FocusLost,
    /// Paste event
    Paste(String),
    /// A surface received keyboard focus
    Focus { target: SurfaceId, reason: FocusReason },
    /// A surface lost keyboard focus
    Blur { target: SurfaceId },
}

impl Event {
    /// Shorthand for a key press event
    pub fn key(key: Key) -> Self {
        Event::Key(KeyEvent::press(key))
    }

    /// Shorthand for a primary-button press at a cell
    pub fn click_down(col: u16, row: u16) -> Self {
        Event::Mouse(MouseEvent::Press(MouseButton::Left, col, row))
    }

    /// Shorthand for a primary-button release at a cell
    pub fn click_up(col: u16, row: u16) -> Self {
        Event::Mouse(MouseEvent::Release(MouseButton::Left, col, row))
    }
}

/// Outcome of delivering an event to a handler
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, PartialOrd, Ord)]
pub enum EventResult {
    /// Not handled; keep propagating
    #[default]
    Ignored,
    /// Handled; stop propagating
    Consumed,
    /// Handled, and the host must skip its default action for this event
    /// (for example scrolling a parent view when Space is pressed)
    DefaultPrevented,
}

impl EventResult {
    pub fn is_consumed(&self) -> bool {
        !matches!(self, EventResult::Ignored)
    }

    pub fn is_default_prevented(&self) -> bool {
        matches!(self, EventResult::DefaultPrevented)
    }

    /// Combine two results, keeping the stronger one
    pub fn merge(self, other: EventResult) -> EventResult {
        self.max(other)
    }
}

/// Event handler trait for components
pub trait EventHandler {
    /// Handle an event; a consumed result stops propagation
    fn handle_event(&mut self, _event: &Event) -> EventResult {
        EventResult::Ignored
    }
}

/// Event polling and conversion from crossterm events
#[cfg(feature = "tui")]
pub struct EventPoller {
    _enabled: bool,
}

#[cfg(feature = "tui")]
impl EventPoller {
    /// Create a new event poller
    pub fn new() -> Result<Self> {
        use crossterm::event::{KeyboardEnhancementFlags, PushKeyboardEnhancementFlags};

        crossterm::terminal::enable_raw_mode()?;

        // Try to enable mouse, focus and key phase reporting, but don't fail if not available
        let _ = crossterm::execute!(
            std::io::stdout(),
            crossterm::event::EnableMouseCapture,
            crossterm::event::EnableFocusChange,
        );
        let _ = crossterm::execute!(
            std::io::stdout(),
            PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
        );

        Ok(EventPoller { _enabled: true })
    }

    /// Poll for next event with timeout
    pub fn poll(&self, timeout: Duration) -> Result<Option<Event>> {
        if crossterm::event::poll(timeout)? {
            let event = crossterm::event::read()?;
            Ok(convert_crossterm_event(event))
        } else {
            Ok(None)
        }
    }

    /// Block and wait for next event
    pub fn read(&self) -> Result<Event> {
        loop {
            if let Some(event) = convert_crossterm_event(crossterm::event::read()?) {
                return Ok(event);
            }
        }
    }
}

#[cfg(feature = "tui")]
impl Drop for EventPoller {
    fn drop(&mut self) {
        let _ = crossterm::execute!(
            std::io::stdout(),
            crossterm::event::PopKeyboardEnhancementFlags,
            crossterm::event::DisableMouseCapture,
            crossterm::event::DisableFocusChange,
        );
        let _ = crossterm::terminal::disable_raw_mode();
    }
}

/// Frame timing for animation
pub struct FrameTimer {
    frame_duration: Duration,
    last_frame: Instant,
}

impl FrameTimer {
    pub fn new(fps: u32) -> Self {
        Self {
            frame_duration: Duration::from_nanos(1_000_000_000 / fps.max(1) as u64),
            last_frame: Instant::now(),
        }
    }

    /// Time until next frame (zero if frame is due)
    pub fn time_to_next_frame(&self) -> Duration {
        self.frame_duration.saturating_sub(self.last_frame.elapsed())
    }

    /// Mark frame as rendered, returning the time since the previous frame
    pub fn tick(&mut self) -> Duration {
        let elapsed = self.last_frame.elapsed();
        self.last_frame = Instant::now();
        elapsed
    }
}

/// Convert crossterm event to our Event type
#[cfg(feature = "tui")]
fn convert_crossterm_event(event: crossterm::event::Event) -> Option<Event> {
    use crossterm::event::{Event as CEvent, KeyEventKind, MouseEventKind};

    let convert_button = |btn| match btn {
        crossterm::event::MouseButton::Left => MouseButton::Left,
        crossterm::event::MouseButton::Right => MouseButton::Right,
        crossterm::event::MouseButton::Middle => MouseButton::Middle,
    };

    let event = match event {
        CEvent::Key(ke) => {
            let kind = match ke.kind {
                KeyEventKind::Press => KeyKind::Press,
                KeyEventKind::Repeat => KeyKind::Repeat,
                KeyEventKind::Release => KeyKind::Release,
            };
            Event::Key(KeyEvent {
                key: convert_key(ke.code, ke.modifiers),
                kind,
            })
        }
        CEvent::Mouse(me) => {
            let (col, row) = (me.column, me.row);
            let mouse_event = match me.kind {
                MouseEventKind::Down(btn) => MouseEvent::Press(convert_button(btn), col, row),
                MouseEventKind::Up(btn) => MouseEvent::Release(convert_button(btn), col, row),
                MouseEventKind::Drag(_) => MouseEvent::Drag(col, row),
                MouseEventKind::Moved => MouseEvent::Moved(col, row),
                MouseEventKind::ScrollUp => MouseEvent::ScrollUp(col, row),
                MouseEventKind::ScrollDown => MouseEvent::ScrollDown(col, row),
                MouseEventKind::ScrollLeft | MouseEventKind::ScrollRight => return None,
            };
            Event::Mouse(mouse_event)
        }
        CEvent::Resize(cols, rows) => Event::Resize(cols, rows),
        CEvent::FocusGained => Event::FocusGained,
        CEvent::FocusLost => Event::FocusLost,
        CEvent::Paste(data) => Event::Paste(data),
    };
    Some(event)
}

/// Convert crossterm key code to our Key type
#[cfg(feature = "tui")]
fn convert_key(code: crossterm::event::KeyCode, mods: crossterm::event::KeyModifiers) -> Key {
    use crossterm::event::{KeyCode, KeyModifiers};

    if let KeyCode::Char(c) = code {
        if mods.contains(KeyModifiers::CONTROL) {
            return Key::Ctrl(c);
        }
        if mods.contains(KeyModifiers::ALT) {
            return Key::Alt(c);
        }
    }

    match code {
        KeyCode::Char(c) => Key::Char(c),
        KeyCode::F(n) => Key::F(n),
        KeyCode::Up => Key::Up,
        KeyCode::Down => Key::Down,
        KeyCode::Left => Key::Left,
        KeyCode::Right => Key::Right,
        KeyCode::Home => Key::Home,
        KeyCode::End => Key::End,
        KeyCode::PageUp => Key::PageUp,
        KeyCode::PageDown => Key::PageDown,
        KeyCode::BackTab => Key::BackTab,
        KeyCode::Backspace => Key::Backspace,
        KeyCode::Delete => Key::Delete,
        KeyCode::Insert => Key::Insert,
        KeyCode::Enter => Key::Enter,
        KeyCode::Tab => Key::Tab,
        KeyCode::Esc => Key::Esc,
        _ => Key::Null,
    }
}
