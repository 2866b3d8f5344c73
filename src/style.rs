//! Style resolution for interactive surfaces
//!
//! Maps the small enumerated style intents a surface accepts (corner rounding
//! and pointer cursor) to renderable descriptors. Resolution is pure and
//! deterministic: the same input always produces the same descriptor, and
//! anything unrecognized resolves to the identity descriptor instead of
//! failing.

use crate::error::ParseError;
use crate::theme::BorderChars;
use std::str::FromStr;

/// Largest numeric rounding step
pub const MAX_ROUNDING_STEP: u8 = 8;

/// Radius added per numeric rounding step, in pixels
const RADIUS_STEP_PX: u16 = 4;

/// Radius used for pill shapes, large enough to fully round any edge
const PILL_RADIUS_PX: u16 = 999;

/// Corner rounding intent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rounding {
    /// Numeric step; 0..=8 are recognized
    Step(u8),
    /// Fully circular shape
    Circle,
    /// Capsule shape with semicircular ends
    Pill,
}

impl Default for Rounding {
    fn default() -> Self {
        Rounding::Step(0)
    }
}

impl Rounding {
    /// Every recognized rounding value, in ascending order
    pub fn all() -> impl Iterator<Item = Rounding> {
        (0..=MAX_ROUNDING_STEP)
            .map(Rounding::Step)
            .chain([Rounding::Circle, Rounding::Pill])
    }

    /// Parse a rounding value, returning `None` for unrecognized text
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "circle" => Some(Rounding::Circle),
            "pill" => Some(Rounding::Pill),
            other => other
                .parse::<u8>()
                .ok()
                .filter(|step| *step <= MAX_ROUNDING_STEP)
                .map(Rounding::Step),
        }
    }

    /// Whether this value is one the resolver knows about
    pub fn is_recognized(&self) -> bool {
        match self {
            Rounding::Step(step) => *step <= MAX_ROUNDING_STEP,
            Rounding::Circle | Rounding::Pill => true,
        }
    }

    /// Corner radius in pixels; `None` for circles (half the element size)
    /// and unrecognized steps
    pub fn radius_px(&self) -> Option<u16> {
        resolve_rounding(Some(*self)).radius.px()
    }
}

/// Resolved corner radius
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CornerRadius {
    /// No rounding applied
    None,
    /// Fixed radius in pixels
    Px(u16),
    /// 50% of the element size
    Circle,
    /// Fixed large radius producing semicircular ends
    Pill,
}

impl CornerRadius {
    /// Pixel radius when one exists
    pub fn px(&self) -> Option<u16> {
        match self {
            CornerRadius::Px(px) => Some(*px),
            CornerRadius::Pill => Some(PILL_RADIUS_PX),
            CornerRadius::None | CornerRadius::Circle => None,
        }
    }
}

/// Renderable style for a surface
///
/// `class_name` is the stable style token hosts can key custom styling on.
/// `corners` is the terminal rendition of the radius: square box corners for
/// step 0, rounded box corners for steps 1..=8, and parenthesis caps for the
/// circle and pill shapes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleDescriptor {
    pub class_name: Option<&'static str>,
    pub radius: CornerRadius,
    pub corners: Option<BorderChars>,
}

impl StyleDescriptor {
    /// Descriptor that applies no style at all
    pub fn identity() -> Self {
        StyleDescriptor {
            class_name: None,
            radius: CornerRadius::None,
            corners: None,
        }
    }

    /// Whether this is the identity descriptor
    pub fn is_identity(&self) -> bool {
        *self == Self::identity()
    }
}

impl Default for StyleDescriptor {
    fn default() -> Self {
        Self::identity()
    }
}

const STEP_CLASSES: [&str; 9] = [
    "rounding0",
    "rounding1",
    "rounding2",
    "rounding3",
    "rounding4",
    "rounding5",
    "rounding6",
    "rounding7",
    "rounding8",
];

/// Resolve a rounding intent into a style descriptor
///
/// Absent or unrecognized rounding yields [`StyleDescriptor::identity`].
pub fn resolve_rounding(rounding: Option<Rounding>) -> StyleDescriptor {
    match rounding {
        Some(Rounding::Step(step)) if step <= MAX_ROUNDING_STEP => StyleDescriptor {
            class_name: Some(STEP_CLASSES[step as usize]),
            radius: CornerRadius::Px(step as u16 * RADIUS_STEP_PX),
            corners: Some(if step == 0 {
                BorderChars::single()
            } else {
                BorderChars::rounded()
            }),
        },
        Some(Rounding::Circle) => StyleDescriptor {
            class_name: Some("circle"),
            radius: CornerRadius::Circle,
            corners: Some(BorderChars::caps()),
        },
        Some(Rounding::Pill) => StyleDescriptor {
            class_name: Some("pill"),
            radius: CornerRadius::Pill,
            corners: Some(BorderChars::caps()),
        },
        _ => StyleDescriptor::identity(),
    }
}

/// Resolve a textual rounding value (`"0"`..`"8"`, `"circle"`, `"pill"`)
pub fn resolve_rounding_str(s: &str) -> StyleDescriptor {
    resolve_rounding(Rounding::parse(s))
}

/// Pointer shape shown while hovering an enabled surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MouseCursor {
    Copy,
    Grab,
    Grabbing,
    Move,
    NoDrop,
    #[default]
    Pointer,
    ZoomIn,
    ZoomOut,
}

impl MouseCursor {
    pub const ALL: [MouseCursor; 8] = [
        MouseCursor::Copy,
        MouseCursor::Grab,
        MouseCursor::Grabbing,
        MouseCursor::Move,
        MouseCursor::NoDrop,
        MouseCursor::Pointer,
        MouseCursor::ZoomIn,
        MouseCursor::ZoomOut,
    ];
}

/// Pointer shape name understood by terminals supporting OSC 22
pub fn resolve_cursor(cursor: MouseCursor) -> &'static str {
    match cursor {
        MouseCursor::Copy => "copy",
        MouseCursor::Grab => "grab",
        MouseCursor::Grabbing => "grabbing",
        MouseCursor::Move => "move",
        MouseCursor::NoDrop => "no-drop",
        MouseCursor::Pointer => "pointer",
        MouseCursor::ZoomIn => "zoom-in",
        MouseCursor::ZoomOut => "zoom-out",
    }
}

impl FromStr for MouseCursor {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace(['-', '_'], "");
        MouseCursor::ALL
            .into_iter()
            .find(|cursor| resolve_cursor(*cursor).replace('-', "") == normalized)
            .ok_or_else(|| ParseError::UnknownCursor(s.to_string()))
    }
}
