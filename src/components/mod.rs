//! Built-in UI components

pub mod sheet;
pub mod text;
pub mod touchable;

pub use sheet::{OverlayIdentity, Sheet, SheetBuilder, SheetSize};
pub use text::{Text, TextAlign, TextVariant};
pub use touchable::{ActivationEvent, FocusEvent, Touchable};
