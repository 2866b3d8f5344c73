//! Typestate builder for [`Sheet`]
//!
//! A sub-heading only makes sense under a heading, so `sub_heading` exists
//! only once `heading` has been called:
//!
//! ```compile_fail
//! use sheetkit::components::sheet::{OverlayIdentity, Sheet};
//! use sheetkit::components::text::Text;
//!
//! let sheet = Sheet::builder(OverlayIdentity::new("Settings sheet", "Close"), || {})
//!     .sub_heading(Box::new(Text::new("orphan")))
//!     .build();
//! ```
//!
//! ```
//! use sheetkit::components::sheet::{OverlayIdentity, Sheet, SheetSize};
//! use sheetkit::components::text::Text;
//!
//! let sheet = Sheet::builder(OverlayIdentity::new("Settings sheet", "Close"), || {})
//!     .heading("Settings")
//!     .sub_heading(Box::new(Text::new("Changes apply immediately")))
//!     .size(SheetSize::Large)
//!     .build();
//! assert_eq!(sheet.size(), SheetSize::Large);
//! ```

use super::{OverlayIdentity, Sheet, SheetSize};
use crate::component::Component;
use crate::dismiss::{DismissConfig, DismissRoute};
use crate::layer::{FixedZIndex, ZIndex};
use std::marker::PhantomData;

/// Builder state: no heading yet
#[derive(Debug)]
pub struct NoHeading;

/// Builder state: heading set, sub-heading allowed
#[derive(Debug)]
pub struct WithHeading;

/// Default stacking order of sheets
pub const SHEET_Z_INDEX: i32 = 100;

pub struct SheetBuilder<H> {
    pub(super) identity: OverlayIdentity,
    pub(super) route: DismissRoute,
    pub(super) heading: Option<String>,
    pub(super) sub_heading: Option<Box<dyn Component>>,
    pub(super) content: Option<Box<dyn Component>>,
    pub(super) footer: Option<Box<dyn Component>>,
    pub(super) size: SheetSize,
    pub(super) config: DismissConfig,
    pub(super) z_index: Box<dyn ZIndex>,
    state: PhantomData<H>,
}

impl SheetBuilder<NoHeading> {
    pub(super) fn new(identity: OverlayIdentity, route: DismissRoute) -> Self {
        SheetBuilder {
            identity,
            route,
            heading: None,
            sub_heading: None,
            content: None,
            footer: None,
            size: SheetSize::default(),
            config: DismissConfig::default(),
            z_index: Box::new(FixedZIndex(SHEET_Z_INDEX)),
            state: PhantomData,
        }
    }

    pub fn heading(self, heading: impl Into<String>) -> SheetBuilder<WithHeading> {
        SheetBuilder {
            identity: self.identity,
            route: self.route,
            heading: Some(heading.into()),
            sub_heading: self.sub_heading,
            content: self.content,
            footer: self.footer,
            size: self.size,
            config: self.config,
            z_index: self.z_index,
            state: PhantomData,
        }
    }
}

impl SheetBuilder<WithHeading> {
    pub fn sub_heading(mut self, sub_heading: Box<dyn Component>) -> Self {
        self.sub_heading = Some(sub_heading);
        self
    }
}

impl<H> SheetBuilder<H> {
    pub fn content(mut self, content: Box<dyn Component>) -> Self {
        self.content = Some(content);
        self
    }

    pub fn footer(mut self, footer: Box<dyn Component>) -> Self {
        self.footer = Some(footer);
        self
    }

    pub fn size(mut self, size: SheetSize) -> Self {
        self.size = size;
        self
    }

    /// Whether a press outside the sheet dismisses it (default true)
    pub fn close_on_outside_click(mut self, enabled: bool) -> Self {
        self.config.close_on_outside_click = enabled;
        self
    }

    /// Replace the whole dismissal configuration
    pub fn config(mut self, config: DismissConfig) -> Self {
        self.config = config;
        self
    }

    pub fn z_index(mut self, z_index: impl ZIndex + 'static) -> Self {
        self.z_index = Box::new(z_index);
        self
    }

    pub fn build(self) -> Sheet {
        Sheet::from_builder(self)
    }
}
