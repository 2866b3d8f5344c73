//! Dismissal coordination for overlays
//!
//! A [`DismissCoordinator`] owns the three ways an overlay can be asked to
//! close and funnels them into a single intent:
//!
//! - [`DismissTrigger::ExplicitControl`]: the overlay's own close control
//!   activated (through an [`ExplicitControl`] handle).
//! - [`DismissTrigger::EscapeKey`]: Escape pressed while the overlay is the
//!   top-most mounted layer.
//! - [`DismissTrigger::OutsideInteraction`]: a primary pointer press outside
//!   the overlay boundary and every exempt surface. Only when
//!   `close_on_outside_click` is enabled.
//!
//! Triggers are collected while an event is dispatched and emitted by
//! [`DismissCoordinator::flush`], at most one intent per dispatch. The first
//! emitted intent latches the coordinator: later triggers are dropped until
//! the host calls [`DismissCoordinator::rearm`] (only needed when the host
//! keeps the overlay presented after handling a dismissal).
//!
//! The intent goes to the [`DismissRoute`]: either straight to the host's
//! callback, or into an [`AnimationController`] which calls the host back
//! once the exit animation has finished.

use crate::animation::AnimationController;
use crate::error::ParseError;
use crate::event::{Event, Key, KeyKind, MouseEvent};
use crate::handle::RootHandle;
use crate::layer::{LayerGuard, LayerId};
use std::cell::Cell;
use std::fmt;
use std::rc::Rc;
use std::str::FromStr;
use tracing::{debug, trace};

/// Environment variable selecting the escape repeat policy
pub const ESCAPE_REPEAT_ENV: &str = "SHEETKIT_ESCAPE_REPEAT";

/// Origin of a dismissal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DismissTrigger {
    ExplicitControl,
    OutsideInteraction,
    EscapeKey,
}

impl fmt::Display for DismissTrigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DismissTrigger::ExplicitControl => "explicit-control",
            DismissTrigger::OutsideInteraction => "outside-interaction",
            DismissTrigger::EscapeKey => "escape-key",
        };
        f.write_str(name)
    }
}

/// A request that the overlay begin closing now
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DismissIntent {
    /// Which trigger produced the intent
    pub trigger: DismissTrigger,
}

/// How key auto-repeat of Escape is treated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EscapeRepeatPolicy {
    /// Only the initial press counts; repeat events never trigger
    #[default]
    IgnoreRepeats,
    /// Repeat events count as presses. With the latch in place this only
    /// matters after [`DismissCoordinator::rearm`].
    Refire,
}

impl FromStr for EscapeRepeatPolicy {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ignore" | "ignore-repeats" => Ok(EscapeRepeatPolicy::IgnoreRepeats),
            "refire" => Ok(EscapeRepeatPolicy::Refire),
            _ => Err(ParseError::UnknownEscapePolicy(s.to_string())),
        }
    }
}

/// Which triggers are live and how Escape repeats are treated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DismissConfig {
    pub close_on_outside_click: bool,
    pub escape_repeat: EscapeRepeatPolicy,
}

impl Default for DismissConfig {
    fn default() -> Self {
        DismissConfig {
            close_on_outside_click: true,
            escape_repeat: EscapeRepeatPolicy::default(),
        }
    }
}

impl DismissConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults, with the escape policy taken from `SHEETKIT_ESCAPE_REPEAT`
    ///
    /// Unknown values are logged and ignored.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(value) = std::env::var(ESCAPE_REPEAT_ENV) {
            match value.parse() {
                Ok(policy) => config.escape_repeat = policy,
                Err(err) => debug!(%err, "ignoring {}", ESCAPE_REPEAT_ENV),
            }
        }
        config
    }

    pub fn with_close_on_outside_click(mut self, enabled: bool) -> Self {
        self.close_on_outside_click = enabled;
        self
    }

    pub fn with_escape_repeat(mut self, policy: EscapeRepeatPolicy) -> Self {
        self.escape_repeat = policy;
        self
    }
}

/// Where an emitted intent goes
pub enum DismissRoute {
    /// Call the host right away; the host removes the overlay
    Direct(Box<dyn FnMut()>),
    /// Start the exit animation; the controller calls the host when done
    Animated(AnimationController),
}

impl fmt::Debug for DismissRoute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DismissRoute::Direct(_) => f.write_str("Direct(..)"),
            DismissRoute::Animated(anim) => f.debug_tuple("Animated").field(anim).finish(),
        }
    }
}

impl<F> From<F> for DismissRoute
where
    F: FnMut() + 'static,
{
    fn from(callback: F) -> Self {
        DismissRoute::Direct(Box::new(callback))
    }
}

impl From<AnimationController> for DismissRoute {
    fn from(controller: AnimationController) -> Self {
        DismissRoute::Animated(controller)
    }
}

impl DismissRoute {
    fn deliver(&mut self) {
        match self {
            DismissRoute::Direct(callback) => callback(),
            DismissRoute::Animated(controller) => controller.on_dismiss_start(),
        }
    }
}

/// Cloneable handle that raises the explicit-control trigger
///
/// Wire it to the overlay's close control; the raise is picked up on the
/// coordinator's next flush.
#[derive(Debug, Clone, Default)]
pub struct ExplicitControl {
    raised: Rc<Cell<bool>>,
}

impl ExplicitControl {
    pub fn trigger(&self) {
        self.raised.set(true);
    }

    fn take(&self) -> bool {
        self.raised.replace(false)
    }
}

/// Arbitrates the dismissal triggers of one overlay
pub struct DismissCoordinator {
    config: DismissConfig,
    route: DismissRoute,
    layer: Option<LayerGuard>,
    boundary: Option<RootHandle>,
    exempt: Vec<RootHandle>,
    explicit: ExplicitControl,
    pending: Option<DismissTrigger>,
    latched: bool,
    emitted: u32,
}

impl fmt::Debug for DismissCoordinator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DismissCoordinator")
            .field("config", &self.config)
            .field("route", &self.route)
            .field("layer", &self.layer_id())
            .field("latched", &self.latched)
            .field("emitted", &self.emitted)
            .finish()
    }
}

impl DismissCoordinator {
    pub fn new(config: DismissConfig, route: impl Into<DismissRoute>) -> Self {
        DismissCoordinator {
            config,
            route: route.into(),
            layer: None,
            boundary: None,
            exempt: Vec::new(),
            explicit: ExplicitControl::default(),
            pending: None,
            latched: false,
            emitted: 0,
        }
    }

    pub fn config(&self) -> &DismissConfig {
        &self.config
    }

    /// Register as the top-most layer; no-op when already mounted
    ///
    /// Mounting starts a fresh presentation: the latch, any pending trigger
    /// and a raised explicit control left over from before are cleared.
    pub fn mount(&mut self) {
        if self.layer.is_none() {
            self.latched = false;
            self.pending = None;
            self.explicit.take();
            self.layer = Some(LayerGuard::push());
        }
    }

    /// Leave the layer stack
    pub fn unmount(&mut self) {
        self.layer = None;
    }

    pub fn is_mounted(&self) -> bool {
        self.layer.is_some()
    }

    pub fn layer_id(&self) -> Option<LayerId> {
        self.layer.as_ref().map(LayerGuard::id)
    }

    /// Whether Escape presses currently belong to this overlay
    pub fn is_topmost(&self) -> bool {
        self.layer.as_ref().is_some_and(LayerGuard::is_topmost)
    }

    pub fn explicit_control(&self) -> ExplicitControl {
        self.explicit.clone()
    }

    /// Surface whose rendered bounds count as "inside" the overlay
    pub fn set_boundary(&mut self, boundary: RootHandle) {
        self.boundary = Some(boundary);
    }

    /// Presses on this surface are never outside interactions
    pub fn exempt(&mut self, handle: RootHandle) {
        if !self.exempt.iter().any(|h| h.same_surface(&handle)) {
            self.exempt.push(handle);
        }
    }

    pub fn is_enabled(&self, trigger: DismissTrigger) -> bool {
        match trigger {
            DismissTrigger::OutsideInteraction => self.config.close_on_outside_click,
            DismissTrigger::ExplicitControl | DismissTrigger::EscapeKey => true,
        }
    }

    /// Number of intents emitted so far
    pub fn intents_emitted(&self) -> u32 {
        self.emitted
    }

    /// Record any trigger carried by `event`
    pub fn observe(&mut self, event: &Event) {
        let trigger = match event {
            Event::Key(key) if key.key == Key::Esc => self.observe_escape(key.kind),
            Event::Mouse(mouse) if mouse.is_primary_press() => self.observe_press(mouse),
            _ => None,
        };
        if let Some(trigger) = trigger {
            self.record(trigger);
        }
    }

    fn observe_escape(&self, kind: KeyKind) -> Option<DismissTrigger> {
        match (kind, self.config.escape_repeat) {
            (KeyKind::Release, _) => return None,
            (KeyKind::Repeat, EscapeRepeatPolicy::IgnoreRepeats) => {
                trace!("escape repeat suppressed");
                return None;
            }
            _ => {}
        }
        if !self.is_topmost() {
            trace!(layer = ?self.layer_id(), "escape ignored, not top-most");
            return None;
        }
        Some(DismissTrigger::EscapeKey)
    }

    fn observe_press(&self, mouse: &MouseEvent) -> Option<DismissTrigger> {
        if !self.config.close_on_outside_click {
            return None;
        }
        // Nothing rendered yet, so nothing is outside
        let boundary = self.boundary.as_ref()?.bounds()?;
        let (col, row) = mouse.position();
        if boundary.contains(col, row) || self.exempt.iter().any(|h| h.contains(col, row)) {
            return None;
        }
        Some(DismissTrigger::OutsideInteraction)
    }

    fn record(&mut self, trigger: DismissTrigger) {
        // Keep the earliest trigger of the dispatch
        if self.pending.is_none() {
            self.pending = Some(trigger);
        }
    }

    /// Emit at most one intent for everything raised since the last flush
    pub fn flush(&mut self) -> Option<DismissIntent> {
        let explicit = self.explicit.take();
        let trigger = if explicit {
            self.pending.take();
            DismissTrigger::ExplicitControl
        } else {
            self.pending.take()?
        };

        if self.latched {
            trace!(%trigger, "dismiss already requested");
            return None;
        }
        self.latched = true;
        self.emitted += 1;
        debug!(%trigger, layer = ?self.layer_id(), "dismiss intent");
        self.route.deliver();
        Some(DismissIntent { trigger })
    }

    /// [`observe`](Self::observe) followed by [`flush`](Self::flush)
    pub fn handle_event(&mut self, event: &Event) -> Option<DismissIntent> {
        self.observe(event);
        self.flush()
    }

    /// Raise a trigger programmatically
    pub fn request(&mut self, trigger: DismissTrigger) -> Option<DismissIntent> {
        if !self.is_enabled(trigger) {
            trace!(%trigger, "trigger disabled");
            return None;
        }
        match trigger {
            DismissTrigger::ExplicitControl => self.explicit.trigger(),
            _ => self.record(trigger),
        }
        self.flush()
    }

    /// Accept triggers again after an intent was handled without removal
    pub fn rearm(&mut self) {
        self.latched = false;
    }

    pub fn is_latched(&self) -> bool {
        self.latched
    }
}
