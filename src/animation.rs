//! Animation handoff between dismissal and removal
//!
//! An [`AnimationController`] sits between a sheet's dismissal intent and
//! the host's removal of the sheet from the tree. Instead of removing the
//! sheet right away, the host lets the controller play an exit animation and
//! only removes the sheet when the controller calls its `on_dismiss_end`
//! callback.
//!
//! ```text
//! Idle -> Presenting -> Presented -> Dismissing -> Dismissed
//! ```
//!
//! - `present()` starts the entrance (`Idle -> Presenting`).
//! - The entrance finishing moves to `Presented`.
//! - `on_dismiss_start()` moves to `Dismissing`, once. Further calls while
//!   dismissing or dismissed are no-ops.
//! - The exit finishing moves to `Dismissed` and fires `on_dismiss_end`,
//!   exactly once.
//!
//! Completion is signalled either by [`AnimationController::tick`] (timed
//! animations) or by the host calling [`AnimationController::on_animation_end`].
//! There is no internal timeout: an untimed exit that is never completed
//! leaves the controller in `Dismissing`.
//!
//! With reduced motion there is nothing to wait for, so the entrance
//! completes immediately and dismissal goes straight to `Dismissed`. Zero
//! durations without reduced motion mean the host drives completion through
//! `on_animation_end`.
//!
//! A sheet that is mounted again after removal needs its controller back in
//! `Idle`; [`AnimationController::reset`] does that and keeps the removal
//! callback for the next cycle.

use crate::a11y::AccessibilitySettings;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use std::time::Duration;
use tracing::{debug, trace};

/// Callback fired when the exit animation has finished
pub type OnDismissEnd = Box<dyn FnMut()>;

/// Phase of the presentation lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AnimationPhase {
    #[default]
    Idle,
    Presenting,
    Presented,
    Dismissing,
    Dismissed,
}

/// Durations of the entrance and exit animations
///
/// A zero duration means "no timer": the phase either completes at once
/// (when reduced motion is on) or waits for
/// [`AnimationController::on_animation_end`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnimationTiming {
    pub enter: Duration,
    pub exit: Duration,
}

impl AnimationTiming {
    /// Both phases driven externally through `on_animation_end`
    pub const EXTERNAL: AnimationTiming = AnimationTiming {
        enter: Duration::ZERO,
        exit: Duration::ZERO,
    };

    pub const fn new(enter: Duration, exit: Duration) -> Self {
        AnimationTiming { enter, exit }
    }
}

impl Default for AnimationTiming {
    /// Slide timings used by the sheet
    fn default() -> Self {
        AnimationTiming::new(Duration::from_millis(300), Duration::from_millis(300))
    }
}

struct ControllerState {
    phase: AnimationPhase,
    timing: AnimationTiming,
    elapsed: Duration,
    reduced_motion: bool,
    on_dismiss_end: Option<OnDismissEnd>,
    completions: u32,
}

impl ControllerState {
    fn set_phase(&mut self, phase: AnimationPhase) {
        debug!(from = ?self.phase, to = ?phase, "animation phase");
        self.phase = phase;
        self.elapsed = Duration::ZERO;
    }

    fn phase_duration(&self) -> Duration {
        match self.phase {
            AnimationPhase::Presenting => self.timing.enter,
            AnimationPhase::Dismissing => self.timing.exit,
            _ => Duration::ZERO,
        }
    }

    /// Finish the running phase; returns the removal callback to invoke.
    /// The caller hands it back through [`ControllerState::restore`].
    fn complete(&mut self) -> Option<OnDismissEnd> {
        match self.phase {
            AnimationPhase::Presenting => {
                self.set_phase(AnimationPhase::Presented);
                None
            }
            AnimationPhase::Dismissing => {
                self.set_phase(AnimationPhase::Dismissed);
                self.completions += 1;
                self.on_dismiss_end.take()
            }
            _ => None,
        }
    }

    fn restore(&mut self, callback: OnDismissEnd) {
        if self.on_dismiss_end.is_none() {
            self.on_dismiss_end = Some(callback);
        }
    }
}

/// Shared handle to one sheet's presentation lifecycle
///
/// Clones share state; give one to the sheet (as its dismiss route) and
/// keep one in the host loop to drive `tick` or `on_animation_end`.
#[derive(Clone)]
pub struct AnimationController {
    state: Rc<RefCell<ControllerState>>,
}

impl fmt::Debug for AnimationController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("AnimationController")
            .field("phase", &state.phase)
            .field("timing", &state.timing)
            .field("reduced_motion", &state.reduced_motion)
            .field("completions", &state.completions)
            .finish()
    }
}

impl AnimationController {
    /// Create a controller with default slide timings
    pub fn new<F>(on_dismiss_end: F) -> Self
    where
        F: FnMut() + 'static,
    {
        AnimationController {
            state: Rc::new(RefCell::new(ControllerState {
                phase: AnimationPhase::Idle,
                timing: AnimationTiming::default(),
                elapsed: Duration::ZERO,
                reduced_motion: false,
                on_dismiss_end: Some(Box::new(on_dismiss_end)),
                completions: 0,
            })),
        }
    }

    /// Create a controller honouring the user's motion preference
    pub fn from_settings<F>(settings: &AccessibilitySettings, on_dismiss_end: F) -> Self
    where
        F: FnMut() + 'static,
    {
        Self::new(on_dismiss_end).with_reduced_motion(settings.prefer_reduced_motion)
    }

    pub fn with_timing(self, timing: AnimationTiming) -> Self {
        self.state.borrow_mut().timing = timing;
        self
    }

    pub fn with_reduced_motion(self, reduced: bool) -> Self {
        self.state.borrow_mut().reduced_motion = reduced;
        self
    }

    pub fn phase(&self) -> AnimationPhase {
        self.state.borrow().phase
    }

    /// Whether the removal callback has fired
    pub fn is_removed(&self) -> bool {
        self.phase() == AnimationPhase::Dismissed
    }

    /// How many times the removal callback fired; at most once per
    /// presentation
    pub fn completions(&self) -> u32 {
        self.state.borrow().completions
    }

    /// Start the entrance animation
    ///
    /// Only meaningful from `Idle`; skipped straight to `Presented` under
    /// reduced motion.
    pub fn present(&self) {
        let mut state = self.state.borrow_mut();
        if state.phase != AnimationPhase::Idle {
            trace!(phase = ?state.phase, "present ignored");
            return;
        }
        if state.reduced_motion {
            state.set_phase(AnimationPhase::Presented);
        } else {
            state.set_phase(AnimationPhase::Presenting);
        }
    }

    /// Begin the exit animation in response to a dismissal intent
    ///
    /// Idempotent: once dismissing or dismissed, further calls change
    /// nothing and never fire the removal callback again.
    pub fn on_dismiss_start(&self) {
        let callback = {
            let mut state = self.state.borrow_mut();
            match state.phase {
                AnimationPhase::Dismissing | AnimationPhase::Dismissed => {
                    trace!(phase = ?state.phase, "dismiss already in progress");
                    return;
                }
                AnimationPhase::Idle => {
                    // Never shown; nothing to animate out
                    state.set_phase(AnimationPhase::Dismissing);
                    state.complete()
                }
                AnimationPhase::Presenting | AnimationPhase::Presented => {
                    state.set_phase(AnimationPhase::Dismissing);
                    if state.reduced_motion {
                        state.complete()
                    } else {
                        None
                    }
                }
            }
        };
        self.fire(callback);
    }

    // Runs outside the borrow so the callback may use this controller
    fn fire(&self, callback: Option<OnDismissEnd>) {
        if let Some(mut callback) = callback {
            callback();
            self.state.borrow_mut().restore(callback);
        }
    }

    /// Return a removed controller to `Idle` so it can be presented again
    ///
    /// No-op in every other phase. The removal callback is kept.
    pub fn reset(&self) {
        let mut state = self.state.borrow_mut();
        if state.phase == AnimationPhase::Dismissed {
            state.set_phase(AnimationPhase::Idle);
        }
    }

    /// Signal that the running animation finished
    pub fn on_animation_end(&self) {
        let callback = self.state.borrow_mut().complete();
        self.fire(callback);
    }

    /// Advance timed animations by `dt`, completing phases whose duration
    /// has elapsed; returns the phase afterwards
    pub fn tick(&self, dt: Duration) -> AnimationPhase {
        let callback = {
            let mut state = self.state.borrow_mut();
            let duration = state.phase_duration();
            if duration.is_zero() {
                return state.phase;
            }
            state.elapsed = state.elapsed.saturating_add(dt);
            if state.elapsed >= duration {
                state.complete()
            } else {
                None
            }
        };
        self.fire(callback);
        self.phase()
    }

    /// Visible fraction of the sheet, from 0.0 (hidden) to 1.0 (fully in)
    pub fn progress(&self) -> f32 {
        let state = self.state.borrow();
        let fraction = |duration: Duration| {
            if duration.is_zero() {
                0.0
            } else {
                (state.elapsed.as_secs_f32() / duration.as_secs_f32()).min(1.0)
            }
        };
        match state.phase {
            AnimationPhase::Idle | AnimationPhase::Dismissed => 0.0,
            AnimationPhase::Presented => 1.0,
            AnimationPhase::Presenting => fraction(state.timing.enter),
            AnimationPhase::Dismissing => 1.0 - fraction(state.timing.exit),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn counting() -> (Rc<Cell<u32>>, impl FnMut() + 'static) {
        let count = Rc::new(Cell::new(0));
        let inner = count.clone();
        (count, move || inner.set(inner.get() + 1))
    }

    #[test]
    fn test_full_lifecycle_with_external_completion() {
        let (removed, on_end) = counting();
        let anim = AnimationController::new(on_end).with_timing(AnimationTiming::EXTERNAL);

        assert_eq!(anim.phase(), AnimationPhase::Idle);
        anim.present();
        assert_eq!(anim.phase(), AnimationPhase::Presenting);
        anim.on_animation_end();
        assert_eq!(anim.phase(), AnimationPhase::Presented);

        anim.on_dismiss_start();
        assert_eq!(anim.phase(), AnimationPhase::Dismissing);
        assert_eq!(removed.get(), 0);

        anim.on_animation_end();
        assert_eq!(anim.phase(), AnimationPhase::Dismissed);
        assert_eq!(removed.get(), 1);
        assert!(anim.is_removed());
    }

    #[test]
    fn test_repeated_dismiss_is_idempotent() {
        let (removed, on_end) = counting();
        let anim = AnimationController::new(on_end).with_timing(AnimationTiming::EXTERNAL);
        anim.present();
        anim.on_animation_end();

        anim.on_dismiss_start();
        anim.on_dismiss_start();
        assert_eq!(anim.phase(), AnimationPhase::Dismissing);

        anim.on_animation_end();
        anim.on_animation_end();
        anim.on_dismiss_start();
        assert_eq!(removed.get(), 1);
        assert_eq!(anim.completions(), 1);
    }

    #[test]
    fn test_no_removal_without_completion_signal() {
        let (removed, on_end) = counting();
        let anim = AnimationController::new(on_end).with_timing(AnimationTiming::EXTERNAL);
        anim.present();
        anim.on_dismiss_start();

        // Untimed exit never completes on its own
        anim.tick(Duration::from_secs(60));
        assert_eq!(anim.phase(), AnimationPhase::Dismissing);
        assert_eq!(removed.get(), 0);
    }

    #[test]
    fn test_timed_animation_completes_on_tick() {
        let (removed, on_end) = counting();
        let anim = AnimationController::new(on_end).with_timing(AnimationTiming::new(
            Duration::from_millis(100),
            Duration::from_millis(200),
        ));

        anim.present();
        assert_eq!(anim.tick(Duration::from_millis(50)), AnimationPhase::Presenting);
        assert!((anim.progress() - 0.5).abs() < 1e-6);
        assert_eq!(anim.tick(Duration::from_millis(50)), AnimationPhase::Presented);
        assert_eq!(anim.progress(), 1.0);

        anim.on_dismiss_start();
        anim.tick(Duration::from_millis(50));
        assert!((anim.progress() - 0.75).abs() < 1e-6);
        assert_eq!(removed.get(), 0);

        anim.tick(Duration::from_millis(150));
        assert_eq!(anim.phase(), AnimationPhase::Dismissed);
        assert_eq!(removed.get(), 1);
    }

    #[test]
    fn test_dismiss_during_entrance() {
        let (removed, on_end) = counting();
        let anim = AnimationController::new(on_end);
        anim.present();
        anim.tick(Duration::from_millis(10));

        anim.on_dismiss_start();
        assert_eq!(anim.phase(), AnimationPhase::Dismissing);
        anim.tick(Duration::from_secs(1));
        assert_eq!(removed.get(), 1);
    }

    #[test]
    fn test_reduced_motion_skips_animations() {
        let (removed, on_end) = counting();
        let anim = AnimationController::from_settings(&AccessibilitySettings::reduced_motion(), on_end);

        anim.present();
        assert_eq!(anim.phase(), AnimationPhase::Presented);

        anim.on_dismiss_start();
        assert_eq!(anim.phase(), AnimationPhase::Dismissed);
        assert_eq!(removed.get(), 1);
    }

    #[test]
    fn test_reset_allows_second_presentation() {
        let (removed, on_end) = counting();
        let anim = AnimationController::new(on_end).with_timing(AnimationTiming::EXTERNAL);

        anim.reset();
        assert_eq!(anim.phase(), AnimationPhase::Idle);
        anim.present();
        anim.reset();
        assert_eq!(anim.phase(), AnimationPhase::Presenting);

        anim.on_animation_end();
        anim.on_dismiss_start();
        anim.on_animation_end();
        assert!(anim.is_removed());

        anim.reset();
        assert_eq!(anim.phase(), AnimationPhase::Idle);
        assert_eq!(anim.progress(), 0.0);
        anim.present();
        anim.on_animation_end();
        anim.on_dismiss_start();
        anim.on_animation_end();
        assert_eq!(removed.get(), 2);
        assert_eq!(anim.completions(), 2);
    }

    #[test]
    fn test_callback_may_reenter_controller() {
        let slot: Rc<RefCell<Option<AnimationController>>> = Rc::new(RefCell::new(None));
        let seen = Rc::new(Cell::new(AnimationPhase::Idle));

        let (slot_cb, seen_cb) = (slot.clone(), seen.clone());
        let anim = AnimationController::new(move || {
            if let Some(anim) = slot_cb.borrow().as_ref() {
                seen_cb.set(anim.phase());
                anim.on_dismiss_start();
            }
        })
        .with_reduced_motion(true);
        *slot.borrow_mut() = Some(anim.clone());

        anim.present();
        anim.on_dismiss_start();
        assert_eq!(seen.get(), AnimationPhase::Dismissed);
        assert_eq!(anim.completions(), 1);
    }
}
