//! The contract every game screen satisfies.
//!
//! A state never flips itself. It answers `get_event` and `update` with a
//! `Transition`, and the controller decides when to act on it. `P` is the typed
//! payload handed from the outgoing state's `cleanup` to the incoming state's
//! `startup`.

use std::time::Duration;

use crate::canvas::Canvas;
use crate::input::{InputEvent, InputState};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Transition {
    #[default]
    Continue,
    /// Leave this state for the named one at the start of the next update phase.
    Next(String),
    Quit,
}

impl Transition {
    pub fn next(name: impl Into<String>) -> Self {
        Transition::Next(name.into())
    }
}

/// Bookkeeping shared by every state. Concrete states embed one and expose it
/// through `GameState::base` / `base_mut`.
#[derive(Debug, Default)]
pub struct StateBase<P> {
    pub start_time: Duration,
    pub previous: Option<String>,
    pub persist: P,
}

impl<P: Default> StateBase<P> {
    pub fn new() -> Self {
        Self {
            start_time: Duration::ZERO,
            previous: None,
            persist: P::default(),
        }
    }

    /// Time spent in this state as of `now`.
    pub fn elapsed(&self, now: Duration) -> Duration {
        now.saturating_sub(self.start_time)
    }
}

/// Everything a state may touch during its once-per-frame update.
pub struct UpdateContext<'a> {
    pub canvas: &'a mut dyn Canvas,
    pub input: &'a InputState,
    /// Clock reading taken at the top of this frame.
    pub now: Duration,
    /// Time since the previous frame, capped.
    pub dt: Duration,
}

pub trait GameState<P: Default> {
    fn base(&self) -> &StateBase<P>;
    fn base_mut(&mut self) -> &mut StateBase<P>;

    /// Called for every input event while this state is current.
    fn get_event(&mut self, _event: &InputEvent) -> Transition {
        Transition::Continue
    }

    /// Called exactly once per frame while this state is current.
    fn update(&mut self, ctx: &mut UpdateContext<'_>) -> Transition;

    /// Called once, right after this state becomes current. Overrides that need
    /// the payload should still reset `start_time` (or call `enter`).
    fn startup(&mut self, now: Duration, persist: P) {
        enter(self.base_mut(), now, persist);
    }

    /// Called once, right before this state stops being current. Returns the
    /// payload for the next state.
    fn cleanup(&mut self) -> P {
        std::mem::take(&mut self.base_mut().persist)
    }
}

/// Default `startup` body, usable from overrides.
pub fn enter<P>(base: &mut StateBase<P>, now: Duration, persist: P) {
    base.persist = persist;
    base.start_time = now;
}
