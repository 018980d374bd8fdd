//! Finite-state controller that owns the main loop.
//!
//! Every frame runs in a fixed order:
//!
//!   1. `event_loop()` -- fold each event into the input snapshot and forward it to
//!      the current state's `get_event`, recording the `Transition` it answers
//!   2. a pending quit stops the controller; no `update` runs
//!   3. a pending `Next` runs `flip_state()`: cleanup old, startup new
//!   4. the (possibly new) current state's `update` runs exactly once
//!   5. the host presents the frame, then `end_frame()` paces to the target FPS
//!
//! Steps 1-4 are `run_frame()`. `main()` drives the whole loop over a `Host`; the
//! game binary calls `run_frame()` / `end_frame()` from its winit handler instead.

use std::collections::HashMap;
use std::time::Duration;

use crate::canvas::Canvas;
use crate::error::ControlError;
use crate::input::{InputEvent, InputState, Key};
use crate::state::{GameState, Transition, UpdateContext};
use crate::time::{frame_delta, Clock, FrameLimiter, SystemClock};

#[derive(Debug, Clone)]
pub struct ControlConfig {
    pub caption: String,
    pub fps: u32,
    pub show_fps: bool,
    /// Key that flips FPS display in the caption.
    pub fps_toggle_key: Key,
}

impl Default for ControlConfig {
    fn default() -> Self {
        Self {
            caption: "Sunfall".to_string(),
            fps: 60,
            show_fps: true,
            fps_toggle_key: Key::F5,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameStatus {
    Running,
    Stopped,
}

/// Platform side of the loop used by `Control::main`.
pub trait Host {
    /// Drain every event that arrived since the last call.
    fn poll_events(&mut self) -> Vec<InputEvent>;
    fn canvas(&mut self) -> &mut dyn Canvas;
    fn present(&mut self);
    fn set_caption(&mut self, caption: &str);
}

/// Transition requested by the current state and not yet acted on.
#[derive(Debug, Default)]
struct Pending {
    next: Option<String>,
    quit: bool,
}

impl Pending {
    fn record(&mut self, transition: Transition) {
        match transition {
            Transition::Continue => {}
            Transition::Next(name) => self.next = Some(name),
            Transition::Quit => self.quit = true,
        }
    }
}

pub struct Control<P: Default + 'static, C: Clock = SystemClock> {
    config: ControlConfig,
    states: HashMap<String, Box<dyn GameState<P>>>,
    state_name: Option<String>,
    pending: Pending,
    running: bool,
    input: InputState,
    clock: C,
    limiter: FrameLimiter,
    last_frame_start: Option<Duration>,
}

impl<P: Default + 'static> Control<P, SystemClock> {
    pub fn new(config: ControlConfig) -> Self {
        Self::with_clock(config, SystemClock::new())
    }
}

impl<P: Default + 'static, C: Clock> Control<P, C> {
    pub fn with_clock(config: ControlConfig, clock: C) -> Self {
        let limiter = FrameLimiter::new(config.fps);
        Self {
            config,
            states: HashMap::new(),
            state_name: None,
            pending: Pending::default(),
            running: true,
            input: InputState::new(),
            clock,
            limiter,
            last_frame_start: None,
        }
    }

    /// Register every state and make `start_state` current, calling its
    /// `startup` with the default payload.
    pub fn setup_states<S, I>(&mut self, states: I, start_state: &str) -> Result<(), ControlError>
    where
        S: Into<String>,
        I: IntoIterator<Item = (S, Box<dyn GameState<P>>)>,
    {
        let mut registry: HashMap<String, Box<dyn GameState<P>>> = HashMap::new();
        for (name, state) in states {
            let name = name.into();
            if registry.contains_key(&name) {
                return Err(ControlError::DuplicateState(name));
            }
            registry.insert(name, state);
        }

        let Some(start) = registry.get_mut(start_state) else {
            return Err(ControlError::UnknownStartState(start_state.to_string()));
        };
        start.startup(self.clock.now(), P::default());

        log::info!(
            "Registered {} states, starting in '{}'",
            registry.len(),
            start_state
        );
        self.states = registry;
        self.state_name = Some(start_state.to_string());
        self.pending = Pending::default();
        self.running = true;
        Ok(())
    }

    /// Steps 1-4 of a frame. The clock is read once, here.
    pub fn run_frame<I>(&mut self, events: I, canvas: &mut dyn Canvas) -> Result<FrameStatus, ControlError>
    where
        I: IntoIterator<Item = InputEvent>,
    {
        if self.state_name.is_none() {
            return Err(ControlError::NotSetUp);
        }
        if !self.running {
            return Ok(FrameStatus::Stopped);
        }

        let now = self.clock.now();
        let dt = match self.last_frame_start {
            Some(previous) => frame_delta(previous, now),
            None => Duration::ZERO,
        };
        self.last_frame_start = Some(now);

        self.event_loop(events)?;
        self.update(canvas, now, dt)
    }

    /// Dispatch events to the current state. Stops forwarding as soon as a quit
    /// is pending.
    pub fn event_loop<I>(&mut self, events: I) -> Result<(), ControlError>
    where
        I: IntoIterator<Item = InputEvent>,
    {
        for event in events {
            if self.pending.quit {
                break;
            }
            self.input.apply(&event);
            if event == InputEvent::KeyDown(self.config.fps_toggle_key) {
                self.toggle_show_fps();
            }
            if event == InputEvent::Quit {
                log::info!("Quit event received");
                self.pending.quit = true;
            }

            log::trace!("Dispatching {:?}", event);
            let transition = self.current_state_mut()?.get_event(&event);
            self.pending.record(transition);
        }
        Ok(())
    }

    /// Act on the pending transition, then run the current state's update on a
    /// freshly begun canvas frame.
    pub fn update(
        &mut self,
        canvas: &mut dyn Canvas,
        now: Duration,
        dt: Duration,
    ) -> Result<FrameStatus, ControlError> {
        if self.pending.quit {
            self.stop();
            return Ok(FrameStatus::Stopped);
        }
        if self.pending.next.is_some() {
            self.flip_state(now)?;
        }

        let input = &self.input;
        let Some(state) = self
            .state_name
            .as_deref()
            .and_then(|name| self.states.get_mut(name))
        else {
            return Err(ControlError::NotSetUp);
        };
        canvas.begin_frame();
        let mut ctx = UpdateContext {
            canvas,
            input,
            now,
            dt,
        };
        let transition = state.update(&mut ctx);
        self.pending.record(transition);

        // A quit raised during update ends the loop after this frame is presented.
        if self.pending.quit {
            self.stop();
            return Ok(FrameStatus::Stopped);
        }
        Ok(FrameStatus::Running)
    }

    /// Switch to the pending `Next` state. The target is resolved before anything
    /// is touched, so an unknown name leaves the controller exactly as it was.
    pub fn flip_state(&mut self, now: Duration) -> Result<(), ControlError> {
        let Some(next) = self.pending.next.clone() else {
            return Ok(());
        };
        let Some(previous) = self.state_name.clone() else {
            return Err(ControlError::NotSetUp);
        };
        if !self.states.contains_key(&next) {
            log::error!(
                "State '{}' requested transition to unregistered state '{}'",
                previous,
                next
            );
            return Err(ControlError::UnknownState {
                from: previous,
                to: next,
            });
        }

        let persist = self.current_state_mut()?.cleanup();
        self.pending = Pending::default();
        self.state_name = Some(next.clone());

        let incoming = self.current_state_mut()?;
        incoming.startup(now, persist);
        incoming.base_mut().previous = Some(previous.clone());

        log::info!("State transition: {} -> {}", previous, next);
        Ok(())
    }

    /// Step 5: clear edge-triggered input and sleep out the rest of the frame.
    pub fn end_frame(&mut self) -> Duration {
        self.input.end_frame();
        self.limiter.tick(&mut self.clock)
    }

    pub fn toggle_show_fps(&mut self) {
        self.config.show_fps = !self.config.show_fps;
        log::debug!("FPS display: {}", if self.config.show_fps { "ON" } else { "OFF" });
    }

    /// Window title for this frame.
    pub fn caption(&self) -> String {
        if self.config.show_fps {
            format!("{} - {:.2} FPS", self.config.caption, self.limiter.smoothed_fps)
        } else {
            self.config.caption.clone()
        }
    }

    /// Run frames until the current state quits or the host reports a quit event.
    pub fn main<H: Host>(&mut self, host: &mut H) -> Result<(), ControlError> {
        let mut last_caption = String::new();
        loop {
            let events = host.poll_events();
            let status = self.run_frame(events, host.canvas())?;
            host.present();
            if status == FrameStatus::Stopped {
                break;
            }
            self.end_frame();

            let caption = self.caption();
            if caption != last_caption {
                host.set_caption(&caption);
                last_caption = caption;
            }
        }
        log::info!("Main loop finished after {} frames", self.limiter.frame_count);
        Ok(())
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn show_fps(&self) -> bool {
        self.config.show_fps
    }

    pub fn state_name(&self) -> Option<&str> {
        self.state_name.as_deref()
    }

    pub fn state(&self, name: &str) -> Option<&dyn GameState<P>> {
        self.states.get(name).map(|state| state.as_ref())
    }

    pub fn current_state(&self) -> Option<&dyn GameState<P>> {
        self.state_name.as_deref().and_then(|name| self.state(name))
    }

    pub fn input(&self) -> &InputState {
        &self.input
    }

    pub fn limiter(&self) -> &FrameLimiter {
        &self.limiter
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    fn current_state_mut(&mut self) -> Result<&mut Box<dyn GameState<P>>, ControlError> {
        self.state_name
            .as_deref()
            .and_then(|name| self.states.get_mut(name))
            .ok_or(ControlError::NotSetUp)
    }

    fn stop(&mut self) {
        if self.running {
            log::info!(
                "Stopping in state '{}'",
                self.state_name.as_deref().unwrap_or("<none>")
            );
        }
        self.running = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::{Color, DrawList};
    use crate::input::MouseBtn;
    use crate::state::StateBase;
    use crate::time::ManualClock;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Payload that records which states handed it along.
    #[derive(Debug, Default, Clone, PartialEq)]
    struct Trail {
        visited: Vec<String>,
    }

    type CallLog = Rc<RefCell<Vec<String>>>;

    /// Space -> Next(target), Escape -> Quit, Q during update -> Quit.
    struct Scripted {
        name: &'static str,
        target: &'static str,
        base: StateBase<Trail>,
        log: CallLog,
        quit_on_update: bool,
    }

    impl Scripted {
        fn boxed(name: &'static str, target: &'static str, log: &CallLog) -> Box<dyn GameState<Trail>> {
            Box::new(Self {
                name,
                target,
                base: StateBase::new(),
                log: log.clone(),
                quit_on_update: false,
            })
        }

        fn record(&self, call: &str) {
            self.log.borrow_mut().push(format!("{}.{}", self.name, call));
        }
    }

    impl GameState<Trail> for Scripted {
        fn base(&self) -> &StateBase<Trail> {
            &self.base
        }

        fn base_mut(&mut self) -> &mut StateBase<Trail> {
            &mut self.base
        }

        fn get_event(&mut self, event: &InputEvent) -> Transition {
            self.record("get_event");
            match event {
                InputEvent::KeyDown(Key::Space) => Transition::next(self.target),
                InputEvent::KeyDown(Key::Escape) => Transition::Quit,
                InputEvent::KeyDown(Key::R) => {
                    self.quit_on_update = true;
                    Transition::Continue
                }
                _ => Transition::Continue,
            }
        }

        fn update(&mut self, ctx: &mut UpdateContext<'_>) -> Transition {
            self.record("update");
            ctx.canvas.fill(Color::BLACK);
            if self.quit_on_update {
                Transition::Quit
            } else {
                Transition::Continue
            }
        }

        fn startup(&mut self, now: Duration, persist: Trail) {
            self.record("startup");
            crate::state::enter(&mut self.base, now, persist);
        }

        fn cleanup(&mut self) -> Trail {
            self.record("cleanup");
            let mut persist = std::mem::take(&mut self.base.persist);
            persist.visited.push(self.name.to_string());
            persist
        }
    }

    fn two_state_control(log: &CallLog) -> Control<Trail, ManualClock> {
        let mut control = Control::with_clock(ControlConfig::default(), ManualClock::new());
        control
            .setup_states(
                [("A", Scripted::boxed("A", "B", log)), ("B", Scripted::boxed("B", "A", log))],
                "A",
            )
            .expect("valid state graph");
        log.borrow_mut().clear();
        control
    }

    fn calls(log: &CallLog) -> Vec<String> {
        log.borrow().clone()
    }

    #[test]
    fn setup_starts_initial_state_with_default_payload() {
        let log = CallLog::default();
        let mut control: Control<Trail, ManualClock> =
            Control::with_clock(ControlConfig::default(), ManualClock::new());
        control
            .setup_states([("A", Scripted::boxed("A", "B", &log))], "A")
            .expect("setup");
        assert_eq!(calls(&log), vec!["A.startup"]);
        assert_eq!(control.state_name(), Some("A"));
        let state = control.current_state().expect("current state");
        assert_eq!(state.base().persist, Trail::default());
        assert_eq!(state.base().previous, None);
    }

    #[test]
    fn setup_rejects_unknown_start_state() {
        let log = CallLog::default();
        let mut control: Control<Trail, ManualClock> =
            Control::with_clock(ControlConfig::default(), ManualClock::new());
        let err = control
            .setup_states([("A", Scripted::boxed("A", "B", &log))], "MENU")
            .expect_err("unknown start");
        assert_eq!(err, ControlError::UnknownStartState("MENU".to_string()));
        assert!(calls(&log).is_empty());
    }

    #[test]
    fn setup_rejects_duplicate_names() {
        let log = CallLog::default();
        let mut control: Control<Trail, ManualClock> =
            Control::with_clock(ControlConfig::default(), ManualClock::new());
        let err = control
            .setup_states(
                [("A", Scripted::boxed("A", "B", &log)), ("A", Scripted::boxed("A", "B", &log))],
                "A",
            )
            .expect_err("duplicate");
        assert_eq!(err, ControlError::DuplicateState("A".to_string()));
    }

    #[test]
    fn run_frame_before_setup_fails() {
        let mut control: Control<Trail, ManualClock> =
            Control::with_clock(ControlConfig::default(), ManualClock::new());
        let mut canvas = DrawList::new(4, 4);
        let err = control
            .run_frame(Vec::new(), &mut canvas)
            .expect_err("not set up");
        assert_eq!(err, ControlError::NotSetUp);
    }

    #[test]
    fn key_press_transitions_on_the_same_frame() {
        let log = CallLog::default();
        let mut control = two_state_control(&log);
        let mut canvas = DrawList::new(4, 4);

        let status = control
            .run_frame([InputEvent::KeyDown(Key::Space)], &mut canvas)
            .expect("frame");
        assert_eq!(status, FrameStatus::Running);
        assert_eq!(
            calls(&log),
            vec!["A.get_event", "A.cleanup", "B.startup", "B.update"]
        );
        assert_eq!(control.state_name(), Some("B"));

        let b = control.state("B").expect("B registered");
        assert_eq!(b.base().previous.as_deref(), Some("A"));
        assert_eq!(b.base().persist.visited, vec!["A".to_string()]);
    }

    #[test]
    fn persist_payload_round_trips_across_transitions() {
        let log = CallLog::default();
        let mut control = two_state_control(&log);
        let mut canvas = DrawList::new(4, 4);

        for _ in 0..3 {
            control
                .run_frame([InputEvent::KeyDown(Key::Space)], &mut canvas)
                .expect("frame");
            control.end_frame();
        }
        // A -> B -> A -> B: each cleanup appended its name to the same payload.
        assert_eq!(control.state_name(), Some("B"));
        let b = control.state("B").expect("B registered");
        assert_eq!(b.base().persist.visited, vec!["A", "B", "A"]);
        assert_eq!(b.base().previous.as_deref(), Some("A"));
    }

    #[test]
    fn exactly_one_update_per_frame() {
        let log = CallLog::default();
        let mut control = two_state_control(&log);
        let mut canvas = DrawList::new(4, 4);

        control
            .run_frame(
                [
                    InputEvent::KeyDown(Key::W),
                    InputEvent::KeyUp(Key::W),
                    InputEvent::KeyDown(Key::Space),
                ],
                &mut canvas,
            )
            .expect("frame");
        let log = calls(&log);
        let updates: Vec<_> = log.iter().filter(|c| c.ends_with(".update")).collect();
        assert_eq!(updates, vec!["B.update"]);
        // Every event went to A, which was current while events were drained.
        assert_eq!(log.iter().filter(|c| *c == "A.get_event").count(), 3);
        assert!(!log.iter().any(|c| c == "B.get_event"));
    }

    #[test]
    fn reentered_state_starts_without_pending_transition() {
        let log = CallLog::default();
        let mut control = two_state_control(&log);
        let mut canvas = DrawList::new(4, 4);

        control
            .run_frame([InputEvent::KeyDown(Key::Space)], &mut canvas)
            .expect("A -> B");
        control.end_frame();
        control
            .run_frame([InputEvent::KeyDown(Key::Space)], &mut canvas)
            .expect("B -> A");
        control.end_frame();
        assert_eq!(control.state_name(), Some("A"));

        log.borrow_mut().clear();
        control.run_frame(Vec::new(), &mut canvas).expect("idle frame");
        assert_eq!(control.state_name(), Some("A"));
        assert_eq!(calls(&log), vec!["A.update"]);
    }

    #[test]
    fn unknown_target_fails_without_touching_either_state() {
        let log = CallLog::default();
        let mut control: Control<Trail, ManualClock> =
            Control::with_clock(ControlConfig::default(), ManualClock::new());
        control
            .setup_states(
                [("A", Scripted::boxed("A", "MENU", &log)), ("B", Scripted::boxed("B", "A", &log))],
                "A",
            )
            .expect("setup");
        log.borrow_mut().clear();
        let mut canvas = DrawList::new(4, 4);

        let err = control
            .run_frame([InputEvent::KeyDown(Key::Space)], &mut canvas)
            .expect_err("MENU is not registered");
        assert_eq!(
            err,
            ControlError::UnknownState {
                from: "A".to_string(),
                to: "MENU".to_string()
            }
        );
        assert_eq!(control.state_name(), Some("A"));
        assert_eq!(calls(&log), vec!["A.get_event"]);
        assert_eq!(control.state("B").expect("B").base().previous, None);
    }

    #[test]
    fn quit_from_get_event_skips_update_and_stops() {
        let log = CallLog::default();
        let mut control = two_state_control(&log);
        let mut canvas = DrawList::new(4, 4);

        let status = control
            .run_frame(
                [InputEvent::KeyDown(Key::Escape), InputEvent::KeyDown(Key::Space)],
                &mut canvas,
            )
            .expect("frame");
        assert_eq!(status, FrameStatus::Stopped);
        assert!(!control.is_running());
        // The event after the quit is never dispatched and nothing updates.
        assert_eq!(calls(&log), vec!["A.get_event"]);

        let status = control
            .run_frame([InputEvent::KeyDown(Key::Space)], &mut canvas)
            .expect("stopped frame");
        assert_eq!(status, FrameStatus::Stopped);
        assert_eq!(calls(&log), vec!["A.get_event"]);
    }

    #[test]
    fn quit_beats_a_pending_transition() {
        let log = CallLog::default();
        let mut control = two_state_control(&log);
        let mut canvas = DrawList::new(4, 4);

        let status = control
            .run_frame(
                [InputEvent::KeyDown(Key::Space), InputEvent::KeyDown(Key::Escape)],
                &mut canvas,
            )
            .expect("frame");
        assert_eq!(status, FrameStatus::Stopped);
        assert_eq!(control.state_name(), Some("A"));
        assert!(!calls(&log).iter().any(|c| c == "A.cleanup"));
    }

    #[test]
    fn window_quit_event_is_forwarded_then_stops() {
        let log = CallLog::default();
        let mut control = two_state_control(&log);
        let mut canvas = DrawList::new(4, 4);

        let status = control
            .run_frame([InputEvent::Quit], &mut canvas)
            .expect("frame");
        assert_eq!(status, FrameStatus::Stopped);
        assert_eq!(calls(&log), vec!["A.get_event"]);
    }

    #[test]
    fn quit_from_update_stops_before_next_dispatch() {
        let log = CallLog::default();
        let mut control = two_state_control(&log);
        let mut canvas = DrawList::new(4, 4);

        let status = control
            .run_frame([InputEvent::KeyDown(Key::R)], &mut canvas)
            .expect("frame");
        assert_eq!(status, FrameStatus::Stopped);
        assert_eq!(calls(&log), vec!["A.get_event", "A.update"]);

        control
            .run_frame([InputEvent::KeyDown(Key::Space)], &mut canvas)
            .expect("stopped frame");
        assert_eq!(calls(&log), vec!["A.get_event", "A.update"]);
    }

    /// Draws a single rect per frame and never fills the background.
    #[derive(Default)]
    struct RectOnly {
        base: StateBase<Trail>,
    }

    impl GameState<Trail> for RectOnly {
        fn base(&self) -> &StateBase<Trail> {
            &self.base
        }

        fn base_mut(&mut self) -> &mut StateBase<Trail> {
            &mut self.base
        }

        fn update(&mut self, ctx: &mut UpdateContext<'_>) -> Transition {
            ctx.canvas
                .fill_rect(crate::canvas::Rect::new(0.0, 0.0, 2.0, 2.0), Color::WHITE);
            Transition::Continue
        }
    }

    #[test]
    fn recorded_frame_does_not_accumulate_without_fill() {
        let mut control: Control<Trail, ManualClock> =
            Control::with_clock(ControlConfig::default(), ManualClock::new());
        control
            .setup_states(
                [("rects", Box::new(RectOnly::default()) as Box<dyn GameState<Trail>>)],
                "rects",
            )
            .expect("setup");
        let mut canvas = DrawList::new(4, 4);

        for _ in 0..1000 {
            control.run_frame(Vec::new(), &mut canvas).expect("frame");
            control.end_frame();
        }
        assert_eq!(canvas.commands().len(), 1);
        assert_eq!(canvas.background(), None);
    }

    #[test]
    fn input_snapshot_tracks_events_and_clears_edges() {
        let log = CallLog::default();
        let mut control = two_state_control(&log);
        let mut canvas = DrawList::new(4, 4);

        control
            .run_frame(
                [
                    InputEvent::KeyDown(Key::D),
                    InputEvent::MouseDown(MouseBtn::Left),
                    InputEvent::MouseMotion { x: 3.0, y: 4.0 },
                ],
                &mut canvas,
            )
            .expect("frame");
        assert!(control.input().is_just_pressed(Key::D));
        assert_eq!(control.input().mouse_buttons(), [true, false, false]);
        assert_eq!(control.input().mouse_position, (3.0, 4.0));

        control.end_frame();
        assert!(!control.input().is_just_pressed(Key::D));
        assert!(control.input().is_held(Key::D));
    }

    #[test]
    fn fps_toggle_key_flips_caption() {
        let log = CallLog::default();
        let mut control = two_state_control(&log);
        let mut canvas = DrawList::new(4, 4);
        assert!(control.show_fps());
        assert!(control.caption().starts_with("Sunfall - "));
        assert!(control.caption().ends_with(" FPS"));

        control
            .run_frame([InputEvent::KeyDown(Key::F5), InputEvent::KeyUp(Key::F5)], &mut canvas)
            .expect("frame");
        assert!(!control.show_fps());
        assert_eq!(control.caption(), "Sunfall");
    }

    #[test]
    fn update_receives_frame_time_from_clock() {
        let log = CallLog::default();
        let mut control = two_state_control(&log);
        let clock = control.clock().clone();
        let mut canvas = DrawList::new(4, 4);

        clock.advance(Duration::from_millis(100));
        control
            .run_frame([InputEvent::KeyDown(Key::Space)], &mut canvas)
            .expect("frame");
        let b = control.state("B").expect("B");
        assert_eq!(b.base().start_time, Duration::from_millis(100));
    }

    #[test]
    fn end_frame_paces_to_target_fps() {
        let log = CallLog::default();
        let mut control = two_state_control(&log);
        let clock = control.clock().clone();
        let mut canvas = DrawList::new(4, 4);

        control.run_frame(Vec::new(), &mut canvas).expect("frame");
        control.end_frame();
        clock.advance(Duration::from_millis(4));
        control.run_frame(Vec::new(), &mut canvas).expect("frame");
        let dt = control.end_frame();
        assert_eq!(dt, control.limiter().target_interval());
        assert!(clock.total_slept() > Duration::ZERO);
    }

    struct ScriptedHost {
        frames: Vec<Vec<InputEvent>>,
        canvas: DrawList,
        presented: usize,
        captions: Vec<String>,
    }

    impl Host for ScriptedHost {
        fn poll_events(&mut self) -> Vec<InputEvent> {
            if self.frames.is_empty() {
                vec![InputEvent::Quit]
            } else {
                self.frames.remove(0)
            }
        }

        fn canvas(&mut self) -> &mut dyn Canvas {
            &mut self.canvas
        }

        fn present(&mut self) {
            self.presented += 1;
        }

        fn set_caption(&mut self, caption: &str) {
            self.captions.push(caption.to_string());
        }
    }

    #[test]
    fn main_runs_until_quit() {
        let log = CallLog::default();
        let mut control = two_state_control(&log);
        let mut host = ScriptedHost {
            frames: vec![
                Vec::new(),
                vec![InputEvent::KeyDown(Key::Space)],
                vec![InputEvent::KeyDown(Key::F5)],
                vec![InputEvent::KeyDown(Key::Escape)],
            ],
            canvas: DrawList::new(4, 4),
            presented: 0,
            captions: Vec::new(),
        };

        control.main(&mut host).expect("loop");
        assert!(!control.is_running());
        assert_eq!(host.presented, 4);
        assert_eq!(control.state_name(), Some("B"));
        assert_eq!(host.captions.last().map(String::as_str), Some("Sunfall"));
        assert_eq!(host.canvas.background(), Some(Color::BLACK));
    }

    #[test]
    fn main_surfaces_broken_state_graph() {
        let log = CallLog::default();
        let mut control: Control<Trail, ManualClock> =
            Control::with_clock(ControlConfig::default(), ManualClock::new());
        control
            .setup_states([("A", Scripted::boxed("A", "nowhere", &log))], "A")
            .expect("setup");
        let mut host = ScriptedHost {
            frames: vec![vec![InputEvent::KeyDown(Key::Space)]],
            canvas: DrawList::new(4, 4),
            presented: 0,
            captions: Vec::new(),
        };
        let err = control.main(&mut host).expect_err("broken graph");
        assert!(matches!(err, ControlError::UnknownState { .. }));
        assert_eq!(host.presented, 0);
    }
}
