use std::time::Duration;

use rand::rngs::StdRng;
use rand::SeedableRng;
use sf_core::canvas::Color;
use sf_core::input::{InputEvent, Key, MouseBtn};
use sf_core::state::{enter, GameState, StateBase, Transition, UpdateContext};

use super::{draw_banners, press_any_key, Blink, GamePersist, SURVIVE};
use crate::sun::{Sun, SUN_COLOR};

/// Opening screen: suns rain down and can be clicked away.
pub struct Story {
    base: StateBase<GamePersist>,
    screen: (u32, u32),
    sun_count: usize,
    sun_size: (f32, f32),
    suns: Vec<Sun>,
    rng: StdRng,
    blink: Blink,
    fps_toggle_key: Key,
}

impl Story {
    pub fn new(screen: (u32, u32), sun_count: usize, sun_size: (f32, f32), seed: u64) -> Self {
        Self {
            base: StateBase::new(),
            screen,
            sun_count,
            sun_size,
            suns: Vec::new(),
            rng: StdRng::seed_from_u64(seed),
            blink: Blink::default(),
            fps_toggle_key: Key::F5,
        }
    }

    pub fn with_fps_toggle_key(mut self, key: Key) -> Self {
        self.fps_toggle_key = key;
        self
    }

    pub fn suns(&self) -> &[Sun] {
        &self.suns
    }

    fn respawn_suns(&mut self) {
        self.suns = (0..self.sun_count)
            .map(|_| Sun::spawn(&mut self.rng, self.screen, self.sun_size))
            .collect();
    }

    /// Remove at most one sun under the cursor while the left button is held.
    fn collect_sun(&mut self, ctx: &UpdateContext<'_>) {
        if !ctx.input.is_mouse_held(MouseBtn::Left) {
            return;
        }
        let (x, y) = ctx.input.mouse_position;
        if let Some(index) = self.suns.iter().position(|sun| sun.hit(x as f32, y as f32)) {
            self.suns.remove(index);
            self.base.persist.suns_collected += 1;
            log::debug!(
                "Sun collected ({} total, {} left)",
                self.base.persist.suns_collected,
                self.suns.len()
            );
        }
    }
}

impl GameState<GamePersist> for Story {
    fn base(&self) -> &StateBase<GamePersist> {
        &self.base
    }

    fn base_mut(&mut self) -> &mut StateBase<GamePersist> {
        &mut self.base
    }

    fn get_event(&mut self, event: &InputEvent) -> Transition {
        press_any_key(event, self.fps_toggle_key, SURVIVE)
    }

    fn update(&mut self, ctx: &mut UpdateContext<'_>) -> Transition {
        ctx.canvas.fill(Color::BLACK);
        self.collect_sun(ctx);

        let (_, height) = ctx.canvas.size();
        let dt = ctx.dt.as_secs_f32();
        for sun in &mut self.suns {
            sun.update(dt, height as f32);
            ctx.canvas.fill_rect(sun.rect, SUN_COLOR);
        }

        let prompt_visible = self.blink.update(ctx.now);
        draw_banners(ctx.canvas, "Story", prompt_visible);
        Transition::Continue
    }

    fn startup(&mut self, now: Duration, mut persist: GamePersist) {
        persist.story_visits += 1;
        enter(&mut self.base, now, persist);
        self.blink.reset(now);
        self.respawn_suns();
        log::info!(
            "Story started (visit {}, {} suns collected so far)",
            self.base.persist.story_visits,
            self.base.persist.suns_collected
        );
    }
}
