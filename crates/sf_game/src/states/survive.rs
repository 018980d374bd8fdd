use std::time::Duration;

use sf_core::canvas::{Color, Rect};
use sf_core::input::{InputEvent, Key};
use sf_core::state::{enter, GameState, StateBase, Transition, UpdateContext};

use super::{draw_banners, press_any_key, Blink, GamePersist, STORY};
use crate::sun::SUN_COLOR;

const MARKER_SIZE: f32 = 12.0;
const MARKER_GAP: f32 = 6.0;
const MARKER_ROW_Y: f32 = 320.0;

/// Tally screen: one marker per sun collected so far.
pub struct Survive {
    base: StateBase<GamePersist>,
    screen: (u32, u32),
    blink: Blink,
    fps_toggle_key: Key,
}

impl Survive {
    pub fn new(screen: (u32, u32)) -> Self {
        Self {
            base: StateBase::new(),
            screen,
            blink: Blink::default(),
            fps_toggle_key: Key::F5,
        }
    }

    pub fn with_fps_toggle_key(mut self, key: Key) -> Self {
        self.fps_toggle_key = key;
        self
    }

    /// Markers wrap onto further rows once a row is full.
    fn marker_rects(&self) -> Vec<Rect> {
        let stride = MARKER_SIZE + MARKER_GAP;
        let per_row = ((self.screen.0 as f32 - MARKER_GAP) / stride).floor().max(1.0) as u32;
        (0..self.base.persist.suns_collected)
            .map(|i| {
                let (row, col) = (i / per_row, i % per_row);
                Rect::new(
                    MARKER_GAP + col as f32 * stride,
                    MARKER_ROW_Y + row as f32 * stride,
                    MARKER_SIZE,
                    MARKER_SIZE,
                )
            })
            .collect()
    }
}

impl GameState<GamePersist> for Survive {
    fn base(&self) -> &StateBase<GamePersist> {
        &self.base
    }

    fn base_mut(&mut self) -> &mut StateBase<GamePersist> {
        &mut self.base
    }

    fn get_event(&mut self, event: &InputEvent) -> Transition {
        press_any_key(event, self.fps_toggle_key, STORY)
    }

    fn update(&mut self, ctx: &mut UpdateContext<'_>) -> Transition {
        ctx.canvas.fill(Color::BLACK);
        for marker in self.marker_rects() {
            ctx.canvas.fill_rect(marker, SUN_COLOR);
        }
        let prompt_visible = self.blink.update(ctx.now);
        draw_banners(ctx.canvas, "Survive", prompt_visible);
        Transition::Continue
    }

    fn startup(&mut self, now: Duration, persist: GamePersist) {
        log::info!("Survive started with {} suns", persist.suns_collected);
        enter(&mut self.base, now, persist);
        self.blink.reset(now);
    }
}
