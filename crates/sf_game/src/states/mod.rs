//! The game's screens and the payload they hand to each other.

mod story;
mod survive;

use std::time::Duration;

use sf_assets::AssetTables;
use sf_core::canvas::{Canvas, Color, Rect};
use sf_core::input::{InputEvent, Key};
use sf_core::state::{GameState, Transition};

use crate::config::GameConfig;
use crate::sun::DEFAULT_SUN_SIZE;

pub use story::Story;
pub use survive::Survive;

pub const STORY: &str = "story";
pub const SURVIVE: &str = "survive";

const BLINK_INTERVAL: Duration = Duration::from_millis(200);
const BANNER_COLOR: Color = Color::YELLOW;
const TITLE_CENTER_Y: f32 = 200.0;
const PROMPT_CENTER_Y: f32 = 500.0;

/// Carried across every transition.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GamePersist {
    pub suns_collected: u32,
    pub story_visits: u32,
}

pub type BoxedState = Box<dyn GameState<GamePersist>>;

/// Every screen the game registers with the controller.
pub fn build_states(config: &GameConfig, assets: &AssetTables) -> Vec<(&'static str, BoxedState)> {
    let screen = (config.width, config.height);
    let fps_toggle_key = config.control_config().fps_toggle_key;
    let story = Story::new(screen, config.sun_count, sun_size(assets), config.seed)
        .with_fps_toggle_key(fps_toggle_key);
    let survive = Survive::new(screen).with_fps_toggle_key(fps_toggle_key);
    vec![
        (STORY, Box::new(story) as BoxedState),
        (SURVIVE, Box::new(survive) as BoxedState),
    ]
}

/// Size of the `sun` graphic, or the default square when none was loaded.
pub fn sun_size(assets: &AssetTables) -> (f32, f32) {
    match assets.graphics.get("sun") {
        Some(image) => (image.width() as f32, image.height() as f32),
        None => DEFAULT_SUN_SIZE,
    }
}

/// Key handling shared by every screen: Escape quits, any other key press moves
/// on to `next`. The FPS toggle key belongs to the controller and is ignored.
fn press_any_key(event: &InputEvent, fps_toggle_key: Key, next: &str) -> Transition {
    match event {
        InputEvent::KeyDown(Key::Escape) => Transition::Quit,
        InputEvent::KeyDown(key) if *key == fps_toggle_key => Transition::Continue,
        InputEvent::KeyDown(_) => Transition::next(next),
        _ => Transition::Continue,
    }
}

/// On/off toggle driven by the frame clock.
#[derive(Debug, Clone, Copy, Default)]
struct Blink {
    visible: bool,
    last_toggle: Duration,
}

impl Blink {
    fn reset(&mut self, now: Duration) {
        self.visible = false;
        self.last_toggle = now;
    }

    fn update(&mut self, now: Duration) -> bool {
        if now.saturating_sub(self.last_toggle) > BLINK_INTERVAL {
            self.visible = !self.visible;
            self.last_toggle = now;
        }
        self.visible
    }
}

/// Text stand-in: a solid bar sized by character count.
fn draw_banner(canvas: &mut dyn Canvas, label: &str, center_y: f32) {
    let (width, _) = canvas.size();
    let bar = Rect::centered(
        width as f32 * 0.5,
        center_y,
        label.chars().count() as f32 * 10.0,
        20.0,
    );
    canvas.fill_rect(bar, BANNER_COLOR);
}

/// Title plus the blinking "press any key" prompt shared by every screen.
fn draw_banners(canvas: &mut dyn Canvas, title: &str, prompt_visible: bool) {
    draw_banner(canvas, title, TITLE_CENTER_Y);
    if prompt_visible {
        draw_banner(canvas, "[Press Any Key]", PROMPT_CENTER_Y);
    }
}
