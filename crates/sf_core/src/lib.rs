pub mod canvas;
pub mod control;
pub mod error;
pub mod input;
pub mod state;
pub mod time;

pub use canvas::{Canvas, Color, DrawCommand, DrawList, Rect};
pub use control::{Control, ControlConfig, FrameStatus, Host};
pub use error::ControlError;
pub use input::{InputEvent, InputState, Key, MouseBtn};
pub use state::{GameState, StateBase, Transition, UpdateContext};
pub use time::{Clock, FrameLimiter, ManualClock, SystemClock};
