pub mod events;
pub mod window;

pub use events::translate_window_event;
pub use window::{create_window, PlatformConfig};
