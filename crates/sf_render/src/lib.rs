pub mod camera;
pub mod gpu_context;
pub mod rect_pipeline;
pub mod vertex;

pub use camera::{CameraUniform, ScreenCamera};
pub use gpu_context::GpuContext;
pub use rect_pipeline::RectRenderer;
pub use vertex::RectVertex;
