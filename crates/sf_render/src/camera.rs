use glam::Mat4;

#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniform {
    pub view_proj: [[f32; 4]; 4],
}

/// Pixel-space projection: origin at the top-left corner, y grows downward,
/// matching the coordinates states draw with.
pub struct ScreenCamera {
    pub viewport: (u32, u32),
}

impl ScreenCamera {
    pub fn new(viewport_width: u32, viewport_height: u32) -> Self {
        Self {
            viewport: (viewport_width, viewport_height),
        }
    }

    pub fn projection(&self) -> Mat4 {
        let width = self.viewport.0.max(1) as f32;
        let height = self.viewport.1.max(1) as f32;
        Mat4::orthographic_rh(0.0, width, height, 0.0, -1.0, 1.0)
    }

    pub fn build_uniform(&self) -> CameraUniform {
        CameraUniform {
            view_proj: self.projection().to_cols_array_2d(),
        }
    }
}
