//! GPU data types for stroke rendering.

use bytemuck::{Pod, Zeroable};
use glam::Mat4;

/// Uniform holding the camera's view-projection matrix.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct CameraUniform {
    /// 4x4 view-projection matrix, column major
    pub view_proj: [[f32; 4]; 4],
}

impl CameraUniform {
    pub fn new(view_proj: Mat4) -> Self {
        Self {
            view_proj: view_proj.to_cols_array_2d(),
        }
    }

    /// Orthographic projection mapping pixel coordinates (origin top-left,
    /// Y down) to clip space, with Z in `[near, far]` mapped to `[0, 1]`.
    pub fn orthographic(width: f32, height: f32, near: f32, far: f32) -> Self {
        Self::new(Mat4::orthographic_rh(0.0, width, height, 0.0, near, far))
    }
}

impl Default for CameraUniform {
    fn default() -> Self {
        Self::new(Mat4::IDENTITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec4;

    #[test]
    fn test_camera_uniform_size() {
        assert_eq!(std::mem::size_of::<CameraUniform>(), 64);
    }

    #[test]
    fn test_orthographic_maps_corners() {
        let camera = CameraUniform::orthographic(800.0, 600.0, -1.0, 1.0);
        let matrix = Mat4::from_cols_array_2d(&camera.view_proj);

        let top_left = matrix * Vec4::new(0.0, 0.0, 0.0, 1.0);
        assert!((top_left.x + 1.0).abs() < 1e-6 && (top_left.y - 1.0).abs() < 1e-6);

        let bottom_right = matrix * Vec4::new(800.0, 600.0, 0.0, 1.0);
        assert!((bottom_right.x - 1.0).abs() < 1e-6 && (bottom_right.y + 1.0).abs() < 1e-6);
    }
}
