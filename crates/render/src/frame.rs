use corridor_camera::{CameraState, Projection};
use corridor_common::Viewport;
use glam::{Mat4, Vec3};

/// View and projection for one frame. Built fresh every frame, never cached.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameContext {
    pub view: Mat4,
    pub projection: Mat4,
}

impl FrameContext {
    pub fn new(camera: &CameraState, viewport: Viewport, projection: &Projection) -> Self {
        Self {
            view: camera.view_matrix(),
            projection: projection.matrix(viewport.aspect()),
        }
    }

    /// Eye position read back from the view matrix: the translation column of
    /// its inverse. Matches `CameraState::position` up to float error.
    pub fn camera_position(&self) -> Vec3 {
        self.view.inverse().w_axis.truncate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use corridor_camera::CameraConfig;

    #[test]
    fn camera_position_round_trips_through_view() {
        let camera = CameraState::new(CameraConfig {
            position: Vec3::new(3.0, 0.75, -8.0),
            yaw: 123.0,
            ..CameraConfig::default()
        });
        let ctx = FrameContext::new(&camera, Viewport::new(800, 600), &Projection::default());
        assert!(ctx.camera_position().abs_diff_eq(camera.position(), 1e-5));
    }

    #[test]
    fn projection_uses_viewport_aspect() {
        let camera = CameraState::default();
        let wide = FrameContext::new(&camera, Viewport::new(1600, 600), &Projection::default());
        let square = FrameContext::new(&camera, Viewport::new(600, 600), &Projection::default());
        let ratio = square.projection.x_axis.x / wide.projection.x_axis.x;
        assert!((ratio - 1600.0 / 600.0).abs() < 1e-5);
        assert_eq!(wide.view, square.view);
    }
}
