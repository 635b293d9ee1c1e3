use std::fmt::Write;

use crate::plan::{DrawCategory, DrawCommand, FramePlan};

/// Backend-agnostic renderer interface.
///
/// A renderer consumes a composed [`FramePlan`] and produces its output. It
/// never mutates camera or scene state.
pub trait Renderer {
    /// The output type produced by this renderer.
    type Output;

    /// Render one frame.
    fn render(&self, plan: &FramePlan) -> Self::Output;
}

/// Text renderer for the CLI, logs and tests.
///
/// Prints the camera and one line per draw call with the world-space origin
/// and yaw of its model matrix.
#[derive(Debug, Default)]
pub struct DebugTextRenderer;

impl DebugTextRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl Renderer for DebugTextRenderer {
    type Output = String;

    fn render(&self, plan: &FramePlan) -> String {
        let mut out = String::new();
        let eye = plan.context.camera_position();
        let _ = writeln!(
            out,
            "=== Frame ({} draw calls) ===\nCamera: eye=({:.2}, {:.2}, {:.2})",
            plan.len(),
            eye.x,
            eye.y,
            eye.z
        );

        for category in DrawCategory::ORDER {
            let calls: Vec<_> = plan.calls_for(category).collect();
            if calls.is_empty() {
                continue;
            }
            let _ = writeln!(
                out,
                "{} (texture={:?}, mesh={:?}): {}",
                category.name(),
                category.texture(),
                category.mesh(),
                calls.len()
            );
            for call in calls {
                let origin = call.model.w_axis;
                let (_, rotation, _) = call.model.to_scale_rotation_translation();
                let (yaw, _, _) = rotation.to_euler(glam::EulerRot::YXZ);
                let _ = writeln!(
                    out,
                    "  pos=({:.2}, {:.2}, {:.2}) yaw={:.1}deg",
                    origin.x,
                    origin.y,
                    origin.z,
                    yaw.to_degrees()
                );
            }
        }

        out
    }
}

/// Records the backend command stream a GPU renderer would execute.
#[derive(Debug, Default)]
pub struct CommandRecorder;

impl CommandRecorder {
    pub fn new() -> Self {
        Self
    }
}

impl Renderer for CommandRecorder {
    type Output = Vec<DrawCommand>;

    fn render(&self, plan: &FramePlan) -> Vec<DrawCommand> {
        plan.commands()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FrameContext, compose_frame};
    use corridor_camera::{CameraState, Projection};
    use corridor_common::Viewport;
    use corridor_scene::{FloorPlacement, SceneRegistry};

    fn plan_for(scene: &SceneRegistry) -> FramePlan {
        let ctx = FrameContext::new(
            &CameraState::default(),
            Viewport::new(800, 600),
            &Projection::default(),
        );
        compose_frame(scene, ctx)
    }

    #[test]
    fn debug_renderer_default_level() {
        let output = DebugTextRenderer::new().render(&plan_for(&SceneRegistry::default_level()));
        assert!(output.contains("9 draw calls"));
        assert!(output.contains("0.75, 5.00)"));
        assert!(output.contains("floor (texture=Floor, mesh=FloorQuad): 1"));
        assert!(output.contains("wall (texture=Floor, mesh=SpriteQuad): 3"));
        assert!(output.contains("enemy (texture=Enemy, mesh=SpriteQuad): 5"));
        assert!(output.contains("pos=(5.00, 0.00, -2.00)"));
    }

    #[test]
    fn debug_renderer_skips_empty_categories() {
        let scene = SceneRegistry::new(FloorPlacement::default(), vec![], vec![]).unwrap();
        let output = DebugTextRenderer::new().render(&plan_for(&scene));
        assert!(output.contains("1 draw calls"));
        assert!(!output.contains("wall"));
        assert!(!output.contains("enemy"));
    }

    #[test]
    fn debug_renderer_is_deterministic() {
        let plan = plan_for(&SceneRegistry::default_level());
        let renderer = DebugTextRenderer::new();
        assert_eq!(renderer.render(&plan), renderer.render(&plan));
    }

    #[test]
    fn recorder_rebinds_state_for_every_draw() {
        let plan = plan_for(&SceneRegistry::default_level());
        let commands = CommandRecorder::new().render(&plan);
        assert_eq!(commands.len(), plan.len() * 8);

        let programs: Vec<_> = commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::UseProgram(category) => Some(*category),
                _ => None,
            })
            .collect();
        assert_eq!(programs.len(), 9);
        assert_eq!(programs[0], DrawCategory::Floor);
        assert!(programs[1..4].iter().all(|c| *c == DrawCategory::Wall));
        assert!(programs[4..].iter().all(|c| *c == DrawCategory::Enemy));

        for chunk in commands.chunks(8) {
            assert!(matches!(chunk[0], DrawCommand::UseProgram(_)));
            assert_eq!(chunk[7], DrawCommand::DrawIndexed { index_count: 6 });
        }
    }
}
