use corridor_common::normal_matrix;
use corridor_scene::SceneRegistry;
use glam::{Mat3, Mat4};

use crate::frame::FrameContext;
use crate::transforms::{enemy_model, floor_model, wall_model};

/// Every drawable is a quad: two triangles, six indices.
pub const QUAD_INDEX_COUNT: u32 = 6;

/// Object category. Each category has its own shader program.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DrawCategory {
    Floor,
    Wall,
    Enemy,
}

/// Texture a category samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TextureId {
    Floor,
    Enemy,
}

/// Geometry a category draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MeshId {
    FloorQuad,
    SpriteQuad,
}

impl DrawCategory {
    /// Draw order within a frame.
    pub const ORDER: [DrawCategory; 3] =
        [DrawCategory::Floor, DrawCategory::Wall, DrawCategory::Enemy];

    /// Walls share the floor texture.
    pub fn texture(self) -> TextureId {
        match self {
            DrawCategory::Floor | DrawCategory::Wall => TextureId::Floor,
            DrawCategory::Enemy => TextureId::Enemy,
        }
    }

    /// Walls share the enemy sprite quad.
    pub fn mesh(self) -> MeshId {
        match self {
            DrawCategory::Floor => MeshId::FloorQuad,
            DrawCategory::Wall | DrawCategory::Enemy => MeshId::SpriteQuad,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            DrawCategory::Floor => "floor",
            DrawCategory::Wall => "wall",
            DrawCategory::Enemy => "enemy",
        }
    }
}

/// Per-object parameters of one indexed draw.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawCall {
    pub category: DrawCategory,
    pub model: Mat4,
    pub normal: Mat3,
}

impl DrawCall {
    fn new(category: DrawCategory, model: Mat4) -> Self {
        Self {
            category,
            model,
            normal: normal_matrix(&model),
        }
    }
}

/// One state-setting or drawing step, in the order a backend must apply it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawCommand {
    UseProgram(DrawCategory),
    SetView(Mat4),
    SetProjection(Mat4),
    SetModel(Mat4),
    SetNormal(Mat3),
    BindTexture { texture: TextureId, unit: u32 },
    BindMesh(MeshId),
    DrawIndexed { index_count: u32 },
}

/// The complete, ordered draw list for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct FramePlan {
    pub context: FrameContext,
    pub calls: Vec<DrawCall>,
}

impl FramePlan {
    pub fn len(&self) -> usize {
        self.calls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.calls.is_empty()
    }

    pub fn calls_for(&self, category: DrawCategory) -> impl Iterator<Item = &DrawCall> {
        self.calls.iter().filter(move |c| c.category == category)
    }

    /// Expand the plan into backend commands. Each draw re-binds program,
    /// matrices, texture and mesh before drawing.
    pub fn commands(&self) -> Vec<DrawCommand> {
        let mut out = Vec::with_capacity(self.calls.len() * 8);
        for call in &self.calls {
            out.push(DrawCommand::UseProgram(call.category));
            out.push(DrawCommand::SetView(self.context.view));
            out.push(DrawCommand::SetProjection(self.context.projection));
            out.push(DrawCommand::SetModel(call.model));
            out.push(DrawCommand::SetNormal(call.normal));
            out.push(DrawCommand::BindTexture {
                texture: call.category.texture(),
                unit: 0,
            });
            out.push(DrawCommand::BindMesh(call.category.mesh()));
            out.push(DrawCommand::DrawIndexed {
                index_count: QUAD_INDEX_COUNT,
            });
        }
        out
    }
}

/// Compose one frame: floor, then walls, then camera-facing enemies.
pub fn compose_frame(scene: &SceneRegistry, context: FrameContext) -> FramePlan {
    let _span = tracing::info_span!("compose_frame").entered();

    let mut calls = Vec::with_capacity(scene.draw_count());
    calls.push(DrawCall::new(DrawCategory::Floor, floor_model(scene.floor())));

    for wall in scene.walls() {
        calls.push(DrawCall::new(DrawCategory::Wall, wall_model(wall)));
    }

    let camera = context.camera_position();
    for enemy in scene.enemies() {
        calls.push(DrawCall::new(
            DrawCategory::Enemy,
            enemy_model(enemy.position, camera),
        ));
    }

    FramePlan { context, calls }
}
