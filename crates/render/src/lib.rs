//! Frame composition: turns camera state and scene placements into an
//! ordered list of draw calls, independent of any GPU API.
//!
//! # Invariants
//! - Draw order is floor, then walls, then enemies.
//! - Every draw call carries the full state it needs; nothing is inherited
//!   from the previous draw.
//! - Composition is pure: same camera and scene, same plan.

mod frame;
mod plan;
mod renderer;
mod transforms;

pub use frame::FrameContext;
pub use plan::{
    DrawCall, DrawCategory, DrawCommand, FramePlan, MeshId, QUAD_INDEX_COUNT, TextureId,
    compose_frame,
};
pub use renderer::{CommandRecorder, DebugTextRenderer, Renderer};
pub use transforms::{billboard_angle, enemy_model, floor_model, wall_model};

pub fn crate_info() -> &'static str {
    "corridor-render v0.1.0"
}
