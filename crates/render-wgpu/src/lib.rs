//! wgpu render backend for the corridor scene.
//!
//! Executes a composed `FramePlan`: per draw call it binds the category
//! pipeline, the draw's uniform block, the category texture and the quad
//! buffers, then issues a six-index draw.
//!
//! # Invariants
//! - Renderer never mutates camera or scene state.
//! - No bound state is assumed to survive from one draw to the next.
//! - Projection arrives in OpenGL clip space and is converted on upload.

mod gpu;
mod resources;
mod shaders;

pub use gpu::{SceneRenderer, SceneTextures};
pub use resources::GL_TO_WGPU_CLIP;
pub use shaders::{BILLBOARD_SHADER, SCENE_SHADER};
