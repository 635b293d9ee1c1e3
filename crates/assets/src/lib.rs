//! Geometry and texture providers for the renderer.
//!
//! Everything here is CPU-side data; GPU upload lives in the wgpu backend.
//! Textures are decoded to tightly packed RGBA8.

mod mesh;
mod texture;

pub use mesh::{MeshVertex, QuadMesh};
pub use texture::{TextureImage, checkerboard, load_texture, load_texture_from_memory};

/// Errors from asset loading.
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("image decode error: {0}")]
    Decode(#[from] image::ImageError),
    #[error("texture has zero size: {0}")]
    Empty(String),
}
