use std::path::Path;

use crate::AssetError;

/// Decoded 2D texture, RGBA8, rows top to bottom.
#[derive(Debug, Clone, PartialEq)]
pub struct TextureImage {
    pub label: String,
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

impl TextureImage {
    pub fn bytes_per_row(&self) -> u32 {
        4 * self.width
    }

    fn from_rgba(label: String, img: image::RgbaImage) -> Result<Self, AssetError> {
        let (width, height) = img.dimensions();
        if width == 0 || height == 0 {
            return Err(AssetError::Empty(label));
        }
        Ok(Self {
            label,
            width,
            height,
            rgba: img.into_raw(),
        })
    }
}

/// Load and decode an image file (PNG or JPEG).
pub fn load_texture(path: impl AsRef<Path>) -> Result<TextureImage, AssetError> {
    let path = path.as_ref();
    let bytes = std::fs::read(path)?;
    let img = image::load_from_memory(&bytes)?.to_rgba8();
    let texture = TextureImage::from_rgba(path.display().to_string(), img)?;
    tracing::debug!(
        path = %path.display(),
        width = texture.width,
        height = texture.height,
        "texture decoded"
    );
    Ok(texture)
}

/// Decode an image already in memory.
pub fn load_texture_from_memory(label: &str, bytes: &[u8]) -> Result<TextureImage, AssetError> {
    let img = image::load_from_memory(bytes)?.to_rgba8();
    TextureImage::from_rgba(label.to_string(), img)
}

/// Two-colour checkerboard of `size` x `size` pixels with `cells` squares per
/// side. Stands in for a texture that failed to load.
pub fn checkerboard(label: &str, size: u32, cells: u32, a: [u8; 4], b: [u8; 4]) -> TextureImage {
    let size = size.max(1);
    let cell = (size / cells.max(1)).max(1);
    let img = image::RgbaImage::from_fn(size, size, |x, y| {
        if ((x / cell) + (y / cell)) % 2 == 0 {
            image::Rgba(a)
        } else {
            image::Rgba(b)
        }
    });
    TextureImage {
        label: label.to_string(),
        width: size,
        height: size,
        rgba: img.into_raw(),
    }
}
