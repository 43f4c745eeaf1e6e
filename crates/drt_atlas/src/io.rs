//! PNG loading and saving

use std::path::Path;

use image::{ImageFormat, RgbaImage};

use crate::error::Result;

/// Load any supported image file as RGBA8
pub fn load_image(path: impl AsRef<Path>) -> Result<RgbaImage> {
    Ok(image::open(path)?.to_rgba8())
}

pub fn load_image_from_memory(bytes: &[u8]) -> Result<RgbaImage> {
    Ok(image::load_from_memory(bytes)?.to_rgba8())
}

/// Write `image` as PNG, creating missing parent directories
pub fn save_png(image: &RgbaImage, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    image.save_with_format(path, ImageFormat::Png)?;
    log::debug!("Saved {}x{} PNG to {}", image.width(), image.height(), path.display());
    Ok(())
}
