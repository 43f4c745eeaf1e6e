use drt_autotile::{AutotileError, ImageHandle, Rect};
use thiserror::Error;

/// Errors raised while baking or checking atlases
#[derive(Debug, Error)]
pub enum AtlasError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Autotile error: {0}")]
    Autotile(#[from] AutotileError),

    #[error("No pixels registered for image '{0}'")]
    MissingImage(ImageHandle),

    #[error("Rect {rect:?} lies outside the {width}x{height} image '{image}'")]
    OutOfBounds {
        image: String,
        rect: Rect,
        width: u32,
        height: u32,
    },

    #[error("Source image '{image}' is {actual_width}x{actual_height}, expected {width}x{height}")]
    SourceSize {
        image: ImageHandle,
        width: u32,
        height: u32,
        actual_width: u32,
        actual_height: u32,
    },
}

pub type Result<T> = std::result::Result<T, AtlasError>;
