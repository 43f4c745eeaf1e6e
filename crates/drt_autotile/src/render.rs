//! Draw descriptors handed to the host renderer
//!
//! All rectangles use a Y-up pixel space with the origin at the bottom-left
//! corner of the image.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifies an image known to the host (usually its asset path)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageHandle(String);

impl ImageHandle {
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ImageHandle {
    fn from(path: &str) -> Self {
        Self::new(path)
    }
}

impl From<String> for ImageHandle {
    fn from(path: String) -> Self {
        Self(path)
    }
}

impl fmt::Display for ImageHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Pixel rectangle, Y-up
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

impl Rect {
    pub const fn new(x: u32, y: u32, w: u32, h: u32) -> Self {
        Self { x, y, w, h }
    }

    /// Square of side `size` at `(x, y)`
    pub const fn square(x: u32, y: u32, size: u32) -> Self {
        Self::new(x, y, size, size)
    }

    /// Right edge, saturating at `u32::MAX`
    pub const fn right(&self) -> u32 {
        self.x.saturating_add(self.w)
    }

    /// Top edge, saturating at `u32::MAX`
    pub const fn top(&self) -> u32 {
        self.y.saturating_add(self.h)
    }

    /// Whether this rectangle lies inside a `width` x `height` image.
    /// Rectangles whose edges overflow `u32` never fit.
    pub const fn fits_in(&self, width: u32, height: u32) -> bool {
        match (self.x.checked_add(self.w), self.y.checked_add(self.h)) {
            (Some(right), Some(top)) => right <= width && top <= height,
            _ => false,
        }
    }
}

/// Region of a tileset image to show for one tile, with its display size
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DrawRect {
    pub image: ImageHandle,
    pub source: Rect,
    pub w: u32,
    pub h: u32,
}

impl DrawRect {
    /// Place this tile at a screen position
    pub fn at(&self, x: i32, y: i32) -> Sprite {
        Sprite {
            x,
            y,
            w: self.w,
            h: self.h,
            image: self.image.clone(),
            source: self.source,
        }
    }
}

/// A positioned tile ready for the host renderer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sprite {
    pub x: i32,
    pub y: i32,
    pub w: u32,
    pub h: u32,
    pub image: ImageHandle,
    pub source: Rect,
}

/// Copy `source` of `image` into `dest` of the output surface
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DrawCommand {
    pub image: ImageHandle,
    pub source: Rect,
    pub dest: Rect,
}
