//! Atlas baking for drt_autotile
//!
//! Runs the [`DrawCommand`](drt_autotile::DrawCommand)s produced by a
//! [`TilesetSynthesizer`](drt_autotile::TilesetSynthesizer) against real RGBA
//! buffers and reads/writes the PNG files involved.
//!
//! ```rust,ignore
//! use drt_atlas::{bake_tileset, load_image, save_png, source_image};
//! use drt_autotile::{TilesetLayout, TilesetSynthesizer};
//!
//! let pixels = load_image("sprites/grass-autotile.png")?;
//! let source = source_image("sprites/grass-autotile.png", &pixels);
//! let synth = TilesetSynthesizer::new(source, 32, TilesetLayout::tileset_47())?;
//! save_png(&bake_tileset(&pixels, &synth)?, "sprites/grass-tileset.png")?;
//! ```

pub mod bake;
pub mod error;
pub mod io;

pub use bake::{
    bake_tileset, blit, regions_equal, round_trip_mismatches, source_image, AtlasBaker,
};
pub use error::{AtlasError, Result};
pub use io::{load_image, load_image_from_memory, save_png};
