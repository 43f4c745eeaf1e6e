//! Bitmask autotiles
//!
//! This crate picks the right tile image for a cell based on which of its 8
//! neighbors hold the same tile, and can generate full 47-tile or 256-tile
//! tilesets from a small autotile source image.
//!
//! # Features
//! - 8-bit neighbor bitmasks with incremental maintenance ([`AutotileMap`])
//! - First-match tileset layouts, precomputed for all 256 bitmasks
//! - Built-in 47-tile (7x7) and full 256-tile (16x16) layouts
//! - Tileset synthesis by stitching quadrant parts ([`TilesetSynthesizer`])
//! - JSON configuration ([`AutotileConfig`])
//!
//! All pixel coordinates are Y-up with the origin at the bottom-left corner
//! of an image.
//!
//! # Example
//!
//! ```rust,ignore
//! use drt_autotile::{Autotile, AutotileMap};
//!
//! let tile = Autotile::new("sprites/autotile-tileset.png", 32, None);
//!
//! let mut map = AutotileMap::new();
//! map.insert((0, 0));
//! map.insert((1, 0));
//!
//! for sprite in map.sprites(&tile, (200, 200)) {
//!     // hand `sprite` to the renderer
//! }
//! ```

pub mod condition;
pub mod config;
pub mod error;
pub mod layout;
pub mod map;
pub mod neighbors;
pub mod parts;
pub mod presets;
pub mod render;
pub mod synth;
pub mod tile;

// Re-export main types at crate root
pub use condition::{Condition, ConditionMap};
pub use config::{AutotileConfig, LayoutPreset, LayoutRef};
pub use error::{AutotileError, Result};
pub use layout::{TileDefinition, TilePosition, TilesetLayout};
pub use map::{calculate_bitmask, AutotileMap, Cell};
pub use neighbors::{combine, from_direction, from_vector, Direction, Neighbors};
pub use parts::{Corner, CornerPartTable, PartDefinition, PartPosition};
pub use render::{DrawCommand, DrawRect, ImageHandle, Rect, Sprite};
pub use synth::{generate_tileset_commands, QuadrantRef, SourceImage, TilesetSynthesizer};
pub use tile::{Autotile, TileInstance};
