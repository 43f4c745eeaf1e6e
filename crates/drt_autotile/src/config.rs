//! Serializable autotile configuration
//!
//! Lets a project describe its autotiles in JSON instead of code:
//!
//! ```json
//! {
//!   "image": "sprites/grass-tileset.png",
//!   "tile_size": 32,
//!   "layout": "tileset47",
//!   "source": { "image": "sprites/grass-autotile.png", "width": 64, "height": 96 }
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{AutotileError, Result};
use crate::layout::{TileDefinition, TilesetLayout};
use crate::render::ImageHandle;
use crate::synth::{SourceImage, TilesetSynthesizer};
use crate::tile::Autotile;

/// Which tileset layout an autotile uses
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutPreset {
    /// 7x7 grid with the 47 blob tiles
    #[default]
    #[serde(rename = "tileset47")]
    Tileset47,
    /// 16x16 grid with one tile per bitmask
    Full,
    /// Custom grid, top image row first
    Custom {
        rows: Vec<Vec<Option<TileDefinition>>>,
    },
}

impl LayoutPreset {
    /// Grid width and height in tiles
    pub fn grid_size(&self) -> (u32, u32) {
        match self {
            LayoutPreset::Tileset47 => {
                let layout = TilesetLayout::tileset_47();
                (layout.width(), layout.height())
            }
            LayoutPreset::Full => {
                let layout = TilesetLayout::full_tileset();
                (layout.width(), layout.height())
            }
            LayoutPreset::Custom { rows } => (
                rows.iter().map(|row| row.len() as u32).max().unwrap_or(0),
                rows.len() as u32,
            ),
        }
    }
}

/// Configuration of one autotile
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutotileConfig {
    /// Tileset image the autotile renders from
    pub image: ImageHandle,
    /// Width/height of one tile in pixels
    pub tile_size: u32,
    #[serde(default)]
    pub layout: LayoutPreset,
    /// Autotile source to synthesize `image` from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<SourceImage>,
}

impl AutotileConfig {
    pub fn new(image: impl Into<ImageHandle>, tile_size: u32) -> Self {
        Self {
            image: image.into(),
            tile_size,
            layout: LayoutPreset::default(),
            source: None,
        }
    }

    pub fn with_layout(mut self, layout: LayoutPreset) -> Self {
        self.layout = layout;
        self
    }

    pub fn with_source(mut self, source: SourceImage) -> Self {
        self.source = Some(source);
        self
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<()> {
        if self.tile_size == 0 {
            return Err(AutotileError::Config(format!(
                "autotile '{}' has a tile size of 0",
                self.image
            )));
        }
        let (columns, grid_rows) = self.layout.grid_size();
        if columns.checked_mul(self.tile_size).is_none()
            || grid_rows.checked_mul(self.tile_size).is_none()
        {
            return Err(AutotileError::DimensionMismatch(format!(
                "autotile '{}' needs a tileset of {}x{} tiles of {}px, larger than the maximum image size",
                self.image, columns, grid_rows, self.tile_size
            )));
        }
        if let LayoutPreset::Custom { rows } = &self.layout {
            if rows.iter().all(|row| row.iter().all(Option::is_none)) {
                return Err(AutotileError::Config(format!(
                    "autotile '{}' has a custom layout without tiles",
                    self.image
                )));
            }
        }
        Ok(())
    }

    /// Layout for this config. Presets are shared, custom layouts are built.
    pub fn build_layout(&self) -> Result<LayoutRef> {
        Ok(match &self.layout {
            LayoutPreset::Tileset47 => LayoutRef::Shared(TilesetLayout::tileset_47()),
            LayoutPreset::Full => LayoutRef::Shared(TilesetLayout::full_tileset()),
            LayoutPreset::Custom { rows } => LayoutRef::Owned(TilesetLayout::build(rows)?),
        })
    }

    pub fn build_autotile(&self) -> Result<Autotile> {
        self.validate()?;
        let layout = self.build_layout()?;
        Ok(Autotile::new(self.image.clone(), self.tile_size, Some(&*layout)))
    }

    /// Synthesizer baking `image` from `source`, over the given layout
    pub fn build_synthesizer<'a>(&self, layout: &'a TilesetLayout) -> Result<TilesetSynthesizer<'a>> {
        let source = self.source.clone().ok_or_else(|| {
            AutotileError::Config(format!("autotile '{}' has no source image", self.image))
        })?;
        TilesetSynthesizer::new(source, self.tile_size, layout)
    }
}

/// A layout that is either a shared preset or built from a config
#[derive(Debug)]
pub enum LayoutRef {
    Shared(&'static TilesetLayout),
    Owned(TilesetLayout),
}

impl std::ops::Deref for LayoutRef {
    type Target = TilesetLayout;

    fn deref(&self) -> &TilesetLayout {
        match self {
            LayoutRef::Shared(layout) => layout,
            LayoutRef::Owned(layout) => layout,
        }
    }
}
