//! Tileset synthesis: build a full tileset from a small autotile source image
//!
//! The source image holds the 24 half-tile parts described in
//! [`parts`](crate::parts). Every tile of the target layout is stitched from
//! four parts, one per corner, chosen from the tile's own bitmask. The result
//! is a list of [`DrawCommand`]s which the caller executes against a render
//! target or an image buffer.

use serde::{Deserialize, Serialize};

use crate::error::{AutotileError, Result};
use crate::layout::TilesetLayout;
use crate::neighbors::Neighbors;
use crate::parts::{Corner, CornerPartTable, PartPosition, PART_COLUMNS, PART_ROWS};
use crate::render::{DrawCommand, ImageHandle, Rect};

/// An autotile source image and its pixel dimensions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceImage {
    pub image: ImageHandle,
    pub width: u32,
    pub height: u32,
}

impl SourceImage {
    pub fn new(image: impl Into<ImageHandle>, width: u32, height: u32) -> Self {
        Self {
            image: image.into(),
            width,
            height,
        }
    }

    /// Source image sized exactly for `tile_size` (2x3 tiles). Saturates at
    /// `u32::MAX`, which the synthesizer then rejects.
    pub fn for_tile_size(image: impl Into<ImageHandle>, tile_size: u32) -> Self {
        let part_size = tile_size / 2;
        Self::new(
            image,
            PART_COLUMNS.saturating_mul(part_size),
            PART_ROWS.saturating_mul(part_size),
        )
    }
}

/// The part chosen for one corner of a tile
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuadrantRef {
    pub corner: Corner,
    pub part: PartPosition,
    /// Pixels of the part in the source image
    pub source: Rect,
    /// Offset of the quadrant inside the generated tile
    pub offset: (u32, u32),
}

/// Generates draw commands for a whole tileset from an autotile source
#[derive(Debug, Clone)]
pub struct TilesetSynthesizer<'a> {
    source: SourceImage,
    tile_size: u32,
    part_size: u32,
    layout: &'a TilesetLayout,
    atlas_size: (u32, u32),
    parts: CornerPartTable,
}

impl<'a> TilesetSynthesizer<'a> {
    /// Validates that `tile_size` splits into whole quadrants and that the
    /// source image holds the full part grid.
    pub fn new(source: SourceImage, tile_size: u32, layout: &'a TilesetLayout) -> Result<Self> {
        if tile_size == 0 || tile_size % 2 != 0 {
            return Err(AutotileError::DimensionMismatch(format!(
                "tile size {} cannot be split into four equal quadrants",
                tile_size
            )));
        }
        let part_size = tile_size / 2;

        if source.width % part_size != 0 || source.height % part_size != 0 {
            return Err(AutotileError::DimensionMismatch(format!(
                "source image '{}' ({}x{}) is not divisible into {}px parts",
                source.image, source.width, source.height, part_size
            )));
        }
        let grid = PART_COLUMNS
            .checked_mul(part_size)
            .zip(PART_ROWS.checked_mul(part_size));
        match grid {
            Some((grid_width, grid_height))
                if source.width >= grid_width && source.height >= grid_height => {}
            _ => {
                return Err(AutotileError::DimensionMismatch(format!(
                    "source image '{}' ({}x{}) is smaller than the {}x{} grid of {}px parts",
                    source.image, source.width, source.height, PART_COLUMNS, PART_ROWS, part_size
                )));
            }
        }

        let Some(atlas_size) = layout.pixel_size(tile_size) else {
            return Err(AutotileError::DimensionMismatch(format!(
                "a {}x{} tileset of {}px tiles exceeds the maximum image size",
                layout.width(),
                layout.height(),
                tile_size
            )));
        };

        log::debug!(
            "Synthesizer for '{}': {}px tiles into a {}x{} layout",
            source.image,
            tile_size,
            layout.width(),
            layout.height()
        );

        Ok(Self {
            source,
            tile_size,
            part_size,
            layout,
            atlas_size,
            parts: CornerPartTable::new(),
        })
    }

    pub fn tile_size(&self) -> u32 {
        self.tile_size
    }

    pub fn part_size(&self) -> u32 {
        self.part_size
    }

    pub fn layout(&self) -> &'a TilesetLayout {
        self.layout
    }

    pub fn source(&self) -> &SourceImage {
        &self.source
    }

    /// Pixel size of the generated tileset
    pub fn atlas_size(&self) -> (u32, u32) {
        self.atlas_size
    }

    /// Pixels of a part in the source image. Parts are authored top row
    /// first, so the row is flipped into Y-up space.
    fn part_rect(&self, part: PartPosition) -> Rect {
        Rect::square(
            part.x * self.part_size,
            self.source.height - (part.y + 1) * self.part_size,
            self.part_size,
        )
    }

    /// The four quadrants making up the tile for `value`, in
    /// up-left, up-right, down-left, down-right order
    pub fn generate(&self, value: impl Into<Neighbors>) -> [QuadrantRef; 4] {
        let neighbors = value.into();
        Corner::ALL.map(|corner| {
            let part = self.parts.pick_part(corner, neighbors);
            let (ox, oy) = corner.offset();
            QuadrantRef {
                corner,
                part,
                source: self.part_rect(part),
                offset: (ox * self.part_size, oy * self.part_size),
            }
        })
    }

    /// Draw commands producing the whole tileset, four per defined tile, in
    /// layout priority order
    pub fn build_tileset(&self) -> Vec<DrawCommand> {
        let mut commands = Vec::with_capacity(self.layout.cells().count() * 4);
        for (definition, position) in self.layout.cells() {
            let tile_x = position.x * self.tile_size;
            let tile_y = position.y * self.tile_size;
            log::trace!(
                "Tile {:#010b} at ({}, {})",
                definition.required,
                position.x,
                position.y
            );

            for quadrant in self.generate(definition.required) {
                commands.push(DrawCommand {
                    image: self.source.image.clone(),
                    source: quadrant.source,
                    dest: Rect::square(
                        tile_x + quadrant.offset.0,
                        tile_y + quadrant.offset.1,
                        self.part_size,
                    ),
                });
            }
        }
        commands
    }
}

/// Draw commands for a full tileset generated from `source`
pub fn generate_tileset_commands(
    source: SourceImage,
    tile_size: u32,
    layout: Option<&TilesetLayout>,
) -> Result<Vec<DrawCommand>> {
    let layout = layout.unwrap_or_else(|| TilesetLayout::tileset_47());
    Ok(TilesetSynthesizer::new(source, tile_size, layout)?.build_tileset())
}
