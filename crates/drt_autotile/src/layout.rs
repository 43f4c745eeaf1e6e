//! Tileset layouts: which grid cell of a tileset image renders each bitmask
//!
//! A layout is authored as rows of optional [`TileDefinition`]s, top row
//! first, the way the tiles appear in the image. Positions handed out by the
//! layout use a Y-up grid: `y = 0` is the bottom row of the image.

use std::collections::HashSet;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use crate::condition::{Condition, ConditionMap};
use crate::error::{AutotileError, Result};
use crate::neighbors::{bits, Neighbors};
use crate::presets;

/// Which bitmasks a tileset cell stands for.
///
/// A bitmask matches when it has every `required` bit and none of the
/// forbidden bits. Forbidden defaults to every bit not in `required`, which
/// makes the definition match exactly one bitmask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TileDefinition {
    pub required: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub forbidden: Option<u8>,
}

impl TileDefinition {
    /// Definition matching exactly `required`
    pub const fn exact(required: u8) -> Self {
        Self {
            required,
            forbidden: None,
        }
    }

    /// Definition that ignores bits in neither `required` nor `forbidden`
    pub const fn new(required: u8, forbidden: u8) -> Self {
        Self {
            required,
            forbidden: Some(forbidden),
        }
    }

    pub const fn forbidden_or_default(&self) -> u8 {
        match self.forbidden {
            Some(forbidden) => forbidden,
            None => bits::ALL ^ self.required,
        }
    }

    pub const fn matches(&self, neighbors: Neighbors) -> bool {
        neighbors.includes_all(self.required) && neighbors.excludes_all(self.forbidden_or_default())
    }

    pub fn condition(&self) -> Condition {
        Condition::has_and_not(self.required, self.forbidden_or_default())
    }
}

/// Grid cell of a tileset image, Y-up
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TilePosition {
    pub x: u32,
    pub y: u32,
}

impl TilePosition {
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

/// Total, immutable map from every bitmask to a tileset grid position.
#[derive(Debug, Clone)]
pub struct TilesetLayout {
    /// Defined cells in priority order (bottom row first, left to right)
    cells: Vec<(TileDefinition, TilePosition)>,
    width: u32,
    height: u32,
    positions: [TilePosition; 256],
}

impl TilesetLayout {
    /// Resolve every bitmask to the first matching definition.
    ///
    /// Fails with [`AutotileError::AmbiguousOrMissingTile`] when some bitmask
    /// matches no definition.
    pub fn build<R: AsRef<[Option<TileDefinition>]>>(rows: &[R]) -> Result<Self> {
        Self::resolve(rows, false)
    }

    /// Like [`build`](Self::build), but also rejects bitmasks matched by more
    /// than one definition.
    pub fn build_strict<R: AsRef<[Option<TileDefinition>]>>(rows: &[R]) -> Result<Self> {
        Self::resolve(rows, true)
    }

    fn resolve<R: AsRef<[Option<TileDefinition>]>>(rows: &[R], strict: bool) -> Result<Self> {
        let height = rows.len() as u32;
        let width = rows
            .iter()
            .map(|row| row.as_ref().len() as u32)
            .max()
            .unwrap_or(0);

        // Authored top to bottom, stored bottom to top
        let mut cells = Vec::new();
        for (y, row) in rows.iter().rev().enumerate() {
            for (x, definition) in row.as_ref().iter().enumerate() {
                if let Some(definition) = definition {
                    cells.push((*definition, TilePosition::new(x as u32, y as u32)));
                }
            }
        }

        let mut by_condition = ConditionMap::new();
        for (definition, position) in &cells {
            by_condition.register(*position, definition.condition());
        }

        let mut positions = [TilePosition::default(); 256];
        let mut overlaps = 0;
        for bitmask in 0..=255u8 {
            let neighbors = Neighbors::new(bitmask);
            let matches = by_condition.match_count(neighbors);
            if matches == 0 || (strict && matches > 1) {
                return Err(AutotileError::AmbiguousOrMissingTile { bitmask, matches });
            }
            if matches > 1 {
                overlaps += 1;
            }
            if let Some(position) = by_condition.fetch(neighbors) {
                positions[bitmask as usize] = *position;
            }
        }

        if overlaps > 0 {
            log::warn!(
                "Tileset layout has {} bitmasks matching several definitions, first match wins",
                overlaps
            );
        }

        let layout = Self {
            cells,
            width,
            height,
            positions,
        };
        log::debug!(
            "Built {}x{} tileset layout: {} definitions, {} distinct positions",
            width,
            height,
            layout.cells.len(),
            layout.distinct_positions()
        );
        Ok(layout)
    }

    /// The built-in 7x7 layout covering the 47 blob tiles
    pub fn tileset_47() -> &'static TilesetLayout {
        static LAYOUT: OnceLock<TilesetLayout> = OnceLock::new();
        LAYOUT.get_or_init(|| {
            TilesetLayout::build(&presets::TILESET_47)
                .expect("47-tile layout covers every bitmask")
        })
    }

    /// The built-in 16x16 layout with one tile per bitmask
    pub fn full_tileset() -> &'static TilesetLayout {
        static LAYOUT: OnceLock<TilesetLayout> = OnceLock::new();
        LAYOUT.get_or_init(|| {
            TilesetLayout::build(&presets::full_tileset_rows())
                .expect("full layout covers every bitmask")
        })
    }

    pub fn position_for(&self, bitmask: u8) -> TilePosition {
        self.positions[bitmask as usize]
    }

    /// Defined cells in priority order
    pub fn cells(&self) -> impl Iterator<Item = (&TileDefinition, TilePosition)> {
        self.cells.iter().map(|(definition, position)| (definition, *position))
    }

    /// Grid width in tiles
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Grid height in tiles
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Pixel size of the tileset image for `tile_size` pixel tiles, or `None`
    /// if it does not fit in `u32`
    pub fn pixel_size(&self, tile_size: u32) -> Option<(u32, u32)> {
        Some((
            self.width.checked_mul(tile_size)?,
            self.height.checked_mul(tile_size)?,
        ))
    }

    /// Number of grid positions some bitmask resolves to
    pub fn distinct_positions(&self) -> usize {
        self.positions.iter().collect::<HashSet<_>>().len()
    }

    /// Bitmasks matched by more than one definition
    pub fn ambiguous_bitmasks(&self) -> Vec<u8> {
        (0..=255u8)
            .filter(|&bitmask| {
                let neighbors = Neighbors::new(bitmask);
                self.cells
                    .iter()
                    .filter(|(definition, _)| definition.matches(neighbors))
                    .count()
                    > 1
            })
            .collect()
    }
}
