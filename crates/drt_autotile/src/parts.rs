//! Corner parts used to stitch full tiles from an autotile source image
//!
//! The source image is a 4x6 grid of half-tile parts, top row first:
//!
//! ```text
//! row 0: isolated    UL | isolated    UR | inner       UL | inner      UR
//! row 1: isolated    DL | isolated    DR | inner       DL | inner      DR
//! row 2: outer       UL | top edge    UR | top edge    UL | outer      UR
//! row 3: left edge   DL | fill        DR | fill        DL | right edge DR
//! row 4: left edge   UL | fill        UR | fill        UL | right edge UR
//! row 5: outer       DL | bottom edge DR | bottom edge DL | outer      DR
//! ```
//!
//! The suffix names the tile corner the part is drawn into.
//!
//! Every part belongs to one corner of the tile it ends up in. For each
//! corner the candidate parts are tried in row-major order and the first
//! matching one is used.

use serde::{Deserialize, Serialize};

use crate::condition::{Condition, ConditionMap};
use crate::error::{AutotileError, Result};
use crate::neighbors::bits::*;
use crate::neighbors::Neighbors;

/// Columns of the part grid
pub const PART_COLUMNS: u32 = 4;
/// Rows of the part grid
pub const PART_ROWS: u32 = 6;

/// One quadrant of a tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Corner {
    UpLeft,
    UpRight,
    DownLeft,
    DownRight,
}

impl Corner {
    pub const ALL: [Corner; 4] = [
        Corner::UpLeft,
        Corner::UpRight,
        Corner::DownLeft,
        Corner::DownRight,
    ];

    /// Offset of this quadrant inside a tile, in part units (Y-up)
    pub const fn offset(self) -> (u32, u32) {
        match self {
            Corner::UpLeft => (0, 1),
            Corner::UpRight => (1, 1),
            Corner::DownLeft => (0, 0),
            Corner::DownRight => (1, 0),
        }
    }
}

/// A part of the source image and the tile corner it fills
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartDefinition {
    pub corner: Corner,
    pub condition: Condition,
}

impl PartDefinition {
    pub fn new(corner: Corner, condition: Condition) -> Self {
        Self { corner, condition }
    }
}

/// Cell of the part grid, authored coordinates (row 0 is the top row)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PartPosition {
    pub x: u32,
    pub y: u32,
}

impl PartPosition {
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

fn has(mask: u8) -> Condition {
    Condition::Has(mask)
}

fn has_not(mask: u8) -> Condition {
    Condition::HasNot(mask)
}

/// The 24 part definitions, top row first
pub fn part_definitions() -> Vec<Vec<PartDefinition>> {
    use Corner::*;

    let part = PartDefinition::new;

    // Isolated corners: both adjoining sides open, and not a concave corner
    let single = |corner: Corner, sides: u8, first: u8, second: u8| {
        part(
            corner,
            has_not(sides).and(has_not(first).or(has_not(second))),
        )
    };
    // Inner corners: both adjoining sides filled, diagonal open
    let plus = |corner: Corner, sides: u8, diagonal: u8| part(corner, has(sides).and(has_not(diagonal)));
    let edge = |corner: Corner, open: u8, filled: u8| part(corner, has_not(open).and(has(filled)));

    vec![
        vec![
            single(UpLeft, UP | LEFT, RIGHT, DOWN),
            single(UpRight, UP | RIGHT, LEFT, DOWN),
            plus(UpLeft, UP | LEFT, UP_LEFT),
            plus(UpRight, UP | RIGHT, UP_RIGHT),
        ],
        vec![
            single(DownLeft, DOWN | LEFT, RIGHT, UP),
            single(DownRight, DOWN | RIGHT, LEFT, UP),
            plus(DownLeft, DOWN | LEFT, DOWN_LEFT),
            plus(DownRight, DOWN | RIGHT, DOWN_RIGHT),
        ],
        vec![
            edge(UpLeft, UP | LEFT, RIGHT | DOWN),
            edge(UpRight, UP, RIGHT),
            edge(UpLeft, UP, LEFT),
            edge(UpRight, UP | RIGHT, LEFT | DOWN),
        ],
        vec![
            edge(DownLeft, LEFT, DOWN),
            part(DownRight, has(RIGHT | DOWN | DOWN_RIGHT)),
            part(DownLeft, has(LEFT | DOWN | DOWN_LEFT)),
            edge(DownRight, RIGHT, DOWN),
        ],
        vec![
            edge(UpLeft, LEFT, UP),
            part(UpRight, has(RIGHT | UP | UP_RIGHT)),
            part(UpLeft, has(LEFT | UP | UP_LEFT)),
            edge(UpRight, RIGHT, UP),
        ],
        vec![
            edge(DownLeft, DOWN | LEFT, RIGHT | UP),
            edge(DownRight, DOWN, RIGHT),
            edge(DownLeft, DOWN, LEFT),
            edge(DownRight, DOWN | RIGHT, LEFT | UP),
        ],
    ]
}

/// Per-corner part lookup, precomputed for all 256 bitmasks
#[derive(Debug, Clone)]
pub struct CornerPartTable {
    /// Indexed by `Corner as usize`, then bitmask
    picks: [[PartPosition; 256]; 4],
}

impl CornerPartTable {
    /// Table for the built-in part grid
    pub fn new() -> Self {
        // The built-in grid covers every corner and bitmask (see tests)
        Self::from_definitions(&part_definitions())
            .expect("built-in part grid covers every bitmask")
    }

    /// Build from a custom grid. Fails on the first corner and bitmask no
    /// part matches.
    pub fn from_definitions(rows: &[Vec<PartDefinition>]) -> Result<Self> {
        let mut picks = [[PartPosition::default(); 256]; 4];
        for corner in Corner::ALL {
            let candidates = Self::candidates(rows, corner);
            for bitmask in 0..=255u8 {
                let position = candidates
                    .fetch(Neighbors::new(bitmask))
                    .ok_or(AutotileError::MissingPart { corner, bitmask })?;
                picks[corner as usize][bitmask as usize] = *position;
            }
        }
        log::debug!("Built corner part table from {} part rows", rows.len());
        Ok(Self { picks })
    }

    fn candidates(rows: &[Vec<PartDefinition>], corner: Corner) -> ConditionMap<PartPosition> {
        let mut result = ConditionMap::new();
        for (y, row) in rows.iter().enumerate() {
            for (x, definition) in row.iter().enumerate() {
                if definition.corner == corner {
                    result.register(
                        PartPosition::new(x as u32, y as u32),
                        definition.condition.clone(),
                    );
                }
            }
        }
        result
    }

    /// Part to draw in `corner` for a tile with `neighbors`
    pub fn pick_part(&self, corner: Corner, neighbors: Neighbors) -> PartPosition {
        self.picks[corner as usize][neighbors.bits() as usize]
    }
}

impl Default for CornerPartTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn defined_count(rows: &[Vec<PartDefinition>], corner: Corner) -> usize {
        rows.iter().flatten().filter(|d| d.corner == corner).count()
    }

    #[test]
    fn test_grid_shape() {
        let rows = part_definitions();
        assert_eq!(rows.len(), PART_ROWS as usize);
        assert!(rows.iter().all(|row| row.len() == PART_COLUMNS as usize));
        for corner in Corner::ALL {
            assert_eq!(defined_count(&rows, corner), 6);
        }
    }

    #[test]
    fn test_every_corner_has_a_part_for_every_bitmask() {
        let rows = part_definitions();
        for corner in Corner::ALL {
            let candidates = CornerPartTable::candidates(&rows, corner);
            for bitmask in 0..=255u8 {
                assert!(candidates.fetch(Neighbors::new(bitmask)).is_some());
            }
        }
    }

    #[test]
    fn test_isolated_tile_uses_single_parts() {
        let table = CornerPartTable::new();
        let n = Neighbors::NONE;
        assert_eq!(table.pick_part(Corner::UpLeft, n), PartPosition::new(0, 0));
        assert_eq!(table.pick_part(Corner::UpRight, n), PartPosition::new(1, 0));
        assert_eq!(table.pick_part(Corner::DownLeft, n), PartPosition::new(0, 1));
        assert_eq!(table.pick_part(Corner::DownRight, n), PartPosition::new(1, 1));
    }

    #[test]
    fn test_center_tile_uses_center_parts() {
        let table = CornerPartTable::new();
        let n = Neighbors::ALL;
        assert_eq!(table.pick_part(Corner::UpLeft, n), PartPosition::new(2, 4));
        assert_eq!(table.pick_part(Corner::UpRight, n), PartPosition::new(1, 4));
        assert_eq!(table.pick_part(Corner::DownLeft, n), PartPosition::new(2, 3));
        assert_eq!(table.pick_part(Corner::DownRight, n), PartPosition::new(1, 3));
    }

    #[test]
    fn test_plus_tile_uses_inner_corners() {
        let table = CornerPartTable::new();
        let n = Neighbors::new(ORTHOGONAL);
        assert_eq!(table.pick_part(Corner::UpLeft, n), PartPosition::new(2, 0));
        assert_eq!(table.pick_part(Corner::UpRight, n), PartPosition::new(3, 0));
        assert_eq!(table.pick_part(Corner::DownLeft, n), PartPosition::new(2, 1));
        assert_eq!(table.pick_part(Corner::DownRight, n), PartPosition::new(3, 1));
    }

    #[test]
    fn test_outer_corner_and_edges() {
        let table = CornerPartTable::new();
        // Top-left corner of a filled area
        let n = Neighbors::new(RIGHT | DOWN_RIGHT | DOWN);
        assert_eq!(table.pick_part(Corner::UpLeft, n), PartPosition::new(0, 2));
        assert_eq!(table.pick_part(Corner::UpRight, n), PartPosition::new(1, 2));
        assert_eq!(table.pick_part(Corner::DownLeft, n), PartPosition::new(0, 3));
        assert_eq!(table.pick_part(Corner::DownRight, n), PartPosition::new(1, 3));
    }

    #[test]
    fn test_custom_grid_with_gaps_is_rejected() {
        let mut rows = part_definitions();
        // Drop the fill parts; full tiles then have no up-left part
        rows.truncate(3);
        assert!(matches!(
            CornerPartTable::from_definitions(&rows),
            Err(AutotileError::MissingPart { corner: Corner::UpLeft, .. })
        ));
        assert!(CornerPartTable::from_definitions(&[]).is_err());
    }

    #[test]
    fn test_custom_grid_without_gaps_is_built() {
        let rows = vec![Corner::ALL
            .iter()
            .map(|&corner| PartDefinition::new(corner, Condition::Always))
            .collect::<Vec<_>>()];
        let table = CornerPartTable::from_definitions(&rows).unwrap();
        assert_eq!(table.pick_part(Corner::DownRight, Neighbors::ALL), PartPosition::new(3, 0));
    }

    #[test]
    fn test_offsets_cover_tile() {
        let offsets: std::collections::HashSet<_> = Corner::ALL.iter().map(|c| c.offset()).collect();
        assert_eq!(offsets.len(), 4);
    }
}
