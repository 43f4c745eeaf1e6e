//! Built-in tileset layouts
//!
//! [`TILESET_47`] describes a 7x7 tileset image holding the 47 blob tiles,
//! rows listed top to bottom as they appear in the image. The left three
//! columns hold filled areas (corners, sides, center) and their one-tile-line
//! variants; the right four hold lines, L/T/plus pieces and diagonal
//! connectors.
//!
//! Names describe the shape drawn by the tile, e.g. [`CORNER_UP_LEFT`] is
//! the top-left corner of a filled area.

use crate::layout::TileDefinition;
use crate::neighbors::bits::*;

pub const CORNER_UP_LEFT: TileDefinition = TileDefinition::new(RIGHT | DOWN_RIGHT | DOWN, UP | LEFT);
pub const CORNER_UP_RIGHT: TileDefinition = TileDefinition::new(LEFT | DOWN_LEFT | DOWN, UP | RIGHT);
pub const CORNER_DOWN_LEFT: TileDefinition = TileDefinition::new(RIGHT | UP_RIGHT | UP, DOWN | LEFT);
pub const CORNER_DOWN_RIGHT: TileDefinition = TileDefinition::new(LEFT | UP_LEFT | UP, DOWN | RIGHT);

pub const SIDE_UP: TileDefinition =
    TileDefinition::new(LEFT | DOWN_LEFT | DOWN | DOWN_RIGHT | RIGHT, UP);
pub const SIDE_DOWN: TileDefinition =
    TileDefinition::new(LEFT | UP_LEFT | UP | UP_RIGHT | RIGHT, DOWN);
pub const SIDE_LEFT: TileDefinition =
    TileDefinition::new(UP | UP_RIGHT | RIGHT | DOWN_RIGHT | DOWN, LEFT);
pub const SIDE_RIGHT: TileDefinition =
    TileDefinition::new(UP | UP_LEFT | LEFT | DOWN_LEFT | DOWN, RIGHT);

pub const CENTER: TileDefinition = TileDefinition::exact(ALL);

// Corners whose open sides continue as a one-tile line
pub const CORNER_UP_LEFT_LINE_LEFT: TileDefinition =
    TileDefinition::new(LEFT | DOWN | DOWN_RIGHT | RIGHT, DOWN_LEFT | UP);
pub const CORNER_UP_LEFT_LINE_UP: TileDefinition =
    TileDefinition::new(UP | DOWN | DOWN_RIGHT | RIGHT, UP_RIGHT | LEFT);
pub const CORNER_UP_RIGHT_LINE_UP: TileDefinition =
    TileDefinition::new(UP | LEFT | DOWN_LEFT | DOWN, UP_LEFT | RIGHT);
pub const CORNER_UP_RIGHT_LINE_RIGHT: TileDefinition =
    TileDefinition::new(RIGHT | LEFT | DOWN_LEFT | DOWN, DOWN_RIGHT | UP);
pub const CORNER_DOWN_LEFT_LINE_DOWN: TileDefinition =
    TileDefinition::new(DOWN | RIGHT | UP_RIGHT | UP, DOWN_RIGHT | LEFT);
pub const CORNER_DOWN_LEFT_LINE_LEFT: TileDefinition =
    TileDefinition::new(LEFT | RIGHT | UP_RIGHT | UP, UP_LEFT | DOWN);
pub const CORNER_DOWN_RIGHT_LINE_RIGHT: TileDefinition =
    TileDefinition::new(RIGHT | UP | UP_LEFT | LEFT, UP_RIGHT | DOWN);
pub const CORNER_DOWN_RIGHT_LINE_DOWN: TileDefinition =
    TileDefinition::new(DOWN | UP | UP_LEFT | LEFT, DOWN_LEFT | RIGHT);

pub const CORNER_UP_LEFT_TWO_LINES: TileDefinition =
    TileDefinition::exact(LEFT | UP | RIGHT | DOWN_RIGHT | DOWN);
pub const CORNER_UP_RIGHT_TWO_LINES: TileDefinition =
    TileDefinition::exact(RIGHT | UP | LEFT | DOWN_LEFT | DOWN);
pub const CORNER_DOWN_LEFT_TWO_LINES: TileDefinition =
    TileDefinition::exact(LEFT | DOWN | RIGHT | UP_RIGHT | UP);
pub const CORNER_DOWN_RIGHT_TWO_LINES: TileDefinition =
    TileDefinition::exact(RIGHT | DOWN | LEFT | UP_LEFT | UP);

pub const SIDE_UP_LINE: TileDefinition =
    TileDefinition::exact(LEFT | UP | RIGHT | DOWN_RIGHT | DOWN | DOWN_LEFT);
pub const SIDE_LEFT_LINE: TileDefinition =
    TileDefinition::exact(UP | LEFT | DOWN | DOWN_RIGHT | RIGHT | UP_RIGHT);
pub const SIDE_RIGHT_LINE: TileDefinition =
    TileDefinition::exact(UP | RIGHT | DOWN | DOWN_LEFT | LEFT | UP_LEFT);
pub const SIDE_DOWN_LINE: TileDefinition =
    TileDefinition::exact(LEFT | DOWN | RIGHT | UP_RIGHT | UP | UP_LEFT);

pub const L_DOWN_RIGHT: TileDefinition = TileDefinition::new(RIGHT | DOWN, LEFT | UP | DOWN_RIGHT);
pub const L_DOWN_LEFT: TileDefinition = TileDefinition::new(LEFT | DOWN, UP | RIGHT | DOWN_LEFT);
pub const L_UP_RIGHT: TileDefinition = TileDefinition::new(RIGHT | UP, LEFT | DOWN | UP_RIGHT);
pub const L_UP_LEFT: TileDefinition = TileDefinition::new(LEFT | UP, RIGHT | DOWN | UP_LEFT);

pub const T_DOWN_LEFT_RIGHT: TileDefinition =
    TileDefinition::new(LEFT | DOWN | RIGHT, UP | DOWN_LEFT | DOWN_RIGHT);
pub const T_UP_DOWN_RIGHT: TileDefinition =
    TileDefinition::new(RIGHT | UP | DOWN, LEFT | UP_RIGHT | DOWN_RIGHT);
pub const T_UP_DOWN_LEFT: TileDefinition =
    TileDefinition::new(LEFT | UP | DOWN, RIGHT | UP_LEFT | DOWN_LEFT);
pub const T_UP_LEFT_RIGHT: TileDefinition =
    TileDefinition::new(LEFT | UP | RIGHT, DOWN | UP_LEFT | UP_RIGHT);

pub const PLUS: TileDefinition = TileDefinition::exact(ORTHOGONAL);

pub const FAT_PLUS_UP_LEFT: TileDefinition =
    TileDefinition::exact(LEFT | UP | UP_RIGHT | RIGHT | DOWN_RIGHT | DOWN | DOWN_LEFT);
pub const FAT_PLUS_UP_RIGHT: TileDefinition =
    TileDefinition::exact(RIGHT | UP | UP_LEFT | LEFT | DOWN_LEFT | DOWN | DOWN_RIGHT);
pub const FAT_PLUS_DOWN_LEFT: TileDefinition =
    TileDefinition::exact(LEFT | DOWN | DOWN_RIGHT | RIGHT | UP_RIGHT | UP | UP_LEFT);
pub const FAT_PLUS_DOWN_RIGHT: TileDefinition =
    TileDefinition::exact(RIGHT | DOWN | DOWN_LEFT | LEFT | UP_LEFT | UP | UP_RIGHT);

pub const DIAGONAL_CONNECT_RIGHT: TileDefinition =
    TileDefinition::exact(UP | UP_RIGHT | RIGHT | DOWN | DOWN_LEFT | LEFT);
pub const DIAGONAL_CONNECT_LEFT: TileDefinition =
    TileDefinition::exact(UP | UP_LEFT | LEFT | DOWN | DOWN_RIGHT | RIGHT);

pub const VERTICAL_LINE_END_UP: TileDefinition = TileDefinition::new(DOWN, UP | LEFT | RIGHT);
pub const VERTICAL_LINE: TileDefinition = TileDefinition::new(UP | DOWN, LEFT | RIGHT);
pub const VERTICAL_LINE_END_DOWN: TileDefinition = TileDefinition::new(UP, LEFT | DOWN | RIGHT);

pub const HORIZONTAL_LINE_END_LEFT: TileDefinition = TileDefinition::new(RIGHT, UP | LEFT | DOWN);
pub const HORIZONTAL_LINE: TileDefinition = TileDefinition::new(LEFT | RIGHT, UP | DOWN);
pub const HORIZONTAL_LINE_END_RIGHT: TileDefinition = TileDefinition::new(LEFT, UP | RIGHT | DOWN);

pub const NO_NEIGHBORS: TileDefinition = TileDefinition::new(0, ORTHOGONAL);

const fn t(definition: TileDefinition) -> Option<TileDefinition> {
    Some(definition)
}

/// The 47-tile layout, top image row first
#[rustfmt::skip]
pub const TILESET_47: [[Option<TileDefinition>; 7]; 7] = [
    [t(CORNER_UP_LEFT_TWO_LINES),   t(SIDE_UP),         t(CORNER_UP_RIGHT_TWO_LINES),   t(L_DOWN_RIGHT),               t(T_DOWN_LEFT_RIGHT),            t(L_DOWN_LEFT),                t(VERTICAL_LINE_END_UP)],
    [t(SIDE_LEFT),                  t(CENTER),          t(SIDE_RIGHT),                  t(T_UP_DOWN_RIGHT),            t(PLUS),                         t(T_UP_DOWN_LEFT),             t(VERTICAL_LINE)],
    [t(CORNER_DOWN_LEFT_TWO_LINES), t(SIDE_DOWN),       t(CORNER_DOWN_RIGHT_TWO_LINES), t(L_UP_RIGHT),                 t(T_UP_LEFT_RIGHT),              t(L_UP_LEFT),                  t(VERTICAL_LINE_END_DOWN)],
    [t(CORNER_UP_LEFT),             t(SIDE_UP_LINE),    t(CORNER_UP_RIGHT),             t(CORNER_UP_LEFT_LINE_LEFT),   t(CORNER_UP_RIGHT_LINE_UP),      t(CORNER_UP_LEFT_LINE_UP),     t(CORNER_UP_RIGHT_LINE_RIGHT)],
    [t(SIDE_LEFT_LINE),             None,               t(SIDE_RIGHT_LINE),             t(CORNER_DOWN_LEFT_LINE_DOWN), t(CORNER_DOWN_RIGHT_LINE_RIGHT), t(CORNER_DOWN_LEFT_LINE_LEFT), t(CORNER_DOWN_RIGHT_LINE_DOWN)],
    [t(CORNER_DOWN_LEFT),           t(SIDE_DOWN_LINE),  t(CORNER_DOWN_RIGHT),           t(FAT_PLUS_UP_LEFT),           t(FAT_PLUS_UP_RIGHT),            t(DIAGONAL_CONNECT_LEFT),      t(DIAGONAL_CONNECT_RIGHT)],
    [t(HORIZONTAL_LINE_END_LEFT),   t(HORIZONTAL_LINE), t(HORIZONTAL_LINE_END_RIGHT),   t(FAT_PLUS_DOWN_LEFT),         t(FAT_PLUS_DOWN_RIGHT),          None,                          t(NO_NEIGHBORS)],
];

/// 16x16 layout with bitmask `16 * row + column` in each cell, top row first
pub fn full_tileset_rows() -> Vec<Vec<Option<TileDefinition>>> {
    (0..16u16)
        .map(|row| {
            (0..16u16)
                .map(|column| Some(TileDefinition::exact((row * 16 + column) as u8)))
                .collect()
        })
        .collect()
}
