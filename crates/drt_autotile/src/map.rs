//! Sparse tile map that keeps every cell's neighbor bitmask up to date
//!
//! Placing or removing a tile touches only the 8 surrounding cells: each
//! existing neighbor gains or loses the bit pointing back at the changed
//! cell. Coordinates are Y-up, matching [`Direction::vector`].

use std::collections::HashMap;

use crate::neighbors::{Direction, Neighbors};
use crate::render::Sprite;
use crate::tile::Autotile;

/// Grid cell coordinates
pub type Cell = (i32, i32);

/// Compute the bitmask of a cell from scratch.
///
/// Diagonal bits are set only by filled diagonal cells, never inferred from
/// the two orthogonal ones.
pub fn calculate_bitmask<F>(x: i32, y: i32, is_filled: F) -> Neighbors
where
    F: Fn(i32, i32) -> bool,
{
    Direction::ALL
        .into_iter()
        .filter(|direction| {
            let (dx, dy) = direction.vector();
            is_filled(x + dx, y + dy)
        })
        .fold(Neighbors::NONE, |neighbors, direction| neighbors + direction)
}

/// Occupied cells of one autotile and their neighbor bitmasks
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AutotileMap {
    cells: HashMap<Cell, Neighbors>,
}

impl AutotileMap {
    pub fn new() -> Self {
        Self {
            cells: HashMap::new(),
        }
    }

    pub fn from_cells(cells: impl IntoIterator<Item = Cell>) -> Self {
        let mut map = Self::new();
        for cell in cells {
            map.insert(cell);
        }
        map
    }

    /// Place a tile. Returns `false` if the cell was already occupied.
    pub fn insert(&mut self, cell: Cell) -> bool {
        if self.cells.contains_key(&cell) {
            return false;
        }

        let mut own = Neighbors::NONE;
        for direction in Direction::ALL {
            if let Some(neighbor) = self.cells.get_mut(&offset(cell, direction)) {
                *neighbor = *neighbor + direction.opposite();
                own = own + direction;
            }
        }
        self.cells.insert(cell, own);
        true
    }

    /// Remove a tile, returning the bitmask it had
    pub fn remove(&mut self, cell: Cell) -> Option<Neighbors> {
        let removed = self.cells.remove(&cell)?;
        for direction in removed.directions() {
            if let Some(neighbor) = self.cells.get_mut(&offset(cell, direction)) {
                *neighbor = *neighbor - direction.opposite();
            }
        }
        Some(removed)
    }

    pub fn contains(&self, cell: Cell) -> bool {
        self.cells.contains_key(&cell)
    }

    pub fn neighbors_at(&self, cell: Cell) -> Option<Neighbors> {
        self.cells.get(&cell).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Cell, Neighbors)> + '_ {
        self.cells.iter().map(|(cell, neighbors)| (*cell, *neighbors))
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Sprites for every tile, with cell `(0, 0)` drawn at `origin`.
    /// Sorted bottom row first, then left to right.
    pub fn sprites(&self, tile: &Autotile, origin: (i32, i32)) -> Vec<Sprite> {
        let size = tile.size() as i32;
        let mut cells: Vec<_> = self.iter().collect();
        cells.sort_by_key(|((x, y), _)| (*y, *x));
        cells
            .into_iter()
            .map(|((x, y), neighbors)| {
                tile.render(neighbors)
                    .at(origin.0 + x * size, origin.1 + y * size)
            })
            .collect()
    }
}

fn offset(cell: Cell, direction: Direction) -> Cell {
    let (dx, dy) = direction.vector();
    (cell.0 + dx, cell.1 + dy)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::neighbors::bits::*;

    /// Every stored bitmask must equal one computed from scratch
    fn assert_consistent(map: &AutotileMap) {
        for (cell, neighbors) in map.iter() {
            let expected = calculate_bitmask(cell.0, cell.1, |x, y| map.contains((x, y)));
            assert_eq!(neighbors, expected, "cell {:?}", cell);
        }
    }

    #[test]
    fn test_single_tile_has_no_neighbors() {
        let mut map = AutotileMap::new();
        assert!(map.insert((3, 4)));
        assert!(!map.insert((3, 4)));
        assert_eq!(map.neighbors_at((3, 4)), Some(Neighbors::NONE));
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_adjacent_tiles_see_each_other() {
        let mut map = AutotileMap::new();
        map.insert((0, 0));
        map.insert((1, 0));
        assert_eq!(map.neighbors_at((0, 0)).unwrap().bits(), RIGHT);
        assert_eq!(map.neighbors_at((1, 0)).unwrap().bits(), LEFT);
    }

    #[test]
    fn test_l_shape_does_not_infer_diagonal() {
        let map = AutotileMap::from_cells([(0, 0), (1, 0), (0, 1)]);
        assert_eq!(map.neighbors_at((0, 0)).unwrap().bits(), RIGHT | UP);

        let mut map = map;
        map.insert((1, 1));
        assert_eq!(map.neighbors_at((0, 0)).unwrap().bits(), RIGHT | UP | UP_RIGHT);
        assert_consistent(&map);
    }

    #[test]
    fn test_remove_clears_only_the_shared_bit() {
        let mut map = AutotileMap::from_cells([(0, 0), (0, 1), (1, 1), (-1, 0)]);
        let before = map.neighbors_at((0, 0)).unwrap();
        assert_eq!(before.bits(), UP | UP_RIGHT | LEFT);

        let removed = map.remove((1, 1)).unwrap();
        assert_eq!(removed.bits(), LEFT | DOWN_LEFT);
        assert_eq!(map.neighbors_at((0, 0)).unwrap().bits(), UP | LEFT);
        assert_eq!(map.neighbors_at((0, 1)).unwrap().bits(), DOWN | DOWN_LEFT);
        assert_eq!(map.remove((1, 1)), None);
        assert_consistent(&map);
    }

    #[test]
    fn test_block_center_is_full() {
        let cells = (-1..=1).flat_map(|x| (-1..=1).map(move |y| (x, y)));
        let map = AutotileMap::from_cells(cells);
        assert_eq!(map.neighbors_at((0, 0)), Some(Neighbors::ALL));
        assert_eq!(map.neighbors_at((-1, -1)).unwrap().bits(), UP | UP_RIGHT | RIGHT);
        assert_consistent(&map);
    }

    #[test]
    fn test_insert_remove_sequence_stays_consistent() {
        let mut map = AutotileMap::new();
        // Deterministic scatter over a 6x6 area
        for i in 0..60i32 {
            let cell = ((i * 7) % 6, (i * 11) % 6);
            if i % 3 == 0 {
                map.remove(cell);
            } else {
                map.insert(cell);
            }
            assert_consistent(&map);
        }
    }

    #[test]
    fn test_sprites_positioned_by_cell() {
        let tile = Autotile::new("tiles.png", 16, None);
        let map = AutotileMap::from_cells([(1, 0), (0, 0)]);
        let sprites = map.sprites(&tile, (100, 50));
        assert_eq!(sprites.len(), 2);
        assert_eq!((sprites[0].x, sprites[0].y), (100, 50));
        assert_eq!((sprites[1].x, sprites[1].y), (116, 50));
        assert_eq!(sprites[0].source, tile.render(RIGHT).source);
        assert_eq!(sprites[1].source, tile.render(LEFT).source);
    }
}
