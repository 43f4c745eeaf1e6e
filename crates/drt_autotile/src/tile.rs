//! Runtime autotile rendering
//!
//! [`Autotile`] precomputes the tileset rectangle for each of the 256
//! neighbor combinations, so rendering a tile is a single table lookup.

use crate::layout::{TilePosition, TilesetLayout};
use crate::neighbors::Neighbors;
use crate::render::{DrawRect, ImageHandle, Rect, Sprite};
use crate::synth::TilesetSynthesizer;

/// A tileset image plus the rectangle to show for every bitmask
#[derive(Debug, Clone)]
pub struct Autotile {
    image: ImageHandle,
    size: u32,
    /// One rectangle per distinct grid position
    rects: Vec<DrawRect>,
    /// Bitmask -> index into `rects`
    lookup: [u8; 256],
}

impl Autotile {
    /// Create an autotile for a tileset image with square tiles of `size`
    /// pixels. Uses the 47-tile layout unless another one is given.
    ///
    /// # Panics
    ///
    /// If the tileset image would not fit in `u32` pixels, i.e. when
    /// `layout.pixel_size(size)` is `None`. [`AutotileConfig::validate`]
    /// rejects such configs.
    ///
    /// [`AutotileConfig::validate`]: crate::config::AutotileConfig::validate
    pub fn new(image: impl Into<ImageHandle>, size: u32, layout: Option<&TilesetLayout>) -> Self {
        let image = image.into();
        let layout = layout.unwrap_or_else(|| TilesetLayout::tileset_47());

        let mut positions: Vec<TilePosition> = Vec::new();
        let mut rects = Vec::new();
        let mut lookup = [0u8; 256];
        for bitmask in 0..=255u8 {
            let position = layout.position_for(bitmask);
            let index = match positions.iter().position(|p| *p == position) {
                Some(index) => index,
                None => {
                    positions.push(position);
                    rects.push(DrawRect {
                        image: image.clone(),
                        source: Rect::square(position.x * size, position.y * size, size),
                        w: size,
                        h: size,
                    });
                    positions.len() - 1
                }
            };
            // At most 256 distinct positions
            lookup[bitmask as usize] = index as u8;
        }

        Self {
            image,
            size,
            rects,
            lookup,
        }
    }

    /// Autotile reading from the atlas a synthesizer bakes, stored under `image`
    pub fn from_synthesized(image: impl Into<ImageHandle>, synthesizer: &TilesetSynthesizer) -> Self {
        Self::new(image, synthesizer.tile_size(), Some(synthesizer.layout()))
    }

    /// Rectangle to draw for a neighbor combination
    pub fn render(&self, neighbors: impl Into<Neighbors>) -> &DrawRect {
        let bitmask = neighbors.into().bits();
        &self.rects[self.lookup[bitmask as usize] as usize]
    }

    pub fn image(&self) -> &ImageHandle {
        &self.image
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    /// Number of distinct rectangles shared by the 256 bitmasks
    pub fn distinct_rects(&self) -> usize {
        self.rects.len()
    }

    /// A placed tile with no neighbors
    pub fn create_instance(&self, x: i32, y: i32) -> TileInstance<'_> {
        TileInstance::new(self, x, y)
    }
}

/// A placed autotile whose source rectangle follows its neighbors
#[derive(Debug, Clone)]
pub struct TileInstance<'a> {
    tile: &'a Autotile,
    pub x: i32,
    pub y: i32,
    pub w: u32,
    pub h: u32,
    neighbors: Neighbors,
    source: Rect,
}

impl<'a> TileInstance<'a> {
    pub fn new(tile: &'a Autotile, x: i32, y: i32) -> Self {
        let neighbors = Neighbors::NONE;
        Self {
            tile,
            x,
            y,
            w: tile.size(),
            h: tile.size(),
            neighbors,
            source: tile.render(neighbors).source,
        }
    }

    pub fn neighbors(&self) -> Neighbors {
        self.neighbors
    }

    /// Update the neighbors and the rendered tile with them
    pub fn set_neighbors(&mut self, neighbors: impl Into<Neighbors>) {
        let neighbors = neighbors.into();
        self.source = self.tile.render(neighbors).source;
        self.neighbors = neighbors;
    }

    pub fn source(&self) -> Rect {
        self.source
    }

    pub fn sprite(&self) -> Sprite {
        Sprite {
            x: self.x,
            y: self.y,
            w: self.w,
            h: self.h,
            image: self.tile.image().clone(),
            source: self.source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::neighbors::{bits::*, Direction};

    #[test]
    fn test_render_uses_layout_positions() {
        let tile = Autotile::new("sprites/autotile-tileset.png", 32, None);
        assert_eq!(tile.size(), 32);
        assert_eq!(tile.render(0u8).source, Rect::square(6 * 32, 0, 32));
        assert_eq!(tile.render(ALL).source, Rect::square(32, 5 * 32, 32));
        assert_eq!(tile.render(0u8).w, 32);
        assert_eq!(tile.render(0u8).image.as_str(), "sprites/autotile-tileset.png");
    }

    #[test]
    fn test_rects_shared_between_equivalent_bitmasks() {
        let tile = Autotile::new("tiles.png", 16, None);
        assert_eq!(tile.distinct_rects(), 47);
        // Diagonal without both flanking sides does not change the tile
        assert_eq!(tile.render(UP | UP_RIGHT), tile.render(UP));
        assert!(std::ptr::eq(tile.render(UP | UP_RIGHT), tile.render(UP)));
    }

    #[test]
    fn test_full_tileset_has_one_rect_per_bitmask() {
        let tile = Autotile::new("full.png", 8, Some(TilesetLayout::full_tileset()));
        assert_eq!(tile.distinct_rects(), 256);
        assert_eq!(tile.render(0x11u8).source, Rect::square(8, 14 * 8, 8));
    }

    #[test]
    fn test_render_accepts_neighbors() {
        let tile = Autotile::new("tiles.png", 16, None);
        let n = Neighbors::from_directions(&[Direction::Left, Direction::Right]);
        assert_eq!(tile.render(n), tile.render(LEFT | RIGHT));
    }

    #[test]
    fn test_instance_follows_neighbors() {
        let tile = Autotile::new("tiles.png", 16, None);
        let mut instance = tile.create_instance(200, 200);
        assert_eq!(instance.neighbors(), Neighbors::NONE);
        assert_eq!(instance.source(), tile.render(0u8).source);
        assert_eq!((instance.w, instance.h), (16, 16));

        instance.set_neighbors(Neighbors::ALL);
        assert_eq!(instance.neighbors(), Neighbors::ALL);
        assert_eq!(instance.source(), tile.render(ALL).source);

        let sprite = instance.sprite();
        assert_eq!((sprite.x, sprite.y), (200, 200));
        assert_eq!(sprite.source, tile.render(ALL).source);
    }
}
