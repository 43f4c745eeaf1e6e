//! Executes draw commands against RGBA pixel buffers
//!
//! Commands use Y-up rectangles. `image` buffers store rows top to bottom,
//! so every rectangle is flipped exactly once, in [`image_rows`].

use std::collections::HashMap;

use drt_autotile::{Autotile, DrawCommand, ImageHandle, Rect, SourceImage, TilesetSynthesizer};
use image::RgbaImage;

use crate::error::{AtlasError, Result};

/// Image rows covered by a Y-up rectangle, top row first
fn image_rows(rect: Rect, height: u32) -> std::ops::Range<u32> {
    let top = height - rect.top();
    top..top + rect.h
}

fn check_bounds(name: &str, image: &RgbaImage, rect: Rect) -> Result<()> {
    if rect.fits_in(image.width(), image.height()) {
        Ok(())
    } else {
        Err(AtlasError::OutOfBounds {
            image: name.to_string(),
            rect,
            width: image.width(),
            height: image.height(),
        })
    }
}

/// Copy `src` of `source` into `dst` of `target`, scaling nearest-neighbor
/// when the rectangles differ in size
pub fn blit(
    target: &mut RgbaImage,
    dst: Rect,
    source: &RgbaImage,
    src: Rect,
) -> Result<()> {
    check_bounds("target", target, dst)?;
    check_bounds("source", source, src)?;
    if dst.w == 0 || dst.h == 0 || src.w == 0 || src.h == 0 {
        return Ok(());
    }

    let src_rows = image_rows(src, source.height());
    let dst_rows = image_rows(dst, target.height());
    for (dy, row) in dst_rows.enumerate() {
        let sy = src_rows.start + dy as u32 * src.h / dst.h;
        for dx in 0..dst.w {
            let sx = src.x + dx * src.w / dst.w;
            target.put_pixel(dst.x + dx, row, *source.get_pixel(sx, sy));
        }
    }
    Ok(())
}

/// Whether two Y-up regions hold identical pixels
pub fn regions_equal(a: &RgbaImage, a_rect: Rect, b: &RgbaImage, b_rect: Rect) -> Result<bool> {
    check_bounds("first", a, a_rect)?;
    check_bounds("second", b, b_rect)?;
    if (a_rect.w, a_rect.h) != (b_rect.w, b_rect.h) {
        return Ok(false);
    }

    let a_rows = image_rows(a_rect, a.height());
    let b_rows = image_rows(b_rect, b.height());
    for (a_row, b_row) in a_rows.zip(b_rows) {
        for dx in 0..a_rect.w {
            if a.get_pixel(a_rect.x + dx, a_row) != b.get_pixel(b_rect.x + dx, b_row) {
                return Ok(false);
            }
        }
    }
    Ok(true)
}

/// Pixel buffers for the images draw commands refer to
#[derive(Debug, Default)]
pub struct AtlasBaker {
    sources: HashMap<ImageHandle, RgbaImage>,
}

impl AtlasBaker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `pixels` available to commands reading from `handle`
    pub fn register(&mut self, handle: impl Into<ImageHandle>, pixels: RgbaImage) {
        self.sources.insert(handle.into(), pixels);
    }

    pub fn get(&self, handle: &ImageHandle) -> Option<&RgbaImage> {
        self.sources.get(handle)
    }

    /// Run every command against `target`, in order
    pub fn execute(&self, target: &mut RgbaImage, commands: &[DrawCommand]) -> Result<()> {
        for command in commands {
            let source = self
                .sources
                .get(&command.image)
                .ok_or_else(|| AtlasError::MissingImage(command.image.clone()))?;
            blit(target, command.dest, source, command.source).map_err(|e| match e {
                AtlasError::OutOfBounds { image, rect, width, height } if image == "source" => {
                    AtlasError::OutOfBounds {
                        image: command.image.to_string(),
                        rect,
                        width,
                        height,
                    }
                }
                other => other,
            })?;
        }
        Ok(())
    }
}

/// Describe a loaded source image for the synthesizer
pub fn source_image(handle: impl Into<ImageHandle>, pixels: &RgbaImage) -> SourceImage {
    SourceImage::new(handle, pixels.width(), pixels.height())
}

/// Bake the tileset a synthesizer describes, reading parts from `source`
pub fn bake_tileset(source: &RgbaImage, synthesizer: &TilesetSynthesizer) -> Result<RgbaImage> {
    let expected = synthesizer.source();
    if (source.width(), source.height()) != (expected.width, expected.height) {
        return Err(AtlasError::SourceSize {
            image: expected.image.clone(),
            width: expected.width,
            height: expected.height,
            actual_width: source.width(),
            actual_height: source.height(),
        });
    }

    let commands = synthesizer.build_tileset();
    let (width, height) = synthesizer.atlas_size();
    let mut atlas = RgbaImage::new(width, height);

    let mut baker = AtlasBaker::new();
    baker.register(expected.image.clone(), source.clone());
    baker.execute(&mut atlas, &commands)?;

    log::info!(
        "Baked {}x{} atlas from '{}' ({} draw commands)",
        width,
        height,
        expected.image,
        commands.len()
    );
    Ok(atlas)
}

/// Bitmasks whose tile in `atlas` does not reproduce the source parts the
/// synthesizer picks for them. Empty for an atlas baked by [`bake_tileset`].
pub fn round_trip_mismatches(
    atlas: &RgbaImage,
    source: &RgbaImage,
    synthesizer: &TilesetSynthesizer,
) -> Result<Vec<u8>> {
    let tile = Autotile::from_synthesized("atlas", synthesizer);
    let part_size = synthesizer.part_size();

    let mut mismatches = Vec::new();
    for bitmask in 0..=255u8 {
        let rect = tile.render(bitmask).source;
        let mut equal = true;
        for quadrant in synthesizer.generate(bitmask) {
            let dest = Rect::square(
                rect.x + quadrant.offset.0,
                rect.y + quadrant.offset.1,
                part_size,
            );
            equal &= regions_equal(atlas, dest, source, quadrant.source)?;
        }
        if !equal {
            mismatches.push(bitmask);
        }
    }

    if !mismatches.is_empty() {
        log::warn!("{} bitmasks do not round trip", mismatches.len());
    }
    Ok(mismatches)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn filled(width: u32, height: u32, color: [u8; 4]) -> RgbaImage {
        RgbaImage::from_pixel(width, height, Rgba(color))
    }

    #[test]
    fn test_image_rows_flip_y() {
        assert_eq!(image_rows(Rect::new(0, 0, 4, 2), 10), 8..10);
        assert_eq!(image_rows(Rect::new(0, 8, 4, 2), 10), 0..2);
    }

    #[test]
    fn test_blit_bottom_left_lands_in_last_rows() {
        let source = filled(2, 2, [255, 0, 0, 255]);
        let mut target = RgbaImage::new(4, 4);
        blit(&mut target, Rect::square(0, 0, 2), &source, Rect::square(0, 0, 2)).unwrap();

        assert_eq!(target.get_pixel(0, 3).0, [255, 0, 0, 255]);
        assert_eq!(target.get_pixel(1, 2).0, [255, 0, 0, 255]);
        assert_eq!(target.get_pixel(0, 0).0, [0, 0, 0, 0]);
        assert_eq!(target.get_pixel(2, 3).0, [0, 0, 0, 0]);
    }

    #[test]
    fn test_blit_scales_nearest_neighbor() {
        let mut source = RgbaImage::new(2, 1);
        source.put_pixel(0, 0, Rgba([1, 1, 1, 255]));
        source.put_pixel(1, 0, Rgba([2, 2, 2, 255]));
        let mut target = RgbaImage::new(4, 2);
        blit(&mut target, Rect::new(0, 0, 4, 2), &source, Rect::new(0, 0, 2, 1)).unwrap();

        assert_eq!(target.get_pixel(1, 1).0[0], 1);
        assert_eq!(target.get_pixel(2, 0).0[0], 2);
    }

    #[test]
    fn test_blit_out_of_bounds() {
        let source = filled(2, 2, [0, 0, 0, 255]);
        let mut target = RgbaImage::new(4, 4);
        let result = blit(&mut target, Rect::square(3, 0, 2), &source, Rect::square(0, 0, 2));
        assert!(matches!(result, Err(AtlasError::OutOfBounds { width: 4, .. })));
    }

    #[test]
    fn test_blit_overflowing_rects_are_out_of_bounds() {
        let source = filled(2, 2, [0, 0, 0, 255]);
        let mut target = RgbaImage::new(4, 4);
        let result = blit(&mut target, Rect::new(u32::MAX, 0, 2, 2), &source, Rect::square(0, 0, 2));
        assert!(matches!(result, Err(AtlasError::OutOfBounds { image, .. }) if image == "target"));

        let result = blit(&mut target, Rect::square(0, 0, 2), &source, Rect::new(0, u32::MAX, 2, 2));
        assert!(matches!(result, Err(AtlasError::OutOfBounds { image, .. }) if image == "source"));

        let result = regions_equal(&source, Rect::new(u32::MAX, u32::MAX, 1, 1), &source, Rect::square(0, 0, 1));
        assert!(matches!(result, Err(AtlasError::OutOfBounds { .. })));
    }

    #[test]
    fn test_execute_requires_registered_image() {
        let baker = AtlasBaker::new();
        let mut target = RgbaImage::new(4, 4);
        let commands = [DrawCommand {
            image: ImageHandle::new("missing.png"),
            source: Rect::square(0, 0, 2),
            dest: Rect::square(0, 0, 2),
        }];
        assert!(matches!(
            baker.execute(&mut target, &commands),
            Err(AtlasError::MissingImage(handle)) if handle.as_str() == "missing.png"
        ));
    }

    #[test]
    fn test_execute_names_source_in_bounds_error() {
        let mut baker = AtlasBaker::new();
        baker.register("small.png", filled(2, 2, [0, 0, 0, 255]));
        let mut target = RgbaImage::new(8, 8);
        let commands = [DrawCommand {
            image: ImageHandle::new("small.png"),
            source: Rect::square(1, 1, 2),
            dest: Rect::square(0, 0, 2),
        }];
        assert!(matches!(
            baker.execute(&mut target, &commands),
            Err(AtlasError::OutOfBounds { image, .. }) if image == "small.png"
        ));
    }

    #[test]
    fn test_regions_equal() {
        let a = filled(4, 4, [9, 9, 9, 255]);
        let mut b = filled(4, 4, [9, 9, 9, 255]);
        assert!(regions_equal(&a, Rect::square(0, 0, 2), &b, Rect::square(2, 2, 2)).unwrap());

        // Image row 0 is the top of Y-up rect (0, 2)
        b.put_pixel(0, 0, Rgba([0, 0, 0, 255]));
        assert!(!regions_equal(&a, Rect::square(0, 0, 2), &b, Rect::square(0, 2, 2)).unwrap());
        assert!(regions_equal(&a, Rect::square(0, 0, 2), &b, Rect::square(0, 0, 2)).unwrap());
        assert!(!regions_equal(&a, Rect::square(0, 0, 2), &b, Rect::square(0, 0, 1)).unwrap());
    }
}
