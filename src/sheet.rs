use crate::error::Error;
use crate::raster::{PixelLayout, RasterImage};
use crate::Result;

/// Size of a sprite that broke the uniform sheet precondition, reported so
/// the user can tell which extraction to redo.
#[derive(Debug)]
pub struct SpriteDimension {
    pub index: usize,
    pub width: u32,
    pub height: u32,
}

/// The ordered collection of accepted sprites. Append only until an explicit
/// reset; consumed when compositing the final sheet.
#[derive(Default)]
pub struct SpriteCollection {
    sprites: Vec<RasterImage>,
}

impl SpriteCollection {
    pub fn new() -> Self {
        SpriteCollection {
            sprites: Vec::new(),
        }
    }

    pub fn push(&mut self, sprite: RasterImage) {
        self.sprites.push(sprite);
    }

    pub fn len(&self) -> usize {
        self.sprites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sprites.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&RasterImage> {
        self.sprites.get(index)
    }

    pub fn first(&self) -> Option<&RasterImage> {
        self.sprites.first()
    }

    pub fn last(&self) -> Option<&RasterImage> {
        self.sprites.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RasterImage> {
        self.sprites.iter()
    }

    pub fn reset(&mut self) {
        self.sprites.clear();
    }
}

/// Paste every accepted sprite side by side onto one transparent canvas,
/// sprite `i` at `x = i * width`.
///
/// All sprites must share the dimensions of the first one; offenders are
/// listed by index in [`Error::SheetDimensionMismatch`]. An empty collection
/// is [`Error::EmptySheet`].
pub fn composite_sheet(collection: &SpriteCollection) -> Result<RasterImage> {
    let first = collection.first().ok_or(Error::EmptySheet)?;
    let sprite_width = first.width();
    let sprite_height = first.height();
    let offenders: Vec<SpriteDimension> = collection
        .iter()
        .enumerate()
        .filter(|(_, sprite)| {
            sprite.width() != sprite_width || sprite.height() != sprite_height
        })
        .map(|(index, sprite)| SpriteDimension {
            index,
            width: sprite.width(),
            height: sprite.height(),
        })
        .collect();
    if !offenders.is_empty() {
        return Err(Error::SheetDimensionMismatch(
            sprite_width,
            sprite_height,
            offenders,
        ));
    }
    let mut sheet = RasterImage::new(
        sprite_width * collection.len() as u32,
        sprite_height,
        PixelLayout::Rgba,
    );
    for (index, sprite) in collection.iter().enumerate() {
        sheet.blit_from(&sprite.to_rgba(), index as u32 * sprite_width, 0);
    }
    log::info!(
        "composited {} sprites into a {}x{} sheet",
        collection.len(),
        sheet.width(),
        sheet.height()
    );
    Ok(sheet)
}
