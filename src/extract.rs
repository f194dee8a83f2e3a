use crate::color::RGBColor;
use crate::error::Error;
use crate::geometry::{PixelBox, Point};
use crate::mask::ForegroundMask;
use crate::raster::RasterImage;
use crate::Result;

/// A finished extraction: the RGBA sprite and whether a secondary color was
/// keyed out of it.
pub struct ExtractedSprite {
    pub image: RasterImage,
    pub secondary_removed: bool,
}

/// Cut a sprite out of `source`.
///
/// The outlined region is cropped, masked against the primary color, cropped
/// again to the mask's bounding box and converted to RGBA. When a secondary
/// color is given, every exactly matching pixel turns fully transparent with
/// its RGB channels left in place. `border` adds a one pixel transparent
/// frame for later sheet packing.
///
/// The region box is normalized before use, so a malformed box is never an
/// error. Fails with [`Error::EmptySprite`] when no pixel in the region
/// differs from the primary color.
pub fn extract(
    source: &RasterImage,
    region: PixelBox,
    primary: RGBColor,
    secondary: Option<RGBColor>,
    border: bool,
) -> Result<ExtractedSprite> {
    let slice = source.crop(region);
    let mask = ForegroundMask::build(&slice, primary);
    let bounds = mask.bounding_box().ok_or(Error::EmptySprite)?;
    log::debug!(
        "foreground bounds ({}, {})..({}, {}) in a {}x{} slice",
        bounds.left,
        bounds.top,
        bounds.right,
        bounds.bottom,
        slice.width(),
        slice.height()
    );
    // bounds carries inclusive cell indices; widen to a half open crop box
    let tight = slice.crop(PixelBox::from_corners(
        Point::new(bounds.left, bounds.top),
        Point::new(bounds.right + 1, bounds.bottom + 1),
    ));
    let mut sprite = tight.to_rgba();
    let mut secondary_removed = false;
    if let Some(key) = secondary {
        let cleared = sprite.clear_alpha_where(key);
        log::debug!("keyed {} pixels of secondary color to transparent", cleared);
        secondary_removed = true;
    }
    let sprite = if border {
        sprite.with_transparent_border()
    } else {
        sprite
    };
    log::info!(
        "extracted {}x{} sprite (secondary removed: {})",
        sprite.width(),
        sprite.height(),
        secondary_removed
    );
    Ok(ExtractedSprite {
        image: sprite,
        secondary_removed,
    })
}
