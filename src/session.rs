use crate::color::RGBColor;
use crate::error::Error;
use crate::extract::{extract, ExtractedSprite};
use crate::geometry::{PixelBox, Point};
use crate::raster::RasterImage;
use crate::sheet::{composite_sheet, SpriteCollection};
use crate::view::ViewTransform;
use crate::Result;

/// One extraction session over a loaded sheet image: the current outline,
/// the picked reference colors, the pan/zoom state and the accepted sprites.
///
/// All selection state lives here instead of in process globals, so several
/// sessions can run independently. Single threaded by design; a concurrent
/// port would put the whole session behind one mutex, since every operation
/// is a read-modify-write of the same selection state.
pub struct ExtractionSession {
    source: RasterImage,
    outline_a: Point,
    outline_b: Point,
    primary: Option<RGBColor>,
    secondary: Option<RGBColor>,
    view: ViewTransform,
    accepted: SpriteCollection,
}

impl ExtractionSession {
    pub fn new(source: RasterImage) -> Self {
        ExtractionSession {
            source,
            outline_a: Point::new(0, 0),
            outline_b: Point::new(0, 0),
            primary: None,
            secondary: None,
            view: ViewTransform::new(),
            accepted: SpriteCollection::new(),
        }
    }

    pub fn source(&self) -> &RasterImage {
        &self.source
    }

    pub fn view(&self) -> &ViewTransform {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut ViewTransform {
        &mut self.view
    }

    /// Map a point from the interactive view into this session's image
    /// space, under the current pan and zoom.
    pub fn map_view_point(&self, view_point: Point) -> Result<Point> {
        self.view.to_image_space(view_point, self.source.height())
    }

    /// Anchor a new outline at `point` (image space). Both corners collapse
    /// onto the anchor until the first drag.
    pub fn outline_start(&mut self, point: Point) {
        self.outline_a = point;
        self.outline_b = point;
    }

    /// Move the outline's free corner (image space).
    pub fn outline_drag(&mut self, point: Point) {
        self.outline_b = point;
    }

    /// The current outline as a normalized box, whatever the drag direction.
    pub fn outline_box(&self) -> PixelBox {
        PixelBox::from_corners(self.outline_a, self.outline_b)
    }

    /// Pick the primary reference color from the sheet. Out-of-range picks
    /// select the black sentinel instead of failing.
    pub fn pick_primary(&mut self, point: Point) -> RGBColor {
        let color = self.source.sample(point);
        log::debug!(
            "primary color ({}, {}, {}) picked at ({}, {})",
            color.red,
            color.green,
            color.blue,
            point.x,
            point.y
        );
        self.primary = Some(color);
        color
    }

    pub fn pick_secondary(&mut self, point: Point) -> RGBColor {
        let color = self.source.sample(point);
        log::debug!(
            "secondary color ({}, {}, {}) picked at ({}, {})",
            color.red,
            color.green,
            color.blue,
            point.x,
            point.y
        );
        self.secondary = Some(color);
        color
    }

    pub fn primary(&self) -> Option<RGBColor> {
        self.primary
    }

    pub fn secondary(&self) -> Option<RGBColor> {
        self.secondary
    }

    pub fn clear_secondary(&mut self) {
        self.secondary = None;
    }

    /// A plain crop of the current outline, without masking or keying. Used
    /// for rough slice saves and previews.
    pub fn slice(&self) -> RasterImage {
        self.source.crop(self.outline_box())
    }

    /// Run the full extraction over the current outline and selections, and
    /// append the sprite to the accepted collection on success.
    pub fn extract_current(&mut self, border: bool) -> Result<ExtractedSprite> {
        let primary = self.primary.ok_or(Error::NoPrimaryColorSelected)?;
        let sprite = extract(
            &self.source,
            self.outline_box(),
            primary,
            self.secondary,
            border,
        )?;
        self.accepted.push(sprite.image.clone());
        Ok(sprite)
    }

    pub fn accepted(&self) -> &SpriteCollection {
        &self.accepted
    }

    /// Composite every accepted sprite into one sheet.
    pub fn composite_sheet(&self) -> Result<RasterImage> {
        composite_sheet(&self.accepted)
    }

    /// Drop the outline, both color selections and all accepted sprites.
    /// The pan/zoom state survives a reset.
    pub fn reset(&mut self) {
        self.outline_a = Point::new(0, 0);
        self.outline_b = Point::new(0, 0);
        self.primary = None;
        self.secondary = None;
        self.accepted.reset();
        log::debug!("session reset");
    }
}
