use crate::error::Error;
use crate::geometry::Point;
use crate::Result;

/// View pixels moved per pan step.
pub const PAN_STEP: i32 = 40;
pub const MIN_SCALE: i32 = 1;
pub const MAX_SCALE: i32 = 6;

/// Pan and integer zoom state of the interactive view, and the mapping
/// between view space and image space.
///
/// The view's origin sits bottom-left while the raster origin sits top-left,
/// so every conversion carries a vertical axis flip against the image height.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ViewTransform {
    origin: Point,
    scale: i32,
}

impl ViewTransform {
    pub fn new() -> Self {
        ViewTransform {
            origin: Point::new(0, 0),
            scale: MIN_SCALE,
        }
    }

    /// Restore a previously observed pan/zoom state. The scale is not
    /// validated here; the conversions reject anything below [`MIN_SCALE`].
    pub fn with_state(origin: Point, scale: i32) -> Self {
        ViewTransform { origin, scale }
    }

    pub fn origin(&self) -> Point {
        self.origin
    }

    pub fn scale(&self) -> i32 {
        self.scale
    }

    pub fn pan_up(&mut self) {
        self.origin.y += PAN_STEP;
    }

    pub fn pan_down(&mut self) {
        self.origin.y -= PAN_STEP;
    }

    pub fn pan_left(&mut self) {
        self.origin.x -= PAN_STEP;
    }

    pub fn pan_right(&mut self) {
        self.origin.x += PAN_STEP;
    }

    pub fn zoom_in(&mut self) {
        self.scale = (self.scale + 1).min(MAX_SCALE);
    }

    pub fn zoom_out(&mut self) {
        self.scale = (self.scale - 1).max(MIN_SCALE);
    }

    /// Map a point under this pan/zoom into the image pixel grid.
    ///
    /// Both components are floor divided by the scale, matching the discrete
    /// pixel grid. The result may lie outside the image when the user dragged
    /// past the visible sheet; pixel lookups handle that with the black
    /// sentinel rather than failing.
    pub fn to_image_space(&self, view_point: Point, image_height: u32) -> Result<Point> {
        if self.scale < MIN_SCALE {
            return Err(Error::InvalidScale(self.scale));
        }
        let x = (view_point.x - self.origin.x).div_euclid(self.scale);
        let y = (view_point.y - self.origin.y).div_euclid(self.scale);
        Ok(Point::new(x, image_height as i32 - y))
    }

    /// Inverse of [`Self::to_image_space`]: flip the vertical axis first,
    /// then scale up and translate back under the pan offset.
    pub fn to_view_space(&self, image_point: Point, image_height: u32) -> Result<Point> {
        if self.scale < MIN_SCALE {
            return Err(Error::InvalidScale(self.scale));
        }
        let flipped_y = image_height as i32 - image_point.y;
        Ok(Point::new(
            image_point.x * self.scale + self.origin.x,
            flipped_y * self.scale + self.origin.y,
        ))
    }
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self::new()
    }
}
