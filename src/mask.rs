use crate::color::RGBColor;
use crate::geometry::PixelBox;
use crate::raster::RasterImage;

/// A boolean grid aligned 1:1 with an image region. `true` marks a
/// foreground cell, one whose pixel differs from the reference color.
///
/// Built fresh per extraction and discarded after the bounding box is known.
pub struct ForegroundMask {
    width: u32,
    height: u32,
    cells: Vec<bool>,
}

impl ForegroundMask {
    /// Compare every pixel against the reference color, RGB channels only.
    /// The comparison is bit exact per channel; alpha never participates.
    pub fn build(image: &RasterImage, reference: RGBColor) -> Self {
        let mut cells = Vec::with_capacity(image.width() as usize * image.height() as usize);
        for row in 0..image.height() {
            for column in 0..image.width() {
                cells.push(image.pixel(column, row).rgb() != reference);
            }
        }
        ForegroundMask {
            width: image.width(),
            height: image.height(),
            cells,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn cell(&self, column: u32, row: u32) -> bool {
        self.cells[column as usize + row as usize * self.width as usize]
    }

    fn row_has_foreground(&self, row: u32) -> bool {
        let start = row as usize * self.width as usize;
        self.cells[start..start + self.width as usize]
            .iter()
            .any(|&cell| cell)
    }

    /// The box enclosing the foreground, as inclusive cell indices, or
    /// `None` when every cell matches the reference color.
    ///
    /// `top` and `bottom` are found by scanning rows from both ends. `left`
    /// and `right` are taken from the top row only, not across all rows, so
    /// a sprite that is wider below its top row gets clipped. Known
    /// limitation; callers depend on this rule, so it stays.
    pub fn bounding_box(&self) -> Option<PixelBox> {
        let top = (0..self.height).find(|&row| self.row_has_foreground(row))?;
        let bottom = (0..self.height)
            .rev()
            .find(|&row| self.row_has_foreground(row))
            .unwrap_or(top);
        let left = (0..self.width).find(|&column| self.cell(column, top))?;
        let right = (0..self.width)
            .rev()
            .find(|&column| self.cell(column, top))
            .unwrap_or(left);
        Some(PixelBox {
            left: left as i32,
            top: top as i32,
            right: right as i32,
            bottom: bottom as i32,
        })
    }
}
