use std::path::Path;

use image::{DynamicImage, ExtendedColorType, ImageFormat, ImageReader};

use crate::color::{RGBAColor, RGBColor, BLACK};
use crate::error::Error;
use crate::geometry::{PixelBox, Point};
use crate::Result;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PixelLayout {
    Rgb,
    Rgba,
}

impl PixelLayout {
    pub fn channel_count(&self) -> usize {
        match self {
            PixelLayout::Rgb => 3,
            PixelLayout::Rgba => 4,
        }
    }
}

/// An in-memory raster image: a width x height grid of interleaved 8-bit
/// samples, row major, top-left origin.
///
/// Crops always return a new buffer. A sprite cut from a sheet must stay
/// independent of it, so later edits cannot leak back into the source.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RasterImage {
    width: u32,
    height: u32,
    layout: PixelLayout,
    samples: Vec<u8>,
}

impl RasterImage {
    /// An image of the given size with all samples zeroed. In RGBA layout
    /// that is a fully transparent canvas.
    pub fn new(width: u32, height: u32, layout: PixelLayout) -> Self {
        let length = width as usize * height as usize * layout.channel_count();
        RasterImage {
            width,
            height,
            layout,
            samples: vec![0; length],
        }
    }

    pub fn from_samples(width: u32, height: u32, layout: PixelLayout, samples: Vec<u8>) -> Self {
        let expected = width as usize * height as usize * layout.channel_count();
        if samples.len() != expected {
            panic!(
                "Sample buffer of {}x{} {:?} image must hold {} bytes, but holds {}",
                width,
                height,
                layout,
                expected,
                samples.len()
            );
        }
        RasterImage {
            width,
            height,
            layout,
            samples,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn layout(&self) -> PixelLayout {
        self.layout
    }

    fn sample_index(&self, x: u32, y: u32) -> usize {
        (x as usize + y as usize * self.width as usize) * self.layout.channel_count()
    }

    /// Pixel at an in-bounds coordinate. RGB images report full opacity.
    pub fn pixel(&self, x: u32, y: u32) -> RGBAColor {
        let index = self.sample_index(x, y);
        let alpha = match self.layout {
            PixelLayout::Rgb => u8::MAX,
            PixelLayout::Rgba => self.samples[index + 3],
        };
        RGBAColor {
            red: self.samples[index],
            green: self.samples[index + 1],
            blue: self.samples[index + 2],
            alpha,
        }
    }

    pub fn put_pixel(&mut self, x: u32, y: u32, color: RGBAColor) {
        let index = self.sample_index(x, y);
        self.samples[index] = color.red;
        self.samples[index + 1] = color.green;
        self.samples[index + 2] = color.blue;
        if self.layout == PixelLayout::Rgba {
            self.samples[index + 3] = color.alpha;
        }
    }

    /// Interactive color pick. Out-of-range points return the black sentinel
    /// so a stray pick beyond the panned sheet never aborts the session.
    pub fn sample(&self, point: Point) -> RGBColor {
        if self.contains(point) {
            self.pixel(point.x as u32, point.y as u32).rgb()
        } else {
            BLACK
        }
    }

    /// Strict sampling for callers that opted out of clamping.
    pub fn try_sample(&self, point: Point) -> Result<RGBColor> {
        if self.contains(point) {
            Ok(self.pixel(point.x as u32, point.y as u32).rgb())
        } else {
            Err(Error::SampleOutOfBounds(
                point.x,
                point.y,
                self.width,
                self.height,
            ))
        }
    }

    fn contains(&self, point: Point) -> bool {
        point.x >= 0
            && point.y >= 0
            && (point.x as u32) < self.width
            && (point.y as u32) < self.height
    }

    /// Copy the region into a new, independent image. The box is normalized
    /// first and clamped to the image, with `left`/`top` inclusive and
    /// `right`/`bottom` exclusive; a degenerate box yields an empty image.
    pub fn crop(&self, region: PixelBox) -> RasterImage {
        let region = region.normalized();
        let left = region.left.clamp(0, self.width as i32) as u32;
        let right = region.right.clamp(0, self.width as i32) as u32;
        let top = region.top.clamp(0, self.height as i32) as u32;
        let bottom = region.bottom.clamp(0, self.height as i32) as u32;
        let width = right.saturating_sub(left);
        let height = bottom.saturating_sub(top);
        let channels = self.layout.channel_count();
        let mut samples = Vec::with_capacity(width as usize * height as usize * channels);
        for row in top..bottom {
            let start = self.sample_index(left, row);
            let end = start + width as usize * channels;
            samples.extend_from_slice(&self.samples[start..end]);
        }
        RasterImage {
            width,
            height,
            layout: self.layout,
            samples,
        }
    }

    /// The same image in RGBA layout. RGB input gains a fully opaque alpha
    /// channel, RGBA input is copied unchanged.
    pub fn to_rgba(&self) -> RasterImage {
        match self.layout {
            PixelLayout::Rgba => self.clone(),
            PixelLayout::Rgb => {
                let mut samples =
                    Vec::with_capacity(self.width as usize * self.height as usize * 4);
                for pixel in self.samples.chunks_exact(3) {
                    samples.extend_from_slice(pixel);
                    samples.push(u8::MAX);
                }
                RasterImage {
                    width: self.width,
                    height: self.height,
                    layout: PixelLayout::Rgba,
                    samples,
                }
            }
        }
    }

    /// Set alpha to zero on every pixel whose RGB channels exactly match the
    /// key color, leaving the RGB channels untouched so no edge color bleeds
    /// into later compositing. Returns the number of keyed pixels.
    pub fn clear_alpha_where(&mut self, key: RGBColor) -> usize {
        if self.layout != PixelLayout::Rgba {
            panic!("Color keying requires RGBA layout, image is {:?}", self.layout);
        }
        let mut cleared = 0;
        for pixel in self.samples.chunks_exact_mut(4) {
            if pixel[0] == key.red && pixel[1] == key.green && pixel[2] == key.blue {
                pixel[3] = 0;
                cleared += 1;
            }
        }
        cleared
    }

    /// Copy `source` over this image with its top-left corner at
    /// (`dest_x`, `dest_y`), clipped to this image's bounds. Both images must
    /// share the same layout.
    pub fn blit_from(&mut self, source: &RasterImage, dest_x: u32, dest_y: u32) {
        if self.layout != source.layout {
            panic!(
                "Cannot blit {:?} image into {:?} image",
                source.layout, self.layout
            );
        }
        let copy_width = source.width.min(self.width.saturating_sub(dest_x));
        let copy_height = source.height.min(self.height.saturating_sub(dest_y));
        let channels = self.layout.channel_count();
        for row in 0..copy_height {
            let source_start = source.sample_index(0, row);
            let source_end = source_start + copy_width as usize * channels;
            let dest_start = self.sample_index(dest_x, dest_y + row);
            let dest_end = dest_start + copy_width as usize * channels;
            self.samples[dest_start..dest_end]
                .copy_from_slice(&source.samples[source_start..source_end]);
        }
    }

    /// A copy of the image with a one pixel fully transparent border on all
    /// four sides. Keeps packed sprites from visually bleeding into their
    /// neighbors when the sheet is sampled.
    pub fn with_transparent_border(&self) -> RasterImage {
        let source = self.to_rgba();
        let mut bordered = RasterImage::new(source.width + 2, source.height + 2, PixelLayout::Rgba);
        bordered.blit_from(&source, 1, 1);
        bordered
    }

    pub fn from_png_file(path: &Path) -> Result<RasterImage> {
        let reader = ImageReader::open(path).map_err(|e| {
            Error::UnableToOpenInputFileForReading(path.display().to_string(), e)
        })?;
        let decoded = reader
            .decode()
            .map_err(|e| Error::ImageDecodingFailed(path.display().to_string(), e))?;
        let raster = match decoded {
            DynamicImage::ImageRgb8(buffer) => RasterImage {
                width: buffer.width(),
                height: buffer.height(),
                layout: PixelLayout::Rgb,
                samples: buffer.into_raw(),
            },
            DynamicImage::ImageRgba8(buffer) => RasterImage {
                width: buffer.width(),
                height: buffer.height(),
                layout: PixelLayout::Rgba,
                samples: buffer.into_raw(),
            },
            other => {
                let buffer = other.to_rgba8();
                RasterImage {
                    width: buffer.width(),
                    height: buffer.height(),
                    layout: PixelLayout::Rgba,
                    samples: buffer.into_raw(),
                }
            }
        };
        log::debug!(
            "decoded {}x{} {:?} image from {}",
            raster.width,
            raster.height,
            raster.layout,
            path.display()
        );
        Ok(raster)
    }

    pub fn write_png_file(&self, path: &Path) -> Result<()> {
        let color_type = match self.layout {
            PixelLayout::Rgb => ExtendedColorType::Rgb8,
            PixelLayout::Rgba => ExtendedColorType::Rgba8,
        };
        image::save_buffer_with_format(
            path,
            &self.samples,
            self.width,
            self.height,
            color_type,
            ImageFormat::Png,
        )
        .map_err(|e| Error::ImageEncodingFailed(path.display().to_string(), e))
    }
}

#[cfg(test)]
mod test {
    use super::{PixelLayout, RasterImage};
    use crate::color::{RGBAColor, RGBColor, BLACK};
    use crate::error::Error;
    use crate::geometry::{PixelBox, Point};

    // 3x2 RGB image:
    //   red   green red
    //   green red   green
    const TEST_SAMPLES: &[u8] = &[
        255, 0, 0, 0, 255, 0, 255, 0, 0, //
        0, 255, 0, 255, 0, 0, 0, 255, 0, //
    ];

    fn test_image() -> RasterImage {
        RasterImage::from_samples(3, 2, PixelLayout::Rgb, Vec::from(TEST_SAMPLES))
    }

    #[test]
    fn pixel_reads_row_major_with_opaque_alpha() {
        let image = test_image();
        assert_eq!(image.pixel(0, 0).rgb(), RGBColor::red());
        assert_eq!(image.pixel(1, 0).rgb(), RGBColor::green());
        assert_eq!(image.pixel(1, 1).rgb(), RGBColor::red());
        assert_eq!(image.pixel(2, 1).alpha, 255, "rgb image must report opaque pixels");
    }

    #[test]
    fn sampling_out_of_range_returns_the_black_sentinel() {
        let image = test_image();
        assert_eq!(image.sample(Point::new(-1, 0)), BLACK);
        assert_eq!(image.sample(Point::new(0, 2)), BLACK);
        assert_eq!(image.sample(Point::new(3, 0)), BLACK);
        assert_eq!(image.sample(Point::new(2, 0)), RGBColor::red());
    }

    #[test]
    fn strict_sampling_fails_out_of_range() {
        let image = test_image();
        match image.try_sample(Point::new(5, 1)) {
            Err(Error::SampleOutOfBounds(5, 1, 3, 2)) => {}
            other => panic!("expected SampleOutOfBounds, got {:?}", other),
        }
        let sampled = image
            .try_sample(Point::new(0, 1))
            .expect("in range sample must succeed");
        assert_eq!(sampled, RGBColor::green());
    }

    #[test]
    fn crop_to_own_box_is_a_pixel_identical_copy() {
        let image = test_image();
        let full = PixelBox::from_corners(Point::new(0, 0), Point::new(3, 2));
        assert_eq!(image.crop(full), image);
    }

    #[test]
    fn crop_returns_an_independent_buffer() {
        let image = test_image();
        let mut cropped = image.crop(PixelBox::from_corners(Point::new(1, 0), Point::new(3, 2)));
        assert_eq!(cropped.width(), 2);
        assert_eq!(cropped.height(), 2);
        assert_eq!(cropped.pixel(0, 0).rgb(), RGBColor::green());
        cropped.put_pixel(0, 0, RGBAColor::new(9, 9, 9, 255));
        assert_eq!(
            image.pixel(1, 0).rgb(),
            RGBColor::green(),
            "editing a crop must not touch the source"
        );
    }

    #[test]
    fn crop_clamps_to_the_image_and_allows_zero_area() {
        let image = test_image();
        let oversized = image.crop(PixelBox::from_corners(Point::new(-5, -5), Point::new(50, 50)));
        assert_eq!(oversized, image, "clamped crop must equal the full image");
        let empty = image.crop(PixelBox::from_corners(Point::new(1, 1), Point::new(1, 1)));
        assert_eq!(empty.width(), 0);
        assert_eq!(empty.height(), 0);
    }

    #[test]
    fn rgba_conversion_adds_opaque_alpha_only() {
        let image = test_image();
        let rgba = image.to_rgba();
        assert_eq!(rgba.layout(), PixelLayout::Rgba);
        assert_eq!(rgba.width(), image.width());
        assert_eq!(rgba.height(), image.height());
        for y in 0..image.height() {
            for x in 0..image.width() {
                assert_eq!(
                    rgba.pixel(x, y).rgb(),
                    image.pixel(x, y).rgb(),
                    "rgb channels must survive the conversion at ({}, {})",
                    x,
                    y
                );
                assert_eq!(rgba.pixel(x, y).alpha, 255);
            }
        }
    }

    #[test]
    fn keying_clears_alpha_and_keeps_rgb() {
        let mut image = test_image().to_rgba();
        let cleared = image.clear_alpha_where(RGBColor::green());
        assert_eq!(cleared, 3, "number of keyed pixels is wrong");
        assert_eq!(image.pixel(1, 0).alpha, 0);
        assert_eq!(
            image.pixel(1, 0).rgb(),
            RGBColor::green(),
            "rgb channels must stay untouched after keying"
        );
        assert_eq!(image.pixel(0, 0).alpha, 255, "non matching pixels keep alpha");
    }

    #[test]
    fn transparent_border_surrounds_the_image() {
        let bordered = test_image().with_transparent_border();
        assert_eq!(bordered.width(), 5);
        assert_eq!(bordered.height(), 4);
        for x in 0..bordered.width() {
            assert!(bordered.pixel(x, 0).is_transparent(), "top border at x={}", x);
            assert!(bordered.pixel(x, 3).is_transparent(), "bottom border at x={}", x);
        }
        for y in 0..bordered.height() {
            assert!(bordered.pixel(0, y).is_transparent(), "left border at y={}", y);
            assert!(bordered.pixel(4, y).is_transparent(), "right border at y={}", y);
        }
        assert_eq!(bordered.pixel(1, 1).rgb(), RGBColor::red());
        assert_eq!(bordered.pixel(1, 1).alpha, 255);
    }

    #[test]
    #[should_panic]
    fn mismatched_sample_buffer_is_rejected() {
        RasterImage::from_samples(2, 2, PixelLayout::Rgb, vec![0; 5]);
    }
}
