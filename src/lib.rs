use std::path::PathBuf;

pub use cli::CLIParser;
use geometry::Point;
use raster::RasterImage;
use session::ExtractionSession;

mod cli;
pub mod color;
pub mod error;
pub mod extract;
pub mod geometry;
mod logger;
pub mod mask;
pub mod raster;
pub mod session;
pub mod sheet;
pub mod view;

pub type Result<T> = std::result::Result<T, error::Error>;

pub struct Arguments {
    input_file: PathBuf,
    output_file: PathBuf,
    region: (Point, Point),
    primary_pixel: Point,
    secondary_pixel: Option<Point>,
    border: bool,
}

pub fn extract_sprite_file(arguments: &Arguments) -> Result<()> {
    let source = RasterImage::from_png_file(&arguments.input_file)?;
    log::info!(
        "loaded {}x{} sheet from {}",
        source.width(),
        source.height(),
        arguments.input_file.display()
    );
    let mut session = ExtractionSession::new(source);
    session.pick_primary(arguments.primary_pixel);
    if let Some(pixel) = arguments.secondary_pixel {
        session.pick_secondary(pixel);
    }
    let (corner_a, corner_b) = arguments.region;
    session.outline_start(corner_a);
    session.outline_drag(corner_b);
    let sprite = session.extract_current(arguments.border)?;
    sprite.image.write_png_file(&arguments.output_file)?;
    log::info!(
        "wrote {}x{} sprite to {}",
        sprite.image.width(),
        sprite.image.height(),
        arguments.output_file.display()
    );
    Ok(())
}
