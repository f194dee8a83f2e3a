use std::fmt::Display;

use crate::sheet::SpriteDimension;

#[derive(Debug)]
pub enum Error {
    InvalidScale(i32),
    EmptySprite,
    NoPrimaryColorSelected,
    EmptySheet,
    SheetDimensionMismatch(u32, u32, Vec<SpriteDimension>),
    SampleOutOfBounds(i32, i32, u32, u32),
    MalformedCoordinatePair(String),
    UnableToOpenInputFileForReading(String, std::io::Error),
    ImageDecodingFailed(String, image::ImageError),
    ImageEncodingFailed(String, image::ImageError),
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidScale(scale) => {
                write!(f, "View scale must be a positive integer, but was {}", scale)
            }
            Self::EmptySprite => {
                write!(
                    f,
                    "Nothing to extract. No pixel in the outlined region differs from the primary color"
                )
            }
            Self::NoPrimaryColorSelected => {
                write!(f, "No primary color selected. Pick one before extracting")
            }
            Self::EmptySheet => {
                write!(f, "Cannot composite a sheet from an empty sprite collection")
            }
            Self::SheetDimensionMismatch(width, height, offenders) => {
                write!(
                    f,
                    "All sprites in a sheet must be {}x{} like the first one. Offending sprites:",
                    width, height
                )?;
                for offender in offenders {
                    write!(
                        f,
                        " #{} is {}x{}",
                        offender.index, offender.width, offender.height
                    )?;
                }
                Ok(())
            }
            Self::SampleOutOfBounds(x, y, width, height) => {
                write!(
                    f,
                    "Pixel ({}, {}) lies outside the {}x{} image",
                    x, y, width, height
                )
            }
            Self::MalformedCoordinatePair(value) => {
                write!(
                    f,
                    "Expected a comma separated list of integers, but got '{}'",
                    value
                )
            }
            Error::UnableToOpenInputFileForReading(path, error) => {
                write!(
                    f,
                    "Unable to open input file '{}' for reading: {}",
                    path, error
                )
            }
            Error::ImageDecodingFailed(path, error) => {
                write!(f, "Decoding of image file '{}' failed: {}", path, error)
            }
            Error::ImageEncodingFailed(path, error) => {
                write!(f, "Encoding of image file '{}' failed: {}", path, error)
            }
        }
    }
}

impl std::error::Error for Error {}
