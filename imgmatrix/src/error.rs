// error.rs
//
// Copyright (c) 2019-2025  Douglas Lau
//
use crate::pixel::Pixel;
use std::fmt;
use std::num::TryFromIntError;

/// Errors encountered while encoding or decoding
#[derive(Debug)]
pub enum Error {
    /// Integer out of bounds.
    TryFromInt(TryFromIntError),
    /// Matrix text is not a nested array of non-negative integers.
    Json(serde_json::Error),
    /// Top-left pixel is not one of the
    /// [background](struct.Pixel.html#associatedconstant.BACKGROUNDS)
    /// colors.
    UnsupportedBackground(Pixel),
    /// Matrix is empty, or its rows have unequal lengths.
    MalformedMatrix,
    /// Palette color is not four comma-separated values in `0..=255`.
    MalformedColor,
    /// Scale factor is zero.
    InvalidScale,
    /// Raster has zero width / height, or its buffer size does not match.
    InvalidRasterDimensions,
    /// Image larger than specified by `max_image_sz`.
    TooLargeImage,
    /// Palette is missing this many colors to render every index.
    PaletteDeficiency(u32),
}

/// Imgmatrix result type
pub type Result<T> = std::result::Result<T, Error>;

impl fmt::Display for Error {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::TryFromInt(err) => err.fmt(fmt),
            Error::Json(err) => err.fmt(fmt),
            Error::UnsupportedBackground(clr) => {
                write!(fmt, "unsupported background color ({clr})")
            }
            Error::PaletteDeficiency(n) => {
                write!(fmt, "palette deficiency: {n} more colors needed")
            }
            _ => fmt::Debug::fmt(self, fmt),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match *self {
            Error::TryFromInt(ref err) => Some(err),
            Error::Json(ref err) => Some(err),
            _ => None,
        }
    }
}

impl From<TryFromIntError> for Error {
    fn from(err: TryFromIntError) -> Self {
        Error::TryFromInt(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json(err)
    }
}
