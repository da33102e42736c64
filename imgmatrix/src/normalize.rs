// normalize.rs
//
// Copyright (c) 2025  Douglas Lau
//
use crate::{Error, Result};
use pix::chan::Ch8;
use pix::el::Pixel;
use pix::gray::{SGray8, SGraya8};
use pix::rgb::{SRgb8, SRgba8};
use pix::Raster;

/// Channel layout of a decoded 8-bit pixel buffer
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Layout {
    /// Gray
    Gray,
    /// Gray with alpha
    GrayAlpha,
    /// Red, green, blue
    Rgb,
    /// Red, green, blue, alpha
    Rgba,
}

impl Layout {
    /// Get the number of channels (bytes) per pixel
    pub fn channels(self) -> usize {
        match self {
            Layout::Gray => 1,
            Layout::GrayAlpha => 2,
            Layout::Rgb => 3,
            Layout::Rgba => 4,
        }
    }
}

/// Make an RGBA raster from a decoded pixel buffer.
///
/// Gray channels are copied to red, green and blue; a missing alpha channel
/// becomes fully opaque.
pub fn rgba_raster(
    width: u32,
    height: u32,
    layout: Layout,
    buf: &[u8],
) -> Result<Raster<SRgba8>> {
    if width == 0 || height == 0 {
        return Err(Error::InvalidRasterDimensions);
    }
    let len = usize::try_from(width)?
        .checked_mul(usize::try_from(height)?)
        .and_then(|n| n.checked_mul(layout.channels()))
        .ok_or(Error::InvalidRasterDimensions)?;
    if buf.len() != len {
        return Err(Error::InvalidRasterDimensions);
    }
    let buf = buf.to_vec();
    Ok(match layout {
        Layout::Gray => convert::<SGray8>(width, height, buf),
        Layout::GrayAlpha => convert::<SGraya8>(width, height, buf),
        Layout::Rgb => convert::<SRgb8>(width, height, buf),
        Layout::Rgba => Raster::with_u8_buffer(width, height, buf),
    })
}

/// Convert a buffer of 8-bit pixels to RGBA
fn convert<P>(width: u32, height: u32, buf: Vec<u8>) -> Raster<SRgba8>
where
    P: Pixel<Chan = Ch8>,
{
    let src = Raster::<P>::with_u8_buffer(width, height, buf);
    Raster::with_raster(&src)
}
