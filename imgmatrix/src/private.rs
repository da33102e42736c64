// private.rs
//
// Copyright (c) 2019-2025  Douglas Lau
//
//! Private module for top-level items
use crate::{
    decode::{self, Rendering},
    encode,
    matrix::IndexMatrix,
    pixel::{Pixel, DEFAULT_COLOR},
    Result,
};
use pix::{rgb::SRgba8, Raster};

/// Default scale factor for rendering
pub const DEFAULT_SCALE: u32 = 1;

/// Default maximum image size for encoding, in bytes
const MAX_IMAGE_SZ: usize = 1 << 25;

/// Image to index matrix encoder
///
/// The top-left pixel of an image is its background, which must be one of
/// the [background](struct.Pixel.html#associatedconstant.BACKGROUNDS)
/// colors.  Background pixels become index `0`; all other colors are ranked
/// by descending frequency, starting at index `1`.  Colors with equal
/// frequency are ranked in the order they were first seen, scanning rows
/// from top to bottom, and pixels from left to right.
///
/// ## Example: Encode a `Raster`
/// ```
/// use imgmatrix::{rgba_raster, Encoder, Layout};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let white: [u8; 4] = [255, 255, 255, 255];
/// let red: [u8; 4] = [255, 0, 0, 255];
/// let blue: [u8; 4] = [0, 0, 255, 255];
/// let buf = [white, white, red, blue].concat();
/// let raster = rgba_raster(2, 2, Layout::Rgba, &buf)?;
/// let matrix = Encoder::default().encode(&raster)?;
/// assert_eq!(matrix.to_string(), "[[0,0],[1,2]]");
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct Encoder {
    /// Maximum image size, in bytes
    max_image_sz: Option<usize>,
}

/// Index matrix to image decoder
///
/// Index `k` is rendered with palette color `k - 1`; index `0` is fully
/// transparent.  Any index beyond the end of the palette is rendered with
/// the first palette color, and counted in the
/// [deficiency](struct.Rendering.html#method.deficiency).
///
/// ## Example: Render a matrix
/// ```
/// use imgmatrix::{Decoder, IndexMatrix, Pixel};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let matrix: IndexMatrix = "[[1,1,0,1,1],[0,0,1,0,0],[1,1,0,1,1]]".parse()?;
/// let rendering = Decoder::default()
///     .with_palette(vec![Pixel::new(222, 0, 222, 255)])
///     .with_scale(4)
///     .decode(&matrix)?;
/// assert_eq!(rendering.deficiency(), 0);
/// assert_eq!(rendering.raster().width(), 20);
/// assert_eq!(rendering.raster().height(), 12);
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct Decoder {
    /// Render palette; the first color is also the overflow color
    palette: Vec<Pixel>,
    /// Scale factor
    scale: u32,
    /// Maximum image size, in bytes
    max_image_sz: Option<usize>,
}

impl Default for Encoder {
    fn default() -> Self {
        Encoder {
            max_image_sz: Some(MAX_IMAGE_SZ),
        }
    }
}

impl Encoder {
    /// Create a new encoder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum image size (in bytes) to allow for encoding.
    pub fn max_image_sz(mut self, max_image_sz: Option<usize>) -> Self {
        self.max_image_sz = max_image_sz;
        self
    }

    /// Encode a raster into an index matrix.
    pub fn encode(&self, raster: &Raster<SRgba8>) -> Result<IndexMatrix> {
        Ok(self.encode_with_palette(raster)?.0)
    }

    /// Encode a raster into an index matrix, and its colors in rank order.
    ///
    /// Decoding the matrix with that palette reproduces every
    /// non-background pixel of the raster.
    pub fn encode_with_palette(
        &self,
        raster: &Raster<SRgba8>,
    ) -> Result<(IndexMatrix, Vec<Pixel>)> {
        encode::encode_raster(raster, self.max_image_sz)
    }
}

impl Default for Decoder {
    fn default() -> Self {
        Decoder {
            palette: vec![DEFAULT_COLOR],
            scale: DEFAULT_SCALE,
            max_image_sz: None,
        }
    }
}

impl Decoder {
    /// Create a new decoder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the render palette.
    ///
    /// An empty palette is replaced with [DEFAULT_COLOR].
    ///
    /// [DEFAULT_COLOR]: constant.DEFAULT_COLOR.html
    pub fn with_palette(mut self, palette: Vec<Pixel>) -> Self {
        self.palette = if palette.is_empty() {
            vec![DEFAULT_COLOR]
        } else {
            palette
        };
        self
    }

    /// Set the scale factor (must be at least 1).
    pub fn with_scale(mut self, scale: u32) -> Self {
        self.scale = scale;
        self
    }

    /// Set the maximum image size (in bytes) to allow for rendering.
    ///
    /// This applies to the scaled image.  By default, there is no limit.
    pub fn max_image_sz(mut self, max_image_sz: Option<usize>) -> Self {
        self.max_image_sz = max_image_sz;
        self
    }

    /// Get the render palette
    pub fn palette(&self) -> &[Pixel] {
        &self.palette
    }

    /// Get the scale factor
    pub fn scale(&self) -> u32 {
        self.scale
    }

    /// Render an index matrix.
    pub fn decode(&self, matrix: &IndexMatrix) -> Result<Rendering> {
        decode::render(matrix, &self.palette, self.scale, self.max_image_sz)
    }
}
