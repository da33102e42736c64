// lib.rs      imgmatrix crate.
//
// Copyright (c) 2019-2025  Douglas Lau
//
//! Convert images to palette-index matrices, and back again.
//!
//! An [IndexMatrix] describes the shape of an image without its colors:
//! `0` is background, `1` is the most frequent color, `2` the next, and so
//! on.  An [Encoder] makes a matrix from a `Raster`, and a [Decoder] renders
//! a matrix with any palette.
//!
//! ```
//! use imgmatrix::{rgba_raster, Decoder, Encoder, IndexMatrix, Layout};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let white: [u8; 4] = [255, 255, 255, 255];
//! let red: [u8; 4] = [255, 0, 0, 255];
//! let blue: [u8; 4] = [0, 0, 255, 255];
//! let buf = [white, white, red, blue].concat();
//! let raster = rgba_raster(2, 2, Layout::Rgba, &buf)?;
//! let (matrix, palette) = Encoder::default().encode_with_palette(&raster)?;
//! let text = matrix.to_string();
//! assert_eq!(text, "[[0,0],[1,2]]");
//!
//! let matrix: IndexMatrix = text.parse()?;
//! let rendering = Decoder::default().with_palette(palette).decode(&matrix)?;
//! assert_eq!(rendering.deficiency(), 0);
//! let pixels = rendering.raster().as_u8_slice();
//! assert_eq!(&pixels[8..], &[red, blue].concat()[..]);
//! # Ok(())
//! # }
//! ```
//!
//! [Decoder]: struct.Decoder.html
//! [Encoder]: struct.Encoder.html
//! [IndexMatrix]: struct.IndexMatrix.html
#![forbid(unsafe_code)]

mod decode;
mod encode;
mod error;
mod matrix;
mod normalize;
mod pixel;
mod private;

pub use crate::decode::Rendering;
pub use crate::error::{Error, Result};
pub use crate::matrix::IndexMatrix;
pub use crate::normalize::{rgba_raster, Layout};
pub use crate::pixel::{Pixel, DEFAULT_COLOR};
pub use crate::private::{Decoder, Encoder, DEFAULT_SCALE};
