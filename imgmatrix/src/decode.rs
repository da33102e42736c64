// decode.rs
//
// Copyright (c) 2025  Douglas Lau
//
use crate::matrix::IndexMatrix;
use crate::pixel::{Pixel, DEFAULT_COLOR};
use crate::{Error, Result};
use log::debug;
use pix::rgb::SRgba8;
use pix::Raster;

/// Rendered image from an [IndexMatrix](struct.IndexMatrix.html)
pub struct Rendering {
    /// Rendered raster
    raster: Raster<SRgba8>,
    /// Number of palette colors missing
    deficiency: u32,
}

impl Rendering {
    /// Get the rendered raster
    pub fn raster(&self) -> &Raster<SRgba8> {
        &self.raster
    }

    /// Convert into the rendered raster
    pub fn into_raster(self) -> Raster<SRgba8> {
        self.raster
    }

    /// Get the number of colors missing from the palette.
    ///
    /// Indices beyond the end of the palette were rendered with the first
    /// palette color (overflow color).  When zero, every index was rendered
    /// with its own color.
    pub fn deficiency(&self) -> u32 {
        self.deficiency
    }

    /// Convert into the rendered raster, only if no colors were missing.
    pub fn complete(self) -> Result<Raster<SRgba8>> {
        match self.deficiency {
            0 => Ok(self.raster),
            n => Err(Error::PaletteDeficiency(n)),
        }
    }
}

/// Render an index matrix with a palette, scaling by an integer factor
pub(crate) fn render(
    matrix: &IndexMatrix,
    palette: &[Pixel],
    scale: u32,
    max_image_sz: Option<usize>,
) -> Result<Rendering> {
    if scale == 0 {
        return Err(Error::InvalidScale);
    }
    let palette = if palette.is_empty() {
        &[DEFAULT_COLOR][..]
    } else {
        palette
    };
    let width = matrix.width().checked_mul(scale);
    let height = matrix.height().checked_mul(scale);
    let (width, height) = width.zip(height).ok_or(Error::TooLargeImage)?;
    let sz = usize::try_from(width)?
        .checked_mul(usize::try_from(height)?)
        .and_then(|n| n.checked_mul(4))
        .ok_or(Error::TooLargeImage)?;
    if let Some(max_sz) = max_image_sz {
        if sz > max_sz {
            return Err(Error::TooLargeImage);
        }
    }
    let (buf, deficiency) = paint(matrix, palette)?;
    let buf = if scale > 1 {
        scale_nearest(&buf, matrix.width() as usize, scale as usize)
    } else {
        buf
    };
    debug!(
        "{}x{} matrix: {} colors, deficiency {deficiency}",
        matrix.width(),
        matrix.height(),
        palette.len(),
    );
    let raster = Raster::with_u8_buffer(width, height, buf);
    Ok(Rendering { raster, deficiency })
}

/// Paint matrix cells onto a transparent RGBA buffer
fn paint(matrix: &IndexMatrix, palette: &[Pixel]) -> Result<(Vec<u8>, u32)> {
    let len = u32::try_from(palette.len())?;
    let mut buf = vec![0; matrix.cells().len() * 4];
    let mut deficiency = 0;
    for (px, &idx) in buf.chunks_exact_mut(4).zip(matrix.cells()) {
        if idx == 0 {
            continue;
        }
        let clr = if idx <= len {
            palette[idx as usize - 1]
        } else {
            deficiency = deficiency.max(idx - len);
            palette[0]
        };
        px.copy_from_slice(&clr.channels());
    }
    Ok((buf, deficiency))
}

/// Scale an RGBA buffer by repeating each pixel in a square block
fn scale_nearest(buf: &[u8], width: usize, scale: usize) -> Vec<u8> {
    let mut scaled = Vec::with_capacity(buf.len() * scale * scale);
    for row in buf.chunks_exact(width * 4) {
        let start = scaled.len();
        for px in row.chunks_exact(4) {
            for _ in 0..scale {
                scaled.extend_from_slice(px);
            }
        }
        let end = scaled.len();
        for _ in 1..scale {
            scaled.extend_from_within(start..end);
        }
    }
    scaled
}

#[cfg(test)]
mod test {
    use super::*;

    const MAGENTA: Pixel = Pixel::new(222, 0, 222, 255);

    fn matrix(rows: &[&[u32]]) -> IndexMatrix {
        IndexMatrix::from_rows(rows.iter().map(|r| r.to_vec()).collect())
            .unwrap()
    }

    #[test]
    fn transparent_background() -> Result<()> {
        let m = matrix(&[&[0, 1], &[1, 0]]);
        let r = render(&m, &[MAGENTA], 1, None)?;
        assert_eq!(r.deficiency(), 0);
        assert_eq!(
            r.raster().as_u8_slice(),
            &[0, 0, 0, 0, 222, 0, 222, 255, 222, 0, 222, 255, 0, 0, 0, 0]
        );
        Ok(())
    }

    #[test]
    fn overflow_color() -> Result<()> {
        let gray = Pixel::new(128, 128, 128, 255);
        let m = matrix(&[&[1, 2, 4]]);
        let r = render(&m, &[MAGENTA, gray], 1, None)?;
        assert_eq!(r.deficiency(), 2);
        let px: Vec<_> = r.raster().as_u8_slice().chunks(4).collect();
        assert_eq!(px[0], &MAGENTA.channels());
        assert_eq!(px[1], &gray.channels());
        assert_eq!(px[2], &MAGENTA.channels());
        Ok(())
    }

    #[test]
    fn empty_palette_uses_default() -> Result<()> {
        let m = matrix(&[&[1]]);
        let r = render(&m, &[], 1, None)?;
        assert_eq!(r.deficiency(), 0);
        assert_eq!(r.raster().as_u8_slice(), &DEFAULT_COLOR.channels());
        Ok(())
    }

    #[test]
    fn scale_blocks() {
        let buf = [1, 1, 1, 1, 2, 2, 2, 2, 3, 3, 3, 3, 4, 4, 4, 4];
        let scaled = scale_nearest(&buf, 2, 2);
        let px: Vec<u8> = scaled.chunks(4).map(|c| c[0]).collect();
        assert_eq!(px, vec![1, 1, 2, 2, 1, 1, 2, 2, 3, 3, 4, 4, 3, 3, 4, 4]);
        let scaled = scale_nearest(&buf, 2, 3);
        assert_eq!(scaled.len(), buf.len() * 9);
        let px: Vec<u8> = scaled.chunks(4).map(|c| c[0]).collect();
        assert_eq!(&px[..6], &[1, 1, 1, 2, 2, 2]);
        assert_eq!(&px[12..18], &[1, 1, 1, 2, 2, 2]);
        assert_eq!(&px[18..24], &[3, 3, 3, 4, 4, 4]);
    }

    #[test]
    fn invalid_scale() {
        let m = matrix(&[&[1]]);
        assert!(matches!(render(&m, &[], 0, None), Err(Error::InvalidScale)));
    }

    #[test]
    fn too_large() {
        let m = matrix(&[&[1, 1]]);
        assert!(matches!(
            render(&m, &[], 4, Some(127)),
            Err(Error::TooLargeImage)
        ));
        assert!(render(&m, &[], 4, Some(128)).is_ok());
        assert!(matches!(
            render(&m, &[], u32::MAX, None),
            Err(Error::TooLargeImage)
        ));
    }

    #[test]
    fn complete() {
        let m = matrix(&[&[3]]);
        let r = render(&m, &[MAGENTA], 1, None).unwrap();
        assert!(matches!(r.complete(), Err(Error::PaletteDeficiency(2))));
        let r = render(&m, &[MAGENTA; 3], 1, None).unwrap();
        assert!(r.complete().is_ok());
    }
}
