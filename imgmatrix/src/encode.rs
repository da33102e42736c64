// encode.rs
//
// Copyright (c) 2025  Douglas Lau
//
use crate::matrix::IndexMatrix;
use crate::pixel::Pixel;
use crate::{Error, Result};
use log::{debug, trace};
use pix::rgb::SRgba8;
use pix::Raster;
use std::collections::HashMap;

/// Distinct colors of an image, in first-seen order
#[derive(Default)]
struct ColorTable {
    /// Slot number of each color
    slots: HashMap<Pixel, u32>,
    /// Color and occurrence count of each slot
    counts: Vec<(Pixel, u32)>,
}

impl ColorTable {
    /// Count one occurrence of a color, returning its 1-based slot
    fn count(&mut self, clr: Pixel) -> Result<u32> {
        let slot = match self.slots.get(&clr) {
            Some(slot) => *slot,
            None => {
                let slot = u32::try_from(self.counts.len() + 1)?;
                self.slots.insert(clr, slot);
                self.counts.push((clr, 0));
                slot
            }
        };
        self.counts[slot as usize - 1].1 += 1;
        Ok(slot)
    }

    /// Get slots ordered by descending count.
    ///
    /// Ties keep first-seen order.
    fn ranked(&self) -> Vec<usize> {
        let mut order: Vec<usize> = (0..self.counts.len()).collect();
        order.sort_by(|a, b| self.counts[*b].1.cmp(&self.counts[*a].1));
        order
    }
}

/// Encode a raster into an index matrix and its ranked palette
pub(crate) fn encode_raster(
    raster: &Raster<SRgba8>,
    max_image_sz: Option<usize>,
) -> Result<(IndexMatrix, Vec<Pixel>)> {
    let (width, height) = (raster.width(), raster.height());
    if width == 0 || height == 0 {
        return Err(Error::InvalidRasterDimensions);
    }
    let buf = raster.as_u8_slice();
    if let Some(sz) = max_image_sz {
        if buf.len() > sz {
            return Err(Error::TooLargeImage);
        }
    }
    let mut pixels = buf
        .chunks_exact(4)
        .map(|c| Pixel::new(c[0], c[1], c[2], c[3]));
    let background = pixels.next().ok_or(Error::InvalidRasterDimensions)?;
    if !background.is_background() {
        debug!("{width}x{height} raster: unsupported background {background}");
        return Err(Error::UnsupportedBackground(background));
    }
    let mut table = ColorTable::default();
    let mut cells = Vec::with_capacity(buf.len() / 4);
    cells.push(0);
    for clr in pixels {
        let slot = if clr == background { 0 } else { table.count(clr)? };
        cells.push(slot);
    }
    let order = table.ranked();
    let mut ranks = vec![0; order.len()];
    let mut palette = Vec::with_capacity(order.len());
    for (rank, slot) in order.into_iter().enumerate() {
        let (clr, count) = table.counts[slot];
        trace!("rank {}: {clr} x {count}", rank + 1);
        ranks[slot] = u32::try_from(rank + 1)?;
        palette.push(clr);
    }
    for cell in cells.iter_mut().filter(|c| **c > 0) {
        *cell = ranks[*cell as usize - 1];
    }
    debug!(
        "{width}x{height} raster: background {background}, {} colors",
        palette.len()
    );
    Ok((IndexMatrix::with_cells(width, height, cells), palette))
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::normalize::{rgba_raster, Layout};

    const W: [u8; 4] = [255, 255, 255, 255];
    const R: [u8; 4] = [255, 0, 0, 255];
    const G: [u8; 4] = [0, 255, 0, 255];
    const B: [u8; 4] = [0, 0, 255, 255];

    fn raster(width: u32, height: u32, pixels: &[[u8; 4]]) -> Raster<SRgba8> {
        rgba_raster(width, height, Layout::Rgba, &pixels.concat()).unwrap()
    }

    #[test]
    fn tie_keeps_scan_order() -> Result<()> {
        let r = raster(2, 2, &[W, W, R, B]);
        let (m, palette) = encode_raster(&r, None)?;
        assert_eq!(m.to_rows(), vec![vec![0, 0], vec![1, 2]]);
        assert_eq!(palette, vec![Pixel::from(R), Pixel::from(B)]);
        let r = raster(2, 2, &[W, W, B, R]);
        let (m, palette) = encode_raster(&r, None)?;
        assert_eq!(m.to_rows(), vec![vec![0, 0], vec![1, 2]]);
        assert_eq!(palette, vec![Pixel::from(B), Pixel::from(R)]);
        Ok(())
    }

    #[test]
    fn frequency_rank() -> Result<()> {
        let r = raster(3, 3, &[W, R, G, G, B, G, B, W, B]);
        let (m, palette) = encode_raster(&r, None)?;
        assert_eq!(
            m.to_rows(),
            vec![vec![0, 3, 1], vec![1, 2, 1], vec![2, 0, 2]]
        );
        assert_eq!(
            palette,
            vec![Pixel::from(G), Pixel::from(B), Pixel::from(R)]
        );
        Ok(())
    }

    #[test]
    fn background_only() -> Result<()> {
        let r = raster(2, 1, &[[0, 0, 0, 0], [0, 0, 0, 0]]);
        let (m, palette) = encode_raster(&r, None)?;
        assert_eq!(m.cells(), &[0, 0]);
        assert!(palette.is_empty());
        Ok(())
    }

    #[test]
    fn black_background_keeps_white() -> Result<()> {
        let black = [0, 0, 0, 255];
        let r = raster(3, 1, &[black, W, black]);
        let (m, _) = encode_raster(&r, None)?;
        assert_eq!(m.cells(), &[0, 1, 0]);
        Ok(())
    }

    #[test]
    fn unsupported_background() {
        let r = raster(2, 1, &[R, W]);
        match encode_raster(&r, None) {
            Err(Error::UnsupportedBackground(clr)) => {
                assert_eq!(clr, Pixel::from(R))
            }
            _ => panic!("background accepted"),
        }
        let r = raster(1, 1, &[[255, 255, 255, 128]]);
        assert!(matches!(
            encode_raster(&r, None),
            Err(Error::UnsupportedBackground(_))
        ));
    }

    #[test]
    fn too_large() {
        let r = raster(2, 2, &[W, W, R, B]);
        assert!(matches!(
            encode_raster(&r, Some(15)),
            Err(Error::TooLargeImage)
        ));
        assert!(encode_raster(&r, Some(16)).is_ok());
    }
}
