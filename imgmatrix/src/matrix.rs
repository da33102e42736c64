// matrix.rs
//
// Copyright (c) 2025  Douglas Lau
//
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::slice::ChunksExact;
use std::str::FromStr;

/// Matrix of palette indices.
///
/// Rows correspond to image height, and columns to image width: the cell at
/// row `y`, column `x` describes pixel `(x, y)`.  Index `0` is background;
/// index `k` is the `k`-th most frequent color of the encoded image.
///
/// The text form is a JSON nested array, with one inner array per row:
/// ```
/// use imgmatrix::IndexMatrix;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let matrix: IndexMatrix = "[[1, 1, 0], [0, 2, 0]]".parse()?;
/// assert_eq!(matrix.width(), 3);
/// assert_eq!(matrix.height(), 2);
/// assert_eq!(matrix.to_string(), "[[1,1,0],[0,2,0]]");
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<u32>>", into = "Vec<Vec<u32>>")]
pub struct IndexMatrix {
    /// Number of columns
    width: u32,
    /// Number of rows
    height: u32,
    /// Cells in row-major order
    cells: Vec<u32>,
}

impl IndexMatrix {
    /// Create a matrix from cells in row-major order
    pub(crate) fn with_cells(width: u32, height: u32, cells: Vec<u32>) -> Self {
        debug_assert_eq!(cells.len(), width as usize * height as usize);
        IndexMatrix {
            width,
            height,
            cells,
        }
    }

    /// Create a matrix from a `Vec` of rows.
    ///
    /// All rows must have the same, non-zero length.
    pub fn from_rows(rows: Vec<Vec<u32>>) -> Result<Self> {
        let width = rows.first().map_or(0, Vec::len);
        if width == 0 || rows.iter().any(|row| row.len() != width) {
            return Err(Error::MalformedMatrix);
        }
        let height = u32::try_from(rows.len())?;
        let width = u32::try_from(width)?;
        let cells = rows.into_iter().flatten().collect();
        Ok(IndexMatrix {
            width,
            height,
            cells,
        })
    }

    /// Get the width (row length)
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Get the height (row count)
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Get the index at a column / row
    pub fn get(&self, x: u32, y: u32) -> Option<u32> {
        if x < self.width && y < self.height {
            let i = y as usize * self.width as usize + x as usize;
            self.cells.get(i).copied()
        } else {
            None
        }
    }

    /// Get all cells in row-major order
    pub fn cells(&self) -> &[u32] {
        &self.cells
    }

    /// Get an iterator of rows
    pub fn rows(&self) -> ChunksExact<'_, u32> {
        self.cells.chunks_exact(self.width as usize)
    }

    /// Get the largest index (number of distinct colors when encoded)
    pub fn max_index(&self) -> u32 {
        self.cells.iter().copied().max().unwrap_or(0)
    }

    /// Copy into a `Vec` of rows
    pub fn to_rows(&self) -> Vec<Vec<u32>> {
        self.rows().map(<[u32]>::to_vec).collect()
    }
}

impl TryFrom<Vec<Vec<u32>>> for IndexMatrix {
    type Error = Error;

    fn try_from(rows: Vec<Vec<u32>>) -> Result<Self> {
        IndexMatrix::from_rows(rows)
    }
}

impl From<IndexMatrix> for Vec<Vec<u32>> {
    fn from(matrix: IndexMatrix) -> Self {
        matrix.to_rows()
    }
}

impl fmt::Display for IndexMatrix {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        let text = serde_json::to_string(self).map_err(|_| fmt::Error)?;
        fmt.write_str(&text)
    }
}

impl FromStr for IndexMatrix {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let rows: Vec<Vec<u32>> = serde_json::from_str(s.trim())?;
        IndexMatrix::from_rows(rows)
    }
}
