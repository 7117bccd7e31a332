//! Tile extraction: slicing a source bitmap into per-glyph pixel runs.
//!
//! Tiles are cut from the image in row-major order on a fixed cell grid.
//! Cells do not have to land on byte boundaries; a tile row is read with a
//! shifted load spanning at most two source bytes, then masked down to the
//! cell width. Remainder pixels that do not fill a whole cell are dropped.

use crate::{
    FrfError, PbmImage, Result,
    glyph::{MAX_CELL_HEIGHT, MAX_CELL_WIDTH},
};

/// A fixed-cell view over a source bitmap.
pub struct TileGrid<'a> {
    image: &'a PbmImage,
    cell_width: u8,
    cell_height: u8,
    columns: usize,
}

impl<'a> TileGrid<'a> {
    /// Create a grid over `image` with the given cell size.
    ///
    /// Cell dimensions outside 1-8 x 1-10 are rejected before any tile is
    /// read.
    pub fn new(image: &'a PbmImage, cell_width: u8, cell_height: u8) -> Result<Self> {
        if cell_width < 1 || cell_width > MAX_CELL_WIDTH {
            return Err(FrfError::InvalidCellWidth { width: cell_width });
        }
        if cell_height < 1 || cell_height > MAX_CELL_HEIGHT {
            return Err(FrfError::InvalidCellHeight { height: cell_height });
        }
        Ok(Self {
            image,
            cell_width,
            cell_height,
            columns: image.width / cell_width as usize,
        })
    }

    /// Tiles per image row.
    #[inline]
    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Total number of whole tiles the image admits.
    #[inline]
    pub fn count(&self) -> usize {
        self.columns * (self.image.height / self.cell_height as usize)
    }

    /// Extract tile `index` (row-major) as packed rows, one byte per row
    /// with the cell's pixels left-aligned in the high bits.
    pub fn tile(&self, index: usize) -> [u8; MAX_CELL_HEIGHT as usize] {
        let data = self.image.data();
        let stride = self.image.row_stride();
        let bit_offset = (index % self.columns) * self.cell_width as usize;
        let byte_offset = bit_offset / 8;
        let bit_shift = (bit_offset % 8) as u32;
        let mask = 0xFFu8 << (8 - self.cell_width);

        let mut rows = [0u8; MAX_CELL_HEIGHT as usize];
        for (r, row) in rows.iter_mut().enumerate().take(self.cell_height as usize) {
            let image_row = (index / self.columns) * self.cell_height as usize + r;
            let ofs = image_row * stride + byte_offset;

            let first = data.get(ofs).copied().unwrap_or(0);
            let mut byte = first << bit_shift;
            if bit_shift != 0 {
                let second = data.get(ofs + 1).copied().unwrap_or(0);
                byte |= second >> (8 - bit_shift);
            }
            *row = byte & mask;
        }
        rows
    }
}
