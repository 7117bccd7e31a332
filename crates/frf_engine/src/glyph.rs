//! Compact packed glyph representation.
//!
//! Each glyph row is stored as a single byte with MSB-first bit ordering:
//! bit 7 is the leftmost pixel. This bounds glyphs to 8 pixels of width,
//! which is a hard constraint of the container's bit-packing scheme.

/// Maximum glyph width in pixels (one packed byte per row)
pub const MAX_CELL_WIDTH: u8 = 8;

/// Maximum glyph height in pixels (one byte per row, 10 rows)
pub const MAX_CELL_HEIGHT: u8 = 10;

/// A single glyph: codepoint, advance width and packed bitmap rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyph {
    /// Unicode scalar value this glyph renders
    pub codepoint: u16,
    /// Advance width in pixels (1-8); equals the font's cell width for
    /// monospaced fonts
    pub width: u8,
    /// Bitmap rows, MSB = leftmost pixel. Only the first `cell_height`
    /// entries of the owning font are meaningful.
    rows: [u8; MAX_CELL_HEIGHT as usize],
}

impl Glyph {
    /// Create a glyph from packed row data.
    ///
    /// Rows beyond `MAX_CELL_HEIGHT` are ignored; missing rows stay blank.
    /// Bits past the advance width are padding and are forced to zero, so
    /// serialized glyphs never carry stray pixels.
    pub fn from_rows(codepoint: u16, width: u8, rows: &[u8]) -> Self {
        let mask = match width.min(MAX_CELL_WIDTH) {
            0 => 0x00,
            w => 0xFFu8 << (8 - w),
        };
        let mut data = [0u8; MAX_CELL_HEIGHT as usize];
        let copy_len = rows.len().min(MAX_CELL_HEIGHT as usize);
        for (dst, src) in data[..copy_len].iter_mut().zip(rows) {
            *dst = src & mask;
        }
        Self {
            codepoint,
            width,
            rows: data,
        }
    }

    /// Get a row as a packed byte (MSB = leftmost pixel).
    #[inline]
    pub fn row(&self, y: usize) -> u8 {
        if y >= MAX_CELL_HEIGHT as usize {
            return 0;
        }
        self.rows[y]
    }

    /// Get a pixel value. Out-of-bounds coordinates read as background.
    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> bool {
        if x >= self.width.min(MAX_CELL_WIDTH) as usize || y >= MAX_CELL_HEIGHT as usize {
            return false;
        }
        (self.rows[y] & (0x80 >> x)) != 0
    }

    /// Check whether every row is blank.
    pub fn is_empty(&self) -> bool {
        self.rows.iter().all(|&b| b == 0)
    }
}
