//! The FRF font container format: writer and reader.
//!
//! Layout (all multi-byte integers little-endian):
//!
//! ```text
//! "RIFF" u32-totalSize                       // bytes after this field to EOF
//! "META" u32-size(=4) u8-cellWidth u8-cellHeight u16-glyphCount
//! "CDAT" u32-size     glyphCount * cellHeight packed rows
//! "CWTH" u32-size     glyphCount u8 widths            (optional)
//! "CMAP" u32-size     glyphCount u16 codepoints, ascending
//! ```
//!
//! Every variable-length section is zero padded to a 4 byte boundary and
//! its declared size includes that padding. A missing "CWTH" section is
//! signaled purely by the next magic read being "CMAP"; the decoder models
//! this as a single-token lookahead, never a seek-back.

use crate::{FrfError, FrfFont, Glyph, Result};

const RIFF_MAGIC: &[u8; 4] = b"RIFF";
const META_MAGIC: &[u8; 4] = b"META";
const CDAT_MAGIC: &[u8; 4] = b"CDAT";
const CWTH_MAGIC: &[u8; 4] = b"CWTH";
const CMAP_MAGIC: &[u8; 4] = b"CMAP";

/// Zero padding needed to bring `len` up to a multiple of 4.
#[inline]
fn pad4(len: usize) -> usize {
    (4 - len % 4) % 4
}

/// Serialize a font into the container format.
///
/// The width table section is emitted only for proportional fonts. The
/// glyph count is bounded to u16 at build time, so assembly cannot fail.
pub fn encode(font: &FrfFont) -> Vec<u8> {
    let height = font.cell_height() as usize;
    let count = font.len();

    let mut out = Vec::new();
    out.extend_from_slice(RIFF_MAGIC);
    out.extend_from_slice(&0u32.to_le_bytes()); // patched below

    out.extend_from_slice(META_MAGIC);
    out.extend_from_slice(&4u32.to_le_bytes());
    out.push(font.cell_width());
    out.push(font.cell_height());
    out.extend_from_slice(&(count as u16).to_le_bytes());

    let mut rows = Vec::with_capacity(count * height);
    for glyph in font.glyphs() {
        for y in 0..height {
            rows.push(glyph.row(y));
        }
    }
    write_section(&mut out, CDAT_MAGIC, &rows);

    if font.is_proportional() {
        let widths: Vec<u8> = font.glyphs().iter().map(|g| g.width).collect();
        write_section(&mut out, CWTH_MAGIC, &widths);
    }

    let mut map = Vec::with_capacity(count * 2);
    for glyph in font.glyphs() {
        map.extend_from_slice(&glyph.codepoint.to_le_bytes());
    }
    write_section(&mut out, CMAP_MAGIC, &map);

    let total = (out.len() - 8) as u32;
    out[4..8].copy_from_slice(&total.to_le_bytes());
    out
}

fn write_section(out: &mut Vec<u8>, magic: &[u8; 4], payload: &[u8]) {
    let padding = pad4(payload.len());
    out.extend_from_slice(magic);
    out.extend_from_slice(&((payload.len() + padding) as u32).to_le_bytes());
    out.extend_from_slice(payload);
    out.resize(out.len() + padding, 0);
}

/// Parse a container back into a font.
///
/// The section sequence is strict; the first mismatch is terminal and no
/// partial recovery is attempted.
pub fn decode(data: &[u8]) -> Result<FrfFont> {
    let mut reader = Reader { data, pos: 0 };

    if reader.take(4, "RIFF").map_err(|_| FrfError::NotAContainer)? != RIFF_MAGIC {
        return Err(FrfError::NotAContainer);
    }
    let declared = reader.u32("RIFF").map_err(|_| FrfError::NotAContainer)? as usize;
    if declared != data.len() - 8 {
        return Err(FrfError::SizeMismatch {
            declared,
            actual: data.len() - 8,
        });
    }

    let meta = reader.section(META_MAGIC, "META")?;
    if meta.len() < 4 {
        return Err(FrfError::SectionTruncated { section: "META" });
    }
    let cell_width = meta[0];
    let cell_height = meta[1];
    let count = u16::from_le_bytes([meta[2], meta[3]]) as usize;
    if cell_width < 1 || cell_width > crate::glyph::MAX_CELL_WIDTH {
        return Err(FrfError::InvalidCellWidth { width: cell_width });
    }
    if cell_height < 1 || cell_height > crate::glyph::MAX_CELL_HEIGHT {
        return Err(FrfError::InvalidCellHeight { height: cell_height });
    }

    let bitmaps = reader.section(CDAT_MAGIC, "CDAT")?;
    if bitmaps.len() < count * cell_height as usize {
        return Err(FrfError::SectionTruncated { section: "CDAT" });
    }

    // Single-token lookahead: the next magic is either the optional width
    // table or already the mandatory map section.
    let mut magic = reader.take(4, "CMAP")?;
    let mut widths = None;
    if magic == CWTH_MAGIC {
        let payload = reader.sized_payload("CWTH")?;
        if payload.len() < count {
            return Err(FrfError::SectionTruncated { section: "CWTH" });
        }
        widths = Some(&payload[..count]);
        magic = reader.take(4, "CMAP")?;
    }

    if magic != CMAP_MAGIC {
        return Err(FrfError::MissingSection { section: "CMAP" });
    }
    let map = reader.sized_payload("CMAP")?;
    if map.len() < count * 2 {
        return Err(FrfError::SectionTruncated { section: "CMAP" });
    }

    let mut glyphs = Vec::with_capacity(count);
    for i in 0..count {
        let codepoint = u16::from_le_bytes([map[i * 2], map[i * 2 + 1]]);
        let width = widths.map_or(cell_width, |w| w[i]);
        let rows = &bitmaps[i * cell_height as usize..(i + 1) * cell_height as usize];
        glyphs.push(Glyph::from_rows(codepoint, width, rows));
    }

    Ok(FrfFont::from_parts(cell_width, cell_height, widths.is_some(), glyphs))
}

/// Sequential cursor over the container bytes.
struct Reader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    /// Take `n` bytes; running out inside `section` is terminal.
    fn take(&mut self, n: usize, section: &'static str) -> Result<&'a [u8]> {
        if self.pos + n > self.data.len() {
            return Err(FrfError::MissingSection { section });
        }
        let slice = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    fn u32(&mut self, section: &'static str) -> Result<u32> {
        let bytes = self.take(4, section)?;
        Ok(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    /// Read a size field and its payload (padding included in the size).
    fn sized_payload(&mut self, section: &'static str) -> Result<&'a [u8]> {
        let size = self.u32(section)? as usize;
        if self.pos + size > self.data.len() {
            return Err(FrfError::SectionTruncated { section });
        }
        let slice = &self.data[self.pos..self.pos + size];
        self.pos += size;
        Ok(slice)
    }

    /// Read a whole section after checking its magic.
    fn section(&mut self, magic: &[u8; 4], section: &'static str) -> Result<&'a [u8]> {
        if self.take(4, section)? != magic {
            return Err(FrfError::MissingSection { section });
        }
        self.sized_payload(section)
    }
}
