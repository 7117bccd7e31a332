//! Binary portable bitmap (PBM "P4") source reader.
//!
//! Reads the 1-bit source images glyph tiles are cut from. Only the binary
//! variant is accepted; the header is parsed as whitespace separated tokens
//! with `#` comment lines skipped, then the packed pixel payload follows.
//! Each pixel row is padded on disk to a multiple of 8 bits.

use crate::{FrfError, Result};

/// A parsed monochrome bitmap: dimensions plus row-packed pixel data.
#[derive(Debug, Clone)]
pub struct PbmImage {
    /// Image width in pixels
    pub width: usize,
    /// Image height in pixels
    pub height: usize,
    data: Vec<u8>,
}

impl PbmImage {
    /// Parse a binary PBM from raw bytes.
    ///
    /// Fails if the leading magic token is not `P4`. The width and height
    /// header tokens are trusted; no consistency check against the payload
    /// length is performed.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let mut pos = 0;

        let magic = next_token(bytes, &mut pos).ok_or(FrfError::NotAPortableBitmap)?;
        if magic != b"P4" {
            return Err(FrfError::NotAPortableBitmap);
        }

        let width = parse_dimension(bytes, &mut pos)?;
        let height = parse_dimension(bytes, &mut pos)?;

        // Exactly one whitespace byte separates the header from the payload.
        let data_start = (pos + 1).min(bytes.len());
        Ok(Self {
            width,
            height,
            data: bytes[data_start..].to_vec(),
        })
    }

    /// Bytes per packed pixel row on disk.
    #[inline]
    pub fn row_stride(&self) -> usize {
        self.width.div_ceil(8)
    }

    /// The packed pixel payload, `row_stride()` bytes per row.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }
}

fn parse_dimension(bytes: &[u8], pos: &mut usize) -> Result<usize> {
    let token = next_token(bytes, pos).ok_or(FrfError::BitmapHeaderTruncated)?;
    let text = std::str::from_utf8(token).map_err(|_| FrfError::BitmapHeaderTruncated)?;
    Ok(text.parse::<usize>()?)
}

/// Advance past whitespace and `#` comment lines, then return the next
/// token. Leaves `pos` on the delimiter following the token.
fn next_token<'a>(bytes: &'a [u8], pos: &mut usize) -> Option<&'a [u8]> {
    loop {
        while *pos < bytes.len() && bytes[*pos].is_ascii_whitespace() {
            *pos += 1;
        }
        if *pos < bytes.len() && bytes[*pos] == b'#' {
            while *pos < bytes.len() && bytes[*pos] != b'\n' {
                *pos += 1;
            }
            continue;
        }
        break;
    }

    if *pos >= bytes.len() {
        return None;
    }

    let start = *pos;
    while *pos < bytes.len() && !bytes[*pos].is_ascii_whitespace() {
        *pos += 1;
    }
    Some(&bytes[start..*pos])
}
