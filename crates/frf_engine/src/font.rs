//! Font construction and glyph lookup.
//!
//! A [`FrfFont`] is built once, either from a source bitmap plus optional
//! map/width token lists (encoder path) or by the container reader, and is
//! immutable afterwards. Glyphs are kept deduplicated and sorted ascending
//! by codepoint, which is also the order every container section uses.

use crate::{FrfError, Glyph, Notice, PbmImage, Result, TileGrid};

/// An ordered, deduplicated glyph collection with its nominal cell box.
#[derive(Debug, Clone)]
pub struct FrfFont {
    cell_width: u8,
    cell_height: u8,
    proportional: bool,
    glyphs: Vec<Glyph>,
}

impl FrfFont {
    /// Assemble a font from already-built glyphs (container reader path).
    ///
    /// Glyphs are sorted by codepoint; duplicates are not expected from a
    /// well-formed container and are kept as-is.
    pub(crate) fn from_parts(cell_width: u8, cell_height: u8, proportional: bool, mut glyphs: Vec<Glyph>) -> Self {
        glyphs.sort_by_key(|g| g.codepoint);
        Self {
            cell_width,
            cell_height,
            proportional,
            glyphs,
        }
    }

    /// Build a font from a source bitmap (encoder path).
    ///
    /// `map` is a whitespace separated list of hex codepoints assigning a
    /// codepoint to each tile in row-major order; without it tiles map to
    /// their own index. `widths` is a whitespace separated list of decimal
    /// per-glyph advance widths; without it every glyph advances by the
    /// cell width and the font is monospaced.
    ///
    /// Non-fatal adjustments (identity mapping, short map/width lists,
    /// removed duplicates) are returned as [`Notice`]s and logged; a map
    /// or width list with more entries than the image admits is an error.
    pub fn build(image: &PbmImage, cell_width: u8, cell_height: u8, map: Option<&str>, widths: Option<&str>) -> Result<(Self, Vec<Notice>)> {
        let grid = TileGrid::new(image, cell_width, cell_height)?;
        let mut count = grid.count();
        let mut notices = Vec::new();

        let codepoints = match map {
            Some(text) => {
                let list = parse_codepoints(text)?;
                if list.len() > count {
                    return Err(FrfError::MapTooLarge {
                        entries: list.len(),
                        capacity: count,
                    });
                }
                if list.len() < count {
                    count = list.len();
                    notices.push(Notice::MapTruncated { used: count });
                }
                Some(list)
            }
            None => {
                notices.push(Notice::IdentityMapping);
                None
            }
        };

        let width_list = match widths {
            Some(text) => {
                let list = parse_widths(text)?;
                if list.len() > count {
                    return Err(FrfError::WidthsTooLarge {
                        entries: list.len(),
                        capacity: count,
                    });
                }
                if list.len() < count {
                    count = list.len();
                    notices.push(Notice::WidthsTruncated { used: count });
                }
                Some(list)
            }
            None => None,
        };

        // The container stores the glyph count as u16.
        if count > u16::MAX as usize {
            return Err(FrfError::TooManyGlyphs { count });
        }

        let mut table: Vec<Glyph> = Vec::with_capacity(count);
        for i in 0..count {
            let codepoint = match &codepoints {
                Some(list) => list[i],
                None => i as u16,
            };
            let width = match &width_list {
                Some(list) => list[i],
                None => cell_width,
            };
            let rows = grid.tile(i);
            table.push(Glyph::from_rows(codepoint, width, &rows[..cell_height as usize]));
        }

        // Collapse duplicate codepoints (later entry wins) and order the
        // table ascending in one go.
        let mut by_codepoint = std::collections::BTreeMap::new();
        for glyph in table {
            by_codepoint.insert(glyph.codepoint, glyph);
        }
        if by_codepoint.len() != count {
            notices.push(Notice::DuplicatesRemoved {
                count: count - by_codepoint.len(),
            });
        }
        let deduped: Vec<Glyph> = by_codepoint.into_values().collect();

        for notice in &notices {
            match notice {
                Notice::IdentityMapping => log::warn!("{notice}"),
                _ => log::info!("{notice}"),
            }
        }

        Ok((
            Self {
                cell_width,
                cell_height,
                proportional: width_list.is_some(),
                glyphs: deduped,
            },
            notices,
        ))
    }

    /// Nominal (maximum) glyph width in pixels.
    #[inline]
    pub fn cell_width(&self) -> u8 {
        self.cell_width
    }

    /// Glyph height in pixels; renderers use this as the line height.
    #[inline]
    pub fn cell_height(&self) -> u8 {
        self.cell_height
    }

    /// Vertical advance for renderers, same as [`Self::cell_height`].
    #[inline]
    pub fn line_height(&self) -> u8 {
        self.cell_height
    }

    /// Whether the font carries an explicit per-glyph width table.
    #[inline]
    pub fn is_proportional(&self) -> bool {
        self.proportional
    }

    /// Number of glyphs in the font.
    #[inline]
    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    /// All glyphs, ascending by codepoint.
    #[inline]
    pub fn glyphs(&self) -> &[Glyph] {
        &self.glyphs
    }

    /// Look up a glyph by codepoint.
    pub fn glyph_at(&self, codepoint: u16) -> Option<&Glyph> {
        self.glyphs.binary_search_by_key(&codepoint, |g| g.codepoint).ok().map(|i| &self.glyphs[i])
    }

    /// Look up the glyph for a character.
    ///
    /// Returns `None` for characters outside the table (including anything
    /// above U+FFFF); substituting a fallback glyph is the caller's call.
    pub fn glyph(&self, ch: char) -> Option<&Glyph> {
        let codepoint = u16::try_from(ch as u32).ok()?;
        self.glyph_at(codepoint)
    }
}

/// Parse a whitespace separated list of hex codepoints, `0x` prefix
/// optional.
fn parse_codepoints(text: &str) -> Result<Vec<u16>> {
    text.split_whitespace()
        .map(|token| {
            let digits = token.trim_start_matches("0x").trim_start_matches("0X");
            u16::from_str_radix(digits, 16).map_err(|_| FrfError::invalid_token(token, "font map"))
        })
        .collect()
}

/// Parse a whitespace separated list of decimal widths.
fn parse_widths(text: &str) -> Result<Vec<u8>> {
    text.split_whitespace()
        .map(|token| token.parse::<u8>().map_err(|_| FrfError::invalid_token(token, "widths map")))
        .collect()
}
