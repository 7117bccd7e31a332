//! Unified error types for frf_engine

use thiserror::Error;

/// Main error type for FRF encode/decode operations
#[derive(Debug, Error)]
pub enum FrfError {
    // === I/O Errors ===
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // === Source Image Errors ===
    #[error("Input is not a P4 bitmap")]
    NotAPortableBitmap,

    #[error("Bitmap header is truncated")]
    BitmapHeaderTruncated,

    // === Constraint Errors ===
    #[error("Cell width {width} out of range (1-8)")]
    InvalidCellWidth { width: u8 },

    #[error("Cell height {height} out of range (1-10)")]
    InvalidCellHeight { height: u8 },

    #[error("Font map has more items than possible in image ({entries} items, {capacity} tiles)")]
    MapTooLarge { entries: usize, capacity: usize },

    #[error("Widths map has more items than possible in image ({entries} items, {capacity} tiles)")]
    WidthsTooLarge { entries: usize, capacity: usize },

    #[error("Image admits {count} tiles, more than the format's 65535 glyph limit")]
    TooManyGlyphs { count: usize },

    #[error("Invalid token '{token}' in {file}")]
    InvalidToken { token: String, file: &'static str },

    // === Container Errors ===
    #[error("Not a font container: magic number mismatch")]
    NotAContainer,

    #[error("Container size mismatch: header says {declared}, file has {actual}")]
    SizeMismatch { declared: usize, actual: usize },

    #[error("Missing '{section}' section")]
    MissingSection { section: &'static str },

    #[error("Container truncated inside '{section}' section")]
    SectionTruncated { section: &'static str },

    // === External Errors ===
    #[error("Parse int error: {0}")]
    ParseInt(#[from] std::num::ParseIntError),
}

/// Result type alias for frf_engine operations
pub type Result<T> = std::result::Result<T, FrfError>;

impl FrfError {
    /// Create an invalid-token error for a map or widths file
    pub fn invalid_token(token: impl Into<String>, file: &'static str) -> Self {
        Self::InvalidToken { token: token.into(), file }
    }
}

/// Non-fatal diagnostics reported by the encoder.
///
/// A `Notice` describes an adjustment that was made while building the
/// glyph table; the operation still completes with the adjusted count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// No mapping file was supplied; tiles map directly to codepoints.
    IdentityMapping,
    /// The map file had fewer entries than the image admits.
    MapTruncated { used: usize },
    /// The widths file had fewer entries than the glyph count.
    WidthsTruncated { used: usize },
    /// Duplicate codepoints were collapsed (last one wins).
    DuplicatesRemoved { count: usize },
}

impl std::fmt::Display for Notice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Notice::IdentityMapping => write!(f, "Font mapping not found, mapping directly to Unicode codepoints"),
            Notice::MapTruncated { used } => write!(f, "Font map has fewer items than possible in image, only using first {used}"),
            Notice::WidthsTruncated { used } => write!(f, "Widths map has fewer items than possible in image, only using first {used}"),
            Notice::DuplicatesRemoved { count } => write!(f, "{count} duplicate mappings were removed"),
        }
    }
}
