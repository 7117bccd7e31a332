#![warn(clippy::all, clippy::pedantic)]
#![allow(
    clippy::cast_possible_truncation,
    clippy::cast_lossless,
    clippy::must_use_candidate,
    clippy::return_self_not_must_use,
    clippy::missing_errors_doc
)]

//! FRF bitmap font codec.
//!
//! Packs a monochrome source bitmap into per-glyph tiles with optional
//! proportional widths and Unicode mappings, and reads such containers
//! back into a codepoint lookup for renderers.

mod error;
pub use error::*;

mod pbm;
pub use pbm::*;

mod glyph;
pub use glyph::*;

mod tiles;
pub use tiles::*;

mod font;
pub use font::*;

pub mod container;
pub use container::{decode, encode};
