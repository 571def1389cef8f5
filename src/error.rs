// pixelglyph/src/error.rs
//
// Copyright © 2026 The Pixelglyph Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Various types of errors that `pixelglyph` can return.

use std::convert::From;
use std::io;
use thiserror::Error;

use crate::reader::ReadPastEnd;

/// Reasons why a loader might fail to load a font.
///
/// Every variant means the same thing to a caller: no font was produced.
#[derive(Debug, Error)]
pub enum FontLoadingError {
    /// The data did not start with a TrueType `sfnt` signature.
    #[error("unknown format")]
    UnknownFormat,

    /// A table the engine needs (`cmap`, `glyf`, `head`, `hhea`, `hmtx`, `loca` or `maxp`) is
    /// absent.
    #[error("missing `{}` table", String::from_utf8_lossy(.0))]
    MissingTable([u8; 4]),

    /// Attempted to load a malformed or corrupted font.
    #[error("parse error")]
    Parse,

    /// A disk or similar I/O error occurred while attempting to load the font.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl From<ReadPastEnd> for FontLoadingError {
    fn from(_: ReadPastEnd) -> FontLoadingError {
        FontLoadingError::Parse
    }
}

/// Reasons why a font might fail to load a glyph.
#[derive(PartialEq, Debug, Error)]
pub enum GlyphLoadingError {
    /// The font didn't contain a glyph with that ID.
    #[error("no such glyph")]
    NoSuchGlyph,

    /// The glyph's outline data runs past the end of its table.
    #[error("malformed glyph outline")]
    Parse,
}

impl From<ReadPastEnd> for GlyphLoadingError {
    fn from(_: ReadPastEnd) -> GlyphLoadingError {
        GlyphLoadingError::Parse
    }
}
