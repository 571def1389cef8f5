// pixelglyph/src/reader.rs
//
// Copyright © 2026 The Pixelglyph Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Bounds-checked big-endian reads over font data.

use byteorder::{BigEndian, ReadBytesExt};
use std::io::Cursor;
use thiserror::Error;

/// A read ran past the end of the data it was given.
#[derive(Clone, Copy, Debug, Error, PartialEq)]
#[error("read past the end of the font data")]
pub struct ReadPastEnd;

pub(crate) struct FontReader<'a> {
    cursor: Cursor<&'a [u8]>,
}

impl<'a> FontReader<'a> {
    #[inline]
    pub(crate) fn new(data: &'a [u8]) -> FontReader<'a> {
        FontReader { cursor: Cursor::new(data) }
    }

    /// Creates a reader positioned at `offset`. Positions past the end are allowed; the first
    /// read from one fails.
    #[inline]
    pub(crate) fn at(data: &'a [u8], offset: usize) -> FontReader<'a> {
        let mut reader = FontReader::new(data);
        reader.seek(offset);
        reader
    }

    #[inline]
    pub(crate) fn seek(&mut self, offset: usize) {
        self.cursor.set_position(offset as u64);
    }

    #[inline]
    pub(crate) fn position(&self) -> usize {
        self.cursor.position() as usize
    }

    pub(crate) fn skip(&mut self, count: usize) -> Result<(), ReadPastEnd> {
        let position = self.position().checked_add(count).ok_or(ReadPastEnd)?;
        if position > self.cursor.get_ref().len() {
            return Err(ReadPastEnd);
        }
        self.seek(position);
        Ok(())
    }

    #[inline]
    pub(crate) fn read_u8(&mut self) -> Result<u8, ReadPastEnd> {
        self.cursor.read_u8().map_err(|_| ReadPastEnd)
    }

    #[inline]
    pub(crate) fn read_u16(&mut self) -> Result<u16, ReadPastEnd> {
        self.cursor.read_u16::<BigEndian>().map_err(|_| ReadPastEnd)
    }

    #[inline]
    pub(crate) fn read_i16(&mut self) -> Result<i16, ReadPastEnd> {
        self.cursor.read_i16::<BigEndian>().map_err(|_| ReadPastEnd)
    }

    #[inline]
    pub(crate) fn read_u32(&mut self) -> Result<u32, ReadPastEnd> {
        self.cursor.read_u32::<BigEndian>().map_err(|_| ReadPastEnd)
    }
}
