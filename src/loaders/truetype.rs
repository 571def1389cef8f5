// pixelglyph/src/loaders/truetype.rs
//
// Copyright © 2026 The Pixelglyph Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! A loader that reads TrueType fonts straight from their `sfnt` tables.
//!
//! Only quadratic (`glyf`) outlines and format 4 Unicode character maps are understood.

use std::fmt::{self, Debug, Formatter};
use std::sync::Arc;

use crate::error::{FontLoadingError, GlyphLoadingError};
use crate::geometry::{self, Transform2F, Vector2F};
use crate::loader::Loader;
use crate::loaders::glyf;
use crate::metrics::Metrics;
use crate::path::PathSink;
use crate::reader::FontReader;

const SFNT_VERSION_TRUETYPE: u32 = 0x0001_0000;
const SFNT_VERSION_APPLE: u32 = u32::from_be_bytes(*b"true");

const CMAP: u32 = u32::from_be_bytes(*b"cmap");
const GLYF: u32 = u32::from_be_bytes(*b"glyf");
const HEAD: u32 = u32::from_be_bytes(*b"head");
const HHEA: u32 = u32::from_be_bytes(*b"hhea");
const HMTX: u32 = u32::from_be_bytes(*b"hmtx");
const LOCA: u32 = u32::from_be_bytes(*b"loca");
const MAXP: u32 = u32::from_be_bytes(*b"maxp");

const HEAD_VERSION: u32 = 0x0001_0000;
const HEAD_MAGIC_NUMBER: u32 = 0x5f0f_3cf5;
const HEAD_LENGTH: usize = 54;
const HHEA_LENGTH: usize = 36;
const MAXP_VERSION_1_0: u32 = 0x0001_0000;
const MAXP_VERSION_0_5: u32 = 0x0000_5000;
const MAXP_LENGTH_1_0: usize = 32;
const MAXP_LENGTH_0_5: usize = 6;

const PLATFORM_UNICODE: u16 = 0;
const PLATFORM_WINDOWS: u16 = 3;
const ENCODING_UNICODE_BMP: u16 = 3;
const ENCODING_WINDOWS_BMP: u16 = 1;

/// The number of entries in the character map: one per Basic Multilingual Plane code point.
const MAPPING_LENGTH: usize = 0x10000;

/// The location of one table within the font data. Always lies within the data.
#[derive(Clone, Copy, Debug, PartialEq)]
struct Table {
    offset: usize,
    length: usize,
}

impl Table {
    #[inline]
    fn data<'a>(&self, font_data: &'a [u8]) -> &'a [u8] {
        &font_data[self.offset..self.offset + self.length]
    }
}

#[derive(Default)]
struct TableDirectory {
    cmap: Option<Table>,
    glyf: Option<Table>,
    head: Option<Table>,
    hhea: Option<Table>,
    hmtx: Option<Table>,
    loca: Option<Table>,
    maxp: Option<Table>,
}

impl TableDirectory {
    fn parse(font_data: &[u8]) -> Result<TableDirectory, FontLoadingError> {
        let mut reader = FontReader::new(font_data);
        match reader.read_u32() {
            Ok(SFNT_VERSION_TRUETYPE) | Ok(SFNT_VERSION_APPLE) => {}
            _ => return Err(FontLoadingError::UnknownFormat),
        }
        let table_count = reader.read_u16()?;
        reader.skip(6)?;

        let mut directory = TableDirectory::default();
        for _ in 0..table_count {
            let tag = reader.read_u32()?;
            reader.skip(4)?;
            let offset = reader.read_u32()? as usize;
            let length = reader.read_u32()? as usize;
            if offset > font_data.len() || font_data.len() - offset < length {
                warn!("`{}` table at {}+{} runs past the end of the font",
                      tag_name(tag),
                      offset,
                      length);
                return Err(FontLoadingError::Parse);
            }

            let table = Table { offset, length };
            match tag {
                CMAP => directory.cmap = Some(table),
                GLYF => directory.glyf = Some(table),
                HMTX => directory.hmtx = Some(table),
                LOCA => directory.loca = Some(table),
                HEAD => {
                    check_length(tag, length, HEAD_LENGTH)?;
                    directory.head = Some(table);
                }
                HHEA => {
                    check_length(tag, length, HHEA_LENGTH)?;
                    directory.hhea = Some(table);
                }
                MAXP => {
                    match FontReader::at(font_data, offset).read_u32()? {
                        MAXP_VERSION_1_0 => check_length(tag, length, MAXP_LENGTH_1_0)?,
                        MAXP_VERSION_0_5 => check_length(tag, length, MAXP_LENGTH_0_5)?,
                        version => {
                            warn!("unknown `maxp` version {:#x}", version);
                            return Err(FontLoadingError::Parse);
                        }
                    }
                    directory.maxp = Some(table);
                }
                _ => {}
            }
        }
        Ok(directory)
    }
}

fn require(table: Option<Table>, tag: u32) -> Result<Table, FontLoadingError> {
    table.ok_or_else(|| {
        warn!("font has no `{}` table", tag_name(tag));
        FontLoadingError::MissingTable(tag.to_be_bytes())
    })
}

fn check_length(tag: u32, length: usize, expected: usize) -> Result<(), FontLoadingError> {
    if length != expected {
        warn!("`{}` table is {} bytes long, expected {}", tag_name(tag), length, expected);
        return Err(FontLoadingError::Parse);
    }
    Ok(())
}

fn tag_name(tag: u32) -> String {
    String::from_utf8_lossy(&tag.to_be_bytes()).into_owned()
}

/// A TrueType font parsed from memory.
#[derive(Clone)]
pub struct Font {
    font_data: Arc<Vec<u8>>,
    transform: Transform2F,
    metrics: Metrics,
    glyph_count: u32,
    h_metric_count: u32,
    long_loca: bool,
    mapping: Arc<[u16]>,
    glyf: Table,
    hmtx: Table,
    loca: Table,
}

impl Font {
    /// Returns the raw contents of the font file.
    #[inline]
    pub fn font_data(&self) -> &Arc<Vec<u8>> {
        &self.font_data
    }
}

impl Loader for Font {
    fn from_bytes(font_data: Arc<Vec<u8>>) -> Result<Font, FontLoadingError> {
        let directory = TableDirectory::parse(&font_data)?;
        let cmap = require(directory.cmap, CMAP)?;
        let glyf = require(directory.glyf, GLYF)?;
        let head = require(directory.head, HEAD)?;
        let hhea = require(directory.hhea, HHEA)?;
        let hmtx = require(directory.hmtx, HMTX)?;
        let loca = require(directory.loca, LOCA)?;
        let maxp = require(directory.maxp, MAXP)?;

        let mut reader = FontReader::at(&font_data, head.offset);
        let version = reader.read_u32()?;
        reader.seek(head.offset + 12);
        let magic_number = reader.read_u32()?;
        if version != HEAD_VERSION || magic_number != HEAD_MAGIC_NUMBER {
            warn!("bad `head` table version {:#x} or magic number {:#x}", version, magic_number);
            return Err(FontLoadingError::Parse);
        }
        reader.seek(head.offset + 18);
        let units_per_em = reader.read_u16()? as u32;
        reader.seek(head.offset + 50);
        let long_loca = match reader.read_i16()? {
            0 => false,
            1 => true,
            format => {
                warn!("unknown `loca` format {}", format);
                return Err(FontLoadingError::Parse);
            }
        };
        if units_per_em == 0 {
            warn!("font has zero units per em");
            return Err(FontLoadingError::Parse);
        }

        let glyph_count = FontReader::at(&font_data, maxp.offset + 4).read_u16()? as u32;

        let mut reader = FontReader::at(&font_data, hhea.offset + 4);
        let ascent = reader.read_i16()? as f32;
        let descent = reader.read_i16()? as f32;
        let line_gap = reader.read_i16()? as f32;
        reader.seek(hhea.offset + 34);
        let h_metric_count = reader.read_u16()? as u32;

        if h_metric_count == 0 || h_metric_count > glyph_count {
            warn!("{} horizontal metrics for {} glyphs", h_metric_count, glyph_count);
            return Err(FontLoadingError::Parse);
        }
        let hmtx_length = h_metric_count as usize * 4 + (glyph_count - h_metric_count) as usize * 2;
        if hmtx.length < hmtx_length {
            warn!("`hmtx` table is {} bytes long, expected at least {}", hmtx.length, hmtx_length);
            return Err(FontLoadingError::Parse);
        }
        let loca_length = (glyph_count as usize + 1) * if long_loca { 4 } else { 2 };
        if loca.length < loca_length {
            warn!("`loca` table is {} bytes long, expected at least {}", loca.length, loca_length);
            return Err(FontLoadingError::Parse);
        }

        let mapping = parse_cmap(cmap.data(&font_data))?;

        debug!("loaded font: {} glyphs, {} units per em, {} loca offsets",
               glyph_count,
               units_per_em,
               if long_loca { "long" } else { "short" });

        Ok(Font {
            font_data,
            transform: geometry::identity(),
            metrics: Metrics { units_per_em, ascent, descent, line_gap },
            glyph_count,
            h_metric_count,
            long_loca,
            mapping: mapping.into(),
            glyf,
            hmtx,
            loca,
        })
    }

    #[inline]
    fn metrics(&self) -> Metrics {
        self.metrics
    }

    #[inline]
    fn glyph_count(&self) -> u32 {
        self.glyph_count
    }

    fn glyph_for_char(&self, character: char) -> Option<u32> {
        match self.mapping.get(character as usize) {
            None | Some(0) => None,
            Some(&glyph_id) => Some(glyph_id as u32),
        }
    }

    #[inline]
    fn transform(&self) -> Transform2F {
        self.transform
    }

    #[inline]
    fn set_transform(&mut self, transform: Transform2F) {
        self.transform = transform;
    }

    fn outline<S>(
        &self,
        glyph_id: u32,
        transform: Transform2F,
        sink: &mut S,
    ) -> Result<(), GlyphLoadingError>
    where
        S: PathSink + ?Sized,
    {
        if glyph_id >= self.glyph_count {
            return Err(GlyphLoadingError::NoSuchGlyph);
        }
        let range = glyf::glyph_range(self.loca.data(&self.font_data), self.long_loca, glyph_id)?;
        let glyph_data = self
            .glyf
            .data(&self.font_data)
            .get(range)
            .ok_or(GlyphLoadingError::Parse)?;
        glyf::emit_outline(glyph_data, transform, sink)
    }

    fn advance(&self, glyph_id: u32) -> Result<Vector2F, GlyphLoadingError> {
        if glyph_id >= self.glyph_count {
            return Err(GlyphLoadingError::NoSuchGlyph);
        }
        let index = glyph_id.min(self.h_metric_count - 1) as usize;
        let advance = FontReader::at(self.hmtx.data(&self.font_data), index * 4).read_u16()?;
        Ok(Vector2F::new(advance as f32, 0.0))
    }
}

impl Debug for Font {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Font")
         .field("glyph_count", &self.glyph_count)
         .field("metrics", &self.metrics)
         .field("transform", &self.transform)
         .finish()
    }
}

/// Reads the first usable Unicode character map into a table with one glyph ID per Basic
/// Multilingual Plane code point.
fn parse_cmap(cmap: &[u8]) -> Result<Box<[u16]>, FontLoadingError> {
    let mut reader = FontReader::new(cmap);
    let version = reader.read_u16()?;
    if version != 0 {
        warn!("unknown `cmap` version {}", version);
        return Err(FontLoadingError::Parse);
    }

    let subtable_count = reader.read_u16()?;
    for _ in 0..subtable_count {
        let platform_id = reader.read_u16()?;
        let encoding_id = reader.read_u16()?;
        let offset = reader.read_u32()? as usize;
        if offset > cmap.len() {
            warn!("`cmap` subtable offset {} is past the end of the table", offset);
            return Err(FontLoadingError::Parse);
        }

        let unicode = match (platform_id, encoding_id) {
            (PLATFORM_UNICODE, ENCODING_UNICODE_BMP) |
            (PLATFORM_WINDOWS, ENCODING_WINDOWS_BMP) => true,
            _ => false,
        };
        if !unicode || FontReader::at(cmap, offset).read_u16()? != 4 {
            continue;
        }

        debug!("using `cmap` subtable for platform {}, encoding {}", platform_id, encoding_id);
        return parse_cmap_format_4(cmap, offset);
    }

    warn!("font has no format 4 Unicode character map");
    Err(FontLoadingError::Parse)
}

fn parse_cmap_format_4(cmap: &[u8], subtable: usize) -> Result<Box<[u16]>, FontLoadingError> {
    let mut mapping = vec![0; MAPPING_LENGTH].into_boxed_slice();

    let segment_count_x2 = FontReader::at(cmap, subtable + 6).read_u16()? as usize;
    let end_codes = subtable + 14;
    let start_codes = end_codes + segment_count_x2 + 2;
    let id_deltas = start_codes + segment_count_x2;
    let id_range_offsets = id_deltas + segment_count_x2;

    for segment in (0..segment_count_x2).step_by(2) {
        let end_code = FontReader::at(cmap, end_codes + segment).read_u16()? as u32;
        let start_code = FontReader::at(cmap, start_codes + segment).read_u16()? as u32;
        let id_delta = FontReader::at(cmap, id_deltas + segment).read_u16()? as u32;
        let id_range_offset = FontReader::at(cmap, id_range_offsets + segment).read_u16()? as usize;

        for code in start_code..=end_code {
            let glyph_id = if id_range_offset == 0 {
                code + id_delta
            } else {
                let glyph_index = id_range_offsets + segment + id_range_offset +
                    2 * (code - start_code) as usize;
                match FontReader::at(cmap, glyph_index).read_u16()? {
                    0 => 0,
                    glyph_id => glyph_id as u32 + id_delta,
                }
            };
            mapping[code as usize] = (glyph_id & 0xffff) as u16;
        }
    }

    Ok(mapping)
}
