// pixelglyph/tests/tests.rs
//
// Copyright © 2026 The Pixelglyph Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

// General tests.

use byteorder::{BigEndian, WriteBytesExt};
use pixelglyph::canvas::{Bitmap, Canvas};
use pixelglyph::colour::Colour;
use pixelglyph::error::{FontLoadingError, GlyphLoadingError};
use pixelglyph::font::Font;
use pixelglyph::geometry::{self, Vector2F};
use pixelglyph::loader::Loader;
use pixelglyph::path::{Path, Segment};
use std::fs;
use std::sync::Arc;

const UNITS_PER_EM: u16 = 1024;
const GLYPH_COUNT: u16 = 6;
const GLYPH_SQUARE: u32 = 5;
const GLYPH_COMPOSITE: u32 = 4;
const GLYPH_TRUNCATED: u32 = 3;
const ADVANCES: [u16; 3] = [512, 640, 768];

const WHITE: u32 = 0xffffffff;

/// The tables of a small font: glyphs 0 to 2 are empty, glyph 3 is truncated, glyph 4 is a
/// composite and glyph 5, mapped from 'A', is a 512-unit square.
fn test_tables() -> Vec<([u8; 4], Vec<u8>)> {
    let mut head = vec![];
    head.write_u32::<BigEndian>(0x00010000).unwrap();
    head.write_u32::<BigEndian>(0x00010000).unwrap(); // font revision
    head.write_u32::<BigEndian>(0).unwrap(); // checksum adjustment
    head.write_u32::<BigEndian>(0x5f0f3cf5).unwrap();
    head.write_u16::<BigEndian>(0).unwrap(); // flags
    head.write_u16::<BigEndian>(UNITS_PER_EM).unwrap();
    head.resize(50, 0);
    head.write_i16::<BigEndian>(0).unwrap(); // short loca
    head.write_i16::<BigEndian>(0).unwrap();

    let mut hhea = vec![];
    hhea.write_u32::<BigEndian>(0x00010000).unwrap();
    hhea.write_i16::<BigEndian>(768).unwrap();
    hhea.write_i16::<BigEndian>(-256).unwrap();
    hhea.write_i16::<BigEndian>(128).unwrap();
    hhea.resize(34, 0);
    hhea.write_u16::<BigEndian>(ADVANCES.len() as u16).unwrap();

    let mut maxp = vec![];
    maxp.write_u32::<BigEndian>(0x00005000).unwrap();
    maxp.write_u16::<BigEndian>(GLYPH_COUNT).unwrap();

    let mut hmtx = vec![];
    for &advance in &ADVANCES {
        hmtx.write_u16::<BigEndian>(advance).unwrap();
        hmtx.write_i16::<BigEndian>(0).unwrap();
    }
    for _ in ADVANCES.len()..GLYPH_COUNT as usize {
        hmtx.write_i16::<BigEndian>(0).unwrap();
    }

    let mut glyf = vec![];
    // Truncated: one contour of three points, but only the header and end points.
    glyf.write_i16::<BigEndian>(1).unwrap();
    glyf.extend_from_slice(&[0; 8]);
    glyf.write_u16::<BigEndian>(2).unwrap();
    glyf.write_u16::<BigEndian>(0).unwrap();
    let composite_start = glyf.len();
    glyf.write_i16::<BigEndian>(-1).unwrap();
    glyf.extend_from_slice(&[0; 8]);
    let square_start = glyf.len();
    glyf.write_i16::<BigEndian>(1).unwrap();
    glyf.extend_from_slice(&[0; 8]);
    glyf.write_u16::<BigEndian>(3).unwrap();
    glyf.write_u16::<BigEndian>(0).unwrap();
    glyf.extend_from_slice(&[0x01 | 0x08, 3]);
    for &x in &[0, 512, 0, -512] {
        glyf.write_i16::<BigEndian>(x).unwrap();
    }
    for &y in &[0, 0, 512, 0] {
        glyf.write_i16::<BigEndian>(y).unwrap();
    }
    let end = glyf.len();

    let mut loca = vec![];
    for &offset in &[0, 0, 0, 0, composite_start, square_start, end] {
        loca.write_u16::<BigEndian>((offset / 2) as u16).unwrap();
    }

    let mut cmap = vec![];
    cmap.write_u16::<BigEndian>(0).unwrap();
    cmap.write_u16::<BigEndian>(1).unwrap();
    cmap.write_u16::<BigEndian>(3).unwrap();
    cmap.write_u16::<BigEndian>(1).unwrap();
    cmap.write_u32::<BigEndian>(12).unwrap();
    for &value in &[4, 32, 0, 4, 4, 1, 0] {
        cmap.write_u16::<BigEndian>(value).unwrap();
    }
    for &value in &[0x41, 0xffff, 0, 0x41, 0xffff] {
        cmap.write_u16::<BigEndian>(value).unwrap();
    }
    cmap.write_u16::<BigEndian>((GLYPH_SQUARE as u16).wrapping_sub(0x41)).unwrap();
    cmap.write_u16::<BigEndian>(1).unwrap();
    cmap.write_u16::<BigEndian>(0).unwrap();
    cmap.write_u16::<BigEndian>(0).unwrap();

    vec![(*b"cmap", cmap),
         (*b"glyf", glyf),
         (*b"head", head),
         (*b"hhea", hhea),
         (*b"hmtx", hmtx),
         (*b"loca", loca),
         (*b"maxp", maxp)]
}

/// Lays out tables behind an `sfnt` header and table directory.
fn sfnt(tables: &[([u8; 4], Vec<u8>)]) -> Vec<u8> {
    let mut data = vec![];
    data.write_u32::<BigEndian>(0x00010000).unwrap();
    data.write_u16::<BigEndian>(tables.len() as u16).unwrap();
    data.extend_from_slice(&[0; 6]);

    let mut offset = 12 + 16 * tables.len();
    for (tag, table) in tables {
        data.extend_from_slice(tag);
        data.write_u32::<BigEndian>(0).unwrap();
        data.write_u32::<BigEndian>(offset as u32).unwrap();
        data.write_u32::<BigEndian>(table.len() as u32).unwrap();
        offset += (table.len() + 3) & !3;
    }
    for (_, table) in tables {
        data.extend_from_slice(table);
        data.resize((data.len() + 3) & !3, 0);
    }
    data
}

fn load(data: Vec<u8>) -> Result<Font, FontLoadingError> {
    Font::from_bytes(Arc::new(data))
}

fn test_font() -> Font {
    load(sfnt(&test_tables())).unwrap()
}

fn table_mut<'a>(tables: &'a mut [([u8; 4], Vec<u8>)], tag: &[u8; 4]) -> &'a mut Vec<u8> {
    &mut tables.iter_mut().find(|(t, _)| t == tag).unwrap().1
}

fn assert_parse_error(result: Result<Font, FontLoadingError>) {
    match result {
        Err(FontLoadingError::Parse) => {}
        other => panic!("expected a parse error, got {:?}", other.map(|_| ())),
    }
}

#[test]
pub fn load_font_from_memory() {
    let font = test_font();
    assert_eq!(font.glyph_count(), GLYPH_COUNT as u32);
    let metrics = font.metrics();
    assert_eq!(metrics.units_per_em, UNITS_PER_EM as u32);
    assert_eq!(metrics.ascent, 768.0);
    assert_eq!(metrics.descent, -256.0);
    assert_eq!(metrics.line_gap, 128.0);
    assert_eq!(metrics.line_height(), 1152.0);
}

#[test]
pub fn load_font_from_file() {
    let path = std::env::temp_dir().join(format!("pixelglyph-{}.ttf", std::process::id()));
    fs::write(&path, sfnt(&test_tables())).unwrap();
    let font = Font::from_path(&path);
    fs::remove_file(&path).unwrap();
    assert_eq!(font.unwrap().glyph_count(), GLYPH_COUNT as u32);

    match Font::from_path("/nonexistent/pixelglyph.ttf") {
        Err(FontLoadingError::Io(_)) => {}
        other => panic!("expected an I/O error, got {:?}", other.map(|_| ())),
    }
}

#[test]
pub fn get_glyph_for_char() {
    let font = test_font();
    assert_eq!(font.glyph_for_char('A'), Some(GLYPH_SQUARE));
    assert_eq!(font.glyph_for_char('B'), None);
    assert_eq!(font.glyph_for_char('\u{1f600}'), None);
}

#[test]
pub fn get_glyph_advance() {
    let font = test_font();
    assert_eq!(font.advance(0), Ok(Vector2F::new(512.0, 0.0)));
    assert_eq!(font.advance(2), Ok(Vector2F::new(768.0, 0.0)));
    // Glyphs past the last horizontal metric reuse its advance.
    assert_eq!(font.advance(GLYPH_SQUARE), Ok(Vector2F::new(768.0, 0.0)));
    assert_eq!(font.advance(GLYPH_COUNT as u32), Err(GlyphLoadingError::NoSuchGlyph));
}

#[test]
pub fn get_glyph_outline() {
    let font = test_font();
    let mut path = Path::new();
    font.outline(GLYPH_SQUARE, geometry::identity(), &mut path).unwrap();
    let segments: Vec<Segment> = path.segments().collect();
    assert_eq!(
        segments,
        vec![
            Segment::MoveTo(Vector2F::new(0.0, 0.0)),
            Segment::LineTo(Vector2F::new(512.0, 0.0)),
            Segment::LineTo(Vector2F::new(512.0, 512.0)),
            Segment::LineTo(Vector2F::new(0.0, 512.0)),
            Segment::LineTo(Vector2F::new(0.0, 0.0)),
        ]
    );
}

#[test]
pub fn get_empty_composite_and_malformed_glyph_outlines() {
    let font = test_font();
    let mut path = Path::new();
    font.outline(0, geometry::identity(), &mut path).unwrap();
    font.outline(GLYPH_COMPOSITE, geometry::identity(), &mut path).unwrap();
    assert_eq!(font.outline(GLYPH_TRUNCATED, geometry::identity(), &mut path),
               Err(GlyphLoadingError::Parse));
    assert_eq!(font.outline(GLYPH_COUNT as u32, geometry::identity(), &mut path),
               Err(GlyphLoadingError::NoSuchGlyph));
    assert!(path.is_empty());
}

#[test]
pub fn reject_unknown_signature() {
    let mut data = sfnt(&test_tables());
    data[0..4].copy_from_slice(b"OTTO");
    match load(data) {
        Err(FontLoadingError::UnknownFormat) => {}
        other => panic!("expected an unknown format, got {:?}", other.map(|_| ())),
    }
    match load(vec![]) {
        Err(FontLoadingError::UnknownFormat) => {}
        other => panic!("expected an unknown format, got {:?}", other.map(|_| ())),
    }
}

#[test]
pub fn accept_apple_signature() {
    let mut data = sfnt(&test_tables());
    data[0..4].copy_from_slice(b"true");
    assert!(load(data).is_ok());
}

#[test]
pub fn reject_oversized_table_directory() {
    let mut data = sfnt(&test_tables());
    data[4..6].copy_from_slice(&[0x0f, 0xff]);
    assert_parse_error(load(data));
}

#[test]
pub fn reject_table_past_end_of_file() {
    let mut data = sfnt(&test_tables());
    let length = data.len() as u32;
    // Stretch the first table's length past the end of the data.
    data[12 + 12..12 + 16].copy_from_slice(&length.to_be_bytes());
    assert_parse_error(load(data));
}

#[test]
pub fn reject_missing_table() {
    let mut tables = test_tables();
    tables.retain(|(tag, _)| tag != b"glyf");
    match load(sfnt(&tables)) {
        Err(FontLoadingError::MissingTable(tag)) => assert_eq!(&tag, b"glyf"),
        other => panic!("expected a missing table, got {:?}", other.map(|_| ())),
    }
}

#[test]
pub fn reject_bad_head() {
    let mut tables = test_tables();
    table_mut(&mut tables, b"head")[12] = 0;
    assert_parse_error(load(sfnt(&tables)));

    let mut tables = test_tables();
    table_mut(&mut tables, b"head").push(0);
    assert_parse_error(load(sfnt(&tables)));

    let mut tables = test_tables();
    table_mut(&mut tables, b"head")[51] = 2;
    assert_parse_error(load(sfnt(&tables)));
}

#[test]
pub fn reject_bad_maxp() {
    let mut tables = test_tables();
    table_mut(&mut tables, b"maxp").extend_from_slice(&[0; 26]);
    assert_parse_error(load(sfnt(&tables)));
}

#[test]
pub fn reject_bad_horizontal_metrics() {
    let mut tables = test_tables();
    table_mut(&mut tables, b"hhea")[35] = GLYPH_COUNT as u8 + 1;
    assert_parse_error(load(sfnt(&tables)));

    let mut tables = test_tables();
    table_mut(&mut tables, b"hmtx").pop();
    assert_parse_error(load(sfnt(&tables)));
}

#[test]
pub fn reject_font_without_unicode_cmap() {
    let mut tables = test_tables();
    // Windows symbol encoding.
    table_mut(&mut tables, b"cmap")[7] = 0;
    assert_parse_error(load(sfnt(&tables)));
}

#[test]
pub fn scale_to_pixels() {
    let mut font = test_font();
    font.scale(16.0, 0.0);
    let corner = font.transform() * Vector2F::new(1024.0, 1024.0);
    assert_eq!(corner, Vector2F::new(16.0, 16.0));

    font.scale(0.0, 32.0);
    assert_eq!(font.transform() * Vector2F::new(1024.0, 1024.0), Vector2F::new(32.0, 32.0));

    font.scale(0.0, 0.0);
    assert_eq!(font.transform() * Vector2F::new(1024.0, 1024.0), Vector2F::new(32.0, 32.0));
}

#[test]
pub fn measure_text() {
    let mut font = test_font();
    font.scale(16.0, 16.0);
    // Two squares at 768 units, then one em of height.
    assert_eq!(font.measure("AA"), Vector2F::new(24.0, 16.0));
    // Unmapped characters advance by glyph 0.
    assert_eq!(font.measure("B"), Vector2F::new(8.0, 16.0));
    assert_eq!(font.measure(""), Vector2F::new(0.0, 16.0));
}

#[test]
pub fn draw_square_glyph() {
    let mut font = test_font();
    font.scale(16.0, 0.0);
    let mut bitmap = Bitmap::new(32, 32);
    let pen = font.draw_char(&mut bitmap, Vector2F::new(0.5, 0.5), 'A');
    assert_eq!(pen, Vector2F::new(12.5, 0.5));
    bitmap.fill(Colour::rgb(1.0, 1.0, 1.0));

    // The square spans 8 pixels with its base on the baseline, 12 pixels below the pen.
    for y in 0..32 {
        for x in 0..32 {
            let inside = (1..9).contains(&x) && (5..13).contains(&y);
            assert_eq!(bitmap.pixel(x, y), Some(if inside { WHITE } else { 0 }), "({}, {})", x, y);
        }
    }
}

#[test]
pub fn draw_string_and_fmt() {
    let mut font = test_font();
    font.scale(16.0, 0.0);
    let mut bitmap = Bitmap::new(64, 32);
    let origin = Vector2F::new(0.5, 0.5);

    let pen = font.draw_string(&mut bitmap, origin, "ABA");
    assert_eq!(pen, Vector2F::new(0.5 + 12.0 + 8.0 + 12.0, 0.5));
    // 'B' is unmapped, so only the two squares were added.
    assert_eq!(bitmap.path().len(), 10);
    bitmap.fill(Colour::rgb(1.0, 1.0, 1.0));
    assert_eq!(bitmap.pixel(4, 8), Some(WHITE));
    assert_eq!(bitmap.pixel(16, 8), Some(0));
    assert_eq!(bitmap.pixel(24, 8), Some(WHITE));

    let pen = font.draw_fmt(&mut bitmap, origin, format_args!("{}{}", 'A', "A"));
    assert_eq!(pen, Vector2F::new(24.5, 0.5));
    bitmap.clean();
}

#[test]
pub fn draw_missing_and_unsupported_glyphs() {
    let mut font = test_font();
    font.scale(16.0, 0.0);
    let mut bitmap = Bitmap::new(16, 16);
    let origin = Vector2F::new(1.0, 1.0);

    assert_eq!(font.draw_glyph(&mut bitmap, origin, GLYPH_COUNT as u32), origin);
    assert_eq!(font.draw_glyph(&mut bitmap, origin, GLYPH_COMPOSITE), Vector2F::new(13.0, 1.0));
    assert_eq!(font.draw_glyph(&mut bitmap, origin, GLYPH_TRUNCATED), Vector2F::new(13.0, 1.0));
    assert!(bitmap.path().is_empty());
}

#[test]
pub fn font_and_canvas_transforms_stack() {
    let mut font = test_font();
    font.scale(8.0, 0.0);
    let mut bitmap = Bitmap::new(32, 32);
    bitmap.scale(2.0, 2.0);
    font.draw_char(&mut bitmap, Vector2F::new(0.25, 0.25), 'A');
    bitmap.fill(Colour::rgb(1.0, 1.0, 1.0));
    assert_eq!(bitmap.pixel(1, 5), Some(WHITE));
    assert_eq!(bitmap.pixel(8, 12), Some(WHITE));
    assert_eq!(bitmap.pixel(9, 12), Some(0));
    assert_eq!(bitmap.pixel(8, 13), Some(0));
}
