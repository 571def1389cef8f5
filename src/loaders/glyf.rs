// pixelglyph/src/loaders/glyf.rs
//
// Copyright © 2026 The Pixelglyph Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Decoding of quadratic TrueType outlines from the `glyf` and `loca` tables.

use std::ops::Range;

use crate::error::GlyphLoadingError;
use crate::geometry::{Transform2F, Vector2F};
use crate::path::PathSink;
use crate::reader::{FontReader, ReadPastEnd};
use crate::utils;

bitflags! {
    struct PointFlags: u8 {
        const ON_CURVE = 0x01;
        const X_SHORT = 0x02;
        const Y_SHORT = 0x04;
        const REPEAT = 0x08;
        const X_SAME_OR_POSITIVE = 0x10;
        const Y_SAME_OR_POSITIVE = 0x20;
    }
}

/// Returns the byte range of a glyph within the `glyf` table.
pub(crate) fn glyph_range(
    loca: &[u8],
    long_offsets: bool,
    glyph_id: u32,
) -> Result<Range<usize>, GlyphLoadingError> {
    let index = glyph_id as usize;
    let (start, end) = if long_offsets {
        let mut reader = FontReader::at(loca, index * 4);
        (reader.read_u32()? as usize, reader.read_u32()? as usize)
    } else {
        let mut reader = FontReader::at(loca, index * 2);
        (reader.read_u16()? as usize * 2, reader.read_u16()? as usize * 2)
    };
    if end < start {
        return Err(GlyphLoadingError::Parse);
    }
    Ok(start..end)
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct GlyphPoint {
    position: Vector2F,
    on_curve: bool,
}

/// The fully decoded points of a simple glyph.
struct SimpleGlyph {
    points: Vec<GlyphPoint>,
    contour_ends: Vec<usize>,
}

impl SimpleGlyph {
    /// Decodes a glyph. Returns `None` for glyphs without contours and for composite glyphs,
    /// which are not supported and render as empty.
    fn parse(data: &[u8]) -> Result<Option<SimpleGlyph>, GlyphLoadingError> {
        if data.is_empty() {
            return Ok(None);
        }

        let mut reader = FontReader::new(data);
        let contour_count = reader.read_i16()?;
        if contour_count < 0 {
            debug!("composite glyph outlines are not supported");
            return Ok(None);
        }
        reader.skip(8)?;

        let mut contour_ends: Vec<usize> = Vec::with_capacity(contour_count as usize);
        for _ in 0..contour_count {
            let end = reader.read_u16()? as usize;
            if contour_ends.last().map_or(false, |&previous| end <= previous) {
                return Err(GlyphLoadingError::Parse);
            }
            contour_ends.push(end);
        }
        let point_count = match contour_ends.last() {
            None => return Ok(None),
            Some(&last) => last + 1,
        };

        let instruction_length = reader.read_u16()? as usize;
        reader.skip(instruction_length)?;

        let mut flags = Vec::with_capacity(point_count);
        while flags.len() < point_count {
            let flag = PointFlags::from_bits_truncate(reader.read_u8()?);
            flags.push(flag);
            if flag.contains(PointFlags::REPEAT) {
                let repeat = reader.read_u8()? as usize;
                for _ in 0..repeat.min(point_count - flags.len()) {
                    flags.push(flag);
                }
            }
        }

        let xs = read_coordinates(
            &mut reader,
            &flags,
            PointFlags::X_SHORT,
            PointFlags::X_SAME_OR_POSITIVE,
        )?;
        let ys = read_coordinates(
            &mut reader,
            &flags,
            PointFlags::Y_SHORT,
            PointFlags::Y_SAME_OR_POSITIVE,
        )?;

        let points = flags.iter().zip(xs.into_iter().zip(ys.into_iter())).map(|(flag, (x, y))| {
            GlyphPoint {
                position: Vector2F::new(x as f32, y as f32),
                on_curve: flag.contains(PointFlags::ON_CURVE),
            }
        }).collect();

        Ok(Some(SimpleGlyph { points, contour_ends }))
    }
}

/// Reads one axis of delta-encoded coordinates and returns them as absolute values.
fn read_coordinates(
    reader: &mut FontReader,
    flags: &[PointFlags],
    short: PointFlags,
    same_or_positive: PointFlags,
) -> Result<Vec<i16>, ReadPastEnd> {
    let mut coordinates = Vec::with_capacity(flags.len());
    let mut value: i16 = 0;
    for flag in flags {
        if flag.contains(short) {
            let delta = reader.read_u8()? as i16;
            if flag.contains(same_or_positive) {
                value = value.wrapping_add(delta);
            } else {
                value = value.wrapping_sub(delta);
            }
        } else if !flag.contains(same_or_positive) {
            value = value.wrapping_add(reader.read_i16()?);
        }
        coordinates.push(value);
    }
    Ok(coordinates)
}

/// Decodes the glyph in `data` and sends its contours to `sink`, mapping points through
/// `transform`.
///
/// The whole glyph is decoded before anything is sent, so a malformed glyph sends nothing.
pub(crate) fn emit_outline<S>(
    data: &[u8],
    transform: Transform2F,
    sink: &mut S,
) -> Result<(), GlyphLoadingError>
where
    S: PathSink + ?Sized,
{
    let glyph = match SimpleGlyph::parse(data)? {
        None => return Ok(()),
        Some(glyph) => glyph,
    };

    let mut start = 0;
    for &end in &glyph.contour_ends {
        emit_contour(&glyph.points[start..=end], transform, sink);
        start = end + 1;
    }
    Ok(())
}

fn emit_contour<S>(points: &[GlyphPoint], transform: Transform2F, sink: &mut S)
where
    S: PathSink + ?Sized,
{
    let (first, last) = match (points.first(), points.last()) {
        (Some(&first), Some(&last)) => (first, last),
        _ => return,
    };

    // An off-curve first point borrows the last point, or their midpoint, as the start.
    let (start, rest) = if first.on_curve {
        (first.position, &points[1..])
    } else if last.on_curve {
        (last.position, &points[..points.len() - 1])
    } else {
        (utils::midpoint(last.position, first.position), points)
    };

    sink.move_to(transform * start);
    let mut control: Option<Vector2F> = None;
    for point in rest {
        match (point.on_curve, control) {
            (true, Some(ctrl)) => {
                sink.quadratic_curve_to(transform * ctrl, transform * point.position);
                control = None;
            }
            (true, None) => sink.line_to(transform * point.position),
            (false, Some(ctrl)) => {
                let implied = utils::midpoint(ctrl, point.position);
                sink.quadratic_curve_to(transform * ctrl, transform * implied);
                control = Some(point.position);
            }
            (false, None) => control = Some(point.position),
        }
    }
    if let Some(ctrl) = control {
        sink.quadratic_curve_to(transform * ctrl, transform * start);
    }
    sink.close();
}
