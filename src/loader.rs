// pixelglyph/src/loader.rs
//
// Copyright © 2026 The Pixelglyph Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Provides a common interface to font loaders, and lays out and draws text through it.

use std::fmt;
use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::Path;
use std::sync::Arc;

use crate::canvas::Canvas;
use crate::error::{FontLoadingError, GlyphLoadingError};
use crate::geometry::{self, Transform2F, Vector2F};
use crate::metrics::Metrics;
use crate::path::PathSink;

/// Provides a common interface to font loaders.
///
/// Every font carries a transform from font units to canvas user space, set with `scale` or
/// `set_transform`. Text is placed with the pen at the top of the line: a glyph drawn at
/// `origin` has its baseline `ascent` below it.
pub trait Loader: Clone + Sized {
    /// Loads a font from raw font data (the contents of a `.ttf` file).
    fn from_bytes(font_data: Arc<Vec<u8>>) -> Result<Self, FontLoadingError>;

    /// Loads a font from a `.ttf` file.
    fn from_file(file: &mut File) -> Result<Self, FontLoadingError> {
        let mut font_data = vec![];
        file.seek(SeekFrom::Start(0))?;
        file.read_to_end(&mut font_data)?;
        Self::from_bytes(Arc::new(font_data))
    }

    /// Loads a font from the path to a `.ttf` file.
    fn from_path<P>(path: P) -> Result<Self, FontLoadingError>
    where
        P: AsRef<Path>,
    {
        Self::from_file(&mut File::open(path)?)
    }

    /// Returns various metrics that apply to the entire font.
    fn metrics(&self) -> Metrics;

    /// Returns the number of glyphs in the font.
    ///
    /// Glyph IDs range from 0 inclusive to this value exclusive.
    fn glyph_count(&self) -> u32;

    /// Returns the glyph ID the font's character map gives for a character.
    ///
    /// Characters outside the Basic Multilingual Plane and unmapped characters return `None`.
    fn glyph_for_char(&self, character: char) -> Option<u32>;

    /// The transform from font units to canvas user space.
    fn transform(&self) -> Transform2F;

    fn set_transform(&mut self, transform: Transform2F);

    /// Sends the outline of a glyph to a sink, mapping every point through `transform`.
    ///
    /// Points are given to `transform` in font units with y pointing up. Nothing is sent if the
    /// outline is malformed.
    fn outline<S>(
        &self,
        glyph_id: u32,
        transform: Transform2F,
        sink: &mut S,
    ) -> Result<(), GlyphLoadingError>
    where
        S: PathSink + ?Sized;

    /// Returns the distance from the origin of the glyph with the given ID to the next, in font
    /// units.
    fn advance(&self, glyph_id: u32) -> Result<Vector2F, GlyphLoadingError>;

    /// Scales the font so that one em spans `x` by `y` pixels.
    ///
    /// A zero axis takes the size of the other. Does nothing if both are zero.
    fn scale(&mut self, x: f32, y: f32) {
        let (x, y) = match (x == 0.0, y == 0.0) {
            (true, true) => return,
            (true, false) => (y, y),
            (false, true) => (x, x),
            (false, false) => (x, y),
        };
        let units_per_em = self.metrics().units_per_em as f32;
        self.set_transform(geometry::scaling(x / units_per_em, y / units_per_em));
    }

    /// The transform that places a glyph's outline with the pen at `origin`: y flipped to point
    /// down, the baseline moved `ascent` below the top of the line, then the font transform.
    fn glyph_transform(&self, origin: Vector2F) -> Transform2F {
        let flip = geometry::affine(1.0, 0.0, 0.0, -1.0, 0.0, self.metrics().ascent);
        let placed = geometry::concat(flip, self.transform());
        geometry::concat(placed, geometry::translation(origin.x(), origin.y()))
    }

    /// Returns the pen position after the given glyph.
    ///
    /// Glyph IDs beyond the font leave the pen where it is.
    fn glyph_advance(&self, origin: Vector2F, glyph_id: u32) -> Vector2F {
        match self.advance(glyph_id) {
            Ok(advance) => origin + geometry::transform_vector(self.transform(), advance),
            Err(_) => origin,
        }
    }

    /// Returns the pen position after the given character. Unmapped characters advance by the
    /// width of glyph 0.
    fn char_advance(&self, origin: Vector2F, character: char) -> Vector2F {
        self.glyph_advance(origin, self.glyph_for_char(character).unwrap_or(0))
    }

    /// Measures a line of text: the sum of its advances plus the height of one em.
    fn measure(&self, text: &str) -> Vector2F {
        let advance = text
            .chars()
            .fold(Vector2F::zero(), |pen, character| self.char_advance(pen, character));
        let em = Vector2F::new(0.0, self.metrics().units_per_em as f32);
        advance + geometry::transform_vector(self.transform(), em)
    }

    /// Adds the outline of a glyph to the canvas's pending path and returns the advanced pen
    /// position.
    ///
    /// Glyph IDs beyond the font draw nothing and leave the pen where it is.
    fn draw_glyph<C>(&self, canvas: &mut C, origin: Vector2F, glyph_id: u32) -> Vector2F
    where
        C: Canvas + ?Sized,
    {
        if glyph_id >= self.glyph_count() {
            return origin;
        }
        if let Err(error) = self.outline(glyph_id, self.glyph_transform(origin), canvas) {
            warn!("skipping outline of glyph {}: {}", glyph_id, error);
        }
        self.glyph_advance(origin, glyph_id)
    }

    /// Adds the outline of a character's glyph to the canvas's pending path and returns the
    /// advanced pen position.
    ///
    /// Unmapped characters draw nothing but still advance by the width of glyph 0.
    fn draw_char<C>(&self, canvas: &mut C, origin: Vector2F, character: char) -> Vector2F
    where
        C: Canvas + ?Sized,
    {
        match self.glyph_for_char(character) {
            Some(glyph_id) => self.draw_glyph(canvas, origin, glyph_id),
            None => self.glyph_advance(origin, 0),
        }
    }

    /// Adds the outlines of every character of `text` to the canvas's pending path, one after
    /// another, and returns the final pen position.
    fn draw_string<C>(&self, canvas: &mut C, origin: Vector2F, text: &str) -> Vector2F
    where
        C: Canvas + ?Sized,
    {
        text.chars().fold(origin, |pen, character| self.draw_char(canvas, pen, character))
    }

    /// Like `draw_string`, for text built with `format_args!`.
    fn draw_fmt<C>(&self, canvas: &mut C, origin: Vector2F, args: fmt::Arguments) -> Vector2F
    where
        C: Canvas + ?Sized,
    {
        self.draw_string(canvas, origin, &fmt::format(args))
    }
}
