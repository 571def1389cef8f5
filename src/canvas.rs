// pixelglyph/src/canvas.rs
//
// Copyright © 2026 The Pixelglyph Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Drawing surfaces.
//!
//! A `Canvas` owns a current transform, a clip rectangle and a pending path. Path verbs issued
//! through its `PathSink` implementation are recorded in user space; `fill` and `stroke`
//! rasterize them under the current transform and then discard them.

use std::ops::{Deref, DerefMut};

use crate::colour::Colour;
use crate::geometry::{self, LineSegment2F, RectF, RectI, Transform2F, Vector2F};
use crate::path::{Path, PathSink};
use crate::rasterizer::Accumulator;

/// A drawing surface.
///
/// Implementors provide storage and the four primitives at the top; everything else is
/// expressed in terms of them.
pub trait Canvas {
    fn width(&self) -> u32;
    fn height(&self) -> u32;

    /// The rectangle, in device pixels, outside of which nothing is drawn.
    fn clip(&self) -> RectF;
    /// Replaces the clip rectangle. It is intersected with the surface bounds.
    fn set_clip(&mut self, clip: RectF);

    /// The transform from user space to device pixels.
    fn transform(&self) -> Transform2F;
    fn set_transform(&mut self, transform: Transform2F);

    /// The path recorded since the last `fill`, `stroke` or `clean`.
    fn path(&self) -> &Path;
    fn path_mut(&mut self) -> &mut Path;

    /// Fills the clip rectangle, rounded outward to whole pixels, with a solid colour. The
    /// transform and the pending path play no part.
    fn clear(&mut self, colour: Colour);

    /// Rasterizes the pending path, leaving it in place.
    fn fill_path(&mut self, colour: Colour);

    /// Rasterizes a `width`-wide band around every segment of the pending path, leaving it in
    /// place.
    fn stroke_path(&mut self, width: f32, colour: Colour);

    /// Applies `transform` after the current transform.
    #[inline]
    fn concat_transform(&mut self, transform: Transform2F) {
        let transform = geometry::concat(self.transform(), transform);
        self.set_transform(transform);
    }

    #[inline]
    fn reset_transform(&mut self) {
        self.set_transform(geometry::identity());
    }

    #[inline]
    fn translate(&mut self, x: f32, y: f32) {
        self.concat_transform(geometry::translation(x, y));
    }

    #[inline]
    fn scale(&mut self, x: f32, y: f32) {
        self.concat_transform(geometry::scaling(x, y));
    }

    #[inline]
    fn rotate(&mut self, theta: f32) {
        self.concat_transform(geometry::rotation(theta));
    }

    /// Discards the pending path.
    #[inline]
    fn clean(&mut self) {
        self.path_mut().reset();
    }

    /// Fills the pending path with `colour`, then discards it.
    fn fill(&mut self, colour: Colour) {
        self.fill_path(colour);
        self.clean();
    }

    /// Strokes the pending path with `colour`, then discards it.
    fn stroke(&mut self, width: f32, colour: Colour) {
        self.stroke_path(width, colour);
        self.clean();
    }

    /// Fills the pending path with `fill`, strokes it with `stroke` on top, then discards it.
    fn stroke_fill(&mut self, width: f32, stroke: Colour, fill: Colour) {
        self.fill_path(fill);
        self.stroke_path(width, stroke);
        self.clean();
    }

    /// Strokes a single line, discarding whatever path was pending.
    fn stroke_line(&mut self, line: LineSegment2F, width: f32, colour: Colour) {
        self.clean();
        self.move_to(line.from());
        self.line_to(line.to());
        self.stroke(width, colour);
    }

    /// Fills a rectangle given in user space, discarding whatever path was pending.
    fn fill_rect(&mut self, rect: RectF, colour: Colour) {
        self.clean();
        add_rect(self, rect);
        self.fill(colour);
    }

    /// Strokes the outline of a rectangle given in user space, discarding whatever path was
    /// pending.
    fn stroke_rect(&mut self, rect: RectF, width: f32, colour: Colour) {
        self.clean();
        add_rect(self, rect);
        self.stroke(width, colour);
    }
}

fn add_rect<C>(canvas: &mut C, rect: RectF)
where
    C: Canvas + ?Sized,
{
    canvas.move_to(Vector2F::new(rect.min_x(), rect.min_y()));
    canvas.line_to(Vector2F::new(rect.max_x(), rect.min_y()));
    canvas.line_to(Vector2F::new(rect.max_x(), rect.max_y()));
    canvas.line_to(Vector2F::new(rect.min_x(), rect.max_y()));
    canvas.close();
}

impl<C> PathSink for C
where
    C: Canvas + ?Sized,
{
    #[inline]
    fn move_to(&mut self, to: Vector2F) {
        self.path_mut().move_to(to)
    }

    #[inline]
    fn line_to(&mut self, to: Vector2F) {
        self.path_mut().line_to(to)
    }

    #[inline]
    fn quadratic_curve_to(&mut self, ctrl: Vector2F, to: Vector2F) {
        self.path_mut().quadratic_curve_to(ctrl, to)
    }

    #[inline]
    fn cubic_curve_to(&mut self, ctrl: LineSegment2F, to: Vector2F) {
        self.path_mut().cubic_curve_to(ctrl, to)
    }

    #[inline]
    fn close(&mut self) {
        self.path_mut().close()
    }
}

enum Pixels<'a> {
    Owned(Vec<u32>),
    Borrowed(&'a mut [u32]),
}

impl<'a> Deref for Pixels<'a> {
    type Target = [u32];

    fn deref(&self) -> &[u32] {
        match *self {
            Pixels::Owned(ref pixels) => pixels,
            Pixels::Borrowed(ref pixels) => pixels,
        }
    }
}

impl<'a> DerefMut for Pixels<'a> {
    fn deref_mut(&mut self) -> &mut [u32] {
        match *self {
            Pixels::Owned(ref mut pixels) => pixels,
            Pixels::Borrowed(ref mut pixels) => pixels,
        }
    }
}

/// An in-memory surface of packed `0xAARRGGBB` pixels.
///
/// A bitmap either owns its pixels or borrows them from elsewhere, for example from a window
/// system's framebuffer or from a parent bitmap via `sub_canvas`.
pub struct Bitmap<'a> {
    pixels: Pixels<'a>,
    width: u32,
    height: u32,
    stride: usize,
    clip: RectF,
    transform: Transform2F,
    path: Path,
}

impl Bitmap<'static> {
    /// Creates a new bitmap of the given size, filled with transparent black.
    ///
    /// Stride is equal to width.
    pub fn new(width: u32, height: u32) -> Bitmap<'static> {
        let pixels = vec![0; width as usize * height as usize];
        Bitmap::with_pixels(Pixels::Owned(pixels), width, height, width as usize)
    }
}

impl<'a> Bitmap<'a> {
    /// Wraps caller-owned pixels with `stride` pixels between successive rows.
    ///
    /// Returns `None` if the stride is narrower than the width or the slice is too short to
    /// hold `height` rows.
    pub fn borrow(
        pixels: &'a mut [u32],
        stride: usize,
        width: u32,
        height: u32,
    ) -> Option<Bitmap<'a>> {
        if stride < width as usize || pixels.len() < required_len(stride, width, height) {
            return None;
        }
        Some(Bitmap::with_pixels(Pixels::Borrowed(pixels), width, height, stride))
    }

    fn with_pixels(pixels: Pixels<'a>, width: u32, height: u32, stride: usize) -> Bitmap<'a> {
        Bitmap {
            pixels,
            width,
            height,
            stride,
            clip: geometry::rect(0.0, 0.0, width as f32, height as f32),
            transform: geometry::identity(),
            path: Path::new(),
        }
    }

    /// Returns a bitmap drawing into the pixels of `rect`, which shares this bitmap's storage
    /// and stride.
    ///
    /// The new bitmap starts with an identity transform, a clip covering its whole area and an
    /// empty path. Returns `None` unless `rect` lies within this bitmap.
    pub fn sub_canvas(&mut self, rect: RectI) -> Option<Bitmap<'_>> {
        if rect.min_x() < 0
            || rect.min_y() < 0
            || rect.max_x() < rect.min_x()
            || rect.max_y() < rect.min_y()
            || rect.max_x() > self.width as i32
            || rect.max_y() > self.height as i32
        {
            debug!("sub-canvas {:?} outside of {}x{} bitmap", rect, self.width, self.height);
            return None;
        }

        let (width, height) = (rect.width() as u32, rect.height() as u32);
        let stride = self.stride;
        let offset = rect.min_y() as usize * stride + rect.min_x() as usize;
        let pixels: &mut [u32] = match self.pixels.get_mut(offset..) {
            Some(pixels) => pixels,
            None => &mut [],
        };
        Bitmap::borrow(pixels, stride, width, height)
    }

    /// The number of pixels between the starts of successive rows.
    #[inline]
    pub fn stride(&self) -> usize {
        self.stride
    }

    #[inline]
    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    #[inline]
    pub fn pixels_mut(&mut self) -> &mut [u32] {
        &mut self.pixels
    }

    /// Returns the packed pixel at `(x, y)`, or `None` outside the bitmap.
    pub fn pixel(&self, x: u32, y: u32) -> Option<u32> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels.get(y as usize * self.stride + x as usize).cloned()
    }

    #[inline]
    pub fn owns_pixels(&self) -> bool {
        match self.pixels {
            Pixels::Owned(_) => true,
            Pixels::Borrowed(_) => false,
        }
    }

    #[inline]
    fn bounds(&self) -> RectF {
        geometry::rect(0.0, 0.0, self.width as f32, self.height as f32)
    }

    fn accumulator(&self) -> Accumulator {
        Accumulator::new(self.stride, self.height as usize, self.clip, self.transform)
    }
}

impl<'a> Canvas for Bitmap<'a> {
    #[inline]
    fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    fn clip(&self) -> RectF {
        self.clip
    }

    fn set_clip(&mut self, clip: RectF) {
        self.clip = geometry::intersect(clip, self.bounds());
    }

    #[inline]
    fn transform(&self) -> Transform2F {
        self.transform
    }

    #[inline]
    fn set_transform(&mut self, transform: Transform2F) {
        self.transform = transform;
    }

    #[inline]
    fn path(&self) -> &Path {
        &self.path
    }

    #[inline]
    fn path_mut(&mut self) -> &mut Path {
        &mut self.path
    }

    fn clear(&mut self, colour: Colour) {
        let area = geometry::round_out(self.clip);
        let pixel = colour.pack();
        for y in area.min_y()..area.max_y() {
            let row = y as usize * self.stride;
            for dest in &mut self.pixels[row + area.min_x() as usize..row + area.max_x() as usize] {
                *dest = pixel;
            }
        }
    }

    fn fill_path(&mut self, colour: Colour) {
        let mut accumulator = self.accumulator();
        accumulator.trace(&self.path);
        accumulator.composite(&mut self.pixels, colour);
    }

    fn stroke_path(&mut self, width: f32, colour: Colour) {
        let mut accumulator = self.accumulator();
        accumulator.trace_stroke(&self.path, width);
        accumulator.composite(&mut self.pixels, colour);
    }
}

fn required_len(stride: usize, width: u32, height: u32) -> usize {
    if height == 0 {
        0
    } else {
        (height as usize - 1) * stride + width as usize
    }
}
