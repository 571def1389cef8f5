// pixelglyph/src/rasterizer.rs
//
// Copyright © 2026 The Pixelglyph Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Signed-area coverage rasterization.
//!
//! Every edge deposits, into a per-row float buffer, the change in coverage it causes at each
//! pixel column it crosses. A running sum along each row then yields the signed coverage of
//! every pixel, whose magnitude (clamped to 1) becomes the blend alpha. Pixel centres sit at
//! integer device coordinates.

use std::mem;

use crate::colour::Colour;
use crate::geometry::{self, LineSegment2F, RectF, RectI, Transform2F, Vector2F};
use crate::path::{Path, Segment};
use crate::utils;

/// Curves are subdivided until their control polygon is at most this many times longer than
/// their chord.
pub const FLATNESS: f32 = 1.01;

/// The deepest a curve is subdivided, bounding one curve to `2^MAX_FLATTEN_DEPTH` segments.
pub const MAX_FLATTEN_DEPTH: u32 = 7;

/// Appends the end points of the line segments approximating a quadratic curve to `out`.
///
/// The start point is not emitted; the last point emitted is always `to`.
pub fn flatten_quadratic(from: Vector2F, ctrl: Vector2F, to: Vector2F, out: &mut Vec<Vector2F>) {
    flatten_quadratic_at(from, ctrl, to, 0, out)
}

fn flatten_quadratic_at(
    from: Vector2F,
    ctrl: Vector2F,
    to: Vector2F,
    depth: u32,
    out: &mut Vec<Vector2F>,
) {
    let control = utils::distance(from, ctrl) + utils::distance(ctrl, to);
    let chord = utils::distance(from, to);
    if depth >= MAX_FLATTEN_DEPTH || control <= chord * FLATNESS {
        out.push(to);
        return;
    }

    let from_ctrl = utils::midpoint(from, ctrl);
    let ctrl_to = utils::midpoint(ctrl, to);
    let mid = utils::midpoint(from_ctrl, ctrl_to);
    flatten_quadratic_at(from, from_ctrl, mid, depth + 1, out);
    flatten_quadratic_at(mid, ctrl_to, to, depth + 1, out);
}

/// Appends the end points of the line segments approximating a cubic curve to `out`.
pub fn flatten_cubic(from: Vector2F, ctrl: LineSegment2F, to: Vector2F, out: &mut Vec<Vector2F>) {
    flatten_cubic_at(from, ctrl.from(), ctrl.to(), to, 0, out)
}

fn flatten_cubic_at(
    from: Vector2F,
    ctrl0: Vector2F,
    ctrl1: Vector2F,
    to: Vector2F,
    depth: u32,
    out: &mut Vec<Vector2F>,
) {
    let control =
        utils::distance(from, ctrl0) + utils::distance(ctrl0, ctrl1) + utils::distance(ctrl1, to);
    let chord = utils::distance(from, to);
    if depth >= MAX_FLATTEN_DEPTH || control <= chord * FLATNESS {
        out.push(to);
        return;
    }

    let a = utils::midpoint(from, ctrl0);
    let b = utils::midpoint(ctrl0, ctrl1);
    let c = utils::midpoint(ctrl1, to);
    let ab = utils::midpoint(a, b);
    let bc = utils::midpoint(b, c);
    let mid = utils::midpoint(ab, bc);
    flatten_cubic_at(from, a, ab, mid, depth + 1, out);
    flatten_cubic_at(mid, bc, c, to, depth + 1, out);
}

/// Accumulates signed edge coverage for one fill or stroke operation.
pub(crate) struct Accumulator {
    cells: Vec<f32>,
    stride: usize,
    clip: RectF,
    transform: Transform2F,
    dirty: Option<RectF>,
    scratch: Vec<Vector2F>,
}

impl Accumulator {
    /// Creates a zeroed accumulator for a surface of `height` rows, `stride` cells apart.
    ///
    /// `clip` must lie within the surface.
    pub(crate) fn new(
        stride: usize,
        height: usize,
        clip: RectF,
        transform: Transform2F,
    ) -> Accumulator {
        Accumulator {
            cells: vec![0.0; stride * height],
            stride,
            clip,
            transform,
            dirty: None,
            scratch: vec![],
        }
    }

    /// Adds the edges of every subpath of `path`, flattening curves.
    pub(crate) fn trace(&mut self, path: &Path) {
        let mut current = Vector2F::zero();
        for segment in path.segments() {
            match segment {
                Segment::MoveTo(to) => current = to,
                Segment::LineTo(to) => {
                    self.edge(current, to);
                    current = to;
                }
                Segment::QuadraticCurveTo(ctrl, to) => {
                    let mut points = mem::replace(&mut self.scratch, vec![]);
                    points.clear();
                    flatten_quadratic(current, ctrl, to, &mut points);
                    for &point in &points {
                        self.edge(current, point);
                        current = point;
                    }
                    self.scratch = points;
                }
                Segment::CubicCurveTo(ctrl, to) => {
                    let mut points = mem::replace(&mut self.scratch, vec![]);
                    points.clear();
                    flatten_cubic(current, ctrl, to, &mut points);
                    for &point in &points {
                        self.edge(current, point);
                        current = point;
                    }
                    self.scratch = points;
                }
            }
        }
    }

    /// Adds a `width`-wide quadrilateral around every segment of `path`, flattening curves.
    pub(crate) fn trace_stroke(&mut self, path: &Path, width: f32) {
        let mut current = Vector2F::zero();
        for segment in path.segments() {
            match segment {
                Segment::MoveTo(to) => current = to,
                Segment::LineTo(to) => {
                    self.thick_line(current, to, width);
                    current = to;
                }
                Segment::QuadraticCurveTo(ctrl, to) => {
                    let mut points = mem::replace(&mut self.scratch, vec![]);
                    points.clear();
                    flatten_quadratic(current, ctrl, to, &mut points);
                    for &point in &points {
                        self.thick_line(current, point, width);
                        current = point;
                    }
                    self.scratch = points;
                }
                Segment::CubicCurveTo(ctrl, to) => {
                    let mut points = mem::replace(&mut self.scratch, vec![]);
                    points.clear();
                    flatten_cubic(current, ctrl, to, &mut points);
                    for &point in &points {
                        self.thick_line(current, point, width);
                        current = point;
                    }
                    self.scratch = points;
                }
            }
        }
    }

    /// Traces the closed quadrilateral `a, b, d, c` offset by half of `width` on each side of
    /// the segment from `p0` to `p1`.
    fn thick_line(&mut self, p0: Vector2F, p1: Vector2F, width: f32) {
        let length = utils::distance(p0, p1);
        if length == 0.0 {
            return;
        }
        let delta = p1 - p0;
        let scale = width * 0.5 / length;
        let normal = Vector2F::new(-delta.y() * scale, delta.x() * scale);
        let (a, b) = (p0 - normal, p0 + normal);
        let (c, d) = (p1 - normal, p1 + normal);
        self.edge(c, a);
        self.edge(b, d);
        self.edge(a, b);
        self.edge(d, c);
    }

    /// Deposits the signed coverage of one edge, given in user coordinates.
    pub(crate) fn edge(&mut self, from: Vector2F, to: Vector2F) {
        let half = Vector2F::new(0.5, 0.5);
        let mut a = self.transform * from + half;
        let mut b = self.transform * to + half;
        if !(a.x().is_finite() && a.y().is_finite() && b.x().is_finite() && b.y().is_finite()) {
            return;
        }
        if a.y().max(b.y()) < self.clip.min_y() || a.y().min(b.y()) > self.clip.max_y() ||
                a.y() == b.y() {
            return;
        }

        let mut sign = 1.0;
        if b.y() < a.y() {
            mem::swap(&mut a, &mut b);
            sign = -1.0;
        }

        let bounds = geometry::rect(a.x().min(b.x()), a.y(), a.x().max(b.x()), b.y());
        self.dirty = Some(match self.dirty {
            None => bounds,
            Some(dirty) => geometry::rect(
                dirty.min_x().min(bounds.min_x()),
                dirty.min_y().min(bounds.min_y()),
                dirty.max_x().max(bounds.max_x()),
                dirty.max_y().max(bounds.max_y()),
            ),
        });

        let dxdy = (b.x() - a.x()) / (b.y() - a.y());
        let min_y = a.y().floor().max(self.clip.min_y().floor());
        let max_y = b.y().ceil().min(self.clip.max_y().ceil());

        let mut x = a.x() + dxdy * (min_y.max(a.y()) - a.y());
        let mut y = min_y;
        while y < max_y {
            let dy = b.y().min(y + 1.0) - a.y().max(y);
            let next_x = x + dxdy * dy;
            let row = y as usize * self.stride;
            self.span(row, x.min(next_x), x.max(next_x), sign * dy);
            x = next_x;
            y += 1.0;
        }
    }

    /// Deposits one row's worth of an edge that runs from column position `left` to `right`
    /// while covering `dy` of the row's height.
    ///
    /// The cumulative sum of deposits at column `c` is the part of `dy` lying to the right of
    /// the edge within column `c`.
    fn span(&mut self, row: usize, left: f32, right: f32, dy: f32) {
        let first = left.floor();
        let last = right.floor();
        let mut deposit = ColumnDeposit::new(self, row);

        if first == last {
            let area = 0.5 * ((first + 1.0 - left) + (first + 1.0 - right)) * dy;
            deposit.add(first, area);
            deposit.add(first + 1.0, dy);
            return;
        }

        let dydx = dy / (right - left);
        let first_height = (first + 1.0 - left) * dydx;
        deposit.add(first, 0.5 * (first + 1.0 - left) * first_height);

        let mut column = (first + 1.0).max(deposit.min_column);
        let end = last.min(deposit.max_column + 1.0);
        while column < end {
            deposit.add(column, (column - left) * dydx + 0.5 * dydx);
            column += 1.0;
        }

        let before = (last - left) * dydx;
        deposit.add(last, before + (dy - before) * 0.5 * (2.0 + last - right));
        deposit.add(last + 1.0, dy);
    }

    /// Returns the pixels touched by traced edges, intersected with the clip and rounded
    /// outward. Empty if nothing was traced.
    pub(crate) fn dirty_rect(&self) -> RectI {
        let empty = RectI::new(Default::default(), Default::default());
        let dirty = match self.dirty {
            None => return empty,
            Some(dirty) => dirty,
        };
        let bounds = geometry::intersect(dirty, self.clip);
        if bounds.width() <= 0.0 || bounds.height() <= 0.0 {
            return empty;
        }
        geometry::round_out(bounds)
    }

    /// Runs the coverage sum over the dirty rectangle, compositing `colour` into `pixels` and
    /// zeroing the cells it consumes.
    pub(crate) fn composite(&mut self, pixels: &mut [u32], colour: Colour) {
        let dirty = self.dirty_rect();
        self.for_each_coverage(dirty, |index, alpha| {
            pixels[index] = colour.blend_pixel(pixels[index], alpha);
        });
    }

    fn for_each_coverage<F>(&mut self, dirty: RectI, mut f: F)
    where
        F: FnMut(usize, f32),
    {
        for y in dirty.min_y()..dirty.max_y() {
            let row = y as usize * self.stride;
            let mut sum = 0.0;
            for x in dirty.min_x()..dirty.max_x() {
                let index = row + x as usize;
                sum += self.cells[index];
                self.cells[index] = 0.0;
                f(index, sum.abs().min(1.0));
            }
        }
    }
}

/// Writes coverage deltas into one accumulation row.
///
/// Callers pass the cumulative coverage at each column; the delta from the previous column is
/// what lands in the cell. Columns left of the clip pile into its first column and columns
/// past its right edge are dropped, since they cannot change any visible running sum.
struct ColumnDeposit<'a> {
    cells: &'a mut [f32],
    row: usize,
    min_column: f32,
    max_column: f32,
    previous: f32,
}

impl<'a> ColumnDeposit<'a> {
    fn new(accumulator: &'a mut Accumulator, row: usize) -> ColumnDeposit<'a> {
        let min_column = accumulator.clip.min_x().floor();
        let max_column = accumulator.clip.max_x().ceil() - 1.0;
        ColumnDeposit {
            cells: &mut accumulator.cells,
            row,
            min_column,
            max_column,
            previous: 0.0,
        }
    }

    #[inline]
    fn add(&mut self, column: f32, coverage: f32) {
        if column > self.max_column || self.max_column < self.min_column {
            return;
        }
        let column = column.max(self.min_column) as usize;
        self.cells[self.row + column] += coverage - self.previous;
        self.previous = coverage;
    }
}
