// pixelglyph/src/path.rs
//
// Copyright © 2026 The Pixelglyph Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Bézier paths.

use crate::geometry::{LineSegment2F, Vector2F};

/// The number of points a path reserves the first time it needs storage.
pub const DEFAULT_PATH_CAPACITY: usize = 32;

/// Receives Bézier path construction commands.
pub trait PathSink {
    /// Starts a new subpath at a point.
    fn move_to(&mut self, to: Vector2F);
    /// Draws a line to a point.
    fn line_to(&mut self, to: Vector2F);
    /// Draws a quadratic Bézier curve to a point.
    fn quadratic_curve_to(&mut self, ctrl: Vector2F, to: Vector2F);
    /// Draws a cubic Bézier curve to a point.
    fn cubic_curve_to(&mut self, ctrl: LineSegment2F, to: Vector2F);
    /// Closes the subpath, returning to its first point.
    fn close(&mut self);
}

/// What a recorded point represents.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Verb {
    /// The first point of a subpath.
    Move,
    /// The end of a straight line.
    Line,
    /// A control point of the curve ending at the next `Curve` point.
    Control,
    /// The end of a quadratic (one preceding `Control`) or cubic (two) curve.
    Curve,
}

/// One drawing command read back out of a `Path`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Segment {
    MoveTo(Vector2F),
    LineTo(Vector2F),
    QuadraticCurveTo(Vector2F, Vector2F),
    CubicCurveTo(LineSegment2F, Vector2F),
}

/// An ordered list of points and the verbs that tag them.
///
/// `points` and `verbs` always have the same length. Lines and curves are only recorded while a
/// subpath is open, that is, after a `move_to` and before the matching `close`.
#[derive(Clone, Debug, Default)]
pub struct Path {
    points: Vec<Vector2F>,
    verbs: Vec<Verb>,
    home: usize,
    open: bool,
}

impl Path {
    /// Creates an empty path. No storage is allocated until the first point arrives.
    #[inline]
    pub fn new() -> Path {
        Path::default()
    }

    #[inline]
    pub fn with_capacity(capacity: usize) -> Path {
        Path {
            points: Vec::with_capacity(capacity),
            verbs: Vec::with_capacity(capacity),
            home: 0,
            open: false,
        }
    }

    #[inline]
    pub fn points(&self) -> &[Vector2F] {
        &self.points
    }

    #[inline]
    pub fn verbs(&self) -> &[Verb] {
        &self.verbs
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Returns true if a subpath has been started and not yet closed.
    #[inline]
    pub fn is_open(&self) -> bool {
        self.open
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.points.capacity()
    }

    /// Discards every point and closes any open subpath. Storage is kept for reuse.
    pub fn reset(&mut self) {
        self.points.clear();
        self.verbs.clear();
        self.home = 0;
        self.open = false;
    }

    /// Iterates over the drawing commands recorded in this path.
    #[inline]
    pub fn segments(&self) -> Segments<'_> {
        Segments { path: self, index: 0 }
    }

    /// Replays this path into a `PathSink`.
    pub fn copy_to<S>(&self, sink: &mut S)
    where
        S: PathSink + ?Sized,
    {
        for segment in self.segments() {
            match segment {
                Segment::MoveTo(to) => sink.move_to(to),
                Segment::LineTo(to) => sink.line_to(to),
                Segment::QuadraticCurveTo(ctrl, to) => sink.quadratic_curve_to(ctrl, to),
                Segment::CubicCurveTo(ctrl, to) => sink.cubic_curve_to(ctrl, to),
            }
        }
    }

    fn push(&mut self, point: Vector2F, verb: Verb) {
        if self.points.capacity() == 0 {
            self.points.reserve(DEFAULT_PATH_CAPACITY);
            self.verbs.reserve(DEFAULT_PATH_CAPACITY);
        }
        self.points.push(point);
        self.verbs.push(verb);
    }
}

impl PathSink for Path {
    fn move_to(&mut self, to: Vector2F) {
        self.home = self.points.len();
        self.open = true;
        self.push(to, Verb::Move);
    }

    fn line_to(&mut self, to: Vector2F) {
        if self.open {
            self.push(to, Verb::Line);
        }
    }

    fn quadratic_curve_to(&mut self, ctrl: Vector2F, to: Vector2F) {
        if self.open {
            self.push(ctrl, Verb::Control);
            self.push(to, Verb::Curve);
        }
    }

    fn cubic_curve_to(&mut self, ctrl: LineSegment2F, to: Vector2F) {
        if self.open {
            self.push(ctrl.from(), Verb::Control);
            self.push(ctrl.to(), Verb::Control);
            self.push(to, Verb::Curve);
        }
    }

    fn close(&mut self) {
        if self.open {
            let home = self.points[self.home];
            self.push(home, Verb::Line);
            self.open = false;
        }
    }
}

/// An iterator over the segments of a `Path`.
pub struct Segments<'a> {
    path: &'a Path,
    index: usize,
}

impl<'a> Iterator for Segments<'a> {
    type Item = Segment;

    fn next(&mut self) -> Option<Segment> {
        let points = &self.path.points;
        let verbs = &self.path.verbs;
        let start = self.index;
        let mut end = start;
        while end < verbs.len() && verbs[end] == Verb::Control {
            end += 1;
        }
        if end >= verbs.len() {
            self.index = verbs.len();
            return None;
        }
        self.index = end + 1;

        let to = points[end];
        match (verbs[end], end - start) {
            (Verb::Move, 0) => Some(Segment::MoveTo(to)),
            (Verb::Line, 0) => Some(Segment::LineTo(to)),
            (Verb::Curve, 1) => Some(Segment::QuadraticCurveTo(points[start], to)),
            (Verb::Curve, 2) => {
                let ctrl = LineSegment2F::new(points[start], points[start + 1]);
                Some(Segment::CubicCurveTo(ctrl, to))
            }
            _ => {
                debug_assert!(false, "malformed path");
                self.next()
            }
        }
    }
}
