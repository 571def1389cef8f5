// pixelglyph/src/geometry.rs
//
// Copyright © 2026 The Pixelglyph Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Points, affine transforms and rectangles.
//!
//! The vector types come from `pathfinder_geometry`. Transforms are written in the six
//! coefficient form `(a, b, c, d, e, f)`, which maps `(x, y)` to
//! `(a·x + c·y + e, b·x + d·y + f)`.

pub use pathfinder_geometry::line_segment::LineSegment2F;
pub use pathfinder_geometry::rect::{RectF, RectI};
pub use pathfinder_geometry::transform2d::Transform2F;
pub use pathfinder_geometry::vector::{Vector2F, Vector2I};

/// Builds a transform from its six affine coefficients.
#[inline]
pub fn affine(a: f32, b: f32, c: f32, d: f32, e: f32, f: f32) -> Transform2F {
    Transform2F::row_major(a, c, b, d, e, f)
}

#[inline]
pub fn identity() -> Transform2F {
    affine(1.0, 0.0, 0.0, 1.0, 0.0, 0.0)
}

#[inline]
pub fn translation(x: f32, y: f32) -> Transform2F {
    affine(1.0, 0.0, 0.0, 1.0, x, y)
}

#[inline]
pub fn scaling(x: f32, y: f32) -> Transform2F {
    affine(x, 0.0, 0.0, y, 0.0, 0.0)
}

/// A counterclockwise rotation by `theta` radians in a y-up frame (clockwise on screen).
#[inline]
pub fn rotation(theta: f32) -> Transform2F {
    let (sin, cos) = theta.sin_cos();
    affine(cos, sin, -sin, cos, 0.0, 0.0)
}

/// Returns the transform that applies `first` and then `then`.
#[inline]
pub fn concat(first: Transform2F, then: Transform2F) -> Transform2F {
    then * first
}

/// Applies only the linear part of `transform`, ignoring its translation.
#[inline]
pub fn transform_vector(transform: Transform2F, vector: Vector2F) -> Vector2F {
    transform * vector - transform * Vector2F::zero()
}

#[inline]
pub(crate) fn rect(min_x: f32, min_y: f32, max_x: f32, max_y: f32) -> RectF {
    RectF::from_points(Vector2F::new(min_x, min_y), Vector2F::new(max_x, max_y))
}

/// Intersects two rectangles; an empty intersection collapses to a zero-area rectangle.
pub(crate) fn intersect(a: RectF, b: RectF) -> RectF {
    let min_x = a.min_x().max(b.min_x());
    let min_y = a.min_y().max(b.min_y());
    let max_x = a.max_x().min(b.max_x()).max(min_x);
    let max_y = a.max_y().min(b.max_y()).max(min_y);
    rect(min_x, min_y, max_x, max_y)
}

/// Rounds a rectangle outward to whole pixels.
pub fn round_out(rect: RectF) -> RectI {
    RectI::from_points(
        Vector2I::new(rect.min_x().floor() as i32, rect.min_y().floor() as i32),
        Vector2I::new(rect.max_x().ceil() as i32, rect.max_y().ceil() as i32),
    )
}
