// pixelglyph/src/utils.rs
//
// Copyright © 2026 The Pixelglyph Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Miscellaneous utilities for use in this crate.

use crate::geometry::Vector2F;

pub(crate) fn clamp(x: f32, min: f32, max: f32) -> f32 {
    if x < min {
        min
    } else if x > max {
        max
    } else {
        x
    }
}

#[inline]
pub(crate) fn midpoint(a: Vector2F, b: Vector2F) -> Vector2F {
    (a + b) * 0.5
}

#[inline]
pub(crate) fn distance(a: Vector2F, b: Vector2F) -> f32 {
    let d = b - a;
    (d.x() * d.x() + d.y() * d.y()).sqrt()
}
