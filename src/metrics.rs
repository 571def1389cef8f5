// pixelglyph/src/metrics.rs
//
// Copyright © 2026 The Pixelglyph Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Various metrics that apply to the entire font.

/// Various metrics that apply to the entire font.
///
/// All values except `units_per_em` are in font units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Metrics {
    /// The number of font units per em.
    pub units_per_em: u32,

    /// The maximum amount the font rises above the baseline.
    pub ascent: f32,

    /// The maximum amount the font descends below the baseline, as a negative number.
    pub descent: f32,

    /// Distance between baselines, beyond `ascent - descent`.
    pub line_gap: f32,
}

impl Metrics {
    /// The distance from one baseline to the next, in font units.
    #[inline]
    pub fn line_height(&self) -> f32 {
        self.ascent - self.descent + self.line_gap
    }
}
