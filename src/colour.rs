// pixelglyph/src/colour.rs
//
// Copyright © 2026 The Pixelglyph Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Floating-point colours and the packed 32-bit pixel format.
//!
//! Pixels are stored as `0xAARRGGBB`.

use pathfinder_simd::default::F32x4;

use crate::utils;

lazy_static! {
    static ref CHANNEL_TO_F32_LUT: [f32; 256] = {
        let mut lut = [0.0; 256];
        for (value, entry) in lut.iter_mut().enumerate() {
            *entry = value as f32 / 255.0;
        }
        lut
    };
}

/// An RGBA colour with each channel in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Colour {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Colour {
    #[inline]
    pub fn rgba(r: f32, g: f32, b: f32, a: f32) -> Colour {
        Colour { r, g, b, a }
    }

    /// An opaque colour.
    #[inline]
    pub fn rgb(r: f32, g: f32, b: f32) -> Colour {
        Colour::rgba(r, g, b, 1.0)
    }

    /// Packs this colour into `0xAARRGGBB`, quantizing each channel to 8 bits.
    #[inline]
    pub fn pack(self) -> u32 {
        (quantize(self.a) << 24) | (quantize(self.r) << 16) | (quantize(self.g) << 8) |
            quantize(self.b)
    }

    #[inline]
    pub fn unpack(pixel: u32) -> Colour {
        let channel = |shift: u32| CHANNEL_TO_F32_LUT[((pixel >> shift) & 0xff) as usize];
        Colour::rgba(channel(16), channel(8), channel(0), channel(24))
    }

    /// Mixes this colour over `background` by `alpha`, channel by channel:
    /// `self · alpha + background · (1 - alpha)`.
    pub fn blend(self, background: Colour, alpha: f32) -> Colour {
        let alpha = utils::clamp(alpha, 0.0, 1.0);
        let mixed = self.to_f32x4() * F32x4::splat(alpha) +
            background.to_f32x4() * F32x4::splat(1.0 - alpha);
        Colour::rgba(mixed[0], mixed[1], mixed[2], mixed[3])
    }

    /// Composites this colour over a packed pixel with the given coverage.
    ///
    /// Zero coverage leaves the pixel bit-for-bit unchanged and full coverage replaces it.
    #[inline]
    pub fn blend_pixel(self, pixel: u32, alpha: f32) -> u32 {
        if alpha <= 0.0 {
            pixel
        } else if alpha >= 1.0 {
            self.pack()
        } else {
            self.blend(Colour::unpack(pixel), alpha).pack()
        }
    }

    #[inline]
    fn to_f32x4(self) -> F32x4 {
        F32x4::new(self.r, self.g, self.b, self.a)
    }
}

#[inline]
fn quantize(channel: f32) -> u32 {
    (utils::clamp(channel, 0.0, 1.0) * 255.0).round() as u32
}
