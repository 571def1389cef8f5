// pixelglyph/src/lib.rs
//
// Copyright © 2026 The Pixelglyph Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! `pixelglyph` is a small 2D vector rasterizer and TrueType outline engine.
//!
//! Paths made of lines and quadratic/cubic Bézier curves are recorded on a `Canvas` and
//! rasterized with signed-area anti-aliasing onto packed 32-bit pixels. TrueType fonts are parsed
//! directly from their `sfnt` tables; glyph outlines are emitted as path verbs into a canvas,
//! so text is filled by the same rasterizer as any other shape.
//!
//! ```no_run
//! use pixelglyph::canvas::{Bitmap, Canvas};
//! use pixelglyph::colour::Colour;
//! use pixelglyph::font::Font;
//! use pixelglyph::geometry::Vector2F;
//! use pixelglyph::loader::Loader;
//!
//! let mut font = Font::from_path("DejaVuSans.ttf").unwrap();
//! font.scale(16.0, 0.0);
//! let mut bitmap = Bitmap::new(200, 40);
//! bitmap.clear(Colour::rgb(1.0, 1.0, 1.0));
//! font.draw_string(&mut bitmap, Vector2F::new(4.0, 4.0), "Hello");
//! bitmap.fill(Colour::rgb(0.0, 0.0, 0.0));
//! ```

#[macro_use]
extern crate bitflags;
#[macro_use]
extern crate lazy_static;
#[macro_use]
extern crate log;

pub mod canvas;
pub mod colour;
pub mod error;
pub mod font;
pub mod geometry;
pub mod loader;
pub mod loaders;
pub mod metrics;
pub mod path;
pub mod rasterizer;

mod reader;
mod utils;
