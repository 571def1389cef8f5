// pixelglyph/demos/render-text.rs
//
// Copyright © 2026 The Pixelglyph Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

extern crate clap;
extern crate pixelglyph;

use clap::{App, Arg, ArgMatches};
use pixelglyph::canvas::{Bitmap, Canvas};
use pixelglyph::colour::Colour;
use pixelglyph::font::Font;
use pixelglyph::geometry::Vector2F;
use pixelglyph::loader::Loader;
use std::fs::File;
use std::io::{BufWriter, Write};

fn get_args() -> ArgMatches<'static> {
    let font_arg = Arg::with_name("FONT")
        .help("Path to a TrueType font")
        .required(true)
        .index(1);
    let text_arg = Arg::with_name("TEXT")
        .help("Text to render")
        .default_value("Hello")
        .index(2);
    let size_arg = Arg::with_name("SIZE")
        .help("Font size in pixels")
        .default_value("24")
        .index(3);
    let outline_arg = Arg::with_name("outline")
        .help("Stroke the outlines of the glyphs with this width instead of filling them")
        .long("outline")
        .takes_value(true)
        .value_name("WIDTH");
    let ppm_arg = Arg::with_name("ppm")
        .help("Write the image to a PPM file instead of printing it")
        .long("ppm")
        .takes_value(true)
        .value_name("FILE");
    App::new("render-text")
        .version("0.1")
        .author("The Pixelglyph Project Developers")
        .about("Simple example tool to render text with `pixelglyph`")
        .arg(font_arg)
        .arg(text_arg)
        .arg(size_arg)
        .arg(outline_arg)
        .arg(ppm_arg)
        .get_matches()
}

fn main() {
    let matches = get_args();
    let font_path = matches.value_of("FONT").unwrap();
    let text = matches.value_of("TEXT").unwrap();
    let size: f32 = matches.value_of("SIZE").unwrap().parse().unwrap();
    let outline: Option<f32> = matches.value_of("outline").map(|width| width.parse().unwrap());

    let mut font = Font::from_path(font_path).unwrap();
    font.scale(size, 0.0);

    let extent = font.measure(text);
    let mut bitmap = Bitmap::new(extent.x().ceil() as u32 + 2, extent.y().ceil() as u32 + 2);
    bitmap.clear(Colour::rgb(1.0, 1.0, 1.0));
    font.draw_string(&mut bitmap, Vector2F::new(1.0, 1.0), text);
    match outline {
        Some(width) => bitmap.stroke(width, Colour::rgb(0.0, 0.0, 0.0)),
        None => bitmap.fill(Colour::rgb(0.0, 0.0, 0.0)),
    }

    match matches.value_of("ppm") {
        Some(path) => write_ppm(&bitmap, path).unwrap(),
        None => print_shades(&bitmap),
    }
}

fn print_shades(bitmap: &Bitmap) {
    for y in 0..bitmap.height() {
        let mut line = String::new();
        for x in 0..bitmap.width() {
            let colour = Colour::unpack(bitmap.pixel(x, y).unwrap());
            let shade = shade(((1.0 - colour.g) * 255.0) as u8);
            line.push(shade);
            line.push(shade);
        }
        println!("{}", line);
    }
}

fn write_ppm(bitmap: &Bitmap, path: &str) -> std::io::Result<()> {
    let mut out = BufWriter::new(File::create(path)?);
    write!(out, "P6\n{} {}\n255\n", bitmap.width(), bitmap.height())?;
    for y in 0..bitmap.height() {
        for x in 0..bitmap.width() {
            let pixel = bitmap.pixel(x, y).unwrap();
            out.write_all(&[(pixel >> 16) as u8, (pixel >> 8) as u8, pixel as u8])?;
        }
    }
    out.flush()
}

fn shade(value: u8) -> char {
    match value {
        0 => ' ',
        1..=84 => '░',
        85..=169 => '▒',
        170..=254 => '▓',
        _ => '█',
    }
}
