// SPDX-License-Identifier: MPL-2.0
//! Conversion between `image` buffers and `tiny_skia` pixmaps.
//!
//! `image` stores straight alpha, `tiny_skia` stores premultiplied alpha,
//! so every crossing goes through an explicit (de)multiply.

use image_rs::{DynamicImage, RgbaImage};
use tiny_skia::{ColorU8, Pixmap};

/// Copies an image into a new premultiplied pixmap.
///
/// Returns `None` for zero-sized images.
pub fn pixmap_from_image(image: &DynamicImage) -> Option<Pixmap> {
    let rgba = image.to_rgba8();
    let mut pixmap = Pixmap::new(rgba.width(), rgba.height())?;
    for (dst, src) in pixmap.pixels_mut().iter_mut().zip(rgba.pixels()) {
        let [r, g, b, a] = src.0;
        *dst = ColorU8::from_rgba(r, g, b, a).premultiply();
    }
    Some(pixmap)
}

/// Copies a pixmap back into a straight-alpha RGBA image.
pub fn image_from_pixmap(pixmap: &Pixmap) -> Option<DynamicImage> {
    let mut buffer = Vec::with_capacity(pixmap.data().len());
    for pixel in pixmap.pixels() {
        let color = pixel.demultiply();
        buffer.extend_from_slice(&[color.red(), color.green(), color.blue(), color.alpha()]);
    }
    RgbaImage::from_raw(pixmap.width(), pixmap.height(), buffer).map(DynamicImage::ImageRgba8)
}
