// SPDX-License-Identifier: MPL-2.0
//! Crop kernels.
//!
//! Square crops cut the rectangle out of the source, clipped to the image.
//! Elliptical crops produce a raster exactly the size of the rectangle with
//! everything outside the inscribed ellipse left transparent.

use super::raster;
use crate::domain::editing::crop::snapped_size;
use crate::domain::editing::CropInfo;
use crate::domain::error::CropError;
use crate::domain::geometry::{Offset, Rect, Size};
use image_rs::DynamicImage;
use tiny_skia::{FillRule, Mask, PathBuilder, Pixmap, PixmapPaint, Transform};

/// Crops `image` according to `info`.
pub fn crop(image: &DynamicImage, info: &CropInfo) -> Result<DynamicImage, CropError> {
    let size = Size::from_pixels(image.width(), image.height());
    info.validate(size)?;
    if info.mode.is_elliptical() {
        crop_to_ellipse(image, info.rect)
    } else {
        crop_to_rect(image, info.rect, size)
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn crop_to_rect(image: &DynamicImage, rect: Rect, size: Size) -> Result<DynamicImage, CropError> {
    let bounds = Rect::from_origin_size(Offset::ZERO, size);
    let clipped = rect.intersection(bounds).ok_or(CropError::OutOfBounds {
        rect,
        image_width: size.width,
        image_height: size.height,
    })?;

    // Snap to whole pixels; the clip above keeps every edge inside the image.
    let left = clipped.x.round();
    let top = clipped.y.round();
    let (width, height) = snapped_size(clipped);
    if width < 1.0 || height < 1.0 {
        return Err(CropError::Degenerate { width, height });
    }

    Ok(image.crop_imm(left as u32, top as u32, width as u32, height as u32))
}

#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
fn crop_to_ellipse(image: &DynamicImage, rect: Rect) -> Result<DynamicImage, CropError> {
    let degenerate = CropError::Degenerate {
        width: rect.width,
        height: rect.height,
    };
    let (width, height) = rect.size().to_pixels().ok_or(degenerate.clone())?;
    let allocation = CropError::Allocation { width, height };

    let source = raster::pixmap_from_image(image).ok_or(CropError::Allocation {
        width: image.width(),
        height: image.height(),
    })?;
    let mut target = Pixmap::new(width, height).ok_or(allocation.clone())?;

    let oval = tiny_skia::Rect::from_xywh(0.0, 0.0, width as f32, height as f32)
        .and_then(PathBuilder::from_oval)
        .ok_or(degenerate)?;
    let mut mask = Mask::new(width, height).ok_or(allocation.clone())?;
    mask.fill_path(&oval, FillRule::Winding, true, Transform::identity());

    target.draw_pixmap(
        -(rect.x.round() as i32),
        -(rect.y.round() as i32),
        source.as_ref(),
        &PixmapPaint::default(),
        Transform::identity(),
        Some(&mask),
    );

    raster::image_from_pixmap(&target).ok_or(allocation)
}
