// SPDX-License-Identifier: MPL-2.0
//! Flattening export.
//!
//! Compositing order, bottom to top:
//!
//! 1. opaque white background
//! 2. the processed image, fit into the canvas, then translated by the
//!    edit position and scaled/rotated about its own center
//! 3. the freehand stroke layer at 1:1
//! 4. text overlays in z-order
//!
//! [`image_transform`] is the single source of the image placement so a
//! live preview can use exactly the same decomposition.

use super::text::{TextRenderer, TextStyle};
use super::{raster, strokes};
use crate::domain::editing::{EditState, StrokeLayer};
use crate::domain::error::ExportError;
use crate::domain::geometry::{Rect, Size};
use image_rs::DynamicImage;
use tiny_skia::{FilterQuality, Pixmap, PixmapPaint, Transform};

/// Largest canvas an export may allocate, in pixels (8192 x 8192).
pub const MAX_CANVAS_PIXELS: u64 = 1 << 26;

/// Maps source-image pixels to canvas coordinates.
///
/// The image is aspect-fit and centered, then the whole fitted rect is
/// moved by `state.position` and scaled and rotated about its center.
#[must_use]
pub fn image_transform(image_size: Size, canvas_size: Size, state: &EditState) -> Transform {
    let fitted = Rect::centered_in(image_size.fit_into(canvas_size), canvas_size);
    let center = fitted.center();
    let (sx, sy) = if image_size.is_drawable() {
        (fitted.width / image_size.width, fitted.height / image_size.height)
    } else {
        (1.0, 1.0)
    };
    Transform::from_translate(state.position.x, state.position.y)
        .pre_translate(center.x, center.y)
        .pre_scale(state.scale, state.scale)
        .pre_rotate(state.rotation.degrees())
        .pre_translate(-center.x, -center.y)
        .pre_translate(fitted.x, fitted.y)
        .pre_scale(sx, sy)
}

/// Flattens a processed image and its overlays into one raster.
#[derive(Debug, Clone)]
pub struct ExportService {
    text: TextRenderer,
}

impl ExportService {
    /// Creates a service that renders text with system fonts.
    #[must_use]
    pub fn new(style: TextStyle) -> Self {
        Self::with_text_renderer(TextRenderer::new(style))
    }

    #[must_use]
    pub fn with_text_renderer(text: TextRenderer) -> Self {
        Self { text }
    }

    #[must_use]
    pub fn text_renderer(&self) -> &TextRenderer {
        &self.text
    }

    /// Composites `image`, `strokes` and the state's text overlays onto a
    /// white canvas of `canvas_size`.
    pub fn export_canvas(
        &self,
        canvas_size: Size,
        strokes: &StrokeLayer,
        image: &DynamicImage,
        state: &EditState,
    ) -> Result<DynamicImage, ExportError> {
        let (width, height) = canvas_size.to_pixels().ok_or(ExportError::InvalidCanvas {
            width: canvas_size.width,
            height: canvas_size.height,
        })?;
        if u64::from(width) * u64::from(height) > MAX_CANVAS_PIXELS {
            return Err(ExportError::CanvasTooLarge { width, height });
        }
        if !(state.scale.is_finite() && state.scale > 0.0)
            || !state.position.is_finite()
            || !state.rotation.radians().is_finite()
        {
            return Err(ExportError::InvalidTransform);
        }
        let canvas_size = Size::from_pixels(width, height);

        let mut canvas = Pixmap::new(width, height)
            .ok_or_else(|| ExportError::Raster(format!("cannot allocate {width}x{height} canvas")))?;
        canvas.fill(tiny_skia::Color::WHITE);

        draw_image(&mut canvas, canvas_size, image, state);
        strokes::draw_strokes(&mut canvas, strokes);
        for overlay in &state.texts {
            self.text.draw(&mut canvas, canvas_size, overlay);
        }

        log::debug!(
            "exported {}x{} canvas with {} strokes and {} texts",
            width,
            height,
            strokes.len(),
            state.texts.len()
        );
        raster::image_from_pixmap(&canvas)
            .ok_or_else(|| ExportError::Raster("cannot read back canvas".to_string()))
    }
}

fn draw_image(canvas: &mut Pixmap, canvas_size: Size, image: &DynamicImage, state: &EditState) {
    let Some(source) = raster::pixmap_from_image(image) else {
        log::debug!("skipping empty image layer");
        return;
    };
    let image_size = Size::from_pixels(image.width(), image.height());
    let paint = PixmapPaint {
        quality: FilterQuality::Bilinear,
        ..PixmapPaint::default()
    };
    canvas.draw_pixmap(
        0,
        0,
        source.as_ref(),
        &paint,
        image_transform(image_size, canvas_size, state),
        None,
    );
}
