// SPDX-License-Identifier: MPL-2.0
//! Crop shape and source-space crop rectangle.

use crate::domain::error::CropError;
use crate::domain::geometry::{Offset, Rect, Size};
use serde::{Deserialize, Serialize};

/// Limits on the raster a crop may allocate.
pub mod crop_bounds {
    /// Largest crop area as a multiple of the source image area.
    pub const MAX_AREA_FACTOR: f32 = 4.0;
    /// Largest crop area in pixels whatever the source size (16384 x 16384).
    pub const MAX_PIXELS: f32 = 268_435_456.0;
}

/// Shape of the crop frame.
///
/// Square crops are hard rectangular cuts. Every other mode masks the
/// cropped rectangle to the ellipse inscribed in it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CropMode {
    Circle,
    Square,
    Landscape,
    Portrait,
}

impl CropMode {
    pub const ALL: [CropMode; 4] = [
        CropMode::Circle,
        CropMode::Square,
        CropMode::Landscape,
        CropMode::Portrait,
    ];

    /// Width over height of the crop frame for this mode.
    #[must_use]
    pub fn aspect_ratio(self) -> f32 {
        match self {
            CropMode::Circle | CropMode::Square => 1.0,
            CropMode::Landscape => 4.0 / 3.0,
            CropMode::Portrait => 2.0 / 3.0,
        }
    }

    /// Returns `true` when the crop result is masked to an ellipse.
    #[must_use]
    pub fn is_elliptical(self) -> bool {
        !matches!(self, CropMode::Square)
    }

    #[must_use]
    pub fn display_name(self) -> &'static str {
        match self {
            CropMode::Circle => "Circle",
            CropMode::Square => "Square",
            CropMode::Landscape => "Landscape",
            CropMode::Portrait => "Portrait",
        }
    }
}

/// A crop request: shape plus rectangle in source-image pixel coordinates.
///
/// Equality is structural and doubles as the crop cache key.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CropInfo {
    pub mode: CropMode,
    pub rect: Rect,
}

impl CropInfo {
    #[must_use]
    pub const fn new(mode: CropMode, rect: Rect) -> Self {
        Self { mode, rect }
    }

    /// Checks the rectangle against a source image of `image` pixels.
    ///
    /// The rect must be finite, at least one pixel on each side, no larger
    /// than [`crop_bounds`] allow, and overlap the image. It may extend past
    /// the image edges, but a square crop must keep at least one whole pixel
    /// of overlap once snapped to the pixel grid.
    pub fn validate(&self, image: Size) -> Result<(), CropError> {
        let rect = self.rect;
        if !rect.is_finite() {
            return Err(CropError::NonFinite);
        }
        if rect.width < 1.0 || rect.height < 1.0 {
            return Err(CropError::Degenerate {
                width: rect.width,
                height: rect.height,
            });
        }
        let limit = (image.width * image.height * crop_bounds::MAX_AREA_FACTOR)
            .min(crop_bounds::MAX_PIXELS);
        if rect.width * rect.height > limit {
            return Err(CropError::TooLarge {
                width: rect.width,
                height: rect.height,
            });
        }
        let bounds = Rect::from_origin_size(Offset::ZERO, image);
        let Some(clipped) = rect.intersection(bounds) else {
            return Err(CropError::OutOfBounds {
                rect,
                image_width: image.width,
                image_height: image.height,
            });
        };
        if !self.mode.is_elliptical() {
            let (width, height) = snapped_size(clipped);
            if width < 1.0 || height < 1.0 {
                return Err(CropError::Degenerate { width, height });
            }
        }
        Ok(())
    }
}

/// Size of `rect` once its edges are rounded to whole pixels.
pub(crate) fn snapped_size(rect: Rect) -> (f32, f32) {
    (
        rect.right().round() - rect.x.round(),
        rect.bottom().round() - rect.y.round(),
    )
}
