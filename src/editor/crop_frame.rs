// SPDX-License-Identifier: MPL-2.0
//! Crop rectangle derivation from pan and pinch gestures.
//!
//! The crop UI shows the image fit into the viewport behind a fixed mask.
//! The user pans and zooms the image under the mask; [`CropFrame`] keeps
//! the mask covered by image at all times and converts the final position
//! into a rectangle in source-image pixels.

use crate::config::CropConfig;
use crate::domain::editing::{CropInfo, CropMode};
use crate::domain::geometry::{Offset, Rect, Size};

/// Gesture state of an interactive crop.
#[derive(Debug, Clone, PartialEq)]
pub struct CropFrame {
    mode: CropMode,
    /// Source image size in pixels.
    image_size: Size,
    /// Image size as shown at scale 1 (fit into the viewport).
    view_size: Size,
    viewport_width: f32,
    mask_fraction: f32,
    max_magnification: f32,
    scale: f32,
    last_scale: f32,
    offset: Offset,
    last_offset: Offset,
}

impl CropFrame {
    #[must_use]
    pub fn new(image_size: Size, viewport: Size, mode: CropMode, config: &CropConfig) -> Self {
        let mut frame = Self {
            mode,
            image_size,
            view_size: image_size.fit_into(viewport),
            viewport_width: viewport.width,
            mask_fraction: config.mask_fraction(),
            max_magnification: config.max_magnification(),
            scale: 1.0,
            last_scale: 1.0,
            offset: Offset::ZERO,
            last_offset: Offset::ZERO,
        };
        frame.settle();
        frame
    }

    #[must_use]
    pub fn mode(&self) -> CropMode {
        self.mode
    }

    #[must_use]
    pub fn scale(&self) -> f32 {
        self.scale
    }

    #[must_use]
    pub fn offset(&self) -> Offset {
        self.offset
    }

    /// On-screen size of the crop mask for the current mode.
    #[must_use]
    pub fn mask_size(&self) -> Size {
        let base = self.viewport_width * self.mask_fraction;
        match self.mode {
            CropMode::Circle | CropMode::Square => Size::new(base, base),
            CropMode::Landscape | CropMode::Portrait => {
                let ratio = self.mode.aspect_ratio();
                if ratio >= 1.0 {
                    Size::new(base, base / ratio)
                } else {
                    Size::new(base * ratio, base)
                }
            }
        }
    }

    /// Smallest scale at which the image still covers the mask.
    #[must_use]
    pub fn min_scale(&self) -> f32 {
        if !self.view_size.is_drawable() {
            return 1.0;
        }
        let mask = self.mask_size();
        (mask.width / self.view_size.width).max(mask.height / self.view_size.height)
    }

    /// Largest pan offset per axis at the current scale.
    #[must_use]
    pub fn max_offset(&self) -> Offset {
        let mask = self.mask_size();
        Offset::new(
            (self.view_size.width / 2.0 * self.scale - mask.width / 2.0).max(0.0),
            (self.view_size.height / 2.0 * self.scale - mask.height / 2.0).max(0.0),
        )
    }

    /// Pan update; `translation` is the total movement since the drag began.
    pub fn drag(&mut self, translation: Offset) {
        if translation.is_finite() {
            self.offset = self.clamp_offset(self.last_offset + translation);
        }
    }

    pub fn end_drag(&mut self) {
        self.last_offset = self.offset;
    }

    /// Pinch update; `magnification` is relative to the scale at gesture start.
    pub fn magnify(&mut self, magnification: f32) {
        if !magnification.is_finite() || magnification <= 0.0 {
            return;
        }
        self.scale = self.clamp_scale(self.last_scale * magnification);
        self.offset = self.clamp_offset(self.offset);
        self.last_offset = self.offset;
    }

    pub fn end_magnify(&mut self) {
        self.last_scale = self.scale;
        self.last_offset = self.offset;
    }

    /// Switches the mask shape, re-fitting scale and offset to it.
    pub fn set_mode(&mut self, mode: CropMode) {
        self.mode = mode;
        self.settle();
    }

    /// The crop rectangle in source-image pixels.
    ///
    /// Returns `None` if the image has no drawable size.
    #[must_use]
    pub fn crop_info(&self) -> Option<CropInfo> {
        if !self.view_size.is_drawable() || !self.image_size.is_drawable() {
            return None;
        }
        let factor = (self.image_size.width / self.view_size.width)
            .min(self.image_size.height / self.view_size.height);
        let mask = self.mask_size();
        let size = Size::new(
            mask.width * factor / self.scale,
            mask.height * factor / self.scale,
        );
        let shift = self.offset * (factor / self.scale);
        let origin = Offset::new(
            self.image_size.width / 2.0 - size.width / 2.0 - shift.x,
            self.image_size.height / 2.0 - size.height / 2.0 - shift.y,
        );
        Some(CropInfo::new(self.mode, Rect::from_origin_size(origin, size)))
    }

    fn settle(&mut self) {
        self.scale = self.clamp_scale(self.scale);
        self.last_scale = self.scale;
        self.offset = self.clamp_offset(self.offset);
        self.last_offset = self.offset;
    }

    fn clamp_scale(&self, scale: f32) -> f32 {
        let min = self.min_scale();
        scale.clamp(min, self.max_magnification.max(min))
    }

    fn clamp_offset(&self, offset: Offset) -> Offset {
        let max = self.max_offset();
        Offset::new(offset.x.clamp(-max.x, max.x), offset.y.clamp(-max.y, max.y))
    }
}
