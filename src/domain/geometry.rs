// SPDX-License-Identifier: MPL-2.0
//! Plane geometry used by edit parameters and compositing.
//!
//! All values are `f32` device units with the origin at the top-left corner
//! and the y axis pointing down, matching the raster coordinate space.

use serde::{Deserialize, Serialize};
use std::f32::consts::PI;

// =============================================================================
// Offset
// =============================================================================

/// A 2D displacement (pan offset, text offset, gesture translation).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Offset {
    pub x: f32,
    pub y: f32,
}

impl Offset {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl std::ops::Add for Offset {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl std::ops::Mul<f32> for Offset {
    type Output = Self;

    fn mul(self, rhs: f32) -> Self {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

// =============================================================================
// Size
// =============================================================================

/// Width and height in device units.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    #[must_use]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Size of a raster with the given pixel dimensions.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn from_pixels(width: u32, height: u32) -> Self {
        Self::new(width as f32, height as f32)
    }

    /// Returns `true` if both sides are finite and strictly positive.
    #[must_use]
    pub fn is_drawable(self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }

    #[must_use]
    pub fn center(self) -> Offset {
        Offset::new(self.width / 2.0, self.height / 2.0)
    }

    /// Rounds to whole pixel dimensions.
    ///
    /// Returns `None` unless both sides round to at least one pixel.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn to_pixels(self) -> Option<(u32, u32)> {
        if !self.width.is_finite() || !self.height.is_finite() {
            return None;
        }
        let width = self.width.round();
        let height = self.height.round();
        let limit = u32::MAX as f32;
        if width < 1.0 || height < 1.0 || width > limit || height > limit {
            return None;
        }
        Some((width as u32, height as u32))
    }

    /// Largest size with this aspect ratio that fits inside `bounds`.
    ///
    /// This is "fit" rather than "fill": one side matches `bounds` and the
    /// other is equal or smaller.
    #[must_use]
    pub fn fit_into(self, bounds: Size) -> Size {
        if !self.is_drawable() || !bounds.is_drawable() {
            return Size::default();
        }
        let ratio = (bounds.width / self.width).min(bounds.height / self.height);
        Size::new(self.width * ratio, self.height * ratio)
    }
}

// =============================================================================
// Rect
// =============================================================================

/// Axis-aligned rectangle: origin plus size.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    #[must_use]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    #[must_use]
    pub fn from_origin_size(origin: Offset, size: Size) -> Self {
        Self::new(origin.x, origin.y, size.width, size.height)
    }

    /// A rect of `size` centered inside `bounds`.
    #[must_use]
    pub fn centered_in(size: Size, bounds: Size) -> Self {
        Self::new(
            (bounds.width - size.width) / 2.0,
            (bounds.height - size.height) / 2.0,
            size.width,
            size.height,
        )
    }

    #[must_use]
    pub fn size(self) -> Size {
        Size::new(self.width, self.height)
    }

    #[must_use]
    pub fn center(self) -> Offset {
        Offset::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    #[must_use]
    pub fn right(self) -> f32 {
        self.x + self.width
    }

    #[must_use]
    pub fn bottom(self) -> f32 {
        self.y + self.height
    }

    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.width.is_finite() && self.height.is_finite()
    }

    /// Overlapping area of two rects, or `None` when they do not overlap.
    #[must_use]
    pub fn intersection(self, other: Rect) -> Option<Rect> {
        let left = self.x.max(other.x);
        let top = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        if right <= left || bottom <= top {
            return None;
        }
        Some(Rect::new(left, top, right - left, bottom - top))
    }
}

// =============================================================================
// Angle
// =============================================================================

/// Rotation angle in radians. Positive values turn clockwise on screen.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Angle(f32);

impl Angle {
    pub const ZERO: Self = Self(0.0);

    #[must_use]
    pub const fn from_radians(radians: f32) -> Self {
        Self(radians)
    }

    #[must_use]
    pub fn from_degrees(degrees: f32) -> Self {
        Self(degrees * PI / 180.0)
    }

    #[must_use]
    pub fn radians(self) -> f32 {
        self.0
    }

    #[must_use]
    pub fn degrees(self) -> f32 {
        self.0 * 180.0 / PI
    }

    #[must_use]
    pub fn is_zero(self) -> bool {
        self.0.abs() < f32::EPSILON
    }
}
