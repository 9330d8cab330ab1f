// SPDX-License-Identifier: MPL-2.0
//! Freehand stroke layer.
//!
//! Strokes are kept as vector data in canvas coordinates. The layer is
//! carried through history as a value and can be stored as an opaque CBOR
//! blob.

use super::state::Color;
use crate::domain::geometry::Offset;
use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Stroke width bounds in canvas units.
pub mod width_bounds {
    pub const MIN: f32 = 0.5;
    pub const MAX: f32 = 64.0;
    pub const DEFAULT: f32 = 4.0;
}

/// Drawing tool that produced a stroke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Ink {
    #[default]
    Pen,
    /// Translucent highlighter; painted at half the colour's alpha.
    Marker,
}

/// One continuous freehand stroke.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    pub ink: Ink,
    pub color: Color,
    pub width: f32,
    pub points: Vec<Offset>,
}

impl Stroke {
    /// Starts a stroke. The width is clamped to [`width_bounds`].
    #[must_use]
    pub fn new(ink: Ink, color: Color, width: f32) -> Self {
        let width = if width.is_finite() {
            width.clamp(width_bounds::MIN, width_bounds::MAX)
        } else {
            width_bounds::DEFAULT
        };
        Self {
            ink,
            color,
            width,
            points: Vec::new(),
        }
    }

    /// Appends a point. Non-finite points are ignored.
    pub fn push(&mut self, point: Offset) {
        if point.is_finite() {
            self.points.push(point);
        }
    }

    #[must_use]
    pub fn with_points(mut self, points: impl IntoIterator<Item = Offset>) -> Self {
        for point in points {
            self.push(point);
        }
        self
    }
}

/// Ordered strokes, painted first to last.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StrokeLayer {
    strokes: Vec<Stroke>,
}

impl StrokeLayer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a stroke. Strokes without points are dropped.
    pub fn push(&mut self, stroke: Stroke) {
        if !stroke.points.is_empty() {
            self.strokes.push(stroke);
        }
    }

    /// Removes the most recent stroke.
    pub fn pop(&mut self) -> Option<Stroke> {
        self.strokes.pop()
    }

    #[must_use]
    pub fn strokes(&self) -> &[Stroke] {
        &self.strokes
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.strokes.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.strokes.len()
    }

    /// Encodes the layer as a CBOR blob.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut bytes = Vec::new();
        ciborium::into_writer(self, &mut bytes)?;
        Ok(bytes)
    }

    /// Decodes a blob produced by [`StrokeLayer::to_bytes`].
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Ok(ciborium::from_reader(bytes)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_stroke() -> Stroke {
        Stroke::new(Ink::Pen, Color::BLACK, 3.0)
            .with_points([Offset::new(1.0, 1.0), Offset::new(5.0, 8.0)])
    }

    #[test]
    fn empty_strokes_are_not_recorded() {
        let mut layer = StrokeLayer::new();
        layer.push(Stroke::new(Ink::Pen, Color::BLACK, 3.0));
        assert!(layer.is_empty());
        layer.push(sample_stroke());
        assert_eq!(layer.len(), 1);
    }

    #[test]
    fn stroke_width_is_clamped() {
        assert_eq!(Stroke::new(Ink::Pen, Color::BLACK, 1000.0).width, width_bounds::MAX);
        assert_eq!(Stroke::new(Ink::Pen, Color::BLACK, 0.0).width, width_bounds::MIN);
        assert_eq!(
            Stroke::new(Ink::Pen, Color::BLACK, f32::NAN).width,
            width_bounds::DEFAULT
        );
    }

    #[test]
    fn non_finite_points_are_skipped() {
        let stroke = Stroke::new(Ink::Marker, Color::WHITE, 2.0)
            .with_points([Offset::new(f32::INFINITY, 0.0), Offset::new(2.0, 2.0)]);
        assert_eq!(stroke.points, vec![Offset::new(2.0, 2.0)]);
    }

    #[test]
    fn blob_restores_the_same_layer() {
        let mut layer = StrokeLayer::new();
        layer.push(sample_stroke());
        layer.push(
            Stroke::new(Ink::Marker, Color::from_rgba(255, 0, 0, 255), 10.0)
                .with_points([Offset::new(0.0, 0.0)]),
        );
        let bytes = layer.to_bytes().expect("encode");
        assert_eq!(StrokeLayer::from_bytes(&bytes).expect("decode"), layer);
    }

    #[test]
    fn garbage_blob_is_an_error() {
        assert!(StrokeLayer::from_bytes(&[0xff, 0x00, 0x13]).is_err());
    }
}
