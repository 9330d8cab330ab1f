// SPDX-License-Identifier: MPL-2.0
//! Edit state snapshot and text overlays.

use super::crop::CropInfo;
use super::drawing::StrokeLayer;
use super::filter::FilterType;
use crate::domain::geometry::{Angle, Offset};
use serde::{Deserialize, Deserializer, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

// =============================================================================
// Color
// =============================================================================

/// 8-bit straight (non-premultiplied) RGBA colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Self = Self::from_rgba(255, 255, 255, 255);
    pub const BLACK: Self = Self::from_rgba(0, 0, 0, 255);

    #[must_use]
    pub const fn from_rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Alpha as a fraction in `[0, 1]`.
    #[must_use]
    pub fn opacity(self) -> f32 {
        f32::from(self.a) / 255.0
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

// =============================================================================
// TextOverlay
// =============================================================================

/// Next value handed out by [`TextId::new`].
static NEXT_TEXT_ID: AtomicU64 = AtomicU64::new(1);

/// Unique identifier for a text overlay.
///
/// Deserializing an ID moves the allocator past it, so IDs created after
/// loading a saved state never collide with the loaded ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct TextId(u64);

impl TextId {
    /// Creates a new unique text ID.
    #[must_use]
    pub fn new() -> Self {
        Self(NEXT_TEXT_ID.fetch_add(1, Ordering::Relaxed))
    }

    #[must_use]
    pub fn get(self) -> u64 {
        self.0
    }
}

impl<'de> Deserialize<'de> for TextId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let id = u64::deserialize(deserializer)?;
        NEXT_TEXT_ID.fetch_max(id.saturating_add(1), Ordering::Relaxed);
        Ok(Self(id))
    }
}

impl Default for TextId {
    fn default() -> Self {
        Self::new()
    }
}

/// A text box composited over the image.
///
/// `offset` is measured from the canvas center. Rotation and scale pivot
/// around the center of the measured text block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextOverlay {
    #[serde(default)]
    pub id: TextId,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub offset: Offset,
    #[serde(default = "unit_scale")]
    pub scale: f32,
    #[serde(default)]
    pub rotation: Angle,
    #[serde(default)]
    pub color: Color,
}

fn unit_scale() -> f32 {
    1.0
}

impl TextOverlay {
    /// An empty overlay at the canvas center with the identity transform.
    #[must_use]
    pub fn new(color: Color) -> Self {
        Self {
            id: TextId::new(),
            text: String::new(),
            offset: Offset::ZERO,
            scale: 1.0,
            rotation: Angle::ZERO,
            color,
        }
    }

    /// Returns `true` if the overlay has no visible content.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.text.is_empty()
    }
}

// =============================================================================
// EditState
// =============================================================================

/// Every non-destructive edit parameter at one point in history.
///
/// Compared by full structural equality; the history manager relies on this
/// to skip duplicate commits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditState {
    /// Pan offset in canvas units.
    pub position: Offset,
    /// Free-transform zoom, strictly positive.
    pub scale: f32,
    pub rotation: Angle,
    pub crop: Option<CropInfo>,
    pub filter: Option<FilterType>,
    pub drawing: Option<StrokeLayer>,
    /// Text overlays in z-order, bottom first.
    pub texts: Vec<TextOverlay>,
}

impl EditState {
    /// The untouched state: no pan, unit scale, no rotation, nothing else.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            position: Offset::ZERO,
            scale: 1.0,
            rotation: Angle::ZERO,
            crop: None,
            filter: None,
            drawing: None,
            texts: Vec::new(),
        }
    }

    #[must_use]
    pub fn text(&self, id: TextId) -> Option<&TextOverlay> {
        self.texts.iter().find(|text| text.id == id)
    }

    pub fn text_mut(&mut self, id: TextId) -> Option<&mut TextOverlay> {
        self.texts.iter_mut().find(|text| text.id == id)
    }

    /// Removes every overlay with empty content and returns how many were
    /// removed. Order of the remaining overlays is kept.
    pub fn remove_blank_texts(&mut self) -> usize {
        let before = self.texts.len();
        self.texts.retain(|text| !text.is_blank());
        before - self.texts.len()
    }

    /// Stores a stroke layer; an empty layer clears the drawing.
    pub fn set_drawing(&mut self, layer: StrokeLayer) {
        self.drawing = if layer.is_empty() { None } else { Some(layer) };
    }
}

impl Default for EditState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::editing::crop::CropMode;
    use crate::domain::geometry::Rect;

    fn overlay(text: &str) -> TextOverlay {
        TextOverlay {
            text: text.to_string(),
            ..TextOverlay::new(Color::WHITE)
        }
    }

    #[test]
    fn fresh_state_is_untouched() {
        let state = EditState::default();
        assert_eq!(state.position, Offset::ZERO);
        assert_eq!(state.scale, 1.0);
        assert!(state.rotation.is_zero());
        assert!(state.crop.is_none());
        assert!(state.filter.is_none());
        assert!(state.drawing.is_none());
        assert!(state.texts.is_empty());
    }

    #[test]
    fn equality_covers_every_field() {
        let base = EditState::default();
        let mut cropped = base.clone();
        cropped.crop = Some(CropInfo::new(
            CropMode::Square,
            Rect::new(0.0, 0.0, 10.0, 10.0),
        ));
        assert_ne!(base, cropped);

        let mut moved = base.clone();
        moved.position = Offset::new(1.0, 0.0);
        assert_ne!(base, moved);
        assert_eq!(base, EditState::new());
    }

    #[test]
    fn text_ids_are_unique() {
        assert_ne!(TextId::new(), TextId::new());
    }

    #[test]
    fn remove_blank_texts_keeps_order_of_the_rest() {
        let mut state = EditState::default();
        state.texts = vec![overlay("a"), overlay(""), overlay("b"), overlay("")];
        assert_eq!(state.remove_blank_texts(), 2);
        let remaining: Vec<_> = state.texts.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(remaining, vec!["a", "b"]);
    }

    #[test]
    fn whitespace_only_text_is_kept() {
        let mut state = EditState::default();
        state.texts = vec![overlay(" ")];
        assert_eq!(state.remove_blank_texts(), 0);
    }

    #[test]
    fn empty_drawing_is_stored_as_none() {
        let mut state = EditState::default();
        state.set_drawing(StrokeLayer::new());
        assert!(state.drawing.is_none());
    }

    #[test]
    fn edit_state_reads_from_toml() {
        let state: EditState = toml::from_str(
            r#"
            scale = 1.5
            filter = { sepia = 0.25 }

            [crop]
            mode = "circle"
            rect = { x = 10.0, y = 20.0, width = 30.0, height = 40.0 }

            [[texts]]
            text = "hello"
            offset = { x = 5.0, y = -5.0 }
            "#,
        )
        .expect("parse edit state");
        assert_eq!(state.scale, 1.5);
        assert_eq!(state.filter, Some(FilterType::Sepia(0.25)));
        assert_eq!(
            state.crop,
            Some(CropInfo::new(
                CropMode::Circle,
                Rect::new(10.0, 20.0, 30.0, 40.0)
            ))
        );
        assert_eq!(state.texts.len(), 1);
        assert_eq!(state.texts[0].scale, 1.0);
        assert_eq!(state.texts[0].color, Color::WHITE);
    }

    #[test]
    fn loaded_ids_are_never_handed_out_again() {
        #[derive(Deserialize)]
        struct Saved {
            id: TextId,
        }
        let saved: Saved = toml::from_str("id = 5000").expect("parse");
        assert_eq!(saved.id.get(), 5000);
        let fresh = TextId::new();
        assert!(fresh.get() > 5000);
        assert_ne!(fresh, saved.id);
    }
}
