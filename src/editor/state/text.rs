// SPDX-License-Identifier: MPL-2.0
//! Text overlays and the active-overlay color binding.

use crate::domain::editing::{Color, TextId, TextOverlay};
use crate::domain::geometry::{Angle, Offset};
use crate::editor::Session;

impl Session {
    /// Appends an empty overlay in the current text color and makes it
    /// active.
    pub fn add_text(&mut self) -> TextId {
        let overlay = TextOverlay::new(self.text_color);
        let id = overlay.id;
        self.working.texts.push(overlay);
        self.active_text = Some(id);
        id
    }

    /// Makes `id` active and adopts its color. Returns `false` for an
    /// unknown id.
    pub fn select_text(&mut self, id: TextId) -> bool {
        let Some(overlay) = self.working.text(id) else {
            return false;
        };
        self.text_color = overlay.color;
        self.active_text = Some(id);
        true
    }

    pub fn deselect_text(&mut self) {
        self.active_text = None;
    }

    pub fn edit_text(&mut self, id: TextId, text: impl Into<String>) -> bool {
        match self.working.text_mut(id) {
            Some(overlay) => {
                overlay.text = text.into();
                true
            }
            None => false,
        }
    }

    pub fn move_text(&mut self, id: TextId, offset: Offset) -> bool {
        if !offset.is_finite() {
            return false;
        }
        match self.working.text_mut(id) {
            Some(overlay) => {
                overlay.offset = offset;
                true
            }
            None => false,
        }
    }

    /// Sets an overlay's own scale and rotation. A non-positive scale is
    /// rejected.
    pub fn transform_text(&mut self, id: TextId, scale: f32, rotation: Angle) -> bool {
        if !(scale.is_finite() && scale > 0.0) || !rotation.radians().is_finite() {
            return false;
        }
        match self.working.text_mut(id) {
            Some(overlay) => {
                overlay.scale = scale;
                overlay.rotation = rotation;
                true
            }
            None => false,
        }
    }

    pub fn remove_text(&mut self, id: TextId) -> bool {
        let before = self.working.texts.len();
        self.working.texts.retain(|text| text.id != id);
        if self.active_text == Some(id) {
            self.active_text = None;
        }
        self.working.texts.len() != before
    }

    /// Updates the color binding and recolors the active overlay.
    pub fn set_text_color(&mut self, color: Color) {
        self.text_color = color;
        if let Some(overlay) = self.active_text.and_then(|id| self.working.text_mut(id)) {
            overlay.color = color;
        }
    }

    pub(crate) fn forget_missing_active_text(&mut self) {
        if let Some(id) = self.active_text {
            if self.working.text(id).is_none() {
                self.active_text = None;
            }
        }
    }
}
