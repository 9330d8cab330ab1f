// SPDX-License-Identifier: MPL-2.0
//! Direct edits of the working state. None of these commit.

use crate::domain::editing::{intensity_bounds, FilterType, StrokeLayer};
use crate::domain::geometry::{Angle, Offset};
use crate::editor::Session;

impl Session {
    pub fn set_position(&mut self, position: Offset) {
        if position.is_finite() {
            self.working.position = position;
        }
    }

    /// Ignored unless `scale` is finite and positive.
    pub fn set_scale(&mut self, scale: f32) {
        if scale.is_finite() && scale > 0.0 {
            self.working.scale = scale;
        }
    }

    pub fn set_rotation(&mut self, rotation: Angle) {
        if rotation.radians().is_finite() {
            self.working.rotation = rotation;
        }
    }

    /// Selects a filter and re-renders. Returns `true` if a render was
    /// scheduled.
    ///
    /// A filter the processor cannot run is refused with an error
    /// notification and leaves the working state untouched.
    pub fn set_filter(&mut self, filter: Option<FilterType>) -> bool {
        if let Some(filter) = filter.as_ref() {
            if let Err(err) = self.processor.check_filter(filter) {
                log::warn!("rejected filter {filter:?}: {err}");
                self.notify_error(err.i18n_key(), &err);
                return false;
            }
        }
        self.working.filter = filter;
        self.sync_render()
    }

    /// Changes the intensity of the selected filter, if it takes one.
    pub fn set_filter_intensity(&mut self, intensity: f32) -> bool {
        let Some(filter) = self.working.filter else {
            return false;
        };
        if !filter.has_intensity() || !intensity.is_finite() {
            return false;
        }
        let intensity = intensity.clamp(intensity_bounds::MIN, intensity_bounds::MAX);
        self.set_filter(Some(filter.with_intensity(intensity)))
    }

    /// Replaces the freehand drawing; an empty layer removes it.
    pub fn set_drawing(&mut self, layer: StrokeLayer) {
        self.working.set_drawing(layer);
    }
}
