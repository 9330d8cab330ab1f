// SPDX-License-Identifier: MPL-2.0
//! Filter catalogue.
//!
//! A closed set of photo effects. Each variant maps to one named colour
//! kernel; only sepia carries a continuous intensity.

use serde::{Deserialize, Serialize};

/// Intensity bounds for filters that take one.
pub mod intensity_bounds {
    /// No effect.
    pub const MIN: f32 = 0.0;
    /// Full effect.
    pub const MAX: f32 = 1.0;
    /// Intensity used when a filter is first picked.
    pub const DEFAULT: f32 = 0.5;
}

/// A photo effect applied after cropping.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FilterType {
    /// Sepia tone blended with the original by `intensity` in `[0, 1]`.
    Sepia(f32),
    Noir,
    Transfer,
    Vintage,
    Chrome,
    Instant,
}

impl FilterType {
    /// Every filter offered to the user, sepia at the default intensity.
    #[must_use]
    pub fn all_cases() -> [FilterType; 6] {
        [
            FilterType::Sepia(intensity_bounds::DEFAULT),
            FilterType::Noir,
            FilterType::Transfer,
            FilterType::Vintage,
            FilterType::Chrome,
            FilterType::Instant,
        ]
    }

    #[must_use]
    pub fn display_name(&self) -> &'static str {
        match self {
            FilterType::Sepia(_) => "Sepia",
            FilterType::Noir => "Noir",
            FilterType::Transfer => "Transfer",
            FilterType::Vintage => "Vintage",
            FilterType::Chrome => "Chrome",
            FilterType::Instant => "Instant",
        }
    }

    /// Name of the colour kernel that implements this filter.
    ///
    /// Several display names map to differently named kernels (vintage uses
    /// the instant-film kernel, instant uses the process kernel).
    #[must_use]
    pub fn kernel_name(&self) -> &'static str {
        match self {
            FilterType::Sepia(_) => "sepia-tone",
            FilterType::Noir => "photo-effect-noir",
            FilterType::Transfer => "photo-effect-transfer",
            FilterType::Vintage => "photo-effect-instant",
            FilterType::Chrome => "photo-effect-chrome",
            FilterType::Instant => "photo-effect-process",
        }
    }

    /// Whether the filter panel shows an intensity slider for this filter.
    #[must_use]
    pub fn has_intensity(&self) -> bool {
        matches!(
            self,
            FilterType::Sepia(_) | FilterType::Noir | FilterType::Transfer
        )
    }

    /// The intensity passed to the kernel, if this variant carries one.
    #[must_use]
    pub fn intensity(&self) -> Option<f32> {
        match self {
            FilterType::Sepia(intensity) => Some(*intensity),
            _ => None,
        }
    }

    /// Returns a copy with the intensity replaced. Variants without an
    /// intensity value are returned unchanged.
    #[must_use]
    pub fn with_intensity(self, intensity: f32) -> Self {
        match self {
            FilterType::Sepia(_) => FilterType::Sepia(intensity),
            other => other,
        }
    }

    /// Same variant, ignoring the intensity value.
    #[must_use]
    pub fn same_kind(&self, other: &FilterType) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalogue_lists_every_variant_once() {
        let all = FilterType::all_cases();
        assert_eq!(all.len(), 6);
        for (i, a) in all.iter().enumerate() {
            for b in &all[i + 1..] {
                assert!(!a.same_kind(b));
            }
        }
        assert_eq!(all[0], FilterType::Sepia(0.5));
    }

    #[test]
    fn only_sepia_carries_intensity() {
        assert_eq!(FilterType::Sepia(0.3).intensity(), Some(0.3));
        assert_eq!(FilterType::Noir.intensity(), None);
        assert_eq!(FilterType::Noir.with_intensity(0.9), FilterType::Noir);
        assert_eq!(
            FilterType::Sepia(0.3).with_intensity(0.9),
            FilterType::Sepia(0.9)
        );
    }

    #[test]
    fn intensity_slider_filters() {
        let with_slider: Vec<_> = FilterType::all_cases()
            .into_iter()
            .filter(FilterType::has_intensity)
            .map(|f| f.display_name())
            .collect();
        assert_eq!(with_slider, vec!["Sepia", "Noir", "Transfer"]);
    }

    #[test]
    fn kernel_names_are_distinct() {
        let names: std::collections::HashSet<_> = FilterType::all_cases()
            .iter()
            .map(FilterType::kernel_name)
            .collect();
        assert_eq!(names.len(), 6);
        assert_eq!(FilterType::Vintage.kernel_name(), "photo-effect-instant");
    }
}
