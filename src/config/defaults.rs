// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! # Categories
//!
//! - **History**: Undo stack size
//! - **Text**: Overlay font settings
//! - **Filters**: Initial filter intensity
//! - **Crop**: Crop frame sizing and magnification

use crate::domain::editing::{history_bounds, intensity_bounds, Color};

// ==========================================================================
// History Defaults
// ==========================================================================

/// Default number of edit states kept for undo.
pub const DEFAULT_MAX_HISTORY_STATES: usize = history_bounds::DEFAULT;

/// Minimum number of edit states kept for undo.
pub const MIN_MAX_HISTORY_STATES: usize = history_bounds::MIN;

/// Maximum number of edit states kept for undo.
pub const MAX_MAX_HISTORY_STATES: usize = history_bounds::MAX;

// ==========================================================================
// Text Defaults
// ==========================================================================

/// Font size of text overlays, in canvas units.
pub const DEFAULT_TEXT_FONT_SIZE: f32 = 24.0;

/// Width after which overlay text wraps, in canvas units (before scaling).
pub const DEFAULT_TEXT_MAX_WIDTH: f32 = 300.0;

/// Font family requested for text overlays.
pub const DEFAULT_TEXT_FONT_FAMILY: &str = "sans-serif";

/// Colour given to new text overlays.
pub const DEFAULT_TEXT_COLOR: Color = Color::WHITE;

/// Smallest accepted font size.
pub const MIN_TEXT_FONT_SIZE: f32 = 4.0;

/// Largest accepted font size.
pub const MAX_TEXT_FONT_SIZE: f32 = 512.0;

// ==========================================================================
// Filter Defaults
// ==========================================================================

/// Intensity used when a filter with a slider is first picked.
pub const DEFAULT_FILTER_INTENSITY: f32 = intensity_bounds::DEFAULT;

// ==========================================================================
// Crop Defaults
// ==========================================================================

/// Crop mask base size as a fraction of the viewport width.
pub const DEFAULT_CROP_MASK_FRACTION: f32 = 0.7;

/// Smallest accepted mask fraction.
pub const MIN_CROP_MASK_FRACTION: f32 = 0.1;

/// Largest accepted mask fraction.
pub const MAX_CROP_MASK_FRACTION: f32 = 1.0;

/// Largest magnification the crop frame allows.
pub const DEFAULT_CROP_MAX_MAGNIFICATION: f32 = 4.0;

/// Lower limit for the maximum magnification setting.
pub const MIN_CROP_MAX_MAGNIFICATION: f32 = 1.0;

/// Upper limit for the maximum magnification setting.
pub const MAX_CROP_MAX_MAGNIFICATION: f32 = 16.0;
