// SPDX-License-Identifier: MPL-2.0
use crate::domain::geometry::Rect;
use std::fmt;

/// The crop rectangle could not be applied to the source image.
#[derive(Debug, Clone, PartialEq)]
pub enum CropError {
    /// The rectangle contains NaN or infinite coordinates.
    NonFinite,

    /// The rectangle is smaller than one pixel on some side.
    Degenerate { width: f32, height: f32 },

    /// The rectangle does not overlap the source image.
    OutOfBounds {
        rect: Rect,
        image_width: f32,
        image_height: f32,
    },

    /// The rectangle would need an unreasonably large raster.
    TooLarge { width: f32, height: f32 },

    /// The output raster could not be allocated.
    Allocation { width: u32, height: u32 },
}

impl CropError {
    /// Returns the i18n message key for this error type.
    pub fn i18n_key(&self) -> &'static str {
        match self {
            CropError::NonFinite | CropError::Degenerate { .. } => "error-crop-invalid-rect",
            CropError::OutOfBounds { .. } => "error-crop-out-of-bounds",
            CropError::TooLarge { .. } => "error-crop-too-large",
            CropError::Allocation { .. } => "error-crop-allocation",
        }
    }
}

impl fmt::Display for CropError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CropError::NonFinite => write!(f, "Crop rectangle is not finite"),
            CropError::Degenerate { width, height } => {
                write!(f, "Crop rectangle is degenerate ({}x{})", width, height)
            }
            CropError::OutOfBounds {
                rect,
                image_width,
                image_height,
            } => write!(
                f,
                "Crop rectangle ({}, {}, {}x{}) lies outside the {}x{} image",
                rect.x, rect.y, rect.width, rect.height, image_width, image_height
            ),
            CropError::TooLarge { width, height } => {
                write!(f, "Crop rectangle is too large ({}x{})", width, height)
            }
            CropError::Allocation { width, height } => {
                write!(f, "Cannot allocate a {}x{} crop buffer", width, height)
            }
        }
    }
}

impl std::error::Error for CropError {}

/// The requested filter effect could not be produced.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterError {
    /// Intensity is NaN or outside `[0, 1]`.
    InvalidIntensity(f32),

    /// No kernel is registered under the filter's kernel name.
    KernelUnavailable(&'static str),

    /// The source raster is empty or could not be converted.
    EmptyImage,
}

impl FilterError {
    /// Returns the i18n message key for this error type.
    pub fn i18n_key(&self) -> &'static str {
        match self {
            FilterError::InvalidIntensity(_) => "error-filter-invalid-intensity",
            FilterError::KernelUnavailable(_) => "error-filter-unavailable",
            FilterError::EmptyImage => "error-filter-empty-image",
        }
    }
}

impl fmt::Display for FilterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterError::InvalidIntensity(value) => {
                write!(f, "Filter intensity {} is outside [0, 1]", value)
            }
            FilterError::KernelUnavailable(name) => {
                write!(f, "Filter kernel '{}' is not available", name)
            }
            FilterError::EmptyImage => write!(f, "Cannot filter an empty image"),
        }
    }
}

impl std::error::Error for FilterError {}

/// Failure reported by the image processing service.
#[derive(Debug, Clone, PartialEq)]
pub enum ProcessingError {
    Crop(CropError),
    Filter(FilterError),
}

impl ProcessingError {
    /// Returns the i18n message key for this error type.
    pub fn i18n_key(&self) -> &'static str {
        match self {
            ProcessingError::Crop(err) => err.i18n_key(),
            ProcessingError::Filter(err) => err.i18n_key(),
        }
    }
}

impl fmt::Display for ProcessingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProcessingError::Crop(err) => write!(f, "Crop failed: {}", err),
            ProcessingError::Filter(err) => write!(f, "Filter failed: {}", err),
        }
    }
}

impl std::error::Error for ProcessingError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ProcessingError::Crop(err) => Some(err),
            ProcessingError::Filter(err) => Some(err),
        }
    }
}

impl From<CropError> for ProcessingError {
    fn from(err: CropError) -> Self {
        ProcessingError::Crop(err)
    }
}

impl From<FilterError> for ProcessingError {
    fn from(err: FilterError) -> Self {
        ProcessingError::Filter(err)
    }
}
