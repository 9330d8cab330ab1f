// SPDX-License-Identifier: MPL-2.0
use std::fmt;

/// The flattened export could not be produced.
#[derive(Debug, Clone, PartialEq)]
pub enum ExportError {
    /// Canvas size is non-finite or smaller than one pixel.
    InvalidCanvas { width: f32, height: f32 },

    /// Canvas has more pixels than an export may allocate.
    CanvasTooLarge { width: u32, height: u32 },

    /// The image transform is not invertible (zero or non-finite scale).
    InvalidTransform,

    /// A raster could not be allocated or converted.
    Raster(String),
}

impl ExportError {
    /// Returns the i18n message key for this error type.
    pub fn i18n_key(&self) -> &'static str {
        match self {
            ExportError::InvalidCanvas { .. } => "error-export-invalid-canvas",
            ExportError::CanvasTooLarge { .. } => "error-export-canvas-too-large",
            ExportError::InvalidTransform => "error-export-invalid-transform",
            ExportError::Raster(_) => "error-export-raster",
        }
    }
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportError::InvalidCanvas { width, height } => {
                write!(f, "Invalid export canvas {}x{}", width, height)
            }
            ExportError::CanvasTooLarge { width, height } => {
                write!(f, "Export canvas {}x{} is too large", width, height)
            }
            ExportError::InvalidTransform => write!(f, "Image transform is not invertible"),
            ExportError::Raster(msg) => write!(f, "Raster error: {}", msg),
        }
    }
}

impl std::error::Error for ExportError {}
