// SPDX-License-Identifier: MPL-2.0
//! Domain error types.
//!
//! Typed failures raised by the processing and export pipelines. Each one
//! carries an i18n message key for the notification shown to the user.

mod export;
mod processing;

pub use export::ExportError;
pub use processing::{CropError, FilterError, ProcessingError};
