// SPDX-License-Identifier: MPL-2.0
//! Edit parameters and their history.
//!
//! - [`EditState`]: snapshot of every non-destructive edit
//! - [`CropInfo`] / [`CropMode`]: crop shape and source-space rectangle
//! - [`FilterType`]: the filter catalogue
//! - [`StrokeLayer`]: freehand strokes
//! - [`TextOverlay`]: text boxes in z-order
//! - [`History`]: bounded linear undo/redo

pub mod crop;
pub mod drawing;
pub mod filter;
pub mod history;
pub mod mode;
pub mod state;

pub use crop::{crop_bounds, CropInfo, CropMode};
pub use drawing::{Ink, Stroke, StrokeLayer};
pub use filter::{intensity_bounds, FilterType};
pub use history::{history_bounds, History};
pub use mode::EditMode;
pub use state::{Color, EditState, TextId, TextOverlay};
