// SPDX-License-Identifier: MPL-2.0
//! Domain layer: edit-state values, history rules and typed failures.
//!
//! Nothing in here touches pixels or threads. Types derive `serde` traits so
//! edit states can be read from and written to TOML edit scripts.
//!
//! # Modules
//!
//! - [`editing`]: edit state model ([`EditState`](editing::EditState),
//!   [`CropInfo`](editing::CropInfo), [`FilterType`](editing::FilterType),
//!   [`History`](editing::History))
//! - [`error`]: typed failures ([`CropError`](error::CropError),
//!   [`FilterError`](error::FilterError), [`ExportError`](error::ExportError))
//! - [`geometry`]: offsets, sizes, rects and angles

pub mod editing;
pub mod error;
pub mod geometry;
