// SPDX-License-Identifier: MPL-2.0
//! `photo_session` is the editing core of a photo editor.
//!
//! It keeps the non-destructive edit parameters of one photo with a bounded
//! undo/redo history, renders crop and filter changes in the background,
//! and flattens the result with freehand strokes and text overlays into a
//! single image.
//!
//! - [`editor::Session`]: the controller a UI drives
//! - [`domain::editing`]: edit state, history, crop and filter types
//! - [`media`]: pixel pipeline (processing and export)
//! - [`config`]: user preferences stored as TOML

#![doc(html_root_url = "https://docs.rs/photo_session/0.1.0")]

pub mod config;
pub mod domain;
pub mod editor;
pub mod error;
pub mod media;

pub use domain::editing::{CropInfo, CropMode, EditMode, EditState, FilterType, History};
pub use editor::{Event, Message, Session};
pub use error::{Error, Result};
