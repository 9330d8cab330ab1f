// SPDX-License-Identifier: MPL-2.0
//! `Session` behavior, split by concern.

mod edits;
mod history;
mod mode;
mod render;
mod routing;
mod text;

pub(crate) use render::{RenderKey, RenderQueue};
