// SPDX-License-Identifier: MPL-2.0
//! Session message/event types re-exported by the facade.

use crate::domain::editing::{Color, EditMode, FilterType, StrokeLayer, TextId};
use crate::domain::geometry::{Angle, Offset};

/// Inputs from the presentation layer.
#[derive(Debug, Clone)]
pub enum Message {
    /// Switch tools; `None` leaves every tool.
    SetEditMode(Option<EditMode>),
    /// End of a discrete edit gesture.
    Commit,
    Undo,
    Redo,
    /// Drop every edit and the whole history.
    Reset,
    Move(Offset),
    Zoom(f32),
    Rotate(Angle),
    SetFilter(Option<FilterType>),
    /// Slider tick for the selected filter, in `[0, 1]`.
    SetFilterIntensity(f32),
    SetDrawing(StrokeLayer),
    AddText,
    SelectText(TextId),
    DeselectText,
    EditText {
        id: TextId,
        text: String,
    },
    MoveText {
        id: TextId,
        offset: Offset,
    },
    TransformText {
        id: TextId,
        scale: f32,
        rotation: Angle,
    },
    RemoveText(TextId),
    SetTextColor(Color),
}

/// What the presentation layer should react to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    None,
    /// The cropper was handed the source image.
    CropRequested,
    /// A new history entry was recorded.
    StateCommitted,
    /// Undo, redo or reset replaced the working state.
    HistoryChanged,
    TextAdded(TextId),
    /// A new processed image is being computed in the background.
    RenderScheduled,
}
