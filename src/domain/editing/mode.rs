// SPDX-License-Identifier: MPL-2.0
//! Editing tool selection.

/// The tool currently active in the editor. `None` at the session level
/// means no tool is selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditMode {
    /// Free transform: pan, zoom and rotate the image.
    Move,
    Filters,
    /// Freehand drawing.
    Markup,
    Crop,
}

impl EditMode {
    pub const ALL: [EditMode; 4] = [
        EditMode::Move,
        EditMode::Filters,
        EditMode::Markup,
        EditMode::Crop,
    ];

    #[must_use]
    pub fn display_name(self) -> &'static str {
        match self {
            EditMode::Move => "Move",
            EditMode::Filters => "Filters",
            EditMode::Markup => "Markup",
            EditMode::Crop => "Crop",
        }
    }
}
