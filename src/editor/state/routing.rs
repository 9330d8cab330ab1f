// SPDX-License-Identifier: MPL-2.0
//! Message routing that keeps the session facade slim.

use crate::editor::{Event, Message, Session};

impl Session {
    /// Applies one presentation-layer message.
    pub fn update(&mut self, message: Message) -> Event {
        if self.closed {
            log::debug!("ignoring {message:?} on a closed session");
            return Event::None;
        }
        match message {
            Message::SetEditMode(mode) => self.set_edit_mode(mode),
            Message::Commit => self.commit_event(),
            Message::Undo => history_event(self.undo()),
            Message::Redo => history_event(self.redo()),
            Message::Reset => {
                self.reset();
                Event::HistoryChanged
            }
            Message::Move(position) => {
                self.set_position(position);
                Event::None
            }
            Message::Zoom(scale) => {
                self.set_scale(scale);
                Event::None
            }
            Message::Rotate(rotation) => {
                self.set_rotation(rotation);
                Event::None
            }
            Message::SetFilter(filter) => render_event(self.set_filter(filter)),
            Message::SetFilterIntensity(intensity) => {
                render_event(self.set_filter_intensity(intensity))
            }
            Message::SetDrawing(layer) => {
                self.set_drawing(layer);
                Event::None
            }
            Message::AddText => Event::TextAdded(self.add_text()),
            Message::SelectText(id) => {
                self.select_text(id);
                Event::None
            }
            Message::DeselectText => {
                self.deselect_text();
                Event::None
            }
            Message::EditText { id, text } => {
                self.edit_text(id, text);
                Event::None
            }
            Message::MoveText { id, offset } => {
                self.move_text(id, offset);
                Event::None
            }
            Message::TransformText {
                id,
                scale,
                rotation,
            } => {
                self.transform_text(id, scale, rotation);
                Event::None
            }
            Message::RemoveText(id) => {
                self.remove_text(id);
                Event::None
            }
            Message::SetTextColor(color) => {
                self.set_text_color(color);
                Event::None
            }
        }
    }
}

fn history_event(changed: bool) -> Event {
    if changed {
        Event::HistoryChanged
    } else {
        Event::None
    }
}

fn render_event(scheduled: bool) -> Event {
    if scheduled {
        Event::RenderScheduled
    } else {
        Event::None
    }
}
