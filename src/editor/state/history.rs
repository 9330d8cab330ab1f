// SPDX-License-Identifier: MPL-2.0
//! Commit, undo, redo and reset.

use crate::editor::{Event, Session};

impl Session {
    /// Records the working state in history.
    ///
    /// Text overlays left empty are removed first. Returns `true` if a new
    /// history entry was created.
    pub fn commit_state(&mut self) -> bool {
        let removed = self.working.remove_blank_texts();
        if removed > 0 {
            log::debug!("dropped {removed} empty text overlay(s) before commit");
            self.forget_missing_active_text();
        }
        let committed = self.history.commit(self.working.clone());
        if committed {
            log::debug!("committed edit state ({} in history)", self.history.len());
        }
        committed
    }

    pub fn undo(&mut self) -> bool {
        if !self.history.undo() {
            return false;
        }
        log::debug!("undo ({} left)", self.history.len());
        self.restore_from_history();
        true
    }

    pub fn redo(&mut self) -> bool {
        if !self.history.redo() {
            return false;
        }
        log::debug!("redo ({} in history)", self.history.len());
        self.restore_from_history();
        true
    }

    /// Drops every edit and the whole history.
    pub fn reset(&mut self) {
        self.history.reset();
        log::debug!("history reset");
        self.restore_from_history();
    }

    pub(crate) fn commit_event(&mut self) -> Event {
        if self.commit_state() {
            Event::StateCommitted
        } else {
            Event::None
        }
    }

    fn restore_from_history(&mut self) {
        self.working = self.history.current().clone();
        self.forget_missing_active_text();
        self.sync_render();
    }
}
