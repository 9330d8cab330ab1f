// SPDX-License-Identifier: MPL-2.0
//! Linear undo/redo history of edit states.
//!
//! The history always holds at least one state. Committing a state equal
//! to the current one is ignored, and committing a new state drops the redo
//! branch. When the stack grows past its limit the oldest half is removed
//! in one go rather than one entry per commit.

use super::state::EditState;

/// History size bounds.
pub mod history_bounds {
    /// Smallest accepted limit. Half-trimming needs at least two entries.
    pub const MIN: usize = 2;
    /// Largest accepted limit.
    pub const MAX: usize = 10_000;
    /// Default number of retained states.
    pub const DEFAULT: usize = 100;
}

static INITIAL_STATE: EditState = EditState::new();

/// Ordered edit-state snapshots plus a redo stack.
#[derive(Debug, Clone)]
pub struct History {
    states: Vec<EditState>,
    redo_stack: Vec<EditState>,
    max_states: usize,
}

impl History {
    /// Creates a history holding the default state. `max_states` is clamped
    /// to [`history_bounds`].
    #[must_use]
    pub fn new(max_states: usize) -> Self {
        Self {
            states: vec![EditState::new()],
            redo_stack: Vec::new(),
            max_states: max_states.clamp(history_bounds::MIN, history_bounds::MAX),
        }
    }

    /// The latest committed state.
    #[must_use]
    pub fn current(&self) -> &EditState {
        self.states.last().unwrap_or(&INITIAL_STATE)
    }

    /// Appends `state` unless it equals [`History::current`].
    ///
    /// Returns `true` if the state was recorded.
    pub fn commit(&mut self, state: EditState) -> bool {
        if *self.current() == state {
            return false;
        }
        self.redo_stack.clear();
        self.states.push(state);
        if self.states.len() > self.max_states {
            let excess = self.states.len() - self.max_states / 2;
            self.states.drain(..excess);
            log::debug!(
                "history trimmed by {excess} states, {} retained",
                self.states.len()
            );
        }
        true
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.states.len() > 1
    }

    /// Steps back one state. Returns `false` when already at the oldest.
    pub fn undo(&mut self) -> bool {
        if !self.can_undo() {
            return false;
        }
        match self.states.pop() {
            Some(state) => {
                self.redo_stack.push(state);
                true
            }
            None => false,
        }
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Re-applies the last undone state. Returns `false` if there is none.
    pub fn redo(&mut self) -> bool {
        match self.redo_stack.pop() {
            Some(state) => {
                self.states.push(state);
                true
            }
            None => false,
        }
    }

    /// Drops everything and starts over from the default state.
    pub fn reset(&mut self) {
        self.states.clear();
        self.states.push(EditState::new());
        self.redo_stack.clear();
    }

    /// Removes every state matching `reject` from both stacks.
    ///
    /// Neighbours left equal by the removal collapse into one entry. If
    /// nothing remains the history restarts from the default state. Returns
    /// the number of removed states.
    pub fn discard_where(&mut self, reject: impl Fn(&EditState) -> bool) -> usize {
        let before = self.states.len() + self.redo_stack.len();
        self.states.retain(|state| !reject(state));
        self.redo_stack.retain(|state| !reject(state));
        self.states.dedup();
        self.redo_stack.dedup();
        let removed = before - self.states.len() - self.redo_stack.len();
        if self.states.is_empty() {
            self.states.push(EditState::new());
        }
        if self.redo_stack.last() == self.states.last() {
            self.redo_stack.pop();
        }
        removed
    }

    /// Number of retained states, including the current one.
    #[must_use]
    pub fn len(&self) -> usize {
        self.states.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    #[must_use]
    pub fn redo_len(&self) -> usize {
        self.redo_stack.len()
    }

    #[must_use]
    pub fn max_states(&self) -> usize {
        self.max_states
    }

    /// Retained states, oldest first.
    pub fn states(&self) -> impl Iterator<Item = &EditState> {
        self.states.iter()
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new(history_bounds::DEFAULT)
    }
}
