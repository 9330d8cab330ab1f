// SPDX-License-Identifier: MPL-2.0
//! Background recomputation of the processed image.
//!
//! Every request gets a generation number and the latest generation is
//! published through a shared atomic. A worker that finds its generation
//! superseded skips the work, and outcomes whose generation is no longer
//! the latest are dropped when drained, so only the newest request can
//! reach the screen.

use crate::domain::editing::{CropInfo, EditState, FilterType};
use crate::domain::error::ProcessingError;
use crate::editor::Session;
use image_rs::DynamicImage;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::mpsc;

/// The part of an edit state that affects pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub(crate) struct RenderKey {
    pub crop: Option<CropInfo>,
    pub filter: Option<FilterType>,
}

impl RenderKey {
    pub fn of(state: &EditState) -> Self {
        Self {
            crop: state.crop,
            filter: state.filter,
        }
    }

    fn to_state(self) -> EditState {
        EditState {
            crop: self.crop,
            filter: self.filter,
            ..EditState::new()
        }
    }
}

type RenderResult = Result<Arc<DynamicImage>, ProcessingError>;

#[derive(Debug)]
pub(crate) struct RenderOutcome {
    generation: u64,
    key: RenderKey,
    /// `None` when the worker skipped a superseded request.
    result: Option<RenderResult>,
}

/// Generation bookkeeping and the result channel.
#[derive(Debug)]
pub(crate) struct RenderQueue {
    latest: Arc<AtomicU64>,
    next: u64,
    outstanding: usize,
    sender: mpsc::UnboundedSender<RenderOutcome>,
    receiver: mpsc::UnboundedReceiver<RenderOutcome>,
}

impl RenderQueue {
    pub fn new() -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        Self {
            latest: Arc::new(AtomicU64::new(0)),
            next: 0,
            outstanding: 0,
            sender,
            receiver,
        }
    }

    /// Starts a new generation, superseding every earlier one.
    fn advance(&mut self) -> u64 {
        self.next += 1;
        self.latest.store(self.next, Ordering::SeqCst);
        self.next
    }

    fn is_latest(&self, generation: u64) -> bool {
        self.latest.load(Ordering::SeqCst) == generation
    }

    pub fn is_idle(&self) -> bool {
        self.outstanding == 0
    }

    /// Invalidates every generation and stops accepting results.
    fn shut_down(&mut self) {
        self.latest.store(0, Ordering::SeqCst);
        self.outstanding = 0;
        self.receiver.close();
        while self.receiver.try_recv().is_ok() {}
    }
}

impl Session {
    /// Schedules a render if the working crop or filter differs from the
    /// last request. Returns `true` if a background job was started.
    pub(crate) fn sync_render(&mut self) -> bool {
        let key = RenderKey::of(&self.working);
        if key == self.requested || self.closed {
            return false;
        }
        self.requested = key;
        self.request_render(key)
    }

    fn request_render(&mut self, key: RenderKey) -> bool {
        let generation = self.render.advance();
        if key == self.displayed {
            // Back to what is on screen; only supersede in-flight work.
            log::debug!("render generation {generation} matches the displayed image");
            return false;
        }

        let latest = Arc::clone(&self.render.latest);
        let sender = self.render.sender.clone();
        let processor = Arc::clone(&self.processor);
        let source = Arc::clone(&self.original);
        self.render.outstanding += 1;
        log::debug!("render generation {generation} scheduled: {key:?}");

        self.runtime.spawn_blocking(move || {
            let result = if latest.load(Ordering::SeqCst) == generation {
                Some(processor.process_image(&source, &key.to_state()))
            } else {
                None
            };
            // The session may be gone; nothing to report then.
            let _ = sender.send(RenderOutcome {
                generation,
                key,
                result,
            });
        });
        true
    }

    /// Applies finished renders and crop replies without waiting.
    ///
    /// Returns `true` if anything visible changed.
    pub fn pump(&mut self) -> bool {
        let mut changed = self.poll_crop_reply();
        while let Ok(outcome) = self.render.receiver.try_recv() {
            changed |= self.apply_render(outcome);
        }
        changed
    }

    /// Waits until every scheduled render has reported back and applies
    /// the results.
    pub async fn wait_for_render(&mut self) {
        while !self.render.is_idle() {
            match self.render.receiver.recv().await {
                Some(outcome) => {
                    self.apply_render(outcome);
                }
                None => break,
            }
        }
    }

    fn apply_render(&mut self, outcome: RenderOutcome) -> bool {
        self.render.outstanding = self.render.outstanding.saturating_sub(1);
        if !self.render.is_latest(outcome.generation) {
            log::debug!("discarding stale render generation {}", outcome.generation);
            return false;
        }
        match outcome.result {
            None => false,
            Some(Ok(image)) => {
                log::debug!("render generation {} applied", outcome.generation);
                self.processed = image;
                self.displayed = outcome.key;
                true
            }
            Some(Err(err)) => {
                log::warn!("image processing failed: {err}");
                self.notify_error(err.i18n_key(), &err);
                // Keep the last good image and point the working state back at it.
                self.working.crop = self.displayed.crop;
                self.working.filter = self.displayed.filter;
                self.requested = self.displayed;
                let failed = outcome.key;
                let removed = self
                    .history
                    .discard_where(|state| RenderKey::of(state) == failed);
                if removed > 0 {
                    log::debug!("dropped {removed} unrenderable history entries");
                }
                true
            }
        }
    }

    /// Ends the session: in-flight renders are discarded when they finish
    /// and a pending crop request is abandoned. Safe to call twice.
    pub fn close(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;
        self.render.shut_down();
        self.pending_crop = None;
        log::debug!("session closed");
    }
}
