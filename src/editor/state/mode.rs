// SPDX-License-Identifier: MPL-2.0
//! Tool transitions and the crop round trip.

use crate::domain::editing::{CropInfo, EditMode};
use crate::domain::geometry::Size;
use crate::editor::{CropCompletion, Event, Session};
use std::sync::Arc;
use tokio::sync::oneshot::error::TryRecvError;

impl Session {
    /// Switches tools.
    ///
    /// Leaving the filters tool commits the working state. Entering the
    /// crop tool hands the original image to the cropper; its reply is
    /// committed when it arrives and the mode returns to `None`.
    pub fn set_edit_mode(&mut self, mode: Option<EditMode>) -> Event {
        if mode == self.edit_mode {
            return Event::None;
        }
        let previous = std::mem::replace(&mut self.edit_mode, mode);
        log::debug!("edit mode {previous:?} -> {mode:?}");

        let mut event = Event::None;
        match previous {
            Some(EditMode::Filters) => event = self.commit_event(),
            Some(EditMode::Crop) => {
                if self.pending_crop.take().is_some() {
                    log::debug!("abandoned pending crop request");
                }
            }
            _ => {}
        }

        if mode == Some(EditMode::Crop) {
            self.start_cropper();
            return Event::CropRequested;
        }
        event
    }

    fn start_cropper(&mut self) {
        let (completion, receiver) = CropCompletion::channel();
        self.pending_crop = Some(receiver);
        self.cropper.present(Arc::clone(&self.original), completion);
    }

    /// Checks for a cropper reply without waiting.
    pub(crate) fn poll_crop_reply(&mut self) -> bool {
        let Some(receiver) = self.pending_crop.as_mut() else {
            return false;
        };
        match receiver.try_recv() {
            Ok(info) => {
                self.pending_crop = None;
                self.finish_crop(info);
                true
            }
            Err(TryRecvError::Empty) => false,
            Err(TryRecvError::Closed) => {
                self.pending_crop = None;
                self.cancel_crop();
                true
            }
        }
    }

    /// Waits for the cropper to reply and applies the result.
    ///
    /// Returns immediately with [`Event::None`] if no crop is pending.
    pub async fn wait_for_crop(&mut self) -> Event {
        let Some(receiver) = self.pending_crop.take() else {
            return Event::None;
        };
        match receiver.await {
            Ok(info) => self.finish_crop(info),
            Err(_) => {
                self.cancel_crop();
                Event::None
            }
        }
    }

    /// Merges a crop into the working state and commits it.
    ///
    /// A rectangle that does not fit the source image raises a
    /// notification and is not committed.
    fn finish_crop(&mut self, info: CropInfo) -> Event {
        self.edit_mode = None;
        let bounds = Size::from_pixels(self.original.width(), self.original.height());
        if let Err(err) = info.validate(bounds) {
            log::warn!("rejected crop {:?}: {err}", info.rect);
            self.notify_error(err.i18n_key(), &err);
            return Event::None;
        }
        self.working.crop = Some(info);
        self.sync_render();
        self.commit_event()
    }

    fn cancel_crop(&mut self) {
        log::info!("crop cancelled");
        self.edit_mode = None;
    }
}
