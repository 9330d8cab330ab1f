// SPDX-License-Identifier: MPL-2.0
//! Photo edit session controller.
//!
//! A [`Session`] owns the working [`EditState`], the undo [`History`] and
//! the currently displayed processed image for one source photo. The
//! presentation layer feeds it [`Message`]s (or calls the matching methods)
//! and reads back state; it never touches pixels itself.
//!
//! Crop and filter changes are re-rendered on the blocking thread pool of
//! the Tokio runtime the session was created on. Results are applied when
//! the owner calls [`Session::pump`] or awaits [`Session::wait_for_render`],
//! so every mutation stays on the owner's thread.

pub mod collaborators;
pub mod crop_frame;
pub mod messages;
pub mod notifications;
mod state;


pub use collaborators::{AuthError, AuthService, CropCompletion, Cropper};
pub use crop_frame::CropFrame;
pub use messages::{Event, Message};
pub use notifications::{Notification, NotificationId, Notifications, Severity};

use crate::config::Config;
use crate::domain::editing::{
    intensity_bounds, Color, CropInfo, EditMode, EditState, FilterType, History, StrokeLayer,
    TextId,
};
use crate::domain::error::ExportError;
use crate::domain::geometry::Size;
use crate::media::{ExportService, ImageProcessor, ProcessImage, RasterKernels};
use image_rs::DynamicImage;
use state::{RenderKey, RenderQueue};
use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::sync::oneshot;

/// Collaborators and defaults injected into a [`Session`].
pub struct Services {
    pub history: History,
    pub processor: Arc<dyn ProcessImage>,
    pub exporter: ExportService,
    pub cropper: Box<dyn Cropper>,
    pub auth: Option<Arc<dyn AuthService>>,
    /// Color given to new text overlays.
    pub text_color: Color,
    /// Intensity offered for intensity-capable filters.
    pub filter_intensity: f32,
}

impl Services {
    /// Builds the standard processor, exporter and history from `config`.
    #[must_use]
    pub fn from_config(config: &Config, cropper: Box<dyn Cropper>) -> Self {
        Self {
            history: History::new(config.history.max_states()),
            processor: Arc::new(ImageProcessor::new(RasterKernels::default())),
            exporter: ExportService::new(config.text.style()),
            cropper,
            auth: None,
            text_color: config.text.default_color(),
            filter_intensity: config.filters.default_intensity(),
        }
    }

    #[must_use]
    pub fn with_auth(mut self, auth: Arc<dyn AuthService>) -> Self {
        self.auth = Some(auth);
        self
    }
}

/// One continuous editing interaction over a single source image.
pub struct Session {
    original: Arc<DynamicImage>,
    history: History,
    processor: Arc<dyn ProcessImage>,
    exporter: ExportService,
    cropper: Box<dyn Cropper>,
    auth: Option<Arc<dyn AuthService>>,
    runtime: Handle,
    working: EditState,
    edit_mode: Option<EditMode>,
    processed: Arc<DynamicImage>,
    /// Crop/filter of the last render request.
    requested: RenderKey,
    /// Crop/filter that produced `processed`.
    displayed: RenderKey,
    active_text: Option<TextId>,
    text_color: Color,
    filter_intensity: f32,
    render: RenderQueue,
    pending_crop: Option<oneshot::Receiver<CropInfo>>,
    notifications: Notifications,
    closed: bool,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("image", &(self.original.width(), self.original.height()))
            .field("edit_mode", &self.edit_mode)
            .field("history", &self.history.len())
            .field("closed", &self.closed)
            .finish_non_exhaustive()
    }
}

impl Session {
    /// Starts a session for `image`. Background renders run on `runtime`.
    #[must_use]
    pub fn new(image: DynamicImage, services: Services, runtime: Handle) -> Self {
        let original = Arc::new(image);
        let working = services.history.current().clone();
        let mut session = Self {
            processed: Arc::clone(&original),
            original,
            history: services.history,
            processor: services.processor,
            exporter: services.exporter,
            cropper: services.cropper,
            auth: services.auth,
            runtime,
            working,
            edit_mode: None,
            requested: RenderKey::default(),
            displayed: RenderKey::default(),
            active_text: None,
            text_color: services.text_color,
            filter_intensity: services
                .filter_intensity
                .clamp(intensity_bounds::MIN, intensity_bounds::MAX),
            render: RenderQueue::new(),
            pending_crop: None,
            notifications: Notifications::default(),
            closed: false,
        };
        session.sync_render();
        session
    }

    /// Starts a session with the standard services configured by `config`.
    #[must_use]
    pub fn from_config(
        image: DynamicImage,
        config: &Config,
        cropper: Box<dyn Cropper>,
        runtime: Handle,
    ) -> Self {
        Self::new(image, Services::from_config(config, cropper), runtime)
    }

    /// The unedited source image.
    #[must_use]
    pub fn original_image(&self) -> &Arc<DynamicImage> {
        &self.original
    }

    /// The last successfully processed image (crop and filter applied).
    #[must_use]
    pub fn processed_image(&self) -> &Arc<DynamicImage> {
        &self.processed
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    #[must_use]
    pub fn edit_mode(&self) -> Option<EditMode> {
        self.edit_mode
    }

    /// The state being edited, including changes not yet committed.
    #[must_use]
    pub fn working_state(&self) -> &EditState {
        &self.working
    }

    #[must_use]
    pub fn history(&self) -> &History {
        &self.history
    }

    #[must_use]
    pub fn active_text(&self) -> Option<TextId> {
        self.active_text
    }

    /// Color applied to the active overlay and to new overlays.
    #[must_use]
    pub fn text_color(&self) -> Color {
        self.text_color
    }

    /// Filters offered to the user, intensity-capable ones at the default
    /// intensity.
    #[must_use]
    pub fn filter_catalogue(&self) -> Vec<FilterType> {
        FilterType::all_cases()
            .into_iter()
            .map(|filter| filter.with_intensity(self.filter_intensity))
            .collect()
    }

    #[must_use]
    pub fn notifications(&self) -> &Notifications {
        &self.notifications
    }

    /// Removes and returns every queued notification, oldest first.
    pub fn take_notifications(&mut self) -> Vec<Notification> {
        self.notifications.drain()
    }

    pub fn dismiss_notification(&mut self, id: NotificationId) -> bool {
        self.notifications.dismiss(id)
    }

    /// Returns `true` once [`Session::close`] has run.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Flattens the processed image, strokes and texts of the working state.
    pub fn export(&self, canvas_size: Size) -> Result<DynamicImage, ExportError> {
        let empty = StrokeLayer::new();
        let strokes = self.working.drawing.as_ref().unwrap_or(&empty);
        self.exporter
            .export_canvas(canvas_size, strokes, &self.processed, &self.working)
    }

    /// Asks the authentication service to end the user's session.
    ///
    /// Edit state is left untouched whatever the outcome.
    pub fn logout(&self) -> Result<(), AuthError> {
        let auth = self.auth.as_ref().ok_or(AuthError::Unavailable)?;
        match auth.logout() {
            Ok(()) => {
                log::info!("logged out");
                Ok(())
            }
            Err(err) => {
                log::warn!("logout failed: {err}");
                Err(err)
            }
        }
    }

    /// Records an error notification for a failed operation.
    fn notify_error(&mut self, key: &str, detail: impl std::fmt::Display) {
        self.notifications
            .push(Notification::error(key).with_detail(detail.to_string()));
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.close();
    }
}
