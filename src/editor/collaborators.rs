// SPDX-License-Identifier: MPL-2.0
//! Interfaces the session calls out to.
//!
//! The session owns one boxed [`Cropper`] and optionally one shared
//! [`AuthService`]. Both are injected at construction.

use crate::domain::editing::CropInfo;
use image_rs::DynamicImage;
use std::fmt;
use std::sync::Arc;
use tokio::sync::oneshot;

/// Presents an interactive cropping UI.
pub trait Cropper: Send {
    /// Starts cropping `image`, the original unedited source.
    ///
    /// Reply through `completion`, now or later from any thread. Dropping
    /// it without replying cancels the crop.
    fn present(&mut self, image: Arc<DynamicImage>, completion: CropCompletion);
}

/// One-shot reply channel for a crop request.
#[derive(Debug)]
pub struct CropCompletion {
    sender: oneshot::Sender<CropInfo>,
}

impl CropCompletion {
    pub(crate) fn channel() -> (Self, oneshot::Receiver<CropInfo>) {
        let (sender, receiver) = oneshot::channel();
        (Self { sender }, receiver)
    }

    /// Delivers the chosen crop.
    pub fn complete(self, info: CropInfo) {
        if self.sender.send(info).is_err() {
            log::debug!("crop reply arrived after the request was abandoned");
        }
    }

    /// Ends the request without a crop.
    pub fn cancel(self) {}

    /// Returns `true` if the session stopped waiting for this reply.
    #[must_use]
    pub fn is_abandoned(&self) -> bool {
        self.sender.is_closed()
    }
}

/// Why a logout request failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// No authentication service was injected.
    Unavailable,
    /// The identity provider could not be reached.
    Network(String),
    /// The provider refused the request.
    Rejected(String),
}

impl AuthError {
    /// Returns the i18n message key for this error type.
    pub fn i18n_key(&self) -> &'static str {
        match self {
            AuthError::Unavailable => "error-auth-unavailable",
            AuthError::Network(_) => "error-auth-network",
            AuthError::Rejected(_) => "error-auth-rejected",
        }
    }
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthError::Unavailable => write!(f, "Authentication service unavailable"),
            AuthError::Network(msg) => write!(f, "Network error: {}", msg),
            AuthError::Rejected(msg) => write!(f, "Logout rejected: {}", msg),
        }
    }
}

impl std::error::Error for AuthError {}

/// Account operations reachable from the editor.
pub trait AuthService: Send + Sync {
    fn logout(&self) -> Result<(), AuthError>;
}
