// SPDX-License-Identifier: MPL-2.0
use crate::domain::error::{ExportError, ProcessingError};
use std::fmt;

#[derive(Debug, Clone)]
pub enum Error {
    Io(String),
    Config(String),
    Image(String),
    Serialization(String),
    Processing(ProcessingError),
    Export(ExportError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O Error: {}", e),
            Error::Config(e) => write!(f, "Config Error: {}", e),
            Error::Image(e) => write!(f, "Image Error: {}", e),
            Error::Serialization(e) => write!(f, "Serialization Error: {}", e),
            Error::Processing(e) => write!(f, "Processing Error: {}", e),
            Error::Export(e) => write!(f, "Export Error: {}", e),
        }
    }
}

impl std::error::Error for Error {}

impl From<ProcessingError> for Error {
    fn from(err: ProcessingError) -> Self {
        Error::Processing(err)
    }
}

impl From<ExportError> for Error {
    fn from(err: ExportError) -> Self {
        Error::Export(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<image_rs::ImageError> for Error {
    fn from(err: image_rs::ImageError) -> Self {
        Error::Image(err.to_string())
    }
}

impl<E: fmt::Debug> From<ciborium::ser::Error<E>> for Error {
    fn from(err: ciborium::ser::Error<E>) -> Self {
        Error::Serialization(format!("{:?}", err))
    }
}

impl<E: fmt::Debug> From<ciborium::de::Error<E>> for Error {
    fn from(err: ciborium::de::Error<E>) -> Self {
        Error::Serialization(format!("{:?}", err))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
