//! Error types for resource location, engine control and recognition.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while locating or staging language data.
#[derive(Debug, Error)]
pub enum ResourceError {
    /// A required resource is absent from the bundled resource space.
    #[error("resource '{name}' not found in bundled resources (expected {expected})")]
    NotFound { name: String, expected: String },

    /// A resolved resource exists but is not laid out as a directory.
    #[error("'{}' is not a directory", path.display())]
    InvalidLayout { path: PathBuf },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("resource archive error: {0}")]
    Archive(#[from] zip::result::ZipError),
}

impl ResourceError {
    /// A single missing file, named by its resource path.
    pub fn missing(name: impl Into<String>) -> Self {
        let name = name.into();
        Self::NotFound {
            expected: name.clone(),
            name,
        }
    }
}

/// Errors raised by an OCR engine implementation.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("OCR engine not available: {0}")]
    NotAvailable(String),

    #[error("OCR engine failed: {0}")]
    Failed(String),

    #[error("invalid engine variable '{0}'")]
    InvalidVariable(String),

    #[error("unsupported iterator level: {0:?}")]
    UnsupportedLevel(crate::engine::PageIteratorLevel),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
}

/// A session could not be constructed. The cause is kept as the error source.
#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("unable to prepare tessdata directory: {0}")]
    Resource(#[from] ResourceError),

    #[error("unable to configure OCR engine: {0}")]
    Engine(#[from] EngineError),
}

/// A single `recognize` call failed. The session remains usable.
#[derive(Debug, Error)]
#[error(transparent)]
pub struct RecognitionError(#[from] EngineError);

impl RecognitionError {
    /// The engine failure behind this error.
    pub fn cause(&self) -> &EngineError {
        &self.0
    }

    pub fn into_cause(self) -> EngineError {
        self.0
    }
}
