//! Ticket OCR
//!
//! Runs Tesseract over receipt and ticket images and reduces its output to
//! trimmed text plus an average word confidence.
//!
//! ```no_run
//! use ticket_ocr::{RecognitionSession, config};
//!
//! ticket_ocr::logging::init();
//! let session = RecognitionSession::from_settings(&config::load_settings())?;
//! let image = image::open("receipt.jpg")?;
//! let result = session.recognize(&image)?;
//! println!("{} ({:.1}%)", result.text, result.confidence);
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod locator;
pub mod logging;
pub mod paths;
pub mod profile;
pub mod resources;
pub mod result;
pub mod session;

pub use config::OcrSettings;
pub use engine::{OcrEngine, TesseractCli, WordObservation};
pub use error::{ConfigurationError, EngineError, RecognitionError, ResourceError};
pub use locator::TessdataDir;
pub use profile::{EngineConfiguration, LanguageDataSet, RECEIPT_LANGUAGES};
pub use result::RecognitionResult;
pub use session::RecognitionSession;
