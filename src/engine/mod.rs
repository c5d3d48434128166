//! OCR engine capability.
//!
//! The recognition algorithm itself lives outside this crate. An engine is
//! anything that can be pointed at a language-data directory, tuned through
//! a handful of settings, and asked for text or word observations.

pub mod tesseract;

pub use tesseract::TesseractCli;

use image::DynamicImage;

use crate::error::EngineError;

/// Recognition strategy selector. Values follow Tesseract's `--oem`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineMode {
    /// Legacy pattern-matching recognizer only.
    TesseractOnly = 0,
    /// Neural-net (LSTM) recognizer only.
    LstmOnly = 1,
    /// Both recognizers combined.
    TesseractLstmCombined = 2,
    /// Whatever the engine build supports.
    Default = 3,
}

/// Layout assumption for splitting an image into text regions.
/// Values follow Tesseract's `--psm`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageSegMode {
    OsdOnly = 0,
    AutoOsd = 1,
    AutoOnly = 2,
    Auto = 3,
    SingleColumn = 4,
    SingleBlockVertText = 5,
    SingleBlock = 6,
    SingleLine = 7,
    SingleWord = 8,
    CircleWord = 9,
    SingleChar = 10,
    /// Find as much text as possible in no particular order.
    SparseText = 11,
    SparseTextOsd = 12,
    RawLine = 13,
}

/// Granularity for structured recognition output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageIteratorLevel {
    Block,
    Paragraph,
    TextLine,
    Word,
    Symbol,
}

/// One recognized token with its confidence (0-100).
///
/// Engines may report a negative confidence when none is available.
#[derive(Debug, Clone, PartialEq)]
pub struct WordObservation {
    pub text: String,
    pub confidence: f32,
}

impl WordObservation {
    pub fn new(text: impl Into<String>, confidence: f32) -> Self {
        Self {
            text: text.into(),
            confidence,
        }
    }
}

/// An OCR engine instance.
///
/// Implementations hold mutable state and are not expected to tolerate
/// concurrent use; callers serialize access.
pub trait OcrEngine: Send {
    fn set_datapath(&mut self, path: &str) -> Result<(), EngineError>;

    /// Sets the language selection, e.g. `eng+fra`.
    fn set_language(&mut self, language: &str) -> Result<(), EngineError>;

    fn set_engine_mode(&mut self, mode: EngineMode) -> Result<(), EngineError>;

    fn set_page_seg_mode(&mut self, mode: PageSegMode) -> Result<(), EngineError>;

    /// Sets a named engine variable.
    fn set_variable(&mut self, key: &str, value: &str) -> Result<(), EngineError>;

    /// Full-page recognition. `None` means the engine produced no text at all.
    fn recognize_text(&mut self, image: &DynamicImage) -> Result<Option<String>, EngineError>;

    /// Structured recognition at the given granularity, in reading order.
    fn recognize_words(
        &mut self,
        image: &DynamicImage,
        level: PageIteratorLevel,
    ) -> Result<Vec<WordObservation>, EngineError>;
}
