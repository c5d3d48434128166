//! Engine tuning profiles.
//!
//! The receipt profile targets black text on a white background with line
//! items, totals and headers placed irregularly across the image.

use std::collections::BTreeMap;

use crate::engine::{EngineMode, OcrEngine, PageSegMode};
use crate::error::EngineError;

/// Suffix of a Tesseract trained-language file.
pub const TRAINEDDATA_EXTENSION: &str = "traineddata";

/// Assumed resolution when the image carries none.
pub const VAR_DPI: &str = "user_defined_dpi";
pub const VAR_PRESERVE_INTERWORD_SPACES: &str = "preserve_interword_spaces";
pub const VAR_CHAR_BLACKLIST: &str = "tessedit_char_blacklist";
pub const VAR_CHAR_WHITELIST: &str = "tessedit_char_whitelist";

/// Punctuation frequently hallucinated from receipt noise.
pub const RECEIPT_BLACKLIST: &str = "|~`^'\"";

/// Whitelist for zones holding amounts, dates and codes.
pub const AMOUNTS_WHITELIST: &str =
    "0123456789.,:/-+%€$CHFABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

/// A fixed set of trained languages, recognized together.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LanguageDataSet {
    languages: &'static [&'static str],
}

/// English and French.
pub const RECEIPT_LANGUAGES: LanguageDataSet = LanguageDataSet::new(&["eng", "fra"]);

impl LanguageDataSet {
    pub const fn new(languages: &'static [&'static str]) -> Self {
        Self { languages }
    }

    pub fn languages(&self) -> &'static [&'static str] {
        self.languages
    }

    /// The engine's language selection string, e.g. `eng+fra`.
    pub fn selection(&self) -> String {
        self.languages.join("+")
    }

    /// File names expected inside a tessdata directory.
    pub fn file_names(&self) -> impl Iterator<Item = String> + '_ {
        self.languages
            .iter()
            .map(|lang| format!("{}.{}", lang, TRAINEDDATA_EXTENSION))
    }
}

/// Immutable engine settings applied once when a session is built.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfiguration {
    pub languages: LanguageDataSet,
    pub engine_mode: EngineMode,
    pub page_seg_mode: PageSegMode,
    /// Named engine variables, applied in key order.
    pub variables: BTreeMap<String, String>,
}

impl EngineConfiguration {
    /// Profile for receipts and tickets.
    pub fn receipt() -> Self {
        let variables = [
            (VAR_DPI, "300"),
            (VAR_PRESERVE_INTERWORD_SPACES, "1"),
            (VAR_CHAR_BLACKLIST, RECEIPT_BLACKLIST),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        Self {
            languages: RECEIPT_LANGUAGES,
            engine_mode: EngineMode::LstmOnly,
            page_seg_mode: PageSegMode::SparseText,
            variables,
        }
    }

    /// Restricts recognition to `chars`, e.g. [`AMOUNTS_WHITELIST`] when
    /// reading a cropped zone of figures.
    pub fn with_whitelist(mut self, chars: &str) -> Self {
        self.variables
            .insert(VAR_CHAR_WHITELIST.to_string(), chars.to_string());
        self
    }

    /// Straight, cleanly printed receipts segment better as a regular page.
    pub fn with_page_seg_mode(mut self, mode: PageSegMode) -> Self {
        self.page_seg_mode = mode;
        self
    }

    pub fn variable(&self, key: &str) -> Option<&str> {
        self.variables.get(key).map(String::as_str)
    }

    /// Pushes every setting into the engine, data path first.
    pub fn apply<E: OcrEngine + ?Sized>(
        &self,
        engine: &mut E,
        datapath: &str,
    ) -> Result<(), EngineError> {
        engine.set_datapath(datapath)?;
        engine.set_language(&self.languages.selection())?;
        engine.set_engine_mode(self.engine_mode)?;
        engine.set_page_seg_mode(self.page_seg_mode)?;
        for (key, value) in &self.variables {
            engine.set_variable(key, value)?;
        }
        Ok(())
    }
}

impl Default for EngineConfiguration {
    fn default() -> Self {
        Self::receipt()
    }
}
