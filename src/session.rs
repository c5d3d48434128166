//! Recognition sessions.
//!
//! A session owns one engine, configured once from a profile, plus the
//! tessdata directory it points at. The engine is not reentrant, so calls
//! to [`RecognitionSession::recognize`] are serialized behind a mutex.

use image::DynamicImage;
use parking_lot::Mutex;
use std::path::Path;
use std::time::Instant;

use crate::config::OcrSettings;
use crate::engine::{OcrEngine, PageIteratorLevel, TesseractCli};
use crate::error::{ConfigurationError, EngineError, RecognitionError};
use crate::locator::{self, TessdataDir};
use crate::profile::EngineConfiguration;
use crate::resources::{self, ResourceSpace};
use crate::result::RecognitionResult;

pub struct RecognitionSession<E: OcrEngine = TesseractCli> {
    engine: Mutex<E>,
    configuration: EngineConfiguration,
    // Dropped with the session; removes any staged copy.
    tessdata: TessdataDir,
}

impl RecognitionSession<TesseractCli> {
    /// Builds a receipt session on the system Tesseract, resolving language
    /// data from `explicit_tessdata_path` or the bundled resources.
    pub fn new(explicit_tessdata_path: Option<&str>) -> Result<Self, ConfigurationError> {
        Self::build(
            EngineConfiguration::receipt(),
            explicit_tessdata_path,
            &resources::bundled(),
            || TesseractCli::locate(None),
        )
    }

    /// Builds a receipt session from loaded settings.
    pub fn from_settings(settings: &OcrSettings) -> Result<Self, ConfigurationError> {
        Self::build(
            EngineConfiguration::receipt(),
            settings.tessdata_path.as_deref(),
            &resources::bundled(),
            || TesseractCli::locate(settings.tesseract_path.as_deref()),
        )
    }
}

impl<E: OcrEngine> RecognitionSession<E> {
    /// Builds a session on `engine` with the receipt profile.
    pub fn with_engine(
        engine: E,
        explicit_tessdata_path: Option<&str>,
        resources: &dyn ResourceSpace,
    ) -> Result<Self, ConfigurationError> {
        Self::with_profile(
            engine,
            EngineConfiguration::receipt(),
            explicit_tessdata_path,
            resources,
        )
    }

    /// Builds a session on `engine` with a custom profile.
    pub fn with_profile(
        engine: E,
        configuration: EngineConfiguration,
        explicit_tessdata_path: Option<&str>,
        resources: &dyn ResourceSpace,
    ) -> Result<Self, ConfigurationError> {
        Self::build(configuration, explicit_tessdata_path, resources, || Ok(engine))
    }

    /// Resolves the language data, then creates and configures the engine.
    /// `make_engine` is not called when the language data is missing.
    fn build(
        configuration: EngineConfiguration,
        explicit_tessdata_path: Option<&str>,
        resources: &dyn ResourceSpace,
        make_engine: impl FnOnce() -> Result<E, EngineError>,
    ) -> Result<Self, ConfigurationError> {
        let tessdata = locator::locate(
            explicit_tessdata_path,
            resources,
            &configuration.languages,
        )?;

        let mut engine = make_engine()?;
        let datapath = tessdata.path().to_string_lossy().into_owned();
        configuration.apply(&mut engine, &datapath)?;

        tracing::info!(
            "OCR session ready (languages={}, oem={:?}, psm={:?}, tessdata={})",
            configuration.languages.selection(),
            configuration.engine_mode,
            configuration.page_seg_mode,
            tessdata.path().display()
        );

        Ok(Self {
            engine: Mutex::new(engine),
            configuration,
            tessdata,
        })
    }

    pub fn configuration(&self) -> &EngineConfiguration {
        &self.configuration
    }

    pub fn tessdata_path(&self) -> &Path {
        self.tessdata.path()
    }

    pub fn tessdata(&self) -> &TessdataDir {
        &self.tessdata
    }

    /// Recognizes `image`, returning the trimmed text and the mean word
    /// confidence. Blocks while another call holds the engine.
    pub fn recognize(&self, image: &DynamicImage) -> Result<RecognitionResult, RecognitionError> {
        let start = Instant::now();
        let mut engine = self.engine.lock();

        let text = engine.recognize_text(image)?;
        let words = engine.recognize_words(image, PageIteratorLevel::Word)?;
        drop(engine);

        let result = RecognitionResult::from_observations(text, &words);
        tracing::debug!(
            "Recognized {} words ({} chars, confidence {:.1}) in {}ms",
            words.len(),
            result.text.len(),
            result.confidence,
            start.elapsed().as_millis()
        );
        Ok(result)
    }
}
