//! Tesseract binding through the `tesseract` executable.
//!
//! Each recognition call writes the bitmap to a temporary PNG and runs the
//! CLI once: plain text to stdout for full-page recognition, TSV to stdout
//! for structured output.

use image::{DynamicImage, ImageFormat};
use std::borrow::Cow;
use std::collections::BTreeMap;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::NamedTempFile;

use super::{EngineMode, OcrEngine, PageIteratorLevel, PageSegMode, WordObservation};
use crate::error::EngineError;

const DEFAULT_LANGUAGE: &str = "eng";

#[cfg(windows)]
const COMMON_PATHS: &[&str] = &[
    r"C:\Program Files\Tesseract-OCR\tesseract.exe",
    r"C:\Program Files (x86)\Tesseract-OCR\tesseract.exe",
];

#[cfg(not(windows))]
const COMMON_PATHS: &[&str] = &[
    "/usr/bin/tesseract",
    "/usr/local/bin/tesseract",
    "/opt/homebrew/bin/tesseract",
];

/// Finds the Tesseract executable: the explicit path if given, then
/// `tesseract` on PATH, then common install locations.
pub fn find_tesseract_executable(explicit: Option<&Path>) -> Result<PathBuf, EngineError> {
    if let Some(path) = explicit {
        if path.is_file() {
            return Ok(path.to_path_buf());
        }
        return Err(EngineError::NotAvailable(format!(
            "tesseract executable not found at {}",
            path.display()
        )));
    }

    if let Ok(output) = Command::new("tesseract").arg("--version").output() {
        if output.status.success() {
            return Ok(PathBuf::from("tesseract"));
        }
    }

    for path in COMMON_PATHS {
        let p = PathBuf::from(path);
        if p.exists() {
            return Ok(p);
        }
    }

    Err(EngineError::NotAvailable(
        "tesseract not found. Please install Tesseract-OCR.".to_string(),
    ))
}

/// Tesseract engine driven through its command-line interface.
#[derive(Debug, Clone)]
pub struct TesseractCli {
    executable: PathBuf,
    datapath: Option<String>,
    language: String,
    engine_mode: Option<EngineMode>,
    page_seg_mode: Option<PageSegMode>,
    variables: BTreeMap<String, String>,
}

impl TesseractCli {
    /// Locates the executable and returns an unconfigured engine.
    pub fn locate(explicit: Option<&Path>) -> Result<Self, EngineError> {
        let executable = find_tesseract_executable(explicit)?;
        tracing::debug!("Using tesseract at {}", executable.display());
        Ok(Self::with_executable(executable))
    }

    pub fn with_executable(executable: impl Into<PathBuf>) -> Self {
        Self {
            executable: executable.into(),
            datapath: None,
            language: DEFAULT_LANGUAGE.to_string(),
            engine_mode: None,
            page_seg_mode: None,
            variables: BTreeMap::new(),
        }
    }

    pub fn executable(&self) -> &Path {
        &self.executable
    }

    /// Arguments shared by every invocation, after input and output base.
    fn config_args(&self) -> Vec<OsString> {
        let mut args: Vec<OsString> = Vec::new();
        if let Some(datapath) = &self.datapath {
            args.push("--tessdata-dir".into());
            args.push(datapath.into());
        }
        args.push("-l".into());
        args.push(self.language.as_str().into());
        if let Some(mode) = self.engine_mode {
            args.push("--oem".into());
            args.push((mode as u8).to_string().into());
        }
        if let Some(mode) = self.page_seg_mode {
            args.push("--psm".into());
            args.push((mode as u8).to_string().into());
        }
        for (key, value) in &self.variables {
            args.push("-c".into());
            args.push(format!("{}={}", key, value).into());
        }
        args
    }

    /// Runs Tesseract on `image`, writing to stdout, with optional trailing
    /// config names (e.g. `tsv`).
    fn run(&self, image: &DynamicImage, configs: &[&str]) -> Result<String, EngineError> {
        let temp_input = NamedTempFile::with_suffix(".png")?;
        png_compatible(image).save_with_format(temp_input.path(), ImageFormat::Png)?;

        let output = Command::new(&self.executable)
            .arg(temp_input.path())
            .arg("stdout")
            .args(self.config_args())
            .args(configs)
            .output();

        match output {
            Ok(output) if output.status.success() => {
                Ok(String::from_utf8_lossy(&output.stdout).into_owned())
            }
            Ok(output) => {
                let stderr = String::from_utf8_lossy(&output.stderr);
                Err(EngineError::Failed(format!(
                    "tesseract failed: {}",
                    stderr.trim()
                )))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(
                EngineError::NotAvailable(format!("{} not found", self.executable.display())),
            ),
            Err(e) => Err(EngineError::Io(e)),
        }
    }
}

impl OcrEngine for TesseractCli {
    fn set_datapath(&mut self, path: &str) -> Result<(), EngineError> {
        self.datapath = Some(path.to_string());
        Ok(())
    }

    fn set_language(&mut self, language: &str) -> Result<(), EngineError> {
        self.language = language.to_string();
        Ok(())
    }

    fn set_engine_mode(&mut self, mode: EngineMode) -> Result<(), EngineError> {
        self.engine_mode = Some(mode);
        Ok(())
    }

    fn set_page_seg_mode(&mut self, mode: PageSegMode) -> Result<(), EngineError> {
        self.page_seg_mode = Some(mode);
        Ok(())
    }

    fn set_variable(&mut self, key: &str, value: &str) -> Result<(), EngineError> {
        if key.is_empty() || key.contains(|c: char| c == '=' || c.is_whitespace()) {
            return Err(EngineError::InvalidVariable(key.to_string()));
        }
        self.variables.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn recognize_text(&mut self, image: &DynamicImage) -> Result<Option<String>, EngineError> {
        self.run(image, &[]).map(Some)
    }

    fn recognize_words(
        &mut self,
        image: &DynamicImage,
        level: PageIteratorLevel,
    ) -> Result<Vec<WordObservation>, EngineError> {
        let tsv_level = tsv_level(level)?;
        let tsv = self.run(image, &["tsv"])?;
        Ok(parse_tsv_output(&tsv, tsv_level))
    }
}

/// PNG has no float sample types; those bitmaps are converted to 8-bit RGBA.
fn png_compatible(image: &DynamicImage) -> Cow<'_, DynamicImage> {
    match image {
        DynamicImage::ImageRgb32F(_) | DynamicImage::ImageRgba32F(_) => {
            Cow::Owned(DynamicImage::ImageRgba8(image.to_rgba8()))
        }
        _ => Cow::Borrowed(image),
    }
}

/// TSV `level` column value for an iterator level.
fn tsv_level(level: PageIteratorLevel) -> Result<u32, EngineError> {
    match level {
        PageIteratorLevel::Block => Ok(2),
        PageIteratorLevel::Paragraph => Ok(3),
        PageIteratorLevel::TextLine => Ok(4),
        PageIteratorLevel::Word => Ok(5),
        PageIteratorLevel::Symbol => Err(EngineError::UnsupportedLevel(level)),
    }
}

/// Parses Tesseract TSV output, keeping rows at `level` in output order.
fn parse_tsv_output(tsv: &str, level: u32) -> Vec<WordObservation> {
    let mut observations = Vec::new();

    for line in tsv.lines().skip(1) {
        // Skip header
        let fields: Vec<&str> = line.split('\t').collect();
        if fields.len() < 12 {
            continue;
        }

        // TSV fields: level, page_num, block_num, par_num, line_num, word_num,
        //             left, top, width, height, conf, text
        let row_level: u32 = match fields[0].parse() {
            Ok(l) => l,
            Err(_) => continue,
        };
        if row_level != level {
            continue;
        }

        let confidence: f32 = fields[10].trim().parse().unwrap_or(-1.0);
        observations.push(WordObservation::new(fields[11].trim(), confidence));
    }

    observations
}
