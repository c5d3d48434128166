use std::path::PathBuf;
use std::sync::OnceLock;

static EXE_DIR: OnceLock<PathBuf> = OnceLock::new();

/// Returns the directory containing the executable.
pub fn get_exe_dir() -> &'static PathBuf {
    EXE_DIR.get_or_init(|| {
        std::env::current_exe()
            .ok()
            .and_then(|p| p.parent().map(|p| p.to_path_buf()))
            .unwrap_or_else(|| PathBuf::from("."))
    })
}

/// Returns the loose resources directory: `<exe_dir>/resources/`
pub fn get_resources_dir() -> PathBuf {
    get_exe_dir().join("resources")
}

/// Returns the packaged resources archive: `<exe_dir>/resources.zip`
pub fn get_resources_archive() -> PathBuf {
    get_exe_dir().join("resources.zip")
}

/// Returns the settings file: `<exe_dir>/ocr_config.json`
pub fn get_config_path() -> PathBuf {
    get_exe_dir().join("ocr_config.json")
}
