//! Language-data directory resolution.
//!
//! Tesseract only loads trained data from a real directory. Resources that
//! ship as loose files are used in place; packaged resources are staged into
//! a fresh temporary directory that lives as long as the returned handle.

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use crate::error::ResourceError;
use crate::profile::LanguageDataSet;
use crate::resources::{ResourceLocation, ResourceSpace};

/// Logical resource name of the language-data group.
pub const TESSDATA: &str = "tessdata";

const STAGING_PREFIX: &str = "ticket-ocr-";

/// A directory holding the language data, ready for the engine.
#[derive(Debug)]
pub enum TessdataDir {
    /// Used in place: an explicit path or a loose resource directory.
    Direct(PathBuf),
    /// Copied out of a packaged resource space. The temporary root is
    /// removed on drop.
    Staged { dir: PathBuf, root: TempDir },
}

impl TessdataDir {
    pub fn path(&self) -> &Path {
        match self {
            TessdataDir::Direct(path) => path,
            TessdataDir::Staged { dir, .. } => dir,
        }
    }

    pub fn is_staged(&self) -> bool {
        matches!(self, TessdataDir::Staged { .. })
    }

    /// Root of the staging area, when staged.
    pub fn staging_root(&self) -> Option<&Path> {
        match self {
            TessdataDir::Direct(_) => None,
            TessdataDir::Staged { root, .. } => Some(root.path()),
        }
    }
}

/// Resolves the tessdata directory.
///
/// A non-blank `explicit` path is trusted as-is and the resource space is
/// never consulted. Otherwise `tessdata` is looked up in `resources`.
pub fn locate(
    explicit: Option<&str>,
    resources: &dyn ResourceSpace,
    languages: &LanguageDataSet,
) -> Result<TessdataDir, ResourceError> {
    if let Some(path) = explicit.filter(|p| !p.trim().is_empty()) {
        tracing::debug!("Using explicit tessdata path {}", path);
        return Ok(TessdataDir::Direct(PathBuf::from(path)));
    }

    match resources.resolve(TESSDATA) {
        None => Err(ResourceError::NotFound {
            name: TESSDATA.to_string(),
            expected: expected_files(languages),
        }),
        Some(ResourceLocation::Filesystem(path)) => {
            if !path.is_dir() {
                return Err(ResourceError::InvalidLayout { path });
            }
            let dir = std::path::absolute(&path)?;
            tracing::info!("Using tessdata directory {}", dir.display());
            Ok(TessdataDir::Direct(dir))
        }
        Some(ResourceLocation::Packaged) => stage(resources, languages),
    }
}

/// Copies every language file out of a packaged space into
/// `<temp root>/tessdata/`.
fn stage(
    resources: &dyn ResourceSpace,
    languages: &LanguageDataSet,
) -> Result<TessdataDir, ResourceError> {
    let root = tempfile::Builder::new().prefix(STAGING_PREFIX).tempdir()?;
    let dir = root.path().join(TESSDATA);
    fs::create_dir_all(&dir)?;

    for file_name in languages.file_names() {
        let name = format!("{}/{}", TESSDATA, file_name);
        let bytes = resources.copy_to(&name, &dir.join(&file_name))?;
        tracing::debug!("Staged {} ({} bytes)", name, bytes);
    }

    let dir = std::path::absolute(&dir)?;
    tracing::info!("Staged tessdata to {}", dir.display());
    Ok(TessdataDir::Staged { dir, root })
}

fn expected_files(languages: &LanguageDataSet) -> String {
    languages
        .file_names()
        .map(|file| format!("{}/{}", TESSDATA, file))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::RECEIPT_LANGUAGES;
    use crate::resources::{ArchiveResources, DirectoryResources, EmbeddedResources};
    use std::io::{Cursor, Write};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tempfile::tempdir;
    use zip::write::SimpleFileOptions;

    /// Counts every call; resolves nothing.
    #[derive(Default)]
    struct CountingResources {
        calls: AtomicUsize,
    }

    impl ResourceSpace for CountingResources {
        fn resolve(&self, _name: &str) -> Option<ResourceLocation> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            None
        }

        fn copy_to(&self, name: &str, _target: &Path) -> Result<u64, ResourceError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(ResourceError::missing(name))
        }
    }

    fn packaged_receipt_data() -> EmbeddedResources {
        EmbeddedResources::new()
            .with_file("tessdata/eng.traineddata", b"\x01eng-model".to_vec())
            .with_file("tessdata/fra.traineddata", b"\x02fra-model".to_vec())
    }

    #[test]
    fn test_explicit_path_is_returned_verbatim() {
        let resources = CountingResources::default();
        let dir = locate(Some("relative/./tessdata"), &resources, &RECEIPT_LANGUAGES).unwrap();

        assert_eq!(dir.path(), Path::new("relative/./tessdata"));
        assert!(!dir.is_staged());
        assert_eq!(resources.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_blank_explicit_path_falls_back_to_resources() {
        let resources = CountingResources::default();
        let err = locate(Some("   "), &resources, &RECEIPT_LANGUAGES).unwrap_err();

        assert!(matches!(err, ResourceError::NotFound { .. }));
        assert_eq!(resources.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_missing_resource_names_expected_files() {
        let err = locate(None, &EmbeddedResources::new(), &RECEIPT_LANGUAGES).unwrap_err();
        match err {
            ResourceError::NotFound { name, expected } => {
                assert_eq!(name, "tessdata");
                assert_eq!(expected, "tessdata/eng.traineddata, tessdata/fra.traineddata");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_directory_resource_used_in_place() {
        let root = tempdir().unwrap();
        let tessdata = root.path().join("tessdata");
        fs::create_dir(&tessdata).unwrap();
        fs::write(tessdata.join("eng.traineddata"), b"eng").unwrap();

        let dir = locate(None, &DirectoryResources::new(root.path()), &RECEIPT_LANGUAGES).unwrap();

        assert!(!dir.is_staged());
        assert!(dir.path().is_absolute());
        assert_eq!(dir.path(), std::path::absolute(&tessdata).unwrap());
        // Nothing copied next to the original.
        assert_eq!(fs::read_dir(&tessdata).unwrap().count(), 1);
    }

    #[test]
    fn test_file_where_directory_expected() {
        let root = tempdir().unwrap();
        fs::write(root.path().join("tessdata"), b"not a directory").unwrap();

        let err = locate(None, &DirectoryResources::new(root.path()), &RECEIPT_LANGUAGES).unwrap_err();
        assert!(matches!(err, ResourceError::InvalidLayout { ref path } if path == &root.path().join("tessdata")));
    }

    #[test]
    fn test_packaged_resources_are_staged() {
        let dir = locate(None, &packaged_receipt_data(), &RECEIPT_LANGUAGES).unwrap();

        assert!(dir.is_staged());
        assert!(dir.path().is_absolute());
        assert_eq!(dir.path().file_name().unwrap(), "tessdata");
        assert_eq!(dir.path().parent(), dir.staging_root());

        let mut names: Vec<String> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().into_string().unwrap())
            .collect();
        names.sort();
        assert_eq!(names, vec!["eng.traineddata", "fra.traineddata"]);
        assert_eq!(fs::read(dir.path().join("eng.traineddata")).unwrap(), b"\x01eng-model");
        assert_eq!(fs::read(dir.path().join("fra.traineddata")).unwrap(), b"\x02fra-model");
    }

    #[test]
    fn test_zip_resources_are_staged() {
        let eng: Vec<u8> = (0..=255u8).cycle().take(4096).collect();
        let fra: &[u8] = b"\x00fra\xffmodel";

        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        for (name, data) in [
            ("tessdata/eng.traineddata", eng.as_slice()),
            ("tessdata/fra.traineddata", fra),
            ("tessdata/deu.traineddata", b"unused".as_slice()),
        ] {
            writer.start_file(name, SimpleFileOptions::default()).unwrap();
            writer.write_all(data).unwrap();
        }
        let bytes = writer.finish().unwrap().into_inner();
        let resources = ArchiveResources::from_bytes(bytes).unwrap();

        let dir = locate(None, &resources, &RECEIPT_LANGUAGES).unwrap();

        assert!(dir.is_staged());
        assert_eq!(dir.path().file_name().unwrap(), "tessdata");
        let mut names: Vec<String> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().into_string().unwrap())
            .collect();
        names.sort();
        assert_eq!(names, vec!["eng.traineddata", "fra.traineddata"]);
        assert_eq!(fs::read(dir.path().join("eng.traineddata")).unwrap(), eng);
        assert_eq!(fs::read(dir.path().join("fra.traineddata")).unwrap(), fra);
    }

    #[test]
    fn test_each_staging_is_a_fresh_directory() {
        let resources = packaged_receipt_data();
        let first = locate(None, &resources, &RECEIPT_LANGUAGES).unwrap();
        let second = locate(None, &resources, &RECEIPT_LANGUAGES).unwrap();
        assert_ne!(first.path(), second.path());
    }

    #[test]
    fn test_missing_packaged_file_is_named() {
        let resources =
            EmbeddedResources::new().with_file("tessdata/eng.traineddata", b"eng".to_vec());
        let err = locate(None, &resources, &RECEIPT_LANGUAGES).unwrap_err();
        assert!(matches!(err, ResourceError::NotFound { ref name, .. } if name == "tessdata/fra.traineddata"));
    }

    #[test]
    fn test_staging_removed_on_drop() {
        let dir = locate(None, &packaged_receipt_data(), &RECEIPT_LANGUAGES).unwrap();
        let root = dir.staging_root().unwrap().to_path_buf();
        assert!(root.exists());

        drop(dir);
        assert!(!root.exists());
    }
}
