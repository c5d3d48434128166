//! Bundled resource spaces.
//!
//! A resource space maps logical, `/`-separated names such as
//! `tessdata/eng.traineddata` to content shipped with the application.
//! Content is either addressable on disk (loose files next to the
//! executable) or packaged (a zip archive, or bytes compiled into the
//! binary) and then has to be copied out before native code can read it.

mod archive;
mod directory;
mod embedded;

pub use archive::ArchiveResources;
pub use directory::DirectoryResources;
pub use embedded::EmbeddedResources;

use std::path::{Path, PathBuf};

use crate::error::ResourceError;
use crate::paths;

/// Where a logical resource name was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceLocation {
    /// Directly addressable on the filesystem (file or directory).
    Filesystem(PathBuf),
    /// Only available inside a packaged space; must be copied out.
    Packaged,
}

/// A space of named resources shipped with the application.
pub trait ResourceSpace: Send + Sync {
    /// Resolves a logical name (a single file or a group prefix).
    /// Returns `None` when nothing under that name exists.
    fn resolve(&self, name: &str) -> Option<ResourceLocation>;

    /// Copies one named file to `target`, replacing it if present.
    /// Returns the number of bytes written.
    fn copy_to(&self, name: &str, target: &Path) -> Result<u64, ResourceError>;
}

/// Searches several spaces in order; the first one that knows a name wins.
#[derive(Default)]
pub struct LayeredResources {
    layers: Vec<Box<dyn ResourceSpace>>,
}

impl LayeredResources {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a space with lower priority than those already added.
    pub fn push(mut self, layer: impl ResourceSpace + 'static) -> Self {
        self.layers.push(Box::new(layer));
        self
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }
}

impl ResourceSpace for LayeredResources {
    fn resolve(&self, name: &str) -> Option<ResourceLocation> {
        self.layers.iter().find_map(|layer| layer.resolve(name))
    }

    fn copy_to(&self, name: &str, target: &Path) -> Result<u64, ResourceError> {
        match self.layers.iter().find(|layer| layer.resolve(name).is_some()) {
            Some(layer) => layer.copy_to(name, target),
            None => Err(ResourceError::missing(name)),
        }
    }
}

/// The application's bundled resources: `<exe_dir>/resources/` as loose
/// files, then `<exe_dir>/resources.zip` as a packaged archive.
///
/// Either layer may be missing; an empty space simply resolves nothing.
/// When both exist the loose directory wins, so a `resources/tessdata`
/// folder is used in place and the archive is never staged.
pub fn bundled() -> LayeredResources {
    let mut resources = LayeredResources::new();

    let dir = paths::get_resources_dir();
    if dir.exists() {
        tracing::debug!("Using loose resources at {}", dir.display());
        resources = resources.push(DirectoryResources::new(dir));
    }

    let archive_path = paths::get_resources_archive();
    if archive_path.is_file() {
        match ArchiveResources::open(&archive_path) {
            Ok(archive) => {
                tracing::debug!("Using packaged resources at {}", archive_path.display());
                resources = resources.push(archive);
            }
            Err(e) => {
                tracing::warn!(
                    "Ignoring unreadable resource archive {}: {}",
                    archive_path.display(),
                    e
                );
            }
        }
    }

    resources
}

/// Joins a `/`-separated resource name onto a filesystem root.
pub(crate) fn join_name(root: &Path, name: &str) -> PathBuf {
    name.split('/')
        .filter(|part| !part.is_empty())
        .fold(root.to_path_buf(), |path, part| path.join(part))
}

/// True if `entry` is `name` itself or lives under the `name/` prefix.
pub(crate) fn is_under(entry: &str, name: &str) -> bool {
    let name = name.trim_end_matches('/');
    entry == name
        || entry
            .strip_prefix(name)
            .is_some_and(|rest| rest.starts_with('/'))
}
