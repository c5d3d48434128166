use std::fs;
use std::path::{Path, PathBuf};

use super::{ResourceLocation, ResourceSpace, join_name};
use crate::error::ResourceError;

/// Resources shipped as loose files under a root directory.
#[derive(Debug, Clone)]
pub struct DirectoryResources {
    root: PathBuf,
}

impl DirectoryResources {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl ResourceSpace for DirectoryResources {
    fn resolve(&self, name: &str) -> Option<ResourceLocation> {
        let path = join_name(&self.root, name);
        path.exists().then_some(ResourceLocation::Filesystem(path))
    }

    fn copy_to(&self, name: &str, target: &Path) -> Result<u64, ResourceError> {
        let source = join_name(&self.root, name);
        if !source.is_file() {
            return Err(ResourceError::missing(name));
        }
        Ok(fs::copy(&source, target)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_resolves_existing_paths_only() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("tessdata")).unwrap();
        fs::write(dir.path().join("tessdata").join("eng.traineddata"), b"eng").unwrap();

        let resources = DirectoryResources::new(dir.path());
        assert_eq!(
            resources.resolve("tessdata"),
            Some(ResourceLocation::Filesystem(dir.path().join("tessdata")))
        );
        assert!(resources.resolve("tessdata/eng.traineddata").is_some());
        assert!(resources.resolve("tessdata/fra.traineddata").is_none());
    }

    #[test]
    fn test_copy_overwrites_target() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("tessdata")).unwrap();
        fs::write(dir.path().join("tessdata").join("eng.traineddata"), b"fresh").unwrap();

        let target = dir.path().join("copy.traineddata");
        fs::write(&target, b"stale contents").unwrap();

        let resources = DirectoryResources::new(dir.path());
        resources.copy_to("tessdata/eng.traineddata", &target).unwrap();
        assert_eq!(fs::read(&target).unwrap(), b"fresh");
    }

    #[test]
    fn test_copy_directory_is_not_a_file() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("tessdata")).unwrap();

        let resources = DirectoryResources::new(dir.path());
        let err = resources
            .copy_to("tessdata", &dir.path().join("out"))
            .unwrap_err();
        assert!(matches!(err, ResourceError::NotFound { .. }));
    }
}
