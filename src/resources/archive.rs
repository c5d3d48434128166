use parking_lot::Mutex;
use std::fs::File;
use std::io::{self, Cursor, Read, Seek};
use std::path::Path;
use zip::ZipArchive;
use zip::result::ZipError;

use super::{ResourceLocation, ResourceSpace, is_under};
use crate::error::ResourceError;

/// Resources packaged inside a zip archive.
///
/// Entries are never addressable on disk, so every name resolves as
/// [`ResourceLocation::Packaged`] and files must be copied out.
pub struct ArchiveResources<R> {
    // ZipArchive needs &mut for reads.
    archive: Mutex<ZipArchive<R>>,
}

impl ArchiveResources<File> {
    /// Opens an archive on disk.
    pub fn open(path: &Path) -> Result<Self, ResourceError> {
        Self::from_reader(File::open(path)?)
    }
}

impl ArchiveResources<Cursor<Vec<u8>>> {
    /// Reads an archive held in memory.
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, ResourceError> {
        Self::from_reader(Cursor::new(bytes))
    }
}

impl<R: Read + Seek + Send> ArchiveResources<R> {
    pub fn from_reader(reader: R) -> Result<Self, ResourceError> {
        Ok(Self {
            archive: Mutex::new(ZipArchive::new(reader)?),
        })
    }
}

impl<R: Read + Seek + Send> ResourceSpace for ArchiveResources<R> {
    fn resolve(&self, name: &str) -> Option<ResourceLocation> {
        let archive = self.archive.lock();
        let found = archive.file_names().any(|entry| is_under(entry, name));
        found.then_some(ResourceLocation::Packaged)
    }

    fn copy_to(&self, name: &str, target: &Path) -> Result<u64, ResourceError> {
        let mut archive = self.archive.lock();
        let mut entry = match archive.by_name(name) {
            Ok(entry) if entry.is_file() => entry,
            Ok(_) | Err(ZipError::FileNotFound) => return Err(ResourceError::missing(name)),
            Err(e) => return Err(e.into()),
        };
        let mut out = File::create(target)?;
        Ok(io::copy(&mut entry, &mut out)?)
    }
}
