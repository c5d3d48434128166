use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use super::{ResourceLocation, ResourceSpace, is_under};
use crate::error::ResourceError;

/// Resources held in memory, typically compiled in with `include_bytes!`.
///
/// ```ignore
/// let resources = EmbeddedResources::new()
///     .with_file("tessdata/eng.traineddata", &include_bytes!("../tessdata/eng.traineddata")[..]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct EmbeddedResources {
    files: BTreeMap<String, Cow<'static, [u8]>>,
}

impl EmbeddedResources {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(mut self, name: &str, data: impl Into<Cow<'static, [u8]>>) -> Self {
        self.files.insert(name.trim_matches('/').to_string(), data.into());
        self
    }
}

impl ResourceSpace for EmbeddedResources {
    fn resolve(&self, name: &str) -> Option<ResourceLocation> {
        self.files
            .keys()
            .any(|entry| is_under(entry, name))
            .then_some(ResourceLocation::Packaged)
    }

    fn copy_to(&self, name: &str, target: &Path) -> Result<u64, ResourceError> {
        let data = self
            .files
            .get(name)
            .ok_or_else(|| ResourceError::missing(name))?;
        fs::write(target, data)?;
        Ok(data.len() as u64)
    }
}
