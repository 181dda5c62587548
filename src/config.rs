use crate::ProfileCache;
use std::path::PathBuf;

/// Runtime settings for the editor, assembled by the binary from its arguments.
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    /// Profile to open immediately instead of showing the upload step.
    pub initial_file: Option<PathBuf>,
    /// Where the session cache lives; `None` disables it.
    pub cache_path: Option<PathBuf>,
}

impl AppConfig {
    pub fn new(
        initial_file: Option<PathBuf>,
        no_cache: bool,
        cache_file: Option<PathBuf>,
    ) -> Self {
        let cache_path = if no_cache {
            None
        } else {
            cache_file.or_else(ProfileCache::default_path)
        };
        Self {
            initial_file,
            cache_path,
        }
    }

    pub fn cache(&self) -> Option<ProfileCache> {
        self.cache_path.clone().map(ProfileCache::new)
    }
}
