use crate::{ConfigDocument, LoadedProfile, statics};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

/// The single cached editor session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CachedProfile {
    pub file_name: String,
    pub content: ConfigDocument,
}

impl CachedProfile {
    pub fn from_profile(profile: &LoadedProfile) -> Self {
        Self {
            file_name: profile.file_name.clone(),
            content: profile.document.clone(),
        }
    }

    pub fn into_profile(self) -> LoadedProfile {
        LoadedProfile::from_document(&self.file_name, self.content)
    }
}

/// On-disk shape; both fields may be missing or null in a damaged record.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredRecord {
    file_name: Option<String>,
    content: Option<ConfigDocument>,
}

/// One JSON record at a fixed path, overwritten on every change.
#[derive(Debug, Clone)]
pub struct ProfileCache {
    path: PathBuf,
}

impl ProfileCache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<data dir>/bfce/profile-cache.json`, if the platform has a data dir.
    pub fn default_path() -> Option<PathBuf> {
        let dirs = directories::ProjectDirs::from("", "", statics::APP_DIR_NAME)?;
        Some(dirs.data_dir().join(statics::CACHE_FILE_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Restore the cached session. Unreadable or incomplete records are deleted.
    pub fn load(&self) -> Option<CachedProfile> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "cache unreadable");
                self.discard();
                return None;
            }
        };

        let record = match serde_json::from_str::<StoredRecord>(&text) {
            Ok(record) => record,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "cache corrupted");
                self.discard();
                return None;
            }
        };

        match (record.file_name, record.content) {
            (Some(file_name), Some(content)) if !file_name.is_empty() => {
                tracing::info!(file_name = %file_name, settings = content.len(), "restored cached profile");
                Some(CachedProfile { file_name, content })
            }
            _ => {
                tracing::warn!(path = %self.path.display(), "cache record incomplete");
                self.discard();
                None
            }
        }
    }

    pub fn store(&self, record: &CachedProfile) -> anyhow::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).with_context(|| format!("creating {parent:?}"))?;
        }
        let json = serde_json::to_string(record).context("encoding cache record")?;
        fs::write(&self.path, json).with_context(|| format!("writing {:?}", self.path))?;
        tracing::debug!(path = %self.path.display(), "cache updated");
        Ok(())
    }

    pub fn discard(&self) {
        if let Err(e) = fs::remove_file(&self.path)
            && e.kind() != std::io::ErrorKind::NotFound
        {
            tracing::warn!(path = %self.path.display(), error = %e, "could not remove cache");
        }
    }
}
