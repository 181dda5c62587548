use crate::{ConfigDocument, ProfileError, statics};
use anyhow::Context;
use std::{
    fs,
    path::{Path, PathBuf},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineEnding {
    Lf,
    CrLf,
}

impl LineEnding {
    pub fn as_str(self) -> &'static str {
        match self {
            LineEnding::Lf => statics::NL_LF,
            LineEnding::CrLf => statics::NL_CRLF,
        }
    }
}

/// A profile opened in the editor: the parsed document plus what is needed to export it
/// the way it came in (file name, line endings).
#[derive(Debug, Clone)]
pub struct LoadedProfile {
    pub source_path: Option<PathBuf>,
    pub file_name: String,
    pub line_ending: LineEnding,
    pub document: ConfigDocument,
    /// Document as loaded, for dirty tracking.
    pristine: ConfigDocument,
    pub dirty: bool,
}

impl LoadedProfile {
    pub fn load_path(path: &Path) -> Result<Self, ProfileError> {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        if !is_supported_file_name(&file_name) {
            return Err(ProfileError::UnsupportedFile(file_name));
        }

        let bytes = fs::read(path).map_err(|source| ProfileError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let mut profile = Self::from_bytes(&file_name, &bytes)?;
        profile.source_path = Some(path.to_path_buf());
        Ok(profile)
    }

    /// Parse raw file contents. The name is only used for export; acceptance by
    /// name is checked in [`LoadedProfile::load_path`].
    pub fn from_bytes(file_name: &str, bytes: &[u8]) -> Result<Self, ProfileError> {
        let text = std::str::from_utf8(bytes).map_err(ProfileError::Unreadable)?;
        let document = ConfigDocument::parse(text);
        if document.is_empty() {
            tracing::warn!(file_name, "no valid config entries");
            return Err(ProfileError::NoValidEntries);
        }

        tracing::info!(
            file_name,
            categories = document.category_count(),
            settings = document.len(),
            "loaded profile"
        );
        Ok(Self {
            source_path: None,
            file_name: file_name.to_string(),
            line_ending: detect_line_ending(bytes),
            pristine: document.clone(),
            document,
            dirty: false,
        })
    }

    /// Rebuild an editor session from a cached document.
    pub fn from_document(file_name: &str, document: ConfigDocument) -> Self {
        Self {
            source_path: None,
            file_name: file_name.to_string(),
            line_ending: LineEnding::Lf,
            pristine: document.clone(),
            document,
            dirty: false,
        }
    }

    /// Apply a single edit. Returns `false` if the setting does not exist.
    pub fn set_value(&mut self, category: &str, key: &str, value: &str) -> bool {
        let Some(previous) = self.document.set_value(category, key, value) else {
            return false;
        };
        if previous != value {
            tracing::debug!(category, key, previous = %previous, value, "edited setting");
        }
        self.refresh_dirty();
        true
    }

    /// Recompute `dirty` against the document as loaded, so reverting an edit clears it.
    pub fn refresh_dirty(&mut self) {
        self.dirty = self.document != self.pristine;
    }

    /// Name offered when exporting; falls back to `config.cfg`.
    pub fn export_file_name(&self) -> &str {
        if self.file_name.is_empty() {
            statics::CFG_DEFAULT_EXPORT_NAME
        } else {
            &self.file_name
        }
    }

    pub fn export_text(&self) -> String {
        self.document.serialize_with_newline(self.line_ending.as_str())
    }

    pub fn save_to_path(&mut self, path: &Path) -> anyhow::Result<()> {
        let text = self.export_text();
        fs::write(path, text.as_bytes()).with_context(|| format!("writing {path:?}"))?;
        tracing::info!(path = %path.display(), settings = self.document.len(), "exported profile");

        self.source_path = Some(path.to_path_buf());
        if let Some(name) = path.file_name() {
            self.file_name = name.to_string_lossy().into_owned();
        }
        self.pristine = self.document.clone();
        self.dirty = false;
        Ok(())
    }
}

/// `.cfg`/`.txt` files, or the game's extension-less `PROFSAVE_profile`.
pub fn is_supported_file_name(file_name: &str) -> bool {
    let lower = file_name.to_ascii_lowercase();
    statics::CFG_FILE_EXTENSIONS
        .iter()
        .any(|ext| lower.ends_with(&format!(".{ext}")))
        || file_name.starts_with(statics::CFG_PROFSAVE_PREFIX)
}

fn detect_line_ending(text_bytes: &[u8]) -> LineEnding {
    // Majority vote over actual terminators; a few stray CRLFs don't flip the file.
    let mut lf_count = 0usize;
    let mut crlf_count = 0usize;

    for (i, b) in text_bytes.iter().enumerate() {
        if *b != b'\n' {
            continue;
        }
        if i > 0 && text_bytes[i - 1] == b'\r' {
            crlf_count += 1;
        } else {
            lf_count += 1;
        }
    }

    if crlf_count > lf_count {
        LineEnding::CrLf
    } else {
        LineEnding::Lf
    }
}

#[cfg(test)]
mod tests {
    use super::{LineEnding, LoadedProfile, detect_line_ending, is_supported_file_name};
    use crate::ProfileError;

    #[test]
    fn supported_file_names() {
        assert!(is_supported_file_name("config.cfg"));
        assert!(is_supported_file_name("Settings.TXT"));
        assert!(is_supported_file_name("PROFSAVE_profile"));
        assert!(!is_supported_file_name("save.json"));
        assert!(!is_supported_file_name("cfg"));
        assert!(!is_supported_file_name(""));
    }

    #[test]
    fn detect_line_ending_uses_majority() {
        let mostly_lf = b"A.B 1\nA.C 2\r\nA.D 3\n";
        assert_eq!(detect_line_ending(mostly_lf), LineEnding::Lf);

        let mostly_crlf = b"A.B 1\r\nA.C 2\nA.D 3\r\n";
        assert_eq!(detect_line_ending(mostly_crlf), LineEnding::CrLf);
    }

    #[test]
    fn from_bytes_rejects_non_utf8_and_empty_documents() {
        let err = LoadedProfile::from_bytes("x.cfg", &[0xFF, 0xFE, 0x00]).unwrap_err();
        assert!(matches!(err, ProfileError::Unreadable(_)));
        assert_eq!(err.to_string(), "Failed to parse config file");

        let err = LoadedProfile::from_bytes("x.cfg", b"// only a comment\n\nnot a directive\n")
            .unwrap_err();
        assert!(matches!(err, ProfileError::NoValidEntries));
        assert_eq!(err.to_string(), "No valid config entries found in file");
    }

    #[test]
    fn editing_tracks_dirty_and_reverting_clears_it() {
        let mut profile =
            LoadedProfile::from_bytes("p.cfg", b"GstAudio.MasterVolume 75\n").unwrap();
        assert!(!profile.dirty);

        assert!(profile.set_value("GstAudio", "MasterVolume", "40"));
        assert!(profile.dirty);

        assert!(profile.set_value("GstAudio", "MasterVolume", "75"));
        assert!(!profile.dirty);

        assert!(!profile.set_value("GstAudio", "Nope", "1"));
    }

    #[test]
    fn export_file_name_falls_back_to_default() {
        let profile = LoadedProfile::from_document("", crate::ConfigDocument::new());
        assert_eq!(profile.export_file_name(), "config.cfg");

        let profile =
            LoadedProfile::from_document("PROFSAVE_profile", crate::ConfigDocument::new());
        assert_eq!(profile.export_file_name(), "PROFSAVE_profile");
    }
}
