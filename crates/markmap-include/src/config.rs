//! Include configuration.

use std::path::{Component, Path, PathBuf};

use crate::encoding::TextEncoding;

/// Default directory relative include paths are resolved against.
pub const DEFAULT_BASE_PATH: &str = "docs";

/// Default encoding for included files.
pub const DEFAULT_ENCODING: &str = "utf-8";

/// Default suffix of mindmap source files.
pub const DEFAULT_FILE_EXTENSION: &str = ".mm.md";

/// Error building an [`IncludeConfig`].
#[derive(Debug, thiserror::Error)]
pub enum IncludeConfigError {
    /// Encoding label is not supported.
    #[error("unsupported encoding '{0}' (valid: utf-8, utf-8-sig, utf-16, utf-16le, utf-16be, latin-1, ascii)")]
    UnsupportedEncoding(String),
    /// File extension is empty.
    #[error("file_extension cannot be empty")]
    EmptyExtension,
}

/// Validated settings for include resolution.
///
/// Read-only once built; a single config can serve any number of
/// documents, each processed with its own visited set.
#[derive(Clone, Debug)]
pub struct IncludeConfig {
    base_path: PathBuf,
    encoding: TextEncoding,
    file_extension: String,
}

impl IncludeConfig {
    /// Build a configuration from raw values.
    ///
    /// # Arguments
    ///
    /// * `base_path` - Directory relative include paths are resolved against
    /// * `encoding` - Encoding label, see [`TextEncoding::parse`]
    /// * `file_extension` - Suffix a path must end with to be included
    ///   (compared case-insensitively)
    pub fn new(
        base_path: impl Into<PathBuf>,
        encoding: &str,
        file_extension: &str,
    ) -> Result<Self, IncludeConfigError> {
        let encoding = TextEncoding::parse(encoding)
            .ok_or_else(|| IncludeConfigError::UnsupportedEncoding(encoding.to_owned()))?;
        let file_extension = file_extension.trim();
        if file_extension.is_empty() {
            return Err(IncludeConfigError::EmptyExtension);
        }

        Ok(Self {
            base_path: base_path.into(),
            encoding,
            file_extension: file_extension.to_lowercase(),
        })
    }

    /// Directory relative include paths are resolved against.
    #[must_use]
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Encoding used to decode included files.
    #[must_use]
    pub fn encoding(&self) -> TextEncoding {
        self.encoding
    }

    /// Lowercased suffix of eligible files.
    #[must_use]
    pub fn file_extension(&self) -> &str {
        &self.file_extension
    }

    /// Whether a directive path names a mindmap file.
    ///
    /// Only the file name is checked, so `maps.mm.md/` or `..` never match.
    pub(crate) fn is_eligible(&self, path: &str) -> bool {
        Path::new(path)
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| name.to_lowercase().ends_with(&self.file_extension))
    }

    /// Resolve a directive path to an absolute path.
    ///
    /// Absolute paths are used as written. Relative paths are joined onto the
    /// base path and canonicalized; when the file does not exist the joined
    /// path is normalized lexically instead so the read reports the failure.
    pub(crate) fn resolve(&self, path: &str) -> PathBuf {
        let path = Path::new(path);
        if path.is_absolute() {
            return path.to_path_buf();
        }

        let joined = self.base_path.join(path);
        std::fs::canonicalize(&joined).unwrap_or_else(|_| {
            let absolute = std::path::absolute(&joined).unwrap_or(joined);
            normalize_lexically(&absolute)
        })
    }
}

impl Default for IncludeConfig {
    fn default() -> Self {
        Self {
            base_path: PathBuf::from(DEFAULT_BASE_PATH),
            encoding: TextEncoding::default(),
            file_extension: DEFAULT_FILE_EXTENSION.to_owned(),
        }
    }
}

/// Remove `.` and `..` components without touching the filesystem.
fn normalize_lexically(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other),
        }
    }
    normalized
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    #[test]
    fn test_default_config() {
        let config = IncludeConfig::default();
        assert_eq!(config.base_path(), Path::new("docs"));
        assert_eq!(config.encoding(), TextEncoding::Utf8);
        assert_eq!(config.file_extension(), ".mm.md");
    }

    #[test]
    fn test_new_rejects_unknown_encoding() {
        let err = IncludeConfig::new("docs", "klingon", ".mm.md").unwrap_err();
        assert!(matches!(err, IncludeConfigError::UnsupportedEncoding(_)));
        assert!(err.to_string().contains("klingon"));
    }

    #[test]
    fn test_new_rejects_empty_extension() {
        let err = IncludeConfig::new("docs", "utf-8", "  ").unwrap_err();
        assert!(matches!(err, IncludeConfigError::EmptyExtension));
    }

    #[test]
    fn test_is_eligible_case_insensitive() {
        let config = IncludeConfig::new("docs", "utf-8", ".MM.md").unwrap();
        assert!(config.is_eligible("maps/overview.mm.md"));
        assert!(config.is_eligible("maps/Overview.MM.MD"));
        assert!(!config.is_eligible("maps/overview.md"));
        assert!(!config.is_eligible("snippet.txt"));
    }

    #[test]
    fn test_is_eligible_checks_file_name_only() {
        let config = IncludeConfig::default();
        assert!(!config.is_eligible("dir.mm.md/.."));
        assert!(!config.is_eligible(""));
    }

    #[test]
    fn test_resolve_absolute_path_unchanged() {
        let config = IncludeConfig::default();
        assert_eq!(
            config.resolve("/srv/maps/a.mm.md"),
            PathBuf::from("/srv/maps/a.mm.md")
        );
    }

    #[test]
    fn test_resolve_relative_existing_file_is_canonical() {
        let temp_dir = tempfile::tempdir().unwrap();
        let docs = temp_dir.path().join("docs");
        fs::create_dir_all(docs.join("maps")).unwrap();
        fs::write(docs.join("maps/a.mm.md"), "# A").unwrap();

        let config = IncludeConfig::new(&docs, "utf-8", ".mm.md").unwrap();
        let resolved = config.resolve("maps/../maps/./a.mm.md");

        assert_eq!(
            resolved,
            fs::canonicalize(docs.join("maps/a.mm.md")).unwrap()
        );
    }

    #[test]
    fn test_resolve_relative_missing_file_is_normalized() {
        let config = IncludeConfig::new("/project/docs", "utf-8", ".mm.md").unwrap();
        assert_eq!(
            config.resolve("maps/../other/./missing.mm.md"),
            PathBuf::from("/project/docs/other/missing.mm.md")
        );
    }
}
