//! Configuration management for markmap.
//!
//! Parses `markmap.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `include.base_path`
//! - `scripts.d3_url`
//! - `scripts.lib_url`
//! - `scripts.view_url`

mod expand;

use std::path::{Path, PathBuf};

use markmap_include::{
    DEFAULT_BASE_PATH, DEFAULT_ENCODING, DEFAULT_FILE_EXTENSION, IncludeConfig,
    IncludeConfigError,
};
use serde::Deserialize;

/// Default d3 version.
pub const DEFAULT_D3_VERSION: &str = "7";

/// Default markmap-lib version.
pub const DEFAULT_LIB_VERSION: &str = "0.15.4";

/// Default markmap-view version.
pub const DEFAULT_VIEW_VERSION: &str = "0.15.4";

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override include base path.
    pub base_path: Option<PathBuf>,
    /// Override encoding of included files.
    pub encoding: Option<String>,
    /// Override mindmap file extension.
    pub file_extension: Option<String>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "markmap.toml";

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Include configuration (paths are relative strings from TOML).
    include: IncludeConfigRaw,
    /// Browser script configuration.
    pub scripts: ScriptsConfig,

    /// Resolved include configuration (set after loading).
    #[serde(skip)]
    pub include_resolved: IncludeSettings,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Raw include configuration as parsed from TOML.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct IncludeConfigRaw {
    base_path: Option<String>,
    encoding: Option<String>,
    file_extension: Option<String>,
}

/// Resolved include configuration with an absolute base path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncludeSettings {
    /// Directory relative include paths are resolved against.
    pub base_path: PathBuf,
    /// Encoding label of included files.
    pub encoding: String,
    /// Suffix of mindmap source files.
    pub file_extension: String,
}

impl Default for IncludeSettings {
    fn default() -> Self {
        Self {
            base_path: PathBuf::from(DEFAULT_BASE_PATH),
            encoding: DEFAULT_ENCODING.to_owned(),
            file_extension: DEFAULT_FILE_EXTENSION.to_owned(),
        }
    }
}

/// Browser script configuration.
///
/// Each library is addressed by a version substituted into the default CDN
/// URL, or by an explicit URL that takes precedence.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ScriptsConfig {
    /// d3 version.
    pub d3_version: String,
    /// markmap-lib version.
    pub lib_version: String,
    /// markmap-view version.
    pub view_version: String,
    /// Explicit d3 script URL.
    pub d3_url: Option<String>,
    /// Explicit markmap-lib script URL.
    pub lib_url: Option<String>,
    /// Explicit markmap-view script URL.
    pub view_url: Option<String>,
}

impl Default for ScriptsConfig {
    fn default() -> Self {
        Self {
            d3_version: DEFAULT_D3_VERSION.to_owned(),
            lib_version: DEFAULT_LIB_VERSION.to_owned(),
            view_version: DEFAULT_VIEW_VERSION.to_owned(),
            d3_url: None,
            lib_url: None,
            view_url: None,
        }
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Invalid include settings.
    #[error("Configuration error in [include]: {0}")]
    Include(#[from] IncludeConfigError),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`include.base_path`").
        field: String,
        /// Error message (e.g., "${`DOCS_DIR`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Require a script URL to be a site path or an http(s) URL.
fn require_script_url(url: &str, field: &str) -> Result<(), ConfigError> {
    require_non_empty(url, field)?;
    if url.contains("://") && !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ConfigError::Validation(format!(
            "{field} must be a site path or start with http:// or https://"
        )));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `markmap.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, allowing CLI
    /// arguments to take precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails or
    /// the resulting configuration is invalid.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
            config.validate()?;
        }

        Ok(config)
    }

    /// Build the validated include configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Include` if the encoding is unsupported or the
    /// file extension is empty.
    pub fn include_config(&self) -> Result<IncludeConfig, ConfigError> {
        let settings = &self.include_resolved;
        Ok(IncludeConfig::new(
            &settings.base_path,
            &settings.encoding,
            &settings.file_extension,
        )?)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(base_path) = &settings.base_path {
            self.include_resolved.base_path.clone_from(base_path);
        }
        if let Some(encoding) = &settings.encoding {
            self.include_resolved.encoding.clone_from(encoding);
        }
        if let Some(file_extension) = &settings.file_extension {
            self.include_resolved.file_extension.clone_from(file_extension);
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Create default config with paths relative to current working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        Self {
            include: IncludeConfigRaw::default(),
            scripts: ScriptsConfig::default(),
            include_resolved: IncludeSettings {
                base_path: base.join(DEFAULT_BASE_PATH),
                ..IncludeSettings::default()
            },
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        // Expand environment variables before path resolution
        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Called automatically after loading from file and after applying CLI
    /// settings.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Include` for unsupported encodings or an empty
    /// file extension, `ConfigError::Validation` for invalid script settings.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.include_config()?;
        self.validate_scripts()?;
        Ok(())
    }

    /// Validate scripts configuration.
    fn validate_scripts(&self) -> Result<(), ConfigError> {
        let scripts = &self.scripts;
        for (version, url, name) in [
            (&scripts.d3_version, &scripts.d3_url, "d3"),
            (&scripts.lib_version, &scripts.lib_url, "lib"),
            (&scripts.view_version, &scripts.view_url, "view"),
        ] {
            match url {
                Some(url) => require_script_url(url, &format!("scripts.{name}_url"))?,
                None => require_non_empty(version, &format!("scripts.{name}_version"))?,
            }
        }
        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        if let Some(ref base_path) = self.include.base_path {
            self.include.base_path = Some(expand::expand_env(base_path, "include.base_path")?);
        }

        let scripts = &mut self.scripts;
        for (url, field) in [
            (&mut scripts.d3_url, "scripts.d3_url"),
            (&mut scripts.lib_url, "scripts.lib_url"),
            (&mut scripts.view_url, "scripts.view_url"),
        ] {
            if let Some(value) = url {
                *value = expand::expand_env(value, field)?;
            }
        }

        Ok(())
    }

    /// Resolve relative paths to absolute paths based on config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        let raw = &self.include;
        self.include_resolved = IncludeSettings {
            base_path: config_dir.join(raw.base_path.as_deref().unwrap_or(DEFAULT_BASE_PATH)),
            encoding: raw
                .encoding
                .clone()
                .unwrap_or_else(|| DEFAULT_ENCODING.to_owned()),
            file_extension: raw
                .file_extension
                .clone()
                .unwrap_or_else(|| DEFAULT_FILE_EXTENSION.to_owned()),
        };
    }
}
