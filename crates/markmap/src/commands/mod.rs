//! CLI command implementations.

pub(crate) mod include;
pub(crate) mod render;

use std::io::Write;
use std::path::{Path, PathBuf};

use clap::Args;
use markmap_config::{CliSettings, Config};
use markmap_include::{Document, IncludePreprocessor, Processed, TracingReporter};

use crate::error::CliError;

pub(crate) use include::IncludeArgs;
pub(crate) use render::RenderArgs;

/// Configuration options shared by all commands.
#[derive(Args)]
pub(crate) struct ConfigArgs {
    /// Path to configuration file (default: auto-discover markmap.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory mindmap files are resolved against (overrides config).
    #[arg(long)]
    base_path: Option<PathBuf>,

    /// Encoding of included mindmap files (overrides config).
    #[arg(long)]
    encoding: Option<String>,

    /// Extension that marks a file as a mindmap (overrides config).
    #[arg(long)]
    file_extension: Option<String>,

    /// Enable verbose output (show included files).
    #[arg(short, long)]
    pub verbose: bool,
}

impl ConfigArgs {
    /// Load configuration with CLI overrides applied.
    fn load_config(&self) -> Result<Config, CliError> {
        let cli_settings = CliSettings {
            base_path: self.base_path.clone(),
            encoding: self.encoding.clone(),
            file_extension: self.file_extension.clone(),
        };
        Ok(Config::load(self.config.as_deref(), Some(&cli_settings))?)
    }
}

/// Read a markdown file and expand its include directives.
///
/// Diagnostics are logged, never returned as errors.
fn preprocess(file: &Path, config: &Config) -> Result<Processed, CliError> {
    let preprocessor = IncludePreprocessor::new(config.include_config()?);
    let markdown = std::fs::read_to_string(file).map_err(|source| CliError::Read {
        path: file.to_path_buf(),
        source,
    })?;

    let processed = preprocessor.process(Document::parse(&markdown), TracingReporter);

    tracing::info!(
        file = %file.display(),
        included = processed.included.len(),
        "Expanded mindmap includes"
    );
    for path in &processed.included {
        tracing::info!(path = %path.display(), "Included");
    }

    Ok(processed)
}

/// Write command output to a file, or stdout when no file is given.
fn write_output(output: Option<&Path>, content: &str) -> Result<(), CliError> {
    match output {
        Some(path) => std::fs::write(path, content).map_err(|source| CliError::Write {
            path: path.to_path_buf(),
            source,
        }),
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(content.as_bytes())?;
            stdout.flush()?;
            Ok(())
        }
    }
}
