//! `markmap render` command implementation.

use std::path::PathBuf;

use clap::Args;
use markmap_config::ScriptsConfig;
use markmap_render::{MarkmapAssets, ScriptSource, render_page};

use super::{ConfigArgs, preprocess, write_output};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the render command.
#[derive(Args)]
pub(crate) struct RenderArgs {
    /// Markdown file to render.
    file: PathBuf,

    /// Output HTML file (default: stdout).
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Page title (default: input file name).
    #[arg(long)]
    title: Option<String>,

    #[command(flatten)]
    pub options: ConfigArgs,
}

impl RenderArgs {
    /// Execute the render command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or the input or output file
    /// cannot be accessed.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let config = self.options.load_config()?;
        let processed = preprocess(&self.file, &config)?;

        let title = self.title.unwrap_or_else(|| {
            self.file
                .file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
                .unwrap_or_default()
        });
        let markdown = processed.document.to_text();
        let html = render_page(&title, &markdown, &assets_from_config(&config.scripts));

        write_output(self.output.as_deref(), &html)?;

        if let Some(path) = &self.output {
            Output::new().success(&format!("Wrote {}", path.display()));
        }
        Ok(())
    }
}

/// Build browser assets, preferring explicit URLs over CDN versions.
fn assets_from_config(scripts: &ScriptsConfig) -> MarkmapAssets {
    MarkmapAssets::new(
        &ScriptSource::from_config(&scripts.d3_version, scripts.d3_url.as_deref()),
        &ScriptSource::from_config(&scripts.lib_version, scripts.lib_url.as_deref()),
        &ScriptSource::from_config(&scripts.view_version, scripts.view_url.as_deref()),
    )
}
