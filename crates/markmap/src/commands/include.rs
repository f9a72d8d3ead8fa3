//! `markmap include` command implementation.

use std::path::PathBuf;

use clap::Args;

use super::{ConfigArgs, preprocess, write_output};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the include command.
#[derive(Args)]
pub(crate) struct IncludeArgs {
    /// Markdown file to process.
    file: PathBuf,

    /// Output file (default: stdout).
    #[arg(short, long)]
    output: Option<PathBuf>,

    #[command(flatten)]
    pub options: ConfigArgs,
}

impl IncludeArgs {
    /// Execute the include command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or the input or output file
    /// cannot be accessed.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let config = self.options.load_config()?;
        let processed = preprocess(&self.file, &config)?;

        write_output(self.output.as_deref(), &processed.document.to_text())?;

        if let Some(path) = &self.output {
            Output::new().success(&format!(
                "Wrote {} ({} mindmap file(s) included)",
                path.display(),
                processed.included.len()
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::commands::tests::config_args;

    #[test]
    fn test_execute_expands_directives() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config_path = temp_dir.path().join("markmap.toml");
        fs::write(&config_path, "[include]\nbase_path = \".\"\n").unwrap();
        fs::write(temp_dir.path().join("map.mm.md"), "# Root\n").unwrap();
        let input = temp_dir.path().join("page.md");
        fs::write(&input, "Intro\n{! map.mm.md !}\n").unwrap();
        let out = temp_dir.path().join("out.md");

        let args = IncludeArgs {
            file: input,
            output: Some(out.clone()),
            options: config_args(&config_path),
        };
        args.execute().unwrap();

        assert_eq!(
            fs::read_to_string(&out).unwrap(),
            "Intro\n```markmap\n# Root\n```\n"
        );
    }
}
