//! markmap CLI - mindmap transclusion for markdown.
//!
//! Provides commands for:
//! - `include`: Expand `{! file.mm.md !}` directives into `markmap` blocks
//! - `render`: Expand directives and render a standalone HTML page

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{IncludeArgs, RenderArgs};
use output::Output;

/// markmap - mindmap transclusion for markdown.
#[derive(Parser)]
#[command(name = "markmap", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Expand mindmap include directives in a markdown file.
    Include(IncludeArgs),
    /// Expand include directives and render an HTML page.
    Render(RenderArgs),
}

impl Commands {
    fn verbose(&self) -> bool {
        match self {
            Self::Include(args) => args.options.verbose,
            Self::Render(args) => args.options.verbose,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.command.verbose() {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Include(args) => args.execute(),
        Commands::Render(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
