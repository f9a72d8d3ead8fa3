//! Mindmap file transclusion for markdown documents.
//!
//! Replaces `{! path/to/file.mm.md !}` directives with the content of the
//! referenced file, wrapped in a fenced `markmap` code block so the renderer
//! can later turn it into an interactive mindmap.
//!
//! # Architecture
//!
//! - [`IncludeConfig`]: validated base path, encoding and file extension
//! - [`IncludePreprocessor`]: rescans the document until no eligible
//!   directive is left, tracking visited files to stop include cycles
//! - [`Reporter`]: sink for [`Diagnostic`]s (cycles, unreadable files).
//!   [`TracingReporter`] logs them, `Vec<Diagnostic>` collects them.
//!
//! Processing never fails: a bad include degrades the page it appears on
//! and is reported, the rest of the document is still expanded.
//!
//! # Example
//!
//! ```
//! use markmap_include::{Diagnostic, Document, IncludeConfig, IncludePreprocessor};
//!
//! let config = IncludeConfig::new("docs", "utf-8", ".mm.md").unwrap();
//! let preprocessor = IncludePreprocessor::new(config);
//!
//! let mut diagnostics: Vec<Diagnostic> = Vec::new();
//! let processed = preprocessor.process(Document::parse("# Title\n"), &mut diagnostics);
//!
//! assert_eq!(processed.document.to_text(), "# Title\n");
//! assert!(diagnostics.is_empty());
//! ```

mod config;
mod directive;
mod document;
mod encoding;
mod fence;
mod preprocessor;
mod reporter;

pub use config::{
    DEFAULT_BASE_PATH, DEFAULT_ENCODING, DEFAULT_FILE_EXTENSION, IncludeConfig,
    IncludeConfigError,
};
pub use document::Document;
pub use encoding::{DecodeError, TextEncoding};
pub use fence::MARKMAP_LANGUAGE;
pub use preprocessor::{IncludePreprocessor, Processed};
pub use reporter::{Diagnostic, Reporter, Severity, TracingReporter};
