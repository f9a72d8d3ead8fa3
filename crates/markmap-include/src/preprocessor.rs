//! Include preprocessor.
//!
//! Expands `{! path !}` directives by rescanning the document from the top
//! after every change until a full scan finds nothing left to do. Splicing
//! shifts line numbers, so iteration always restarts instead of continuing
//! over the mutated line list.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::config::IncludeConfig;
use crate::directive::find_directive;
use crate::document::Document;
use crate::encoding::DecodeError;
use crate::fence::{FenceTracker, wrap_in_fence};
use crate::reporter::{Diagnostic, Reporter};

/// Result of preprocessing a document.
#[derive(Debug)]
pub struct Processed {
    /// Document with eligible directives expanded.
    pub document: Document,
    /// Files recorded during the run, in the order they were first visited.
    ///
    /// Includes files that failed to read. Useful for rebuilding a page when
    /// one of its mindmaps changes.
    pub included: Vec<PathBuf>,
}

/// Files visited during one run. Never shrinks.
#[derive(Default)]
struct Visited {
    seen: HashSet<PathBuf>,
    order: Vec<PathBuf>,
}

impl Visited {
    /// Record a path. Returns `false` if it was already recorded.
    fn insert(&mut self, path: &Path) -> bool {
        if self.seen.contains(path) {
            return false;
        }
        self.seen.insert(path.to_path_buf());
        self.order.push(path.to_path_buf());
        true
    }
}

/// Error reading an included file.
#[derive(Debug, thiserror::Error)]
enum ReadError {
    #[error("{0}")]
    Io(#[from] std::io::Error),
    #[error("{0}")]
    Decode(#[from] DecodeError),
}

/// Preprocessor that transcludes mindmap files into markdown.
///
/// Each eligible directive is replaced by the target file's content wrapped
/// in a fenced `markmap` block. Text around the directive on the same line
/// is kept on its own line before and after the block. A directive that is
/// already inside a `markmap` block is replaced by the raw content, and the
/// block's fence is lengthened when the new lines would otherwise close it.
///
/// Problems never abort processing:
/// - extension mismatch: directive left untouched, nothing reported
/// - target already visited in this run: directive left untouched,
///   [`Diagnostic::Cycle`] reported
/// - target unreadable: directive removed, [`Diagnostic::Unreadable`] reported
///
/// # Example
///
/// ```
/// use markmap_include::{IncludeConfig, IncludePreprocessor, TracingReporter};
///
/// let preprocessor = IncludePreprocessor::new(IncludeConfig::default());
/// let output = preprocessor.process_str("No includes here.\n", TracingReporter);
/// assert_eq!(output, "No includes here.\n");
/// ```
#[derive(Clone, Debug, Default)]
pub struct IncludePreprocessor {
    config: IncludeConfig,
}

impl IncludePreprocessor {
    /// Create a preprocessor with the given configuration.
    #[must_use]
    pub fn new(config: IncludeConfig) -> Self {
        Self { config }
    }

    /// Configuration in use.
    #[must_use]
    pub fn config(&self) -> &IncludeConfig {
        &self.config
    }

    /// Expand all eligible directives in a document.
    pub fn process<R: Reporter>(&self, document: Document, mut reporter: R) -> Processed {
        let mut document = document;
        let mut visited = Visited::default();

        while self.expand_first(&mut document, &mut visited, &mut reporter) {}

        tracing::debug!(included = visited.order.len(), "Include preprocessing completed");

        Processed {
            document,
            included: visited.order,
        }
    }

    /// Expand all eligible directives in markdown text.
    pub fn process_str<R: Reporter>(&self, markdown: &str, reporter: R) -> String {
        self.process(Document::parse(markdown), reporter)
            .document
            .to_text()
    }

    /// Scan from the top and handle the first directive that changes the
    /// document. Returns `false` once a full scan changes nothing.
    fn expand_first<R: Reporter>(
        &self,
        document: &mut Document,
        visited: &mut Visited,
        reporter: &mut R,
    ) -> bool {
        let mut fences = FenceTracker::default();
        for index in 0..document.len() {
            let line = document.lines()[index].as_str();
            if fences.advance(index, line) {
                continue;
            }
            let Some(directive) = find_directive(line) else {
                continue;
            };
            if !self.config.is_eligible(directive.path) {
                continue;
            }

            let path = self.config.resolve(directive.path);
            if !visited.insert(&path) {
                reporter.report(Diagnostic::Cycle {
                    path,
                    line: index + 1,
                });
                continue;
            }

            let prefix = directive.prefix(line).to_owned();
            let suffix = directive.suffix(line).to_owned();
            let enclosing = fences.open_markmap();
            let close = enclosing.and_then(|fence| fence.find_close(document.lines(), index + 1));

            match self.read(&path) {
                Ok(content) => {
                    tracing::debug!(path = %path.display(), line = index + 1, "Including mindmap");
                    let lines = splice_lines(prefix, &content, suffix, enclosing.is_some());
                    let added = lines.len();
                    document.splice(index, lines);
                    if let (Some(fence), Some(close)) = (enclosing, close) {
                        fence.refit(document.lines_mut(), close + added - 1);
                    }
                }
                Err(e) => {
                    reporter.report(Diagnostic::Unreadable {
                        path,
                        line: index + 1,
                        text: line.to_owned(),
                        reason: e.to_string(),
                    });
                    document.set_line(index, prefix + &suffix);
                }
            }
            return true;
        }
        false
    }

    fn read(&self, path: &Path) -> Result<String, ReadError> {
        let bytes = std::fs::read(path)?;
        Ok(self.config.encoding().decode(&bytes)?)
    }
}

/// Build the lines replacing a directive line.
///
/// Prefix and suffix text is kept verbatim on its own line unless it is
/// blank. Inside a `markmap` block the content is already mindmap source
/// and goes in unwrapped.
fn splice_lines(prefix: String, content: &str, suffix: String, nested: bool) -> Vec<String> {
    let mut lines = Vec::new();
    if !prefix.trim().is_empty() {
        lines.push(prefix);
    }
    if content.is_empty() {
        lines.push(String::new());
    } else if nested {
        lines.extend(content.lines().map(str::to_owned));
    } else {
        lines.extend(wrap_in_fence(content));
    }
    if !suffix.trim().is_empty() {
        lines.push(suffix);
    }
    lines
}
