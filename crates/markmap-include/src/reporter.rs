//! Diagnostics emitted while resolving includes.

use std::fmt;
use std::path::{Path, PathBuf};

/// Severity of a [`Diagnostic`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Directive left in place.
    Warning,
    /// Directive removed from the output.
    Error,
}

/// Problem found while resolving an include directive.
///
/// Line numbers are 1-indexed positions in the document at the time the
/// directive was examined, i.e. after earlier includes were spliced in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// Target was already included during this run. The directive is kept.
    Cycle {
        /// Resolved path of the target.
        path: PathBuf,
        /// Line containing the directive.
        line: usize,
    },
    /// Target could not be read or decoded. The directive is removed.
    Unreadable {
        /// Resolved path of the target.
        path: PathBuf,
        /// Line containing the directive.
        line: usize,
        /// Line text before the directive was removed.
        text: String,
        /// Underlying I/O or decode error.
        reason: String,
    },
}

impl Diagnostic {
    /// Cycles are warnings, unreadable files are errors.
    #[must_use]
    pub fn severity(&self) -> Severity {
        match self {
            Self::Cycle { .. } => Severity::Warning,
            Self::Unreadable { .. } => Severity::Error,
        }
    }

    /// Resolved path of the included file.
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::Cycle { path, .. } | Self::Unreadable { path, .. } => path,
        }
    }

    /// One-based line of the directive in the document being processed.
    #[must_use]
    pub fn line(&self) -> usize {
        match self {
            Self::Cycle { line, .. } | Self::Unreadable { line, .. } => *line,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cycle { path, line } => write!(
                f,
                "line {line}: loop detected while including {}",
                path.display()
            ),
            Self::Unreadable {
                path,
                line,
                text,
                reason,
            } => write!(
                f,
                "line {line}: unable to include {}, ignoring statement '{text}': {reason}",
                path.display()
            ),
        }
    }
}

/// Sink for include diagnostics.
///
/// Passed into [`IncludePreprocessor::process`](crate::IncludePreprocessor::process)
/// so callers decide where diagnostics go.
pub trait Reporter {
    /// Record a diagnostic.
    fn report(&mut self, diagnostic: Diagnostic);
}

/// Reporter that logs diagnostics with `tracing`.
///
/// Cycles are logged at `WARN`, unreadable files at `ERROR`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingReporter;

impl Reporter for TracingReporter {
    fn report(&mut self, diagnostic: Diagnostic) {
        match &diagnostic {
            Diagnostic::Cycle { path, line } => {
                tracing::warn!(path = %path.display(), line, "Loop detected while including mindmap");
            }
            Diagnostic::Unreadable {
                path,
                line,
                text,
                reason,
            } => {
                tracing::error!(
                    path = %path.display(),
                    line,
                    statement = %text,
                    error = %reason,
                    "Unable to include mindmap, ignoring statement"
                );
            }
        }
    }
}

impl Reporter for Vec<Diagnostic> {
    fn report(&mut self, diagnostic: Diagnostic) {
        self.push(diagnostic);
    }
}

impl<R: Reporter + ?Sized> Reporter for &mut R {
    fn report(&mut self, diagnostic: Diagnostic) {
        (**self).report(diagnostic);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycle_display() {
        let diagnostic = Diagnostic::Cycle {
            path: PathBuf::from("/docs/a.mm.md"),
            line: 3,
        };
        assert_eq!(
            diagnostic.to_string(),
            "line 3: loop detected while including /docs/a.mm.md"
        );
        assert_eq!(diagnostic.severity(), Severity::Warning);
    }

    #[test]
    fn test_unreadable_display() {
        let diagnostic = Diagnostic::Unreadable {
            path: PathBuf::from("/docs/missing.mm.md"),
            line: 1,
            text: "{! missing.mm.md !}".to_owned(),
            reason: "No such file or directory (os error 2)".to_owned(),
        };
        let message = diagnostic.to_string();
        assert!(message.starts_with("line 1: unable to include /docs/missing.mm.md"));
        assert!(message.contains("{! missing.mm.md !}"));
        assert!(message.contains("os error 2"));
        assert_eq!(diagnostic.severity(), Severity::Error);
        assert_eq!(diagnostic.path(), Path::new("/docs/missing.mm.md"));
        assert_eq!(diagnostic.line(), 1);
    }

    fn report_cycle(mut reporter: impl Reporter) {
        reporter.report(Diagnostic::Cycle {
            path: PathBuf::from("/a.mm.md"),
            line: 1,
        });
    }

    #[test]
    fn test_vec_reporter_collects_through_mut_ref() {
        let mut collected: Vec<Diagnostic> = Vec::new();
        report_cycle(&mut collected);
        report_cycle(&mut collected);
        assert_eq!(collected.len(), 2);
    }
}
