//! Include directive matching.
//!
//! A directive is `{! path !}` anywhere in a line. The path is taken
//! literally up to the closing marker, with surrounding whitespace trimmed.

use std::sync::LazyLock;

use regex::Regex;

static DIRECTIVE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{!\s*(?P<path>.+?)\s*!\}").unwrap());

/// First directive found in a line.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct Directive<'a> {
    /// Path between the markers.
    pub(crate) path: &'a str,
    /// Byte offset where the directive starts.
    pub(crate) start: usize,
    /// Byte offset just past the closing marker.
    pub(crate) end: usize,
}

impl<'a> Directive<'a> {
    /// Text before the directive.
    pub(crate) fn prefix(&self, line: &'a str) -> &'a str {
        &line[..self.start]
    }

    /// Text after the directive.
    pub(crate) fn suffix(&self, line: &'a str) -> &'a str {
        &line[self.end..]
    }
}

/// Find the first directive in a line.
pub(crate) fn find_directive(line: &str) -> Option<Directive<'_>> {
    let caps = DIRECTIVE_PATTERN.captures(line)?;
    let whole = caps.get(0)?;
    let path = caps.name("path")?.as_str().trim();
    Some(Directive {
        path,
        start: whole.start(),
        end: whole.end(),
    })
}
