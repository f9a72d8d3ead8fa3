//! Line-oriented markdown document.

/// Markdown document as an ordered list of lines.
///
/// Keeps track of whether the source text ended with a newline so that
/// [`to_text`](Self::to_text) reproduces it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Document {
    lines: Vec<String>,
    trailing_newline: bool,
}

impl Document {
    /// Split markdown text into lines (`\n` and `\r\n` endings).
    #[must_use]
    pub fn parse(text: &str) -> Self {
        Self {
            lines: text.lines().map(str::to_owned).collect(),
            trailing_newline: text.ends_with('\n'),
        }
    }

    /// Create a document from lines, without a trailing newline.
    #[must_use]
    pub fn from_lines(lines: Vec<String>) -> Self {
        Self {
            lines,
            trailing_newline: false,
        }
    }

    /// Document lines.
    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Consume the document and return its lines.
    #[must_use]
    pub fn into_lines(self) -> Vec<String> {
        self.lines
    }

    /// Number of lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether the document has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Join lines back into text.
    #[must_use]
    pub fn to_text(&self) -> String {
        let mut text = self.lines.join("\n");
        if self.trailing_newline {
            text.push('\n');
        }
        text
    }

    pub(crate) fn lines_mut(&mut self) -> &mut [String] {
        &mut self.lines
    }

    /// Replace the line at `index`.
    pub(crate) fn set_line(&mut self, index: usize, line: String) {
        self.lines[index] = line;
    }

    /// Replace the line at `index` with zero or more lines.
    pub(crate) fn splice(&mut self, index: usize, replacement: Vec<String>) {
        self.lines.splice(index..=index, replacement);
    }
}
