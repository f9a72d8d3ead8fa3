//! Fenced code blocks: `markmap` output and fence tracking.

/// Code fence language recognized by the renderer as mindmap source.
pub const MARKMAP_LANGUAGE: &str = "markmap";

/// Minimum fence length in `CommonMark`.
const MIN_FENCE_LEN: usize = 3;

/// Maximum indentation of a fence line in `CommonMark`.
const MAX_FENCE_INDENT: usize = 3;

/// Wrap included content in a fenced `markmap` block.
///
/// The backtick fence is longer than any backtick run inside the content,
/// so code fences in the included file cannot terminate the block early.
pub(crate) fn wrap_in_fence(content: &str) -> Vec<String> {
    let fence = "`".repeat(fence_len(content, '`'));
    let mut lines = Vec::with_capacity(content.lines().count() + 2);
    lines.push(format!("{fence}{MARKMAP_LANGUAGE}"));
    lines.extend(content.lines().map(str::to_owned));
    lines.push(fence);
    lines
}

/// Smallest fence of `marker` characters that no run in `content` can close.
fn fence_len(content: &str, marker: char) -> usize {
    let longest_run = content
        .split(|c| c != marker)
        .map(str::len)
        .max()
        .unwrap_or(0);
    if longest_run >= MIN_FENCE_LEN {
        longest_run + 1
    } else {
        MIN_FENCE_LEN
    }
}

/// Fenced code block opened on an earlier line and not yet closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct OpenFence {
    /// Line index of the opening fence.
    pub(crate) line: usize,
    marker: char,
    len: usize,
    is_markmap: bool,
}

impl OpenFence {
    /// Index of the line closing this fence, searching from `from`.
    pub(crate) fn find_close(&self, lines: &[String], from: usize) -> Option<usize> {
        (from..lines.len()).find(|&index| self.is_closed_by(&lines[index]))
    }

    /// Lengthen the opening and closing lines so that no run inside the
    /// block can terminate it. `close` is the closing line index.
    pub(crate) fn refit(&self, lines: &mut [String], close: usize) {
        let content = lines[self.line + 1..close].join("\n");
        let required = fence_len(&content, self.marker);
        if required <= self.len {
            return;
        }
        for index in [self.line, close] {
            lines[index] = lengthen(&lines[index], self.marker, required);
        }
    }

    fn is_closed_by(&self, line: &str) -> bool {
        fence_run(line).is_some_and(|(marker, len, rest)| {
            marker == self.marker && len >= self.len && rest.trim().is_empty()
        })
    }
}

/// Tracks fenced code blocks while walking a document top to bottom.
#[derive(Debug, Default)]
pub(crate) struct FenceTracker {
    open: Option<OpenFence>,
}

impl FenceTracker {
    /// Feed the next line. Returns `true` if it opens or closes a fence.
    pub(crate) fn advance(&mut self, index: usize, line: &str) -> bool {
        match self.open {
            Some(fence) if fence.is_closed_by(line) => {
                self.open = None;
                true
            }
            Some(_) => false,
            None => {
                let Some((marker, len, info)) = fence_run(line) else {
                    return false;
                };
                if marker == '`' && info.contains('`') {
                    return false;
                }
                self.open = Some(OpenFence {
                    line: index,
                    marker,
                    len,
                    is_markmap: info.split_whitespace().next() == Some(MARKMAP_LANGUAGE),
                });
                true
            }
        }
    }

    /// The enclosing fence, if it is a `markmap` block.
    pub(crate) fn open_markmap(&self) -> Option<OpenFence> {
        self.open.filter(|fence| fence.is_markmap)
    }
}

/// Split a fence line into marker, run length and the text after the run.
fn fence_run(line: &str) -> Option<(char, usize, &str)> {
    let trimmed = line.trim_start_matches(' ');
    if line.len() - trimmed.len() > MAX_FENCE_INDENT {
        return None;
    }
    let marker = trimmed.chars().next().filter(|c| matches!(*c, '`' | '~'))?;
    let rest = trimmed.trim_start_matches(marker);
    let len = trimmed.len() - rest.len();
    (len >= MIN_FENCE_LEN).then_some((marker, len, rest))
}

fn lengthen(line: &str, marker: char, len: usize) -> String {
    let trimmed = line.trim_start_matches(' ');
    let indent = &line[..line.len() - trimmed.len()];
    let rest = trimmed.trim_start_matches(marker);
    format!("{indent}{}{rest}", marker.to_string().repeat(len))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn lines(text: &str) -> Vec<String> {
        text.lines().map(str::to_owned).collect()
    }

    fn track(lines: &[String], until: usize) -> FenceTracker {
        let mut tracker = FenceTracker::default();
        for (index, line) in lines.iter().enumerate().take(until) {
            tracker.advance(index, line);
        }
        tracker
    }

    #[test]
    fn test_wrap_in_fence() {
        assert_eq!(
            wrap_in_fence("# Root\n## Child\n"),
            vec!["```markmap", "# Root", "## Child", "```"]
        );
    }

    #[test]
    fn test_wrap_in_fence_inline_code_keeps_default_fence() {
        let lines = wrap_in_fence("# Root `code`\n## ``pair``");
        assert_eq!(lines.first().unwrap(), "```markmap");
        assert_eq!(lines.last().unwrap(), "```");
    }

    #[test]
    fn test_wrap_in_fence_outlasts_nested_fence() {
        let lines = wrap_in_fence("# Root\n````js\nlet a;\n````");
        assert_eq!(lines.first().unwrap(), "`````markmap");
        assert_eq!(lines.last().unwrap(), "`````");
    }

    #[test]
    fn test_tracker_finds_enclosing_markmap_fence() {
        let doc = lines("intro\n```markmap\n# Root\n{! x !}\n```\nafter");

        let inside = track(&doc, 3).open_markmap().unwrap();
        assert_eq!(inside.line, 1);
        assert_eq!(inside.find_close(&doc, 4), Some(4));

        assert!(track(&doc, 5).open_markmap().is_none());
    }

    #[test]
    fn test_tracker_ignores_other_languages() {
        let doc = lines("```js\n{! x !}\n```");
        assert!(track(&doc, 1).open_markmap().is_none());
    }

    #[test]
    fn test_tracker_shorter_run_does_not_close() {
        let doc = lines("````markmap\n```js\n```\n# After\n````");
        let tracker = track(&doc, 3);
        assert_eq!(tracker.open_markmap().unwrap().line, 0);
    }

    #[test]
    fn test_tracker_tilde_fence_not_closed_by_backticks() {
        let doc = lines("~~~markmap\n```\n# Root");
        assert!(track(&doc, 2).open_markmap().is_some());
    }

    #[test]
    fn test_tracker_indented_code_is_not_a_fence() {
        let doc = lines("    ```markmap\n# Root");
        assert!(track(&doc, 1).open_markmap().is_none());
    }

    #[test]
    fn test_refit_lengthens_fence_around_nested_code() {
        let mut doc = lines("```markmap\n# Root\n```js\nx\n```\n```");
        let fence = track(&doc, 1).open_markmap().unwrap();

        fence.refit(&mut doc, 5);

        assert_eq!(doc, lines("````markmap\n# Root\n```js\nx\n```\n````"));
    }

    #[test]
    fn test_refit_keeps_fence_that_already_fits() {
        let mut doc = lines("```markmap\n# Root\n```");
        let fence = track(&doc, 1).open_markmap().unwrap();

        fence.refit(&mut doc, 2);

        assert_eq!(doc, lines("```markmap\n# Root\n```"));
    }
}
