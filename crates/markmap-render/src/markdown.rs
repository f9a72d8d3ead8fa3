//! Markdown rendering with mindmap block conversion.

use base64::Engine;
use base64::prelude::BASE64_STANDARD;
use markmap_include::MARKMAP_LANGUAGE;
use pulldown_cmark::{CodeBlockKind, CowStr, Event, Options, Parser, Tag, TagEnd, html};

use crate::consts::MARKMAP_CLASS;

/// Rendered HTML fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedPage {
    /// HTML body content.
    pub html: String,
    /// Number of mindmap containers emitted.
    pub markmap_count: usize,
}

impl RenderedPage {
    /// Whether the page needs the markmap browser assets.
    #[must_use]
    pub fn has_markmaps(&self) -> bool {
        self.markmap_count > 0
    }
}

/// Render markdown to HTML, converting `markmap` code blocks to mindmaps.
///
/// Each block becomes a `div.markmap` holding the block source as base64 in
/// a hidden `<markmap-data>` element, plus an empty `<svg>` the browser
/// script draws into. The source is encoded so other page scripts (math
/// renderers, syntax highlighters) leave it alone.
///
/// Other code blocks render as regular `<pre><code>`.
#[must_use]
pub fn render_markdown(markdown: &str) -> RenderedPage {
    let parser = Parser::new_ext(markdown, parser_options());

    let mut events = Vec::new();
    let mut markmap_source: Option<String> = None;
    let mut markmap_count = 0;

    for event in parser {
        match event {
            Event::Start(Tag::CodeBlock(CodeBlockKind::Fenced(ref info)))
                if fence_language(info) == MARKMAP_LANGUAGE =>
            {
                markmap_source = Some(String::new());
            }
            Event::Text(text) if markmap_source.is_some() => {
                if let Some(source) = markmap_source.as_mut() {
                    source.push_str(&text);
                }
            }
            Event::End(TagEnd::CodeBlock) if markmap_source.is_some() => {
                let source = markmap_source.take().unwrap_or_default();
                events.push(Event::Html(CowStr::from(markmap_html(&source))));
                markmap_count += 1;
            }
            other => events.push(other),
        }
    }

    let mut output = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut output, events.into_iter());

    RenderedPage {
        html: output,
        markmap_count,
    }
}

fn parser_options() -> Options {
    Options::ENABLE_TABLES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS
        | Options::ENABLE_FOOTNOTES
}

/// Language from a fence info string (`markmap title=x` → `markmap`).
fn fence_language(info: &str) -> &str {
    info.split_whitespace().next().unwrap_or("")
}

fn markmap_html(source: &str) -> String {
    let encoded = BASE64_STANDARD.encode(source.trim());
    format!(
        "<div class=\"{MARKMAP_CLASS}\"><markmap-data hidden=\"true\" encoding=\"base64\">{encoded}</markmap-data><svg></svg></div>\n"
    )
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_render_plain_markdown() {
        let page = render_markdown("# Title\n\nSome **bold** text.\n");
        assert_eq!(
            page.html,
            "<h1>Title</h1>\n<p>Some <strong>bold</strong> text.</p>\n"
        );
        assert_eq!(page.markmap_count, 0);
        assert!(!page.has_markmaps());
    }

    #[test]
    fn test_render_markmap_block() {
        let page = render_markdown("```markmap\n# Root\n## Child\n```\n");
        let encoded = BASE64_STANDARD.encode("# Root\n## Child");
        assert_eq!(
            page.html,
            format!(
                "<div class=\"markmap\"><markmap-data hidden=\"true\" encoding=\"base64\">{encoded}</markmap-data><svg></svg></div>\n"
            )
        );
        assert_eq!(page.markmap_count, 1);
    }

    #[test]
    fn test_render_markmap_with_fence_attributes() {
        let page = render_markdown("```markmap title=Overview\n# Root\n```\n");
        assert_eq!(page.markmap_count, 1);
    }

    #[test]
    fn test_other_code_blocks_pass_through() {
        let page = render_markdown("```rust\nfn main() {}\n```\n");
        assert!(page.html.contains("<pre><code class=\"language-rust\">"));
        assert!(page.html.contains("fn main() {}"));
        assert_eq!(page.markmap_count, 0);
    }

    #[test]
    fn test_markmap_source_is_not_escaped_into_page() {
        let page = render_markdown("```markmap\n# <script>alert(1)</script>\n```\n");
        assert!(!page.html.contains("<script>"));
    }

    #[test]
    fn test_multiple_markmaps_counted() {
        let markdown = "Intro\n\n```markmap\n# A\n```\n\nMiddle\n\n````markmap\n# B\n```js\nx\n```\n````\n";
        let page = render_markdown(markdown);
        assert_eq!(page.markmap_count, 2);
        assert!(page.html.contains("<p>Intro</p>"));
        assert!(page.html.contains("<p>Middle</p>"));
        let encoded = BASE64_STANDARD.encode("# B\n```js\nx\n```");
        assert!(page.html.contains(&encoded));
    }

    #[test]
    fn test_indented_code_block_not_converted() {
        let page = render_markdown("    # not a map\n");
        assert_eq!(page.markmap_count, 0);
        assert!(page.html.contains("<pre><code>"));
    }

    #[test]
    fn test_nested_include_renders_single_markmap() {
        use markmap_include::{Diagnostic, IncludeConfig, IncludePreprocessor};

        let temp_dir = tempfile::tempdir().unwrap();
        std::fs::write(temp_dir.path().join("outer.mm.md"), "# Outer\n{! inner.mm.md !}").unwrap();
        std::fs::write(temp_dir.path().join("inner.mm.md"), "## Inner").unwrap();
        let config = IncludeConfig::new(temp_dir.path(), "utf-8", ".mm.md").unwrap();

        let mut diagnostics: Vec<Diagnostic> = Vec::new();
        let markdown = IncludePreprocessor::new(config)
            .process_str("{! outer.mm.md !}\n\nAfter text\n", &mut diagnostics);
        let page = render_markdown(&markdown);

        assert_eq!(page.markmap_count, 1);
        assert!(page.html.contains(&BASE64_STANDARD.encode("# Outer\n## Inner")));
        assert!(page.html.ends_with("<p>After text</p>\n"));
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_tables_enabled() {
        let page = render_markdown("| a | b |\n|---|---|\n| 1 | 2 |\n");
        assert!(page.html.contains("<table>"));
    }
}
