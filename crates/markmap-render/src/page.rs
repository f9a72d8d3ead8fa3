//! Standalone HTML page rendering.

use crate::assets::{MarkmapAssets, inject_assets};
use crate::markdown::render_markdown;

/// Render markdown into a complete HTML5 document.
///
/// Assets are injected only when the page contains at least one mindmap.
#[must_use]
pub fn render_page(title: &str, markdown: &str, assets: &MarkmapAssets) -> String {
    let rendered = render_markdown(markdown);
    let page = format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{}</title>\n</head>\n<body>\n{}</body>\n</html>\n",
        escape_text(title),
        rendered.html,
    );

    if rendered.has_markmaps() {
        inject_assets(&page, assets)
    } else {
        page
    }
}

fn escape_text(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
