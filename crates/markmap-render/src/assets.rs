//! Browser assets for pages containing mindmaps.

use crate::consts::{
    D3_URL_TEMPLATE, INIT_SCRIPT, LIB_URL_TEMPLATE, MARKMAP_CLASS, STYLE, VIEW_URL_TEMPLATE,
};

/// Where a browser library is loaded from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptSource {
    /// Version substituted into the library's CDN URL template.
    Version(String),
    /// Full script URL or site path, used as-is.
    Url(String),
}

impl ScriptSource {
    /// Pick an explicit URL when present, the version otherwise.
    #[must_use]
    pub fn from_config(version: &str, url: Option<&str>) -> Self {
        match url {
            Some(url) => Self::Url(url.to_owned()),
            None => Self::Version(version.to_owned()),
        }
    }

    fn resolve(&self, template: &str) -> String {
        match self {
            Self::Version(version) => template.replace("{}", version),
            Self::Url(url) => url.clone(),
        }
    }
}

/// Script and style tags required by pages that contain mindmaps.
///
/// The libraries load in order: d3, markmap-lib, markmap-view. The inline
/// initializer goes at the end of the body so it runs after them.
#[derive(Debug, Clone)]
pub struct MarkmapAssets {
    script_urls: Vec<String>,
}

impl MarkmapAssets {
    /// Build assets from the three library sources.
    #[must_use]
    pub fn new(d3: &ScriptSource, lib: &ScriptSource, view: &ScriptSource) -> Self {
        Self {
            script_urls: vec![
                d3.resolve(D3_URL_TEMPLATE),
                lib.resolve(LIB_URL_TEMPLATE),
                view.resolve(VIEW_URL_TEMPLATE),
            ],
        }
    }

    /// Library URLs in load order.
    #[must_use]
    pub fn script_urls(&self) -> &[String] {
        &self.script_urls
    }

    /// Tags for the document head: library scripts and container styles.
    #[must_use]
    pub fn head_tags(&self) -> String {
        let mut tags = String::new();
        for url in &self.script_urls {
            tags.push_str(&format!(
                "<script src=\"{}\" type=\"text/javascript\"></script>\n",
                escape_attr(url)
            ));
        }
        tags.push_str("<style type=\"text/css\">\n");
        tags.push_str(STYLE);
        tags.push_str("</style>\n");
        tags
    }

    /// Tags for the end of the document body: the mindmap initializer.
    #[must_use]
    pub fn body_tags(&self) -> String {
        format!("<script type=\"text/javascript\">\n{INIT_SCRIPT}</script>\n")
    }
}

/// Insert mindmap assets into a full HTML page.
///
/// Head tags go right before `</head>`, body tags right before `</body>`.
/// When either closing tag is missing the tags are appended instead.
/// Pages without a mindmap container are returned unchanged.
#[must_use]
pub fn inject_assets(html: &str, assets: &MarkmapAssets) -> String {
    if !html.contains(&format!("class=\"{MARKMAP_CLASS}\"")) {
        return html.to_owned();
    }
    let with_head = insert_before(html, "</head>", &assets.head_tags());
    insert_before(&with_head, "</body>", &assets.body_tags())
}

fn insert_before(html: &str, marker: &str, tags: &str) -> String {
    let mut output = String::with_capacity(html.len() + tags.len());
    if let Some(pos) = html.rfind(marker) {
        output.push_str(&html[..pos]);
        output.push_str(tags);
        output.push_str(&html[pos..]);
    } else {
        output.push_str(html);
        output.push_str(tags);
    }
    output
}

fn escape_attr(value: &str) -> String {
    let mut result = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            _ => result.push(c),
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn default_assets() -> MarkmapAssets {
        MarkmapAssets::new(
            &ScriptSource::Version("7".to_owned()),
            &ScriptSource::Version("0.15.4".to_owned()),
            &ScriptSource::Version("0.15.4".to_owned()),
        )
    }

    #[test]
    fn test_script_urls_from_versions() {
        let assets = default_assets();
        assert_eq!(
            assets.script_urls(),
            [
                "https://unpkg.com/d3@7",
                "https://unpkg.com/markmap-lib@0.15.4",
                "https://unpkg.com/markmap-view@0.15.4",
            ]
        );
    }

    #[test]
    fn test_explicit_url_overrides_version() {
        let assets = MarkmapAssets::new(
            &ScriptSource::from_config("7", Some("/js/d3.min.js")),
            &ScriptSource::from_config("0.15.4", None),
            &ScriptSource::from_config("0.15.4", None),
        );
        assert_eq!(assets.script_urls()[0], "/js/d3.min.js");
        assert_eq!(
            assets.script_urls()[1],
            "https://unpkg.com/markmap-lib@0.15.4"
        );
    }

    #[test]
    fn test_head_tags() {
        let head = default_assets().head_tags();
        assert!(head.starts_with(
            "<script src=\"https://unpkg.com/d3@7\" type=\"text/javascript\"></script>\n"
        ));
        assert!(head.contains("<style type=\"text/css\">"));
        assert!(head.contains(".markmap"));
    }

    #[test]
    fn test_head_tags_escape_urls() {
        let assets = MarkmapAssets::new(
            &ScriptSource::Url("/js/d3.js?a=1&b=\"2\"".to_owned()),
            &ScriptSource::Version("1".to_owned()),
            &ScriptSource::Version("1".to_owned()),
        );
        assert!(
            assets
                .head_tags()
                .contains("src=\"/js/d3.js?a=1&amp;b=&quot;2&quot;\"")
        );
    }

    #[test]
    fn test_body_tags_contain_initializer() {
        let body = default_assets().body_tags();
        assert!(body.contains("markmap.Transformer"));
        assert!(body.ends_with("</script>\n"));
    }

    #[test]
    fn test_inject_assets_into_page() {
        let assets = default_assets();
        let html = "<html><head><title>T</title></head><body><div class=\"markmap\"></div><p>x</p></body></html>";
        let result = inject_assets(html, &assets);

        let head_end = result.find("</head>").unwrap();
        let script = result.find("https://unpkg.com/d3@7").unwrap();
        assert!(script < head_end);

        let body_end = result.find("</body>").unwrap();
        let init = result.find("markmap.Transformer").unwrap();
        assert!(init > result.find("<p>x</p>").unwrap());
        assert!(init < body_end);
    }

    #[test]
    fn test_inject_assets_into_fragment_appends() {
        let assets = default_assets();
        let fragment = "<div class=\"markmap\"></div>";
        let result = inject_assets(fragment, &assets);
        assert!(result.starts_with("<div class=\"markmap\"></div><script src="));
        assert!(result.ends_with(&assets.body_tags()));
    }

    #[test]
    fn test_inject_assets_skips_pages_without_mindmaps() {
        let html = "<html><head></head><body><p>x</p></body></html>";
        assert_eq!(inject_assets(html, &default_assets()), html);
    }
}
