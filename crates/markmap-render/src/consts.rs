//! Constants for mindmap markup and browser libraries.

/// CSS class of mindmap containers.
pub const MARKMAP_CLASS: &str = "markmap";

/// d3 CDN URL, `{}` is replaced by the version.
pub const D3_URL_TEMPLATE: &str = "https://unpkg.com/d3@{}";

/// markmap-lib CDN URL, `{}` is replaced by the version.
pub const LIB_URL_TEMPLATE: &str = "https://unpkg.com/markmap-lib@{}";

/// markmap-view CDN URL, `{}` is replaced by the version.
pub const VIEW_URL_TEMPLATE: &str = "https://unpkg.com/markmap-view@{}";

/// Initializer run after the libraries load.
pub(crate) const INIT_SCRIPT: &str = include_str!("../assets/markmap.js");

/// Styles for mindmap containers.
pub(crate) const STYLE: &str = include_str!("../assets/markmap.css");
