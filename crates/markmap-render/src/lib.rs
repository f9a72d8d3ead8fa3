//! Markdown to HTML rendering with interactive mindmaps.
//!
//! Fenced `markmap` code blocks, as produced by `markmap-include`, are turned
//! into mindmap containers that the markmap browser libraries render on page
//! load. Layout happens entirely in the browser.
//!
//! # Architecture
//!
//! - [`render_markdown`]: markdown → HTML fragment via `pulldown-cmark`,
//!   counting the mindmaps it emits
//! - [`MarkmapAssets`]: script and style tags needed by pages with mindmaps
//! - [`inject_assets`] / [`render_page`]: add those tags to full HTML pages
//!
//! # Example
//!
//! ```
//! use markmap_render::render_markdown;
//!
//! let page = render_markdown("```markmap\n# Root\n## Child\n```\n");
//! assert_eq!(page.markmap_count, 1);
//! assert!(page.html.contains("<markmap-data"));
//! ```

mod assets;
mod consts;
mod markdown;
mod page;

pub use assets::{MarkmapAssets, ScriptSource, inject_assets};
pub use consts::{D3_URL_TEMPLATE, LIB_URL_TEMPLATE, MARKMAP_CLASS, VIEW_URL_TEMPLATE};
pub use markdown::{RenderedPage, render_markdown};
pub use page::render_page;
