// src/html.rs
// =============================================================================
// This module extracts crawlable references from HTML pages.
//
// We use the `scraper` crate which:
// - Parses HTML into a DOM (Document Object Model)
// - Supports CSS selectors for finding elements
// - Is built on html5ever (Mozilla's HTML parser)
//
// Three kinds of references are collected:
// - <a href>        links, which the crawler may follow
// - <script src>    script sources, recorded only
// - <form action>   form targets, recorded only
//
// Everything is resolved to an absolute URL against the page URL, or
// against <base href> when the document declares one.
// =============================================================================

use scraper::{Html, Selector};
use url::Url;

/// Absolute URLs found on one page, grouped by element kind.
/// Each group keeps document order.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct PageLinks {
    pub anchors: Vec<Url>,
    pub scripts: Vec<Url>,
    pub forms: Vec<Url>,
}

impl PageLinks {
    /// All URLs in recording order: anchors, then scripts, then forms.
    pub fn in_recording_order(&self) -> impl Iterator<Item = &Url> {
        self.anchors
            .iter()
            .chain(self.scripts.iter())
            .chain(self.forms.iter())
    }
}

// Selectors are hard-coded, so a parse failure is a programmer error.
fn selector(css: &'static str) -> Selector {
    Selector::parse(css).expect("hard-coded CSS selector is valid")
}

/// Extracts anchors, script sources and form actions from HTML content.
///
/// Example:
///   html = "<a href='/docs'>Docs</a><script src='app.js'></script>"
///   page_url = "https://example.com/"
///   anchors = ["https://example.com/docs"], scripts = ["https://example.com/app.js"]
pub fn extract_links(html: &str, page_url: &Url) -> PageLinks {
    let document = Html::parse_document(html);

    let base = document
        .select(&selector("base[href]"))
        .next()
        .and_then(|element| element.value().attr("href"))
        .and_then(|href| page_url.join(href.trim()).ok())
        .unwrap_or_else(|| page_url.clone());

    let collect = |css: &'static str, attr: &str| -> Vec<Url> {
        document
            .select(&selector(css))
            .filter_map(|element| element.value().attr(attr))
            .filter_map(|value| resolve_url(&base, value))
            .collect()
    };

    PageLinks {
        anchors: collect("a[href]", "href"),
        scripts: collect("script[src]", "src"),
        forms: collect("form[action]", "action"),
    }
}

/// Resolves a possibly-relative reference to an absolute URL.
///
/// Returns None for fragment-only references ("#top") and for anything
/// the url crate cannot resolve. The fragment is dropped from the result.
pub fn resolve_url(base: &Url, reference: &str) -> Option<Url> {
    let reference = reference.trim();

    if reference.starts_with('#') {
        return None;
    }

    let mut absolute = base.join(reference).ok()?;
    absolute.set_fragment(None);
    Some(absolute)
}
