//! Markup helpers shared by the per-site extractors.
//!
//! Sites are matched by "structural signatures": a tag name plus a set of
//! classes that must all be present. Signatures are compared against the
//! element's class list rather than compiled into CSS, since several of the
//! sites use atomic class names such as `Bdc($seperatorColor)`.

use super::provider::ScrapeError;
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};

/// Placeholder the statistics source prints for a missing ratio.
pub const MISSING_VALUE_MARKER: &str = "--";

pub(crate) static TR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("tr").expect("static selector `tr` is valid"));
pub(crate) static TD: Lazy<Selector> =
    Lazy::new(|| Selector::parse("td").expect("static selector `td` is valid"));

/// A tag name plus the classes an element must carry to match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassSignature {
    pub tag: &'static str,
    pub classes: &'static [&'static str],
}

impl ClassSignature {
    pub const fn new(tag: &'static str, classes: &'static [&'static str]) -> Self {
        Self { tag, classes }
    }

    pub fn matches(&self, element: &ElementRef<'_>) -> bool {
        let el = element.value();
        el.name().eq_ignore_ascii_case(self.tag)
            && self
                .classes
                .iter()
                .all(|wanted| el.classes().any(|c| c == *wanted))
    }

    /// All matching descendants of `root`, in document order.
    pub fn select_in<'a>(self, root: ElementRef<'a>) -> impl Iterator<Item = ElementRef<'a>> + 'a {
        root.descendants()
            .filter_map(ElementRef::wrap)
            .filter(move |e| self.matches(e))
    }

    /// All matching elements of a document, in document order.
    pub fn select_all<'a>(self, doc: &'a Html) -> impl Iterator<Item = ElementRef<'a>> + 'a {
        self.select_in(doc.root_element())
    }

    /// First matching descendant of `root`.
    pub fn first_in<'a>(self, root: ElementRef<'a>) -> Option<ElementRef<'a>> {
        self.select_in(root).next()
    }

    /// Human-readable form for diagnostics, e.g. `div.key-stat`.
    pub fn describe(&self) -> String {
        if self.classes.is_empty() {
            self.tag.to_string()
        } else {
            format!("{}.{}", self.tag, self.classes.join("."))
        }
    }
}

/// Concatenated text of an element and its descendants, untrimmed.
pub fn element_text(element: &ElementRef<'_>) -> String {
    element.text().collect()
}

/// Concatenated, trimmed text of an element.
pub fn trimmed_text(element: &ElementRef<'_>) -> String {
    element_text(element).trim().to_string()
}

/// All text of a document.
pub fn page_text(doc: &Html) -> String {
    doc.root_element().text().collect()
}

/// Next sibling element with the given tag name.
pub fn next_sibling_tag<'a>(element: ElementRef<'a>, tag: &str) -> Option<ElementRef<'a>> {
    element
        .next_siblings()
        .filter_map(ElementRef::wrap)
        .find(|s| s.value().name().eq_ignore_ascii_case(tag))
}

/// Find the first `tag` element whose text is exactly `label` and return the
/// trimmed text of the next `tag` sibling.
pub fn labeled_sibling_text(doc: &Html, tag: &str, label: &str) -> Option<String> {
    let label_el = doc
        .root_element()
        .descendants()
        .filter_map(ElementRef::wrap)
        .find(|e| e.value().name().eq_ignore_ascii_case(tag) && element_text(e) == label)?;
    next_sibling_tag(label_el, tag).map(|s| trimmed_text(&s))
}

/// Parse a displayed number: trims, strips thousands separators.
pub fn parse_number(field: &str, raw: &str) -> Result<f64, ScrapeError> {
    let cleaned: String = raw.trim().chars().filter(|c| *c != ',').collect();
    cleaned.parse::<f64>().map_err(|_| ScrapeError::FormatError {
        field: field.to_string(),
        value: raw.to_string(),
    })
}

/// Parse a number that may be the `--` placeholder.
///
/// `Ok(None)` for the placeholder, `Err` when the text is not a number.
pub fn parse_optional_number(field: &str, raw: &str) -> Result<Option<f64>, ScrapeError> {
    if raw.trim() == MISSING_VALUE_MARKER {
        return Ok(None);
    }
    parse_number(field, raw).map(Some)
}
