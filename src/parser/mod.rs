//! HTML parsing of profile, publication and article pages.
//!
//! Every function here is a pure function of the page text. Optional text
//! fields default to empty (citation counts to `"0"`); structural elements the
//! page cannot do without produce [`ScholarError::Parse`].

mod article;
mod profile;
mod publications;

pub use article::parse_article;
pub use profile::{parse_citation_metrics, parse_co_authors, parse_profile};
pub use publications::{identity_token, parse_publications};

use scraper::{ElementRef, Selector};

use crate::fetch::ScholarError;

fn selector(css: &str) -> Result<Selector, ScholarError> {
    Selector::parse(css).map_err(|e| ScholarError::Parse(format!("invalid selector {}: {:?}", css, e)))
}

/// Whitespace-normalized text content of an element
fn element_text(elem: &ElementRef) -> String {
    elem.text()
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Text of the first match of `css` under `elem`, empty when absent
fn first_text(elem: &ElementRef, css: &Selector) -> String {
    elem.select(css)
        .next()
        .map(|e| element_text(&e))
        .unwrap_or_default()
}

/// The value of the `user` query parameter of a (possibly relative) link
fn user_param(href: &str) -> Option<String> {
    let (_, query) = href.split_once('?')?;
    url::form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == "user")
        .map(|(_, value)| value.into_owned())
}
