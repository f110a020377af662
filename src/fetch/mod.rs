//! Page fetching: the [`PageFetcher`] trait, its HTTP implementation and a test double.
//!
//! A fetcher issues exactly one GET per call and hands back the raw page text
//! together with the cookie jar as updated by the response. Callers thread the
//! returned jar into their next request; no cookie state is kept globally.
//!
//! - [`HttpPageFetcher`]: reqwest-backed fetcher with rotating user agents
//! - [`MockFetcher`]: canned responses keyed by URL, records every request
//! - [`Endpoints`]: builds profile and publication-page URLs

mod cookies;
mod endpoint;
mod http;
pub mod mock;

pub use cookies::CookieJar;
pub use endpoint::{Endpoints, DEFAULT_BASE_URL};
pub use http::{HttpPageFetcher, RequestHeaders};
pub use mock::MockFetcher;

use async_trait::async_trait;
use url::Url;

use crate::models::EntityKind;

/// A page returned by a fetcher
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedPage {
    /// Raw response body
    pub body: String,

    /// The request's cookie jar with any `Set-Cookie` values applied
    pub cookies: CookieJar,
}

/// Fetches one page per call.
///
/// Implementations must not retry; retry policy belongs to callers of the
/// public client operations.
#[async_trait]
pub trait PageFetcher: Send + Sync + std::fmt::Debug {
    /// GET `url`, sending `cookies`, and return the page body and updated jar
    async fn fetch(&self, url: &Url, cookies: &CookieJar) -> Result<FetchedPage, ScholarError>;
}

/// Errors that can occur while fetching or parsing profile data
#[derive(Debug, thiserror::Error)]
pub enum ScholarError {
    /// Malformed URL or parameters; a caller bug, never worth retrying
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Network, timeout or HTTP status failure
    #[error("Transport error: {0}")]
    Transport(String),

    /// The page did not have the expected structure
    #[error("Parse error: {0}")]
    Parse(String),

    /// A field the operation cannot do without is absent
    #[error("Not found: {0}")]
    NotFound(String),

    /// A lower-level failure while fetching one page of an entity
    #[error("{kind} page at offset {offset} failed: {source}")]
    Page {
        kind: EntityKind,
        offset: usize,
        #[source]
        source: Box<ScholarError>,
    },
}

impl ScholarError {
    /// Attach entity kind and pagination offset to an error
    pub fn at_page(self, kind: EntityKind, offset: usize) -> Self {
        ScholarError::Page {
            kind,
            offset,
            source: Box::new(self),
        }
    }

    /// The underlying error with any page context removed
    pub fn root(&self) -> &ScholarError {
        match self {
            ScholarError::Page { source, .. } => source.root(),
            other => other,
        }
    }

    /// Offset of the page that failed, if the error carries one
    pub fn offset(&self) -> Option<usize> {
        match self {
            ScholarError::Page { offset, .. } => Some(*offset),
            _ => None,
        }
    }

    /// Whether retrying the whole operation might succeed
    pub fn is_transient(&self) -> bool {
        matches!(self.root(), ScholarError::Transport(_))
    }
}

impl From<reqwest::Error> for ScholarError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_builder() {
            ScholarError::InvalidRequest(err.to_string())
        } else if err.is_timeout() {
            ScholarError::Transport(format!("request timed out: {}", err))
        } else {
            ScholarError::Transport(err.to_string())
        }
    }
}

impl From<url::ParseError> for ScholarError {
    fn from(err: url::ParseError) -> Self {
        ScholarError::InvalidRequest(format!("URL: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_context_preserves_root() {
        let err = ScholarError::Transport("connection reset".to_string())
            .at_page(EntityKind::Publications, 200);

        assert_eq!(err.offset(), Some(200));
        assert!(matches!(err.root(), ScholarError::Transport(_)));
        assert!(err.is_transient());
        assert_eq!(
            err.to_string(),
            "publications page at offset 200 failed: Transport error: connection reset"
        );
    }

    #[test]
    fn test_parse_errors_are_not_transient() {
        let err = ScholarError::Parse("missing table".to_string());
        assert!(!err.is_transient());
        assert_eq!(err.offset(), None);
    }
}
