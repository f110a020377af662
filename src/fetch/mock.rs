//! Mock fetcher for testing purposes.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;
use url::Url;

use super::{CookieJar, FetchedPage, PageFetcher, ScholarError};
use crate::models::{Publication, PublicationBuilder};

#[derive(Debug, Clone)]
enum MockResponse {
    Body(String),
    Transport(String),
}

/// A fetcher that serves predefined pages keyed by full URL.
///
/// Unknown URLs fail with a transport error. Every requested URL is recorded
/// in order, including failed ones.
#[derive(Debug, Default)]
pub struct MockFetcher {
    responses: Mutex<HashMap<String, MockResponse>>,
    requests: Mutex<Vec<String>>,
    set_cookies: Mutex<Vec<String>>,
    delay: Mutex<Option<Duration>>,
}

impl MockFetcher {
    /// Create a new mock fetcher.
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `body` for `url`.
    pub fn set_page(&self, url: &Url, body: impl Into<String>) {
        let mut guard = self.responses.lock().unwrap();
        guard.insert(url.to_string(), MockResponse::Body(body.into()));
    }

    /// Fail requests for `url` with a transport error.
    pub fn set_failure(&self, url: &Url, message: impl Into<String>) {
        let mut guard = self.responses.lock().unwrap();
        guard.insert(url.to_string(), MockResponse::Transport(message.into()));
    }

    /// Answer every request with this `Set-Cookie` value.
    pub fn add_set_cookie(&self, header: impl Into<String>) {
        self.set_cookies.lock().unwrap().push(header.into());
    }

    /// Sleep before answering each request.
    pub fn set_delay(&self, delay: Duration) {
        *self.delay.lock().unwrap() = Some(delay);
    }

    /// URLs requested so far, in order.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    /// Number of requests issued so far.
    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl PageFetcher for MockFetcher {
    async fn fetch(&self, url: &Url, cookies: &CookieJar) -> Result<FetchedPage, ScholarError> {
        self.requests.lock().unwrap().push(url.to_string());

        let delay = *self.delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        let response = self.responses.lock().unwrap().get(url.as_str()).cloned();
        match response {
            Some(MockResponse::Body(body)) => {
                let set_cookies = self.set_cookies.lock().unwrap().clone();
                Ok(FetchedPage {
                    body,
                    cookies: cookies
                        .clone()
                        .updated(set_cookies.iter().map(String::as_str)),
                })
            }
            Some(MockResponse::Transport(message)) => Err(ScholarError::Transport(message)),
            None => Err(ScholarError::Transport(format!(
                "no mock response for {}",
                url
            ))),
        }
    }
}

/// Helper to create a publication with the given identity and counts.
pub fn make_publication(author_id: &str, id: &str, year: &str, citations: &str) -> Publication {
    PublicationBuilder::new(
        id,
        author_id,
        format!("Paper {}", id),
        format!(
            "https://scholar.google.com/citations?view_op=view_citation&hl=en&user={}&citation_for_view={}:{}",
            author_id, author_id, id
        ),
    )
    .year(year)
    .citations(citations)
    .build()
}

/// Render publications as a publication-table page.
pub fn publications_page(publications: &[Publication]) -> String {
    let rows: String = publications
        .iter()
        .map(|p| {
            format!(
                r##"<tr class="gsc_a_tr"><td class="gsc_a_t"><a href="/citations?view_op=view_citation&amp;hl=en&amp;user={author}&amp;citation_for_view={author}:{id}" class="gsc_a_at">{title}</a></td><td class="gsc_a_c"><a href="#" class="gsc_a_ac gs_ibl">{citations}</a></td><td class="gsc_a_y"><span class="gsc_a_h gsc_a_hc gs_ibl">{year}</span></td></tr>"##,
                author = p.author_id,
                id = p.id,
                title = p.title,
                citations = p.citations,
                year = p.year,
            )
        })
        .collect();

    format!(
        r#"<html><body><table id="gsc_a_t"><tbody id="gsc_a_b">{}</tbody></table></body></html>"#,
        rows
    )
}
