//! reqwest-backed [`PageFetcher`].

use async_trait::async_trait;
use reqwest::header::{COOKIE, REFERER, SET_COOKIE, USER_AGENT};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use url::Url;

use super::{CookieJar, FetchedPage, PageFetcher, ScholarError};
use crate::config::Config;
use crate::utils::HttpClient;

/// Headers attached to every request
#[derive(Debug)]
pub struct RequestHeaders {
    user_agents: Vec<String>,
    referer: String,
    extra: Vec<(String, String)>,
    next_agent: AtomicUsize,
}

impl RequestHeaders {
    pub fn new(user_agents: Vec<String>, referer: impl Into<String>) -> Self {
        Self {
            user_agents,
            referer: referer.into(),
            extra: Vec::new(),
            next_agent: AtomicUsize::new(0),
        }
    }

    /// Add a fixed header sent with every request
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra.push((name.into(), value.into()));
        self
    }

    /// Next user agent of the pool, round-robin; `None` for an empty pool
    pub fn next_user_agent(&self) -> Option<&str> {
        if self.user_agents.is_empty() {
            return None;
        }
        let index = self.next_agent.fetch_add(1, Ordering::Relaxed) % self.user_agents.len();
        Some(&self.user_agents[index])
    }

    pub fn referer(&self) -> &str {
        &self.referer
    }

    pub fn extra(&self) -> &[(String, String)] {
        &self.extra
    }
}

impl From<&Config> for RequestHeaders {
    fn from(config: &Config) -> Self {
        config
            .extra_headers
            .iter()
            .fold(
                RequestHeaders::new(config.user_agents.clone(), config.referer.clone()),
                |headers, (name, value)| headers.with_header(name.clone(), value.clone()),
            )
    }
}

/// Fetches pages over HTTP
#[derive(Debug, Clone)]
pub struct HttpPageFetcher {
    client: Arc<HttpClient>,
    headers: Arc<RequestHeaders>,
}

impl HttpPageFetcher {
    pub fn new(client: HttpClient, headers: RequestHeaders) -> Self {
        Self {
            client: Arc::new(client),
            headers: Arc::new(headers),
        }
    }

    /// Build a fetcher with the timeouts and headers of `config`
    pub fn from_config(config: &Config) -> Result<Self, ScholarError> {
        let client = HttpClient::from_config(config)?;
        Ok(Self::new(client, RequestHeaders::from(config)))
    }
}

#[async_trait]
impl PageFetcher for HttpPageFetcher {
    async fn fetch(&self, url: &Url, cookies: &CookieJar) -> Result<FetchedPage, ScholarError> {
        let mut request = self
            .client
            .client()
            .get(url.clone())
            .header(REFERER, self.headers.referer());

        if let Some(agent) = self.headers.next_user_agent() {
            request = request.header(USER_AGENT, agent);
        }
        for (name, value) in self.headers.extra() {
            request = request.header(name.as_str(), value.as_str());
        }
        if let Some(cookie) = cookies.header_value() {
            request = request.header(COOKIE, cookie);
        }

        tracing::debug!("GET {}", url);

        let response = request.send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScholarError::Transport(format!(
                "{} returned status: {}",
                url, status
            )));
        }

        let cookies = cookies.clone().updated(
            response
                .headers()
                .get_all(SET_COOKIE)
                .iter()
                .filter_map(|value| value.to_str().ok()),
        );

        let body = response
            .text()
            .await
            .map_err(|e| ScholarError::Transport(format!("Failed to read response: {}", e)))?;

        Ok(FetchedPage { body, cookies })
    }
}
