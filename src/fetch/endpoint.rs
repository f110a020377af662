//! URLs of the profile endpoint.

use url::Url;

use super::ScholarError;
use crate::models::SortCriterion;

/// Default host serving profile pages
pub const DEFAULT_BASE_URL: &str = "https://scholar.google.com";

/// Builds request URLs against a base host
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    base: Url,
}

impl Endpoints {
    /// Create endpoints for `base_url`, which must be an absolute http(s) URL.
    ///
    /// A path in `base_url` is kept as a prefix, so `http://host/proxy` serves
    /// profile pages from `http://host/proxy/citations`.
    pub fn new(base_url: &str) -> Result<Self, ScholarError> {
        let mut base = Url::parse(base_url)?;
        if !matches!(base.scheme(), "http" | "https") {
            return Err(ScholarError::InvalidRequest(format!(
                "base URL must be http or https: {}",
                base_url
            )));
        }
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        base.set_query(None);
        base.set_fragment(None);
        Ok(Self { base })
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    /// The profile page of `author_id`
    pub fn profile_url(&self, author_id: &str) -> Result<Url, ScholarError> {
        let mut url = self.citations_url()?;
        url.query_pairs_mut()
            .append_pair("user", author_id)
            .append_pair("hl", "en");
        Ok(url)
    }

    /// One page of `author_id`'s publication table
    pub fn publications_url(
        &self,
        author_id: &str,
        offset: usize,
        page_size: usize,
        sort: SortCriterion,
    ) -> Result<Url, ScholarError> {
        let mut url = self.citations_url()?;
        url.query_pairs_mut()
            .append_pair("user", author_id)
            .append_pair("hl", "en")
            .append_pair("cstart", &offset.to_string())
            .append_pair("pagesize", &page_size.to_string())
            .append_pair("sortby", sort.query_value())
            .append_pair("view_op", "list_works");
        Ok(url)
    }

    fn citations_url(&self) -> Result<Url, ScholarError> {
        Ok(self.base.join("citations")?)
    }
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            base: Url::parse(DEFAULT_BASE_URL).expect("default base URL is valid"),
        }
    }
}
