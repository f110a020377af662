//! The public client: cache-checked profile operations.
//!
//! Every operation looks in its entity cache space first. On a miss it
//! fetches (through the pagination engine for publication lists, or a single
//! page otherwise), parses, stores the value and returns it. Nothing is stored
//! when an operation fails or its future is dropped before completion.

use std::sync::Arc;
use url::Url;

use crate::config::Config;
use crate::fetch::{CookieJar, Endpoints, HttpPageFetcher, PageFetcher, ScholarError};
use crate::models::{
    Article, AuthorMetrics, CitationMetrics, CoAuthor, EntityKind, FetchQuantity, Profile,
    Publication, SortCriterion,
};
use crate::pagination::PaginationEngine;
use crate::parser;
use crate::utils::{publication_key, CacheStats, EntityCache};

/// Client for scholar profile pages
#[derive(Debug, Clone)]
pub struct ScholarClient {
    fetcher: Arc<dyn PageFetcher>,
    endpoints: Endpoints,
    engine: PaginationEngine,
    cache: Arc<EntityCache>,
    cookies: CookieJar,
}

impl ScholarClient {
    /// Create a client fetching over HTTP as configured
    pub fn new(config: &Config) -> Result<Self, ScholarError> {
        let fetcher = HttpPageFetcher::from_config(config)?;
        Self::with_fetcher(Arc::new(fetcher), config)
    }

    /// Create a client using `fetcher` for every page request
    pub fn with_fetcher(fetcher: Arc<dyn PageFetcher>, config: &Config) -> Result<Self, ScholarError> {
        let endpoints = Endpoints::new(&config.base_url)?;
        let cookies = config.cookies.iter().collect::<CookieJar>();

        Ok(Self {
            engine: PaginationEngine::new(Arc::clone(&fetcher), endpoints.clone()),
            fetcher,
            endpoints,
            cache: Arc::new(EntityCache::from_config(&config.cache)),
            cookies,
        })
    }

    /// Replace the entity cache, e.g. to share one across clients
    pub fn with_cache(mut self, cache: Arc<EntityCache>) -> Self {
        self.cache = cache;
        self
    }

    pub fn cache(&self) -> &EntityCache {
        &self.cache
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    /// List an author's publications, deduplicated and sorted
    pub async fn publications(
        &self,
        author_id: &str,
        quantity: FetchQuantity,
        sort: SortCriterion,
    ) -> Result<Vec<Publication>, ScholarError> {
        let author_id = validate_author(author_id)?;
        let key = publication_key(author_id, quantity, sort);
        if let Some(publications) = self.cache.publications.get(&key) {
            return Ok(publications);
        }

        let harvest = self
            .engine
            .harvest(author_id, quantity, sort, self.cookies.clone())
            .await?;

        self.cache.publications.put(key, harvest.publications.clone());
        Ok(harvest.publications)
    }

    /// Citation total and publication count over the author's complete list
    pub async fn author_metrics(&self, author_id: &str) -> Result<AuthorMetrics, ScholarError> {
        let author_id = validate_author(author_id)?;
        if let Some(metrics) = self.cache.author_metrics.get(author_id) {
            return Ok(metrics);
        }

        let publications = self
            .publications(author_id, FetchQuantity::All, SortCriterion::CitedBy)
            .await?;
        let metrics = AuthorMetrics::from_publications(author_id, &publications);

        self.cache.author_metrics.put(author_id, metrics.clone());
        Ok(metrics)
    }

    /// Lifetime citations, h-index and i10-index from the profile summary
    pub async fn citation_metrics(&self, author_id: &str) -> Result<CitationMetrics, ScholarError> {
        let author_id = validate_author(author_id)?;
        if let Some(metrics) = self.cache.citation_metrics.get(author_id) {
            return Ok(metrics);
        }

        let html = self.profile_page(author_id, EntityKind::CitationMetrics).await?;
        let metrics = parser::parse_citation_metrics(&html, author_id)?;

        self.cache.citation_metrics.put(author_id, metrics.clone());
        Ok(metrics)
    }

    /// Co-authors listed in the profile sidebar
    pub async fn co_authors(&self, author_id: &str) -> Result<Vec<CoAuthor>, ScholarError> {
        let author_id = validate_author(author_id)?;
        if let Some(co_authors) = self.cache.co_authors.get(author_id) {
            return Ok(co_authors);
        }

        let html = self.profile_page(author_id, EntityKind::CoAuthors).await?;
        let co_authors = parser::parse_co_authors(&html, self.endpoints.base())?;

        self.cache.co_authors.put(author_id, co_authors.clone());
        Ok(co_authors)
    }

    /// Name, affiliation, picture and interests of an author
    pub async fn profile(&self, author_id: &str) -> Result<Profile, ScholarError> {
        let author_id = validate_author(author_id)?;
        if let Some(profile) = self.cache.profiles.get(author_id) {
            return Ok(profile);
        }

        let html = self.profile_page(author_id, EntityKind::Profile).await?;
        let profile = parser::parse_profile(&html, author_id, self.endpoints.base())?;

        self.cache.profiles.put(author_id, profile.clone());
        Ok(profile)
    }

    /// Details of one article, by its absolute detail link
    pub async fn article(&self, link: &str) -> Result<Article, ScholarError> {
        let url = Url::parse(link.trim()).map_err(|e| {
            ScholarError::InvalidRequest(format!("article link must be an absolute URL: {}", e))
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ScholarError::InvalidRequest(format!(
                "article link must be http or https: {}",
                link
            )));
        }

        let key = url.to_string();
        if let Some(article) = self.cache.articles.get(&key) {
            return Ok(article);
        }

        let page = self
            .fetcher
            .fetch(&url, &self.cookies)
            .await
            .map_err(|e| e.at_page(EntityKind::Article, 0))?;
        let article = parser::parse_article(&page.body)?;

        self.cache.articles.put(key, article.clone());
        Ok(article)
    }

    /// Details of the article behind a listed publication
    pub async fn article_for(&self, publication: &Publication) -> Result<Article, ScholarError> {
        self.article(&publication.link).await
    }

    async fn profile_page(&self, author_id: &str, kind: EntityKind) -> Result<String, ScholarError> {
        let url = self.endpoints.profile_url(author_id)?;
        let page = self
            .fetcher
            .fetch(&url, &self.cookies)
            .await
            .map_err(|e| e.at_page(kind, 0))?;
        Ok(page.body)
    }
}

fn validate_author(author_id: &str) -> Result<&str, ScholarError> {
    let author_id = author_id.trim();
    if author_id.is_empty() {
        return Err(ScholarError::InvalidRequest(
            "author id must not be empty".to_string(),
        ));
    }
    Ok(author_id)
}
