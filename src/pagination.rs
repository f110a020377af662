//! Paginated fetch-and-merge of an author's publication list.
//!
//! The engine walks the publication table page by page, [`PAGE_SIZE`] rows at
//! a time, dropping rows whose identity was already seen (the remote ordering
//! is not stable between requests, so adjacent pages can overlap). It stops
//! when the requested bound is reached or a short page signals the end of the
//! list, then stable-sorts the merged rows.
//!
//! Pages are requested strictly one after another: the next offset depends on
//! the previous page. Any failure aborts the whole fetch and is reported with
//! the offset of the failing page.

use std::collections::HashSet;
use std::sync::Arc;

use crate::fetch::{CookieJar, Endpoints, PageFetcher, ScholarError};
use crate::models::{EntityKind, FetchQuantity, Publication, SortCriterion};
use crate::parser::parse_publications;

/// Rows requested per page
pub const PAGE_SIZE: usize = 100;

/// Outcome of a complete paginated fetch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Harvest {
    /// Unique publications, sorted
    pub publications: Vec<Publication>,

    /// Cookie jar after the last page
    pub cookies: CookieJar,

    /// Number of page requests issued
    pub requests: usize,
}

/// Drives page fetches and merges their rows
#[derive(Debug, Clone)]
pub struct PaginationEngine {
    fetcher: Arc<dyn PageFetcher>,
    endpoints: Endpoints,
}

impl PaginationEngine {
    pub fn new(fetcher: Arc<dyn PageFetcher>, endpoints: Endpoints) -> Self {
        Self { fetcher, endpoints }
    }

    /// Fetch, deduplicate and sort the publications of `author_id`
    pub async fn fetch_all(
        &self,
        author_id: &str,
        quantity: FetchQuantity,
        sort: SortCriterion,
    ) -> Result<Vec<Publication>, ScholarError> {
        self.harvest(author_id, quantity, sort, CookieJar::new())
            .await
            .map(|harvest| harvest.publications)
    }

    /// Like [`fetch_all`](Self::fetch_all), starting from `cookies` and
    /// returning the jar as updated by every page response
    pub async fn harvest(
        &self,
        author_id: &str,
        quantity: FetchQuantity,
        sort: SortCriterion,
        cookies: CookieJar,
    ) -> Result<Harvest, ScholarError> {
        if author_id.trim().is_empty() {
            return Err(ScholarError::InvalidRequest(
                "author id must not be empty".to_string(),
            ));
        }

        let mut publications: Vec<Publication> = Vec::new();
        let mut seen: HashSet<String> = HashSet::new();
        let mut cookies = cookies;
        let mut offset = 0;
        let mut requests = 0;

        while !quantity.is_satisfied_by(publications.len()) {
            let url = self
                .endpoints
                .publications_url(author_id, offset, PAGE_SIZE, sort)
                .map_err(|e| e.at_page(EntityKind::Publications, offset))?;

            requests += 1;
            let page = self
                .fetcher
                .fetch(&url, &cookies)
                .await
                .map_err(|e| e.at_page(EntityKind::Publications, offset))?;
            cookies = page.cookies;

            let rows = parse_publications(&page.body, author_id, self.endpoints.base())
                .map_err(|e| e.at_page(EntityKind::Publications, offset))?;
            let row_count = rows.len();

            let before = publications.len();
            for publication in rows {
                if quantity.is_satisfied_by(publications.len()) {
                    break;
                }
                if seen.insert(publication.id.clone()) {
                    publications.push(publication);
                }
            }

            tracing::debug!(
                "{}: offset {} returned {} rows, {} new, {} total",
                author_id,
                offset,
                row_count,
                publications.len() - before,
                publications.len()
            );

            if row_count < PAGE_SIZE {
                break;
            }
            offset += PAGE_SIZE;
        }

        sort_publications(&mut publications, sort);

        tracing::info!(
            "Fetched {} publications for {} in {} requests",
            publications.len(),
            author_id,
            requests
        );

        Ok(Harvest {
            publications,
            cookies,
            requests,
        })
    }
}

/// Stable sort, descending by the criterion; ties keep their current order
pub fn sort_publications(publications: &mut [Publication], sort: SortCriterion) {
    match sort {
        SortCriterion::CitedBy => {
            publications.sort_by_key(|p| std::cmp::Reverse(p.citation_count()))
        }
        SortCriterion::Year => publications.sort_by_key(|p| std::cmp::Reverse(p.year_value())),
    }
}
