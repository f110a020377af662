//! In-memory caching for fetched entities.
//!
//! Each entity kind lives in its own bounded LRU space, so the same literal
//! key stored as a publication list and as an article never collide.
//!
//! # Keys
//!
//! ```text
//! publications      "<author>|<quantity>|<sort>"   e.g. "JicYPdAAAAAJ|all|citedby"
//! author metrics    "<author>"
//! citation metrics  "<author>"
//! co-authors        "<author>"
//! profiles          "<author>"
//! articles          "<article link>"
//! ```
//!
//! Entries never expire; the least recently used entry is evicted once a
//! space reaches its capacity. Values are stored whole and replaced whole,
//! so a reader sees either the old or the new value.

use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::Mutex;

use crate::config::CacheConfig;
use crate::models::{
    Article, AuthorMetrics, CitationMetrics, CoAuthor, EntityKind, FetchQuantity, Profile,
    Publication, SortCriterion,
};

/// Cache key for a publication list
pub fn publication_key(author_id: &str, quantity: FetchQuantity, sort: SortCriterion) -> String {
    format!("{}|{}|{}", author_id, quantity, sort)
}

/// A bounded, internally synchronized key-value space
#[derive(Debug)]
pub struct CacheSpace<V> {
    kind: EntityKind,
    entries: Option<Mutex<LruCache<String, V>>>,
}

impl<V: Clone> CacheSpace<V> {
    /// Create a space holding at most `capacity` entries; zero disables it
    pub fn new(kind: EntityKind, capacity: usize) -> Self {
        Self {
            kind,
            entries: NonZeroUsize::new(capacity).map(|cap| Mutex::new(LruCache::new(cap))),
        }
    }

    /// A space that never stores anything
    pub fn disabled(kind: EntityKind) -> Self {
        Self {
            kind,
            entries: None,
        }
    }

    /// Look up `key`, marking it as recently used
    pub fn get(&self, key: &str) -> Option<V> {
        let entries = self.entries.as_ref()?;
        let mut guard = entries.lock().unwrap_or_else(|e| e.into_inner());
        match guard.get(key) {
            Some(value) => {
                tracing::debug!("Cache HIT for {}: {}", self.kind, key);
                Some(value.clone())
            }
            None => {
                tracing::debug!("Cache MISS for {}: {}", self.kind, key);
                None
            }
        }
    }

    /// Store `value` under `key`, replacing any previous value
    pub fn put(&self, key: impl Into<String>, value: V) {
        let Some(entries) = self.entries.as_ref() else {
            return;
        };
        let key = key.into();
        let mut guard = entries.lock().unwrap_or_else(|e| e.into_inner());
        if let Some((evicted, _)) = guard.push(key.clone(), value) {
            if evicted != key {
                tracing::debug!("Cache evicted {}: {}", self.kind, evicted);
            }
        }
        tracing::debug!("Cached {}: {}", self.kind, key);
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.as_ref().is_some_and(|entries| {
            entries
                .lock()
                .unwrap_or_else(|e| e.into_inner())
                .contains(key)
        })
    }

    pub fn len(&self) -> usize {
        self.entries
            .as_ref()
            .map_or(0, |entries| entries.lock().unwrap_or_else(|e| e.into_inner()).len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Maximum number of entries; 0 when disabled
    pub fn capacity(&self) -> usize {
        self.entries.as_ref().map_or(0, |entries| {
            entries
                .lock()
                .unwrap_or_else(|e| e.into_inner())
                .cap()
                .get()
        })
    }

    pub fn clear(&self) {
        if let Some(entries) = self.entries.as_ref() {
            entries.lock().unwrap_or_else(|e| e.into_inner()).clear();
        }
    }
}

/// One cache space per entity kind
#[derive(Debug)]
pub struct EntityCache {
    pub publications: CacheSpace<Vec<Publication>>,
    pub author_metrics: CacheSpace<AuthorMetrics>,
    pub citation_metrics: CacheSpace<CitationMetrics>,
    pub co_authors: CacheSpace<Vec<CoAuthor>>,
    pub articles: CacheSpace<Article>,
    pub profiles: CacheSpace<Profile>,
    enabled: bool,
}

impl EntityCache {
    /// Create every space with the same capacity
    pub fn new(capacity: usize) -> Self {
        Self {
            publications: CacheSpace::new(EntityKind::Publications, capacity),
            author_metrics: CacheSpace::new(EntityKind::AuthorMetrics, capacity),
            citation_metrics: CacheSpace::new(EntityKind::CitationMetrics, capacity),
            co_authors: CacheSpace::new(EntityKind::CoAuthors, capacity),
            articles: CacheSpace::new(EntityKind::Article, capacity),
            profiles: CacheSpace::new(EntityKind::Profile, capacity),
            enabled: capacity > 0,
        }
    }

    /// A cache that always misses
    pub fn disabled() -> Self {
        Self {
            publications: CacheSpace::disabled(EntityKind::Publications),
            author_metrics: CacheSpace::disabled(EntityKind::AuthorMetrics),
            citation_metrics: CacheSpace::disabled(EntityKind::CitationMetrics),
            co_authors: CacheSpace::disabled(EntityKind::CoAuthors),
            articles: CacheSpace::disabled(EntityKind::Article),
            profiles: CacheSpace::disabled(EntityKind::Profile),
            enabled: false,
        }
    }

    pub fn from_config(config: &CacheConfig) -> Self {
        if config.enabled {
            Self::new(config.capacity)
        } else {
            tracing::debug!("Cache is disabled");
            Self::disabled()
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Empty every space
    pub fn clear(&self) {
        self.publications.clear();
        self.author_metrics.clear();
        self.citation_metrics.clear();
        self.co_authors.clear();
        self.articles.clear();
        self.profiles.clear();
        tracing::info!("Cache cleared");
    }

    /// Get cache statistics
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            enabled: self.enabled,
            publications: self.publications.len(),
            author_metrics: self.author_metrics.len(),
            citation_metrics: self.citation_metrics.len(),
            co_authors: self.co_authors.len(),
            articles: self.articles.len(),
            profiles: self.profiles.len(),
        }
    }
}

impl Default for EntityCache {
    fn default() -> Self {
        Self::from_config(&CacheConfig::default())
    }
}

/// Number of entries held per space
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub enabled: bool,
    pub publications: usize,
    pub author_metrics: usize,
    pub citation_metrics: usize,
    pub co_authors: usize,
    pub articles: usize,
    pub profiles: usize,
}

impl CacheStats {
    pub fn total(&self) -> usize {
        self.publications
            + self.author_metrics
            + self.citation_metrics
            + self.co_authors
            + self.articles
            + self.profiles
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PublicationBuilder;
    use std::sync::Arc;

    fn article(title: &str) -> Article {
        Article {
            title: title.to_string(),
            ..Article::default()
        }
    }

    #[test]
    fn test_publication_key_covers_all_parameters() {
        assert_eq!(
            publication_key("X", FetchQuantity::All, SortCriterion::CitedBy),
            "X|all|citedby"
        );
        assert_ne!(
            publication_key("X", FetchQuantity::Limit(10), SortCriterion::CitedBy),
            publication_key("X", FetchQuantity::Limit(10), SortCriterion::Year)
        );
        assert_ne!(
            publication_key("X", FetchQuantity::Limit(10), SortCriterion::Year),
            publication_key("X", FetchQuantity::All, SortCriterion::Year)
        );
    }

    #[test]
    fn test_get_and_put() {
        let space = CacheSpace::new(EntityKind::Article, 4);
        assert!(space.get("a").is_none());

        space.put("a", article("first"));
        assert_eq!(space.get("a").unwrap().title, "first");

        space.put("a", article("second"));
        assert_eq!(space.get("a").unwrap().title, "second");
        assert_eq!(space.len(), 1);
    }

    #[test]
    fn test_capacity_bound_evicts_least_recently_used() {
        let space = CacheSpace::new(EntityKind::Article, 2);
        space.put("a", article("a"));
        space.put("b", article("b"));
        // touch "a" so "b" becomes the eviction candidate
        assert!(space.get("a").is_some());
        space.put("c", article("c"));

        assert_eq!(space.len(), 2);
        assert_eq!(space.capacity(), 2);
        assert!(space.contains("a"));
        assert!(!space.contains("b"));
        assert!(space.contains("c"));
    }

    #[test]
    fn test_spaces_are_isolated() {
        let cache = EntityCache::new(8);
        let key = "https://example.com/shared";

        cache.publications.put(
            key,
            vec![PublicationBuilder::new("p1", "X", "Paper", key).build()],
        );

        assert!(cache.articles.get(key).is_none());
        assert!(cache.profiles.get(key).is_none());
        assert_eq!(cache.publications.get(key).unwrap().len(), 1);
    }

    #[test]
    fn test_disabled_cache_never_stores() {
        let cache = EntityCache::from_config(&CacheConfig {
            enabled: false,
            capacity: 10,
        });
        cache.articles.put("a", article("a"));

        assert!(!cache.is_enabled());
        assert!(cache.articles.get("a").is_none());
        assert_eq!(cache.stats().total(), 0);

        let zero = CacheSpace::<Article>::new(EntityKind::Article, 0);
        zero.put("a", article("a"));
        assert!(zero.is_empty());
    }

    #[test]
    fn test_stats_and_clear() {
        let cache = EntityCache::new(8);
        cache.articles.put("a", article("a"));
        cache.co_authors.put("X", Vec::new());

        let stats = cache.stats();
        assert!(stats.enabled);
        assert_eq!(stats.articles, 1);
        assert_eq!(stats.co_authors, 1);
        assert_eq!(stats.total(), 2);

        cache.clear();
        assert_eq!(cache.stats().total(), 0);
    }

    #[test]
    fn test_concurrent_writers_leave_whole_values() {
        let space = Arc::new(CacheSpace::new(EntityKind::Publications, 16));

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let space = Arc::clone(&space);
                std::thread::spawn(move || {
                    let list: Vec<Publication> = (0..50)
                        .map(|j| {
                            PublicationBuilder::new(format!("{}-{}", i, j), "X", "t", "l").build()
                        })
                        .collect();
                    space.put("X|all|citedby", list);
                    space.get("X|all|citedby").map(|v| v.len())
                })
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap(), Some(50));
        }

        let stored = space.get("X|all|citedby").unwrap();
        let prefix = stored[0].id.split('-').next().unwrap().to_string();
        assert!(stored.iter().all(|p| p.id.starts_with(&format!("{}-", prefix))));
    }
}
