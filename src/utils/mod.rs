//! Utility modules supporting profile fetching.
//!
//! - [`EntityCache`]: bounded in-memory cache with one space per entity kind
//! - [`HttpClient`]: reqwest client with configured timeouts
//! - [`RetryConfig`] / [`with_retry`]: re-run a whole operation on transient errors
//!
//! # Retry with Backoff
//!
//! ```rust,no_run
//! use scholar_profile::utils::{with_retry, RetryConfig};
//! use scholar_profile::{Config, FetchQuantity, ScholarClient, SortCriterion};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let client = ScholarClient::new(&Config::default())?;
//! let publications = with_retry(RetryConfig::default().max_attempts(3), || {
//!     client.publications("JicYPdAAAAAJ", FetchQuantity::Limit(20), SortCriterion::CitedBy)
//! })
//! .await?;
//! # Ok(())
//! # }
//! ```

pub mod cache;
mod http;
mod retry;

pub use cache::{publication_key, CacheSpace, CacheStats, EntityCache};
pub use http::HttpClient;
pub use retry::{with_retry, RetryConfig};
