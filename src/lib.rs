//! # Scholar Profile
//!
//! Fetch an academic profile's publication list, citation metrics, co-authors
//! and per-article details from public scholar profile pages.
//!
//! ## Architecture
//!
//! - [`fetch`]: the [`PageFetcher`] trait, HTTP and mock fetchers, URLs, cookies
//! - [`parser`]: HTML to typed records, one pure function per page kind
//! - [`pagination`]: paginated fetch-and-merge with deduplication and sorting
//! - [`client`]: [`ScholarClient`], the cache-checked public operations
//! - [`models`]: Publication, Article, Profile and friends
//! - [`utils`]: entity cache, HTTP client, retry helper
//! - [`config`]: Configuration management
//!
//! ## Usage
//!
//! ```rust,no_run
//! use scholar_profile::{Config, FetchQuantity, ScholarClient, SortCriterion};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), scholar_profile::ScholarError> {
//! let client = ScholarClient::new(&Config::default())?;
//! let publications = client
//!     .publications("JicYPdAAAAAJ", FetchQuantity::Limit(10), SortCriterion::Year)
//!     .await?;
//! for publication in &publications {
//!     println!("{} ({}) cited by {}", publication.title, publication.year, publication.citations);
//! }
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod fetch;
pub mod models;
pub mod pagination;
pub mod parser;
pub mod utils;

// Re-export commonly used types
pub use client::ScholarClient;
pub use config::Config;
pub use fetch::{PageFetcher, ScholarError};
pub use models::{FetchQuantity, Publication, SortCriterion};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
