//! Core data models for scholar profiles, publications and query parameters.

mod article;
mod author;
mod publication;
mod query;

pub use article::Article;
pub use author::{AuthorInfo, AuthorMetrics, CitationMetrics, CoAuthor, Profile};
pub use publication::{numeric_prefix, Publication, PublicationBuilder};
pub use query::{EntityKind, FetchQuantity, SortCriterion};
