//! Author-level records: profile identity, co-authors and metrics.

use serde::{Deserialize, Serialize};

/// Fields shared by a profile and a co-author entry
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorInfo {
    /// Profile identifier (the `user` query parameter)
    pub id: String,

    /// Display name
    pub name: String,

    /// Affiliation line
    pub affiliation: String,

    /// Absolute URL of the profile picture
    pub picture_url: String,
}

/// A scholar profile as shown at the top of the profile page
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    #[serde(flatten)]
    pub info: AuthorInfo,

    /// Research interests listed under the name
    #[serde(default)]
    pub interests: Vec<String>,
}

/// An entry of the co-author sidebar of a profile page
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoAuthor {
    #[serde(flatten)]
    pub info: AuthorInfo,
}

/// Citation totals computed over an author's returned publications
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorMetrics {
    pub author_id: String,

    /// Sum of the normalized citation counts of every publication
    pub total_citations: u64,

    /// Number of publications returned
    pub publication_count: usize,
}

impl AuthorMetrics {
    /// Derive metrics from a publication list
    pub fn from_publications(
        author_id: impl Into<String>,
        publications: &[super::Publication],
    ) -> Self {
        let total_citations = publications
            .iter()
            .map(|p| p.citation_count())
            .fold(0u64, |acc, n| acc.saturating_add(n));

        Self {
            author_id: author_id.into(),
            total_citations,
            publication_count: publications.len(),
        }
    }
}

/// Lifetime metrics from the profile's summary table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CitationMetrics {
    pub author_id: String,
    pub cited_by: u64,
    pub h_index: u64,
    pub i10_index: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PublicationBuilder;

    #[test]
    fn test_author_metrics_from_publications() {
        let publications = vec![
            PublicationBuilder::new("a", "X", "A", "l").citations("10").build(),
            PublicationBuilder::new("b", "X", "B", "l").citations("").build(),
            PublicationBuilder::new("c", "X", "C", "l").citations("1,5").build(),
        ];

        let metrics = AuthorMetrics::from_publications("X", &publications);
        assert_eq!(metrics.author_id, "X");
        assert_eq!(metrics.total_citations, 25);
        assert_eq!(metrics.publication_count, 3);
    }

    #[test]
    fn test_profile_serializes_flat() {
        let profile = Profile {
            info: AuthorInfo {
                id: "X".to_string(),
                name: "Ada".to_string(),
                affiliation: "Analytical Engines".to_string(),
                picture_url: String::new(),
            },
            interests: vec!["Computing".to_string()],
        };

        let value = serde_json::to_value(&profile).unwrap();
        assert_eq!(value["name"], "Ada");
        assert_eq!(value["interests"][0], "Computing");
    }
}
