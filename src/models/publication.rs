//! Publication model representing one row of a profile's publication table.

use serde::{Deserialize, Serialize};

/// A publication listed on an author's profile page
///
/// Citation count and year are kept as the text the page displayed. Use
/// [`Publication::citation_count`] and [`Publication::year_value`] for
/// numeric comparisons.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Publication {
    /// Identity token taken from the publication's detail link
    pub id: String,

    /// Profile identifier of the author whose list this row came from
    pub author_id: String,

    /// Publication title
    pub title: String,

    /// Publication year (may be empty)
    pub year: String,

    /// Absolute URL of the article detail page
    pub link: String,

    /// Citation count as displayed (may be empty or non-numeric)
    pub citations: String,
}

impl Publication {
    /// Create a new publication with required fields
    pub fn new(id: String, author_id: String, title: String, link: String) -> Self {
        Self {
            id,
            author_id,
            title,
            year: String::new(),
            link,
            citations: String::new(),
        }
    }

    /// Citation count with every non-digit character dropped; 0 when nothing is left
    pub fn citation_count(&self) -> u64 {
        numeric_prefix(&self.citations)
    }

    /// Year as an integer; 0 when empty or not a number
    pub fn year_value(&self) -> i64 {
        self.year.trim().parse().unwrap_or(0)
    }
}

/// Keep only the ASCII digits of `text` and parse them.
///
/// `"1,234"` becomes 1234, `"*56"` becomes 56 and `""` becomes 0. Values that
/// overflow saturate at `u64::MAX`.
pub fn numeric_prefix(text: &str) -> u64 {
    let digits: String = text.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return 0;
    }
    digits.parse().unwrap_or(u64::MAX)
}

/// Builder for constructing Publication objects
#[derive(Debug, Clone)]
pub struct PublicationBuilder {
    publication: Publication,
}

impl PublicationBuilder {
    /// Create a new builder with required fields
    pub fn new(
        id: impl Into<String>,
        author_id: impl Into<String>,
        title: impl Into<String>,
        link: impl Into<String>,
    ) -> Self {
        Self {
            publication: Publication::new(id.into(), author_id.into(), title.into(), link.into()),
        }
    }

    /// Set publication year
    pub fn year(mut self, year: impl Into<String>) -> Self {
        self.publication.year = year.into();
        self
    }

    /// Set citation count text
    pub fn citations(mut self, citations: impl Into<String>) -> Self {
        self.publication.citations = citations.into();
        self
    }

    /// Build the Publication
    pub fn build(self) -> Publication {
        self.publication
    }
}
