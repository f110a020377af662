//! Query parameters controlling a publication fetch.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How many publications to fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FetchQuantity {
    /// Every publication on the profile
    #[default]
    All,
    /// At most this many publications
    Limit(usize),
}

impl FetchQuantity {
    /// Whether `count` publications satisfy this quantity
    pub fn is_satisfied_by(&self, count: usize) -> bool {
        matches!(self, FetchQuantity::Limit(n) if count >= *n)
    }
}

impl From<Option<usize>> for FetchQuantity {
    fn from(max: Option<usize>) -> Self {
        max.map_or(FetchQuantity::All, FetchQuantity::Limit)
    }
}

impl fmt::Display for FetchQuantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchQuantity::All => write!(f, "all"),
            FetchQuantity::Limit(n) => write!(f, "{}", n),
        }
    }
}

/// Ordering applied to the merged publication list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortCriterion {
    /// Citation count, descending
    #[default]
    CitedBy,
    /// Publication year, descending
    Year,
}

impl SortCriterion {
    /// Value of the `sortby` query parameter
    pub fn query_value(&self) -> &'static str {
        match self {
            SortCriterion::CitedBy => "citedby",
            SortCriterion::Year => "pubdate",
        }
    }
}

impl fmt::Display for SortCriterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortCriterion::CitedBy => write!(f, "citedby"),
            SortCriterion::Year => write!(f, "year"),
        }
    }
}

impl FromStr for SortCriterion {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "citedby" | "cited" | "citations" => Ok(SortCriterion::CitedBy),
            "year" | "pubdate" => Ok(SortCriterion::Year),
            other => Err(format!("unknown sort criterion: {}", other)),
        }
    }
}

/// The kinds of entity the client fetches, used for cache spaces and error context
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Publications,
    AuthorMetrics,
    CitationMetrics,
    CoAuthors,
    Article,
    Profile,
}

impl EntityKind {
    pub fn name(&self) -> &'static str {
        match self {
            EntityKind::Publications => "publications",
            EntityKind::AuthorMetrics => "author metrics",
            EntityKind::CitationMetrics => "citation metrics",
            EntityKind::CoAuthors => "co-authors",
            EntityKind::Article => "article",
            EntityKind::Profile => "profile",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_quantity_display() {
        assert_eq!(FetchQuantity::All.to_string(), "all");
        assert_eq!(FetchQuantity::Limit(25).to_string(), "25");
    }

    #[test]
    fn test_fetch_quantity_bound() {
        assert!(!FetchQuantity::All.is_satisfied_by(usize::MAX));
        assert!(FetchQuantity::Limit(0).is_satisfied_by(0));
        assert!(!FetchQuantity::Limit(3).is_satisfied_by(2));
        assert_eq!(FetchQuantity::from(Some(5)), FetchQuantity::Limit(5));
        assert_eq!(FetchQuantity::from(None), FetchQuantity::All);
    }

    #[test]
    fn test_sort_criterion_parse() {
        assert_eq!("year".parse::<SortCriterion>(), Ok(SortCriterion::Year));
        assert_eq!("CitedBy".parse::<SortCriterion>(), Ok(SortCriterion::CitedBy));
        assert!("title".parse::<SortCriterion>().is_err());
        assert_eq!(SortCriterion::default(), SortCriterion::CitedBy);
        assert_eq!(SortCriterion::Year.query_value(), "pubdate");
    }
}
