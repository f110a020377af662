//! Article model for a publication's detail page.

use serde::{Deserialize, Serialize};

/// Extended metadata of one publication
///
/// Every field is the text shown on the page; missing fields are empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    pub title: String,

    /// Author list as displayed (comma-separated)
    pub authors: String,

    pub publication_date: String,

    /// Journal, conference, book or source
    pub publication: String,

    pub description: String,

    /// Total citation count, "0" when the page shows none
    pub total_citations: String,
}
