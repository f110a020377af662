//! Rows of the publication table.

use scraper::Html;
use url::Url;

use super::{element_text, first_text, selector};
use crate::fetch::ScholarError;
use crate::models::{Publication, PublicationBuilder};

/// Extract the identity token from a publication detail link.
///
/// Detail links carry `citation_for_view=<author>:<token>`; the token is the
/// part after the last `:`.
pub fn identity_token(href: &str) -> Option<String> {
    let (_, query) = href.split_once('?')?;
    let view = url::form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == "citation_for_view")
        .map(|(_, value)| value.into_owned())?;

    let token = view.rsplit(':').next().unwrap_or_default().trim();
    if token.is_empty() {
        None
    } else {
        Some(token.to_string())
    }
}

/// Parse one page of an author's publication table.
///
/// Returns rows in page order. An empty table, or one holding only the
/// "no articles" placeholder row, yields an empty list; a page without the
/// table body, or a row without a usable detail link, is a parse error.
pub fn parse_publications(
    html: &str,
    author_id: &str,
    base: &Url,
) -> Result<Vec<Publication>, ScholarError> {
    let document = Html::parse_document(html);

    let table_sel = selector("#gsc_a_b")?;
    let row_sel = selector("tr.gsc_a_tr")?;
    let title_sel = selector("a.gsc_a_at")?;
    let year_sel = selector("td.gsc_a_y span")?;
    let cites_sel = selector("td.gsc_a_c a.gsc_a_ac")?;
    let placeholder_sel = selector("td.gsc_a_e")?;

    let table = document
        .select(&table_sel)
        .next()
        .ok_or_else(|| ScholarError::Parse("publication table not found".to_string()))?;

    let mut publications = Vec::new();
    for (index, row) in table.select(&row_sel).enumerate() {
        if row.select(&placeholder_sel).next().is_some() {
            continue;
        }

        let title_elem = row.select(&title_sel).next().ok_or_else(|| {
            ScholarError::Parse(format!("publication row {} has no title link", index))
        })?;

        let href = title_elem
            .value()
            .attr("href")
            .or_else(|| title_elem.value().attr("data-href"))
            .ok_or_else(|| {
                ScholarError::Parse(format!("publication row {} has no detail link", index))
            })?;

        let id = identity_token(href).ok_or_else(|| {
            ScholarError::Parse(format!(
                "publication row {} link has no identity token: {}",
                index, href
            ))
        })?;

        let link = base
            .join(href)
            .map_err(|e| ScholarError::Parse(format!("bad detail link {}: {}", href, e)))?;

        let citations = first_text(&row, &cites_sel);
        let citations = if citations.is_empty() {
            "0".to_string()
        } else {
            citations
        };

        publications.push(
            PublicationBuilder::new(id, author_id, element_text(&title_elem), link.to_string())
                .year(first_text(&row, &year_sel))
                .citations(citations)
                .build(),
        );
    }

    tracing::debug!("Parsed {} publication rows for {}", publications.len(), author_id);
    Ok(publications)
}
