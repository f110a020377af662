//! Article detail pages.

use scraper::Html;

use super::{element_text, first_text, selector};
use crate::fetch::ScholarError;
use crate::models::Article;

/// Parse an article detail page.
///
/// The title is required; every other field defaults to empty, and the
/// citation total to `"0"`.
pub fn parse_article(html: &str) -> Result<Article, ScholarError> {
    let document = Html::parse_document(html);
    let root = document.root_element();

    let title_sel = selector("#gsc_oci_title")?;
    let row_sel = selector(".gs_scl")?;
    let field_sel = selector(".gsc_oci_field")?;
    let value_sel = selector(".gsc_oci_value")?;
    let cited_sel = selector("a")?;

    let title = root
        .select(&title_sel)
        .next()
        .map(|e| element_text(&e))
        .filter(|t| !t.is_empty())
        .ok_or_else(|| ScholarError::Parse("article title not found".to_string()))?;

    let mut article = Article {
        title,
        total_citations: "0".to_string(),
        ..Article::default()
    };

    for row in root.select(&row_sel) {
        let field = first_text(&row, &field_sel);
        let Some(value) = row.select(&value_sel).next() else {
            continue;
        };

        match field.to_lowercase().as_str() {
            "authors" | "inventors" => article.authors = element_text(&value),
            "publication date" => article.publication_date = element_text(&value),
            "journal" | "conference" | "book" | "source" => {
                if article.publication.is_empty() {
                    article.publication = element_text(&value);
                }
            }
            "description" => article.description = element_text(&value),
            "total citations" => {
                let cited = first_text(&value, &cited_sel);
                let digits: String = cited.chars().filter(|c| c.is_ascii_digit()).collect();
                if !digits.is_empty() {
                    article.total_citations = digits;
                }
            }
            _ => {}
        }
    }

    Ok(article)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ARTICLE: &str = r#"
    <html><body>
    <div id="gsc_oci_title"><a class="gsc_oci_title_link" href="https://example.org/p.pdf">The Art of Programming</a></div>
    <div id="gsc_oci_table">
      <div class="gs_scl"><div class="gsc_oci_field">Authors</div><div class="gsc_oci_value">D Knuth, A Turing</div></div>
      <div class="gs_scl"><div class="gsc_oci_field">Publication date</div><div class="gsc_oci_value">1968/1/1</div></div>
      <div class="gs_scl"><div class="gsc_oci_field">Journal</div><div class="gsc_oci_value">Communications of the ACM</div></div>
      <div class="gs_scl"><div class="gsc_oci_field">Volume</div><div class="gsc_oci_value">11</div></div>
      <div class="gs_scl"><div class="gsc_oci_field">Description</div><div class="gsc_oci_value"><div class="gsh_csp">A   book about algorithms.</div></div></div>
      <div class="gs_scl"><div class="gsc_oci_field">Total citations</div><div class="gsc_oci_value"><div style="margin-bottom:1em"><a href="/scholar?cites=1">Cited by 4,321</a></div></div></div>
    </div>
    </body></html>
    "#;

    #[test]
    fn test_parse_article() {
        let article = parse_article(ARTICLE).unwrap();
        assert_eq!(article.title, "The Art of Programming");
        assert_eq!(article.authors, "D Knuth, A Turing");
        assert_eq!(article.publication_date, "1968/1/1");
        assert_eq!(article.publication, "Communications of the ACM");
        assert_eq!(article.description, "A book about algorithms.");
        assert_eq!(article.total_citations, "4321");
    }

    #[test]
    fn test_parse_article_defaults() {
        let article = parse_article(r#"<div id="gsc_oci_title">Lonely</div>"#).unwrap();
        assert_eq!(article.title, "Lonely");
        assert_eq!(article.authors, "");
        assert_eq!(article.total_citations, "0");
    }

    #[test]
    fn test_parse_article_without_title() {
        assert!(matches!(
            parse_article("<html><body>sorry</body></html>"),
            Err(ScholarError::Parse(_))
        ));
    }
}
