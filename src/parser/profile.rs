//! The header, summary table and co-author sidebar of a profile page.

use scraper::{ElementRef, Html};
use url::Url;

use super::{element_text, first_text, selector, user_param};
use crate::fetch::ScholarError;
use crate::models::{AuthorInfo, CitationMetrics, CoAuthor, Profile};

fn absolute(base: &Url, src: &str) -> String {
    if src.is_empty() {
        return String::new();
    }
    base.join(src)
        .map(|u| u.to_string())
        .unwrap_or_else(|_| src.to_string())
}

fn image_src(elem: &ElementRef) -> Option<String> {
    let value = elem.value();
    value
        .attr("data-src")
        .or_else(|| value.attr("src"))
        .map(|s| s.to_string())
}

/// Parse the identity block at the top of a profile page
pub fn parse_profile(html: &str, author_id: &str, base: &Url) -> Result<Profile, ScholarError> {
    let document = Html::parse_document(html);
    let root = document.root_element();

    let name_sel = selector("#gsc_prf_in")?;
    let affiliation_sel = selector(".gsc_prf_il")?;
    let picture_sel = selector("#gsc_prf_pup-img")?;
    let interest_sel = selector("#gsc_prf_int a")?;

    let name = root
        .select(&name_sel)
        .next()
        .map(|e| element_text(&e))
        .filter(|name| !name.is_empty())
        .ok_or_else(|| ScholarError::Parse(format!("profile name not found for {}", author_id)))?;

    let picture_url = root
        .select(&picture_sel)
        .next()
        .and_then(|img| image_src(&img))
        .map(|src| absolute(base, &src))
        .unwrap_or_default();

    let interests = root
        .select(&interest_sel)
        .map(|a| element_text(&a))
        .filter(|s| !s.is_empty())
        .collect();

    Ok(Profile {
        info: AuthorInfo {
            id: author_id.to_string(),
            name,
            affiliation: first_text(&root, &affiliation_sel),
            picture_url,
        },
        interests,
    })
}

/// Parse the lifetime column of the "Cited by" summary table.
///
/// The table holds six cells: all-time and recent values for citations,
/// h-index and i10-index. Missing cells mean the profile hides its metrics,
/// reported as [`ScholarError::NotFound`].
pub fn parse_citation_metrics(html: &str, author_id: &str) -> Result<CitationMetrics, ScholarError> {
    let document = Html::parse_document(html);
    let cell_sel = selector("#gsc_rsb_st td.gsc_rsb_std")?;

    let cells: Vec<String> = document
        .select(&cell_sel)
        .map(|cell| element_text(&cell))
        .collect();

    if cells.len() < 6 {
        return Err(ScholarError::NotFound(format!(
            "citation summary for {} (found {} of 6 cells)",
            author_id,
            cells.len()
        )));
    }

    let number = |index: usize| -> Result<u64, ScholarError> {
        let digits: String = cells[index].chars().filter(|c| c.is_ascii_digit()).collect();
        digits.parse().map_err(|_| {
            ScholarError::Parse(format!(
                "citation summary cell {} is not a number: {:?}",
                index, cells[index]
            ))
        })
    };

    Ok(CitationMetrics {
        author_id: author_id.to_string(),
        cited_by: number(0)?,
        h_index: number(2)?,
        i10_index: number(4)?,
    })
}

/// Parse the co-author sidebar; a profile without co-authors yields an empty list
pub fn parse_co_authors(html: &str, base: &Url) -> Result<Vec<CoAuthor>, ScholarError> {
    let document = Html::parse_document(html);

    let entry_sel = selector(".gsc_rsb_aa")?;
    let link_sel = selector(".gsc_rsb_a_desc a")?;
    let affiliation_sel = selector(".gsc_rsb_a_ext")?;
    let img_sel = selector("img")?;

    let mut co_authors = Vec::new();
    for entry in document.select(&entry_sel) {
        let Some(link) = entry.select(&link_sel).next() else {
            tracing::warn!("Skipping co-author entry without a profile link");
            continue;
        };

        let id = link
            .value()
            .attr("href")
            .and_then(user_param)
            .unwrap_or_default();

        let picture_url = entry
            .select(&img_sel)
            .next()
            .and_then(|img| image_src(&img))
            .map(|src| absolute(base, &src))
            .unwrap_or_default();

        co_authors.push(CoAuthor {
            info: AuthorInfo {
                id,
                name: element_text(&link),
                affiliation: first_text(&entry, &affiliation_sel),
                picture_url,
            },
        });
    }

    Ok(co_authors)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PROFILE: &str = r##"
    <html><body>
    <div id="gsc_prf">
      <img id="gsc_prf_pup-img" src="/citations/images/avatar_scholar_128.png">
      <div id="gsc_prf_i">
        <div id="gsc_prf_in">Grace  Hopper</div>
        <div class="gsc_prf_il">Yale University</div>
        <div class="gsc_prf_il" id="gsc_prf_ivh">Verified email at yale.edu</div>
        <div class="gsc_prf_il" id="gsc_prf_int">
          <a href="#" class="gsc_prf_inta">Compilers</a>
          <a href="#" class="gsc_prf_inta">COBOL</a>
        </div>
      </div>
    </div>
    <table id="gsc_rsb_st">
      <tr><th></th><th>All</th><th>Since 2019</th></tr>
      <tr><td>Citations</td><td class="gsc_rsb_std">12,345</td><td class="gsc_rsb_std">2,000</td></tr>
      <tr><td>h-index</td><td class="gsc_rsb_std">42</td><td class="gsc_rsb_std">20</td></tr>
      <tr><td>i10-index</td><td class="gsc_rsb_std">87</td><td class="gsc_rsb_std">30</td></tr>
    </table>
    <ul class="gsc_rsb_a">
      <li>
        <div class="gsc_rsb_aa">
          <img src="https://scholar.googleusercontent.com/citations?view_op=small_photo&amp;user=CO1">
          <span class="gsc_rsb_a_desc">
            <a href="/citations?user=CO1&amp;hl=en">Howard Aiken</a>
            <span class="gsc_rsb_a_ext">Harvard University</span>
          </span>
        </div>
      </li>
      <li>
        <div class="gsc_rsb_aa">
          <span class="gsc_rsb_a_desc">
            <a href="/citations?user=CO2&amp;hl=en">Jean Sammet</a>
          </span>
        </div>
      </li>
    </ul>
    </body></html>
    "##;

    fn base() -> Url {
        Url::parse("https://scholar.google.com").unwrap()
    }

    #[test]
    fn test_parse_profile() {
        let profile = parse_profile(PROFILE, "GH", &base()).unwrap();
        assert_eq!(profile.info.id, "GH");
        assert_eq!(profile.info.name, "Grace Hopper");
        assert_eq!(profile.info.affiliation, "Yale University");
        assert_eq!(
            profile.info.picture_url,
            "https://scholar.google.com/citations/images/avatar_scholar_128.png"
        );
        assert_eq!(profile.interests, vec!["Compilers", "COBOL"]);
    }

    #[test]
    fn test_parse_profile_without_name() {
        assert!(matches!(
            parse_profile("<html></html>", "GH", &base()),
            Err(ScholarError::Parse(_))
        ));
    }

    #[test]
    fn test_parse_citation_metrics() {
        let metrics = parse_citation_metrics(PROFILE, "GH").unwrap();
        assert_eq!(metrics.author_id, "GH");
        assert_eq!(metrics.cited_by, 12345);
        assert_eq!(metrics.h_index, 42);
        assert_eq!(metrics.i10_index, 87);
    }

    #[test]
    fn test_missing_metrics_is_not_found() {
        let html = r#"<table id="gsc_rsb_st"><tr><td class="gsc_rsb_std">5</td></tr></table>"#;
        assert!(matches!(
            parse_citation_metrics(html, "GH"),
            Err(ScholarError::NotFound(_))
        ));
    }

    #[test]
    fn test_parse_co_authors() {
        let co_authors = parse_co_authors(PROFILE, &base()).unwrap();
        assert_eq!(co_authors.len(), 2);

        assert_eq!(co_authors[0].info.id, "CO1");
        assert_eq!(co_authors[0].info.name, "Howard Aiken");
        assert_eq!(co_authors[0].info.affiliation, "Harvard University");
        assert_eq!(
            co_authors[0].info.picture_url,
            "https://scholar.googleusercontent.com/citations?view_op=small_photo&user=CO1"
        );

        assert_eq!(co_authors[1].info.id, "CO2");
        assert_eq!(co_authors[1].info.affiliation, "");
        assert_eq!(co_authors[1].info.picture_url, "");
    }

    #[test]
    fn test_no_co_authors() {
        assert!(parse_co_authors("<html></html>", &base()).unwrap().is_empty());
    }
}
