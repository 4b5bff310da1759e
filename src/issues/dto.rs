use serde::{Deserialize, Deserializer, Serialize};

use crate::issues::{
    repo_types::Issue,
    services::{filter, paginate, search, IssueFilter, PageSlice},
};

/// Listing controls: search input, the three filter selects and the page number.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListQuery {
    #[serde(default)]
    pub q: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub distance: String,
    #[serde(default = "default_page", deserialize_with = "lenient_page")]
    pub page: usize,
    /// Issue-detail selector: numeric id or title.
    #[serde(default)]
    pub id: Option<String>,
}

fn default_page() -> usize {
    1
}

// Page numbers come from hand-edited URLs too; never reject the request over one.
fn lenient_page<'de, D: Deserializer<'de>>(deserializer: D) -> Result<usize, D::Error> {
    let raw = String::deserialize(deserializer)?;
    Ok(parse_page(&raw))
}

/// Digits saturate (and are clamped later by [`paginate`]); anything else is page 1.
pub fn parse_page(raw: &str) -> usize {
    let raw = raw.trim();
    match raw.parse::<usize>() {
        Ok(n) => n,
        Err(_) if !raw.is_empty() && raw.bytes().all(|b| b.is_ascii_digit()) => usize::MAX,
        Err(_) => default_page(),
    }
}

impl ListQuery {
    pub fn filter(&self) -> IssueFilter {
        IssueFilter::from_selects(&self.category, &self.status, &self.distance)
    }

    /// Search, then filter, then paginate.
    pub fn apply<'a>(&self, issues: &'a [Issue], per_page: usize) -> PageSlice<&'a Issue> {
        let visible = filter(&self.filter(), search(&self.q, issues));
        paginate(&visible, self.page, per_page)
    }
}

#[derive(Debug, Serialize)]
pub struct IssueListResponse {
    pub items: Vec<Issue>,
    pub page: usize,
    pub total_pages: usize,
    pub total: usize,
}

impl From<PageSlice<&Issue>> for IssueListResponse {
    fn from(slice: PageSlice<&Issue>) -> Self {
        Self {
            items: slice.items.into_iter().cloned().collect(),
            page: slice.current,
            total_pages: slice.total_pages,
            total: slice.total,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::issues::repo::seed_issues;
    use axum::{extract::Query, http::Uri};

    fn query(uri: &str) -> ListQuery {
        let uri: Uri = uri.parse().unwrap();
        Query::<ListQuery>::try_from_uri(&uri).expect("query").0
    }

    #[test]
    fn page_values() {
        assert_eq!(parse_page("2"), 2);
        assert_eq!(parse_page(" 3 "), 3);
        assert_eq!(parse_page("0"), 0);
        assert_eq!(parse_page("-1"), 1);
        assert_eq!(parse_page(""), 1);
        assert_eq!(parse_page("abc"), 1);
        assert_eq!(parse_page("99999999999999999999999"), usize::MAX);
    }

    #[test]
    fn odd_page_parameters_still_deserialize() {
        assert_eq!(query("/index.html").page, 1);
        assert_eq!(query("/index.html?page=-1").page, 1);
        assert_eq!(query("/index.html?page=").page, 1);
        assert_eq!(query("/index.html?page=abc&q=pothole").q, "pothole");
    }

    #[test]
    fn out_of_range_pages_clamp_to_the_last_one() {
        let issues = seed_issues();
        let slice = query("/index.html?page=99999999999999999999999").apply(&issues, 2);
        assert_eq!(slice.current, 2);
        assert_eq!(slice.items.len(), 1);

        let slice = query("/index.html?page=-1").apply(&issues, 2);
        assert_eq!(slice.current, 1);
        assert_eq!(slice.items.len(), 2);
    }
}
