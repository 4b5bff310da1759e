use serde::Serialize;
use tracing::debug;

use crate::issues::repo_types::Issue;

/// Case-insensitive substring match on title or description.
///
/// Returns the visible subset in listing order; the input is left untouched.
/// An empty term matches everything.
pub fn search<'a>(term: &str, issues: &'a [Issue]) -> Vec<&'a Issue> {
    let needle = term.to_lowercase();
    issues
        .iter()
        .filter(|i| {
            i.title.to_lowercase().contains(&needle)
                || i.description.to_lowercase().contains(&needle)
        })
        .collect()
}

/// Parses free-text distances such as `"2.8 km"`, `"3km"`, `"800 m"` or `"5"` into km.
pub fn parse_km(text: &str) -> Option<f64> {
    let t = text.trim().to_ascii_lowercase();
    let (num, per_km) = if let Some(n) = t.strip_suffix("km") {
        (n, 1.0)
    } else if let Some(n) = t.strip_suffix('m') {
        (n, 1000.0)
    } else {
        (t.as_str(), 1.0)
    };
    let km = num.trim().parse::<f64>().ok()? / per_km;
    (km.is_finite() && km >= 0.0).then_some(km)
}

/// Upper bound on an issue's distance, inclusive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DistanceBand {
    pub max_km: f64,
}

impl DistanceBand {
    /// Select values like `"1"`, `"3 km"`, `"within 5km"`. Blank or "all" means no band.
    pub fn parse(value: &str) -> Option<Self> {
        let v = value.trim();
        let lower = v.to_ascii_lowercase();
        if v.is_empty() || lower.starts_with("all") || lower == "any" {
            return None;
        }
        let v = lower.strip_prefix("within").unwrap_or(&lower);
        let band = parse_km(v).map(|max_km| Self { max_km });
        if band.is_none() {
            debug!(value, "ignoring unreadable distance band");
        }
        band
    }

    pub fn contains(&self, distance: &str) -> bool {
        parse_km(distance).is_some_and(|km| km <= self.max_km)
    }
}

/// Filter selections. All set criteria must hold for an issue to stay visible.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IssueFilter {
    pub category: Option<String>,
    pub status: Option<String>,
    pub distance: Option<DistanceBand>,
}

impl IssueFilter {
    pub fn from_selects(category: &str, status: &str, distance: &str) -> Self {
        Self {
            category: selection(category),
            status: selection(status),
            distance: DistanceBand::parse(distance),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.category.is_none() && self.status.is_none() && self.distance.is_none()
    }

    pub fn matches(&self, issue: &Issue) -> bool {
        let category_ok = self
            .category
            .as_deref()
            .map_or(true, |c| issue.category.eq_ignore_ascii_case(c));
        let status_ok = self
            .status
            .as_deref()
            .map_or(true, |s| issue.status.eq_ignore_ascii_case(s));
        let distance_ok = self.distance.map_or(true, |b| b.contains(&issue.distance));
        category_ok && status_ok && distance_ok
    }
}

// "All Categories" / "All Status" placeholders select nothing.
fn selection(value: &str) -> Option<String> {
    let v = value.trim();
    if v.is_empty() || v.to_ascii_lowercase().starts_with("all") {
        None
    } else {
        Some(v.to_string())
    }
}

pub fn filter<'a, I>(criteria: &IssueFilter, issues: I) -> Vec<&'a Issue>
where
    I: IntoIterator<Item = &'a Issue>,
{
    if !criteria.is_empty() {
        debug!(?criteria, "applying filters");
    }
    issues.into_iter().filter(|i| criteria.matches(i)).collect()
}

/// Issues reported under the given username.
pub fn my_issues<'a>(username: &str, issues: &'a [Issue]) -> Vec<&'a Issue> {
    issues.iter().filter(|i| i.reported_by == username).collect()
}

/// One page of a listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageSlice<T> {
    pub items: Vec<T>,
    pub current: usize,
    pub total_pages: usize,
    pub total: usize,
}

/// 1-based pagination. Out-of-range page numbers are clamped.
pub fn paginate<T: Clone>(items: &[T], page: usize, per_page: usize) -> PageSlice<T> {
    let per_page = per_page.max(1);
    let total = items.len();
    let total_pages = total.div_ceil(per_page).max(1);
    let current = page.clamp(1, total_pages);
    let start = (current - 1) * per_page;
    let end = (start + per_page).min(total);
    PageSlice {
        items: items.get(start..end).unwrap_or_default().to_vec(),
        current,
        total_pages,
        total,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::issues::repo::seed_issues;

    fn titles(found: &[&Issue]) -> Vec<String> {
        found.iter().map(|i| i.title.clone()).collect()
    }

    #[test]
    fn search_pothole_finds_exactly_one() {
        let issues = seed_issues();
        let found = search("pothole", &issues);
        assert_eq!(titles(&found), vec!["Pothole on main road"]);
    }

    #[test]
    fn search_is_case_insensitive_and_covers_description() {
        let issues = seed_issues();
        assert_eq!(titles(&search("STREET", &issues)), vec!["Streetlight not working"]);
        assert_eq!(titles(&search("last week", &issues)), vec!["Garbage not collected"]);
        assert_eq!(search("", &issues).len(), 3);
        assert!(search("flood", &issues).is_empty());
        assert_eq!(issues.len(), 3);
    }

    #[test]
    fn distance_parsing() {
        assert_eq!(parse_km("2.8 km"), Some(2.8));
        assert_eq!(parse_km("3km"), Some(3.0));
        assert_eq!(parse_km("800 m"), Some(0.8));
        assert_eq!(parse_km("5"), Some(5.0));
        assert_eq!(parse_km("near"), None);
        assert_eq!(parse_km("-1 km"), None);
    }

    #[test]
    fn band_bounds_are_inclusive() {
        let band = DistanceBand::parse("1.7 km").unwrap();
        assert!(band.contains("1.7 km"));
        assert!(band.contains("1.1 km"));
        assert!(!band.contains("2.8 km"));
        assert!(!band.contains("unknown"));
        assert_eq!(DistanceBand::parse("within 3km"), Some(DistanceBand { max_km: 3.0 }));
        assert_eq!(DistanceBand::parse("All Distances"), None);
        assert_eq!(DistanceBand::parse(""), None);
    }

    #[test]
    fn criteria_combine_with_and() {
        let issues = seed_issues();

        let f = IssueFilter::from_selects("Reported", "", "");
        assert!(f.category.is_some());
        assert!(filter(&f, &issues).is_empty());

        let f = IssueFilter::from_selects("All Categories", "reported", "");
        assert_eq!(filter(&f, &issues).len(), 2);

        let f = IssueFilter::from_selects("", "Reported", "2 km");
        assert_eq!(titles(&filter(&f, &issues)), vec!["Garbage not collected"]);

        let f = IssueFilter::from_selects("Roads", "In Progress", "1 km");
        assert!(filter(&f, &issues).is_empty());
    }

    #[test]
    fn empty_filter_keeps_everything() {
        let issues = seed_issues();
        let f = IssueFilter::from_selects("All Categories", "All Status", "All Distances");
        assert!(f.is_empty());
        assert_eq!(filter(&f, &issues).len(), 3);
    }

    #[test]
    fn filter_composes_with_search() {
        let issues = seed_issues();
        let f = IssueFilter::from_selects("Sanitation", "", "");
        assert!(filter(&f, search("pothole", &issues)).is_empty());
    }

    #[test]
    fn my_issues_match_reporter() {
        let issues = seed_issues();
        assert!(my_issues("alice", &issues).is_empty());
        assert_eq!(my_issues("Anonymous", &issues).len(), 3);
    }

    #[test]
    fn pagination_clamps_and_counts() {
        let items: Vec<u32> = (1..=7).collect();
        let p = paginate(&items, 2, 3);
        assert_eq!(p.items, vec![4, 5, 6]);
        assert_eq!(p.total_pages, 3);
        assert_eq!(p.total, 7);

        assert_eq!(paginate(&items, 9, 3).items, vec![7]);
        assert_eq!(paginate(&items, 0, 3).current, 1);

        let empty: Vec<u32> = Vec::new();
        let p = paginate(&empty, 1, 6);
        assert!(p.items.is_empty());
        assert_eq!(p.total_pages, 1);
    }
}
