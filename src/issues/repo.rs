use crate::issues::repo_types::Issue;

#[allow(clippy::too_many_arguments)]
fn issue(
    id: u32,
    title: &str,
    description: &str,
    category: &str,
    status: &str,
    location: &str,
    distance: &str,
    image: &str,
) -> Issue {
    Issue {
        id,
        title: title.into(),
        description: description.into(),
        category: category.into(),
        status: status.into(),
        location: location.into(),
        distance: distance.into(),
        reported_by: "Anonymous".into(),
        reported_at: "Jun 02, 2025 - 10:34 AM".into(),
        image: image.into(),
    }
}

/// The mock listing shown on every page.
pub fn seed_issues() -> Vec<Issue> {
    vec![
        issue(
            1,
            "Streetlight not working",
            "Street light not working since last 2 days",
            "Infrastructure",
            "Reported",
            "via bridge ahmedabad-gujarat",
            "2.8 km",
            "streetlight.jpg",
        ),
        issue(
            2,
            "Pothole on main road",
            "Big pothole created a big road obstruction. It should be filled with cement and sand",
            "Roads",
            "In Progress",
            "CG road, ahmedabad-gujarat",
            "1.1 km",
            "pothole.jpg",
        ),
        issue(
            3,
            "Garbage not collected",
            "Garbage is not collected since last week and very difficult to leave here",
            "Sanitation",
            "Reported",
            "SV society, ahmedabad-gujarat",
            "1.7 km",
            "garbage.jpg",
        ),
    ]
}

impl Issue {
    pub fn find_by_id(issues: &[Issue], id: u32) -> Option<&Issue> {
        issues.iter().find(|i| i.id == id)
    }

    pub fn find_by_title<'a>(issues: &'a [Issue], title: &str) -> Option<&'a Issue> {
        issues.iter().find(|i| i.title.eq_ignore_ascii_case(title.trim()))
    }

    /// Resolves an `id` query value: a numeric id, else an issue title.
    pub fn find_by_key<'a>(issues: &'a [Issue], key: &str) -> Option<&'a Issue> {
        match key.trim().parse::<u32>() {
            Ok(id) => Self::find_by_id(issues, id),
            Err(_) => Self::find_by_title(issues, key),
        }
    }
}
