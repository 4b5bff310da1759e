use serde::Serialize;

/// Reported civic problem. Read-only: nothing creates, edits or removes one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Issue {
    pub id: u32,
    pub title: String,
    pub description: String,
    pub category: String,
    pub status: String,
    pub location: String,
    pub distance: String,    // free text, e.g. "2.8 km"
    pub reported_by: String,
    pub reported_at: String, // free text, e.g. "Jun 02, 2025 - 10:34 AM"
    pub image: String,       // file name under /images
}
