use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use tracing::{instrument, warn};

use crate::{
    error::AppError,
    issues::{
        dto::{IssueListResponse, ListQuery},
        repo_types::Issue,
    },
    state::AppState,
};

pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/api/issues", get(list_issues))
        .route("/api/issues/:id", get(get_issue))
}

#[instrument(skip(state))]
pub async fn list_issues(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Json<IssueListResponse> {
    let slice = query.apply(&state.issues, state.config.issues_per_page);
    Json(slice.into())
}

#[instrument(skip(state))]
pub async fn get_issue(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<Issue>, AppError> {
    match Issue::find_by_key(&state.issues, &key) {
        Some(issue) => Ok(Json(issue.clone())),
        None => {
            warn!(%key, "issue not found");
            Err(AppError::IssueNotFound(key))
        }
    }
}
