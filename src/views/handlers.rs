use axum::{
    extract::{Query, State},
    http::Uri,
    response::{Html, IntoResponse, Response},
};
use tracing::instrument;

use crate::{
    issues::dto::ListQuery,
    session::extractors::Session,
    state::AppState,
    views::{
        render,
        router::{current_page, PageContext},
    },
};

/// Every GET that is not bound elsewhere is a page load.
#[instrument(skip(state, session, query), fields(path = %uri.path()))]
pub async fn show_page(
    State(state): State<AppState>,
    uri: Uri,
    session: Session,
    Query(query): Query<ListQuery>,
) -> Response {
    let path = uri.path();
    let user = session.context.user();
    let ctx = PageContext {
        path,
        session: &session.context,
        issues: &state.issues,
        query: &query,
        config: &state.config,
    };
    match state.views.dispatch_identifier(current_page(path), &ctx) {
        Some(Ok(page)) => Html(page).into_response(),
        Some(Err(err)) => err.page_for(user),
        None => Html(render::layout("CivicTrack", user, None, None, "")).into_response(),
    }
}
