use std::convert::Infallible;

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};

use crate::{cookies::CookieStore, session::services::SessionContext, state::AppState};

/// Restores the session from the request's cookies.
///
/// Never rejects: a missing or unreadable cookie yields an empty session.
pub struct Session {
    pub context: SessionContext,
    pub cookies: CookieStore,
}

#[async_trait]
impl FromRequestParts<AppState> for Session {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let cookies = CookieStore::from_headers(&parts.headers);
        let context = SessionContext::restore(&state.config.session, &cookies);
        Ok(Session { context, cookies })
    }
}
