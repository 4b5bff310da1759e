use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use thiserror::Error;

use crate::{
    session::repo_types::User,
    views::{notify::Notification, render},
};

/// Form input the session rejected. Shown to the user, never fatal.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please fill in all fields")]
    MissingFields,

    #[error("Please enter a valid email address")]
    InvalidEmail,
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Issue not found: {0}")]
    IssueNotFound(String),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::IssueNotFound(_) => StatusCode::NOT_FOUND,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Error page with the signed-in user, if any, kept in the header.
    pub fn page_for(self, user: Option<&User>) -> Response {
        if let AppError::Internal(ref e) = self {
            tracing::error!(error = %e, "request failed");
        }
        let notice = Notification::error(self.to_string());
        let body = render::layout("CivicTrack", user, Some(&notice), None, "");
        (self.status(), Html(body)).into_response()
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        self.page_for(None)
    }
}
