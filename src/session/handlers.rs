use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Form, Router,
};
use tracing::{info, instrument, warn};

use crate::{
    cookies::CookieStore,
    error::AppError,
    session::{
        dto::{LoginForm, LogoutForm, RegisterForm},
        extractors::Session,
        repo_types::User,
    },
    state::AppState,
    views::{
        notify::{Notification, Redirect},
        render,
    },
};

pub fn session_routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(login))
        .route("/register", post(register))
        .route("/logout", get(logout_prompt).post(logout))
}

fn with_cookies(status: StatusCode, cookies: &CookieStore, html: String) -> Response {
    let mut headers = HeaderMap::new();
    cookies.write_to(&mut headers);
    (status, headers, Html(html)).into_response()
}

/// Success notice plus the delayed hop to the dashboard.
fn welcome(state: &AppState, title: &str, user: &User, message: &str, body: &str) -> String {
    let notice = Notification::success(message).dismiss_after(state.config.notification_duration());
    let redirect = Redirect::new("/dashboard.html", state.config.redirect_delay());
    render::layout(title, Some(user), Some(&notice), Some(&redirect), body)
}

fn rejected(state: &AppState, title: &str, err: &AppError, body: &str) -> Response {
    let notice = Notification::error(err.to_string())
        .dismiss_after(state.config.notification_duration());
    let html = render::layout(title, None, Some(&notice), None, body);
    (StatusCode::BAD_REQUEST, Html(html)).into_response()
}

#[instrument(skip_all)]
pub async fn login(
    State(state): State<AppState>,
    Session { mut context, mut cookies }: Session,
    Form(form): Form<LoginForm>,
) -> Response {
    match context.login(&mut cookies, &form.username, &form.password) {
        Ok(user) => {
            info!(user_id = %user.id, "login successful");
            let html = welcome(&state, "Login", &user, "Login successful!", &render::login_form(""));
            with_cookies(StatusCode::OK, &cookies, html)
        }
        Err(err @ AppError::Validation(_)) => {
            warn!(error = %err, "login rejected");
            rejected(&state, "Login", &err, &render::login_form(&form.username))
        }
        Err(err) => err.into_response(),
    }
}

#[instrument(skip_all)]
pub async fn register(
    State(state): State<AppState>,
    Session { mut context, mut cookies }: Session,
    Form(form): Form<RegisterForm>,
) -> Response {
    match context.register(&mut cookies, &form) {
        Ok(user) => {
            info!(user_id = %user.id, email = %user.email, "user registered");
            let body = render::register_form("", "", "");
            let html = welcome(&state, "Register", &user, "Registration successful!", &body);
            with_cookies(StatusCode::OK, &cookies, html)
        }
        Err(err @ AppError::Validation(_)) => {
            warn!(error = %err, "registration rejected");
            let body = render::register_form(&form.username, &form.email, &form.phone);
            rejected(&state, "Register", &err, &body)
        }
        Err(err) => err.into_response(),
    }
}

/// "Are you sure you want to logout?" Guests are sent to the login page instead.
#[instrument(skip_all)]
pub async fn logout_prompt(session: Session) -> Response {
    if !session.context.is_logged_in() {
        return axum::response::Redirect::to("/login.html").into_response();
    }
    Html(render::layout(
        "Logout",
        session.context.user(),
        None,
        None,
        &render::logout_prompt(),
    ))
    .into_response()
}

#[instrument(skip_all)]
pub async fn logout(
    Session { mut context, mut cookies }: Session,
    Form(form): Form<LogoutForm>,
) -> Response {
    let confirmed = form.confirmed();
    context.logout(&mut cookies, confirmed);

    let target = if confirmed { "/index.html" } else { "/dashboard.html" };
    let mut headers = HeaderMap::new();
    cookies.write_to(&mut headers);
    if let Ok(v) = target.parse() {
        headers.insert(header::LOCATION, v);
    }
    (StatusCode::SEE_OTHER, headers).into_response()
}
