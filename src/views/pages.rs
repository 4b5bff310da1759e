//! Page setups dispatched by the view router.

use tracing::{debug, warn};

use crate::{
    error::AppError,
    issues::{repo_types::Issue, services::my_issues},
    views::{render, router::PageContext},
};

pub fn home(ctx: &PageContext<'_>) -> Result<String, AppError> {
    debug!("loading home page data");
    let slice = ctx.query.apply(ctx.issues, ctx.config.issues_per_page);
    let body = render::issue_listing(ctx.path, ctx.query, &slice);
    Ok(render::layout("CivicTrack", ctx.session.user(), None, None, &body))
}

pub fn login(ctx: &PageContext<'_>) -> Result<String, AppError> {
    Ok(render::layout("Login", ctx.session.user(), None, None, &render::login_form("")))
}

pub fn register(ctx: &PageContext<'_>) -> Result<String, AppError> {
    let body = render::register_form("", "", "");
    Ok(render::layout("Register", ctx.session.user(), None, None, &body))
}

/// Greets the signed-in user and lists their reports above the full listing.
pub fn dashboard(ctx: &PageContext<'_>) -> Result<String, AppError> {
    let mut body = String::new();
    if let Some(user) = ctx.session.user() {
        let mine = my_issues(&user.username, ctx.issues);
        body.push_str(r#"<section class="my-issues"><h3>My Issues</h3>"#);
        if mine.is_empty() {
            body.push_str("<p>You have not reported any issues yet.</p>");
        }
        for issue in mine {
            body.push_str(&render::issue_card(issue));
        }
        body.push_str("</section>");
    }
    let slice = ctx.query.apply(ctx.issues, ctx.config.issues_per_page);
    body.push_str(&render::issue_listing(ctx.path, ctx.query, &slice));
    Ok(render::layout("Dashboard", ctx.session.user(), None, None, &body))
}

pub fn issue_detail(ctx: &PageContext<'_>) -> Result<String, AppError> {
    let key = ctx.query.id.as_deref().unwrap_or_default();
    debug!(id = key, "loading issue detail");
    let Some(issue) = Issue::find_by_key(ctx.issues, key) else {
        warn!(id = key, "issue not found");
        return Err(AppError::IssueNotFound(key.to_string()));
    };
    Ok(render::layout(
        &issue.title,
        ctx.session.user(),
        None,
        None,
        &render::issue_detail(issue),
    ))
}
