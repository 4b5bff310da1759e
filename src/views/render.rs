//! HTML for the CivicTrack pages.
//!
//! Markup keeps the class and field names the stylesheet and forms rely on:
//! `search-input`, `filter-select`, `issue-card`, `page-number`,
//! `user-title`, `login-btn`, and form fields `username`, `password`,
//! `email`, `phone`.

use std::fmt::Write as _;

use crate::{
    issues::{dto::ListQuery, repo_types::Issue, services::PageSlice},
    session::repo_types::User,
    views::notify::{Notification, Redirect},
};

pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Lift-and-shadow applied to issue cards on pointer enter, undone on leave.
pub struct HoverEffect {
    pub lift_px: u32,
    pub shadow: &'static str,
}

pub const CARD_HOVER: HoverEffect = HoverEffect {
    lift_px: 5,
    shadow: "0 10px 20px rgba(0,0,0,0.3)",
};

impl HoverEffect {
    pub fn css(&self, selector: &str) -> String {
        format!(
            "{selector}{{transform:translateY(0);box-shadow:none;transition:transform .1s,box-shadow .1s}}\
             {selector}:hover{{transform:translateY(-{}px);box-shadow:{}}}",
            self.lift_px, self.shadow
        )
    }
}

const DISMISS_KEYFRAMES: &str =
    "@keyframes civictrack-dismiss{to{visibility:hidden;opacity:0}}";

pub fn layout(
    title: &str,
    user: Option<&User>,
    notice: Option<&Notification>,
    redirect: Option<&Redirect>,
    body: &str,
) -> String {
    let (who, account) = match user {
        Some(u) => (
            escape_html(&u.username),
            r#"<a class="login-btn" href="/logout">Logout</a>"#,
        ),
        None => ("Guest".to_string(), r#"<a class="login-btn" href="/login.html">Login</a>"#),
    };

    let mut html = String::new();
    let _ = write!(
        html,
        r#"<!DOCTYPE html><html lang="en"><head><meta charset="utf-8"><title>{title}</title>{refresh}<style>{hover}{keyframes}</style></head><body>"#,
        title = escape_html(title),
        refresh = redirect.map(Redirect::render).unwrap_or_default(),
        hover = CARD_HOVER.css(".issue-card"),
        keyframes = DISMISS_KEYFRAMES,
    );
    let _ = write!(
        html,
        r#"<header><a href="/index.html">CivicTrack</a> <span class="user-title">{who}</span> {account}</header>"#
    );
    if let Some(n) = notice {
        html.push_str(&n.render());
    }
    html.push_str("<main>");
    html.push_str(body);
    html.push_str("</main></body></html>");
    html
}

pub fn issue_card(issue: &Issue) -> String {
    format!(
        r#"<a class="issue-card" tabindex="0" href="/issue-detail.html?id={id}"><img src="/images/{img}" alt=""><div class="issue-details"><span class="category">{cat}</span> <span class="status">{status}</span><h4>{title}</h4><p>{desc}</p><span class="location">{loc}</span> <span class="distance">{dist}</span></div></a>"#,
        id = issue.id,
        img = escape_html(&issue.image),
        cat = escape_html(&issue.category),
        status = escape_html(&issue.status),
        title = escape_html(&issue.title),
        desc = escape_html(&issue.description),
        loc = escape_html(&issue.location),
        dist = escape_html(&issue.distance),
    )
}

fn select(name: &str, placeholder: &str, options: &[&str], chosen: &str) -> String {
    let mut out = format!(r#"<select class="filter-select" name="{name}"><option value="">{placeholder}</option>"#);
    for opt in options {
        let selected = if opt.eq_ignore_ascii_case(chosen.trim()) { " selected" } else { "" };
        let _ = write!(out, r#"<option value="{v}"{selected}>{v}</option>"#, v = escape_html(opt));
    }
    out.push_str("</select>");
    out
}

/// Search box, filter selects, the visible cards and the pagination control.
pub fn issue_listing(path: &str, query: &ListQuery, slice: &PageSlice<&Issue>) -> String {
    let mut out = String::new();
    let _ = write!(
        out,
        r#"<form class="issue-controls" method="get" action="{path}"><input class="search-input" type="search" name="q" value="{q}" placeholder="Search issues">{cat}{status}{dist}<button type="submit">Apply</button></form>"#,
        path = escape_html(path),
        q = escape_html(&query.q),
        cat = select("category", "All Categories", &["Infrastructure", "Roads", "Sanitation"], &query.category),
        status = select("status", "All Status", &["Reported", "In Progress", "Resolved"], &query.status),
        dist = select("distance", "All Distances", &["1 km", "3 km", "5 km"], &query.distance),
    );

    out.push_str(r#"<section class="issue-list">"#);
    if slice.items.is_empty() {
        out.push_str(r#"<p class="empty">No issues match.</p>"#);
    }
    for issue in &slice.items {
        out.push_str(&issue_card(issue));
    }
    out.push_str("</section>");
    out.push_str(&pagination(path, query, slice.current, slice.total_pages));
    out
}

fn pagination(path: &str, query: &ListQuery, current: usize, total_pages: usize) -> String {
    let mut out = String::from(r#"<nav class="pagination">"#);
    for n in 1..=total_pages {
        let active = if n == current { " active" } else { "" };
        let _ = write!(
            out,
            r#"<a class="page-number{active}" href="{path}?q={q}&amp;category={c}&amp;status={s}&amp;distance={d}&amp;page={n}">{n}</a>"#,
            path = escape_html(path),
            q = query_escape(&query.q),
            c = query_escape(&query.category),
            s = query_escape(&query.status),
            d = query_escape(&query.distance),
        );
    }
    out.push_str("</nav>");
    out
}

// application/x-www-form-urlencoded, as a browser would submit the form
fn query_escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for b in raw.bytes() {
        match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'*' => out.push(b as char),
            b' ' => out.push('+'),
            _ => {
                let _ = write!(out, "%{b:02X}");
            }
        }
    }
    out
}

pub fn issue_detail(issue: &Issue) -> String {
    format!(
        r#"<article class="issue-detail"><img src="/images/{img}" alt=""><h2>{title}</h2><p>{desc}</p><dl><dt>Category</dt><dd>{cat}</dd><dt>Status</dt><dd>{status}</dd><dt>Location</dt><dd>{loc} ({dist})</dd><dt>Reported by</dt><dd>{by} on {at}</dd></dl><a href="/index.html">Back to issues</a></article>"#,
        img = escape_html(&issue.image),
        title = escape_html(&issue.title),
        desc = escape_html(&issue.description),
        cat = escape_html(&issue.category),
        status = escape_html(&issue.status),
        loc = escape_html(&issue.location),
        dist = escape_html(&issue.distance),
        by = escape_html(&issue.reported_by),
        at = escape_html(&issue.reported_at),
    )
}

pub fn login_form(username: &str) -> String {
    format!(
        r#"<form id="loginForm" method="post" action="/login"><input name="username" value="{u}" placeholder="Username" required><input name="password" type="password" placeholder="Password" required><button type="submit">Login</button></form><a href="/register.html">Create an account</a>"#,
        u = escape_html(username),
    )
}

pub fn register_form(username: &str, email: &str, phone: &str) -> String {
    format!(
        r#"<form id="registerForm" method="post" action="/register"><input name="username" value="{u}" placeholder="Username" required><input name="email" type="email" value="{e}" placeholder="Email" required><input name="phone" value="{p}" placeholder="Phone" required><input name="password" type="password" placeholder="Password" required><button type="submit">Register</button></form><a href="/login.html">Already registered? Login</a>"#,
        u = escape_html(username),
        e = escape_html(email),
        p = escape_html(phone),
    )
}

pub fn logout_prompt() -> String {
    r#"<form method="post" action="/logout"><p>Are you sure you want to logout?</p><button name="confirm" value="yes" type="submit">Logout</button> <button name="confirm" value="no" type="submit">Cancel</button></form>"#
        .to_string()
}
