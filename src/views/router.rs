use std::collections::HashMap;

use tracing::debug;

use crate::{
    config::AppConfig,
    error::AppError,
    issues::{dto::ListQuery, repo_types::Issue},
    session::services::SessionContext,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Page {
    Home,
    Login,
    Register,
    Dashboard,
    IssueDetail,
}

impl Page {
    pub fn identifier(self) -> &'static str {
        match self {
            Page::Home => "home",
            Page::Login => "login",
            Page::Register => "register",
            Page::Dashboard => "dashboard",
            Page::IssueDetail => "issue-detail",
        }
    }

    pub fn from_identifier(id: &str) -> Option<Page> {
        match id {
            "home" => Some(Page::Home),
            "login" => Some(Page::Login),
            "register" => Some(Page::Register),
            "dashboard" => Some(Page::Dashboard),
            "issue-detail" => Some(Page::IssueDetail),
            _ => None,
        }
    }
}

/// Identifier of the page a path shows. First substring hit wins; anything else is home.
pub fn current_page(path: &str) -> &'static str {
    ["login", "register", "dashboard", "issue-detail"]
        .into_iter()
        .find(|id| path.contains(id))
        .unwrap_or(Page::Home.identifier())
}

/// Everything a page setup may read.
pub struct PageContext<'a> {
    pub path: &'a str,
    pub session: &'a SessionContext,
    pub issues: &'a [Issue],
    pub query: &'a ListQuery,
    pub config: &'a AppConfig,
}

pub type PageSetup = fn(&PageContext<'_>) -> Result<String, AppError>;

#[derive(Default)]
pub struct ViewRouter {
    pages: HashMap<Page, PageSetup>,
}

impl ViewRouter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_pages() -> Self {
        use crate::views::pages;

        Self::new()
            .register(Page::Home, pages::home)
            .register(Page::Login, pages::login)
            .register(Page::Register, pages::register)
            .register(Page::Dashboard, pages::dashboard)
            .register(Page::IssueDetail, pages::issue_detail)
    }

    pub fn register(mut self, page: Page, setup: PageSetup) -> Self {
        self.pages.insert(page, setup);
        self
    }

    /// Runs the page's setup. Pages without one are a silent no-op.
    pub fn dispatch(&self, page: Page, ctx: &PageContext<'_>) -> Option<Result<String, AppError>> {
        match self.pages.get(&page) {
            Some(setup) => {
                debug!(page = page.identifier(), "setting up page");
                Some(setup(ctx))
            }
            None => {
                debug!(page = page.identifier(), "no setup registered");
                None
            }
        }
    }

    /// Same as [`dispatch`](Self::dispatch) for a string identifier. Unknown ids do nothing.
    pub fn dispatch_identifier(
        &self,
        id: &str,
        ctx: &PageContext<'_>,
    ) -> Option<Result<String, AppError>> {
        match Page::from_identifier(id) {
            Some(page) => self.dispatch(page, ctx),
            None => {
                debug!(id, "unknown page identifier");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::AppConfig, issues::repo::seed_issues};

    #[test]
    fn path_to_page() {
        assert_eq!(current_page("/login.html"), "login");
        assert_eq!(current_page("/register"), "register");
        assert_eq!(current_page("/app/dashboard.html"), "dashboard");
        assert_eq!(current_page("/issue-detail.html"), "issue-detail");
        assert_eq!(current_page("/"), "home");
        assert_eq!(current_page("/index.html"), "home");
        assert_eq!(current_page("/logout"), "home");
    }

    #[test]
    fn identifiers_round_trip() {
        for page in [Page::Home, Page::Login, Page::Register, Page::Dashboard, Page::IssueDetail] {
            assert_eq!(Page::from_identifier(page.identifier()), Some(page));
        }
        assert_eq!(Page::from_identifier("settings"), None);
    }

    fn marker(_: &PageContext<'_>) -> Result<String, AppError> {
        Ok("home-setup".into())
    }

    #[test]
    fn dispatch_runs_registered_and_ignores_the_rest() {
        let config = AppConfig::default();
        let session = SessionContext::new(&config.session);
        let issues = seed_issues();
        let query = ListQuery::default();
        let ctx = PageContext {
            path: "/",
            session: &session,
            issues: &issues,
            query: &query,
            config: &config,
        };

        let router = ViewRouter::new().register(Page::Home, marker);
        assert_eq!(router.dispatch(Page::Home, &ctx).unwrap().unwrap(), "home-setup");
        assert!(router.dispatch(Page::Login, &ctx).is_none());

        assert_eq!(router.dispatch_identifier("home", &ctx).unwrap().unwrap(), "home-setup");
        assert!(router.dispatch_identifier("login", &ctx).is_none());
        assert!(router.dispatch_identifier("settings", &ctx).is_none());
        assert!(router.dispatch_identifier("", &ctx).is_none());
    }
}
