use std::sync::Arc;

use crate::config::AppConfig;
use crate::issues::{repo::seed_issues, repo_types::Issue};
use crate::views::router::ViewRouter;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub issues: Arc<Vec<Issue>>,
    pub views: Arc<ViewRouter>,
}

impl AppState {
    pub fn init() -> Self {
        Self::from_parts(AppConfig::from_env(), seed_issues())
    }

    pub fn from_parts(config: AppConfig, issues: Vec<Issue>) -> Self {
        Self {
            config: Arc::new(config),
            issues: Arc::new(issues),
            views: Arc::new(ViewRouter::with_pages()),
        }
    }

    #[cfg(test)]
    pub fn fake() -> Self {
        Self::from_parts(AppConfig::default(), seed_issues())
    }
}
