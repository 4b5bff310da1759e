use std::time::Duration;

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    pub cookie_name: String,
    pub ttl_days: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub session: SessionConfig,
    pub redirect_delay_ms: u64,
    pub notification_ms: u64,
    pub issues_per_page: usize,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup. Missing or unparsable values use defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            host: lookup("APP_HOST").unwrap_or_else(|| "0.0.0.0".into()),
            port: parse_or(lookup("APP_PORT"), defaults.port),
            session: SessionConfig {
                cookie_name: lookup("SESSION_COOKIE").unwrap_or(defaults.session.cookie_name),
                ttl_days: parse_or(lookup("SESSION_TTL_DAYS"), defaults.session.ttl_days),
            },
            redirect_delay_ms: parse_or(lookup("REDIRECT_DELAY_MS"), defaults.redirect_delay_ms),
            notification_ms: parse_or(lookup("NOTIFICATION_MS"), defaults.notification_ms),
            issues_per_page: parse_or(lookup("ISSUES_PER_PAGE"), defaults.issues_per_page),
        }
    }

    pub fn redirect_delay(&self) -> Duration {
        Duration::from_millis(self.redirect_delay_ms)
    }

    pub fn notification_duration(&self) -> Duration {
        Duration::from_millis(self.notification_ms)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".into(),
            port: 8080,
            session: SessionConfig {
                cookie_name: "civictrack_user".into(),
                ttl_days: 7,
            },
            redirect_delay_ms: 1000,
            notification_ms: 3000,
            issues_per_page: 6,
        }
    }
}

fn parse_or<T: std::str::FromStr>(raw: Option<String>, default: T) -> T {
    raw.and_then(|v| v.trim().parse().ok()).unwrap_or(default)
}
