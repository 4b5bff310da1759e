use tracing::debug;

use crate::{cookies::CookieStore, session::repo_types::User};

impl User {
    /// Reads the user mirrored in cookie `name`. Absent or malformed means no session.
    pub fn load(cookies: &CookieStore, name: &str) -> Option<User> {
        let raw = cookies.get(name)?;
        match serde_json::from_str::<User>(raw) {
            Ok(user) => Some(user),
            Err(e) => {
                debug!(error = %e, cookie = name, "ignoring malformed session cookie");
                None
            }
        }
    }

    /// Mirrors the user into cookie `name` as JSON.
    pub fn save(&self, cookies: &mut CookieStore, name: &str, ttl_days: i64) -> anyhow::Result<()> {
        let json = serde_json::to_string(self)?;
        cookies.set(name, &json, ttl_days);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    fn sample() -> User {
        User {
            id: "lz3k9x0abc".into(),
            username: "alice".into(),
            email: "alice@example.com".into(),
            phone: None,
            login_time: Some(datetime!(2025-06-02 10:34 UTC)),
            registration_date: None,
        }
    }

    #[test]
    fn save_and_load() {
        let mut cookies = CookieStore::new();
        sample().save(&mut cookies, "civictrack_user", 7).expect("save");
        assert_eq!(User::load(&cookies, "civictrack_user"), Some(sample()));
    }

    #[test]
    fn serializes_with_camel_case_keys() {
        let json = serde_json::to_string(&sample()).unwrap();
        assert!(json.contains("\"loginTime\":\"2025-06-02T10:34:00Z\""));
        assert!(!json.contains("phone"));
        assert!(!json.contains("registrationDate"));
    }

    #[test]
    fn malformed_cookie_is_no_session() {
        let cookies = CookieStore::from_header("civictrack_user=not-json");
        assert_eq!(User::load(&cookies, "civictrack_user"), None);
    }

    #[test]
    fn missing_cookie_is_no_session() {
        assert_eq!(User::load(&CookieStore::new(), "civictrack_user"), None);
    }
}
