use lazy_static::lazy_static;
use regex::Regex;
use time::OffsetDateTime;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::{
    config::SessionConfig,
    cookies::CookieStore,
    error::{AppError, ValidationError},
    session::{dto::RegisterForm, repo_types::User},
};

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

/// Opaque user id. Nothing parses it back.
pub(crate) fn generate_id() -> String {
    Uuid::new_v4().simple().to_string()
}

/// Per-request view of who is signed in.
///
/// Restored from the session cookie at the start of a request and mutated
/// only by [`login`](Self::login), [`register`](Self::register) and
/// [`logout`](Self::logout), each of which mirrors the change into the
/// [`CookieStore`] that will be written back to the client.
#[derive(Debug, Clone)]
pub struct SessionContext {
    cookie_name: String,
    ttl_days: i64,
    current: Option<User>,
}

impl SessionContext {
    pub fn new(config: &SessionConfig) -> Self {
        Self {
            cookie_name: config.cookie_name.clone(),
            ttl_days: config.ttl_days,
            current: None,
        }
    }

    pub fn restore(config: &SessionConfig, cookies: &CookieStore) -> Self {
        let mut session = Self::new(config);
        session.current = User::load(cookies, &session.cookie_name);
        if let Some(user) = &session.current {
            debug!(user_id = %user.id, username = %user.username, "session restored");
        }
        session
    }

    pub fn user(&self) -> Option<&User> {
        self.current.as_ref()
    }

    pub fn is_logged_in(&self) -> bool {
        self.current.is_some()
    }

    /// Accepts any non-empty pair; there is no credential check.
    pub fn login(
        &mut self,
        cookies: &mut CookieStore,
        username: &str,
        password: &str,
    ) -> Result<User, AppError> {
        if username.is_empty() || password.is_empty() {
            warn!("login with missing fields");
            return Err(ValidationError::MissingFields.into());
        }

        let user = User {
            id: generate_id(),
            username: username.to_string(),
            email: format!("{username}@example.com"),
            phone: None,
            login_time: Some(OffsetDateTime::now_utc()),
            registration_date: None,
        };
        self.persist(cookies, user)
    }

    pub fn register(
        &mut self,
        cookies: &mut CookieStore,
        form: &RegisterForm,
    ) -> Result<User, AppError> {
        let fields = [&form.username, &form.email, &form.phone, &form.password];
        if fields.iter().any(|f| f.is_empty()) {
            warn!("registration with missing fields");
            return Err(ValidationError::MissingFields.into());
        }
        if !is_valid_email(&form.email) {
            warn!(email = %form.email, "invalid email");
            return Err(ValidationError::InvalidEmail.into());
        }

        let user = User {
            id: generate_id(),
            username: form.username.clone(),
            email: form.email.clone(),
            phone: Some(form.phone.clone()),
            login_time: None,
            registration_date: Some(OffsetDateTime::now_utc()),
        };
        self.persist(cookies, user)
    }

    /// Ends the session once the user confirmed. Returns whether anything was cleared.
    pub fn logout(&mut self, cookies: &mut CookieStore, confirmed: bool) -> bool {
        if !confirmed {
            debug!("logout not confirmed");
            return false;
        }
        let user = self.current.take();
        // a stale or malformed cookie is dropped even without a live session
        if user.is_some() || cookies.get(&self.cookie_name).is_some() {
            cookies.delete(&self.cookie_name);
        }
        match user {
            Some(user) => {
                info!(user_id = %user.id, username = %user.username, "logged out");
                true
            }
            None => false,
        }
    }

    fn persist(&mut self, cookies: &mut CookieStore, user: User) -> Result<User, AppError> {
        user.save(cookies, &self.cookie_name, self.ttl_days)?;
        info!(user_id = %user.id, username = %user.username, "session started");
        self.current = Some(user.clone());
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> SessionConfig {
        SessionConfig {
            cookie_name: "civictrack_user".into(),
            ttl_days: 7,
        }
    }

    fn register_form(username: &str, email: &str, phone: &str, password: &str) -> RegisterForm {
        RegisterForm {
            username: username.into(),
            email: email.into(),
            phone: phone.into(),
            password: password.into(),
        }
    }

    #[test]
    fn email_pattern() {
        assert!(is_valid_email("alice@example.com"));
        assert!(is_valid_email("a.b@c.d.e"));
        assert!(!is_valid_email("alice"));
        assert!(!is_valid_email("alice@example"));
        assert!(!is_valid_email("al ice@example.com"));
        assert!(!is_valid_email("a@b@c.com"));
        assert!(!is_valid_email(""));
    }

    #[test]
    fn generated_ids_are_opaque_and_distinct() {
        let a = generate_id();
        let b = generate_id();
        assert_ne!(a, b);
        assert_eq!(a.len(), 32);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn login_persists_fabricated_user() {
        let mut cookies = CookieStore::new();
        let mut session = SessionContext::new(&config());
        let user = session.login(&mut cookies, "alice", "pw123").expect("login");

        assert_eq!(user.username, "alice");
        assert_eq!(user.email, "alice@example.com");
        assert!(user.login_time.is_some());
        assert_eq!(session.user(), Some(&user));
        assert_eq!(User::load(&cookies, "civictrack_user"), Some(user));
    }

    #[test]
    fn login_keeps_username_verbatim() {
        let mut cookies = CookieStore::new();
        let mut session = SessionContext::new(&config());
        let user = session.login(&mut cookies, " Bob; x ", "p").expect("login");
        assert_eq!(user.username, " Bob; x ");
        let restored = SessionContext::restore(&config(), &cookies);
        assert_eq!(restored.user().map(|u| u.username.as_str()), Some(" Bob; x "));
    }

    #[test]
    fn login_rejects_empty_fields_without_writing_cookie() {
        for (u, p) in [("", "pw"), ("alice", ""), ("", "")] {
            let mut cookies = CookieStore::new();
            let mut session = SessionContext::new(&config());
            let err = session.login(&mut cookies, u, p).unwrap_err();
            assert!(matches!(err, AppError::Validation(ValidationError::MissingFields)));
            assert!(cookies.set_cookie_headers().is_empty());
            assert!(!session.is_logged_in());
        }
    }

    #[test]
    fn restore_after_login_needs_no_relogin() {
        let mut cookies = CookieStore::new();
        SessionContext::new(&config())
            .login(&mut cookies, "alice", "pw123")
            .expect("login");

        // next page load: the browser sends back what we set
        let line = cookies.set_cookie_headers().remove(0);
        let pair = line.split(';').next().unwrap().to_string();
        let next = CookieStore::from_header(&pair);
        let session = SessionContext::restore(&config(), &next);
        assert_eq!(session.user().map(|u| u.username.as_str()), Some("alice"));
    }

    #[test]
    fn register_validates_and_persists() {
        let mut cookies = CookieStore::new();
        let mut session = SessionContext::new(&config());
        let user = session
            .register(&mut cookies, &register_form("carol", "carol@city.gov", "555-0100", "pw"))
            .expect("register");
        assert_eq!(user.email, "carol@city.gov");
        assert_eq!(user.phone.as_deref(), Some("555-0100"));
        assert!(user.registration_date.is_some());
        assert_eq!(User::load(&cookies, "civictrack_user"), Some(user));
    }

    #[test]
    fn register_rejects_missing_fields() {
        let mut cookies = CookieStore::new();
        let mut session = SessionContext::new(&config());
        let err = session
            .register(&mut cookies, &register_form("carol", "carol@city.gov", "", "pw"))
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(ValidationError::MissingFields)));
        assert!(cookies.set_cookie_headers().is_empty());
    }

    #[test]
    fn register_rejects_bad_email_regardless_of_other_fields() {
        for form in [
            register_form("carol", "carol", "555", "pw"),
            register_form("carol", "carol@city", "", ""),
            register_form("", "nope", "555", "pw"),
        ] {
            let mut cookies = CookieStore::new();
            let mut session = SessionContext::new(&config());
            let err = session.register(&mut cookies, &form).unwrap_err();
            assert!(matches!(err, AppError::Validation(_)));
            assert!(!session.is_logged_in());
        }
    }

    #[test]
    fn logout_requires_confirmation() {
        let mut cookies = CookieStore::new();
        let mut session = SessionContext::new(&config());
        session.login(&mut cookies, "alice", "pw").expect("login");

        assert!(!session.logout(&mut cookies, false));
        assert!(session.is_logged_in());

        assert!(session.logout(&mut cookies, true));
        assert!(!session.is_logged_in());
        assert_eq!(cookies.get("civictrack_user"), None);
    }

    #[test]
    fn logout_without_session_is_a_no_op() {
        let mut cookies = CookieStore::new();
        let mut session = SessionContext::new(&config());
        assert!(!session.logout(&mut cookies, true));
        assert!(!session.is_logged_in());
        assert!(cookies.set_cookie_headers().is_empty());
    }

    #[test]
    fn logout_drops_malformed_cookie() {
        let mut cookies = CookieStore::from_header("civictrack_user=garbage");
        let mut session = SessionContext::restore(&config(), &cookies);
        assert!(!session.is_logged_in());
        assert!(!session.logout(&mut cookies, true));
        assert_eq!(cookies.get("civictrack_user"), None);
    }
}
