use serde::Deserialize;

/// Login form fields. Missing fields deserialize as empty.
#[derive(Debug, Default, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// Registration form fields.
#[derive(Debug, Default, Deserialize)]
pub struct RegisterForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub password: String,
}

/// Answer to the "Are you sure you want to logout?" prompt.
#[derive(Debug, Default, Deserialize)]
pub struct LogoutForm {
    #[serde(default)]
    pub confirm: String,
}

impl LogoutForm {
    pub fn confirmed(&self) -> bool {
        matches!(self.confirm.as_str(), "yes" | "true" | "1")
    }
}
