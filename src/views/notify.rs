use std::time::Duration;

use crate::views::render::escape_html;

pub const DEFAULT_DISMISS: Duration = Duration::from_millis(3000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotifyKind {
    Success,
    Error,
}

impl NotifyKind {
    pub fn class(self) -> &'static str {
        match self {
            NotifyKind::Success => "success",
            NotifyKind::Error => "error",
        }
    }

    pub fn background(self) -> &'static str {
        match self {
            NotifyKind::Success => "#10b981",
            NotifyKind::Error => "#dc2626",
        }
    }
}

/// Transient message pinned to the top-right corner.
///
/// It hides itself once `dismiss_after` elapses; nothing can cancel that.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub kind: NotifyKind,
    pub dismiss_after: Duration,
}

impl Notification {
    pub fn new(message: impl Into<String>, kind: NotifyKind) -> Self {
        Self {
            message: message.into(),
            kind,
            dismiss_after: DEFAULT_DISMISS,
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(message, NotifyKind::Success)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(message, NotifyKind::Error)
    }

    pub fn dismiss_after(mut self, after: Duration) -> Self {
        self.dismiss_after = after;
        self
    }

    pub fn render(&self) -> String {
        format!(
            concat!(
                r#"<div class="notification {kind}" role="status" style="position:fixed;top:20px;right:20px;"#,
                r#"padding:15px 20px;border-radius:5px;color:white;font-weight:bold;z-index:1000;"#,
                r#"background-color:{bg};animation:civictrack-dismiss 0s linear {ms}ms forwards">{msg}</div>"#
            ),
            kind = self.kind.class(),
            bg = self.kind.background(),
            ms = self.dismiss_after.as_millis(),
            msg = escape_html(&self.message),
        )
    }
}

/// Navigation scheduled after a fixed delay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redirect {
    pub to: String,
    pub after: Duration,
}

impl Redirect {
    pub fn new(to: impl Into<String>, after: Duration) -> Self {
        Self {
            to: to.into(),
            after,
        }
    }

    /// `<meta refresh>` only has whole-second resolution; round up.
    pub fn render(&self) -> String {
        let secs = self.after.as_millis().div_ceil(1000);
        format!(
            r#"<meta http-equiv="refresh" content="{secs};url={}">"#,
            escape_html(&self.to)
        )
    }
}
