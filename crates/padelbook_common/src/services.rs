// --- File: crates/padelbook_common/src/services.rs ---
//! Ports between the client logic and its surroundings.
//!
//! The API wrapper and the orchestrators only talk to storage and to the user
//! through these traits, so each can be swapped for an in-memory double in
//! tests or for a different front end.

use crate::models::SessionToken;
use tokio::sync::watch;
use tracing::debug;

/// Client-side storage for the session token.
///
/// Implementations must notify subscribers on every change.
pub trait SessionStore: Send + Sync {
    /// The stored token, if any.
    fn token(&self) -> Option<SessionToken>;

    /// Replace the stored token.
    fn set_token(&self, token: SessionToken);

    /// Remove the stored token.
    fn clear(&self);

    /// Watch the stored token. The receiver starts at the current value.
    fn subscribe(&self) -> watch::Receiver<Option<SessionToken>>;

    fn has_token(&self) -> bool {
        self.token().is_some()
    }
}

/// Process-local token storage.
#[derive(Debug)]
pub struct MemorySessionStore {
    tx: watch::Sender<Option<SessionToken>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::with_token(None)
    }

    pub fn with_token(token: Option<SessionToken>) -> Self {
        let (tx, _rx) = watch::channel(token);
        Self { tx }
    }
}

impl Default for MemorySessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionStore for MemorySessionStore {
    fn token(&self) -> Option<SessionToken> {
        self.tx.borrow().clone()
    }

    fn set_token(&self, token: SessionToken) {
        debug!("session token stored");
        self.tx.send_replace(Some(token));
    }

    fn clear(&self) {
        if self.tx.send_replace(None).is_some() {
            debug!("session token cleared");
        }
    }

    fn subscribe(&self) -> watch::Receiver<Option<SessionToken>> {
        self.tx.subscribe()
    }
}

/// Severity of a transient notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Info,
    Error,
}

/// A transient message reporting the outcome of an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub title: String,
    pub text: String,
}

impl Notice {
    pub fn success(title: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            title: title.into(),
            text: text.into(),
        }
    }

    pub fn info(title: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            title: title.into(),
            text: text.into(),
        }
    }

    pub fn error(title: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            title: title.into(),
            text: text.into(),
        }
    }
}

/// A blocking yes/no question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmPrompt {
    pub title: String,
    pub text: String,
    pub confirm_label: String,
    pub cancel_label: String,
}

/// How the client asks the user for confirmation and reports outcomes.
pub trait InteractionPort: Send + Sync {
    /// Ask a yes/no question. `true` means the confirm option was chosen.
    fn confirm(&self, prompt: &ConfirmPrompt) -> bool;

    /// Show a transient notice.
    fn notify(&self, notice: Notice);
}
