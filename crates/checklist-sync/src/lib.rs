#![doc = include_str!("../README.md")]

pub mod auth;
pub mod controller;

use checklist::{Credentials, TodoItem, TodoList};
use std::sync::Mutex;

pub use auth::{AuthError, AuthFlow, AuthState, AuthStep};
pub use controller::SyncController;

// ── Error ────────────────────────────────────────────────────────────

/// Errors from remote calls, client-side validation, and session storage.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Transport failure: connection refused, DNS, malformed response body.
    #[error("network error: {0}")]
    Network(String),

    /// The server answered with a non-2xx status.
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    /// A required field was empty; checked before any request is issued.
    #[error("{field} must not be empty")]
    Validation { field: &'static str },

    /// An authenticated call was attempted with no stored token.
    #[error("not logged in")]
    NoSession,

    /// Session storage failure.
    #[error("session storage error: {0}")]
    Io(#[from] std::io::Error),

    /// Item mutations need `open_list` to have been called first.
    #[error("no list is open")]
    NoOpenList,

    /// The item is not in the open list's collection.
    #[error("unknown item: {0}")]
    UnknownItem(String),
}

pub type Result<T> = std::result::Result<T, ApiError>;

// ── Traits ───────────────────────────────────────────────────────────

/// The remote checklist API, one method per endpoint.
///
/// `checklist-http` implements this over reqwest; tests drive the
/// controllers with in-memory fakes.
pub trait Backend {
    /// POST `/auth/signup`. Creating the account yields no session.
    fn signup(&self, creds: &Credentials) -> Result<()>;

    /// POST `/auth/login` (form-encoded). Returns the access token.
    fn login(&self, creds: &Credentials) -> Result<String>;

    /// GET `/lists/`, in server order.
    fn fetch_lists(&self) -> Result<Vec<TodoList>>;

    /// POST `/lists/`.
    fn create_list(&self, title: &str) -> Result<TodoList>;

    /// POST `/lists/{id}/share`.
    fn share_list(&self, list_id: &str, email: &str) -> Result<()>;

    /// DELETE `/lists/{id}`.
    fn delete_list(&self, list_id: &str) -> Result<()>;

    /// GET `/api/{list_id}/items`, in server order.
    fn fetch_items(&self, list_id: &str) -> Result<Vec<TodoItem>>;

    /// POST `/api/{list_id}/items`.
    fn create_item(&self, list_id: &str, title: &str) -> Result<TodoItem>;

    /// PATCH `/api/items/{id}` with the new completion flag.
    fn set_complete(&self, item_id: &str, is_complete: bool) -> Result<TodoItem>;

    /// DELETE `/api/items/{id}`.
    fn delete_item(&self, item_id: &str) -> Result<()>;
}

/// Durable home for the session token.
///
/// Read before every authenticated request and written only by
/// login/signup/logout, so implementations need no coordination beyond
/// interior mutability.
pub trait SessionStore {
    /// Current token, if any.
    fn load(&self) -> Result<Option<String>>;

    /// Persist a fresh token, replacing any previous one.
    fn save(&self, token: &str) -> Result<()>;

    /// Forget the token. Clearing an empty store is not an error.
    fn clear(&self) -> Result<()>;
}

// ── In-memory store ──────────────────────────────────────────────────

/// [`SessionStore`] held in process memory. Used by tests and by
/// embedders that manage persistence themselves.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    token: Mutex<Option<String>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start out already holding a token.
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Mutex::new(Some(token.into())),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Option<String>> {
        self.token.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl SessionStore for MemorySessionStore {
    fn load(&self) -> Result<Option<String>> {
        Ok(self.lock().clone())
    }

    fn save(&self, token: &str) -> Result<()> {
        *self.lock() = Some(token.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        *self.lock() = None;
        Ok(())
    }
}
