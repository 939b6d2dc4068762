use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A to-do list as the server reports it.
///
/// `id` is server-assigned and opaque to the client. Ownership and
/// sharing are enforced server-side; `owner_id` is informational only
/// and absent in older payloads.
///
/// # JSON shape
///
/// ```json
/// {
///   "id": "9b2f…",
///   "title": "Groceries",
///   "owner_id": "41c0…",
///   "created_at": "2026-02-11T09:30:00Z"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TodoList {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A single entry in a to-do list.
///
/// The wire name for the parent list is `todo_list_id`; client code uses
/// the shorter `list_id`. Every item held by a client collection for a
/// list `L` has `list_id == L.id`.
///
/// # JSON shape
///
/// ```json
/// {
///   "id": "c57a…",
///   "todo_list_id": "9b2f…",
///   "title": "Milk",
///   "is_complete": false,
///   "created_at": "2026-02-11T09:31:00Z"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TodoItem {
    pub id: String,
    #[serde(rename = "todo_list_id")]
    pub list_id: String,
    pub title: String,
    #[serde(default)]
    pub is_complete: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl TodoItem {
    /// Create an item for tests and local construction.
    pub fn new(
        id: impl Into<String>,
        list_id: impl Into<String>,
        title: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            list_id: list_id.into(),
            title: title.into(),
            is_complete: false,
            created_at: None,
        }
    }

    /// Builder-style completion flag.
    pub fn completed(mut self, is_complete: bool) -> Self {
        self.is_complete = is_complete;
        self
    }
}

/// Email and password pair submitted to the auth endpoints.
///
/// The signup endpoint takes exactly this JSON shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}
