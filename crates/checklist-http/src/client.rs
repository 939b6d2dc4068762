//! Blocking REST client for the checklist server.

use checklist::{Credentials, TodoItem, TodoList};
use checklist_sync::{ApiError, Backend, Result, SessionStore};
use reqwest::blocking::{Client, RequestBuilder, Response};
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use tracing::debug;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// A [`Backend`] that talks to the checklist REST API.
///
/// The session token comes from the [`SessionStore`] on every request,
/// so a login performed elsewhere through the same store takes effect
/// immediately. Calls that require a session fail with
/// [`ApiError::NoSession`] before any request is issued.
#[derive(Debug)]
pub struct HttpBackend<S> {
    http: Client,
    base_url: String,
    store: S,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

impl<S: SessionStore> HttpBackend<S> {
    /// Build a client for the API rooted at `base_url`. A trailing
    /// slash on the base URL is ignored.
    pub fn new(base_url: impl Into<String>, store: S) -> Result<Self> {
        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(net)?;
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self {
            http,
            base_url,
            store,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Attach the stored bearer token, or fail fast without a session.
    fn authed(&self, req: RequestBuilder) -> Result<RequestBuilder> {
        let token = self.store.load()?.ok_or(ApiError::NoSession)?;
        Ok(req.bearer_auth(token))
    }

    fn send(&self, req: RequestBuilder) -> Result<Response> {
        let resp = req.send().map_err(net)?;
        let status = resp.status();
        if status.is_success() {
            Ok(resp)
        } else {
            let body = resp.text().unwrap_or_default();
            debug!(status = status.as_u16(), %body, "request rejected");
            Err(ApiError::Http {
                status: status.as_u16(),
                body,
            })
        }
    }
}

fn net(e: reqwest::Error) -> ApiError {
    ApiError::Network(e.to_string())
}

impl<S: SessionStore> Backend for HttpBackend<S> {
    fn signup(&self, creds: &Credentials) -> Result<()> {
        let req = self
            .http
            .post(self.url("/auth/signup"))
            .json(&json!({ "email": creds.email, "password": creds.password }));
        self.send(req)?;
        Ok(())
    }

    // The login endpoint is OAuth2-password shaped: form-encoded, with
    // the email sent as `username`.
    fn login(&self, creds: &Credentials) -> Result<String> {
        let req = self.http.post(self.url("/auth/login")).form(&[
            ("username", creds.email.as_str()),
            ("password", creds.password.as_str()),
        ]);
        let token: TokenResponse = self.send(req)?.json().map_err(net)?;
        Ok(token.access_token)
    }

    fn fetch_lists(&self) -> Result<Vec<TodoList>> {
        let req = self.authed(self.http.get(self.url("/lists/")))?;
        self.send(req)?.json().map_err(net)
    }

    fn create_list(&self, title: &str) -> Result<TodoList> {
        let req = self
            .authed(self.http.post(self.url("/lists/")))?
            .json(&json!({ "title": title }));
        self.send(req)?.json().map_err(net)
    }

    fn share_list(&self, list_id: &str, email: &str) -> Result<()> {
        let req = self
            .authed(self.http.post(self.url(&format!("/lists/{list_id}/share"))))?
            .json(&json!({ "email": email }));
        self.send(req)?;
        Ok(())
    }

    fn delete_list(&self, list_id: &str) -> Result<()> {
        let req = self.authed(self.http.delete(self.url(&format!("/lists/{list_id}"))))?;
        self.send(req)?;
        Ok(())
    }

    fn fetch_items(&self, list_id: &str) -> Result<Vec<TodoItem>> {
        let req = self.authed(self.http.get(self.url(&format!("/api/{list_id}/items"))))?;
        self.send(req)?.json().map_err(net)
    }

    fn create_item(&self, list_id: &str, title: &str) -> Result<TodoItem> {
        let req = self
            .authed(self.http.post(self.url(&format!("/api/{list_id}/items"))))?
            .json(&json!({ "title": title }));
        self.send(req)?.json().map_err(net)
    }

    fn set_complete(&self, item_id: &str, is_complete: bool) -> Result<TodoItem> {
        let req = self
            .authed(self.http.patch(self.url(&format!("/api/items/{item_id}"))))?
            .json(&json!({ "is_complete": is_complete }));
        self.send(req)?.json().map_err(net)
    }

    fn delete_item(&self, item_id: &str) -> Result<()> {
        let req = self.authed(self.http.delete(self.url(&format!("/api/items/{item_id}"))))?;
        self.send(req)?;
        Ok(())
    }
}
