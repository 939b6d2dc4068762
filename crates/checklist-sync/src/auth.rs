//! Session lifecycle: signup, login, logout, and resume.
//!
//! [`AuthFlow`] owns the authoritative session state. Every transition
//! either lands in `LoggedIn` with a persisted token or in `LoggedOut`
//! with the store cleared; the transitional states are observable only
//! while a request is in flight.

use crate::{ApiError, Backend, Result, SessionStore};
use checklist::Credentials;
use std::fmt;
use tracing::{debug, warn};

/// Where the client currently stands with the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthState {
    LoggedOut,
    LoggingIn,
    SigningUp,
    LoggedIn,
}

/// Which operation an [`AuthError`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthStep {
    Signup,
    Login,
    Logout,
}

impl fmt::Display for AuthStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthStep::Signup => write!(f, "signup"),
            AuthStep::Login => write!(f, "login"),
            AuthStep::Logout => write!(f, "logout"),
        }
    }
}

/// An auth operation that failed, tagged with the step that failed so a
/// signup that succeeded but whose follow-up login failed reads as a
/// login failure.
#[derive(Debug, thiserror::Error)]
#[error("{step} failed: {source}")]
pub struct AuthError {
    pub step: AuthStep,
    #[source]
    pub source: ApiError,
}

impl AuthError {
    fn new(step: AuthStep, source: ApiError) -> Self {
        Self { step, source }
    }
}

/// Drives the authentication state machine over a [`Backend`] and
/// persists the session token in a [`SessionStore`].
#[derive(Debug)]
pub struct AuthFlow<B, S> {
    backend: B,
    store: S,
    state: AuthState,
}

impl<B: Backend, S: SessionStore> AuthFlow<B, S> {
    /// Start logged out, regardless of what the store holds.
    pub fn new(backend: B, store: S) -> Self {
        Self {
            backend,
            store,
            state: AuthState::LoggedOut,
        }
    }

    /// Restore a prior session: logged in exactly when the store holds a
    /// token. A store that cannot be read is treated as empty.
    pub fn resume(backend: B, store: S) -> Self {
        let state = match store.load() {
            Ok(Some(_)) => {
                debug!("resumed stored session");
                AuthState::LoggedIn
            }
            Ok(None) => AuthState::LoggedOut,
            Err(err) => {
                warn!(error = %err, "session store unreadable, starting logged out");
                AuthState::LoggedOut
            }
        };
        Self { backend, store, state }
    }

    pub fn state(&self) -> AuthState {
        self.state
    }

    pub fn is_logged_in(&self) -> bool {
        self.state == AuthState::LoggedIn
    }

    /// Exchange credentials for a token and persist it. On any failure
    /// the state is `LoggedOut` and nothing is persisted.
    pub fn login(&mut self, creds: &Credentials) -> std::result::Result<(), AuthError> {
        validate(creds).map_err(|e| AuthError::new(AuthStep::Login, e))?;
        self.state = AuthState::LoggingIn;
        self.login_inner(creds)
    }

    /// Register a new account, then log in with the same credentials.
    /// A failure is tagged with whichever of the two steps failed.
    pub fn signup(&mut self, creds: &Credentials) -> std::result::Result<(), AuthError> {
        validate(creds).map_err(|e| AuthError::new(AuthStep::Signup, e))?;
        self.state = AuthState::SigningUp;
        if let Err(err) = self.backend.signup(creds) {
            self.state = AuthState::LoggedOut;
            return Err(AuthError::new(AuthStep::Signup, err));
        }
        debug!("account created, logging in");
        self.state = AuthState::LoggingIn;
        self.login_inner(creds)
    }

    /// Discard the stored token. Always ends logged out, even when the
    /// store fails to clear.
    pub fn logout(&mut self) -> std::result::Result<(), AuthError> {
        self.state = AuthState::LoggedOut;
        self.store
            .clear()
            .map_err(|e| AuthError::new(AuthStep::Logout, e))
    }

    fn login_inner(&mut self, creds: &Credentials) -> std::result::Result<(), AuthError> {
        let token = match self.backend.login(creds) {
            Ok(token) => token,
            Err(err) => {
                self.state = AuthState::LoggedOut;
                return Err(AuthError::new(AuthStep::Login, err));
            }
        };
        if let Err(err) = self.store.save(&token) {
            // A token we cannot persist would strand the next launch in
            // a half-logged-in state, so treat it as a failed login.
            self.state = AuthState::LoggedOut;
            return Err(AuthError::new(AuthStep::Login, err));
        }
        self.state = AuthState::LoggedIn;
        Ok(())
    }
}

fn validate(creds: &Credentials) -> Result<()> {
    if creds.email.trim().is_empty() {
        return Err(ApiError::Validation { field: "email" });
    }
    if creds.password.is_empty() {
        return Err(ApiError::Validation { field: "password" });
    }
    Ok(())
}
