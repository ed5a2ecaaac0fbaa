//! Client-side session state machine.
//!
//! Tracks the current authenticated identity and orchestrates
//! login/logout/restore against the credential store and the API gateway.
//! A `Session` is an explicitly constructed value (no hidden globals); share
//! it as `Arc<Session>` when operations may overlap.
//!
//! The bearer token has a single owner, the [`TokenCell`]: the session sets
//! and clears it, the gateway reads it per request and drops it on a 401.
//! `is_authenticated` is derived from the same cell, so a 401 anywhere
//! immediately demotes the session to anonymous.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock};

use crate::api::ApiClient;
use crate::api::errors::SessionError;
use crate::api::types::StoredUser;

mod store;

pub use store::{CredentialStore, StoredCredential};

/// The one copy of the bearer token, shared between session and gateway.
#[derive(Debug, Default)]
pub struct TokenCell {
    inner: RwLock<Option<String>>,
}

impl TokenCell {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> Option<String> {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn is_set(&self) -> bool {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    pub fn set(&self, token: impl Into<String>) {
        *self.inner.write().unwrap_or_else(PoisonError::into_inner) = Some(token.into());
    }

    pub fn clear(&self) {
        *self.inner.write().unwrap_or_else(PoisonError::into_inner) = None;
    }
}

/// Where the session currently stands. `Error` is anonymous plus a recorded
/// message; it gates nothing the plain anonymous state wouldn't.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Anonymous,
    Authenticating,
    Authenticated,
    Error,
}

/// Consistent copy of the session state for display.
#[derive(Debug, Clone)]
pub struct SessionSnapshot {
    pub user: Option<StoredUser>,
    pub token: Option<String>,
    pub is_authenticated: bool,
    pub is_loading: bool,
    pub error: Option<String>,
}

#[derive(Debug, Default)]
struct Inner {
    user: Option<StoredUser>,
    is_loading: bool,
    error: Option<String>,
    /// Bumped by logout (and each new login attempt). An async response
    /// issued under an older generation is stale and must be discarded.
    generation: u64,
}

/// Session state machine.
pub struct Session {
    tokens: Arc<TokenCell>,
    store: CredentialStore,
    inner: Mutex<Inner>,
}

impl Session {
    pub fn new(store: CredentialStore, tokens: Arc<TokenCell>) -> Self {
        Self {
            tokens,
            store,
            inner: Mutex::new(Inner::default()),
        }
    }

    /// The token cell this session owns. Hand a clone of the `Arc` to the
    /// gateway so both observe the same credential.
    pub fn tokens(&self) -> Arc<TokenCell> {
        Arc::clone(&self.tokens)
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// True iff both a user and a token are present.
    pub fn is_authenticated(&self) -> bool {
        self.lock().user.is_some() && self.tokens.is_set()
    }

    pub fn phase(&self) -> SessionPhase {
        let inner = self.lock();
        if inner.is_loading {
            SessionPhase::Authenticating
        } else if inner.user.is_some() && self.tokens.is_set() {
            SessionPhase::Authenticated
        } else if inner.error.is_some() {
            SessionPhase::Error
        } else {
            SessionPhase::Anonymous
        }
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let inner = self.lock();
        let token = self.tokens.get();
        SessionSnapshot {
            is_authenticated: inner.user.is_some() && token.is_some(),
            user: inner.user.clone(),
            token,
            is_loading: inner.is_loading,
            error: inner.error.clone(),
        }
    }

    /// Restores the session from the credential store, once at startup.
    ///
    /// Trusts the store: when both token and user are present the session
    /// becomes authenticated without any network call. Returns whether a
    /// credential was restored.
    pub fn restore(&self) -> Result<bool, SessionError> {
        let mut inner = self.lock();
        inner.is_loading = true;

        let restored = match self.store.load().map_err(SessionError::Store)? {
            Some(credential) => {
                self.tokens.set(credential.token);
                inner.user = Some(credential.user);
                true
            }
            None => {
                inner.user = None;
                false
            }
        };

        inner.is_loading = false;
        Ok(restored)
    }

    /// Logs in against the gateway.
    ///
    /// On success the credential is persisted and pushed into the token
    /// cell. On failure the message is recorded in session state for
    /// display *and* returned to the caller for flow control. If a logout
    /// lands while the request is in flight, the response is discarded and
    /// `Superseded` is returned.
    pub async fn login(
        &self,
        api: &ApiClient,
        email: &str,
        password: &str,
    ) -> Result<(), SessionError> {
        let generation = {
            let mut inner = self.lock();
            inner.is_loading = true;
            inner.error = None;
            // Each attempt claims its own generation, so an older login
            // still in flight resolves as stale once this one starts.
            inner.generation += 1;
            inner.generation
        };

        let outcome = api.login(email, password).await;

        let mut inner = self.lock();
        if inner.generation != generation {
            // A logout (or newer login) won the race; this response is
            // stale no matter what it says.
            return Err(SessionError::Superseded);
        }

        match outcome {
            Ok(auth) => {
                if let Err(e) = self.store.save(&StoredCredential {
                    token: auth.token.clone(),
                    user: auth.user.clone(),
                }) {
                    inner.is_loading = false;
                    inner.error = Some(e.to_string());
                    return Err(SessionError::Store(e));
                }
                self.tokens.set(auth.token);
                inner.user = Some(auth.user);
                inner.is_loading = false;
                Ok(())
            }
            Err(err) => {
                self.tokens.clear();
                inner.user = None;
                inner.is_loading = false;
                inner.error = Some(err.to_string());
                Err(SessionError::Api(err))
            }
        }
    }

    /// Clears the store, the token cell, and the in-memory state.
    ///
    /// Bumps the generation so any in-flight login resolves as stale.
    /// Returns whether a stored credential existed.
    pub fn logout(&self) -> Result<bool, SessionError> {
        let mut inner = self.lock();
        inner.is_loading = true;
        inner.generation += 1;

        let had_credential = self.store.clear().map_err(SessionError::Store)?;
        self.tokens.clear();
        inner.user = None;
        inner.error = None;
        inner.is_loading = false;
        Ok(had_credential)
    }

    /// Drops the recorded error message without touching anything else.
    pub fn clear_error(&self) {
        self.lock().error = None;
    }
}

/// Returns a masked version of a token for display (first 8 chars + ...).
pub fn mask_token(token: &str) -> String {
    if token.len() <= 12 {
        return "***".to_string();
    }
    format!("{}...", &token[..8])
}
