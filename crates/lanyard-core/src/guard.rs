//! Route guard.
//!
//! Synchronous predicate consulted before every protected view: allow when
//! the session is authenticated, otherwise deny and remember the requested
//! route so it can be resumed after a successful login.

use std::sync::{Mutex, PoisonError};

use crate::api::types::Section;
use crate::session::Session;

/// A navigable destination in the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Events,
    Event(String),
    Section { event_id: String, section: Section },
    Badge(String),
    Registrations,
}

/// Outcome of a guard check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Access {
    Granted,
    /// Redirect to the login entry point; `return_to` is the originally
    /// requested location.
    LoginRequired { return_to: Route },
}

/// Gate in front of the informational views.
#[derive(Debug, Default)]
pub struct RouteGuard {
    pending: Mutex<Option<Route>>,
}

impl RouteGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Checks whether `route` may be entered right now. Denied routes are
    /// recorded; [`RouteGuard::take_return_to`] yields the latest one once
    /// login succeeds.
    pub fn check(&self, session: &Session, route: Route) -> Access {
        if session.is_authenticated() {
            return Access::Granted;
        }

        *self.pending.lock().unwrap_or_else(PoisonError::into_inner) = Some(route.clone());
        Access::LoginRequired { return_to: route }
    }

    /// Consumes the route that was denied before login, if any.
    pub fn take_return_to(&self) -> Option<Route> {
        self.pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
    }
}
