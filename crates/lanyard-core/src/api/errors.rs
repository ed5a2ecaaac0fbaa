use std::fmt;

/// Failure taxonomy for everything the gateway and session can surface.
///
/// Every variant carries (or implies) a human-readable message; callers
/// display it and retry manually. Nothing here is retried automatically.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Network-level failure: no usable server response (connect errors,
    /// timeouts, non-2xx statuses other than 401, undecodable bodies).
    Transport(String),
    /// The server responded but the envelope indicated failure or carried
    /// no data. The message is server-supplied when present, otherwise the
    /// operation's fixed fallback string.
    RequestFailed(String),
    /// HTTP 401. The gateway has already dropped the bearer token by the
    /// time this is returned.
    AuthExpired,
    /// Pre-flight form violation; never reached the network.
    Validation(String),
}

impl ApiError {
    /// Classifies a reqwest error. Timeouts are not distinguished from
    /// other transport failures.
    pub(crate) fn from_reqwest(e: &reqwest::Error) -> Self {
        if e.is_timeout() {
            ApiError::Transport(format!("Request timed out: {e}"))
        } else if e.is_connect() {
            ApiError::Transport(format!("Connection failed: {e}"))
        } else {
            ApiError::Transport(format!("Network error: {e}"))
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // RequestFailed carries the message the UI shows verbatim.
            ApiError::RequestFailed(msg) => write!(f, "{msg}"),
            ApiError::Transport(msg) | ApiError::Validation(msg) => write!(f, "{msg}"),
            ApiError::AuthExpired => write!(f, "Authentication expired; please log in again"),
        }
    }
}

impl std::error::Error for ApiError {}

/// Errors surfaced by session operations.
#[derive(Debug)]
pub enum SessionError {
    /// The gateway call underneath failed.
    Api(ApiError),
    /// The credential store could not be read or written.
    Store(anyhow::Error),
    /// A logout (or newer login) bumped the session generation while this
    /// operation was in flight; its result was discarded.
    Superseded,
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::Api(e) => write!(f, "{e}"),
            SessionError::Store(e) => write!(f, "{e}"),
            SessionError::Superseded => {
                write!(f, "Login superseded by a newer session operation")
            }
        }
    }
}

impl std::error::Error for SessionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SessionError::Api(e) => Some(e),
            SessionError::Store(e) => Some(e.as_ref()),
            SessionError::Superseded => None,
        }
    }
}

impl From<ApiError> for SessionError {
    fn from(e: ApiError) -> Self {
        SessionError::Api(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// RequestFailed displays the server message verbatim, no prefix.
    #[test]
    fn test_request_failed_displays_message_verbatim() {
        let err = ApiError::RequestFailed("Credenciais inválidas".to_string());
        assert_eq!(err.to_string(), "Credenciais inválidas");
    }

    #[test]
    fn test_session_error_delegates_display() {
        let err = SessionError::Api(ApiError::RequestFailed("nope".to_string()));
        assert_eq!(err.to_string(), "nope");
    }
}
