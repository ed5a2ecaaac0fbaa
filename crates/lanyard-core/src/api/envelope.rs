//! The `{success, message, data}` wrapper every backend response uses.

use serde::Deserialize;

use super::errors::ApiError;

/// Wire envelope. The gateway's sole decoding responsibility is collapsing
/// this into `T` or an error.
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    pub success: bool,
    pub message: Option<String>,
    pub data: Option<T>,
}

impl<T> Envelope<T> {
    /// Collapses the envelope into its payload.
    ///
    /// `fallback` is the operation's fixed message, used when the server
    /// indicated failure without saying why (or claimed success while
    /// omitting the data).
    pub fn into_data(self, fallback: &str) -> Result<T, ApiError> {
        match (self.success, self.data) {
            (true, Some(data)) => Ok(data),
            (_, _) => Err(ApiError::RequestFailed(
                self.message.unwrap_or_else(|| fallback.to_string()),
            )),
        }
    }

    /// Collapses an envelope whose payload is the message itself
    /// (registration acks carry no `data`).
    pub fn into_ack(self, ack_fallback: &str, fail_fallback: &str) -> Result<String, ApiError> {
        if self.success {
            Ok(self.message.unwrap_or_else(|| ack_fallback.to_string()))
        } else {
            Err(ApiError::RequestFailed(
                self.message.unwrap_or_else(|| fail_fallback.to_string()),
            ))
        }
    }
}
