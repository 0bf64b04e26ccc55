//! API collaborator error types.

use thiserror::Error;

/// Fallback message when the remote gives no usable one.
pub const GENERIC_FAILURE: &str = "Please try again later.";

/// Errors from the outbound API collaborator.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never completed (connect failure, timeout).
    #[error("transport error: {message}")]
    Transport {
        /// Underlying transport failure.
        message: String,
    },

    /// The remote answered with a non-success HTTP status.
    #[error("http {status}: {message}")]
    Http {
        /// HTTP status code.
        status: u16,
        /// Response body, when readable.
        message: String,
    },

    /// The remote answered 2xx but reported a non-success status field.
    #[error("remote failure: {message}")]
    Remote {
        /// Remote-provided failure message.
        message: String,
    },

    /// The response body could not be decoded.
    #[error("response decode error: {message}")]
    Decode {
        /// Why decoding failed.
        message: String,
    },

    /// The client was constructed with an unusable value.
    #[error("invalid input: {field}: {reason}")]
    InvalidInput {
        /// Which input was rejected.
        field: &'static str,
        /// Why it was rejected.
        reason: String,
    },
}

impl ApiError {
    /// Returns the message to surface to the user.
    ///
    /// Remote-provided messages pass through; transport and decode
    /// failures fall back to the generic message, with details going to
    /// the log rather than the user.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Remote { message } | Self::Http { message, .. } if !message.trim().is_empty() => {
                message.clone()
            },
            _ => GENERIC_FAILURE.to_string(),
        }
    }
}
