//! Session lifecycle error types.

use thiserror::Error;

use super::claims::Role;
use super::store::StoreError;

/// Errors that can occur while resolving or gating a session.
#[derive(Debug, Error)]
pub enum SessionError {
    /// No credential is present in the session store.
    #[error("no stored credential")]
    MissingCredential,

    /// The stored credential could not be decoded into claims.
    #[error("credential decode failed: {reason}")]
    Decode {
        /// Why the credential was rejected.
        reason: String,
    },

    /// The credential's `exp` claim has elapsed.
    #[error("session expired at {expired_at} (now {now})")]
    Expired {
        /// Expiry timestamp from the claims, in Unix seconds.
        expired_at: u64,
        /// Current time when the check ran, in Unix seconds.
        now: u64,
    },

    /// The persisted role is not backed by a matching identity claim.
    ///
    /// The role key is persisted separately from the credential; a token
    /// whose claims carry no identity field for that role is treated the
    /// same as an undecodable one.
    #[error("claims carry no identity for role {role}")]
    RoleMismatch {
        /// The role the session claimed to hold.
        role: Role,
    },

    /// The claims are missing a field a payload assembly requires.
    #[error("claims missing field: {field}")]
    MissingClaim {
        /// Name of the absent claims field.
        field: &'static str,
    },

    /// The session store failed.
    #[error("session store error: {0}")]
    Store(#[from] StoreError),
}

impl SessionError {
    /// Returns the user-facing notice title for this failure.
    ///
    /// Expiry gets its own wording; every other terminal session failure
    /// surfaces as an invalid session.
    #[must_use]
    pub const fn notice_title(&self) -> &'static str {
        match self {
            Self::Expired { .. } => "Session expired",
            _ => "Invalid session",
        }
    }
}
