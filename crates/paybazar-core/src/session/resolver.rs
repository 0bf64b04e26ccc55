//! Session resolution and the centralized role gate.
//!
//! Every protected operation goes through [`SessionResolver::require_role`]
//! (or [`SessionResolver::require_authenticated`] where either role is
//! acceptable). The gate is the only place that clears persisted state and
//! redirects to login, so the expiry and decode checks cannot be skipped
//! by an individual page the way they were in earlier revisions of the
//! panel.

use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, info, warn};

use super::claims::{Role, SessionClaims};
use super::error::SessionError;
use super::store::{SessionStore, StorageKey};
use crate::notify::{Notice, Notifier};
use crate::router::{Navigator, Route};

/// Source of the current time, in Unix seconds.
///
/// Production code uses [`SystemTimeSource`]; tests pin a fixed value to
/// make expiry checks deterministic.
pub trait TimeSource {
    /// Returns the current Unix timestamp in seconds.
    fn now_unix(&self) -> u64;
}

/// Wall-clock time source.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemTimeSource;

impl TimeSource for SystemTimeSource {
    fn now_unix(&self) -> u64 {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0)
    }
}

/// Fixed time source for tests.
#[derive(Debug, Clone, Copy)]
pub struct FixedTimeSource(pub u64);

impl TimeSource for FixedTimeSource {
    fn now_unix(&self) -> u64 {
        self.0
    }
}

/// Outcome of resolving the persisted session.
#[derive(Debug)]
pub enum Resolution {
    /// A live session with a consistent role and claims.
    Authenticated {
        /// Role the session holds.
        role: Role,
        /// Claims decoded from the credential.
        claims: SessionClaims,
    },
    /// No usable session.
    Unauthenticated {
        /// Why resolution failed.
        reason: SessionError,
    },
}

/// A session that passed the gate for a protected operation.
///
/// Carries the bearer token for the outbound call alongside the resolved
/// identity. The token stays wrapped until the HTTP boundary.
pub struct AuthorizedSession {
    /// Role the session holds.
    pub role: Role,
    /// Claims decoded from the credential.
    pub claims: SessionClaims,
    /// Bearer token for the `Authorization` header.
    pub token: SecretString,
}

impl std::fmt::Debug for AuthorizedSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // The token is deliberately absent.
        f.debug_struct("AuthorizedSession")
            .field("role", &self.role)
            .field("claims", &self.claims)
            .finish_non_exhaustive()
    }
}

/// Resolves and gates the persisted session.
pub struct SessionResolver<S, T = SystemTimeSource> {
    store: S,
    time: T,
}

impl<S: SessionStore> SessionResolver<S> {
    /// Creates a resolver over `store` using the wall clock.
    #[must_use]
    pub fn new(store: S) -> Self {
        Self {
            store,
            time: SystemTimeSource,
        }
    }
}

impl<S: SessionStore, T: TimeSource> SessionResolver<S, T> {
    /// Creates a resolver with an explicit time source.
    #[must_use]
    pub fn with_time_source(store: S, time: T) -> Self {
        Self { store, time }
    }

    /// Returns a reference to the underlying store.
    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Establishes a session: stores the credential, role, and email.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be written.
    pub fn login(&self, token: &str, role: Role, email: &str) -> Result<(), SessionError> {
        self.store.set(StorageKey::AuthToken, token)?;
        self.store.set(StorageKey::UserRole, role.as_str())?;
        self.store.set(StorageKey::UserEmail, email)?;
        info!(role = %role, "session established");
        Ok(())
    }

    /// Clears the session and navigates back to the login route.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be written.
    pub fn logout(&self, navigator: &mut dyn Navigator) -> Result<(), SessionError> {
        self.store.clear()?;
        navigator.navigate(Route::Login);
        info!("session cleared");
        Ok(())
    }

    /// Resolves the persisted session without side effects.
    ///
    /// Reads the credential and role keys, decodes the claims, checks
    /// expiry against the time source, and cross-checks that the claims
    /// actually carry an identity for the persisted role. Any failure
    /// yields `Unauthenticated` with the reason; nothing is cleared or
    /// redirected here.
    #[must_use]
    pub fn resolve(&self) -> Resolution {
        match self.try_resolve() {
            Ok((role, claims)) => Resolution::Authenticated { role, claims },
            Err(reason) => Resolution::Unauthenticated { reason },
        }
    }

    fn try_resolve(&self) -> Result<(Role, SessionClaims), SessionError> {
        let token = self
            .store
            .get(StorageKey::AuthToken)?
            .ok_or(SessionError::MissingCredential)?;
        let role = self
            .store
            .get(StorageKey::UserRole)?
            .ok_or(SessionError::MissingCredential)?
            .parse::<Role>()?;

        let claims = SessionClaims::decode(&token)?;

        let now = self.time.now_unix();
        if claims.is_expired(now) {
            return Err(SessionError::Expired {
                expired_at: claims.exp,
                now,
            });
        }

        // The role key is persisted independently of the credential; a
        // role the claims cannot back is treated as a decode failure.
        claims.requester_identity(role)?;

        Ok((role, claims))
    }

    /// Gates a protected operation on `expected`.
    ///
    /// On success returns the authorized session, including the bearer
    /// token for the outbound call. On any failure (missing or
    /// undecodable credential, expired session, or a role other than
    /// `expected`) it clears all persisted state, surfaces a destructive
    /// notice, navigates to `/login`, and returns the reason.
    ///
    /// # Errors
    ///
    /// Returns the [`SessionError`] that failed the gate.
    pub fn require_role(
        &self,
        expected: Role,
        navigator: &mut dyn Navigator,
        notifier: &dyn Notifier,
    ) -> Result<AuthorizedSession, SessionError> {
        self.gate(Some(expected), navigator, notifier)
    }

    /// Gates a protected operation that accepts either role.
    ///
    /// Same remediation as [`Self::require_role`] on failure.
    ///
    /// # Errors
    ///
    /// Returns the [`SessionError`] that failed the gate.
    pub fn require_authenticated(
        &self,
        navigator: &mut dyn Navigator,
        notifier: &dyn Notifier,
    ) -> Result<AuthorizedSession, SessionError> {
        self.gate(None, navigator, notifier)
    }

    fn gate(
        &self,
        expected: Option<Role>,
        navigator: &mut dyn Navigator,
        notifier: &dyn Notifier,
    ) -> Result<AuthorizedSession, SessionError> {
        let outcome = match self.resolve() {
            Resolution::Authenticated { role, claims } => match expected {
                Some(expected) if role != expected => Err(SessionError::RoleMismatch { role }),
                _ => Ok((role, claims)),
            },
            Resolution::Unauthenticated { reason } => Err(reason),
        };

        match outcome {
            Ok((role, claims)) => {
                // Re-read under the same lock discipline as resolve();
                // the token was present a moment ago.
                let token = self
                    .store
                    .get(StorageKey::AuthToken)?
                    .ok_or(SessionError::MissingCredential)?;
                debug!(role = %role, "session gate passed");
                Ok(AuthorizedSession {
                    role,
                    claims,
                    token: SecretString::from(token),
                })
            },
            Err(reason) => {
                warn!(error = %reason, "session gate failed");
                self.clear_session();
                notifier.notify(Notice::destructive(
                    reason.notice_title(),
                    "Please log in again.",
                ));
                navigator.navigate(Route::Login);
                Err(reason)
            },
        }
    }

    /// Best-effort clear; a store failure here is logged, not propagated,
    /// because the caller is already on a failure path.
    fn clear_session(&self) {
        if let Err(error) = self.store.clear() {
            warn!(%error, "failed to clear session state");
        }
    }
}

/// Exposes the bearer token for an outbound request header.
///
/// Lives here rather than on [`AuthorizedSession`] so the exposure site
/// is easy to audit.
#[must_use]
pub fn bearer(token: &SecretString) -> &str {
    token.expose_secret()
}
