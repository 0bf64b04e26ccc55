//! Session identity resolution and role gating.
//!
//! The panel keeps a bearer credential, a role, and an email in persisted
//! state. This module is the only code that reads or writes those keys:
//! pages and commands go through [`SessionResolver`], which centralizes
//! the decode, expiry, and role-consistency checks that earlier panel
//! revisions repeated (inconsistently) on every page.
//!
//! # Session Lifecycle
//!
//! ```text
//!            login(token, role, email)
//! (no keys) ──────────────────────────> authToken + userRole + userEmail
//!     ^                                          │
//!     │          logout() / gate failure         │ resolve()
//!     └──────────────────────────────────────────┤
//!        (all keys cleared together)             v
//!                               Authenticated(role, claims)
//!                               or Unauthenticated(reason)
//! ```
//!
//! Gate failures (missing or undecodable credential, elapsed `exp`, or a
//! role the claims cannot back) all take the same path: clear every
//! persisted key, surface a destructive notice, navigate to `/login`.
//!
//! # Trust Model
//!
//! Claims are decoded without signature verification and gate UI flow
//! only. The backend API re-authorizes every request from the bearer
//! token itself.

pub mod claims;
pub mod error;
pub mod resolver;
pub mod store;

pub use claims::{
    IdentityClaims, REQUESTER_TYPE_DISTRIBUTOR, REQUESTER_TYPE_MASTER, Role, SessionClaims,
};
pub use error::SessionError;
pub use resolver::{
    AuthorizedSession, FixedTimeSource, Resolution, SessionResolver, SystemTimeSource, TimeSource,
    bearer,
};
pub use store::{FileStore, MemoryStore, SessionStore, StorageKey, StoreError};
