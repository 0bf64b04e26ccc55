//! paybazar-core - PayBazaar Panel Core Library
//!
//! Core logic for the PayBazaar multi-tier payment distribution panel:
//! role-based session resolution and declarative form validation, plus the
//! thin API client the validated payloads are submitted through.
//!
//! Two cooperating concerns make up the library:
//!
//! - [`session`]: decodes the stored bearer credential into identity
//!   claims, gates role-specific operations, and expires/clears sessions.
//! - [`forms`]: validates user input against declarative schemas and
//!   drives the per-form submission state machine.
//!
//! Supporting modules:
//!
//! - [`api`]: outbound HTTP collaborator (create user, fund request,
//!   login) with a mock implementation for tests
//! - [`router`]: client-side navigation abstraction the session gate
//!   redirects through
//! - [`notify`]: user-facing notice seam (success/destructive)
//! - [`config`]: panel configuration (API base URL, session file path)
//!
//! # Control Flow
//!
//! ```text
//! operation start
//!     |
//!     v
//! SessionResolver::require_role ----(unauthenticated)----> /login, state cleared
//!     |
//!     v
//! FormSchema::validate ----(errors)----> field -> message mapping
//!     |
//!     v
//! FormController::submit ----> PanelApi (Authorization: Bearer <token>)
//! ```

pub mod api;
pub mod config;
pub mod forms;
pub mod notify;
pub mod router;
pub mod session;

pub use api::{
    ApiError, ApiResponse, CreateUserRequest, FundRequest, HttpPanelApi, LoginRequest,
    LoginResponse, MockPanelApi, PanelApi,
};
pub use config::{ConfigError, PanelConfig};
pub use forms::{
    Constraint, FieldSchema, FormController, FormError, FormSchema, FormState, FormValues,
    SubmitOutcome, SubmitResult,
};
pub use notify::{Notice, Notifier, RecordingNotifier, Severity, TracingNotifier};
pub use router::{Navigator, Route, RouteHistory};
pub use session::{
    AuthorizedSession, FileStore, FixedTimeSource, IdentityClaims, MemoryStore, Resolution, Role,
    SessionClaims, SessionError, SessionResolver, SessionStore, StorageKey, StoreError,
    SystemTimeSource, TimeSource,
};
