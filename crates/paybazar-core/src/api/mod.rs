//! Outbound API collaborator: wire types, errors, and the client trait
//! with its HTTP and mock implementations.

pub mod client;
pub mod error;
pub mod types;

pub use client::{HttpPanelApi, MockPanelApi, PanelApi, RecordedCall};
pub use error::{ApiError, GENERIC_FAILURE};
pub use types::{
    ApiResponse, CreateUserRequest, FundRequest, LoginRequest, LoginResponse,
    REQUEST_STATUS_PENDING,
};
