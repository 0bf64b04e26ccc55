//! Backend API collaborator.
//!
//! The production client speaks HTTP with a bearer header; the mock
//! records calls and returns canned responses so flows can be exercised
//! without a backend.
//!
//! ```text
//! PanelApi (trait)
//!     |
//!     +-- HttpPanelApi (reqwest, production)
//!     |
//!     +-- MockPanelApi (canned responses, call recording)
//! ```

use std::sync::Mutex;
use std::time::Duration;

use secrecy::SecretString;
use serde::Serialize;
use tracing::debug;

use super::error::ApiError;
use super::types::{ApiResponse, CreateUserRequest, FundRequest, LoginRequest, LoginResponse};
use crate::session::{Role, bearer};

/// Path of the create-user endpoint.
const CREATE_USER_PATH: &str = "/distributor/create/user";

/// Path of the fund-request endpoint.
const FUND_REQUEST_PATH: &str = "/fund/request";

/// Outbound API collaborator.
pub trait PanelApi {
    /// Authenticates against the role's login endpoint.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or an undecodable response.
    fn login(&self, role: Role, request: &LoginRequest) -> Result<LoginResponse, ApiError>;

    /// Creates a retailer/distributor user under the session's network.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, a non-2xx status, or an
    /// undecodable response.
    fn create_user(
        &self,
        token: &SecretString,
        request: &CreateUserRequest,
    ) -> Result<ApiResponse, ApiError>;

    /// Submits a fund request.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, a non-2xx status, or an
    /// undecodable response.
    fn submit_fund_request(
        &self,
        token: &SecretString,
        request: &FundRequest,
    ) -> Result<ApiResponse, ApiError>;

    /// Returns the collaborator name for logging.
    fn name(&self) -> &'static str;
}

/// Production API client over HTTP.
pub struct HttpPanelApi {
    base_url: String,
    client: reqwest::blocking::Client,
}

impl HttpPanelApi {
    /// Creates a client against `base_url`.
    ///
    /// # Errors
    ///
    /// Returns an error when the base URL is empty or the HTTP client
    /// cannot be initialized.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ApiError> {
        let base_url = base_url.into();
        if base_url.trim().is_empty() {
            return Err(ApiError::InvalidInput {
                field: "base_url",
                reason: "must not be empty".to_string(),
            });
        }

        let client = reqwest::blocking::Client::builder()
            .connect_timeout(Duration::from_secs(15))
            .timeout(Duration::from_secs(60))
            .build()
            .map_err(|e| ApiError::Transport {
                message: e.to_string(),
            })?;

        Ok(Self { base_url, client })
    }

    /// Returns the role's login endpoint path.
    #[must_use]
    pub const fn login_path(role: Role) -> &'static str {
        match role {
            Role::Master => "/master/login",
            Role::Distributor => "/distributor/login",
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.base_url.trim_end_matches('/'))
    }

    fn post<B: Serialize>(
        &self,
        path: &str,
        token: Option<&SecretString>,
        body: &B,
    ) -> Result<reqwest::blocking::Response, ApiError> {
        let endpoint = self.endpoint(path);
        debug!(%endpoint, "outbound request");

        let mut request = self.client.post(&endpoint).json(body);
        if let Some(token) = token {
            request = request.bearer_auth(bearer(token));
        }

        let response = request.send().map_err(|e| ApiError::Transport {
            message: e.to_string(),
        })?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .unwrap_or_else(|_| "unable to read response body".to_string());
            return Err(ApiError::Http {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response)
    }

    fn post_enveloped<B: Serialize>(
        &self,
        path: &str,
        token: &SecretString,
        body: &B,
    ) -> Result<ApiResponse, ApiError> {
        self.post(path, Some(token), body)?
            .json()
            .map_err(|e| ApiError::Decode {
                message: e.to_string(),
            })
    }
}

impl PanelApi for HttpPanelApi {
    fn login(&self, role: Role, request: &LoginRequest) -> Result<LoginResponse, ApiError> {
        self.post(Self::login_path(role), None, request)?
            .json()
            .map_err(|e| ApiError::Decode {
                message: e.to_string(),
            })
    }

    fn create_user(
        &self,
        token: &SecretString,
        request: &CreateUserRequest,
    ) -> Result<ApiResponse, ApiError> {
        self.post_enveloped(CREATE_USER_PATH, token, request)
    }

    fn submit_fund_request(
        &self,
        token: &SecretString,
        request: &FundRequest,
    ) -> Result<ApiResponse, ApiError> {
        self.post_enveloped(FUND_REQUEST_PATH, token, request)
    }

    fn name(&self) -> &'static str {
        "http"
    }
}

/// One call recorded by [`MockPanelApi`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    /// Endpoint path the call targeted.
    pub path: String,
    /// Serialized request body.
    pub body: serde_json::Value,
    /// Whether a bearer token was attached.
    pub authenticated: bool,
}

/// Mock API collaborator for tests.
///
/// Records every call and answers from a configurable response. The
/// default response is a bare success.
pub struct MockPanelApi {
    calls: Mutex<Vec<RecordedCall>>,
    response: Mutex<ApiResponse>,
    login_token: Mutex<Option<String>>,
}

impl Default for MockPanelApi {
    fn default() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            response: Mutex::new(ApiResponse {
                status: "success".to_string(),
                message: None,
            }),
            login_token: Mutex::new(Some("mock-token".to_string())),
        }
    }
}

impl MockPanelApi {
    /// Creates a mock that answers success to everything.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the response every subsequent call receives.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn set_response(&self, response: ApiResponse) {
        *self.response.lock().expect("mock lock") = response;
    }

    /// Sets the token the login endpoint issues (`None` = no token).
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn set_login_token(&self, token: Option<String>) {
        *self.login_token.lock().expect("mock lock") = token;
    }

    /// Returns every recorded call, oldest first.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().expect("mock lock").clone()
    }

    /// Returns the number of recorded calls.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.calls.lock().expect("mock lock").len()
    }

    fn record<B: Serialize>(&self, path: &str, body: &B, authenticated: bool) {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(RecordedCall {
                path: path.to_string(),
                body: serde_json::to_value(body).unwrap_or(serde_json::Value::Null),
                authenticated,
            });
        }
    }

    fn canned_response(&self) -> ApiResponse {
        self.response.lock().expect("mock lock").clone()
    }
}

impl PanelApi for MockPanelApi {
    fn login(&self, role: Role, request: &LoginRequest) -> Result<LoginResponse, ApiError> {
        self.record(HttpPanelApi::login_path(role), request, false);
        let response = self.canned_response();
        Ok(LoginResponse {
            status: response.status,
            message: response.message,
            token: self.login_token.lock().expect("mock lock").clone(),
        })
    }

    fn create_user(
        &self,
        _token: &SecretString,
        request: &CreateUserRequest,
    ) -> Result<ApiResponse, ApiError> {
        self.record(CREATE_USER_PATH, request, true);
        Ok(self.canned_response())
    }

    fn submit_fund_request(
        &self,
        _token: &SecretString,
        request: &FundRequest,
    ) -> Result<ApiResponse, ApiError> {
        self.record(FUND_REQUEST_PATH, request, true);
        Ok(self.canned_response())
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}
