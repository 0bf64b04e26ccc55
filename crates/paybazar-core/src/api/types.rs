//! Wire types for the backend API.
//!
//! Field names follow the backend contract exactly; payload assembly
//! combines validated form values with resolved identity claims.

use serde::{Deserialize, Serialize};

use crate::forms::FormValues;
use crate::session::{Role, SessionClaims, SessionError};

/// Initial status every fund request is submitted with.
pub const REQUEST_STATUS_PENDING: &str = "pending";

/// Generic response envelope: `status` discriminates success.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse {
    /// `"success"` on acceptance; anything else is a failure.
    pub status: String,

    /// Remote-provided message, when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ApiResponse {
    /// Returns `true` when the remote accepted the request.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status == "success"
    }
}

/// Login request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    /// Login email.
    pub email: String,
    /// Login password.
    pub password: String,
}

/// Login response: the envelope plus the issued bearer token.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    /// `"success"` on acceptance.
    pub status: String,

    /// Remote-provided message, when present.
    #[serde(default)]
    pub message: Option<String>,

    /// Bearer token, present on success.
    #[serde(default)]
    pub token: Option<String>,
}

impl LoginResponse {
    /// Returns `true` when the login was accepted.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status == "success"
    }
}

/// Body for `POST /distributor/create/user`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUserRequest {
    /// Master distributor the new user hangs under.
    pub master_distributor_id: String,
    /// Owning admin account.
    pub admin_id: String,
    /// Creating distributor.
    pub distributor_id: String,
    /// New user's display name.
    pub user_name: String,
    /// New user's email.
    pub user_email: String,
    /// New user's initial password.
    pub user_password: String,
    /// New user's phone number.
    pub user_phone: String,
    /// New user's address.
    pub user_address: String,
}

impl CreateUserRequest {
    /// Assembles the payload from identity claims and validated values.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::MissingClaim`] when the claims lack an
    /// identity field the payload requires.
    pub fn assemble(claims: &SessionClaims, values: &FormValues) -> Result<Self, SessionError> {
        Ok(Self {
            master_distributor_id: claims
                .data
                .master_distributor_id
                .clone()
                .ok_or(SessionError::MissingClaim {
                    field: "master_distributor_id",
                })?,
            admin_id: claims.data.admin_id.clone(),
            distributor_id: claims
                .data
                .distributor_id
                .clone()
                .ok_or(SessionError::MissingClaim {
                    field: "distributor_id",
                })?,
            user_name: values.get("name").to_string(),
            user_email: values.get("email").to_string(),
            user_password: values.get("password").to_string(),
            user_phone: values.get("phone").to_string(),
            user_address: values.get("address").to_string(),
        })
    }
}

/// Body for `POST /fund/request`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FundRequest {
    /// Owning admin account.
    pub admin_id: String,
    /// Requesting principal, derived from the role.
    pub requester_id: String,
    /// `MASTER_DISTRIBUTOR` or `DISTRIBUTOR`, derived from the role.
    pub requester_type: String,
    /// Requested amount, as entered.
    pub amount: String,
    /// Bank name.
    pub bank_name: String,
    /// Account number.
    pub account_number: String,
    /// IFSC code.
    pub ifsc_code: String,
    /// Bank branch.
    pub bank_branch: String,
    /// UTR number of the deposit.
    pub utr_number: String,
    /// Free-text remarks.
    pub remarks: String,
    /// Always submitted as `pending`.
    pub request_status: String,
}

impl FundRequest {
    /// Assembles the payload from identity claims, the session role, and
    /// validated values.
    ///
    /// The requester identity derives from the role: master →
    /// (`master_distributor_id`, `MASTER_DISTRIBUTOR`), distributor →
    /// (`distributor_id`, `DISTRIBUTOR`).
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::RoleMismatch`] when the claims carry no
    /// identity for the role.
    pub fn assemble(
        claims: &SessionClaims,
        role: Role,
        values: &FormValues,
    ) -> Result<Self, SessionError> {
        let (requester_id, requester_type) = claims.requester_identity(role)?;
        Ok(Self {
            admin_id: claims.data.admin_id.clone(),
            requester_id,
            requester_type: requester_type.to_string(),
            amount: values.get("amount").to_string(),
            bank_name: values.get("bank_name").to_string(),
            account_number: values.get("account_number").to_string(),
            ifsc_code: values.get("ifsc_code").to_string(),
            bank_branch: values.get("bank_branch").to_string(),
            utr_number: values.get("utr_number").to_string(),
            remarks: values.get("remarks").to_string(),
            request_status: REQUEST_STATUS_PENDING.to_string(),
        })
    }
}
