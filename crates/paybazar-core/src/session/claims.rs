//! Roles and decoded credential claims.
//!
//! The credential is an opaque bearer token in JWT form. Only the payload
//! segment is decoded here, **without signature verification**: the claims
//! feed UI gating and payload assembly, never an authorization decision.
//! The backend API is the real authorization boundary and re-checks the
//! token on every request.

use std::fmt;
use std::str::FromStr;

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde::{Deserialize, Serialize};

use super::error::SessionError;
use crate::router::Route;

/// Requester type sent on fund requests from a master distributor session.
pub const REQUESTER_TYPE_MASTER: &str = "MASTER_DISTRIBUTOR";

/// Requester type sent on fund requests from a distributor session.
pub const REQUESTER_TYPE_DISTRIBUTOR: &str = "DISTRIBUTOR";

/// Principal classification for a panel session.
///
/// Persisted under the `userRole` storage key alongside the credential.
/// Resolution cross-checks it against the decoded claims; see
/// [`SessionClaims::requester_identity`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Master distributor: manages distributors.
    Master,
    /// Distributor: manages retailers.
    Distributor,
}

impl Role {
    /// Returns the persisted string form of the role.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Master => "master",
            Self::Distributor => "distributor",
        }
    }

    /// Returns the dashboard route for this role.
    #[must_use]
    pub const fn dashboard(&self) -> Route {
        match self {
            Self::Master => Route::MasterDashboard,
            Self::Distributor => Route::DistributorDashboard,
        }
    }

    /// Returns the `requester_type` wire value for this role.
    #[must_use]
    pub const fn requester_type(&self) -> &'static str {
        match self {
            Self::Master => REQUESTER_TYPE_MASTER,
            Self::Distributor => REQUESTER_TYPE_DISTRIBUTOR,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = SessionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "master" => Ok(Self::Master),
            "distributor" => Ok(Self::Distributor),
            other => Err(SessionError::Decode {
                reason: format!("unknown role: {other}"),
            }),
        }
    }
}

/// Identity fields embedded in the credential payload.
///
/// Which optional fields are present depends on which login issued the
/// token; `admin_id` is always carried.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityClaims {
    /// Owning admin account.
    pub admin_id: String,

    /// Present on tokens issued to master distributors.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub master_distributor_id: Option<String>,

    /// Present on tokens issued to distributors.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distributor_id: Option<String>,

    /// Human-assigned distributor identifier, when issued.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distributor_unique_id: Option<String>,

    /// Display name of the distributor, when issued.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distributor_name: Option<String>,
}

/// Decoded credential claims: identity fields plus expiry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Identity fields for payload assembly.
    pub data: IdentityClaims,

    /// Expiry timestamp in Unix seconds.
    pub exp: u64,
}

impl SessionClaims {
    /// Decodes claims from a JWT-form bearer token.
    ///
    /// Splits the token into its three segments and base64url-decodes the
    /// payload. The signature segment is ignored: these claims gate UI
    /// flow only and are never authoritative.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Decode`] when the token does not have three
    /// segments, the payload is not valid base64url, or the decoded JSON
    /// does not match the claims shape.
    pub fn decode(token: &str) -> Result<Self, SessionError> {
        let segments: Vec<&str> = token.split('.').collect();
        let [_header, payload, _signature] = segments.as_slice() else {
            return Err(SessionError::Decode {
                reason: "token does not have three segments".to_string(),
            });
        };

        let bytes = URL_SAFE_NO_PAD
            .decode(payload)
            .map_err(|e| SessionError::Decode {
                reason: format!("payload is not base64url: {e}"),
            })?;

        serde_json::from_slice(&bytes).map_err(|e| SessionError::Decode {
            reason: format!("payload is not a claims document: {e}"),
        })
    }

    /// Returns `true` when `exp` has elapsed at `now` (Unix seconds).
    #[must_use]
    pub const fn is_expired(&self, now: u64) -> bool {
        self.exp < now
    }

    /// Returns the fund-request requester identity for `role`.
    ///
    /// master → (`master_distributor_id`, `"MASTER_DISTRIBUTOR"`),
    /// distributor → (`distributor_id`, `"DISTRIBUTOR"`).
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::RoleMismatch`] when the claims carry no
    /// identity field for the role.
    pub fn requester_identity(&self, role: Role) -> Result<(String, &'static str), SessionError> {
        let id = match role {
            Role::Master => self.data.master_distributor_id.clone(),
            Role::Distributor => self.data.distributor_id.clone(),
        };

        id.map(|id| (id, role.requester_type()))
            .ok_or(SessionError::RoleMismatch { role })
    }
}
