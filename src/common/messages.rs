//! # Message Types
//!
//! Defines the JSON bodies exchanged with the remote verification service and
//! the bodies the web proxy exchanges with browser clients:
//! - Remote request/response bodies ([`LookupRequest`], [`ServiceResponse`])
//! - The terminal result of one lookup ([`LookupOutcome`])
//! - Proxy request/error bodies ([`CheckRequest`], [`ErrorResponse`])

use serde::{Deserialize, Serialize};

use crate::catalog::GameDefinition;

/// Reason reported when the service rejects a lookup without saying why.
pub const FALLBACK_FAILURE_REASON: &str = "Failed to check ID";

/// Reason reported when the service claims success but names no account.
pub const MISSING_USERNAME_REASON: &str = "service reported success without a username";

// ============================================================================
// REMOTE SERVICE BODIES
// ============================================================================

/// **Lookup Request**
///
/// Body POSTed to the verification service.
///
/// # Fields
/// - `game`: catalog key of the selected game
/// - `id`: account identifier typed by the user
/// - `zoneid`: only present for games that partition accounts by zone
/// - `server`: only present for games that partition accounts by region
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookupRequest {
    pub game: String,
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zoneid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server: Option<String>,
}

impl LookupRequest {
    /// Builds the request body for `game`, keeping only the auxiliary fields
    /// the game actually uses.
    pub fn for_game(
        game: &GameDefinition,
        account_id: &str,
        zone_id: &str,
        server: &str,
    ) -> Self {
        Self {
            game: game.id.to_string(),
            id: account_id.to_string(),
            zoneid: game.requires_zone.then(|| zone_id.to_string()),
            server: game.requires_server.then(|| server.to_string()),
        }
    }
}

/// **Service Response**
///
/// Body returned by the verification service. Only `status` is mandatory;
/// anything else in the body is ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceResponse {
    pub status: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<AccountData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Account details nested under `data` in a successful response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountData {
    #[serde(default)]
    pub username: Option<String>,
}

// ============================================================================
// LOOKUP RESULT
// ============================================================================

/// **Lookup Outcome**
///
/// Terminal result of one lookup. Every failure path (transport error,
/// unreadable body, service rejection) ends up as `Failure`.
///
/// Serialized as `{"outcome":"success","username":..}` or
/// `{"outcome":"failure","reason":..}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum LookupOutcome {
    Success { username: String },
    Failure { reason: String },
}

impl LookupOutcome {
    pub fn failure(reason: impl Into<String>) -> Self {
        Self::Failure {
            reason: reason.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}

impl From<ServiceResponse> for LookupOutcome {
    fn from(response: ServiceResponse) -> Self {
        if !response.status {
            return Self::failure(
                response
                    .error
                    .unwrap_or_else(|| FALLBACK_FAILURE_REASON.to_string()),
            );
        }

        match response.data.and_then(|data| data.username) {
            Some(username) => Self::Success { username },
            None => Self::failure(MISSING_USERNAME_REASON),
        }
    }
}

// ============================================================================
// WEB PROXY BODIES
// ============================================================================

/// **Check Request**
///
/// Body a browser client POSTs to the proxy's `/api/check`. Same field names
/// as [`LookupRequest`], but every field is optional and the proxy rebuilds
/// the upstream body from the catalog instead of forwarding this one. Missing
/// `game` or `id` arrive empty and are rejected by the validation rules.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CheckRequest {
    #[serde(default)]
    pub game: String,
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub zoneid: Option<String>,
    #[serde(default)]
    pub server: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
