/// Identity and session management
///
/// Handles registration, credential verification, lockout policy, and
/// server-tracked sessions with expiry.

mod manager;

pub use manager::AccountManager;

use serde::{Deserialize, Serialize};

/// Registration request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub name: String,
    /// "basic" or "enhanced"; defaults to basic
    pub shape: Option<String>,
}

/// Registration response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterResponse {
    pub success: bool,
    pub user_id: i64,
}

/// Login request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Public account fields attached to a session. Cached at login time so
/// session checks never re-query the accounts table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: i64,
    pub email: String,
    pub name: String,
    pub shape: String,
    pub session_id: String,
}

/// Metadata about the requesting client, recorded on the session row
#[derive(Debug, Clone, Default)]
pub struct ClientInfo {
    pub ip_address: String,
    pub user_agent: String,
}
