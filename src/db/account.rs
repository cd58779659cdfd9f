/// Account database models
use crate::error::{HermitError, HermitResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Moderation status of an account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountStatus {
    Pending,
    Approved,
    Rejected,
}

impl AccountStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountStatus::Pending => "pending",
            AccountStatus::Approved => "approved",
            AccountStatus::Rejected => "rejected",
        }
    }

    pub fn parse(s: &str) -> HermitResult<Self> {
        match s {
            "pending" => Ok(AccountStatus::Pending),
            "approved" => Ok(AccountStatus::Approved),
            "rejected" => Ok(AccountStatus::Rejected),
            other => Err(HermitError::InvalidStatus(other.to_string())),
        }
    }
}

/// Which signup variant an account was created as
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountShape {
    Basic,
    Enhanced,
}

impl AccountShape {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountShape::Basic => "basic",
            AccountShape::Enhanced => "enhanced",
        }
    }

    pub fn parse(s: &str) -> HermitResult<Self> {
        match s {
            "basic" => Ok(AccountShape::Basic),
            "enhanced" => Ok(AccountShape::Enhanced),
            other => Err(HermitError::Validation(format!(
                "Invalid account shape: {}",
                other
            ))),
        }
    }
}

/// Account record in the database. Both signup shapes live in this table;
/// enhanced accounts additionally carry an extension row.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Account {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub password_hash: Option<String>,
    pub message: String,
    pub source: String,
    pub shape: String,
    pub status: String,
    pub login_attempts: i64,
    pub locked_until: Option<DateTime<Utc>>,
    pub last_login: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// Session record in the database
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Session {
    pub id: String,
    pub account_id: i64,
    pub shape: String,
    pub email: String,
    pub name: String,
    pub ip_address: String,
    pub user_agent: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub is_active: bool,
}

/// Check whether an email already resolves to an account in either shape.
/// Case-insensitive; a fast-fail UX optimization in front of the unique
/// index, which remains the authoritative guarantee.
pub async fn email_exists(pool: &sqlx::SqlitePool, email: &str) -> HermitResult<bool> {
    let count: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM accounts WHERE email = ?1 COLLATE NOCASE")
            .bind(email)
            .fetch_one(pool)
            .await?;

    Ok(count > 0)
}
