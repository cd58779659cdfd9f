/// Account manager implementation using runtime queries
///
/// Registration, login with lockout policy, and server-tracked sessions.
/// Uses sqlx runtime query building so no DATABASE_URL is needed during
/// compilation.

use crate::{
    account::{ClientInfo, SessionUser},
    config::ServerConfig,
    db::account::{Account, AccountShape, AccountStatus},
    error::{HermitError, HermitResult},
};
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use chrono::{Duration, Utc};
use rand::Rng;
use sqlx::SqlitePool;
use std::sync::Arc;

/// Account manager service
pub struct AccountManager {
    db: SqlitePool,
    config: Arc<ServerConfig>,
}

impl AccountManager {
    /// Create a new account manager
    pub fn new(db: SqlitePool, config: Arc<ServerConfig>) -> Self {
        Self { db, config }
    }

    /// Register a new account with credentials
    ///
    /// The account starts in pending status; login is gated on moderation
    /// approval, not on registration.
    pub async fn register(
        &self,
        email: &str,
        password: &str,
        name: &str,
        shape: AccountShape,
    ) -> HermitResult<i64> {
        let email = email.trim();
        let name = name.trim();

        if email.is_empty() || password.is_empty() || name.is_empty() {
            return Err(HermitError::Validation(
                "Email, password, and name are required".to_string(),
            ));
        }

        // Fast-fail pre-check; the unique index is the authoritative guard
        if self.email_exists(email).await? {
            return Err(HermitError::DuplicateAccount);
        }

        let password_hash = Self::hash_password(password)?;
        let now = Utc::now();

        let result = sqlx::query(
            "INSERT INTO accounts (name, email, password_hash, message, source, shape, status, login_attempts, created_at)
             VALUES (?1, ?2, ?3, '', 'registration', ?4, ?5, 0, ?6)",
        )
        .bind(name)
        .bind(email)
        .bind(&password_hash)
        .bind(shape.as_str())
        .bind(AccountStatus::Pending.as_str())
        .bind(now)
        .execute(&self.db)
        .await
        .map_err(|e| match HermitError::from_insert_error(e) {
            HermitError::DuplicateEmail => HermitError::DuplicateAccount,
            other => other,
        })?;

        let id = result.last_insert_rowid();
        tracing::info!(account_id = id, "registered new {} account", shape.as_str());

        Ok(id)
    }

    /// Authenticate and create a session
    ///
    /// Check order matters: lockout before status before password, and the
    /// not-found case collapses into the same generic error as a password
    /// mismatch so callers cannot enumerate accounts.
    pub async fn login(
        &self,
        email: &str,
        password: &str,
        client: &ClientInfo,
    ) -> HermitResult<SessionUser> {
        let account = self
            .find_by_email(email.trim())
            .await?
            .ok_or(HermitError::InvalidCredentials)?;

        let now = Utc::now();

        if let Some(locked_until) = account.locked_until {
            if locked_until > now {
                return Err(HermitError::AccountLocked);
            }
        }

        if account.status != AccountStatus::Approved.as_str() {
            return Err(HermitError::PendingApproval);
        }

        let valid = account
            .password_hash
            .as_deref()
            .map(|hash| Self::verify_password(password, hash))
            .unwrap_or(false);

        if !valid {
            self.record_failed_attempt(account.id).await?;
            return Err(HermitError::InvalidCredentials);
        }

        // Successful login: reset the attempt counter and stamp last_login
        sqlx::query(
            "UPDATE accounts SET login_attempts = 0, locked_until = NULL, last_login = ?1 WHERE id = ?2",
        )
        .bind(now)
        .bind(account.id)
        .execute(&self.db)
        .await?;

        self.create_session(&account, client).await
    }

    /// Mark a session inactive (logout)
    pub async fn logout(&self, session_id: &str) -> HermitResult<()> {
        sqlx::query("UPDATE sessions SET is_active = 0 WHERE id = ?1")
            .bind(session_id)
            .execute(&self.db)
            .await?;

        Ok(())
    }

    /// Validate a session identifier, returning the cached identity fields.
    ///
    /// Validate-or-clear contract: a session row that exists but is inactive
    /// or expired is marked inactive before returning None, so a stale
    /// identifier can never be replayed later.
    pub async fn validate_session(&self, session_id: &str) -> HermitResult<Option<SessionUser>> {
        let now = Utc::now();

        let row = sqlx::query_as::<_, crate::db::account::Session>(
            "SELECT id, account_id, shape, email, name, ip_address, user_agent,
                    created_at, expires_at, is_active
             FROM sessions WHERE id = ?1",
        )
        .bind(session_id)
        .fetch_optional(&self.db)
        .await?;

        let session = match row {
            Some(s) => s,
            None => return Ok(None),
        };

        // Both conditions checked together per the session validity invariant
        if !session.is_active || session.expires_at <= now {
            self.logout(session_id).await?;
            return Ok(None);
        }

        Ok(Some(SessionUser {
            id: session.account_id,
            email: session.email,
            name: session.name,
            shape: session.shape,
            session_id: session.id,
        }))
    }

    /// Delete session rows past their expiry. Maintenance operation, driven
    /// by the background scheduler rather than per-request.
    pub async fn sweep_expired_sessions(&self) -> HermitResult<u64> {
        let result = sqlx::query("DELETE FROM sessions WHERE expires_at < ?1")
            .bind(Utc::now())
            .execute(&self.db)
            .await?;

        let deleted = result.rows_affected();
        if deleted > 0 {
            tracing::info!(deleted, "swept expired sessions");
        } else {
            tracing::debug!("session sweep: no expired sessions found");
        }

        Ok(deleted)
    }

    /// Create a session row and return the public identity it carries
    async fn create_session(
        &self,
        account: &Account,
        client: &ClientInfo,
    ) -> HermitResult<SessionUser> {
        let session_id = Self::generate_session_id();
        let now = Utc::now();
        let expires_at = now + Duration::hours(self.config.security.session_ttl_hours);

        sqlx::query(
            "INSERT INTO sessions (id, account_id, shape, email, name, ip_address, user_agent, created_at, expires_at, is_active)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, 1)",
        )
        .bind(&session_id)
        .bind(account.id)
        .bind(&account.shape)
        .bind(&account.email)
        .bind(&account.name)
        .bind(&client.ip_address)
        .bind(&client.user_agent)
        .bind(now)
        .bind(expires_at)
        .execute(&self.db)
        .await?;

        Ok(SessionUser {
            id: account.id,
            email: account.email.clone(),
            name: account.name.clone(),
            shape: account.shape.clone(),
            session_id,
        })
    }

    /// Record a failed login attempt, locking the account once the counter
    /// reaches the configured threshold. Single atomic statement so
    /// concurrent failures cannot lose updates.
    async fn record_failed_attempt(&self, account_id: i64) -> HermitResult<()> {
        let locked_until = Utc::now() + Duration::minutes(self.config.security.lockout_minutes);

        sqlx::query(
            "UPDATE accounts
             SET login_attempts = login_attempts + 1,
                 locked_until = CASE
                     WHEN login_attempts + 1 >= ?1 THEN ?2
                     ELSE locked_until
                 END
             WHERE id = ?3",
        )
        .bind(self.config.security.lockout_threshold)
        .bind(locked_until)
        .bind(account_id)
        .execute(&self.db)
        .await?;

        Ok(())
    }

    /// Resolve an account by email, case-insensitively
    pub async fn find_by_email(&self, email: &str) -> HermitResult<Option<Account>> {
        let account = sqlx::query_as::<_, Account>(
            "SELECT id, name, email, password_hash, message, source, shape, status,
                    login_attempts, locked_until, last_login, created_at
             FROM accounts WHERE email = ?1 COLLATE NOCASE",
        )
        .bind(email)
        .fetch_optional(&self.db)
        .await?;

        Ok(account)
    }

    /// Check if an email already resolves to an account in either shape
    pub async fn email_exists(&self, email: &str) -> HermitResult<bool> {
        crate::db::account::email_exists(&self.db, email).await
    }

    /// Hash a password with Argon2id and a random salt
    fn hash_password(password: &str) -> HermitResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| HermitError::Internal(format!("Password hashing failed: {}", e)))
    }

    /// Verify a password against a stored hash
    fn verify_password(password: &str, hash: &str) -> bool {
        PasswordHash::new(hash)
            .map(|parsed| {
                Argon2::default()
                    .verify_password(password.as_bytes(), &parsed)
                    .is_ok()
            })
            .unwrap_or(false)
    }

    /// Generate an opaque unguessable session identifier (32 random bytes)
    fn generate_session_id() -> String {
        let bytes: [u8; 32] = rand::thread_rng().gen();
        hex::encode(bytes)
    }
}
