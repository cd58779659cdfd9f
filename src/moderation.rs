/// Moderation directory
///
/// Query surface over signups for the admin dashboard, plus the only
/// operation that may change an account's status after creation.
use crate::{
    db::account::AccountStatus,
    error::HermitResult,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqlitePool};

/// One row of the moderation list: base account fields joined with the
/// extension fields (if any) and a delimited interest list.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct SignupView {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub message: String,
    pub source: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub age: Option<String>,
    pub location: Option<String>,
    pub work_style: Option<String>,
    pub connection_type: Option<String>,
    /// Comma-delimited interest values; None for basic signups
    pub interests: Option<String>,
}

/// Aggregate counts for the dashboard header, recomputed on every call
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModerationStats {
    pub total_users: i64,
    pub pending_users: i64,
    pub approved_users: i64,
    pub enhanced_profiles: i64,
}

/// Moderation directory service
pub struct ModerationDirectory {
    db: SqlitePool,
}

impl ModerationDirectory {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    /// List signups newest-first with optional substring search on name or
    /// email and optional status filter.
    pub async fn list_signups(
        &self,
        limit: i64,
        offset: i64,
        search: &str,
        status: &str,
    ) -> HermitResult<Vec<SignupView>> {
        let search = search.trim();
        let pattern = format!("%{}%", search);

        let rows = sqlx::query_as::<_, SignupView>(
            "SELECT a.id, a.name, a.email, a.message, a.source, a.status, a.created_at,
                    e.first_name, e.last_name, e.age, e.location, e.work_style, e.connection_type,
                    (SELECT GROUP_CONCAT(i.interest) FROM interests i WHERE i.extension_id = e.id) AS interests
             FROM accounts a
             LEFT JOIN account_extensions e ON e.account_id = a.id
             WHERE (?1 = '' OR a.name LIKE ?2 OR a.email LIKE ?2)
               AND (?3 = '' OR a.status = ?3)
             ORDER BY a.created_at DESC
             LIMIT ?4 OFFSET ?5",
        )
        .bind(search)
        .bind(&pattern)
        .bind(status.trim())
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.db)
        .await?;

        Ok(rows)
    }

    /// Transition an account's status. Any of the three statuses is
    /// accepted for any current status; backward transitions such as
    /// approved -> pending are deliberately allowed.
    pub async fn update_status(&self, account_id: i64, new_status: &str) -> HermitResult<u64> {
        let status = AccountStatus::parse(new_status)?;

        let result = sqlx::query("UPDATE accounts SET status = ?1 WHERE id = ?2")
            .bind(status.as_str())
            .bind(account_id)
            .execute(&self.db)
            .await?;

        let affected = result.rows_affected();
        tracing::info!(account_id, status = status.as_str(), affected, "status updated");

        Ok(affected)
    }

    /// Plain aggregate counts as of the query time
    pub async fn stats(&self) -> HermitResult<ModerationStats> {
        let total_users: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM accounts")
            .fetch_one(&self.db)
            .await?;
        let pending_users: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM accounts WHERE status = 'pending'")
                .fetch_one(&self.db)
                .await?;
        let approved_users: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM accounts WHERE status = 'approved'")
                .fetch_one(&self.db)
                .await?;
        let enhanced_profiles: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM account_extensions")
            .fetch_one(&self.db)
            .await?;

        Ok(ModerationStats {
            total_users,
            pending_users,
            approved_users,
            enhanced_profiles,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HermitError;
    use crate::intake::{BasicSignup, EnhancedSignup, IntakeProcessor};
    use crate::test_util::setup_test_db;

    async fn seed(db: &SqlitePool) {
        let intake = IntakeProcessor::new(db.clone());

        intake
            .submit_basic(BasicSignup {
                name: "Alice Example".to_string(),
                email: "alice@example.com".to_string(),
                message: None,
            })
            .await
            .unwrap();

        intake
            .submit_enhanced(EnhancedSignup {
                first_name: "Bob".to_string(),
                last_name: "Builder".to_string(),
                email: "bob@example.com".to_string(),
                bio: "b".repeat(80),
                interests: vec![
                    "meditation".to_string(),
                    "rust".to_string(),
                    "hiking".to_string(),
                ],
                age: None,
                location: Some("Berlin".to_string()),
                tech_interests: None,
                mindfulness_practices: None,
                work_style: Some("remote".to_string()),
                hobbies: None,
                connection_type: None,
                privacy_level: None,
                newsletter: None,
            })
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_list_signups_newest_first_with_join() {
        let db = setup_test_db().await;
        seed(&db).await;
        let directory = ModerationDirectory::new(db);

        let rows = directory.list_signups(10, 0, "", "").await.unwrap();
        assert_eq!(rows.len(), 2);

        let bob = rows.iter().find(|r| r.email == "bob@example.com").unwrap();
        assert_eq!(bob.first_name.as_deref(), Some("Bob"));
        let interests = bob.interests.as_deref().unwrap();
        assert!(interests.contains("meditation"));
        assert!(interests.contains("rust"));
        assert!(interests.contains("hiking"));

        let alice = rows.iter().find(|r| r.email == "alice@example.com").unwrap();
        assert!(alice.first_name.is_none());
        assert!(alice.interests.is_none());
    }

    #[tokio::test]
    async fn test_list_signups_search_and_status_filter() {
        let db = setup_test_db().await;
        seed(&db).await;
        let directory = ModerationDirectory::new(db);

        let rows = directory.list_signups(10, 0, "alice", "").await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].email, "alice@example.com");

        // Substring match on email, case-insensitive
        let rows = directory.list_signups(10, 0, "BOB@", "").await.unwrap();
        assert_eq!(rows.len(), 1);

        let rows = directory.list_signups(10, 0, "", "pending").await.unwrap();
        assert_eq!(rows.len(), 2);

        let rows = directory.list_signups(10, 0, "", "approved").await.unwrap();
        assert!(rows.is_empty());
    }

    #[tokio::test]
    async fn test_update_status_validates_input() {
        let db = setup_test_db().await;
        seed(&db).await;
        let directory = ModerationDirectory::new(db);

        let err = directory.update_status(1, "banned").await.unwrap_err();
        assert!(matches!(err, HermitError::InvalidStatus(_)));

        let affected = directory.update_status(1, "approved").await.unwrap();
        assert_eq!(affected, 1);

        // Backward transition is allowed
        let affected = directory.update_status(1, "pending").await.unwrap();
        assert_eq!(affected, 1);

        // Unknown id affects no rows but is not an error
        let affected = directory.update_status(9999, "approved").await.unwrap();
        assert_eq!(affected, 0);
    }

    #[tokio::test]
    async fn test_stats_counts() {
        let db = setup_test_db().await;
        seed(&db).await;
        let directory = ModerationDirectory::new(db);

        directory.update_status(1, "approved").await.unwrap();

        let stats = directory.stats().await.unwrap();
        assert_eq!(stats.total_users, 2);
        assert_eq!(stats.pending_users, 1);
        assert_eq!(stats.approved_users, 1);
        assert_eq!(stats.enhanced_profiles, 1);
    }
}
