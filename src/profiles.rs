/// Profile directory
///
/// Read-only browse surface over approved accounts. Pending and rejected
/// accounts are invisible here, and a lookup by id does not distinguish
/// "not found" from "not approved".
use crate::error::HermitResult;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqlitePool};

/// One browsable profile. Email is included in the API shape; whether it is
/// shown to other users is a privacy-level concern owned by the UI layer.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct ProfileView {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub age: Option<String>,
    pub location: Option<String>,
    pub bio: Option<String>,
    pub tech_interests: Option<String>,
    pub mindfulness_practices: Option<String>,
    pub work_style: Option<String>,
    pub hobbies: Option<String>,
    pub connection_type: Option<String>,
    pub privacy_level: Option<String>,
    pub interests: Option<String>,
}

/// Interest value with its usage count across approved accounts
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct InterestCount {
    pub interest: String,
    pub count: i64,
}

const PROFILE_COLUMNS: &str =
    "a.id, a.name, a.email, a.created_at,
     e.first_name, e.last_name, e.age, e.location, e.bio, e.tech_interests,
     e.mindfulness_practices, e.work_style, e.hobbies, e.connection_type, e.privacy_level,
     (SELECT GROUP_CONCAT(i.interest) FROM interests i WHERE i.extension_id = e.id) AS interests";

/// Profile directory service
pub struct ProfileDirectory {
    db: SqlitePool,
}

impl ProfileDirectory {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    /// Browse approved profiles, newest-first. Search matches name, bio, or
    /// location substrings; the interest filter matches any profile whose
    /// interest set contains the given substring.
    pub async fn list_profiles(
        &self,
        limit: i64,
        offset: i64,
        search: &str,
        interest: &str,
    ) -> HermitResult<Vec<ProfileView>> {
        let search = search.trim();
        let search_pattern = format!("%{}%", search);
        let interest = interest.trim();
        let interest_pattern = format!("%{}%", interest);

        let sql = format!(
            "SELECT {PROFILE_COLUMNS}
             FROM accounts a
             LEFT JOIN account_extensions e ON e.account_id = a.id
             WHERE a.status = 'approved'
               AND (?1 = '' OR a.name LIKE ?2 OR e.bio LIKE ?2 OR e.location LIKE ?2)
               AND (?3 = '' OR EXISTS (
                   SELECT 1 FROM interests i
                   WHERE i.extension_id = e.id AND i.interest LIKE ?4
               ))
             ORDER BY a.created_at DESC
             LIMIT ?5 OFFSET ?6"
        );

        let rows = sqlx::query_as::<_, ProfileView>(&sql)
            .bind(search)
            .bind(&search_pattern)
            .bind(interest)
            .bind(&interest_pattern)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.db)
            .await?;

        Ok(rows)
    }

    /// Fetch one approved profile by account id. Returns None for missing
    /// and non-approved accounts alike, so moderation state never leaks.
    pub async fn get_profile_by_id(&self, account_id: i64) -> HermitResult<Option<ProfileView>> {
        let sql = format!(
            "SELECT {PROFILE_COLUMNS}
             FROM accounts a
             LEFT JOIN account_extensions e ON e.account_id = a.id
             WHERE a.id = ?1 AND a.status = 'approved'"
        );

        let row = sqlx::query_as::<_, ProfileView>(&sql)
            .bind(account_id)
            .fetch_optional(&self.db)
            .await?;

        Ok(row)
    }

    /// Distinct interest values over approved accounts, most used first
    pub async fn list_interests(&self) -> HermitResult<Vec<InterestCount>> {
        let rows = sqlx::query_as::<_, InterestCount>(
            "SELECT i.interest, COUNT(*) AS count
             FROM interests i
             JOIN account_extensions e ON i.extension_id = e.id
             JOIN accounts a ON e.account_id = a.id
             WHERE a.status = 'approved'
             GROUP BY i.interest
             ORDER BY count DESC, i.interest ASC",
        )
        .fetch_all(&self.db)
        .await?;

        Ok(rows)
    }
}
