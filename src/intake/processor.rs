/// Signup intake processor
use crate::{
    db::account::{email_exists, AccountShape, AccountStatus},
    error::{HermitError, HermitResult},
    intake::{
        BasicSignup, EnhancedSignup, SignupOutcome, BIO_MAX_CHARS, BIO_MIN_CHARS, MAX_INTERESTS,
        MIN_INTERESTS,
    },
};
use chrono::Utc;
use sqlx::SqlitePool;
use validator::ValidateEmail;

/// Intake processor service
pub struct IntakeProcessor {
    db: SqlitePool,
}

impl IntakeProcessor {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    /// Process a basic signup: one account row in pending status
    pub async fn submit_basic(&self, form: BasicSignup) -> HermitResult<SignupOutcome> {
        let name = form.name.trim().to_string();
        let email = form.email.trim().to_string();
        let message = form.message.as_deref().unwrap_or("").trim().to_string();

        if name.is_empty() || email.is_empty() {
            return Err(HermitError::Validation(
                "Name and email are required".to_string(),
            ));
        }

        validate_email_syntax(&email)?;

        if email_exists(&self.db, &email).await? {
            return Err(HermitError::DuplicateEmail);
        }

        let result = sqlx::query(
            "INSERT INTO accounts (name, email, message, source, shape, status, login_attempts, created_at)
             VALUES (?1, ?2, ?3, 'landing_page', ?4, ?5, 0, ?6)",
        )
        .bind(&name)
        .bind(&email)
        .bind(&message)
        .bind(AccountShape::Basic.as_str())
        .bind(AccountStatus::Pending.as_str())
        .bind(Utc::now())
        .execute(&self.db)
        .await
        .map_err(HermitError::from_insert_error)?;

        let id = result.last_insert_rowid();
        tracing::info!(account_id = id, "basic signup accepted");

        Ok(SignupOutcome {
            id,
            message: "Thank you for joining Digital Hermit!".to_string(),
            signup_type: AccountShape::Basic.as_str().to_string(),
        })
    }

    /// Process an enhanced signup: account, extension record, and interest
    /// rows written atomically. Any failure rolls the whole submission back
    /// so readers never observe a partial profile.
    pub async fn submit_enhanced(&self, form: EnhancedSignup) -> HermitResult<SignupOutcome> {
        let first_name = form.first_name.trim().to_string();
        let last_name = form.last_name.trim().to_string();
        let email = form.email.trim().to_string();
        let bio = form.bio.trim().to_string();

        if first_name.is_empty() || last_name.is_empty() || email.is_empty() || bio.is_empty() {
            return Err(HermitError::Validation(
                "First name, last name, email, and bio are required".to_string(),
            ));
        }

        validate_email_syntax(&email)?;

        let bio_len = bio.chars().count();
        if bio_len < BIO_MIN_CHARS || bio_len > BIO_MAX_CHARS {
            return Err(HermitError::Validation(format!(
                "Bio must be between {} and {} characters",
                BIO_MIN_CHARS, BIO_MAX_CHARS
            )));
        }

        if form.interests.len() < MIN_INTERESTS || form.interests.len() > MAX_INTERESTS {
            return Err(HermitError::Validation(format!(
                "Please select {}-{} interests",
                MIN_INTERESTS, MAX_INTERESTS
            )));
        }

        if email_exists(&self.db, &email).await? {
            return Err(HermitError::DuplicateEmail);
        }

        let mut tx = self.db.begin().await?;

        let account_result = sqlx::query(
            "INSERT INTO accounts (name, email, message, source, shape, status, login_attempts, created_at)
             VALUES (?1, ?2, ?3, 'enhanced_signup', ?4, ?5, 0, ?6)",
        )
        .bind(format!("{} {}", first_name, last_name))
        .bind(&email)
        .bind(&bio)
        .bind(AccountShape::Enhanced.as_str())
        .bind(AccountStatus::Pending.as_str())
        .bind(Utc::now())
        .execute(&mut *tx)
        .await
        .map_err(HermitError::from_insert_error)?;

        let account_id = account_result.last_insert_rowid();

        let extension_result = sqlx::query(
            "INSERT INTO account_extensions
             (account_id, first_name, last_name, email, age, location, bio, tech_interests,
              mindfulness_practices, work_style, hobbies, connection_type, privacy_level, newsletter)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)",
        )
        .bind(account_id)
        .bind(&first_name)
        .bind(&last_name)
        .bind(&email)
        .bind(&form.age)
        .bind(form.location.as_deref().unwrap_or("").trim())
        .bind(&bio)
        .bind(form.tech_interests.as_deref().unwrap_or("").trim())
        .bind(form.mindfulness_practices.as_deref().unwrap_or("").trim())
        .bind(&form.work_style)
        .bind(form.hobbies.as_deref().unwrap_or("").trim())
        .bind(&form.connection_type)
        .bind(form.privacy_level.as_deref().unwrap_or("public"))
        .bind(form.newsletter.unwrap_or(false))
        .execute(&mut *tx)
        .await?;

        let extension_id = extension_result.last_insert_rowid();

        for interest in &form.interests {
            sqlx::query("INSERT INTO interests (extension_id, interest) VALUES (?1, ?2)")
                .bind(extension_id)
                .bind(interest.trim())
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;

        tracing::info!(account_id, extension_id, "enhanced signup accepted");

        Ok(SignupOutcome {
            id: extension_id,
            message: "Welcome to the Digital Hermit community! Your detailed profile has been created."
                .to_string(),
            signup_type: AccountShape::Enhanced.as_str().to_string(),
        })
    }
}

/// Standard local@domain syntactic check
fn validate_email_syntax(email: &str) -> HermitResult<()> {
    if !email.validate_email() {
        return Err(HermitError::Validation("Invalid email format".to_string()));
    }
    Ok(())
}
