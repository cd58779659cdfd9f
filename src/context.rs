/// Application context and dependency injection
use crate::{
    account::AccountManager,
    config::ServerConfig,
    db,
    error::{HermitError, HermitResult},
    intake::IntakeProcessor,
    moderation::ModerationDirectory,
    profiles::ProfileDirectory,
};
use sqlx::SqlitePool;
use std::sync::Arc;

/// Application context holding all shared services
#[derive(Clone)]
pub struct AppContext {
    pub config: Arc<ServerConfig>,
    pub db: SqlitePool,
    pub account_manager: Arc<AccountManager>,
    pub intake: Arc<IntakeProcessor>,
    pub moderation: Arc<ModerationDirectory>,
    pub profiles: Arc<ProfileDirectory>,
}

impl AppContext {
    /// Create a new application context from configuration
    pub async fn new(config: ServerConfig) -> HermitResult<Self> {
        config.validate()?;

        Self::ensure_directories(&config).await?;

        let db = db::create_pool(&config.storage.database, db::DatabaseOptions::default()).await?;
        db::run_migrations(&db).await?;
        db::test_connection(&db).await?;

        let config = Arc::new(config);
        let account_manager = Arc::new(AccountManager::new(db.clone(), config.clone()));
        let intake = Arc::new(IntakeProcessor::new(db.clone()));
        let moderation = Arc::new(ModerationDirectory::new(db.clone()));
        let profiles = Arc::new(ProfileDirectory::new(db.clone()));

        Ok(Self {
            config,
            db,
            account_manager,
            intake,
            moderation,
            profiles,
        })
    }

    /// Ensure required directories exist
    async fn ensure_directories(config: &ServerConfig) -> HermitResult<()> {
        let dir = &config.storage.data_directory;
        if !dir.exists() {
            tokio::fs::create_dir_all(dir).await.map_err(|e| {
                HermitError::Internal(format!("Failed to create directory {:?}: {}", dir, e))
            })?;
        }
        Ok(())
    }

    /// Get service URL
    pub fn service_url(&self) -> String {
        format!(
            "http://{}:{}",
            self.config.service.hostname, self.config.service.port
        )
    }
}
