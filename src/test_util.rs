/// Shared helpers for in-memory database tests
use crate::config::{LoggingConfig, SecurityConfig, ServerConfig, ServiceConfig, StorageConfig};
use sqlx::SqlitePool;
use std::path::PathBuf;
use std::sync::Arc;

/// Minimal configuration for tests
pub fn test_config() -> Arc<ServerConfig> {
    Arc::new(ServerConfig {
        service: ServiceConfig {
            hostname: "localhost".to_string(),
            port: 8080,
            version: "0.1.0".to_string(),
        },
        storage: StorageConfig {
            data_directory: PathBuf::from("./data"),
            database: PathBuf::from(":memory:"),
        },
        security: SecurityConfig {
            lockout_threshold: 5,
            lockout_minutes: 30,
            session_ttl_hours: 24,
        },
        logging: LoggingConfig {
            level: "info".to_string(),
        },
    })
}

/// In-memory database with the full schema
pub async fn setup_test_db() -> SqlitePool {
    let db = SqlitePool::connect(":memory:").await.unwrap();

    sqlx::query(
        r#"
        CREATE TABLE accounts (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            email TEXT NOT NULL COLLATE NOCASE,
            password_hash TEXT,
            message TEXT NOT NULL DEFAULT '',
            source TEXT NOT NULL,
            shape TEXT NOT NULL DEFAULT 'basic',
            status TEXT NOT NULL DEFAULT 'pending',
            login_attempts INTEGER NOT NULL DEFAULT 0,
            locked_until DATETIME,
            last_login DATETIME,
            created_at DATETIME NOT NULL
        )
        "#,
    )
    .execute(&db)
    .await
    .unwrap();

    sqlx::query("CREATE UNIQUE INDEX idx_accounts_email ON accounts(email COLLATE NOCASE)")
        .execute(&db)
        .await
        .unwrap();

    sqlx::query(
        r#"
        CREATE TABLE account_extensions (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            account_id INTEGER NOT NULL UNIQUE,
            first_name TEXT NOT NULL,
            last_name TEXT NOT NULL,
            email TEXT NOT NULL COLLATE NOCASE,
            age TEXT,
            location TEXT NOT NULL DEFAULT '',
            bio TEXT NOT NULL,
            tech_interests TEXT NOT NULL DEFAULT '',
            mindfulness_practices TEXT NOT NULL DEFAULT '',
            work_style TEXT,
            hobbies TEXT NOT NULL DEFAULT '',
            connection_type TEXT,
            privacy_level TEXT NOT NULL DEFAULT 'public',
            newsletter INTEGER NOT NULL DEFAULT 0,
            FOREIGN KEY (account_id) REFERENCES accounts(id)
        )
        "#,
    )
    .execute(&db)
    .await
    .unwrap();

    sqlx::query(
        r#"
        CREATE TABLE interests (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            extension_id INTEGER NOT NULL,
            interest TEXT NOT NULL,
            FOREIGN KEY (extension_id) REFERENCES account_extensions(id)
        )
        "#,
    )
    .execute(&db)
    .await
    .unwrap();

    sqlx::query(
        r#"
        CREATE TABLE sessions (
            id TEXT PRIMARY KEY,
            account_id INTEGER NOT NULL,
            shape TEXT NOT NULL,
            email TEXT NOT NULL,
            name TEXT NOT NULL,
            ip_address TEXT NOT NULL DEFAULT '',
            user_agent TEXT NOT NULL DEFAULT '',
            created_at DATETIME NOT NULL,
            expires_at DATETIME NOT NULL,
            is_active BOOLEAN NOT NULL DEFAULT 1,
            FOREIGN KEY (account_id) REFERENCES accounts(id)
        )
        "#,
    )
    .execute(&db)
    .await
    .unwrap();

    db
}
