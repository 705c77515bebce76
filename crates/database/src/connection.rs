use crate::error::DbError;
use crate::repository::DbRepository;
use sqlx::sqlite::{SqliteConnectOptions, SqliteConnection};
use sqlx::{ConnectOptions, Connection};
use std::path::Path;

const CREATE_RACES_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS races (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        date TEXT NOT NULL,
        event_name TEXT NOT NULL,
        city TEXT NOT NULL,
        country TEXT NOT NULL,
        distance_label TEXT NOT NULL,
        time_str TEXT NOT NULL
    )
"#;

/// Builds the connection settings for the store file at `path`.
///
/// The parent directory is created if needed and the database file itself is
/// created on first connect. Nothing is opened here.
pub async fn connect_options(path: &Path) -> Result<SqliteConnectOptions, DbError> {
    if path.as_os_str().is_empty() {
        return Err(DbError::ConnectionConfigError(
            "database path must not be empty".to_string(),
        ));
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }

    Ok(SqliteConnectOptions::new()
        .filename(path)
        .create_if_missing(true))
}

/// Opens a single, unpooled connection to the store.
pub async fn open_connection(options: &SqliteConnectOptions) -> Result<SqliteConnection, DbError> {
    Ok(options.connect().await?)
}

/// The storage initializer: ensures the `races` table exists.
///
/// Idempotent. An existing table is never dropped or altered, so this runs
/// on every start. Any error here must abort startup.
pub async fn init_schema(options: &SqliteConnectOptions) -> Result<(), DbError> {
    let mut conn = open_connection(options).await?;
    sqlx::query(CREATE_RACES_TABLE).execute(&mut conn).await?;
    conn.close().await?;

    tracing::info!(path = %options.get_filename().display(), "Database initialized.");
    Ok(())
}

/// Prepares the store at `path` and returns a repository over it.
pub async fn open_store(path: &Path) -> Result<DbRepository, DbError> {
    let options = connect_options(path).await?;
    init_schema(&options).await?;
    Ok(DbRepository::new(options))
}
