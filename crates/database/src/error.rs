use thiserror::Error;

#[derive(Error, Debug)]
pub enum DbError {
    #[error("Invalid database configuration: {0}")]
    ConnectionConfigError(String),

    #[error("Failed to prepare the database directory: {0}")]
    StorageDirError(#[from] std::io::Error),

    #[error("Database operation failed: {0}")]
    QueryError(#[from] sqlx::Error),
}
