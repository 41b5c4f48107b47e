//! Database configuration module for `WealthTracker`.
//!
//! Handles the `SQLite` connection and creation of the `partitions` table using `SeaORM`.
//! The table statement is generated from the entity definition with
//! `Schema::create_table_from_entity`, so the schema always matches the Rust model.

use crate::entities::Partition;
use crate::errors::Result;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Schema};
use std::path::Path;
use tracing::{debug, info};

/// Default location of the local database file.
pub const DEFAULT_DATABASE_URL: &str = "sqlite://data/wealth_tracker.sqlite?mode=rwc";

/// Gets the database URL from the `DATABASE_URL` environment variable, falling back
/// to a local `SQLite` file.
#[must_use]
pub fn get_database_url() -> String {
    std::env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string())
}

/// Connects to `url` and makes sure the schema exists.
pub async fn connect(url: &str) -> Result<DatabaseConnection> {
    debug!("Connecting to database at {url}");
    if let Some(dir) = database_dir(url) {
        std::fs::create_dir_all(dir)?;
    }
    let db = Database::connect(url).await?;
    create_tables(&db).await?;
    Ok(db)
}

/// Directory holding the database file of a file-backed `SQLite` URL.
fn database_dir(url: &str) -> Option<&Path> {
    let path = url.strip_prefix("sqlite://")?;
    let path = path.split_once('?').map_or(path, |(p, _)| p);
    if path.is_empty() || path.contains(":memory:") {
        return None;
    }
    Path::new(path).parent().filter(|dir| !dir.as_os_str().is_empty())
}

/// Establishes a connection using [`get_database_url`].
pub async fn create_connection() -> Result<DatabaseConnection> {
    connect(&get_database_url()).await
}

/// Creates the `partitions` table if it does not exist yet.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    let mut partition_table = schema.create_table_from_entity(Partition);
    partition_table.if_not_exists();

    db.execute(builder.build(&partition_table)).await?;
    info!("Database tables ensured.");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::PartitionModel;
    use sea_orm::{EntityTrait, QuerySelect};

    #[tokio::test]
    async fn test_connect_in_memory() -> Result<()> {
        let db = connect("sqlite::memory:").await?;

        let rows: Vec<PartitionModel> = Partition::find().limit(1).all(&db).await?;
        assert!(rows.is_empty());
        Ok(())
    }

    #[test]
    fn test_database_dir() {
        assert_eq!(database_dir(DEFAULT_DATABASE_URL), Some(Path::new("data")));
        assert_eq!(database_dir("sqlite::memory:"), None);
        assert_eq!(database_dir("sqlite://wealth.sqlite"), None);
        assert_eq!(database_dir("postgres://localhost/db"), None);
    }

    #[tokio::test]
    async fn test_create_tables_is_repeatable() -> Result<()> {
        let db = Database::connect("sqlite::memory:").await?;
        create_tables(&db).await?;
        create_tables(&db).await?;

        let rows: Vec<PartitionModel> = Partition::find().all(&db).await?;
        assert!(rows.is_empty());
        Ok(())
    }
}
