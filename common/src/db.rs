use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use sqlx::postgres::PgPoolOptions;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use tracing::info;

use crate::repository::{CustomerRepository, PostgresCustomerRepository, SqliteCustomerRepository};

const CREATE_CUSTOMERS_TABLE_SQL: &str = "CREATE TABLE IF NOT EXISTS customers (
    id TEXT PRIMARY KEY,
    first_name TEXT NOT NULL,
    middle_name TEXT,
    last_name TEXT NOT NULL,
    email TEXT NOT NULL UNIQUE,
    phone_number TEXT
)";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageBackend {
    /// Embedded SQLite file, schema created on connect.
    Local { path: String },
    /// Postgres reached through a connection string; schema applied externally.
    Server { url: String },
}

/// Opens the selected backend and returns the repository every handler shares.
pub async fn establish_connection(
    backend: &StorageBackend,
) -> anyhow::Result<Arc<dyn CustomerRepository>> {
    match backend {
        StorageBackend::Local { path } => {
            info!("Opening local database at {}", path);
            let options = SqliteConnectOptions::new()
                .filename(path)
                .create_if_missing(true);
            let pool = SqlitePoolOptions::new()
                .connect_with(options)
                .await
                .with_context(|| format!("failed to open local database at {path}"))?;

            init_local_schema(&pool)
                .await
                .context("failed to create customers table")?;

            Ok(Arc::new(SqliteCustomerRepository::new(pool)))
        }
        StorageBackend::Server { url } => {
            info!("Connecting to server database");
            let pool = PgPoolOptions::new()
                .connect(url)
                .await
                .context("failed to connect to server database")?;

            Ok(Arc::new(PostgresCustomerRepository::new(pool)))
        }
    }
}

pub async fn init_local_schema(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query(CREATE_CUSTOMERS_TABLE_SQL).execute(pool).await?;
    Ok(())
}

/// In-memory SQLite with the schema applied. Limited to one connection that
/// is never reaped, since every new connection would see its own empty
/// database.
pub async fn open_in_memory() -> Result<SqlitePool, sqlx::Error> {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None::<Duration>)
        .max_lifetime(None::<Duration>)
        .connect("sqlite::memory:")
        .await?;
    init_local_schema(&pool).await?;
    Ok(pool)
}
