//! Customer data access.
//!
//! Handlers only see [`CustomerRepository`]; the SQLite and Postgres
//! implementations keep their SQL and id encoding to themselves.

mod postgres;
mod sqlite;

pub use postgres::PostgresCustomerRepository;
pub use sqlite::SqliteCustomerRepository;

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::models::Customer;

pub type RepositoryResult<T> = Result<T, RepositoryError>;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("customer not found")]
    NotFound,
    #[error("invalid persisted customer data: {0}")]
    InvalidData(String),
    #[error(transparent)]
    Storage(sqlx::Error),
}

impl From<sqlx::Error> for RepositoryError {
    fn from(value: sqlx::Error) -> Self {
        match value {
            sqlx::Error::RowNotFound => Self::NotFound,
            other => Self::Storage(other),
        }
    }
}

/// The six customer operations, independent of the storage backend.
///
/// `update` and `delete` succeed when no row matches the id.
#[async_trait]
pub trait CustomerRepository: Send + Sync {
    async fn list_all(&self) -> RepositoryResult<Vec<Customer>>;
    async fn get_by_id(&self, id: Uuid) -> RepositoryResult<Customer>;
    async fn get_by_email(&self, email: &str) -> RepositoryResult<Customer>;
    /// The caller assigns `customer.id` before calling.
    async fn create(&self, customer: &Customer) -> RepositoryResult<()>;
    async fn update(&self, customer: &Customer) -> RepositoryResult<()>;
    async fn delete(&self, id: Uuid) -> RepositoryResult<()>;
}

// Optional columns hold NULL rather than empty strings.
fn nullable(value: &str) -> Option<&str> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_not_found_maps_to_not_found() {
        assert!(matches!(
            RepositoryError::from(sqlx::Error::RowNotFound),
            RepositoryError::NotFound
        ));
    }

    #[test]
    fn other_driver_errors_map_to_storage() {
        assert!(matches!(
            RepositoryError::from(sqlx::Error::PoolTimedOut),
            RepositoryError::Storage(_)
        ));
    }

    #[test]
    fn nullable_maps_empty_to_none() {
        assert_eq!(nullable(""), None);
        assert_eq!(nullable("555-0100"), Some("555-0100"));
    }
}
