use async_trait::async_trait;
use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use super::{nullable, CustomerRepository, RepositoryError, RepositoryResult};
use crate::models::Customer;

const CUSTOMER_SELECT_SQL: &str = "SELECT
    id,
    first_name,
    middle_name,
    last_name,
    email,
    phone_number
FROM customers";

/// Ids are stored as hyphenated TEXT.
#[derive(sqlx::FromRow)]
struct CustomerRow {
    id: String,
    first_name: String,
    middle_name: Option<String>,
    last_name: String,
    email: String,
    phone_number: Option<String>,
}

impl TryFrom<CustomerRow> for Customer {
    type Error = RepositoryError;

    fn try_from(row: CustomerRow) -> Result<Self, Self::Error> {
        let id = Uuid::parse_str(&row.id)
            .map_err(|err| RepositoryError::InvalidData(format!("id {:?}: {err}", row.id)))?;

        Ok(Customer {
            id,
            first_name: row.first_name,
            middle_name: row.middle_name.unwrap_or_default(),
            last_name: row.last_name,
            email: row.email,
            phone_number: row.phone_number.unwrap_or_default(),
        })
    }
}

/// Local, file-backed customer store.
#[derive(Clone)]
pub struct SqliteCustomerRepository {
    pool: SqlitePool,
}

impl SqliteCustomerRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CustomerRepository for SqliteCustomerRepository {
    async fn list_all(&self) -> RepositoryResult<Vec<Customer>> {
        let rows: Vec<CustomerRow> = sqlx::query_as(CUSTOMER_SELECT_SQL)
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(Customer::try_from).collect()
    }

    async fn get_by_id(&self, id: Uuid) -> RepositoryResult<Customer> {
        let sql = format!("{CUSTOMER_SELECT_SQL} WHERE id = ?");
        let row: CustomerRow = sqlx::query_as(&sql)
            .bind(id.to_string())
            .fetch_one(&self.pool)
            .await?;

        row.try_into()
    }

    async fn get_by_email(&self, email: &str) -> RepositoryResult<Customer> {
        let sql = format!("{CUSTOMER_SELECT_SQL} WHERE email = ?");
        let row: CustomerRow = sqlx::query_as(&sql)
            .bind(email)
            .fetch_one(&self.pool)
            .await?;

        row.try_into()
    }

    async fn create(&self, customer: &Customer) -> RepositoryResult<()> {
        sqlx::query(
            "INSERT INTO customers (id, first_name, middle_name, last_name, email, phone_number)
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(customer.id.to_string())
        .bind(&customer.first_name)
        .bind(nullable(&customer.middle_name))
        .bind(&customer.last_name)
        .bind(&customer.email)
        .bind(nullable(&customer.phone_number))
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn update(&self, customer: &Customer) -> RepositoryResult<()> {
        let result = sqlx::query(
            "UPDATE customers
             SET first_name = ?, middle_name = ?, last_name = ?, email = ?, phone_number = ?
             WHERE id = ?",
        )
        .bind(&customer.first_name)
        .bind(nullable(&customer.middle_name))
        .bind(&customer.last_name)
        .bind(&customer.email)
        .bind(nullable(&customer.phone_number))
        .bind(customer.id.to_string())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            debug!("update matched no customer with id {}", customer.id);
        }
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> RepositoryResult<()> {
        let result = sqlx::query("DELETE FROM customers WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            debug!("delete matched no customer with id {}", id);
        }
        Ok(())
    }
}
