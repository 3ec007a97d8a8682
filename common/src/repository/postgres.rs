use async_trait::async_trait;
use sqlx::PgPool;
use tracing::debug;
use uuid::Uuid;

use super::{nullable, CustomerRepository, RepositoryResult};
use crate::models::Customer;

const CUSTOMER_SELECT_SQL: &str = "SELECT
    id,
    first_name,
    middle_name,
    last_name,
    email,
    phone_number
FROM customers";

#[derive(sqlx::FromRow)]
struct CustomerRow {
    id: Uuid,
    first_name: String,
    middle_name: Option<String>,
    last_name: String,
    email: String,
    phone_number: Option<String>,
}

impl From<CustomerRow> for Customer {
    fn from(row: CustomerRow) -> Self {
        Customer {
            id: row.id,
            first_name: row.first_name,
            middle_name: row.middle_name.unwrap_or_default(),
            last_name: row.last_name,
            email: row.email,
            phone_number: row.phone_number.unwrap_or_default(),
        }
    }
}

/// Server-backed customer store. The `customers` table is created by the
/// external migration step, never here.
#[derive(Clone)]
pub struct PostgresCustomerRepository {
    pool: PgPool,
}

impl PostgresCustomerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CustomerRepository for PostgresCustomerRepository {
    async fn list_all(&self) -> RepositoryResult<Vec<Customer>> {
        let rows: Vec<CustomerRow> = sqlx::query_as(CUSTOMER_SELECT_SQL)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(Customer::from).collect())
    }

    async fn get_by_id(&self, id: Uuid) -> RepositoryResult<Customer> {
        let sql = format!("{CUSTOMER_SELECT_SQL} WHERE id = $1");
        let row: CustomerRow = sqlx::query_as(&sql)
            .bind(id)
            .fetch_one(&self.pool)
            .await?;

        Ok(row.into())
    }

    async fn get_by_email(&self, email: &str) -> RepositoryResult<Customer> {
        let sql = format!("{CUSTOMER_SELECT_SQL} WHERE email = $1");
        let row: CustomerRow = sqlx::query_as(&sql)
            .bind(email)
            .fetch_one(&self.pool)
            .await?;

        Ok(row.into())
    }

    async fn create(&self, customer: &Customer) -> RepositoryResult<()> {
        sqlx::query(
            "INSERT INTO customers (id, first_name, middle_name, last_name, email, phone_number)
             VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(customer.id)
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
             SET first_name = $1, middle_name = $2, last_name = $3, email = $4, phone_number = $5
             WHERE id = $6",
        )
        .bind(&customer.first_name)
        .bind(nullable(&customer.middle_name))
        .bind(&customer.last_name)
        .bind(&customer.email)
        .bind(nullable(&customer.phone_number))
        .bind(customer.id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            debug!("update matched no customer with id {}", customer.id);
        }
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> RepositoryResult<()> {
        let result = sqlx::query("DELETE FROM customers WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            debug!("delete matched no customer with id {}", id);
        }
        Ok(())
    }
}
