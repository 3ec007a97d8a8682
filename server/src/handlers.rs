use std::sync::Arc;

use actix_web::{web, HttpResponse, Responder};
use common::models::Customer;
use common::repository::{CustomerRepository, RepositoryError};
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::error::ApiError;

pub struct AppState {
    pub repository: Arc<dyn CustomerRepository>,
}

impl AppState {
    pub fn new(repository: Arc<dyn CustomerRepository>) -> Self {
        Self { repository }
    }
}

fn parse_customer_id(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|err| {
        warn!("failed to parse customer ID {:?}: {}", raw, err);
        ApiError::InvalidId
    })
}

// Bodies are decoded by hand so the id is checked first and any content type is accepted.
fn decode_customer(body: &[u8]) -> Result<Customer, ApiError> {
    serde_json::from_slice(body).map_err(|err| {
        warn!("failed to decode customer payload: {}", err);
        ApiError::InvalidPayload
    })
}

fn fetch_failure(err: RepositoryError, context: &str) -> ApiError {
    match err {
        RepositoryError::NotFound => ApiError::NotFound,
        err => {
            error!("{}: {}", context, err);
            ApiError::Internal("Failed to retrieve customer")
        }
    }
}

pub async fn list_customers(app_state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let customers = app_state.repository.list_all().await.map_err(|err| {
        error!("error getting customers: {}", err);
        ApiError::Internal("Problem when retrieving customers, please try again later")
    })?;

    Ok(HttpResponse::Ok().json(customers))
}

#[actix_web::get("/customers/email/{email}")]
pub async fn get_customer_by_email(
    path: web::Path<String>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, ApiError> {
    let email = path.into_inner();
    let customer = app_state
        .repository
        .get_by_email(&email)
        .await
        .map_err(|err| fetch_failure(err, "error getting customer by email"))?;

    Ok(HttpResponse::Ok().json(customer))
}

pub async fn get_customer_by_id(
    path: web::Path<String>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, ApiError> {
    let id = parse_customer_id(&path)?;
    let customer = app_state
        .repository
        .get_by_id(id)
        .await
        .map_err(|err| fetch_failure(err, "error getting customer by ID"))?;

    Ok(HttpResponse::Ok().json(customer))
}

pub async fn create_customer(
    body: web::Bytes,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, ApiError> {
    let customer = decode_customer(&body)?;
    customer.validate()?;

    let customer = customer.with_id(Uuid::new_v4());
    app_state.repository.create(&customer).await.map_err(|err| {
        error!("failed to create customer: {}", err);
        ApiError::Internal("Failed to create customer")
    })?;

    info!("Created customer {}", customer.id);
    Ok(HttpResponse::Created().json(customer))
}

/// Full replace. The path id wins over any id in the body, and a missing
/// customer is not an error.
pub async fn update_customer(
    path: web::Path<String>,
    body: web::Bytes,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, ApiError> {
    let id = parse_customer_id(&path)?;
    let customer = decode_customer(&body)?.with_id(id);
    customer.validate()?;

    app_state.repository.update(&customer).await.map_err(|err| {
        error!("failed to update customer: {}", err);
        ApiError::Internal("Failed to update customer")
    })?;

    Ok(HttpResponse::Ok().json(customer))
}

pub async fn delete_customer(
    path: web::Path<String>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, ApiError> {
    let id = parse_customer_id(&path)?;
    app_state.repository.delete(id).await.map_err(|err| {
        error!("failed to delete customer: {}", err);
        ApiError::Internal("Failed to delete customer")
    })?;

    Ok(HttpResponse::NoContent().finish())
}

#[actix_web::get("/health")]
pub async fn health_check() -> impl Responder {
    HttpResponse::Ok().content_type("text/plain").body("OK")
}
