use std::sync::Arc;

use actix_web::{http::StatusCode, test, web, App};
use common::db::open_in_memory;
use common::models::Customer;
use common::repository::SqliteCustomerRepository;
use customer_server::{routes, AppState};
use serde_json::json;

macro_rules! sqlite_app {
    () => {{
        let pool = open_in_memory().await.unwrap();
        let repository = Arc::new(SqliteCustomerRepository::new(pool));
        test::init_service(
            App::new()
                .app_data(web::Data::new(AppState::new(repository)))
                .configure(routes::configure),
        )
        .await
    }};
}

#[actix_web::test]
async fn create_then_get_returns_identical_body() {
    let app = sqlite_app!();

    let req = test::TestRequest::post()
        .uri("/customers")
        .set_json(json!({
            "first_name": "John",
            "last_name": "Doe",
            "email": "john@example.com"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created = test::read_body(resp).await;
    let customer: Customer = serde_json::from_slice(&created).unwrap();
    assert!(!customer.id.is_nil());

    let req = test::TestRequest::get()
        .uri(&format!("/customers/{}", customer.id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(test::read_body(resp).await, created);

    let req = test::TestRequest::get()
        .uri("/customers/email/john@example.com")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let by_email: Customer = test::read_body_json(resp).await;
    assert_eq!(by_email, customer);
}

#[actix_web::test]
async fn duplicate_email_is_500() {
    let app = sqlite_app!();
    let body = json!({
        "first_name": "John",
        "last_name": "Doe",
        "email": "john@example.com"
    });

    let req = test::TestRequest::post()
        .uri("/customers")
        .set_json(&body)
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::CREATED
    );

    let req = test::TestRequest::post()
        .uri("/customers")
        .set_json(&body)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        test::read_body(resp).await.as_ref(),
        b"Failed to create customer\n"
    );

    let req = test::TestRequest::get().uri("/customers").to_request();
    let customers: Vec<Customer> = test::call_and_read_body_json(&app, req).await;
    assert_eq!(customers.len(), 1);
}

#[actix_web::test]
async fn update_persists_replacement() {
    let app = sqlite_app!();

    let req = test::TestRequest::post()
        .uri("/customers")
        .set_json(json!({
            "first_name": "Jane",
            "middle_name": "Ann",
            "last_name": "Smith",
            "email": "jane@example.com"
        }))
        .to_request();
    let created: Customer = test::call_and_read_body_json(&app, req).await;

    let req = test::TestRequest::put()
        .uri(&format!("/customers/{}", created.id))
        .set_json(json!({
            "first_name": "Jane",
            "last_name": "Jones",
            "email": "jane.jones@example.com",
            "phone_number": "555-0100"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::get()
        .uri(&format!("/customers/{}", created.id))
        .to_request();
    let stored: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(
        stored,
        json!({
            "id": created.id,
            "first_name": "Jane",
            "last_name": "Jones",
            "email": "jane.jones@example.com",
            "phone_number": "555-0100"
        })
    );
}

#[actix_web::test]
async fn repeated_delete_is_204() {
    let app = sqlite_app!();

    let req = test::TestRequest::post()
        .uri("/customers")
        .set_json(json!({
            "first_name": "John",
            "last_name": "Doe",
            "email": "john@example.com"
        }))
        .to_request();
    let created: Customer = test::call_and_read_body_json(&app, req).await;
    let uri = format!("/customers/{}", created.id);

    for _ in 0..2 {
        let req = test::TestRequest::delete().uri(&uri).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NO_CONTENT);
        assert!(test::read_body(resp).await.is_empty());
    }

    let req = test::TestRequest::get().uri(&uri).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn list_on_empty_database_is_empty_array() {
    let app = sqlite_app!();

    let req = test::TestRequest::get().uri("/customers").to_request();
    let customers: Vec<Customer> = test::call_and_read_body_json(&app, req).await;
    assert!(customers.is_empty());
}
