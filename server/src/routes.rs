use actix_web::web;

use crate::handlers::{
    create_customer, delete_customer, get_customer_by_email, get_customer_by_id, health_check,
    list_customers, update_customer,
};

/// Registers the customer API. The email route comes first so `email` is
/// never read as an id. Each path is a single resource, so a method it does
/// not serve gets 405.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(health_check)
        .service(
            web::resource("/customers")
                .route(web::get().to(list_customers))
                .route(web::post().to(create_customer)),
        )
        .service(get_customer_by_email)
        .service(
            web::resource("/customers/{id}")
                .route(web::get().to(get_customer_by_id))
                .route(web::put().to(update_customer))
                .route(web::delete().to(delete_customer)),
        );
}
