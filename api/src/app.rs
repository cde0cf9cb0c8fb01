//! Application factory
//!
//! Builds the Actix application with the gateway wrapped around every
//! route. Used by both `main` and the integration tests, which inject
//! their own state and limiter.

use std::sync::Arc;

use actix_web::{
    body::MessageBody,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    middleware::Logger,
    web, App, Error, HttpResponse,
};

use fg_core::services::ratelimit::RateLimiter;
use fg_shared::types::response::ApiResponse;

use crate::middleware::Gateway;
use crate::routes::{flow, health, relay, AppState};

/// Create and configure the application
pub fn create_app(
    state: web::Data<AppState>,
    limiter: Arc<dyn RateLimiter>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(state)
        // Registration order is inside-out: the gateway wraps the logger
        .wrap(Logger::default())
        .wrap(Gateway::new(limiter))
        .route("/health", web::get().to(health::health_check))
        .service(
            web::resource("/api/sender")
                .route(web::post().to(relay::send_message))
                .route(web::route().to(relay::method_not_allowed)),
        )
        .service(
            web::scope("/api/flow")
                .route("/start", web::post().to(flow::start))
                .route("/intake", web::post().to(flow::intake))
                .route("/card-details", web::post().to(flow::card_details))
                .route("/verify", web::post().to(flow::verify))
                .route("/reset", web::post().to(flow::reset)),
        )
        .default_service(web::route().to(not_found))
}

async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ApiResponse::error("The requested resource was not found"))
}
