//! Message relay endpoint
//!
//! `POST /api/sender` forwards a caller-supplied message to the
//! configured channel. Responses follow a fixed taxonomy:
//!
//! - `200` message accepted by the webhook
//! - `400` missing or empty message
//! - `405` any method other than POST
//! - `500` missing credentials or delivery failure
//!
//! Failure messages are generic; the webhook's own error detail stays
//! in the server logs.

use actix_web::{web, HttpResponse};
use serde::Deserialize;

use fg_shared::types::response::ApiResponse;

use super::AppState;

#[derive(Debug, Deserialize)]
pub struct SenderRequest {
    #[serde(default)]
    pub message: String,
}

pub async fn send_message(
    state: web::Data<AppState>,
    body: web::Json<SenderRequest>,
) -> HttpResponse {
    let message = body.message.trim();
    if message.is_empty() {
        return HttpResponse::BadRequest().json(ApiResponse::error("Message is required"));
    }

    if !state.notifier_ready {
        log::error!("Relay request refused: notifier credentials are not configured");
        return HttpResponse::InternalServerError()
            .json(ApiResponse::error("Server configuration error"));
    }

    match state.notifier.notify(message).await {
        Ok(_) => HttpResponse::Ok().json(ApiResponse::ok("Message sent successfully")),
        Err(error) => {
            log::error!("Relay delivery failed: {error}");
            HttpResponse::InternalServerError()
                .json(ApiResponse::error("Failed to send message"))
        }
    }
}

pub async fn method_not_allowed() -> HttpResponse {
    HttpResponse::MethodNotAllowed().json(ApiResponse::error("Method not allowed"))
}
