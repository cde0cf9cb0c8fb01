//! Step flow endpoints, driven end to end over HTTP

use std::sync::Arc;

use actix_web::{http::StatusCode, test, web};

use fg_api::app::create_app;
use fg_api::routes::AppState;
use fg_core::services::flow::FlowService;
use fg_core::services::ratelimit::RateLimiter;
use fg_infra::notify::MockNotifier;
use fg_infra::ratelimit::SlidingWindowRateLimiter;
use fg_infra::session::{InMemoryFlowStore, InMemorySessionStore};
use fg_shared::config::{FlowConfig, RateLimitConfig};

fn app_state(notifier: Arc<MockNotifier>) -> web::Data<AppState> {
    web::Data::new(AppState {
        flow: FlowService::new(
            notifier.clone(),
            Arc::new(InMemoryFlowStore::new()),
            FlowConfig::default(),
        ),
        sessions: Arc::new(InMemorySessionStore::new()),
        notifier,
        notifier_ready: true,
    })
}

fn limiter() -> Arc<dyn RateLimiter> {
    // Wide open; rate limiting has its own tests
    Arc::new(SlidingWindowRateLimiter::new(RateLimitConfig {
        window_ms: 60_000,
        max_requests: 1_000,
        max_clients: 100,
    }))
}

/// The issued code, scraped out of the delivery message
fn delivered_code(notifier: &MockNotifier) -> Option<String> {
    notifier
        .messages()
        .iter()
        .rev()
        .find(|m| m.contains("VERIFICATION CODE"))
        .and_then(|m| {
            let start = m.rfind("<code>")? + "<code>".len();
            let end = m.rfind("</code>")?;
            Some(m[start..end].to_string())
        })
}

/// POST a JSON payload and return the status plus decoded body
macro_rules! post_json {
    ($app:expr, $uri:expr, $payload:expr $(,)?) => {{
        let response = test::call_service(
            $app,
            test::TestRequest::post()
                .uri($uri)
                .set_json($payload)
                .to_request(),
        )
        .await;
        let status = response.status();
        let body: serde_json::Value = test::read_body_json(response).await;
        (status, body)
    }};
}

#[actix_web::test]
async fn start_assigns_a_stable_session() {
    let app = test::init_service(create_app(app_state(Arc::new(MockNotifier::new())), limiter()))
        .await;

    let (status, first) = post_json!(&app, "/api/flow/start", serde_json::json!({}));
    assert_eq!(status, StatusCode::OK);
    assert_eq!(first["success"], true);
    assert_eq!(first["step"], "intake");
    let session = first["session"].as_str().unwrap().to_string();
    assert!(session.starts_with("FG-"));
    assert_eq!(session.len(), 9);

    // Same client, same token
    let (_, second) = post_json!(&app, "/api/flow/start", serde_json::json!({}));
    assert_eq!(second["session"], session);
}

#[actix_web::test]
async fn valid_intake_advances_with_pacing() {
    let app = test::init_service(create_app(app_state(Arc::new(MockNotifier::new())), limiter()))
        .await;
    let (_, started) = post_json!(&app, "/api/flow/start", serde_json::json!({}));
    let session = started["session"].as_str().unwrap();

    let (status, body) = post_json!(
        &app,
        "/api/flow/intake",
        serde_json::json!({
            "session": session,
            "phone": "5512345678",
            "card_number": "4111111111111111",
        }),
    );

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["outcome"], "advanced");
    assert_eq!(body["next_step"], "card_details");
    assert_eq!(body["advance_after_ms"], 2_000);
}

#[actix_web::test]
async fn invalid_fields_are_rejected_with_the_failing_field() {
    let app = test::init_service(create_app(app_state(Arc::new(MockNotifier::new())), limiter()))
        .await;
    let (_, started) = post_json!(&app, "/api/flow/start", serde_json::json!({}));
    let session = started["session"].as_str().unwrap();

    let (status, body) = post_json!(
        &app,
        "/api/flow/intake",
        serde_json::json!({
            "session": session,
            "phone": "5512345678",
            "card_number": "4111111111111112",
        }),
    );

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["field"], "card_number");
}

#[actix_web::test]
async fn unknown_or_malformed_sessions_are_not_found() {
    let app = test::init_service(create_app(app_state(Arc::new(MockNotifier::new())), limiter()))
        .await;

    for session in ["FG-ZZZZZ1", "bogus"] {
        let (status, body) = post_json!(
            &app,
            "/api/flow/intake",
            serde_json::json!({
                "session": session,
                "phone": "5512345678",
                "card_number": "4111111111111111",
            }),
        );
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["code"], "SESSION_NOT_FOUND");
    }
}

#[actix_web::test]
async fn full_flow_completes_with_the_delivered_code() {
    let notifier = Arc::new(MockNotifier::new());
    let app = test::init_service(create_app(app_state(notifier.clone()), limiter())).await;
    let (_, started) = post_json!(&app, "/api/flow/start", serde_json::json!({}));
    let session = started["session"].as_str().unwrap().to_string();

    let (_, body) = post_json!(
        &app,
        "/api/flow/intake",
        serde_json::json!({
            "session": session,
            "phone": "5512345678",
            "card_number": "4111111111111111",
        }),
    );
    assert_eq!(body["outcome"], "advanced");

    let (_, body) = post_json!(
        &app,
        "/api/flow/card-details",
        serde_json::json!({
            "session": session,
            "last_two": "11",
            "pin": "1234",
        }),
    );
    assert_eq!(body["outcome"], "advanced");
    assert_eq!(body["next_step"], "verification");

    let code = delivered_code(&notifier).expect("code delivered");
    let (status, body) = post_json!(
        &app,
        "/api/flow/verify",
        serde_json::json!({ "session": session, "code": code }),
    );

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["outcome"], "completed");
    assert_eq!(body["advance_after_ms"], 2_000);
}

#[actix_web::test]
async fn wrong_code_reports_mismatch_and_cooldown() {
    let notifier = Arc::new(MockNotifier::new());
    let app = test::init_service(create_app(app_state(notifier.clone()), limiter())).await;
    let (_, started) = post_json!(&app, "/api/flow/start", serde_json::json!({}));
    let session = started["session"].as_str().unwrap().to_string();

    post_json!(
        &app,
        "/api/flow/intake",
        serde_json::json!({
            "session": session,
            "phone": "5512345678",
            "card_number": "4111111111111111",
        }),
    );
    post_json!(
        &app,
        "/api/flow/card-details",
        serde_json::json!({
            "session": session,
            "last_two": "11",
            "pin": "1234",
        }),
    );

    let issued = delivered_code(&notifier).expect("code delivered");
    let wrong = if issued == "000000" { "000001" } else { "000000" };
    let (status, body) = post_json!(
        &app,
        "/api/flow/verify",
        serde_json::json!({ "session": session, "code": wrong }),
    );

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], false);
    assert_eq!(body["outcome"], "code_mismatch");
    assert_eq!(body["attempt_count"], 1);
    assert_eq!(body["cooldown_seconds"], 30);

    // Cooldown refuses the next attempt outright
    let (_, body) = post_json!(
        &app,
        "/api/flow/verify",
        serde_json::json!({ "session": session, "code": issued }),
    );
    assert_eq!(body["outcome"], "cooldown_active");
}

#[actix_web::test]
async fn reset_returns_the_flow_to_an_unknown_session() {
    let app = test::init_service(create_app(app_state(Arc::new(MockNotifier::new())), limiter()))
        .await;
    let (_, started) = post_json!(&app, "/api/flow/start", serde_json::json!({}));
    let session = started["session"].as_str().unwrap().to_string();

    let (status, body) = post_json!(
        &app,
        "/api/flow/reset",
        serde_json::json!({ "session": session }),
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Flow reset");

    let (status, _) = post_json!(
        &app,
        "/api/flow/intake",
        serde_json::json!({
            "session": session,
            "phone": "5512345678",
            "card_number": "4111111111111111",
        }),
    );
    assert_eq!(status, StatusCode::NOT_FOUND);
}
