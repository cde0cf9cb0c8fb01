use std::sync::Arc;

use actix_web::{web, HttpServer};
use dotenv::dotenv;
use log::{info, warn};

use fg_api::app::create_app;
use fg_api::routes::AppState;
use fg_core::services::flow::FlowService;
use fg_core::services::notify::Notifier;
use fg_core::services::ratelimit::RateLimiter;
use fg_infra::notify::{build_notifier, MockNotifier};
use fg_infra::ratelimit::SlidingWindowRateLimiter;
use fg_infra::session::{InMemoryFlowStore, InMemorySessionStore};
use fg_shared::config::{FlowConfig, NotifierConfig, RateLimitConfig, ServerConfig};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    info!("Starting FlowGate API server");

    let server_config = ServerConfig::from_env();
    let rate_limit_config = RateLimitConfig::from_env();
    let notifier_config = NotifierConfig::from_env();
    let flow_config = FlowConfig::default();

    let notifier_ready = notifier_config.test_mode || notifier_config.is_configured();
    let notifier: Arc<dyn Notifier> = if notifier_ready {
        build_notifier(&notifier_config)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e.to_string()))?
    } else {
        // The server still boots; relay-backed endpoints answer with a
        // configuration error until credentials are provided
        warn!("Notifier credentials missing; set NOTIFY_BOT_TOKEN and NOTIFY_CHAT_ID");
        Arc::new(MockNotifier::new())
    };

    let flow_store = Arc::new(InMemoryFlowStore::new());
    let state = web::Data::new(AppState {
        flow: FlowService::new(notifier.clone(), flow_store, flow_config),
        sessions: Arc::new(InMemorySessionStore::new()),
        notifier,
        notifier_ready,
    });
    let limiter: Arc<dyn RateLimiter> = Arc::new(SlidingWindowRateLimiter::new(rate_limit_config));

    let bind_address = server_config.bind_address();
    info!("Server will bind to: {bind_address}");

    HttpServer::new(move || create_app(state.clone(), limiter.clone()))
        .bind(&bind_address)?
        .run()
        .await
}
