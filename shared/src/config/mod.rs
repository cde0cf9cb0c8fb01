//! Configuration module
//!
//! All configuration is sourced from environment variables once at
//! startup. Each struct provides sensible defaults so the service can
//! boot in development with nothing but `TEST_MODE=true` set.

pub mod flow;
pub mod notifier;
pub mod rate_limit;
pub mod server;

pub use flow::FlowConfig;
pub use notifier::NotifierConfig;
pub use rate_limit::RateLimitConfig;
pub use server::ServerConfig;
