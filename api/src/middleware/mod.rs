//! HTTP middleware

pub mod gateway;

pub use gateway::Gateway;
