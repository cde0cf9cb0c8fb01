//! Core services

pub mod flow;
pub mod notify;
pub mod ratelimit;
