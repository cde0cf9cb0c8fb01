//! Shared types and utilities for the FlowGate backend
//!
//! This crate holds the pieces every layer depends on:
//! - **Configuration**: typed config structs loaded from environment variables
//! - **Response types**: the `{success, message}` wire wrapper used by all endpoints
//! - **Validation**: pure field predicates for the flow's digit-only inputs

pub mod config;
pub mod types;
pub mod utils;
