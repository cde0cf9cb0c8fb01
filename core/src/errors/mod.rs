//! Error types for the FlowGate domain

pub mod domain_error;

pub use domain_error::{DomainError, DomainResult};
