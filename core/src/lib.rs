//! # FlowGate Core
//!
//! Domain and business logic for the FlowGate backend:
//!
//! - **Domain**: session identity tokens and per-flow state
//! - **Errors**: the `DomainError` taxonomy shared by every layer
//! - **Services**: the step flow state machine, the notification
//!   formatter, and the trait seams (`Notifier`, `RateLimiter`,
//!   `FlowStore`, `SessionStore`) that infrastructure implements
//!
//! This crate performs no I/O of its own; everything external is
//! reached through the trait seams.

pub mod domain;
pub mod errors;
pub mod services;
