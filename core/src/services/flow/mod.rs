//! Step flow controller
//!
//! The four form steps share one shape: validate the step's fields in
//! declared order, relay a formatted notification, then apply a
//! post-submit policy (advance with pacing, or the verification step's
//! attempt/cooldown loop). [`FlowService`] is that shared machine;
//! [`spec`] declares the per-step field sets and [`otp_input`] models
//! the six-cell code entry widget.

pub mod otp_input;
pub mod service;
pub mod spec;
pub mod store;
pub mod types;
pub mod verification;

pub use service::FlowService;
pub use store::FlowStore;
pub use types::SubmitOutcome;

#[cfg(test)]
mod tests;
