//! Notification service module
//!
//! The flow treats outbound messaging as an opaque capability: a
//! single `notify(message)` call that either acknowledges or fails.
//! Formatting of the messages themselves is pure and lives in
//! [`formatter`].

pub mod formatter;
pub mod traits;

pub use traits::Notifier;
