//! Session and flow state persistence implementations

pub mod memory;

pub use memory::{InMemoryFlowStore, InMemorySessionStore};
