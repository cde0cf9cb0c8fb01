//! Shared utility functions

pub mod validation;
