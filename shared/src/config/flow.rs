//! Step flow timing configuration

use serde::{Deserialize, Serialize};

/// Timing constants for the multi-step flow
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FlowConfig {
    /// Fixed pacing delay before a client should advance to the next
    /// step after a successful submission, in milliseconds
    pub advance_delay_ms: u64,

    /// Cooldown armed after each failed verification attempt, in seconds
    pub cooldown_seconds: u64,

    /// Length of the issued one-time code
    pub code_length: usize,
}

impl Default for FlowConfig {
    fn default() -> Self {
        Self {
            advance_delay_ms: 2_000,
            cooldown_seconds: 30,
            code_length: 6,
        }
    }
}
