//! Outcome types for step submissions

use serde::Serialize;

use crate::domain::flow::StepKind;

/// Result of one accepted-for-processing step submission
///
/// Validation failures and transport/configuration problems are
/// reported through `DomainError` instead; these variants are the
/// normal outcomes of the state machine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SubmitOutcome {
    /// Step relayed; client should advance after the pacing delay
    Advanced {
        next_step: StepKind,
        advance_after_ms: u64,
    },

    /// Verification passed; flow is complete
    Completed { advance_after_ms: u64 },

    /// Wrong one-time code: field must be cleared, a fresh cooldown
    /// cycle is armed
    CodeMismatch {
        attempt_count: u32,
        cooldown_seconds: u64,
    },

    /// Submission refused while the cooldown is nonzero; no
    /// notification was sent and no attempt was counted
    CooldownActive { remaining_seconds: u64 },

    /// A submission for this flow is already in flight
    Busy,
}
