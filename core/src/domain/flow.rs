//! Per-flow state entities
//!
//! One `FlowState` exists per session token and tracks which step the
//! flow is on, whether a submission is in flight, and the verification
//! step's attempt/cooldown bookkeeping.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::session::SessionId;

/// The ordered steps of the flow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepKind {
    /// Phone and card number intake
    Intake,
    /// Card suffix confirmation and PIN re-entry
    CardDetails,
    /// One-time code entry
    Verification,
    /// Terminal processing screen
    Complete,
}

impl StepKind {
    /// The step that follows this one, if any
    pub fn next(&self) -> Option<StepKind> {
        match self {
            StepKind::Intake => Some(StepKind::CardDetails),
            StepKind::CardDetails => Some(StepKind::Verification),
            StepKind::Verification => Some(StepKind::Complete),
            StepKind::Complete => None,
        }
    }

    /// Stable name used in payloads and logs
    pub fn name(&self) -> &'static str {
        match self {
            StepKind::Intake => "intake",
            StepKind::CardDetails => "card_details",
            StepKind::Verification => "verification",
            StepKind::Complete => "complete",
        }
    }
}

/// Submission phase of the current step
///
/// One submission is in flight at a time per flow; `Submitting` covers
/// the awaited notify call and re-submission is refused while it is set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepPhase {
    Idle,
    Submitting,
}

/// Attempt and cooldown bookkeeping for the verification step
///
/// Created when the flow enters the verification step and destroyed
/// when it leaves. `cooldown_until` is a deadline rather than a
/// ticking counter; remaining time is derived from it on read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationState {
    /// Failed submissions so far
    pub attempt_count: u32,
    /// Active cooldown deadline, if any
    pub cooldown_until: Option<DateTime<Utc>>,
    /// The server-issued code this step accepts
    pub expected_code: String,
}

impl VerificationState {
    /// Fresh state for step entry with the issued code
    pub fn new(expected_code: String) -> Self {
        Self {
            attempt_count: 0,
            cooldown_until: None,
            expected_code,
        }
    }

    /// Whole seconds left on the cooldown, zero when inactive
    pub fn cooldown_remaining(&self, now: DateTime<Utc>) -> u64 {
        match self.cooldown_until {
            Some(until) if until > now => (until - now).num_seconds().max(0) as u64,
            _ => 0,
        }
    }

    /// Whether submissions are currently refused
    pub fn in_cooldown(&self, now: DateTime<Utc>) -> bool {
        self.cooldown_remaining(now) > 0
    }

    /// Count a failed attempt and arm a fresh cooldown cycle
    pub fn record_failure(&mut self, now: DateTime<Utc>, cooldown_seconds: u64) {
        self.attempt_count += 1;
        self.cooldown_until = Some(now + Duration::seconds(cooldown_seconds as i64));
    }
}

/// Server-side state for one flow instance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowState {
    /// The session token this state belongs to
    pub session_id: SessionId,
    /// Current step
    pub step: StepKind,
    /// Submission phase of the current step
    pub phase: StepPhase,
    /// Verification bookkeeping, present only on the verification step
    pub verification: Option<VerificationState>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last mutation timestamp
    pub updated_at: DateTime<Utc>,
}

impl FlowState {
    /// New flow positioned at the intake step
    pub fn new(session_id: SessionId) -> Self {
        let now = Utc::now();
        Self {
            session_id,
            step: StepKind::Intake,
            phase: StepPhase::Idle,
            verification: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Move to the next step, dropping any verification bookkeeping
    /// belonging to the step being left
    pub fn advance(&mut self) {
        if let Some(next) = self.step.next() {
            self.step = next;
            self.phase = StepPhase::Idle;
            if next != StepKind::Verification {
                self.verification = None;
            }
            self.touch();
        }
    }

    /// Attach verification state when entering the verification step
    pub fn enter_verification(&mut self, expected_code: String) {
        self.verification = Some(VerificationState::new(expected_code));
        self.touch();
    }

    /// Refresh the mutation timestamp
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn steps_advance_in_order() {
        assert_eq!(StepKind::Intake.next(), Some(StepKind::CardDetails));
        assert_eq!(StepKind::CardDetails.next(), Some(StepKind::Verification));
        assert_eq!(StepKind::Verification.next(), Some(StepKind::Complete));
        assert_eq!(StepKind::Complete.next(), None);
    }

    #[test]
    fn cooldown_remaining_counts_down_to_zero() {
        let now = Utc::now();
        let mut state = VerificationState::new("123456".to_string());
        assert!(!state.in_cooldown(now));

        state.record_failure(now, 30);
        assert_eq!(state.attempt_count, 1);
        assert_eq!(state.cooldown_remaining(now), 30);
        assert!(state.in_cooldown(now + Duration::seconds(29)));
        assert!(!state.in_cooldown(now + Duration::seconds(30)));
        assert_eq!(state.cooldown_remaining(now + Duration::seconds(31)), 0);
    }

    #[test]
    fn each_failure_arms_a_fresh_cycle() {
        let now = Utc::now();
        let mut state = VerificationState::new("123456".to_string());
        state.record_failure(now, 30);
        let later = now + Duration::seconds(40);
        state.record_failure(later, 30);
        assert_eq!(state.attempt_count, 2);
        assert_eq!(state.cooldown_remaining(later), 30);
    }

    #[test]
    fn advancing_past_verification_drops_bookkeeping() {
        let mut flow = FlowState::new(SessionId::generate());
        flow.advance(); // card details
        flow.advance(); // verification
        flow.enter_verification("123456".to_string());
        assert!(flow.verification.is_some());
        flow.advance(); // complete
        assert_eq!(flow.step, StepKind::Complete);
        assert!(flow.verification.is_none());
    }
}
