//! The step flow state machine
//!
//! Each submission walks `Idle → Validating → Submitting → {Success,
//! Failure}`: fields are checked in declared order, a notification is
//! relayed (the single suspension point), then the step's post-submit
//! policy runs. Plain steps advance with a fixed pacing delay; the
//! verification step compares the submitted code against the
//! server-issued one and on mismatch arms a cooldown cycle.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;

use fg_shared::config::FlowConfig;

use crate::domain::flow::{FlowState, StepKind, StepPhase};
use crate::domain::session::SessionId;
use crate::errors::{DomainError, DomainResult};
use crate::services::notify::{formatter, Notifier};

use super::spec::spec_for;
use super::store::FlowStore;
use super::types::SubmitOutcome;
use super::verification::{codes_match, issue_code};

/// Controller for all steps of the flow
pub struct FlowService {
    notifier: Arc<dyn Notifier>,
    store: Arc<dyn FlowStore>,
    config: FlowConfig,
}

impl FlowService {
    pub fn new(notifier: Arc<dyn Notifier>, store: Arc<dyn FlowStore>, config: FlowConfig) -> Self {
        Self {
            notifier,
            store,
            config,
        }
    }

    /// Start (or resume) the flow for a session token.
    ///
    /// Starting an already-started flow returns the existing state
    /// unchanged, so the client can safely re-enter the first page.
    pub async fn start(&self, session_id: SessionId) -> DomainResult<FlowState> {
        if let Some(existing) = self.store.load(&session_id).await.map_err(store_failure)? {
            return Ok(existing);
        }

        let state = FlowState::new(session_id);
        self.store.save(state.clone()).await.map_err(store_failure)?;
        tracing::info!(
            session = %state.session_id,
            event = "flow_started",
            "New flow created at the intake step"
        );
        Ok(state)
    }

    /// Current state for a session token
    pub async fn current(&self, session_id: &SessionId) -> DomainResult<FlowState> {
        self.store
            .load(session_id)
            .await
            .map_err(store_failure)?
            .ok_or(DomainError::SessionNotFound)
    }

    /// Drop all state for a session token
    pub async fn reset(&self, session_id: &SessionId) -> DomainResult<()> {
        self.store.clear(session_id).await.map_err(store_failure)?;
        tracing::info!(session = %session_id, event = "flow_reset", "Flow state cleared");
        Ok(())
    }

    /// Submit one step's field values
    pub async fn submit(
        &self,
        session_id: &SessionId,
        step: StepKind,
        values: &HashMap<String, String>,
    ) -> DomainResult<SubmitOutcome> {
        let state = self.current(session_id).await?;

        if state.step != step {
            return Err(DomainError::Validation {
                field: "step".to_string(),
                message: format!("Flow is on the {} step", state.step.name()),
            });
        }
        if state.phase == StepPhase::Submitting {
            return Ok(SubmitOutcome::Busy);
        }

        match step {
            StepKind::Intake | StepKind::CardDetails => self.submit_plain(state, values).await,
            StepKind::Verification => self.submit_verification(state, values).await,
            StepKind::Complete => Err(DomainError::Validation {
                field: "step".to_string(),
                message: "Flow is already complete".to_string(),
            }),
        }
    }

    /// Intake and card-details steps: validate, relay, advance
    async fn submit_plain(
        &self,
        mut state: FlowState,
        values: &HashMap<String, String>,
    ) -> DomainResult<SubmitOutcome> {
        let step = state.step;
        let spec = spec_for(step).ok_or_else(|| DomainError::Internal {
            message: format!("no field spec for step {}", step.name()),
        })?;

        // Validating: first failure rejects with no notification
        let sanitized = spec.validate(values)?;

        let message = match step {
            StepKind::Intake => formatter::format_intake_message(
                &state.session_id,
                &sanitized["phone"],
                &sanitized["card_number"],
                Utc::now(),
            ),
            _ => formatter::format_card_details_message(&state.session_id, Utc::now()),
        };

        self.relay(&mut state, &message).await?;

        // Entering the verification step issues and delivers its code
        if step == StepKind::CardDetails {
            let code = issue_code(self.config.code_length);
            let delivery = formatter::format_code_delivery(&state.session_id, &code);
            if let Err(error) = self.notifier.notify(&delivery).await {
                tracing::error!(
                    session = %state.session_id,
                    error = %error,
                    event = "code_delivery_failed",
                    "Failed to deliver verification code"
                );
                self.store.save(state).await.map_err(store_failure)?;
                return Err(DomainError::Transport { message: error });
            }
            state.advance();
            state.enter_verification(code);
            tracing::info!(
                session = %state.session_id,
                event = "code_issued",
                "Verification code issued for session"
            );
        } else {
            state.advance();
        }

        let next_step = state.step;
        self.store.save(state).await.map_err(store_failure)?;

        Ok(SubmitOutcome::Advanced {
            next_step,
            advance_after_ms: self.config.advance_delay_ms,
        })
    }

    /// Verification step: cooldown gate, code comparison, attempt loop
    async fn submit_verification(
        &self,
        mut state: FlowState,
        values: &HashMap<String, String>,
    ) -> DomainResult<SubmitOutcome> {
        let now = Utc::now();

        let (expected, attempt_number) = match &state.verification {
            Some(verification) => {
                // Cooldown refusals happen before validation and send nothing
                let remaining = verification.cooldown_remaining(now);
                if remaining > 0 {
                    tracing::debug!(
                        session = %state.session_id,
                        remaining_seconds = remaining,
                        event = "cooldown_refusal",
                        "Submission refused during cooldown"
                    );
                    return Ok(SubmitOutcome::CooldownActive {
                        remaining_seconds: remaining,
                    });
                }
                (
                    verification.expected_code.clone(),
                    verification.attempt_count + 1,
                )
            }
            None => {
                return Err(DomainError::Internal {
                    message: "verification step entered without issued code".to_string(),
                })
            }
        };

        let spec = spec_for(StepKind::Verification).ok_or_else(|| DomainError::Internal {
            message: "no field spec for verification step".to_string(),
        })?;
        let sanitized = spec.validate(values)?;
        let provided = &sanitized["code"];

        let matched = codes_match(&expected, provided);
        let message =
            formatter::format_verification_message(&state.session_id, attempt_number, matched, now);

        self.relay(&mut state, &message).await?;

        if matched {
            state.advance();
            tracing::info!(
                session = %state.session_id,
                attempt = attempt_number,
                event = "verification_succeeded",
                "Code accepted; flow complete"
            );
            self.store.save(state).await.map_err(store_failure)?;
            return Ok(SubmitOutcome::Completed {
                advance_after_ms: self.config.advance_delay_ms,
            });
        }

        let attempt_count = match state.verification.as_mut() {
            Some(verification) => {
                verification.record_failure(now, self.config.cooldown_seconds);
                verification.attempt_count
            }
            None => attempt_number,
        };
        state.touch();
        tracing::warn!(
            session = %state.session_id,
            attempt = attempt_count,
            event = "verification_failed",
            "Code rejected; cooldown armed"
        );
        self.store.save(state).await.map_err(store_failure)?;

        Ok(SubmitOutcome::CodeMismatch {
            attempt_count,
            cooldown_seconds: self.config.cooldown_seconds,
        })
    }

    /// The single suspension point: relay one notification while the
    /// flow is marked as submitting. Transport failures return the flow
    /// to `Idle` with entered state preserved.
    async fn relay(&self, state: &mut FlowState, message: &str) -> DomainResult<()> {
        state.phase = StepPhase::Submitting;
        state.touch();
        self.store.save(state.clone()).await.map_err(store_failure)?;

        let result = self.notifier.notify(message).await;

        state.phase = StepPhase::Idle;
        state.touch();

        match result {
            Ok(message_id) => {
                tracing::info!(
                    session = %state.session_id,
                    step = state.step.name(),
                    message_id = %message_id,
                    event = "step_relayed",
                    "Step notification relayed"
                );
                Ok(())
            }
            Err(error) => {
                tracing::error!(
                    session = %state.session_id,
                    step = state.step.name(),
                    error = %error,
                    event = "relay_failed",
                    "Step notification failed"
                );
                self.store.save(state.clone()).await.map_err(store_failure)?;
                Err(DomainError::Transport { message: error })
            }
        }
    }
}

fn store_failure(error: String) -> DomainError {
    DomainError::Internal {
        message: format!("flow store failure: {error}"),
    }
}
