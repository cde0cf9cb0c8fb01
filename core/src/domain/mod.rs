//! Domain entities for the FlowGate backend

pub mod flow;
pub mod session;

pub use flow::{FlowState, StepKind, StepPhase, VerificationState};
pub use session::{SessionId, SessionStore};
