//! Field validation utilities
//!
//! Pure predicates for the flow's digit-only inputs. Values are
//! expected to have passed through [`sanitize_digits`] at the input
//! boundary; the predicates themselves still reject any non-digit
//! content so they are safe to call on raw input.

use once_cell::sync::Lazy;
use regex::Regex;

static PHONE_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]{10}$").unwrap());
static CARD_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]{16}$").unwrap());
static PIN_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]{4}$").unwrap());
static LAST_TWO_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]{2}$").unwrap());
static CODE_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]{6}$").unwrap());

/// Strip every non-digit character from the input
pub fn sanitize_digits(value: &str) -> String {
    value.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Validate a 10-digit phone number
pub fn is_phone_valid(phone: &str) -> bool {
    PHONE_PATTERN.is_match(phone)
}

/// Validate a 16-digit card number with the Luhn checksum
pub fn is_card_valid(card_number: &str) -> bool {
    CARD_PATTERN.is_match(card_number) && luhn_check(card_number)
}

/// Validate a 4-digit PIN
pub fn is_pin_valid(pin: &str) -> bool {
    PIN_PATTERN.is_match(pin)
}

/// Validate the 2-digit card suffix confirmation
pub fn is_last_two_valid(digits: &str) -> bool {
    LAST_TWO_PATTERN.is_match(digits)
}

/// Validate a 6-digit one-time code
pub fn is_code_valid(code: &str) -> bool {
    CODE_PATTERN.is_match(code)
}

/// Luhn checksum over a digit-only string
///
/// Walks right to left doubling every second digit, subtracting 9 when
/// the doubled value exceeds 9; the total must be divisible by 10.
fn luhn_check(digits: &str) -> bool {
    let mut sum = 0u32;
    let mut double = false;

    for c in digits.chars().rev() {
        let mut digit = match c.to_digit(10) {
            Some(d) => d,
            None => return false,
        };
        if double {
            digit *= 2;
            if digit > 9 {
                digit -= 9;
            }
        }
        sum += digit;
        double = !double;
    }

    sum % 10 == 0
}

/// The flow's input field classes
///
/// Each step declares its fields as an ordered list of these kinds;
/// the declared order is the deterministic validation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Phone,
    CardNumber,
    Pin,
    LastTwoDigits,
    OneTimeCode,
}

impl FieldKind {
    /// Check a sanitized value against this field class
    pub fn is_valid(&self, value: &str) -> bool {
        match self {
            FieldKind::Phone => is_phone_valid(value),
            FieldKind::CardNumber => is_card_valid(value),
            FieldKind::Pin => is_pin_valid(value),
            FieldKind::LastTwoDigits => is_last_two_valid(value),
            FieldKind::OneTimeCode => is_code_valid(value),
        }
    }

    /// Maximum accepted length in digits
    pub fn max_length(&self) -> usize {
        match self {
            FieldKind::Phone => 10,
            FieldKind::CardNumber => 16,
            FieldKind::Pin => 4,
            FieldKind::LastTwoDigits => 2,
            FieldKind::OneTimeCode => 6,
        }
    }

    /// Client-facing rejection message for this field class
    pub fn error_message(&self) -> &'static str {
        match self {
            FieldKind::Phone => "Enter a valid 10-digit phone number",
            FieldKind::CardNumber => "Enter a valid 16-digit card number",
            FieldKind::Pin => "Enter the 4 digits of your PIN",
            FieldKind::LastTwoDigits => "Enter the last 2 digits of your card",
            FieldKind::OneTimeCode => "Enter a valid 6-digit code",
        }
    }
}
