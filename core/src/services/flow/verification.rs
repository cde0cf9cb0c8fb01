//! Code issuance and comparison for the verification step

use constant_time_eq::constant_time_eq;
use rand::rngs::OsRng;
use rand::RngCore;

/// Generate a random digit code of the given length using the OS CSPRNG
///
/// Digits are drawn independently; the modulo has no bias since 10
/// divides nothing in play here beyond the u32 range truncation, which
/// is negligible for a short-lived code.
pub fn issue_code(length: usize) -> String {
    let mut rng = OsRng;
    (0..length)
        .map(|_| {
            let digit = rng.next_u32() % 10;
            char::from(b'0' + digit as u8)
        })
        .collect()
}

/// Constant-time comparison of the issued and submitted codes
pub fn codes_match(expected: &str, provided: &str) -> bool {
    if expected.len() != provided.len() {
        return false;
    }
    constant_time_eq(expected.as_bytes(), provided.as_bytes())
}
