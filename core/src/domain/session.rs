//! Session identity tokens
//!
//! A session token is an opaque `FG-XXXXXX` string that ties the
//! steps of one flow instance together. It carries no claims; all
//! per-flow state lives server-side keyed by this token.

use std::fmt;

use async_trait::async_trait;
use rand::rngs::OsRng;
use rand::RngCore;
use serde::{Deserialize, Serialize};

/// Fixed token prefix
pub const SESSION_PREFIX: &str = "FG-";

/// Alphabet for the random part of the token
const ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Length of the random part
const RANDOM_LEN: usize = 6;

/// Opaque session identifier, format `FG-XXXXXX`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    /// Generate a fresh token using the OS CSPRNG
    ///
    /// The modulo pick has a slight bias toward the start of the
    /// alphabet; negligible for a display-grouping token.
    pub fn generate() -> Self {
        let mut rng = OsRng;
        let mut token = String::with_capacity(SESSION_PREFIX.len() + RANDOM_LEN);
        token.push_str(SESSION_PREFIX);
        for _ in 0..RANDOM_LEN {
            let idx = (rng.next_u32() as usize) % ALPHABET.len();
            token.push(ALPHABET[idx] as char);
        }
        Self(token)
    }

    /// Parse a client-supplied token, rejecting anything that does not
    /// match the `FG-` + 6 uppercase alphanumerics shape
    pub fn parse(value: &str) -> Option<Self> {
        let rest = value.strip_prefix(SESSION_PREFIX)?;
        if rest.len() != RANDOM_LEN {
            return None;
        }
        if !rest.bytes().all(|b| ALPHABET.contains(&b)) {
            return None;
        }
        Some(Self(value.to_string()))
    }

    /// Full token string
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The 6 random characters after the prefix
    pub fn random_part(&self) -> &str {
        &self.0[SESSION_PREFIX.len()..]
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Trait for persisting one token per client context
///
/// A context key identifies the client (the gateway's client key); the
/// token is created lazily on first access, stable afterwards, and
/// removable only by an explicit clear.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Return the context's token, creating and persisting one if absent
    async fn get_or_create(&self, context_key: &str) -> SessionId;

    /// Return the context's token without creating one
    async fn get(&self, context_key: &str) -> Option<SessionId>;

    /// Remove the context's token
    async fn clear(&self, context_key: &str);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_token_has_expected_shape() {
        let id = SessionId::generate();
        assert_eq!(id.as_str().len(), SESSION_PREFIX.len() + RANDOM_LEN);
        assert!(id.as_str().starts_with("FG-"));
        assert!(id
            .random_part()
            .bytes()
            .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit()));
    }

    #[test]
    fn parse_accepts_generated_tokens() {
        let id = SessionId::generate();
        assert_eq!(SessionId::parse(id.as_str()), Some(id));
    }

    #[test]
    fn parse_rejects_malformed_tokens() {
        assert!(SessionId::parse("FG-abc123").is_none()); // lowercase
        assert!(SessionId::parse("FG-12345").is_none()); // short
        assert!(SessionId::parse("XX-123456").is_none()); // wrong prefix
        assert!(SessionId::parse("FG-1234567").is_none()); // long
        assert!(SessionId::parse("").is_none());
    }

    #[test]
    fn tokens_are_distinct() {
        let a = SessionId::generate();
        let b = SessionId::generate();
        // 36^6 possibilities; a collision here means the RNG is broken
        assert_ne!(a, b);
    }
}
