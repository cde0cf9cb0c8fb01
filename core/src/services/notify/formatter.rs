//! Notification message formatting
//!
//! Pure functions turning a step's outcome into the HTML-subset text
//! (`<b>`, `<code>`) the destination channel renders. Every message is
//! tagged with the session token, a color marker derived from it, and
//! a UTC timestamp.
//!
//! Captured field values are masked before they reach a message: card
//! numbers keep their last four digits, phone numbers their last four,
//! and PINs and submitted one-time codes never appear at all. The only
//! secret that ever travels through the notifier is the server-issued
//! code in its own delivery message.

use chrono::{DateTime, Utc};

use crate::domain::session::SessionId;

const MARKERS: [&str; 6] = ["🔴", "🟠", "🟡", "🟢", "🔵", "🟣"];

/// Five-repeat color marker derived from the token's first random
/// character, so one session's messages group visually in the channel
pub fn session_marker(session_id: &SessionId) -> String {
    let first = session_id.random_part().bytes().next().unwrap_or(b'A');
    let marker = MARKERS[(first as usize) % MARKERS.len()];
    marker.repeat(5)
}

/// Mask a phone number down to its last four digits
pub fn mask_phone(phone: &str) -> String {
    mask_tail(phone, 4)
}

/// Mask a card number down to its last four digits, grouped
pub fn mask_card(card_number: &str) -> String {
    format!("**** **** **** {}", tail(card_number, 4))
}

/// Intake step: masked phone and card, never the raw values
pub fn format_intake_message(
    session_id: &SessionId,
    phone: &str,
    card_number: &str,
    at: DateTime<Utc>,
) -> String {
    format!(
        "🆕 <b>INTAKE</b> {marker}\n\
         <b>Session:</b> <code>{session}</code>\n\n\
         📱 Phone: <code>{phone}</code>\n\
         💳 Card: <code>{card}</code>\n\
         🕐 {at}",
        marker = session_marker(session_id),
        session = session_id,
        phone = mask_phone(phone),
        card = mask_card(card_number),
        at = timestamp(at),
    )
}

/// Card-details step: confirms completion only; the PIN and suffix are
/// deliberately absent
pub fn format_card_details_message(session_id: &SessionId, at: DateTime<Utc>) -> String {
    format!(
        "🔐 <b>CARD DETAILS CONFIRMED</b> {marker}\n\
         <b>Session:</b> <code>{session}</code>\n\n\
         🕐 {at}",
        marker = session_marker(session_id),
        session = session_id,
        at = timestamp(at),
    )
}

/// Verification step: attempt number and outcome, never the code
pub fn format_verification_message(
    session_id: &SessionId,
    attempt: u32,
    matched: bool,
    at: DateTime<Utc>,
) -> String {
    let outcome = if matched { "accepted" } else { "rejected" };
    format!(
        "🔑 <b>CODE ATTEMPT #{attempt}</b> {marker}\n\
         <b>Session:</b> <code>{session}</code>\n\n\
         Result: <b>{outcome}</b>\n\
         🕐 {at}",
        marker = session_marker(session_id),
        session = session_id,
        attempt = attempt,
        outcome = outcome,
        at = timestamp(at),
    )
}

/// Delivery of the server-issued code to the channel
pub fn format_code_delivery(session_id: &SessionId, code: &str) -> String {
    format!(
        "✉️ <b>VERIFICATION CODE</b> {marker}\n\
         <b>Session:</b> <code>{session}</code>\n\n\
         Code: <code>{code}</code>",
        marker = session_marker(session_id),
        session = session_id,
        code = code,
    )
}

fn timestamp(at: DateTime<Utc>) -> String {
    at.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}

fn tail(value: &str, keep: usize) -> &str {
    let start = value.len().saturating_sub(keep);
    value.get(start..).unwrap_or(value)
}

fn mask_tail(value: &str, keep: usize) -> String {
    let visible = tail(value, keep);
    let hidden = value.len().saturating_sub(visible.len());
    format!("{}{}", "*".repeat(hidden), visible)
}
