//! Context Resolver — pure functions over transcript slices.
//!
//! Sessions are stateless between requests: greeting state and doctor
//! references are re-derived from the stored transcript on every call,
//! never cached.

use std::sync::LazyLock;

use regex::Regex;

use crate::models::enums::QueryCategory;
use crate::models::Turn;

/// Number of most recent turns considered for greeting detection and the
/// transcript embedded in instructions.
pub const LOOKBACK_WINDOW: usize = 6;

/// Phrases a prior assistant response may contain when the user has already
/// been greeted.
const GREETING_MARKERS: &[&str] = &[
    "xin chào",
    "chào bạn",
    "chào anh",
    "chào chị",
    "hello",
    "rất vui được hỗ trợ",
    "nice to help",
];

/// Anaphoric doctor references. Longer Vietnamese forms come first so the
/// whole phrase is rewritten, not just its tail.
static DOCTOR_ANAPHORA: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)vị bác sĩ (?:này|đó|ấy)|bác sĩ (?:này|đó|ấy)|ông ấy|bà ấy|anh ấy|cô ấy|(?:this|that) doctor|\b(?:he|she|him|his|her)\b",
    )
    .expect("anaphora pattern must compile")
});

/// "Bác sĩ <Name>, ..." as it appears in assistant responses. Names are a
/// run of capitalized words, so trailing prose never leaks into the capture.
static RESPONSE_DOCTOR_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?i:bác sĩ|bs\.?|doctor)[:\s]+((?:\p{Lu}[\p{L}'.-]*)(?:\s+\p{Lu}[\p{L}'.-]*)*)")
        .expect("response name pattern must compile")
});

/// "bác sĩ <Name>" as typed by the user.
static USER_DOCTOR_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?i:bác sĩ|doctor)[:\s]+((?:\p{Lu}[\p{L}'.-]*)(?:\s+\p{Lu}[\p{L}'.-]*)*)")
        .expect("user name pattern must compile")
});

/// The most recent turns of a session, in chronological order.
pub fn lookback_window(history: &[Turn]) -> &[Turn] {
    &history[history.len().saturating_sub(LOOKBACK_WINDOW)..]
}

/// True if any response in the window already greeted the user.
pub fn has_been_greeted(window: &[Turn]) -> bool {
    window.iter().any(|turn| {
        let response = turn.response.to_lowercase();
        GREETING_MARKERS.iter().any(|m| response.contains(m))
    })
}

/// Render the window as alternating User/Assistant lines for the instruction.
pub fn render_transcript(window: &[Turn]) -> Option<String> {
    if window.is_empty() {
        return None;
    }
    let lines: Vec<String> = window
        .iter()
        .map(|turn| format!("User: {}\nAssistant: {}", turn.message, turn.response))
        .collect();
    Some(lines.join("\n"))
}

/// True if the message refers to a doctor anaphorically instead of by name.
pub fn has_doctor_anaphora(message: &str) -> bool {
    DOCTOR_ANAPHORA.is_match(message)
}

/// Rewrite an anaphoric doctor reference to the explicit name found in the
/// session history. The FULL history is scanned backward (most recent turn
/// first); within a turn the assistant response of a doctor-typed exchange is
/// preferred over the user's own message. Without a resolvable name the
/// message passes through unchanged and the instruction asks the backend to
/// request clarification.
pub fn resolve_doctor_reference(message: &str, history: &[Turn]) -> String {
    if !has_doctor_anaphora(message) {
        return message.to_string();
    }

    match find_recent_doctor_name(history) {
        Some(name) => DOCTOR_ANAPHORA
            .replace_all(message, regex::NoExpand(&format!("bác sĩ {name}")))
            .into_owned(),
        None => message.to_string(),
    }
}

fn find_recent_doctor_name(history: &[Turn]) -> Option<String> {
    for turn in history.iter().rev() {
        if turn.message_type == QueryCategory::Doctor {
            if let Some(name) = capture_name(&RESPONSE_DOCTOR_NAME, &turn.response) {
                return Some(name);
            }
        }
        if let Some(name) = capture_name(&USER_DOCTOR_NAME, &turn.message) {
            return Some(name);
        }
    }
    None
}

fn capture_name(pattern: &Regex, text: &str) -> Option<String> {
    for caps in pattern.captures_iter(text) {
        let candidate = caps.get(1)?.as_str().trim();
        if is_plausible_name(candidate) {
            return Some(candidate.to_string());
        }
    }
    None
}

/// Reject captures that are themselves anaphors or filler, e.g. the "này"
/// in "bác sĩ này".
fn is_plausible_name(candidate: &str) -> bool {
    if candidate.is_empty() {
        return false;
    }
    let first_word = candidate
        .split_whitespace()
        .next()
        .unwrap_or_default()
        .to_lowercase();
    !matches!(first_word.as_str(), "này" | "đó" | "ấy" | "nào")
}
