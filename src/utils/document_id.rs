// utils/document_id.rs

use once_cell::sync::Lazy;
use regex::Regex;

pub const DOCUMENT_ID_MAX_BYTES: usize = 1500;

/// A single path segment of a document path: anything but a slash.
pub static DOCUMENT_ID_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[^/]+$").unwrap());

/// Shortens a device token for log output.
pub fn redact_token(token: &str) -> String {
    let visible: String = token.chars().take(8).collect();
    format!("{}…", visible)
}
