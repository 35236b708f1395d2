//! Reply parser for the time estimation stage.

use std::sync::LazyLock;

use regex::Regex;

static MINUTES: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(\d+)\s*minutes?").expect("Invalid minutes regex")
});

/// First "<number> minute(s)" in the reply. No match means no estimate.
pub fn parse_minutes(reply: &str) -> Option<u32> {
    MINUTES
        .captures(reply)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}
