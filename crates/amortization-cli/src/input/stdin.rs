use serde_json::Value;
use std::io::{self, Read};
use tracing::debug;

/// Piped JSON input, if any. An interactive terminal or a pipe carrying only
/// whitespace yields `None` so the caller falls back to flags.
pub fn read_stdin() -> Result<Option<Value>, Box<dyn std::error::Error>> {
    if atty::is(atty::Stream::Stdin) {
        return Ok(None);
    }

    let mut piped = String::new();
    io::stdin().lock().read_to_string(&mut piped)?;

    let document = piped.trim();
    if document.is_empty() {
        return Ok(None);
    }

    debug!(bytes = document.len(), "parsing stdin as JSON");
    serde_json::from_str(document)
        .map(Some)
        .map_err(|e| format!("Failed to parse stdin: {}", e).into())
}
