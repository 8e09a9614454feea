use portfolio_selector_core::RawObservation;
use std::io;

use super::observations;

/// Read a CSV table of observations piped on stdin.
/// Refuses to block on an interactive terminal.
pub fn read_stdin_observations() -> Result<Vec<RawObservation>, Box<dyn std::error::Error>> {
    if atty::is(atty::Stream::Stdin) {
        return Err("--data - expects observations piped on stdin".into());
    }

    let stdin = io::stdin();
    let rows = observations::parse_observations(stdin.lock())
        .map_err(|e| format!("Failed to parse stdin: {}", e))?;
    Ok(rows)
}
