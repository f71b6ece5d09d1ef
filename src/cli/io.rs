//! JSON output for one-shot commands
//!
//! One JSON object per line on stdout, UTF-8.

use std::io::{self, Write};

use serde::Serialize;

use super::errors::CliResult;

/// Wrap `data` in a success envelope
pub fn success_envelope<T: Serialize>(data: &T) -> CliResult<serde_json::Value> {
    Ok(serde_json::json!({
        "status": "ok",
        "data": serde_json::to_value(data)?
    }))
}

/// Write a success response to stdout
pub fn write_response<T: Serialize>(data: &T) -> CliResult<()> {
    let response = success_envelope(data)?;

    let mut stdout = io::stdout();
    serde_json::to_writer(&mut stdout, &response)?;
    writeln!(stdout)?;
    stdout.flush()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_envelope() {
        let envelope = success_envelope(&vec!["USC00519281"]).unwrap();
        assert_eq!(
            envelope,
            serde_json::json!({"status": "ok", "data": ["USC00519281"]})
        );
    }
}
