//! Workflow command encoding
//!
//! The runner reads two kinds of messages from a step: `::name key=value::data`
//! lines on stdout, and `KEY<<DELIM` blocks appended to the files named by
//! `GITHUB_ENV` and `GITHUB_OUTPUT`.

use anyhow::{bail, Result};
use uuid::Uuid;

/// Escape the data part of a workflow command
pub fn escape_data(value: &str) -> String {
    value
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

/// Escape a property value of a workflow command
pub fn escape_property(value: &str) -> String {
    escape_data(value).replace(':', "%3A").replace(',', "%2C")
}

/// Render `::command key=value,...::message`
pub fn issue_command(command: &str, properties: &[(&str, &str)], message: &str) -> String {
    let mut line = format!("::{command}");
    if !properties.is_empty() {
        line.push(' ');
        let rendered: Vec<String> = properties
            .iter()
            .map(|(key, value)| format!("{key}={}", escape_property(value)))
            .collect();
        line.push_str(&rendered.join(","));
    }
    line.push_str("::");
    line.push_str(&escape_data(message));
    line
}

/// Render a key/value block for a file command with a fresh delimiter
pub fn prepare_key_value_message(key: &str, value: &str) -> Result<String> {
    let delimiter = format!("ghadelimiter_{}", Uuid::new_v4());
    prepare_key_value_message_with(key, value, &delimiter)
}

pub(crate) fn prepare_key_value_message_with(
    key: &str,
    value: &str,
    delimiter: &str,
) -> Result<String> {
    if key.contains(delimiter) {
        bail!("Unexpected input: name should not contain the delimiter \"{delimiter}\"");
    }
    if value.contains(delimiter) {
        bail!("Unexpected input: value should not contain the delimiter \"{delimiter}\"");
    }
    Ok(format!("{key}<<{delimiter}\n{value}\n{delimiter}\n"))
}
