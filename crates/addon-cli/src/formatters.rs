//! Report formatters.
//!
//! Both tools print one report to stdout at the end of a run, as JSON, compact
//! text, or colorized pretty output.

use addon_core::cli::OutputFormat;
use anyhow::Result;
use colored::Colorize;
use serde::Serialize;

/// Format data according to the specified output format.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
///
/// # Examples
///
/// ```
/// use addon_cli::formatters::format_output;
/// use addon_core::cli::OutputFormat;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Archive {
///     addon_id: String,
///     files: usize,
/// }
///
/// let archive = Archive {
///     addon_id: "plugin.demo".to_string(),
///     files: 12,
/// };
///
/// let output = format_output(&archive, OutputFormat::Json)?;
/// assert!(output.contains("\"addon_id\""));
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn format_output<T: Serialize>(data: &T, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => json::format(data),
        OutputFormat::Text => text::format(data),
        OutputFormat::Pretty => pretty::format(data),
    }
}

/// JSON output formatting.
pub mod json {
    use super::{Result, Serialize};

    /// Format data as JSON with 2-space indentation.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn format<T: Serialize>(data: &T) -> Result<String> {
        Ok(serde_json::to_string_pretty(data)?)
    }

    /// Format data as compact single-line JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn format_compact<T: Serialize>(data: &T) -> Result<String> {
        Ok(serde_json::to_string(data)?)
    }
}

/// Plain text output formatting.
pub mod text {
    use super::{Result, Serialize, json};

    /// Format data as plain text for scripts: compact JSON, no colors.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn format<T: Serialize>(data: &T) -> Result<String> {
        json::format_compact(data)
    }
}

/// Pretty (human-readable) output formatting.
pub mod pretty {
    use super::{Colorize, Result, Serialize};
    use serde_json::Value;

    /// Format data as an indented, colorized outline.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn format<T: Serialize>(data: &T) -> Result<String> {
        let value = serde_json::to_value(data)?;
        let mut output = String::new();
        write_value(&mut output, &value, 0);
        Ok(output.trim_end().to_string())
    }

    fn write_value(output: &mut String, value: &Value, indent: usize) {
        let pad = "  ".repeat(indent);
        match value {
            Value::Object(map) => {
                for (key, val) in map {
                    match val {
                        Value::Object(inner) if !inner.is_empty() => {
                            output.push_str(&format!("{pad}{}:\n", key.blue().bold()));
                            write_value(output, val, indent + 1);
                        }
                        Value::Array(items) if !items.is_empty() => {
                            output.push_str(&format!("{pad}{}:\n", key.blue().bold()));
                            write_value(output, val, indent + 1);
                        }
                        _ => {
                            output.push_str(&format!(
                                "{pad}{}: {}\n",
                                key.blue().bold(),
                                scalar(val)
                            ));
                        }
                    }
                }
            }
            Value::Array(items) => {
                for item in items {
                    match item {
                        Value::Object(_) | Value::Array(_) => {
                            output.push_str(&format!("{pad}{}\n", "-".dimmed()));
                            write_value(output, item, indent + 1);
                        }
                        _ => output.push_str(&format!("{pad}{} {}\n", "-".dimmed(), scalar(item))),
                    }
                }
            }
            _ => output.push_str(&format!("{pad}{}\n", scalar(value))),
        }
    }

    fn scalar(value: &Value) -> String {
        match value {
            Value::Null => "none".dimmed().to_string(),
            Value::Bool(b) => b.to_string().yellow().to_string(),
            Value::Number(n) => n.to_string().cyan().to_string(),
            Value::String(s) => s.green().to_string(),
            Value::Array(_) => "[]".dimmed().to_string(),
            Value::Object(_) => "{}".dimmed().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;

    #[derive(Serialize)]
    struct Channel {
        channel: String,
        addons: Vec<String>,
        checksum: Option<String>,
    }

    fn sample() -> Channel {
        Channel {
            channel: "stable".to_string(),
            addons: vec!["plugin.a".to_string(), "plugin.b".to_string()],
            checksum: None,
        }
    }

    #[test]
    fn test_json_format() {
        let output = json::format(&sample()).unwrap();
        assert!(output.contains("\"channel\": \"stable\""));
        assert!(output.contains("\"checksum\": null"));
    }

    #[test]
    fn test_text_format_is_single_line() {
        let output = text::format(&sample()).unwrap();
        assert!(!output.contains('\n'));
        assert!(output.contains("\"addons\":[\"plugin.a\",\"plugin.b\"]"));
    }

    #[test]
    fn test_pretty_format() {
        colored::control::set_override(false);
        let output = pretty::format(&sample()).unwrap();
        let lines: Vec<_> = output.lines().collect();
        assert!(lines.contains(&"channel: stable"));
        assert!(lines.contains(&"checksum: none"));

        let addons = lines.iter().position(|l| *l == "addons:").unwrap();
        assert_eq!(lines[addons + 1..addons + 3], ["  - plugin.a", "  - plugin.b"]);
    }

    #[test]
    fn test_format_output_dispatch() {
        let data = sample();
        assert!(format_output(&data, OutputFormat::Json).unwrap().contains('\n'));
        assert!(!format_output(&data, OutputFormat::Text).unwrap().contains('\n'));
        assert!(format_output(&data, OutputFormat::Pretty).unwrap().contains("stable"));
    }
}
