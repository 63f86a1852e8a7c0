//! Structured JSON logger.
//!
//! One log line per event, written synchronously with no buffering.
//! Field keys are sorted so identical events always render identically.

use std::fmt;
use std::io::{self, Write};

/// Log severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    /// Debug-level detail
    Trace = 0,
    /// Normal operations
    Info = 1,
    /// Recoverable issues
    Warn = 2,
    /// Operation failures
    Error = 3,
    /// Unrecoverable, process exits
    Fatal = 4,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Trace => "TRACE",
            Severity::Info => "INFO",
            Severity::Warn => "WARN",
            Severity::Error => "ERROR",
            Severity::Fatal => "FATAL",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Writes structured JSON log lines to stdout or stderr.
pub struct Logger;

impl Logger {
    /// Log an event to stdout.
    pub fn log(severity: Severity, event: &str, fields: &[(&str, &str)]) {
        Self::write_line(&mut io::stdout(), severity, event, fields);
    }

    /// Log an event to stderr (errors and fatal conditions).
    pub fn log_stderr(severity: Severity, event: &str, fields: &[(&str, &str)]) {
        Self::write_line(&mut io::stderr(), severity, event, fields);
    }

    fn write_line<W: Write>(
        writer: &mut W,
        severity: Severity,
        event: &str,
        fields: &[(&str, &str)],
    ) {
        let line = Self::format_line(severity, event, fields);
        // One write_all call so a line is never interleaved
        let _ = writer.write_all(line.as_bytes());
        let _ = writer.flush();
    }

    /// Renders one event as a single JSON line: event and severity first,
    /// then the remaining fields in alphabetical key order.
    fn format_line(severity: Severity, event: &str, fields: &[(&str, &str)]) -> String {
        let mut output = String::with_capacity(256);

        output.push_str("{\"event\":\"");
        Self::escape_into(&mut output, event);
        output.push_str("\",\"severity\":\"");
        output.push_str(severity.as_str());
        output.push('"');

        let mut sorted: Vec<_> = fields.iter().collect();
        sorted.sort_by_key(|(key, _)| *key);

        for (key, value) in sorted {
            output.push_str(",\"");
            Self::escape_into(&mut output, key);
            output.push_str("\":\"");
            Self::escape_into(&mut output, value);
            output.push('"');
        }

        output.push_str("}\n");
        output
    }

    fn escape_into(output: &mut String, s: &str) {
        for c in s.chars() {
            match c {
                '"' => output.push_str("\\\""),
                '\\' => output.push_str("\\\\"),
                '\n' => output.push_str("\\n"),
                '\r' => output.push_str("\\r"),
                '\t' => output.push_str("\\t"),
                c if c.is_control() => {
                    output.push_str(&format!("\\u{:04x}", c as u32));
                }
                c => output.push(c),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_strings() {
        assert_eq!(Severity::Info.as_str(), "INFO");
        assert_eq!(Severity::Fatal.as_str(), "FATAL");
        assert!(Severity::Fatal > Severity::Error);
    }

    #[test]
    fn test_event_and_severity_lead_the_line() {
        let line = Logger::format_line(Severity::Info, "server_listening", &[]);
        assert_eq!(
            line,
            "{\"event\":\"server_listening\",\"severity\":\"INFO\"}\n"
        );
    }

    #[test]
    fn test_fields_sorted_alphabetically() {
        let line = Logger::format_line(
            Severity::Info,
            "store_opened",
            &[("zanpakutos", "2"), ("wielders", "1")],
        );
        let wielders = line.find("wielders").unwrap();
        let zanpakutos = line.find("zanpakutos").unwrap();
        assert!(wielders < zanpakutos);
    }

    #[test]
    fn test_special_characters_escaped() {
        let line = Logger::format_line(Severity::Error, "oops", &[("detail", "a \"b\"\nc\\d")]);
        assert!(line.contains(r#"a \"b\"\nc\\d"#));
        // Still a single line
        assert_eq!(line.matches('\n').count(), 1);
    }

    #[test]
    fn test_valid_json() {
        let line =
            Logger::format_line(Severity::Warn, "event", &[("key", "value with \"quotes\"")]);
        let parsed: serde_json::Value = serde_json::from_str(line.trim()).unwrap();
        assert_eq!(parsed["severity"], "WARN");
        assert_eq!(parsed["key"], "value with \"quotes\"");
    }
}
