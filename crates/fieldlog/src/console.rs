// Copyright (C) 2026  winnyboy5
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.
//! Console rendering of JSON log records.
//!
//! Each JSON record line is re-rendered as
//! `<time> <LVL> <caller> > <message> key=value ...`, with the record's
//! `stack` printed on the following lines. Lines that are not JSON objects
//! are written through untouched.

use crate::level::Level;
use chrono::{DateTime, Local};
use console::Style;
use serde_json::{Map, Value};
use std::io::{self, Write};

/// Time layout of the console formats (`3:04PM`)
pub const KITCHEN_TIME: &str = "%-I:%M%p";

const COLOR_NO_TIME: &str = "🌱";
const PLAIN_NO_TIME: &str = " ";

/// Record keys rendered in fixed positions rather than as `key=value`
const RESERVED_KEYS: [&str; 5] = ["level", "time", "message", "caller", "stack"];

/// Re-renders JSON record lines for a console.
#[derive(Debug)]
pub struct ConsoleWriter<W> {
    out: W,
    color: bool,
    no_time: bool,
}

impl<W: Write> ConsoleWriter<W> {
    /// Create a console writer over `out`
    pub fn new(out: W, color: bool, no_time: bool) -> Self {
        ConsoleWriter {
            out,
            color,
            no_time,
        }
    }

    /// Consume the writer, returning the underlying output
    pub fn into_inner(self) -> W {
        self.out
    }

    fn style(&self, style: Style) -> Style {
        if self.color {
            style.force_styling(true)
        } else {
            Style::new()
        }
    }

    fn level_style(&self, level: Option<Level>) -> Style {
        let style = match level {
            Some(Level::Trace) => Style::new().magenta(),
            Some(Level::Debug) => Style::new().yellow(),
            Some(Level::Info) => Style::new().green(),
            Some(Level::Warn) => Style::new().red(),
            Some(Level::Error | Level::Fatal | Level::Panic) => Style::new().red().bold(),
            None => Style::new().bold(),
        };
        self.style(style)
    }

    fn format_time(&self, record: &Map<String, Value>) -> String {
        if self.no_time {
            let placeholder = if self.color { COLOR_NO_TIME } else { PLAIN_NO_TIME };
            return placeholder.to_string();
        }
        match record.get("time").and_then(Value::as_str) {
            Some(raw) => match DateTime::parse_from_rfc3339(raw) {
                Ok(time) => time.with_timezone(&Local).format(KITCHEN_TIME).to_string(),
                Err(_) => raw.to_string(),
            },
            None => "<nil>".to_string(),
        }
    }

    /// Render one record line (without trailing newline)
    pub fn render(&self, line: &[u8]) -> Option<String> {
        let record: Map<String, Value> = serde_json::from_slice(line).ok()?;

        let mut parts: Vec<String> = Vec::new();

        let time = self.format_time(&record);
        parts.push(self.style(Style::new().dim()).apply_to(time).to_string());

        let level = record
            .get("level")
            .and_then(Value::as_str)
            .and_then(Level::parse);
        let tag = level.map_or("???", |l| l.tag());
        parts.push(self.level_style(level).apply_to(tag).to_string());

        if let Some(caller) = record.get("caller").and_then(Value::as_str) {
            let caller_style = self.style(Style::new().bold());
            let arrow_style = self.style(Style::new().cyan());
            parts.push(format!(
                "{} {}",
                caller_style.apply_to(caller),
                arrow_style.apply_to(">")
            ));
        }

        match record.get("message") {
            Some(Value::String(message)) => parts.push(message.clone()),
            Some(other) => parts.push(other.to_string()),
            None => {}
        }

        let mut keys: Vec<&String> = record
            .keys()
            .filter(|k| !RESERVED_KEYS.contains(&k.as_str()))
            .collect();
        keys.sort();

        for key in keys {
            let key_style = if key == "error" {
                self.style(Style::new().red())
            } else {
                self.style(Style::new().cyan())
            };
            let value = render_value(&record[key.as_str()]);
            let value = if key == "error" {
                self.style(Style::new().red().bold()).apply_to(value).to_string()
            } else {
                value
            };
            parts.push(format!("{}{}", key_style.apply_to(format!("{key}=")), value));
        }

        let mut rendered = parts.join(" ");
        if let Some(stack) = record.get("stack").and_then(Value::as_str) {
            rendered.push('\n');
            rendered.push_str(stack);
        }
        Some(rendered)
    }
}

/// Strings print bare unless they need quoting; everything else as compact JSON
fn render_value(value: &Value) -> String {
    match value {
        Value::String(s) if s.is_empty() || s.chars().any(|c| c.is_whitespace() || c == '"') => {
            value.to_string()
        }
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

impl<W: Write> Write for ConsoleWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        for line in buf.split(|b| *b == b'\n') {
            if line.is_empty() {
                continue;
            }
            match self.render(line) {
                Some(rendered) => {
                    self.out.write_all(rendered.as_bytes())?;
                    self.out.write_all(b"\n")?;
                }
                None => {
                    self.out.write_all(line)?;
                    self.out.write_all(b"\n")?;
                }
            }
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn render_plain(line: &str) -> String {
        let mut writer = ConsoleWriter::new(Vec::new(), false, true);
        writer.write_all(line.as_bytes()).unwrap();
        String::from_utf8(writer.into_inner()).unwrap()
    }

    #[test]
    fn test_plain_layout() {
        let out = render_plain(
            r#"{"level":"info","time":"2026-01-02T15:04:05Z","message":"started","caller":"main.rs:10","port":8080}"#,
        );
        assert_eq!(out, "  INF main.rs:10 > started port=8080\n");
    }

    #[test]
    fn test_fields_sorted_and_stack_on_next_line() {
        let out = render_plain(
            r#"{"level":"error","message":"boom","zeta":"z","alpha":"a b","stack":"frame 0\nframe 1"}"#,
        );
        assert_eq!(out, "  ERR boom alpha=\"a b\" zeta=z\nframe 0\nframe 1\n");
    }

    #[test]
    fn test_kitchen_time() {
        let mut writer = ConsoleWriter::new(Vec::new(), false, false);
        writer
            .write_all(br#"{"level":"warn","time":"2026-01-02T15:04:05Z","message":"m"}"#)
            .unwrap();
        let out = String::from_utf8(writer.into_inner()).unwrap();
        let expected = DateTime::parse_from_rfc3339("2026-01-02T15:04:05Z")
            .unwrap()
            .with_timezone(&Local)
            .format(KITCHEN_TIME)
            .to_string();
        assert!(out.starts_with(&format!("{expected} WRN m")));
    }

    #[test]
    fn test_color_no_time_placeholder() {
        let mut writer = ConsoleWriter::new(Vec::new(), true, true);
        writer
            .write_all(br#"{"level":"debug","message":"m"}"#)
            .unwrap();
        let out = String::from_utf8(writer.into_inner()).unwrap();
        assert!(out.contains(COLOR_NO_TIME));
        assert!(out.contains("\u{1b}["));
        assert!(out.contains("DBG"));
    }

    #[test]
    fn test_non_json_passthrough() {
        assert_eq!(render_plain("not a record"), "not a record\n");
    }

    #[test]
    fn test_unknown_level_tag() {
        assert_eq!(render_plain(r#"{"message":"m"}"#), "  ??? m\n");
    }
}
