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
//! Output formats and format resolution.

use crate::console::ConsoleWriter;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::{self, Write};

/// Output format for log records
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Format {
    /// Console rendering without colors
    Plain,

    /// Console rendering without colors and without time
    #[serde(rename = "plain-notime")]
    PlainNoTime,

    /// Console rendering with colors
    Color,

    /// Console rendering with colors and without time
    #[serde(rename = "color-notime")]
    ColorNoTime,

    /// One JSON object per line
    #[default]
    Json,

    /// Bytes go to the output untouched; the output decides the rendering
    Custom,
}

impl Format {
    /// Parse a format string; unrecognized input gives [`Format::Json`]
    pub fn parse(s: &str) -> Self {
        match s {
            "plain" => Format::Plain,
            "plain-notime" => Format::PlainNoTime,
            "color" => Format::Color,
            "color-notime" => Format::ColorNoTime,
            "json" => Format::Json,
            "custom" => Format::Custom,
            _ => Format::Json,
        }
    }

    /// Format name as used in configuration
    pub fn as_str(&self) -> &'static str {
        match self {
            Format::Plain => "plain",
            Format::PlainNoTime => "plain-notime",
            Format::Color => "color",
            Format::ColorNoTime => "color-notime",
            Format::Json => "json",
            Format::Custom => "custom",
        }
    }

    /// Wrap `out` so JSON record lines come out in this format
    pub fn writer<W: Write>(self, out: W) -> FormattedWriter<W> {
        match self {
            Format::Json | Format::Custom => FormattedWriter::Raw(out),
            Format::Plain => FormattedWriter::Console(ConsoleWriter::new(out, false, false)),
            Format::PlainNoTime => FormattedWriter::Console(ConsoleWriter::new(out, false, true)),
            Format::Color => FormattedWriter::Console(ConsoleWriter::new(out, true, false)),
            Format::ColorNoTime => FormattedWriter::Console(ConsoleWriter::new(out, true, true)),
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Accepts either a typed [`Format`] or a raw string to be parsed.
pub trait FormatInput {
    /// Resolve into a format, falling back to [`Format::Json`]
    fn to_format(&self) -> Format;
}

impl FormatInput for Format {
    fn to_format(&self) -> Format {
        *self
    }
}

impl FormatInput for &str {
    fn to_format(&self) -> Format {
        Format::parse(self)
    }
}

impl FormatInput for String {
    fn to_format(&self) -> Format {
        Format::parse(self)
    }
}

impl FormatInput for &String {
    fn to_format(&self) -> Format {
        Format::parse(self)
    }
}

/// Resolve a format input; unrecognized strings give [`Format::Json`]
pub fn resolve_format<F: FormatInput>(input: F) -> Format {
    input.to_format()
}

/// A writer that emits JSON record lines in a chosen [`Format`].
#[derive(Debug)]
pub enum FormattedWriter<W> {
    /// JSON passthrough
    Raw(W),
    /// Console re-rendering
    Console(ConsoleWriter<W>),
}

impl<W: Write> Write for FormattedWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            FormattedWriter::Raw(out) => out.write(buf),
            FormattedWriter::Console(out) => out.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            FormattedWriter::Raw(out) => out.flush(),
            FormattedWriter::Console(out) => out.flush(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_vocabulary() {
        for format in [
            Format::Plain,
            Format::PlainNoTime,
            Format::Color,
            Format::ColorNoTime,
            Format::Json,
            Format::Custom,
        ] {
            assert_eq!(Format::parse(format.as_str()), format);
        }
    }

    #[test]
    fn test_bogus_resolves_to_json() {
        assert_eq!(resolve_format("bogus"), Format::Json);
        assert_eq!(resolve_format(""), Format::Json);
        // matching is exact
        assert_eq!(resolve_format("COLOR"), Format::Json);
    }

    #[test]
    fn test_typed_input_passes_through() {
        assert_eq!(resolve_format(Format::ColorNoTime), Format::ColorNoTime);
        assert_eq!(resolve_format(String::from("plain")), Format::Plain);
    }

    #[test]
    fn test_serde_names_match_vocabulary() {
        let json = serde_json::to_string(&Format::PlainNoTime).unwrap();
        assert_eq!(json, "\"plain-notime\"");
        let format: Format = serde_json::from_str("\"color-notime\"").unwrap();
        assert_eq!(format, Format::ColorNoTime);
    }

    #[test]
    fn test_json_and_custom_pass_through() {
        for format in [Format::Json, Format::Custom] {
            let mut writer = format.writer(Vec::new());
            writer.write_all(b"{\"level\":\"info\"}\n").unwrap();
            match writer {
                FormattedWriter::Raw(out) => assert_eq!(out, b"{\"level\":\"info\"}\n"),
                FormattedWriter::Console(_) => panic!("expected raw writer"),
            }
        }
    }
}
