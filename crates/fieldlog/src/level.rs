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
//! Severity levels and level resolution.
//!
//! Resolution never fails: a string that does not name a level resolves to
//! [`Level::Trace`], the most verbose level.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Ordered severity, `Trace` being the most verbose.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    /// Finest-grained tracing output
    #[default]
    Trace,
    /// Diagnostic detail for developers
    Debug,
    /// Normal operational messages
    Info,
    /// Something unexpected that was handled
    Warn,
    /// An operation failed
    Error,
    /// The process cannot continue
    Fatal,
    /// An unrecoverable programming error
    Panic,
}

impl Level {
    /// All levels, most verbose first
    pub const ALL: [Level; 7] = [
        Level::Trace,
        Level::Debug,
        Level::Info,
        Level::Warn,
        Level::Error,
        Level::Fatal,
        Level::Panic,
    ];

    /// Parse a severity name, ignoring ASCII case and surrounding whitespace
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "trace" => Some(Level::Trace),
            "debug" => Some(Level::Debug),
            "info" => Some(Level::Info),
            "warn" | "warning" => Some(Level::Warn),
            "error" => Some(Level::Error),
            "fatal" => Some(Level::Fatal),
            "panic" => Some(Level::Panic),
            _ => None,
        }
    }

    /// Lowercase name as written to JSON records
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Trace => "trace",
            Level::Debug => "debug",
            Level::Info => "info",
            Level::Warn => "warn",
            Level::Error => "error",
            Level::Fatal => "fatal",
            Level::Panic => "panic",
        }
    }

    /// Three-letter tag used by the console formats
    pub fn tag(&self) -> &'static str {
        match self {
            Level::Trace => "TRC",
            Level::Debug => "DBG",
            Level::Info => "INF",
            Level::Warn => "WRN",
            Level::Error => "ERR",
            Level::Fatal => "FTL",
            Level::Panic => "PNC",
        }
    }

    /// The `tracing` level events of this severity are emitted at.
    ///
    /// `tracing` has no level above `ERROR`, so `Fatal` and `Panic` share it.
    pub fn to_tracing(self) -> tracing::Level {
        match self {
            Level::Trace => tracing::Level::TRACE,
            Level::Debug => tracing::Level::DEBUG,
            Level::Info => tracing::Level::INFO,
            Level::Warn => tracing::Level::WARN,
            Level::Error | Level::Fatal | Level::Panic => tracing::Level::ERROR,
        }
    }
}

impl From<tracing::Level> for Level {
    fn from(level: tracing::Level) -> Self {
        match level {
            tracing::Level::TRACE => Level::Trace,
            tracing::Level::DEBUG => Level::Debug,
            tracing::Level::INFO => Level::Info,
            tracing::Level::WARN => Level::Warn,
            _ => Level::Error,
        }
    }
}

impl From<&tracing::Level> for Level {
    fn from(level: &tracing::Level) -> Self {
        Level::from(*level)
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Accepts either a typed [`Level`] or a raw string to be parsed.
pub trait LevelInput {
    /// Resolve into a level, falling back to [`Level::Trace`]
    fn to_level(&self) -> Level;
}

impl LevelInput for Level {
    fn to_level(&self) -> Level {
        *self
    }
}

impl LevelInput for &str {
    fn to_level(&self) -> Level {
        Level::parse(self).unwrap_or(Level::Trace)
    }
}

impl LevelInput for String {
    fn to_level(&self) -> Level {
        self.as_str().to_level()
    }
}

impl LevelInput for &String {
    fn to_level(&self) -> Level {
        self.as_str().to_level()
    }
}

/// Resolve a level input; unrecognized strings give [`Level::Trace`]
pub fn resolve_level<L: LevelInput>(input: L) -> Level {
    input.to_level()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordering() {
        assert!(Level::Trace < Level::Debug);
        assert!(Level::Debug < Level::Info);
        assert!(Level::Info < Level::Warn);
        assert!(Level::Warn < Level::Error);
        assert!(Level::Error < Level::Fatal);
        assert!(Level::Fatal < Level::Panic);
    }

    #[test]
    fn test_parse_names() {
        for level in Level::ALL {
            assert_eq!(Level::parse(level.as_str()), Some(level));
        }
        assert_eq!(Level::parse("WARNING"), Some(Level::Warn));
        assert_eq!(Level::parse(" Info "), Some(Level::Info));
    }

    #[test]
    fn test_bogus_resolves_to_trace() {
        assert_eq!(resolve_level("bogus"), Level::Trace);
        assert_eq!(resolve_level(""), Level::Trace);
        assert_eq!(resolve_level(String::from("nope")), Level::Trace);
    }

    #[test]
    fn test_typed_input_passes_through() {
        assert_eq!(resolve_level(Level::Fatal), Level::Fatal);
        assert_eq!(resolve_level("error"), Level::Error);
    }

    #[test]
    fn test_tracing_mapping() {
        assert_eq!(Level::Fatal.to_tracing(), tracing::Level::ERROR);
        assert_eq!(Level::from(tracing::Level::WARN), Level::Warn);
        assert_eq!(Level::from(tracing::Level::ERROR), Level::Error);
    }
}
