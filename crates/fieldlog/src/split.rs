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
//! Level-routed split output.
//!
//! [`SplitWriter`] sends every record to two destinations, each with its own
//! format and minimum level, e.g. colored console output at `info` for people
//! and JSON at `debug` for machines.

use crate::format::FormatInput;
use crate::level::{Level, LevelInput};
use crate::sink::{LevelWrite, WriterSink};
use std::fmt;
use std::io::{self, Write};
use tracing::Metadata;
use tracing_subscriber::fmt::MakeWriter;

/// One side of a [`SplitWriter`]
#[derive(Debug)]
struct Destination {
    sink: WriterSink,
    min_level: Level,
}

impl Destination {
    fn accepts(&self, level: Level) -> bool {
        level >= self.min_level
    }
}

/// Writes each record to a "user" and a "dev" destination.
///
/// For a level-tagged write the user destination is attempted first, then
/// the dev destination; each is written only if the record's level is at
/// least its minimum. A failure or skip on one side never prevents the
/// other. When any attempted write fails the first error is returned,
/// otherwise the full input length.
///
/// Writes without a level always go to the dev destination.
///
/// Use with [`Format::Custom`](crate::Format::Custom) so the logger hands
/// over raw JSON records.
pub struct SplitWriter {
    user: Destination,
    dev: Destination,
}

impl SplitWriter {
    /// Create a split writer from two (output, format, minimum level) triples
    pub fn new<U, D, F, L>(
        user_out: U,
        dev_out: D,
        user_format: F,
        dev_format: F,
        user_level: L,
        dev_level: L,
    ) -> Self
    where
        U: Write + Send + 'static,
        D: Write + Send + 'static,
        F: FormatInput,
        L: LevelInput,
    {
        SplitWriter {
            user: Destination {
                sink: WriterSink::new(user_out, user_format.to_format()),
                min_level: user_level.to_level(),
            },
            dev: Destination {
                sink: WriterSink::new(dev_out, dev_format.to_format()),
                min_level: dev_level.to_level(),
            },
        }
    }

    /// Minimum level of the user destination
    pub fn user_level(&self) -> Level {
        self.user.min_level
    }

    /// Minimum level of the dev destination
    pub fn dev_level(&self) -> Level {
        self.dev.min_level
    }

    /// Destinations are owned by the caller's lifecycle; closing does nothing.
    pub fn close(&self) -> io::Result<()> {
        Ok(())
    }
}

impl fmt::Debug for SplitWriter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SplitWriter")
            .field("user", &self.user)
            .field("dev", &self.dev)
            .finish()
    }
}

impl LevelWrite for SplitWriter {
    fn write_level(&self, level: Level, buf: &[u8]) -> io::Result<usize> {
        let mut first_err = None;

        for destination in [&self.user, &self.dev] {
            if !destination.accepts(level) {
                continue;
            }
            if let Err(e) = destination.sink.write_record(buf) {
                first_err.get_or_insert(e);
            }
        }

        match first_err {
            Some(e) => Err(e),
            None => Ok(buf.len()),
        }
    }

    fn write_plain(&self, buf: &[u8]) -> io::Result<usize> {
        self.dev.sink.write_record(buf)
    }

    fn flush(&self) -> io::Result<()> {
        let user = self.user.sink.flush();
        let dev = self.dev.sink.flush();
        user.and(dev)
    }
}

/// Per-event writer handed out through [`MakeWriter`]
#[derive(Debug)]
pub struct SplitHandle<'a> {
    writer: &'a SplitWriter,
    level: Option<Level>,
}

impl Write for SplitHandle<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self.level {
            Some(level) => self.writer.write_level(level, buf),
            None => self.writer.write_plain(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        LevelWrite::flush(self.writer)
    }
}

impl<'a> MakeWriter<'a> for SplitWriter {
    type Writer = SplitHandle<'a>;

    fn make_writer(&'a self) -> Self::Writer {
        SplitHandle {
            writer: self,
            level: None,
        }
    }

    fn make_writer_for(&'a self, meta: &Metadata<'_>) -> Self::Writer {
        SplitHandle {
            writer: self,
            level: Some(Level::from(meta.level())),
        }
    }
}
