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
//! Level-aware output sinks.

use crate::format::{Format, FormattedWriter};
use crate::level::Level;
use std::fmt;
use std::io::{self, Write};
use std::sync::{Arc, Mutex};

/// Boxed byte destination owned by a sink
pub type BoxWriter = Box<dyn Write + Send>;

/// A sink receiving finished record lines tagged with their level.
pub trait LevelWrite: Send + Sync {
    /// Write one record line at `level`
    fn write_level(&self, level: Level, buf: &[u8]) -> io::Result<usize>;

    /// Write without level information. Must not drop data.
    fn write_plain(&self, buf: &[u8]) -> io::Result<usize>;

    /// Flush underlying destinations
    fn flush(&self) -> io::Result<()> {
        Ok(())
    }
}

impl<T: LevelWrite + ?Sized> LevelWrite for Arc<T> {
    fn write_level(&self, level: Level, buf: &[u8]) -> io::Result<usize> {
        (**self).write_level(level, buf)
    }

    fn write_plain(&self, buf: &[u8]) -> io::Result<usize> {
        (**self).write_plain(buf)
    }

    fn flush(&self) -> io::Result<()> {
        (**self).flush()
    }
}

impl<T: LevelWrite + ?Sized> LevelWrite for Box<T> {
    fn write_level(&self, level: Level, buf: &[u8]) -> io::Result<usize> {
        (**self).write_level(level, buf)
    }

    fn write_plain(&self, buf: &[u8]) -> io::Result<usize> {
        (**self).write_plain(buf)
    }

    fn flush(&self) -> io::Result<()> {
        (**self).flush()
    }
}

/// A single formatted destination. Ignores levels.
pub struct WriterSink {
    out: Mutex<FormattedWriter<BoxWriter>>,
    format: Format,
}

impl WriterSink {
    /// Wrap `out`, rendering records in `format`
    pub fn new<W: Write + Send + 'static>(out: W, format: Format) -> Self {
        WriterSink {
            out: Mutex::new(format.writer(Box::new(out))),
            format,
        }
    }

    /// The format records are rendered in
    pub fn format(&self) -> Format {
        self.format
    }

    /// Write all of `buf`, reporting the input length on success
    pub fn write_record(&self, buf: &[u8]) -> io::Result<usize> {
        let mut out = self
            .out
            .lock()
            .map_err(|_| io::Error::other("log output mutex poisoned"))?;
        out.write_all(buf)?;
        Ok(buf.len())
    }
}

impl fmt::Debug for WriterSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WriterSink")
            .field("format", &self.format)
            .finish_non_exhaustive()
    }
}

impl LevelWrite for WriterSink {
    fn write_level(&self, _level: Level, buf: &[u8]) -> io::Result<usize> {
        self.write_record(buf)
    }

    fn write_plain(&self, buf: &[u8]) -> io::Result<usize> {
        self.write_record(buf)
    }

    fn flush(&self) -> io::Result<()> {
        self.out
            .lock()
            .map_err(|_| io::Error::other("log output mutex poisoned"))?
            .flush()
    }
}

/// Forwards every record to each inner sink in order.
///
/// All sinks are attempted; the first error is returned afterwards.
#[derive(Default)]
pub struct FanoutSink {
    sinks: Vec<Arc<dyn LevelWrite>>,
}

impl FanoutSink {
    /// Create an empty fan-out
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a sink
    pub fn push(&mut self, sink: Arc<dyn LevelWrite>) {
        self.sinks.push(sink);
    }

    /// Number of inner sinks
    pub fn len(&self) -> usize {
        self.sinks.len()
    }

    /// Whether there are no inner sinks
    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }

    fn each<F>(&self, buf: &[u8], mut write: F) -> io::Result<usize>
    where
        F: FnMut(&dyn LevelWrite) -> io::Result<usize>,
    {
        let mut first_err = None;
        for sink in &self.sinks {
            if let Err(e) = write(sink.as_ref()) {
                first_err.get_or_insert(e);
            }
        }
        match first_err {
            Some(e) => Err(e),
            None => Ok(buf.len()),
        }
    }
}

impl LevelWrite for FanoutSink {
    fn write_level(&self, level: Level, buf: &[u8]) -> io::Result<usize> {
        self.each(buf, |sink| sink.write_level(level, buf))
    }

    fn write_plain(&self, buf: &[u8]) -> io::Result<usize> {
        self.each(buf, |sink| sink.write_plain(buf))
    }

    fn flush(&self) -> io::Result<()> {
        self.each(&[], |sink| sink.flush().map(|_| 0)).map(|_| ())
    }
}
