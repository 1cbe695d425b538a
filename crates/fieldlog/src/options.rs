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
//! Setup options for building a logger.

use crate::fields::Fields;
use crate::format::{Format, FormatInput};
use crate::layer::JsonLayer;
use crate::level::{Level, LevelInput};
use crate::sink::{BoxWriter, FanoutSink, LevelWrite, WriterSink};
use fieldlog_config::Config;
use serde_json::Value;
use std::fmt;
use std::io::{self, Write};
use std::sync::Arc;

/// Service name that is treated as unset
pub const UNKNOWN_SERVICE: &str = "unknown";

/// Where records go
enum Output {
    Stdout,
    Stderr,
    Writer(BoxWriter),
    Level(Arc<dyn LevelWrite>),
}

impl fmt::Debug for Output {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Output::Stdout => f.write_str("Stdout"),
            Output::Stderr => f.write_str("Stderr"),
            Output::Writer(_) => f.write_str("Writer"),
            Output::Level(_) => f.write_str("Level"),
        }
    }
}

/// Options for [`setup`](crate::setup) and [`build`](crate::build).
///
/// Defaults: service `unknown` (not attached), JSON format, `trace` level,
/// output to stdout, caller shown.
///
/// ```
/// use fieldlog::{Format, Level, SetupOptions};
///
/// let options = SetupOptions::new()
///     .service_name("billing")
///     .with_format("color")
///     .with_level(Level::Info);
/// assert_eq!(options.format(), Format::Color);
/// ```
pub struct SetupOptions {
    service_name: String,
    host_name: String,
    region: String,
    public_ip: String,
    format: Format,
    level: Level,
    output: Output,
    context: Fields,
    hide_caller: bool,
    extra_writers: Vec<BoxWriter>,
}

impl fmt::Debug for SetupOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SetupOptions")
            .field("service_name", &self.service_name)
            .field("format", &self.format)
            .field("level", &self.level)
            .field("output", &self.output)
            .field("hide_caller", &self.hide_caller)
            .field("extra_writers", &self.extra_writers.len())
            .finish_non_exhaustive()
    }
}

impl Default for SetupOptions {
    fn default() -> Self {
        SetupOptions {
            service_name: UNKNOWN_SERVICE.to_string(),
            host_name: String::new(),
            region: String::new(),
            public_ip: String::new(),
            format: Format::Json,
            level: Level::Trace,
            output: Output::Stdout,
            context: Fields::new(),
            hide_caller: false,
            extra_writers: Vec::new(),
        }
    }
}

impl SetupOptions {
    /// Create options with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Take level, format, identity fields, and caller visibility from `config`
    pub fn with_config(mut self, config: &Config) -> Self {
        self.level = config.log_level.to_level();
        self.format = config.log_format.to_format();
        self.service_name.clone_from(&config.service_name);
        self.host_name.clone_from(&config.host_name);
        self.region.clone_from(&config.region);
        self.public_ip.clone_from(&config.public_ip);
        self.hide_caller = config.hide_caller;
        self
    }

    /// Set the output format
    pub fn with_format<F: FormatInput>(mut self, format: F) -> Self {
        self.format = format.to_format();
        self
    }

    /// Set the minimum level
    pub fn with_level<L: LevelInput>(mut self, level: L) -> Self {
        self.level = level.to_level();
        self
    }

    /// Set the service name
    pub fn service_name(mut self, name: impl Into<String>) -> Self {
        self.service_name = name.into();
        self
    }

    /// Set the host name
    pub fn host_name(mut self, name: impl Into<String>) -> Self {
        self.host_name = name.into();
        self
    }

    /// Set the data center region
    pub fn region(mut self, region: impl Into<String>) -> Self {
        self.region = region.into();
        self
    }

    /// Set the public IP
    pub fn public_ip(mut self, ip: impl Into<String>) -> Self {
        self.public_ip = ip.into();
        self
    }

    /// Omit the `caller` field
    pub fn hide_caller(mut self, hide: bool) -> Self {
        self.hide_caller = hide;
        self
    }

    /// Write to standard error instead of standard output
    pub fn with_stderr(mut self) -> Self {
        self.output = Output::Stderr;
        self
    }

    /// Write to `out`, rendered in the configured format
    pub fn with_output<W: Write + Send + 'static>(mut self, out: W) -> Self {
        self.output = Output::Writer(Box::new(out));
        self
    }

    /// Write to a level-aware sink such as a [`SplitWriter`](crate::SplitWriter).
    ///
    /// The sink receives raw JSON records and does its own rendering, so the
    /// configured format is not applied; pair this with [`Format::Custom`].
    pub fn with_level_output<S: LevelWrite + 'static>(mut self, sink: S) -> Self {
        self.output = Output::Level(Arc::new(sink));
        self
    }

    /// Also write raw JSON records to `out`
    pub fn with_extra_writer<W: Write + Send + 'static>(mut self, out: W) -> Self {
        self.extra_writers.push(Box::new(out));
        self
    }

    /// Add a static field to every record
    pub fn with_context_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.context.insert(key.into(), value.into());
        self
    }

    /// The resolved format
    pub fn format(&self) -> Format {
        self.format
    }

    /// The resolved minimum level
    pub fn level(&self) -> Level {
        self.level
    }

    /// Static fields attached to every record, in record order
    pub fn context_fields(&self) -> Fields {
        let mut context = Fields::new();
        match self.service_name.as_str() {
            "" | UNKNOWN_SERVICE => {}
            name => {
                context.insert("service".into(), Value::String(name.to_string()));
            }
        }
        if !self.host_name.is_empty() {
            context.insert("host".into(), Value::String(self.host_name.clone()));
        }
        if !self.region.is_empty() {
            context.insert("region".into(), Value::String(self.region.clone()));
        }
        if !self.public_ip.is_empty() {
            context.insert("publicIP".into(), Value::String(self.public_ip.clone()));
        }
        for (key, value) in &self.context {
            context.insert(key.clone(), value.clone());
        }
        context
    }

    /// Build the record layer these options describe
    pub(crate) fn into_layer(self) -> JsonLayer {
        let context = self.context_fields();

        let main: Arc<dyn LevelWrite> = match self.output {
            Output::Stdout => Arc::new(WriterSink::new(io::stdout(), self.format)),
            Output::Stderr => Arc::new(WriterSink::new(io::stderr(), self.format)),
            Output::Writer(out) => Arc::new(WriterSink::new(out, self.format)),
            Output::Level(sink) => sink,
        };

        let sink: Arc<dyn LevelWrite> = if self.extra_writers.is_empty() {
            main
        } else {
            let mut fanout = FanoutSink::new();
            for out in self.extra_writers {
                fanout.push(Arc::new(WriterSink::new(out, Format::Json)));
            }
            fanout.push(main);
            Arc::new(fanout)
        };

        JsonLayer::new(sink, self.level)
            .with_context(context)
            .with_hide_caller(self.hide_caller)
    }
}
