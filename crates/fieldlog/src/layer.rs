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
//! JSON record layer.
//!
//! Turns each `tracing` event into one JSON object line and hands it, with
//! its level, to a [`LevelWrite`] sink.

use crate::fields::{self, Fields};
use crate::level::Level;
use crate::sink::LevelWrite;
use chrono::{SecondsFormat, Utc};
use serde_json::Value;
use std::error::Error as StdError;
use std::fmt;
use std::sync::Arc;
use tracing::field::{Field, Visit};
use tracing::{Event, Metadata, Subscriber};
use tracing_subscriber::layer::{Context, Layer};

/// Event field that overrides the record level, e.g. `severity = "fatal"`
pub const SEVERITY_FIELD: &str = "severity";

/// Builds JSON records from events and writes them to a sink.
#[derive(Clone)]
pub struct JsonLayer {
    sink: Arc<dyn LevelWrite>,
    min_level: Level,
    context: Fields,
    hide_caller: bool,
}

impl JsonLayer {
    /// Create a layer writing records at or above `min_level` to `sink`
    pub fn new(sink: Arc<dyn LevelWrite>, min_level: Level) -> Self {
        JsonLayer {
            sink,
            min_level,
            context: Fields::new(),
            hide_caller: false,
        }
    }

    /// Set the static fields added to every record
    pub fn with_context(mut self, context: Fields) -> Self {
        self.context = context;
        self
    }

    /// Omit the `caller` field
    pub fn with_hide_caller(mut self, hide_caller: bool) -> Self {
        self.hide_caller = hide_caller;
        self
    }

    /// Minimum record level
    pub fn min_level(&self) -> Level {
        self.min_level
    }

    /// The sink records are written to
    pub fn sink(&self) -> &Arc<dyn LevelWrite> {
        &self.sink
    }

    /// Build one record line (with trailing newline)
    fn render(&self, level: Level, meta: &Metadata<'_>, event: EventFields) -> Vec<u8> {
        let mut record = Fields::new();
        record.insert("level".into(), Value::String(level.as_str().into()));
        for (key, value) in &self.context {
            record.insert(key.clone(), value.clone());
        }
        record.insert(
            "time".into(),
            Value::String(Utc::now().to_rfc3339_opts(SecondsFormat::Nanos, true)),
        );
        if !self.hide_caller {
            if let (Some(file), Some(line)) = (meta.file(), meta.line()) {
                record.insert("caller".into(), Value::String(format!("{file}:{line}")));
            }
        }
        record.extend(event.fields);
        if let Some(stack) = event.stack {
            record.insert("stack".into(), Value::String(stack));
        }
        if let Some(message) = event.message {
            record.insert("message".into(), Value::String(message));
        }

        let mut line = serde_json::to_vec(&Value::Object(record)).unwrap_or_default();
        line.push(b'\n');
        line
    }
}

impl fmt::Debug for JsonLayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JsonLayer")
            .field("min_level", &self.min_level)
            .field("context", &self.context)
            .field("hide_caller", &self.hide_caller)
            .finish_non_exhaustive()
    }
}

impl<S: Subscriber> Layer<S> for JsonLayer {
    fn enabled(&self, metadata: &Metadata<'_>, _ctx: Context<'_, S>) -> bool {
        // fatal and panic records arrive as ERROR events
        Level::from(metadata.level()) >= self.min_level.min(Level::Error)
    }

    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut visitor = EventFields::default();
        event.record(&mut visitor);

        let level = visitor
            .severity
            .unwrap_or_else(|| Level::from(event.metadata().level()));
        if level < self.min_level {
            return;
        }

        let line = self.render(level, event.metadata(), visitor);
        // a failing destination must not break the caller
        if let Err(e) = self.sink.write_level(level, &line) {
            eprintln!("fieldlog: could not write record: {e}");
        }
    }
}

/// Values recorded from one event
#[derive(Default)]
struct EventFields {
    message: Option<String>,
    severity: Option<Level>,
    stack: Option<String>,
    fields: Fields,
}

impl EventFields {
    fn insert(&mut self, field: &Field, value: Value) {
        self.fields.insert(field.name().to_string(), value);
    }
}

impl Visit for EventFields {
    fn record_str(&mut self, field: &Field, value: &str) {
        match field.name() {
            "message" => self.message = Some(value.to_string()),
            SEVERITY_FIELD => match Level::parse(value) {
                Some(level) => self.severity = Some(level),
                None => self.insert(field, Value::String(value.to_string())),
            },
            _ => self.insert(field, Value::String(value.to_string())),
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        let rendered = format!("{value:?}");
        match field.name() {
            "message" => self.message = Some(rendered),
            _ => self.insert(field, Value::String(rendered)),
        }
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.insert(field, Value::from(value));
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.insert(field, Value::from(value));
    }

    fn record_f64(&mut self, field: &Field, value: f64) {
        self.insert(field, Value::from(value));
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.insert(field, Value::from(value));
    }

    fn record_error(&mut self, field: &Field, value: &(dyn StdError + 'static)) {
        self.insert(field, fields::marshal_error(value));
        if self.stack.is_none() {
            self.stack = fields::error_stack(value);
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::format::Format;
    use crate::sink::tests::Capture;
    use crate::sink::WriterSink;
    use crate::StructuredError;
    use serde_json::json;
    use tracing_subscriber::layer::SubscriberExt;

    fn records(capture: &Capture) -> Vec<Value> {
        capture
            .text()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect()
    }

    fn capture_layer(min_level: Level) -> (JsonLayer, Capture) {
        let capture = Capture::default();
        let sink = Arc::new(WriterSink::new(capture.clone(), Format::Json));
        (JsonLayer::new(sink, min_level), capture)
    }

    #[test]
    fn test_record_shape() {
        let (layer, capture) = capture_layer(Level::Trace);
        let mut context = Fields::new();
        context.insert("service".into(), json!("billing"));
        let subscriber = tracing_subscriber::registry().with(layer.with_context(context));

        tracing::subscriber::with_default(subscriber, || {
            tracing::info!(order = 7, paid = true, "order placed");
        });

        let records = records(&capture);
        assert_eq!(records.len(), 1);
        let record = &records[0];
        assert_eq!(record["level"], "info");
        assert_eq!(record["message"], "order placed");
        assert_eq!(record["service"], "billing");
        assert_eq!(record["order"], 7);
        assert_eq!(record["paid"], true);
        assert!(record["time"].is_string());
        assert!(record["caller"].as_str().unwrap().contains("layer.rs"));
        assert!(record.get("stack").is_none());
    }

    #[test]
    fn test_keys_in_record_order() {
        let (layer, capture) = capture_layer(Level::Trace);
        let subscriber = tracing_subscriber::registry().with(layer);
        tracing::subscriber::with_default(subscriber, || {
            tracing::warn!(k = "v", "m");
        });
        let text = capture.text();
        let level_at = text.find("\"level\"").unwrap();
        let time_at = text.find("\"time\"").unwrap();
        let message_at = text.find("\"message\"").unwrap();
        assert!(level_at < time_at && time_at < message_at);
    }

    #[test]
    fn test_min_level_drops_records() {
        let (layer, capture) = capture_layer(Level::Warn);
        let subscriber = tracing_subscriber::registry().with(layer);
        tracing::subscriber::with_default(subscriber, || {
            tracing::info!("dropped");
            tracing::error!("kept");
        });
        let records = records(&capture);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0]["message"], "kept");
    }

    #[test]
    fn test_severity_override() {
        let (layer, capture) = capture_layer(Level::Fatal);
        let subscriber = tracing_subscriber::registry().with(layer);
        tracing::subscriber::with_default(subscriber, || {
            tracing::error!("plain error");
            tracing::error!(severity = "fatal", "going down");
        });
        let records = records(&capture);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0]["level"], "fatal");
        assert!(records[0].get("severity").is_none());
    }

    #[test]
    fn test_hide_caller() {
        let (layer, capture) = capture_layer(Level::Trace);
        let subscriber = tracing_subscriber::registry().with(layer.with_hide_caller(true));
        tracing::subscriber::with_default(subscriber, || tracing::info!("m"));
        assert!(records(&capture)[0].get("caller").is_none());
    }

    #[test]
    fn test_rich_error_is_marshalled_with_fields_and_stack() {
        let (layer, capture) = capture_layer(Level::Trace);
        let subscriber = tracing_subscriber::registry().with(layer);
        let err = StructuredError::wrap(
            StructuredError::new("row locked").with_field("table", "orders"),
            "update failed",
        )
        .with_field("attempt", 2)
        .with_stack_trace("frame 0");

        tracing::subscriber::with_default(subscriber, || {
            tracing::error!(error = &err as &(dyn StdError + 'static), "write failed");
        });

        let record = &records(&capture)[0];
        assert_eq!(
            record["error"],
            json!({"msg": "update failed", "fields": {"attempt": 2, "table": "orders"}})
        );
        assert_eq!(record["stack"], "frame 0");
    }

    #[test]
    fn test_nested_custom_rich_error_fields_reach_record() {
        #[derive(Debug)]
        struct QuotaError(Fields);

        impl fmt::Display for QuotaError {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("quota exceeded")
            }
        }

        impl StdError for QuotaError {}

        impl crate::RichError for QuotaError {
            fn fields(&self) -> Option<&Fields> {
                Some(&self.0)
            }

            fn causes(&self) -> Vec<crate::ErrorLink<'_>> {
                Vec::new()
            }
        }

        let (layer, capture) = capture_layer(Level::Trace);
        let subscriber = tracing_subscriber::registry().with(layer);
        let mut quota = Fields::new();
        quota.insert("tenant".into(), json!("acme"));
        let err = StructuredError::new("upload rejected").caused_by_rich(QuotaError(quota));

        tracing::subscriber::with_default(subscriber, || {
            tracing::error!(error = &err as &(dyn StdError + 'static), "upload failed");
        });

        let record = &records(&capture)[0];
        assert_eq!(
            record["error"],
            json!({"msg": "upload rejected", "fields": {"tenant": "acme"}})
        );
    }

    #[test]
    fn test_failing_sink_does_not_break_caller() {
        let sink = Arc::new(WriterSink::new(crate::sink::tests::Broken, Format::Json));
        let subscriber = tracing_subscriber::registry().with(JsonLayer::new(sink, Level::Trace));
        tracing::subscriber::with_default(subscriber, || {
            tracing::info!("lost");
            tracing::info!("also lost");
        });
    }

    #[test]
    fn test_plain_error_renders_as_message() {
        let (layer, capture) = capture_layer(Level::Trace);
        let subscriber = tracing_subscriber::registry().with(layer);
        let err = std::io::Error::other("disk full");

        tracing::subscriber::with_default(subscriber, || {
            tracing::error!(error = &err as &(dyn StdError + 'static), "write failed");
        });

        let record = &records(&capture)[0];
        assert_eq!(record["error"], "disk full");
        assert!(record.get("stack").is_none());
    }
}
