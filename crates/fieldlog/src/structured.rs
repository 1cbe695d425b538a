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
//! A structured error type carrying log fields, multiple causes, and an
//! optional captured stack.

use crate::fields::{ErrorLink, Fields, RichError};
use serde_json::Value;
use std::backtrace::Backtrace;
use std::error::Error as StdError;
use std::fmt;

/// Boxed cause stored by [`StructuredError`]
pub type BoxError = Box<dyn StdError + Send + Sync + 'static>;

/// Boxed cause that exposes its own fields
pub type BoxRichError = Box<dyn RichError + Send + Sync + 'static>;

#[derive(Debug)]
enum Cause {
    Plain(BoxError),
    Rich(BoxRichError),
}

impl Cause {
    fn as_error(&self) -> &(dyn StdError + 'static) {
        match self {
            Cause::Plain(e) => &**e,
            Cause::Rich(e) => &**e,
        }
    }

    fn link(&self) -> ErrorLink<'_> {
        match self {
            Cause::Plain(e) => ErrorLink::of(&**e),
            Cause::Rich(e) => ErrorLink::Rich(&**e),
        }
    }
}

/// An error that contributes structured fields to the log record it ends up in.
///
/// ```
/// use fieldlog::StructuredError;
///
/// let err = StructuredError::new("order rejected")
///     .with_field("order_id", 42)
///     .caused_by(std::io::Error::other("upstream timeout"));
/// assert_eq!(err.to_string(), "order rejected");
/// ```
#[derive(Debug, Default)]
pub struct StructuredError {
    message: String,
    fields: Fields,
    causes: Vec<Cause>,
    stack: Option<String>,
}

impl StructuredError {
    /// Create an error with a message and no fields
    pub fn new(message: impl Into<String>) -> Self {
        StructuredError {
            message: message.into(),
            ..Default::default()
        }
    }

    /// Wrap `source` under a new message
    pub fn wrap<E>(source: E, message: impl Into<String>) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        Self::new(message).caused_by(source)
    }

    /// Combine several errors as causes of one.
    ///
    /// The message is the causes' messages joined by newlines.
    pub fn join<I>(errors: I) -> Self
    where
        I: IntoIterator<Item = BoxError>,
    {
        let causes: Vec<Cause> = errors.into_iter().map(Cause::Plain).collect();
        let message = causes
            .iter()
            .map(|e| e.as_error().to_string())
            .collect::<Vec<_>>()
            .join("\n");
        StructuredError {
            message,
            causes,
            ..Default::default()
        }
    }

    /// Add one field
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    /// Add several fields; existing keys are replaced
    pub fn with_fields(mut self, fields: Fields) -> Self {
        self.fields.extend(fields);
        self
    }

    /// Add a cause. Calling this more than once makes a multi-cause error.
    pub fn caused_by<E>(mut self, cause: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        self.causes.push(Cause::Plain(Box::new(cause)));
        self
    }

    /// Add a cause whose own fields and causes are collected.
    ///
    /// Use this for [`RichError`] types other than `StructuredError`; a cause
    /// added with [`caused_by`](Self::caused_by) is only seen as a plain error.
    pub fn caused_by_rich<E>(mut self, cause: E) -> Self
    where
        E: RichError + Send + Sync + 'static,
    {
        self.causes.push(Cause::Rich(Box::new(cause)));
        self
    }

    /// Add an already boxed cause
    pub fn caused_by_boxed(mut self, cause: BoxError) -> Self {
        self.causes.push(Cause::Plain(cause));
        self
    }

    /// Capture the current stack and attach it to this error
    pub fn with_stack(mut self) -> Self {
        self.stack = Some(Backtrace::force_capture().to_string());
        self
    }

    /// Attach a pre-formatted stack
    pub fn with_stack_trace(mut self, stack: impl Into<String>) -> Self {
        self.stack = Some(stack.into());
        self
    }

    /// The error message, without causes
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The fields attached directly to this error
    pub fn own_fields(&self) -> &Fields {
        &self.fields
    }

    /// Direct causes, in the order they were added
    pub fn sources(&self) -> impl Iterator<Item = &(dyn StdError + 'static)> {
        self.causes.iter().map(Cause::as_error)
    }
}

impl fmt::Display for StructuredError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl StdError for StructuredError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.sources().next()
    }
}

impl RichError for StructuredError {
    fn fields(&self) -> Option<&Fields> {
        Some(&self.fields)
    }

    fn causes(&self) -> Vec<ErrorLink<'_>> {
        self.causes.iter().map(Cause::link).collect()
    }

    fn stack(&self) -> Option<String> {
        self.stack.clone()
    }
}
