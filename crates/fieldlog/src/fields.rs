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
//! Error field collection.
//!
//! An error chain is walked breadth-first from the root. Every node that
//! exposes structured fields contributes them to one flat map, which ends up
//! under the `fields` key of the rendered error. Errors without any
//! structured information keep their plain message rendering.
//!
//! Merge precedence is first write wins: when a key appears on several
//! nodes, the value from the node visited first (the shallowest one, and
//! among siblings the earlier cause) is kept.

use crate::structured::StructuredError;
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::VecDeque;
use std::error::Error as StdError;
use std::fmt;

/// Flat field mapping attached to log records
pub type Fields = Map<String, Value>;

/// Key under which collected fields are attached to a rendered error
pub const FIELDS_KEY: &str = "fields";

/// Upper bound on visited chain nodes
pub const MAX_CHAIN_NODES: usize = 256;

/// Capability contract for errors that carry structured log data.
///
/// Only `StructuredError` is recognized behind a bare `&dyn Error`. Other
/// implementors enter a chain through [`ErrorLink::Rich`], or as a cause
/// added with [`StructuredError::caused_by_rich`]; otherwise they are
/// treated as plain errors.
pub trait RichError: StdError {
    /// Fields this error contributes, if any
    fn fields(&self) -> Option<&Fields>;

    /// Direct causes; zero, one, or many
    fn causes(&self) -> Vec<ErrorLink<'_>>;

    /// Whether this error asks for rich rendering.
    ///
    /// Defaults to having at least one field.
    fn has_err_info(&self) -> bool {
        self.fields().is_some_and(|f| !f.is_empty())
    }

    /// A formatted stack trace, if one was captured
    fn stack(&self) -> Option<String> {
        None
    }
}

/// One node of an error chain.
#[derive(Clone, Copy)]
pub enum ErrorLink<'a> {
    /// An error implementing [`RichError`]
    Rich(&'a dyn RichError),
    /// Any other error; its `source()` is its only cause
    Plain(&'a (dyn StdError + 'static)),
}

impl<'a> ErrorLink<'a> {
    /// Classify an arbitrary error
    pub fn of(err: &'a (dyn StdError + 'static)) -> Self {
        match err.downcast_ref::<StructuredError>() {
            Some(structured) => ErrorLink::Rich(structured),
            None => ErrorLink::Plain(err),
        }
    }

    /// The node's own message
    pub fn message(&self) -> String {
        match self {
            ErrorLink::Rich(e) => e.to_string(),
            ErrorLink::Plain(e) => e.to_string(),
        }
    }

    fn fields(&self) -> Option<&'a Fields> {
        match *self {
            ErrorLink::Rich(e) => e.fields(),
            ErrorLink::Plain(_) => None,
        }
    }

    fn has_err_info(&self) -> bool {
        match *self {
            ErrorLink::Rich(e) => e.has_err_info(),
            ErrorLink::Plain(_) => false,
        }
    }

    fn stack(&self) -> Option<String> {
        match *self {
            ErrorLink::Rich(e) => e.stack(),
            ErrorLink::Plain(_) => None,
        }
    }

    fn causes(&self) -> Vec<ErrorLink<'a>> {
        match *self {
            ErrorLink::Rich(e) => e.causes(),
            ErrorLink::Plain(e) => e.source().map(ErrorLink::of).into_iter().collect(),
        }
    }
}

impl fmt::Debug for ErrorLink<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorLink::Rich(e) => f.debug_tuple("Rich").field(e).finish(),
            ErrorLink::Plain(e) => f.debug_tuple("Plain").field(e).finish(),
        }
    }
}

impl<'a> From<&'a (dyn StdError + 'static)> for ErrorLink<'a> {
    fn from(err: &'a (dyn StdError + 'static)) -> Self {
        ErrorLink::of(err)
    }
}

impl<'a> From<&'a StructuredError> for ErrorLink<'a> {
    fn from(err: &'a StructuredError) -> Self {
        ErrorLink::Rich(err)
    }
}

/// Breadth-first list of chain nodes starting at `root`, capped at [`MAX_CHAIN_NODES`]
pub fn chain(root: ErrorLink<'_>) -> Vec<ErrorLink<'_>> {
    let mut visited = Vec::new();
    let mut queue = VecDeque::from([root]);

    while let Some(node) = queue.pop_front() {
        if visited.len() == MAX_CHAIN_NODES {
            tracing::debug!(limit = MAX_CHAIN_NODES, "error chain truncated");
            break;
        }
        queue.extend(node.causes());
        visited.push(node);
    }

    visited
}

/// Collect the structured fields of an error chain.
///
/// Returns `None` when no node asks for rich rendering or the merged map is
/// empty.
pub fn collect_fields<'a>(err: impl Into<ErrorLink<'a>>) -> Option<Fields> {
    let nodes = chain(err.into());
    if !nodes.iter().any(ErrorLink::has_err_info) {
        return None;
    }

    let mut merged = Fields::new();
    for fields in nodes.iter().filter_map(ErrorLink::fields) {
        for (key, value) in fields {
            merged.entry(key.clone()).or_insert_with(|| value.clone());
        }
    }

    if merged.is_empty() {
        None
    } else {
        Some(merged)
    }
}

/// First non-empty stack found in the chain, breadth-first
pub fn error_stack<'a>(err: impl Into<ErrorLink<'a>>) -> Option<String> {
    chain(err.into())
        .iter()
        .filter_map(ErrorLink::stack)
        .find(|s| !s.trim().is_empty())
}

/// The error portion of a log record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorRecord {
    /// The root error's message
    #[serde(rename = "msg")]
    pub message: String,

    /// Collected chain fields; absent for plain errors
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<Fields>,

    /// Formatted stack; absent when none was captured
    #[serde(skip)]
    pub stack: Option<String>,
}

impl ErrorRecord {
    /// Build the record for `err`
    pub fn from_error<'a>(err: impl Into<ErrorLink<'a>>) -> Self {
        let link = err.into();
        ErrorRecord {
            message: link.message(),
            fields: collect_fields(link),
            stack: error_stack(link),
        }
    }

    /// Whether the error needs the object rendering rather than a plain string
    pub fn is_rich(&self) -> bool {
        self.fields.is_some()
    }

    /// JSON value for the record's `error` key
    pub fn to_value(&self) -> Value {
        if !self.is_rich() {
            return Value::String(self.message.clone());
        }
        let mut object = Map::new();
        object.insert("msg".to_string(), Value::String(self.message.clone()));
        if let Some(fields) = &self.fields {
            object.insert(FIELDS_KEY.to_string(), Value::Object(fields.clone()));
        }
        Value::Object(object)
    }
}

/// Render an error for the `error` key of a record.
///
/// Plain errors render as their message string. Errors whose chain carries
/// fields render as `{"msg": ..., "fields": {...}}`.
pub fn marshal_error<'a>(err: impl Into<ErrorLink<'a>>) -> Value {
    let link = err.into();
    ErrorRecord {
        message: link.message(),
        fields: collect_fields(link),
        stack: None,
    }
    .to_value()
}
