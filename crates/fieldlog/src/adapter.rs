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
//! Adapter for components that log through a printf-style `errorf` hook.

use crate::initialization::Logger;
use std::fmt;

/// Routes `errorf` calls to a [`Logger`] as error-level records.
///
/// ```
/// use fieldlog::{build, ErrorfAdapter, SetupOptions};
///
/// let adapter = ErrorfAdapter::new(build(SetupOptions::new().with_output(std::io::sink())));
/// adapter.errorf(format_args!("handshake failed: {}", "timeout"));
/// ```
#[derive(Clone, Debug)]
pub struct ErrorfAdapter {
    logger: Logger,
}

impl ErrorfAdapter {
    /// Wrap a logger
    pub fn new(logger: Logger) -> Self {
        ErrorfAdapter { logger }
    }

    /// The wrapped logger
    pub fn logger(&self) -> &Logger {
        &self.logger
    }

    /// Log a formatted message at error level
    pub fn errorf(&self, args: fmt::Arguments<'_>) {
        self.logger.in_scope(|| tracing::error!("{}", args));
    }
}
