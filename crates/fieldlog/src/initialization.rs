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
//! Logger construction and the process-wide default logger.
//!
//! [`build`] creates a [`Logger`] without touching global state. [`setup`]
//! also installs it as the process default: the first call installs a
//! reloadable global subscriber, later calls replace its layer wholesale.
//! Setup is expected to run once at process start, before concurrent
//! logging begins.

use crate::error::{LogError, LogResult};
use crate::format::Format;
use crate::layer::JsonLayer;
use crate::level::Level;
use crate::options::SetupOptions;
use std::io;
use std::sync::Mutex;
use tracing::dispatcher::{self, DefaultGuard, Dispatch};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{reload, Registry};

type ReloadHandle = reload::Handle<Option<JsonLayer>, Registry>;

struct GlobalState {
    handle: ReloadHandle,
    logger: Logger,
}

static GLOBAL: Mutex<Option<GlobalState>> = Mutex::new(None);

/// A configured logger.
///
/// Cloning is cheap; clones share the same output.
#[derive(Clone, Debug)]
pub struct Logger {
    dispatch: Dispatch,
    layer: JsonLayer,
    format: Format,
}

impl Logger {
    /// Run `f` with this logger as the current thread's default
    pub fn in_scope<T>(&self, f: impl FnOnce() -> T) -> T {
        dispatcher::with_default(&self.dispatch, f)
    }

    /// Make this logger the current thread's default until the guard drops
    pub fn set_thread_default(&self) -> DefaultGuard {
        dispatcher::set_default(&self.dispatch)
    }

    /// The underlying dispatcher
    pub fn dispatch(&self) -> &Dispatch {
        &self.dispatch
    }

    /// Minimum record level
    pub fn level(&self) -> Level {
        self.layer.min_level()
    }

    /// Output format of the main destination
    pub fn format(&self) -> Format {
        self.format
    }

    /// Flush all destinations
    pub fn flush(&self) -> io::Result<()> {
        self.layer.sink().flush()
    }
}

/// Build a logger from `options` without installing it anywhere
pub fn build(options: SetupOptions) -> Logger {
    let format = options.format();
    let layer = options.into_layer();
    let dispatch = Dispatch::new(Registry::default().with(layer.clone()));
    Logger {
        dispatch,
        layer,
        format,
    }
}

/// Build a logger and install it as the process-wide default.
///
/// Fails only if a subscriber that fieldlog did not install is already the
/// global default.
pub fn setup(options: SetupOptions) -> LogResult<Logger> {
    let logger = build(options);

    let mut global = GLOBAL.lock().map_err(|_| LogError::Poisoned)?;
    match global.as_mut() {
        Some(state) => {
            state
                .handle
                .reload(Some(logger.layer.clone()))
                .map_err(|e| LogError::Reload(e.to_string()))?;
            state.logger = logger.clone();
        }
        None => {
            let (layer, handle) = reload::Layer::new(Some(logger.layer.clone()));
            Registry::default()
                .with(layer)
                .try_init()
                .map_err(|e| LogError::GlobalInstall(e.to_string()))?;
            *global = Some(GlobalState {
                handle,
                logger: logger.clone(),
            });
        }
    }
    drop(global);

    tracing::debug!(
        level = %logger.level(),
        format = %logger.format(),
        "logger installed"
    );
    Ok(logger)
}

/// The logger installed by the most recent [`setup`], if any
pub fn global() -> Option<Logger> {
    GLOBAL
        .lock()
        .ok()
        .and_then(|global| global.as_ref().map(|state| state.logger.clone()))
}
