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
//! Logging configuration for fieldlog
//!
//! This crate holds the flat configuration record consumed once at logger
//! setup. Values come from environment variables, from a configuration file
//! (TOML, YAML, JSON), or from both with the environment taking precedence.
//!
//! Level and format values are kept as raw strings here. They are resolved
//! when the logger is built, where unrecognized values degrade to defaults
//! instead of failing.
//!
//! # Example
//!
//! ```no_run
//! use fieldlog_config::ConfigLoader;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ConfigLoader::new().load_env()?;
//!     println!("log level: {}", config.log_level);
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod loader;
pub mod schema;

pub use error::{ConfigError, ConfigResult};
pub use loader::{ConfigFormat, ConfigLoader};
pub use schema::Config;
