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
//! The flat logging configuration record.

use serde::{Deserialize, Serialize};

/// Logging settings consumed once at setup.
///
/// Every field has a default, so partial files and sparse environments both
/// produce a usable record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Config {
    /// Minimum severity name (trace, debug, info, warn, error, fatal, panic)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Output format (plain, plain-notime, color, color-notime, json, custom)
    #[serde(default = "default_log_format")]
    pub log_format: String,

    /// Service name attached to every record as `service`
    #[serde(default)]
    pub service_name: String,

    /// Host name attached to every record as `host`
    #[serde(default)]
    pub host_name: String,

    /// Data center region attached to every record as `region`
    #[serde(default)]
    pub region: String,

    /// Public IP attached to every record as `publicIP`
    #[serde(default)]
    pub public_ip: String,

    /// Omit the `caller` field from records
    #[serde(default)]
    pub hide_caller: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            log_level: default_log_level(),
            log_format: default_log_format(),
            service_name: String::new(),
            host_name: String::new(),
            region: String::new(),
            public_ip: String::new(),
            hide_caller: false,
        }
    }
}

impl Config {
    /// Set the log level string
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    /// Set the log format string
    pub fn with_log_format(mut self, format: impl Into<String>) -> Self {
        self.log_format = format.into();
        self
    }

    /// Set the service name
    pub fn with_service_name(mut self, name: impl Into<String>) -> Self {
        self.service_name = name.into();
        self
    }

    /// Set the host name
    pub fn with_host_name(mut self, name: impl Into<String>) -> Self {
        self.host_name = name.into();
        self
    }

    /// Set the region
    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = region.into();
        self
    }

    /// Set the public IP
    pub fn with_public_ip(mut self, ip: impl Into<String>) -> Self {
        self.public_ip = ip.into();
        self
    }

    /// Hide or show the caller location
    pub fn with_hide_caller(mut self, hide: bool) -> Self {
        self.hide_caller = hide;
        self
    }
}

fn default_log_level() -> String {
    "debug".to_string()
}

fn default_log_format() -> String {
    "color".to_string()
}
