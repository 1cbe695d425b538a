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
#![allow(clippy::unwrap_used)]
//! Integration tests for file-based configuration loading

use fieldlog_config::{Config, ConfigError, ConfigLoader};
use std::io::Write;
use tempfile::NamedTempFile;

fn temp_file_with(suffix: &str, content: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn test_load_toml_file() {
    let file = temp_file_with(
        ".toml",
        r#"
log_level = "warn"
log_format = "color-notime"
service_name = "ingest"
region = "ap-south-1"
"#,
    );

    let config = ConfigLoader::new().load_file(file.path()).unwrap();
    assert_eq!(config.log_level, "warn");
    assert_eq!(config.log_format, "color-notime");
    assert_eq!(config.service_name, "ingest");
    assert_eq!(config.region, "ap-south-1");
    assert!(!config.hide_caller);
}

#[test]
fn test_load_json_file() {
    let file = temp_file_with(".json", r#"{"public_ip": "192.0.2.1", "hide_caller": true}"#);

    let config = ConfigLoader::new().load_file(file.path()).unwrap();
    assert_eq!(config.public_ip, "192.0.2.1");
    assert!(config.hide_caller);
    assert_eq!(config.log_level, Config::default().log_level);
}

#[test]
fn test_missing_file() {
    let err = ConfigLoader::new()
        .load_file("/definitely/not/here/log.toml")
        .unwrap_err();
    assert!(matches!(err, ConfigError::FileNotFound(_)));
}

#[test]
fn test_unsupported_extension() {
    let file = temp_file_with(".ini", "log_level=info");
    let err = ConfigLoader::new().load_file(file.path()).unwrap_err();
    assert!(matches!(err, ConfigError::UnsupportedFormat(_)));
}

#[test]
fn test_malformed_file_is_reported() {
    let file = temp_file_with(".json", "{ not json");
    let err = ConfigLoader::new().load_file(file.path()).unwrap_err();
    assert!(matches!(err, ConfigError::JsonParseError(_)));
}

#[test]
fn test_prefixed_overrides_on_top_of_file() {
    let file = temp_file_with(".toml", "log_level = \"info\"\nservice_name = \"from-file\"\n");
    std::env::set_var("FIELDLOG_IT_SERVICE_NAME", "from-env");

    let config = ConfigLoader::with_prefix("FIELDLOG_IT_")
        .load_with_overrides(file.path())
        .unwrap();

    assert_eq!(config.service_name, "from-env");
    assert_eq!(config.log_level, "info");
}
