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
//! Environment and file loading of the logging configuration.

use crate::error::{ConfigError, ConfigResult};
use crate::schema::Config;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// Environment variable holding the log level
pub const ENV_LOG_LEVEL: &str = "LOG_LEVEL";
/// Environment variable holding the log format
pub const ENV_LOG_FORMAT: &str = "LOG_FORMAT";
/// Environment variable holding the service name
pub const ENV_SERVICE_NAME: &str = "SERVICE_NAME";
/// Environment variable holding the host name
pub const ENV_HOST_NAME: &str = "HOST_NAME";
/// Environment variable holding the region
pub const ENV_REGION: &str = "REGION";
/// Environment variable holding the public IP
pub const ENV_PUBLIC_IP: &str = "PUBLIC_IP";
/// Environment variable toggling caller output
pub const ENV_HIDE_CALLER: &str = "HIDE_CALLER";

/// Configuration file format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// `.toml`
    Toml,
    /// `.yaml` or `.yml`
    Yaml,
    /// `.json`
    Json,
}

impl ConfigFormat {
    /// Detect format from file extension
    pub fn from_path<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let path = path.as_ref();
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Ok(ConfigFormat::Toml),
            Some("yaml") | Some("yml") => Ok(ConfigFormat::Yaml),
            Some("json") => Ok(ConfigFormat::Json),
            Some(ext) => Err(ConfigError::UnsupportedFormat(ext.to_string())),
            None => Err(ConfigError::InvalidPath(path.to_path_buf())),
        }
    }

    /// Get format name as string
    pub fn name(&self) -> &'static str {
        match self {
            ConfigFormat::Toml => "TOML",
            ConfigFormat::Yaml => "YAML",
            ConfigFormat::Json => "JSON",
        }
    }
}

/// Loads [`Config`] records from the environment and from files.
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    prefix: String,
}

impl ConfigLoader {
    /// Create a loader reading unprefixed variables (`LOG_LEVEL`, ...)
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a loader reading variables with a prefix, e.g. `APP_` reads `APP_LOG_LEVEL`
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        ConfigLoader {
            prefix: prefix.into(),
        }
    }

    /// Build a configuration from defaults and the process environment
    pub fn load_env(&self) -> ConfigResult<Config> {
        self.load_lookup(|name| std::env::var(name).ok())
    }

    /// Build a configuration from defaults and an arbitrary variable source
    pub fn load_lookup<F>(&self, lookup: F) -> ConfigResult<Config>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::default();
        self.apply_overrides(&mut config, lookup)?;
        Ok(config)
    }

    /// Load configuration from a file
    pub fn load_file<P: AsRef<Path>>(&self, path: P) -> ConfigResult<Config> {
        let path = path.as_ref();
        debug!("Loading logging configuration from: {}", path.display());

        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.to_path_buf()));
        }

        let format = ConfigFormat::from_path(path)?;
        let content = fs::read_to_string(path)?;

        info!(
            "Loaded {} logging configuration file: {}",
            format.name(),
            path.display()
        );

        self.load_from_string(&content, format)
    }

    /// Load configuration from a string
    pub fn load_from_string(&self, content: &str, format: ConfigFormat) -> ConfigResult<Config> {
        let config = match format {
            ConfigFormat::Toml => toml::from_str(content)?,
            ConfigFormat::Yaml => serde_yaml::from_str(content)?,
            ConfigFormat::Json => serde_json::from_str(content)?,
        };
        Ok(config)
    }

    /// Load a file, then let the process environment override it
    pub fn load_with_overrides<P: AsRef<Path>>(&self, path: P) -> ConfigResult<Config> {
        let mut config = self.load_file(path)?;
        self.apply_overrides(&mut config, |name| std::env::var(name).ok())?;
        Ok(config)
    }

    /// Apply variable overrides from `lookup` onto `config`
    pub fn apply_overrides<F>(&self, config: &mut Config, lookup: F) -> ConfigResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(&format!("{}{}", self.prefix, name));

        if let Some(value) = var(ENV_LOG_LEVEL) {
            config.log_level = value;
        }
        if let Some(value) = var(ENV_LOG_FORMAT) {
            config.log_format = value;
        }
        if let Some(value) = var(ENV_SERVICE_NAME) {
            config.service_name = value;
        }
        if let Some(value) = var(ENV_HOST_NAME) {
            config.host_name = value;
        }
        if let Some(value) = var(ENV_REGION) {
            config.region = value;
        }
        if let Some(value) = var(ENV_PUBLIC_IP) {
            config.public_ip = value;
        }
        if let Some(value) = var(ENV_HIDE_CALLER) {
            config.hide_caller = parse_bool(&value).map_err(|_| {
                ConfigError::env_var_parsing_error(
                    format!("{}{}", self.prefix, ENV_HIDE_CALLER),
                    &value,
                    "expected 'true', 'false', 'yes', 'no', '1', '0', 'on', or 'off'",
                )
            })?;
        }

        Ok(())
    }
}

/// Parse boolean from string (accepts: true, false, yes, no, 1, 0, on, off)
fn parse_bool(value: &str) -> ConfigResult<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "yes" | "1" | "on" => Ok(true),
        "false" | "no" | "0" | "off" => Ok(false),
        _ => Err(ConfigError::env_var_parsing_error(
            "BOOL_VALUE",
            value,
            "expected 'true', 'false', 'yes', 'no', '1', '0', 'on', or 'off'",
        )),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_format_detection() {
        assert_eq!(ConfigFormat::from_path("log.toml").unwrap(), ConfigFormat::Toml);
        assert_eq!(ConfigFormat::from_path("log.yaml").unwrap(), ConfigFormat::Yaml);
        assert_eq!(ConfigFormat::from_path("log.yml").unwrap(), ConfigFormat::Yaml);
        assert_eq!(ConfigFormat::from_path("log.json").unwrap(), ConfigFormat::Json);
    }

    #[test]
    fn test_format_detection_error() {
        assert!(ConfigFormat::from_path("log.xml").is_err());
        assert!(ConfigFormat::from_path("log").is_err());
    }

    #[test]
    fn test_parse_bool() {
        assert!(parse_bool("true").unwrap());
        assert!(parse_bool("YES").unwrap());
        assert!(parse_bool("1").unwrap());
        assert!(parse_bool("on").unwrap());
        assert!(!parse_bool("false").unwrap());
        assert!(!parse_bool("no").unwrap());
        assert!(!parse_bool("0").unwrap());
        assert!(!parse_bool("off").unwrap());
        assert!(parse_bool("maybe").is_err());
    }

    #[test]
    fn test_every_variable_is_read() {
        let config = ConfigLoader::new()
            .load_lookup(lookup_from(&[
                ("LOG_LEVEL", "warn"),
                ("LOG_FORMAT", "json"),
                ("SERVICE_NAME", "billing"),
                ("HOST_NAME", "node-3"),
                ("REGION", "us-east-2"),
                ("PUBLIC_IP", "198.51.100.4"),
                ("HIDE_CALLER", "true"),
            ]))
            .unwrap();

        assert_eq!(config.log_level, "warn");
        assert_eq!(config.log_format, "json");
        assert_eq!(config.service_name, "billing");
        assert_eq!(config.host_name, "node-3");
        assert_eq!(config.region, "us-east-2");
        assert_eq!(config.public_ip, "198.51.100.4");
        assert!(config.hide_caller);
    }

    #[test]
    fn test_empty_environment_gives_defaults() {
        let config = ConfigLoader::new().load_lookup(|_| None).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_prefixed_variables() {
        let config = ConfigLoader::with_prefix("APP_")
            .load_lookup(lookup_from(&[("APP_LOG_LEVEL", "error"), ("LOG_LEVEL", "trace")]))
            .unwrap();
        assert_eq!(config.log_level, "error");
    }

    #[test]
    fn test_unknown_level_string_is_not_an_error() {
        let config = ConfigLoader::new()
            .load_lookup(lookup_from(&[("LOG_LEVEL", "loud"), ("LOG_FORMAT", "fancy")]))
            .unwrap();
        assert_eq!(config.log_level, "loud");
        assert_eq!(config.log_format, "fancy");
    }

    #[test]
    fn test_bad_boolean_names_the_variable() {
        let err = ConfigLoader::new()
            .load_lookup(lookup_from(&[("HIDE_CALLER", "sometimes")]))
            .unwrap_err();
        assert!(err.to_string().contains("HIDE_CALLER=sometimes"));
    }

    #[test]
    fn test_parse_toml() {
        let toml = r#"
        log_level = "info"
        log_format = "plain"
        service_name = "api"
        "#;
        let config = ConfigLoader::new()
            .load_from_string(toml, ConfigFormat::Toml)
            .unwrap();
        assert_eq!(config.log_level, "info");
        assert_eq!(config.log_format, "plain");
        assert_eq!(config.service_name, "api");
    }

    #[test]
    fn test_parse_yaml() {
        let yaml = "log_level: error\nhide_caller: true\n";
        let config = ConfigLoader::new()
            .load_from_string(yaml, ConfigFormat::Yaml)
            .unwrap();
        assert_eq!(config.log_level, "error");
        assert!(config.hide_caller);
    }
}
