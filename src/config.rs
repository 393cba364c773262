use crate::error::{AppError, AppResult};
use serde::Deserialize;
use std::fmt;
use std::fs;
use std::path::Path;
use tracing::warn;

pub const DEFAULT_PORT: u16 = 9090;
pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0";
pub const DEFAULT_PATH: &str = "/heartbeat";

/// Primary configuration file, relative to the home directory.
const PRIMARY_CONFIG_FILE: &str = "conf/config.xml";
/// Legacy configuration file at the home directory root, kept as a fallback.
const LEGACY_CONFIG_FILE: &str = "extension-config.xml";

/// Heartbeat listener configuration, read once at startup and immutable
/// thereafter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeartbeatConfig {
    pub port: u16,
    pub bind_address: String,
    pub path: String,
}

impl Default for HeartbeatConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            bind_address: DEFAULT_BIND_ADDRESS.to_string(),
            path: DEFAULT_PATH.to_string(),
        }
    }
}

impl fmt::Display for HeartbeatConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "port={} bind-address={} path={}",
            self.port, self.bind_address, self.path
        )
    }
}

/// Raw XML shape: all three elements are optional, unknown elements are
/// ignored. The port is kept wide here so that out-of-range values can be
/// detected instead of failing the whole parse.
#[derive(Debug, Deserialize)]
struct RawHeartbeatConfig {
    port: Option<i64>,
    #[serde(rename = "bind-address")]
    bind_address: Option<String>,
    path: Option<String>,
}

impl HeartbeatConfig {
    /// Load the configuration from a home directory.
    ///
    /// Looks for `conf/config.xml` first and falls back to the legacy
    /// `extension-config.xml` at the home directory root. Any read or parse
    /// failure is non-fatal: a warning is logged and defaults are used.
    pub fn load(home_dir: &Path) -> Self {
        let primary = home_dir.join(PRIMARY_CONFIG_FILE);
        let config_file = if primary.is_file() {
            primary
        } else {
            home_dir.join(LEGACY_CONFIG_FILE)
        };
        Self::read(&config_file)
    }

    fn read(config_file: &Path) -> Self {
        let defaults = Self::default();

        let contents = match fs::read_to_string(config_file) {
            Ok(contents) => contents,
            Err(e) => {
                warn!(
                    "Unable to read heartbeat configuration file {}: {}. Using defaults ({}).",
                    config_file.display(),
                    e,
                    defaults
                );
                return defaults;
            }
        };

        if contents.trim().is_empty() {
            warn!(
                "Heartbeat configuration file {} is empty. Using defaults ({}).",
                config_file.display(),
                defaults
            );
            return defaults;
        }

        match parse_config_xml(&contents) {
            Ok(raw) => Self::from_raw(raw),
            Err(e) => {
                warn!(
                    "Could not parse heartbeat configuration file {}: {}. Using defaults ({}).",
                    config_file.display(),
                    e,
                    defaults
                );
                defaults
            }
        }
    }

    /// Merge parsed values with the defaults. An out-of-range port only
    /// resets the port; other parsed fields are kept as-is.
    fn from_raw(raw: RawHeartbeatConfig) -> Self {
        let defaults = Self::default();

        let port = match raw.port {
            Some(port) if (1..=i64::from(u16::MAX)).contains(&port) => port as u16,
            Some(port) => {
                warn!(
                    "Port must be between 1 and {}, got {}. Using default port {}.",
                    u16::MAX,
                    port,
                    DEFAULT_PORT
                );
                DEFAULT_PORT
            }
            None => defaults.port,
        };

        Self {
            port,
            bind_address: raw.bind_address.unwrap_or(defaults.bind_address),
            path: raw.path.unwrap_or(defaults.path),
        }
    }
}

fn parse_config_xml(contents: &str) -> AppResult<RawHeartbeatConfig> {
    quick_xml::de::from_str(contents).map_err(|e| AppError::Configuration(e.to_string()))
}
