//! Configuration types

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_LOG_LEVEL;

/// Root configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Logging settings
    pub logging: LoggingConfig,
    /// Provider discovery settings
    pub discovery: DiscoveryConfig,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Enable JSON output format
    pub json_format: bool,

    /// Log to a daily rolling file in addition to stderr
    pub file_output: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: DEFAULT_LOG_LEVEL.to_string(),
            json_format: false,
            file_output: None,
        }
    }
}

/// Provider discovery configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiscoveryConfig {
    /// Directory holding `lib/jaxrs.properties`; derived from the executable when unset
    pub runtime_home: Option<PathBuf>,

    /// Properties file read instead of `<runtime_home>/lib/jaxrs.properties`
    pub properties_file: Option<PathBuf>,

    /// Expose the process environment as system properties
    pub include_process_env: bool,

    /// System properties applied on top of the environment
    pub system_properties: BTreeMap<String, String>,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            runtime_home: None,
            properties_file: None,
            include_process_env: true,
            system_properties: BTreeMap::new(),
        }
    }
}
