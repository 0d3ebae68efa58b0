//! Infrastructure layer constants
//!
//! Domain constants (service identifiers, discovery locations) live in
//! `jaxrs_domain::constants`.

// ============================================================================
// CONFIGURATION CONSTANTS
// ============================================================================

/// Default configuration file name
pub const DEFAULT_CONFIG_FILENAME: &str = "jaxrs.toml";

/// Default configuration directory name
pub const DEFAULT_CONFIG_DIR: &str = "jaxrs";

/// Environment variable prefix for configuration (`JAXRS__LOGGING__LEVEL`)
pub const CONFIG_ENV_PREFIX: &str = "JAXRS";

/// Separator between prefix and nested configuration keys
pub const CONFIG_ENV_SEPARATOR: &str = "__";

// ============================================================================
// LOGGING CONSTANTS
// ============================================================================

/// Default log level
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Environment variable holding a tracing filter directive
pub const LOG_FILTER_ENV: &str = "JAXRS_LOG";

/// File stem used for rolling log files when none is given
pub const DEFAULT_LOG_FILE_STEM: &str = "jaxrs";
