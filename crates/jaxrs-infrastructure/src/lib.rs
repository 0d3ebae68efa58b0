//! Infrastructure Layer - jaxrs API
//!
//! Cross-cutting concerns around provider discovery:
//!
//! - [`config`]: Figment-based layered configuration
//! - [`logging`]: tracing subscriber setup
//! - [`bootstrap`]: building a `FactoryFinder` from configuration
//! - [`error_ext`]: context helpers mapping foreign errors into the domain error

pub mod bootstrap;
pub mod config;
pub mod constants;
pub mod error_ext;
pub mod logging;

pub use bootstrap::{discovery_context, finder_from_config};
pub use config::{AppConfig, ConfigLoader, DiscoveryConfig, LoggingConfig};
