//! Finder bootstrap
//!
//! Turns [`DiscoveryConfig`] into a [`DiscoveryContext`] and a ready
//! [`FactoryFinder`]. Callers with a plugin scope or module loader add it
//! to the returned context before building the finder themselves.

use jaxrs_ext::{DiscoveryContext, FactoryFinder, SystemProperties};
use tracing::debug;

use crate::config::{AppConfig, DiscoveryConfig};

/// Build the discovery context described by configuration
///
/// Without a configured runtime home the one derived from the running
/// executable is used. A configured properties file replaces the one under
/// the runtime home.
pub fn discovery_context(config: &DiscoveryConfig) -> DiscoveryContext {
    let process = DiscoveryContext::from_process();

    let mut properties = if config.include_process_env {
        process.system_properties().clone()
    } else {
        SystemProperties::new()
    };
    properties.extend(config.system_properties.clone());

    let runtime_home = config
        .runtime_home
        .clone()
        .or_else(|| process.runtime_home().map(|p| p.to_path_buf()));

    debug!(
        runtime_home = ?runtime_home,
        properties_file = ?config.properties_file,
        system_properties = properties.len(),
        "Discovery context configured"
    );

    let mut ctx = DiscoveryContext::new().with_system_properties(properties);
    if let Some(home) = runtime_home {
        ctx = ctx.with_runtime_home(home);
    }
    if let Some(file) = &config.properties_file {
        ctx = ctx.with_properties_file(file);
    }
    ctx
}

/// Build a finder from application configuration
pub fn finder_from_config(config: &AppConfig) -> FactoryFinder {
    FactoryFinder::new(discovery_context(&config.discovery))
}
