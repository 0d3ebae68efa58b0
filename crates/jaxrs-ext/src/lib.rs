//! Provider discovery - jaxrs API
//!
//! Locates the runtime implementation of an API service at startup.
//! Providers register classes and service declarations at compile time
//! (see [`registry`]); callers describe their surroundings with a
//! [`DiscoveryContext`] and ask a [`FactoryFinder`] for an instance.
//!
//! ```ignore
//! use std::sync::Arc;
//! use jaxrs_domain::constants::RUNTIME_DELEGATE_SERVICE;
//! use jaxrs_ext::{DiscoveryContext, FactoryFinder};
//!
//! let finder = FactoryFinder::new(DiscoveryContext::from_process());
//! let delegate: Arc<dyn RuntimeDelegate> = finder.find(RUNTIME_DELEGATE_SERVICE)?;
//! ```

pub mod context;
pub mod finder;
pub mod loader;
pub mod properties;
pub mod registry;

pub use context::{DiscoveryContext, SystemProperties};
pub use finder::{DiscoveryStrategy, FactoryFinder, Located, find};
pub use loader::{ClassLoader, StaticClassLoader, TableClassLoader};
pub use properties::Properties;
pub use registry::{
    PROVIDER_CLASSES, ProviderClass, ProviderFactory, ProviderInstance, SERVICE_REGISTRATIONS,
    ServiceRegistration, list_provider_classes, list_service_registrations, provider_instance,
};
