//! Provider Registry System
//!
//! Compile-time registration of provider classes and the services they
//! implement. Uses the `linkme` crate so that provider crates can add
//! entries without the locator knowing about them.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────────┐
//! │                     Provider Registration Flow                       │
//! ├──────────────────────────────────────────────────────────────────────┤
//! │                                                                      │
//! │  1. Provider defines:   #[linkme::distributed_slice(PROVIDER_CLASSES)]│
//! │                         static CLASS: ProviderClass = ...            │
//! │                               ↓                                      │
//! │  2. Provider declares:  #[linkme::distributed_slice(                 │
//! │                             SERVICE_REGISTRATIONS)]                  │
//! │                         static REG: ServiceRegistration = ...        │
//! │                               ↓                                      │
//! │  3. Loader queries:     StaticClassLoader → slices                   │
//! │                               ↓                                      │
//! │  4. Finder resolves:    service id → class name → instance           │
//! │                                                                      │
//! └──────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! use std::sync::Arc;
//! use jaxrs_ext::registry::{
//!     PROVIDER_CLASSES, SERVICE_REGISTRATIONS, ProviderClass, ServiceRegistration,
//!     provider_instance,
//! };
//!
//! #[linkme::distributed_slice(PROVIDER_CLASSES)]
//! static ACME_DELEGATE: ProviderClass = ProviderClass {
//!     name: "acme::RuntimeDelegateImpl",
//!     description: "Acme runtime delegate",
//!     factory: || Ok(provider_instance(Arc::new(RuntimeDelegateImpl) as Arc<dyn RuntimeDelegate>)),
//! };
//!
//! #[linkme::distributed_slice(SERVICE_REGISTRATIONS)]
//! static ACME_DELEGATE_SERVICE: ServiceRegistration = ServiceRegistration {
//!     service_id: "jakarta.ws.rs.ext.RuntimeDelegate",
//!     class_name: "acme::RuntimeDelegateImpl",
//! };
//! ```

use std::any::Any;

use jaxrs_domain::error::{BoxError, Error, Result};

/// A constructed provider, owned by the caller of the finder
///
/// Factories box the value the service type expects (often an
/// `Arc<dyn Trait>`) and callers downcast it back.
pub type ProviderInstance = Box<dyn Any + Send + Sync>;

/// Zero-argument constructor of a provider class
pub type ProviderFactory = fn() -> std::result::Result<ProviderInstance, BoxError>;

/// Box a provider value for return from a [`ProviderFactory`]
pub fn provider_instance<T: Any + Send + Sync>(value: T) -> ProviderInstance {
    Box::new(value)
}

/// A loadable provider class: a name bound to its constructor
#[derive(Debug, Clone, Copy)]
pub struct ProviderClass {
    /// Fully qualified class name used in properties and registrations
    pub name: &'static str,
    /// Human-readable description
    pub description: &'static str,
    /// Constructor
    pub factory: ProviderFactory,
}

impl ProviderClass {
    /// Invoke the constructor for `service_id`, wrapping any failure as a
    /// class-not-found error
    pub fn instantiate(&self, service_id: &str) -> Result<ProviderInstance> {
        (self.factory)().map_err(|source| Error::not_instantiable(service_id, self.name, source))
    }
}

/// Declaration that a class provides a service
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceRegistration {
    /// Service identifier the class implements
    pub service_id: &'static str,
    /// Name of the implementing provider class
    pub class_name: &'static str,
}

#[linkme::distributed_slice]
pub static PROVIDER_CLASSES: [ProviderClass] = [..];

#[linkme::distributed_slice]
pub static SERVICE_REGISTRATIONS: [ServiceRegistration] = [..];

/// List all compiled-in provider classes
///
/// Returns `(name, description)` tuples. Useful for CLI output.
pub fn list_provider_classes() -> Vec<(&'static str, &'static str)> {
    PROVIDER_CLASSES
        .iter()
        .map(|class| (class.name, class.description))
        .collect()
}

/// List all compiled-in service registrations as `(service_id, class_name)`
pub fn list_service_registrations() -> Vec<(&'static str, &'static str)> {
    SERVICE_REGISTRATIONS
        .iter()
        .map(|reg| (reg.service_id, reg.class_name))
        .collect()
}
