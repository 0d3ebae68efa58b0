//! Class loaders
//!
//! A class loader is a scope in which provider class names resolve to
//! constructors. The finder consults up to three of them: the caller's
//! context loader, its own [`StaticClassLoader`] and an optional module
//! loader exposing service declaration resources.

use std::collections::HashMap;
use std::fmt;

use jaxrs_domain::error::Result;

use crate::registry::{PROVIDER_CLASSES, ProviderClass, SERVICE_REGISTRATIONS};

/// A scope resolving provider class names and service registrations
pub trait ClassLoader: fmt::Debug + Send + Sync {
    /// Name used in diagnostics
    fn name(&self) -> &str;

    /// Resolve a class by name
    fn load_class(&self, class_name: &str) -> Option<ProviderClass>;

    /// Class names registered for a service, in registration order
    fn service_classes(&self, service_id: &str) -> Result<Vec<String>>;

    /// Text resource visible to this loader
    fn resource(&self, _path: &str) -> Result<Option<String>> {
        Ok(None)
    }
}

/// The locator's own loader, backed by the compile-time registry slices
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticClassLoader;

impl ClassLoader for StaticClassLoader {
    fn name(&self) -> &str {
        "static"
    }

    fn load_class(&self, class_name: &str) -> Option<ProviderClass> {
        PROVIDER_CLASSES
            .iter()
            .find(|class| class.name == class_name)
            .copied()
    }

    fn service_classes(&self, service_id: &str) -> Result<Vec<String>> {
        Ok(SERVICE_REGISTRATIONS
            .iter()
            .filter(|reg| reg.service_id == service_id)
            .map(|reg| reg.class_name.to_string())
            .collect())
    }
}

/// A loader over an explicit table built at runtime
///
/// Stands in for a caller's plugin scope or a module loader.
///
/// ```ignore
/// let loader = TableClassLoader::new("plugins")
///     .with_class(ACME_DELEGATE)
///     .with_service("jakarta.ws.rs.ext.RuntimeDelegate", "acme::RuntimeDelegateImpl")
///     .with_resource("META-INF/services/jakarta.ws.rs.ext.RuntimeDelegate", "acme::RuntimeDelegateImpl\n");
/// ```
#[derive(Debug, Clone, Default)]
pub struct TableClassLoader {
    name: String,
    classes: HashMap<String, ProviderClass>,
    services: Vec<(String, String)>,
    resources: HashMap<String, String>,
}

impl TableClassLoader {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Make a class loadable through this loader
    pub fn with_class(mut self, class: ProviderClass) -> Self {
        self.classes.insert(class.name.to_string(), class);
        self
    }

    /// Register a class as a provider of a service
    pub fn with_service(mut self, service_id: impl Into<String>, class_name: impl Into<String>) -> Self {
        self.services.push((service_id.into(), class_name.into()));
        self
    }

    /// Expose a text resource
    pub fn with_resource(mut self, path: impl Into<String>, contents: impl Into<String>) -> Self {
        self.resources.insert(path.into(), contents.into());
        self
    }
}

impl ClassLoader for TableClassLoader {
    fn name(&self) -> &str {
        &self.name
    }

    fn load_class(&self, class_name: &str) -> Option<ProviderClass> {
        self.classes.get(class_name).copied()
    }

    fn service_classes(&self, service_id: &str) -> Result<Vec<String>> {
        Ok(self
            .services
            .iter()
            .filter(|(id, _)| id == service_id)
            .map(|(_, class_name)| class_name.clone())
            .collect())
    }

    fn resource(&self, path: &str) -> Result<Option<String>> {
        Ok(self.resources.get(path).cloned())
    }
}
