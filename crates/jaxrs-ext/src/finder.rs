//! Factory finder
//!
//! Resolves a service identifier to one freshly constructed provider. The
//! discovery strategies are tried in a fixed order and the first that
//! produces a provider wins:
//!
//! | # | Strategy | Source |
//! |---|----------|--------|
//! | 1 | [`DiscoveryStrategy::ContextRegistry`] | registrations visible to the caller's context loader |
//! | 2 | [`DiscoveryStrategy::LocatorRegistry`] | registrations compiled into the locator's own loader |
//! | 3 | [`DiscoveryStrategy::PropertiesFile`] | configured properties file, else `<runtime-home>/lib/jaxrs.properties` |
//! | 4 | [`DiscoveryStrategy::SystemProperty`] | system property named like the service |
//! | 5 | [`DiscoveryStrategy::ModuleServices`] | `META-INF/services/<service-id>` of the module loader |
//! | 6 | [`DiscoveryStrategy::Fallback`] | class name supplied by the caller |
//!
//! Problems inside a strategy (no runtime home, unreadable or malformed
//! file, broken registration) are logged and the next strategy runs. A
//! context that points at a runtime home or properties file that does not
//! exist is logged at `warn`. A class name obtained from strategies 3, 4 or
//! 6 that cannot be loaded or constructed is terminal.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use jaxrs_domain::constants::{
    PROVIDER_PROPERTIES_FILENAME, RUNTIME_LIB_DIR, SERVICES_RESOURCE_PREFIX,
};
use jaxrs_domain::error::{Error, Result};
use tracing::{debug, trace, warn};

use crate::context::DiscoveryContext;
use crate::loader::{ClassLoader, StaticClassLoader};
use crate::properties::Properties;
use crate::registry::ProviderInstance;

/// Which discovery step produced a provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiscoveryStrategy {
    ContextRegistry,
    LocatorRegistry,
    PropertiesFile,
    SystemProperty,
    ModuleServices,
    Fallback,
}

impl DiscoveryStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ContextRegistry => "context-registry",
            Self::LocatorRegistry => "locator-registry",
            Self::PropertiesFile => "properties-file",
            Self::SystemProperty => "system-property",
            Self::ModuleServices => "module-services",
            Self::Fallback => "fallback",
        }
    }
}

impl fmt::Display for DiscoveryStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A provider together with where it came from
pub struct Located {
    /// The constructed provider
    pub instance: ProviderInstance,
    /// Name of the class that was instantiated
    pub class_name: String,
    /// Strategy that resolved the class
    pub strategy: DiscoveryStrategy,
}

impl fmt::Debug for Located {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Located")
            .field("class_name", &self.class_name)
            .field("strategy", &self.strategy)
            .finish_non_exhaustive()
    }
}

type Conforms<'a> = &'a dyn Fn(&ProviderInstance) -> bool;

/// Locates provider implementations for service identifiers
///
/// Holds no state between calls; every lookup constructs a new instance.
#[derive(Debug, Clone)]
pub struct FactoryFinder {
    context: DiscoveryContext,
    own_loader: Arc<dyn ClassLoader>,
}

impl FactoryFinder {
    /// Create a finder whose own loader is the compile-time registry
    pub fn new(context: DiscoveryContext) -> Self {
        Self {
            context,
            own_loader: Arc::new(StaticClassLoader),
        }
    }

    /// Replace the locator's own loader
    pub fn with_own_loader(mut self, loader: Arc<dyn ClassLoader>) -> Self {
        self.own_loader = loader;
        self
    }

    pub fn context(&self) -> &DiscoveryContext {
        &self.context
    }

    /// Find and construct the provider of `service_id` as an `S`
    ///
    /// Registry entries whose instance is not an `S` are skipped. Fails with
    /// [`Error::ProviderNotFound`] when nothing resolves.
    pub fn find<S: Any + Send + Sync>(&self, service_id: &str) -> Result<S> {
        self.find_typed(service_id, None)
    }

    /// Like [`find`](Self::find), instantiating `fallback_class` when every
    /// strategy comes up empty
    pub fn find_or<S: Any + Send + Sync>(
        &self,
        service_id: &str,
        fallback_class: &str,
    ) -> Result<S> {
        self.find_typed(service_id, Some(fallback_class))
    }

    /// Untyped lookup reporting the resolved class and strategy
    pub fn locate(&self, service_id: &str, fallback_class: Option<&str>) -> Result<Located> {
        self.locate_conforming(service_id, fallback_class, &|_: &ProviderInstance| true)
    }

    fn find_typed<S: Any + Send + Sync>(
        &self,
        service_id: &str,
        fallback: Option<&str>,
    ) -> Result<S> {
        let located = self.locate_conforming(service_id, fallback, &|instance: &ProviderInstance| {
            instance.is::<S>()
        })?;
        let class_name = located.class_name;
        located
            .instance
            .downcast::<S>()
            .map(|boxed| *boxed)
            .map_err(|_| Error::service_type_mismatch(class_name, service_id))
    }

    fn locate_conforming(
        &self,
        service_id: &str,
        fallback: Option<&str>,
        conforms: Conforms<'_>,
    ) -> Result<Located> {
        if let Some(loader) = self.context.context_loader() {
            if let Some(located) = self.from_registry(
                loader.as_ref(),
                service_id,
                conforms,
                DiscoveryStrategy::ContextRegistry,
            ) {
                return Ok(located);
            }
        }

        if let Some(located) = self.from_registry(
            self.own_loader.as_ref(),
            service_id,
            conforms,
            DiscoveryStrategy::LocatorRegistry,
        ) {
            return Ok(located);
        }

        let preferred: Option<&dyn ClassLoader> =
            self.context.context_loader().map(|l| l.as_ref());

        if let Some(class_name) = self.class_name_from_properties(service_id) {
            return self.instantiate(
                &class_name,
                preferred,
                service_id,
                conforms,
                DiscoveryStrategy::PropertiesFile,
            );
        }

        if let Some(class_name) = self.context.system_properties().get(service_id) {
            return self.instantiate(
                class_name,
                preferred,
                service_id,
                conforms,
                DiscoveryStrategy::SystemProperty,
            );
        }

        if let Some(located) = self.from_module_services(service_id, conforms) {
            return Ok(located);
        }

        match fallback {
            Some(class_name) => self.instantiate(
                class_name,
                preferred,
                service_id,
                conforms,
                DiscoveryStrategy::Fallback,
            ),
            None => Err(Error::provider_not_found(service_id)),
        }
    }

    /// First registered class of `loader` that constructs and conforms
    fn from_registry(
        &self,
        loader: &dyn ClassLoader,
        service_id: &str,
        conforms: Conforms<'_>,
        strategy: DiscoveryStrategy,
    ) -> Option<Located> {
        let class_names = match loader.service_classes(service_id) {
            Ok(names) => names,
            Err(e) => {
                trace!(service_id, loader = loader.name(), error = %e, "Failed to load service");
                return None;
            }
        };

        for class_name in class_names {
            let instance = loader
                .load_class(&class_name)
                .ok_or_else(|| Error::class_not_found(service_id, &class_name))
                .and_then(|class| class.instantiate(service_id));
            match instance {
                Ok(instance) if conforms(&instance) => {
                    debug!(service_id, class_name = %class_name, %strategy, "Provider resolved");
                    return Some(Located {
                        instance,
                        class_name,
                        strategy,
                    });
                }
                Ok(_) => {
                    trace!(
                        service_id,
                        class_name = %class_name,
                        loader = loader.name(),
                        "Registered provider is not a subtype of the service"
                    );
                }
                Err(e) => {
                    trace!(
                        service_id,
                        class_name = %class_name,
                        loader = loader.name(),
                        error = %e,
                        "Failed to load service"
                    );
                }
            }
        }
        None
    }

    fn class_name_from_properties(&self, service_id: &str) -> Option<String> {
        let path = if let Some(file) = self.context.properties_file() {
            if !file.is_file() {
                warn!(service_id, path = %file.display(), "Configured properties file not found");
                return None;
            }
            file.to_path_buf()
        } else {
            let Some(home) = self.context.runtime_home() else {
                trace!(service_id, "No runtime home, skipping properties file");
                return None;
            };
            if !home.is_dir() {
                warn!(service_id, runtime_home = %home.display(), "Runtime home is not a directory");
                return None;
            }
            let path = home.join(RUNTIME_LIB_DIR).join(PROVIDER_PROPERTIES_FILENAME);
            if !path.is_file() {
                trace!(service_id, path = %path.display(), "Properties file not present");
                return None;
            }
            path
        };

        match Properties::load(&path) {
            Ok(props) => {
                let class_name = props.get(service_id).map(str::to_owned);
                if class_name.is_none() {
                    trace!(service_id, path = %path.display(), "No entry in properties file");
                }
                class_name
            }
            Err(e) => {
                trace!(
                    service_id,
                    path = %path.display(),
                    error = %e,
                    "Failed to load service from properties file"
                );
                None
            }
        }
    }

    fn from_module_services(&self, service_id: &str, conforms: Conforms<'_>) -> Option<Located> {
        let loader = self.context.module_loader()?;
        let resource = format!("{SERVICES_RESOURCE_PREFIX}{service_id}");

        let contents = match loader.resource(&resource) {
            Ok(Some(contents)) => contents,
            Ok(None) => return None,
            Err(e) => {
                trace!(service_id, resource = %resource, error = %e, "Failed to read module service declaration");
                return None;
            }
        };
        let class_name = contents.lines().next().map(str::trim).filter(|l| !l.is_empty())?;

        match self.instantiate(
            class_name,
            Some(loader.as_ref()),
            service_id,
            conforms,
            DiscoveryStrategy::ModuleServices,
        ) {
            Ok(located) => Some(located),
            Err(e) => {
                trace!(service_id, class_name, error = %e, "Module service declaration unusable");
                None
            }
        }
    }

    fn instantiate(
        &self,
        class_name: &str,
        preferred: Option<&dyn ClassLoader>,
        service_id: &str,
        conforms: Conforms<'_>,
        strategy: DiscoveryStrategy,
    ) -> Result<Located> {
        let instance = self.new_instance(service_id, class_name, preferred)?;
        if !conforms(&instance) {
            return Err(Error::service_type_mismatch(class_name, service_id));
        }
        debug!(service_id, class_name, %strategy, "Provider resolved");
        Ok(Located {
            instance,
            class_name: class_name.to_string(),
            strategy,
        })
    }

    /// Load `class_name` from the preferred loader, falling back to the
    /// locator's own, and construct it
    fn new_instance(
        &self,
        service_id: &str,
        class_name: &str,
        preferred: Option<&dyn ClassLoader>,
    ) -> Result<ProviderInstance> {
        let class = match preferred {
            Some(loader) => loader.load_class(class_name).or_else(|| {
                debug!(
                    class_name,
                    loader = loader.name(),
                    "Unable to load provider class using custom loader, trying again with locator loader"
                );
                self.own_loader.load_class(class_name)
            }),
            None => self.own_loader.load_class(class_name),
        };
        class
            .ok_or_else(|| Error::class_not_found(service_id, class_name))?
            .instantiate(service_id)
    }
}

impl Default for FactoryFinder {
    fn default() -> Self {
        Self::new(DiscoveryContext::default())
    }
}

/// Find a provider using a one-off finder over `context`
pub fn find<S: Any + Send + Sync>(service_id: &str, context: DiscoveryContext) -> Result<S> {
    FactoryFinder::new(context).find(service_id)
}
