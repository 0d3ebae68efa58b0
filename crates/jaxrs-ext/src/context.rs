//! Discovery context
//!
//! Everything the finder reads from its surroundings, passed explicitly:
//! the caller's loader, the runtime home directory (or an explicit
//! properties file), system properties and the module loader.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::loader::ClassLoader;

/// Process-wide string properties, looked up by exact name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SystemProperties {
    values: BTreeMap<String, String>,
}

impl SystemProperties {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the process environment
    ///
    /// Variables whose name or value is not valid Unicode are skipped.
    pub fn from_env() -> Self {
        Self {
            values: std::env::vars_os()
                .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)))
                .collect(),
        }
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(name, value);
        self
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl Extend<(String, String)> for SystemProperties {
    fn extend<I: IntoIterator<Item = (String, String)>>(&mut self, iter: I) {
        self.values.extend(iter);
    }
}

impl FromIterator<(String, String)> for SystemProperties {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

/// Inputs to a provider lookup
///
/// The default context has no loaders, no runtime home and no properties,
/// so only the locator's own registry and explicit fallbacks can resolve.
#[derive(Debug, Clone, Default)]
pub struct DiscoveryContext {
    context_loader: Option<Arc<dyn ClassLoader>>,
    runtime_home: Option<PathBuf>,
    properties_file: Option<PathBuf>,
    system_properties: SystemProperties,
    module_loader: Option<Arc<dyn ClassLoader>>,
}

impl DiscoveryContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Context derived from the running process
    ///
    /// The runtime home is the grandparent of the current executable
    /// (`<home>/bin/<exe>`) and system properties are the environment.
    pub fn from_process() -> Self {
        let runtime_home = std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent()?.parent().map(Path::to_path_buf));
        Self {
            runtime_home,
            system_properties: SystemProperties::from_env(),
            ..Self::default()
        }
    }

    /// Loader of the calling code, searched before the locator's own
    pub fn with_context_loader(mut self, loader: Arc<dyn ClassLoader>) -> Self {
        self.context_loader = Some(loader);
        self
    }

    pub fn with_runtime_home(mut self, home: impl Into<PathBuf>) -> Self {
        self.runtime_home = Some(home.into());
        self
    }

    /// Read provider properties from `path` instead of
    /// `<runtime-home>/lib/jaxrs.properties`
    pub fn with_properties_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.properties_file = Some(path.into());
        self
    }

    pub fn with_system_properties(mut self, properties: SystemProperties) -> Self {
        self.system_properties = properties;
        self
    }

    pub fn with_system_property(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.system_properties.set(name, value);
        self
    }

    /// Loader exposing `META-INF/services/<service-id>` declarations
    pub fn with_module_loader(mut self, loader: Arc<dyn ClassLoader>) -> Self {
        self.module_loader = Some(loader);
        self
    }

    pub fn context_loader(&self) -> Option<&Arc<dyn ClassLoader>> {
        self.context_loader.as_ref()
    }

    pub fn runtime_home(&self) -> Option<&Path> {
        self.runtime_home.as_deref()
    }

    pub fn properties_file(&self) -> Option<&Path> {
        self.properties_file.as_deref()
    }

    pub fn system_properties(&self) -> &SystemProperties {
        &self.system_properties
    }

    pub fn module_loader(&self) -> Option<&Arc<dyn ClassLoader>> {
        self.module_loader.as_ref()
    }
}
