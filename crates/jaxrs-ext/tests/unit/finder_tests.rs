//! Tests for the factory finder
//!
//! Test providers are registered into the compile-time slices of this test
//! binary, so the locator's own loader sees them like real provider crates.

use std::sync::Arc;

use jaxrs_domain::BoxError;
use jaxrs_domain::error::Error;
use jaxrs_ext::{
    DiscoveryContext, DiscoveryStrategy, FactoryFinder, PROVIDER_CLASSES, ProviderClass,
    ProviderInstance, SERVICE_REGISTRATIONS, ServiceRegistration, TableClassLoader,
    provider_instance,
};
use tempfile::TempDir;

pub trait Greeter: Send + Sync {
    fn greet(&self) -> String;
}

struct Named(&'static str);

impl Greeter for Named {
    fn greet(&self) -> String {
        format!("hello from {}", self.0)
    }
}

type FactoryResult = Result<ProviderInstance, BoxError>;

fn greeter(name: &'static str) -> FactoryResult {
    Ok(provider_instance(Arc::new(Named(name)) as Arc<dyn Greeter>))
}

fn registry_greeter() -> FactoryResult {
    greeter("registry")
}

fn static_greeter() -> FactoryResult {
    greeter("static")
}

fn context_greeter() -> FactoryResult {
    greeter("context")
}

fn module_greeter() -> FactoryResult {
    greeter("module")
}

fn failing_greeter() -> FactoryResult {
    Err("constructor failed".into())
}

fn not_a_greeter() -> FactoryResult {
    Ok(provider_instance(7u8))
}

#[linkme::distributed_slice(PROVIDER_CLASSES)]
static REGISTRY_GREETER: ProviderClass = ProviderClass {
    name: "tests::RegistryGreeter",
    description: "greeter registered for the registry service",
    factory: registry_greeter,
};

#[linkme::distributed_slice(PROVIDER_CLASSES)]
static STATIC_GREETER: ProviderClass = ProviderClass {
    name: "tests::StaticGreeter",
    description: "greeter loadable only through the locator loader",
    factory: static_greeter,
};

#[linkme::distributed_slice(PROVIDER_CLASSES)]
static FAILING_GREETER: ProviderClass = ProviderClass {
    name: "tests::FailingGreeter",
    description: "greeter whose constructor fails",
    factory: failing_greeter,
};

#[linkme::distributed_slice(PROVIDER_CLASSES)]
static NOT_A_GREETER: ProviderClass = ProviderClass {
    name: "tests::NotAGreeter",
    description: "provider of the wrong type",
    factory: not_a_greeter,
};

#[linkme::distributed_slice(SERVICE_REGISTRATIONS)]
static REGISTRY_SERVICE: ServiceRegistration = ServiceRegistration {
    service_id: "tests.Greeter.registry",
    class_name: "tests::RegistryGreeter",
};

#[linkme::distributed_slice(SERVICE_REGISTRATIONS)]
static SHARED_SERVICE: ServiceRegistration = ServiceRegistration {
    service_id: "tests.Greeter.shared",
    class_name: "tests::RegistryGreeter",
};

const CONTEXT_GREETER: ProviderClass = ProviderClass {
    name: "tests::ContextGreeter",
    description: "greeter visible to the caller context",
    factory: context_greeter,
};

const MODULE_GREETER: ProviderClass = ProviderClass {
    name: "tests::ModuleGreeter",
    description: "greeter visible to the module loader",
    factory: module_greeter,
};

fn runtime_home(properties: &str) -> TempDir {
    let home = TempDir::new().expect("temp dir");
    let lib = home.path().join("lib");
    std::fs::create_dir_all(&lib).expect("create lib dir");
    std::fs::write(lib.join("jaxrs.properties"), properties).expect("write properties");
    home
}

fn greet(finder: &FactoryFinder, service_id: &str) -> String {
    finder
        .find::<Arc<dyn Greeter>>(service_id)
        .expect("provider should resolve")
        .greet()
}

#[test]
fn test_registry_short_circuits_other_strategies() {
    let home = runtime_home("tests.Greeter.registry=tests::FailingGreeter\n");
    let ctx = DiscoveryContext::new()
        .with_runtime_home(home.path())
        .with_system_property("tests.Greeter.registry", "tests::FailingGreeter");
    let finder = FactoryFinder::new(ctx);

    let located = finder
        .locate("tests.Greeter.registry", None)
        .expect("registry entry should win");

    assert_eq!(located.strategy, DiscoveryStrategy::LocatorRegistry);
    assert_eq!(located.class_name, "tests::RegistryGreeter");
    assert_eq!(greet(&finder, "tests.Greeter.registry"), "hello from registry");
}

#[test]
fn test_caller_context_wins_over_locator_registry() {
    let caller = TableClassLoader::new("caller")
        .with_class(CONTEXT_GREETER)
        .with_service("tests.Greeter.shared", "tests::ContextGreeter");
    let finder = FactoryFinder::new(DiscoveryContext::new().with_context_loader(Arc::new(caller)));

    let located = finder.locate("tests.Greeter.shared", None).expect("resolves");
    assert_eq!(located.strategy, DiscoveryStrategy::ContextRegistry);
    assert_eq!(greet(&finder, "tests.Greeter.shared"), "hello from context");
}

#[test]
fn test_properties_file_entry() {
    let home = runtime_home("# providers\ntests.Greeter.props = tests::StaticGreeter\n");
    let finder = FactoryFinder::new(DiscoveryContext::new().with_runtime_home(home.path()));

    let located = finder.locate("tests.Greeter.props", None).expect("resolves");
    assert_eq!(located.strategy, DiscoveryStrategy::PropertiesFile);
    assert_eq!(greet(&finder, "tests.Greeter.props"), "hello from static");
}

#[test]
fn test_system_property_only() {
    let finder = FactoryFinder::new(
        DiscoveryContext::new().with_system_property("tests.Greeter.sysprop", "tests::StaticGreeter"),
    );

    let located = finder.locate("tests.Greeter.sysprop", None).expect("resolves");
    assert_eq!(located.strategy, DiscoveryStrategy::SystemProperty);
    assert_eq!(greet(&finder, "tests.Greeter.sysprop"), "hello from static");
}

#[test]
fn test_unresolvable_service_fails() {
    let home = runtime_home("other.service=tests::StaticGreeter\n");
    let finder = FactoryFinder::new(DiscoveryContext::new().with_runtime_home(home.path()));

    let err = finder
        .find::<Arc<dyn Greeter>>("tests.Greeter.nowhere")
        .err()
        .expect("nothing should resolve");

    assert!(
        matches!(err, Error::ProviderNotFound { ref service_id } if service_id == "tests.Greeter.nowhere")
    );
    assert_eq!(err.to_string(), "Provider for tests.Greeter.nowhere cannot be found");
}

#[test]
fn test_preferred_loader_miss_falls_back_to_locator_loader() {
    let caller = TableClassLoader::new("caller").with_class(CONTEXT_GREETER);
    let ctx = DiscoveryContext::new()
        .with_context_loader(Arc::new(caller))
        .with_system_property("tests.Greeter.fallback-loader", "tests::StaticGreeter");
    let finder = FactoryFinder::new(ctx);

    assert_eq!(greet(&finder, "tests.Greeter.fallback-loader"), "hello from static");
}

#[test]
fn test_preferred_loader_is_used_first() {
    let caller = TableClassLoader::new("caller").with_class(CONTEXT_GREETER);
    let ctx = DiscoveryContext::new()
        .with_context_loader(Arc::new(caller))
        .with_system_property("tests.Greeter.preferred", "tests::ContextGreeter");

    assert_eq!(greet(&FactoryFinder::new(ctx), "tests.Greeter.preferred"), "hello from context");
}

#[test]
fn test_failing_constructor_is_terminal() {
    let home = runtime_home("tests.Greeter.failing=tests::FailingGreeter\n");
    let ctx = DiscoveryContext::new()
        .with_runtime_home(home.path())
        .with_system_property("tests.Greeter.failing", "tests::StaticGreeter");
    let finder = FactoryFinder::new(ctx);

    let err = finder
        .find::<Arc<dyn Greeter>>("tests.Greeter.failing")
        .err()
        .expect("constructor failure must surface");

    assert!(matches!(err, Error::ClassNotFound { ref class_name, .. } if class_name == "tests::FailingGreeter"));
    assert!(err.to_string().contains("could not be instantiated: constructor failed"));
    assert!(std::error::Error::source(&err).is_some());
}

#[test]
fn test_terminal_error_names_the_service() {
    let finder = FactoryFinder::new(
        DiscoveryContext::new().with_system_property("tests.Greeter.named", "tests::FailingGreeter"),
    );

    let err = finder
        .find::<Arc<dyn Greeter>>("tests.Greeter.named")
        .err()
        .expect("constructor failure must surface");

    assert!(matches!(err, Error::ClassNotFound { ref service_id, .. } if service_id == "tests.Greeter.named"));
    assert!(err.is_provider_not_found());
    assert_eq!(
        err.to_string(),
        "Provider for tests.Greeter.named: tests::FailingGreeter could not be instantiated: constructor failed"
    );
}

#[test]
fn test_unknown_class_in_properties_file_is_terminal() {
    let home = runtime_home("tests.Greeter.props-missing=tests::Missing\n");
    let ctx = DiscoveryContext::new()
        .with_runtime_home(home.path())
        .with_system_property("tests.Greeter.props-missing", "tests::StaticGreeter");

    let err = FactoryFinder::new(ctx)
        .find::<Arc<dyn Greeter>>("tests.Greeter.props-missing")
        .err()
        .expect("unknown class must surface");

    assert!(matches!(
        err,
        Error::ClassNotFound { ref service_id, ref class_name, .. }
            if service_id == "tests.Greeter.props-missing" && class_name == "tests::Missing"
    ));
    assert!(std::error::Error::source(&err).is_none());
}

#[test]
fn test_unknown_class_name_is_terminal() {
    let finder = FactoryFinder::new(
        DiscoveryContext::new().with_system_property("tests.Greeter.unknown", "tests::Missing"),
    );

    let err = finder
        .find_or::<Arc<dyn Greeter>>("tests.Greeter.unknown", "tests::StaticGreeter")
        .err()
        .expect("unknown class must surface");
    assert!(matches!(err, Error::ClassNotFound { .. }));
    assert!(err.is_provider_not_found());
}

#[test]
fn test_broken_registry_entry_falls_through() {
    let caller = TableClassLoader::new("caller")
        .with_class(FAILING_GREETER)
        .with_service("tests.Greeter.broken-registry", "tests::FailingGreeter")
        .with_service("tests.Greeter.broken-registry", "tests::Unloadable");
    let ctx = DiscoveryContext::new()
        .with_context_loader(Arc::new(caller))
        .with_system_property("tests.Greeter.broken-registry", "tests::StaticGreeter");
    let finder = FactoryFinder::new(ctx);

    let located = finder.locate("tests.Greeter.broken-registry", None).expect("resolves");
    assert_eq!(located.strategy, DiscoveryStrategy::SystemProperty);
}

#[test]
fn test_registry_skips_entries_of_the_wrong_type() {
    let caller = TableClassLoader::new("caller")
        .with_class(NOT_A_GREETER)
        .with_class(CONTEXT_GREETER)
        .with_service("tests.Greeter.typed", "tests::NotAGreeter")
        .with_service("tests.Greeter.typed", "tests::ContextGreeter");
    let finder = FactoryFinder::new(DiscoveryContext::new().with_context_loader(Arc::new(caller)));

    assert_eq!(greet(&finder, "tests.Greeter.typed"), "hello from context");

    let untyped = finder.locate("tests.Greeter.typed", None).expect("resolves");
    assert_eq!(untyped.class_name, "tests::NotAGreeter");
}

#[test]
fn test_resolved_class_of_wrong_type_is_terminal() {
    let finder = FactoryFinder::new(
        DiscoveryContext::new().with_system_property("tests.Greeter.mismatch", "tests::NotAGreeter"),
    );

    let err = finder
        .find::<Arc<dyn Greeter>>("tests.Greeter.mismatch")
        .err()
        .expect("wrong type must surface");
    assert!(matches!(err, Error::ServiceTypeMismatch { .. }));
}

#[test]
fn test_malformed_properties_file_is_skipped() {
    let home = runtime_home("tests.Greeter.malformed=\\uZZZZ\n");
    let ctx = DiscoveryContext::new()
        .with_runtime_home(home.path())
        .with_system_property("tests.Greeter.malformed", "tests::StaticGreeter");

    let located = FactoryFinder::new(ctx)
        .locate("tests.Greeter.malformed", None)
        .expect("falls through to the system property");
    assert_eq!(located.strategy, DiscoveryStrategy::SystemProperty);
}

#[test]
fn test_missing_runtime_home_is_skipped() {
    let ctx = DiscoveryContext::new()
        .with_runtime_home("/nonexistent/runtime/home")
        .with_system_property("tests.Greeter.no-home", "tests::StaticGreeter");

    let located = FactoryFinder::new(ctx)
        .locate("tests.Greeter.no-home", None)
        .expect("falls through to the system property");
    assert_eq!(located.strategy, DiscoveryStrategy::SystemProperty);
}

#[test]
fn test_runtime_home_that_is_a_file_is_skipped() {
    let dir = TempDir::new().expect("temp dir");
    let not_a_dir = dir.path().join("home");
    std::fs::write(&not_a_dir, "").expect("write file");
    let ctx = DiscoveryContext::new()
        .with_runtime_home(&not_a_dir)
        .with_system_property("tests.Greeter.file-home", "tests::StaticGreeter");

    let located = FactoryFinder::new(ctx)
        .locate("tests.Greeter.file-home", None)
        .expect("falls through to the system property");
    assert_eq!(located.strategy, DiscoveryStrategy::SystemProperty);
}

#[test]
fn test_configured_properties_file_replaces_runtime_home_file() {
    let home = runtime_home("tests.Greeter.override=tests::RegistryGreeter\n");
    let dir = TempDir::new().expect("temp dir");
    let file = dir.path().join("providers.properties");
    std::fs::write(&file, "tests.Greeter.override=tests::StaticGreeter\n").expect("write properties");
    let ctx = DiscoveryContext::new()
        .with_runtime_home(home.path())
        .with_properties_file(&file);
    let finder = FactoryFinder::new(ctx);

    let located = finder.locate("tests.Greeter.override", None).expect("resolves");
    assert_eq!(located.strategy, DiscoveryStrategy::PropertiesFile);
    assert_eq!(located.class_name, "tests::StaticGreeter");
}

#[test]
fn test_configured_properties_file_without_runtime_home() {
    let dir = TempDir::new().expect("temp dir");
    let file = dir.path().join("providers.properties");
    std::fs::write(&file, "tests.Greeter.homeless=tests::StaticGreeter\n").expect("write properties");
    let finder = FactoryFinder::new(DiscoveryContext::new().with_properties_file(&file));

    assert_eq!(greet(&finder, "tests.Greeter.homeless"), "hello from static");
}

#[test]
fn test_missing_configured_properties_file_is_skipped() {
    let home = runtime_home("tests.Greeter.gone=tests::RegistryGreeter\n");
    let ctx = DiscoveryContext::new()
        .with_runtime_home(home.path())
        .with_properties_file(home.path().join("absent.properties"))
        .with_system_property("tests.Greeter.gone", "tests::StaticGreeter");

    let located = FactoryFinder::new(ctx)
        .locate("tests.Greeter.gone", None)
        .expect("falls through to the system property");
    assert_eq!(located.strategy, DiscoveryStrategy::SystemProperty);
}

#[test]
fn test_module_services_declaration() {
    let module = TableClassLoader::new("module")
        .with_class(MODULE_GREETER)
        .with_resource("META-INF/services/tests.Greeter.module", "tests::ModuleGreeter\nignored\n");
    let finder = FactoryFinder::new(DiscoveryContext::new().with_module_loader(Arc::new(module)));

    let located = finder.locate("tests.Greeter.module", None).expect("resolves");
    assert_eq!(located.strategy, DiscoveryStrategy::ModuleServices);
    assert_eq!(greet(&finder, "tests.Greeter.module"), "hello from module");
}

#[test]
fn test_unusable_module_declaration_falls_through() {
    let module = TableClassLoader::new("module")
        .with_resource("META-INF/services/tests.Greeter.bad-module", "tests::Missing\n")
        .with_resource("META-INF/services/tests.Greeter.empty-module", "\n");
    let finder = FactoryFinder::new(DiscoveryContext::new().with_module_loader(Arc::new(module)));

    let bad = finder
        .find_or::<Arc<dyn Greeter>>("tests.Greeter.bad-module", "tests::StaticGreeter")
        .expect("fallback resolves");
    assert_eq!(bad.greet(), "hello from static");

    let empty = finder.locate("tests.Greeter.empty-module", None);
    assert!(matches!(empty, Err(Error::ProviderNotFound { .. })));
}

#[test]
fn test_fallback_class_used_last() {
    let finder = FactoryFinder::default();

    let located = finder
        .locate("tests.Greeter.fallback", Some("tests::StaticGreeter"))
        .expect("fallback resolves");
    assert_eq!(located.strategy, DiscoveryStrategy::Fallback);

    let registered = finder
        .locate("tests.Greeter.registry", Some("tests::StaticGreeter"))
        .expect("registry resolves");
    assert_eq!(registered.strategy, DiscoveryStrategy::LocatorRegistry);
}

#[test]
fn test_each_lookup_builds_a_new_instance() {
    let finder = FactoryFinder::default();
    let first: Arc<dyn Greeter> = finder.find("tests.Greeter.registry").expect("resolves");
    let second: Arc<dyn Greeter> = finder.find("tests.Greeter.registry").expect("resolves");

    assert!(!Arc::ptr_eq(&first, &second));
}

#[test]
fn test_free_function_find() {
    let ctx = DiscoveryContext::new().with_system_property("tests.Greeter.free", "tests::StaticGreeter");
    let greeter: Arc<dyn Greeter> = jaxrs_ext::find("tests.Greeter.free", ctx).expect("resolves");
    assert_eq!(greeter.greet(), "hello from static");
}
