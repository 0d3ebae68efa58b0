//! Domain layer constants
//!
//! Service identifiers and discovery locations shared by the locator and
//! the crates that consume it.

// ============================================================================
// SERVICE IDENTIFIERS
// ============================================================================

/// Service identifier of the runtime delegate
pub const RUNTIME_DELEGATE_SERVICE: &str = "jakarta.ws.rs.ext.RuntimeDelegate";

/// Service identifier of the client builder
pub const CLIENT_BUILDER_SERVICE: &str = "jakarta.ws.rs.client.ClientBuilder";

/// Service identifier of the server-sent event source builder
pub const SSE_EVENT_SOURCE_BUILDER_SERVICE: &str = "jakarta.ws.rs.sse.SseEventSource.Builder";

// ============================================================================
// DISCOVERY LOCATIONS
// ============================================================================

/// Directory below the runtime home holding the properties file
pub const RUNTIME_LIB_DIR: &str = "lib";

/// File name of the runtime-home provider properties
pub const PROVIDER_PROPERTIES_FILENAME: &str = "jaxrs.properties";

/// Resource prefix of service declarations exposed by a module loader
pub const SERVICES_RESOURCE_PREFIX: &str = "META-INF/services/";

// ============================================================================
// FILTER PRIORITIES
// ============================================================================

/// Priority of authentication filters
pub const PRIORITY_AUTHENTICATION: i32 = 1000;

/// Priority of authorization filters
pub const PRIORITY_AUTHORIZATION: i32 = 2000;

/// Priority of header decorator filters
pub const PRIORITY_HEADER_DECORATOR: i32 = 3000;

/// Priority of entity coder filters
pub const PRIORITY_ENTITY_CODER: i32 = 4000;

/// Default priority of user filters
pub const PRIORITY_USER: i32 = 5000;
