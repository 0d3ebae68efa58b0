//! Error handling types

use thiserror::Error;

/// Boxed error used as the cause of wrapped failures
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Result type alias for operations that can fail
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the jaxrs API
#[derive(Error, Debug)]
pub enum Error {
    /// I/O operation error
    #[error("I/O error: {message}")]
    Io {
        /// Description of the I/O error
        message: String,
        /// Optional source error
        #[source]
        source: Option<BoxError>,
    },

    /// No discovery strategy yielded a provider for the service
    #[error("Provider for {service_id} cannot be found")]
    ProviderNotFound {
        /// The service identifier that could not be resolved
        service_id: String,
    },

    /// A resolved provider class could not be loaded or instantiated
    #[error("Provider for {service_id}: {message}")]
    ClassNotFound {
        /// The service identifier being resolved
        service_id: String,
        /// Name of the provider class
        class_name: String,
        /// Description of the failure
        message: String,
        /// Underlying load or construction failure
        #[source]
        source: Option<BoxError>,
    },

    /// A provider was instantiated but does not implement the requested service
    #[error("Provider {class_name} is not an implementation of {service_id}")]
    ServiceTypeMismatch {
        /// Name of the provider class
        class_name: String,
        /// The requested service identifier
        service_id: String,
    },

    /// Malformed properties content
    #[error("Properties error at line {line}: {message}")]
    Properties {
        /// 1-based line number where the problem starts
        line: usize,
        /// Description of the problem
        message: String,
    },

    /// Invalid argument provided to a function
    #[error("Invalid argument: {message}")]
    InvalidArgument {
        /// Description of the invalid argument
        message: String,
    },

    /// Configuration-related error
    #[error("Configuration error: {message}")]
    Configuration {
        /// Description of the configuration error
        message: String,
        /// Optional source error
        #[source]
        source: Option<BoxError>,
    },
}

impl Error {
    /// Create a provider-not-found error
    pub fn provider_not_found<S: Into<String>>(service_id: S) -> Self {
        Self::ProviderNotFound {
            service_id: service_id.into(),
        }
    }

    /// Create a class-not-found error for a class no loader knows about
    pub fn class_not_found<S: Into<String>, C: Into<String>>(service_id: S, class_name: C) -> Self {
        let class_name = class_name.into();
        Self::ClassNotFound {
            service_id: service_id.into(),
            message: format!("{class_name} not found"),
            class_name,
            source: None,
        }
    }

    /// Create a class-not-found error for a class whose factory failed
    pub fn not_instantiable<S: Into<String>, C: Into<String>>(
        service_id: S,
        class_name: C,
        source: BoxError,
    ) -> Self {
        let class_name = class_name.into();
        Self::ClassNotFound {
            service_id: service_id.into(),
            message: format!("{class_name} could not be instantiated: {source}"),
            class_name,
            source: Some(source),
        }
    }

    /// Create a service type mismatch error
    pub fn service_type_mismatch<C: Into<String>, S: Into<String>>(
        class_name: C,
        service_id: S,
    ) -> Self {
        Self::ServiceTypeMismatch {
            class_name: class_name.into(),
            service_id: service_id.into(),
        }
    }

    /// Create a properties parse error
    pub fn properties<S: Into<String>>(line: usize, message: S) -> Self {
        Self::Properties {
            line,
            message: message.into(),
        }
    }

    /// Create an invalid argument error
    pub fn invalid_argument<S: Into<String>>(message: S) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }
}

// I/O and configuration error creation methods
impl Error {
    /// Create an I/O error
    pub fn io<S: Into<String>>(message: S) -> Self {
        Self::Io {
            message: message.into(),
            source: None,
        }
    }

    /// Create an I/O error with source
    pub fn io_with_source<S: Into<String>, E: std::error::Error + Send + Sync + 'static>(
        message: S,
        source: E,
    ) -> Self {
        Self::Io {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a configuration error
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
            source: None,
        }
    }

    /// Create a configuration error with source
    pub fn configuration_with_source<
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    >(
        message: S,
        source: E,
    ) -> Self {
        Self::Configuration {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

impl Error {
    /// Whether this error means discovery came up empty or the resolved class was unusable
    pub fn is_provider_not_found(&self) -> bool {
        matches!(
            self,
            Self::ProviderNotFound { .. } | Self::ClassNotFound { .. }
        )
    }
}
