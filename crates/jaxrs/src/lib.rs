//! jaxrs API
//!
//! Facade over the workspace crates:
//!
//! - [`domain`]: errors, redirection, variants, client request filters
//! - [`ext`]: provider registry and the factory finder
//! - [`infrastructure`]: configuration and logging
//!
//! The [`cli`] module backs the `jaxrs` binary.

pub mod cli;

pub use jaxrs_domain as domain;
pub use jaxrs_ext as ext;
pub use jaxrs_infrastructure as infrastructure;

pub use jaxrs_domain::{Error, Result};
pub use jaxrs_ext::{DiscoveryContext, FactoryFinder};
