//! Domain Layer - jaxrs API
//!
//! Contract types shared by runtimes and applications: the error type,
//! redirection errors, representation variants and client request filters.
//!
//! Nothing in this crate performs I/O. Provider discovery lives in
//! `jaxrs-ext`.

pub mod constants;
pub mod error;
pub mod ports;
pub mod redirection;
pub mod value_objects;

pub use error::{BoxError, Error, Result};
pub use redirection::RedirectionError;
pub use value_objects::{MediaType, Status, StatusFamily, Variant};
