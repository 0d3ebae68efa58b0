//! Redirection error raised by resources to send the client elsewhere

use std::fmt;

use url::Url;

use crate::error::{Error, Result};
use crate::value_objects::{Status, StatusFamily};

/// A runtime error signalling a `3xx` redirection
///
/// The status is validated at construction: anything outside the
/// redirection family is rejected with [`Error::InvalidArgument`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedirectionError {
    message: Option<String>,
    status: Status,
    location: Url,
}

impl RedirectionError {
    /// Create a redirection error for the given status and location
    pub fn new(status: Status, location: Url) -> Result<Self> {
        Self::build(None, status, location)
    }

    /// Create a redirection error with a detail message
    pub fn with_message(message: impl Into<String>, status: Status, location: Url) -> Result<Self> {
        Self::build(Some(message.into()), status, location)
    }

    /// Create a redirection error from a numeric status code
    ///
    /// Fails if the code is not a valid HTTP status or not a `3xx` code.
    pub fn from_code(code: u16, location: Url) -> Result<Self> {
        Self::build(None, Status::from_code(code)?, location)
    }

    fn build(message: Option<String>, status: Status, location: Url) -> Result<Self> {
        if status.family() != StatusFamily::Redirection {
            return Err(Error::invalid_argument(format!(
                "status code {} is not from the redirection family",
                status.code()
            )));
        }
        Ok(Self {
            message,
            status,
            location,
        })
    }

    /// Redirection status
    pub fn status(&self) -> Status {
        self.status
    }

    /// Target placed in the `Location` header
    pub fn location(&self) -> &Url {
        &self.location
    }

    /// Detail message, if one was given
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }
}

impl fmt::Display for RedirectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.message {
            Some(message) => f.write_str(message),
            None => write!(f, "HTTP {}", self.status),
        }
    }
}

impl std::error::Error for RedirectionError {}
