//! HTTP status codes and their families

use std::fmt;

use crate::error::{Error, Result};

/// Class of an HTTP status code, derived from its first digit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusFamily {
    /// `1xx`
    Informational,
    /// `2xx`
    Successful,
    /// `3xx`
    Redirection,
    /// `4xx`
    ClientError,
    /// `5xx`
    ServerError,
    /// Anything else
    Other,
}

impl StatusFamily {
    /// Classify a numeric status code
    pub fn of(code: u16) -> Self {
        match code / 100 {
            1 => Self::Informational,
            2 => Self::Successful,
            3 => Self::Redirection,
            4 => Self::ClientError,
            5 => Self::ServerError,
            _ => Self::Other,
        }
    }
}

/// A validated HTTP status code in `100..=599`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Status(u16);

impl Status {
    pub const OK: Status = Status(200);
    pub const MULTIPLE_CHOICES: Status = Status(300);
    pub const MOVED_PERMANENTLY: Status = Status(301);
    pub const FOUND: Status = Status(302);
    pub const SEE_OTHER: Status = Status(303);
    pub const NOT_MODIFIED: Status = Status(304);
    pub const USE_PROXY: Status = Status(305);
    pub const TEMPORARY_REDIRECT: Status = Status(307);
    pub const PERMANENT_REDIRECT: Status = Status(308);
    pub const BAD_REQUEST: Status = Status(400);
    pub const UNAUTHORIZED: Status = Status(401);
    pub const FORBIDDEN: Status = Status(403);
    pub const NOT_FOUND: Status = Status(404);
    pub const INTERNAL_SERVER_ERROR: Status = Status(500);

    /// Build a status from a numeric code
    ///
    /// Fails with [`Error::InvalidArgument`] outside `100..=599`.
    pub fn from_code(code: u16) -> Result<Self> {
        if (100..=599).contains(&code) {
            Ok(Self(code))
        } else {
            Err(Error::invalid_argument(format!(
                "{code} is not a valid HTTP status code"
            )))
        }
    }

    /// Numeric status code
    pub fn code(&self) -> u16 {
        self.0
    }

    /// Family of this status
    pub fn family(&self) -> StatusFamily {
        StatusFamily::of(self.0)
    }

    /// Standard reason phrase, if the code is a well-known one
    pub fn reason_phrase(&self) -> Option<&'static str> {
        let phrase = match self.0 {
            200 => "OK",
            201 => "Created",
            202 => "Accepted",
            204 => "No Content",
            300 => "Multiple Choices",
            301 => "Moved Permanently",
            302 => "Found",
            303 => "See Other",
            304 => "Not Modified",
            305 => "Use Proxy",
            307 => "Temporary Redirect",
            308 => "Permanent Redirect",
            400 => "Bad Request",
            401 => "Unauthorized",
            403 => "Forbidden",
            404 => "Not Found",
            405 => "Method Not Allowed",
            406 => "Not Acceptable",
            409 => "Conflict",
            415 => "Unsupported Media Type",
            500 => "Internal Server Error",
            501 => "Not Implemented",
            503 => "Service Unavailable",
            _ => return None,
        };
        Some(phrase)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.reason_phrase() {
            Some(reason) => write!(f, "{} {}", self.0, reason),
            None => write!(f, "{}", self.0),
        }
    }
}

impl TryFrom<u16> for Status {
    type Error = Error;

    fn try_from(code: u16) -> Result<Self> {
        Self::from_code(code)
    }
}
