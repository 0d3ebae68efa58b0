//! Media type value object

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Wildcard type and subtype
pub const MEDIA_TYPE_WILDCARD: &str = "*";

/// An abstraction of a media type: `type/subtype` plus parameters
///
/// Type, subtype and parameter names are compared case-insensitively and
/// stored lowercase.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MediaType {
    media_type: String,
    subtype: String,
    parameters: BTreeMap<String, String>,
}

impl MediaType {
    /// Create a media type without parameters
    pub fn new(media_type: impl AsRef<str>, subtype: impl AsRef<str>) -> Self {
        Self {
            media_type: media_type.as_ref().to_ascii_lowercase(),
            subtype: subtype.as_ref().to_ascii_lowercase(),
            parameters: BTreeMap::new(),
        }
    }

    /// `*/*`
    pub fn wildcard() -> Self {
        Self::new(MEDIA_TYPE_WILDCARD, MEDIA_TYPE_WILDCARD)
    }

    /// `text/plain`
    pub fn text_plain() -> Self {
        Self::new("text", "plain")
    }

    /// `application/json`
    pub fn application_json() -> Self {
        Self::new("application", "json")
    }

    /// Add a parameter
    pub fn with_parameter(mut self, name: impl AsRef<str>, value: impl Into<String>) -> Self {
        self.parameters
            .insert(name.as_ref().to_ascii_lowercase(), value.into());
        self
    }

    /// Primary type
    pub fn media_type(&self) -> &str {
        &self.media_type
    }

    /// Subtype
    pub fn subtype(&self) -> &str {
        &self.subtype
    }

    /// Parameters, keyed by lowercase name
    pub fn parameters(&self) -> &BTreeMap<String, String> {
        &self.parameters
    }

    /// Whether the primary type is `*`
    pub fn is_wildcard_type(&self) -> bool {
        self.media_type == MEDIA_TYPE_WILDCARD
    }

    /// Whether the subtype is `*`
    pub fn is_wildcard_subtype(&self) -> bool {
        self.subtype == MEDIA_TYPE_WILDCARD
    }
}

impl FromStr for MediaType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let mut parts = s.split(';');
        let essence = parts.next().unwrap_or_default().trim();
        let (media_type, subtype) = essence
            .split_once('/')
            .ok_or_else(|| Error::invalid_argument(format!("media type '{s}' has no subtype")))?;
        if media_type.trim().is_empty() || subtype.trim().is_empty() {
            return Err(Error::invalid_argument(format!(
                "media type '{s}' has an empty type or subtype"
            )));
        }

        let mut parsed = Self::new(media_type.trim(), subtype.trim());
        for param in parts.map(str::trim).filter(|p| !p.is_empty()) {
            let (name, value) = param.split_once('=').ok_or_else(|| {
                Error::invalid_argument(format!("malformed media type parameter '{param}'"))
            })?;
            parsed = parsed.with_parameter(name.trim(), value.trim().trim_matches('"'));
        }
        Ok(parsed)
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.media_type, self.subtype)?;
        for (name, value) in &self.parameters {
            write!(f, ";{name}={value}")?;
        }
        Ok(())
    }
}
