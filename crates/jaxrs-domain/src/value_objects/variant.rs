//! Representation variant

use std::fmt;

use super::media_type::MediaType;
use crate::error::{Error, Result};

/// A representation variant: media type, language and content encoding
///
/// Every component is optional, but a variant carries at least one.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Variant {
    media_type: Option<MediaType>,
    language: Option<String>,
    encoding: Option<String>,
}

impl Variant {
    /// Create a variant
    ///
    /// Fails with [`Error::InvalidArgument`] if all three components are absent.
    pub fn new(
        media_type: Option<MediaType>,
        language: Option<&str>,
        encoding: Option<&str>,
    ) -> Result<Self> {
        if media_type.is_none() && language.is_none() && encoding.is_none() {
            return Err(Error::invalid_argument(
                "media type, language and encoding must not all be absent",
            ));
        }
        Ok(Self {
            media_type,
            language: language.map(str::to_owned),
            encoding: encoding.map(str::to_owned),
        })
    }

    pub fn media_type(&self) -> Option<&MediaType> {
        self.media_type.as_ref()
    }

    /// Language tag as given, `None` when the variant has no language
    pub fn language_string(&self) -> Option<&str> {
        self.language.as_deref()
    }

    pub fn encoding(&self) -> Option<&str> {
        self.encoding.as_deref()
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let media = self.media_type.as_ref().map(ToString::to_string);
        write!(
            f,
            "Variant[mediaType={}, language={}, encoding={}]",
            media.as_deref().unwrap_or("null"),
            self.language.as_deref().unwrap_or("null"),
            self.encoding.as_deref().unwrap_or("null"),
        )
    }
}
