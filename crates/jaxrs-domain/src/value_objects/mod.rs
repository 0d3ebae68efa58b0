//! Domain Value Objects
//!
//! | Value Object | Description |
//! |--------------|-------------|
//! | [`Status`] | Validated HTTP status code |
//! | [`StatusFamily`] | Class of a status code |
//! | [`MediaType`] | `type/subtype` with parameters |
//! | [`Variant`] | Media type, language and encoding of a representation |

/// Media type value object
pub mod media_type;
/// Status code value objects
pub mod status;
/// Representation variant
pub mod variant;

pub use media_type::MediaType;
pub use status::{Status, StatusFamily};
pub use variant::Variant;
