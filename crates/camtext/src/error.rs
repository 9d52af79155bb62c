//! Error types for the aperture macro and Excellon parsing pipeline.

use thiserror::Error;

/// Errors raised while constructing or parsing aperture macro primitives.
///
/// Both variants are raised at construction/parse time, never deferred.
/// Unrecognized primitive codes are not errors at all; they fall back to
/// [`crate::am::AmPrimitive::Unsupported`].
#[derive(Debug, Error)]
pub enum PrimitiveError {
    /// A field literal could not be read as its required type, such as a
    /// non-numeric position component or a fractional vertex count.
    #[error("invalid primitive type: {0}")]
    InvalidType(String),

    /// A well-typed field is outside its allowed domain: wrong fixed code,
    /// bad exposure token, vertex count out of range, unclosed outline.
    #[error("invalid primitive value: {0}")]
    InvalidValue(String),
}
