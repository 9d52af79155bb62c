//! Gerber aperture macro primitive statements.
//!
//! An aperture macro body is a sequence of `*`-terminated primitive
//! statements. Each statement parses into one [`AmPrimitive`] variant that
//! can be re-serialized with [`AmPrimitive::to_gerber`] and converted
//! between inch and millimeter field values in place.

pub mod primitive;

pub use primitive::{
    AmCenterLine, AmCircle, AmComment, AmLowerLeftLine, AmMoire, AmOutline, AmPolygon,
    AmPrimitive, AmThermal, AmUnsupported, AmVectorLine, Exposure,
};

use crate::error::PrimitiveError;

/// Parses a full aperture macro body into its ordered primitive sequence.
///
/// Statements are split on their `*` terminators; blank segments are
/// skipped. Statements with an unknown leading code come back as
/// [`AmPrimitive::Unsupported`] rather than failing the whole body.
///
/// # Errors
///
/// Returns an error when a statement with a known code has a malformed
/// field ([`PrimitiveError::InvalidType`]) or a field outside its allowed
/// domain ([`PrimitiveError::InvalidValue`]).
pub fn parse_macro_body(body: &str) -> Result<Vec<AmPrimitive>, PrimitiveError> {
    let mut primitives = Vec::new();
    for statement in body.split('*') {
        let statement = statement.trim();
        if statement.is_empty() {
            continue;
        }
        primitives.push(AmPrimitive::from_gerber(statement)?);
    }
    Ok(primitives)
}
