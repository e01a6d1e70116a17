//! `sheetkit_io_xml` v1:
//! XSD validation helper over the libxml2 schema engine.
//!
//! Architecture:
//! - `spec`     : input source models
//! - `validate` : schema validation with message collection
pub mod spec;
pub mod validate;

pub use spec::EnumXmlSource;
pub use validate::validate_against_schema;
