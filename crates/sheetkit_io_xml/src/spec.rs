//! XML validation input models.

use std::path::Path;

/// XML document source: filesystem path or in-memory bytes.
#[derive(Debug, Clone, Copy)]
pub enum EnumXmlSource<'a> {
    /// Read the document from a file path.
    Path(&'a Path),
    /// Parse the document from a byte buffer.
    Bytes(&'a [u8]),
}
