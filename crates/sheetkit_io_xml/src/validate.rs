//! XSD validation delegating to the libxml2 schema engine.

use std::path::Path;

use libxml::error::StructuredError;
use libxml::parser::Parser;
use libxml::schemas::{SchemaParserContext, SchemaValidationContext};
use libxml::tree::Document;

use crate::spec::EnumXmlSource;

/// Validate one XML document against an XSD schema file.
///
/// Returns one human-readable message per diagnostic; an empty list means
/// the document is valid. Schema-load failures, schema violations and
/// malformed-XML parse failures all land in the list; this function never
/// fails.
pub fn validate_against_schema(
    source: EnumXmlSource<'_>,
    path_schema: &Path,
    namespace_uri: Option<&str>,
) -> Vec<String> {
    let mut l_messages = Vec::new();

    let mut parser_ctx = SchemaParserContext::from_file(&path_schema.to_string_lossy());
    let mut validation_ctx = match SchemaValidationContext::from_parser(&mut parser_ctx) {
        Ok(ctx) => ctx,
        Err(l_errors) => {
            collect_diagnostics(&l_errors, &mut l_messages);
            return l_messages;
        }
    };

    let parser = Parser::default();
    let document = match source {
        EnumXmlSource::Path(path_xml) => parser.parse_file(&path_xml.to_string_lossy()),
        EnumXmlSource::Bytes(v_xml) => parser.parse_string(v_xml),
    };
    let document = match document {
        Ok(document) => document,
        Err(err) => {
            l_messages.push(format!("XML parse error: {err}"));
            return l_messages;
        }
    };

    if let Some(uri) = namespace_uri
        && let Some(c_mismatch) = validate_root_namespace(&document, uri)
    {
        l_messages.push(c_mismatch);
    }

    if let Err(l_errors) = validation_ctx.validate_document(&document) {
        collect_diagnostics(&l_errors, &mut l_messages);
    }

    l_messages
}

fn collect_diagnostics(l_errors: &[StructuredError], l_messages: &mut Vec<String>) {
    for error in l_errors {
        let c_message = error
            .message
            .as_deref()
            .map(str::trim_end)
            .unwrap_or("unknown schema diagnostic");
        l_messages.push(c_message.to_string());
    }
}

fn validate_root_namespace(document: &Document, namespace_uri: &str) -> Option<String> {
    let Some(node_root) = document.get_root_element() else {
        return Some("XML document has no root element.".to_string());
    };

    match node_root.get_namespace().map(|ns| ns.get_href()) {
        Some(href) if href == namespace_uri => None,
        Some(href) => Some(format!(
            "Root namespace mismatch: expected {namespace_uri:?}, found {href:?}."
        )),
        None => Some(format!(
            "Root namespace mismatch: expected {namespace_uri:?}, found none."
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const C_SCHEMA_NOTE: &str = r#"<?xml version="1.0"?>
<xs:schema xmlns:xs="http://www.w3.org/2001/XMLSchema">
  <xs:element name="note">
    <xs:complexType>
      <xs:sequence>
        <xs:element name="to" type="xs:string"/>
        <xs:element name="body" type="xs:string"/>
      </xs:sequence>
    </xs:complexType>
  </xs:element>
</xs:schema>
"#;

    fn write_schema(dir_temp: &tempfile::TempDir) -> std::path::PathBuf {
        let path_schema = dir_temp.path().join("note.xsd");
        fs::write(&path_schema, C_SCHEMA_NOTE).unwrap();
        path_schema
    }

    #[test]
    fn test_valid_document_yields_empty_list() {
        let dir_temp = tempfile::tempdir().unwrap();
        let path_schema = write_schema(&dir_temp);
        let path_xml = dir_temp.path().join("note.xml");
        fs::write(&path_xml, "<note><to>Ada</to><body>hi</body></note>").unwrap();

        let l_messages =
            validate_against_schema(EnumXmlSource::Path(&path_xml), &path_schema, None);
        assert!(l_messages.is_empty(), "unexpected: {l_messages:?}");
    }

    #[test]
    fn test_schema_violation_yields_messages() {
        let dir_temp = tempfile::tempdir().unwrap();
        let path_schema = write_schema(&dir_temp);

        let l_messages = validate_against_schema(
            EnumXmlSource::Bytes(b"<note><body>missing to</body></note>"),
            &path_schema,
            None,
        );
        assert!(!l_messages.is_empty());
    }

    #[test]
    fn test_malformed_document_is_reported_not_raised() {
        let dir_temp = tempfile::tempdir().unwrap();
        let path_schema = write_schema(&dir_temp);

        let l_messages = validate_against_schema(
            EnumXmlSource::Bytes(b"<note><to>unclosed"),
            &path_schema,
            None,
        );
        assert!(!l_messages.is_empty());
    }

    #[test]
    fn test_bytes_source_is_accepted() {
        let dir_temp = tempfile::tempdir().unwrap();
        let path_schema = write_schema(&dir_temp);

        let l_messages = validate_against_schema(
            EnumXmlSource::Bytes(b"<note><to>Ada</to><body>hi</body></note>"),
            &path_schema,
            None,
        );
        assert!(l_messages.is_empty(), "unexpected: {l_messages:?}");
    }

    #[test]
    fn test_namespace_mismatch_is_reported() {
        let dir_temp = tempfile::tempdir().unwrap();
        let path_schema = write_schema(&dir_temp);

        let l_messages = validate_against_schema(
            EnumXmlSource::Bytes(b"<note><to>Ada</to><body>hi</body></note>"),
            &path_schema,
            Some("urn:expected"),
        );
        assert!(
            l_messages
                .iter()
                .any(|c_message| c_message.contains("namespace mismatch")
                    || c_message.contains("Root namespace"))
        );
    }

    #[test]
    fn test_missing_schema_yields_messages() {
        let dir_temp = tempfile::tempdir().unwrap();
        let path_schema = dir_temp.path().join("absent.xsd");

        let l_messages = validate_against_schema(
            EnumXmlSource::Bytes(b"<note/>"),
            &path_schema,
            None,
        );
        assert!(!l_messages.is_empty());
    }
}
