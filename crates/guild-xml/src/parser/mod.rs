pub use roxmltree::*;

use tracing::trace;

use crate::XmlError;

/// Parses a document, rejecting anything that is not well-formed.
///
/// DTDs are refused (the `roxmltree` default), so entity expansion never happens.
pub fn parse(xml: &str) -> Result<Document<'_>, roxmltree::Error> {
    roxmltree::Document::parse(xml)
}

/// Like [`parse`], starting from raw payload bytes.
pub fn parse_bytes(bytes: &[u8]) -> Result<Document<'_>, XmlError> {
    let xml = std::str::from_utf8(bytes)?;
    trace!(length = xml.len(), "parsing document");
    Ok(parse(xml)?)
}

/// Returns the first element child of `node` whose local name is `name`.
pub fn child_by_local_name<'a, 'input>(
    node: Node<'a, 'input>,
    name: &str,
) -> Option<Node<'a, 'input>> {
    node.children()
        .find(|child| child.is_element() && child.tag_name().name() == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_well_formed() {
        let doc = parse("<a><b>text</b></a>").unwrap();
        let root = doc.root_element();
        assert_eq!(root.tag_name().name(), "a");
        let b = child_by_local_name(root, "b").unwrap();
        assert_eq!(b.text(), Some("text"));
    }

    #[test]
    fn test_parse_unbalanced_fails() {
        assert!(parse("<a><b>text</a>").is_err());
        assert!(parse("<a><b>text</b>").is_err());
    }

    #[test]
    fn test_parse_bytes_rejects_invalid_utf8() {
        let err = parse_bytes(&[0x3c, 0x61, 0x3e, 0xff, 0x3c, 0x2f, 0x61, 0x3e]).unwrap_err();
        assert!(matches!(err, XmlError::InvalidUtf8(_)));
        assert!(err.is_parse_error());
    }

    #[test]
    fn test_parse_rejects_dtd() {
        let xml = r#"<?xml version="1.0"?><!DOCTYPE a [<!ENTITY x "boom">]><a>&x;</a>"#;
        assert!(parse(xml).is_err());
    }

    #[test]
    fn test_child_by_local_name_ignores_prefix() {
        let doc = parse(r#"<s:Envelope xmlns:s="urn:s"><s:Body/></s:Envelope>"#).unwrap();
        assert!(child_by_local_name(doc.root_element(), "Body").is_some());
        assert!(child_by_local_name(doc.root_element(), "Header").is_none());
    }
}
