//! Outbound document construction.
//!
//! Elements are assembled by value and written in one pass. Namespaces are
//! plain URLs, resolved to prefixes from the `xmlns` declarations in scope.
//! Text is escaped on the way out so callers can hand over raw strings, but
//! it must consist of characters XML 1.0 allows.
mod declaration;
mod document;
mod element;

use std::borrow::Cow;
use std::collections::HashMap;

pub use self::declaration::*;
pub use self::document::*;
pub use self::element::*;

/// Namespace URL to prefix; a `None` prefix is the default namespace.
pub type AliasMap<'a> = HashMap<&'a str, Option<&'a str>>;

#[derive(Debug, thiserror::Error)]
pub enum XmlBuilderError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("UTF-8 error: {0}")]
    Utf8Error(#[from] std::string::FromUtf8Error),
    #[error("Namespace '{ns}' not declared for tag '{tag}'")]
    NamespaceNotDeclared { tag: String, ns: String },
    #[error("Character U+{:04X} is not allowed in XML text of '{tag}'", u32::from(*character))]
    InvalidCharacter { tag: String, character: char },
}

pub trait NamespaceWrite<'a> {
    fn ns_write<W: std::io::Write>(
        &self,
        w: &mut W,
        aliases: Option<&AliasMap<'a>>,
    ) -> Result<(), XmlBuilderError>;
}

/// Escapes text for element content or attribute values.
///
/// A carriage return goes out as `&#13;`; a literal one would be turned into a
/// line feed by the reader.
pub fn escape(text: &str) -> Cow<'_, str> {
    let escaped = quick_xml::escape::escape(text);
    if escaped.contains('\r') {
        Cow::Owned(escaped.replace('\r', "&#13;"))
    } else {
        escaped
    }
}

/// True when `c` may appear in an XML 1.0 document.
pub fn is_xml_char(c: char) -> bool {
    matches!(c, '\t' | '\n' | '\r' | '\u{20}'..='\u{D7FF}' | '\u{E000}'..='\u{FFFD}' | '\u{10000}'..='\u{10FFFF}')
}
