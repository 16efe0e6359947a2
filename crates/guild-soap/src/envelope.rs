use std::fmt;

use guild_xml::{
    XmlError,
    builder::{Builder, Declaration, Element as XmlElement},
    parser::{self, child_by_local_name},
};
use tracing::{debug, trace};

use crate::{
    GUILD_NAMESPACE, GuildError, SOAP_ENVELOPE_NAMESPACE, element::Element, extract,
    operation::Operation,
};

/// A serialized request, ready for a [`crate::Transport`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Envelope {
    action: String,
    body: String,
}

impl Envelope {
    /// Builds the SOAP 1.1 envelope for `operation`.
    ///
    /// The operation tag declares the guild namespace as its default namespace,
    /// so argument tags go out unprefixed, one per argument, in binding order.
    pub fn encode(operation: &Operation) -> Result<Self, GuildError> {
        let arguments = operation.arguments();
        let call = XmlElement::new(operation.name())
            .set_namespace(GUILD_NAMESPACE)
            .add_namespace_declaration(GUILD_NAMESPACE, None)
            .add_children(arguments.into_iter().map(|(tag, value)| {
                XmlElement::new(tag)
                    .set_namespace(GUILD_NAMESPACE)
                    .set_text(value)
            }));

        let envelope = XmlElement::new("Envelope")
            .set_namespace(SOAP_ENVELOPE_NAMESPACE)
            .add_namespace_declaration(SOAP_ENVELOPE_NAMESPACE, Some("soap"))
            .add_child(
                XmlElement::new("Body")
                    .set_namespace(SOAP_ENVELOPE_NAMESPACE)
                    .add_child(call),
            );

        let body = Builder::new(Some(Declaration::new("1.0", "UTF-8")), envelope)
            .to_xml_string()
            .map_err(XmlError::from)?;

        trace!(operation = operation.name(), %body, "encoded envelope");

        Ok(Self {
            action: format!("{GUILD_NAMESPACE}/{}", operation.name()),
            body,
        })
    }

    /// Value for the SOAPAction HTTP header.
    pub fn action(&self) -> &str {
        &self.action
    }

    pub fn as_str(&self) -> &str {
        &self.body
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.body.as_bytes()
    }
}

/// Decodes a response payload down to its SOAP body.
///
/// The returned element is tagged `Body` and holds the body's child elements.
/// Anything around `Envelope/Body`, such as a `Header`, is ignored.
pub fn decode(payload: &[u8]) -> Result<Element, GuildError> {
    let document = parser::parse_bytes(payload)?;
    let root = document.root_element();

    if root.tag_name().name() != "Envelope" {
        return Err(XmlError::XmlInvalidTag {
            expected: "Envelope".to_string(),
            found: root.tag_name().name().to_string(),
        }
        .into());
    }

    let body = child_by_local_name(root, "Body")
        .ok_or_else(|| XmlError::MissingElement("Envelope/Body".to_string()))?;

    let body = Element::from_node(body)?;
    debug!(children = body.children().len(), "decoded response body");

    Ok(body)
}

/// A `Fault` returned in place of an operation response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SoapFault {
    pub code: String,
    pub message: String,
}

impl SoapFault {
    /// Reads a fault from a decoded body, if the body carries one.
    ///
    /// SOAP 1.1 puts the message in `faultstring`; SOAP 1.2 in `Reason/Text`.
    pub fn from_body(body: &Element) -> Option<Self> {
        let fault = body.children().first().filter(|child| child.tag() == "Fault")?;

        let code = extract::extract_scalar(fault, "faultcode")
            .or_else(|| extract::extract_scalar(fault, "Value"))
            .unwrap_or_default()
            .trim()
            .to_string();
        let message = extract::extract_scalar(fault, "faultstring")
            .or_else(|| extract::extract_scalar(fault, "Text"))
            .map(str::trim)
            .filter(|message| !message.is_empty())
            .map_or_else(|| code.clone(), str::to_string);

        Some(Self { code, message })
    }
}

impl fmt::Display for SoapFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.code.is_empty() {
            write!(f, "{}", self.message)
        } else {
            write!(f, "{}: {}", self.code, self.message)
        }
    }
}
