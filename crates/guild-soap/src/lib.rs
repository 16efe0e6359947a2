use std::borrow::Cow;

pub mod client;
pub mod element;
pub mod envelope;
pub mod extract;
pub mod model;
pub mod operation;
pub mod transport;

pub use client::GuildClient;
pub use element::Element;
pub use envelope::{Envelope, SoapFault};
pub use model::{ErrorKind, Guild, Member, OperationResult};
pub use operation::Operation;
pub use transport::{Transport, TransportError};

/// SOAP 1.1 envelope namespace.
pub const SOAP_ENVELOPE_NAMESPACE: &str = "http://schemas.xmlsoap.org/soap/envelope/";

/// Target namespace of the guild service.
pub const GUILD_NAMESPACE: &str = "http://ashennetwork.soap/guild";

#[derive(Debug, thiserror::Error)]
pub enum GuildError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(Cow<'static, str>),

    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    #[error("Malformed response: {0}")]
    MalformedResponse(Cow<'static, str>),

    #[error("XML error: {0}")]
    Xml(#[from] guild_xml::XmlError),

    #[error("Server fault: {0}")]
    ServerFault(SoapFault),
}

impl GuildError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidArgument(_) => ErrorKind::InvalidArgument,
            Self::Transport(_) => ErrorKind::TransportError,
            Self::MalformedResponse(_) => ErrorKind::MalformedResponse,
            Self::Xml(e) if e.is_parse_error() => ErrorKind::MalformedResponse,
            // An envelope that cannot be written comes from the arguments it was given.
            Self::Xml(_) => ErrorKind::InvalidArgument,
            Self::ServerFault(_) => ErrorKind::ServerFault,
        }
    }
}
