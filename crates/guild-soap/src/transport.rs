use crate::envelope::Envelope;

/// Request/response exchange with the guild service.
///
/// Implementations own timeouts and cancellation. Share one between threads
/// only if the implementation is itself safe for concurrent use.
pub trait Transport {
    /// Sends `envelope` and returns the raw response payload. Non-success
    /// statuses must be reported as [`TransportError::Status`].
    fn send(&self, envelope: &Envelope) -> Result<Vec<u8>, TransportError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn send(&self, envelope: &Envelope) -> Result<Vec<u8>, TransportError> {
        (**self).send(envelope)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    #[error("connection failed: {0}")]
    Connection(String),

    #[error("request timed out: {0}")]
    Timeout(String),

    #[error("unexpected HTTP status {status}")]
    Status {
        status: u16,
        /// Response payload, when one could be read.
        body: Option<Vec<u8>>,
    },
}
