use std::io::Read;
use std::sync::Arc;
use std::time::Duration;

use guild_soap::{Envelope, Transport, TransportError};
use tracing::{debug, error, info, instrument};
use typed_builder::TypedBuilder;
use url::Url;

/// Largest response body read from the service.
const MAX_RESPONSE_BYTES: u64 = 10 * 1024 * 1024;

#[derive(Debug, Clone, TypedBuilder)]
pub struct HttpTransportConfig {
    endpoint: Url,
    #[builder(default = Duration::from_secs(30))]
    connect_timeout: Duration,
    #[builder(default = Duration::from_secs(60))]
    read_timeout: Duration,
}

impl HttpTransportConfig {
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    pub fn connect_timeout(&self) -> Duration {
        self.connect_timeout
    }

    pub fn read_timeout(&self) -> Duration {
        self.read_timeout
    }
}

/// Blocking SOAP-over-HTTP transport. One POST per envelope.
pub struct UreqTransport {
    agent: ureq::Agent,
    config: HttpTransportConfig,
}

impl UreqTransport {
    pub fn new(config: HttpTransportConfig) -> anyhow::Result<Self> {
        let tls = native_tls::TlsConnector::new()?;
        let agent = ureq::AgentBuilder::new()
            .timeout_connect(config.connect_timeout)
            .timeout_read(config.read_timeout)
            .tls_connector(Arc::new(tls))
            .build();

        Ok(Self { agent, config })
    }
}

impl Transport for UreqTransport {
    #[instrument(
        name = "http_client.send",
        level = "info",
        skip_all,
        fields(url = %self.config.endpoint, action = envelope.action()),
        err
    )]
    fn send(&self, envelope: &Envelope) -> Result<Vec<u8>, TransportError> {
        info!("sending request");

        let response = self
            .agent
            .post(self.config.endpoint.as_str())
            .set("Content-Type", "text/xml; charset=utf-8")
            .set("SOAPAction", &format!("\"{}\"", envelope.action()))
            .send_bytes(envelope.as_bytes());

        match response {
            Ok(response) => {
                let status = response.status();
                let body = read_body(response)?;
                info!(status_code = status, response_body_length = body.len(), "response received");
                Ok(body)
            }
            Err(ureq::Error::Status(status, response)) => {
                // Faults come back as 500 with an envelope worth decoding.
                debug!(status, "received error status");
                let body = read_body(response).ok();
                Err(TransportError::Status { status, body })
            }
            Err(ureq::Error::Transport(transport)) => {
                error!(error = %transport, "request failed");
                Err(classify(&transport))
            }
        }
    }
}

fn read_body(response: ureq::Response) -> Result<Vec<u8>, TransportError> {
    read_capped(response.into_reader(), MAX_RESPONSE_BYTES)
}

// One byte past the limit tells an oversized body from one that fits exactly.
fn read_capped(reader: impl Read, limit: u64) -> Result<Vec<u8>, TransportError> {
    let mut body = Vec::new();
    reader
        .take(limit + 1)
        .read_to_end(&mut body)
        .map_err(|e| io_error(&e))?;

    if body.len() as u64 > limit {
        return Err(TransportError::Connection(format!(
            "response exceeds {limit} bytes"
        )));
    }
    Ok(body)
}

fn classify(transport: &ureq::Transport) -> TransportError {
    let timed_out = std::error::Error::source(transport)
        .and_then(|source| source.downcast_ref::<std::io::Error>())
        .is_some_and(is_timeout);

    if timed_out {
        TransportError::Timeout(transport.to_string())
    } else {
        TransportError::Connection(transport.to_string())
    }
}

fn io_error(error: &std::io::Error) -> TransportError {
    if is_timeout(error) {
        TransportError::Timeout(error.to_string())
    } else {
        TransportError::Connection(error.to_string())
    }
}

fn is_timeout(error: &std::io::Error) -> bool {
    matches!(
        error.kind(),
        std::io::ErrorKind::TimedOut | std::io::ErrorKind::WouldBlock
    )
}
