#![allow(dead_code)]

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use guild_soap::{Envelope, Transport, TransportError};

pub fn fixture(name: &str) -> Vec<u8> {
    let path = format!("tests/resources/{name}");
    std::fs::read(&path).unwrap_or_else(|e| panic!("Failed to read {path}: {e}"))
}

/// Answers every request with the same canned response and records what was sent.
pub struct RecordingTransport {
    response: Result<Vec<u8>, TransportError>,
    calls: AtomicUsize,
    sent: Mutex<Vec<Envelope>>,
}

impl RecordingTransport {
    pub fn replying(payload: Vec<u8>) -> Self {
        Self::new(Ok(payload))
    }

    pub fn replying_fixture(name: &str) -> Self {
        Self::replying(fixture(name))
    }

    pub fn failing(error: TransportError) -> Self {
        Self::new(Err(error))
    }

    fn new(response: Result<Vec<u8>, TransportError>) -> Self {
        Self {
            response,
            calls: AtomicUsize::new(0),
            sent: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_sent(&self) -> Option<Envelope> {
        self.sent.lock().unwrap().last().cloned()
    }
}

impl Transport for RecordingTransport {
    fn send(&self, envelope: &Envelope) -> Result<Vec<u8>, TransportError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.sent.lock().unwrap().push(envelope.clone());
        self.response.clone()
    }
}
