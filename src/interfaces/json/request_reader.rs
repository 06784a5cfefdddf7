use crate::domain::webhook::WebhookRequest;
use crate::error::Result;
use std::io::Read;

/// Reads a request envelope (`{"body": "..."}`) from a JSON source.
pub struct RequestReader<R: Read> {
    source: R,
}

impl<R: Read> RequestReader<R> {
    /// Creates a new `RequestReader` from any `Read` source (e.g., File, Stdin).
    pub fn new(source: R) -> Self {
        Self { source }
    }

    pub fn read(self) -> Result<WebhookRequest> {
        Ok(serde_json::from_reader(self.source)?)
    }
}
