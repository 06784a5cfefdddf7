use crate::domain::webhook::WebhookResponse;
use crate::error::Result;
use std::io::Write;

/// Writes response envelopes as one JSON document per line.
pub struct ResponseWriter<W: Write> {
    writer: W,
}

impl<W: Write> ResponseWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn write_response(&mut self, response: &WebhookResponse) -> Result<()> {
        serde_json::to_writer(&mut self.writer, response)?;
        writeln!(self.writer)?;
        self.writer.flush()?;
        Ok(())
    }
}
