//! Publisher that writes one JSON object per line.

use std::io::Write;

use crate::application::{MessagePublisher, PublishError};
use crate::domain::RfidMessage;

/// Writes each message as a JSON line and flushes it immediately, so a
/// downstream reader of a pipe sees every tag as it arrives.
#[derive(Debug)]
pub struct JsonLinesPublisher<W: Write> {
    writer: W,
}

impl<W: Write> JsonLinesPublisher<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> MessagePublisher for JsonLinesPublisher<W> {
    fn publish(&mut self, message: &RfidMessage) -> Result<(), PublishError> {
        serde_json::to_writer(&mut self.writer, message)?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;
        Ok(())
    }
}
