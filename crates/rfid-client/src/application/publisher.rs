//! Output port for received identifiers.

use thiserror::Error;

use crate::domain::RfidMessage;

/// Error type for publishing a message.
#[derive(Debug, Error)]
pub enum PublishError {
    #[error("failed to encode message: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("failed to write message: {0}")]
    Io(#[from] std::io::Error),
}

/// Receives every identifier the feed produces, in arrival order.
#[cfg_attr(test, mockall::automock)]
pub trait MessagePublisher {
    fn publish(&mut self, message: &RfidMessage) -> Result<(), PublishError>;
}
