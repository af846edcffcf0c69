//! The record published for every tag read.

use serde::{Deserialize, Serialize};

/// One identifier received from the bridge, with its context.
///
/// Serialized field names follow the consumer-facing event keys
/// (`count`, `date`, `message`, `uid`, `groupUid`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RfidMessage {
    /// Running count of identifiers received by this client, starting at 1.
    pub count: u64,
    /// Receive time in milliseconds since the Unix epoch.
    pub date: u64,
    /// The identifier text, possibly empty.
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_uid: Option<String>,
}
