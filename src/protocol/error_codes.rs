use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Room operation rejections surfaced to clients as short codes.
///
/// These are the only errors the protocol ever reports back; malformed input
/// and unknown relay targets are dropped without a reply, and nothing here is
/// fatal to the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(rename_all = "lowercase")]
pub enum RoomError {
    /// Join rejected: the room already holds the configured maximum.
    #[error("full")]
    Full,
    /// Create rejected: the requested name already has at least one member.
    #[error("taken")]
    Taken,
}
