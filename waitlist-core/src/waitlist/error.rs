use thiserror::Error;

use super::party::PartyKey;

/// Queue-level errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueueError {
    #[error("Party already waiting: {0}")]
    DuplicateEntry(PartyKey),

    #[error("Party not in queue: {0}")]
    NotFound(PartyKey),

    #[error("Queue is empty")]
    EmptyQueue,
}

pub type QueueResult<T> = std::result::Result<T, QueueError>;
