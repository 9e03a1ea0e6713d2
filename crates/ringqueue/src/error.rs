//! Error types for queue operations.

use thiserror::Error;

/// Errors returned by `RingQueue` operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum QueueError {
    /// `front`, `front_mut` or `pop` was called on a queue with no elements.
    #[error("queue is empty")]
    Empty,
}

impl QueueError {
    /// Returns `true` if the caller can retry after changing the queue's state
    /// (e.g. pushing an element).
    #[inline]
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::Empty)
    }
}
