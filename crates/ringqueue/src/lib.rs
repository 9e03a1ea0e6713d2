//! RingQueue - Growable Circular-Buffer FIFO Queue
//!
//! A single-threaded FIFO queue stored in one contiguous ring buffer. When a
//! push finds the buffer full, the queue reallocates to `capacity * growth_factor`
//! slots and relocates the live elements in FIFO order, so a wrapped buffer
//! survives the resize intact.
//!
//! # Key Features
//!
//! - Amortized O(1) push (geometric growth), O(1) pop/front/swap
//! - Capacity never shrinks; steady push/pop traffic never reallocates
//! - Empty-queue access is a checked `QueueError::Empty`, never UB
//! - Deep `Clone` that preserves physical layout, O(1) `take` and `swap`
//! - Optional push/pop/grow counters via [`Config::enable_metrics`]
//!
//! # Example
//!
//! ```
//! use ringqueue_rs::{QueueError, RingQueue};
//!
//! let mut queue = RingQueue::new();
//! for i in 0..100 {
//!     queue.push(i);
//! }
//! assert_eq!(queue.len(), 100);
//! assert_eq!(queue.capacity(), 128);
//!
//! assert_eq!(queue.front(), Ok(&0));
//! assert_eq!(queue.pop(), Ok(0));
//!
//! let rest: Vec<i32> = queue.into_iter().collect();
//! assert_eq!(rest, (1..100).collect::<Vec<_>>());
//!
//! let mut empty = RingQueue::<i32>::new();
//! assert_eq!(empty.pop(), Err(QueueError::Empty));
//! ```

mod config;
mod error;
mod invariants;
mod iter;
mod metrics;
mod ring;

pub use config::{
    Config, DEFAULT_CONFIG, HIGH_THROUGHPUT_CONFIG, INSTRUMENTED_CONFIG, MIN_CAPACITY,
    MIN_GROWTH_FACTOR,
};
pub use error::QueueError;
pub use iter::{IntoIter, Iter};
pub use metrics::Metrics;
pub use ring::RingQueue;
