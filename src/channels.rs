//! Bounded inter-task message queue
//!
//! A fixed-capacity FIFO of message handles built on an Embassy channel.
//! Any number of producers may send; the application has exactly one
//! consumer. Sends on a full queue and receives on an empty queue wait up
//! to the caller's timeout instead of overwriting or returning garbage.

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::channel::{Channel, TrySendError};

use crate::error::Error;
use crate::types::{Message, Timeout};

/// FIFO of `T` holding at most `N` entries
pub struct BoundedQueue<M: RawMutex, T, const N: usize> {
    channel: Channel<M, T, N>,
}

/// Queue of message handles used between the button, producer and consumer tasks
pub type MessageQueue<M, const N: usize> = BoundedQueue<M, Message, N>;

impl<M: RawMutex, T, const N: usize> BoundedQueue<M, T, N> {
    /// Create an empty queue
    pub const fn new() -> Self {
        Self {
            channel: Channel::new(),
        }
    }

    /// Append `item`, waiting up to `timeout` for a free slot.
    ///
    /// On timeout the item is dropped and the queue is left untouched.
    pub async fn send(&self, item: T, timeout: Timeout) -> Result<(), Error> {
        timeout
            .bound(self.channel.send(item))
            .await
            .map_err(|_| Error::QueueFull)
    }

    /// Pop the oldest entry, waiting up to `timeout` for one to arrive
    pub async fn receive(&self, timeout: Timeout) -> Result<T, Error> {
        timeout
            .bound(self.channel.receive())
            .await
            .map_err(|_| Error::QueueEmpty)
    }

    /// Append without waiting; hands the item back if the queue is full
    pub fn try_send(&self, item: T) -> Result<(), (Error, T)> {
        self.channel.try_send(item).map_err(|e| match e {
            TrySendError::Full(item) => (Error::QueueFull, item),
        })
    }

    /// Pop without waiting
    pub fn try_receive(&self) -> Result<T, Error> {
        self.channel.try_receive().map_err(|_| Error::QueueEmpty)
    }

    pub fn len(&self) -> usize {
        self.channel.len()
    }

    pub fn is_empty(&self) -> bool {
        self.channel.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.channel.is_full()
    }

    pub const fn capacity(&self) -> usize {
        N
    }

    pub fn free_capacity(&self) -> usize {
        N - self.len()
    }
}

impl<M: RawMutex, T, const N: usize> Default for BoundedQueue<M, T, N> {
    fn default() -> Self {
        Self::new()
    }
}
