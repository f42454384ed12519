//! Common types and data structures used across the UartSync application
//!
//! This module contains the message handle passed between tasks, the
//! digital level and edge types, and the timeout policy shared by every
//! blocking primitive.

use core::future::Future;

use embassy_time::{with_timeout, Duration, TimeoutError};

/// Reference to an immutable, statically allocated text buffer
///
/// Queues and tasks copy the handle, never the text it points to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Message {
    text: &'static str,
}

impl Message {
    pub const fn new(text: &'static str) -> Self {
        Self { text }
    }

    pub const fn as_str(&self) -> &'static str {
        self.text
    }

    pub const fn as_bytes(&self) -> &'static [u8] {
        self.text.as_bytes()
    }

    /// Byte length written to the output channel
    pub const fn len(&self) -> usize {
        self.text.len()
    }

    pub const fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// True if both handles point at the same buffer
    pub fn same_buffer(&self, other: &Message) -> bool {
        core::ptr::eq(self.text.as_ptr(), other.text.as_ptr()) && self.len() == other.len()
    }
}

/// Sampled level of a digital input line
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Level {
    Low,
    High,
}

impl From<bool> for Level {
    fn from(high: bool) -> Self {
        if high {
            Level::High
        } else {
            Level::Low
        }
    }
}

/// Transition between two consecutive samples
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Edge {
    /// Low to high
    Rising,
    /// High to low
    Falling,
}

/// How long a blocking call may wait before giving up
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Timeout {
    /// Block until the operation completes
    Forever,
    /// Give up after the given duration; zero means a single attempt
    After(Duration),
}

impl Timeout {
    pub const fn millis(ms: u64) -> Self {
        Timeout::After(Duration::from_millis(ms))
    }

    /// Await `fut`, giving up once the timeout elapses
    pub(crate) async fn bound<F: Future>(self, fut: F) -> Result<F::Output, TimeoutError> {
        match self {
            Timeout::Forever => Ok(fut.await),
            Timeout::After(limit) => with_timeout(limit, fut).await,
        }
    }
}

impl From<Duration> for Timeout {
    fn from(duration: Duration) -> Self {
        Timeout::After(duration)
    }
}

/// Which of the two application variants is running
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AppVariant {
    /// Periodic producers share the UART through a mutex
    MutexBurst,
    /// Buttons and a producer feed a single UART consumer through a queue
    MessageQueue,
}

impl AppVariant {
    pub fn name(&self) -> &'static str {
        match self {
            AppVariant::MutexBurst => "Mutex burst",
            AppVariant::MessageQueue => "Message queue",
        }
    }
}

/// Current application version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    static SHARED: &str = "shared\n";

    #[test]
    fn message_is_a_handle_not_a_copy() {
        let a = Message::new(SHARED);
        let b = a;
        assert!(a.same_buffer(&b));
        assert_eq!(b.as_bytes().as_ptr(), SHARED.as_ptr());
        assert_eq!(b.len(), 7);
    }

    #[test]
    fn level_from_pin_state() {
        assert_eq!(Level::from(true), Level::High);
        assert_eq!(Level::from(false), Level::Low);
    }
}
