use core::fmt;

/// Failures reported by the synchronization primitives.
///
/// None of these are fatal: the calling task skips the work for the
/// current period and tries again on the next one.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// The shared resource guard could not be acquired in time.
    ResourceUnavailable,
    /// No free slot appeared in the queue before the timeout.
    QueueFull,
    /// No message arrived before the timeout.
    QueueEmpty,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::ResourceUnavailable => f.write_str("shared resource unavailable"),
            Error::QueueFull => f.write_str("queue full"),
            Error::QueueEmpty => f.write_str("queue empty"),
        }
    }
}
