//! Output channel abstraction
//!
//! The tasks only ever push bytes at the serial port and never look at a
//! result, so the trait is a single infallible `write`. Board code adapts
//! the real UART transmitter to it.

use crate::types::Message;

/// Byte sink shared by the producers (mutex variant) or owned by the
/// consumer (queue variant)
pub trait SerialPort {
    /// Push `bytes` out of the port. Failures are handled by the port.
    fn write(&mut self, bytes: &[u8]);

    /// Write the full contents of a message buffer
    fn write_message(&mut self, message: &Message) {
        self.write(message.as_bytes());
    }
}

impl<T: SerialPort + ?Sized> SerialPort for &mut T {
    fn write(&mut self, bytes: &[u8]) {
        (**self).write(bytes);
    }
}

/// Port that drops everything written to it
#[derive(Debug, Default, Clone, Copy)]
pub struct NullPort;

impl SerialPort for NullPort {
    fn write(&mut self, _bytes: &[u8]) {}
}

/// Fixed-capacity in-memory port, useful for loopback checks on target
#[derive(Debug, Default)]
pub struct BufferPort<const N: usize> {
    buffer: heapless::Vec<u8, N>,
    overflowed: bool,
}

impl<const N: usize> BufferPort<N> {
    pub const fn new() -> Self {
        Self {
            buffer: heapless::Vec::new(),
            overflowed: false,
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer
    }

    /// True once a write no longer fit and was truncated
    pub fn overflowed(&self) -> bool {
        self.overflowed
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
        self.overflowed = false;
    }
}

impl<const N: usize> SerialPort for BufferPort<N> {
    fn write(&mut self, bytes: &[u8]) {
        let room = N - self.buffer.len();
        let take = bytes.len().min(room);
        // Cannot fail: `take` never exceeds the remaining capacity
        let _ = self.buffer.extend_from_slice(&bytes[..take]);
        if take < bytes.len() {
            self.overflowed = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buffer_port_truncates_and_flags_overflow() {
        let mut port = BufferPort::<8>::new();
        port.write(b"abcd");
        assert!(!port.overflowed());
        port.write_message(&Message::new("efghij"));
        assert_eq!(port.as_bytes(), b"abcdefgh");
        assert!(port.overflowed());

        port.clear();
        assert!(port.as_bytes().is_empty());
    }

    #[test]
    fn mutable_reference_forwards_writes() {
        fn emit<S: SerialPort>(mut port: S) {
            port.write(b"xy");
        }

        let mut port = BufferPort::<16>::new();
        emit(&mut port);
        assert_eq!(port.as_bytes(), b"xy");
    }
}
