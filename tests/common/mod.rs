//! Host-side stand-ins for the board services
#![allow(dead_code)]

use core::convert::Infallible;

use embedded_hal::digital::{self, ErrorKind, ErrorType, InputPin};
use uartsync::serial::SerialPort;

/// Input line that replays a fixed pattern, one level per read
pub struct ScriptedPin {
    levels: Vec<bool>,
    next: usize,
    cyclic: bool,
}

impl ScriptedPin {
    /// Replay `levels` once, then hold the last level
    pub fn once(levels: &[bool]) -> Self {
        Self {
            levels: levels.to_vec(),
            next: 0,
            cyclic: false,
        }
    }

    /// Low for `every` reads, then high for `every` reads, forever
    pub fn toggling(every: usize) -> Self {
        let mut levels = vec![false; every];
        levels.extend(std::iter::repeat(true).take(every));
        Self {
            levels,
            next: 0,
            cyclic: true,
        }
    }
}

impl ErrorType for ScriptedPin {
    type Error = Infallible;
}

impl InputPin for ScriptedPin {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        let index = if self.cyclic {
            self.next % self.levels.len()
        } else {
            self.next.min(self.levels.len() - 1)
        };
        self.next += 1;
        Ok(self.levels[index])
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        self.is_high().map(|high| !high)
    }
}

#[derive(Debug)]
pub struct ReadFault;

impl digital::Error for ReadFault {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Other
    }
}

/// Input line whose reads always fail
pub struct BrokenPin;

impl ErrorType for BrokenPin {
    type Error = ReadFault;
}

impl InputPin for BrokenPin {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Err(ReadFault)
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        Err(ReadFault)
    }
}

/// Serial port capturing everything written to it
#[derive(Debug, Default)]
pub struct RecordingPort {
    bytes: Vec<u8>,
}

impl RecordingPort {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> String {
        String::from_utf8(self.bytes.clone()).expect("port received non UTF-8 data")
    }

    /// Written lines without their terminators
    pub fn lines(&self) -> Vec<String> {
        self.text()
            .split_terminator('\n')
            .map(|line| line.trim_end_matches('\r').to_string())
            .collect()
    }
}

impl SerialPort for RecordingPort {
    fn write(&mut self, bytes: &[u8]) {
        self.bytes.extend_from_slice(bytes);
    }
}
