//! UartSync - Task synchronization demo for RP2040
//!
//! This library provides the task logic for two small firmware variants
//! built on the Embassy async framework.
//!
//! ## Variants
//! - **Mutex burst**: two periodic producers share UART0 through a mutex;
//!   each writes a bounded burst of lines while holding it.
//! - **Message queue**: two button edge detectors and a periodic producer
//!   post message handles to a bounded queue drained by a single consumer
//!   that owns UART0.
//!
//! ## Architecture
//! - **Async**: every task is a `cycle()` plus a `Ticker`-paced `run()` loop
//! - **Ownership**: guard, queue and counters are created once at startup and
//!   handed to tasks by reference
//! - **Portability**: task logic is generic over `embedded-hal` pins and the
//!   [`serial::SerialPort`] trait, board bindings live behind the `rp2040` feature

#![cfg_attr(not(test), no_std)]

// Must come first so the logging macros are visible to every module
#[macro_use]
mod fmt;

pub mod buttons;
pub mod channels;
pub mod config;
pub mod consumer;
pub mod error;
pub mod guard;
pub mod producer;
pub mod serial;
pub mod stats;
pub mod supervisor;
pub mod types;

#[cfg(feature = "rp2040")]
pub mod hardware;

pub use error::Error;
