//! Per-task activity counters
//!
//! Each task increments its own counters; the supervisor and tests only read
//! them. Relaxed ordering is enough since nothing else is synchronized
//! through these values.

use portable_atomic::{AtomicU32, Ordering};

/// Monotonic counters owned by a single task
#[derive(Debug, Default)]
pub struct TaskCounters {
    cycles: AtomicU32,
    sent: AtomicU32,
    send_failures: AtomicU32,
    received: AtomicU32,
    receive_timeouts: AtomicU32,
    bursts: AtomicU32,
    acquire_failures: AtomicU32,
}

/// Point-in-time copy of a task's counters
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CounterSnapshot {
    pub cycles: u32,
    pub sent: u32,
    pub send_failures: u32,
    pub received: u32,
    pub receive_timeouts: u32,
    pub bursts: u32,
    pub acquire_failures: u32,
}

impl TaskCounters {
    pub const fn new() -> Self {
        Self {
            cycles: AtomicU32::new(0),
            sent: AtomicU32::new(0),
            send_failures: AtomicU32::new(0),
            received: AtomicU32::new(0),
            receive_timeouts: AtomicU32::new(0),
            bursts: AtomicU32::new(0),
            acquire_failures: AtomicU32::new(0),
        }
    }

    pub(crate) fn record_cycle(&self) {
        self.cycles.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_send(&self, ok: bool) {
        if ok {
            self.sent.fetch_add(1, Ordering::Relaxed);
        } else {
            self.send_failures.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub(crate) fn record_receive(&self, ok: bool) {
        if ok {
            self.received.fetch_add(1, Ordering::Relaxed);
        } else {
            self.receive_timeouts.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub(crate) fn record_burst(&self, ok: bool) {
        if ok {
            self.bursts.fetch_add(1, Ordering::Relaxed);
        } else {
            self.acquire_failures.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Loop passes completed so far
    pub fn cycles(&self) -> u32 {
        self.cycles.load(Ordering::Relaxed)
    }

    pub fn snapshot(&self) -> CounterSnapshot {
        CounterSnapshot {
            cycles: self.cycles.load(Ordering::Relaxed),
            sent: self.sent.load(Ordering::Relaxed),
            send_failures: self.send_failures.load(Ordering::Relaxed),
            received: self.received.load(Ordering::Relaxed),
            receive_timeouts: self.receive_timeouts.load(Ordering::Relaxed),
            bursts: self.bursts.load(Ordering::Relaxed),
            acquire_failures: self.acquire_failures.load(Ordering::Relaxed),
        }
    }
}
