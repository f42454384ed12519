//! Periodic producers
//!
//! Two flavours share the same cadence logic:
//! - [`BurstProducerTask`] takes the serial guard and writes a burst of
//!   lines straight to the port, spinning between lines to simulate load.
//! - [`PeriodicSenderTask`] posts the same fixed message to the queue every
//!   period.

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_time::Ticker;

use crate::channels::MessageQueue;
use crate::config::{BurstProfile, TaskSpec};
use crate::guard::SharedResourceGuard;
use crate::serial::SerialPort;
use crate::stats::TaskCounters;
use crate::types::{Message, Timeout};

/// Burn CPU for `iterations` loop passes without yielding
#[inline(never)]
pub fn spin(iterations: u32) {
    let mut counter = 0u32;
    while core::hint::black_box(counter) < iterations {
        counter += 1;
    }
}

// ===================================================================
// Mutex Variant
// ===================================================================

/// Writes a bounded burst to the shared port once per period
pub struct BurstProducerTask<'a, M: RawMutex, S> {
    spec: TaskSpec,
    profile: BurstProfile,
    guard: &'a SharedResourceGuard<M, S>,
    counters: &'a TaskCounters,
    acquire_timeout: Timeout,
}

impl<'a, M, S> BurstProducerTask<'a, M, S>
where
    M: RawMutex,
    S: SerialPort,
{
    pub fn new(
        spec: TaskSpec,
        profile: BurstProfile,
        guard: &'a SharedResourceGuard<M, S>,
        counters: &'a TaskCounters,
    ) -> Self {
        Self {
            spec,
            profile,
            guard,
            counters,
            acquire_timeout: Timeout::Forever,
        }
    }

    /// Give up on a period if the port stays busy this long
    pub fn with_acquire_timeout(mut self, timeout: Timeout) -> Self {
        self.acquire_timeout = timeout;
        self
    }

    /// Run one burst. Returns false if the guard was not acquired and the
    /// period was skipped.
    pub async fn cycle(&mut self) -> bool {
        self.counters.record_cycle();

        let mut port = match self.guard.acquire(self.acquire_timeout).await {
            Ok(port) => port,
            Err(e) => {
                debug!("{}: {}, skipping burst", self.spec.name, e);
                self.counters.record_burst(false);
                return false;
            }
        };

        for _ in 0..self.profile.messages_per_cycle {
            spin(self.profile.cpu_load);
            port.write_message(&self.profile.message);
        }
        port.write_message(&self.profile.end_marker);
        self.guard.release(port);

        self.counters.record_burst(true);
        true
    }

    pub async fn run(mut self) -> ! {
        info!(
            "{} started (period {} ms, {} lines per burst)",
            self.spec.name, self.spec.period, self.profile.messages_per_cycle
        );
        let mut ticker = Ticker::every(self.spec.period());
        loop {
            self.cycle().await;
            ticker.next().await;
        }
    }
}

// ===================================================================
// Queue Variant
// ===================================================================

/// Enqueues one constant message per period
pub struct PeriodicSenderTask<'a, M: RawMutex, const N: usize> {
    spec: TaskSpec,
    message: Message,
    queue: &'a MessageQueue<M, N>,
    counters: &'a TaskCounters,
    send_timeout: Timeout,
}

impl<'a, M: RawMutex, const N: usize> PeriodicSenderTask<'a, M, N> {
    pub fn new(
        spec: TaskSpec,
        message: Message,
        queue: &'a MessageQueue<M, N>,
        counters: &'a TaskCounters,
    ) -> Self {
        Self {
            spec,
            message,
            queue,
            counters,
            send_timeout: Timeout::Forever,
        }
    }

    pub fn with_send_timeout(mut self, timeout: Timeout) -> Self {
        self.send_timeout = timeout;
        self
    }

    /// Post the message once; a full queue just skips this period
    pub async fn cycle(&mut self) -> bool {
        self.counters.record_cycle();
        let sent = self.queue.send(self.message, self.send_timeout).await.is_ok();
        self.counters.record_send(sent);
        if !sent {
            debug!("{}: queue full, message dropped", self.spec.name);
        }
        sent
    }

    pub async fn run(mut self) -> ! {
        info!("{} started (period {} ms)", self.spec.name, self.spec.period);
        let mut ticker = Ticker::every(self.spec.period());
        loop {
            self.cycle().await;
            ticker.next().await;
        }
    }
}
