//! Button edge detection
//!
//! Each monitored input line gets its own task. The task samples the line
//! once per period, and every low/high transition becomes one message in the
//! shared queue. There is no debounce filter beyond the sampling period.

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_time::Ticker;
use embedded_hal::digital::InputPin;

use crate::channels::MessageQueue;
use crate::config::TaskSpec;
use crate::stats::TaskCounters;
use crate::types::{Edge, Level, Message, Timeout};

// ===================================================================
// Edge State Machine
// ===================================================================

/// When the detector latches a transition relative to its enqueue
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CommitPolicy {
    /// Latch the new level even if the event could not be queued.
    /// A failed send loses that edge, the latch stays in step with the line.
    #[default]
    Always,
    /// Latch only after the event was queued. A failed send is detected
    /// again on the next sample, while edges in between may be missed.
    OnDelivery,
}

/// Two-state latch tracking the last committed level of one line
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EdgeDetector {
    latched: Level,
}

impl EdgeDetector {
    /// Start in the low state
    pub const fn new() -> Self {
        Self {
            latched: Level::Low,
        }
    }

    pub fn level(&self) -> Level {
        self.latched
    }

    /// Compare a sample with the latch without changing it
    pub fn sample(&self, input: Level) -> Option<Edge> {
        match (self.latched, input) {
            (Level::Low, Level::High) => Some(Edge::Rising),
            (Level::High, Level::Low) => Some(Edge::Falling),
            _ => None,
        }
    }

    /// Latch the level an edge leads to
    pub fn commit(&mut self, edge: Edge) {
        self.latched = match edge {
            Edge::Rising => Level::High,
            Edge::Falling => Level::Low,
        };
    }
}

impl Default for EdgeDetector {
    fn default() -> Self {
        Self::new()
    }
}

/// Messages emitted for one input line
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EdgeMessages {
    pub rising: Message,
    pub falling: Message,
}

impl EdgeMessages {
    pub const fn new(rising: Message, falling: Message) -> Self {
        Self { rising, falling }
    }

    pub fn for_edge(&self, edge: Edge) -> Message {
        match edge {
            Edge::Rising => self.rising,
            Edge::Falling => self.falling,
        }
    }
}

// ===================================================================
// Edge Detector Task
// ===================================================================

/// Periodic sampler for one input line feeding the message queue
pub struct EdgeDetectorTask<'a, P, M: RawMutex, const N: usize> {
    spec: TaskSpec,
    pin: P,
    messages: EdgeMessages,
    detector: EdgeDetector,
    queue: &'a MessageQueue<M, N>,
    counters: &'a TaskCounters,
    send_timeout: Timeout,
    policy: CommitPolicy,
}

impl<'a, P, M, const N: usize> EdgeDetectorTask<'a, P, M, N>
where
    P: InputPin,
    M: RawMutex,
{
    pub fn new(
        spec: TaskSpec,
        pin: P,
        messages: EdgeMessages,
        queue: &'a MessageQueue<M, N>,
        counters: &'a TaskCounters,
    ) -> Self {
        Self {
            spec,
            pin,
            messages,
            detector: EdgeDetector::new(),
            queue,
            counters,
            send_timeout: Timeout::Forever,
            policy: CommitPolicy::default(),
        }
    }

    /// Bound how long an edge event may wait for queue space
    pub fn with_send_timeout(mut self, timeout: Timeout) -> Self {
        self.send_timeout = timeout;
        self
    }

    pub fn with_commit_policy(mut self, policy: CommitPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn level(&self) -> Level {
        self.detector.level()
    }

    /// Sample the line once and emit at most one event.
    ///
    /// Returns the edge that was detected this cycle, whether or not it
    /// made it into the queue.
    pub async fn cycle(&mut self) -> Option<Edge> {
        self.counters.record_cycle();

        let input = match self.pin.is_high() {
            Ok(high) => Level::from(high),
            Err(_) => {
                warn!("{}: input read failed, skipping sample", self.spec.name);
                return None;
            }
        };

        let edge = self.detector.sample(input)?;
        let message = self.messages.for_edge(edge);
        let delivered = self.queue.send(message, self.send_timeout).await.is_ok();
        self.counters.record_send(delivered);

        if delivered {
            trace!("{}: queued {}", self.spec.name, message.as_str());
        } else {
            debug!("{}: queue full, edge event dropped", self.spec.name);
        }

        if delivered || self.policy == CommitPolicy::Always {
            self.detector.commit(edge);
        }

        Some(edge)
    }

    /// Sample forever at the task's period
    pub async fn run(mut self) -> ! {
        info!("{} started (period {} ms)", self.spec.name, self.spec.period);
        let mut ticker = Ticker::every(self.spec.period());
        loop {
            self.cycle().await;
            ticker.next().await;
        }
    }
}
