//! Queue consumer
//!
//! Sole owner of the serial port in the queue variant. Each period it waits
//! briefly for one message and forwards it; an empty queue just ends the
//! period.

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_time::Ticker;

use crate::channels::MessageQueue;
use crate::config::TaskSpec;
use crate::serial::SerialPort;
use crate::stats::TaskCounters;
use crate::types::{Message, Timeout};

pub struct ConsumerTask<'a, M: RawMutex, S, const N: usize> {
    spec: TaskSpec,
    queue: &'a MessageQueue<M, N>,
    port: S,
    counters: &'a TaskCounters,
    receive_timeout: Timeout,
}

impl<'a, M, S, const N: usize> ConsumerTask<'a, M, S, N>
where
    M: RawMutex,
    S: SerialPort,
{
    pub fn new(
        spec: TaskSpec,
        queue: &'a MessageQueue<M, N>,
        port: S,
        counters: &'a TaskCounters,
        receive_timeout: Timeout,
    ) -> Self {
        Self {
            spec,
            queue,
            port,
            counters,
            receive_timeout,
        }
    }

    /// Forward at most one message to the port
    pub async fn cycle(&mut self) -> Option<Message> {
        self.counters.record_cycle();
        match self.queue.receive(self.receive_timeout).await {
            Ok(message) => {
                self.port.write_message(&message);
                self.counters.record_receive(true);
                Some(message)
            }
            Err(_) => {
                self.counters.record_receive(false);
                None
            }
        }
    }

    pub async fn run(mut self) -> ! {
        info!("{} started (period {} ms)", self.spec.name, self.spec.period);
        let mut ticker = Ticker::every(self.spec.period());
        loop {
            self.cycle().await;
            ticker.next().await;
        }
    }

    pub fn into_port(self) -> S {
        self.port
    }
}
