//! Hardware abstraction and task bindings for the RP2040
//!
//! This module adapts the Pico's UART transmitter to [`SerialPort`] and
//! binds the generic task loops to concrete RP2040 types so the firmware
//! binaries can spawn them on Embassy executors.

use embassy_rp::gpio::{Input, Output};
use embassy_rp::uart::{self, Blocking, UartTx};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;

use crate::buttons::{EdgeDetectorTask, EdgeMessages};
use crate::channels::MessageQueue;
use crate::config::{self, BurstProfile, TaskSpec, QUEUE_LENGTH};
use crate::consumer::ConsumerTask;
use crate::guard::SharedResourceGuard;
use crate::producer::{BurstProducerTask, PeriodicSenderTask};
use crate::serial::SerialPort;
use crate::stats::TaskCounters;
use crate::supervisor::AppSupervisor;
use crate::types::{Message, Timeout};

/// Blocking UART0 transmitter
pub struct RpSerial {
    tx: UartTx<'static, Blocking>,
}

impl RpSerial {
    pub fn new(tx: UartTx<'static, Blocking>) -> Self {
        Self { tx }
    }
}

impl SerialPort for RpSerial {
    fn write(&mut self, bytes: &[u8]) {
        if let Err(e) = self.tx.blocking_write(bytes) {
            warn!("UART write failed: {:?}", e);
        }
    }
}

/// Serial port shared by the burst producers
pub type SerialGuard = SharedResourceGuard<CriticalSectionRawMutex, RpSerial>;

/// Queue between the button/producer tasks and the consumer
pub type AppQueue = MessageQueue<CriticalSectionRawMutex, QUEUE_LENGTH>;

/// UART settings for the output channel
pub fn serial_config() -> uart::Config {
    let mut config = uart::Config::default();
    config.baudrate = config::SERIAL_BAUD_RATE;
    config
}

// ===================================================================
// Task Bindings
// ===================================================================

#[embassy_executor::task(pool_size = 2)]
pub async fn burst_task(
    spec: TaskSpec,
    profile: BurstProfile,
    serial: &'static SerialGuard,
    counters: &'static TaskCounters,
) {
    BurstProducerTask::new(spec, profile, serial, counters)
        .run()
        .await
}

#[embassy_executor::task(pool_size = 2)]
pub async fn button_task(
    spec: TaskSpec,
    pin: Input<'static>,
    messages: EdgeMessages,
    queue: &'static AppQueue,
    counters: &'static TaskCounters,
) {
    EdgeDetectorTask::new(spec, pin, messages, queue, counters)
        .run()
        .await
}

#[embassy_executor::task]
pub async fn sender_task(
    spec: TaskSpec,
    message: Message,
    queue: &'static AppQueue,
    counters: &'static TaskCounters,
) {
    PeriodicSenderTask::new(spec, message, queue, counters)
        .run()
        .await
}

#[embassy_executor::task]
pub async fn consumer_task(
    queue: &'static AppQueue,
    serial: RpSerial,
    counters: &'static TaskCounters,
) {
    let timeout = Timeout::from(config::ticks(config::CONSUMER_RECEIVE_TIMEOUT));
    ConsumerTask::new(config::CONSUMER, queue, serial, counters, timeout)
        .run()
        .await
}

/// Supervisor check loop driving the status LED
#[embassy_executor::task]
pub async fn supervisor_task(mut supervisor: AppSupervisor<'static>, status_led: Output<'static>) {
    supervisor.run(status_led).await
}
