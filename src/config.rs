//! Application configuration for UartSync
//! RP2040 (Raspberry Pi Pico) task synchronization demo

use embassy_time::Duration;

use crate::types::Message;

// ===================================================================
// Timing
// ===================================================================

/// Length of one scheduler time unit in milliseconds
pub const TICK_MS: u64 = 1;

/// Convert a number of time units into an embassy duration
pub const fn ticks(units: u64) -> Duration {
    Duration::from_millis(units * TICK_MS)
}

// ===================================================================
// Task Descriptors
// ===================================================================

/// Static description of a periodic task
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskSpec {
    /// Human readable task name (logging only)
    pub name: &'static str,
    /// Time units between successive invocations
    pub period: u64,
    /// Static priority, higher runs first
    pub priority: u8,
}

impl TaskSpec {
    pub const fn new(name: &'static str, period: u64, priority: u8) -> Self {
        Self {
            name,
            period,
            priority,
        }
    }

    pub const fn period(&self) -> Duration {
        ticks(self.period)
    }
}

/// Burst parameters for the mutex variant producers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BurstProfile {
    /// Lines written per burst
    pub messages_per_cycle: usize,
    /// Busy-wait iterations before each line
    pub cpu_load: u32,
    /// Line written on every iteration
    pub message: Message,
    /// Marker written once after the burst
    pub end_marker: Message,
}

// ===================================================================
// Mutex Variant (shared UART guarded by a mutex)
// ===================================================================

pub const MESSAGES_PER_CYCLE: usize = 10;
pub const TASK_1_CPU_LOAD: u32 = 5_000;
pub const TASK_2_CPU_LOAD: u32 = 100_000;

pub const TASK_1: TaskSpec = TaskSpec::new("task1_100_ms", 100, 2);
pub const TASK_2: TaskSpec = TaskSpec::new("task2_500_ms", 500, 1);

pub const TASK_1_BURST: BurstProfile = BurstProfile {
    messages_per_cycle: MESSAGES_PER_CYCLE,
    cpu_load: TASK_1_CPU_LOAD,
    message: Message::new("task1 message 100 ms\n"),
    end_marker: Message::new("-----endtask1-----\n"),
};

pub const TASK_2_BURST: BurstProfile = BurstProfile {
    messages_per_cycle: MESSAGES_PER_CYCLE,
    cpu_load: TASK_2_CPU_LOAD,
    message: Message::new("task2 message 500 ms\n"),
    end_marker: Message::new("-----endtask2-----\n"),
};

// ===================================================================
// Queue Variant (buttons and producer feeding one consumer)
// ===================================================================

pub const QUEUE_LENGTH: usize = 10;

pub const BUTTON_1: TaskSpec = TaskSpec::new("task1_btn1", 30, 1);
pub const BUTTON_2: TaskSpec = TaskSpec::new("task2_btn2", 30, 1);
pub const PRODUCER: TaskSpec = TaskSpec::new("task3_100_ms", 100, 1);
pub const CONSUMER: TaskSpec = TaskSpec::new("task4_consumer", 20, 1);

/// How long the consumer waits for a message each period
pub const CONSUMER_RECEIVE_TIMEOUT: u64 = 10;

pub const BUTTON_1_RISING: Message = Message::new("-Button 1 Rising Event \r\n");
pub const BUTTON_1_FALLING: Message = Message::new("-Button 1 Falling Event\r\n");
pub const BUTTON_2_RISING: Message = Message::new("-Button 2 Rising Event \r\n");
pub const BUTTON_2_FALLING: Message = Message::new("-Button 2 Falling Event\r\n");
pub const PRODUCER_MESSAGE: Message = Message::new("-task3 message 100 ms  \r\n");

// ===================================================================
// Supervisor
// ===================================================================

/// Check cadence and LED rates of the supervisor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SupervisorProfile {
    /// Time units between liveness checks, also the healthy LED toggle period
    pub check_period: u64,
    /// LED toggle period once a stall was seen
    pub error_flash_period: u64,
}

impl SupervisorProfile {
    pub const fn new(check_period: u64, error_flash_period: u64) -> Self {
        Self {
            check_period,
            error_flash_period,
        }
    }
}

pub const SUPERVISOR_CHECK_PERIOD: u64 = 3_000;
pub const SUPERVISOR_ERROR_FLASH_PERIOD: u64 = 500;

pub const SUPERVISOR: SupervisorProfile =
    SupervisorProfile::new(SUPERVISOR_CHECK_PERIOD, SUPERVISOR_ERROR_FLASH_PERIOD);

/// Upper bound on tasks the supervisor can watch
pub const MAX_WATCHED_TASKS: usize = 8;

// ===================================================================
// GPIO Pin Assignments - Raspberry Pi Pico
// ===================================================================

pub const UART_TX_PIN: u8 = 0; // UART0 TX
pub const BUTTON_1_PIN: u8 = 2; // Active high, pulled down
pub const BUTTON_2_PIN: u8 = 3; // Active high, pulled down
pub const LED_STATUS_PIN: u8 = 25; // Built-in LED on Pico

pub const SERIAL_BAUD_RATE: u32 = 115_200;
