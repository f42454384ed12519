//! Application supervisor and monitoring
//!
//! The supervisor prints the startup banner and runs the check loop: every
//! check period it verifies that each watched task completed at least one
//! cycle since the previous check. The status LED blinks slowly while all
//! tasks are alive and fast once any task was seen stalled.

use embassy_time::{Instant, Timer};
use embedded_hal::digital::{OutputPin, PinState};
use heapless::Vec;

use crate::config::{self, SupervisorProfile, TaskSpec, MAX_WATCHED_TASKS};
use crate::stats::TaskCounters;
use crate::types::{AppVariant, APP_VERSION};

/// Result of a liveness check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Health {
    Healthy,
    /// First task found without progress
    Stalled(&'static str),
}

struct Watched<'a> {
    name: &'static str,
    counters: &'a TaskCounters,
    last_cycles: u32,
}

/// Application supervisor responsible for monitoring and lifecycle management
pub struct AppSupervisor<'a> {
    variant: AppVariant,
    tasks: &'static [TaskSpec],
    profile: SupervisorProfile,
    watched: Vec<Watched<'a>, MAX_WATCHED_TASKS>,
    stalled: Option<&'static str>,
}

impl<'a> AppSupervisor<'a> {
    /// Create a supervisor for a variant, its task table and check cadence
    pub fn new(
        variant: AppVariant,
        tasks: &'static [TaskSpec],
        profile: SupervisorProfile,
    ) -> Self {
        Self {
            variant,
            tasks,
            profile,
            watched: Vec::new(),
            stalled: None,
        }
    }

    /// Register a task for liveness checks. Returns false if the watch list is full.
    pub fn watch(&mut self, name: &'static str, counters: &'a TaskCounters) -> bool {
        let last_cycles = counters.cycles();
        self.watched
            .push(Watched {
                name,
                counters,
                last_cycles,
            })
            .is_ok()
    }

    /// Print application startup banner with the task table
    pub fn print_startup_banner(&self) {
        info!("========================================");
        info!("UartSync v{}", APP_VERSION);
        info!("Variant: {}", self.variant.name());
        info!("========================================");
        info!("Hardware: RP2040 (Raspberry Pi Pico)");
        info!("Serial: UART0 @ {} baud", config::SERIAL_BAUD_RATE);
        for task in self.tasks {
            info!(
                "Task {}: period {} ms, priority {}",
                task.name, task.period, task.priority
            );
        }
        info!("========================================");
    }

    /// Print successful initialization message
    pub fn print_init_success(&self) {
        info!(
            "UartSync initialized successfully ({} tasks watched)",
            self.watched.len()
        );
    }

    /// Compare every watched task against the previous check.
    ///
    /// A stall is sticky: once reported, later checks keep reporting it.
    pub fn check(&mut self) -> Health {
        for task in self.watched.iter_mut() {
            let cycles = task.counters.cycles();
            if cycles == task.last_cycles && self.stalled.is_none() {
                self.stalled = Some(task.name);
            }
            task.last_cycles = cycles;
        }

        match self.stalled {
            Some(name) => Health::Stalled(name),
            None => Health::Healthy,
        }
    }

    pub fn health(&self) -> Health {
        match self.stalled {
            Some(name) => Health::Stalled(name),
            None => Health::Healthy,
        }
    }

    /// Run the check loop, toggling `led` at the rate matching the current health
    pub async fn run<L: OutputPin>(&mut self, mut led: L) -> ! {
        info!("Application supervisor started");

        let mut led_on = false;
        let mut since_check = 0u64;
        loop {
            let flash = match self.stalled {
                Some(_) => self.profile.error_flash_period,
                None => self.profile.check_period,
            };
            Timer::after(config::ticks(flash)).await;
            since_check += flash;

            if since_check >= self.profile.check_period {
                since_check = 0;
                let was_healthy = self.stalled.is_none();
                if let Health::Stalled(name) = self.check() {
                    if was_healthy {
                        error!("Supervisor: task {} made no progress", name);
                    }
                }
                self.print_status();
            }

            led_on = !led_on;
            let _ = led.set_state(PinState::from(led_on));
        }
    }

    fn print_status(&self) {
        debug!("Status: uptime {} s", Instant::now().as_secs());
        for task in self.watched.iter() {
            let snap = task.counters.snapshot();
            debug!(
                "  {}: cycles={} sent={} received={} bursts={}",
                task.name, snap.cycles, snap.sent, snap.received, snap.bursts
            );
        }
    }
}
