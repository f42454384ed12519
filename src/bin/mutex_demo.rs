//! UartSync - Mutex Burst Firmware
//!
//! Two periodic tasks share UART0 through a mutex:
//! - task1: every 100 ms, priority 2 (interrupt executor)
//! - task2: every 500 ms, priority 1 (thread executor)
//!
//! Each burst is ten lines followed by an end marker and is never
//! interleaved with the other task's burst.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::{Executor, InterruptExecutor};
use embassy_rp::gpio::{Level, Output};
use embassy_rp::interrupt;
use embassy_rp::interrupt::{InterruptExt, Priority};
use embassy_rp::uart::UartTx;
use panic_halt as _;
use defmt_rtt as _;
use static_cell::StaticCell;

use uartsync::config::{self, TaskSpec};
use uartsync::hardware::{self, RpSerial, SerialGuard};
use uartsync::stats::TaskCounters;
use uartsync::supervisor::AppSupervisor;
use uartsync::types::AppVariant;

static TASKS: [TaskSpec; 2] = [config::TASK_1, config::TASK_2];

// Supervisor runs above both producers, task1 above task2
static EXECUTOR_SUPERVISOR: InterruptExecutor = InterruptExecutor::new();
static EXECUTOR_HIGH: InterruptExecutor = InterruptExecutor::new();
static EXECUTOR_LOW: StaticCell<Executor> = StaticCell::new();

static SERIAL: StaticCell<SerialGuard> = StaticCell::new();
static COUNTERS: StaticCell<[TaskCounters; 2]> = StaticCell::new();

#[interrupt]
unsafe fn SWI_IRQ_0() {
    EXECUTOR_SUPERVISOR.on_interrupt()
}

#[interrupt]
unsafe fn SWI_IRQ_1() {
    EXECUTOR_HIGH.on_interrupt()
}

#[cortex_m_rt::entry]
fn main() -> ! {
    let p = embassy_rp::init(Default::default());

    // Shared state is created once, before any task runs
    let tx = UartTx::new_blocking(p.UART0, p.PIN_0, hardware::serial_config());
    let serial: &'static SerialGuard = SERIAL.init(SerialGuard::new(RpSerial::new(tx)));
    let counters: &'static [TaskCounters; 2] =
        COUNTERS.init([TaskCounters::new(), TaskCounters::new()]);

    let mut supervisor = AppSupervisor::new(AppVariant::MutexBurst, &TASKS, config::SUPERVISOR);
    supervisor.watch(config::TASK_1.name, &counters[0]);
    supervisor.watch(config::TASK_2.name, &counters[1]);
    supervisor.print_startup_banner();
    supervisor.print_init_success();

    interrupt::SWI_IRQ_0.set_priority(Priority::P1);
    let spawner = EXECUTOR_SUPERVISOR.start(interrupt::SWI_IRQ_0);
    unwrap!(spawner.spawn(hardware::supervisor_task(
        supervisor,
        Output::new(p.PIN_25, Level::Low)
    )));

    interrupt::SWI_IRQ_1.set_priority(Priority::P2);
    let spawner = EXECUTOR_HIGH.start(interrupt::SWI_IRQ_1);
    unwrap!(spawner.spawn(hardware::burst_task(
        config::TASK_1,
        config::TASK_1_BURST,
        serial,
        &counters[0]
    )));

    let executor = EXECUTOR_LOW.init(Executor::new());
    executor.run(|spawner| {
        unwrap!(spawner.spawn(hardware::burst_task(
            config::TASK_2,
            config::TASK_2_BURST,
            serial,
            &counters[1]
        )));
    })
}
