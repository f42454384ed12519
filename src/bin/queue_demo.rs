//! UartSync - Message Queue Firmware
//!
//! Four equal-priority tasks around one bounded queue:
//! - task1_btn1 / task2_btn2: sample GPIO 2 / 3 every 30 ms, queue edge events
//! - task3_100_ms: queue a fixed message every 100 ms
//! - task4_consumer: every 20 ms, forward one message to UART0 (10 ms timeout)

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::{Executor, InterruptExecutor};
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::interrupt;
use embassy_rp::interrupt::{InterruptExt, Priority};
use embassy_rp::uart::UartTx;
use panic_halt as _;
use defmt_rtt as _;
use static_cell::StaticCell;

use uartsync::buttons::EdgeMessages;
use uartsync::config::{self, TaskSpec};
use uartsync::hardware::{self, AppQueue, RpSerial};
use uartsync::stats::TaskCounters;
use uartsync::supervisor::AppSupervisor;
use uartsync::types::AppVariant;

static TASKS: [TaskSpec; 4] = [
    config::BUTTON_1,
    config::BUTTON_2,
    config::PRODUCER,
    config::CONSUMER,
];

static EXECUTOR_SUPERVISOR: InterruptExecutor = InterruptExecutor::new();
static EXECUTOR: StaticCell<Executor> = StaticCell::new();

static QUEUE: StaticCell<AppQueue> = StaticCell::new();
static COUNTERS: StaticCell<[TaskCounters; 4]> = StaticCell::new();

#[interrupt]
unsafe fn SWI_IRQ_0() {
    EXECUTOR_SUPERVISOR.on_interrupt()
}

#[cortex_m_rt::entry]
fn main() -> ! {
    let p = embassy_rp::init(Default::default());

    // Shared state is created once, before any task runs
    let tx = UartTx::new_blocking(p.UART0, p.PIN_0, hardware::serial_config());
    let serial = RpSerial::new(tx);
    let queue: &'static AppQueue = QUEUE.init(AppQueue::new());
    let counters: &'static [TaskCounters; 4] = COUNTERS.init([
        TaskCounters::new(),
        TaskCounters::new(),
        TaskCounters::new(),
        TaskCounters::new(),
    ]);

    let mut supervisor = AppSupervisor::new(AppVariant::MessageQueue, &TASKS, config::SUPERVISOR);
    for (task, counters) in TASKS.iter().zip(counters.iter()) {
        supervisor.watch(task.name, counters);
    }
    supervisor.print_startup_banner();
    supervisor.print_init_success();

    interrupt::SWI_IRQ_0.set_priority(Priority::P1);
    let spawner = EXECUTOR_SUPERVISOR.start(interrupt::SWI_IRQ_0);
    unwrap!(spawner.spawn(hardware::supervisor_task(
        supervisor,
        Output::new(p.PIN_25, Level::Low)
    )));

    let button_1 = Input::new(p.PIN_2, Pull::Down);
    let button_2 = Input::new(p.PIN_3, Pull::Down);

    let executor = EXECUTOR.init(Executor::new());
    executor.run(|spawner| {
        unwrap!(spawner.spawn(hardware::button_task(
            config::BUTTON_1,
            button_1,
            EdgeMessages::new(config::BUTTON_1_RISING, config::BUTTON_1_FALLING),
            queue,
            &counters[0]
        )));
        unwrap!(spawner.spawn(hardware::button_task(
            config::BUTTON_2,
            button_2,
            EdgeMessages::new(config::BUTTON_2_RISING, config::BUTTON_2_FALLING),
            queue,
            &counters[1]
        )));
        unwrap!(spawner.spawn(hardware::sender_task(
            config::PRODUCER,
            config::PRODUCER_MESSAGE,
            queue,
            &counters[2]
        )));
        unwrap!(spawner.spawn(hardware::consumer_task(queue, serial, &counters[3])));
    })
}
