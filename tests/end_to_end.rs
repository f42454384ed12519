mod common;

use core::cell::RefCell;

use embassy_futures::block_on;
use embassy_futures::join::join4;
use embassy_futures::select::select;
use embassy_sync::blocking_mutex::raw::NoopRawMutex;
use embassy_time::{Duration, Ticker, Timer};
use embedded_hal::digital::InputPin;

use common::ScriptedPin;
use uartsync::buttons::{EdgeDetectorTask, EdgeMessages};
use uartsync::channels::MessageQueue;
use uartsync::config::{self, QUEUE_LENGTH};
use uartsync::consumer::ConsumerTask;
use uartsync::producer::PeriodicSenderTask;
use uartsync::serial::BufferPort;
use uartsync::stats::TaskCounters;
use uartsync::types::{Message, Timeout};

const RUN_TIME_UNITS: u64 = 1_000;

/// Rising/Falling words of one button's events, in output order
fn edges_of(lines: &[&str], button: &str) -> Vec<String> {
    lines
        .iter()
        .filter(|line| line.starts_with(button))
        .map(|line| line.split_whitespace().nth(2).unwrap_or_default().to_string())
        .collect()
}

#[test]
fn queue_variant_delivers_every_sent_message_exactly_once() {
    let queue = MessageQueue::<NoopRawMutex, QUEUE_LENGTH>::new();
    let counters: [TaskCounters; 4] = Default::default();
    let mut port = BufferPort::<4096>::new();

    let button_1 = EdgeDetectorTask::new(
        config::BUTTON_1,
        ScriptedPin::toggling(3),
        EdgeMessages::new(config::BUTTON_1_RISING, config::BUTTON_1_FALLING),
        &queue,
        &counters[0],
    );
    let button_2 = EdgeDetectorTask::new(
        config::BUTTON_2,
        ScriptedPin::toggling(5),
        EdgeMessages::new(config::BUTTON_2_RISING, config::BUTTON_2_FALLING),
        &queue,
        &counters[1],
    );
    let producer = PeriodicSenderTask::new(
        config::PRODUCER,
        config::PRODUCER_MESSAGE,
        &queue,
        &counters[2],
    );
    let consumer = ConsumerTask::new(
        config::CONSUMER,
        &queue,
        &mut port,
        &counters[3],
        Timeout::from(config::ticks(config::CONSUMER_RECEIVE_TIMEOUT)),
    );

    let _ = block_on(select(
        join4(button_1.run(), button_2.run(), producer.run(), consumer.run()),
        Timer::after(config::ticks(RUN_TIME_UNITS)),
    ));

    let leftover: Vec<_> = std::iter::from_fn(|| queue.try_receive().ok()).collect();

    let sent: u32 = counters[..3].iter().map(|c| c.snapshot().sent).sum();
    let failed: u32 = counters[..3].iter().map(|c| c.snapshot().send_failures).sum();
    let consumer_stats = counters[3].snapshot();

    assert_eq!(failed, 0);
    assert!(sent > 0);
    assert_eq!(consumer_stats.received + leftover.len() as u32, sent);
    assert!(consumer_stats.receive_timeouts > 0, "consumer should idle between events");
    assert!(!port.overflowed());

    // Everything that reached the port, followed by what was still queued
    let mut text = String::from_utf8(port.as_bytes().to_vec()).unwrap();
    for message in &leftover {
        text.push_str(message.as_str());
    }
    let lines: Vec<&str> = text.split_terminator("\r\n").collect();
    assert_eq!(lines.len() as u32, sent);

    for button in ["-Button 1", "-Button 2"] {
        let edges = edges_of(&lines, button);
        assert!(!edges.is_empty(), "{} never toggled", button);
        for (i, edge) in edges.iter().enumerate() {
            let expected = if i % 2 == 0 { "Rising" } else { "Falling" };
            assert_eq!(edge, expected, "{} events out of order", button);
        }
    }

    let producer_lines = lines
        .iter()
        .filter(|line| line.starts_with("-task3"))
        .count() as u32;
    assert_eq!(producer_lines, counters[2].snapshot().sent);
}

/// Sample one button forever, logging each queued event in enqueue order
async fn sample_into<P: InputPin, const N: usize>(
    mut task: EdgeDetectorTask<'_, P, NoopRawMutex, N>,
    messages: EdgeMessages,
    period: Duration,
    journal: &RefCell<Vec<Message>>,
) -> ! {
    let mut ticker = Ticker::every(period);
    loop {
        if let Some(edge) = task.cycle().await {
            journal.borrow_mut().push(messages.for_edge(edge));
        }
        ticker.next().await;
    }
}

#[test]
fn messages_from_all_sources_leave_in_enqueue_order() {
    let queue = MessageQueue::<NoopRawMutex, QUEUE_LENGTH>::new();
    let counters: [TaskCounters; 4] = Default::default();
    let mut port = BufferPort::<4096>::new();
    // Position in the journal is the send sequence number
    let journal = RefCell::new(Vec::<Message>::new());

    let button_1_messages = EdgeMessages::new(config::BUTTON_1_RISING, config::BUTTON_1_FALLING);
    let button_2_messages = EdgeMessages::new(config::BUTTON_2_RISING, config::BUTTON_2_FALLING);
    let button_1 = EdgeDetectorTask::new(
        config::BUTTON_1,
        ScriptedPin::toggling(2),
        button_1_messages,
        &queue,
        &counters[0],
    );
    let button_2 = EdgeDetectorTask::new(
        config::BUTTON_2,
        ScriptedPin::toggling(3),
        button_2_messages,
        &queue,
        &counters[1],
    );
    let mut producer = PeriodicSenderTask::new(
        config::PRODUCER,
        config::PRODUCER_MESSAGE,
        &queue,
        &counters[2],
    );
    let consumer = ConsumerTask::new(
        config::CONSUMER,
        &queue,
        &mut port,
        &counters[3],
        Timeout::from(config::ticks(config::CONSUMER_RECEIVE_TIMEOUT)),
    );

    let sending = async {
        let mut ticker = Ticker::every(config::PRODUCER.period());
        loop {
            if producer.cycle().await {
                journal.borrow_mut().push(config::PRODUCER_MESSAGE);
            }
            ticker.next().await;
        }
    };

    let _ = block_on(select(
        join4(
            sample_into(button_1, button_1_messages, config::BUTTON_1.period(), &journal),
            sample_into(button_2, button_2_messages, config::BUTTON_2.period(), &journal),
            sending,
            consumer.run(),
        ),
        Timer::after(config::ticks(400)),
    ));

    let failed: u32 = counters[..3].iter().map(|c| c.snapshot().send_failures).sum();
    assert_eq!(failed, 0);

    let journal = journal.into_inner();
    let sources = [
        config::BUTTON_1_RISING,
        config::BUTTON_2_RISING,
        config::PRODUCER_MESSAGE,
    ];
    for source in sources {
        assert!(journal.contains(&source), "{:?} never queued", source);
    }

    let expected: String = journal.iter().map(|m| m.as_str()).collect();
    let mut actual = String::from_utf8(port.as_bytes().to_vec()).unwrap();
    while let Ok(message) = queue.try_receive() {
        actual.push_str(message.as_str());
    }
    assert_eq!(actual, expected);
}
