use std::time::Duration;

use sisters_quest::clock::{frame_budget, remaining, TickClock};

#[test]
fn frame_budget_divides_a_second() {
    assert_eq!(frame_budget(50), Duration::from_millis(20));
    assert_eq!(frame_budget(60), Duration::from_secs(1) / 60);
    // Zero is treated as one tick per second
    assert_eq!(frame_budget(0), Duration::from_secs(1));
}

#[test]
fn remaining_is_none_once_the_frame_is_spent() {
    let frame = Duration::from_millis(16);
    assert_eq!(remaining(frame, Duration::from_millis(10)), Some(Duration::from_millis(6)));
    assert_eq!(remaining(frame, frame), None);
    assert_eq!(remaining(frame, Duration::from_millis(40)), None);
}

#[test]
fn ticks_are_counted_and_timestamps_never_go_back() {
    let mut clock = TickClock::new(1_000);
    let first = clock.begin_tick();
    clock.end_tick();
    let second = clock.begin_tick();

    assert_eq!(clock.ticks(), 2);
    assert!(second >= first);
    assert_eq!(clock.frame(), Duration::from_millis(1));
}

#[test]
fn end_tick_paces_to_the_frame_budget() {
    let mut clock = TickClock::new(100);
    let start = std::time::Instant::now();
    for _ in 0..3 {
        clock.begin_tick();
        clock.end_tick();
    }
    assert!(start.elapsed() >= Duration::from_millis(25));
}
