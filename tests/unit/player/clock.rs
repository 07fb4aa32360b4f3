use super::*;

const SEC: i64 = 1_000_000_000;

#[test]
fn step_clamps_to_the_timeline() {
    let mut clock = PlaybackClock::new(Rational::new(60, 1), 1.0);
    assert_eq!(clock.max_frame(), 60);
    for _ in 0..59 {
        clock.step(1, 0);
    }
    assert_eq!(clock.frame_index(), 59);
    for _ in 0..10 {
        clock.step(1, 0);
    }
    assert_eq!(clock.frame_index(), 60);
    assert_eq!(clock.state(), PlaybackState::Paused);

    let mut clock = PlaybackClock::new(Rational::new(60, 1), 1.0);
    clock.step(-1, 0);
    assert_eq!(clock.frame_index(), 0);
    clock.step(i64::MAX, 0);
    assert_eq!(clock.frame_index(), 60);
}

#[test]
fn max_frame_floors_fractional_rates() {
    let clock = PlaybackClock::new(Rational::new(30000, 1001), 10.0);
    assert_eq!(clock.max_frame(), 299);
}

#[test]
fn playing_follows_elapsed_time() {
    let mut clock = PlaybackClock::new(Rational::new(30, 1), 2.0);
    assert!(clock.start(5 * SEC));
    assert!(!clock.start(5 * SEC));
    let t = clock.tick(5 * SEC + SEC / 2);
    assert_eq!(t.frame_index, 15);
    assert_eq!(t.time, 0.5);
    assert!(!t.wrapped);
}

#[test]
fn reaching_the_duration_loops_and_clears_first_frame() {
    let mut clock = PlaybackClock::new(Rational::new(30, 1), 2.0);
    clock.start(0);
    assert!(clock.frame_rendered(0));
    assert!(!clock.frame_rendered(0));
    assert_eq!(clock.tick(2 * SEC - 1).frame_index, 59);

    let t = clock.tick(2 * SEC);
    assert!(t.wrapped);
    assert_eq!(t.frame_index, 0);
    assert!(!clock.got_first_frame());
    assert_eq!(clock.offset(), Some(2 * SEC));
    assert!(clock.frame_rendered(2 * SEC));
}

#[test]
fn first_tick_without_anchor_wraps() {
    let mut clock = PlaybackClock::new(Rational::new(30, 1), 2.0);
    clock.start(0);
    clock.offset = None;
    let t = clock.tick(7 * SEC);
    assert!(t.wrapped);
    assert_eq!(clock.offset(), Some(7 * SEC));
}

#[test]
fn pause_freezes_the_frame() {
    let mut clock = PlaybackClock::new(Rational::new(10, 1), 10.0);
    clock.start(0);
    assert_eq!(clock.tick(SEC).frame_index, 10);
    assert!(clock.pause());
    assert!(!clock.pause());
    assert_eq!(clock.tick(5 * SEC).frame_index, 10);

    clock.start(9 * SEC);
    assert_eq!(clock.offset(), Some(8 * SEC));
    assert_eq!(clock.tick(9 * SEC).frame_index, 10);
    assert_eq!(clock.tick(10 * SEC).frame_index, 20);
}

#[test]
fn step_keeps_the_paused_frame_anchored() {
    let mut clock = PlaybackClock::new(Rational::new(10, 1), 10.0);
    clock.step(25, 100 * SEC);
    assert_eq!(clock.offset(), Some(100 * SEC - 2_500_000_000));
    assert_eq!(clock.tick(200 * SEC).frame_index, 25);
    clock.start(300 * SEC);
    assert_eq!(clock.tick(300 * SEC).frame_index, 25);
}

#[test]
fn seek_rounds_and_clamps() {
    let mut clock = PlaybackClock::new(Rational::new(24, 1), 2.0);
    clock.frame_rendered(0);
    clock.seek(1.02, 0);
    assert_eq!(clock.frame_index(), 24);
    assert!(!clock.got_first_frame());
    clock.seek(1.0 + 0.75 / 24.0, 0);
    assert_eq!(clock.frame_index(), 25);
    clock.seek(99.0, 0);
    assert_eq!(clock.frame_index(), 48);
    clock.seek(-1.0, 0);
    assert_eq!(clock.frame_index(), 0);
}

#[test]
fn set_scene_restarts_at_frame_zero() {
    let mut clock = PlaybackClock::new(Rational::new(60, 1), 1.0);
    clock.start(0);
    clock.tick(SEC / 2);
    clock.frame_rendered(SEC / 2);
    clock.set_scene(Rational::new(25, 1), 4.0, 3 * SEC);
    assert_eq!(clock.frame_index(), 0);
    assert_eq!(clock.frame_rate(), Rational::new(25, 1));
    assert_eq!(clock.duration_nanos(), 4 * SEC);
    assert_eq!(clock.state(), PlaybackState::Playing);
    assert!(!clock.got_first_frame());
    assert_eq!(clock.offset(), Some(3 * SEC));
}

#[test]
fn invalid_frame_rate_is_ignored() {
    let mut clock = PlaybackClock::new(Rational::new(0, 0), 1.0);
    assert_eq!(clock.frame_rate(), Rational::new(60, 1));
    clock.set_scene(Rational::new(30, -1), 1.0, 0);
    assert_eq!(clock.frame_rate(), Rational::new(60, 1));
}

#[test]
fn zero_duration_always_shows_frame_zero() {
    let mut clock = PlaybackClock::new(Rational::new(60, 1), 0.0);
    clock.start(0);
    assert_eq!(clock.tick(SEC).frame_index, 0);
    clock.step(5, SEC);
    assert_eq!(clock.frame_index(), 0);
}

#[test]
fn resuming_keeps_a_stepped_frame_at_fractional_rates() {
    let mut clock = PlaybackClock::new(Rational::new(30000, 1001), 10.0);
    clock.step(1, 0);
    assert!(clock.start(0));
    assert_eq!(clock.tick(0).frame_index, 1);

    clock.step(1, 5 * SEC);
    clock.start(5 * SEC);
    assert_eq!(clock.tick(5 * SEC).frame_index, 2);
}

#[test]
fn start_rearms_the_first_frame() {
    let mut clock = PlaybackClock::new(Rational::new(30, 1), 2.0);
    assert!(clock.frame_rendered(0));
    assert!(clock.got_first_frame());
    clock.start(SEC);
    assert!(!clock.got_first_frame());
    assert!(clock.frame_rendered(SEC));

    assert!(!clock.start(2 * SEC));
    assert!(clock.got_first_frame());
}
