//! Integration tests for event pairing and pattern selection.

use kinesig::core::{FrameSpan, NumericArray};
use kinesig::events::{
    event_sequence, event_sequence_signal, pick_from_sequence, pick_from_sequence_signals,
    EventSequenceOptions,
};
use kinesig::Signal;

#[test]
fn test_event_sequence_pairs_greedily() {
    let spans = event_sequence(
        &[2.0, 3.0, 7.0, 10.0, 16.0],
        &[4.0, 8.0, 9.0, 12.0],
        &EventSequenceOptions::default(),
    );
    assert_eq!(spans, vec![FrameSpan::new(2, 4), FrameSpan::new(7, 8), FrameSpan::new(10, 12)]);
}

#[test]
fn test_event_sequence_gait_cycles_with_filters() {
    // heel strikes of one foot, toe offs of the other foot must fall inside
    let left_strike = Signal::new(vec![10u32, 110, 210, 310]);
    let right_off = vec![60.0, 160.0, 360.0];

    let options = EventSequenceOptions::default().with_include(right_off);
    let spans = event_sequence_signal(&left_strike, &left_strike.clone(), &options).unwrap();
    assert_eq!(spans, vec![FrameSpan::new(10, 110), FrameSpan::new(110, 210)]);

    let options = options.with_exclude(vec![150.0]);
    let spans = event_sequence_signal(&left_strike, &left_strike, &options).unwrap();
    assert_eq!(spans, vec![FrameSpan::new(10, 110)]);
}

#[test]
fn test_pick_from_sequence_pattern() {
    let streams = vec![
        NumericArray::uint32(vec![1.0, 5.0, 10.0, 15.0, 20.0]),
        NumericArray::uint32(vec![2.0, 6.0, 11.0, 16.0]),
        NumericArray::uint32(vec![3.0, 7.0, 12.0, 17.0, 22.0]),
    ];
    let picked = pick_from_sequence(&streams, 0, &[0, 1, 2], &[], false);
    assert_eq!(picked.values(), &[1.0, 5.0, 10.0, 15.0]);

    let middle = pick_from_sequence(&streams, 1, &[0, 1, 2], &[], false);
    assert_eq!(middle.values(), &[2.0, 6.0, 11.0, 16.0]);
}

#[test]
fn test_pick_from_sequence_signals() {
    let strike = Signal::new(vec![1u32, 5, 10, 15, 20]).with_name("LHS");
    let off = Signal::new(vec![2u32, 6, 11, 16]);
    let other = Signal::new(vec![3u32, 7, 12, 17, 22]);
    let noise = Signal::new(vec![11.5]);

    let picked = pick_from_sequence_signals(&strike, &[&strike, &off, &other], &[&noise], true)
        .unwrap();
    assert_eq!(picked.get_event_array_value().unwrap().values(), &[1.0, 5.0, 15.0]);
    assert_eq!(picked.name.as_deref(), Some("LHS"));

    let label = Signal::new("x");
    assert!(pick_from_sequence_signals(&strike, &[&strike, &label], &[], false).is_none());
}

#[test]
fn test_pick_from_sequence_signals_repeated_signal() {
    let a = Signal::new(vec![1.0f32, 3.0, 5.0]);
    let b = Signal::new(vec![2.0f32, 4.0]);

    let cyclic = pick_from_sequence_signals(&a, &[&a, &b, &a], &[], true).unwrap();
    assert_eq!(cyclic.get_event_array_value().unwrap().values(), &[1.0, 3.0, 5.0]);

    let stepped = pick_from_sequence_signals(&a, &[&a, &b, &a], &[], false).unwrap();
    assert_eq!(stepped.get_event_array_value().unwrap().values(), &[1.0, 3.0]);

    let between = pick_from_sequence_signals(&b, &[&a, &b, &a], &[], true).unwrap();
    assert_eq!(between.get_event_array_value().unwrap().values(), &[2.0, 4.0]);
}
