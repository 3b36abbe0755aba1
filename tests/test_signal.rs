//! Integration tests for the signal model and signal-level operations.

use kinesig::aggregation::{aggregate_signal, AggregationConfig, IndexOutput, Reducer};
use kinesig::arithmetic::apply_signal_op;
use kinesig::core::{FrameSpan, KinesigError, NumericArray, Operation, ResultType, Result};
use kinesig::signal::{
    ComponentSequence, PlaneSequence, Segment, Signal, SignalType, SignalValue, SpaceConverter,
    VectorSequence,
};

fn markers(n: usize) -> VectorSequence {
    let axis = |offset: f32| (0..n).map(|i| i as f32 + offset).collect::<Vec<f32>>();
    VectorSequence::new(axis(0.0), axis(100.0), axis(200.0)).unwrap()
}

fn segment(n: usize) -> Segment {
    Segment {
        x: vec![1.0; n],
        y: vec![2.0; n],
        z: (0..n).map(|i| i as f32).collect(),
        rx: vec![0.0; n],
        ry: vec![0.0; n],
        rz: vec![0.0; n],
        rw: vec![1.0; n],
        frame_rate: Some(100.0),
    }
}

fn sample_signals() -> Vec<Signal> {
    vec![
        Signal::new(vec![0.5f32, 1.5, 2.5, 3.5]),
        Signal::new(vec![3u32, 8, 13, 21]),
        Signal::new(vec![vec![1.0f32, 2.0, 3.0], vec![4.0f32, 5.0, 6.0]]),
        Signal::new(markers(5)),
        Signal::new(segment(4)),
        Signal::new(PlaneSequence {
            a: vec![0.0, 1.0],
            b: vec![1.0, 0.0],
            c: vec![0.0, 0.0],
            d: vec![5.0, 6.0],
            frame_rate: None,
        }),
    ]
}

/// Rotates nothing, records the target in the x axis.
struct TagTarget;

impl SpaceConverter for TagTarget {
    fn convert_vectors(
        &self,
        value: &VectorSequence,
        _from: Option<&str>,
        to: &str,
    ) -> Result<VectorSequence> {
        let mut out = value.clone();
        out.x.iter_mut().for_each(|v| *v = to.len() as f32);
        Ok(out)
    }

    fn convert_segment(&self, value: &Segment, _from: Option<&str>, _to: &str) -> Result<Segment> {
        Ok(value.clone())
    }
}

/// Moves x by 100 into any body-fixed space and back out into `world`.
struct Shift;

impl SpaceConverter for Shift {
    fn convert_vectors(
        &self,
        value: &VectorSequence,
        _from: Option<&str>,
        to: &str,
    ) -> Result<VectorSequence> {
        let delta = if to == "world" { -100.0 } else { 100.0 };
        let mut out = value.clone();
        out.x.iter_mut().for_each(|v| *v += delta);
        Ok(out)
    }

    fn convert_segment(&self, value: &Segment, _from: Option<&str>, _to: &str) -> Result<Segment> {
        Ok(value.clone())
    }
}

#[test]
fn test_get_frames_round_trip() {
    for signal in sample_signals() {
        let len = signal.len().unwrap();
        let frames: Vec<f64> = (0..len).map(|f| f as f64).collect();
        let subset = signal.get_frames(&frames).unwrap();

        assert_eq!(subset.value(), signal.value(), "{:?}", signal.signal_type());
        assert_eq!(subset.result_type(), Some(ResultType::Scalar));
        assert_eq!(subset.frame_map(), Some((0..len).collect::<Vec<_>>().as_slice()));
    }
}

#[test]
fn test_get_frames_normalizes_indices() {
    let signal = Signal::new(vec![0.0f32, 10.0, 20.0, 30.0, 40.0]);
    let subset = signal.get_frames(&[-1.0, 2.2, 1.7, 2.0, 9.0, -8.0]).unwrap();
    assert_eq!(subset.frame_map(), Some(&[2usize, 4][..]));
    assert_eq!(subset.get_event_array_value().unwrap().values(), &[20.0, 40.0]);
}

#[test]
fn test_cycles_then_aggregate() {
    let signal = Signal::new(vec![1.0f32, 4.0, 2.0, 9.0, 3.0, 5.0, 0.0])
        .with_cycles(vec![FrameSpan::new(0, 2), FrameSpan::new(3, 6)]);

    let cycles = signal.get_signal_cycles(None).unwrap();
    assert_eq!(cycles[1].frame_map(), Some(&[3usize, 4, 5, 6][..]));

    let config = AggregationConfig::new(Reducer::MaxIndex)
        .with_per_cycle(true)
        .with_index_output(IndexOutput::Frame);
    let peaks = aggregate_signal(&signal, &config).unwrap().unwrap();
    assert_eq!(peaks.get_event_array_value().unwrap().values(), &[1.0, 3.0]);

    let frame_of_peak = aggregate_signal(&cycles[1], &config.clone().with_per_cycle(false))
        .unwrap()
        .unwrap();
    assert_eq!(frame_of_peak.value(), &SignalValue::Scalar(3.0));
}

#[test]
fn test_signal_arithmetic_with_entities() {
    let a = Signal::new(markers(3)).with_name("LASI");
    let b = Signal::new(markers(3)).with_name("RASI");

    let midpoint = apply_signal_op(&a, &b, Operation::Add)
        .and_then(|sum| apply_signal_op(&sum, &Signal::new(2.0), Operation::Divide))
        .unwrap();
    assert_eq!(midpoint.signal_type(), SignalType::VectorSequence);
    assert_eq!(midpoint.name.as_deref(), Some("LASI"));
    assert_eq!(midpoint.component("y").unwrap().values(), &[100.0, 101.0, 102.0]);

    let series = Signal::new(vec![1.0f32, 2.0, 3.0]);
    let scaled = apply_signal_op(&series, &a, Operation::Multiply).unwrap();
    assert_eq!(scaled.signal_type(), SignalType::VectorSequence);
    assert_eq!(scaled.component("x").unwrap().values(), &[0.0, 2.0, 6.0]);

    let err = apply_signal_op(&Signal::new("LASI"), &a, Operation::Add).unwrap_err();
    assert!(matches!(err, KinesigError::UnsupportedOperand { .. }));
}

#[test]
fn test_component_signal_converts_through_original() {
    let full = Signal::new(markers(4)).with_name("LKNE");
    let mut x = full.component_signal("x").unwrap();
    assert_eq!(x.signal_type(), SignalType::Float32Array);
    assert_eq!(x.component.as_deref(), Some("x"));

    x.set_target_space("femur");
    assert!(x.convert_to_target_space(&TagTarget).unwrap());
    assert_eq!(x.get_event_array_value().unwrap().values(), &[5.0; 4]);
    assert_eq!(x.space(), Some("femur"));
    assert!(!x.convert_to_target_space(&TagTarget).unwrap());
}

#[test]
fn test_entity_resampling() {
    let resampled = markers(3).resample(5).unwrap();
    assert_eq!(resampled.len(), 5);
    assert_eq!(resampled.x, vec![0.0, 0.5, 1.0, 1.5, 2.0]);

    let seg = segment(3).resample(5).unwrap();
    assert_eq!(seg.len(), 5);
    assert_eq!(seg.frame_rate(), Some(100.0));
    assert!(seg.rw.iter().all(|w| (*w - 1.0).abs() < 1e-6));
    assert!(segment(1).resample(4).is_err());
}

#[test]
fn test_entity_validation() {
    let short = VectorSequence::from_arrays(
        vec![NumericArray::float32(vec![1.0]), NumericArray::float32(vec![2.0])],
        None,
    );
    assert!(matches!(short, Err(KinesigError::InsufficientComponents { .. })));

    let ragged = VectorSequence::new(vec![1.0, 2.0], vec![1.0], vec![1.0, 2.0]);
    assert!(matches!(ragged, Err(KinesigError::LengthMismatch { .. })));
}

#[test]
fn test_component_signal_space_round_trip() {
    let mut full = Signal::new(markers(2)).with_name("RANK");
    full.set_space(Some("world".to_string()));
    let mut x = full.component_signal("x").unwrap();

    x.set_target_space("pelvis");
    assert!(x.convert_to_target_space(&Shift).unwrap());
    assert_eq!(x.get_event_array_value().unwrap().values(), &[100.0, 101.0]);

    x.set_target_space("world");
    assert!(x.convert_to_target_space(&Shift).unwrap());
    assert_eq!(x.get_event_array_value().unwrap().values(), &[0.0, 1.0]);
    assert_eq!(x.space(), Some("world"));

    let original = x.original_signal.as_deref().unwrap();
    assert_eq!(original.value(), full.value());
    assert_eq!(original.space(), Some("world"));
}
