//! Behavioral properties of a linked motor

mod common;

use common::builders::ChainBuilder;
use common::{assert_float_eq, drive};
use pae::graph::{GraphError, Motor, Node, NodeId, OpKind, Operation, COUNTDOWN_RELOAD};
use proptest::prelude::*;

#[test]
fn test_linking_twice_matches_linking_once() {
    let build = || {
        let mut motor = Motor::new();
        motor.add_node(Node::new("sin", Operation::sine(2.0, "bias")));
        motor.add_node(Node::new("bias", Operation::Normal));
        motor.add_node(Node::new("scaled", Operation::multiply("bias")).with_source("sin"));
        motor.add_node(Node::new("peak", Operation::Max).with_source(NodeId(2)));
        motor
    };

    let mut once = build();
    let mut twice = build();
    let first = once.initiate().unwrap();
    twice.initiate().unwrap();
    let second = twice.initiate().unwrap();

    assert_eq!(first.total_nodes, second.total_nodes);
    assert_eq!(first.sourced_nodes, second.sourced_nodes);
    assert_eq!(first.resolved_references, second.resolved_references);
    for (a, b) in once.nodes().iter().zip(twice.nodes()) {
        assert_eq!(a.linked_source(), b.linked_source());
    }

    let bias = once.find_node("bias").unwrap();
    once.push_value(bias, 0.5).unwrap();
    twice.push_value(bias, 0.5).unwrap();
    for _ in 0..30 {
        once.update().unwrap();
        twice.update().unwrap();
        assert_eq!(once.snapshot(), twice.snapshot());
    }
}

#[test]
fn test_counter_counts_two_rising_edges() {
    let mut motor = ChainBuilder::new().then("cnt", Operation::Counter).build();
    let out = drive(&mut motor, "in", "cnt", &[0.0, 0.0, 1.0, 1.0, 0.0, 1.0]);
    assert_eq!(out, vec![0.0, 0.0, 1.0, 1.0, 1.0, 2.0]);
}

#[test]
fn test_average_window_three() {
    let mut motor = ChainBuilder::new()
        .then("avg", Operation::average(3))
        .build();
    let out = drive(&mut motor, "in", "avg", &[10.0, 20.0, 30.0, 40.0]);
    assert_eq!(out, vec![10.0, 15.0, 20.0, 30.0]);
}

#[test]
fn test_square_wave_period() {
    let mut motor = Motor::new();
    motor.add_node(Node::new("sq", Operation::square(4.0)));
    motor.initiate().unwrap();

    let mut out = Vec::new();
    for _ in 0..24 {
        motor.update().unwrap();
        out.push(motor.get("sq").unwrap().value());
    }

    for (tick, value) in out.iter().enumerate() {
        let expected = if tick % 8 < 4 { 1.0 } else { 0.0 };
        assert_eq!(*value, expected, "tick {}", tick);
    }
}

#[test]
fn test_square_period_from_node() {
    let mut motor = Motor::new();
    motor.add_node(Node::new("period", Operation::Normal));
    motor.add_node(Node::new("sq", Operation::square("period")));
    motor.initiate().unwrap();
    let period = motor.find_node("period").unwrap();
    motor.push_value(period, 2.0).unwrap();

    let mut out = Vec::new();
    for _ in 0..8 {
        motor.update().unwrap();
        out.push(motor.get("sq").unwrap().value());
    }
    assert_eq!(out, vec![1.0, 1.0, 0.0, 0.0, 1.0, 1.0, 0.0, 0.0]);
}

#[test]
fn test_limit_clamp() {
    let mut motor = ChainBuilder::new()
        .then("lim", Operation::limit(0.0, 10.0))
        .build();
    let out = drive(&mut motor, "in", "lim", &[-5.0, 5.0, 15.0]);
    assert_eq!(out, vec![0.0, 5.0, 10.0]);
}

#[test]
fn test_disabled_node_freezes_value() {
    let mut motor = Motor::new();
    let sin = motor.add_node(Node::new("sin", Operation::sine(1.0, 0.0)));
    motor.initiate().unwrap();

    for _ in 0..10 {
        motor.update().unwrap();
    }
    let frozen = motor.node(sin).unwrap().value();
    motor.set_enabled(sin, false).unwrap();

    for _ in 0..25 {
        motor.update().unwrap();
        assert_eq!(motor.node(sin).unwrap().value(), frozen);
    }

    motor.set_enabled(sin, true).unwrap();
    motor.update().unwrap();
    assert_ne!(motor.node(sin).unwrap().value(), frozen);
}

#[test]
fn test_countdown_timer_runs_down_and_stays() {
    let mut motor = Motor::new();
    let timer = motor.add_node(Node::new("timer", Operation::CountDownTimer));
    motor.initiate().unwrap();

    motor.update().unwrap();
    assert_eq!(motor.node(timer).unwrap().value(), 0.0);

    motor.trigger(timer).unwrap();
    motor.update().unwrap();
    assert_eq!(motor.node(timer).unwrap().value(), COUNTDOWN_RELOAD);

    for step in 1..=200 {
        motor.update().unwrap();
        assert_eq!(
            motor.node(timer).unwrap().value(),
            COUNTDOWN_RELOAD - step as f64
        );
    }
    for _ in 0..10 {
        motor.update().unwrap();
        assert_eq!(motor.node(timer).unwrap().value(), 0.0);
    }

    // Retrigger mid-count restarts at the reload value.
    motor.trigger(timer).unwrap();
    motor.update().unwrap();
    motor.update().unwrap();
    motor.trigger(timer).unwrap();
    motor.update().unwrap();
    assert_eq!(motor.node(timer).unwrap().value(), COUNTDOWN_RELOAD);
}

#[test]
fn test_parameters_track_other_nodes() {
    let mut motor = ChainBuilder::new()
        .node(Node::new("gain", Operation::Normal))
        .then("out", Operation::MultiplyAdd {
            factor: "gain".into(),
            term: 1.0.into(),
        })
        .build();

    let gain = motor.find_node("gain").unwrap();
    motor.push_value(gain, 3.0).unwrap();
    assert_eq!(drive(&mut motor, "in", "out", &[2.0]), vec![7.0]);

    motor.push_value(gain, -1.0).unwrap();
    assert_eq!(drive(&mut motor, "in", "out", &[2.0]), vec![-1.0]);
}

#[test]
fn test_unresolved_reference_fails_link() {
    let mut motor = Motor::new();
    motor.add_node(Node::new("a", Operation::Normal));
    motor.add_node(Node::new("b", Operation::addition("ghost")).with_source("a"));

    match motor.initiate() {
        Err(GraphError::UnresolvedReference {
            node,
            parameter,
            target,
        }) => {
            assert_eq!(node, "b");
            assert_eq!(parameter, "term");
            assert_eq!(target, "ghost");
        }
        other => panic!("expected unresolved reference, got {:?}", other),
    }
    assert!(!motor.is_linked());
}

#[test]
fn test_unresolved_source_fails_link() {
    let mut motor = Motor::new();
    motor.add_node(Node::new("b", Operation::Normal).with_source("ghost"));
    assert!(matches!(
        motor.initiate(),
        Err(GraphError::UnresolvedReference {
            parameter: "source",
            ..
        })
    ));
}

#[test]
fn test_sourceless_counter_and_rate_limit_fail_link() {
    let mut motor = Motor::new();
    motor.add_node(Node::new("cnt", Operation::Counter));
    assert!(matches!(
        motor.initiate(),
        Err(GraphError::MissingSource {
            kind: OpKind::Counter,
            ..
        })
    ));

    let mut motor = Motor::new();
    motor.add_node(Node::new("rl", Operation::RateLimit));
    assert!(matches!(
        motor.initiate(),
        Err(GraphError::MissingSource {
            kind: OpKind::RateLimit,
            ..
        })
    ));
}

#[test]
fn test_division_by_zero() {
    // Literal zero is a configuration error.
    let mut motor = Motor::new();
    motor.add_node(Node::new("div", Operation::division(0.0)));
    assert!(matches!(
        motor.initiate(),
        Err(GraphError::DivisionByZero { .. })
    ));

    // A divider node reading zero keeps the last value and flags the node.
    let mut motor = ChainBuilder::new()
        .node(Node::new("d", Operation::Normal))
        .then("div", Operation::division("d"))
        .build();
    let d = motor.find_node("d").unwrap();

    motor.push_value(d, 4.0).unwrap();
    assert_eq!(drive(&mut motor, "in", "div", &[10.0]), vec![2.5]);

    motor.push_value(d, 0.0).unwrap();
    assert_eq!(drive(&mut motor, "in", "div", &[10.0]), vec![2.5]);
    assert!(motor.get("div").unwrap().is_invalid());

    motor.push_value(d, 5.0).unwrap();
    assert_eq!(drive(&mut motor, "in", "div", &[10.0]), vec![2.0]);
    assert!(!motor.get("div").unwrap().is_invalid());
}

#[test]
fn test_pushed_value_overrides_source_once() {
    let mut motor = ChainBuilder::new().then("copy", Operation::Normal).build();
    let copy = motor.find_node("copy").unwrap();

    drive(&mut motor, "in", "copy", &[1.0]);
    motor.push_value(copy, 9.0).unwrap();
    assert_eq!(drive(&mut motor, "in", "copy", &[1.0]), vec![9.0]);
    assert_eq!(drive(&mut motor, "in", "copy", &[1.0]), vec![1.0]);
}

#[test]
fn test_sine_amplitude_and_offset() {
    let mut motor = Motor::new();
    motor.add_node(Node::new("sin", Operation::sine(3.0, 1.0)));
    motor.initiate().unwrap();

    for tick in 0..50 {
        motor.update().unwrap();
        let expected = 3.0 * (tick as f64 / 20.0).sin() + 1.0;
        assert_float_eq(motor.get("sin").unwrap().value(), expected, 1e-12);
    }
}

#[test]
fn test_random_with_seed_is_reproducible() {
    let run = || {
        let mut motor = ChainBuilder::new()
            .node(Node::new(
                "rnd",
                Operation::Random {
                    offset: 5.0.into(),
                    factor: 2.0.into(),
                },
            ))
            .seed(42)
            .build();
        (0..20)
            .map(|_| {
                motor.update().unwrap();
                motor.get("rnd").unwrap().value()
            })
            .collect::<Vec<_>>()
    };

    let a = run();
    assert_eq!(a, run());
    assert!(a.iter().all(|v| (5.0..7.0).contains(v)));
}

proptest! {
    #[test]
    fn test_limit_output_within_bounds(
        inputs in prop::collection::vec(-1e6f64..1e6, 1..40),
        lo in -100.0f64..0.0,
        span in 0.0f64..100.0
    ) {
        let hi = lo + span;
        let mut motor = ChainBuilder::new()
            .then("lim", Operation::limit(lo, hi))
            .build();

        for v in drive(&mut motor, "in", "lim", &inputs) {
            // Property: clamped output never leaves [lo, hi]
            prop_assert!(v >= lo && v <= hi);
        }
    }

    #[test]
    fn test_counter_never_exceeds_rising_edges(
        bits in prop::collection::vec(any::<bool>(), 1..60)
    ) {
        let inputs: Vec<f64> = bits.iter().map(|&b| if b { 1.0 } else { 0.0 }).collect();
        let mut motor = ChainBuilder::new().then("cnt", Operation::Counter).build();
        let out = drive(&mut motor, "in", "cnt", &inputs);

        let mut prev = 0.0;
        let mut edges = 0.0;
        for &v in &inputs {
            if v > 0.5 && prev <= 0.5 {
                edges += 1.0;
            }
            prev = v;
        }
        prop_assert_eq!(*out.last().unwrap(), edges);
    }
}
