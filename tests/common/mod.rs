//! Common test utilities and helpers

#![allow(dead_code)] // Test utilities may not all be used in every test file

pub mod builders;

use pae::graph::Motor;

/// Assert two floats are approximately equal
pub fn assert_float_eq(a: f64, b: f64, epsilon: f64) {
    assert!(
        (a - b).abs() < epsilon,
        "Expected {} to be approximately equal to {} (epsilon: {})",
        a,
        b,
        epsilon
    );
}

/// Push each input into `feed`, tick, and record `probe`'s value.
pub fn drive(motor: &mut Motor, feed: &str, probe: &str, inputs: &[f64]) -> Vec<f64> {
    let feed = motor.find_node(feed).expect("feed node");
    inputs
        .iter()
        .map(|&v| {
            motor.push_value(feed, v).expect("push");
            motor.update().expect("tick");
            motor.get(probe).expect("probe node").value()
        })
        .collect()
}
