//! Fixed-cadence tick loop.
//!
//! The engine itself has no notion of time. `Runner` ticks a motor,
//! hands each result to a callback, then sleeps out the rest of the
//! interval.

use crate::config::RunSettings;
use crate::error::Result;
use crate::graph::Motor;
use std::time::{Duration, Instant};

pub struct Runner {
    motor: Motor,
    interval: Duration,
    ticks: Option<u64>,
}

impl Runner {
    pub fn new(motor: Motor, settings: &RunSettings) -> Self {
        Self {
            motor,
            interval: settings.interval(),
            ticks: settings.ticks,
        }
    }

    pub fn motor(&self) -> &Motor {
        &self.motor
    }

    pub fn into_motor(self) -> Motor {
        self.motor
    }

    /// Run until the tick budget is spent, or forever without one.
    ///
    /// Links the motor first if needed. Returns the number of ticks run.
    pub fn run<F>(&mut self, mut on_tick: F) -> Result<u64>
    where
        F: FnMut(&Motor) -> Result<()>,
    {
        if !self.motor.is_linked() {
            self.motor.initiate()?;
        }

        tracing::info!(
            "Runner started: {} nodes, every {:?}, {}",
            self.motor.len(),
            self.interval,
            self.ticks
                .map(|n| format!("{} ticks", n))
                .unwrap_or_else(|| "until interrupted".to_string())
        );

        let mut done = 0u64;
        while self.ticks.map_or(true, |limit| done < limit) {
            let started = Instant::now();
            self.motor.update()?;
            done += 1;
            on_tick(&self.motor)?;

            self.rate_limit(started);
        }

        tracing::info!("Runner stopped after {} ticks", done);
        Ok(done)
    }

    fn rate_limit(&self, started: Instant) {
        if self.interval.is_zero() {
            return;
        }
        let elapsed = started.elapsed();
        if elapsed < self.interval {
            std::thread::sleep(self.interval - elapsed);
        }
    }
}
