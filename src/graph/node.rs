//! A single signal-processing node.
//!
//! A node keeps two views of its operation: the declared one
//! (`Operation<Input>`, possibly naming other nodes by id) and the wired one
//! (`Operation<Param>`) that linking produces. Evaluation only ever sees
//! parameter values that the motor has already read from the wired view.

use crate::graph::filter::MovingAverage;
use crate::graph::id::NodeId;
use crate::graph::op_kind::OpKind;
use crate::graph::operation::Operation;
use crate::graph::param::{Input, NodeRef, Param};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Value a countdown timer restarts from when triggered.
pub const COUNTDOWN_RELOAD: f64 = 200.0;

/// Edge threshold for `Counter` nodes.
const EDGE_LEVEL: f64 = 0.5;

/// Sine nodes advance `1 / SINE_TICKS_PER_RADIAN` radians per tick.
const SINE_TICKS_PER_RADIAN: f64 = 20.0;

/// Resolved relationships, produced by linking.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Wiring {
    pub source: Option<NodeId>,
    pub operation: Operation<Param>,
}

/// Per-operation runtime state.
#[derive(Debug, Clone, Default)]
struct NodeState {
    /// Internal tick for generators (Sine phase, Square counter).
    tick: i64,
    /// Last input seen by edge-detecting operations.
    last_input: f64,
    trigger: bool,
    pushed: Option<f64>,
    filter: Option<MovingAverage>,
    rng: Option<StdRng>,
}

#[derive(Debug, Clone)]
pub struct Node {
    id: String,
    name: String,
    description: String,
    unit: String,
    enabled: bool,
    value: f64,
    previous: f64,
    invalid: bool,
    source: Option<NodeRef>,
    operation: Operation<Input>,
    wiring: Option<Wiring>,
    state: NodeState,
}

impl Node {
    /// Create an enabled node with value 0. The display name defaults to `id`.
    pub fn new(id: impl Into<String>, operation: Operation<Input>) -> Self {
        let id = id.into();
        let mut state = NodeState::default();
        match &operation {
            Operation::Average { window } => state.filter = Some(MovingAverage::new(*window)),
            Operation::Random { .. } => state.rng = Some(StdRng::from_entropy()),
            _ => {}
        }

        Self {
            name: id.clone(),
            id,
            description: String::new(),
            unit: String::new(),
            enabled: true,
            value: 0.0,
            previous: 0.0,
            invalid: false,
            source: None,
            operation,
            wiring: None,
            state,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = unit.into();
        self
    }

    pub fn with_source(mut self, source: impl Into<NodeRef>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    // ── Accessors ──

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn unit(&self) -> &str {
        &self.unit
    }

    pub fn kind(&self) -> OpKind {
        self.operation.kind()
    }

    pub fn operation(&self) -> &Operation<Input> {
        &self.operation
    }

    pub fn source(&self) -> Option<&NodeRef> {
        self.source.as_ref()
    }

    /// Handle of the linked source node, if linked and sourced.
    pub fn linked_source(&self) -> Option<NodeId> {
        self.wiring.as_ref().and_then(|w| w.source)
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    /// Value before the most recent evaluation.
    pub fn previous(&self) -> f64 {
        self.previous
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// True when the last evaluation could not compute a value.
    pub fn is_invalid(&self) -> bool {
        self.invalid
    }

    pub fn is_linked(&self) -> bool {
        self.wiring.is_some()
    }

    // ── Mutators ──

    pub fn enable(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Rewire the source. The node must be linked again before it can tick.
    pub fn set_source(&mut self, source: Option<NodeRef>) {
        self.source = source;
        self.wiring = None;
    }

    /// Queue a one-shot value that overrides the input on the next tick.
    pub fn set_value(&mut self, value: f64) {
        self.state.pushed = Some(value);
    }

    /// Whether a pushed value is waiting for the next tick.
    pub fn has_pending_value(&self) -> bool {
        self.state.pushed.is_some()
    }

    /// Arm a countdown timer. Returns false for every other kind.
    pub fn trigger(&mut self) -> bool {
        if self.kind() == OpKind::CountDownTimer {
            self.state.trigger = true;
            true
        } else {
            false
        }
    }

    /// Reseed the random generator of a `Random` node.
    pub fn reseed(&mut self, seed: u64) {
        if self.state.rng.is_some() {
            self.state.rng = Some(StdRng::seed_from_u64(seed));
        }
    }

    pub(crate) fn wiring(&self) -> Option<&Wiring> {
        self.wiring.as_ref()
    }

    pub(crate) fn set_wiring(&mut self, wiring: Wiring) {
        self.wiring = Some(wiring);
    }

    pub(crate) fn clear_wiring(&mut self) {
        self.wiring = None;
    }

    // ── Evaluation ──

    /// Run one tick of this node.
    ///
    /// `source` is the upstream node's current value, `op` the operation
    /// with every parameter already read. Disabled nodes are left untouched.
    pub fn evaluate(&mut self, source: Option<f64>, op: &Operation<f64>) {
        if !self.enabled {
            return;
        }

        self.previous = self.value;
        self.invalid = false;

        let sv = match self.state.pushed.take() {
            Some(pushed) => {
                tracing::debug!("Node '{}' consumed pushed value {}", self.id, pushed);
                self.value = pushed;
                pushed
            }
            None => source.unwrap_or(self.value),
        };

        match *op {
            Operation::Normal => self.value = sv,
            Operation::Min => {
                if sv < self.value {
                    self.value = sv;
                }
            }
            Operation::Max => {
                if sv > self.value {
                    self.value = sv;
                }
            }
            Operation::Counter => {
                if sv > EDGE_LEVEL && self.state.last_input <= EDGE_LEVEL {
                    self.value += 1.0;
                }
                self.state.last_input = sv;
            }
            Operation::Average { window } => {
                let filter = self
                    .state
                    .filter
                    .get_or_insert_with(|| MovingAverage::new(window));
                self.value = filter.update(sv);
            }
            Operation::Sine { amplitude, offset } => {
                let phase = self.state.tick as f64 / SINE_TICKS_PER_RADIAN;
                self.value = amplitude * phase.sin() + offset;
                self.state.tick += 1;
            }
            Operation::Square { period } => {
                let period = period.round();
                if period >= 1.0 {
                    let period = period as i64;
                    self.value = if self.state.tick >= 0 { 1.0 } else { 0.0 };
                    self.state.tick += 1;
                    if self.state.tick >= period {
                        self.state.tick = -period;
                    }
                } else {
                    tracing::warn!(
                        "Node '{}' has no usable period ({}); keeping value {}",
                        self.id,
                        period,
                        self.value
                    );
                    self.invalid = true;
                }
            }
            Operation::Random { offset, factor } => {
                let rng = self.state.rng.get_or_insert_with(StdRng::from_entropy);
                self.value = offset + factor * rng.gen::<f64>();
            }
            Operation::Limit {
                min_limit,
                max_limit,
            } => {
                self.value = if sv > max_limit {
                    max_limit
                } else if sv < min_limit {
                    min_limit
                } else {
                    sv
                };
            }
            Operation::Multiply { factor } => self.value = sv * factor,
            Operation::Division { divider } => {
                if divider == 0.0 {
                    tracing::warn!(
                        "Node '{}' divided by zero; keeping value {}",
                        self.id,
                        self.value
                    );
                    self.invalid = true;
                } else {
                    self.value = sv / divider;
                }
            }
            Operation::MultiplyAdd { factor, term } => self.value = sv * factor + term,
            Operation::Subtract { term } => self.value = sv - term,
            Operation::Addition { term } => self.value = sv + term,
            Operation::Absolute => self.value = sv.abs(),
            Operation::Above { threshold } => {
                self.value = if sv > threshold { 1.0 } else { 0.0 };
            }
            Operation::Below { threshold } => {
                self.value = if sv < threshold { 1.0 } else { 0.0 };
            }
            Operation::CountDownTimer => {
                if self.value > 0.0 {
                    self.value = (self.value - 1.0).max(0.0);
                }
                if self.state.trigger {
                    self.value = COUNTDOWN_RELOAD;
                    self.state.trigger = false;
                }
                self.state.last_input = sv;
            }
            // Rejected at link time; only the input is tracked.
            Operation::RateLimit => self.state.last_input = sv,
        }
    }
}
