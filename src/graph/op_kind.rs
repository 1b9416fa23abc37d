//! Operation kind enumeration.
//!
//! `OpKind` is the data-less tag of an [`Operation`](crate::graph::Operation).
//! It is what graph files name in their `kind` field and what the status
//! table prints.

use serde::{Deserialize, Serialize};

/// Kinds of operation a node can perform each tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OpKind {
    // Pass-through and trackers
    Normal,
    Min,
    Max,
    Counter,
    Average,

    // Generators
    Sine,
    Square,
    Random,

    // Arithmetic
    Limit,
    Multiply,
    Division,
    #[serde(alias = "Multiply_Add")]
    MultiplyAdd,
    Subtract,
    Addition,
    Absolute,

    // Comparators
    Above,
    Below,

    // Timers
    CountDownTimer,
    RateLimit,
}

impl OpKind {
    /// Name as written in graph files and the status table.
    pub fn name(&self) -> &'static str {
        match self {
            OpKind::Normal => "Normal",
            OpKind::Min => "Min",
            OpKind::Max => "Max",
            OpKind::Counter => "Counter",
            OpKind::Average => "Average",
            OpKind::Sine => "Sine",
            OpKind::Square => "Square",
            OpKind::Random => "Random",
            OpKind::Limit => "Limit",
            OpKind::Multiply => "Multiply",
            OpKind::Division => "Division",
            OpKind::MultiplyAdd => "MultiplyAdd",
            OpKind::Subtract => "Subtract",
            OpKind::Addition => "Addition",
            OpKind::Absolute => "Absolute",
            OpKind::Above => "Above",
            OpKind::Below => "Below",
            OpKind::CountDownTimer => "CountDownTimer",
            OpKind::RateLimit => "RateLimit",
        }
    }

    /// Get all operation kinds.
    pub fn all() -> &'static [OpKind] {
        &[
            OpKind::Normal,
            OpKind::Min,
            OpKind::Max,
            OpKind::Counter,
            OpKind::Average,
            OpKind::Sine,
            OpKind::Square,
            OpKind::Random,
            OpKind::Limit,
            OpKind::Multiply,
            OpKind::Division,
            OpKind::MultiplyAdd,
            OpKind::Subtract,
            OpKind::Addition,
            OpKind::Absolute,
            OpKind::Above,
            OpKind::Below,
            OpKind::CountDownTimer,
            OpKind::RateLimit,
        ]
    }

    /// Kinds that cannot produce anything meaningful without an upstream node.
    pub fn requires_source(&self) -> bool {
        matches!(self, OpKind::Counter | OpKind::RateLimit)
    }

    /// Get a short description of what this kind does.
    pub fn description(&self) -> &'static str {
        match self {
            OpKind::Normal => "Copies the input value.",
            OpKind::Min => "Tracks the smallest input seen.",
            OpKind::Max => "Tracks the largest input seen.",
            OpKind::Counter => "Counts rising edges across 0.5 on the source.",
            OpKind::Average => "Moving average over the last `window` inputs.",
            OpKind::Sine => "amplitude * sin(tick / 20) + offset.",
            OpKind::Square => "Square wave, high for `period` ticks then low for `period` ticks.",
            OpKind::Random => "offset + factor * uniform random in [0, 1).",
            OpKind::Limit => "Clamps the input to [min_limit, max_limit].",
            OpKind::Multiply => "input * factor.",
            OpKind::Division => "input / divider.",
            OpKind::MultiplyAdd => "input * factor + term.",
            OpKind::Subtract => "input - term.",
            OpKind::Addition => "input + term.",
            OpKind::Absolute => "Absolute value of the input.",
            OpKind::Above => "1 when the input is above threshold, else 0.",
            OpKind::Below => "1 when the input is below threshold, else 0.",
            OpKind::CountDownTimer => "Counts down from 200 after a trigger.",
            OpKind::RateLimit => "Reserved; rejected when linking.",
        }
    }
}

impl std::fmt::Display for OpKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
