//! Tagged operation variants.
//!
//! `Operation<P>` carries exactly the parameters each kind needs. The
//! parameter type changes over a node's lifecycle:
//!
//! - `Operation<Input>` as constructed (literals or textual references),
//! - `Operation<Param>` after linking (literals or node handles),
//! - `Operation<f64>` for a single evaluation (every parameter read).

use crate::graph::op_kind::OpKind;
use crate::graph::param::Input;
use std::convert::Infallible;

/// Default moving-average window.
pub const DEFAULT_WINDOW: usize = 10;

/// An operation and its parameters.
#[derive(Debug, Clone, PartialEq)]
pub enum Operation<P> {
    Normal,
    Min,
    Max,
    Counter,
    Average { window: usize },
    Sine { amplitude: P, offset: P },
    Square { period: P },
    Random { offset: P, factor: P },
    Limit { min_limit: P, max_limit: P },
    Multiply { factor: P },
    Division { divider: P },
    MultiplyAdd { factor: P, term: P },
    Subtract { term: P },
    Addition { term: P },
    Absolute,
    Above { threshold: P },
    Below { threshold: P },
    CountDownTimer,
    RateLimit,
}

impl<P> Operation<P> {
    pub fn kind(&self) -> OpKind {
        match self {
            Operation::Normal => OpKind::Normal,
            Operation::Min => OpKind::Min,
            Operation::Max => OpKind::Max,
            Operation::Counter => OpKind::Counter,
            Operation::Average { .. } => OpKind::Average,
            Operation::Sine { .. } => OpKind::Sine,
            Operation::Square { .. } => OpKind::Square,
            Operation::Random { .. } => OpKind::Random,
            Operation::Limit { .. } => OpKind::Limit,
            Operation::Multiply { .. } => OpKind::Multiply,
            Operation::Division { .. } => OpKind::Division,
            Operation::MultiplyAdd { .. } => OpKind::MultiplyAdd,
            Operation::Subtract { .. } => OpKind::Subtract,
            Operation::Addition { .. } => OpKind::Addition,
            Operation::Absolute => OpKind::Absolute,
            Operation::Above { .. } => OpKind::Above,
            Operation::Below { .. } => OpKind::Below,
            Operation::CountDownTimer => OpKind::CountDownTimer,
            Operation::RateLimit => OpKind::RateLimit,
        }
    }

    /// Named parameters of this operation, in declaration order.
    pub fn params(&self) -> Vec<(&'static str, &P)> {
        match self {
            Operation::Sine { amplitude, offset } => {
                vec![("amplitude", amplitude), ("offset", offset)]
            }
            Operation::Square { period } => vec![("period", period)],
            Operation::Random { offset, factor } => vec![("offset", offset), ("factor", factor)],
            Operation::Limit {
                min_limit,
                max_limit,
            } => vec![("min_limit", min_limit), ("max_limit", max_limit)],
            Operation::Multiply { factor } => vec![("factor", factor)],
            Operation::Division { divider } => vec![("divider", divider)],
            Operation::MultiplyAdd { factor, term } => vec![("factor", factor), ("term", term)],
            Operation::Subtract { term } | Operation::Addition { term } => vec![("term", term)],
            Operation::Above { threshold } | Operation::Below { threshold } => {
                vec![("threshold", threshold)]
            }
            Operation::Normal
            | Operation::Min
            | Operation::Max
            | Operation::Counter
            | Operation::Average { .. }
            | Operation::Absolute
            | Operation::CountDownTimer
            | Operation::RateLimit => Vec::new(),
        }
    }

    /// Convert every parameter, stopping at the first failure.
    ///
    /// The closure receives the parameter name so errors can point at it.
    pub fn try_map<Q, E, F>(&self, mut f: F) -> Result<Operation<Q>, E>
    where
        F: FnMut(&'static str, &P) -> Result<Q, E>,
    {
        Ok(match self {
            Operation::Normal => Operation::Normal,
            Operation::Min => Operation::Min,
            Operation::Max => Operation::Max,
            Operation::Counter => Operation::Counter,
            Operation::Average { window } => Operation::Average { window: *window },
            Operation::Sine { amplitude, offset } => Operation::Sine {
                amplitude: f("amplitude", amplitude)?,
                offset: f("offset", offset)?,
            },
            Operation::Square { period } => Operation::Square {
                period: f("period", period)?,
            },
            Operation::Random { offset, factor } => Operation::Random {
                offset: f("offset", offset)?,
                factor: f("factor", factor)?,
            },
            Operation::Limit {
                min_limit,
                max_limit,
            } => Operation::Limit {
                min_limit: f("min_limit", min_limit)?,
                max_limit: f("max_limit", max_limit)?,
            },
            Operation::Multiply { factor } => Operation::Multiply {
                factor: f("factor", factor)?,
            },
            Operation::Division { divider } => Operation::Division {
                divider: f("divider", divider)?,
            },
            Operation::MultiplyAdd { factor, term } => Operation::MultiplyAdd {
                factor: f("factor", factor)?,
                term: f("term", term)?,
            },
            Operation::Subtract { term } => Operation::Subtract {
                term: f("term", term)?,
            },
            Operation::Addition { term } => Operation::Addition {
                term: f("term", term)?,
            },
            Operation::Absolute => Operation::Absolute,
            Operation::Above { threshold } => Operation::Above {
                threshold: f("threshold", threshold)?,
            },
            Operation::Below { threshold } => Operation::Below {
                threshold: f("threshold", threshold)?,
            },
            Operation::CountDownTimer => Operation::CountDownTimer,
            Operation::RateLimit => Operation::RateLimit,
        })
    }

    /// Infallible [`try_map`](Self::try_map).
    pub fn map<Q, F>(&self, mut f: F) -> Operation<Q>
    where
        F: FnMut(&P) -> Q,
    {
        match self.try_map(|_, p| Ok::<Q, Infallible>(f(p))) {
            Ok(op) => op,
            Err(never) => match never {},
        }
    }
}

/// Every reference-capable parameter, for building an operation from a kind.
///
/// Defaults match the engine's historical defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct Params {
    pub term: Input,
    pub factor: Input,
    pub divider: Input,
    pub max_limit: Input,
    pub min_limit: Input,
    pub offset: Input,
    pub threshold: Input,
    pub period: Input,
    pub amplitude: Input,
    pub window: usize,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            term: Input::Value(0.0),
            factor: Input::Value(1.0),
            divider: Input::Value(1.0),
            max_limit: Input::Value(0.0),
            min_limit: Input::Value(0.0),
            offset: Input::Value(0.0),
            threshold: Input::Value(0.0),
            period: Input::Value(1.0),
            amplitude: Input::Value(1.0),
            window: DEFAULT_WINDOW,
        }
    }
}

impl Operation<Input> {
    /// Build an operation of `kind`, taking only the parameters it uses.
    pub fn from_kind(kind: OpKind, params: &Params) -> Self {
        let p = params.clone();
        match kind {
            OpKind::Normal => Operation::Normal,
            OpKind::Min => Operation::Min,
            OpKind::Max => Operation::Max,
            OpKind::Counter => Operation::Counter,
            OpKind::Average => Operation::Average { window: p.window },
            OpKind::Sine => Operation::Sine {
                amplitude: p.amplitude,
                offset: p.offset,
            },
            OpKind::Square => Operation::Square { period: p.period },
            OpKind::Random => Operation::Random {
                offset: p.offset,
                factor: p.factor,
            },
            OpKind::Limit => Operation::Limit {
                min_limit: p.min_limit,
                max_limit: p.max_limit,
            },
            OpKind::Multiply => Operation::Multiply { factor: p.factor },
            OpKind::Division => Operation::Division { divider: p.divider },
            OpKind::MultiplyAdd => Operation::MultiplyAdd {
                factor: p.factor,
                term: p.term,
            },
            OpKind::Subtract => Operation::Subtract { term: p.term },
            OpKind::Addition => Operation::Addition { term: p.term },
            OpKind::Absolute => Operation::Absolute,
            OpKind::Above => Operation::Above {
                threshold: p.threshold,
            },
            OpKind::Below => Operation::Below {
                threshold: p.threshold,
            },
            OpKind::CountDownTimer => Operation::CountDownTimer,
            OpKind::RateLimit => Operation::RateLimit,
        }
    }

    pub fn sine(amplitude: impl Into<Input>, offset: impl Into<Input>) -> Self {
        Operation::Sine {
            amplitude: amplitude.into(),
            offset: offset.into(),
        }
    }

    pub fn square(period: impl Into<Input>) -> Self {
        Operation::Square {
            period: period.into(),
        }
    }

    pub fn limit(min_limit: impl Into<Input>, max_limit: impl Into<Input>) -> Self {
        Operation::Limit {
            min_limit: min_limit.into(),
            max_limit: max_limit.into(),
        }
    }

    pub fn multiply(factor: impl Into<Input>) -> Self {
        Operation::Multiply {
            factor: factor.into(),
        }
    }

    pub fn division(divider: impl Into<Input>) -> Self {
        Operation::Division {
            divider: divider.into(),
        }
    }

    pub fn addition(term: impl Into<Input>) -> Self {
        Operation::Addition { term: term.into() }
    }

    pub fn average(window: usize) -> Self {
        Operation::Average { window }
    }
}
