//! Graph files
//!
//! A graph file is TOML with an optional `[run]` table and one `[[node]]`
//! table per node, in evaluation order:
//!
//! ```toml
//! [run]
//! interval_ms = 100
//! ticks = 50
//!
//! [[node]]
//! id = "sin"
//! kind = "Sine"
//! amplitude = 2.0
//!
//! [[node]]
//! id = "scaled"
//! kind = "Multiply"
//! source = "sin"
//! factor = "gain"   # parameters may name another node
//! ```
//!
//! # Example
//!
//! ```ignore
//! use pae::config::GraphFile;
//!
//! let file = GraphFile::load("graphs/wiring.toml")?;
//! let mut motor = file.build_motor();
//! motor.initiate()?;
//! ```

pub mod settings;

pub use settings::*;

use crate::error::{PaeError, Result};
use crate::graph::{Input, Motor, Node, OpKind, Operation, Params, DEFAULT_WINDOW};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A parameter as written in a graph file: a number or a node id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Value(f64),
    Ref(String),
}

impl From<&ParamValue> for Input {
    fn from(value: &ParamValue) -> Self {
        match value {
            ParamValue::Value(v) => Input::Value(*v),
            ParamValue::Ref(id) => Input::from(id.as_str()),
        }
    }
}

impl From<f64> for ParamValue {
    fn from(value: f64) -> Self {
        ParamValue::Value(value)
    }
}

impl From<&str> for ParamValue {
    fn from(id: &str) -> Self {
        ParamValue::Ref(id.to_string())
    }
}

/// One `[[node]]` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeConfig {
    pub id: String,

    /// Display name; defaults to the id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub unit: String,

    #[serde(default = "default_true")]
    pub enabled: bool,

    pub kind: OpKind,

    /// Id of the upstream node
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub term: Option<ParamValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub factor: Option<ParamValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub divider: Option<ParamValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_limit: Option<ParamValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_limit: Option<ParamValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<ParamValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub threshold: Option<ParamValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub period: Option<ParamValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amplitude: Option<ParamValue>,

    /// Moving-average window for `Average` nodes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub window: Option<usize>,
}

fn default_true() -> bool {
    true
}

impl NodeConfig {
    /// Minimal config: enabled, no source, default parameters.
    pub fn new(id: impl Into<String>, kind: OpKind) -> Self {
        Self {
            id: id.into(),
            name: None,
            description: String::new(),
            unit: String::new(),
            enabled: true,
            kind,
            source: None,
            term: None,
            factor: None,
            divider: None,
            max_limit: None,
            min_limit: None,
            offset: None,
            threshold: None,
            period: None,
            amplitude: None,
            window: None,
        }
    }

    /// Parameter set with unspecified entries at their defaults.
    pub fn params(&self) -> Params {
        let defaults = Params::default();
        let pick = |value: &Option<ParamValue>, default: Input| {
            value.as_ref().map(Input::from).unwrap_or(default)
        };

        Params {
            term: pick(&self.term, defaults.term),
            factor: pick(&self.factor, defaults.factor),
            divider: pick(&self.divider, defaults.divider),
            max_limit: pick(&self.max_limit, defaults.max_limit),
            min_limit: pick(&self.min_limit, defaults.min_limit),
            offset: pick(&self.offset, defaults.offset),
            threshold: pick(&self.threshold, defaults.threshold),
            period: pick(&self.period, defaults.period),
            amplitude: pick(&self.amplitude, defaults.amplitude),
            window: self.window.unwrap_or(DEFAULT_WINDOW),
        }
    }

    /// Build the (unlinked) node this table describes.
    pub fn to_node(&self) -> Node {
        let operation = Operation::from_kind(self.kind, &self.params());
        let mut node = Node::new(self.id.clone(), operation)
            .with_name(self.name.clone().unwrap_or_else(|| self.id.clone()))
            .with_description(self.description.clone())
            .with_unit(self.unit.clone())
            .with_enabled(self.enabled);

        if let Some(source) = &self.source {
            node = node.with_source(source.as_str());
        }
        node
    }
}

/// A complete graph file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphFile {
    #[serde(default)]
    pub run: RunSettings,

    #[serde(default, rename = "node")]
    pub nodes: Vec<NodeConfig>,
}

impl GraphFile {
    /// Parse and validate a graph from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let file: GraphFile = toml::from_str(content)
            .map_err(|e| PaeError::Config(format!("Failed to parse graph file: {}", e)))?;
        file.validate()?;
        Ok(file)
    }

    /// Serialize to TOML text
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| PaeError::Serialization(format!("Failed to serialize graph: {}", e)))
    }

    /// Load a graph file from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            PaeError::Config(format!("Failed to read graph file {}: {}", path.display(), e))
        })?;

        let file = Self::from_toml_str(&content)
            .map_err(|e| e.with_context(path.display().to_string()))?;
        tracing::info!(
            "Loaded graph with {} nodes from {}",
            file.nodes.len(),
            path.display()
        );
        Ok(file)
    }

    /// Save the graph file to disk
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let content = self.to_toml_string()?;
        std::fs::write(path, content).map_err(|e| {
            PaeError::Config(format!("Failed to write graph file {}: {}", path.display(), e))
        })
    }

    /// Structural checks that need no linking.
    pub fn validate(&self) -> Result<()> {
        if self.nodes.is_empty() {
            return Err(PaeError::Config("Graph has no nodes".to_string()));
        }
        if let Some(pos) = self.nodes.iter().position(|n| n.id.trim().is_empty()) {
            return Err(PaeError::Config(format!("Node #{} has an empty id", pos + 1)));
        }
        Ok(())
    }

    /// Build an unlinked motor with every node in file order.
    pub fn build_motor(&self) -> Motor {
        let mut motor = match self.run.seed {
            Some(seed) => Motor::with_seed(seed),
            None => Motor::new(),
        };
        for config in &self.nodes {
            motor.add_node(config.to_node());
        }
        motor
    }

    /// Built-in demo: a sine and a square wave with trackers and a counter.
    pub fn demo() -> Self {
        let named = |id: &str, name: &str, kind: OpKind| NodeConfig {
            name: Some(name.to_string()),
            ..NodeConfig::new(id, kind)
        };

        GraphFile {
            run: RunSettings {
                ticks: Some(100),
                ..RunSettings::default()
            },
            nodes: vec![
                named("sin", "Sine", OpKind::Sine),
                NodeConfig {
                    period: Some(ParamValue::Value(10.0)),
                    ..named("square", "Square", OpKind::Square)
                },
                NodeConfig {
                    source: Some("sin".to_string()),
                    ..named("min", "Sine minimum", OpKind::Min)
                },
                NodeConfig {
                    source: Some("sin".to_string()),
                    ..named("max", "Sine maximum", OpKind::Max)
                },
                NodeConfig {
                    source: Some("square".to_string()),
                    ..named("count", "Square edges", OpKind::Counter)
                },
            ],
        }
    }
}
