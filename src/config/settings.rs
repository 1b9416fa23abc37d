//! Run settings: how the CLI drives a graph.

use serde::{Deserialize, Serialize};

/// Default tick interval in milliseconds
pub const DEFAULT_INTERVAL_MS: u64 = 100;

/// The `[run]` table of a graph file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSettings {
    /// Time between ticks
    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,

    /// Number of ticks to run; `None` runs until interrupted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ticks: Option<u64>,

    /// Seed for `Random` nodes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

fn default_interval_ms() -> u64 {
    DEFAULT_INTERVAL_MS
}

impl Default for RunSettings {
    fn default() -> Self {
        Self {
            interval_ms: DEFAULT_INTERVAL_MS,
            ticks: None,
            seed: None,
        }
    }
}

impl RunSettings {
    pub fn interval(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.interval_ms)
    }
}
