//! Configuration for disassembly runs.
//!
//! Defaults reproduce the unbounded exploration of the format's reference
//! tooling; budgets are opt-in.

use serde::{Deserialize, Serialize};

/// Master configuration for an analysis run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Control-flow traversal settings.
    pub traversal: TraversalConfig,
    pub logging: LoggingConfig,
}

/// Output encoding for [`crate::logging::init_tracing`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub format: LogFormat,
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: LogFormat::Text,
            filter: "info".to_string(),
        }
    }
}

/// Settings for the control-flow-seeded traversal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TraversalConfig {
    /// Upper bound on instructions decoded in one run. `None` means unbounded.
    pub max_instructions: Option<usize>,
}

impl TraversalConfig {
    /// Configuration that stops after `limit` decoded instructions.
    pub fn with_budget(limit: usize) -> Self {
        Self {
            max_instructions: Some(limit),
        }
    }
}
