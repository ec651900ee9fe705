//! YAML benchmark configuration with strict validation.
//!
//! Parses a raw config with serde defaults, then validates it into typed
//! values. A percentage that yields no integer stride fails here, before any
//! external process is started.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{WeaveBenchError, WeaveBenchResult};
use crate::sampler::SamplingConfig;

/// The compiled-in scenario matrix used when none is configured:
/// types percentage x members percentage.
pub const DEFAULT_SCENARIO_MATRIX: [(u32, u32); 12] = [
    (1, 10),
    (1, 50),
    (1, 100),
    (10, 10),
    (10, 50),
    (10, 100),
    (50, 10),
    (50, 50),
    (50, 100),
    (100, 10),
    (100, 50),
    (100, 100),
];

/// Raw scenario as parsed from YAML (before validation).
#[derive(Debug, Deserialize)]
struct RawScenario {
    types_percentage: u32,
    members_percentage: u32,
}

/// Raw configuration file.
#[derive(Debug, Deserialize)]
struct RawConfig {
    #[serde(default = "default_build_tool")]
    build_tool: String,
    solution: String,
    #[serde(default = "default_iterations")]
    iterations: u64,
    #[serde(default = "default_warmup")]
    warmup: u64,
    #[serde(default = "default_baseline")]
    baseline: bool,
    #[serde(default)]
    scenarios: Option<Vec<RawScenario>>,
}

fn default_build_tool() -> String {
    "dotnet".to_string()
}

fn default_iterations() -> u64 {
    5
}

fn default_warmup() -> u64 {
    1
}

fn default_baseline() -> bool {
    true
}

/// A validated benchmark scenario.
#[derive(Debug, Clone)]
pub struct ScenarioConfig {
    pub types_percentage: u32,
    pub members_percentage: u32,
    /// Strides derived from the percentages.
    pub sampling: SamplingConfig,
}

/// Complete validated configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Build tool executable, e.g. `dotnet`.
    pub build_tool: String,
    /// Solution handed to every clean/build invocation.
    pub solution: PathBuf,
    /// Measured iterations per scenario.
    pub iterations: u64,
    /// Warmup iterations per scenario (not recorded).
    pub warmup: u64,
    /// Whether to run the uninstrumented baseline first.
    pub baseline: bool,
    /// Instrumented scenarios, in execution order.
    pub scenarios: Vec<ScenarioConfig>,
}

/// Configuration loader with strict validation.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load and validate configuration from a YAML file.
    pub fn load_file(path: impl AsRef<Path>) -> WeaveBenchResult<Config> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(WeaveBenchError::ConfigNotFound {
                path: path.to_path_buf(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| WeaveBenchError::Io {
            context: "reading config file",
            source: e,
        })?;

        Self::load_string(&content)
    }

    /// Load and validate configuration from a YAML string.
    pub fn load_string(content: &str) -> WeaveBenchResult<Config> {
        let raw: RawConfig =
            serde_yaml::from_str(content).map_err(|e| WeaveBenchError::ConfigParse {
                message: format!("YAML parse error: {e}"),
            })?;

        Self::validate(raw)
    }

    fn validate(raw: RawConfig) -> WeaveBenchResult<Config> {
        if raw.solution.trim().is_empty() {
            return Err(WeaveBenchError::ConfigInvalid {
                field: "solution",
                reason: "Solution path cannot be empty".to_string(),
            });
        }

        if raw.iterations == 0 {
            return Err(WeaveBenchError::ConfigInvalid {
                field: "iterations",
                reason: "At least one measured iteration is required".to_string(),
            });
        }

        let raw_scenarios: Vec<(u32, u32)> = match raw.scenarios {
            Some(scenarios) => scenarios
                .into_iter()
                .map(|s| (s.types_percentage, s.members_percentage))
                .collect(),
            None => DEFAULT_SCENARIO_MATRIX.to_vec(),
        };

        let mut scenarios = Vec::with_capacity(raw_scenarios.len());
        for (types_percentage, members_percentage) in raw_scenarios {
            let sampling = SamplingConfig::from_percentages(types_percentage, members_percentage)?;
            scenarios.push(ScenarioConfig {
                types_percentage,
                members_percentage,
                sampling,
            });
        }

        Ok(Config {
            build_tool: raw.build_tool,
            solution: PathBuf::from(raw.solution),
            iterations: raw.iterations,
            warmup: raw.warmup,
            baseline: raw.baseline,
            scenarios,
        })
    }
}
