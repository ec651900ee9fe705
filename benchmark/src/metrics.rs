// SPDX-License-Identifier: Apache-2.0

//! Standardized metrics types for benchmark results.
//!
//! Build durations are reported in milliseconds with percentile statistics
//! so instrumented runs can be compared against the baseline.

use std::collections::HashMap;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sysinfo::System;

/// Categories of benchmarks supported by the driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BenchmarkCategory {
    /// Uninstrumented baseline builds
    Baseline,
    /// Builds with weaving enabled at some sampling fraction
    Instrumented,
    /// In-process selection microbenchmarks
    Selection,
}

impl std::fmt::Display for BenchmarkCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BenchmarkCategory::Baseline => write!(f, "baseline"),
            BenchmarkCategory::Instrumented => write!(f, "instrumented"),
            BenchmarkCategory::Selection => write!(f, "selection"),
        }
    }
}

/// Build duration statistics over one scenario's iterations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildStats {
    /// Minimum observed duration in milliseconds
    pub min_ms: f64,
    /// Maximum observed duration in milliseconds
    pub max_ms: f64,
    /// Arithmetic mean in milliseconds
    pub mean_ms: f64,
    /// Median (p50) in milliseconds
    pub median_ms: f64,
    /// 95th percentile in milliseconds
    pub p95_ms: f64,
    /// Standard deviation in milliseconds
    pub std_dev_ms: f64,
    /// Raw per-iteration durations in milliseconds (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub samples_ms: Option<Vec<f64>>,
}

impl BuildStats {
    /// Calculate statistics from per-iteration durations.
    pub fn from_samples(samples: Vec<Duration>, keep_raw: bool) -> Self {
        if samples.is_empty() {
            return Self {
                min_ms: 0.0,
                max_ms: 0.0,
                mean_ms: 0.0,
                median_ms: 0.0,
                p95_ms: 0.0,
                std_dev_ms: 0.0,
                samples_ms: None,
            };
        }

        let mut millis: Vec<f64> = samples
            .iter()
            .map(|d| d.as_secs_f64() * 1_000.0)
            .collect();
        millis.sort_by(|a, b| a.total_cmp(b));
        let len = millis.len();

        let min_ms = millis[0];
        let max_ms = millis[len - 1];
        let mean_ms = millis.iter().sum::<f64>() / len as f64;
        let median_ms = millis[len / 2];
        let p95_ms = millis[((len as f64 * 0.95) as usize).min(len - 1)];

        let variance = millis
            .iter()
            .map(|&x| (x - mean_ms) * (x - mean_ms))
            .sum::<f64>()
            / len as f64;
        let std_dev_ms = variance.sqrt();

        Self {
            min_ms,
            max_ms,
            mean_ms,
            median_ms,
            p95_ms,
            std_dev_ms,
            samples_ms: keep_raw.then_some(millis),
        }
    }

    /// Format a millisecond duration in human-readable form.
    pub fn format_duration(ms: f64) -> String {
        if ms < 1_000.0 {
            format!("{ms:.1}ms")
        } else {
            format!("{:.2}s", ms / 1_000.0)
        }
    }
}

/// System information captured at benchmark time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemInfo {
    /// Operating system name
    pub os: String,
    /// OS version
    pub os_version: String,
    /// Kernel version (Linux)
    pub kernel_version: Option<String>,
    /// CPU model name
    pub cpu_model: String,
    /// Number of CPU cores
    pub cpu_cores: usize,
    /// Total system memory in bytes
    pub memory_bytes: u64,
    /// Hostname
    pub hostname: String,
}

impl SystemInfo {
    /// Collect current system information.
    pub fn collect() -> Self {
        let mut sys = System::new_all();
        sys.refresh_all();

        Self {
            os: System::name().unwrap_or_else(|| "Unknown".to_string()),
            os_version: System::os_version().unwrap_or_else(|| "Unknown".to_string()),
            kernel_version: System::kernel_version(),
            cpu_model: sys
                .cpus()
                .first()
                .map(|cpu| cpu.brand().to_string())
                .unwrap_or_else(|| "Unknown".to_string()),
            cpu_cores: sys.cpus().len(),
            memory_bytes: sys.total_memory(),
            hostname: System::host_name().unwrap_or_else(|| "Unknown".to_string()),
        }
    }
}

/// A single benchmark result with all associated metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchmarkResult {
    /// Name of the benchmark
    pub name: String,
    /// Category of the benchmark
    pub category: BenchmarkCategory,
    /// Build duration statistics
    pub stats: BuildStats,
    /// Number of measured iterations
    pub iterations: u64,
    /// Additional metadata specific to this benchmark
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub metadata: HashMap<String, serde_json::Value>,
}

impl BenchmarkResult {
    /// Create a result from per-iteration durations.
    pub fn timed(
        name: impl Into<String>,
        category: BenchmarkCategory,
        samples: Vec<Duration>,
        keep_raw_samples: bool,
    ) -> Self {
        let iterations = samples.len() as u64;
        Self {
            name: name.into(),
            category,
            stats: BuildStats::from_samples(samples, keep_raw_samples),
            iterations,
            metadata: HashMap::new(),
        }
    }

    /// Add metadata to the result.
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Serialize) -> Self {
        self.metadata.insert(
            key.into(),
            serde_json::to_value(value).unwrap_or(serde_json::Value::Null),
        );
        self
    }
}

/// Complete benchmark suite report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchmarkReport {
    /// Suite identifier
    pub benchmark_suite: String,
    /// Driver version
    pub version: String,
    /// Timestamp when benchmarks were run
    pub timestamp: DateTime<Utc>,
    /// System information
    pub system_info: SystemInfo,
    /// Individual benchmark results
    pub results: Vec<BenchmarkResult>,
}

impl BenchmarkReport {
    /// Create a new benchmark report.
    pub fn new() -> Self {
        Self {
            benchmark_suite: "weavebench".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            timestamp: Utc::now(),
            system_info: SystemInfo::collect(),
            results: Vec::new(),
        }
    }

    /// Add a result to the report.
    pub fn add_result(&mut self, result: BenchmarkResult) {
        self.results.push(result);
    }

    /// Find the baseline result, if one was recorded.
    pub fn baseline(&self) -> Option<&BenchmarkResult> {
        self.results
            .iter()
            .find(|r| r.category == BenchmarkCategory::Baseline)
    }
}

impl Default for BenchmarkReport {
    fn default() -> Self {
        Self::new()
    }
}
