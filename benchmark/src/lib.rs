// SPDX-License-Identifier: Apache-2.0

//! WeaveBench Benchmark Driver
//!
//! Measures the compile-time overhead of aspect-weaving instrumentation by
//! driving an external build tool through repeated clean/build cycles.
//!
//! # Scenarios
//!
//! - **Baseline**: instrumentation disabled
//! - **Instrumented**: weaving enabled at a {types%, members%} sampling pair
//!   from the compiled-in matrix {1,10,50,100} x {10,50,100}
//!
//! # Data Output
//!
//! All runs output JSON files with standardized metrics for comparison.

pub mod harness;
pub mod metrics;
pub mod reporter;
pub mod scenarios;

pub use harness::BenchmarkHarness;
pub use metrics::{
    BenchmarkCategory, BenchmarkReport, BenchmarkResult, BuildStats, SystemInfo,
};
pub use reporter::JsonReporter;
pub use scenarios::{run_baseline, run_scenario, scenario_name};
