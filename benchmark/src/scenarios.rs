// SPDX-License-Identifier: Apache-2.0

//! Benchmark scenarios: baseline and instrumented clean/build cycles.
//!
//! Every iteration fully cleans and then fully builds the solution;
//! iterations never overlap, so the only state carried between them is
//! whatever the external build tool leaves on disk (which the clean step
//! removes).

use weavebench_core::{BuildDriver, BuildProperties, ScenarioConfig, WeaveBenchResult};

use crate::harness::BenchmarkHarness;
use crate::metrics::{BenchmarkCategory, BenchmarkResult};

/// Run the uninstrumented baseline scenario.
pub fn run_baseline(
    driver: &BuildDriver,
    harness: &BenchmarkHarness,
) -> WeaveBenchResult<BenchmarkResult> {
    let properties = BuildProperties::baseline();

    tracing::info!(solution = %driver.solution().display(), "Running baseline scenario");
    let samples = harness.try_run(|| driver.clean(), || driver.build(&properties))?;

    Ok(BenchmarkResult::timed(
        "build_baseline",
        BenchmarkCategory::Baseline,
        samples,
        harness.should_keep_samples(),
    ))
}

/// Run one instrumented scenario at the configured sampling fractions.
pub fn run_scenario(
    driver: &BuildDriver,
    harness: &BenchmarkHarness,
    scenario: &ScenarioConfig,
) -> WeaveBenchResult<BenchmarkResult> {
    let properties = BuildProperties::instrumented(&scenario.sampling);
    let name = scenario_name(scenario);

    tracing::info!(
        solution = %driver.solution().display(),
        types_percentage = scenario.types_percentage,
        members_percentage = scenario.members_percentage,
        "Running instrumented scenario"
    );
    let samples = harness.try_run(|| driver.clean(), || driver.build(&properties))?;

    Ok(BenchmarkResult::timed(
        name,
        BenchmarkCategory::Instrumented,
        samples,
        harness.should_keep_samples(),
    )
    .with_metadata("types_percentage", scenario.types_percentage)
    .with_metadata("members_percentage", scenario.members_percentage)
    .with_metadata("types_stride", scenario.sampling.types.get())
    .with_metadata("members_stride", scenario.sampling.members.get()))
}

/// Canonical scenario name, e.g. `build_instrumented_t10_m50`.
pub fn scenario_name(scenario: &ScenarioConfig) -> String {
    format!(
        "build_instrumented_t{}_m{}",
        scenario.types_percentage, scenario.members_percentage
    )
}
