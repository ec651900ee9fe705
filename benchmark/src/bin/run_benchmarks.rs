// SPDX-License-Identifier: Apache-2.0

//! CLI tool to run the build overhead benchmarks and generate reports.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use weavebench_benchmark::{
    run_baseline, run_scenario, scenario_name, BenchmarkHarness, BenchmarkReport, BuildStats,
    JsonReporter,
};
use weavebench_core::{
    BuildDriver, Config, ConfigLoader, SamplingConfig, ScenarioConfig, DEFAULT_SCENARIO_MATRIX,
};

#[derive(Parser)]
#[command(name = "run_benchmarks")]
#[command(about = "Run WeaveBench build benchmarks and generate JSON reports")]
struct Args {
    /// YAML configuration file (replaces --solution/--build-tool)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Solution to clean and build (required without --config)
    #[arg(short, long)]
    solution: Option<PathBuf>,

    /// Build tool executable
    #[arg(long, default_value = "dotnet")]
    build_tool: String,

    /// Output directory for benchmark data
    #[arg(short, long, default_value = "data")]
    output: PathBuf,

    /// Number of measured iterations per scenario
    #[arg(short, long, default_value_t = 5)]
    iterations: u64,

    /// Scenarios to run as TYPESxMEMBERS pairs, e.g. 10x50 (all if not specified)
    #[arg(long)]
    scenario: Option<Vec<String>>,

    /// Skip the uninstrumented baseline
    #[arg(long)]
    no_baseline: bool,

    /// Run in quick mode (single iteration, no warmup)
    #[arg(long)]
    quick: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    init_tracing(args.verbose);

    let config = load_config(&args)?;
    let iterations = if args.quick { 1 } else { config.iterations };
    let warmup = if args.quick { 0 } else { config.warmup };

    println!("WeaveBench Benchmark Suite");
    println!("==========================");
    println!("Build tool: {}", config.build_tool);
    println!("Solution: {}", config.solution.display());
    println!("Output directory: {:?}", args.output);
    println!("Iterations: {iterations} (warmup: {warmup})");
    println!();

    let reporter = JsonReporter::new(&args.output)?;
    let mut report = BenchmarkReport::new();

    let driver = BuildDriver::new(config.build_tool.clone(), config.solution.clone());
    let harness = BenchmarkHarness::new().warmup(warmup).iterations(iterations);

    // Determine which scenarios to run
    let run_all = args.scenario.is_none();
    let requested: Vec<String> = args.scenario.unwrap_or_default();
    let should_run =
        |tag: &str| -> bool { run_all || requested.iter().any(|s| s.eq_ignore_ascii_case(tag)) };

    if config.baseline && !args.no_baseline && should_run("baseline") {
        println!("Running baseline build...");
        let result = run_baseline(&driver, &harness)?;
        println!("  ✓ {}", result.name);
        report.add_result(result);
    }

    for scenario in &config.scenarios {
        let tag = format!(
            "{}x{}",
            scenario.types_percentage, scenario.members_percentage
        );
        if !should_run(&tag) {
            continue;
        }

        println!(
            "Running instrumented build at {}% types / {}% members...",
            scenario.types_percentage, scenario.members_percentage
        );
        let result = run_scenario(&driver, &harness, scenario)?;
        println!("  ✓ {}", scenario_name(scenario));
        report.add_result(result);
    }

    let path = reporter.save(&report)?;
    println!();
    println!("Benchmark report saved to: {path:?}");
    println!();

    print_summary(&report);

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn load_config(args: &Args) -> anyhow::Result<Config> {
    if let Some(path) = &args.config {
        return ConfigLoader::load_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display()));
    }

    let solution = args
        .solution
        .clone()
        .context("Either --config or --solution is required")?;

    let mut scenarios = Vec::with_capacity(DEFAULT_SCENARIO_MATRIX.len());
    for (types_percentage, members_percentage) in DEFAULT_SCENARIO_MATRIX {
        scenarios.push(ScenarioConfig {
            types_percentage,
            members_percentage,
            sampling: SamplingConfig::from_percentages(types_percentage, members_percentage)?,
        });
    }

    Ok(Config {
        build_tool: args.build_tool.clone(),
        solution,
        iterations: args.iterations,
        warmup: 1,
        baseline: true,
        scenarios,
    })
}

fn print_summary(report: &BenchmarkReport) {
    println!("Summary");
    println!("-------");
    println!();

    let baseline_median = report.baseline().map(|r| r.stats.median_ms);

    for result in &report.results {
        let median = result.stats.median_ms;
        match baseline_median {
            Some(base) if base > 0.0 => {
                let overhead = (median / base - 1.0) * 100.0;
                println!(
                    "{}: median={} ({overhead:+.1}% vs baseline)",
                    result.name,
                    BuildStats::format_duration(median)
                );
            }
            _ => {
                println!(
                    "{}: median={}",
                    result.name,
                    BuildStats::format_duration(median)
                );
            }
        }
    }
}
