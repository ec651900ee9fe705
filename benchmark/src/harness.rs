// SPDX-License-Identifier: Apache-2.0

//! Benchmark harness for running and timing build cycles.
//!
//! Build invocations take seconds, so the harness times whole operations as
//! `Duration` samples rather than counting nanosecond-scale iterations.

use std::time::{Duration, Instant};

/// A benchmark harness for measuring operation wall-clock time.
pub struct BenchmarkHarness {
    /// Number of warmup iterations before measurement
    warmup_iterations: u64,
    /// Number of measurement iterations
    measurement_iterations: u64,
    /// Whether to keep raw sample data
    keep_raw_samples: bool,
}

impl BenchmarkHarness {
    /// Create a new benchmark harness with default settings.
    pub fn new() -> Self {
        Self {
            warmup_iterations: 1,
            measurement_iterations: 5,
            keep_raw_samples: true,
        }
    }

    /// Set the number of warmup iterations.
    pub fn warmup(mut self, iterations: u64) -> Self {
        self.warmup_iterations = iterations;
        self
    }

    /// Set the number of measurement iterations.
    pub fn iterations(mut self, iterations: u64) -> Self {
        self.measurement_iterations = iterations;
        self
    }

    /// Set whether to keep raw sample data.
    pub fn keep_samples(mut self, keep: bool) -> Self {
        self.keep_raw_samples = keep;
        self
    }

    /// Check if raw samples should be kept.
    pub fn should_keep_samples(&self) -> bool {
        self.keep_raw_samples
    }

    /// Run an infallible benchmark and collect duration samples.
    pub fn run<F>(&self, mut operation: F) -> Vec<Duration>
    where
        F: FnMut(),
    {
        for _ in 0..self.warmup_iterations {
            operation();
        }

        let mut samples = Vec::with_capacity(self.measurement_iterations as usize);
        for _ in 0..self.measurement_iterations {
            let start = Instant::now();
            operation();
            samples.push(start.elapsed());
        }

        samples
    }

    /// Run a fallible benchmark with a setup phase before every iteration.
    ///
    /// Setup (the clean step) runs before each warmup and measured iteration
    /// and is excluded from the timing; only the operation (the build) is
    /// measured. The first error aborts the whole run.
    pub fn try_run<S, O, E>(&self, mut setup: S, mut operation: O) -> Result<Vec<Duration>, E>
    where
        S: FnMut() -> Result<(), E>,
        O: FnMut() -> Result<(), E>,
    {
        for _ in 0..self.warmup_iterations {
            setup()?;
            operation()?;
        }

        let mut samples = Vec::with_capacity(self.measurement_iterations as usize);
        for _ in 0..self.measurement_iterations {
            setup()?;

            let start = Instant::now();
            operation()?;
            samples.push(start.elapsed());
        }

        Ok(samples)
    }
}

impl Default for BenchmarkHarness {
    fn default() -> Self {
        Self::new()
    }
}

/// Measure the execution time of a closure.
pub fn measure<F, T>(f: F) -> (T, Duration)
where
    F: FnOnce() -> T,
{
    let start = Instant::now();
    let result = f();
    let elapsed = start.elapsed();
    (result, elapsed)
}
