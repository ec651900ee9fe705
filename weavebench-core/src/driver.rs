//! Build tool driver.
//!
//! Wraps the external command-line build tool behind `clean` and `build`
//! operations. Build properties are passed verbatim as `-p:Key=Value`
//! arguments; the instrumentation step inside the build consumes them to
//! enable weaving and to parameterize the sampling strides.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Instant;

use crate::error::WeaveBenchResult;
use crate::process::run_process;
use crate::sampler::SamplingConfig;

/// Property switching instrumentation on or off for the whole build.
pub const PROP_INSTRUMENTATION_ENABLED: &str = "InstrumentationEnabled";
/// Property carrying the types stride. Absent means 1 (100% of types).
pub const PROP_TYPES_FRACTION_INVERSE: &str = "BenchmarkedTypesFractionInverse";
/// Property carrying the members stride. Absent means 1 (100% of members).
pub const PROP_MEMBERS_FRACTION_INVERSE: &str = "BenchmarkedMembersFractionInverse";

/// Build properties handed to the external build tool.
///
/// Key order is irrelevant to the consumer; a sorted map keeps the rendered
/// argument list reproducible across runs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildProperties(BTreeMap<String, String>);

impl BuildProperties {
    /// Empty property set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Properties for the uninstrumented baseline build.
    pub fn baseline() -> Self {
        let mut properties = Self::new();
        properties.set(PROP_INSTRUMENTATION_ENABLED, "false");
        properties
    }

    /// Properties enabling instrumentation at the given sampling strides.
    pub fn instrumented(config: &SamplingConfig) -> Self {
        let mut properties = Self::new();
        properties.set(PROP_INSTRUMENTATION_ENABLED, "true");
        properties.set(PROP_TYPES_FRACTION_INVERSE, config.types.to_string());
        properties.set(PROP_MEMBERS_FRACTION_INVERSE, config.members.to_string());
        properties
    }

    /// Set a property, replacing any previous value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    /// Look up a property value.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Render the properties as `-p:Key=Value` build tool arguments.
    pub fn to_args(&self) -> Vec<String> {
        self.0
            .iter()
            .map(|(key, value)| format!("-p:{key}={value}"))
            .collect()
    }

    /// Number of properties set.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no properties are set.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Driver for one solution under one build tool.
///
/// Each `clean` or `build` call is exactly one external process start/wait
/// cycle; benchmark iterations run these strictly sequentially.
#[derive(Debug, Clone)]
pub struct BuildDriver {
    tool: String,
    solution: PathBuf,
}

impl BuildDriver {
    /// Create a driver for the given build tool and solution path.
    pub fn new(tool: impl Into<String>, solution: impl Into<PathBuf>) -> Self {
        Self {
            tool: tool.into(),
            solution: solution.into(),
        }
    }

    /// The build tool executable.
    pub fn tool(&self) -> &str {
        &self.tool
    }

    /// The solution being built.
    pub fn solution(&self) -> &std::path::Path {
        &self.solution
    }

    /// Remove the previous build's artifacts.
    pub fn clean(&self) -> WeaveBenchResult<()> {
        self.run("clean", &BuildProperties::new())
    }

    /// Build the solution with the given properties.
    pub fn build(&self, properties: &BuildProperties) -> WeaveBenchResult<()> {
        self.run("build", properties)
    }

    fn run(&self, verb: &str, properties: &BuildProperties) -> WeaveBenchResult<()> {
        let mut args = Vec::with_capacity(2 + properties.len());
        args.push(verb.to_string());
        args.push(self.solution.display().to_string());
        args.extend(properties.to_args());

        let started = Instant::now();
        run_process(&self.tool, &args)?;
        tracing::debug!(
            tool = %self.tool,
            verb,
            solution = %self.solution.display(),
            elapsed_ms = started.elapsed().as_millis(),
            "Build tool invocation finished"
        );

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sampler::Stride;

    #[test]
    fn test_baseline_properties() {
        let properties = BuildProperties::baseline();
        assert_eq!(properties.get(PROP_INSTRUMENTATION_ENABLED), Some("false"));
        assert_eq!(properties.get(PROP_TYPES_FRACTION_INVERSE), None);
        assert_eq!(properties.get(PROP_MEMBERS_FRACTION_INVERSE), None);
    }

    #[test]
    fn test_instrumented_properties() {
        let config = SamplingConfig::from_percentages(10, 50).unwrap();
        let properties = BuildProperties::instrumented(&config);

        assert_eq!(properties.get(PROP_INSTRUMENTATION_ENABLED), Some("true"));
        assert_eq!(properties.get(PROP_TYPES_FRACTION_INVERSE), Some("10"));
        assert_eq!(properties.get(PROP_MEMBERS_FRACTION_INVERSE), Some("2"));
    }

    #[test]
    fn test_properties_render_as_build_args() {
        let config = SamplingConfig {
            types: Stride::FULL,
            members: Stride::from_percentage(10).unwrap(),
        };
        let args = BuildProperties::instrumented(&config).to_args();

        // BTreeMap keeps the rendered order stable.
        assert_eq!(
            args,
            vec![
                "-p:BenchmarkedMembersFractionInverse=10",
                "-p:BenchmarkedTypesFractionInverse=1",
                "-p:InstrumentationEnabled=true",
            ]
        );
    }

    #[test]
    fn test_set_replaces_value() {
        let mut properties = BuildProperties::new();
        properties.set("ExtraConstants", "BENCHMARK");
        properties.set("ExtraConstants", "BENCHMARK;TRACE");
        assert_eq!(properties.get("ExtraConstants"), Some("BENCHMARK;TRACE"));
        assert_eq!(properties.len(), 1);
    }
}
