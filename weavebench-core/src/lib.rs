//! WeaveBench Core Library
//!
//! Core library for benchmarking the compile-time overhead of aspect-weaving
//! instrumentation. Provides the external build tool driver with merged
//! output capture, the deterministic percentage sampler, the instrumentation
//! target selection policy, and benchmark configuration parsing.

pub mod config;
pub mod driver;
pub mod error;
pub mod process;
pub mod sampler;
pub mod selection;

// Re-export commonly used types
pub use config::{Config, ConfigLoader, ScenarioConfig, DEFAULT_SCENARIO_MATRIX};
pub use driver::{BuildDriver, BuildProperties};
pub use error::{ProcessError, SamplingError, WeaveBenchError, WeaveBenchResult};
pub use sampler::{name_hash, SamplingConfig, Stride};
pub use selection::{select_targets, MemberKind, MemberSymbol, SymbolManifest, TypeSymbol};
