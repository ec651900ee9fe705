//! Custom error types for WeaveBench.
//!
//! This module defines explicit enum error types as per coding guidelines.
//! No `Box<dyn Error>`, no `anyhow::Result` - all errors are strongly typed.

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type for the WeaveBench core.
/// All errors are explicit variants - no catch-all or generic handling.
#[derive(Debug, Error)]
pub enum WeaveBenchError {
    // =========================================================================
    // Configuration Errors - Fail-Fast on Invalid Config
    // =========================================================================
    #[error("Configuration file not found: {path}")]
    ConfigNotFound { path: PathBuf },

    #[error("Configuration parse error: {message}")]
    ConfigParse { message: String },

    #[error("Invalid configuration: {field} - {reason}")]
    ConfigInvalid { field: &'static str, reason: String },

    #[error("Symbol manifest parse error: {message}")]
    ManifestParse { message: String },

    // =========================================================================
    // External Process Errors - No Retries, No Partial Credit
    // =========================================================================
    #[error("Process error: {0}")]
    Process(#[from] ProcessError),

    // =========================================================================
    // Sampling Errors - Misconfigured Benchmark Parameters
    // =========================================================================
    #[error("Sampling error: {0}")]
    Sampling(#[from] SamplingError),

    // =========================================================================
    // System Errors
    // =========================================================================
    #[error("IO error: {context} - {source}")]
    Io {
        context: &'static str,
        #[source]
        source: std::io::Error,
    },
}

/// Errors raised while running the external build tool.
///
/// A single invocation is exactly one process start/wait cycle; none of these
/// variants is ever retried.
#[derive(Debug, Error)]
pub enum ProcessError {
    #[error("Failed to spawn '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to wait for '{program}': {source}")]
    Wait {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The external process exited non-zero. Carries the exit code and the
    /// full combined stdout/stderr log, in that order, as the diagnostic.
    /// A child killed by a signal reports exit code -1.
    #[error("Build failed with exit code {exit_code}:\n{log}")]
    BuildFailed { exit_code: i32, log: String },
}

/// Errors in the deterministic sampling scheme.
///
/// Both variants are fatal to the current benchmark run and signal a
/// misconfigured parameter or an unexpected program shape, not a transient
/// condition.
#[derive(Debug, Error)]
pub enum SamplingError {
    /// The requested percentage does not evenly divide 100, so no integer
    /// stride exists. Raised before any external process is started.
    #[error("Invalid percentage: {percentage}")]
    InvalidPercentage { percentage: u32 },

    /// A member kind outside the recognized set (method, accessor-bearing
    /// member, constructor) was encountered during target selection.
    #[error("Unsupported member kind '{kind}' on member '{member}'")]
    UnsupportedMemberKind { kind: String, member: String },
}

/// Convenience Result type for WeaveBench operations.
pub type WeaveBenchResult<T> = Result<T, WeaveBenchError>;
