//! Instrumentation target selection over a program symbol manifest.
//!
//! The external weaving step decides per-symbol inclusion with the same
//! deterministic sampler this crate ships. This module implements that
//! selection policy over a serialized symbol manifest so the policy can be
//! previewed and tested without running a build: types are filtered by the
//! types stride, then the members of surviving types are expanded into
//! method-like instrumentation targets and filtered independently by the
//! members stride.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{SamplingError, WeaveBenchError, WeaveBenchResult};
use crate::sampler::SamplingConfig;

/// Kind of a directly declared type member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemberKind {
    /// Plain method; instrumented directly.
    Method,
    /// Property; its synthesized accessor methods are the targets.
    Property,
    /// Indexer; like a property, targets are its accessors.
    Indexer,
    /// Event; targets are its add/remove accessors.
    Event,
    /// Constructor; never instrumented.
    Constructor,
    /// Field; carries no method body, not a valid selection input.
    Field,
}

impl fmt::Display for MemberKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MemberKind::Method => write!(f, "method"),
            MemberKind::Property => write!(f, "property"),
            MemberKind::Indexer => write!(f, "indexer"),
            MemberKind::Event => write!(f, "event"),
            MemberKind::Constructor => write!(f, "constructor"),
            MemberKind::Field => write!(f, "field"),
        }
    }
}

/// A directly declared member of a type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemberSymbol {
    /// Fully qualified member name.
    pub name: String,
    /// Member kind, driving target expansion.
    pub kind: MemberKind,
    /// Fully qualified names of synthesized accessor methods
    /// (properties/indexers/events only).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub accessors: Vec<String>,
}

/// A type and its directly declared members.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypeSymbol {
    /// Fully qualified type name.
    pub name: String,
    #[serde(default)]
    pub members: Vec<MemberSymbol>,
}

/// All types of a program, as enumerated by the compile-time code model.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SymbolManifest {
    pub types: Vec<TypeSymbol>,
}

impl SymbolManifest {
    /// Load a manifest from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> WeaveBenchResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| WeaveBenchError::Io {
            context: "reading symbol manifest",
            source: e,
        })?;

        Self::from_json_str(&content)
    }

    /// Parse a manifest from a JSON string.
    pub fn from_json_str(content: &str) -> WeaveBenchResult<Self> {
        serde_json::from_str(content).map_err(|e| WeaveBenchError::ManifestParse {
            message: e.to_string(),
        })
    }
}

/// Expand a member into the method names eligible for instrumentation.
///
/// Constructors contribute nothing; any kind without a method body is a
/// configuration error, not something to skip silently.
fn instrumentation_targets(member: &MemberSymbol) -> Result<Vec<&str>, SamplingError> {
    match member.kind {
        MemberKind::Method => Ok(vec![member.name.as_str()]),
        MemberKind::Property | MemberKind::Indexer | MemberKind::Event => {
            Ok(member.accessors.iter().map(String::as_str).collect())
        }
        MemberKind::Constructor => Ok(Vec::new()),
        MemberKind::Field => Err(SamplingError::UnsupportedMemberKind {
            kind: member.kind.to_string(),
            member: member.name.clone(),
        }),
    }
}

/// Select the instrumentation targets of a program under a sampling config.
///
/// Types are gated first by the types stride over the type's fully qualified
/// name; only members of included types are considered. Each method-like
/// target is then gated independently by the members stride over its own
/// fully qualified name. Output order follows manifest order.
pub fn select_targets(
    manifest: &SymbolManifest,
    config: &SamplingConfig,
) -> Result<Vec<String>, SamplingError> {
    let mut selected = Vec::new();

    for ty in &manifest.types {
        if !config.types.includes(&ty.name) {
            continue;
        }

        for member in &ty.members {
            for target in instrumentation_targets(member)? {
                if config.members.includes(target) {
                    selected.push(target.to_string());
                }
            }
        }
    }

    tracing::debug!(
        types = manifest.types.len(),
        selected = selected.len(),
        types_stride = %config.types,
        members_stride = %config.members,
        "Selected instrumentation targets"
    );

    Ok(selected)
}
