//! Deterministic percentage-based sampling of fully qualified names.
//!
//! A stride of N means "1-in-N sampling": a name is selected when its hash
//! modulo N is zero. The hash is fixed and platform-independent so that the
//! same name and stride always yield the same inclusion decision across runs,
//! which is what makes partial-instrumentation benchmark results comparable.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::SamplingError;

/// Multiplier folding the second accumulator into the final hash.
const HASH_FOLD: u32 = 1_566_083_941;

/// Seed for both hash accumulators.
const HASH_SEED: u32 = 5381;

/// Stable 32-bit hash of a fully qualified name.
///
/// Two-accumulator polynomial hash: both accumulators start at 5381 and are
/// rolled with `(acc * 33) XOR unit` over alternating UTF-16 code units of
/// the name, with 32-bit wraparound throughout. Iteration stops at an
/// embedded NUL. The final hash is `acc1 + acc2 * 1566083941`, returned as a
/// signed 32-bit value.
///
/// This function must stay bit-exact: changing it silently re-partitions
/// every sampled benchmark population.
pub fn name_hash(name: &str) -> i32 {
    let mut acc1: u32 = HASH_SEED;
    let mut acc2: u32 = HASH_SEED;

    let mut units = name.encode_utf16();
    loop {
        match units.next() {
            None | Some(0) => break,
            Some(unit) => acc1 = acc1.wrapping_mul(33) ^ u32::from(unit),
        }
        match units.next() {
            None | Some(0) => break,
            Some(unit) => acc2 = acc2.wrapping_mul(33) ^ u32::from(unit),
        }
    }

    acc1.wrapping_add(acc2.wrapping_mul(HASH_FOLD)) as i32
}

/// Validated sampling stride.
/// Always >= 1; stride 1 selects every name (100% sampling).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Stride(u32);

impl Stride {
    /// Stride 1: every name is included.
    pub const FULL: Stride = Stride(1);

    /// Compute the stride for a sampling percentage.
    ///
    /// The percentage must evenly divide 100 (e.g. 1, 10, 50, 100); anything
    /// else has no integer stride and is rejected before any build is run.
    pub fn from_percentage(percentage: u32) -> Result<Self, SamplingError> {
        if percentage == 0 || 100 % percentage != 0 {
            return Err(SamplingError::InvalidPercentage { percentage });
        }

        Ok(Self(100 / percentage))
    }

    /// Decide whether a fully qualified name falls inside this sample.
    ///
    /// Deterministic: same name and stride always agree across runs and
    /// platforms. The modulus is taken in signed 32-bit arithmetic.
    pub fn includes(&self, name: &str) -> bool {
        name_hash(name) % self.0 as i32 == 0
    }

    /// Get the inner stride value.
    pub fn get(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for Stride {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u32> for Stride {
    type Error = SamplingError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        if value == 0 {
            // A zero stride would divide by zero; it corresponds to no
            // representable percentage.
            return Err(SamplingError::InvalidPercentage { percentage: 0 });
        }
        Ok(Self(value))
    }
}

impl From<Stride> for u32 {
    fn from(stride: Stride) -> Self {
        stride.0
    }
}

/// The two sampling dimensions of a benchmark scenario.
///
/// Types are filtered first; members of surviving types are filtered
/// independently. Both default to full inclusion when a dimension is not
/// parameterized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SamplingConfig {
    /// Stride applied to fully qualified type names.
    pub types: Stride,
    /// Stride applied to fully qualified member names.
    pub members: Stride,
}

impl SamplingConfig {
    /// Full instrumentation: both strides are 1.
    pub fn full() -> Self {
        Self {
            types: Stride::FULL,
            members: Stride::FULL,
        }
    }

    /// Build a config from two percentages, failing fast if either does not
    /// evenly divide 100.
    pub fn from_percentages(
        types_percentage: u32,
        members_percentage: u32,
    ) -> Result<Self, SamplingError> {
        Ok(Self {
            types: Stride::from_percentage(types_percentage)?,
            members: Stride::from_percentage(members_percentage)?,
        })
    }
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self::full()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_empty_string() {
        // Both accumulators stay at the seed: 5381 + 5381 * 1566083941
        // wrapped to 32 bits.
        assert_eq!(name_hash(""), 371_857_150);
    }

    #[test]
    fn test_hash_single_char() {
        // acc1 = (5381 * 33) ^ 'A', acc2 untouched.
        assert_eq!(name_hash("A"), 372_029_405);
    }

    #[test]
    fn test_hash_deterministic() {
        let first = name_hash("Foo.Bar.Baz");
        let second = name_hash("Foo.Bar.Baz");
        assert_eq!(first, second);
    }

    #[test]
    fn test_hash_stops_at_embedded_nul() {
        assert_eq!(name_hash("Foo\0Bar"), name_hash("Foo"));
    }

    #[test]
    fn test_hash_sensitivity() {
        // No exact collision guarantee, but sibling names should not all
        // collapse onto one hash.
        let names = ["Foo.Bar.Baz", "Foo.Bar.Bay", "Foo.Bar.Qux", "Foo.Baz.Bar"];
        for (i, a) in names.iter().enumerate() {
            for b in &names[i + 1..] {
                assert_ne!(name_hash(a), name_hash(b), "{} vs {}", a, b);
            }
        }
    }

    #[test]
    fn test_stride_from_valid_percentages() {
        assert_eq!(Stride::from_percentage(100).unwrap().get(), 1);
        assert_eq!(Stride::from_percentage(50).unwrap().get(), 2);
        assert_eq!(Stride::from_percentage(10).unwrap().get(), 10);
        assert_eq!(Stride::from_percentage(1).unwrap().get(), 100);
    }

    #[test]
    fn test_stride_rejects_non_dividing_percentages() {
        for percentage in [0, 3, 33, 40, 60, 99, 101, 200] {
            let err = Stride::from_percentage(percentage).unwrap_err();
            match err {
                SamplingError::InvalidPercentage { percentage: p } => {
                    assert_eq!(p, percentage);
                }
                other => panic!("Unexpected error: {other}"),
            }
        }
    }

    #[test]
    fn test_full_stride_includes_everything() {
        let stride = Stride::from_percentage(100).unwrap();
        for name in ["", "A", "Foo.Bar.Baz", "System.Collections.Generic.List"] {
            assert!(stride.includes(name));
        }
    }

    #[test]
    fn test_inclusion_density_converges() {
        let stride = Stride::from_percentage(10).unwrap();
        let total = 20_000;
        let included = (0..total)
            .filter(|i| stride.includes(&format!("Ns{i}.Type{i}.Method{i}")))
            .count();

        // 1-in-10 sampling over 20k distinct names; allow generous slack
        // since this is statistical, not exact.
        let fraction = included as f64 / total as f64;
        assert!(
            (0.05..=0.20).contains(&fraction),
            "Fraction {} outside expected band",
            fraction
        );
    }

    #[test]
    fn test_sampling_config_from_percentages() {
        let config = SamplingConfig::from_percentages(10, 50).unwrap();
        assert_eq!(config.types.get(), 10);
        assert_eq!(config.members.get(), 2);

        assert!(SamplingConfig::from_percentages(33, 50).is_err());
        assert!(SamplingConfig::from_percentages(10, 7).is_err());
    }

    #[test]
    fn test_sampling_config_full() {
        let config = SamplingConfig::full();
        assert_eq!(config.types, Stride::FULL);
        assert_eq!(config.members, Stride::FULL);
    }
}
