//! Configuration errors raised while building simulation tables.

use std::fmt;

use crate::params::MAX_RESOLUTION;

/// Invalid simulation parameters
#[derive(Debug, Clone, PartialEq)]
pub enum ParamsError {
    /// Resolution must be a power of two in `[2, MAX_RESOLUTION]`
    InvalidResolution(usize),

    /// Precomputed table does not hold `resolution²` entries
    InvalidTableSize {
        table: &'static str,
        expected: usize,
        got: usize,
    },

    /// Parameter must be strictly positive
    NonPositive { name: &'static str, value: f32 },

    /// Parameter must lie in `[min, max]`
    OutOfRange {
        name: &'static str,
        value: f32,
        min: f32,
        max: f32,
    },

    /// Parameter is NaN or infinite
    NonFinite { name: &'static str, value: f32 },

    /// Wind alignment exponent must be even and at least 2
    InvalidWindExponent(u32),
}

impl fmt::Display for ParamsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidResolution(resolution) => write!(
                f,
                "resolution must be a power of two in [2, {}], got {}",
                MAX_RESOLUTION, resolution
            ),
            Self::InvalidTableSize {
                table,
                expected,
                got,
            } => write!(
                f,
                "{} table must hold {} entries, got {}",
                table, expected, got
            ),
            Self::NonPositive { name, value } => {
                write!(f, "{} must be > 0, got {}", name, value)
            }
            Self::OutOfRange {
                name,
                value,
                min,
                max,
            } => write!(f, "{} must be in [{}, {}], got {}", name, min, max, value),
            Self::NonFinite { name, value } => {
                write!(f, "{} must be finite, got {}", name, value)
            }
            Self::InvalidWindExponent(exponent) => write!(
                f,
                "wind alignment exponent must be even and >= 2, got {}",
                exponent
            ),
        }
    }
}

impl std::error::Error for ParamsError {}
