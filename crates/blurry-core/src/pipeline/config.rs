use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::consts::DEFAULT_SAMPLE_COVERAGE;
use crate::error::{BlurryError, Result};

/// Fraction of an image's rows and columns scanned for contrast, in (0, 1].
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f32", into = "f32")]
pub struct SampleCoverage(f32);

impl SampleCoverage {
    pub fn new(value: f32) -> Result<Self> {
        if value > 0.0 && value <= 1.0 {
            Ok(Self(value))
        } else {
            Err(BlurryError::InvalidSampleCoverage(value))
        }
    }

    /// Scan every row and column.
    pub fn full() -> Self {
        Self(1.0)
    }

    pub fn value(self) -> f32 {
        self.0
    }
}

impl Default for SampleCoverage {
    fn default() -> Self {
        Self(DEFAULT_SAMPLE_COVERAGE)
    }
}

impl TryFrom<f32> for SampleCoverage {
    type Error = BlurryError;

    fn try_from(value: f32) -> Result<Self> {
        Self::new(value)
    }
}

impl From<SampleCoverage> for f32 {
    fn from(coverage: SampleCoverage) -> f32 {
        coverage.0
    }
}

impl FromStr for SampleCoverage {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let value: f32 = s
            .trim()
            .parse()
            .map_err(|_| format!("\"{s}\" is not a parsable float number"))?;
        Self::new(value).map_err(|e| e.to_string())
    }
}

impl std::fmt::Display for SampleCoverage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Settings for one scoring batch.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchConfig {
    #[serde(default)]
    pub sample_coverage: SampleCoverage,
    /// Worker threads; `None` uses all available cores.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub threads: Option<usize>,
    /// Descend into subdirectories when expanding directory inputs.
    #[serde(default)]
    pub recursive: bool,
}

impl BatchConfig {
    /// Thread count the pool is built with: the configured value capped at the
    /// available cores, never below one.
    pub fn effective_threads(&self) -> usize {
        let available = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1);
        match self.threads {
            Some(n) => n.clamp(1, available),
            None => available,
        }
    }
}
