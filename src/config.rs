//! Pipeline configuration
//!
//! Defaults reproduce the fixed constants of the camera viewer (5x5 blur,
//! Canny 50/150, fallback midpoint 128). Each value can be overridden from the
//! environment so a host can tune without rebuilding.

use std::fmt;
use std::str::FromStr;

use crate::error::PipelineError;

fn parse_value<T: FromStr>(raw: Option<&str>) -> Option<T> {
    raw.and_then(|v| v.trim().parse::<T>().ok())
}

fn parse_bool_u8(raw: Option<&str>) -> Option<bool> {
    parse_value::<u8>(raw).map(|v| v != 0)
}

/// Edge extraction strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrategyKind {
    /// Blur + gradient + non-maximum suppression + hysteresis
    Canny,
    /// Midpoint threshold of the raw luma plane (lower fidelity)
    Threshold,
}

impl StrategyKind {
    /// True for the last-resort threshold mode
    pub fn is_degraded(self) -> bool {
        matches!(self, Self::Threshold)
    }

    /// Stable lowercase name, as accepted by `EDGE_STRATEGY`
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Canny => "canny",
            Self::Threshold => "threshold",
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StrategyKind {
    type Err = PipelineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "canny" | "full" => Ok(Self::Canny),
            "threshold" | "fallback" => Ok(Self::Threshold),
            other => Err(PipelineError::InvalidConfig(format!(
                "unknown strategy '{}'",
                other
            ))),
        }
    }
}

/// Blur kernel sizes with a binomial weight table
pub const SUPPORTED_BLUR_KERNELS: [usize; 4] = [1, 3, 5, 7];

/// Tunables for the frame pipeline
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    /// Preferred strategy; `Canny` is downgraded only if its self-test fails
    pub strategy: StrategyKind,
    /// Convert NV21 to RGB and back to intensity instead of using luma directly
    pub color_conversion: bool,
    /// Smoothing kernel size (1, 3, 5 or 7)
    pub blur_kernel_size: usize,
    /// Hysteresis low threshold on L1 gradient magnitude
    pub low_threshold: u32,
    /// Hysteresis high threshold on L1 gradient magnitude
    pub high_threshold: u32,
    /// Fallback cut: intensity strictly above this becomes 255
    pub fallback_threshold: u8,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            strategy: StrategyKind::Canny,
            color_conversion: true,
            blur_kernel_size: 5,
            low_threshold: 50,
            high_threshold: 150,
            fallback_threshold: 128,
        }
    }
}

impl PipelineConfig {
    /// Defaults overridden by `EDGE_*` environment variables.
    ///
    /// Unparseable values are ignored; an unknown `EDGE_STRATEGY` keeps the
    /// default.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as [`from_env`](Self::from_env) with variables read from `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            strategy: parse_value(lookup("EDGE_STRATEGY").as_deref()).unwrap_or(defaults.strategy),
            color_conversion: parse_bool_u8(lookup("EDGE_COLOR_CONVERSION").as_deref())
                .unwrap_or(defaults.color_conversion),
            blur_kernel_size: parse_value(lookup("EDGE_BLUR_KERNEL").as_deref())
                .unwrap_or(defaults.blur_kernel_size),
            low_threshold: parse_value(lookup("EDGE_CANNY_LOW").as_deref())
                .unwrap_or(defaults.low_threshold),
            high_threshold: parse_value(lookup("EDGE_CANNY_HIGH").as_deref())
                .unwrap_or(defaults.high_threshold),
            fallback_threshold: parse_value(lookup("EDGE_FALLBACK_THRESHOLD").as_deref())
                .unwrap_or(defaults.fallback_threshold),
        }
    }

    /// Degraded configuration: threshold strategy with default constants
    pub fn fallback() -> Self {
        Self {
            strategy: StrategyKind::Threshold,
            ..Self::default()
        }
    }

    /// Check ranges and ordering of the tunables.
    pub fn validate(&self) -> Result<(), PipelineError> {
        if !SUPPORTED_BLUR_KERNELS.contains(&self.blur_kernel_size) {
            return Err(PipelineError::InvalidConfig(format!(
                "blur kernel size {} not in {:?}",
                self.blur_kernel_size, SUPPORTED_BLUR_KERNELS
            )));
        }
        if self.low_threshold > self.high_threshold {
            return Err(PipelineError::InvalidConfig(format!(
                "low threshold {} exceeds high threshold {}",
                self.low_threshold, self.high_threshold
            )));
        }
        Ok(())
    }
}
