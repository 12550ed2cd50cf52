use serde::{Deserialize, Serialize};

use crate::error::AppError;

use super::FilterFamily;

/// Slopes offered for Linkwitz-Riley stages.
pub const LINKWITZ_RILEY_SLOPES: [u32; 3] = [12, 24, 36];
const DEFAULT_SLOPE: u32 = 24;

/// One filter stage (high-pass or low-pass) of a channel.
///
/// Slope and cutoff are stored as given. `FilterFamily::None` bypasses the
/// stage regardless of slope/cutoff.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FilterConfig {
    pub family: FilterFamily,
    /// dB/octave
    pub slope: u32,
    pub cutoff_hz: f64,
}

impl FilterConfig {
    pub fn new(family: FilterFamily, slope: u32, cutoff_hz: f64) -> Self {
        Self {
            family,
            slope,
            cutoff_hz,
        }
    }

    /// Build from a family name as shown to the user (e.g. "Linkwitz-Riley").
    pub fn parse(family: &str, slope: u32, cutoff_hz: f64) -> Result<Self, AppError> {
        Ok(Self::new(family.parse()?, slope, cutoff_hz))
    }

    /// A stage that does nothing.
    pub fn bypass() -> Self {
        Self::new(FilterFamily::None, DEFAULT_SLOPE, 0.0)
    }

    /// True when this stage changes the curve: a real family and cutoff > 0.
    pub fn is_active(&self) -> bool {
        self.family != FilterFamily::None && self.cutoff_hz > 0.0
    }

    pub fn order(&self) -> u32 {
        self.family.order(self.slope)
    }

    /// Copy with a Linkwitz-Riley slope outside 12/24/36 reset to 24.
    pub fn with_supported_slope(self) -> Self {
        if self.family == FilterFamily::LinkwitzRiley && !LINKWITZ_RILEY_SLOPES.contains(&self.slope)
        {
            Self {
                slope: DEFAULT_SLOPE,
                ..self
            }
        } else {
            self
        }
    }
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self::bypass()
    }
}
