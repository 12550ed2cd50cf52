use serde::{Deserialize, Serialize};
use std::fmt;

use crate::filters::{FilterConfig, FilterFamily};
use crate::grid::Curve;
use crate::house::HouseCurveRegistry;
use crate::target::generate_target_curve;

pub const DEFAULT_CHANNEL_COUNT: usize = 5;
const DEFAULT_SLOPE: u32 = 24;

fn default_true() -> bool {
    true
}

/// One output channel: a named HP/LP pair applied to the selected house curve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelConfig {
    pub name: String,
    #[serde(default = "default_true")]
    pub enabled: bool,
    pub high_pass: FilterConfig,
    pub low_pass: FilterConfig,
}

impl ChannelConfig {
    /// Target curve for this channel, or `None` when the channel is disabled.
    pub fn target_curve(&self, registry: &HouseCurveRegistry) -> Option<Curve> {
        if !self.enabled {
            return None;
        }
        let baseline = registry.get_selected();
        Some(generate_target_curve(
            &baseline,
            &self.high_pass.with_supported_slope(),
            &self.low_pass.with_supported_slope(),
        ))
    }
}

/// Five-way startup layout: sub / sub / mid-bass / mid / tweeter.
///
/// Each channel's low-pass is the next channel's high-pass, LR 24 dB/oct.
pub fn default_channels() -> Vec<ChannelConfig> {
    let high_passes = [
        (FilterFamily::None, 0.0),
        (FilterFamily::LinkwitzRiley, 45.0),
        (FilterFamily::LinkwitzRiley, 90.0),
        (FilterFamily::LinkwitzRiley, 350.0),
        (FilterFamily::LinkwitzRiley, 3500.0),
    ];
    (0..DEFAULT_CHANNEL_COUNT)
        .map(|i| {
            let (hp_family, hp_freq) = high_passes[i];
            let (lp_family, lp_freq) = high_passes
                .get(i + 1)
                .copied()
                .unwrap_or((FilterFamily::None, 20000.0));
            ChannelConfig {
                name: format!("Channel {}", i + 1),
                enabled: true,
                high_pass: FilterConfig::new(hp_family, DEFAULT_SLOPE, hp_freq),
                low_pass: FilterConfig::new(lp_family, DEFAULT_SLOPE, lp_freq),
            }
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Crossover consistency
// ---------------------------------------------------------------------------

/// Adjacent channels whose crossover stages disagree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrossoverMismatch {
    /// Channel whose low-pass is compared
    pub lower: String,
    /// Channel whose high-pass is compared
    pub upper: String,
}

impl fmt::Display for CrossoverMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LP of {} != HP of {}", self.lower, self.upper)
    }
}

/// Compare channel i's low-pass with channel i+1's high-pass.
///
/// Only pairs where both channels are enabled and both stages are set are
/// checked; cutoff, family and slope must all agree.
pub fn crossover_mismatches(channels: &[ChannelConfig]) -> Vec<CrossoverMismatch> {
    channels
        .windows(2)
        .filter(|pair| {
            let (lo, hi) = (&pair[0], &pair[1]);
            lo.enabled
                && hi.enabled
                && lo.low_pass.family != FilterFamily::None
                && hi.high_pass.family != FilterFamily::None
        })
        .filter(|pair| {
            let (lp, hp) = (&pair[0].low_pass, &pair[1].high_pass);
            lp.cutoff_hz != hp.cutoff_hz || lp.family != hp.family || lp.slope != hp.slope
        })
        .map(|pair| CrossoverMismatch {
            lower: pair[0].name.clone(),
            upper: pair[1].name.clone(),
        })
        .collect()
}
