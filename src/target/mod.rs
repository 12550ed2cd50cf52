// Curve generator: baseline house curve + HP stage + LP stage → channel target

use tracing::debug;

use crate::filters::{self, FilterConfig, PassDirection};
use crate::grid::{Curve, GRID_LEN, THIRD_OCTAVE_HZ};

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Apply `hp` then `lp` to a copy of `baseline`.
///
/// Each active stage adds 20·log10|H| to the curve. A stage with
/// `FilterFamily::None` or cutoff ≤ 0 leaves the curve untouched, so two
/// bypassed stages return `baseline` bit-for-bit.
pub fn generate_target_curve(baseline: &Curve, hp: &FilterConfig, lp: &FilterConfig) -> Curve {
    let mut curve = *baseline;
    apply_stage(&mut curve, hp, PassDirection::High);
    apply_stage(&mut curve, lp, PassDirection::Low);
    curve
}

/// Add one filter stage's response (dB) to `curve` in place.
pub fn apply_stage(curve: &mut Curve, cfg: &FilterConfig, direction: PassDirection) {
    if !cfg.is_active() {
        return;
    }
    debug!(
        "apply_stage: {} {:?} {} dB/oct @ {} Hz",
        cfg.family, direction, cfg.slope, cfg.cutoff_hz
    );
    let response = stage_response_db(cfg, direction);
    for (c, r) in curve.iter_mut().zip(response.iter()) {
        *c += r;
    }
}

/// Response of a single stage in dB on the 1/3-octave grid.
///
/// An inactive stage is flat 0 dB.
pub fn stage_response_db(cfg: &FilterConfig, direction: PassDirection) -> Curve {
    let mut out = [0.0; GRID_LEN];
    if !cfg.is_active() {
        return out;
    }
    let h = filters::magnitude(
        cfg.family,
        direction,
        &THIRD_OCTAVE_HZ,
        cfg.cutoff_hz,
        cfg.slope,
    );
    for (o, &v) in out.iter_mut().zip(h.iter()) {
        *o = filters::magnitude_to_db(v);
    }
    out
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
