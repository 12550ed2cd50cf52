// Filter response library: linear magnitude of analog HP/LP prototypes
//
// Every response here is magnitude-only, evaluated on real frequencies in Hz.
// Order is always derived from the slope in dB/octave and never drops below 1.

pub mod config;

pub use config::FilterConfig;

use num_complex::Complex64;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

use crate::error::AppError;

/// Passband ripple of the Chebyshev Type I stage, in dB.
pub const CHEBYSHEV_RIPPLE_DB: f64 = 1.0;

/// Linear magnitudes below this are reported as [`MIN_DB`].
const MIN_LINEAR: f64 = 1e-30;
const MIN_DB: f64 = -600.0;

// ---------------------------------------------------------------------------
// Data model
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FilterFamily {
    None,
    Butterworth,
    #[serde(rename = "Linkwitz-Riley")]
    LinkwitzRiley,
    Bessel,
    Chebyshev,
}

impl FilterFamily {
    /// All families in the order they are offered to the user.
    pub const ALL: [FilterFamily; 5] = [
        FilterFamily::None,
        FilterFamily::Butterworth,
        FilterFamily::LinkwitzRiley,
        FilterFamily::Bessel,
        FilterFamily::Chebyshev,
    ];

    pub fn name(self) -> &'static str {
        match self {
            FilterFamily::None => "None",
            FilterFamily::Butterworth => "Butterworth",
            FilterFamily::LinkwitzRiley => "Linkwitz-Riley",
            FilterFamily::Bessel => "Bessel",
            FilterFamily::Chebyshev => "Chebyshev",
        }
    }

    /// Filter order implied by `slope_db_oct` for this family.
    ///
    /// Linkwitz-Riley returns the order of each of its two Butterworth sections.
    pub fn order(self, slope_db_oct: u32) -> u32 {
        match self {
            FilterFamily::LinkwitzRiley => (slope_db_oct / 12).max(1),
            _ => order_for_slope(slope_db_oct),
        }
    }
}

impl fmt::Display for FilterFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FilterFamily {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FilterFamily::ALL
            .iter()
            .copied()
            .find(|family| family.name() == s.trim())
            .ok_or_else(|| AppError::InvalidFilterFamily { name: s.to_string() })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PassDirection {
    High,
    Low,
}

// ---------------------------------------------------------------------------
// Order / unit helpers
// ---------------------------------------------------------------------------

/// 6 dB/octave per pole, with slopes under 6 clamped to a single pole.
pub fn order_for_slope(slope_db_oct: u32) -> u32 {
    (slope_db_oct / 6).max(1)
}

/// 20·log10 of a linear magnitude, floored at -600 dB.
pub fn magnitude_to_db(h: f64) -> f64 {
    if h > MIN_LINEAR {
        20.0 * h.log10()
    } else {
        MIN_DB
    }
}

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

/// Linear magnitude of `family` at each frequency in `freq`.
///
/// `FilterFamily::None` is unity everywhere. `fc` must be > 0 and, for the
/// high-pass forms, every `f` must be > 0 as well.
pub fn magnitude(
    family: FilterFamily,
    direction: PassDirection,
    freq: &[f64],
    fc: f64,
    slope_db_oct: u32,
) -> Vec<f64> {
    match family {
        FilterFamily::None => vec![1.0; freq.len()],
        FilterFamily::Butterworth => butterworth_mag(freq, fc, slope_db_oct, direction),
        FilterFamily::LinkwitzRiley => linkwitz_riley_mag(freq, fc, slope_db_oct, direction),
        FilterFamily::Bessel => bessel_mag(freq, fc, slope_db_oct, direction),
        FilterFamily::Chebyshev => {
            chebyshev1_mag(freq, fc, slope_db_oct, direction, CHEBYSHEV_RIPPLE_DB)
        }
    }
}

// ---------------------------------------------------------------------------
// Butterworth / Linkwitz-Riley (closed form)
// ---------------------------------------------------------------------------

/// Butterworth magnitude, order n = slope/6.
///
/// LP: |H| = 1 / sqrt(1 + (f/fc)^(2n))
/// HP: |H| = 1 / sqrt(1 + (fc/f)^(2n))
pub fn butterworth_mag(
    freq: &[f64],
    fc: f64,
    slope_db_oct: u32,
    direction: PassDirection,
) -> Vec<f64> {
    let n = order_for_slope(slope_db_oct);
    freq.iter()
        .map(|&f| butterworth_point(f, fc, n, direction))
        .collect()
}

#[inline]
fn butterworth_point(f: f64, fc: f64, n: u32, direction: PassDirection) -> f64 {
    let ratio = match direction {
        PassDirection::Low => f / fc,
        PassDirection::High => fc / f,
    };
    1.0 / (1.0 + ratio.powf(2.0 * n as f64)).sqrt()
}

/// Linkwitz-Riley magnitude: two cascaded identical Butterworth sections.
///
/// Section order n = slope/12 (floored, minimum 1), so LR(f) = BW(f, 6n)^2.
/// Slopes that are not a multiple of 12 round down to the next LR alignment.
pub fn linkwitz_riley_mag(
    freq: &[f64],
    fc: f64,
    slope_db_oct: u32,
    direction: PassDirection,
) -> Vec<f64> {
    let n = FilterFamily::LinkwitzRiley.order(slope_db_oct);
    butterworth_mag(freq, fc, 6 * n, direction)
        .into_iter()
        .map(|h| h * h)
        .collect()
}

// ---------------------------------------------------------------------------
// Bessel (analog prototype, phase-matched normalisation)
// ---------------------------------------------------------------------------

/// Coefficients a_0..=a_n of the reverse Bessel polynomial θ_n(s) = Σ a_k s^k.
///
/// a_k = (2n-k)! / (2^(n-k) k! (n-k)!), built downwards from a_n = 1.
fn reverse_bessel_coefficients(n: u32) -> Vec<f64> {
    let n = n as usize;
    let mut a = vec![0.0; n + 1];
    a[n] = 1.0;
    for k in (0..n).rev() {
        a[k] = a[k + 1] * ((2 * n - k) * (k + 1)) as f64 / (2 * (n - k)) as f64;
    }
    a
}

/// Bessel magnitude, order n = slope/6.
///
/// Prototype H(s) = a_0 / θ_n(α·s) with α = a_0^(1/n): unity gain at DC and
/// the phase midpoint at the cutoff. LP evaluates s = jω/ωc, HP uses the
/// s → ωc/s transform.
pub fn bessel_mag(
    freq: &[f64],
    fc: f64,
    slope_db_oct: u32,
    direction: PassDirection,
) -> Vec<f64> {
    let n = order_for_slope(slope_db_oct);
    let coeffs = reverse_bessel_coefficients(n);
    let a0 = coeffs[0];
    let alpha = a0.powf(1.0 / n as f64);
    let wc = 2.0 * PI * fc;

    freq.iter()
        .map(|&f| {
            let s = prototype_s(2.0 * PI * f, wc, direction) * alpha;
            // Horner, highest power first
            let theta = coeffs
                .iter()
                .rev()
                .fold(Complex64::new(0.0, 0.0), |acc, &c| acc * s + c);
            (Complex64::new(a0, 0.0) / theta).norm()
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Chebyshev Type I (analog prototype)
// ---------------------------------------------------------------------------

/// Chebyshev Type I magnitude, order n = slope/6, passband ripple `ripple_db`.
///
/// Poles p_k = -sinh(μ + jθ_k), μ = asinh(1/ε)/n, θ_k = π·m/(2n) for
/// m = -n+1, -n+3, .., n-1. The cutoff is the passband edge, where the
/// response sits at -ripple_db. Even orders start the passband at -ripple_db.
pub fn chebyshev1_mag(
    freq: &[f64],
    fc: f64,
    slope_db_oct: u32,
    direction: PassDirection,
    ripple_db: f64,
) -> Vec<f64> {
    let n = order_for_slope(slope_db_oct);
    let eps = (10.0_f64.powf(0.1 * ripple_db) - 1.0).sqrt();
    let mu = (1.0 / eps).asinh() / n as f64;

    let poles: Vec<Complex64> = (0..n)
        .map(|k| {
            let m = 2.0 * k as f64 - (n as f64 - 1.0);
            let theta = PI * m / (2.0 * n as f64);
            -Complex64::new(mu, theta).sinh()
        })
        .collect();

    let mut gain = poles
        .iter()
        .fold(Complex64::new(1.0, 0.0), |acc, &p| acc * -p)
        .re;
    if n % 2 == 0 {
        gain /= (1.0 + eps * eps).sqrt();
    }

    let wc = 2.0 * PI * fc;
    freq.iter()
        .map(|&f| {
            let s = prototype_s(2.0 * PI * f, wc, direction);
            let denom = poles
                .iter()
                .fold(Complex64::new(1.0, 0.0), |acc, &p| acc * (s - p));
            gain / denom.norm()
        })
        .collect()
}

/// Normalised Laplace variable for a prototype with unit cutoff.
#[inline]
fn prototype_s(w: f64, wc: f64, direction: PassDirection) -> Complex64 {
    match direction {
        PassDirection::Low => Complex64::new(0.0, w / wc),
        // ωc / (jω) = -j·ωc/ω
        PassDirection::High => Complex64::new(0.0, -wc / w),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::THIRD_OCTAVE_HZ;

    fn chebyshev_closed_form(w: f64, n: u32, ripple_db: f64) -> f64 {
        let eps = (10.0_f64.powf(0.1 * ripple_db) - 1.0).sqrt();
        let t = if w.abs() <= 1.0 {
            (n as f64 * w.acos()).cos()
        } else {
            (n as f64 * w.acosh()).cosh()
        };
        1.0 / (1.0 + eps * eps * t * t).sqrt()
    }

    #[test]
    fn family_names_round_trip() {
        for family in FilterFamily::ALL {
            let parsed: FilterFamily = family.to_string().parse().unwrap();
            assert_eq!(parsed, family);
        }
    }

    #[test]
    fn unknown_family_is_rejected() {
        let err = "Elliptic".parse::<FilterFamily>().unwrap_err();
        assert!(matches!(err, AppError::InvalidFilterFamily { ref name } if name == "Elliptic"));
    }

    #[test]
    fn family_serde_uses_display_names() {
        let json = serde_json::to_string(&FilterFamily::LinkwitzRiley).unwrap();
        assert_eq!(json, "\"Linkwitz-Riley\"");
        let back: FilterFamily = serde_json::from_str("\"Bessel\"").unwrap();
        assert_eq!(back, FilterFamily::Bessel);
    }

    #[test]
    fn order_clamps_to_one() {
        assert_eq!(order_for_slope(0), 1);
        assert_eq!(order_for_slope(3), 1);
        assert_eq!(order_for_slope(6), 1);
        assert_eq!(order_for_slope(24), 4);
        assert_eq!(order_for_slope(26), 4);
    }

    #[test]
    fn linkwitz_riley_order_floors() {
        assert_eq!(FilterFamily::LinkwitzRiley.order(6), 1);
        assert_eq!(FilterFamily::LinkwitzRiley.order(12), 1);
        assert_eq!(FilterFamily::LinkwitzRiley.order(18), 1);
        assert_eq!(FilterFamily::LinkwitzRiley.order(24), 2);
        assert_eq!(FilterFamily::LinkwitzRiley.order(36), 3);
    }

    #[test]
    fn butterworth_at_cutoff_is_half_power() {
        for slope in [6, 12, 18, 24, 36, 48] {
            for direction in [PassDirection::Low, PassDirection::High] {
                let h = butterworth_mag(&[250.0], 250.0, slope, direction)[0];
                assert!(
                    (h - std::f64::consts::FRAC_1_SQRT_2).abs() < 1e-12,
                    "BW slope={} {:?} at fc: {}",
                    slope,
                    direction,
                    h
                );
            }
        }
    }

    #[test]
    fn linkwitz_riley_at_cutoff_is_minus_6db() {
        for slope in [12, 24, 36] {
            let h = linkwitz_riley_mag(&[1000.0], 1000.0, slope, PassDirection::Low)[0];
            assert!((h - 0.5).abs() < 1e-12);
        }
    }

    #[test]
    fn linkwitz_riley_is_squared_butterworth() {
        let lr = linkwitz_riley_mag(&THIRD_OCTAVE_HZ, 350.0, 24, PassDirection::High);
        let bw = butterworth_mag(&THIRD_OCTAVE_HZ, 350.0, 12, PassDirection::High);
        for (l, b) in lr.iter().zip(bw.iter()) {
            assert!((l - b * b).abs() < 1e-15);
        }
    }

    #[test]
    fn linkwitz_riley_18_matches_12() {
        let lr18 = linkwitz_riley_mag(&THIRD_OCTAVE_HZ, 90.0, 18, PassDirection::Low);
        let lr12 = linkwitz_riley_mag(&THIRD_OCTAVE_HZ, 90.0, 12, PassDirection::Low);
        assert_eq!(lr18, lr12);
    }

    #[test]
    fn linkwitz_riley_power_complementary() {
        // BW_lp^2 + BW_hp^2 = 1, so the LR pair sums to unity in magnitude
        let lp = linkwitz_riley_mag(&THIRD_OCTAVE_HZ, 800.0, 24, PassDirection::Low);
        let hp = linkwitz_riley_mag(&THIRD_OCTAVE_HZ, 800.0, 24, PassDirection::High);
        for (l, h) in lp.iter().zip(hp.iter()) {
            assert!((l + h - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn lowpass_monotonic_above_cutoff() {
        let fc = 500.0;
        let above: Vec<f64> = THIRD_OCTAVE_HZ.iter().copied().filter(|&f| f >= fc).collect();
        for family in [FilterFamily::Butterworth, FilterFamily::LinkwitzRiley] {
            let h = magnitude(family, PassDirection::Low, &above, fc, 24);
            for w in h.windows(2) {
                assert!(w[1] <= w[0], "{} LP not monotonic", family);
            }
        }
    }

    #[test]
    fn highpass_monotonic_below_cutoff() {
        let fc = 500.0;
        let below: Vec<f64> = THIRD_OCTAVE_HZ.iter().copied().filter(|&f| f <= fc).collect();
        for family in [FilterFamily::Butterworth, FilterFamily::LinkwitzRiley] {
            let h = magnitude(family, PassDirection::High, &below, fc, 24);
            // magnitude falls as frequency drops further below fc
            for w in h.windows(2) {
                assert!(w[0] <= w[1], "{} HP not monotonic", family);
            }
        }
    }

    #[test]
    fn butterworth_order_steepens_rolloff() {
        let fc = 1000.0;
        let mut prev = f64::INFINITY;
        for slope in [6, 12, 24, 48, 96] {
            let h = butterworth_mag(&[2.0 * fc], fc, slope, PassDirection::Low)[0];
            assert!(h < prev, "slope {} did not steepen: {} >= {}", slope, h, prev);
            prev = h;
        }
    }

    #[test]
    fn none_is_unity() {
        let h = magnitude(FilterFamily::None, PassDirection::High, &THIRD_OCTAVE_HZ, 100.0, 24);
        assert!(h.iter().all(|&v| v == 1.0));
    }

    #[test]
    fn reverse_bessel_polynomials() {
        assert_eq!(reverse_bessel_coefficients(1), vec![1.0, 1.0]);
        assert_eq!(reverse_bessel_coefficients(2), vec![3.0, 3.0, 1.0]);
        assert_eq!(reverse_bessel_coefficients(3), vec![15.0, 15.0, 6.0, 1.0]);
        assert_eq!(
            reverse_bessel_coefficients(4),
            vec![105.0, 105.0, 45.0, 10.0, 1.0]
        );
    }

    #[test]
    fn bessel_first_order_matches_butterworth() {
        let be = bessel_mag(&THIRD_OCTAVE_HZ, 200.0, 6, PassDirection::Low);
        let bw = butterworth_mag(&THIRD_OCTAVE_HZ, 200.0, 6, PassDirection::Low);
        for (a, b) in be.iter().zip(bw.iter()) {
            assert!((a - b).abs() < 1e-12);
        }
    }

    #[test]
    fn bessel_second_order_at_cutoff() {
        // H(s) = 3 / ((√3 s)^2 + 3√3 s + 3), at s = j: |H| = 1/√3
        let h = bessel_mag(&[1000.0], 1000.0, 12, PassDirection::Low)[0];
        assert!((h - 1.0 / 3.0_f64.sqrt()).abs() < 1e-12, "got {}", h);
    }

    #[test]
    fn bessel_lowpass_shape() {
        let h = bessel_mag(&THIRD_OCTAVE_HZ, 1000.0, 24, PassDirection::Low);
        assert!((h[0] - 1.0).abs() < 1e-3, "passband should be ~unity: {}", h[0]);
        for w in h.windows(2) {
            assert!(w[1] <= w[0] + 1e-12);
        }
    }

    #[test]
    fn bessel_highpass_mirrors_lowpass() {
        let fc = 300.0;
        for &f in THIRD_OCTAVE_HZ.iter() {
            let hp = bessel_mag(&[f], fc, 24, PassDirection::High)[0];
            let lp = bessel_mag(&[fc * fc / f], fc, 24, PassDirection::Low)[0];
            assert!((hp - lp).abs() < 1e-12);
        }
    }

    #[test]
    fn chebyshev_matches_closed_form() {
        let fc = 1000.0;
        for slope in [6, 12, 18, 24, 36] {
            let n = order_for_slope(slope);
            let h = chebyshev1_mag(&THIRD_OCTAVE_HZ, fc, slope, PassDirection::Low, 1.0);
            for (i, &f) in THIRD_OCTAVE_HZ.iter().enumerate() {
                let expected = chebyshev_closed_form(f / fc, n, 1.0);
                assert!(
                    (h[i] - expected).abs() < 1e-9,
                    "n={} f={}: {} vs {}",
                    n,
                    f,
                    h[i],
                    expected
                );
            }
        }
    }

    #[test]
    fn chebyshev_edge_sits_at_ripple() {
        for slope in [12, 24, 36] {
            for direction in [PassDirection::Low, PassDirection::High] {
                let h = chebyshev1_mag(&[2000.0], 2000.0, slope, direction, 1.0)[0];
                assert!((magnitude_to_db(h) + 1.0).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn chebyshev_highpass_mirrors_lowpass() {
        let fc = 80.0;
        for &f in THIRD_OCTAVE_HZ.iter() {
            let hp = chebyshev1_mag(&[f], fc, 18, PassDirection::High, 1.0)[0];
            let expected = chebyshev_closed_form(fc / f, 3, 1.0);
            assert!((hp - expected).abs() < 1e-9);
        }
    }

    #[test]
    fn db_floor() {
        assert!((magnitude_to_db(0.5) - (-6.0206)).abs() < 1e-3);
        assert_eq!(magnitude_to_db(0.0), -600.0);
    }
}
