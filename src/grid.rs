// Frequency grid: the 31 standard 1/3-octave centres every curve is sampled on

/// Number of points on the 1/3-octave grid (20 Hz .. 20 kHz).
pub const GRID_LEN: usize = 31;

/// Standard 1/3-octave centre frequencies in Hz, strictly increasing.
pub const THIRD_OCTAVE_HZ: [f64; GRID_LEN] = [
    20.0, 25.0, 31.5, 40.0, 50.0, 63.0, 80.0, 100.0, 125.0, 160.0, 200.0, 250.0, 315.0, 400.0,
    500.0, 630.0, 800.0, 1000.0, 1250.0, 1600.0, 2000.0, 2500.0, 3150.0, 4000.0, 5000.0, 6300.0,
    8000.0, 10000.0, 12500.0, 16000.0, 20000.0,
];

/// A response in dB, index-aligned to [`THIRD_OCTAVE_HZ`].
pub type Curve = [f64; GRID_LEN];

/// All-zero (flat 0 dB) curve.
pub const FLAT: Curve = [0.0; GRID_LEN];

/// Index of the grid point exactly equal to `freq_hz`, if any.
pub fn index_of(freq_hz: f64) -> Option<usize> {
    THIRD_OCTAVE_HZ
        .iter()
        .position(|&f| (f - freq_hz).abs() < 1e-9)
}
