use crate::grid::{Curve, GRID_LEN, THIRD_OCTAVE_HZ};

/// Resample a response onto the 1/3-octave grid.
///
/// Linear interpolation in log(freq) space. Grid points outside the data
/// range take the nearest end value. `freq` must be strictly increasing,
/// positive and the same length as `mag`.
pub fn resample_to_grid(freq: &[f64], mag: &[f64]) -> Curve {
    let mut out = [0.0; GRID_LEN];
    let log_freq: Vec<f64> = freq.iter().map(|f| f.ln()).collect();
    for (o, &fq) in out.iter_mut().zip(THIRD_OCTAVE_HZ.iter()) {
        *o = interp_single(&log_freq, mag, fq.ln());
    }
    out
}

/// Interpolate a single value. Clamps to boundary values for out-of-range queries.
fn interp_single(x_data: &[f64], y_data: &[f64], xq: f64) -> f64 {
    if x_data.is_empty() {
        return 0.0;
    }
    if x_data.len() == 1 {
        return y_data[0];
    }
    if xq <= x_data[0] {
        return y_data[0];
    }
    if xq >= x_data[x_data.len() - 1] {
        return y_data[y_data.len() - 1];
    }

    // first index with x > xq, kept in 1..len for unordered or NaN input
    let idx = x_data
        .partition_point(|&v| v <= xq)
        .clamp(1, x_data.len() - 1);
    if x_data[idx - 1] == xq {
        return y_data[idx - 1];
    }

    let x0 = x_data[idx - 1];
    let x1 = x_data[idx];
    let y0 = y_data[idx - 1];
    let y1 = y_data[idx];

    let t = (xq - x0) / (x1 - x0);
    y0 + t * (y1 - y0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interp_single_exact() {
        let x = vec![1.0, 2.0, 3.0];
        let y = vec![10.0, 20.0, 30.0];
        assert!((interp_single(&x, &y, 2.0) - 20.0).abs() < 1e-10);
    }

    #[test]
    fn test_interp_single_mid() {
        let x = vec![1.0, 2.0, 3.0];
        let y = vec![10.0, 20.0, 30.0];
        assert!((interp_single(&x, &y, 1.5) - 15.0).abs() < 1e-10);
    }

    #[test]
    fn test_interp_single_clamp() {
        let x = vec![1.0, 2.0, 3.0];
        let y = vec![10.0, 20.0, 30.0];
        assert!((interp_single(&x, &y, 0.0) - 10.0).abs() < 1e-10);
        assert!((interp_single(&x, &y, 5.0) - 30.0).abs() < 1e-10);
    }

    #[test]
    fn test_interp_single_nan_abscissa_does_not_panic() {
        let x = vec![f64::NAN, 2.0_f64.ln()];
        let y = vec![1.0, 2.0];
        let _ = interp_single(&x, &y, 1.5_f64.ln());
        let _ = interp_single(&[f64::NAN], &[3.0], 0.0);
        let curve = resample_to_grid(&[f64::NAN, 100.0], &[1.0, 2.0]);
        assert_eq!(curve.len(), GRID_LEN);
    }

    #[test]
    fn test_resample_identity_on_grid() {
        let mag: Vec<f64> = (0..GRID_LEN).map(|i| i as f64 * 0.5 - 3.0).collect();
        let curve = resample_to_grid(&THIRD_OCTAVE_HZ, &mag);
        for i in 0..GRID_LEN {
            assert!((curve[i] - mag[i]).abs() < 1e-12);
        }
    }

    #[test]
    fn test_resample_log_midpoint() {
        // 100 Hz is the geometric mean of 50 and 200
        let curve = resample_to_grid(&[50.0, 200.0], &[0.0, 10.0]);
        assert!((curve[7] - 5.0).abs() < 1e-10);
        assert_eq!(curve[0], 0.0);
        assert_eq!(curve[GRID_LEN - 1], 10.0);
    }
}
