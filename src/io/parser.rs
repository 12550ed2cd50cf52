use std::path::Path;
use tracing::info;

use crate::dsp::resample_to_grid;
use crate::error::AppError;
use crate::grid::Curve;

use super::ResponseData;

/// Import a response file, auto-detecting format by extension.
pub fn import_response(path: &Path) -> Result<ResponseData, AppError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    let content = std::fs::read_to_string(path)?;

    let name = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("Untitled")
        .to_string();

    let mut response = match ext.as_str() {
        "txt" | "csv" => parse_rew_txt(&content)?,
        "frd" => parse_frd(&content)?,
        _ => {
            return Err(AppError::Parse {
                message: format!("Unsupported file format: .{ext}"),
            })
        }
    };

    response.name = name;
    response.source_path = Some(path.to_path_buf());

    info!(
        "import_response: {} ({} points)",
        path.display(),
        response.freq.len()
    );
    Ok(response)
}

/// Import a response file and resample it onto the 1/3-octave grid.
pub fn import_curve(path: &Path) -> Result<Curve, AppError> {
    let response = import_response(path)?;
    Ok(resample_to_grid(&response.freq, &response.magnitude))
}

/// Parse REW .txt / two-column .csv frequency response data.
///
/// Format:
/// ```text
/// * Freq(Hz)  SPL(dB)  Phase(degrees)
/// 20.000      65.3     -45.2
/// ```
///
/// Lines starting with `*` or `#` are comments/headers. Columns are split on
/// whitespace or commas; only the first two (freq, mag) are used.
pub fn parse_rew_txt(content: &str) -> Result<ResponseData, AppError> {
    let mut freq = Vec::new();
    let mut magnitude = Vec::new();

    for line in content.lines() {
        let trimmed = line.trim();

        if trimmed.is_empty() || trimmed.starts_with('*') || trimmed.starts_with('#') {
            continue;
        }

        let parts: Vec<&str> = trimmed
            .split(|c: char| c == ',' || c == ';' || c.is_whitespace())
            .filter(|p| !p.is_empty())
            .collect();

        if parts.len() < 2 {
            continue;
        }

        let f: f64 = parts[0].parse().map_err(|_| AppError::Parse {
            message: format!("Invalid frequency value: '{}'", parts[0]),
        })?;

        let m: f64 = parts[1].parse().map_err(|_| AppError::Parse {
            message: format!("Invalid magnitude value: '{}'", parts[1]),
        })?;

        if !f.is_finite() || f <= 0.0 {
            return Err(AppError::Parse {
                message: format!("Frequency must be positive and finite, got {f}"),
            });
        }

        if !m.is_finite() {
            return Err(AppError::Parse {
                message: format!("Magnitude must be finite, got {m} at {f} Hz"),
            });
        }

        freq.push(f);
        magnitude.push(m);
    }

    if freq.is_empty() {
        return Err(AppError::Parse {
            message: "No data points found in file".to_string(),
        });
    }

    validate_frequency_order(&freq)?;

    Ok(ResponseData {
        name: String::new(),
        source_path: None,
        freq,
        magnitude,
    })
}

/// Parse .frd (Frequency Response Data) files.
///
/// Same columnar layout as REW .txt, usually without comment headers.
pub fn parse_frd(content: &str) -> Result<ResponseData, AppError> {
    parse_rew_txt(content)
}

/// Validate that frequencies are monotonically increasing.
fn validate_frequency_order(freq: &[f64]) -> Result<(), AppError> {
    for i in 1..freq.len() {
        if freq[i] <= freq[i - 1] {
            return Err(AppError::Parse {
                message: format!(
                    "Frequencies must be monotonically increasing, but freq[{}]={} <= freq[{}]={}",
                    i,
                    freq[i],
                    i - 1,
                    freq[i - 1]
                ),
            });
        }
    }
    Ok(())
}
