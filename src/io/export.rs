use std::path::{Path, PathBuf};
use tracing::info;

use crate::channel::ChannelConfig;
use crate::error::AppError;
use crate::grid::{Curve, THIRD_OCTAVE_HZ};
use crate::house::HouseCurveRegistry;

pub const HOUSE_CURVE_FILE: &str = "house_curve_rew.csv";

/// REW import text: `freq,amplitude` per line, no header.
pub fn format_rew(curve: &Curve) -> String {
    THIRD_OCTAVE_HZ
        .iter()
        .zip(curve.iter())
        // Debug keeps the trailing ".0" on whole numbers
        .map(|(f, a)| format!("{:?},{:?}\n", f, a))
        .collect()
}

pub fn export_curve(path: &Path, curve: &Curve) -> Result<(), AppError> {
    std::fs::write(path, format_rew(curve))?;
    info!("export_curve: {}", path.display());
    Ok(())
}

/// `{lowercase name}_target_rew.csv`, spaces replaced by underscores.
pub fn rew_file_name(channel_name: &str) -> String {
    let stem: String = channel_name
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| if c.is_whitespace() { '_' } else { c })
        .collect();
    format!("{stem}_target_rew.csv")
}

/// Write the selected house curve and every enabled channel's target into `dir`.
///
/// Returns the written paths, house curve first.
pub fn export_all(
    dir: &Path,
    registry: &HouseCurveRegistry,
    channels: &[ChannelConfig],
) -> Result<Vec<PathBuf>, AppError> {
    std::fs::create_dir_all(dir)?;
    let mut written = Vec::new();

    let house_path = dir.join(HOUSE_CURVE_FILE);
    export_curve(&house_path, &registry.get_selected())?;
    written.push(house_path);

    for channel in channels {
        let Some(curve) = channel.target_curve(registry) else {
            continue;
        };
        let path = dir.join(rew_file_name(&channel.name));
        export_curve(&path, &curve)?;
        written.push(path);
    }

    info!("export_all: {} files -> {}", written.len(), dir.display());
    Ok(written)
}
