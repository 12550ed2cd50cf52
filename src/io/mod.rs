mod export;
mod parser;

pub use export::{export_all, export_curve, format_rew, rew_file_name, HOUSE_CURVE_FILE};
pub use parser::{import_curve, import_response, parse_frd, parse_rew_txt};

use std::path::PathBuf;

/// Magnitude response read from a measurement/target file.
#[derive(Debug, Clone)]
pub struct ResponseData {
    pub name: String,
    pub source_path: Option<PathBuf>,
    /// Hz, sorted ascending
    pub freq: Vec<f64>,
    /// dB
    pub magnitude: Vec<f64>,
}
