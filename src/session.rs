use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::channel::{default_channels, ChannelConfig};
use crate::error::AppError;
use crate::house::{HouseCurveRegistry, NamedCurve, HOUSE_CURVE_NAME};

// ---------------------------------------------------------------------------
// Session file data model
// ---------------------------------------------------------------------------

pub const APP_NAME: &str = "Tuning Companion";
const MAX_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionFile {
    pub version: u32,
    pub app_name: String,
    pub channels: Vec<ChannelConfig>,
    #[serde(default = "default_selected")]
    pub selected_curve: String,
    /// Custom house curves by slot name
    #[serde(default)]
    pub custom_curves: Vec<NamedCurve>,
    #[serde(default)]
    pub output_folder: Option<PathBuf>,
}

fn default_selected() -> String {
    HOUSE_CURVE_NAME.to_string()
}

impl Default for SessionFile {
    fn default() -> Self {
        Self {
            version: MAX_VERSION,
            app_name: APP_NAME.to_string(),
            channels: default_channels(),
            selected_curve: default_selected(),
            custom_curves: Vec::new(),
            output_folder: None,
        }
    }
}

impl SessionFile {
    /// Snapshot the registry's custom curves and selection alongside `channels`.
    pub fn capture(registry: &HouseCurveRegistry, channels: &[ChannelConfig]) -> Self {
        let custom_curves = registry
            .custom_names()
            .into_iter()
            .filter_map(|name| {
                registry.get(name).ok().map(|values| NamedCurve {
                    name: name.to_string(),
                    values: *values,
                })
            })
            .collect();
        Self {
            channels: channels.to_vec(),
            selected_curve: registry.selected_name().to_string(),
            custom_curves,
            ..Self::default()
        }
    }

    /// Push stored custom curves and the selection into `registry`.
    ///
    /// Curves for slots the registry does not have are skipped with a warning.
    /// An unknown selection is an error.
    pub fn apply_to(&self, registry: &mut HouseCurveRegistry) -> Result<(), AppError> {
        for curve in &self.custom_curves {
            match registry.load_custom(&curve.name, curve.values) {
                Ok(()) => {}
                Err(AppError::UnknownCurveName { name }) => {
                    warn!("apply_to: no custom slot named '{}', skipped", name);
                }
                Err(e) => return Err(e),
            }
        }
        registry.set_selected(&self.selected_curve)
    }
}

// ---------------------------------------------------------------------------
// Load / save
// ---------------------------------------------------------------------------

pub fn save_session(path: &Path, session: &SessionFile) -> Result<(), AppError> {
    info!("save_session: {}", path.display());
    let json = serde_json::to_string_pretty(session).map_err(|e| AppError::Parse {
        message: format!("Serialization error: {e}"),
    })?;
    std::fs::write(path, json)?;
    info!(
        "save_session: wrote {} channels, {} custom curves",
        session.channels.len(),
        session.custom_curves.len()
    );
    Ok(())
}

pub fn load_session(path: &Path) -> Result<SessionFile, AppError> {
    info!("load_session: {}", path.display());
    let json = std::fs::read_to_string(path)?;
    let session: SessionFile = serde_json::from_str(&json).map_err(|e| AppError::Parse {
        message: format!("Session parse error: {e}"),
    })?;
    if session.version > MAX_VERSION {
        return Err(AppError::Config {
            message: format!(
                "Session version {} is newer than supported (max {}). Update {}.",
                session.version, MAX_VERSION, APP_NAME
            ),
        });
    }
    info!("load_session: {} channels loaded", session.channels.len());
    Ok(session)
}
