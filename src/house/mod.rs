// House curve registry: predefined (read-only) and custom (editable) baselines
//
// Names are unique across both sets. The selection always resolves to an
// existing entry; edits never move it.

use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::info;

use crate::error::AppError;
use crate::grid::{Curve, FLAT, GRID_LEN};

/// Name of the built-in house curve.
pub const HOUSE_CURVE_NAME: &str = "House Curve";

/// Reference house curve in dB on the 1/3-octave grid.
pub const HOUSE_CURVE: Curve = [
    24.0, 22.0, 20.0, 16.0, 11.0, 8.0, 6.0, 4.0, 3.0, 1.5, 0.5, 0.0, -1.0, -2.0, -2.3, -2.5,
    -2.5, -3.0, -3.3, -3.6, -4.0, -4.5, -5.0, -5.5, -6.0, -6.8, -7.5, -8.0, -8.8, -9.5, -10.0,
];

/// Custom slots created by [`HouseCurveRegistry::default`].
pub const DEFAULT_CUSTOM_NAMES: [&str; 2] = ["Custom 1", "Custom 2"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedCurve {
    pub name: String,
    pub values: Curve,
}

#[derive(Debug, Clone)]
pub struct HouseCurveRegistry {
    predefined: Vec<NamedCurve>,
    custom: Vec<NamedCurve>,
    selected: String,
}

impl HouseCurveRegistry {
    /// Build a registry with the given predefined curves and zeroed custom slots.
    ///
    /// The first predefined curve is selected.
    pub fn new(predefined: Vec<NamedCurve>, custom_names: &[&str]) -> Result<Self, AppError> {
        let first = predefined.first().ok_or_else(|| AppError::Config {
            message: "at least one predefined house curve is required".to_string(),
        })?;
        let selected = first.name.clone();

        let custom: Vec<NamedCurve> = custom_names
            .iter()
            .map(|name| NamedCurve {
                name: name.to_string(),
                values: FLAT,
            })
            .collect();

        let mut seen: Vec<&str> = Vec::new();
        for entry in predefined.iter().chain(custom.iter()) {
            if seen.contains(&entry.name.as_str()) {
                return Err(AppError::Config {
                    message: format!("duplicate house curve name: '{}'", entry.name),
                });
            }
            seen.push(entry.name.as_str());
        }

        Ok(Self {
            predefined,
            custom,
            selected,
        })
    }

    // -----------------------------------------------------------------------
    // Lookup
    // -----------------------------------------------------------------------

    /// All names, predefined first, each set in creation order.
    pub fn names(&self) -> Vec<&str> {
        self.predefined
            .iter()
            .chain(self.custom.iter())
            .map(|c| c.name.as_str())
            .collect()
    }

    pub fn custom_names(&self) -> Vec<&str> {
        self.custom.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn get(&self, name: &str) -> Result<&Curve, AppError> {
        self.predefined
            .iter()
            .chain(self.custom.iter())
            .find(|c| c.name == name)
            .map(|c| &c.values)
            .ok_or_else(|| unknown(name))
    }

    pub fn is_custom(&self, name: &str) -> bool {
        self.custom.iter().any(|c| c.name == name)
    }

    pub fn selected_name(&self) -> &str {
        &self.selected
    }

    /// Copy of the currently selected curve.
    pub fn get_selected(&self) -> Curve {
        let curve = self.get(&self.selected);
        debug_assert!(curve.is_ok(), "selection '{}' not in registry", self.selected);
        curve.copied().unwrap_or(FLAT)
    }

    // -----------------------------------------------------------------------
    // Mutation
    // -----------------------------------------------------------------------

    pub fn set_selected(&mut self, name: &str) -> Result<(), AppError> {
        self.get(name)?;
        info!("set_selected: '{}' -> '{}'", self.selected, name);
        self.selected = name.to_string();
        Ok(())
    }

    /// Overwrite one sample of a custom curve.
    pub fn update_point(&mut self, name: &str, index: usize, value: f64) -> Result<(), AppError> {
        let curve = self.custom_mut(name)?;
        if index >= GRID_LEN {
            return Err(AppError::IndexOutOfRange {
                index,
                len: GRID_LEN,
            });
        }
        curve[index] = value;
        info!("update_point: '{}'[{}] = {:.2} dB", name, index, value);
        Ok(())
    }

    /// Replace custom curve `name` with a copy of the selected curve.
    pub fn load_from_selected(&mut self, name: &str) -> Result<(), AppError> {
        let source = self.get_selected();
        let selected = self.selected.clone();
        *self.custom_mut(name)? = source;
        info!("load_from_selected: '{}' <- '{}'", name, selected);
        Ok(())
    }

    /// Replace custom curve `name` with `values`.
    pub fn load_custom(&mut self, name: &str, values: Curve) -> Result<(), AppError> {
        *self.custom_mut(name)? = values;
        info!("load_custom: '{}'", name);
        Ok(())
    }

    /// Flatten every custom curve to 0 dB. Predefined curves and the selection
    /// are untouched.
    pub fn reset_custom(&mut self) {
        for c in self.custom.iter_mut() {
            c.values = FLAT;
        }
        info!("reset_custom: {} curves zeroed", self.custom.len());
    }

    fn custom_mut(&mut self, name: &str) -> Result<&mut Curve, AppError> {
        if self.predefined.iter().any(|c| c.name == name) {
            return Err(AppError::NotCustom {
                name: name.to_string(),
            });
        }
        self.custom
            .iter_mut()
            .find(|c| c.name == name)
            .map(|c| &mut c.values)
            .ok_or_else(|| unknown(name))
    }
}

impl Default for HouseCurveRegistry {
    /// The built-in house curve plus [`DEFAULT_CUSTOM_NAMES`].
    fn default() -> Self {
        Self {
            predefined: vec![NamedCurve {
                name: HOUSE_CURVE_NAME.to_string(),
                values: HOUSE_CURVE,
            }],
            custom: DEFAULT_CUSTOM_NAMES
                .iter()
                .map(|name| NamedCurve {
                    name: name.to_string(),
                    values: FLAT,
                })
                .collect(),
            selected: HOUSE_CURVE_NAME.to_string(),
        }
    }
}

fn unknown(name: &str) -> AppError {
    AppError::UnknownCurveName {
        name: name.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Shared handle
// ---------------------------------------------------------------------------

/// Registry handle for callers on more than one thread.
///
/// Each call holds the lock for the whole operation, so a reader never sees
/// a half-written curve.
#[derive(Debug, Clone, Default)]
pub struct SharedRegistry {
    inner: Arc<Mutex<HouseCurveRegistry>>,
}

impl SharedRegistry {
    pub fn new(registry: HouseCurveRegistry) -> Self {
        Self {
            inner: Arc::new(Mutex::new(registry)),
        }
    }

    /// Run `f` with exclusive access to the registry.
    pub fn with<R>(&self, f: impl FnOnce(&mut HouseCurveRegistry) -> R) -> R {
        let mut guard = self.lock();
        f(&mut *guard)
    }

    pub fn get_selected(&self) -> Curve {
        self.lock().get_selected()
    }

    pub fn set_selected(&self, name: &str) -> Result<(), AppError> {
        self.lock().set_selected(name)
    }

    pub fn update_point(&self, name: &str, index: usize, value: f64) -> Result<(), AppError> {
        self.lock().update_point(name, index, value)
    }

    pub fn load_from_selected(&self, name: &str) -> Result<(), AppError> {
        self.lock().load_from_selected(name)
    }

    pub fn reset_custom(&self) {
        self.lock().reset_custom()
    }

    fn lock(&self) -> MutexGuard<'_, HouseCurveRegistry> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
