//! Panel configuration parsed from environment variables.
//!
//! `main` loads `.env` through `dotenvy` first, so every key may also come
//! from a dotenv file. Malformed numbers fall back to their defaults;
//! values that parse but make no sense are rejected.

use std::path::PathBuf;

pub const DEFAULT_STORAGE_DIR: &str = "airibes_storage";
pub const DEFAULT_APARTMENT_ID: &str = "1";
pub const DEFAULT_CANVAS_SIZE_CM: f64 = 1000.0;
pub const DEFAULT_VIEWPORT_PX: f64 = 800.0;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{key} must be positive, got {value}")]
    NonPositive { key: &'static str, value: f64 },
    #[error("AIRIBES_APARTMENT_ID must not be empty")]
    EmptyApartmentId,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PanelConfig {
    /// Directory holding stored floorplans, the device list and states.
    pub storage_dir: PathBuf,
    pub apartment_id: String,
    /// Editor canvas side in real cm.
    pub canvas_size_cm: f64,
    /// Editor canvas side in display px.
    pub viewport_px: f64,
}

impl PanelConfig {
    /// Build typed panel config from environment variables.
    ///
    /// Optional:
    /// - `AIRIBES_STORAGE_DIR`: default `airibes_storage`
    /// - `AIRIBES_APARTMENT_ID`: default `1`
    /// - `AIRIBES_CANVAS_SIZE_CM`: default 1000
    /// - `AIRIBES_VIEWPORT_PX`: default 800
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] for an empty apartment id or a non-positive
    /// canvas or viewport size.
    pub fn from_env() -> Result<Self, ConfigError> {
        let storage_dir =
            std::env::var("AIRIBES_STORAGE_DIR").map_or_else(|_| PathBuf::from(DEFAULT_STORAGE_DIR), PathBuf::from);
        let apartment_id = std::env::var("AIRIBES_APARTMENT_ID")
            .unwrap_or_else(|_| DEFAULT_APARTMENT_ID.to_string())
            .trim()
            .to_string();
        if apartment_id.is_empty() {
            return Err(ConfigError::EmptyApartmentId);
        }

        let canvas_size_cm = positive("AIRIBES_CANVAS_SIZE_CM", env_parse("AIRIBES_CANVAS_SIZE_CM", DEFAULT_CANVAS_SIZE_CM))?;
        let viewport_px = positive("AIRIBES_VIEWPORT_PX", env_parse("AIRIBES_VIEWPORT_PX", DEFAULT_VIEWPORT_PX))?;

        Ok(Self { storage_dir, apartment_id, canvas_size_cm, viewport_px })
    }

    /// Display px per real cm on the editor canvas.
    #[must_use]
    pub fn scale(&self) -> f64 {
        self.viewport_px / self.canvas_size_cm
    }
}

pub(crate) fn env_parse<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr + Copy,
{
    std::env::var(key)
        .ok()
        .and_then(|v| v.trim().parse::<T>().ok())
        .unwrap_or(default)
}

fn positive(key: &'static str, value: f64) -> Result<f64, ConfigError> {
    if value > 0.0 { Ok(value) } else { Err(ConfigError::NonPositive { key, value }) }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
