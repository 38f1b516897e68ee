//! Engine Configuration
//!
//! Every tunable constant of the layout, camera and grid passes lives here,
//! with defaults matching the shipped behaviour. A JSON file may override any
//! subset of fields; missing fields keep their defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{self, Result, RoomError};

// ============================================================================
// Sections
// ============================================================================

/// Label sizing constants.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Text size as a fraction of the largest room dimension.
    pub text_scale: f64,
    /// Upper bound on text size as a fraction of room height.
    pub height_cap_ratio: f64,
    /// Lower bound on text size in scene units.
    pub min_text_size: f64,
    /// Label offset from the surface it annotates, relative to text size.
    pub gap_ratio: f64,
    /// Size multiplier applied to the total cost label.
    pub total_size_multiplier: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            text_scale: 0.03,
            height_cap_ratio: 0.15,
            min_text_size: 0.15,
            gap_ratio: 1.2,
            total_size_multiplier: 1.2,
        }
    }
}

/// Camera framing constants.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Fit distance as a multiple of the largest room dimension.
    pub fit_multiplier: f64,
    /// Below `near_ratio * fit` the camera is too close.
    pub near_ratio: f64,
    /// Above `far_ratio * fit` the camera is too far.
    pub far_ratio: f64,
    /// Minimum target height as a fraction of the fit distance.
    pub min_height_ratio: f64,
    /// Fraction of the remaining distance covered per reference tick.
    pub lerp_factor: f64,
    /// Distance to the target below which the camera snaps into place.
    pub snap_threshold: f64,
    /// Tick rate (Hz) at which `lerp_factor` applies exactly.
    pub reference_tick_rate: f64,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fit_multiplier: 1.5,
            near_ratio: 0.4,
            far_ratio: 2.5,
            min_height_ratio: 0.3,
            lerp_factor: 0.05,
            snap_threshold: 0.1,
            reference_tick_rate: 60.0,
        }
    }
}

/// Floor grid constants.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Edge length of one grid cell in scene units.
    pub cell_size: f64,
    /// Smallest grid extent ever emitted.
    pub min_size: f64,
    /// Cap on the number of divisions along one axis.
    pub max_divisions: u32,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            cell_size: 1.0,
            min_size: 2.0,
            max_divisions: 200,
        }
    }
}

/// Field values given to a freshly added layer when the caller omits them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayerDefaults {
    pub name: String,
    pub wall_count: u8,
    pub applies_floor: bool,
    pub applies_ceiling: bool,
}

impl Default for LayerDefaults {
    fn default() -> Self {
        Self {
            name: "New layer".to_string(),
            wall_count: 4,
            applies_floor: true,
            applies_ceiling: true,
        }
    }
}

// ============================================================================
// Engine Configuration
// ============================================================================

/// Complete engine configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub layout: LayoutConfig,
    pub camera: CameraConfig,
    pub grid: GridConfig,
    pub layer_defaults: LayerDefaults,
}

impl EngineConfig {
    /// Load and validate a configuration from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let text = error::read_to_string(path)?;
        let config = Self::from_json_str(&text)?;
        tracing::debug!(path = %path.display(), "loaded engine configuration");
        Ok(config)
    }

    /// Parse and validate a configuration from JSON text
    pub fn from_json_str(text: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the engines cannot work with
    pub fn validate(&self) -> Result<()> {
        let layout = &self.layout;
        positive("layout.text_scale", layout.text_scale)?;
        positive("layout.height_cap_ratio", layout.height_cap_ratio)?;
        positive("layout.min_text_size", layout.min_text_size)?;
        non_negative("layout.gap_ratio", layout.gap_ratio)?;
        positive("layout.total_size_multiplier", layout.total_size_multiplier)?;

        let camera = &self.camera;
        positive("camera.fit_multiplier", camera.fit_multiplier)?;
        positive("camera.near_ratio", camera.near_ratio)?;
        positive("camera.far_ratio", camera.far_ratio)?;
        if camera.near_ratio >= camera.far_ratio {
            return Err(RoomError::invalid_config(
                "camera.near_ratio",
                format!(
                    "must be below camera.far_ratio ({} >= {})",
                    camera.near_ratio, camera.far_ratio
                ),
            ));
        }
        non_negative("camera.min_height_ratio", camera.min_height_ratio)?;
        positive("camera.lerp_factor", camera.lerp_factor)?;
        if camera.lerp_factor > 1.0 {
            return Err(RoomError::invalid_config(
                "camera.lerp_factor",
                format!("must be in (0, 1], got {}", camera.lerp_factor),
            ));
        }
        positive("camera.snap_threshold", camera.snap_threshold)?;
        positive("camera.reference_tick_rate", camera.reference_tick_rate)?;

        positive("grid.cell_size", self.grid.cell_size)?;
        non_negative("grid.min_size", self.grid.min_size)?;
        if self.grid.max_divisions == 0 {
            return Err(RoomError::invalid_config(
                "grid.max_divisions",
                "must be at least 1",
            ));
        }

        if self.layer_defaults.wall_count > 4 {
            return Err(RoomError::invalid_config(
                "layer_defaults.wall_count",
                format!("must be 0..=4, got {}", self.layer_defaults.wall_count),
            ));
        }
        Ok(())
    }
}

fn positive(field: &str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(RoomError::invalid_config(
            field,
            format!("must be a finite positive number, got {value}"),
        ))
    }
}

fn non_negative(field: &str, value: f64) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(RoomError::invalid_config(
            field,
            format!("must be a finite non-negative number, got {value}"),
        ))
    }
}
