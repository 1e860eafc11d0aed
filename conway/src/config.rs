// config.rs - Tunables for the engine, loadable from TOML

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::dimension::Bounds;
use crate::error::{LifeError, Result};

/// Engine configuration. Every field has a default, so an empty TOML
/// document is a valid config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LifeConfig {
    pub bounds: Bounds,
    /// Starting cell size in pixels for auto-fit.
    pub default_cell: u32,
    /// Pixel change per grow/shrink in auto-fit mode.
    pub cell_step: u32,
    /// Column/row multiplier per grow/shrink in explicit mode.
    pub resolution_scale: f64,
    pub step_interval_ms: u64,
    /// Quiet period after the last resize before the settle reflow.
    pub settle_delay_ms: u64,
    pub stop_on_cycle: bool,
    /// Fixed RNG seed; entropy-seeded when absent.
    pub seed: Option<u64>,
}

impl Default for LifeConfig {
    fn default() -> Self {
        Self {
            bounds: Bounds::default(),
            default_cell: 20,
            cell_step: 2,
            resolution_scale: 1.2,
            step_interval_ms: 500,
            settle_delay_ms: 200,
            stop_on_cycle: false,
            seed: None,
        }
    }
}

impl LifeConfig {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: LifeConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    pub fn validate(&self) -> Result<()> {
        let b = &self.bounds;
        let fail = |msg: String| Err(LifeError::InvalidConfig(msg));

        if b.cell_min < 1 {
            return fail("cell_min must be at least 1".into());
        }
        if b.cell_min > b.cell_max {
            return fail(format!("cell_min {} exceeds cell_max {}", b.cell_min, b.cell_max));
        }
        if b.min_cols < 1 || b.min_rows < 1 {
            return fail("min_cols and min_rows must be at least 1".into());
        }
        if !(0.0..=1.0).contains(&b.width_narrow_threshold) {
            return fail(format!(
                "width_narrow_threshold {} is outside [0, 1]",
                b.width_narrow_threshold
            ));
        }
        if let Some(max_dim) = b.max_dim {
            if max_dim < b.min_cols.max(b.min_rows) {
                return fail(format!("max_dim {} is below the minimum grid size", max_dim));
            }
        }
        if !(b.cell_min..=b.cell_max).contains(&self.default_cell) {
            return fail(format!("default_cell {} is outside cell bounds", self.default_cell));
        }
        if self.resolution_scale <= 1.0 {
            return fail("resolution_scale must be greater than 1".into());
        }
        if self.step_interval_ms < 1 {
            return fail("step_interval_ms must be at least 1".into());
        }
        Ok(())
    }
}
