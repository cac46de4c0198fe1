//! Engine configuration
//!
//! Tunables that would otherwise be constants: the unit-count bound, the tax
//! rate and the defaults given to newly created units. Loaded from and saved
//! to JSON; every field has a default, so a partial file is accepted.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::pricing::TaxRate;
use crate::types::UnitKind;
use crate::units::UnitTemplate;

/// Upper limit accepted for `max_units` in a config file
pub const MAX_UNITS_CEILING: u32 = 100;

/// Engine configuration that can be saved/loaded
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Largest unit count a user may request (smallest is always 1)
    pub max_units: u32,
    /// Tax rate in basis points (1800 = 18%)
    pub tax_rate_bps: u32,
    /// Kind given to newly created units
    pub default_unit_kind: UnitKind,
    /// New units are named `"<prefix> <position>"`
    pub unit_name_prefix: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_units: 10,
            tax_rate_bps: TaxRate::GST.basis_points(),
            default_unit_kind: UnitKind::Bedroom,
            unit_name_prefix: "Room".to_string(),
        }
    }
}

impl EngineConfig {
    pub fn tax_rate(&self) -> TaxRate {
        TaxRate::from_basis_points(self.tax_rate_bps)
    }

    /// Template used when the unit list grows
    pub fn unit_template(&self) -> UnitTemplate {
        UnitTemplate {
            name_prefix: self.unit_name_prefix.clone(),
            kind: self.default_unit_kind,
        }
    }

    /// Whether `count` is an acceptable unit count
    pub fn accepts_unit_count(&self, count: u32) -> bool {
        (1..=self.max_units).contains(&count)
    }

    /// Save configuration to a JSON file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .context("Failed to serialize engine configuration to JSON")?;

        fs::write(&path, json)
            .with_context(|| format!("Failed to write configuration to {:?}", path.as_ref()))?;

        Ok(())
    }

    /// Load configuration from a JSON file and validate it
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read configuration from {:?}", path.as_ref()))?;

        let config: Self =
            serde_json::from_str(&content).context("Failed to parse configuration JSON")?;
        config.validate()?;

        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.max_units == 0 {
            anyhow::bail!("max_units must be at least 1");
        }
        if self.max_units > MAX_UNITS_CEILING {
            anyhow::bail!("max_units must not exceed {}", MAX_UNITS_CEILING);
        }

        if self.tax_rate_bps > 10_000 {
            anyhow::bail!("tax_rate_bps must be between 0 and 10000 (0-100%)");
        }

        if self.unit_name_prefix.trim().is_empty() {
            anyhow::bail!("unit_name_prefix must not be empty");
        }

        Ok(())
    }
}
