//! Error handling module for the configurator
//!
//! Provides the crate-wide error type using thiserror. Recoverable validation
//! outcomes (blocked steps, flagged contact fields) are reported as values by
//! the session; the variants here cover inputs rejected at the boundary.

use thiserror::Error;

use crate::units::UnitId;
use crate::wizard::{NavigationError, WizardStep};

/// Main error type for the configurator
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfiguratorError {
    /// Requested unit count outside `1..=max`
    #[error("Unit count {requested} is out of range (expected 1..={max})")]
    UnitCountOutOfRange { requested: u32, max: u32 },

    /// Event referenced a unit that does not exist in the current state
    #[error("Unknown unit: {0}")]
    UnknownUnit(UnitId),

    /// Event referenced a catalog item that the unit does not carry
    #[error("Unknown item '{item}' on unit {unit}")]
    UnknownItem { unit: UnitId, item: String },

    /// Navigation errors (stepping past either end of the wizard)
    #[error("Navigation error: {0}")]
    Navigation(#[from] NavigationError),

    /// Contact edits or submit attempted from a step other than Summary
    #[error("Cannot {action} on step '{step}' (only available on the summary)")]
    SummaryOnly {
        action: &'static str,
        step: WizardStep,
    },

    /// Configuration errors (loading, parsing, validation)
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias for configurator operations
pub type Result<T> = std::result::Result<T, ConfiguratorError>;

impl ConfiguratorError {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create an unknown-item error
    pub fn unknown_item(unit: UnitId, item: impl Into<String>) -> Self {
        Self::UnknownItem {
            unit,
            item: item.into(),
        }
    }
}
