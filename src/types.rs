//! Type-safe choice types for the configurator
//!
//! Closed choices (property kind, unit kind) are Rust enums rather than
//! strings, so event payloads and config files are validated on parse.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Whether the order is for an existing home or new construction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[derive(Display, EnumString, EnumIter)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum PropertyKind {
    #[default]
    Existing,
    New,
}

impl PropertyKind {
    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            Self::Existing => "Existing Home",
            Self::New => "New Construction",
        }
    }
}

/// Kind of room a unit represents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[derive(Display, EnumString, EnumIter)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum UnitKind {
    Living,
    #[default]
    Bedroom,
    Kitchen,
    Bathroom,
    Office,
    Dining,
    Other,
}

impl UnitKind {
    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            Self::Living => "Living Room",
            Self::Bedroom => "Bedroom",
            Self::Kitchen => "Kitchen",
            Self::Bathroom => "Bathroom",
            Self::Office => "Home Office",
            Self::Dining => "Dining Room",
            Self::Other => "Other",
        }
    }
}
