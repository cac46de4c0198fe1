//! Line-item catalog.
//!
//! The catalog is the fixed set of options every unit is seeded with. The
//! definitions live in `&'static` tables so they are loaded once and can never
//! be mutated at runtime; each unit receives its own owned copy through
//! [`default_selectables`] and [`default_quantities`].
//!
//! # Catalog
//!
//! | Id              | Kind       | Price (INR) |
//! |-----------------|------------|-------------|
//! | `motion`        | selectable | 1200 |
//! | `human`         | selectable | 2500 |
//! | `light`         | selectable | 800  |
//! | `environment`   | selectable | 1500 |
//! | `communication` | selectable | 1000 |
//! | `air`           | selectable | 2200 |
//! | `led`           | quantity   | 1800 |
//! | `switch`        | quantity   | 2500 |

use serde::Serialize;

/// Static definition of a catalog entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemDefinition {
    pub id: &'static str,
    pub label: &'static str,
    pub description: &'static str,
    pub unit_price: u64,
}

/// Binary add-on (a sensor): either included or not.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectableItem {
    pub id: String,
    pub label: String,
    pub description: String,
    pub unit_price: u64,
    pub selected: bool,
}

impl SelectableItem {
    /// Create an unselected item
    pub fn new(id: &str, label: &str, description: &str, unit_price: u64) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
            description: description.to_string(),
            unit_price,
            selected: false,
        }
    }
}

impl From<&ItemDefinition> for SelectableItem {
    fn from(def: &ItemDefinition) -> Self {
        Self::new(def.id, def.label, def.description, def.unit_price)
    }
}

/// Option bought by the piece (a device); price scales with quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuantityItem {
    pub id: String,
    pub label: String,
    pub description: String,
    pub unit_price: u64,
    pub quantity: u32,
}

impl QuantityItem {
    /// Create an item with quantity zero
    pub fn new(id: &str, label: &str, description: &str, unit_price: u64) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
            description: description.to_string(),
            unit_price,
            quantity: 0,
        }
    }

    /// Price of the current quantity
    pub fn line_total(&self) -> u64 {
        self.unit_price.saturating_mul(u64::from(self.quantity))
    }
}

impl From<&ItemDefinition> for QuantityItem {
    fn from(def: &ItemDefinition) -> Self {
        Self::new(def.id, def.label, def.description, def.unit_price)
    }
}

/// Sensors offered for every room.
pub const SELECTABLES: &[ItemDefinition] = &[
    ItemDefinition {
        id: "motion",
        label: "Motion Sensor",
        description: "The PIR Motion Sensor Detector Module allows you to sense motion.",
        unit_price: 1200,
    },
    ItemDefinition {
        id: "human",
        label: "Human Presence Detection",
        description: "Want to detect if the room is occupied or if someone is moving in the room?",
        unit_price: 2500,
    },
    ItemDefinition {
        id: "light",
        label: "Light Intensity",
        description: "Want to detect if the room is dark or bright using a light intensity sensor.",
        unit_price: 800,
    },
    ItemDefinition {
        id: "environment",
        label: "Air Pressure, Temperature, Humidity",
        description: "Want to detect Air Pressure, Temperature, and Humidity in this Room?",
        unit_price: 1500,
    },
    ItemDefinition {
        id: "communication",
        label: "Local Communication",
        description: "Local Communication and auto-discoverable in home assistant via ESP-Now Protocol",
        unit_price: 1000,
    },
    ItemDefinition {
        id: "air",
        label: "Air Quality Index",
        description: "Air Quality Index for home",
        unit_price: 2200,
    },
];

/// Devices offered for every room, bought by quantity.
pub const QUANTITIES: &[ItemDefinition] = &[
    ItemDefinition {
        id: "led",
        label: "12 Watt LED COB Dimmer",
        description: "Dimmable LED light controller for ambient lighting",
        unit_price: 1800,
    },
    ItemDefinition {
        id: "switch",
        label: "4 Switch Module",
        description: "Control up to 4 different electrical appliances or lights",
        unit_price: 2500,
    },
];

/// Fresh, unselected copies of every selectable definition.
pub fn default_selectables() -> Vec<SelectableItem> {
    SELECTABLES.iter().map(SelectableItem::from).collect()
}

/// Fresh, zero-quantity copies of every quantity definition.
pub fn default_quantities() -> Vec<QuantityItem> {
    QUANTITIES.iter().map(QuantityItem::from).collect()
}

/// Look up a selectable definition by id
pub fn find_selectable(id: &str) -> Option<&'static ItemDefinition> {
    SELECTABLES.iter().find(|def| def.id == id)
}

/// Look up a quantity definition by id
pub fn find_quantity(id: &str) -> Option<&'static ItemDefinition> {
    QUANTITIES.iter().find(|def| def.id == id)
}

/// Whether `id` names any catalog entry
pub fn contains(id: &str) -> bool {
    find_selectable(id).is_some() || find_quantity(id).is_some()
}
