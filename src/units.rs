//! Units and unit-list reconciliation.
//!
//! `BasicInfo::unit_count` is the single source of truth for how many units an
//! order has. Whenever the count changes the caller runs [`reconcile`], which
//! returns a new state whose unit list matches the count:
//!
//! - **Growth**: fresh units are appended, each seeded from the catalog
//! - **Shrink**: units are dropped from the tail (their edits are lost)
//! - **No change**: the state is returned untouched
//!
//! Surviving units keep their id, name, kind and selections.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::catalog::{self, QuantityItem, SelectableItem};
use crate::state::ConfigurationState;
use crate::types::UnitKind;

/// Stable unit identifier, rendered as `unit-<n>`.
///
/// Ids come from a counter carried by [`ConfigurationState`] and are never
/// handed out twice within a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UnitId(u32);

impl UnitId {
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    pub const fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for UnitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unit-{}", self.0)
    }
}

impl FromStr for UnitId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.strip_prefix("unit-")
            .and_then(|n| n.parse().ok())
            .map(Self)
            .ok_or_else(|| format!("invalid unit id '{}' (expected unit-<n>)", s))
    }
}

impl TryFrom<String> for UnitId {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<UnitId> for String {
    fn from(id: UnitId) -> Self {
        id.to_string()
    }
}

/// One configurable room of the order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Unit {
    pub id: UnitId,
    pub display_name: String,
    pub kind: UnitKind,
    pub selectables: Vec<SelectableItem>,
    pub quantities: Vec<QuantityItem>,
}

impl Unit {
    /// Create a unit seeded with fresh catalog defaults
    pub fn from_catalog(id: UnitId, display_name: impl Into<String>, kind: UnitKind) -> Self {
        Self {
            id,
            display_name: display_name.into(),
            kind,
            selectables: catalog::default_selectables(),
            quantities: catalog::default_quantities(),
        }
    }

    /// At least one selectable selected or one quantity above zero
    pub fn has_any_item(&self) -> bool {
        self.selectables.iter().any(|s| s.selected) || self.quantities.iter().any(|q| q.quantity > 0)
    }

    pub fn selectable_mut(&mut self, item_id: &str) -> Option<&mut SelectableItem> {
        self.selectables.iter_mut().find(|s| s.id == item_id)
    }

    pub fn quantity_mut(&mut self, item_id: &str) -> Option<&mut QuantityItem> {
        self.quantities.iter_mut().find(|q| q.id == item_id)
    }
}

/// Defaults applied to units created by growth.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitTemplate {
    /// Positional names are `"<prefix> <position>"`
    pub name_prefix: String,
    pub kind: UnitKind,
}

impl Default for UnitTemplate {
    fn default() -> Self {
        Self {
            name_prefix: "Room".to_string(),
            kind: UnitKind::default(),
        }
    }
}

impl UnitTemplate {
    /// Positional label for the unit at zero-based `index`
    pub fn positional_name(&self, index: usize) -> String {
        format!("{} {}", self.name_prefix, index + 1)
    }
}

/// Reconcile the unit list with `new_unit_count` using the default template.
pub fn reconcile(state: ConfigurationState, new_unit_count: u32) -> ConfigurationState {
    reconcile_with(state, new_unit_count, &UnitTemplate::default())
}

/// Reconcile the unit list with `new_unit_count`.
///
/// Total for any count the caller accepted; the range check happens at the
/// session boundary. The returned state has `unit_count == new_unit_count` and
/// exactly that many units.
pub fn reconcile_with(
    mut state: ConfigurationState,
    new_unit_count: u32,
    template: &UnitTemplate,
) -> ConfigurationState {
    let target = new_unit_count as usize;
    let current = state.units.len();
    state.basic_info.unit_count = new_unit_count;

    if target > current {
        debug!(from = current, to = target, "growing unit list");
        state.units.reserve(target - current);
        for index in current..target {
            let id = state.allocate_unit_id();
            state
                .units
                .push(Unit::from_catalog(id, template.positional_name(index), template.kind));
        }
    } else if target < current {
        debug!(
            from = current,
            to = target,
            discarded = current - target,
            "shrinking unit list, trailing units are discarded"
        );
        state.units.truncate(target);
    }

    state
}
