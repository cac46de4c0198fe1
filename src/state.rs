//! Configuration state
//!
//! Holds the basic order information and the list of configurable units,
//! plus the in-place edits the user may make to a unit. Creating or
//! removing units is never done here: that only happens through
//! [`crate::units::reconcile`] when the unit count changes.

use serde::Serialize;

use crate::error::{ConfiguratorError, Result};
use crate::types::{PropertyKind, UnitKind};
use crate::units::{self, Unit, UnitId, UnitTemplate};

/// Order-level information collected on the first step
/// (contact details are merged in on submission).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BasicInfo {
    pub property_kind: PropertyKind,
    /// Source of truth for the length of the unit list
    pub unit_count: u32,
    pub contact_name: Option<String>,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
}

impl Default for BasicInfo {
    fn default() -> Self {
        Self {
            property_kind: PropertyKind::default(),
            unit_count: 1,
            contact_name: None,
            contact_email: None,
            contact_phone: None,
        }
    }
}

/// The in-progress configuration of one order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfigurationState {
    pub basic_info: BasicInfo,
    pub units: Vec<Unit>,
    /// Next id handed out to a newly created unit
    #[serde(skip)]
    next_unit_id: u32,
}

impl Default for ConfigurationState {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigurationState {
    /// Initial state: one default unit, no contact details.
    pub fn new() -> Self {
        Self::with_template(&UnitTemplate::default())
    }

    /// Initial state whose first unit is built from `template`.
    pub fn with_template(template: &UnitTemplate) -> Self {
        Self::initial(template, 0)
    }

    /// Initial state that keeps counting unit ids from this one, so ids
    /// stay unique across a reset.
    pub fn reset(&self, template: &UnitTemplate) -> Self {
        Self::initial(template, self.next_unit_id)
    }

    fn initial(template: &UnitTemplate, next_unit_id: u32) -> Self {
        let empty = Self {
            next_unit_id,
            ..Self::empty()
        };
        units::reconcile_with(empty, 1, template)
    }

    /// Unit-less placeholder, for moving a state out from behind `&mut`.
    pub(crate) fn empty() -> Self {
        Self {
            basic_info: BasicInfo::default(),
            units: Vec::new(),
            next_unit_id: 0,
        }
    }

    pub(crate) fn allocate_unit_id(&mut self) -> UnitId {
        let id = UnitId::new(self.next_unit_id);
        self.next_unit_id += 1;
        id
    }

    /// Look up a unit by id
    pub fn unit(&self, id: UnitId) -> Option<&Unit> {
        self.units.iter().find(|u| u.id == id)
    }

    fn unit_mut(&mut self, id: UnitId) -> Result<&mut Unit> {
        self.units
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or(ConfiguratorError::UnknownUnit(id))
    }

    pub fn set_property_kind(&mut self, kind: PropertyKind) {
        self.basic_info.property_kind = kind;
    }

    /// Rename a unit. The text is stored as typed; emptiness is a
    /// validation concern, not an edit error.
    pub fn set_unit_name(&mut self, id: UnitId, name: impl Into<String>) -> Result<()> {
        self.unit_mut(id)?.display_name = name.into();
        Ok(())
    }

    pub fn set_unit_kind(&mut self, id: UnitId, kind: UnitKind) -> Result<()> {
        self.unit_mut(id)?.kind = kind;
        Ok(())
    }

    /// Set the selection flag of one selectable item.
    pub fn toggle_selectable(&mut self, id: UnitId, item_id: &str, selected: bool) -> Result<()> {
        let item = self
            .unit_mut(id)?
            .selectable_mut(item_id)
            .ok_or_else(|| ConfiguratorError::unknown_item(id, item_id))?;
        item.selected = selected;
        Ok(())
    }

    /// Add `delta` to an item's quantity, clamping at zero.
    ///
    /// Returns the resulting quantity.
    pub fn adjust_quantity(&mut self, id: UnitId, item_id: &str, delta: i64) -> Result<u32> {
        let item = self
            .unit_mut(id)?
            .quantity_mut(item_id)
            .ok_or_else(|| ConfiguratorError::unknown_item(id, item_id))?;
        let adjusted = i64::from(item.quantity)
            .saturating_add(delta)
            .clamp(0, i64::from(u32::MAX));
        item.quantity = u32::try_from(adjusted).unwrap_or(u32::MAX);
        Ok(item.quantity)
    }
}
