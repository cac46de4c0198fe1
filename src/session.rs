//! Configurator session
//!
//! Ties the pieces together for a presentation layer: one [`Configurator`]
//! per wizard session, fed discrete [`WizardEvent`]s and read through a
//! [`Projection`].
//!
//! Every event is applied synchronously and atomically. Recoverable
//! outcomes (a blocked step, flagged contact fields) come back as
//! [`EventOutcome`] values and are also kept on the session for rendering.
//! Inputs the caller should never have produced (an out-of-range unit count,
//! an unknown unit or item, contact edits or submit before the summary) are
//! rejected with a [`ConfiguratorError`] and leave the session untouched.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::EngineConfig;
use crate::error::{ConfiguratorError, Result};
use crate::pricing::{self, PriceBreakdown, TaxRate};
use crate::state::{BasicInfo, ConfigurationState};
use crate::submission::{self, Order};
use crate::types::{PropertyKind, UnitKind};
use crate::units::{self, Unit, UnitId};
use crate::validation::{
    ContactField, ContactFields, FieldErrors, StepValidationFailure, validate_step,
};
use crate::wizard::{NavigationError, StepNavigator, WizardStep};

/// Discrete input from the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum WizardEvent {
    SetPropertyKind {
        kind: PropertyKind,
    },
    SetUnitCount {
        count: u32,
    },
    SetUnitName {
        unit_id: UnitId,
        name: String,
    },
    SetUnitKind {
        unit_id: UnitId,
        kind: UnitKind,
    },
    ToggleSelectable {
        unit_id: UnitId,
        item_id: String,
        selected: bool,
    },
    AdjustQuantity {
        unit_id: UnitId,
        item_id: String,
        delta: i64,
    },
    GoNext,
    GoBack,
    UpdateContactField {
        field: ContactField,
        value: String,
    },
    Submit,
}

/// Result of an accepted event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventOutcome {
    /// State changed (or was already as requested)
    Applied,
    /// `GoNext` or `Submit` refused over incomplete rooms; the step is unchanged
    StepBlocked(StepValidationFailure),
    /// `Submit` refused; the listed fields are flagged
    FieldsRejected(FieldErrors),
    /// Order built; the session has been reset
    Submitted(Order),
}

/// One unit as the views need it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnitView {
    #[serde(flatten)]
    pub unit: Unit,
    pub kind_label: &'static str,
    pub subtotal: u64,
}

/// Read-only snapshot of everything a view renders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Projection {
    pub step: WizardStep,
    pub step_title: &'static str,
    pub step_number: usize,
    pub total_steps: usize,
    pub can_go_back: bool,
    pub basic_info: BasicInfo,
    pub property_kind_label: &'static str,
    pub units: Vec<UnitView>,
    pub tax_rate: TaxRate,
    #[serde(flatten)]
    pub totals: PriceBreakdown,
    pub contact: ContactFields,
    pub field_errors: Option<FieldErrors>,
    pub step_error: Option<StepValidationFailure>,
}

/// A single wizard session.
#[derive(Debug, Clone)]
pub struct Configurator {
    config: EngineConfig,
    state: ConfigurationState,
    navigator: StepNavigator,
    contact: ContactFields,
    field_errors: Option<FieldErrors>,
    step_error: Option<StepValidationFailure>,
}

impl Default for Configurator {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl Configurator {
    /// Start a session: one default unit, first step, empty contact form.
    pub fn new(config: EngineConfig) -> Self {
        let state = ConfigurationState::with_template(&config.unit_template());
        Self {
            config,
            state,
            navigator: StepNavigator::new(),
            contact: ContactFields::default(),
            field_errors: None,
            step_error: None,
        }
    }

    /// Like [`Configurator::new`], but refuses a config that fails validation.
    pub fn try_new(config: EngineConfig) -> Result<Self> {
        config
            .validate()
            .map_err(|e| ConfiguratorError::config(e.to_string()))?;
        Ok(Self::new(config))
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn state(&self) -> &ConfigurationState {
        &self.state
    }

    pub fn current_step(&self) -> WizardStep {
        self.navigator.current()
    }

    pub fn contact(&self) -> &ContactFields {
        &self.contact
    }

    pub fn field_errors(&self) -> Option<&FieldErrors> {
        self.field_errors.as_ref()
    }

    /// Apply one event.
    pub fn dispatch(&mut self, event: WizardEvent) -> Result<EventOutcome> {
        debug!(?event, step = %self.navigator.current(), "dispatching event");
        match event {
            WizardEvent::SetPropertyKind { kind } => {
                self.state.set_property_kind(kind);
                Ok(EventOutcome::Applied)
            }
            WizardEvent::SetUnitCount { count } => {
                self.set_unit_count(count)?;
                Ok(EventOutcome::Applied)
            }
            WizardEvent::SetUnitName { unit_id, name } => {
                self.state.set_unit_name(unit_id, name)?;
                Ok(EventOutcome::Applied)
            }
            WizardEvent::SetUnitKind { unit_id, kind } => {
                self.state.set_unit_kind(unit_id, kind)?;
                Ok(EventOutcome::Applied)
            }
            WizardEvent::ToggleSelectable {
                unit_id,
                item_id,
                selected,
            } => {
                self.state.toggle_selectable(unit_id, &item_id, selected)?;
                Ok(EventOutcome::Applied)
            }
            WizardEvent::AdjustQuantity {
                unit_id,
                item_id,
                delta,
            } => {
                self.state.adjust_quantity(unit_id, &item_id, delta)?;
                Ok(EventOutcome::Applied)
            }
            WizardEvent::GoNext => self.go_next(),
            WizardEvent::GoBack => {
                self.go_back()?;
                Ok(EventOutcome::Applied)
            }
            WizardEvent::UpdateContactField { field, value } => {
                self.require_summary("edit contact details")?;
                self.contact.set(field, value);
                Ok(EventOutcome::Applied)
            }
            WizardEvent::Submit => self.submit(),
        }
    }

    /// Change the unit count and reconcile the unit list.
    ///
    /// # Errors
    ///
    /// `UnitCountOutOfRange` if `count` is outside `1..=max_units`.
    pub fn set_unit_count(&mut self, count: u32) -> Result<()> {
        if !self.config.accepts_unit_count(count) {
            warn!(count, max = self.config.max_units, "unit count rejected");
            return Err(ConfiguratorError::UnitCountOutOfRange {
                requested: count,
                max: self.config.max_units,
            });
        }

        let state = std::mem::replace(&mut self.state, ConfigurationState::empty());
        self.state = units::reconcile_with(state, count, &self.config.unit_template());
        Ok(())
    }

    /// Move forward if the current step validates.
    pub fn go_next(&mut self) -> Result<EventOutcome> {
        match self.navigator.next(&self.state) {
            Ok(_) => {
                self.step_error = None;
                Ok(EventOutcome::Applied)
            }
            Err(NavigationError::StepInvalid(failure)) => {
                self.step_error = Some(failure.clone());
                Ok(EventOutcome::StepBlocked(failure))
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Move back one step without validation.
    pub fn go_back(&mut self) -> Result<WizardStep> {
        let step = self.navigator.back()?;
        self.step_error = None;
        Ok(step)
    }

    fn require_summary(&self, action: &'static str) -> Result<()> {
        let step = self.navigator.current();
        if step.is_terminal() {
            Ok(())
        } else {
            Err(ConfiguratorError::SummaryOnly { action, step })
        }
    }

    /// Submit from the summary step.
    ///
    /// Rooms stay editable on the summary, so the room details are checked
    /// again before the contact form. On success the session is reset (one
    /// default unit, first step, empty contact form) and the order is
    /// returned. On failure nothing but the recorded errors change.
    pub fn submit(&mut self) -> Result<EventOutcome> {
        self.require_summary("submit")?;

        if let Err(failure) = validate_step(&self.state, WizardStep::UnitDetails) {
            warn!(reason = %failure.reason, "submission blocked by incomplete rooms");
            self.step_error = Some(failure.clone());
            return Ok(EventOutcome::StepBlocked(failure));
        }

        match submission::submit(&self.state, &self.contact, self.config.tax_rate()) {
            Ok(order) => {
                self.reset();
                info!(total = order.total(), "session reset after submission");
                Ok(EventOutcome::Submitted(order))
            }
            Err(errors) => {
                self.field_errors = Some(errors);
                Ok(EventOutcome::FieldsRejected(errors))
            }
        }
    }

    /// Back to the initial session state. Unit ids keep counting up.
    pub fn reset(&mut self) {
        self.state = self.state.reset(&self.config.unit_template());
        self.navigator.reset();
        self.contact = ContactFields::default();
        self.field_errors = None;
        self.step_error = None;
    }

    /// Snapshot for rendering, with every price computed fresh.
    pub fn projection(&self) -> Projection {
        let rate = self.config.tax_rate();
        let units: Vec<UnitView> = self
            .state
            .units
            .iter()
            .map(|unit| UnitView {
                kind_label: unit.kind.label(),
                subtotal: pricing::unit_subtotal(unit),
                unit: unit.clone(),
            })
            .collect();
        let subtotal = units.iter().map(|u| u.subtotal).sum();
        let step = self.navigator.current();

        Projection {
            step,
            step_title: step.title(),
            step_number: step.step_number(),
            total_steps: WizardStep::TOTAL_STEPS,
            can_go_back: self.navigator.can_go_back(),
            basic_info: self.state.basic_info.clone(),
            property_kind_label: self.state.basic_info.property_kind.label(),
            units,
            tax_rate: rate,
            totals: pricing::with_tax(subtotal, rate),
            contact: self.contact.clone(),
            field_errors: self.field_errors,
            step_error: self.step_error.clone(),
        }
    }
}
