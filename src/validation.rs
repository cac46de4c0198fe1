//! Step and contact-form validation.
//!
//! Two kinds of checks live here:
//!
//! - **Structural** ([`validate_step`]): a single pass/fail per wizard step,
//!   consulted by the navigator before moving forward.
//! - **Field-level** ([`validate_contact`]): run only when the user submits,
//!   producing a per-field map so each offending field can be flagged.

use std::fmt;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};
use thiserror::Error;

use crate::state::ConfigurationState;
use crate::wizard::WizardStep;

/// Why a step cannot be left forward.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[error("{} is incomplete: {reason}", .step.title())]
pub struct StepValidationFailure {
    pub step: WizardStep,
    pub reason: String,
}

impl StepValidationFailure {
    fn new(step: WizardStep, reason: impl Into<String>) -> Self {
        Self {
            step,
            reason: reason.into(),
        }
    }
}

/// Structural check for `step`.
///
/// - `BasicInfo`: always passes; the defaults are a complete answer.
/// - `UnitDetails`: every unit needs a non-blank name and at least one
///   selected item or non-zero quantity. One bad unit fails the whole step.
/// - `Summary`: always passes; contact details are checked on submit.
pub fn validate_step(
    state: &ConfigurationState,
    step: WizardStep,
) -> Result<(), StepValidationFailure> {
    match step {
        WizardStep::BasicInfo | WizardStep::Summary => Ok(()),
        WizardStep::UnitDetails => {
            for (index, unit) in state.units.iter().enumerate() {
                if unit.display_name.trim().is_empty() {
                    return Err(StepValidationFailure::new(
                        step,
                        format!("unit {} needs a name", index + 1),
                    ));
                }
                if !unit.has_any_item() {
                    return Err(StepValidationFailure::new(
                        step,
                        format!(
                            "configure at least one sensor or device for {}",
                            unit.display_name.trim()
                        ),
                    ));
                }
            }
            Ok(())
        }
    }
}

/// Boolean form of [`validate_step`].
pub fn step_is_valid(state: &ConfigurationState, step: WizardStep) -> bool {
    validate_step(state, step).is_ok()
}

/// Contact form field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[derive(Display, EnumString, EnumIter)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ContactField {
    Name,
    Email,
    Phone,
}

impl ContactField {
    /// Message shown next to the field when it is flagged
    pub fn error_message(&self) -> &'static str {
        match self {
            Self::Name => "Name is required",
            Self::Email => "Enter a valid email address (e.g., name@example.com)",
            Self::Phone => "Phone number must be exactly 10 digits",
        }
    }
}

/// Contact details typed on the summary step.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ContactFields {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
}

impl ContactFields {
    pub fn new(name: &str, email: &str, phone: &str) -> Self {
        Self {
            name: name.to_string(),
            email: email.to_string(),
            phone: phone.to_string(),
        }
    }

    pub fn get(&self, field: ContactField) -> &str {
        match field {
            ContactField::Name => &self.name,
            ContactField::Email => &self.email,
            ContactField::Phone => &self.phone,
        }
    }

    pub fn set(&mut self, field: ContactField, value: impl Into<String>) {
        let value = value.into();
        match field {
            ContactField::Name => self.name = value,
            ContactField::Email => self.email = value,
            ContactField::Phone => self.phone = value,
        }
    }
}

/// Per-field validity flags; `true` means the field is flagged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct FieldErrors {
    pub name: bool,
    pub email: bool,
    pub phone: bool,
}

impl FieldErrors {
    pub fn is_empty(&self) -> bool {
        !(self.name || self.email || self.phone)
    }

    pub fn is_flagged(&self, field: ContactField) -> bool {
        match field {
            ContactField::Name => self.name,
            ContactField::Email => self.email,
            ContactField::Phone => self.phone,
        }
    }

    fn flag(&mut self, field: ContactField) {
        match field {
            ContactField::Name => self.name = true,
            ContactField::Email => self.email = true,
            ContactField::Phone => self.phone = true,
        }
    }

    /// Flagged fields in form order
    pub fn flagged(&self) -> Vec<ContactField> {
        ContactField::iter().filter(|f| self.is_flagged(*f)).collect()
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<&str> = self.flagged().iter().map(|f| f.error_message()).collect();
        write!(f, "invalid contact details: {}", messages.join("; "))
    }
}

impl std::error::Error for FieldErrors {}

/// Check every contact field independently.
pub fn validate_contact(fields: &ContactFields) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::default();
    for field in ContactField::iter() {
        if !field_is_valid(field, fields.get(field)) {
            errors.flag(field);
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validity of a single contact field value
pub fn field_is_valid(field: ContactField, value: &str) -> bool {
    let value = value.trim();
    match field {
        ContactField::Name => !value.is_empty(),
        ContactField::Email => is_email_shaped(value),
        ContactField::Phone => value.len() == 10 && value.bytes().all(|b| b.is_ascii_digit()),
    }
}

/// `local@domain.tld`: one `@`, no whitespace, dotted domain with no empty labels.
fn is_email_shaped(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') || !domain.contains('.') {
        return false;
    }
    domain.split('.').all(|label| !label.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units;

    #[test]
    fn test_basic_info_and_summary_always_valid() {
        let state = ConfigurationState::new();
        assert!(step_is_valid(&state, WizardStep::BasicInfo));
        assert!(step_is_valid(&state, WizardStep::Summary));
    }

    #[test]
    fn test_unit_details_requires_every_unit() {
        let mut state = units::reconcile(ConfigurationState::new(), 2);
        let (a, b) = (state.units[0].id, state.units[1].id);
        assert!(!step_is_valid(&state, WizardStep::UnitDetails));

        state.toggle_selectable(a, "motion", true).unwrap();
        let failure = validate_step(&state, WizardStep::UnitDetails).unwrap_err();
        assert!(failure.reason.contains("Room 2"));

        state.adjust_quantity(b, "led", 1).unwrap();
        assert!(step_is_valid(&state, WizardStep::UnitDetails));
    }

    #[test]
    fn test_unit_details_requires_name() {
        let mut state = ConfigurationState::new();
        let id = state.units[0].id;
        state.toggle_selectable(id, "air", true).unwrap();
        state.set_unit_name(id, "   ").unwrap();

        let failure = validate_step(&state, WizardStep::UnitDetails).unwrap_err();
        assert_eq!(failure.step, WizardStep::UnitDetails);
        assert!(failure.reason.contains("needs a name"));
    }

    #[test]
    fn test_failure_display() {
        let failure = StepValidationFailure::new(WizardStep::UnitDetails, "unit 1 needs a name");
        assert_eq!(
            failure.to_string(),
            "Room Details is incomplete: unit 1 needs a name"
        );
    }

    #[test]
    fn test_contact_all_invalid() {
        let errors = validate_contact(&ContactFields::new("", "abc", "12345")).unwrap_err();
        assert!(errors.name && errors.email && errors.phone);
        assert_eq!(
            errors.flagged(),
            vec![ContactField::Name, ContactField::Email, ContactField::Phone]
        );
    }

    #[test]
    fn test_contact_valid() {
        assert!(validate_contact(&ContactFields::new("Asha", "a@b.com", "9876543210")).is_ok());
    }

    #[test]
    fn test_contact_fields_flag_independently() {
        let errors = validate_contact(&ContactFields::new("Asha", "a@b.com", "98765")).unwrap_err();
        assert_eq!(errors.flagged(), vec![ContactField::Phone]);
        assert!(errors.to_string().contains("10 digits"));
    }

    #[test]
    fn test_email_shapes() {
        for good in ["a@b.com", "first.last@mail.example.in", " a@b.co "] {
            assert!(field_is_valid(ContactField::Email, good), "{good}");
        }
        for bad in ["", "abc", "a@b", "@b.com", "a@.com", "a@b.", "a@@b.com", "a b@c.com", "a@b@c.com"] {
            assert!(!field_is_valid(ContactField::Email, bad), "{bad}");
        }
    }

    #[test]
    fn test_phone_shapes() {
        assert!(field_is_valid(ContactField::Phone, "9876543210"));
        assert!(field_is_valid(ContactField::Phone, " 9876543210 "));
        assert!(!field_is_valid(ContactField::Phone, "98765432101"));
        assert!(!field_is_valid(ContactField::Phone, "98765-43210"));
        assert!(!field_is_valid(ContactField::Phone, "+919876543210"));
        assert!(!field_is_valid(ContactField::Phone, "٩٨٧٦٥٤٣٢١٠"));
    }

    #[test]
    fn test_contact_field_set_get() {
        let mut fields = ContactFields::default();
        fields.set(ContactField::Email, "a@b.com");
        assert_eq!(fields.get(ContactField::Email), "a@b.com");
        assert_eq!(fields.get(ContactField::Name), "");
    }
}
