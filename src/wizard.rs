//! Wizard step state machine
//!
//! The configurator walks through three steps in order:
//!
//! ```text
//! BasicInfo -> UnitDetails -> Summary
//! ```
//!
//! # Invariants
//!
//! - Moving forward requires the current step to pass [`validate_step`]
//! - Moving back is always allowed except from the first step
//! - No skipping and no wraparound; `Summary` offers submit, not a further step

use std::fmt;

use serde::{Deserialize, Serialize};
use strum::{EnumIter, EnumString};
use thiserror::Error;
use tracing::{debug, warn};

use crate::state::ConfigurationState;
use crate::validation::{StepValidationFailure, validate_step};

/// Wizard steps in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[derive(EnumString, EnumIter)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
#[repr(u8)]
pub enum WizardStep {
    /// Property kind and number of rooms
    #[default]
    BasicInfo = 0,
    /// Name, kind, sensors and devices for every room
    UnitDetails = 1,
    /// Review, contact details and submission
    Summary = 2,
}

impl WizardStep {
    /// Total number of steps.
    pub const TOTAL_STEPS: usize = 3;

    /// Zero-based position
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Get the step number (1-indexed for display).
    #[inline]
    pub const fn step_number(self) -> usize {
        self.index() + 1
    }

    /// Get the next step, or `None` at the summary.
    pub const fn next(self) -> Option<Self> {
        match self {
            Self::BasicInfo => Some(Self::UnitDetails),
            Self::UnitDetails => Some(Self::Summary),
            Self::Summary => None,
        }
    }

    /// Get the previous step, or `None` at the first step.
    pub const fn previous(self) -> Option<Self> {
        match self {
            Self::BasicInfo => None,
            Self::UnitDetails => Some(Self::BasicInfo),
            Self::Summary => Some(Self::UnitDetails),
        }
    }

    /// Whether submit is offered on this step
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Summary)
    }

    /// Get the display title for this step.
    pub const fn title(self) -> &'static str {
        match self {
            Self::BasicInfo => "Basic Information",
            Self::UnitDetails => "Room Details",
            Self::Summary => "Summary",
        }
    }

    /// Width of the progress bar, 0 at the first step and 100 at the summary
    pub const fn progress_percent(self) -> u8 {
        (self.index() * 100 / (Self::TOTAL_STEPS - 1)) as u8
    }
}

impl fmt::Display for WizardStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.title())
    }
}

/// Errors that can occur while moving between steps
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NavigationError {
    /// Current step failed its structural check
    #[error(transparent)]
    StepInvalid(#[from] StepValidationFailure),

    /// `next()` on the summary; submission is a separate action
    #[error("Already at the final step ({step})")]
    AtFinalStep { step: WizardStep },

    /// `back()` on the first step
    #[error("Already at the first step ({step})")]
    AtFirstStep { step: WizardStep },
}

/// Tracks the current wizard step and enforces the transition rules.
///
/// # Example
///
/// ```
/// use roomconf::state::ConfigurationState;
/// use roomconf::wizard::{StepNavigator, WizardStep};
///
/// let state = ConfigurationState::new();
/// let mut nav = StepNavigator::new();
///
/// nav.next(&state).unwrap();
/// assert_eq!(nav.current(), WizardStep::UnitDetails);
///
/// // The default room has nothing selected yet
/// assert!(nav.next(&state).is_err());
/// assert_eq!(nav.current(), WizardStep::UnitDetails);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StepNavigator {
    current: WizardStep,
}

impl StepNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn current(&self) -> WizardStep {
        self.current
    }

    #[inline]
    pub fn index(&self) -> usize {
        self.current.index()
    }

    #[inline]
    pub fn can_go_back(&self) -> bool {
        self.current.previous().is_some()
    }

    /// Advance one step if the current step validates.
    ///
    /// # Errors
    ///
    /// - `StepInvalid` if the current step fails validation (step unchanged)
    /// - `AtFinalStep` if already on the summary
    pub fn next(&mut self, state: &ConfigurationState) -> Result<WizardStep, NavigationError> {
        let Some(next) = self.current.next() else {
            return Err(NavigationError::AtFinalStep { step: self.current });
        };

        if let Err(failure) = validate_step(state, self.current) {
            warn!(step = %self.current, reason = %failure.reason, "forward navigation blocked");
            return Err(failure.into());
        }

        debug!(from = %self.current, to = %next, "advancing wizard");
        self.current = next;
        Ok(next)
    }

    /// Go back one step. Never validates.
    ///
    /// # Errors
    ///
    /// - `AtFirstStep` if already on the first step
    pub fn back(&mut self) -> Result<WizardStep, NavigationError> {
        let previous = self
            .current
            .previous()
            .ok_or(NavigationError::AtFirstStep { step: self.current })?;
        debug!(from = %self.current, to = %previous, "going back");
        self.current = previous;
        Ok(previous)
    }

    /// Return to the first step.
    pub fn reset(&mut self) {
        self.current = WizardStep::BasicInfo;
    }
}
