//! roomconf Library
//!
//! Core of a multi-step smart-home order configurator: a fixed catalog of
//! per-room sensors and devices, a three-step wizard, pricing with tax and
//! validated submission into an immutable order.

pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod order_sink;
pub mod pricing;
pub mod session;
pub mod state;
pub mod submission;
pub mod types;
pub mod units;
pub mod validation;
pub mod wizard;

// Re-export main types for convenience
pub use config::EngineConfig;
pub use error::{ConfiguratorError, Result};
pub use order_sink::{JsonLinesSink, MemorySink, OrderSink};
pub use pricing::{PriceBreakdown, Quote, TaxRate, UnitPrice};
pub use session::{Configurator, EventOutcome, Projection, UnitView, WizardEvent};
pub use state::{BasicInfo, ConfigurationState};
pub use submission::Order;
pub use types::{PropertyKind, UnitKind};
pub use units::{Unit, UnitId, UnitTemplate};
pub use validation::{ContactField, ContactFields, FieldErrors, StepValidationFailure};
pub use wizard::{NavigationError, StepNavigator, WizardStep};
