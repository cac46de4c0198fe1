//! Order submission.
//!
//! [`submit`] turns a finished configuration plus contact details into an
//! immutable [`Order`]. It never touches the caller's state; resetting the
//! session afterwards is the caller's job.

use serde::Serialize;
use tracing::{info, warn};

use crate::pricing::{self, PriceBreakdown, TaxRate, UnitPrice};
use crate::state::{BasicInfo, ConfigurationState};
use crate::units::Unit;
use crate::validation::{ContactFields, FieldErrors, validate_contact};

/// A priced, finalized order. Read-only once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Order {
    basic_info: BasicInfo,
    units: Vec<Unit>,
    unit_prices: Vec<UnitPrice>,
    tax_rate: TaxRate,
    #[serde(flatten)]
    breakdown: PriceBreakdown,
    /// Seconds since the unix epoch
    submitted_at: u64,
}

impl Order {
    pub fn basic_info(&self) -> &BasicInfo {
        &self.basic_info
    }

    pub fn units(&self) -> &[Unit] {
        &self.units
    }

    pub fn unit_prices(&self) -> &[UnitPrice] {
        &self.unit_prices
    }

    pub fn tax_rate(&self) -> TaxRate {
        self.tax_rate
    }

    pub fn subtotal(&self) -> u64 {
        self.breakdown.subtotal
    }

    pub fn tax(&self) -> u64 {
        self.breakdown.tax
    }

    pub fn total(&self) -> u64 {
        self.breakdown.total
    }

    pub fn submitted_at(&self) -> u64 {
        self.submitted_at
    }
}

/// Validate `contact` and freeze `state` into an order.
///
/// # Errors
///
/// Returns the per-field error map if any contact field is invalid; nothing
/// is built in that case.
pub fn submit(
    state: &ConfigurationState,
    contact: &ContactFields,
    rate: TaxRate,
) -> Result<Order, FieldErrors> {
    if let Err(errors) = validate_contact(contact) {
        warn!(flagged = ?errors.flagged(), "submission rejected");
        return Err(errors);
    }

    let mut basic_info = state.basic_info.clone();
    basic_info.contact_name = Some(contact.name.trim().to_string());
    basic_info.contact_email = Some(contact.email.trim().to_string());
    basic_info.contact_phone = Some(contact.phone.trim().to_string());

    let quote = pricing::quote(state, rate);
    let order = Order {
        basic_info,
        units: state.units.clone(),
        unit_prices: quote.units,
        tax_rate: rate,
        breakdown: quote.breakdown,
        submitted_at: unix_timestamp(),
    };

    info!(
        units = order.units.len(),
        subtotal = order.subtotal(),
        total = order.total(),
        "order submitted"
    );
    Ok(order)
}

fn unix_timestamp() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
