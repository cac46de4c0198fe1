//! Price calculation.
//!
//! Everything here is a pure function of the configuration, cheap enough to
//! run after every edit. Money is whole currency units (`u64`); there are no
//! fractional minor units, so tax is truncated toward zero.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::state::ConfigurationState;
use crate::units::{Unit, UnitId};

/// Tax rate in basis points (1 bps = 0.01%).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaxRate(u32);

impl TaxRate {
    /// 18% goods and services tax
    pub const GST: TaxRate = TaxRate(1800);

    pub const ZERO: TaxRate = TaxRate(0);

    pub const fn from_basis_points(bps: u32) -> Self {
        Self(bps)
    }

    pub const fn basis_points(self) -> u32 {
        self.0
    }

    /// Tax owed on `subtotal`, truncated to whole currency units
    pub fn tax_on(self, subtotal: u64) -> u64 {
        let tax = u128::from(subtotal) * u128::from(self.0) / 10_000;
        u64::try_from(tax).unwrap_or(u64::MAX)
    }
}

impl Default for TaxRate {
    fn default() -> Self {
        Self::GST
    }
}

impl fmt::Display for TaxRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let whole = self.0 / 100;
        let frac = self.0 % 100;
        if frac == 0 {
            write!(f, "{}%", whole)
        } else {
            write!(f, "{}.{:02}%", whole, frac)
        }
    }
}

/// Subtotal, tax and tax-inclusive total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct PriceBreakdown {
    pub subtotal: u64,
    pub tax: u64,
    pub total: u64,
}

/// Per-unit subtotal, in unit order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct UnitPrice {
    pub unit_id: UnitId,
    pub subtotal: u64,
}

/// Full pricing of a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Quote {
    pub units: Vec<UnitPrice>,
    pub rate: TaxRate,
    #[serde(flatten)]
    pub breakdown: PriceBreakdown,
}

/// Selected selectables plus quantity × price for every quantity item.
pub fn unit_subtotal(unit: &Unit) -> u64 {
    let selected: u64 = unit
        .selectables
        .iter()
        .filter(|s| s.selected)
        .map(|s| s.unit_price)
        .sum();
    let quantities: u64 = unit.quantities.iter().map(|q| q.line_total()).sum();
    selected + quantities
}

/// Sum of every unit's subtotal.
pub fn grand_subtotal(state: &ConfigurationState) -> u64 {
    state.units.iter().map(unit_subtotal).sum()
}

/// Apply `rate` to `subtotal`.
pub fn with_tax(subtotal: u64, rate: TaxRate) -> PriceBreakdown {
    let tax = rate.tax_on(subtotal);
    PriceBreakdown {
        subtotal,
        tax,
        total: subtotal + tax,
    }
}

/// Price every unit and the whole configuration in one pass.
pub fn quote(state: &ConfigurationState, rate: TaxRate) -> Quote {
    let units: Vec<UnitPrice> = state
        .units
        .iter()
        .map(|unit| UnitPrice {
            unit_id: unit.id,
            subtotal: unit_subtotal(unit),
        })
        .collect();
    let subtotal = units.iter().map(|u| u.subtotal).sum();

    Quote {
        units,
        rate,
        breakdown: with_tax(subtotal, rate),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{QuantityItem, SelectableItem};
    use crate::types::UnitKind;
    use crate::units;

    fn sample_unit() -> Unit {
        Unit {
            id: UnitId::new(0),
            display_name: "Room 1".to_string(),
            kind: UnitKind::Living,
            selectables: vec![SelectableItem::new("a", "A", "", 100)],
            quantities: vec![QuantityItem::new("b", "B", "", 50)],
        }
    }

    #[test]
    fn test_with_tax_gst() {
        assert_eq!(
            with_tax(10_000, TaxRate::GST),
            PriceBreakdown {
                subtotal: 10_000,
                tax: 1_800,
                total: 11_800
            }
        );
    }

    #[test]
    fn test_tax_truncates() {
        // 18% of 999 is 179.82
        assert_eq!(with_tax(999, TaxRate::GST).tax, 179);
        assert_eq!(with_tax(5, TaxRate::GST).tax, 0);
        assert_eq!(with_tax(0, TaxRate::GST), PriceBreakdown::default());
    }

    #[test]
    fn test_single_unit_scenario() {
        let mut unit = sample_unit();
        assert_eq!(unit_subtotal(&unit), 0);
        unit.selectables[0].selected = true;
        unit.quantities[0].quantity = 2;
        assert_eq!(unit_subtotal(&unit), 200);
    }

    #[test]
    fn test_toggle_restores_subtotal() {
        let mut unit = sample_unit();
        unit.quantities[0].quantity = 3;
        let before = unit_subtotal(&unit);
        unit.selectables[0].selected = true;
        assert_eq!(unit_subtotal(&unit), before + 100);
        unit.selectables[0].selected = false;
        assert_eq!(unit_subtotal(&unit), before);
    }

    #[test]
    fn test_grand_subtotal_over_catalog_units() {
        let mut state = units::reconcile(ConfigurationState::new(), 2);
        let (a, b) = (state.units[0].id, state.units[1].id);
        state.toggle_selectable(a, "motion", true).unwrap();
        state.adjust_quantity(b, "switch", 2).unwrap();

        assert_eq!(grand_subtotal(&state), 1200 + 2 * 2500);

        let quote = quote(&state, TaxRate::GST);
        assert_eq!(quote.units[0].subtotal, 1200);
        assert_eq!(quote.units[1].subtotal, 5000);
        assert_eq!(quote.breakdown.subtotal, 6200);
        assert_eq!(quote.breakdown.tax, 1116);
        assert_eq!(quote.breakdown.total, 7316);
    }

    #[test]
    fn test_tax_rate_display() {
        assert_eq!(TaxRate::GST.to_string(), "18%");
        assert_eq!(TaxRate::from_basis_points(825).to_string(), "8.25%");
        assert_eq!(TaxRate::ZERO.to_string(), "0%");
    }
}
