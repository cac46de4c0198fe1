//! Property-Based Tests for roomconf
//!
//! Uses proptest for invariants that must hold for any input sequence.
//!
//! These tests verify:
//! - Reconciliation length and identity preservation
//! - Subtotal monotonicity and toggle reversibility
//! - Tax arithmetic
//! - Enum string round-trips

use std::collections::HashSet;

use proptest::prelude::*;

use roomconf::catalog;
use roomconf::pricing::{self, TaxRate};
use roomconf::state::ConfigurationState;
use roomconf::types::{PropertyKind, UnitKind};
use roomconf::units::{self, UnitId};
use roomconf::wizard::WizardStep;

// =============================================================================
// Reconciliation Property Tests
// =============================================================================

proptest! {
    /// Unit list length always follows the requested count
    #[test]
    fn reconcile_length_matches_count(counts in prop::collection::vec(1u32..=10, 1..8)) {
        let mut state = ConfigurationState::new();
        for count in counts {
            state = units::reconcile(state, count);
            prop_assert_eq!(state.units.len(), count as usize);
            prop_assert_eq!(state.basic_info.unit_count, count);
        }
    }

    /// Units below min(old, new) keep their id and contents
    #[test]
    fn reconcile_preserves_prefix(
        first in 1u32..=10,
        second in 1u32..=10,
        marks in prop::collection::vec(0usize..6, 0..10),
    ) {
        let mut state = units::reconcile(ConfigurationState::new(), first);
        for (n, mark) in marks.iter().enumerate() {
            let unit = n % state.units.len();
            let id = state.units[unit].id;
            let item = catalog::SELECTABLES[*mark].id;
            state.toggle_selectable(id, item, true).unwrap();
        }
        let before = state.units.clone();

        let after = units::reconcile(state, second);
        let kept = first.min(second) as usize;
        prop_assert_eq!(&after.units[..kept], &before[..kept]);
    }

    /// An id is never handed out twice, however the count moves
    #[test]
    fn reconcile_never_reuses_ids(counts in prop::collection::vec(1u32..=10, 1..10)) {
        let mut state = ConfigurationState::new();
        let mut issued: HashSet<UnitId> = state.units.iter().map(|u| u.id).collect();
        for count in counts {
            let previous: HashSet<UnitId> = state.units.iter().map(|u| u.id).collect();
            state = units::reconcile(state, count);
            for unit in &state.units {
                if !previous.contains(&unit.id) {
                    prop_assert!(issued.insert(unit.id), "{} reused", unit.id);
                }
            }
        }
    }
}

// =============================================================================
// Pricing Property Tests
// =============================================================================

proptest! {
    /// Selecting more or raising quantities never lowers the subtotal
    #[test]
    fn subtotal_is_monotone(
        selections in prop::collection::vec(0usize..6, 0..12),
        increments in prop::collection::vec((0usize..2, 0i64..5), 0..12),
    ) {
        let mut state = ConfigurationState::new();
        let id = state.units[0].id;
        let mut last = pricing::grand_subtotal(&state);

        for index in selections {
            state.toggle_selectable(id, catalog::SELECTABLES[index].id, true).unwrap();
            let now = pricing::grand_subtotal(&state);
            prop_assert!(now >= last);
            last = now;
        }
        for (index, delta) in increments {
            state.adjust_quantity(id, catalog::QUANTITIES[index].id, delta).unwrap();
            let now = pricing::grand_subtotal(&state);
            prop_assert!(now >= last);
            last = now;
        }
    }

    /// Toggling an item on then off restores the subtotal
    #[test]
    fn toggle_on_off_restores_subtotal(index in 0usize..6, preset in 0i64..4) {
        let mut state = ConfigurationState::new();
        let id = state.units[0].id;
        state.adjust_quantity(id, "led", preset).unwrap();
        let before = pricing::grand_subtotal(&state);

        let item = catalog::SELECTABLES[index].id;
        state.toggle_selectable(id, item, true).unwrap();
        state.toggle_selectable(id, item, false).unwrap();
        prop_assert_eq!(pricing::grand_subtotal(&state), before);
    }

    /// Tax is the truncated share and always adds up
    #[test]
    fn tax_adds_up(subtotal in 0u64..1_000_000_000, bps in 0u32..=10_000) {
        let rate = TaxRate::from_basis_points(bps);
        let breakdown = pricing::with_tax(subtotal, rate);
        prop_assert_eq!(breakdown.subtotal, subtotal);
        prop_assert_eq!(breakdown.total, breakdown.subtotal + breakdown.tax);
        prop_assert_eq!(breakdown.tax, subtotal * bps as u64 / 10_000);
        prop_assert!(breakdown.tax <= subtotal);
    }
}

// =============================================================================
// Enum Property Tests
// =============================================================================

fn unit_kind_strategy() -> impl Strategy<Value = UnitKind> {
    prop_oneof![
        Just(UnitKind::Living),
        Just(UnitKind::Bedroom),
        Just(UnitKind::Kitchen),
        Just(UnitKind::Bathroom),
        Just(UnitKind::Office),
        Just(UnitKind::Dining),
        Just(UnitKind::Other),
    ]
}

fn property_kind_strategy() -> impl Strategy<Value = PropertyKind> {
    prop_oneof![Just(PropertyKind::Existing), Just(PropertyKind::New)]
}

fn step_strategy() -> impl Strategy<Value = WizardStep> {
    prop_oneof![
        Just(WizardStep::BasicInfo),
        Just(WizardStep::UnitDetails),
        Just(WizardStep::Summary),
    ]
}

proptest! {
    /// UnitKind: to_string → parse round-trip is identity
    #[test]
    fn unit_kind_roundtrip(kind in unit_kind_strategy()) {
        let parsed: UnitKind = kind.to_string().parse().expect("Should parse");
        prop_assert_eq!(kind, parsed);
        prop_assert!(!kind.label().is_empty());
    }

    /// PropertyKind: serde and strum agree on the name
    #[test]
    fn property_kind_names_agree(kind in property_kind_strategy()) {
        let json = serde_json::to_string(&kind).unwrap();
        prop_assert_eq!(json, format!("\"{}\"", kind));
    }

    /// WizardStep: next and previous are inverses
    #[test]
    fn step_next_previous_inverse(step in step_strategy()) {
        if let Some(next) = step.next() {
            prop_assert_eq!(next.previous(), Some(step));
            prop_assert_eq!(next.index(), step.index() + 1);
        }
    }
}
