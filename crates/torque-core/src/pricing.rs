//! # Pricing
//!
//! The price table and the pure total-price computation.
//!
//! ## Invariant
//! ```text
//! total = base_price
//!       + Σ surcharge(option)    for every option currently selected
//!       + Σ price(accessory)     for every accessory currently selected
//! ```
//! Nothing is accumulated between calls: the total is recomputed from the
//! selection every time, so an option can never count twice and deselecting
//! it removes its surcharge completely.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::catalog::{Accessory, OptionId};
use crate::money::Money;
use crate::selection::SelectionState;

// =============================================================================
// Price Table
// =============================================================================

/// Base price plus surcharges. Read-only once loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PriceTable {
    /// Price of the vehicle with nothing selected.
    pub base_price: Money,

    /// Surcharge per priced option.
    #[serde(default)]
    pub options: BTreeMap<OptionId, Money>,

    /// Price per accessory.
    #[serde(default)]
    pub accessories: BTreeMap<Accessory, Money>,
}

impl PriceTable {
    /// Standard pricing.
    ///
    /// | Item                        | Price   |
    /// |-----------------------------|---------|
    /// | Base                        | $52,490 |
    /// | Performance Wheels          | $2,500  |
    /// | Performance Package         | $5,000  |
    /// | Full Self-Driving           | $8,500  |
    /// | Center Console Trays        | $35     |
    /// | Sunshade                    | $105    |
    /// | All-Weather Interior Liners | $225    |
    pub fn standard() -> Self {
        let options = BTreeMap::from([
            (OptionId::PerformanceWheels, Money::from_dollars(2_500)),
            (OptionId::PerformancePackage, Money::from_dollars(5_000)),
            (OptionId::FullSelfDriving, Money::from_dollars(8_500)),
        ]);
        let accessories = BTreeMap::from([
            (Accessory::CenterConsoleTrays, Money::from_dollars(35)),
            (Accessory::Sunshade, Money::from_dollars(105)),
            (Accessory::AllWeatherInteriorLiners, Money::from_dollars(225)),
        ]);

        PriceTable {
            base_price: Money::from_dollars(52_490),
            options,
            accessories,
        }
    }

    /// Surcharge for an option; zero when the table has no entry.
    #[inline]
    pub fn surcharge(&self, option: OptionId) -> Money {
        self.options.get(&option).copied().unwrap_or_default()
    }

    /// Price of an accessory; zero when the table has no entry.
    #[inline]
    pub fn accessory_price(&self, accessory: Accessory) -> Money {
        self.accessories.get(&accessory).copied().unwrap_or_default()
    }
}

impl Default for PriceTable {
    fn default() -> Self {
        PriceTable::standard()
    }
}

// =============================================================================
// Breakdown
// =============================================================================

/// What a single line of the breakdown is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum PriceItem {
    Base,
    Option(OptionId),
    Accessory(Accessory),
}

/// One contribution to the total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PriceLine {
    pub item: PriceItem,
    pub amount: Money,
}

/// Lists every contribution to the total: the base price first, then each
/// selected option, then each selected accessory.
pub fn price_breakdown(state: &SelectionState, prices: &PriceTable) -> Vec<PriceLine> {
    let mut lines = vec![PriceLine {
        item: PriceItem::Base,
        amount: prices.base_price,
    }];

    lines.extend(
        OptionId::ALL
            .iter()
            .copied()
            .filter(|option| state.is_option_selected(*option))
            .map(|option| PriceLine {
                item: PriceItem::Option(option),
                amount: prices.surcharge(option),
            }),
    );

    lines.extend(state.accessories().map(|accessory| PriceLine {
        item: PriceItem::Accessory(accessory),
        amount: prices.accessory_price(accessory),
    }));

    lines
}

/// Computes the total price for a selection.
///
/// ## Example
/// ```rust
/// use torque_core::catalog::{Accessory, WheelStyle};
/// use torque_core::money::Money;
/// use torque_core::pricing::{compute_total_price, PriceTable};
/// use torque_core::selection::SelectionState;
///
/// let mut state = SelectionState::default();
/// state.select_wheel_style(WheelStyle::Performance);
/// state.set_accessory(Accessory::Sunshade, true);
///
/// let total = compute_total_price(&state, &PriceTable::standard());
/// assert_eq!(total, Money::from_dollars(55_095));
/// ```
pub fn compute_total_price(state: &SelectionState, prices: &PriceTable) -> Money {
    price_breakdown(state, prices)
        .into_iter()
        .map(|line| line.amount)
        .sum()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::WheelStyle;

    /// Applies the selection encoded in the low six bits of `mask`.
    fn state_from_mask(mask: u32) -> SelectionState {
        let mut state = SelectionState::default();
        state.select_wheel_style(WheelStyle::from_performance(mask & 1 != 0));
        state.set_option(OptionId::PerformancePackage, mask & 2 != 0);
        state.set_option(OptionId::FullSelfDriving, mask & 4 != 0);
        for (bit, accessory) in Accessory::ALL.iter().enumerate() {
            state.set_accessory(*accessory, mask & (8 << bit) != 0);
        }
        state
    }

    #[test]
    fn test_base_price_only() {
        let total = compute_total_price(&SelectionState::default(), &PriceTable::standard());
        assert_eq!(total, Money::from_dollars(52_490));
    }

    #[test]
    fn test_wheels_and_sunshade() {
        let mut state = SelectionState::default();
        state.select_wheel_style(WheelStyle::Performance);
        state.set_accessory(Accessory::Sunshade, true);

        let total = compute_total_price(&state, &PriceTable::standard());
        assert_eq!(total.dollars(), 55_095);
    }

    #[test]
    fn test_every_subset_sums_exactly() {
        let prices = PriceTable::standard();
        let surcharges = [2_500, 5_000, 8_500, 35, 105, 225];

        for mask in 0..64u32 {
            let expected: i64 = 52_490
                + surcharges
                    .iter()
                    .enumerate()
                    .filter(|(bit, _)| mask & (1 << bit) != 0)
                    .map(|(_, price)| *price)
                    .sum::<i64>();

            let total = compute_total_price(&state_from_mask(mask), &prices);
            assert_eq!(total, Money::from_dollars(expected), "mask {mask:#08b}");
        }
    }

    #[test]
    fn test_toggle_round_trip_restores_price() {
        let prices = PriceTable::standard();
        for mask in 0..64u32 {
            let mut state = state_from_mask(mask);
            let before = compute_total_price(&state, &prices);

            for option in OptionId::ALL {
                state.toggle_option(*option);
                state.toggle_option(*option);
                assert_eq!(compute_total_price(&state, &prices), before);
            }
            for accessory in Accessory::ALL {
                state.toggle_accessory(*accessory);
                assert_ne!(compute_total_price(&state, &prices), before);
                state.toggle_accessory(*accessory);
                assert_eq!(compute_total_price(&state, &prices), before);
            }
        }
    }

    #[test]
    fn test_missing_entries_price_at_zero() {
        let prices = PriceTable {
            base_price: Money::from_dollars(40_000),
            options: BTreeMap::new(),
            accessories: BTreeMap::new(),
        };
        let total = compute_total_price(&state_from_mask(0b111111), &prices);
        assert_eq!(total, Money::from_dollars(40_000));
    }

    #[test]
    fn test_breakdown_lists_selected_items_once() {
        let lines = price_breakdown(&state_from_mask(0b010101), &PriceTable::standard());
        let items: Vec<PriceItem> = lines.iter().map(|l| l.item).collect();
        assert_eq!(
            items,
            vec![
                PriceItem::Base,
                PriceItem::Option(OptionId::PerformanceWheels),
                PriceItem::Option(OptionId::FullSelfDriving),
                PriceItem::Accessory(Accessory::Sunshade),
            ]
        );
    }
}
