//! # Configurator Session
//!
//! The selection, the catalog it is priced against, and the loan terms
//! currently in effect, owned by the runtime loop for the lifetime of the page.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Session Lifecycle                                 │
//! │                                                                         │
//! │  Session::new(catalog, loan)                                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  apply(event) ──► dispatch(selection, event) ──► selection replaced     │
//! │       │                                          effects returned       │
//! │       ▼                                                                 │
//! │  quote() ──► PriceSummary { total, financing, lines }                   │
//! │                                                                         │
//! │  NOTE: Single owner. The runtime handles one event at a time, so there  │
//! │        is no lock around the session.                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use torque_core::events::dispatch;
use torque_core::financing::{compute_financing, Financing, LoanTerms};
use torque_core::images::{exterior_suffix, resolve_image, ImageKey, ImageRequest};
use torque_core::pricing::{compute_total_price, price_breakdown, PriceLine};
use torque_core::{Catalog, Effect, Money, SelectionState, UiEvent};

/// Price and loan figures for the current selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PriceSummary {
    pub total: Money,
    pub financing: Financing,
    pub lines: Vec<PriceLine>,
}

impl PriceSummary {
    /// Total as shown in the header, without cents when whole.
    pub fn total_text(&self) -> String {
        self.total.format_compact()
    }

    pub fn down_payment_text(&self) -> String {
        self.financing.down_payment.format_compact()
    }

    /// Monthly payment, always with two decimals.
    pub fn monthly_payment_text(&self) -> String {
        self.financing.monthly_payment.to_string()
    }
}

/// One shopper's configurator state.
#[derive(Debug, Clone)]
pub struct Session {
    id: Uuid,
    selection: SelectionState,
    catalog: Catalog,
    loan: LoanTerms,
}

impl Session {
    pub fn new(catalog: Catalog, loan: LoanTerms) -> Self {
        Session {
            id: Uuid::new_v4(),
            selection: SelectionState::default(),
            catalog,
            loan,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn loan(&self) -> &LoanTerms {
        &self.loan
    }

    /// Runs the event through the dispatch table and keeps the new selection.
    pub fn apply(&mut self, event: &UiEvent) -> Vec<Effect> {
        let transition = dispatch(&self.selection, event);
        self.selection = transition.state;
        transition.effects
    }

    pub fn set_loan_terms(&mut self, terms: LoanTerms) {
        self.loan = terms;
    }

    pub fn quote(&self) -> PriceSummary {
        let prices = &self.catalog.prices;
        let total = compute_total_price(&self.selection, prices);

        PriceSummary {
            total,
            financing: compute_financing(total, &self.loan),
            lines: price_breakdown(&self.selection, prices),
        }
    }

    pub fn image_request(&self, key: ImageKey, suffix: &str) -> ImageRequest {
        resolve_image(&self.catalog.images, key, suffix)
    }

    /// Requests for both image slots as the selection stands.
    pub fn current_images(&self) -> [ImageRequest; 2] {
        [
            self.image_request(
                ImageKey::Exterior(self.selection.exterior_color),
                exterior_suffix(self.selection.wheel_style),
            ),
            self.image_request(ImageKey::Interior(self.selection.interior_color), ""),
        ]
    }
}

impl Default for Session {
    fn default() -> Self {
        Session::new(Catalog::standard(), LoanTerms::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use torque_core::catalog::{Accessory, ExteriorColor, OptionId};

    #[test]
    fn test_fresh_session_quotes_base_price() {
        let session = Session::default();
        let quote = session.quote();

        assert_eq!(quote.total, Money::from_dollars(52_490));
        assert_eq!(quote.total_text(), "$52,490");
        assert_eq!(quote.down_payment_text(), "$5,249");
        assert_eq!(quote.lines.len(), 1);
    }

    #[test]
    fn test_apply_keeps_new_selection() {
        let mut session = Session::default();
        session.apply(&UiEvent::WheelStyleSelected { performance: true });
        session.apply(&UiEvent::AccessoryChanged {
            accessory: Accessory::Sunshade,
            checked: true,
        });

        assert!(session.selection().is_option_selected(OptionId::PerformanceWheels));
        let quote = session.quote();
        assert_eq!(quote.total_text(), "$55,095");
        assert_eq!(quote.down_payment_text(), "$5,509.50");
        assert_eq!(quote.lines.len(), 3);
    }

    #[test]
    fn test_loan_terms_change_monthly_payment() {
        let mut session = Session::default();
        let before = session.quote().financing.monthly_payment;

        session.set_loan_terms(LoanTerms {
            term_months: 36,
            ..LoanTerms::default()
        });
        assert!(session.quote().financing.monthly_payment > before);
    }

    #[test]
    fn test_current_images_follow_selection() {
        let mut session = Session::default();
        session.apply(&UiEvent::ExteriorColorSelected {
            color: ExteriorColor::UltraRed,
        });
        session.apply(&UiEvent::WheelStyleSelected { performance: true });

        let [exterior, interior] = session.current_images();
        assert_eq!(
            exterior.candidate.as_deref(),
            Some("./images/model-y-ultra-red-performance.jpg")
        );
        assert_eq!(
            interior.candidate.as_deref(),
            Some("./images/model-y-interior-dark.jpg")
        );
    }

    #[test]
    fn test_monthly_text_has_cents() {
        let session = Session::new(
            Catalog::standard(),
            LoanTerms {
                term_months: 1,
                annual_rate: torque_core::Rate::zero(),
                down_payment: torque_core::Rate::zero(),
            },
        );
        assert_eq!(session.quote().monthly_payment_text(), "$52,490.00");
    }
}
