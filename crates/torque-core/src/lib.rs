//! # torque-core: Pure Configurator Logic
//!
//! Everything the vehicle configurator knows about prices, loans and images,
//! as pure functions over an explicit selection state.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Torque Configurator Architecture                    │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Purchase Page (external)                     │   │
//! │  │   color buttons ─ wheel buttons ─ option toggles ─ loan inputs  │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ UiEvent (JSON)                         │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    kiosk (adapter)                              │   │
//! │  │   runtime loop, display bindings, image existence probe        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ torque-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌─────────┐ ┌─────────┐ ┌──────────┐ ┌────────┐ ┌────────┐   │   │
//! │  │   │ catalog │ │ pricing │ │financing │ │ images │ │ events │   │   │
//! │  │   └─────────┘ └─────────┘ └──────────┘ └────────┘ └────────┘   │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO LOGGING • PURE FUNCTIONS                          │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`catalog`] - Closed identifiers (colors, options, accessories) and `Catalog`
//! - [`selection`] - The shopper's current `SelectionState`
//! - [`pricing`] - `PriceTable` and `compute_total_price`
//! - [`financing`] - Loan terms and `compute_financing`
//! - [`images`] - Image path resolution and fallback
//! - [`events`] - `UiEvent` dispatch table
//! - [`money`] - Integer `Money` and parts-per-million `Rate`
//! - [`validation`] - Raw loan input parsing
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use torque_core::events::{dispatch, UiEvent};
//! use torque_core::financing::{compute_financing, LoanTerms};
//! use torque_core::catalog::Accessory;
//! use torque_core::pricing::{compute_total_price, PriceTable};
//! use torque_core::selection::SelectionState;
//!
//! let mut state = SelectionState::default();
//! for event in [
//!     UiEvent::WheelStyleSelected { performance: true },
//!     UiEvent::AccessoryChanged { accessory: Accessory::Sunshade, checked: true },
//! ] {
//!     state = dispatch(&state, &event).state;
//! }
//!
//! let total = compute_total_price(&state, &PriceTable::standard());
//! assert_eq!(total.format_compact(), "$55,095");
//!
//! let financing = compute_financing(total, &LoanTerms::default());
//! assert_eq!(financing.down_payment.to_string(), "$5,509.50");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod catalog;
pub mod error;
pub mod events;
pub mod financing;
pub mod images;
pub mod money;
pub mod pricing;
pub mod selection;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use catalog::{Accessory, Catalog, ColorSection, ExteriorColor, InteriorColor, OptionId, WheelStyle};
pub use error::{CoreError, CoreResult, ValidationError};
pub use events::{dispatch, Effect, TopBarVisibility, Transition, UiEvent};
pub use financing::{compute_financing, Financing, LoanTerms};
pub use money::{Money, Rate};
pub use pricing::{compute_total_price, PriceTable};
pub use selection::SelectionState;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Loan term used when the term input is absent or unusable.
pub const DEFAULT_TERM_MONTHS: u32 = 60;

/// Annual interest rate (percent) used when the rate input is absent or unusable.
pub const DEFAULT_INTEREST_RATE_PCT: u32 = 3;

/// Down payment (percent) used when the input is absent or unusable.
pub const DEFAULT_DOWN_PAYMENT_PCT: u32 = 10;

/// Longest loan term accepted from the term input (100 years).
///
/// Keeps `(1 + r)^n` finite for every rate the inputs allow.
pub const MAX_TERM_MONTHS: u32 = 1_200;
