//! # State Module
//!
//! Session state owned by the kiosk runtime.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Ownership                                      │
//! │                                                                         │
//! │  Runtime ──owns──► Session                                              │
//! │                     ├── id          (uuid, tags the tracing span)       │
//! │                     ├── selection   (SelectionState, replaced per event)│
//! │                     ├── catalog     (read-only after load)              │
//! │                     └── loan        (LoanTerms, replaced on input)      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod session;

pub use session::{PriceSummary, Session};
