//! # Torque Kiosk Entry Point
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Torque Kiosk                                     │
//! │                                                                         │
//! │  purchase page ──► stdin (UiEvent JSON lines)                           │
//! │                        │                                                │
//! │                        ▼                                                │
//! │                 torque_kiosk_lib::run                                   │
//! │                        │                                                │
//! │                        ▼                                                │
//! │  purchase page ◄── stdout (DisplayUpdate JSON lines)                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Setup lives in lib.rs so it can be tested
    torque_kiosk_lib::run().await?;
    Ok(())
}
