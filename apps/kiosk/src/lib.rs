//! # Torque Kiosk Library
//!
//! Runs the configurator behind a purchase page: events come in on stdin,
//! display updates go out on stdout.
//!
//! ## Module Organization
//! ```text
//! torque_kiosk_lib/
//! ├── lib.rs          ◄─── You are here (startup & run)
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   └── session.rs  ◄─── Selection, catalog and loan terms
//! ├── runtime.rs      ◄─── Event loop, effect execution, stdin reader
//! ├── display.rs      ◄─── DisplayBindings (JSON lines, recording)
//! ├── probe.rs        ◄─── ImageProbe (filesystem, assume-exists)
//! ├── config.rs       ◄─── KioskConfig from environment
//! └── error.rs        ◄─── AppError
//! ```
//!
//! ## Wire Format
//! ```text
//! stdin  ──► {"type":"wheel_style_selected","performance":true}
//! stdout ◄── {"kind":"image","slot":"exterior","src":"./images/model-y-stealth-grey-performance.jpg"}
//! stdout ◄── {"kind":"text","region":"total_price","text":"$54,990"}
//! stderr ◄── logs
//! ```

pub mod config;
pub mod display;
pub mod error;
pub mod probe;
pub mod runtime;
pub mod state;

use std::path::Path;
use std::sync::Arc;

use tokio::io::BufReader;
use tokio::sync::mpsc;
use tokio::task::JoinError;
use tracing::{error, info, info_span, Instrument};
use tracing_subscriber::EnvFilter;

use torque_core::{Catalog, LoanTerms, ValidationError};

use config::KioskConfig;
use display::JsonLinesDisplay;
use error::{AppError, AppResult};
use probe::{AssumeExists, FsImageProbe, ImageProbe};
use runtime::{forward_events, log_loan_fallback, Runtime};
use state::Session;

/// Events buffered between the stdin reader and the runtime.
const EVENT_BUFFER: usize = 64;

/// Runs the kiosk until stdin closes.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                       Kiosk Startup                                     │
/// │                                                                         │
/// │  1. Initialize Logging ───────────────────────────────────────────────► │
/// │     • tracing-subscriber with env filter, written to stderr             │
/// │     • Default: info,torque=debug; override with RUST_LOG                │
/// │                                                                         │
/// │  2. Load Configuration ───────────────────────────────────────────────► │
/// │     • TORQUE_* environment variables                                    │
/// │                                                                         │
/// │  3. Load Catalog ─────────────────────────────────────────────────────► │
/// │     • Configured catalog.json, or the built-in lineup                   │
/// │                                                                         │
/// │  4. Create Session ───────────────────────────────────────────────────► │
/// │     • Default selection, initial loan terms, session id span           │
/// │                                                                         │
/// │  5. Run ──────────────────────────────────────────────────────────────► │
/// │     • stdin reader task ──► runtime loop ──► stdout                     │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub async fn run() -> AppResult<()> {
    init_tracing();

    info!("Starting Torque configurator kiosk");

    let config = KioskConfig::load()?;
    info!(
        asset_root = %config.asset_root.display(),
        catalog = ?config.catalog_path,
        probe_images = config.probe_images,
        "Configuration loaded"
    );

    let catalog = load_catalog(config.catalog_path.as_deref()).await?;

    let parsed = LoanTerms::from_raw(&config.initial_loan);
    parsed
        .fallbacks
        .iter()
        .filter(|e| !matches!(e, ValidationError::Required { .. }))
        .for_each(log_loan_fallback);

    let session = Session::new(catalog, parsed.terms);
    let span = info_span!("session", id = %session.id());

    let probe: Arc<dyn ImageProbe> = if config.probe_images {
        Arc::new(FsImageProbe::new(config.asset_root.clone()))
    } else {
        Arc::new(AssumeExists)
    };

    let (events_tx, events_rx) = mpsc::channel(EVENT_BUFFER);
    let reader = tokio::spawn(
        async move {
            match forward_events(BufReader::new(tokio::io::stdin()), events_tx).await {
                Ok(count) => info!(count, "Input closed"),
                Err(e) => error!(error = %e, "Failed to read events"),
            }
        }
        .instrument(span.clone()),
    );

    let runtime = Runtime::new(session, JsonLinesDisplay::new(std::io::stdout()), probe);
    runtime.run(events_rx).instrument(span).await;

    // The loop only ends once the reader has dropped its sender.
    join_reader(reader.await);

    info!("Kiosk stopped");
    Ok(())
}

/// Logs a reader task that ended by panicking or cancellation.
fn join_reader(joined: Result<(), JoinError>) -> bool {
    match joined {
        Ok(()) => true,
        Err(e) => {
            error!(error = %e, "Event reader task failed");
            false
        }
    }
}

/// Initializes the tracing subscriber for structured logging.
///
/// Logs go to stderr; stdout carries display updates.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=torque=trace` - Show image probe traces
/// - Default: `info,torque=debug`
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,torque=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Reads the catalog file, or returns the built-in catalog when none is
/// configured.
pub async fn load_catalog(path: Option<&Path>) -> AppResult<Catalog> {
    let Some(path) = path else {
        info!("Using built-in catalog");
        return Ok(Catalog::standard());
    };

    let json = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| AppError::CatalogRead {
            path: path.display().to_string(),
            source,
        })?;

    let catalog = Catalog::from_json(&json)?;
    info!(path = %path.display(), "Catalog loaded");
    Ok(catalog)
}
