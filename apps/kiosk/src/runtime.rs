//! # Runtime Loop
//!
//! Owns the session, turns events into effects and effects into display
//! updates.
//!
//! ## Event Loop
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Runtime::run                                    │
//! │                                                                         │
//! │   events (mpsc) ──┐                                                     │
//! │                   ├──► tokio::select! ──► handle_event / handle_probe   │
//! │   JoinSet ────────┘                                                     │
//! │        ▲                                                                │
//! │        │ ProbeReport (or JoinError if the task panicked)                │
//! │   ┌────┴──────────────┐                                                 │
//! │   │ probe task        │  one task per image request                     │
//! │   │ probe.exists(..)  │  the old image stays until the report arrives   │
//! │   └───────────────────┘                                                 │
//! │                                                                         │
//! │  Events are handled one at a time, to completion. Probe reports are     │
//! │  applied in arrival order; a late report overwrites a newer one.        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;

use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::mpsc;
use tokio::task::{JoinError, JoinSet};
use tracing::{debug, error, info, warn};

use torque_core::images::{ImageKey, ImageOutcome, ImageRequest};
use torque_core::{Effect, UiEvent, ValidationError};

use crate::display::{DisplayBindings, ImageSlot, TextRegion};
use crate::error::AppResult;
use crate::probe::ImageProbe;
use crate::state::Session;

/// Answer from a probe task.
#[derive(Debug)]
pub struct ProbeReport {
    pub slot: ImageSlot,
    pub request: ImageRequest,
    pub exists: bool,
}

enum Next {
    Event(UiEvent),
    Report(Result<ProbeReport, JoinError>),
    Closed,
}

/// The configurator event loop.
pub struct Runtime<D: DisplayBindings> {
    session: Session,
    display: D,
    probe: Arc<dyn ImageProbe>,
    probes: JoinSet<ProbeReport>,
}

impl<D: DisplayBindings> Runtime<D> {
    pub fn new(session: Session, display: D, probe: Arc<dyn ImageProbe>) -> Self {
        Runtime {
            session,
            display,
            probe,
            probes: JoinSet::new(),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    /// Number of probes that have not reported yet.
    pub fn pending_probes(&self) -> usize {
        self.probes.len()
    }

    /// Renders the price regions and both image slots for the initial
    /// selection.
    pub fn start(&mut self) {
        self.refresh_price();

        let [exterior, interior] = self.session.current_images();
        self.show_image(ImageSlot::Exterior, exterior);
        self.show_image(ImageSlot::Interior, interior);
    }

    /// Handles one event to completion. Image probes it starts keep running.
    pub fn handle_event(&mut self, event: UiEvent) {
        debug!(kind = ?event.kind(), "Handling event");
        let effects = self.session.apply(&event);
        for effect in effects {
            self.run_effect(effect);
        }
    }

    fn run_effect(&mut self, effect: Effect) {
        match effect {
            Effect::RefreshPrice => self.refresh_price(),
            Effect::ResolveExteriorImage { color, suffix } => {
                let request = self.session.image_request(ImageKey::Exterior(color), suffix);
                self.show_image(ImageSlot::Exterior, request);
            }
            Effect::ResolveInteriorImage { color } => {
                let request = self.session.image_request(ImageKey::Interior(color), "");
                self.show_image(ImageSlot::Interior, request);
            }
            Effect::SetTopBar(visibility) => self.display.set_top_bar(visibility),
            Effect::ApplyLoanTerms { terms, fallbacks } => {
                for fallback in &fallbacks {
                    log_loan_fallback(fallback);
                }
                debug!(
                    term_months = terms.term_months,
                    rate_pct = terms.annual_rate.percentage(),
                    down_pct = terms.down_payment.percentage(),
                    "Loan terms applied"
                );
                self.session.set_loan_terms(terms);
            }
        }
    }

    fn refresh_price(&mut self) {
        let quote = self.session.quote();
        debug!(total = %quote.total, monthly = %quote.financing.monthly_payment, "Repriced");

        self.display
            .set_text(TextRegion::TotalPrice, quote.total_text());
        self.display
            .set_text(TextRegion::DownPayment, quote.down_payment_text());
        self.display
            .set_text(TextRegion::MonthlyPayment, quote.monthly_payment_text());
    }

    fn show_image(&mut self, slot: ImageSlot, request: ImageRequest) {
        let Some(path) = request.candidate.clone() else {
            let outcome = request.settle(false);
            self.apply_image(slot, outcome);
            return;
        };

        let probe = Arc::clone(&self.probe);
        self.probes.spawn(async move {
            let exists = probe.exists(&path).await;
            ProbeReport {
                slot,
                request,
                exists,
            }
        });
    }

    /// Applies a finished probe task to its image slot. A task that failed
    /// leaves the slot as it was.
    pub fn handle_probe(&mut self, joined: Result<ProbeReport, JoinError>) {
        match joined {
            Ok(report) => {
                let outcome = report.request.settle(report.exists);
                self.apply_image(report.slot, outcome);
            }
            Err(e) => error!(error = %e, "Image check task failed"),
        }
    }

    fn apply_image(&mut self, slot: ImageSlot, outcome: ImageOutcome) {
        if let Some(miss) = &outcome.miss {
            warn!(key = %miss.key, path = ?miss.path, "{}", miss);
        }
        self.display.set_image(slot, outcome.src);
    }

    /// Waits for every outstanding probe and applies its answer.
    pub async fn settle(&mut self) {
        while let Some(joined) = self.probes.join_next().await {
            self.handle_probe(joined);
        }
    }

    /// Runs until the event channel closes, then drains pending probes and
    /// hands back the display.
    pub async fn run(mut self, mut events: mpsc::Receiver<UiEvent>) -> D {
        self.start();

        loop {
            let next = tokio::select! {
                event = events.recv() => match event {
                    Some(event) => Next::Event(event),
                    None => Next::Closed,
                },
                Some(joined) = self.probes.join_next() => Next::Report(joined),
            };

            match next {
                Next::Event(event) => self.handle_event(event),
                Next::Report(report) => self.handle_probe(report),
                Next::Closed => break,
            }
        }

        self.settle().await;
        info!(session = %self.session.id(), "Event stream closed");
        self.display
    }
}

pub(crate) fn log_loan_fallback(error: &ValidationError) {
    match error {
        ValidationError::Required { .. } => {
            debug!(field = error.field(), "Loan input empty, using default")
        }
        _ => warn!(field = error.field(), error = %error, "Loan input unusable, using default"),
    }
}

/// Reads one JSON `UiEvent` per line and forwards it to the runtime.
///
/// Blank lines are skipped. Malformed lines are logged and skipped. Returns
/// the number of events forwarded once the input ends or the runtime stops
/// listening.
pub async fn forward_events<R>(reader: R, events: mpsc::Sender<UiEvent>) -> AppResult<usize>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = reader.lines();
    let mut forwarded = 0;

    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match serde_json::from_str::<UiEvent>(line) {
            Ok(event) => {
                if events.send(event).await.is_err() {
                    break;
                }
                forwarded += 1;
            }
            Err(e) => warn!(error = %e, line, "Skipping malformed event"),
        }
    }

    Ok(forwarded)
}
