//! # Display Bindings
//!
//! Where formatted prices, image sources and the top-bar state are written.
//!
//! ## Regions
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  [top bar]  visible-bar / hidden-bar                                    │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │  [exterior image]                     [interior image]                  │
//! │                                                                         │
//! │  Total           [total_price]        $55,095                           │
//! │  Down payment    [down_payment]       $5,509.50                         │
//! │  Monthly         [monthly_payment]    $890.97                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A binding that has no element for a region simply ignores the update.

use std::collections::HashMap;
use std::io::Write;

use serde::{Deserialize, Serialize};
use tracing::warn;
use ts_rs::TS;

use torque_core::TopBarVisibility;

/// Text regions the engine writes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum TextRegion {
    TotalPrice,
    DownPayment,
    MonthlyPayment,
}

/// Image elements the engine swaps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum ImageSlot {
    Exterior,
    Interior,
}

/// One change to the page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DisplayUpdate {
    Text { region: TextRegion, text: String },
    Image { slot: ImageSlot, src: String },
    TopBar {
        visibility: TopBarVisibility,
        add_class: String,
        remove_class: String,
    },
}

impl DisplayUpdate {
    pub fn top_bar(visibility: TopBarVisibility) -> Self {
        let (add, remove) = visibility.classes();
        DisplayUpdate::TopBar {
            visibility,
            add_class: add.to_string(),
            remove_class: remove.to_string(),
        }
    }
}

/// Sink for display updates.
pub trait DisplayBindings {
    fn apply(&mut self, update: DisplayUpdate);

    fn set_text(&mut self, region: TextRegion, text: String) {
        self.apply(DisplayUpdate::Text { region, text });
    }

    fn set_image(&mut self, slot: ImageSlot, src: String) {
        self.apply(DisplayUpdate::Image { slot, src });
    }

    fn set_top_bar(&mut self, visibility: TopBarVisibility) {
        self.apply(DisplayUpdate::top_bar(visibility));
    }
}

// =============================================================================
// JSON Lines
// =============================================================================

/// Writes each update as one JSON object per line.
///
/// Write failures are logged and dropped; a broken display never stops the
/// engine.
#[derive(Debug)]
pub struct JsonLinesDisplay<W: Write> {
    out: W,
}

impl<W: Write> JsonLinesDisplay<W> {
    pub fn new(out: W) -> Self {
        JsonLinesDisplay { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> DisplayBindings for JsonLinesDisplay<W> {
    fn apply(&mut self, update: DisplayUpdate) {
        let result = serde_json::to_writer(&mut self.out, &update)
            .map_err(std::io::Error::from)
            .and_then(|()| self.out.write_all(b"\n"))
            .and_then(|()| self.out.flush());

        if let Err(e) = result {
            warn!(error = %e, ?update, "Failed to write display update");
        }
    }
}

// =============================================================================
// Recording
// =============================================================================

/// Keeps every update in memory. Used by tests and for snapshots.
#[derive(Debug, Default)]
pub struct RecordingDisplay {
    pub history: Vec<DisplayUpdate>,
    texts: HashMap<TextRegion, String>,
    images: HashMap<ImageSlot, String>,
    top_bar: Option<TopBarVisibility>,
}

impl RecordingDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self, region: TextRegion) -> Option<&str> {
        self.texts.get(&region).map(String::as_str)
    }

    pub fn image(&self, slot: ImageSlot) -> Option<&str> {
        self.images.get(&slot).map(String::as_str)
    }

    pub fn top_bar(&self) -> Option<TopBarVisibility> {
        self.top_bar
    }
}

impl DisplayBindings for RecordingDisplay {
    fn apply(&mut self, update: DisplayUpdate) {
        match &update {
            DisplayUpdate::Text { region, text } => {
                self.texts.insert(*region, text.clone());
            }
            DisplayUpdate::Image { slot, src } => {
                self.images.insert(*slot, src.clone());
            }
            DisplayUpdate::TopBar { visibility, .. } => self.top_bar = Some(*visibility),
        }
        self.history.push(update);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_lines_output() {
        let mut display = JsonLinesDisplay::new(Vec::new());
        display.set_text(TextRegion::TotalPrice, "$52,490".to_string());
        display.set_top_bar(TopBarVisibility::Hidden);

        let out = String::from_utf8(display.into_inner()).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(
            lines,
            vec![
                r#"{"kind":"text","region":"total_price","text":"$52,490"}"#,
                r#"{"kind":"top_bar","visibility":"hidden","add_class":"hidden-bar","remove_class":"visible-bar"}"#,
            ]
        );
    }

    #[test]
    fn test_recording_keeps_latest_value() {
        let mut display = RecordingDisplay::new();
        display.set_image(ImageSlot::Exterior, "a.jpg".to_string());
        display.set_image(ImageSlot::Exterior, "b.jpg".to_string());

        assert_eq!(display.image(ImageSlot::Exterior), Some("b.jpg"));
        assert_eq!(display.image(ImageSlot::Interior), None);
        assert_eq!(display.history.len(), 2);
    }

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_write_failure_is_swallowed() {
        let mut display = JsonLinesDisplay::new(BrokenPipe);
        display.set_text(TextRegion::MonthlyPayment, "$1.00".to_string());
    }
}
