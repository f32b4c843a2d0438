//! # Event Dispatch
//!
//! Maps page events to pure handler functions.
//!
//! ## Dispatch Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Event Dispatch                                   │
//! │                                                                         │
//! │  UiEvent (from page) ──► EventKind ──► HANDLERS table ──► handler fn    │
//! │                                                                         │
//! │  handler(&SelectionState, &UiEvent) ──► Transition                      │
//! │                                          ├── state   (new selection)    │
//! │                                          └── effects (what to redraw)   │
//! │                                                                         │
//! │  Effects are instructions for the adapter. Nothing here writes to a    │
//! │  display or touches an image file.                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Event → Effects
//! | Event                      | Effects                                        |
//! |----------------------------|------------------------------------------------|
//! | `Scroll`                   | `SetTopBar`                                    |
//! | `ExteriorColorSelected`    | `ResolveExteriorImage`                         |
//! | `InteriorColorSelected`    | `ResolveInteriorImage`                         |
//! | `WheelStyleSelected`       | `ResolveExteriorImage`, `RefreshPrice`         |
//! | `PerformancePackageToggled`| `RefreshPrice`                                 |
//! | `FullSelfDrivingChanged`   | `RefreshPrice`                                 |
//! | `AccessoryChanged`         | `RefreshPrice`                                 |
//! | `LoanInputsChanged`        | `ApplyLoanTerms`, `RefreshPrice`               |

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::catalog::{Accessory, ColorSection, ExteriorColor, InteriorColor, OptionId, WheelStyle};
use crate::error::ValidationError;
use crate::financing::{LoanTerms, RawLoanInputs};
use crate::images::exterior_suffix;
use crate::selection::SelectionState;

// =============================================================================
// Events
// =============================================================================

/// A discrete user action on the purchase page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum UiEvent {
    /// Window scrolled; `y` is the vertical scroll offset in pixels.
    Scroll { y: f64 },
    ExteriorColorSelected { color: ExteriorColor },
    InteriorColorSelected { color: InteriorColor },
    WheelStyleSelected { performance: bool },
    PerformancePackageToggled,
    FullSelfDrivingChanged { checked: bool },
    AccessoryChanged { accessory: Accessory, checked: bool },
    LoanInputsChanged(RawLoanInputs),
}

/// Discriminant of `UiEvent`, used as the dispatch table key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Scroll,
    ExteriorColorSelected,
    InteriorColorSelected,
    WheelStyleSelected,
    PerformancePackageToggled,
    FullSelfDrivingChanged,
    AccessoryChanged,
    LoanInputsChanged,
}

impl UiEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            UiEvent::Scroll { .. } => EventKind::Scroll,
            UiEvent::ExteriorColorSelected { .. } => EventKind::ExteriorColorSelected,
            UiEvent::InteriorColorSelected { .. } => EventKind::InteriorColorSelected,
            UiEvent::WheelStyleSelected { .. } => EventKind::WheelStyleSelected,
            UiEvent::PerformancePackageToggled => EventKind::PerformancePackageToggled,
            UiEvent::FullSelfDrivingChanged { .. } => EventKind::FullSelfDrivingChanged,
            UiEvent::AccessoryChanged { .. } => EventKind::AccessoryChanged,
            UiEvent::LoanInputsChanged(_) => EventKind::LoanInputsChanged,
        }
    }

    /// Builds a color event from the group that fired and the raw color
    /// string (id or label).
    pub fn color_selected(section: ColorSection, color: &str) -> crate::CoreResult<Self> {
        Ok(match section {
            ColorSection::Exterior => UiEvent::ExteriorColorSelected {
                color: color.parse()?,
            },
            ColorSection::Interior => UiEvent::InteriorColorSelected {
                color: color.parse()?,
            },
        })
    }
}

// =============================================================================
// Top Bar
// =============================================================================

/// Visibility of the sticky top bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum TopBarVisibility {
    Visible,
    Hidden,
}

impl TopBarVisibility {
    /// Visible only while the page is at the very top. Negative offsets
    /// (elastic overscroll) count as the top.
    pub fn for_scroll(y: f64) -> Self {
        if y > 0.0 {
            TopBarVisibility::Hidden
        } else {
            TopBarVisibility::Visible
        }
    }

    /// CSS class to add, then the one to remove.
    pub const fn classes(&self) -> (&'static str, &'static str) {
        match self {
            TopBarVisibility::Visible => ("visible-bar", "hidden-bar"),
            TopBarVisibility::Hidden => ("hidden-bar", "visible-bar"),
        }
    }
}

// =============================================================================
// Effects and Transitions
// =============================================================================

/// Work the adapter must do after a transition.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Recompute total + financing and rewrite the price regions.
    RefreshPrice,
    ResolveExteriorImage {
        color: ExteriorColor,
        suffix: &'static str,
    },
    ResolveInteriorImage {
        color: InteriorColor,
    },
    SetTopBar(TopBarVisibility),
    /// Replace the loan terms; `fallbacks` lists fields that took defaults.
    ApplyLoanTerms {
        terms: LoanTerms,
        fallbacks: Vec<ValidationError>,
    },
}

/// Output of a handler.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub state: SelectionState,
    pub effects: Vec<Effect>,
}

impl Transition {
    fn new(state: SelectionState, effects: Vec<Effect>) -> Self {
        Transition { state, effects }
    }

    /// The event did not apply; state is carried over untouched.
    fn unchanged(state: &SelectionState) -> Self {
        Transition::new(state.clone(), Vec::new())
    }
}

fn exterior_image(state: &SelectionState) -> Effect {
    Effect::ResolveExteriorImage {
        color: state.exterior_color,
        suffix: exterior_suffix(state.wheel_style),
    }
}

// =============================================================================
// Handlers
// =============================================================================

/// A pure event handler.
pub type Handler = fn(&SelectionState, &UiEvent) -> Transition;

fn on_scroll(state: &SelectionState, event: &UiEvent) -> Transition {
    let UiEvent::Scroll { y } = event else {
        return Transition::unchanged(state);
    };
    Transition::new(
        state.clone(),
        vec![Effect::SetTopBar(TopBarVisibility::for_scroll(*y))],
    )
}

fn on_exterior_color(state: &SelectionState, event: &UiEvent) -> Transition {
    let UiEvent::ExteriorColorSelected { color } = event else {
        return Transition::unchanged(state);
    };
    let mut next = state.clone();
    next.exterior_color = *color;
    let effects = vec![exterior_image(&next)];
    Transition::new(next, effects)
}

fn on_interior_color(state: &SelectionState, event: &UiEvent) -> Transition {
    let UiEvent::InteriorColorSelected { color } = event else {
        return Transition::unchanged(state);
    };
    let mut next = state.clone();
    next.interior_color = *color;
    Transition::new(next, vec![Effect::ResolveInteriorImage { color: *color }])
}

fn on_wheel_style(state: &SelectionState, event: &UiEvent) -> Transition {
    let UiEvent::WheelStyleSelected { performance } = event else {
        return Transition::unchanged(state);
    };
    let mut next = state.clone();
    next.select_wheel_style(WheelStyle::from_performance(*performance));
    let effects = vec![exterior_image(&next), Effect::RefreshPrice];
    Transition::new(next, effects)
}

fn on_performance_package(state: &SelectionState, _event: &UiEvent) -> Transition {
    let mut next = state.clone();
    next.toggle_option(OptionId::PerformancePackage);
    Transition::new(next, vec![Effect::RefreshPrice])
}

fn on_full_self_driving(state: &SelectionState, event: &UiEvent) -> Transition {
    let UiEvent::FullSelfDrivingChanged { checked } = event else {
        return Transition::unchanged(state);
    };
    let mut next = state.clone();
    next.set_option(OptionId::FullSelfDriving, *checked);
    Transition::new(next, vec![Effect::RefreshPrice])
}

fn on_accessory(state: &SelectionState, event: &UiEvent) -> Transition {
    let UiEvent::AccessoryChanged { accessory, checked } = event else {
        return Transition::unchanged(state);
    };
    let mut next = state.clone();
    next.set_accessory(*accessory, *checked);
    Transition::new(next, vec![Effect::RefreshPrice])
}

fn on_loan_inputs(state: &SelectionState, event: &UiEvent) -> Transition {
    let UiEvent::LoanInputsChanged(raw) = event else {
        return Transition::unchanged(state);
    };
    let parsed = LoanTerms::from_raw(raw);
    Transition::new(
        state.clone(),
        vec![
            Effect::ApplyLoanTerms {
                terms: parsed.terms,
                fallbacks: parsed.fallbacks,
            },
            Effect::RefreshPrice,
        ],
    )
}

/// Event → handler table.
pub const HANDLERS: &[(EventKind, Handler)] = &[
    (EventKind::Scroll, on_scroll),
    (EventKind::ExteriorColorSelected, on_exterior_color),
    (EventKind::InteriorColorSelected, on_interior_color),
    (EventKind::WheelStyleSelected, on_wheel_style),
    (EventKind::PerformancePackageToggled, on_performance_package),
    (EventKind::FullSelfDrivingChanged, on_full_self_driving),
    (EventKind::AccessoryChanged, on_accessory),
    (EventKind::LoanInputsChanged, on_loan_inputs),
];

/// Looks up the handler for an event kind.
pub fn handler_for(kind: EventKind) -> Option<Handler> {
    HANDLERS
        .iter()
        .find(|(k, _)| *k == kind)
        .map(|(_, handler)| *handler)
}

/// Applies an event to a selection.
///
/// ## Example
/// ```rust
/// use torque_core::catalog::ExteriorColor;
/// use torque_core::events::{dispatch, Effect, UiEvent};
/// use torque_core::selection::SelectionState;
///
/// let state = SelectionState::default();
/// let t = dispatch(&state, &UiEvent::WheelStyleSelected { performance: true });
/// assert!(t.state.wheel_style.is_performance());
/// assert!(t.effects.contains(&Effect::ResolveExteriorImage {
///     color: ExteriorColor::StealthGrey,
///     suffix: "-performance",
/// }));
/// ```
pub fn dispatch(state: &SelectionState, event: &UiEvent) -> Transition {
    match handler_for(event.kind()) {
        Some(handler) => handler(state, event),
        None => Transition::unchanged(state),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::{compute_total_price, PriceTable};

    fn sample_event(kind: EventKind) -> UiEvent {
        match kind {
            EventKind::Scroll => UiEvent::Scroll { y: 12.0 },
            EventKind::ExteriorColorSelected => UiEvent::ExteriorColorSelected {
                color: ExteriorColor::PearlWhite,
            },
            EventKind::InteriorColorSelected => UiEvent::InteriorColorSelected {
                color: InteriorColor::Light,
            },
            EventKind::WheelStyleSelected => UiEvent::WheelStyleSelected { performance: true },
            EventKind::PerformancePackageToggled => UiEvent::PerformancePackageToggled,
            EventKind::FullSelfDrivingChanged => UiEvent::FullSelfDrivingChanged { checked: true },
            EventKind::AccessoryChanged => UiEvent::AccessoryChanged {
                accessory: Accessory::Sunshade,
                checked: true,
            },
            EventKind::LoanInputsChanged => UiEvent::LoanInputsChanged(RawLoanInputs::default()),
        }
    }

    const ALL_KINDS: [EventKind; 8] = [
        EventKind::Scroll,
        EventKind::ExteriorColorSelected,
        EventKind::InteriorColorSelected,
        EventKind::WheelStyleSelected,
        EventKind::PerformancePackageToggled,
        EventKind::FullSelfDrivingChanged,
        EventKind::AccessoryChanged,
        EventKind::LoanInputsChanged,
    ];

    #[test]
    fn test_every_kind_has_exactly_one_handler() {
        for kind in ALL_KINDS {
            let count = HANDLERS.iter().filter(|(k, _)| *k == kind).count();
            assert_eq!(count, 1, "{kind:?}");
            assert_eq!(sample_event(kind).kind(), kind);
        }
        assert_eq!(HANDLERS.len(), ALL_KINDS.len());
    }

    #[test]
    fn test_every_handler_produces_effects() {
        let state = SelectionState::default();
        for kind in ALL_KINDS {
            let transition = dispatch(&state, &sample_event(kind));
            assert!(!transition.effects.is_empty(), "{kind:?}");
        }
    }

    #[test]
    fn test_handler_ignores_mismatched_payload() {
        let state = SelectionState::default();
        let handler = handler_for(EventKind::AccessoryChanged).unwrap();
        let transition = handler(&state, &UiEvent::Scroll { y: 0.0 });
        assert_eq!(transition.state, state);
        assert!(transition.effects.is_empty());
    }

    #[test]
    fn test_scroll_toggles_top_bar() {
        let state = SelectionState::default();
        let at_top = dispatch(&state, &UiEvent::Scroll { y: 0.0 });
        assert_eq!(
            at_top.effects,
            vec![Effect::SetTopBar(TopBarVisibility::Visible)]
        );

        let scrolled = dispatch(&state, &UiEvent::Scroll { y: 0.5 });
        assert_eq!(
            scrolled.effects,
            vec![Effect::SetTopBar(TopBarVisibility::Hidden)]
        );
        assert_eq!(TopBarVisibility::for_scroll(-4.0), TopBarVisibility::Visible);
        assert_eq!(TopBarVisibility::Hidden.classes(), ("hidden-bar", "visible-bar"));
    }

    #[test]
    fn test_exterior_color_uses_performance_suffix_when_active() {
        let mut state = SelectionState::default();
        state.select_wheel_style(WheelStyle::Performance);

        let transition = dispatch(
            &state,
            &UiEvent::ExteriorColorSelected {
                color: ExteriorColor::UltraRed,
            },
        );
        assert_eq!(transition.state.exterior_color, ExteriorColor::UltraRed);
        assert_eq!(
            transition.effects,
            vec![Effect::ResolveExteriorImage {
                color: ExteriorColor::UltraRed,
                suffix: "-performance",
            }]
        );
    }

    #[test]
    fn test_color_change_does_not_reprice() {
        let state = SelectionState::default();
        let transition = dispatch(
            &state,
            &UiEvent::InteriorColorSelected {
                color: InteriorColor::Light,
            },
        );
        assert!(!transition.effects.contains(&Effect::RefreshPrice));
    }

    #[test]
    fn test_wheel_style_reresolves_image_then_reprices() {
        let mut state = SelectionState::default();
        state.exterior_color = ExteriorColor::SolidBlack;
        state.select_wheel_style(WheelStyle::Performance);

        let transition = dispatch(&state, &UiEvent::WheelStyleSelected { performance: false });
        assert_eq!(
            transition.effects,
            vec![
                Effect::ResolveExteriorImage {
                    color: ExteriorColor::SolidBlack,
                    suffix: "",
                },
                Effect::RefreshPrice,
            ]
        );
    }

    #[test]
    fn test_package_toggle_round_trip_through_dispatch() {
        let prices = PriceTable::standard();
        let start = SelectionState::default();
        let before = compute_total_price(&start, &prices);

        let on = dispatch(&start, &UiEvent::PerformancePackageToggled).state;
        assert_eq!(
            compute_total_price(&on, &prices),
            before + prices.surcharge(OptionId::PerformancePackage)
        );

        let off = dispatch(&on, &UiEvent::PerformancePackageToggled).state;
        assert_eq!(compute_total_price(&off, &prices), before);
    }

    #[test]
    fn test_checkbox_events_are_idempotent() {
        let event = UiEvent::AccessoryChanged {
            accessory: Accessory::AllWeatherInteriorLiners,
            checked: true,
        };
        let once = dispatch(&SelectionState::default(), &event).state;
        let twice = dispatch(&once, &event).state;
        assert_eq!(once, twice);
    }

    #[test]
    fn test_loan_inputs_apply_terms() {
        let transition = dispatch(
            &SelectionState::default(),
            &UiEvent::LoanInputsChanged(RawLoanInputs {
                term_months: Some("36".to_string()),
                interest_rate: None,
                down_payment_percentage: Some("25".to_string()),
            }),
        );
        match &transition.effects[0] {
            Effect::ApplyLoanTerms { terms, fallbacks } => {
                assert_eq!(terms.term_months, 36);
                assert_eq!(terms.down_payment.ppm(), 250_000);
                assert_eq!(fallbacks.len(), 1);
            }
            other => panic!("unexpected effect {other:?}"),
        }
        assert_eq!(transition.effects[1], Effect::RefreshPrice);
    }

    #[test]
    fn test_events_decode_from_page_json() {
        let event: UiEvent =
            serde_json::from_str(r#"{"type":"exterior_color_selected","color":"ultra-red"}"#)
                .unwrap();
        assert_eq!(
            event,
            UiEvent::ExteriorColorSelected {
                color: ExteriorColor::UltraRed
            }
        );

        let event: UiEvent = serde_json::from_str(
            r#"{"type":"loan_inputs_changed","term_months":"72","interest_rate":""}"#,
        )
        .unwrap();
        assert_eq!(event.kind(), EventKind::LoanInputsChanged);

        let event: UiEvent =
            serde_json::from_str(r#"{"type":"performance_package_toggled"}"#).unwrap();
        assert_eq!(event, UiEvent::PerformancePackageToggled);
    }

    #[test]
    fn test_color_selected_from_label() {
        let event = UiEvent::color_selected(ColorSection::Exterior, "Ultra Red").unwrap();
        assert_eq!(event.kind(), EventKind::ExteriorColorSelected);
        assert!(UiEvent::color_selected(ColorSection::Interior, "Beige").is_err());
    }
}
