//! # Selection State
//!
//! What the shopper has currently picked. Lives for one page session, is never
//! persisted, and is only changed through the event handlers in [`crate::events`]
//! (or directly in tests).

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::catalog::{Accessory, ColorSection, ExteriorColor, InteriorColor, OptionId, WheelStyle};

/// Current selections.
///
/// ## Options vs Fields
/// `OptionId::PerformanceWheels` is not a separate flag: it *is* the wheel
/// style. Asking whether it is selected reads `wheel_style`, and toggling it
/// flips the wheel style. There is exactly one source of truth per option.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SelectionState {
    pub exterior_color: ExteriorColor,
    pub interior_color: InteriorColor,
    pub wheel_style: WheelStyle,
    pub performance_package: bool,
    pub full_self_driving: bool,
    accessories: BTreeSet<Accessory>,
}

impl SelectionState {
    /// Sets the exterior or interior color.
    ///
    /// `color` may be a wire id or a label. Returns an error for colors that
    /// are not part of the lineup and leaves the state untouched.
    pub fn select_color(&mut self, section: ColorSection, color: &str) -> crate::CoreResult<()> {
        match section {
            ColorSection::Exterior => self.exterior_color = color.parse()?,
            ColorSection::Interior => self.interior_color = color.parse()?,
        }
        Ok(())
    }

    pub fn select_wheel_style(&mut self, style: WheelStyle) {
        self.wheel_style = style;
    }

    /// Whether an option currently contributes its surcharge.
    pub fn is_option_selected(&self, option: OptionId) -> bool {
        match option {
            OptionId::PerformanceWheels => self.wheel_style.is_performance(),
            OptionId::PerformancePackage => self.performance_package,
            OptionId::FullSelfDriving => self.full_self_driving,
        }
    }

    pub fn set_option(&mut self, option: OptionId, selected: bool) {
        match option {
            OptionId::PerformanceWheels => {
                self.wheel_style = WheelStyle::from_performance(selected);
            }
            OptionId::PerformancePackage => self.performance_package = selected,
            OptionId::FullSelfDriving => self.full_self_driving = selected,
        }
    }

    /// Flips an option. Returns the new value.
    pub fn toggle_option(&mut self, option: OptionId) -> bool {
        let selected = !self.is_option_selected(option);
        self.set_option(option, selected);
        selected
    }

    pub fn is_accessory_selected(&self, accessory: Accessory) -> bool {
        self.accessories.contains(&accessory)
    }

    pub fn set_accessory(&mut self, accessory: Accessory, selected: bool) {
        if selected {
            self.accessories.insert(accessory);
        } else {
            self.accessories.remove(&accessory);
        }
    }

    /// Flips an accessory. Returns the new value.
    pub fn toggle_accessory(&mut self, accessory: Accessory) -> bool {
        let selected = !self.is_accessory_selected(accessory);
        self.set_accessory(accessory, selected);
        selected
    }

    /// Selected accessories in catalog order.
    pub fn accessories(&self) -> impl Iterator<Item = Accessory> + '_ {
        self.accessories.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_selection() {
        let state = SelectionState::default();
        assert_eq!(state.exterior_color, ExteriorColor::StealthGrey);
        assert_eq!(state.interior_color, InteriorColor::Dark);
        assert!(OptionId::ALL.iter().all(|o| !state.is_option_selected(*o)));
        assert_eq!(state.accessories().count(), 0);
    }

    #[test]
    fn test_select_color_by_section() {
        let mut state = SelectionState::default();
        state.select_color(ColorSection::Exterior, "Ultra Red").unwrap();
        state.select_color(ColorSection::Interior, "light").unwrap();

        assert_eq!(state.exterior_color, ExteriorColor::UltraRed);
        assert_eq!(state.interior_color, InteriorColor::Light);
    }

    #[test]
    fn test_unknown_color_leaves_state_untouched() {
        let mut state = SelectionState::default();
        assert!(state.select_color(ColorSection::Exterior, "Neon").is_err());
        assert_eq!(state, SelectionState::default());
    }

    #[test]
    fn test_performance_wheels_option_is_wheel_style() {
        let mut state = SelectionState::default();
        assert!(state.toggle_option(OptionId::PerformanceWheels));
        assert_eq!(state.wheel_style, WheelStyle::Performance);

        state.select_wheel_style(WheelStyle::Standard);
        assert!(!state.is_option_selected(OptionId::PerformanceWheels));
    }

    #[test]
    fn test_accessory_set_is_idempotent() {
        let mut state = SelectionState::default();
        state.set_accessory(Accessory::Sunshade, true);
        state.set_accessory(Accessory::Sunshade, true);
        assert_eq!(state.accessories().collect::<Vec<_>>(), vec![Accessory::Sunshade]);

        assert!(!state.toggle_accessory(Accessory::Sunshade));
        assert!(!state.is_accessory_selected(Accessory::Sunshade));
    }
}
