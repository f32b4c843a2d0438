//! # Catalog
//!
//! Closed identifiers for everything a shopper can pick, and the `Catalog`
//! bundle (prices + images) the engine is loaded with.
//!
//! ## Identifier Layers
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  wire id (serde, events)     label (display only)                       │
//! │  ───────────────────────     ─────────────────────                      │
//! │  "ultra-red"            ◄──► "Ultra Red"                                │
//! │  "performance-wheels"   ◄──► "Performance Wheels"                       │
//! │  "sunshade"             ◄──► "Sunshade"                                 │
//! │                                                                         │
//! │  Pricing and image lookup key on the enum, never on the label.          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::images::ImageCatalog;
use crate::pricing::PriceTable;

/// Generates `ALL`, `id()`, `label()`, `Display` and `FromStr` for a closed
/// identifier enum. `FromStr` accepts either the wire id or the label.
macro_rules! closed_ids {
    ($ty:ident, $err:expr, { $($variant:ident => ($id:literal, $label:literal)),+ $(,)? }) => {
        impl $ty {
            /// Every value, in display order.
            pub const ALL: &'static [$ty] = &[$($ty::$variant),+];

            /// Stable wire identifier.
            pub const fn id(&self) -> &'static str {
                match self {
                    $($ty::$variant => $id),+
                }
            }

            /// Human-readable label.
            pub const fn label(&self) -> &'static str {
                match self {
                    $($ty::$variant => $label),+
                }
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }

        impl FromStr for $ty {
            type Err = CoreError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let s = s.trim();
                $ty::ALL
                    .iter()
                    .copied()
                    .find(|v| v.id() == s || v.label() == s)
                    .ok_or_else(|| $err(s.to_string()))
            }
        }
    };
}

// =============================================================================
// Colors
// =============================================================================

/// Which selection group fired a color click.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum ColorSection {
    Exterior,
    Interior,
}

impl fmt::Display for ColorSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColorSection::Exterior => f.write_str("exterior"),
            ColorSection::Interior => f.write_str("interior"),
        }
    }
}

/// Paint options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "kebab-case")]
pub enum ExteriorColor {
    #[default]
    StealthGrey,
    PearlWhite,
    DeepBlue,
    SolidBlack,
    UltraRed,
    Quicksilver,
}

closed_ids!(ExteriorColor, |value| CoreError::UnknownColor {
    section: ColorSection::Exterior.to_string(),
    value,
}, {
    StealthGrey => ("stealth-grey", "Stealth Grey"),
    PearlWhite => ("pearl-white", "Pearl White"),
    DeepBlue => ("deep-blue", "Deep Blue"),
    SolidBlack => ("solid-black", "Solid Black"),
    UltraRed => ("ultra-red", "Ultra Red"),
    Quicksilver => ("quicksilver", "Quicksilver"),
});

/// Cabin trim options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "kebab-case")]
pub enum InteriorColor {
    #[default]
    Dark,
    Light,
}

closed_ids!(InteriorColor, |value| CoreError::UnknownColor {
    section: ColorSection::Interior.to_string(),
    value,
}, {
    Dark => ("dark", "Dark"),
    Light => ("light", "Light"),
});

// =============================================================================
// Wheels, Options, Accessories
// =============================================================================

/// Wheel style. Performance wheels carry a surcharge and swap the exterior
/// image to its `-performance` variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum WheelStyle {
    #[default]
    Standard,
    Performance,
}

impl WheelStyle {
    #[inline]
    pub const fn from_performance(is_performance: bool) -> Self {
        if is_performance {
            WheelStyle::Performance
        } else {
            WheelStyle::Standard
        }
    }

    #[inline]
    pub const fn is_performance(&self) -> bool {
        matches!(self, WheelStyle::Performance)
    }
}

/// Priced boolean options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "kebab-case")]
pub enum OptionId {
    PerformanceWheels,
    PerformancePackage,
    FullSelfDriving,
}

closed_ids!(OptionId, CoreError::UnknownOption, {
    PerformanceWheels => ("performance-wheels", "Performance Wheels"),
    PerformancePackage => ("performance-package", "Performance Package"),
    FullSelfDriving => ("full-self-driving", "Full Self-Driving"),
});

/// Add-on accessories, each independently selectable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "kebab-case")]
pub enum Accessory {
    CenterConsoleTrays,
    Sunshade,
    AllWeatherInteriorLiners,
}

closed_ids!(Accessory, CoreError::UnknownAccessory, {
    CenterConsoleTrays => ("center-console-trays", "Center Console Trays"),
    Sunshade => ("sunshade", "Sunshade"),
    AllWeatherInteriorLiners => ("all-weather-interior-liners", "All-Weather Interior Liners"),
});

// =============================================================================
// Catalog
// =============================================================================

/// Everything the engine needs that is fixed for a page session.
///
/// ## File Format
/// ```json
/// {
///   "prices": {
///     "base_price": 5249000,
///     "options": { "performance-wheels": 250000 },
///     "accessories": { "sunshade": 10500 }
///   },
///   "images": {
///     "exterior": { "ultra-red": "./images/model-y-ultra-red.jpg" },
///     "interior": { "dark": "./images/model-y-interior-dark.jpg" },
///     "fallback": "./images/default.jpg"
///   }
/// }
/// ```
/// Amounts are integer cents. Entries left out of a map price at zero (or
/// resolve to the fallback image).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    pub prices: PriceTable,
    pub images: ImageCatalog,
}

impl Catalog {
    /// The built-in lineup.
    pub fn standard() -> Self {
        Catalog {
            prices: PriceTable::standard(),
            images: ImageCatalog::standard(),
        }
    }

    /// Decodes a catalog document.
    pub fn from_json(json: &str) -> CoreResult<Self> {
        let catalog: Catalog = serde_json::from_str(json)?;
        if catalog.prices.base_price.cents() < 0 {
            return Err(CoreError::InvalidCatalog(
                "base_price must not be negative".to_string(),
            ));
        }
        Ok(catalog)
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Catalog::standard()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
