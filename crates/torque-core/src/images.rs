//! # Image Resolution
//!
//! Maps a color selection to an image path, applying the wheel-style suffix,
//! and decides what to show once the existence probe has answered.
//!
//! ## Resolution Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  resolve_image(catalog, Exterior(UltraRed), "-performance")             │
//! │       │                                                                 │
//! │       ├── key missing from catalog ──► candidate = None                 │
//! │       │                                  │                              │
//! │       ▼                                  │                              │
//! │  "./images/model-y-ultra-red.jpg"        │                              │
//! │       │  insert suffix before extension  │                              │
//! │       ▼                                  │                              │
//! │  "./images/model-y-ultra-red-performance.jpg"                           │
//! │       │                                  │                              │
//! │       ▼ (adapter probes, async)          ▼                              │
//! │  settle(exists) ──► src = candidate  |  src = fallback + ImageMiss      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! This module never touches the filesystem; the probe lives in the adapter.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::catalog::{ExteriorColor, InteriorColor, WheelStyle};

/// Suffix of the exterior image variant with performance wheels.
pub const PERFORMANCE_SUFFIX: &str = "-performance";

/// Placeholder shown when an image cannot be resolved.
pub const DEFAULT_FALLBACK_IMAGE: &str = "./images/default.jpg";

// =============================================================================
// Image Catalog
// =============================================================================

/// Base image path per color. Read-only once loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ImageCatalog {
    #[serde(default)]
    pub exterior: BTreeMap<ExteriorColor, String>,
    #[serde(default)]
    pub interior: BTreeMap<InteriorColor, String>,
    #[serde(default = "default_fallback")]
    pub fallback: String,
}

fn default_fallback() -> String {
    DEFAULT_FALLBACK_IMAGE.to_string()
}

impl ImageCatalog {
    pub fn standard() -> Self {
        let exterior = BTreeMap::from([
            (ExteriorColor::StealthGrey, "./images/model-y-stealth-grey.jpg"),
            (ExteriorColor::PearlWhite, "./images/model-y-pearl-white.jpg"),
            (ExteriorColor::DeepBlue, "./images/model-y-deep-blue-metallic.jpg"),
            (ExteriorColor::SolidBlack, "./images/model-y-solid-black.jpg"),
            (ExteriorColor::UltraRed, "./images/model-y-ultra-red.jpg"),
            (ExteriorColor::Quicksilver, "./images/model-y-quicksilver.jpg"),
        ])
        .into_iter()
        .map(|(color, path)| (color, path.to_string()))
        .collect();

        let interior = BTreeMap::from([
            (InteriorColor::Dark, "./images/model-y-interior-dark.jpg"),
            (InteriorColor::Light, "./images/model-y-interior-light.jpg"),
        ])
        .into_iter()
        .map(|(color, path)| (color, path.to_string()))
        .collect();

        ImageCatalog {
            exterior,
            interior,
            fallback: default_fallback(),
        }
    }

    fn base_path(&self, key: ImageKey) -> Option<&str> {
        match key {
            ImageKey::Exterior(color) => self.exterior.get(&color),
            ImageKey::Interior(color) => self.interior.get(&color),
        }
        .map(String::as_str)
    }
}

impl Default for ImageCatalog {
    fn default() -> Self {
        ImageCatalog::standard()
    }
}

// =============================================================================
// Keys and Requests
// =============================================================================

/// The selection an image is resolved for. Named in miss diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "section", content = "color", rename_all = "snake_case")]
pub enum ImageKey {
    Exterior(ExteriorColor),
    Interior(InteriorColor),
}

impl fmt::Display for ImageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImageKey::Exterior(color) => write!(f, "exterior/{}", color.label()),
            ImageKey::Interior(color) => write!(f, "interior/{}", color.label()),
        }
    }
}

/// Suffix for the exterior image given the wheel style.
#[inline]
pub const fn exterior_suffix(wheels: WheelStyle) -> &'static str {
    if wheels.is_performance() {
        PERFORMANCE_SUFFIX
    } else {
        ""
    }
}

/// Inserts `suffix` before the file extension of `path`.
///
/// A dot that belongs to a directory (`./images/`) is not an extension. When
/// the file name has no extension the suffix is appended.
///
/// ## Example
/// ```rust
/// use torque_core::images::with_suffix;
///
/// assert_eq!(
///     with_suffix("./images/model-y-ultra-red.jpg", "-performance"),
///     "./images/model-y-ultra-red-performance.jpg"
/// );
/// assert_eq!(with_suffix("./images/hero", "-performance"), "./images/hero-performance");
/// ```
pub fn with_suffix(path: &str, suffix: &str) -> String {
    if suffix.is_empty() {
        return path.to_string();
    }

    let name_start = path.rfind('/').map(|i| i + 1).unwrap_or(0);
    match path[name_start..].rfind('.') {
        Some(dot) if dot > 0 => {
            let split = name_start + dot;
            format!("{}{}{}", &path[..split], suffix, &path[split..])
        }
        _ => format!("{}{}", path, suffix),
    }
}

/// An image to show for a selection, pending an existence check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRequest {
    pub key: ImageKey,
    /// Path to probe; `None` when the catalog has no entry for the key.
    pub candidate: Option<String>,
    pub fallback: String,
}

/// A non-fatal resolution failure, reported as a warning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageMiss {
    pub key: ImageKey,
    /// The path that failed the probe, if one was built.
    pub path: Option<String>,
}

impl fmt::Display for ImageMiss {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.path {
            Some(path) => write!(f, "Image not found for {} ({})", self.key, path),
            None => write!(f, "Image not found for {} (no catalog entry)", self.key),
        }
    }
}

/// What ends up in the image slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageOutcome {
    pub src: String,
    pub miss: Option<ImageMiss>,
}

impl ImageRequest {
    /// Whether an existence probe is needed before settling.
    #[inline]
    pub fn needs_probe(&self) -> bool {
        self.candidate.is_some()
    }

    /// Settles the request once the probe has answered. A request without a
    /// candidate settles to the fallback whatever `exists` says.
    pub fn settle(self, exists: bool) -> ImageOutcome {
        match self.candidate {
            Some(path) if exists => ImageOutcome {
                src: path,
                miss: None,
            },
            path => ImageOutcome {
                src: self.fallback,
                miss: Some(ImageMiss {
                    key: self.key,
                    path,
                }),
            },
        }
    }
}

/// Builds the image request for a selection.
pub fn resolve_image(catalog: &ImageCatalog, key: ImageKey, suffix: &str) -> ImageRequest {
    ImageRequest {
        key,
        candidate: catalog.base_path(key).map(|base| with_suffix(base, suffix)),
        fallback: catalog.fallback.clone(),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ultra_red_performance_variant() {
        let request = resolve_image(
            &ImageCatalog::standard(),
            ImageKey::Exterior(ExteriorColor::UltraRed),
            exterior_suffix(WheelStyle::Performance),
        );
        let path = request.candidate.as_deref().unwrap();
        assert!(path.ends_with("-performance.jpg"), "{path}");
        assert_eq!(path, "./images/model-y-ultra-red-performance.jpg");
    }

    #[test]
    fn test_standard_wheels_keep_base_path() {
        let request = resolve_image(
            &ImageCatalog::standard(),
            ImageKey::Exterior(ExteriorColor::DeepBlue),
            exterior_suffix(WheelStyle::Standard),
        );
        assert_eq!(
            request.candidate.as_deref(),
            Some("./images/model-y-deep-blue-metallic.jpg")
        );
    }

    #[test]
    fn test_with_suffix_edge_cases() {
        assert_eq!(with_suffix("a.b/c", "-x"), "a.b/c-x");
        assert_eq!(with_suffix("photo.tar.gz", "-x"), "photo.tar-x.gz");
        assert_eq!(with_suffix(".hidden", "-x"), ".hidden-x");
        assert_eq!(with_suffix("img.jpg", ""), "img.jpg");
    }

    #[test]
    fn test_missing_key_falls_back_without_probe() {
        let mut catalog = ImageCatalog::standard();
        catalog.exterior.remove(&ExteriorColor::Quicksilver);

        let request = resolve_image(&catalog, ImageKey::Exterior(ExteriorColor::Quicksilver), "");
        assert!(!request.needs_probe());

        let outcome = request.settle(true);
        assert_eq!(outcome.src, DEFAULT_FALLBACK_IMAGE);
        let miss = outcome.miss.unwrap();
        assert_eq!(miss.key, ImageKey::Exterior(ExteriorColor::Quicksilver));
        assert_eq!(
            miss.to_string(),
            "Image not found for exterior/Quicksilver (no catalog entry)"
        );
    }

    #[test]
    fn test_failed_probe_falls_back() {
        let request = resolve_image(
            &ImageCatalog::standard(),
            ImageKey::Interior(InteriorColor::Light),
            "",
        );
        let outcome = request.settle(false);
        assert_eq!(outcome.src, DEFAULT_FALLBACK_IMAGE);
        assert_eq!(
            outcome.miss.and_then(|m| m.path).as_deref(),
            Some("./images/model-y-interior-light.jpg")
        );
    }

    #[test]
    fn test_successful_probe_shows_candidate() {
        let request = resolve_image(
            &ImageCatalog::standard(),
            ImageKey::Interior(InteriorColor::Dark),
            "",
        );
        let outcome = request.settle(true);
        assert_eq!(outcome.src, "./images/model-y-interior-dark.jpg");
        assert!(outcome.miss.is_none());
    }
}
