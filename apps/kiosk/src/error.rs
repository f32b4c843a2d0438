//! # Kiosk Error Type
//!
//! Errors that can stop the kiosk from starting.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in the Kiosk                              │
//! │                                                                         │
//! │  Startup (config, catalog file)                                         │
//! │  └── AppError ──► propagated with `?` out of main ──► exit code 1       │
//! │                                                                         │
//! │  Per event (bad JSON line, missing image, bad loan input)               │
//! │  └── logged with tracing, swallowed; the next event is processed        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;
use torque_core::CoreError;

use crate::config::ConfigError;

/// Kiosk startup and I/O errors.
#[derive(Debug, Error)]
pub enum AppError {
    /// Environment configuration is invalid.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The configured catalog file could not be read.
    #[error("Failed to read catalog {path}: {source}")]
    CatalogRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The catalog file was read but is not a valid catalog.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Reading events or writing display updates failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for kiosk results.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_read_message_names_path() {
        let err = AppError::CatalogRead {
            path: "/etc/torque/catalog.json".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
        };
        assert_eq!(
            err.to_string(),
            "Failed to read catalog /etc/torque/catalog.json: no such file"
        );
    }

    #[test]
    fn test_core_error_is_transparent() {
        let err: AppError = CoreError::InvalidCatalog("missing prices".to_string()).into();
        assert_eq!(err.to_string(), "Invalid catalog: missing prices");
    }
}
