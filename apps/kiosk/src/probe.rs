//! # Image Existence Probe
//!
//! Answers whether an image path resolves before it is shown.
//!
//! Image paths in the catalog are page-relative (`./images/...`). The
//! filesystem probe resolves them under the configured asset root.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::trace;

/// Checks that an image exists.
#[async_trait]
pub trait ImageProbe: Send + Sync {
    async fn exists(&self, path: &str) -> bool;
}

/// Looks for image files under an asset root.
#[derive(Debug, Clone)]
pub struct FsImageProbe {
    root: PathBuf,
}

impl FsImageProbe {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        FsImageProbe { root: root.into() }
    }

    /// Maps a page-relative image path onto the asset root.
    pub fn locate(&self, path: &str) -> PathBuf {
        let relative = path.trim_start_matches("./").trim_start_matches('/');
        self.root.join(Path::new(relative))
    }
}

#[async_trait]
impl ImageProbe for FsImageProbe {
    async fn exists(&self, path: &str) -> bool {
        let located = self.locate(path);
        let found = tokio::fs::metadata(&located)
            .await
            .map(|meta| meta.is_file())
            .unwrap_or(false);
        trace!(path = %located.display(), found, "Probed image");
        found
    }
}

/// Probe used when probing is switched off: every path exists.
#[derive(Debug, Clone, Copy, Default)]
pub struct AssumeExists;

#[async_trait]
impl ImageProbe for AssumeExists {
    async fn exists(&self, _path: &str) -> bool {
        true
    }
}
