//! Static dashboard assets.
//!
//! The prebuilt UI bundle is served read-only from a directory, with
//! unknown paths falling back to `index.html` so client-side routes work.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tower_http::services::{ServeDir, ServeFile};

/// Problems preparing the asset directory.
#[derive(Debug, Error)]
pub enum AssetError {
    #[error("Asset directory not found: {0}")]
    MissingDir(PathBuf),

    #[error("Asset directory {0} has no index.html")]
    MissingIndex(PathBuf),
}

/// Build the static file service for `dir`.
pub fn asset_service(dir: &Path) -> Result<ServeDir<ServeFile>, AssetError> {
    if !dir.is_dir() {
        return Err(AssetError::MissingDir(dir.to_path_buf()));
    }
    let index = dir.join("index.html");
    if !index.is_file() {
        return Err(AssetError::MissingIndex(dir.to_path_buf()));
    }

    tracing::info!(dir = %dir.display(), "Serving dashboard assets");
    Ok(ServeDir::new(dir).fallback(ServeFile::new(index)))
}
