//! Implements a struct that holds the state of the REST server.

use std::{path::PathBuf, sync::Arc};

use axum::extract::FromRef;

use crate::statement::NoiseMarkers;

/// The state of the REST server.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The directory where uploaded statements are kept while they are processed.
    pub upload_dir: PathBuf,

    /// The header and footer markers of the statement template.
    pub noise_markers: Arc<NoiseMarkers>,
}

impl AppState {
    /// Create a new [AppState].
    ///
    /// `upload_dir` should already exist.
    pub fn new(upload_dir: impl Into<PathBuf>, noise_markers: NoiseMarkers) -> Self {
        Self {
            upload_dir: upload_dir.into(),
            noise_markers: Arc::new(noise_markers),
        }
    }
}

/// The state needed for converting uploaded statements.
#[derive(Debug, Clone)]
pub struct UploadState {
    /// The directory where uploaded statements are kept while they are processed.
    pub upload_dir: PathBuf,
    /// The header and footer markers of the statement template.
    pub noise_markers: Arc<NoiseMarkers>,
}

impl FromRef<AppState> for UploadState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            upload_dir: state.upload_dir.clone(),
            noise_markers: state.noise_markers.clone(),
        }
    }
}
