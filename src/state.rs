//! Application state
//!
//! Immutable per-process data shared by all handlers: the server
//! configuration and the transcoder. Nothing in here is mutated after
//! startup, so requests never coordinate with each other.

use std::sync::Arc;

use crate::config::ServerConfig;
use crate::transcode::{FfmpegTranscoder, Transcoder};

/// Shared application state
pub struct AppState {
    /// Server configuration
    pub config: ServerConfig,

    /// Transcoder invoked once per conversion request
    pub transcoder: Arc<dyn Transcoder>,
}

impl AppState {
    /// Create state around an explicit transcoder
    pub fn new(config: ServerConfig, transcoder: Arc<dyn Transcoder>) -> Self {
        Self { config, transcoder }
    }

    /// Create state with the ffmpeg transcoder described by `config`
    pub fn with_ffmpeg(config: ServerConfig) -> Self {
        let transcoder = Arc::new(FfmpegTranscoder::new(config.transcoder.clone()));
        Self::new(config, transcoder)
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
