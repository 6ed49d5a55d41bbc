//! Server configuration

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::error::{Result, ServerError};

/// Transcoder configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscoderConfig {
    /// Path to the ffmpeg binary (looked up in PATH when bare)
    pub ffmpeg_path: String,

    /// Output container/codec passed to `-f`
    pub format: String,

    /// Extension used for the temporary output file
    pub extension: String,

    /// Output sample rate in Hz
    pub sample_rate: u32,

    /// Output channel count
    pub channels: u16,

    /// Kill the transcoder after this many seconds (None or 0 = no limit)
    pub timeout_secs: Option<u64>,

    /// Scratch directory for per-request files (None = OS temp dir)
    pub temp_dir: Option<PathBuf>,
}

impl Default for TranscoderConfig {
    fn default() -> Self {
        Self {
            ffmpeg_path: "ffmpeg".to_string(),
            format: "dfpwm".to_string(),
            extension: "dfpwm".to_string(),
            sample_rate: 48000, // ComputerCraft speaker rate
            channels: 1,
            timeout_secs: Some(300),
            temp_dir: None,
        }
    }
}

impl TranscoderConfig {
    /// Timeout as a Duration, if one is configured
    pub fn timeout(&self) -> Option<Duration> {
        match self.timeout_secs {
            Some(0) | None => None,
            Some(secs) => Some(Duration::from_secs(secs)),
        }
    }

    /// Resolve the scratch directory. Queried on every call, never cached.
    pub fn scratch_dir(&self) -> PathBuf {
        self.temp_dir.clone().unwrap_or_else(std::env::temp_dir)
    }

    /// Name offered to the client for the converted download
    pub fn download_name(&self) -> String {
        format!("converted.{}", self.extension)
    }
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host address to bind to
    pub host: String,

    /// Port to listen on
    pub port: u16,

    /// Enable CORS
    pub cors_enabled: bool,

    /// Maximum accepted request body in megabytes
    pub max_upload_mb: usize,

    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,

    /// Log output format (pretty, json)
    pub log_format: String,

    /// Transcoder configuration
    pub transcoder: TranscoderConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            cors_enabled: true,
            max_upload_mb: 100,
            log_level: "info".to_string(),
            log_format: "pretty".to_string(),
            transcoder: TranscoderConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Get the socket address string
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get maximum upload size in bytes
    pub fn max_upload_bytes(&self) -> usize {
        self.max_upload_mb * 1024 * 1024
    }

    /// Apply `HOST` / `PORT` overrides from the process environment
    pub fn apply_env(self) -> Result<Self> {
        self.apply_overrides(std::env::var("HOST").ok(), std::env::var("PORT").ok())
    }

    fn apply_overrides(mut self, host: Option<String>, port: Option<String>) -> Result<Self> {
        if let Some(host) = host.filter(|h| !h.is_empty()) {
            self.host = host;
        }
        if let Some(port) = port {
            self.port = port
                .trim()
                .parse()
                .map_err(|_| ServerError::Config(format!("invalid PORT value: {:?}", port)))?;
        }
        Ok(self)
    }
}
