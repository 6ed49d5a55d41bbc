//! Configuration file support
//!
//! Loads server configuration from TOML files.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::config::{ServerConfig, TranscoderConfig};

/// Configuration file format
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigFile {
    /// Server settings
    pub server: ServerSettings,
    /// Transcoder settings
    pub transcoder: Option<TranscoderSettings>,
    /// Logging settings
    pub logging: Option<LoggingSettings>,
    /// Limits settings
    pub limits: Option<LimitsSettings>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSettings {
    /// Host address to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Enable CORS
    pub cors_enabled: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscoderSettings {
    /// Path to the ffmpeg binary
    pub ffmpeg_path: Option<String>,
    /// Output format passed to ffmpeg
    pub format: Option<String>,
    /// Extension of the converted file
    pub extension: Option<String>,
    /// Output sample rate in Hz
    pub sample_rate: Option<u32>,
    /// Output channel count
    pub channels: Option<u16>,
    /// Transcoder timeout in seconds (0 disables)
    pub timeout_secs: Option<u64>,
    /// Scratch directory for uploads and outputs
    pub temp_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
    /// Output format (json, pretty)
    pub format: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LimitsSettings {
    /// Maximum request body size in MB
    pub max_request_size_mb: Option<usize>,
}

impl ConfigFile {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn std::error::Error>> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config: ConfigFile = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), Box<dyn std::error::Error>> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path.as_ref(), content)?;
        Ok(())
    }

    /// Generate default configuration file
    pub fn default_config() -> Self {
        let transcoder = TranscoderConfig::default();
        Self {
            server: ServerSettings {
                host: "0.0.0.0".to_string(),
                port: 5000,
                cors_enabled: Some(true),
            },
            transcoder: Some(TranscoderSettings {
                ffmpeg_path: Some(transcoder.ffmpeg_path),
                format: Some(transcoder.format),
                extension: Some(transcoder.extension),
                sample_rate: Some(transcoder.sample_rate),
                channels: Some(transcoder.channels),
                timeout_secs: transcoder.timeout_secs,
                temp_dir: None,
            }),
            logging: Some(LoggingSettings {
                level: "info".to_string(),
                format: Some("pretty".to_string()),
            }),
            limits: Some(LimitsSettings {
                max_request_size_mb: Some(100),
            }),
        }
    }

    /// Convert to ServerConfig
    pub fn into_server_config(self) -> ServerConfig {
        let defaults = ServerConfig::default();
        let base = defaults.transcoder.clone();

        let transcoder = match self.transcoder {
            Some(t) => TranscoderConfig {
                ffmpeg_path: t.ffmpeg_path.unwrap_or(base.ffmpeg_path),
                format: t.format.unwrap_or(base.format),
                extension: t.extension.unwrap_or(base.extension),
                sample_rate: t.sample_rate.unwrap_or(base.sample_rate),
                channels: t.channels.unwrap_or(base.channels),
                timeout_secs: t.timeout_secs.or(base.timeout_secs),
                temp_dir: t.temp_dir,
            },
            None => base,
        };

        let (log_level, log_format) = match self.logging {
            Some(l) => (l.level, l.format.unwrap_or(defaults.log_format)),
            None => (defaults.log_level, defaults.log_format),
        };

        ServerConfig {
            host: self.server.host,
            port: self.server.port,
            cors_enabled: self.server.cors_enabled.unwrap_or(true),
            max_upload_mb: self
                .limits
                .and_then(|l| l.max_request_size_mb)
                .unwrap_or(defaults.max_upload_mb),
            log_level,
            log_format,
            transcoder,
        }
    }
}

/// Generate default configuration file at the specified path
pub fn generate_default_config<P: AsRef<Path>>(path: P) -> Result<(), Box<dyn std::error::Error>> {
    let config = ConfigFile::default_config();
    config.to_file(path)?;
    Ok(())
}
