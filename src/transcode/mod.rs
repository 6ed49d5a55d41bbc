//! Audio transcoding module
//!
//! Conversion is delegated to an external tool. This module provides:
//! - The `Transcoder` trait the HTTP layer calls into
//! - An ffmpeg-backed implementation with fixed output parameters
//! - Per-request scratch files that are removed on drop

pub mod ffmpeg;
pub mod temp;

use async_trait::async_trait;
use std::path::Path;

use crate::error::TranscodeError;

pub use ffmpeg::FfmpegTranscoder;
pub use temp::TempFiles;

/// Converts the file at `input` and writes the result to `output`.
///
/// Implementations own the output parameters (format, rate, channels).
/// An existing file at `output` is overwritten.
#[async_trait]
pub trait Transcoder: Send + Sync {
    async fn transcode(&self, input: &Path, output: &Path) -> Result<(), TranscodeError>;
}
