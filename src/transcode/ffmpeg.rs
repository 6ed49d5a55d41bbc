//! ffmpeg process runner
//!
//! Spawns one ffmpeg process per conversion with the output parameters fixed
//! by `TranscoderConfig`. Stderr is captured and handed back on failure.

use async_trait::async_trait;
use std::ffi::OsString;
use std::path::Path;
use std::process::Stdio;
use std::time::Instant;
use tokio::process::Command;
use tracing::{debug, warn};

use super::Transcoder;
use crate::config::TranscoderConfig;
use crate::error::TranscodeError;

/// Transcoder that shells out to ffmpeg
#[derive(Debug, Clone)]
pub struct FfmpegTranscoder {
    config: TranscoderConfig,
}

impl FfmpegTranscoder {
    pub fn new(config: TranscoderConfig) -> Self {
        Self { config }
    }

    pub fn program(&self) -> &str {
        &self.config.ffmpeg_path
    }

    /// Build the ffmpeg argument list for one conversion
    pub fn build_args(&self, input: &Path, output: &Path) -> Vec<OsString> {
        let mut args: Vec<OsString> = Vec::with_capacity(12);
        args.push("-nostdin".into());
        args.push("-y".into());
        args.push("-i".into());
        args.push(input.as_os_str().to_owned());
        args.push("-f".into());
        args.push(self.config.format.clone().into());
        args.push("-ar".into());
        args.push(self.config.sample_rate.to_string().into());
        args.push("-ac".into());
        args.push(self.config.channels.to_string().into());
        args.push(output.as_os_str().to_owned());
        args
    }

    /// First line of `ffmpeg -version`, or None if the binary can't be run
    pub async fn version(&self) -> Option<String> {
        let output = Command::new(&self.config.ffmpeg_path)
            .arg("-version")
            .stdin(Stdio::null())
            .stderr(Stdio::null())
            .output()
            .await
            .ok()?;

        if !output.status.success() {
            return None;
        }
        String::from_utf8_lossy(&output.stdout)
            .lines()
            .next()
            .map(|line| line.trim().to_string())
    }
}

#[async_trait]
impl Transcoder for FfmpegTranscoder {
    async fn transcode(&self, input: &Path, output: &Path) -> Result<(), TranscodeError> {
        let args = self.build_args(input, output);
        debug!(program = %self.config.ffmpeg_path, ?args, "spawning transcoder");

        // kill_on_drop: a timed-out or abandoned conversion must not outlive the request
        let child = Command::new(&self.config.ffmpeg_path)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| TranscodeError::Spawn {
                program: self.config.ffmpeg_path.clone(),
                source,
            })?;

        let start = Instant::now();
        let result = match self.config.timeout() {
            Some(limit) => match tokio::time::timeout(limit, child.wait_with_output()).await {
                Ok(result) => result?,
                Err(_) => {
                    warn!(timeout_secs = limit.as_secs(), "transcoder timed out, killing it");
                    return Err(TranscodeError::Timeout(limit.as_secs()));
                }
            },
            None => child.wait_with_output().await?,
        };
        let elapsed_ms = start.elapsed().as_millis() as u64;

        if result.status.success() {
            debug!(elapsed_ms, "transcoder finished");
            Ok(())
        } else {
            let stderr = String::from_utf8_lossy(&result.stderr).into_owned();
            debug!(elapsed_ms, status = %result.status, "transcoder failed");
            Err(TranscodeError::Failed {
                status: result.status,
                stderr,
            })
        }
    }
}
