//! Per-request scratch files

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use uuid::Uuid;

/// The input/output pair owned by one conversion request.
///
/// Both paths are namespaced by a fresh request id. Neither file is created
/// here; whatever exists at either path is removed when the value drops.
#[derive(Debug)]
pub struct TempFiles {
    id: Uuid,
    input: PathBuf,
    output: PathBuf,
}

impl TempFiles {
    /// Allocate paths under `dir`: `<id>_input` and `<id>_output.<extension>`
    pub fn new(dir: &Path, extension: &str) -> Self {
        let id = Uuid::new_v4();
        Self {
            id,
            input: dir.join(format!("{}_input", id)),
            output: dir.join(format!("{}_output.{}", id, extension)),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn input(&self) -> &Path {
        &self.input
    }

    pub fn output(&self) -> &Path {
        &self.output
    }
}

impl Drop for TempFiles {
    fn drop(&mut self) {
        for path in [&self.input, &self.output] {
            match std::fs::remove_file(path) {
                Ok(()) => debug!(request_id = %self.id, path = %path.display(), "removed temp file"),
                Err(e) if e.kind() == ErrorKind::NotFound => {}
                Err(e) => warn!(
                    request_id = %self.id,
                    path = %path.display(),
                    error = %e,
                    "failed to remove temp file"
                ),
            }
        }
    }
}
