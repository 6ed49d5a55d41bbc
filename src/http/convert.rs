//! Conversion endpoint
//!
//! `POST /` with a multipart `file` part. The upload is written to a scratch
//! file, run through the transcoder and the result is returned as an
//! attachment. Both scratch files are gone by the time the handler returns.

use axum::{
    extract::{
        multipart::{Field, MultipartRejection},
        Multipart, State,
    },
    http::{header, HeaderMap, HeaderValue},
    response::{IntoResponse, Response},
};
use bytes::Bytes;
use std::sync::Arc;
use std::time::Instant;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info, info_span, warn, Instrument};

use super::handlers::ApiError;
use crate::state::AppState;
use crate::transcode::TempFiles;

/// Name of the multipart part carrying the audio
const FILE_FIELD: &str = "file";

/// Convert uploaded audio
/// POST /
pub async fn convert_audio(
    State(state): State<Arc<AppState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Response, ApiError> {
    let mut multipart = multipart.map_err(|rejection| {
        debug!("not a multipart request: {}", rejection.body_text());
        ApiError::NoFileUploaded
    })?;

    // First `file` part with a filename wins; other parts are skipped.
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        let Some(file_name) = field.file_name() else {
            continue;
        };
        if file_name.is_empty() {
            return Err(ApiError::NoFileSelected);
        }

        let files = TempFiles::new(
            &state.config.transcoder.scratch_dir(),
            &state.config.transcoder.extension,
        );
        let span = info_span!("convert", request_id = %files.id());
        return convert_upload(&state, field, files).instrument(span).await;
    }

    Err(ApiError::NoFileUploaded)
}

/// Run one conversion. `files` is dropped on every path out of here,
/// which deletes the scratch files.
///
/// If the client disconnects mid-conversion this future is dropped and the
/// transcoder is killed (`kill_on_drop`) instead of running to completion.
async fn convert_upload(
    state: &AppState,
    field: Field<'_>,
    files: TempFiles,
) -> Result<Response, ApiError> {
    let start = Instant::now();
    let original_name = field.file_name().unwrap_or_default().to_string();

    let received = save_upload(field, &files).await?;
    info!(file_name = %original_name, bytes = received, "upload received");

    if let Err(e) = state
        .transcoder
        .transcode(files.input(), files.output())
        .await
    {
        warn!(error = %e, "conversion failed");
        return Err(ApiError::ConversionFailed(e.diagnostics()));
    }

    let data = Bytes::from(tokio::fs::read(files.output()).await?);
    info!(
        bytes = data.len(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "conversion finished"
    );

    let disposition = format!(
        "attachment; filename=\"{}\"",
        state.config.transcoder.download_name()
    );
    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/octet-stream"),
    );
    headers.insert(
        header::CONTENT_DISPOSITION,
        HeaderValue::from_str(&disposition)
            .map_err(|e| ApiError::Internal(format!("bad download name: {}", e)))?,
    );

    Ok((headers, data).into_response())
}

/// Stream the part's bytes verbatim into the input scratch file
async fn save_upload(mut field: Field<'_>, files: &TempFiles) -> Result<usize, ApiError> {
    let mut file = tokio::fs::File::create(files.input()).await?;
    let mut written = 0;

    while let Some(chunk) = field.chunk().await? {
        file.write_all(&chunk).await?;
        written += chunk.len();
    }
    file.flush().await?;

    Ok(written)
}
