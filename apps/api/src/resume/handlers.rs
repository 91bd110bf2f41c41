//! Axum route handlers for resume uploads.

use axum::{
    extract::{multipart::MultipartError, Multipart, State},
    http::StatusCode,
    Json,
};
use bytes::Bytes;
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::resume::ResumeRecord;
use crate::resume::extract::DocumentFormat;
use crate::state::AppState;

/// Multipart field carrying the uploaded document.
const RESUME_FIELD: &str = "resume";

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub message: String,
    pub upload_id: Uuid,
    pub html_content: String,
    pub extracted_data: ResumeRecord,
}

struct ResumeUpload {
    filename: String,
    data: Bytes,
}

/// POST /api/upload_resume
///
/// Parses the `resume` part (PDF or DOCX) and renders it with the configured
/// portfolio template. Nothing is written to disk.
pub async fn handle_upload_resume(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<UploadResponse>, AppError> {
    let upload_id = Uuid::new_v4();
    let upload = read_resume_field(multipart).await?;

    let format = DocumentFormat::from_filename(&upload.filename).map_err(|e| {
        warn!("Upload {upload_id} with disallowed file type: {}", upload.filename);
        AppError::from(e)
    })?;

    info!(
        "Upload {upload_id}: processing {} ({} bytes, {:?})",
        upload.filename,
        upload.data.len(),
        format
    );

    let parser = state.parser.clone();
    let renderer = state.renderer.clone();
    let (record, html) = tokio::task::spawn_blocking(move || -> Result<_, AppError> {
        let record = parser.parse_bytes(&upload.data, format)?;
        let html = renderer.render(&record)?;
        Ok((record, html))
    })
    .await
    .map_err(|e| {
        AppError::Internal(anyhow::anyhow!(
            "spawn_blocking failed in resume parsing: {e}"
        ))
    })??;

    info!("Upload {upload_id}: resume processed successfully");

    Ok(Json(UploadResponse {
        message: "Resume uploaded and processed successfully.".to_string(),
        upload_id,
        html_content: html,
        extracted_data: record,
    }))
}

/// Pulls the first `resume` part out of the form; other parts are skipped.
async fn read_resume_field(mut multipart: Multipart) -> Result<ResumeUpload, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error(e, "Malformed multipart body"))?
    {
        if field.name() != Some(RESUME_FIELD) {
            continue;
        }

        let filename = field.file_name().unwrap_or_default().trim().to_string();
        if filename.is_empty() {
            return Err(AppError::Validation("No selected file".to_string()));
        }

        let data = field
            .bytes()
            .await
            .map_err(|e| multipart_error(e, "Could not read uploaded file"))?;

        return Ok(ResumeUpload { filename, data });
    }

    Err(AppError::Validation(
        "No resume file part in the request".to_string(),
    ))
}

/// Oversized bodies keep their 413; every other multipart failure is a bad request.
fn multipart_error(err: MultipartError, context: &str) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        warn!("Upload rejected: {}", err.body_text());
        AppError::PayloadTooLarge(err.body_text())
    } else {
        AppError::Validation(format!("{context}: {err}"))
    }
}
