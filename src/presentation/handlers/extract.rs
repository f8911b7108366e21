use axum::Json;
use axum::extract::multipart::Field;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use crate::application::ports::FileLoaderError;
use crate::application::services::IngestionError;
use crate::domain::ContentType;
use crate::presentation::state::AppState;

use super::error_response::error_response;

const FILE_FIELD: &str = "file";

#[derive(Debug, Serialize, Deserialize)]
pub struct ExtractResponse {
    pub message: String,
}

#[tracing::instrument(skip(state, multipart))]
pub async fn extract_text_handler(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Response {
    loop {
        match multipart.next_field().await {
            Ok(Some(field)) if field.name() == Some(FILE_FIELD) => {
                return extract_field(&state, field).await;
            }
            Ok(Some(_)) => continue,
            Ok(None) => {
                tracing::warn!("Extraction request without a file field");
                return error_response(StatusCode::BAD_REQUEST, "No file uploaded.");
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read multipart body");
                return error_response(e.status(), "Failed to read the uploaded file.");
            }
        }
    }
}

async fn extract_field(state: &AppState, field: Field<'_>) -> Response {
    let filename = field.file_name().unwrap_or("upload.pdf").to_string();
    let mime = field.content_type().map(String::from);

    let Some(content_type) = ContentType::from_upload(mime.as_deref(), &filename) else {
        tracing::warn!(filename = %filename, content_type = ?mime, "Rejected non-PDF upload");
        return error_response(
            StatusCode::UNSUPPORTED_MEDIA_TYPE,
            "Only PDF files are supported.",
        );
    };

    let data = match field.bytes().await {
        Ok(data) => data,
        Err(e) => {
            tracing::warn!(error = %e, "Failed to read file bytes");
            let status = e.status();
            let detail = if status == StatusCode::PAYLOAD_TOO_LARGE {
                "The uploaded file is too large."
            } else {
                "Failed to read the uploaded file."
            };
            return error_response(status, detail);
        }
    };

    if data.is_empty() {
        return error_response(StatusCode::BAD_REQUEST, "The uploaded file is empty.");
    }

    tracing::debug!(filename = %filename, bytes = data.len(), "File received");

    match state
        .ingestion_service
        .ingest(&data, filename, content_type)
        .await
    {
        Ok(_) => (
            StatusCode::OK,
            Json(ExtractResponse {
                message: "Text extracted and stored successfully.".to_string(),
            }),
        )
            .into_response(),
        Err(IngestionError::Extraction(FileLoaderError::UnsupportedContentType(mime))) => {
            tracing::warn!(content_type = %mime, "Loader rejected content type");
            error_response(
                StatusCode::UNSUPPORTED_MEDIA_TYPE,
                "Only PDF files are supported.",
            )
        }
        Err(e) => {
            tracing::error!(error = %e, "Text extraction failed");
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to extract and store text from the PDF.",
            )
        }
    }
}
