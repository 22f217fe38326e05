use super::types::{ErrorResponse, HealthResponse, RecognizeResponse, RootResponse};
use crate::{
    Error, Result,
    recognition::{RecognitionRequest, Recognizer},
};
use axum::{
    extract::{Multipart, State, multipart::MultipartError},
    http::StatusCode,
    response::Json,
};
use std::sync::Arc;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

/// Name of the multipart field carrying the upload.
pub const IMAGE_FIELD: &str = "image";

#[derive(Clone)]
pub struct AppState {
    pub recognizer: Arc<dyn Recognizer>,
    pub allowed_extensions: Arc<Vec<String>>,
}

impl AppState {
    pub fn new(recognizer: Arc<dyn Recognizer>, allowed_extensions: Vec<String>) -> Self {
        Self {
            recognizer,
            allowed_extensions: Arc::new(allowed_extensions),
        }
    }
}

pub async fn root() -> Json<RootResponse> {
    Json(RootResponse {
        message: "Use /recognize".to_string(),
    })
}

pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let recognizer = state.recognizer.clone();
    let engine = recognizer.name().to_string();

    let probe = tokio::task::spawn_blocking(move || recognizer.version())
        .await
        .map_err(|e| Error::internal(format!("health probe panicked: {}", e)))
        .and_then(|result| result);

    match probe {
        Ok(version) => (
            StatusCode::OK,
            Json(HealthResponse {
                status: "ok".to_string(),
                engine,
                version: Some(version),
                error: None,
            }),
        ),
        Err(e) => {
            warn!("OCR engine unavailable: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(HealthResponse {
                    status: "unavailable".to_string(),
                    engine,
                    version: None,
                    error: Some(e.to_string()),
                }),
            )
        }
    }
}

pub async fn recognize(
    State(state): State<AppState>,
    multipart: Multipart,
) -> std::result::Result<Json<RecognizeResponse>, (StatusCode, Json<ErrorResponse>)> {
    let request_id = Uuid::new_v4();

    match process(&state, multipart, request_id).await {
        Ok(text) => {
            info!(%request_id, chars = text.len(), "Recognition succeeded");
            Ok(Json(RecognizeResponse { text }))
        }
        Err(e) => {
            if e.is_client_error() {
                warn!(%request_id, "Rejected recognition request: {}", e);
            } else {
                error!(%request_id, "Recognition failed: {}", e);
            }
            Err((
                e.status_code(),
                Json(ErrorResponse {
                    error: e.to_string(),
                }),
            ))
        }
    }
}

async fn process(state: &AppState, multipart: Multipart, request_id: Uuid) -> Result<String> {
    let request = read_image_field(multipart).await?;
    info!(
        %request_id,
        filename = request.filename.as_deref().unwrap_or("<none>"),
        content_type = request.content_type.as_deref().unwrap_or("<none>"),
        bytes = request.bytes.len(),
        "Received recognition request"
    );

    request.check_extension(&state.allowed_extensions)?;
    let image = request.decode()?;
    drop(request);

    let recognizer = state.recognizer.clone();
    debug!(%request_id, engine = recognizer.name(), "Dispatching to OCR engine");

    tokio::task::spawn_blocking(move || recognizer.extract_text(&image))
        .await
        .map_err(|e| Error::internal(format!("recognition task panicked: {}", e)))?
}

/// Pulls the `image` field out of the form. Any other field is skipped.
async fn read_image_field(mut multipart: Multipart) -> Result<RecognitionRequest> {
    while let Some(field) = multipart.next_field().await.map_err(upload_error)? {
        if field.name() != Some(IMAGE_FIELD) {
            debug!("Ignoring multipart field {:?}", field.name());
            continue;
        }

        let filename = field.file_name().map(str::to_string);
        let content_type = field.content_type().map(str::to_string);
        let bytes = field.bytes().await.map_err(upload_error)?;

        let mut request = RecognitionRequest::new(bytes.to_vec());
        request.filename = filename;
        request.content_type = content_type;
        return Ok(request);
    }

    Err(Error::MissingImage)
}

fn upload_error(e: MultipartError) -> Error {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        Error::PayloadTooLarge
    } else {
        Error::invalid_upload(e.body_text())
    }
}
