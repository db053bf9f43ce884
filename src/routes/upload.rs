use actix_multipart::Multipart;
use actix_web::web::BytesMut;
use actix_web::{web, HttpResponse, Responder};
use futures_util::TryStreamExt;
use crate::core::{storage_name, DisposalCatalog};
use crate::error::ApiError;
use crate::models::{HealthResponse, UploadResponse, UploadedFile};
use crate::services::{ClassifierClient, UploadStore};
use std::sync::Arc;

const FILE_FIELD: &str = "file";

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<UploadStore>,
    pub classifier: Arc<ClassifierClient>,
    pub catalog: Arc<DisposalCatalog>,
    pub limits: UploadLimits,
}

/// Per-upload constraints taken from configuration
#[derive(Debug, Clone)]
pub struct UploadLimits {
    pub default_extension: String,
    pub max_bytes: usize,
}

/// Configure upload and health routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/upload", web::post().to(upload_image));
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let status = if state.store.is_available().await { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Upload an image and classify it
///
/// POST /api/upload
///
/// Multipart body with a single `file` field. Response body:
/// ```json
/// {
///   "filename": "<uuid>.jpg",
///   "predicted_class": "plastic",
///   "confidence": 0.91,
///   "category": "Recyclable",
///   "partner": {"name": "TerraCycle", "contact": "terracycle@example.org"},
///   "advice": "Rinse and dry before recycling. Flatten boxes to save space."
/// }
/// ```
async fn upload_image(
    state: web::Data<AppState>,
    payload: Multipart,
) -> Result<HttpResponse, ApiError> {
    let file = read_file_field(payload, state.limits.max_bytes).await?;

    tracing::info!(
        "Received upload {:?} ({} bytes, {:?})",
        file.filename,
        file.len(),
        file.content_type
    );

    let response = process_upload(&state, file).await?;

    tracing::info!(
        "Classified {} as {} ({})",
        response.filename,
        response.predicted_class,
        response.category
    );

    Ok(HttpResponse::Ok().json(response))
}

/// Store, classify and resolve one uploaded file
pub async fn process_upload(state: &AppState, file: UploadedFile) -> Result<UploadResponse, ApiError> {
    let filename = storage_name(file.filename.as_deref(), &state.limits.default_extension);

    state.store.save(&filename, &file.bytes).await?;

    let forwarded_name = file.filename.as_deref().unwrap_or(&filename);
    let prediction = state.classifier.classify(forwarded_name, &file).await?;

    let disposal = state.catalog.resolve(&prediction.label);

    Ok(UploadResponse {
        filename,
        predicted_class: prediction.label,
        confidence: prediction.confidence,
        category: disposal.category,
        partner: disposal.partner,
        advice: disposal.advice,
    })
}

/// Pull the single `file` field out of a multipart body
///
/// Other fields are drained and ignored. A missing or repeated `file` field is
/// rejected, as is a file larger than `max_bytes`.
async fn read_file_field(mut payload: Multipart, max_bytes: usize) -> Result<UploadedFile, ApiError> {
    let mut upload: Option<UploadedFile> = None;

    while let Some(mut field) = payload.try_next().await? {
        if field.name() != Some(FILE_FIELD) {
            while field.try_next().await?.is_some() {}
            continue;
        }

        if upload.is_some() {
            return Err(ApiError::BadRequest(
                "expected exactly one `file` field".to_string(),
            ));
        }

        let filename = field
            .content_disposition()
            .and_then(|cd| cd.get_filename())
            .filter(|name| !name.is_empty())
            .map(str::to_string);
        let content_type = field.content_type().map(|mime| mime.to_string());

        let mut bytes = BytesMut::new();
        while let Some(chunk) = field.try_next().await? {
            if bytes.len() + chunk.len() > max_bytes {
                return Err(ApiError::PayloadTooLarge { limit: max_bytes });
            }
            bytes.extend_from_slice(&chunk);
        }

        upload = Some(UploadedFile {
            filename,
            content_type,
            bytes: bytes.freeze(),
        });
    }

    upload.ok_or_else(|| ApiError::BadRequest("missing `file` field".to_string()))
}
