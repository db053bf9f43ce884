use crate::models::{Prediction, UploadedFile};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, StatusCode};
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// Errors that can occur when talking to the ML classifier
#[derive(Debug, Error)]
pub enum ClassifierError {
    #[error("ML service unreachable: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("ML service failed: {body}")]
    ApiError { status: StatusCode, body: String },

    #[error("Invalid response from ML service: {0}")]
    InvalidResponse(String),

    #[error("Missing prediction from ML service")]
    MissingPrediction,
}

/// Client for the remote image classifier
///
/// The image is sent as a multipart `file` field and the service answers with
/// `{"prediction": "...", "confidence": 0.9, "probabilities": {...}}` where
/// both `confidence` and `probabilities` are optional.
pub struct ClassifierClient {
    url: String,
    client: Client,
}

impl ClassifierClient {
    /// Create a new classifier client with a bounded request timeout
    pub fn new(url: String, timeout: Duration) -> Result<Self, ClassifierError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self { url, client })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Forward an uploaded image as `file_name` and return the prediction
    pub async fn classify(
        &self,
        file_name: &str,
        file: &UploadedFile,
    ) -> Result<Prediction, ClassifierError> {
        let content_type = file.content_type.as_deref().unwrap_or(DEFAULT_CONTENT_TYPE);
        let part = Part::stream_with_length(file.bytes.clone(), file.len() as u64)
            .file_name(file_name.to_string())
            .mime_str(content_type)?;
        let form = Form::new().part("file", part);

        tracing::debug!("Forwarding {} ({} bytes) to {}", file_name, file.len(), self.url);

        let response = self.client.post(&self.url).multipart(form).send().await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            tracing::error!("ML service returned {} for {}: {}", status, file_name, body);
            return Err(ClassifierError::ApiError { status, body });
        }

        parse_prediction(&body)
    }
}

/// Parse and normalize a classifier response body
///
/// Confidence is taken from `confidence` when it is a number, otherwise from
/// `probabilities[prediction]`, otherwise it is `None`. A missing confidence
/// never fails the request.
pub fn parse_prediction(body: &str) -> Result<Prediction, ClassifierError> {
    let json: Value = serde_json::from_str(body)
        .map_err(|e| ClassifierError::InvalidResponse(format!("body is not JSON: {}", e)))?;

    if !json.is_object() {
        return Err(ClassifierError::InvalidResponse(
            "expected a JSON object".to_string(),
        ));
    }

    let label = match json.get("prediction") {
        Some(Value::String(label)) if !label.trim().is_empty() => label.clone(),
        Some(Value::String(_)) | Some(Value::Null) | None => {
            return Err(ClassifierError::MissingPrediction)
        }
        Some(other) => {
            return Err(ClassifierError::InvalidResponse(format!(
                "prediction is not a string: {}",
                other
            )))
        }
    };

    let confidence = json
        .get("confidence")
        .and_then(Value::as_f64)
        .or_else(|| {
            json.get("probabilities")
                .and_then(|p| p.get(&label))
                .and_then(Value::as_f64)
        });

    Ok(Prediction { label, confidence })
}
