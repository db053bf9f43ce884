// Model exports
pub mod domain;
pub mod responses;

pub use domain::{UploadedFile, Prediction, Category, Partner, Disposal};
pub use responses::{UploadResponse, HealthResponse, ErrorResponse};
