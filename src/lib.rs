//! EcoScan - waste image classification gateway
//!
//! Accepts an uploaded image, stores it locally, forwards it to the remote ML
//! classifier and enriches the predicted label with disposal category,
//! recycling partner and advice from static tables.

pub mod config;
pub mod core;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{DisposalCatalog, storage_name};
pub use error::ApiError;
pub use models::{Category, Partner, Prediction, UploadResponse};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        let disposal = DisposalCatalog::default().resolve("cardboard");
        assert_eq!(disposal.category, Category::Recyclable);
    }
}
