use actix_web::web::Bytes;
use serde::{Deserialize, Serialize};
use std::fmt;

/// File received in the `file` field of an upload request
#[derive(Debug, Clone)]
pub struct UploadedFile {
    /// Filename as sent by the client, if any
    pub filename: Option<String>,
    /// Declared MIME type, if any
    pub content_type: Option<String>,
    pub bytes: Bytes,
}

impl UploadedFile {
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Normalized answer of the ML classifier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    /// Label exactly as the classifier returned it
    pub label: String,
    pub confidence: Option<f64>,
}

/// Coarse disposal class derived from a raw label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Recyclable,
    Biodegradable,
    #[serde(rename = "Non-Recyclable")]
    NonRecyclable,
    Hazardous,
    Unknown,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Recyclable => "Recyclable",
            Category::Biodegradable => "Biodegradable",
            Category::NonRecyclable => "Non-Recyclable",
            Category::Hazardous => "Hazardous",
            Category::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Organization that handles a category of waste
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Partner {
    pub name: String,
    pub contact: String,
}

impl Partner {
    pub fn new(name: impl Into<String>, contact: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            contact: contact.into(),
        }
    }

    /// Returned when no partner is registered for a category
    pub fn unknown() -> Self {
        Self::new("Unknown", "N/A")
    }
}

/// Category, partner and advice resolved for a label
#[derive(Debug, Clone, PartialEq)]
pub struct Disposal {
    pub category: Category,
    pub partner: Partner,
    pub advice: String,
}
