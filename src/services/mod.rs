// Service exports
pub mod classifier;
pub mod storage;

pub use classifier::{ClassifierClient, ClassifierError};
pub use storage::{UploadStore, StorageError};
