// Core pipeline exports
pub mod catalog;
pub mod naming;

pub use catalog::DisposalCatalog;
pub use naming::{file_extension, storage_name};
