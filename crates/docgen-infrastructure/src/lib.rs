//! Infrastructure layer: configuration storage and local collaborators.

pub mod config_service;
pub mod document_exporter;
pub mod paths;
pub mod structure_responder;
pub mod upload;

pub use config_service::ConfigService;
pub use document_exporter::{JsonDocumentExporter, filled_document};
pub use paths::{DocgenPaths, PathError};
pub use structure_responder::JsonStructureResponder;
pub use upload::LocalFileUploader;
