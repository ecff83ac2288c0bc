pub mod catalogue;
pub mod config;
pub mod document;
pub mod error;

pub use catalogue::{CatalogueSource, HttpCatalogueSource};
pub use config::ApiConfig;
pub use document::{DocumentSource, HttpDocumentSource};
pub use error::ApiError;
