pub mod client;
pub mod source;

pub use client::{disk_store, item, TestClient};
pub use source::{ScriptedDocuments, ScriptedSource};
