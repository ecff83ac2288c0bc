pub mod draft;
pub mod error;
pub mod field_value;
pub mod item;
pub mod validate;

pub use draft::ItemDraft;
pub use error::CoreError;
pub use field_value::FieldValue;
pub use item::CatalogueItem;
pub use validate::Validation;
