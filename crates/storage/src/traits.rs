use crate::error::StorageError;

/// A persisted catalogue row. The field map rides along as an opaque
/// blob; encoding and decoding it is the caller's business.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemRecord {
    pub id: String,
    pub name: String,
    pub fields: Option<Vec<u8>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    pub uid: String,
    pub email: Option<String>,
    pub display_name: Option<String>,
    pub profile_image: Option<Vec<u8>>,
}

pub trait CatalogueStore {
    /// All cached rows, in the order the remote catalogue listed them.
    fn fetch_items(&self) -> Result<Vec<ItemRecord>, StorageError>;

    fn fetch_item(&self, id: &str) -> Result<Option<ItemRecord>, StorageError>;

    /// Rewrite the whole table to mirror a fresh remote snapshot. Rows
    /// absent from `items` are pruned.
    fn replace_catalogue(&mut self, items: &[ItemRecord]) -> Result<(), StorageError>;

    /// Returns false when no row with the item's id exists.
    fn update_item(&mut self, item: &ItemRecord) -> Result<bool, StorageError>;

    /// Returns false when no row with this id exists.
    fn delete_item(&mut self, id: &str) -> Result<bool, StorageError>;

    fn delete_all_items(&mut self) -> Result<(), StorageError>;

    fn fetch_user(&self) -> Result<Option<UserRecord>, StorageError>;

    /// Store the signed-in account. At most one row is kept.
    fn save_user(&mut self, user: &UserRecord) -> Result<(), StorageError>;

    /// Attach an image to the stored account. No-op when signed out.
    fn save_profile_image(&mut self, image: &[u8]) -> Result<(), StorageError>;

    fn delete_user(&mut self) -> Result<(), StorageError>;
}
