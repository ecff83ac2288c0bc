use showroom_storage::{CatalogueStore, SqliteStore, UserRecord};

use crate::error::EngineError;

/// Access to the persisted account row, memoizing successful reads so
/// repeated profile lookups skip the table.
pub struct ProfileManager {
    store: SqliteStore,
    cached: Option<UserRecord>,
}

impl ProfileManager {
    pub fn new(store: SqliteStore) -> Self {
        Self {
            store,
            cached: None,
        }
    }

    pub fn get(&mut self) -> Result<Option<UserRecord>, EngineError> {
        if let Some(user) = &self.cached {
            return Ok(Some(user.clone()));
        }
        let user = self.store.fetch_user()?;
        if let Some(user) = &user {
            self.cached = Some(user.clone());
        }
        Ok(user)
    }

    pub fn save(&mut self, user: UserRecord) -> Result<(), EngineError> {
        self.store.save_user(&user)?;
        self.cached = Some(user);
        Ok(())
    }

    /// Attach an image to the stored account. A signed-out save is a no-op.
    pub fn set_profile_image(&mut self, image: Vec<u8>) -> Result<(), EngineError> {
        self.store.save_profile_image(&image)?;
        if let Some(user) = &mut self.cached {
            user.profile_image = Some(image);
        }
        Ok(())
    }

    pub fn clear(&mut self) -> Result<(), EngineError> {
        self.store.delete_user()?;
        self.cached = None;
        Ok(())
    }

    pub fn is_logged_in(&mut self) -> Result<bool, EngineError> {
        Ok(self.get()?.is_some())
    }
}
