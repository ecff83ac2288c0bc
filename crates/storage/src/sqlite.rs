use rusqlite::Connection;

use crate::error::StorageError;
use crate::traits::{CatalogueStore, ItemRecord, UserRecord};

pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    pub fn open(path: &str) -> Result<Self, StorageError> {
        let conn = Connection::open(path)?;
        crate::schema::init_schema(&conn)?;
        Ok(Self { conn })
    }

    pub fn open_in_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory()?;
        crate::schema::init_schema(&conn)?;
        Ok(Self { conn })
    }

    /// Raw connection, for maintenance queries and test setup.
    pub fn conn(&self) -> &Connection {
        &self.conn
    }
}

fn read_item(row: &rusqlite::Row) -> Result<ItemRecord, rusqlite::Error> {
    Ok(ItemRecord {
        id: row.get(0)?,
        name: row.get(1)?,
        fields: row.get(2)?,
    })
}

fn read_user(row: &rusqlite::Row) -> Result<UserRecord, rusqlite::Error> {
    Ok(UserRecord {
        uid: row.get(0)?,
        email: row.get(1)?,
        display_name: row.get(2)?,
        profile_image: row.get(3)?,
    })
}

impl CatalogueStore for SqliteStore {
    fn fetch_items(&self) -> Result<Vec<ItemRecord>, StorageError> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name, fields FROM catalogue_items ORDER BY rowid")?;
        let items = stmt
            .query_map([], read_item)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(items)
    }

    fn fetch_item(&self, id: &str) -> Result<Option<ItemRecord>, StorageError> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name, fields FROM catalogue_items WHERE id = ?1")?;
        let mut rows = stmt.query_map(rusqlite::params![id], read_item)?;
        match rows.next() {
            Some(Ok(item)) => Ok(Some(item)),
            Some(Err(e)) => Err(StorageError::Sqlite(e)),
            None => Ok(None),
        }
    }

    fn replace_catalogue(&mut self, items: &[ItemRecord]) -> Result<(), StorageError> {
        let tx = self.conn.transaction()?;
        tx.execute("DELETE FROM catalogue_items", [])?;
        for item in items {
            // rowid follows insertion order, which is the remote order
            tx.execute(
                "INSERT INTO catalogue_items (id, name, fields) VALUES (?1, ?2, ?3)
                 ON CONFLICT(id) DO UPDATE SET name = excluded.name, fields = excluded.fields",
                rusqlite::params![item.id, item.name, item.fields],
            )?;
        }
        tx.commit()?;
        Ok(())
    }

    fn update_item(&mut self, item: &ItemRecord) -> Result<bool, StorageError> {
        let changed = self.conn.execute(
            "UPDATE catalogue_items SET name = ?2, fields = ?3 WHERE id = ?1",
            rusqlite::params![item.id, item.name, item.fields],
        )?;
        Ok(changed > 0)
    }

    fn delete_item(&mut self, id: &str) -> Result<bool, StorageError> {
        let changed = self.conn.execute(
            "DELETE FROM catalogue_items WHERE id = ?1",
            rusqlite::params![id],
        )?;
        Ok(changed > 0)
    }

    fn delete_all_items(&mut self) -> Result<(), StorageError> {
        self.conn.execute("DELETE FROM catalogue_items", [])?;
        Ok(())
    }

    fn fetch_user(&self) -> Result<Option<UserRecord>, StorageError> {
        let mut stmt = self.conn.prepare(
            "SELECT uid, email, display_name, profile_image FROM user_details LIMIT 1",
        )?;
        let mut rows = stmt.query_map([], read_user)?;
        match rows.next() {
            Some(Ok(user)) => Ok(Some(user)),
            Some(Err(e)) => Err(StorageError::Sqlite(e)),
            None => Ok(None),
        }
    }

    fn save_user(&mut self, user: &UserRecord) -> Result<(), StorageError> {
        // One signed-in account at a time; replace whatever row is there
        let tx = self.conn.transaction()?;
        tx.execute("DELETE FROM user_details", [])?;
        tx.execute(
            "INSERT INTO user_details (uid, email, display_name, profile_image) VALUES (?1, ?2, ?3, ?4)",
            rusqlite::params![user.uid, user.email, user.display_name, user.profile_image],
        )?;
        tx.commit()?;
        Ok(())
    }

    fn save_profile_image(&mut self, image: &[u8]) -> Result<(), StorageError> {
        self.conn.execute(
            "UPDATE user_details SET profile_image = ?1",
            rusqlite::params![image],
        )?;
        Ok(())
    }

    fn delete_user(&mut self) -> Result<(), StorageError> {
        self.conn.execute("DELETE FROM user_details", [])?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, name: &str) -> ItemRecord {
        ItemRecord {
            id: id.to_string(),
            name: name.to_string(),
            fields: None,
        }
    }

    #[test]
    fn replace_then_fetch_preserves_order() {
        let mut store = SqliteStore::open_in_memory().unwrap();
        store
            .replace_catalogue(&[record("9", "Zulu"), record("2", "Alpha"), record("5", "Mike")])
            .unwrap();

        let ids: Vec<String> = store
            .fetch_items()
            .unwrap()
            .into_iter()
            .map(|r| r.id)
            .collect();
        assert_eq!(ids, ["9", "2", "5"]);
    }

    #[test]
    fn replace_prunes_rows_missing_from_snapshot() {
        let mut store = SqliteStore::open_in_memory().unwrap();
        store
            .replace_catalogue(&[record("1", "One"), record("2", "Two"), record("3", "Three")])
            .unwrap();
        store.replace_catalogue(&[record("2", "Two v2")]).unwrap();

        let items = store.fetch_items().unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, "2");
        assert_eq!(items[0].name, "Two v2");
        assert_eq!(store.fetch_item("1").unwrap(), None);
    }

    #[test]
    fn update_reports_missing_rows() {
        let mut store = SqliteStore::open_in_memory().unwrap();
        store.replace_catalogue(&[record("1", "One")]).unwrap();

        assert!(store.update_item(&record("1", "One v2")).unwrap());
        assert_eq!(store.fetch_item("1").unwrap().unwrap().name, "One v2");

        assert!(!store.update_item(&record("404", "Ghost")).unwrap());
    }

    #[test]
    fn delete_reports_outcome() {
        let mut store = SqliteStore::open_in_memory().unwrap();
        store.replace_catalogue(&[record("1", "One")]).unwrap();

        assert!(store.delete_item("1").unwrap());
        assert!(!store.delete_item("1").unwrap());
        assert!(store.fetch_items().unwrap().is_empty());
    }

    #[test]
    fn catalogue_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cache.db");
        let path = path.to_str().unwrap();

        {
            let mut store = SqliteStore::open(path).unwrap();
            let mut item = record("1", "One");
            item.fields = Some(vec![1, 2, 3]);
            store.replace_catalogue(&[item]).unwrap();
        }

        let store = SqliteStore::open(path).unwrap();
        let items = store.fetch_items().unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].fields, Some(vec![1, 2, 3]));
    }

    #[test]
    fn user_row_is_a_singleton() {
        let mut store = SqliteStore::open_in_memory().unwrap();
        let first = UserRecord {
            uid: "u1".into(),
            email: Some("one@example.com".into()),
            display_name: Some("One".into()),
            profile_image: None,
        };
        let second = UserRecord {
            uid: "u2".into(),
            email: Some("two@example.com".into()),
            display_name: None,
            profile_image: None,
        };

        store.save_user(&first).unwrap();
        store.save_user(&second).unwrap();

        let count: i64 = store
            .conn()
            .query_row("SELECT COUNT(*) FROM user_details", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 1);
        assert_eq!(store.fetch_user().unwrap().unwrap().uid, "u2");

        store.delete_user().unwrap();
        assert_eq!(store.fetch_user().unwrap(), None);
    }

    #[test]
    fn profile_image_needs_a_user_row() {
        let mut store = SqliteStore::open_in_memory().unwrap();
        store.save_profile_image(&[0xFF, 0xD8]).unwrap();
        assert_eq!(store.fetch_user().unwrap(), None);

        store
            .save_user(&UserRecord {
                uid: "u1".into(),
                email: None,
                display_name: None,
                profile_image: None,
            })
            .unwrap();
        store.save_profile_image(&[0xFF, 0xD8]).unwrap();
        assert_eq!(
            store.fetch_user().unwrap().unwrap().profile_image,
            Some(vec![0xFF, 0xD8])
        );
    }
}
