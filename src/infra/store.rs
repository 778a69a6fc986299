//! Persistent session storage.
//!
//! A single LMDB environment in the data directory holds the serialized
//! WalletSession under the `"Info"` entry. The session is written as a whole
//! on every session change and removed on delete; there is exactly one
//! logical writer.

use std::path::PathBuf;

use color_eyre::eyre::Result;
use heed::{types::*, Database, Env, EnvOpenOptions};

use crate::{config::get_data_dir, domain::session::WalletSession};

/// Store entry holding the serialized session.
const SESSION_KEY: &str = "Info";

/// Database name inside the environment.
const SESSION_DB: &str = "session";

/// Wrapper around the LMDB environment.
#[derive(Clone)]
pub struct Store {
    env: Env,
}

impl Store {
    pub fn new() -> Result<Self> {
        Self::with_path(get_data_dir().join("session.mdb"))
    }

    pub fn with_path(path: PathBuf) -> Result<Self> {
        std::fs::create_dir_all(&path)?;
        let env = unsafe {
            EnvOpenOptions::new()
                .map_size(10 * 1024 * 1024) // 10MB
                .max_dbs(1)
                .open(path)?
        };
        Ok(Self { env })
    }

    /// Serialize the full session (private keys included) under `"Info"`.
    pub fn save_session(&self, session: &WalletSession) -> Result<()> {
        let mut wtxn = self.env.write_txn()?;
        let db: Database<Str, SerdeJson<WalletSession>> =
            self.env.create_database(&mut wtxn, Some(SESSION_DB))?;
        db.put(&mut wtxn, SESSION_KEY, session)?;
        wtxn.commit()?;
        Ok(())
    }

    /// Load the persisted session, if any.
    pub fn load_session(&self) -> Result<Option<WalletSession>> {
        let rtxn = self.env.read_txn()?;
        let db: Option<Database<Str, SerdeJson<WalletSession>>> =
            self.env.open_database(&rtxn, Some(SESSION_DB))?;

        match db {
            Some(db) => Ok(db.get(&rtxn, SESSION_KEY)?),
            None => Ok(None),
        }
    }

    /// Remove the persisted session. Succeeds whether or not one existed.
    pub fn clear_session(&self) -> Result<()> {
        let mut wtxn = self.env.write_txn()?;
        let db: Database<Str, SerdeJson<WalletSession>> =
            self.env.create_database(&mut wtxn, Some(SESSION_DB))?;
        db.delete(&mut wtxn, SESSION_KEY)?;
        wtxn.commit()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::session::WalletRecord;

    fn temp_store() -> (tempfile::TempDir, Store) {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::with_path(dir.path().join("session.mdb")).unwrap();
        (dir, store)
    }

    #[test]
    fn save_then_load_round_trips() {
        let (_dir, store) = temp_store();
        let session = WalletSession::new(
            "word1 word2".into(),
            WalletRecord {
                public: "A1".into(),
                private: "B1".into(),
            },
        );

        store.save_session(&session).unwrap();
        assert_eq!(store.load_session().unwrap(), Some(session));
    }

    #[test]
    fn load_without_save_is_none() {
        let (_dir, store) = temp_store();
        assert_eq!(store.load_session().unwrap(), None);
    }

    #[test]
    fn clear_removes_the_entry() {
        let (_dir, store) = temp_store();
        store.save_session(&WalletSession::default()).unwrap();
        store.clear_session().unwrap();
        assert_eq!(store.load_session().unwrap(), None);
    }

    #[test]
    fn clear_on_empty_store_succeeds() {
        let (_dir, store) = temp_store();
        store.clear_session().unwrap();
    }

    #[test]
    fn save_overwrites_previous_session() {
        let (_dir, store) = temp_store();
        let mut session = WalletSession::new(
            "word1".into(),
            WalletRecord {
                public: "A1".into(),
                private: "B1".into(),
            },
        );
        store.save_session(&session).unwrap();

        session.key.push(WalletRecord {
            public: "A2".into(),
            private: "B2".into(),
        });
        store.save_session(&session).unwrap();

        let loaded = store.load_session().unwrap().unwrap();
        assert_eq!(loaded.key.len(), 2);
    }
}
