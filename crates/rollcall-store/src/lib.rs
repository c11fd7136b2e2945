pub mod db;
pub mod error;
pub mod kv;
pub mod migrate;
pub mod paths;
pub mod repo;

use crate::error::Result;
use rusqlite::Connection;
use std::path::Path;

pub use kv::{KvStore, MemorySlots};

pub struct Store {
    conn: Connection,
}

impl Store {
    pub fn open(path: &Path) -> Result<Self> {
        let conn = db::open(path)?;
        Ok(Self { conn })
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = db::open_in_memory()?;
        Ok(Self { conn })
    }

    pub fn migrate(&self) -> Result<()> {
        migrate::run_migrations(&self.conn)
    }

    pub fn schema_version(&self) -> Result<i64> {
        migrate::schema_version(&self.conn)
    }

    pub fn slots(&self) -> repo::SlotsRepo<'_> {
        repo::SlotsRepo::new(&self.conn)
    }

    pub fn volunteers(&self) -> repo::VolunteersRepo<repo::SlotsRepo<'_>> {
        repo::VolunteersRepo::new(self.slots())
    }

    pub fn session(&self) -> repo::SessionRepo<repo::SlotsRepo<'_>> {
        repo::SessionRepo::new(self.slots())
    }
}
