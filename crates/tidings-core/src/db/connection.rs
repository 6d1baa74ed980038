//! Database connection management

use crate::error::{Error, Result};
use rusqlite::Connection;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

const SCHEMA: &str = include_str!("../../../../migrations/001_initial.sql");

/// Get the database path
pub fn get_db_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("io.github.tidings.Desktop")
        .join("tidings.db")
}

/// Initialize the database at the default location
pub fn init_database() -> Result<Database> {
    init_database_at(&get_db_path())
}

/// Open (creating if needed) the database at `path` and apply the schema
pub fn init_database_at(path: &Path) -> Result<Database> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    log::info!("Initializing database at: {:?}", path);

    let conn = Connection::open(path)?;
    Database::with_schema(conn)
}

/// Database wrapper with thread-safe connection
#[derive(Clone, Debug)]
pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    /// In-memory database with the schema applied
    pub fn open_in_memory() -> Result<Self> {
        Self::with_schema(Connection::open_in_memory()?)
    }

    fn with_schema(conn: Connection) -> Result<Self> {
        conn.execute_batch(SCHEMA)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Execute a function with the database connection
    pub fn with_conn<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> rusqlite::Result<T>,
    {
        let conn = self.conn.lock().map_err(|e| {
            Error::Database(format!("Failed to lock database: {}", e))
        })?;
        f(&conn).map_err(Into::into)
    }

    /// Execute a function with mutable database connection
    pub fn with_conn_mut<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut Connection) -> rusqlite::Result<T>,
    {
        let mut conn = self.conn.lock().map_err(|e| {
            Error::Database(format!("Failed to lock database: {}", e))
        })?;
        f(&mut conn).map_err(Into::into)
    }
}
