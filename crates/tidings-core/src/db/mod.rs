//! Database module - SQLite persistence layer

mod connection;
mod settings;

pub use connection::{get_db_path, init_database, init_database_at, Database};
pub use settings::SettingsDb;
