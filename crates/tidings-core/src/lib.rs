//! Tidings Core Library
//!
//! This crate provides the preferences model, form state machines, commit
//! logic and settings persistence for the Tidings desktop client.
//! It is UI-agnostic and can be used with any frontend (GTK, CLI, etc.)

pub mod collaborators;
pub mod context;
pub mod db;
pub mod error;
pub mod forms;
pub mod layout;
pub mod media;
pub mod types;

// Re-exports for convenience
pub use collaborators::{AppHost, ConfigurationStore, ConnectionManager, MediaItemId, MediaLibrary};
pub use context::{AfterCommit, SettingsContext};
pub use db::{get_db_path, init_database, init_database_at, Database, SettingsDb};
pub use error::{Error, Result};
pub use forms::{
    AutoDownloadCommit, AutoDownloadForm, ConnectionCommit, ConnectionField, ConnectionForm,
    SubmitOutcome, ValidationError,
};
pub use layout::BoxMetrics;
pub use media::{MediaEntry, MediaRegistry};
pub use types::*;
