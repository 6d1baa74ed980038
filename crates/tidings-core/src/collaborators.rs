//! Interfaces to the parts of the client the preference dialogs drive
//!
//! The dialogs never talk to the network stack, the media cache or the
//! application shell directly. Frontends hand in implementations of these
//! traits when a commit is applied.

use crate::db::{Database, SettingsDb};
use crate::error::Result;
use crate::types::{ConnectionMode, MediaCategory, ProxyConfiguration, Settings};

/// Durable storage for [`Settings`]. Writes are synchronous.
pub trait ConfigurationStore {
    fn read(&self) -> Result<Settings>;

    /// Persist connection and network settings
    fn write_settings(&self, settings: &Settings) -> Result<()>;

    /// Persist per-user media preferences
    fn write_user_settings(&self, settings: &Settings) -> Result<()>;
}

impl ConfigurationStore for Database {
    fn read(&self) -> Result<Settings> {
        SettingsDb::load(self)
    }

    fn write_settings(&self, settings: &Settings) -> Result<()> {
        SettingsDb::save_connection(self, settings)
    }

    fn write_user_settings(&self, settings: &Settings) -> Result<()> {
        SettingsDb::save_auto_download(self, settings)
    }
}

/// The network transport owner
pub trait ConnectionManager {
    /// Switch transport type. `Auto` goes back to the system proxy configuration.
    fn set_connection_type(&mut self, mode: ConnectionMode, proxy: &ProxyConfiguration);

    fn notify_connection_type_changed(&mut self);

    /// Restart the transport layer only
    fn restart(&mut self);

    /// Re-create helpers holding their own connections (map previews, web page loads)
    fn reinit_helpers(&mut self);
}

/// Opaque handle of a photo or document known to the media library
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MediaItemId(pub u64);

pub trait MediaLibrary {
    /// Every item of `category` loaded in this session
    fn known_items(&self, category: MediaCategory) -> Vec<MediaItemId>;

    /// Let a pending item re-check whether it may start loading by itself
    fn notify_auto_load_settings_changed(&mut self, item: MediaItemId);

    fn stop_auto_playing_items(&mut self);
}

/// The application shell
pub trait AppHost {
    /// Full process restart
    fn restart(&mut self);

    fn close_dialog(&mut self);
}
