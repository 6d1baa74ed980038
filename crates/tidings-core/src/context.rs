//! Settings context - the live configuration and where it is persisted
//!
//! Dialog forms are built from [`SettingsContext::settings`] and return
//! commit values. Applying a commit updates the in-memory settings, writes
//! them to the store and drives the collaborators.

use crate::collaborators::{AppHost, ConfigurationStore, ConnectionManager, MediaLibrary};
use crate::forms::{AutoDownloadCommit, ConnectionCommit};
use crate::types::{Platform, Settings};

/// What happened to the dialog after a commit was applied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AfterCommit {
    Closed,
    /// The whole application is being restarted
    Restarting,
}

#[derive(Debug)]
pub struct SettingsContext<S: ConfigurationStore> {
    settings: Settings,
    store: S,
    platform: Platform,
}

impl<S: ConfigurationStore> SettingsContext<S> {
    pub fn new(settings: Settings, store: S, platform: Platform) -> Self {
        Self {
            settings,
            store,
            platform,
        }
    }

    /// Read settings from `store`, using defaults if they cannot be loaded
    pub fn load(store: S, platform: Platform) -> Self {
        let settings = match store.read() {
            Ok(s) => s,
            Err(e) => {
                log::warn!("Failed to load settings, using defaults: {}", e);
                Settings::default()
            }
        };
        Self::new(settings, store, platform)
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }

    pub fn apply_connection(
        &mut self,
        commit: ConnectionCommit,
        connection: &mut dyn ConnectionManager,
        host: &mut dyn AppHost,
    ) -> AfterCommit {
        let ConnectionCommit {
            proxy,
            network,
            ipv6_changed,
        } = commit;

        log::info!("Applying connection type: {}", proxy.mode);
        connection.set_connection_type(proxy.mode, &proxy);
        self.settings.proxy = proxy;
        self.settings.network = network;

        if self.platform.requires_restart_for_ipv6() && ipv6_changed {
            self.persist_settings();
            connection.notify_connection_type_changed();

            log::info!("IPv6 preference changed, restarting application");
            host.restart();
            return AfterCommit::Restarting;
        }

        self.persist_settings();
        connection.notify_connection_type_changed();
        connection.restart();
        connection.reinit_helpers();
        host.close_dialog();
        AfterCommit::Closed
    }

    pub fn apply_auto_download(
        &mut self,
        commit: AutoDownloadCommit,
        media: &mut dyn MediaLibrary,
        host: &mut dyn AppHost,
    ) -> AfterCommit {
        self.settings.auto_download = commit.preferences;

        for category in commit.reload_categories {
            let items = media.known_items(category);
            log::debug!(
                "Auto-download enabled for {}, notifying {} items",
                category,
                items.len()
            );
            for item in items {
                media.notify_auto_load_settings_changed(item);
            }
        }

        if commit.stop_gif_playback {
            media.stop_auto_playing_items();
        }

        if commit.changed {
            if let Err(e) = self.store.write_user_settings(&self.settings) {
                log::error!("Failed to save auto-download settings: {}", e);
            }
        }

        host.close_dialog();
        AfterCommit::Closed
    }

    fn persist_settings(&self) {
        if let Err(e) = self.store.write_settings(&self.settings) {
            log::error!("Failed to save connection settings: {}", e);
        }
    }
}
