//! Settings database operations

use crate::db::Database;
use crate::error::Result;
use crate::types::{ConnectionMode, DownloadScopes, Settings};
use rusqlite::params;

const UPSERT: &str =
    "INSERT OR REPLACE INTO settings (key, value, updated_at) VALUES (?1, ?2, CURRENT_TIMESTAMP)";

fn bool_str(value: bool) -> &'static str {
    if value {
        "true"
    } else {
        "false"
    }
}

/// Settings database operations
pub struct SettingsDb;

impl SettingsDb {
    /// Load all settings from database
    pub fn load(db: &Database) -> Result<Settings> {
        let mut settings = Settings::default();

        db.with_conn(|conn| {
            let mut stmt = conn.prepare("SELECT key, value FROM settings")?;
            let rows = stmt.query_map([], |row| {
                Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
            })?;

            for row in rows {
                let (key, value) = row?;
                match key.as_str() {
                    "connection_type" => {
                        settings.proxy.mode = ConnectionMode::from(value.as_str());
                    }
                    "proxy_host" => settings.proxy.host = value,
                    "proxy_port" => {
                        settings.proxy.port = value.parse().unwrap_or(0);
                    }
                    "proxy_user" => settings.proxy.user = value,
                    "proxy_password" => settings.proxy.password = value,
                    "try_ipv6" => {
                        settings.network.try_ipv6 = value == "true";
                    }
                    "auto_download_photo" => {
                        settings.auto_download.photo =
                            DownloadScopes::from_mask(value.parse().unwrap_or(0));
                    }
                    "auto_download_audio" => {
                        settings.auto_download.audio =
                            DownloadScopes::from_mask(value.parse().unwrap_or(0));
                    }
                    "auto_download_gif" => {
                        settings.auto_download.gif =
                            DownloadScopes::from_mask(value.parse().unwrap_or(0));
                    }
                    "auto_play_gif" => {
                        settings.auto_download.autoplay_gif = value == "true";
                    }
                    _ => {}
                }
            }

            Ok(())
        })?;

        // A stored custom proxy without a host cannot be used
        if settings.proxy.validate().is_err() {
            log::warn!(
                "Stored {} proxy is incomplete, falling back to auto",
                settings.proxy.mode
            );
            settings.proxy.mode = ConnectionMode::Auto;
        }

        Ok(settings)
    }

    /// Save a single setting
    pub fn set(db: &Database, key: &str, value: &str) -> Result<()> {
        db.with_conn(|conn| {
            conn.execute(UPSERT, params![key, value])?;
            Ok(())
        })
    }

    /// Get a single setting value
    pub fn get(db: &Database, key: &str) -> Result<Option<String>> {
        db.with_conn(|conn| {
            let result = conn.query_row(
                "SELECT value FROM settings WHERE key = ?1",
                params![key],
                |row| row.get(0),
            );

            match result {
                Ok(value) => Ok(Some(value)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(e) => Err(e),
            }
        })
    }

    /// Save the connection and network settings
    pub fn save_connection(db: &Database, settings: &Settings) -> Result<()> {
        settings.proxy.validate()?;

        let proxy = &settings.proxy;
        let entries = [
            ("connection_type", proxy.mode.to_string()),
            ("proxy_host", proxy.host.clone()),
            ("proxy_port", proxy.port.to_string()),
            ("proxy_user", proxy.user.clone()),
            ("proxy_password", proxy.password.clone()),
            ("try_ipv6", bool_str(settings.network.try_ipv6).to_string()),
        ];
        Self::write_all(db, &entries)
    }

    /// Save the automatic media download settings
    pub fn save_auto_download(db: &Database, settings: &Settings) -> Result<()> {
        let prefs = &settings.auto_download;
        let entries = [
            ("auto_download_photo", prefs.photo.to_mask().to_string()),
            ("auto_download_audio", prefs.audio.to_mask().to_string()),
            ("auto_download_gif", prefs.gif.to_mask().to_string()),
            ("auto_play_gif", bool_str(prefs.autoplay_gif).to_string()),
        ];
        Self::write_all(db, &entries)
    }

    /// Save all settings
    pub fn save(db: &Database, settings: &Settings) -> Result<()> {
        Self::save_connection(db, settings)?;
        Self::save_auto_download(db, settings)
    }

    fn write_all(db: &Database, entries: &[(&str, String)]) -> Result<()> {
        db.with_conn_mut(|conn| {
            let tx = conn.transaction()?;
            for (key, value) in entries {
                tx.execute(UPSERT, params![key, value])?;
            }
            tx.commit()?;
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::types::{MediaCategory, ProxyConfiguration};

    #[test]
    fn test_fresh_database_loads_defaults() {
        let db = Database::open_in_memory().unwrap();
        let settings = SettingsDb::load(&db).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_connection_round_trip() {
        let db = Database::open_in_memory().unwrap();
        let mut settings = Settings::default();
        settings.proxy = ProxyConfiguration {
            mode: ConnectionMode::TcpProxy,
            host: "10.0.0.2".to_string(),
            port: 1080,
            user: "alice".to_string(),
            password: "s3cret".to_string(),
        };
        settings.network.try_ipv6 = true;

        SettingsDb::save_connection(&db, &settings).unwrap();

        assert_eq!(SettingsDb::load(&db).unwrap(), settings);
        assert_eq!(
            SettingsDb::get(&db, "connection_type").unwrap().as_deref(),
            Some("tcp_proxy")
        );
    }

    #[test]
    fn test_auto_download_stored_as_legacy_mask() {
        let db = Database::open_in_memory().unwrap();
        let mut settings = Settings::default();
        settings.auto_download.scopes_mut(MediaCategory::Audio).groups = false;
        settings.auto_download.gif = DownloadScopes::from_mask(0x03);
        settings.auto_download.autoplay_gif = false;

        SettingsDb::save_auto_download(&db, &settings).unwrap();

        assert_eq!(SettingsDb::get(&db, "auto_download_photo").unwrap().as_deref(), Some("0"));
        assert_eq!(SettingsDb::get(&db, "auto_download_audio").unwrap().as_deref(), Some("2"));
        assert_eq!(SettingsDb::get(&db, "auto_download_gif").unwrap().as_deref(), Some("3"));
        assert_eq!(SettingsDb::load(&db).unwrap().auto_download, settings.auto_download);
    }

    #[test]
    fn test_save_connection_rejects_incomplete_proxy() {
        let db = Database::open_in_memory().unwrap();
        let mut settings = Settings::default();
        settings.proxy.mode = ConnectionMode::HttpProxy;
        settings.proxy.port = 8080;

        let err = SettingsDb::save_connection(&db, &settings).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
        assert_eq!(
            SettingsDb::get(&db, "connection_type").unwrap().as_deref(),
            Some("auto")
        );
    }

    #[test]
    fn test_corrupt_values_fall_back() {
        let db = Database::open_in_memory().unwrap();
        SettingsDb::set(&db, "connection_type", "http_proxy").unwrap();
        SettingsDb::set(&db, "proxy_host", "").unwrap();
        SettingsDb::set(&db, "proxy_port", "not-a-port").unwrap();
        SettingsDb::set(&db, "auto_download_photo", "garbage").unwrap();

        let settings = SettingsDb::load(&db).unwrap();
        assert_eq!(settings.proxy.mode, ConnectionMode::Auto);
        assert_eq!(settings.proxy.port, 0);
        assert_eq!(settings.auto_download.photo, DownloadScopes::default());
    }

    #[test]
    fn test_unknown_key_is_none() {
        let db = Database::open_in_memory().unwrap();
        assert_eq!(SettingsDb::get(&db, "no_such_key").unwrap(), None);
    }
}
