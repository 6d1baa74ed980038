//! Types module - data structures for Tidings preferences
//!
//! These types define the configuration records edited by the connection
//! and auto-download dialogs.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// How the client reaches the network
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ConnectionMode {
    #[default]
    Auto,
    HttpProxy,
    TcpProxy,
}

impl ConnectionMode {
    pub const ALL: [ConnectionMode; 3] = [
        ConnectionMode::Auto,
        ConnectionMode::HttpProxy,
        ConnectionMode::TcpProxy,
    ];

    /// Human readable label used by the mode selector
    pub fn label(&self) -> &'static str {
        match self {
            ConnectionMode::Auto => "Auto (TCP if available or HTTP)",
            ConnectionMode::HttpProxy => "HTTP with custom HTTP-proxy",
            ConnectionMode::TcpProxy => "TCP with custom SOCKS5-proxy",
        }
    }
}

impl std::fmt::Display for ConnectionMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConnectionMode::Auto => write!(f, "auto"),
            ConnectionMode::HttpProxy => write!(f, "http_proxy"),
            ConnectionMode::TcpProxy => write!(f, "tcp_proxy"),
        }
    }
}

impl From<&str> for ConnectionMode {
    fn from(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "http_proxy" => ConnectionMode::HttpProxy,
            "tcp_proxy" => ConnectionMode::TcpProxy,
            _ => ConnectionMode::Auto,
        }
    }
}

/// Proxy settings. A default value is the "cleared" proxy used in auto mode.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProxyConfiguration {
    pub mode: ConnectionMode,
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
}

impl ProxyConfiguration {
    /// Check that a custom proxy has a host and a usable port
    pub fn validate(&self) -> Result<()> {
        if self.mode == ConnectionMode::Auto {
            return Ok(());
        }
        if self.host.is_empty() {
            return Err(Error::InvalidInput("proxy host is empty".to_string()));
        }
        if self.port == 0 {
            return Err(Error::InvalidInput("proxy port must be positive".to_string()));
        }
        Ok(())
    }
}

/// Parse user-entered port text. Accepts 1..=65535 after trimming.
pub fn parse_port(text: &str) -> Option<u16> {
    text.trim().parse::<u16>().ok().filter(|port| *port > 0)
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkPreferences {
    pub try_ipv6: bool,
}

/// Media kinds with their own auto-download switches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MediaCategory {
    Photo,
    /// Voice messages
    Audio,
    /// Animations
    Gif,
}

impl MediaCategory {
    pub const ALL: [MediaCategory; 3] = [
        MediaCategory::Photo,
        MediaCategory::Audio,
        MediaCategory::Gif,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            MediaCategory::Photo => "Photos",
            MediaCategory::Audio => "Voice messages",
            MediaCategory::Gif => "GIFs",
        }
    }
}

impl std::fmt::Display for MediaCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MediaCategory::Photo => write!(f, "photo"),
            MediaCategory::Audio => write!(f, "audio"),
            MediaCategory::Gif => write!(f, "gif"),
        }
    }
}

/// Chat kinds an auto-download switch applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DownloadScope {
    PrivateChats,
    Groups,
}

/// Where automatic download is allowed for one media category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DownloadScopes {
    pub private_chats: bool,
    pub groups: bool,
}

impl DownloadScopes {
    /// Stored bit: download disabled in private chats
    pub const NO_PRIVATE: u32 = 0x01;
    /// Stored bit: download disabled in groups
    pub const NO_GROUPS: u32 = 0x02;

    /// Decode the stored "disabled" bitmask, ignoring unknown bits
    pub fn from_mask(mask: u32) -> Self {
        Self {
            private_chats: mask & Self::NO_PRIVATE == 0,
            groups: mask & Self::NO_GROUPS == 0,
        }
    }

    pub fn to_mask(&self) -> u32 {
        let mut mask = 0;
        if !self.private_chats {
            mask |= Self::NO_PRIVATE;
        }
        if !self.groups {
            mask |= Self::NO_GROUPS;
        }
        mask
    }

    pub fn allows(&self, scope: DownloadScope) -> bool {
        match scope {
            DownloadScope::PrivateChats => self.private_chats,
            DownloadScope::Groups => self.groups,
        }
    }

    pub fn set(&mut self, scope: DownloadScope, allowed: bool) {
        match scope {
            DownloadScope::PrivateChats => self.private_chats = allowed,
            DownloadScope::Groups => self.groups = allowed,
        }
    }

    /// True if a scope disabled in `previous` is allowed now
    pub fn newly_enabled(&self, previous: &DownloadScopes) -> bool {
        (self.private_chats && !previous.private_chats) || (self.groups && !previous.groups)
    }
}

impl Default for DownloadScopes {
    fn default() -> Self {
        Self {
            private_chats: true,
            groups: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutoDownloadPreferences {
    pub photo: DownloadScopes,
    pub audio: DownloadScopes,
    pub gif: DownloadScopes,
    pub autoplay_gif: bool,
}

impl AutoDownloadPreferences {
    pub fn scopes(&self, category: MediaCategory) -> &DownloadScopes {
        match category {
            MediaCategory::Photo => &self.photo,
            MediaCategory::Audio => &self.audio,
            MediaCategory::Gif => &self.gif,
        }
    }

    pub fn scopes_mut(&mut self, category: MediaCategory) -> &mut DownloadScopes {
        match category {
            MediaCategory::Photo => &mut self.photo,
            MediaCategory::Audio => &mut self.audio,
            MediaCategory::Gif => &mut self.gif,
        }
    }
}

impl Default for AutoDownloadPreferences {
    fn default() -> Self {
        Self {
            photo: DownloadScopes::default(),
            audio: DownloadScopes::default(),
            gif: DownloadScopes::default(),
            autoplay_gif: true,
        }
    }
}

/// Application settings edited by the preference dialogs
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    pub proxy: ProxyConfiguration,
    pub network: NetworkPreferences,
    pub auto_download: AutoDownloadPreferences,
}

/// Host operating system, as far as settings behavior is concerned
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Windows,
    MacOs,
    Linux,
}

impl Platform {
    pub fn current() -> Self {
        if cfg!(target_os = "windows") {
            Platform::Windows
        } else if cfg!(target_os = "macos") {
            Platform::MacOs
        } else {
            Platform::Linux
        }
    }

    /// Changing the IPv6 preference only takes effect after a full restart
    pub fn requires_restart_for_ipv6(&self) -> bool {
        matches!(self, Platform::Windows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connection_mode_strings() {
        for mode in ConnectionMode::ALL {
            assert_eq!(ConnectionMode::from(mode.to_string().as_str()), mode);
        }
        assert_eq!(ConnectionMode::from("socks9"), ConnectionMode::Auto);
        assert_eq!(ConnectionMode::from("HTTP_PROXY"), ConnectionMode::HttpProxy);
    }

    #[test]
    fn test_parse_port() {
        assert_eq!(parse_port("80"), Some(80));
        assert_eq!(parse_port("  1080 "), Some(1080));
        assert_eq!(parse_port("65535"), Some(65535));
        assert_eq!(parse_port("0"), None);
        assert_eq!(parse_port("-1"), None);
        assert_eq!(parse_port("65536"), None);
        assert_eq!(parse_port(""), None);
        assert_eq!(parse_port("eighty"), None);
    }

    #[test]
    fn test_scope_mask_layout() {
        assert_eq!(DownloadScopes::default().to_mask(), 0);
        let scopes = DownloadScopes {
            private_chats: false,
            groups: true,
        };
        assert_eq!(scopes.to_mask(), DownloadScopes::NO_PRIVATE);
        assert_eq!(DownloadScopes::from_mask(0x03).to_mask(), 0x03);
        // Unknown bits are dropped
        let groups_off = DownloadScopes {
            private_chats: true,
            groups: false,
        };
        assert_eq!(DownloadScopes::from_mask(0x06), groups_off);
    }

    #[test]
    fn test_newly_enabled() {
        let none = DownloadScopes::from_mask(0x03);
        let all = DownloadScopes::default();
        assert!(all.newly_enabled(&none));
        assert!(!none.newly_enabled(&all));

        let private_only = DownloadScopes::from_mask(DownloadScopes::NO_GROUPS);
        let groups_only = DownloadScopes::from_mask(DownloadScopes::NO_PRIVATE);
        assert!(groups_only.newly_enabled(&private_only));
    }

    #[test]
    fn test_proxy_validate() {
        assert!(ProxyConfiguration::default().validate().is_ok());

        let mut proxy = ProxyConfiguration {
            mode: ConnectionMode::TcpProxy,
            host: "socks.local".to_string(),
            port: 1080,
            ..Default::default()
        };
        assert!(proxy.validate().is_ok());

        proxy.port = 0;
        assert!(matches!(proxy.validate(), Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_ipv6_restart_platforms() {
        assert!(Platform::Windows.requires_restart_for_ipv6());
        assert!(!Platform::Linux.requires_restart_for_ipv6());
        assert!(!Platform::MacOs.requires_restart_for_ipv6());
    }
}
