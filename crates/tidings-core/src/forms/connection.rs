//! Connection settings form
//!
//! Holds the editable state of the connection dialog: proxy mode, the four
//! proxy text fields and the IPv6 toggle. The frontend mirrors widget edits
//! into the form and renders whatever focus and error state it reports.

use std::collections::HashSet;

use thiserror::Error;

use crate::layout::BoxMetrics;
use crate::types::{parse_port, ConnectionMode, NetworkPreferences, ProxyConfiguration, Settings};

/// Port suggested when switching to an HTTP proxy
pub const DEFAULT_HTTP_PROXY_PORT: &str = "80";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConnectionField {
    Host,
    Port,
    User,
    Password,
}

impl ConnectionField {
    pub const ALL: [ConnectionField; 4] = [
        ConnectionField::Host,
        ConnectionField::Port,
        ConnectionField::User,
        ConnectionField::Password,
    ];

    pub fn placeholder(&self) -> &'static str {
        match self {
            ConnectionField::Host => "Hostname",
            ConnectionField::Port => "Port",
            ConnectionField::User => "Username",
            ConnectionField::Password => "Password",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("proxy host is required")]
    EmptyHost,

    #[error("proxy port must be a number between 1 and 65535")]
    InvalidPort,
}

impl ValidationError {
    /// Field the user has to fix
    pub fn field(&self) -> ConnectionField {
        match self {
            ValidationError::EmptyHost => ConnectionField::Host,
            ValidationError::InvalidPort => ConnectionField::Port,
        }
    }
}

/// Validated result of the connection dialog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionCommit {
    pub proxy: ProxyConfiguration,
    pub network: NetworkPreferences,
    /// IPv6 preference differs from the one the dialog was opened with
    pub ipv6_changed: bool,
}

/// Result of pressing Enter in a proxy field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Focus moved on to the given field
    Advanced(ConnectionField),
    /// The given field holds an invalid value and now has focus
    Rejected(ConnectionField),
    Committed(ConnectionCommit),
    /// No proxy field had focus
    Ignored,
}

#[derive(Debug, Clone)]
pub struct ConnectionForm {
    mode: ConnectionMode,
    host: String,
    port: String,
    user: String,
    password: String,
    try_ipv6: bool,
    opened_try_ipv6: bool,
    focused: Option<ConnectionField>,
    errors: HashSet<ConnectionField>,
}

impl ConnectionForm {
    pub fn new(settings: &Settings) -> Self {
        let proxy = &settings.proxy;
        let port = if proxy.port == 0 {
            String::new()
        } else {
            proxy.port.to_string()
        };

        Self {
            mode: proxy.mode,
            host: proxy.host.clone(),
            port,
            user: proxy.user.clone(),
            password: proxy.password.clone(),
            try_ipv6: settings.network.try_ipv6,
            opened_try_ipv6: settings.network.try_ipv6,
            focused: None,
            errors: HashSet::new(),
        }
    }

    pub fn mode(&self) -> ConnectionMode {
        self.mode
    }

    /// Proxy fields are only shown for custom proxies
    pub fn fields_visible(&self) -> bool {
        self.mode != ConnectionMode::Auto
    }

    /// Field to focus when the dialog is shown
    pub fn initial_focus(&self) -> Option<ConnectionField> {
        self.fields_visible().then_some(ConnectionField::Host)
    }

    pub fn set_mode(&mut self, mode: ConnectionMode) {
        self.mode = mode;
        if mode == ConnectionMode::Auto {
            self.focused = None;
            return;
        }

        if self.focused.is_none() {
            self.focused = Some(ConnectionField::Host);
        }
        // Only an empty or zero port is replaced
        let port_value = self.port.trim().parse::<i64>().unwrap_or(0);
        if mode == ConnectionMode::HttpProxy && port_value == 0 {
            self.port = DEFAULT_HTTP_PROXY_PORT.to_string();
            self.errors.remove(&ConnectionField::Port);
        }
    }

    pub fn text(&self, field: ConnectionField) -> &str {
        match field {
            ConnectionField::Host => &self.host,
            ConnectionField::Port => &self.port,
            ConnectionField::User => &self.user,
            ConnectionField::Password => &self.password,
        }
    }

    /// Replace a field's text. Editing clears the field's error mark.
    pub fn set_text(&mut self, field: ConnectionField, text: &str) {
        let slot = match field {
            ConnectionField::Host => &mut self.host,
            ConnectionField::Port => &mut self.port,
            ConnectionField::User => &mut self.user,
            ConnectionField::Password => &mut self.password,
        };
        *slot = text.to_string();
        self.errors.remove(&field);
    }

    pub fn try_ipv6(&self) -> bool {
        self.try_ipv6
    }

    pub fn set_try_ipv6(&mut self, enabled: bool) {
        self.try_ipv6 = enabled;
    }

    pub fn focused(&self) -> Option<ConnectionField> {
        self.focused
    }

    pub fn focus(&mut self, field: ConnectionField) {
        self.focused = Some(field);
    }

    /// Focus left `field`
    pub fn blur(&mut self, field: ConnectionField) {
        if self.focused == Some(field) {
            self.focused = None;
        }
    }

    pub fn has_error(&self, field: ConnectionField) -> bool {
        self.errors.contains(&field)
    }

    /// Walk the host, port, user, password chain from the focused field
    pub fn submit(&mut self) -> SubmitOutcome {
        let Some(field) = self.focused else {
            return SubmitOutcome::Ignored;
        };

        match field {
            ConnectionField::Host => {
                if self.host.trim().is_empty() {
                    self.reject(ConnectionField::Host)
                } else {
                    self.advance(ConnectionField::Port)
                }
            }
            ConnectionField::Port => {
                if parse_port(&self.port).is_some() {
                    self.advance(ConnectionField::User)
                } else {
                    self.reject(ConnectionField::Port)
                }
            }
            ConnectionField::User => self.advance(ConnectionField::Password),
            ConnectionField::Password => match self.confirm() {
                Ok(commit) => SubmitOutcome::Committed(commit),
                Err(err) => SubmitOutcome::Rejected(err.field()),
            },
        }
    }

    /// Validate the whole form. On failure the offending field gets focus
    /// and an error mark.
    pub fn confirm(&mut self) -> Result<ConnectionCommit, ValidationError> {
        let proxy = if self.mode == ConnectionMode::Auto {
            ProxyConfiguration::default()
        } else {
            let host = self.host.trim().to_string();
            if host.is_empty() {
                return Err(self.fail(ValidationError::EmptyHost));
            }
            let Some(port) = parse_port(&self.port) else {
                return Err(self.fail(ValidationError::InvalidPort));
            };

            ProxyConfiguration {
                mode: self.mode,
                host,
                port,
                user: self.user.trim().to_string(),
                password: self.password.trim().to_string(),
            }
        };

        Ok(ConnectionCommit {
            proxy,
            network: NetworkPreferences {
                try_ipv6: self.try_ipv6,
            },
            ipv6_changed: self.try_ipv6 != self.opened_try_ipv6,
        })
    }

    pub fn preferred_height(&self, metrics: &BoxMetrics) -> i32 {
        metrics.connection_height(self.fields_visible())
    }

    fn advance(&mut self, next: ConnectionField) -> SubmitOutcome {
        self.focused = Some(next);
        SubmitOutcome::Advanced(next)
    }

    fn reject(&mut self, field: ConnectionField) -> SubmitOutcome {
        self.focused = Some(field);
        self.errors.insert(field);
        SubmitOutcome::Rejected(field)
    }

    fn fail(&mut self, err: ValidationError) -> ValidationError {
        self.reject(err.field());
        err
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn http_settings(host: &str, port: u16) -> Settings {
        let mut settings = Settings::default();
        settings.proxy = ProxyConfiguration {
            mode: ConnectionMode::HttpProxy,
            host: host.to_string(),
            port,
            user: "bob".to_string(),
            password: "hunter2".to_string(),
        };
        settings
    }

    #[test]
    fn test_opens_with_stored_values() {
        let form = ConnectionForm::new(&http_settings("proxy.lan", 3128));
        assert_eq!(form.mode(), ConnectionMode::HttpProxy);
        assert_eq!(form.text(ConnectionField::Host), "proxy.lan");
        assert_eq!(form.text(ConnectionField::Port), "3128");
        assert_eq!(form.initial_focus(), Some(ConnectionField::Host));

        let form = ConnectionForm::new(&Settings::default());
        assert_eq!(form.text(ConnectionField::Port), "");
        assert!(!form.fields_visible());
        assert_eq!(form.initial_focus(), None);
    }

    #[test]
    fn test_port_submit_advances_only_for_valid_ports() {
        let valid = ["1", "80", " 443 ", "1080", "8080", "65535"];
        let invalid = ["", "0", "-80", "abc", "80a", "65536", "99999999999"];

        for text in valid {
            let mut form = ConnectionForm::new(&http_settings("proxy.lan", 80));
            form.set_text(ConnectionField::Port, text);
            form.focus(ConnectionField::Port);
            assert_eq!(
                form.submit(),
                SubmitOutcome::Advanced(ConnectionField::User),
                "port {:?}",
                text
            );
            assert_eq!(form.focused(), Some(ConnectionField::User));
            assert!(!form.has_error(ConnectionField::Port));
        }

        for text in invalid {
            let mut form = ConnectionForm::new(&http_settings("proxy.lan", 80));
            form.set_text(ConnectionField::Port, text);
            form.focus(ConnectionField::Port);
            assert_eq!(
                form.submit(),
                SubmitOutcome::Rejected(ConnectionField::Port),
                "port {:?}",
                text
            );
            assert_eq!(form.focused(), Some(ConnectionField::Port));
            assert!(form.has_error(ConnectionField::Port));
        }
    }

    #[test]
    fn test_submit_chain() {
        let mut form = ConnectionForm::new(&Settings::default());
        form.set_mode(ConnectionMode::TcpProxy);
        assert_eq!(form.focused(), Some(ConnectionField::Host));

        assert_eq!(form.submit(), SubmitOutcome::Rejected(ConnectionField::Host));
        assert!(form.has_error(ConnectionField::Host));

        form.set_text(ConnectionField::Host, "  socks.lan ");
        assert!(!form.has_error(ConnectionField::Host));
        assert_eq!(form.submit(), SubmitOutcome::Advanced(ConnectionField::Port));

        form.set_text(ConnectionField::Port, "1080");
        assert_eq!(form.submit(), SubmitOutcome::Advanced(ConnectionField::User));
        assert_eq!(form.submit(), SubmitOutcome::Advanced(ConnectionField::Password));

        match form.submit() {
            SubmitOutcome::Committed(commit) => {
                assert_eq!(commit.proxy.mode, ConnectionMode::TcpProxy);
                assert_eq!(commit.proxy.host, "socks.lan");
                assert_eq!(commit.proxy.port, 1080);
            }
            other => panic!("expected commit, got {:?}", other),
        }
    }

    #[test]
    fn test_password_submit_revalidates_host_and_port() {
        let mut form = ConnectionForm::new(&http_settings("proxy.lan", 8080));
        form.set_text(ConnectionField::Host, "   ");
        form.focus(ConnectionField::Password);
        assert_eq!(form.submit(), SubmitOutcome::Rejected(ConnectionField::Host));
        assert_eq!(form.focused(), Some(ConnectionField::Host));

        form.set_text(ConnectionField::Host, "proxy.lan");
        form.set_text(ConnectionField::Port, "0");
        form.focus(ConnectionField::Password);
        assert_eq!(form.submit(), SubmitOutcome::Rejected(ConnectionField::Port));
        assert_eq!(form.focused(), Some(ConnectionField::Port));
        assert!(form.has_error(ConnectionField::Port));
    }

    #[test]
    fn test_submit_without_focus_is_ignored() {
        let mut form = ConnectionForm::new(&http_settings("proxy.lan", 8080));
        assert_eq!(form.submit(), SubmitOutcome::Ignored);

        form.focus(ConnectionField::User);
        form.blur(ConnectionField::User);
        assert_eq!(form.submit(), SubmitOutcome::Ignored);
    }

    #[test]
    fn test_http_proxy_prefills_port() {
        let mut form = ConnectionForm::new(&Settings::default());
        form.set_mode(ConnectionMode::HttpProxy);
        assert_eq!(form.text(ConnectionField::Port), "80");

        let mut form = ConnectionForm::new(&Settings::default());
        form.set_text(ConnectionField::Port, "0");
        form.set_mode(ConnectionMode::HttpProxy);
        assert_eq!(form.text(ConnectionField::Port), "80");

        let mut form = ConnectionForm::new(&Settings::default());
        form.set_text(ConnectionField::Port, "3128");
        form.set_mode(ConnectionMode::HttpProxy);
        assert_eq!(form.text(ConnectionField::Port), "3128");

        let mut form = ConnectionForm::new(&Settings::default());
        form.set_text(ConnectionField::Port, "abc");
        form.set_mode(ConnectionMode::HttpProxy);
        assert_eq!(form.text(ConnectionField::Port), "80");

        // SOCKS has no conventional default
        let mut form = ConnectionForm::new(&Settings::default());
        form.set_mode(ConnectionMode::TcpProxy);
        assert_eq!(form.text(ConnectionField::Port), "");
    }

    #[test]
    fn test_http_proxy_keeps_out_of_range_port() {
        let mut form = ConnectionForm::new(&Settings::default());
        form.set_text(ConnectionField::Host, "proxy.lan");
        form.set_text(ConnectionField::Port, "70000");
        form.set_mode(ConnectionMode::HttpProxy);
        assert_eq!(form.text(ConnectionField::Port), "70000");

        form.focus(ConnectionField::Port);
        assert_eq!(form.submit(), SubmitOutcome::Rejected(ConnectionField::Port));
        assert!(form.has_error(ConnectionField::Port));
        assert_eq!(form.confirm(), Err(ValidationError::InvalidPort));
    }

    #[test]
    fn test_mode_change_keeps_existing_field_focus() {
        let mut form = ConnectionForm::new(&http_settings("proxy.lan", 8080));
        form.focus(ConnectionField::User);
        form.set_mode(ConnectionMode::TcpProxy);
        assert_eq!(form.focused(), Some(ConnectionField::User));

        form.set_mode(ConnectionMode::Auto);
        assert_eq!(form.focused(), None);
    }

    #[test]
    fn test_auto_confirm_clears_proxy() {
        let mut form = ConnectionForm::new(&http_settings("proxy.lan", 8080));
        form.set_mode(ConnectionMode::Auto);
        form.set_text(ConnectionField::Host, "ignored.example");

        let commit = form.confirm().unwrap();
        assert_eq!(commit.proxy, ProxyConfiguration::default());
    }

    #[test]
    fn test_confirm_rejects_empty_host() {
        let mut form = ConnectionForm::new(&Settings::default());
        form.set_mode(ConnectionMode::HttpProxy);
        form.focus(ConnectionField::Password);

        assert_eq!(form.confirm(), Err(ValidationError::EmptyHost));
        assert_eq!(form.focused(), Some(ConnectionField::Host));
        assert!(form.has_error(ConnectionField::Host));
    }

    #[test]
    fn test_confirm_trims_fields() {
        let mut form = ConnectionForm::new(&Settings::default());
        form.set_mode(ConnectionMode::HttpProxy);
        form.set_text(ConnectionField::Host, " proxy.example.com ");
        form.set_text(ConnectionField::User, " alice ");
        form.set_text(ConnectionField::Password, " pw ");

        let commit = form.confirm().unwrap();
        assert_eq!(
            commit.proxy,
            ProxyConfiguration {
                mode: ConnectionMode::HttpProxy,
                host: "proxy.example.com".to_string(),
                port: 80,
                user: "alice".to_string(),
                password: "pw".to_string(),
            }
        );
    }

    #[test]
    fn test_ipv6_change_is_tracked() {
        let mut form = ConnectionForm::new(&Settings::default());
        assert!(!form.confirm().unwrap().ipv6_changed);

        form.set_try_ipv6(true);
        let commit = form.confirm().unwrap();
        assert!(commit.ipv6_changed);
        assert!(commit.network.try_ipv6);

        form.set_try_ipv6(false);
        assert!(!form.confirm().unwrap().ipv6_changed);
    }

    #[test]
    fn test_preferred_height_follows_mode() {
        let metrics = BoxMetrics::default();
        let mut form = ConnectionForm::new(&Settings::default());
        let collapsed = form.preferred_height(&metrics);

        form.set_mode(ConnectionMode::TcpProxy);
        assert!(form.preferred_height(&metrics) > collapsed);
        assert_eq!(form.preferred_height(&metrics), metrics.connection_height(true));
    }
}
