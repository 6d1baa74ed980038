//! Main window module

mod imp;

use adw::prelude::*;
use adw::subclass::prelude::*;
use gtk::{gio, glib};

use crate::application::TidingsApplication;
use crate::dialogs::{AutoDownloadDialog, ConnectionDialog};
use tidings_core::{AutoDownloadPreferences, ConnectionMode, MediaCategory};

glib::wrapper! {
    pub struct TidingsWindow(ObjectSubclass<imp::TidingsWindow>)
        @extends adw::ApplicationWindow, gtk::ApplicationWindow, gtk::Window, gtk::Widget,
        @implements gio::ActionGroup, gio::ActionMap;
}

impl TidingsWindow {
    pub fn new(app: &TidingsApplication) -> Self {
        let window: Self = glib::Object::builder()
            .property("application", app)
            .property("default-width", 640)
            .property("default-height", 560)
            .property("title", "Tidings")
            .build();

        window.imp().setup_ui(&window);
        window.setup_actions();
        window.refresh_summaries();

        window
    }

    fn setup_actions(&self) {
        let connection_action = gio::ActionEntry::builder("connection-settings")
            .activate(|window: &Self, _, _| {
                window.show_connection_dialog();
            })
            .build();

        let auto_download_action = gio::ActionEntry::builder("auto-download-settings")
            .activate(|window: &Self, _, _| {
                window.show_auto_download_dialog();
            })
            .build();

        self.add_action_entries([connection_action, auto_download_action]);
    }

    fn app(&self) -> Option<TidingsApplication> {
        self.application().and_downcast::<TidingsApplication>()
    }

    pub fn show_connection_dialog(&self) {
        let Some(app) = self.app() else {
            return;
        };
        let dialog = ConnectionDialog::new(&app);
        dialog.present(Some(self));
    }

    pub fn show_auto_download_dialog(&self) {
        let Some(app) = self.app() else {
            return;
        };
        let dialog = AutoDownloadDialog::new(&app);
        dialog.present(Some(self));
    }

    /// Re-read both summaries from the application settings
    pub fn refresh_summaries(&self) {
        let Some(app) = self.app() else {
            return;
        };
        let settings = app.settings();

        if let Some(row) = self.imp().connection_row.get() {
            row.set_subtitle(settings.proxy.mode.label());
        }
        if let Some(row) = self.imp().auto_download_row.get() {
            row.set_subtitle(&auto_download_summary(&settings.auto_download));
        }
    }

    /// Called by the transport when its connection type changes
    pub fn connection_type_changed(&self, mode: ConnectionMode) {
        if let Some(row) = self.imp().connection_row.get() {
            row.set_subtitle(mode.label());
        }
        self.show_toast(&format!("Connection type: {}", mode.label()));
    }

    pub fn show_toast(&self, message: &str) {
        if let Some(overlay) = self.imp().toast_overlay.get() {
            overlay.add_toast(adw::Toast::new(message));
        }
    }
}

fn auto_download_summary(prefs: &AutoDownloadPreferences) -> String {
    let enabled: Vec<&str> = MediaCategory::ALL
        .iter()
        .filter(|category| {
            let scopes = prefs.scopes(**category);
            scopes.private_chats || scopes.groups
        })
        .map(|category| category.title())
        .collect();

    if enabled.is_empty() {
        "Off".to_string()
    } else {
        enabled.join(", ")
    }
}
