//! Window implementation

use adw::prelude::*;
use adw::subclass::prelude::*;
use gtk::glib;
use std::cell::OnceCell;

#[derive(Default)]
pub struct TidingsWindow {
    pub toast_overlay: OnceCell<adw::ToastOverlay>,
    pub connection_row: OnceCell<adw::ActionRow>,
    pub auto_download_row: OnceCell<adw::ActionRow>,
}

#[glib::object_subclass]
impl ObjectSubclass for TidingsWindow {
    const NAME: &'static str = "TidingsWindow";
    type Type = super::TidingsWindow;
    type ParentType = adw::ApplicationWindow;
}

impl ObjectImpl for TidingsWindow {
    fn constructed(&self) {
        self.parent_constructed();
    }
}

impl WidgetImpl for TidingsWindow {}
impl WindowImpl for TidingsWindow {}
impl ApplicationWindowImpl for TidingsWindow {}
impl AdwApplicationWindowImpl for TidingsWindow {}

impl TidingsWindow {
    pub fn setup_ui(&self, window: &super::TidingsWindow) {
        let toast_overlay = adw::ToastOverlay::new();
        let _ = self.toast_overlay.set(toast_overlay.clone());

        let content = gtk::Box::new(gtk::Orientation::Vertical, 0);

        let header = adw::HeaderBar::new();
        let title = adw::WindowTitle::new("Settings", "Tidings");
        header.set_title_widget(Some(&title));
        content.append(&header);

        let scrolled = gtk::ScrolledWindow::new();
        scrolled.set_vexpand(true);
        scrolled.set_policy(gtk::PolicyType::Never, gtk::PolicyType::Automatic);

        let prefs_page = adw::PreferencesPage::new();

        // Chat settings group
        let chat_group = adw::PreferencesGroup::new();
        chat_group.set_title("Chat Settings");

        let auto_download_row = Self::navigation_row("Automatic media download");
        auto_download_row.set_action_name(Some("win.auto-download-settings"));
        chat_group.add(&auto_download_row);
        let _ = self.auto_download_row.set(auto_download_row);

        prefs_page.add(&chat_group);

        // Advanced group
        let advanced_group = adw::PreferencesGroup::new();
        advanced_group.set_title("Advanced Settings");

        let connection_row = Self::navigation_row("Connection type");
        connection_row.set_action_name(Some("win.connection-settings"));
        advanced_group.add(&connection_row);
        let _ = self.connection_row.set(connection_row);

        prefs_page.add(&advanced_group);

        scrolled.set_child(Some(&prefs_page));
        content.append(&scrolled);

        toast_overlay.set_child(Some(&content));
        window.set_content(Some(&toast_overlay));
    }

    fn navigation_row(title: &str) -> adw::ActionRow {
        let row = adw::ActionRow::new();
        row.set_title(title);
        row.set_activatable(true);
        row.add_suffix(&gtk::Image::from_icon_name("go-next-symbolic"));
        row
    }
}
