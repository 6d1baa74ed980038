//! Application module - AdwApplication subclass

use adw::prelude::*;
use adw::subclass::prelude::*;
use gtk::{gio, glib};
use std::cell::{OnceCell, RefCell};

use crate::services::{DialogHost, Transport};
use crate::window::TidingsWindow;
use tidings_core::{
    init_database, AfterCommit, AutoDownloadCommit, ConnectionCommit, ConnectionManager,
    Database, MediaRegistry, Platform, Settings, SettingsContext,
};

mod imp {
    use super::*;

    #[derive(Default)]
    pub struct TidingsApplication {
        pub context: RefCell<Option<SettingsContext<Database>>>,
        pub transport: RefCell<Transport>,
        pub media: RefCell<MediaRegistry>,
        pub window: OnceCell<TidingsWindow>,
    }

    #[glib::object_subclass]
    impl ObjectSubclass for TidingsApplication {
        const NAME: &'static str = "TidingsApplication";
        type Type = super::TidingsApplication;
        type ParentType = adw::Application;
    }

    impl ObjectImpl for TidingsApplication {}

    impl ApplicationImpl for TidingsApplication {
        fn activate(&self) {
            let app = self.obj();

            // Get or create the window
            if let Some(window) = self.window.get() {
                window.present();
                return;
            }

            // Initialize database
            let db = match init_database() {
                Ok(db) => db,
                Err(e) => {
                    log::error!("Failed to initialize database: {}", e);
                    app.quit();
                    return;
                }
            };

            let context = SettingsContext::load(db, Platform::current());

            // Bring the transport in line with the stored configuration
            {
                let proxy = &context.settings().proxy;
                let mut transport = self.transport.borrow_mut();
                transport.set_connection_type(proxy.mode, proxy);
                log::info!("Transport configured in {} mode", transport.mode());
            }
            *self.context.borrow_mut() = Some(context);

            let window = TidingsWindow::new(&*app);
            let _ = self.window.set(window.clone());

            let window_weak = window.downgrade();
            self.transport.borrow_mut().connect_type_changed(move |mode| {
                if let Some(window) = window_weak.upgrade() {
                    window.connection_type_changed(mode);
                }
            });

            window.present();
        }

        fn startup(&self) {
            self.parent_startup();

            let app = self.obj();

            // Set up application actions
            app.setup_actions();

            // Set up keyboard shortcuts
            app.setup_shortcuts();
        }
    }

    impl GtkApplicationImpl for TidingsApplication {}
    impl AdwApplicationImpl for TidingsApplication {}
}

glib::wrapper! {
    pub struct TidingsApplication(ObjectSubclass<imp::TidingsApplication>)
        @extends gio::Application, gtk::Application, adw::Application,
        @implements gio::ActionGroup, gio::ActionMap;
}

impl TidingsApplication {
    pub fn new() -> Self {
        glib::Object::builder()
            .property("application-id", "io.github.tidings.Desktop")
            .property("flags", gio::ApplicationFlags::FLAGS_NONE)
            .build()
    }

    fn setup_actions(&self) {
        let quit_action = gio::ActionEntry::builder("quit")
            .activate(|app: &Self, _, _| {
                app.quit();
            })
            .build();

        self.add_action_entries([quit_action]);
    }

    fn setup_shortcuts(&self) {
        self.set_accels_for_action("app.quit", &["<Primary>q"]);
        self.set_accels_for_action("win.connection-settings", &["<Primary><Shift>c"]);
        self.set_accels_for_action("win.auto-download-settings", &["<Primary><Shift>d"]);
    }

    /// Snapshot of the current settings
    pub fn settings(&self) -> Settings {
        self.imp()
            .context
            .borrow()
            .as_ref()
            .map(|context| context.settings().clone())
            .unwrap_or_default()
    }

    /// Redraw the settings summaries of the main window
    pub fn refresh_window(&self) {
        if let Some(window) = self.imp().window.get() {
            window.refresh_summaries();
        }
    }

    pub fn apply_connection(&self, commit: ConnectionCommit, dialog: &adw::Dialog) -> AfterCommit {
        let imp = self.imp();
        let mut context = imp.context.borrow_mut();
        let mut host = DialogHost::new(self, dialog);

        match context.as_mut() {
            Some(context) => {
                let mut transport = imp.transport.borrow_mut();
                context.apply_connection(commit, &mut *transport, &mut host)
            }
            None => {
                log::warn!("Settings are not loaded, discarding connection changes");
                dialog.close();
                AfterCommit::Closed
            }
        }
    }

    pub fn apply_auto_download(
        &self,
        commit: AutoDownloadCommit,
        dialog: &adw::Dialog,
    ) -> AfterCommit {
        let imp = self.imp();
        let mut context = imp.context.borrow_mut();
        let mut host = DialogHost::new(self, dialog);

        match context.as_mut() {
            Some(context) => {
                let mut media = imp.media.borrow_mut();
                context.apply_auto_download(commit, &mut *media, &mut host)
            }
            None => {
                log::warn!("Settings are not loaded, discarding auto-download changes");
                dialog.close();
                AfterCommit::Closed
            }
        }
    }
}

impl Default for TidingsApplication {
    fn default() -> Self {
        Self::new()
    }
}
