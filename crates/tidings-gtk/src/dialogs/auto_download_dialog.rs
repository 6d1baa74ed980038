//! Auto Download Dialog - per category automatic media download switches

use adw::prelude::*;
use adw::subclass::prelude::*;
use gtk::glib;
use std::cell::RefCell;

use crate::application::TidingsApplication;
use tidings_core::{AfterCommit, AutoDownloadForm, BoxMetrics, DownloadScope, MediaCategory};

mod imp {
    use super::*;

    #[derive(Default)]
    pub struct AutoDownloadDialog {
        pub app: RefCell<Option<TidingsApplication>>,
        pub form: RefCell<Option<AutoDownloadForm>>,
    }

    #[glib::object_subclass]
    impl ObjectSubclass for AutoDownloadDialog {
        const NAME: &'static str = "AutoDownloadDialog";
        type Type = super::AutoDownloadDialog;
        type ParentType = adw::Dialog;
    }

    impl ObjectImpl for AutoDownloadDialog {}
    impl WidgetImpl for AutoDownloadDialog {}
    impl AdwDialogImpl for AutoDownloadDialog {}
}

glib::wrapper! {
    pub struct AutoDownloadDialog(ObjectSubclass<imp::AutoDownloadDialog>)
        @extends adw::Dialog, gtk::Widget,
        @implements gtk::Accessible, gtk::Buildable, gtk::ConstraintTarget;
}

impl AutoDownloadDialog {
    pub fn new(app: &TidingsApplication) -> Self {
        let dialog: Self = glib::Object::new();
        let form = AutoDownloadForm::new(&app.settings().auto_download);
        *dialog.imp().app.borrow_mut() = Some(app.clone());
        *dialog.imp().form.borrow_mut() = Some(form);

        dialog.setup_ui();
        dialog
    }

    fn setup_ui(&self) {
        let Some(form) = self.imp().form.borrow().clone() else {
            return;
        };
        let metrics = BoxMetrics::default();

        self.set_title("Automatic media download");
        self.set_content_width(metrics.width);
        self.set_content_height(form.preferred_height(&metrics));

        let content = gtk::Box::new(gtk::Orientation::Vertical, 0);

        // Header bar
        let header = adw::HeaderBar::new();
        header.set_show_start_title_buttons(false);
        header.set_show_end_title_buttons(false);

        let cancel_btn = gtk::Button::with_label("Cancel");
        cancel_btn.connect_clicked(glib::clone!(
            #[weak(rename_to = dialog)]
            self,
            move |_| {
                dialog.close();
            }
        ));
        header.pack_start(&cancel_btn);

        let save_btn = gtk::Button::with_label("Save");
        save_btn.add_css_class("suggested-action");
        save_btn.connect_clicked(glib::clone!(
            #[weak(rename_to = dialog)]
            self,
            move |_| {
                dialog.save();
            }
        ));
        header.pack_end(&save_btn);

        content.append(&header);

        let page = adw::PreferencesPage::new();
        for category in MediaCategory::ALL {
            let group = adw::PreferencesGroup::new();
            group.set_title(category.title());

            group.add(&self.create_scope_row(&form, category, DownloadScope::PrivateChats));
            group.add(&self.create_scope_row(&form, category, DownloadScope::Groups));

            if category == MediaCategory::Gif {
                let autoplay_row = adw::SwitchRow::new();
                autoplay_row.set_title("Autoplay GIFs");
                autoplay_row.set_active(form.autoplay_gif());
                autoplay_row.connect_active_notify(glib::clone!(
                    #[weak(rename_to = dialog)]
                    self,
                    move |row| {
                        if let Some(form) = dialog.imp().form.borrow_mut().as_mut() {
                            form.set_autoplay_gif(row.is_active());
                        }
                    }
                ));
                group.add(&autoplay_row);
            }

            page.add(&group);
        }

        content.append(&page);
        self.set_child(Some(&content));
    }

    fn create_scope_row(
        &self,
        form: &AutoDownloadForm,
        category: MediaCategory,
        scope: DownloadScope,
    ) -> adw::SwitchRow {
        let row = adw::SwitchRow::new();
        row.set_title(match scope {
            DownloadScope::PrivateChats => "Private chats",
            DownloadScope::Groups => "Groups",
        });
        row.set_active(form.is_allowed(category, scope));
        row.connect_active_notify(glib::clone!(
            #[weak(rename_to = dialog)]
            self,
            move |row| {
                if let Some(form) = dialog.imp().form.borrow_mut().as_mut() {
                    form.set_allowed(category, scope, row.is_active());
                }
            }
        ));
        row
    }

    fn save(&self) {
        let Some(commit) = self.imp().form.borrow().as_ref().map(|form| form.confirm()) else {
            return;
        };
        let Some(app) = self.imp().app.borrow().clone() else {
            return;
        };

        if commit.changed {
            log::info!("Saving auto-download settings");
        }
        let after = app.apply_auto_download(commit, self.upcast_ref::<adw::Dialog>());
        if after == AfterCommit::Closed {
            app.refresh_window();
        }
    }
}
