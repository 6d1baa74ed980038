//! Connection Dialog - proxy type, proxy credentials and IPv6 preference

use adw::prelude::*;
use adw::subclass::prelude::*;
use gtk::glib;
use std::cell::{OnceCell, RefCell};

use crate::application::TidingsApplication;
use tidings_core::{
    AfterCommit, BoxMetrics, ConnectionCommit, ConnectionField, ConnectionForm, ConnectionMode,
    SubmitOutcome,
};

mod imp {
    use super::*;

    #[derive(Default)]
    pub struct ConnectionDialog {
        pub app: RefCell<Option<TidingsApplication>>,
        pub form: RefCell<Option<ConnectionForm>>,
        pub fields_group: OnceCell<adw::PreferencesGroup>,
        pub entries: RefCell<Vec<(ConnectionField, adw::EntryRow)>>,
    }

    #[glib::object_subclass]
    impl ObjectSubclass for ConnectionDialog {
        const NAME: &'static str = "ConnectionDialog";
        type Type = super::ConnectionDialog;
        type ParentType = adw::Dialog;
    }

    impl ObjectImpl for ConnectionDialog {}
    impl WidgetImpl for ConnectionDialog {}
    impl AdwDialogImpl for ConnectionDialog {}
}

glib::wrapper! {
    pub struct ConnectionDialog(ObjectSubclass<imp::ConnectionDialog>)
        @extends adw::Dialog, gtk::Widget,
        @implements gtk::Accessible, gtk::Buildable, gtk::ConstraintTarget;
}

impl ConnectionDialog {
    pub fn new(app: &TidingsApplication) -> Self {
        let dialog: Self = glib::Object::new();
        let form = ConnectionForm::new(&app.settings());
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

        self.set_title("Connection type");
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
        page.add(&self.create_mode_group(form.mode()));

        let fields_group = self.create_fields_group(&form);
        fields_group.set_visible(form.fields_visible());
        page.add(&fields_group);
        let _ = self.imp().fields_group.set(fields_group);

        let ipv6_group = adw::PreferencesGroup::new();
        let ipv6_row = adw::SwitchRow::new();
        ipv6_row.set_title("Try connecting through IPv6");
        ipv6_row.set_active(form.try_ipv6());
        ipv6_row.connect_active_notify(glib::clone!(
            #[weak(rename_to = dialog)]
            self,
            move |row| {
                if let Some(form) = dialog.imp().form.borrow_mut().as_mut() {
                    form.set_try_ipv6(row.is_active());
                }
            }
        ));
        ipv6_group.add(&ipv6_row);
        page.add(&ipv6_group);

        content.append(&page);
        self.set_child(Some(&content));

        if let Some(field) = form.initial_focus() {
            if let Some(entry) = self.entry(field) {
                self.set_focus(Some(&entry));
            }
        }
    }

    fn create_mode_group(&self, current: ConnectionMode) -> adw::PreferencesGroup {
        let group = adw::PreferencesGroup::new();
        let mut first: Option<gtk::CheckButton> = None;

        for mode in ConnectionMode::ALL {
            let check = gtk::CheckButton::new();
            check.set_valign(gtk::Align::Center);
            if let Some(first) = first.as_ref() {
                check.set_group(Some(first));
            }
            check.set_active(mode == current);
            check.connect_toggled(glib::clone!(
                #[weak(rename_to = dialog)]
                self,
                move |check| {
                    if check.is_active() {
                        dialog.mode_changed(mode);
                    }
                }
            ));

            let row = adw::ActionRow::new();
            row.set_title(mode.label());
            row.add_prefix(&check);
            row.set_activatable_widget(Some(&check));
            group.add(&row);

            first.get_or_insert(check);
        }

        group
    }

    fn create_fields_group(&self, form: &ConnectionForm) -> adw::PreferencesGroup {
        let group = adw::PreferencesGroup::new();
        group.set_title("Proxy");

        let mut entries = Vec::with_capacity(ConnectionField::ALL.len());
        for field in ConnectionField::ALL {
            let entry: adw::EntryRow = if field == ConnectionField::Password {
                adw::PasswordEntryRow::new().upcast()
            } else {
                adw::EntryRow::new()
            };
            entry.set_title(field.placeholder());
            entry.set_text(form.text(field));
            if field == ConnectionField::Port {
                entry.set_input_purpose(gtk::InputPurpose::Digits);
            }

            entry.connect_changed(glib::clone!(
                #[weak(rename_to = dialog)]
                self,
                move |entry| {
                    dialog.field_edited(field, entry);
                }
            ));
            entry.connect_entry_activated(glib::clone!(
                #[weak(rename_to = dialog)]
                self,
                move |_| {
                    dialog.field_submitted(field);
                }
            ));

            let focus = gtk::EventControllerFocus::new();
            focus.connect_enter(glib::clone!(
                #[weak(rename_to = dialog)]
                self,
                move |_| {
                    if let Some(form) = dialog.imp().form.borrow_mut().as_mut() {
                        form.focus(field);
                    }
                }
            ));
            focus.connect_leave(glib::clone!(
                #[weak(rename_to = dialog)]
                self,
                move |_| {
                    if let Some(form) = dialog.imp().form.borrow_mut().as_mut() {
                        form.blur(field);
                    }
                }
            ));
            entry.add_controller(focus);

            group.add(&entry);
            entries.push((field, entry));
        }

        *self.imp().entries.borrow_mut() = entries;
        group
    }

    fn entry(&self, field: ConnectionField) -> Option<adw::EntryRow> {
        self.imp()
            .entries
            .borrow()
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, entry)| entry.clone())
    }

    fn mode_changed(&self, mode: ConnectionMode) {
        let (visible, focused, port, height) = {
            let mut form = self.imp().form.borrow_mut();
            let Some(form) = form.as_mut() else {
                return;
            };
            form.set_mode(mode);
            (
                form.fields_visible(),
                form.focused(),
                form.text(ConnectionField::Port).to_string(),
                form.preferred_height(&BoxMetrics::default()),
            )
        };

        if let Some(group) = self.imp().fields_group.get() {
            group.set_visible(visible);
        }
        self.set_content_height(height);

        if !visible {
            return;
        }
        if let Some(entry) = self.entry(ConnectionField::Port) {
            if entry.text() != port {
                entry.set_text(&port);
            }
        }
        if let Some(field) = focused {
            self.focus_entry(field);
        }
    }

    fn field_edited(&self, field: ConnectionField, entry: &adw::EntryRow) {
        if let Some(form) = self.imp().form.borrow_mut().as_mut() {
            form.set_text(field, &entry.text());
        }
        entry.remove_css_class("error");
    }

    fn field_submitted(&self, field: ConnectionField) {
        let outcome = {
            let mut form = self.imp().form.borrow_mut();
            let Some(form) = form.as_mut() else {
                return;
            };
            form.focus(field);
            form.submit()
        };

        match outcome {
            SubmitOutcome::Advanced(next) => self.focus_entry(next),
            SubmitOutcome::Rejected(invalid) => self.show_field_error(invalid),
            SubmitOutcome::Committed(commit) => self.commit(commit),
            SubmitOutcome::Ignored => {}
        }
    }

    fn focus_entry(&self, field: ConnectionField) {
        if let Some(entry) = self.entry(field) {
            if !entry.has_focus() {
                entry.grab_focus();
            }
        }
    }

    fn show_field_error(&self, field: ConnectionField) {
        if let Some(entry) = self.entry(field) {
            entry.add_css_class("error");
            entry.grab_focus();
        }
    }

    fn save(&self) {
        let result = {
            let mut form = self.imp().form.borrow_mut();
            let Some(form) = form.as_mut() else {
                return;
            };
            form.confirm()
        };

        match result {
            Ok(commit) => self.commit(commit),
            Err(e) => {
                log::debug!("Connection settings rejected: {}", e);
                self.show_field_error(e.field());
            }
        }
    }

    fn commit(&self, commit: ConnectionCommit) {
        let Some(app) = self.imp().app.borrow().clone() else {
            return;
        };

        let after = app.apply_connection(commit, self.upcast_ref::<adw::Dialog>());
        if after == AfterCommit::Closed {
            app.refresh_window();
        }
    }
}
