//! Frontend implementations of the core collaborator traits

use adw::prelude::*;

use crate::application::TidingsApplication;
use tidings_core::{AppHost, ConnectionManager, ConnectionMode, ProxyConfiguration};

type TypeChangedHandler = Box<dyn Fn(ConnectionMode)>;

/// Owner of the network transport settings
///
/// The actual transport lives outside this frontend; this keeps the active
/// configuration, counts restarts and tells subscribers about type changes.
#[derive(Default)]
pub struct Transport {
    mode: ConnectionMode,
    proxy: Option<ProxyConfiguration>,
    generation: u32,
    type_changed_handlers: Vec<TypeChangedHandler>,
}

impl Transport {
    pub fn connect_type_changed<F: Fn(ConnectionMode) + 'static>(&mut self, f: F) {
        self.type_changed_handlers.push(Box::new(f));
    }

    pub fn mode(&self) -> ConnectionMode {
        self.mode
    }
}

impl ConnectionManager for Transport {
    fn set_connection_type(&mut self, mode: ConnectionMode, proxy: &ProxyConfiguration) {
        self.mode = mode;
        self.proxy = (mode != ConnectionMode::Auto).then(|| proxy.clone());
        if self.proxy.is_none() {
            log::info!("Using system proxy configuration");
        }
    }

    fn notify_connection_type_changed(&mut self) {
        for handler in &self.type_changed_handlers {
            handler(self.mode);
        }
    }

    fn restart(&mut self) {
        self.generation += 1;
        match &self.proxy {
            Some(proxy) => log::info!(
                "Restarting transport through {} {}:{} (generation {})",
                self.mode,
                proxy.host,
                proxy.port,
                self.generation
            ),
            None => log::info!("Restarting transport (generation {})", self.generation),
        }
    }

    fn reinit_helpers(&mut self) {
        log::debug!("Re-initializing location and web page loaders");
    }
}

/// Closes the dialog that produced a commit, or restarts the whole process
pub struct DialogHost<'a> {
    app: &'a TidingsApplication,
    dialog: &'a adw::Dialog,
}

impl<'a> DialogHost<'a> {
    pub fn new(app: &'a TidingsApplication, dialog: &'a adw::Dialog) -> Self {
        Self { app, dialog }
    }
}

impl AppHost for DialogHost<'_> {
    fn restart(&mut self) {
        match std::env::current_exe() {
            Ok(exe) => {
                if let Err(e) = std::process::Command::new(&exe).spawn() {
                    log::error!("Failed to relaunch {:?}: {}", exe, e);
                }
            }
            Err(e) => log::error!("Failed to locate current executable: {}", e),
        }
        self.app.quit();
    }

    fn close_dialog(&mut self) {
        self.dialog.close();
    }
}
