//! Tidings GTK - GTK4/libadwaita preferences frontend for Tidings

mod application;
mod dialogs;
mod services;
mod window;

use adw::prelude::*;

use application::TidingsApplication;

fn main() -> glib::ExitCode {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("Starting Tidings GTK v{}", env!("CARGO_PKG_VERSION"));

    let app = TidingsApplication::new();
    app.run()
}
