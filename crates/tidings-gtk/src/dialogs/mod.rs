//! Dialogs module - modal preference dialogs

mod auto_download_dialog;
mod connection_dialog;

pub use auto_download_dialog::AutoDownloadDialog;
pub use connection_dialog::ConnectionDialog;
