//! Forms module - editable state behind the preference dialogs

mod auto_download;
mod connection;

pub use auto_download::{AutoDownloadCommit, AutoDownloadForm};
pub use connection::{
    ConnectionCommit, ConnectionField, ConnectionForm, SubmitOutcome, ValidationError,
    DEFAULT_HTTP_PROXY_PORT,
};
