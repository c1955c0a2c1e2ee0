use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Browser error: {0}")]
    Browser(String),

    #[error("CDP error: {0}")]
    Cdp(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config {}: {source}", .path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Timed out after {}s waiting for {locator}", .waited.as_secs_f64())]
    Timeout { locator: String, waited: Duration },

    #[error("Element not found: {0}")]
    ElementNotFound(String),

    #[error("Element {locator} has no {name} attribute")]
    MissingAttribute { locator: String, name: String },

    #[error(transparent)]
    Core(#[from] bnbox_core::Error),
}

impl Error {
    /// Failures that mean the page did not show what we looked for, as
    /// opposed to the browser connection itself breaking
    pub fn is_lookup_failure(&self) -> bool {
        matches!(
            self,
            Error::Timeout { .. }
                | Error::ElementNotFound(_)
                | Error::MissingAttribute { .. }
                | Error::Core(bnbox_core::Error::InvalidAttribute { .. })
        )
    }
}

impl From<chromiumoxide::error::CdpError> for Error {
    fn from(err: chromiumoxide::error::CdpError) -> Self {
        Error::Cdp(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
