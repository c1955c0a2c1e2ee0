//! Browser side of bnbox: locating and launching Chrome, driving it over the
//! DevTools protocol, and the login / inbox / extraction steps built on the
//! [`SessionDriver`] trait.

mod auth;
mod cdp;
mod chrome_finder;
mod config;
mod driver;
mod error;
mod extract;
mod inbox;
mod launcher;
mod pacing;
mod profile;
mod workflow;

#[cfg(test)]
mod testing;

pub use auth::{Authenticator, Credentials};
pub use cdp::{CdpDriver, CdpElement};
pub use chrome_finder::ChromeFinder;
pub use config::ScrapeConfig;
pub use driver::{Locator, PageElement, SessionDriver, WaitCondition};
pub use error::{Error, Result};
pub use extract::MessageExtractor;
pub use inbox::InboxLister;
pub use launcher::ChromeLauncher;
pub use pacing::Pacing;
pub use profile::ProfileManager;
pub use workflow::{Workflow, WorkflowReport};
