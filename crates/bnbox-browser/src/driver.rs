//! Capability surface the scraping steps need from a browser session.

use crate::Result;
use async_trait::async_trait;
use std::fmt;
use std::time::Duration;

/// How to find an element on the page
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Locator {
    Css(String),
    XPath(String),
}

impl Locator {
    pub fn css(selector: impl Into<String>) -> Self {
        Locator::Css(selector.into())
    }

    pub fn xpath(expr: impl Into<String>) -> Self {
        Locator::XPath(expr.into())
    }

    /// Element with the given `id`
    pub fn id(id: &str) -> Self {
        Locator::Css(format!("#{}", id))
    }

    /// Elements carrying the given class name
    pub fn class(name: &str) -> Self {
        Locator::Css(format!(".{}", name))
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Locator::Css(s) => write!(f, "css `{}`", s),
            Locator::XPath(s) => write!(f, "xpath `{}`", s),
        }
    }
}

/// State an element must reach before a wait succeeds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitCondition {
    /// Attached to the DOM
    Present,
    /// Rendered, enabled and able to take a click
    Clickable,
}

/// A handle to one element of the current page
#[async_trait]
pub trait PageElement: Send + Sync + Sized {
    async fn attribute(&self, name: &str) -> Result<Option<String>>;

    async fn click(&self) -> Result<()>;

    async fn send_keys(&self, text: &str) -> Result<()>;

    /// Descendants of this element matching `locator`
    async fn find_all(&self, locator: &Locator) -> Result<Vec<Self>>;
}

/// A single browser session
///
/// Every call blocks the workflow until it completes; waits return
/// [`crate::Error::Timeout`] once `timeout` has elapsed.
#[async_trait]
pub trait SessionDriver: Send {
    type Element: PageElement;

    async fn navigate(&mut self, url: &str) -> Result<()>;

    async fn wait_for(
        &mut self,
        locator: &Locator,
        condition: WaitCondition,
        timeout: Duration,
    ) -> Result<Self::Element>;

    /// Wait until at least one element matches, then return all matches
    async fn wait_for_all(
        &mut self,
        locator: &Locator,
        timeout: Duration,
    ) -> Result<Vec<Self::Element>>;

    /// Tear the session down. Calling it again after a successful quit is a no-op.
    async fn quit(&mut self) -> Result<()>;
}
