use crate::driver::{Locator, PageElement, SessionDriver, WaitCondition};
use crate::{Error, Result};
use async_trait::async_trait;
use chromiumoxide::browser::Browser;
use chromiumoxide::element::Element;
use chromiumoxide::error::CdpError;
use chromiumoxide::page::Page;
use futures::StreamExt;
use std::process::Child;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::Instant;

const POLL_INTERVAL: Duration = Duration::from_millis(250);
const CONNECT_ATTEMPTS: u32 = 5;

/// Visible, sized and not disabled
const CLICKABLE_JS: &str = "function() { \
    const r = this.getBoundingClientRect(); \
    const s = window.getComputedStyle(this); \
    return !this.disabled && r.width > 0 && r.height > 0 && s.visibility !== 'hidden'; \
}";

/// Session driver backed by a Chrome instance over the DevTools protocol
pub struct CdpDriver {
    browser: Browser,
    page: Page,
    handler_task: JoinHandle<()>,
    chrome: Option<Child>,
    closed: bool,
}

impl CdpDriver {
    /// Connect to Chrome listening on `debugging_port`.
    ///
    /// `chrome` is the process started by [`crate::ChromeLauncher`]; the driver
    /// takes ownership and kills it on [`SessionDriver::quit`].
    pub async fn connect(debugging_port: u16, mut chrome: Option<Child>) -> Result<Self> {
        tracing::info!("CDP session: connecting to Chrome on port {}", debugging_port);

        // Chrome needs a moment before the debugging endpoint answers
        let ws_url = format!("http://localhost:{}", debugging_port);
        let (browser, mut handler) = {
            let mut attempts_left = CONNECT_ATTEMPTS;
            loop {
                tracing::debug!("Attempting CDP connection to {}...", ws_url);
                match Browser::connect(&ws_url).await {
                    Ok(result) => break result,
                    Err(e) => {
                        attempts_left -= 1;
                        if attempts_left == 0 {
                            kill_chrome(&mut chrome);
                            return Err(Error::Cdp(format!(
                                "Failed to connect to Chrome after {} attempts: {}",
                                CONNECT_ATTEMPTS, e
                            )));
                        }
                        tracing::debug!("Chrome not ready yet ({} attempts left)", attempts_left);
                        tokio::time::sleep(Duration::from_millis(500)).await;
                    }
                }
            }
        };

        // The handler must be polled for any command to complete
        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    tracing::debug!("CDP handler event error (continuing): {}", e);
                }
            }
        });

        let page = match first_page(&browser).await {
            Ok(page) => page,
            Err(e) => {
                handler_task.abort();
                kill_chrome(&mut chrome);
                return Err(e);
            }
        };

        tracing::info!("WebDriver initialized successfully.");

        Ok(Self {
            browser,
            page,
            handler_task,
            chrome,
            closed: false,
        })
    }

    async fn find_one(&self, locator: &Locator) -> std::result::Result<Element, CdpError> {
        match locator {
            Locator::Css(selector) => self.page.find_element(selector.clone()).await,
            Locator::XPath(expr) => self.page.find_xpath(expr.clone()).await,
        }
    }

    async fn find_many(&self, locator: &Locator) -> std::result::Result<Vec<Element>, CdpError> {
        match locator {
            Locator::Css(selector) => self.page.find_elements(selector.clone()).await,
            Locator::XPath(expr) => self.page.find_xpaths(expr.clone()).await,
        }
    }
}

async fn first_page(browser: &Browser) -> Result<Page> {
    match browser.pages().await?.into_iter().next() {
        Some(page) => Ok(page),
        None => Ok(browser.new_page("about:blank").await?),
    }
}

fn kill_chrome(chrome: &mut Option<Child>) {
    if let Some(mut child) = chrome.take() {
        let _ = child.kill();
        let _ = child.wait();
    }
}

async fn is_clickable(element: &Element) -> std::result::Result<bool, CdpError> {
    let ret = element.call_js_fn(CLICKABLE_JS, false).await?;
    Ok(ret.result.value.and_then(|v| v.as_bool()).unwrap_or(false))
}

/// Chrome answered, but the node is missing or went stale.
///
/// Anything else means the connection itself failed and must not be
/// mistaken for an element that has not rendered yet.
fn is_page_miss(err: &CdpError) -> bool {
    matches!(
        err,
        CdpError::Chrome(_) | CdpError::NotFound | CdpError::JavascriptException(_)
    )
}

#[async_trait]
impl SessionDriver for CdpDriver {
    type Element = CdpElement;

    async fn navigate(&mut self, url: &str) -> Result<()> {
        tracing::debug!("Navigating to {}", url);
        self.page.goto(url).await?;
        Ok(())
    }

    async fn wait_for(
        &mut self,
        locator: &Locator,
        condition: WaitCondition,
        timeout: Duration,
    ) -> Result<CdpElement> {
        let deadline = Instant::now() + timeout;
        loop {
            // Missing or stale nodes just mean "not there yet" until the deadline
            match self.find_one(locator).await {
                Ok(element) if condition == WaitCondition::Present => {
                    return Ok(CdpElement(element));
                }
                Ok(element) => match is_clickable(&element).await {
                    Ok(true) => return Ok(CdpElement(element)),
                    Ok(false) => tracing::trace!("{} not clickable yet", locator),
                    Err(e) if is_page_miss(&e) => tracing::trace!("{} went stale: {}", locator, e),
                    Err(e) => return Err(e.into()),
                },
                Err(e) if is_page_miss(&e) => tracing::trace!("{} not found yet: {}", locator, e),
                Err(e) => return Err(e.into()),
            }

            if Instant::now() >= deadline {
                return Err(Error::Timeout {
                    locator: locator.to_string(),
                    waited: timeout,
                });
            }
            tokio::time::sleep(POLL_INTERVAL).await;
        }
    }

    async fn wait_for_all(
        &mut self,
        locator: &Locator,
        timeout: Duration,
    ) -> Result<Vec<CdpElement>> {
        let deadline = Instant::now() + timeout;
        loop {
            match self.find_many(locator).await {
                Ok(elements) if !elements.is_empty() => {
                    return Ok(elements.into_iter().map(CdpElement).collect());
                }
                Ok(_) => {}
                Err(e) if is_page_miss(&e) => tracing::trace!("{} not found yet: {}", locator, e),
                Err(e) => return Err(e.into()),
            }

            if Instant::now() >= deadline {
                return Err(Error::Timeout {
                    locator: locator.to_string(),
                    waited: timeout,
                });
            }
            tokio::time::sleep(POLL_INTERVAL).await;
        }
    }

    async fn quit(&mut self) -> Result<()> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;

        let closed = self.browser.close().await;
        self.handler_task.abort();

        kill_chrome(&mut self.chrome);

        closed?;
        Ok(())
    }
}

impl Drop for CdpDriver {
    fn drop(&mut self) {
        // Last resort when quit was never reached
        if let Some(chrome) = self.chrome.as_mut() {
            let _ = chrome.kill();
        }
    }
}

/// Element handle returned by [`CdpDriver`]
pub struct CdpElement(Element);

#[async_trait]
impl PageElement for CdpElement {
    async fn attribute(&self, name: &str) -> Result<Option<String>> {
        Ok(self.0.attribute(name).await?)
    }

    async fn click(&self) -> Result<()> {
        self.0.click().await?;
        Ok(())
    }

    async fn send_keys(&self, text: &str) -> Result<()> {
        self.0.type_str(text).await?;
        Ok(())
    }

    async fn find_all(&self, locator: &Locator) -> Result<Vec<CdpElement>> {
        match locator {
            Locator::Css(selector) => Ok(self
                .0
                .find_elements(selector.clone())
                .await?
                .into_iter()
                .map(CdpElement)
                .collect()),
            Locator::XPath(_) => Err(Error::Browser(format!(
                "{} can only be resolved from the page",
                locator
            ))),
        }
    }
}
