use crate::driver::{Locator, PageElement, SessionDriver};
use crate::{Error, Pacing, Result, ScrapeConfig};
use bnbox_core::inbox::MessageRef;
use std::time::Duration;

const INBOX_ENTRY: &str = "a.pg07rzn";

/// Reads conversation references from the inbox list
pub struct InboxLister {
    inbox_url: String,
    timeout: Duration,
    pacing: Pacing,
}

impl InboxLister {
    pub fn new(config: &ScrapeConfig) -> Self {
        Self {
            inbox_url: config.inbox_url.clone(),
            timeout: config.wait_timeout(),
            pacing: config.pacing(),
        }
    }

    /// List the inbox.
    ///
    /// A page that never shows entries, or shows entries we cannot read,
    /// yields an empty list. Only a broken browser connection is an error.
    pub async fn list<D: SessionDriver>(&self, driver: &mut D) -> Result<Vec<MessageRef>> {
        match self.collect(driver).await {
            Ok(refs) => {
                tracing::info!("Collected message IDs.");
                Ok(refs)
            }
            Err(e) if e.is_lookup_failure() => {
                tracing::error!("Error while retrieving message IDs.");
                tracing::error!("{}", e);
                Ok(Vec::new())
            }
            Err(e) => Err(e),
        }
    }

    async fn collect<D: SessionDriver>(&self, driver: &mut D) -> Result<Vec<MessageRef>> {
        driver.navigate(&self.inbox_url).await?;
        self.pacing.settle().await;

        let locator = Locator::css(INBOX_ENTRY);
        let entries = driver.wait_for_all(&locator, self.timeout).await?;

        let mut refs = Vec::with_capacity(entries.len());
        for entry in &entries {
            let test_id = required_attribute(entry, &locator, "data-testid").await?;
            let item_index = required_attribute(entry, &locator, "data-item-index").await?;
            refs.push(MessageRef::from_attributes(&test_id, &item_index)?);
        }
        Ok(refs)
    }
}

async fn required_attribute<E: PageElement>(
    element: &E,
    locator: &Locator,
    name: &str,
) -> Result<String> {
    element
        .attribute(name)
        .await?
        .ok_or_else(|| Error::MissingAttribute {
            locator: locator.to_string(),
            name: name.to_string(),
        })
}
