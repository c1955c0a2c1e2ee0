use crate::driver::{Locator, PageElement, SessionDriver};
use crate::{Error, Result, ScrapeConfig};
use bnbox_core::message::{MessageRecord, parse_label};
use std::time::Duration;

/// Containers in the thread view; the second one holds the messages
const THREAD_CONTAINER: &str = "t1xp0zmn";
const MESSAGE_BUBBLE: &str = "fwqd6yv";

/// Turns the message bubbles of the open thread into records
pub struct MessageExtractor {
    timeout: Duration,
}

impl MessageExtractor {
    pub fn new(config: &ScrapeConfig) -> Self {
        Self {
            timeout: config.wait_timeout(),
        }
    }

    /// Extract every message shown in the current thread.
    ///
    /// Each bubble always produces a record; fields the label does not
    /// carry take their sentinel values. If the thread view cannot be
    /// found the result is empty.
    pub async fn extract<D: SessionDriver>(&self, driver: &mut D) -> Result<Vec<MessageRecord>> {
        match self.collect(driver).await {
            Ok(records) => {
                tracing::info!("Collected all message data.");
                Ok(records)
            }
            Err(e) if e.is_lookup_failure() => {
                tracing::error!("Error while retrieving messages.");
                tracing::error!("{}", e);
                Ok(Vec::new())
            }
            Err(e) => Err(e),
        }
    }

    async fn collect<D: SessionDriver>(&self, driver: &mut D) -> Result<Vec<MessageRecord>> {
        let containers = driver
            .wait_for_all(&Locator::class(THREAD_CONTAINER), self.timeout)
            .await?;
        let thread = containers.get(1).ok_or_else(|| {
            Error::ElementNotFound(format!(
                "message list in {} (found {} containers)",
                Locator::class(THREAD_CONTAINER),
                containers.len()
            ))
        })?;

        let bubbles = thread.find_all(&Locator::class(MESSAGE_BUBBLE)).await?;
        let mut records = Vec::with_capacity(bubbles.len());
        for bubble in &bubbles {
            let label = bubble.attribute("aria-label").await?.unwrap_or_default();
            let is_last_message =
                bubble.attribute("data-islastmessage").await?.as_deref() == Some("true");

            let record = parse_label(&label).into_record(is_last_message);
            tracing::debug!("{:?}", record);
            records.push(record);
        }
        Ok(records)
    }
}
