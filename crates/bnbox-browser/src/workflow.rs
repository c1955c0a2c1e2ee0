use crate::driver::SessionDriver;
use crate::{Authenticator, Credentials, InboxLister, MessageExtractor, Result, ScrapeConfig};
use bnbox_core::inbox::MessageRef;
use bnbox_core::message::{MessageRecord, MessageWriter};
use std::path::PathBuf;

/// What a scrape run collected
#[derive(Debug, Clone, Default)]
pub struct WorkflowReport {
    pub refs: Vec<MessageRef>,
    pub messages: Vec<MessageRecord>,
    /// Whether the output file was written
    pub saved: bool,
}

/// Login, list the inbox, extract the open thread, save
pub struct Workflow {
    config: ScrapeConfig,
    output: PathBuf,
}

impl Workflow {
    pub fn new(config: ScrapeConfig, output: impl Into<PathBuf>) -> Self {
        Self {
            config,
            output: output.into(),
        }
    }

    /// Run every step once. The session is closed before returning on every path.
    pub async fn run<D: SessionDriver>(
        &self,
        driver: &mut D,
        credentials: &Credentials,
    ) -> Result<WorkflowReport> {
        let result = self.run_steps(driver, credentials).await;

        match driver.quit().await {
            Ok(()) => tracing::info!("WebDriver closed."),
            Err(e) => tracing::warn!("Failed to close browser: {}", e),
        }

        result
    }

    async fn run_steps<D: SessionDriver>(
        &self,
        driver: &mut D,
        credentials: &Credentials,
    ) -> Result<WorkflowReport> {
        Authenticator::new(&self.config)
            .login(driver, credentials)
            .await?;

        let refs = InboxLister::new(&self.config).list(driver).await?;
        for message_ref in &refs {
            tracing::info!("Conversation {}", message_ref);
        }

        let messages = MessageExtractor::new(&self.config).extract(driver).await?;

        // The run is still a success when the side output cannot be written
        let saved = MessageWriter::save_best_effort(&messages, &self.output);

        Ok(WorkflowReport {
            refs,
            messages,
            saved,
        })
    }
}
