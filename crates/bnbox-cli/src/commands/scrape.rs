use crate::OutputFormat;
use anyhow::{Context, Result};
use bnbox_browser::{
    CdpDriver, ChromeFinder, ChromeLauncher, Credentials, ProfileManager, ScrapeConfig, Workflow,
    WorkflowReport,
};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Everything the `scrape` subcommand takes from the command line
#[derive(Debug, Clone)]
pub struct ScrapeOptions {
    pub credentials: Credentials,
    pub output: PathBuf,
    pub config: Option<PathBuf>,
    pub chrome_path: Option<PathBuf>,
    pub profile: Option<String>,
    pub headless: bool,
    pub no_pacing: bool,
}

/// Resolve the effective settings: config file first, flags on top
pub fn resolve_config(opts: &ScrapeOptions) -> Result<ScrapeConfig> {
    let mut config = match &opts.config {
        Some(path) => ScrapeConfig::from_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => ScrapeConfig::default(),
    };
    if opts.headless {
        config.headless = true;
    }
    if opts.no_pacing {
        config.human_pacing = false;
    }
    Ok(config)
}

pub fn execute(opts: ScrapeOptions, format: OutputFormat) -> Result<()> {
    let config = resolve_config(&opts)?;

    // One session, one step at a time
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    let result = runtime.block_on(async {
        let chrome_binary = ChromeFinder::new(opts.chrome_path.clone()).find()?;
        tracing::info!("Found Chrome at: {}", chrome_binary.display());

        let profile = match &opts.profile {
            Some(name) => ProfileManager::named(name)?,
            None => ProfileManager::temporary()?,
        };
        tracing::debug!("Using profile: {}", profile.path().display());

        let launcher = ChromeLauncher::new(chrome_binary, profile.path().to_path_buf())
            .with_debugging_port(config.debugging_port)
            .with_headless(config.headless);
        let chrome = launcher.launch()?;

        let mut driver = CdpDriver::connect(launcher.debugging_port(), Some(chrome)).await?;
        let report = Workflow::new(config, &opts.output)
            .run(&mut driver, &opts.credentials)
            .await?;

        Ok::<_, anyhow::Error>(report)
    });

    runtime.shutdown_timeout(Duration::from_millis(100));

    let report = result?;
    print_report(&report, &opts.output, format)
}

fn print_report(report: &WorkflowReport, output: &Path, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            let value = serde_json::json!({
                "conversations": report.refs,
                "messages": report.messages,
                "output": output.display().to_string(),
                "saved": report.saved,
            });
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
        OutputFormat::Pretty | OutputFormat::Table => {
            println!("Conversations: {}", report.refs.len());
            for message_ref in &report.refs {
                println!("  {}", message_ref);
            }
            println!("Messages: {}", report.messages.len());
            if report.saved {
                println!("Saved to {}", output.display());
            } else {
                println!("Could not save messages to {}", output.display());
            }
        }
    }
    Ok(())
}
