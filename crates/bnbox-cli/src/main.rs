use anyhow::Result;
use bnbox_browser::Credentials;
use bnbox_cli::OutputFormat;
use bnbox_cli::commands::{self, scrape::ScrapeOptions};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "bnbox")]
#[command(author, version)]
#[command(
    about = "Scrape an Airbnb guest inbox into a JSON file",
    long_about = "bnbox signs into Airbnb with a real Chrome session, reads the guest inbox \
                  and turns each message of the open thread into a structured record."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value = "pretty")]
    format: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in, read the inbox and save messages to JSON
    Scrape {
        /// Account email
        #[arg(long, env = "AIRBNB_USERNAME", hide_env_values = true)]
        email: String,

        /// Account password
        #[arg(long, env = "AIRBNB_PASSWORD", hide_env_values = true)]
        password: String,

        /// Where to write the messages
        #[arg(short, long, default_value = "output.json")]
        output: PathBuf,

        /// JSON settings file (URLs, wait timeout, pacing, headless, port)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Path to the Chrome binary
        #[arg(long)]
        chrome_path: Option<PathBuf>,

        /// Named profile kept under ~/.bnbox/profiles (default: temporary profile)
        #[arg(long)]
        profile: Option<String>,

        /// Run Chrome without a window
        #[arg(long)]
        headless: bool,

        /// Skip the randomized pauses between UI steps
        #[arg(long)]
        no_pacing: bool,
    },

    /// Decode message labels without a browser
    Parse {
        /// Label text, e.g. "Alice sent Hello there. Sent 05 Jan 2024, 14:30"
        #[arg(value_name = "LABEL", required = true)]
        labels: Vec<String>,

        /// Mark the records as the last message of their thread
        #[arg(long)]
        last: bool,
    },

    /// Display a saved messages file
    Show {
        /// Path to the messages file
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Generate shell completion scripts
    #[command(after_help = "SUPPORTED SHELLS: bash, zsh, fish, powershell, elvish\n\n\
                  INSTALLATION:\n  \
                  bash: bnbox completion --shell bash >> ~/.bashrc\n  \
                  zsh:  bnbox completion --shell zsh > ~/.zfunc/_bnbox")]
    Completion {
        /// Target shell
        #[arg(long, value_enum)]
        shell: Shell,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    match cli.command {
        Commands::Scrape {
            email,
            password,
            output,
            config,
            chrome_path,
            profile,
            headless,
            no_pacing,
        } => commands::scrape::execute(
            ScrapeOptions {
                credentials: Credentials::new(email, password),
                output,
                config,
                chrome_path,
                profile,
                headless,
                no_pacing,
            },
            cli.format,
        ),
        Commands::Parse { labels, last } => commands::parse::execute(&labels, last, cli.format),
        Commands::Show { file } => commands::show::execute(&file, cli.format),
        Commands::Completion { shell } => {
            commands::completion::execute(shell, &mut Cli::command(), &mut std::io::stdout())
        }
    }
}

fn init_logging(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = if verbose {
        EnvFilter::new("bnbox=debug,bnbox_cli=debug,bnbox_core=debug,bnbox_browser=debug")
    } else {
        EnvFilter::new("bnbox=info,bnbox_cli=info,bnbox_core=info,bnbox_browser=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
