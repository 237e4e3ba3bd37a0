use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use tracing_subscriber::filter::EnvFilter;
use tracing_subscriber::{fmt, prelude::*};

use crate::browser::WebDriverSession;
use crate::browser::webdriver::SessionOptions;
use crate::config::{self, CompiledSelectors, ScraperConfig};
use crate::extract::{ChatScraper, extract_from_snapshot};
use crate::parsers::Snapshot;

#[derive(Parser)]
#[command(name = "webchat-scraper")]
#[command(version = "0.1.0")]
#[command(about = "Extract conversations from a web messaging client", long_about = None)]
pub struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Config file applied on top of the discovered ones
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Scrape every conversation from a live browser session and print JSON
    Scrape {
        /// WebDriver endpoint (e.g. a running chromedriver)
        #[arg(long)]
        webdriver: Option<String>,
        /// Client URL to open
        #[arg(long)]
        url: Option<String>,
        /// Run the browser without a window
        #[arg(long)]
        headless: bool,
        /// Show the browser window even if the config enables headless mode
        #[arg(long, conflicts_with = "headless")]
        headed: bool,
    },
    /// Extract the open conversation from a saved page snapshot
    Parse {
        /// HTML file saved from the client with a conversation open
        snapshot: PathBuf,
    },
    /// Print the effective configuration
    ShowConfig,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match &cli.command {
        Some(command @ Commands::Scrape { .. }) => {
            let mut config = config::load(cli.config.as_deref())?;
            apply_overrides(&mut config, command);
            scrape(config)?;
        }
        Some(Commands::Parse { snapshot }) => {
            let config = config::load(cli.config.as_deref())?;
            parse_snapshot(&config, snapshot)?;
        }
        Some(Commands::ShowConfig) => {
            let config = config::load(cli.config.as_deref())?;
            print!("{}", toml::to_string(&config).context("Failed to serialize config")?);
        }
        None => {
            println!("Use --help for usage information");
        }
    }

    Ok(())
}

/// Apply `scrape` flags on top of the loaded config; unset flags keep the file values
fn apply_overrides(config: &mut ScraperConfig, command: &Commands) {
    let Commands::Scrape { webdriver, url, headless, headed } = command else {
        return;
    };
    if let Some(webdriver) = webdriver {
        config.webdriver_url = webdriver.clone();
    }
    if let Some(url) = url {
        config.url = url.clone();
    }
    if *headless {
        config.headless = true;
    } else if *headed {
        config.headless = false;
    }
}

fn scrape(config: ScraperConfig) -> Result<()> {
    let options = SessionOptions {
        headless: config.headless,
        page_load_timeout: config.timeouts.page_load(),
    };
    let session = WebDriverSession::start(&config.webdriver_url, &options)
        .with_context(|| format!("Failed to start browser session at {}", config.webdriver_url))?;

    let mut scraper = ChatScraper::new(session, config)?;
    let conversations = scraper.scrape_all()?;

    println!("{}", serde_json::to_string_pretty(&conversations)?);
    Ok(())
}

fn parse_snapshot(config: &ScraperConfig, path: &Path) -> Result<()> {
    let markup = fs::read_to_string(path)
        .with_context(|| format!("Failed to read snapshot: {}", path.display()))?;
    let selectors = CompiledSelectors::from_config(&config.selectors)?;

    let snapshot = Snapshot::parse(&markup);
    let conversation = extract_from_snapshot(&snapshot, &selectors, &config.operator_name);

    println!("{}", serde_json::to_string_pretty(&conversation)?);
    Ok(())
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}
