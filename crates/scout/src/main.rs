use anyhow::{Context, Result};
use clap::Parser;
use scout_e::driver::WebDriverSession;
use scout_e::webdriver::SessionOptions;
use scout_engine::cli::{self, OutputHandlers, RunOptions};
use scout_engine::config::{ConfigLoader, ScoutConfig};
use scout_engine::driver::Driver;
use scout_engine::pipeline::{ScenarioPipeline, Timeouts};
use scout_engine::scenario::ScenarioRegistry;
use std::path::PathBuf;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "scout", version, about = "Runs scripted UX scenarios against a hotel-search site")]
struct Args {
    /// Config file (defaults to ./scout.yaml, then ~/.scout/config.yaml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// WebDriver server URL, overrides the config
    #[arg(short, long)]
    webdriver_url: Option<String>,

    /// Run the browser headless
    #[arg(long)]
    headless: bool,

    /// Scenario to run; repeat for several. Defaults to every configured scenario.
    #[arg(short, long = "scenario")]
    scenarios: Vec<String>,

    /// List configured scenarios and exit
    #[arg(long)]
    list: bool,

    /// Write the results as JSON to this file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Skip remaining scenarios after one halts
    #[arg(long)]
    stop_on_halt: bool,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Logs go to stderr; stdout carries the scenario summaries.
    let default_level = if args.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let mut config = load_config(&args).await?;
    if let Some(url) = &args.webdriver_url {
        config.browser.webdriver_url = url.clone();
    }
    if args.headless {
        config.browser.headless = true;
    }

    let registry = ScenarioRegistry::from_config(&config);
    if args.list {
        for entry in registry.entries() {
            match &entry.description {
                Some(description) => println!("{:<16} {:<14} {}", entry.name, entry.kind, description),
                None => println!("{:<16} {}", entry.name, entry.kind),
            }
        }
        return Ok(());
    }

    let names: Vec<String> = if args.scenarios.is_empty() {
        registry.names().into_iter().map(str::to_string).collect()
    } else {
        args.scenarios.clone()
    };
    // Fail on unknown names before a browser is started.
    registry
        .build_all(&names)
        .context("Invalid scenario selection")?;

    let mut session = WebDriverSession::new(SessionOptions::from(&config.browser));
    session
        .launch()
        .await
        .context("Failed to start WebDriver session")?;
    info!("Session ready.");

    let mut pipeline =
        ScenarioPipeline::with_timeouts(session, Timeouts::from(&config.resolver));
    let output = OutputHandlers {
        out: |msg| println!("{}\n", msg),
        err: |msg| error!("{}", msg),
    };
    let options = RunOptions {
        stop_on_halt: args.stop_on_halt,
    };

    let run = cli::run_scenarios(&mut pipeline, &registry, &names, output, options).await;

    if let Err(e) = pipeline.into_driver().close().await {
        error!("Failed to close session: {}", e);
    }
    let results = run?;

    if let Some(path) = &args.output {
        let json = serde_json::to_string_pretty(&results)?;
        tokio::fs::write(path, json)
            .await
            .with_context(|| format!("Failed to write results to {}", path.display()))?;
        info!("Results written to {}", path.display());
    }

    let halted = results.iter().filter(|r| r.is_halted()).count();
    if halted > 0 {
        info!("{} of {} scenarios halted", halted, results.len());
    }
    Ok(())
}

async fn load_config(args: &Args) -> Result<ScoutConfig> {
    match &args.config {
        Some(path) => ConfigLoader::load_from(path)
            .await
            .with_context(|| format!("Failed to load config from {}", path.display())),
        None => ConfigLoader::load_default()
            .await
            .context("Failed to load config"),
    }
}
