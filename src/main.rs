use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use status_square::config::AnimationConfig;
use status_square::coordinator::Coordinator;
use status_square::fetch::HttpFetcher;
use status_square::surface::Surface;

#[derive(Parser)]
#[command(name = "status-square")]
#[command(about = "Animate a square and color it by the result of a request")]
struct Cli {
    /// Config file (defaults to the user config directory)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the animation against a result URL
    Run {
        /// Absolute URL, or relative to --base-url
        url: String,

        /// Base for relative URLs (overrides the config file)
        #[arg(long)]
        base_url: Option<String>,

        /// Frame interval in milliseconds (overrides the config file)
        #[arg(long)]
        frame_ms: Option<u64>,

        /// Print the run report as JSON instead of the rendered surface
        #[arg(long)]
        json: bool,

        /// Give up waiting after this many milliseconds
        #[arg(long)]
        wait_limit_ms: Option<u64>,
    },
    /// Print the effective configuration
    Config,
}

/// Logs go to stderr so stdout only carries the rendered surface or report.
fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| "status_square=info".into()),
    );

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<AnimationConfig> {
    match path {
        Some(path) => AnimationConfig::load_from(path),
        None => Ok(AnimationConfig::load()),
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let mut config = load_config(cli.config.as_ref())?;

    match cli.command {
        Commands::Run {
            url,
            base_url,
            frame_ms,
            json,
            wait_limit_ms,
        } => {
            if let Some(base_url) = base_url {
                config.base_url = Some(base_url);
            }
            if let Some(frame_ms) = frame_ms {
                config.frame_interval_ms = frame_ms;
            }

            let fetcher = match config.base_url.as_deref() {
                Some(base) => HttpFetcher::with_base_url(base).context("Invalid base URL")?,
                None => HttpFetcher::new(),
            };

            let mut surface = Surface::new();
            let coordinator = Coordinator::new(config, fetcher);
            let run = coordinator.run(&mut surface, &url);

            let report = match wait_limit_ms {
                Some(ms) => match tokio::time::timeout(Duration::from_millis(ms), run).await {
                    Ok(report) => Some(report),
                    Err(_) => {
                        tracing::warn!("no result after {}ms, leaving shape as is", ms);
                        None
                    }
                },
                None => Some(run.await),
            };

            match report {
                Some(report) if json => println!("{}", serde_json::to_string_pretty(&report)?),
                _ => print!("{}", surface.render()),
            }
        }
        Commands::Config => {
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
    }

    Ok(())
}
