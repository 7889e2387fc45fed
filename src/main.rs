use std::path::PathBuf;

use clap::Parser;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use foodbites::app::AppContext;
use foodbites::config::{ClientConfig, normalize_api_url};
use foodbites::shell::{CliError, Command, Shell};

#[derive(Parser, Debug)]
#[command(name = "foodbites", about = "FoodBites food-ordering client")]
struct Cli {
    #[arg(long, env = "FOODBITES_API_URL")]
    base_url: Option<String>,

    #[arg(long, env = "FOODBITES_TOKEN_FILE")]
    token_file: Option<PathBuf>,

    /// Run one command and exit; without one, start the interactive shell.
    #[command(subcommand)]
    command: Option<Command>,
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    let dotenv = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    match dotenv {
        Ok(path) => debug!(path = %path.display(), "loaded .env"),
        Err(e) if e.not_found() => {}
        Err(e) => warn!(error = %e, "ignoring unreadable .env"),
    }

    let cli = Cli::parse();
    let mut config = ClientConfig::from_env()?;
    if let Some(url) = cli.base_url.as_deref() {
        config.api_url = normalize_api_url(url);
    }
    if let Some(path) = cli.token_file {
        config.token_file = path;
    }
    info!(api_url = %config.api_url, token_file = %config.token_file.display(), "starting");

    let ctx = AppContext::from_config(&config)?;
    let mut shell = Shell::new(ctx, std::io::stdout());

    match cli.command {
        Some(command) => {
            shell.execute(command).await?;
        }
        None => {
            let stdin = tokio::io::BufReader::new(tokio::io::stdin());
            shell.run(stdin).await?;
        }
    }
    Ok(())
}
