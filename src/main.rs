use chefsort::{cli, config, error, session};
use clap::Parser;
use cli::{Cli, Commands};
use config::Config;
use error::Result;
use session::Session;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // RUST_LOG wins; otherwise warn, or debug with --verbose
    let default_level = if cli.verbose { "chefsort=debug,warn" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(cli).await {
        eprintln!("✖ {}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::List { table } => {
            let config = Config::load()?;
            println!("🍳 chefsort - recipes\n");
            Session::new(config, &table)?.list()?;
        }

        Commands::Show { table, title } => {
            let config = Config::load()?;
            Session::new(config, &table)?.show(title.as_deref())?;
        }

        Commands::Classify { table, title } => {
            let config = Config::load()?;
            println!("🍳 chefsort - classify recipes with {}\n", config.model);
            Session::new(config, &table)?.classify(title.as_deref()).await?;
        }

        Commands::Config { set_api_key, show } => configure(set_api_key, show)?,
    }

    Ok(())
}

/// `chefsort config`, which also works when the config file is broken
fn configure(set_api_key: Option<String>, show: bool) -> Result<()> {
    let path = Config::config_path()?;
    let mut config = Config::load_or_default_from(&path);

    if let Some(key) = set_api_key {
        config.set_api_key(key)?;
        println!("✔ API key saved to {}", path.display());
    }

    if show {
        println!("Settings:");
        println!("  Config file: {}", path.display());
        println!("  Model: {}", config.model);
        println!("  Endpoint: {}", config.endpoint);
        println!("  Data file: {}", config.data_file.display());
        println!("  Sample size: {}", config.sample_size);
        println!("  API key: {}", if config.has_api_key() { "set" } else { "not set" });
    }

    Ok(())
}
