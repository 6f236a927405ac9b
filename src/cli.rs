use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "chefsort")]
#[command(about = "Classify recipes with an LLM via OpenRouter", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Where to read recipes and how many to sample
#[derive(Args, Debug, Clone)]
pub struct TableArgs {
    /// Recipe CSV with Title and Ingredients columns (default: configured data file)
    #[arg(short, long)]
    pub file: Option<PathBuf>,

    /// Number of recipes to sample (default: configured sample size)
    #[arg(short = 'n', long)]
    pub sample: Option<usize>,

    /// Seed for a reproducible sample
    #[arg(long)]
    pub seed: Option<u64>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List the sampled recipe titles
    List {
        #[command(flatten)]
        table: TableArgs,
    },

    /// Show the text that would be sent for a recipe
    Show {
        #[command(flatten)]
        table: TableArgs,

        /// Recipe title (interactive selection when omitted)
        #[arg(short, long)]
        title: Option<String>,
    },

    /// Classify a recipe
    Classify {
        #[command(flatten)]
        table: TableArgs,

        /// Recipe title (interactive selection when omitted)
        #[arg(short, long)]
        title: Option<String>,
    },

    /// Show or edit settings
    Config {
        /// Store the OpenRouter API key
        #[arg(long)]
        set_api_key: Option<String>,

        /// Show settings
        #[arg(long)]
        show: bool,
    },
}
