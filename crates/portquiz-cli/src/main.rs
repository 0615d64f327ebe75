//! portquiz CLI — drill network ports and protocols in the terminal.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;
mod data;

#[derive(Parser)]
#[command(name = "portquiz", version, about = "Network port and protocol quiz")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start a quiz session
    Run {
        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,

        /// Directory holding the four data files
        #[arg(long)]
        data_dir: Option<PathBuf>,

        /// Seed for a reproducible question order
        #[arg(long)]
        seed: Option<u64>,

        /// Output format: text, json
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Check that the data files line up
    Validate {
        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,

        /// Directory holding the four data files
        #[arg(long)]
        data_dir: Option<PathBuf>,

        /// Print every record
        #[arg(long)]
        list: bool,
    },

    /// Create starter config and sample data files
    Init,
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("portquiz=warn".parse().unwrap())
                .add_directive("portquiz_core=warn".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run {
            config,
            data_dir,
            seed,
            format,
        } => commands::run::execute(config, data_dir, seed, format),
        Commands::Validate {
            config,
            data_dir,
            list,
        } => commands::validate::execute(config, data_dir, list),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
