use crate::config::{BracketConfig, confique_bracket_config_layer::BracketConfigLayer};
use crate::driver;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use confique::Config;
use std::io::{Read, Write};
use std::path::PathBuf;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "ezbracket")]
#[command(about = "Pairwise bracket voting")]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long)]
    config_path: Option<PathBuf>,

    /// Configuration object
    #[command(flatten)]
    config: BracketConfigLayer,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Fold a stream of JSON actions and print the resulting snapshot
    Replay {
        /// Action file (JSON array or one action per line); stdin if omitted
        file: Option<PathBuf>,
    },
    /// Run a ballot, reading `vote <candidate>` / `next` commands from stdin
    Run {
        /// Candidates in pairing order
        #[arg(required = true, num_args = 2..)]
        candidates: Vec<String>,
    },
    /// Print the resolved configuration as TOML
    Config {
        /// Write the configuration to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

impl Cli {
    pub fn run(self) -> Result<()> {
        let config = self.resolve_config()?;
        init_logging(&config, self.verbose);
        debug!(format = ?config.output.format, trace = config.output.trace, "configuration resolved");

        self.execute(config)
    }

    fn execute(self, config: BracketConfig) -> Result<()> {
        let stdout = std::io::stdout();
        let mut out = stdout.lock();

        match self.command {
            Commands::Replay { file } => {
                let input = match file {
                    Some(path) => std::fs::read_to_string(&path)
                        .with_context(|| format!("reading actions from {}", path.display()))?,
                    None => {
                        let mut buf = String::new();
                        std::io::stdin()
                            .read_to_string(&mut buf)
                            .context("reading actions from stdin")?;
                        buf
                    }
                };

                for line in driver::replay(&input, &config.output)? {
                    writeln!(out, "{line}")?;
                }
            }
            Commands::Run { candidates } => {
                let stdin = std::io::stdin();
                driver::run_session(candidates, stdin.lock(), &mut out, config.output.format)?;
            }
            Commands::Config { output: Some(path) } => {
                config.save(&path)?;
                info!("Configuration written to {}", path.display());
            }
            Commands::Config { output: None } => {
                write!(out, "{}", config.to_toml()?)?;
            }
        }

        Ok(())
    }

    /// Layer flags over environment over the config file over defaults.
    fn resolve_config(&self) -> Result<BracketConfig> {
        let mut builder = BracketConfig::builder()
            .preloaded(self.config.clone())
            .env();

        if let Some(path) = &self.config_path {
            builder = builder.file(path);
        }

        builder.load().context("loading configuration")
    }
}

/// `--verbose` wins, then `RUST_LOG`, then the configured level.
fn log_filter(config: &BracketConfig, verbose: bool) -> EnvFilter {
    if verbose {
        return EnvFilter::new("debug");
    }
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log.level))
}

fn init_logging(config: &BracketConfig, verbose: bool) {
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(config, verbose))
        .with_writer(std::io::stderr)
        .init();
}
