use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use confique::Config;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// How snapshots are written to stdout.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Indented JSON.
    Pretty,
    /// One JSON document per line.
    Compact,
}

#[derive(Config, Clone, Serialize, Deserialize)]
#[config(layer_attr(derive(Args, Serialize, Clone)))]
pub struct BracketConfig {
    #[config(nested, layer_attr(command(flatten)))]
    pub output: OutputConfig,

    #[config(nested, layer_attr(command(flatten)))]
    pub log: LogConfig,
}

#[derive(Clone, Config, Deserialize, Serialize)]
#[config(layer_attr(derive(Args, Clone, Serialize,)))]
pub struct OutputConfig {
    /// Snapshot format
    #[config(
        default = "pretty",
        env = "EZBRACKET_OUTPUT_FORMAT",
        layer_attr(arg(long, value_enum))
    )]
    pub format: OutputFormat,

    /// Print every intermediate snapshot, not just the final one
    #[config(
        default = false,
        env = "EZBRACKET_OUTPUT_TRACE",
        layer_attr(arg(long))
    )]
    pub trace: bool,
}

#[derive(Clone, Config, Deserialize, Serialize)]
#[config(layer_attr(derive(Args, Clone, Serialize,)))]
pub struct LogConfig {
    /// Log filter used when RUST_LOG is not set
    #[config(
        default = "info",
        env = "EZBRACKET_LOG_LEVEL",
        layer_attr(arg(long = "log-level"))
    )]
    pub level: String,
}

impl BracketConfig {
    /// Write the configuration as TOML.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = self.to_toml()?;
        std::fs::write(path.as_ref(), content)
            .with_context(|| format!("writing config to {}", path.as_ref().display()))?;
        Ok(())
    }

    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}
