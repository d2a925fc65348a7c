use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let cli = ezbracket_cli::Cli::parse();
    cli.run()
}
