use agdata_processor::cli::{run, Cli};
use anyhow::Context;
use clap::Parser;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    run(cli).context("agdata failed")
}
