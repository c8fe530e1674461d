use anyhow::Context;
use clap::Parser;
use pa_waste_processor::cli::{run, setup_logging, Cli};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose, cli.quiet);
    run(cli).context("Waste report processing failed")
}
