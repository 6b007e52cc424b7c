use clap::Parser;
use nozzlecal::cli::{run, Cli};
use nozzlecal::init_logging;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    init_logging()?;

    run(cli)
}
