// Licensed under the Apache-2.0 license

use clap::Parser;
use ubnt_dump::{run, Cli};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let _ = simple_logger::SimpleLogger::new()
        .with_level(log::LevelFilter::Warn)
        .env()
        .init();
    run(&cli)
}
