//! Kingstore operator CLI.

use clap::Parser;
use kingstore::cli::{Cli, run};

fn main() -> anyhow::Result<()> {
    // DATABASE_URL and CHANNEL_ID may come from .env
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    kingstore::init_tracing(cli.verbose).map_err(anyhow::Error::msg)?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    run(cli, &mut out)
}
