//! RWH CLI - Command line tool for rainwater harvesting estimates.

use clap::Parser;

#[derive(Parser)]
#[command(
    name = "rwh-cli",
    version,
    about = "Rooftop rainwater harvesting estimator"
)]
struct Cli {
    #[command(flatten)]
    data: rwh_cmd::DataOptions,

    #[command(subcommand)]
    command: rwh_cmd::Command,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    log::debug!("data options: {:?}", cli.data);
    rwh_cmd::run(&cli.data, cli.command)
}
