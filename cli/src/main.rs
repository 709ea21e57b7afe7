use clap::Parser;
use loglens_cli::Cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    loglens_cli::run_main(Cli::parse()).await
}
