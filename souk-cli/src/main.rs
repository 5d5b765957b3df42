use clap::{Parser, Subcommand};
use souk_cli::{
    cmd::{holdings, item, Opts},
    result::Result,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "souk")]
#[command(about = "A souk marketplace CLI tool")]
struct Cli {
    #[command(flatten)]
    opts: Opts,

    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Debug, Subcommand)]
pub enum Cmd {
    Item(item::ItemCmd),
    Holdings(holdings::HoldingsCmd),
}

#[tokio::main]
async fn main() -> Result {
    let cli = Cli::parse();
    let settings = cli.opts.settings()?;
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&settings.log))
        .with(tracing_subscriber::fmt::layer())
        .init();
    run(cli).await
}

async fn run(cli: Cli) -> Result {
    match cli.cmd {
        Cmd::Item(cmd) => cmd.run(cli.opts).await,
        Cmd::Holdings(cmd) => cmd.run(cli.opts).await,
    }
}
