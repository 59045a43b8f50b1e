mod cli;
mod commands;
mod context;
mod output;

use clap::Parser;
use cli::{Cli, Command};
use libtreedrop_core::TreedropError;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&cli.log_level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let result = run_command(&cli).await;

    if let Err(e) = result {
        output::output_error(&cli, &e);
        std::process::exit(e.exit_code());
    }
}

async fn run_command(cli: &Cli) -> Result<(), TreedropError> {
    match &cli.command {
        Command::Tree { paths } => commands::tree::run(cli, paths).await,
        Command::List { paths } => commands::list::run(cli, paths).await,
        Command::Drag { paths, path } => commands::drag::run(cli, paths, path).await,
        Command::Ask { paths, query, attach } => commands::ask::run(cli, paths, query, attach).await,
        Command::Config { cmd } => commands::config::run(cli, cmd.clone()),
    }
}
