use clap::Parser;

use clipstack_lib::bootstrap::{self, run};
use clipstack_lib::cli::{Cli, Command};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = bootstrap::resolve_config(cli.config.as_deref())?;
    let data_dir = bootstrap::resolve_data_dir(cli.data_dir, &config)?;

    match cli.command.unwrap_or_default() {
        Command::Watch { console } => {
            if let Err(err) = bootstrap::tracing::init_tracing_subscriber(&data_dir.join("logs")) {
                eprintln!("Failed to initialize tracing: {err:#}");
            }
            run::run_daemon(config, data_dir, console).await
        }
        Command::List => run::print_history(&config, &data_dir).await,
    }
}
