use anyhow::Context;
use clap::Parser;
use lowstock::adapter::inbound::cli::command::{Cli, Commands, ConfigCommand};
use lowstock::adapter::inbound::cli::{config, output, replay, serve};
use lowstock::infrastructure::config::settings::Config;
use tracing::{error, info};

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        error!(error = %e, "Fatal error");
        output::error(&format!("{e:#}"));
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    match &cli.command {
        Commands::Serve => {
            let config = load(&cli, false)?;
            config.init_logging();
            serve::execute(&config).await?;
            info!("lowstock stopped");
        }
        Commands::Replay(args) => {
            let config = load(&cli, args.dry_run)?;
            config.init_logging();
            replay::execute(&config, args).await?;
        }
        Commands::Config(ConfigCommand::Show) => config::execute_show(&cli.config)?,
        Commands::Config(ConfigCommand::Validate) => config::execute_validate(&cli.config)?,
    }
    Ok(())
}

fn load(cli: &Cli, force_dry_run: bool) -> anyhow::Result<Config> {
    Config::load_with(&cli.config, force_dry_run)
        .with_context(|| format!("failed to load config from {}", cli.config.display()))
}
