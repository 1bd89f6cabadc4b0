mod cache;
mod cli;
mod config;
mod inventory;
mod scanner;

use anyhow::Result;
use clap::Parser;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init();

    let cli = cli::Cli::parse();
    let config = config::Config::load()?;
    let pool = config::open_pool(&config.db_path).await?;

    cli::dispatch(cli.command, &config, &pool).await
}
