use anyhow::Result;
use clap::Parser;
use job_board::app_log;
use job_board::cli::{handle_command, AppContext, JobBoardCli};
use job_board::core::ConfigManager;
use job_board::logging::init_logging;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = JobBoardCli::parse();

    // Load configuration using unified ConfigManager
    let config = ConfigManager::load()?;

    init_logging(
        config.client.log_format,
        config.client.log_file.as_deref(),
        "info",
    )?;

    app_log!(debug, "Environment: {}", config.environment);
    app_log!(debug, "Backend: {}", config.client.api_base_url);
    app_log!(debug, "Store: {}", config.client.store_path.display());

    let mut ctx = AppContext::open(config, cli.api_url.clone()).await?;
    handle_command(cli, &mut ctx).await
}
