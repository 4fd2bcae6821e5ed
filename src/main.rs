use std::sync::Arc;

use otaku_client::{
    config::Config,
    services::{HttpBackend, SearchController},
    shell::Shell,
};
use tokio::io::BufReader;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so they never interleave with the shell's view
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("otaku_client=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = Config::from_env()?;
    let backend = HttpBackend::new(&config.backend_url)?;
    tracing::info!(backend_url = %backend.base_url(), "Starting recommender client");

    let controller = SearchController::new(Arc::new(backend));
    let mut shell = Shell::new(controller, tokio::io::stdout(), config.browser_command);

    println!("Otaku Recommender - AI-powered suggestions for your next obsession");
    println!("Type a title to search, :help for commands.\n");

    if config.health_check_on_start {
        shell.report_health().await?;
    }

    shell.run(BufReader::new(tokio::io::stdin())).await?;
    Ok(())
}
