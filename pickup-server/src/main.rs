use anyhow::Context;
use pickup_server::{Config, Server, init_logger_with_file};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    let config = Config::from_env().context("invalid configuration")?;
    if let Some(dir) = &config.log_dir {
        std::fs::create_dir_all(dir).with_context(|| format!("cannot create log dir {dir}"))?;
    }
    init_logger_with_file(
        Some(&config.log_level),
        config.is_production(),
        config.log_dir.as_deref(),
    );

    tracing::info!("Pickup server starting...");

    let server = Server::new(config);
    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        return Err(e.into());
    }

    Ok(())
}
