use pos_server::utils::logger;
use pos_server::{Config, Server};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    // Load .env file
    let _ = dotenvy::dotenv();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            logger::init_logger("info");
            tracing::error!(code = %shared::error::ErrorCode::ConfigError, "Invalid configuration: {e}");
            return Err(e);
        }
    };

    logger::init_logger_with_file(&config.log_level, config.log_dir.as_deref());

    tracing::info!(
        env = %config.environment,
        policy = ?config.order_policy,
        "Starting pos-server"
    );

    let server = Server::from_config(config).await?;
    if let Err(e) = server.run().await {
        tracing::error!("Server error: {e}");
        return Err(e);
    }

    Ok(())
}
