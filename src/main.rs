use anyhow::{Error, Result, anyhow};
use tracing_subscriber::EnvFilter;

use emergency_dispatch::{
    api::run_api_server,
    clients::{fcm::FcmClient, rbmq::RabbitMqClient},
    config::Config,
    utils::run_dispatch_worker,
};

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .json()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    rustls::crypto::ring::default_provider()
        .install_default()
        .map_err(|_| anyhow!("Failed to install rustls crypto provider"))?;

    let config = Config::load()?;

    let fcm_client = FcmClient::new(&config).await?;
    let rabbitmq = RabbitMqClient::connect(&config).await?;

    let api = tokio::spawn(run_api_server(config));

    tokio::select! {
        result = api => result??,
        result = run_dispatch_worker(&rabbitmq, &fcm_client) => result?,
    }

    Ok(())
}
