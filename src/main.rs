use cryptowork_bot::bot::run_polling;
use cryptowork_bot::configuration::Settings;
use cryptowork_bot::server::serve_health;
use cryptowork_bot::telegram::TelegramClient;
use cryptowork_bot::telemetry::{get_subscriber, init_subscriber, resource_fields};
use tracing::{info, instrument};

#[instrument]
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::from_env()?;

    let subscriber = get_subscriber("cryptowork-bot".into(), settings.log_level.clone());
    init_subscriber(subscriber);

    let [(_, name), (_, version)] = resource_fields();
    info!(service.name = name, service.version = version, "Starting cryptowork-bot");
    info!("Loaded settings: {:?}", settings);

    let api = TelegramClient::new(&settings.api_url, &settings.bot_token)?;

    tokio::select! {
        res = serve_health(settings.health_addr) => res?,
        _ = run_polling(&api, settings.poll_timeout_secs, settings.retry_delay) => (),
        _ = tokio::signal::ctrl_c() => info!("Received Ctrl-C, shutting down"),
    }

    Ok(())
}
