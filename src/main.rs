use anyhow::{Context, Result};
use dwell::config::{apply_env_overrides, load_config, DwellConfig};
use dwell::dispatch::{run_dispatcher, TracingSink};
use dwell::service::feed_lines;
use dwell::{PresenceEngine, PresenceService, RegistrationTable};
use tokio::io::BufReader;
use tracing::{info, warn};

/// Reads JSON-line tag readings (`{"id":[192,5,31,59],"timestamp_ms":1000}`)
/// from stdin and logs the resulting presence effects.
#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing subscriber
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "dwell=info".into()),
        )
        .init();

    info!("Dwell starting...");

    let mut config = match std::env::args().nth(1) {
        Some(path) => {
            info!(path = %path, "Loading configuration");
            load_config(&path)?
        }
        None => {
            info!("No configuration file given, using defaults");
            DwellConfig::default()
        }
    };
    apply_env_overrides(&mut config);

    let table = RegistrationTable::from_config(&config.registry)
        .context("Invalid registration table")?;
    let engine = PresenceEngine::new(table, config.presence.clone());
    let (handle, service_task) = PresenceService::spawn(engine, &config.service);

    let dispatcher = tokio::spawn(run_dispatcher(handle.subscribe(), TracingSink::new()));

    let stdin = BufReader::new(tokio::io::stdin());
    feed_lines(stdin, &handle, async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    })
    .await?;

    // Dropping the last handle stops the service, which closes the event channel
    drop(handle);
    service_task.await.context("Presence service task failed")?;
    dispatcher.await.context("Effect dispatcher task failed")?;

    info!("Dwell stopped");
    Ok(())
}
